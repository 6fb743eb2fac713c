//! Placement tables and variant sets for the repeated forest elements
//!
//! The bamboo grove and the lily pads are placed from paired coordinate
//! tables: index i in the X table and index i in the Z table position one
//! instance. The tables only decide *where* things stand; per-instance
//! size and rotation variants come from the random source the builder is
//! given and never feed back into the tables.

/// Paired X/Z coordinate sequences defining instance positions
///
/// Both sequences have identical length; index i in one corresponds to
/// index i in the other.
#[derive(Debug, Clone, Copy)]
pub struct PlacementTable {
    xs: &'static [f32],
    zs: &'static [f32],
}

impl PlacementTable {
    pub fn new(xs: &'static [f32], zs: &'static [f32]) -> Self {
        assert_eq!(xs.len(), zs.len(), "placement table arrays must pair up");
        Self { xs, zs }
    }

    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// Iterates the paired (x, z) positions in table order
    pub fn iter(&self) -> impl Iterator<Item = (f32, f32)> + '_ {
        self.xs.iter().copied().zip(self.zs.iter().copied())
    }
}

#[rustfmt::skip]
const BAMBOO_X: &[f32] = &[
    -35.0, -30.0, -25.0,
    -35.0, -30.0, -25.0,
    -35.0, -30.0, -25.0,
    -35.0, -30.0, -25.0,
    -35.0, -30.0, -25.0,
    -35.0, -30.0, -25.0,
    -35.0, -30.0, -25.0,
    -35.0, -30.0, -25.0,
    -35.0, -30.0, -25.0,
    -65.0, -60.0, -55.0,
    -65.0, -60.0, -55.0,
    -65.0, -60.0, -55.0,
    -65.0, -60.0, -55.0,
    -65.0, -60.0, -55.0,
    -65.0, -60.0, -55.0,
    -65.0, -60.0, -55.0,
    -65.0, -60.0, -55.0,
    -95.0, -90.0, -85.0,
    -95.0, -90.0, -85.0,
    -95.0, -90.0, -85.0,
    -95.0, -90.0, -85.0,
    -95.0, -90.0, -85.0,
    -95.0, -90.0, -85.0,
    -95.0, -90.0, -85.0,
    -95.0, -90.0, -85.0,
    -95.0, -90.0, -85.0,
    60.0, 55.0, 50.0,
    60.0, 55.0, 50.0,
    60.0, 55.0, 50.0,
    60.0, 55.0, 50.0,
    60.0, 55.0, 50.0,
    60.0, 55.0, 50.0,
    90.0, 85.0, 80.0,
    90.0, 85.0, 80.0,
    90.0, 85.0, 80.0,
    90.0, 85.0, 80.0,
    90.0, 85.0, 80.0,
    90.0, 85.0, 80.0,
    90.0, 85.0, 80.0,
    90.0, 85.0, 80.0,
];

#[rustfmt::skip]
const BAMBOO_Z: &[f32] = &[
    -80.0, -85.0, -83.0,
    -60.0, -65.0, -63.0,
    -40.0, -45.0, -43.0,
    -20.0, -25.0, -23.0,
    0.0, 5.0, 3.0,
    20.0, 25.0, 23.0,
    40.0, 45.0, 43.0,
    60.0, 65.0, 63.0,
    80.0, 85.0, 83.0,
    -70.0, -75.0, -73.0,
    -50.0, -55.0, -53.0,
    -30.0, -35.0, -33.0,
    -10.0, -15.0, -13.0,
    10.0, 15.0, 13.0,
    30.0, 35.0, 33.0,
    50.0, 55.0, 53.0,
    70.0, 75.0, 73.0,
    -80.0, -85.0, -83.0,
    -60.0, -65.0, -63.0,
    -40.0, -45.0, -43.0,
    -20.0, -25.0, -23.0,
    0.0, 5.0, 3.0,
    20.0, 25.0, 23.0,
    40.0, 45.0, 43.0,
    60.0, 65.0, 63.0,
    80.0, 85.0, 83.0,
    -20.0, -25.0, -23.0,
    0.0, 5.0, 3.0,
    20.0, 25.0, 23.0,
    40.0, 45.0, 43.0,
    60.0, 65.0, 63.0,
    80.0, 85.0, 83.0,
    -70.0, -75.0, -73.0,
    -50.0, -55.0, -53.0,
    -30.0, -35.0, -33.0,
    -10.0, -15.0, -13.0,
    10.0, 15.0, 13.0,
    30.0, 35.0, 33.0,
    50.0, 55.0, 53.0,
    70.0, 75.0, 73.0,
];

const LILY_PAD_X: &[f32] = &[
    10.0, 15.0, 20.0, 25.0, 30.0, 32.0, 30.0, 8.0, 11.0, 14.0, 26.0, 31.0,
];
const LILY_PAD_Z: &[f32] = &[
    0.0, 30.0, 60.0, 80.0, 40.0, 90.0, 10.0, 50.0, 85.0, -30.0, -20.0, -10.0,
];

/// Positions of the bamboo stalks
pub fn bamboo_placements() -> PlacementTable {
    PlacementTable::new(BAMBOO_X, BAMBOO_Z)
}

/// Positions of the lily pads on the water strip
pub fn lily_pad_placements() -> PlacementTable {
    PlacementTable::new(LILY_PAD_X, LILY_PAD_Z)
}

/// Height and vertical offset variants for bamboo stalks
///
/// The variant picker only ever lands on the first two entries; the third
/// is part of the tabulated data all the same.
pub const STALK_VARIANTS: &[(f32, f32)] = &[(30.0, 26.0), (42.0, 32.0), (20.0, 21.0)];

/// Vertical jitter variants for the pebble rows
pub const PEBBLE_Y_VARIANTS: &[f32] = &[8.0, 8.4, 7.6];

/// Yaw variants (radians) for the pebble rows
pub const PEBBLE_YAW_VARIANTS: &[f32] = &[20.0, 50.0, 80.0, 110.0];

/// X positions of the two pebble rows
pub const PEBBLE_ROW_X: &[f32] = &[2.0, 38.0];

/// Pebbles per row, spaced along Z from the row start
pub const PEBBLES_PER_ROW: usize = 74;
pub const PEBBLE_ROW_Z_START: f32 = -48.0;
pub const PEBBLE_SPACING: f32 = 2.0;

/// X positions of the two hills at the back of the scene
pub const HILL_X: &[f32] = &[10.0, 40.0];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bamboo_tables_pair_up() {
        let table = bamboo_placements();
        assert_eq!(table.len(), 120);
        assert_eq!(table.iter().count(), 120);
    }

    #[test]
    fn lily_pad_tables_pair_up() {
        let table = lily_pad_placements();
        assert_eq!(table.len(), 12);
    }

    #[test]
    fn iteration_preserves_pairing() {
        let table = lily_pad_placements();
        let first = table.iter().next().unwrap();
        assert_eq!(first, (10.0, 0.0));

        let last = table.iter().last().unwrap();
        assert_eq!(last, (31.0, -10.0));
    }

    #[test]
    #[should_panic]
    fn mismatched_tables_are_rejected() {
        PlacementTable::new(&[1.0, 2.0], &[1.0]);
    }
}
