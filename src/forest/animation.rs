//! Per-frame animation math
//!
//! Everything that moves does so on a horizontal circle driven by one
//! monotonically growing clock: the sun and its tracking light on a small
//! circle, the orbiting camera on a larger one. The clock is never reset;
//! it only ever feeds sine and cosine, so unbounded growth is harmless.

/// Clock advanced by a fixed step once per rendered frame
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameClock {
    t: f32,
}

impl FrameClock {
    /// Per-frame increment of the accumulator
    pub const STEP: f32 = 0.005;

    pub fn new() -> Self {
        Self { t: 0.0 }
    }

    /// Advances the clock by one frame step and returns the new value
    pub fn tick(&mut self) -> f32 {
        self.t += Self::STEP;
        self.t
    }

    pub fn value(&self) -> f32 {
        self.t
    }
}

/// Radius of the circle the sun and its light travel
pub const SUN_ORBIT_RADIUS: f32 = 70.0;
/// Fixed height of the sun sphere and ring
pub const SUN_HEIGHT: f32 = 125.0;
/// Fixed height of the light tracking the sun
pub const SUN_LIGHT_HEIGHT: f32 = 60.0;
/// Per-frame spin applied to the sun's own mesh
pub const SUN_SPIN_STEP: f32 = 0.01;

/// Radius of the orbiting camera's circle
pub const CAMERA_ORBIT_RADIUS: f32 = 250.0;
/// Fixed height of the orbiting camera
pub const CAMERA_ORBIT_HEIGHT: f32 = 200.0;

/// Position on a horizontal circle of the given radius at clock value t
pub fn orbit_position(t: f32, radius: f32) -> (f32, f32) {
    (radius * t.cos(), radius * t.sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_advances_by_fixed_step() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.value(), 0.0);

        clock.tick();
        clock.tick();
        clock.tick();

        assert!((clock.value() - 3.0 * FrameClock::STEP).abs() < 1e-6);
    }

    #[test]
    fn clock_never_decreases() {
        let mut clock = FrameClock::new();
        let mut previous = clock.value();
        for _ in 0..10_000 {
            let now = clock.tick();
            assert!(now > previous);
            previous = now;
        }
    }

    #[test]
    fn orbit_starts_on_the_positive_x_axis() {
        let (x, z) = orbit_position(0.0, SUN_ORBIT_RADIUS);
        assert_eq!(x, SUN_ORBIT_RADIUS);
        assert_eq!(z, 0.0);
    }

    #[test]
    fn orbit_position_matches_trigonometry() {
        for &t in &[0.0f32, 0.005, 1.0, 3.2, 100.5, 9999.0] {
            let (x, z) = orbit_position(t, SUN_ORBIT_RADIUS);
            assert!((x - 70.0 * t.cos()).abs() < 1e-4);
            assert!((z - 70.0 * t.sin()).abs() < 1e-4);
        }
    }

    #[test]
    fn orbit_stays_on_the_circle() {
        for &t in &[0.1f32, 2.7, 42.0] {
            let (x, z) = orbit_position(t, CAMERA_ORBIT_RADIUS);
            let radius = (x * x + z * z).sqrt();
            assert!((radius - CAMERA_ORBIT_RADIUS).abs() < 1e-2);
        }
    }
}
