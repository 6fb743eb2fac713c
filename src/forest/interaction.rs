//! Discrete interaction state: the text color toggle and panda movement
//!
//! Pure state transitions with no winit or GPU types, so the click and
//! keyboard behaviors are testable in isolation. The app layer maps raw
//! input events onto these.

use cgmath::Vector3;

use crate::gfx::scene::Scene;

/// Resting color of the welcome banner (forest green)
pub const TEXT_REST_COLOR: [f32; 4] = [0.0, 0.502, 0.0, 1.0];
/// Highlighted color after a qualifying click (yellow)
pub const TEXT_HIGHLIGHT_COLOR: [f32; 4] = [1.0, 1.0, 0.0, 1.0];

/// Tracks whether the welcome text currently shows its highlighted color
///
/// Starts un-highlighted. One qualifying click flips it exactly once, no
/// matter how many intersections the pick ray reported.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextHighlight {
    highlighted: bool,
}

impl TextHighlight {
    pub fn new() -> Self {
        Self { highlighted: false }
    }

    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    /// Flips the state and returns the color the text should now show
    pub fn flip(&mut self) -> [f32; 4] {
        self.highlighted = !self.highlighted;
        self.color()
    }

    /// The color matching the current state
    pub fn color(&self) -> [f32; 4] {
        if self.highlighted {
            TEXT_HIGHLIGHT_COLOR
        } else {
            TEXT_REST_COLOR
        }
    }
}

/// The four panda movement directions, one per movement key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    /// W: +X
    Forward,
    /// A: -Z
    Left,
    /// S: -X
    Backward,
    /// D: +Z
    Right,
}

impl MoveDirection {
    /// The unit step one keypress applies to the movable panda
    pub fn step(self) -> Vector3<f32> {
        match self {
            MoveDirection::Forward => Vector3::new(1.0, 0.0, 0.0),
            MoveDirection::Left => Vector3::new(0.0, 0.0, -1.0),
            MoveDirection::Backward => Vector3::new(-1.0, 0.0, 0.0),
            MoveDirection::Right => Vector3::new(0.0, 0.0, 1.0),
        }
    }
}

/// Applies one movement keypress to the movable model
///
/// A no-op until the model's async load has populated the index; presses
/// before that cause zero displacement rather than a fault.
pub fn apply_movement(scene: &mut Scene, movable: Option<usize>, direction: MoveDirection) {
    let Some(index) = movable else {
        return;
    };
    if let Some(object) = scene.get_object_mut(index) {
        object.translate(direction.step());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forest::builder::forest_lights;
    use crate::gfx::camera::rig::CameraRig;
    use crate::gfx::scene::object::SceneObject;

    #[test]
    fn highlight_starts_off_and_flips_per_click() {
        let mut highlight = TextHighlight::new();
        assert!(!highlight.is_highlighted());
        assert_eq!(highlight.color(), TEXT_REST_COLOR);

        assert_eq!(highlight.flip(), TEXT_HIGHLIGHT_COLOR);
        assert!(highlight.is_highlighted());

        // Second click restores the initial color
        assert_eq!(highlight.flip(), TEXT_REST_COLOR);
        assert!(!highlight.is_highlighted());
    }

    #[test]
    fn movement_steps_are_unit_and_axis_aligned() {
        for dir in [
            MoveDirection::Forward,
            MoveDirection::Left,
            MoveDirection::Backward,
            MoveDirection::Right,
        ] {
            let step = dir.step();
            assert_eq!(step.y, 0.0);
            assert_eq!(step.x.abs() + step.z.abs(), 1.0);
        }
    }

    #[test]
    fn net_displacement_counts_opposing_presses() {
        // n1 Forward, n2 Left, n3 Backward, n4 Right presses
        let (n1, n2, n3, n4) = (5, 2, 3, 7);

        let mut total = Vector3::new(0.0, 0.0, 0.0);
        for _ in 0..n1 {
            total += MoveDirection::Forward.step();
        }
        for _ in 0..n2 {
            total += MoveDirection::Left.step();
        }
        for _ in 0..n3 {
            total += MoveDirection::Backward.step();
        }
        for _ in 0..n4 {
            total += MoveDirection::Right.step();
        }

        assert_eq!(total, Vector3::new((n1 - n3) as f32, 0.0, (n4 - n2) as f32));
    }

    #[test]
    fn movement_is_a_no_op_until_the_model_is_populated() {
        let mut scene = Scene::new(CameraRig::new(1.0), forest_lights());
        let index = scene.add_object(
            SceneObject::new("panda1", Vec::new()).with_position(-8.0, 11.0, 20.0),
        );

        // Any number of presses before the reference exists moves nothing
        for _ in 0..10 {
            apply_movement(&mut scene, None, MoveDirection::Forward);
        }
        assert_eq!(
            scene.get_object(index).unwrap().position,
            Vector3::new(-8.0, 11.0, 20.0)
        );

        // Once populated, each press moves exactly one unit
        apply_movement(&mut scene, Some(index), MoveDirection::Forward);
        apply_movement(&mut scene, Some(index), MoveDirection::Right);
        apply_movement(&mut scene, Some(index), MoveDirection::Right);
        assert_eq!(
            scene.get_object(index).unwrap().position,
            Vector3::new(-7.0, 11.0, 22.0)
        );
    }
}
