use cgmath::Point3;
use winit::{event::DeviceEvent, window::Window};

use super::{orbit_controller::OrbitController, view_camera::ViewCamera};

/// Which of the three scene cameras is active
///
/// Exactly one mode is active at a time; the cycle order is fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraMode {
    Front,
    Back,
    Orbiting,
}

impl CameraMode {
    /// The next mode in the fixed cycle Front -> Back -> Orbiting -> Front
    pub fn next(self) -> Self {
        match self {
            CameraMode::Front => CameraMode::Back,
            CameraMode::Back => CameraMode::Orbiting,
            CameraMode::Orbiting => CameraMode::Front,
        }
    }
}

/// The scene's three cameras plus the orbit-control binding
pub struct CameraRig {
    pub mode: CameraMode,
    pub front: ViewCamera,
    pub back: ViewCamera,
    pub orbiting: ViewCamera,
    pub controller: OrbitController,
}

impl CameraRig {
    /// Canonical eye positions the fixed cameras return to on deactivation
    pub const FRONT_EYE: [f32; 3] = [200.0, 140.0, 200.0];
    pub const BACK_EYE: [f32; 3] = [-200.0, 140.0, -200.0];
    pub const ORBIT_EYE: [f32; 3] = [250.0, 200.0, 250.0];

    const ROTATE_SPEED: f32 = 0.005;
    const ZOOM_SPEED: f32 = 0.5;

    pub fn new(aspect: f32) -> Self {
        Self {
            mode: CameraMode::Front,
            front: ViewCamera::new(Self::FRONT_EYE.into(), aspect),
            back: ViewCamera::new(Self::BACK_EYE.into(), aspect),
            orbiting: ViewCamera::new(Self::ORBIT_EYE.into(), aspect),
            controller: OrbitController::new(Self::ROTATE_SPEED, Self::ZOOM_SPEED),
        }
    }

    pub fn active(&self) -> &ViewCamera {
        match self.mode {
            CameraMode::Front => &self.front,
            CameraMode::Back => &self.back,
            CameraMode::Orbiting => &self.orbiting,
        }
    }

    pub fn active_mut(&mut self) -> &mut ViewCamera {
        match self.mode {
            CameraMode::Front => &mut self.front,
            CameraMode::Back => &mut self.back,
            CameraMode::Orbiting => &mut self.orbiting,
        }
    }

    /// Advances to the next camera mode
    ///
    /// The camera being deactivated is put back at its canonical position if
    /// it is one of the two fixed ones, since mouse orbiting may have left it
    /// somewhere stale. A fresh controller is bound to the new active camera,
    /// dropping any drag state held by the previous binding.
    pub fn cycle(&mut self) {
        let leaving = self.mode;
        self.mode = self.mode.next();

        match leaving {
            CameraMode::Front => self.front.set_eye(Point3::from(Self::FRONT_EYE)),
            CameraMode::Back => self.back.set_eye(Point3::from(Self::BACK_EYE)),
            CameraMode::Orbiting => {}
        }

        self.controller = OrbitController::new(Self::ROTATE_SPEED, Self::ZOOM_SPEED);
    }

    /// Routes a device event to the orbit controller bound to the active camera
    pub fn process_event(&mut self, event: &DeviceEvent, window: &Window) {
        let camera = match self.mode {
            CameraMode::Front => &mut self.front,
            CameraMode::Back => &mut self.back,
            CameraMode::Orbiting => &mut self.orbiting,
        };
        self.controller.process_events(event, window, camera);
    }

    /// Applies new viewport dimensions to the active camera's projection
    pub fn resize(&mut self, width: u32, height: u32) {
        self.active_mut().resize_projection(width, height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Point3;

    #[test]
    fn mode_cycles_front_back_orbiting() {
        let mut mode = CameraMode::Front;
        mode = mode.next();
        assert_eq!(mode, CameraMode::Back);
        mode = mode.next();
        assert_eq!(mode, CameraMode::Orbiting);
        mode = mode.next();
        assert_eq!(mode, CameraMode::Front);
    }

    #[test]
    fn three_cycles_return_to_front() {
        let mut rig = CameraRig::new(1.0);
        assert_eq!(rig.mode, CameraMode::Front);

        rig.cycle();
        rig.cycle();
        rig.cycle();

        assert_eq!(rig.mode, CameraMode::Front);
    }

    #[test]
    fn deactivated_fixed_camera_is_reset() {
        let mut rig = CameraRig::new(1.0);

        // Drag the front camera somewhere else, then switch away from it
        rig.front.orbit(1.0, 0.3);
        assert_ne!(rig.front.eye, Point3::from(CameraRig::FRONT_EYE));

        rig.cycle();

        assert_eq!(rig.mode, CameraMode::Back);
        assert_eq!(rig.front.eye, Point3::from(CameraRig::FRONT_EYE));
    }

    #[test]
    fn orbiting_camera_keeps_its_position_on_cycle() {
        let mut rig = CameraRig::new(1.0);
        rig.cycle(); // Back
        rig.cycle(); // Orbiting

        rig.orbiting.set_eye(Point3::new(0.0, 200.0, 250.0));
        rig.cycle(); // Front

        assert_eq!(rig.orbiting.eye, Point3::new(0.0, 200.0, 250.0));
    }

    #[test]
    fn resize_applies_to_active_camera() {
        let mut rig = CameraRig::new(1.0);
        rig.cycle(); // Back is active

        rig.resize(1600, 900);

        assert_eq!(rig.back.aspect, 1600.0 / 900.0);
        assert_eq!(rig.front.aspect, 1.0);
    }
}
