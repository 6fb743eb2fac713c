use cgmath::*;

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: cgmath::Matrix4<f32> = cgmath::Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.5,
    0.0, 0.0, 0.0, 1.0,
);

/// GPU uniform data shared by every camera
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable, Debug)]
pub struct CameraUniform {
    /// The eye position of the camera in homogenous coordinates.
    ///
    /// Homogenous coordinates are used to fullfill the 16 byte alignment requirement.
    pub view_position: [f32; 4],

    /// Contains the view projection matrix.
    pub view_proj: [[f32; 4]; 4],
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self {
            view_position: [0.0; 4],
            view_proj: Matrix4::identity().into(),
        }
    }
}

/// Perspective camera with an explicit eye and aim point
///
/// All three scene cameras are instances of this type; the orbiting one just
/// gets its eye rewritten every frame by the animation driver.
#[derive(Debug, Clone, Copy)]
pub struct ViewCamera {
    pub eye: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    pub aspect: f32,
    pub fovy: Rad<f32>,
    pub znear: f32,
    pub zfar: f32,
    pub uniform: CameraUniform,
}

impl ViewCamera {
    /// Field of view shared by all scene cameras
    pub const FOVY: Deg<f32> = Deg(45.0);
    pub const ZNEAR: f32 = 0.1;
    pub const ZFAR: f32 = 2000.0;

    /// Creates a camera at `eye` aimed at the scene origin
    pub fn new(eye: Point3<f32>, aspect: f32) -> Self {
        let mut camera = Self {
            eye,
            target: Point3::new(0.0, 0.0, 0.0),
            up: Vector3::unit_y(),
            aspect,
            fovy: Self::FOVY.into(),
            znear: Self::ZNEAR,
            zfar: Self::ZFAR,
            uniform: CameraUniform::default(),
        };
        camera.update_view_proj();
        camera
    }

    pub fn build_view_projection_matrix(&self) -> Matrix4<f32> {
        let view = Matrix4::look_at_rh(self.eye, self.target, self.up);
        let proj = OPENGL_TO_WGPU_MATRIX * perspective(self.fovy, self.aspect, self.znear, self.zfar);
        proj * view
    }

    /// View-projection without the wgpu clip-space correction, used by the
    /// picker to invert exactly what was projected
    pub fn view_projection_gl(&self) -> Matrix4<f32> {
        let view = Matrix4::look_at_rh(self.eye, self.target, self.up);
        perspective(self.fovy, self.aspect, self.znear, self.zfar) * view
    }

    /// Re-aims the camera at a point
    pub fn look_at(&mut self, target: Point3<f32>) {
        self.target = target;
    }

    /// Moves the camera eye, keeping the current aim point
    pub fn set_eye(&mut self, eye: Point3<f32>) {
        self.eye = eye;
    }

    /// Recomputes the aspect ratio from viewport dimensions
    pub fn resize_projection(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.aspect = width as f32 / height as f32;
        self.update_view_proj();
    }

    /// Refreshes the GPU uniform from the current camera state
    pub fn update_view_proj(&mut self) {
        self.uniform.view_position = self.eye.to_homogeneous().into();
        self.uniform.view_proj = self.build_view_projection_matrix().into();
    }

    /// Rotates the eye around the aim point (mouse drag)
    pub fn orbit(&mut self, yaw_delta: f32, pitch_delta: f32) {
        let offset = self.eye - self.target;
        let radius = offset.magnitude();
        if radius < f32::EPSILON {
            return;
        }

        let mut yaw = offset.z.atan2(offset.x);
        let mut pitch = (offset.y / radius).clamp(-1.0, 1.0).asin();

        yaw += yaw_delta;
        // Stop just short of the poles so the view never flips
        let pitch_limit = std::f32::consts::FRAC_PI_2 - 0.01;
        pitch = (pitch + pitch_delta).clamp(-pitch_limit, pitch_limit);

        self.eye = self.target
            + Vector3::new(
                radius * pitch.cos() * yaw.cos(),
                radius * pitch.sin(),
                radius * pitch.cos() * yaw.sin(),
            );
    }

    /// Moves the eye along the view direction (mouse wheel)
    pub fn dolly(&mut self, delta: f32) {
        let offset = self.eye - self.target;
        let distance = offset.magnitude();
        if distance < f32::EPSILON {
            return;
        }

        // Scale the step with distance so zoom feels uniform at any range
        let step = distance.log10().max(0.1) * delta;
        let new_distance = (distance + step).max(1.0);
        self.eye = self.target + offset.normalize() * new_distance;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resize_sets_exact_aspect_ratio() {
        let mut camera = ViewCamera::new(Point3::new(200.0, 140.0, 200.0), 1.0);

        camera.resize_projection(1920, 1080);
        assert_eq!(camera.aspect, 1920.0 / 1080.0);

        camera.resize_projection(800, 600);
        assert_eq!(camera.aspect, 800.0 / 600.0);

        // Degenerate sizes leave the projection untouched
        camera.resize_projection(0, 600);
        assert_eq!(camera.aspect, 800.0 / 600.0);
    }

    #[test]
    fn orbit_preserves_distance_to_target() {
        let mut camera = ViewCamera::new(Point3::new(250.0, 200.0, 250.0), 1.0);
        let before = (camera.eye - camera.target).magnitude();

        camera.orbit(0.3, -0.2);
        let after = (camera.eye - camera.target).magnitude();

        assert!((before - after).abs() < 1e-2);
    }

    #[test]
    fn dolly_never_crosses_the_target() {
        let mut camera = ViewCamera::new(Point3::new(0.0, 0.0, 5.0), 1.0);
        for _ in 0..100 {
            camera.dolly(-10.0);
        }
        assert!((camera.eye - camera.target).magnitude() >= 1.0);
    }
}
