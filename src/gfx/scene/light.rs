//! Light sources for the scene
//!
//! The forest carries one ambient light, one static point light and one
//! moving spot light. The spot light is the only shadow caster and owns the
//! shadow-projection parameters used by the shadow pass.

use cgmath::{Deg, EuclideanSpace, InnerSpace, Matrix4, Point3, Vector3};

use crate::gfx::camera::view_camera::OPENGL_TO_WGPU_MATRIX;

/// Uniform base illumination
#[derive(Debug, Clone, Copy)]
pub struct AmbientLight {
    pub color: [f32; 3],
    pub intensity: f32,
}

/// Omnidirectional light at a fixed position
#[derive(Debug, Clone, Copy)]
pub struct PointLight {
    pub position: Vector3<f32>,
    pub color: [f32; 3],
    pub intensity: f32,
}

/// Shadow-casting spot light aimed at the scene origin
#[derive(Debug, Clone, Copy)]
pub struct SpotLight {
    pub position: Vector3<f32>,
    pub color: [f32; 3],
    pub intensity: f32,
    pub shadow_map_size: u32,
    pub shadow_near: f32,
    pub shadow_far: f32,
    pub shadow_fovy: Deg<f32>,
}

impl SpotLight {
    /// View-projection matrix for rendering the shadow map from this light
    ///
    /// Includes the wgpu clip-space correction so the shadow pass writes and
    /// the main pass samples the same [0, 1] depth range.
    pub fn shadow_view_projection(&self) -> Matrix4<f32> {
        let eye = Point3::from_vec(self.position);
        let target = Point3::new(0.0, 0.0, 0.0);

        // look_at degenerates when the light sits straight above the target
        let direction = (target - eye).normalize();
        let up = if direction.cross(Vector3::unit_y()).magnitude2() < 1e-6 {
            Vector3::unit_z()
        } else {
            Vector3::unit_y()
        };

        let view = Matrix4::look_at_rh(eye, target, up);
        let proj = cgmath::perspective(self.shadow_fovy, 1.0, self.shadow_near, self.shadow_far);
        OPENGL_TO_WGPU_MATRIX * proj * view
    }
}

/// The scene's complete light setup
#[derive(Debug, Clone, Copy)]
pub struct LightRig {
    pub ambient: AmbientLight,
    pub point: PointLight,
    pub spot: SpotLight,
}

impl Default for LightRig {
    fn default() -> Self {
        Self {
            ambient: AmbientLight {
                color: [1.0, 1.0, 1.0],
                intensity: 0.5,
            },
            point: PointLight {
                position: Vector3::new(0.0, 10.0, 0.0),
                color: [1.0, 1.0, 1.0],
                intensity: 1.0,
            },
            spot: SpotLight {
                position: Vector3::new(0.0, 10.0, 0.0),
                color: [1.0, 1.0, 1.0],
                intensity: 1.0,
                shadow_map_size: 512,
                shadow_near: 0.5,
                shadow_far: 500.0,
                shadow_fovy: Deg(45.0),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shadow_projection_handles_overhead_light() {
        let spot = SpotLight {
            position: Vector3::new(0.0, 60.0, 0.0),
            ..LightRig::default().spot
        };

        let matrix = spot.shadow_view_projection();
        for i in 0..4 {
            for j in 0..4 {
                assert!(matrix[i][j].is_finite());
            }
        }
    }
}
