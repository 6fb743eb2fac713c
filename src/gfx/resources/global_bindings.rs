//! Global uniform bindings for camera and lighting data
//!
//! Manages the GPU uniform buffer and bind group for per-frame global state
//! shared by all objects: the active camera's matrices and the three light
//! sources, including the moving light's shadow projection.

use crate::{
    gfx::{camera::view_camera::CameraUniform, scene::light::LightRig},
    wgpu_utils::{
        binding_builder::{BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc},
        binding_types,
        uniform_buffer::UniformBuffer,
    },
};

/// Global uniform buffer content structure
///
/// MUST match the Globals struct in the shaders exactly.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GlobalUBOContent {
    // Camera data
    view_position: [f32; 4],
    view_proj: [[f32; 4]; 4],

    // Light data
    ambient_color: [f32; 3],
    ambient_intensity: f32,
    point_position: [f32; 3],
    point_intensity: f32,
    point_color: [f32; 3],
    _padding0: f32,
    spot_position: [f32; 3],
    spot_intensity: f32,
    spot_color: [f32; 3],
    _padding1: f32,

    // Moving light's view-projection matrix for shadow lookups
    light_view_proj: [[f32; 4]; 4],
}

/// Type alias for the global uniform buffer
pub type GlobalUBO = UniformBuffer<GlobalUBOContent>;

/// Updates the global uniform buffer with camera and light data
///
/// Called each frame after the frame driver has moved the sun, so the shadow
/// projection follows the light around its orbit.
pub fn update_global_ubo(
    ubo: &mut GlobalUBO,
    queue: &wgpu::Queue,
    camera: CameraUniform,
    lights: &LightRig,
) {
    let content = GlobalUBOContent {
        view_position: camera.view_position,
        view_proj: camera.view_proj,

        ambient_color: lights.ambient.color,
        ambient_intensity: lights.ambient.intensity,
        point_position: lights.point.position.into(),
        point_intensity: lights.point.intensity,
        point_color: lights.point.color,
        _padding0: 0.0,
        spot_position: lights.spot.position.into(),
        spot_intensity: lights.spot.intensity,
        spot_color: lights.spot.color,
        _padding1: 0.0,

        light_view_proj: lights.spot.shadow_view_projection().into(),
    };

    ubo.update_content(queue, content);
}

/// Manages bind group layout and bind group for global uniforms
///
/// Bound to slot 0 in all render pipelines.
pub struct GlobalBindings {
    bind_group_layout: BindGroupLayoutWithDesc,
    bind_group: Option<wgpu::BindGroup>,
}

impl GlobalBindings {
    pub fn new(device: &wgpu::Device) -> Self {
        let bind_group_layout = BindGroupLayoutBuilder::new()
            .next_binding_rendering(binding_types::uniform()) // Camera + lights
            .create(device, "Globals Bind Group");

        GlobalBindings {
            bind_group_layout,
            bind_group: None,
        }
    }

    /// Creates the bind group with the provided uniform buffer
    ///
    /// Must be called after the uniform buffer is created and before
    /// any rendering operations that need global uniforms.
    pub fn create_bind_group(&mut self, device: &wgpu::Device, ubo: &GlobalUBO) {
        self.bind_group = Some(
            BindGroupBuilder::new(&self.bind_group_layout)
                .resource(ubo.binding_resource())
                .create(device, "Global Bind Group"),
        );
    }

    /// Returns the bind group layout
    pub fn bind_group_layouts(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout.layout
    }

    /// Returns the bind group for rendering
    ///
    /// # Panics
    /// Panics if `create_bind_group()` hasn't been called yet
    pub fn bind_groups(&self) -> &wgpu::BindGroup {
        self.bind_group
            .as_ref()
            .expect("Bind group has not been created yet!")
    }
}
