//! WGPU-based rendering engine for the forest scene
//!
//! Owns the surface, device and queue, the depth buffer, the moving light's
//! shadow map and the two render pipelines. A frame is a shadow depth pass
//! from the light's point of view followed by the main lit pass from the
//! active camera.

use std::sync::Arc;
use wgpu::TextureFormat;

use crate::gfx::{
    camera::view_camera::CameraUniform,
    resources::{
        global_bindings::{update_global_ubo, GlobalBindings, GlobalUBO},
        material::MaterialBindings,
        texture_resource::TextureResource,
    },
    scene::{light::LightRig, object::DrawObject, scene::Scene},
};

use super::pipelines::ScenePipelines;

/// Core rendering engine managing GPU resources and draw calls
pub struct RenderEngine {
    surface: wgpu::Surface<'static>,
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    config: wgpu::SurfaceConfiguration,
    format: TextureFormat,
    depth_texture: TextureResource,
    shadow_map: TextureResource,
    shadow_bind_group: wgpu::BindGroup,
    pipelines: ScenePipelines,
    global_ubo: GlobalUBO,
    global_bindings: GlobalBindings,
}

impl RenderEngine {
    /// Creates a new render engine for the given window
    ///
    /// Initializes wgpu with default settings, creates the depth buffer and
    /// the shadow map, and builds both render pipelines.
    ///
    /// # Panics
    /// Panics if unable to create a wgpu adapter or device; there is no
    /// rendering without them.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        width: u32,
        height: u32,
        shadow_map_size: u32,
    ) -> RenderEngine {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance
            .create_surface(window)
            .expect("Failed to create surface!");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to request adapter!");

        let (device, queue) = {
            adapter
                .request_device(&wgpu::DeviceDescriptor {
                    label: Some("WGPU Device"),
                    required_features: wgpu::Features::default(),
                    required_limits: wgpu::Limits {
                        max_texture_dimension_2d: 4096,
                        ..wgpu::Limits::downlevel_defaults()
                    },
                    memory_hints: wgpu::MemoryHints::default(),
                    trace: wgpu::Trace::Off,
                })
                .await
                .expect("Failed to request a device!")
        };

        let surface_capabilities = surface.get_capabilities(&adapter);
        let format = surface_capabilities
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .unwrap_or(surface_capabilities.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            // One frame per display refresh drives the animation clock
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_capabilities.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let depth_texture =
            TextureResource::create_depth_texture(&device, &config, "depth_texture");

        let shadow_map = TextureResource::create_shadow_map(&device, shadow_map_size.max(1));

        // Shadow lookup bindings for the main pass
        let shadow_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Shadow Layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        multisampled: false,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        sample_type: wgpu::TextureSampleType::Depth,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Comparison),
                    count: None,
                },
            ],
        });

        let shadow_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Shadow Bind Group"),
            layout: &shadow_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&shadow_map.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&shadow_map.sampler),
                },
            ],
        });

        let global_ubo = GlobalUBO::new(&device);
        let mut global_bindings = GlobalBindings::new(&device);
        global_bindings.create_bind_group(&device, &global_ubo);

        // Per-object transform layout matching SceneObject::init_gpu_resources
        let transform_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Transform Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    // The fragment stage reads the receives_shadow flag
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        // Temporary bindings just to get the shared material layout
        let temp_material_bindings = MaterialBindings::new(&device);
        let material_bind_group_layout = temp_material_bindings.bind_group_layouts();

        let pipelines = ScenePipelines::new(
            &device,
            format,
            global_bindings.bind_group_layouts(),
            &transform_bind_group_layout,
            material_bind_group_layout,
            &shadow_layout,
        );

        RenderEngine {
            surface,
            device: device.into(),
            queue: queue.into(),
            config,
            format,
            depth_texture,
            shadow_map,
            shadow_bind_group,
            pipelines,
            global_ubo,
            global_bindings,
        }
    }

    /// Updates camera and light uniform buffers
    ///
    /// Should be called each frame after the animation driver has moved the
    /// sun, so the shadow projection follows the light.
    pub fn update(&mut self, camera_uniform: CameraUniform, lights: &LightRig) {
        update_global_ubo(&mut self.global_ubo, &self.queue, camera_uniform, lights);
    }

    /// Renders a frame: shadow depth pass, then the main lit pass
    pub fn render_frame(&mut self, scene: &Scene) {
        let surface_texture = self
            .surface
            .get_current_texture()
            .expect("Failed to get surface texture!");

        let surface_texture_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        // PASS 1: shadow map from the moving light
        {
            let mut shadow_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Shadow Depth Pass"),
                color_attachments: &[], // Depth only
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.shadow_map.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            shadow_pass.set_pipeline(&self.pipelines.shadow);
            shadow_pass.set_bind_group(0, self.global_bindings.bind_groups(), &[]);

            for object in scene.objects.iter() {
                if object.visible && object.cast_shadow {
                    if let Some(transform_bind_group) = object.get_transform_bind_group() {
                        shadow_pass.set_bind_group(1, transform_bind_group, &[]);
                        shadow_pass.draw_object(object);
                    }
                }
            }
        }

        // PASS 2: main scene from the active camera
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Main Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_texture_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: 0.1,
                            g: 0.2,
                            b: 0.3,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            render_pass.set_pipeline(&self.pipelines.forest);
            render_pass.set_bind_group(0, self.global_bindings.bind_groups(), &[]);
            render_pass.set_bind_group(3, &self.shadow_bind_group, &[]);

            for object in scene.objects.iter() {
                if !object.visible {
                    continue;
                }

                let material = scene.get_material_for_object(object);
                let (Some(transform_bind_group), Some(material_bind_group)) =
                    (object.get_transform_bind_group(), material.get_bind_group())
                else {
                    // Not GPU-initialized yet (an async load mid-arrival)
                    continue;
                };

                render_pass.set_bind_group(1, transform_bind_group, &[]);
                render_pass.set_bind_group(2, material_bind_group, &[]);
                render_pass.draw_object(object);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();
    }

    /// Resizes the render engine surface and recreates the depth buffer
    ///
    /// Degenerate dimensions are ignored. The shadow map keeps its fixed
    /// resolution.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }

        self.config.width = width;
        self.config.height = height;

        self.surface.configure(&self.device, &self.config);

        self.depth_texture =
            TextureResource::create_depth_texture(&self.device, &self.config, "depth_texture");
    }

    /// Returns current surface dimensions
    pub fn get_surface_size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    /// Returns reference to the wgpu device
    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    /// Returns reference to the wgpu command queue
    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// Returns the surface texture format
    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.format
    }
}
