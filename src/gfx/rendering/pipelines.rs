//! Render pipeline construction
//!
//! Builds the two fixed pipelines the renderer needs: the depth-only shadow
//! pass rendered from the moving light, and the main textured/lit scene pass.
//! Neither pass culls back faces: the sun ring, the lily-pad discs and the
//! inward-facing skybox quads are all visible from both sides.

use wgpu::Device;

use crate::gfx::{resources::texture_resource::TextureResource, scene::vertex::Vertex3D};

/// The fixed set of pipelines used to draw a frame
pub struct ScenePipelines {
    pub shadow: wgpu::RenderPipeline,
    pub forest: wgpu::RenderPipeline,
}

impl ScenePipelines {
    pub fn new(
        device: &Device,
        surface_format: wgpu::TextureFormat,
        globals_layout: &wgpu::BindGroupLayout,
        transform_layout: &wgpu::BindGroupLayout,
        material_layout: &wgpu::BindGroupLayout,
        shadow_layout: &wgpu::BindGroupLayout,
    ) -> Self {
        let forest_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Forest Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("forest.wgsl").into()),
        });
        let shadow_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Shadow Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shadow.wgsl").into()),
        });

        let shadow_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Shadow Pipeline Layout"),
                bind_group_layouts: &[globals_layout, transform_layout],
                push_constant_ranges: &[],
            });

        let shadow = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Shadow Pipeline"),
            layout: Some(&shadow_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shadow_shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex3D::desc()],
                compilation_options: Default::default(),
            },
            fragment: None, // Depth only
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: TextureResource::DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let forest_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Forest Pipeline Layout"),
                bind_group_layouts: &[
                    globals_layout,
                    transform_layout,
                    material_layout,
                    shadow_layout,
                ],
                push_constant_ranges: &[],
            });

        let forest = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Forest Pipeline"),
            layout: Some(&forest_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &forest_shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex3D::desc()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &forest_shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    // The text atlas quads need alpha blending
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: TextureResource::DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        Self { shadow, forest }
    }
}
