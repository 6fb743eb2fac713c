//! Material system for the forest renderer
//!
//! Materials bundle a base color, an optional texture image, emissive terms
//! and the shading model (lit or unlit). They are stored centrally in
//! [`MaterialManager`] and referenced by objects via string ids, so the text
//! click handler can recolor the welcome text by mutating one material.

use std::collections::HashMap;
use wgpu::Device;

use crate::assets::ImageData;
use crate::wgpu_utils::{
    binding_builder::{BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc},
    binding_types,
    uniform_buffer::UniformBuffer,
};

use super::texture_resource::TextureResource;

/// Material ID for referencing materials
pub type MaterialId = String;

/// Shading model selector matching the shader's `shading_model` field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShadingModel {
    /// Ambient + point + spot lighting with shadows
    Lit,
    /// Flat texture/color, ignores all lights (the sun and the skybox)
    Unlit,
}

/// GPU uniform data for materials
///
/// MUST match the MaterialUniform struct in the shaders exactly.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MaterialUniform {
    pub base_color: [f32; 4],
    pub emissive: [f32; 3],
    pub emissive_intensity: f32,
    pub shading_model: u32,
    pub shininess: f32,
    _padding: [f32; 2],
}

type MaterialUBO = UniformBuffer<MaterialUniform>;

/// Material bind group management
pub struct MaterialBindings {
    bind_group_layout: BindGroupLayoutWithDesc,
    bind_group: Option<wgpu::BindGroup>,
}

impl MaterialBindings {
    pub fn new(device: &Device) -> Self {
        let bind_group_layout = BindGroupLayoutBuilder::new()
            .next_binding_fragment(binding_types::uniform())
            .next_binding_fragment(binding_types::texture_2d())
            .next_binding_fragment(binding_types::sampler(wgpu::SamplerBindingType::Filtering))
            .create(device, "Material Bind Group");

        MaterialBindings {
            bind_group_layout,
            bind_group: None,
        }
    }

    pub fn create_bind_group(
        &mut self,
        device: &Device,
        ubo: &MaterialUBO,
        texture: &TextureResource,
    ) {
        self.bind_group = Some(
            BindGroupBuilder::new(&self.bind_group_layout)
                .resource(ubo.binding_resource())
                .texture(&texture.view)
                .sampler(&texture.sampler)
                .create(device, "Material Bind Group"),
        );
    }

    pub fn bind_group_layouts(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout.layout
    }

    pub fn bind_groups(&self) -> Option<&wgpu::BindGroup> {
        self.bind_group.as_ref()
    }
}

/// Material definition with color, texture and shading properties
///
/// Contains material properties and GPU resources. Materials are stored
/// centrally in MaterialManager and shared between objects.
pub struct Material {
    pub name: String,
    pub base_color: [f32; 4],
    pub emissive: [f32; 3],
    pub emissive_intensity: f32,
    pub shading: ShadingModel,
    pub shininess: f32,
    /// Decoded pixels awaiting GPU upload; `None` means flat color only
    pub image: Option<ImageData>,

    // GPU resources - shared by all objects using this material
    texture: Option<TextureResource>,
    material_ubo: Option<MaterialUBO>,
    material_bindings: Option<MaterialBindings>,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: "Default".to_string(),
            base_color: [0.8, 0.8, 0.8, 1.0],
            emissive: [0.0, 0.0, 0.0],
            emissive_intensity: 0.0,
            shading: ShadingModel::Lit,
            shininess: 32.0,
            image: None,
            texture: None,
            material_ubo: None,
            material_bindings: None,
        }
    }
}

impl Material {
    /// Creates a new lit material with a flat base color
    pub fn new(name: &str, base_color: [f32; 4]) -> Self {
        Self {
            name: name.to_string(),
            base_color,
            ..Default::default()
        }
    }

    /// Builder pattern: attach a texture image
    pub fn with_image(mut self, image: ImageData) -> Self {
        self.image = Some(image);
        self
    }

    /// Builder pattern: emissive glow (the lily pads)
    pub fn with_emission(mut self, r: f32, g: f32, b: f32, intensity: f32) -> Self {
        self.emissive = [r, g, b];
        self.emissive_intensity = intensity;
        self
    }

    /// Builder pattern: ignore lighting entirely (the sun and the skybox)
    pub fn unlit(mut self) -> Self {
        self.shading = ShadingModel::Unlit;
        self
    }

    /// Recolors the material; takes effect on the next GPU sync
    pub fn set_base_color(&mut self, base_color: [f32; 4]) {
        self.base_color = base_color;
    }

    fn uniform(&self) -> MaterialUniform {
        MaterialUniform {
            base_color: self.base_color,
            emissive: self.emissive,
            emissive_intensity: self.emissive_intensity,
            shading_model: match self.shading {
                ShadingModel::Lit => 0,
                ShadingModel::Unlit => 1,
            },
            shininess: self.shininess,
            _padding: [0.0; 2],
        }
    }

    /// Updates GPU resources for this material
    ///
    /// Creates the uniform buffer, texture and bind group on first call;
    /// afterwards only syncs the uniform when its contents changed. Materials
    /// without an image get a single white pixel so every material binds the
    /// same layout.
    pub fn update_gpu_resources(&mut self, device: &Device, queue: &wgpu::Queue) {
        if self.material_ubo.is_none() {
            self.material_ubo = Some(MaterialUBO::new(device));
        }

        if self.texture.is_none() {
            let texture = match &self.image {
                Some(image) => TextureResource::create_from_image(device, queue, image, &self.name),
                None => {
                    let white = ImageData::solid_color(1, 1, [255, 255, 255, 255]);
                    TextureResource::create_from_image(device, queue, &white, &self.name)
                }
            };
            self.texture = Some(texture);
        }

        if self.material_bindings.is_none() {
            let mut bindings = MaterialBindings::new(device);
            bindings.create_bind_group(
                device,
                self.material_ubo.as_ref().expect("ubo created above"),
                self.texture.as_ref().expect("texture created above"),
            );
            self.material_bindings = Some(bindings);
        }

        let uniform = self.uniform();
        if let Some(ubo) = &mut self.material_ubo {
            ubo.update_content(queue, uniform);
        }
    }

    /// Gets the bind group for rendering
    pub fn get_bind_group(&self) -> Option<&wgpu::BindGroup> {
        self.material_bindings
            .as_ref()
            .and_then(|bindings| bindings.bind_groups())
    }

    /// Gets the bind group layout for pipeline creation
    pub fn get_bind_group_layout(&self) -> Option<&wgpu::BindGroupLayout> {
        self.material_bindings
            .as_ref()
            .map(|b| b.bind_group_layouts())
    }
}

/// Manages all materials in the scene
///
/// Centralized storage; objects reference materials by ID rather than
/// holding material data directly, so GPU resources are shared between the
/// many instances of each decorative element.
pub struct MaterialManager {
    materials: HashMap<MaterialId, Material>,
    default_material_id: MaterialId,
}

impl MaterialManager {
    /// Creates a new material manager with a default material
    pub fn new() -> Self {
        let mut manager = Self {
            materials: HashMap::new(),
            default_material_id: "default".to_string(),
        };

        manager
            .materials
            .insert("default".to_string(), Material::default());

        manager
    }

    /// Adds a material to the library
    pub fn add_material(&mut self, material: Material) {
        self.materials.insert(material.name.clone(), material);
    }

    /// Gets a material by ID
    pub fn get_material(&self, id: &str) -> Option<&Material> {
        self.materials.get(id)
    }

    /// Gets a mutable material by ID
    pub fn get_material_mut(&mut self, id: &str) -> Option<&mut Material> {
        self.materials.get_mut(id)
    }

    /// Gets the default material
    pub fn get_default_material(&self) -> &Material {
        self.materials
            .get(&self.default_material_id)
            .expect("default material always present")
    }

    /// Gets material for an object with fallback to default
    pub fn get_material_for_object(&self, material_id: Option<&MaterialId>) -> &Material {
        match material_id {
            Some(id) => self
                .get_material(id)
                .unwrap_or_else(|| self.get_default_material()),
            None => self.get_default_material(),
        }
    }

    /// Lists all material IDs
    pub fn list_materials(&self) -> Vec<&MaterialId> {
        self.materials.keys().collect()
    }

    /// Updates GPU resources for all materials
    pub fn update_all_gpu_resources(&mut self, device: &Device, queue: &wgpu::Queue) {
        for material in self.materials.values_mut() {
            material.update_gpu_resources(device, queue);
        }
    }

    /// Gets material bind group layout for pipeline creation
    ///
    /// Uses the default material's layout as all materials share the same layout.
    pub fn get_bind_group_layout(&self) -> Option<&wgpu::BindGroupLayout> {
        self.get_default_material().get_bind_group_layout()
    }
}

impl Default for MaterialManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_material_falls_back_to_default() {
        let manager = MaterialManager::new();
        let id = "no_such_material".to_string();

        let material = manager.get_material_for_object(Some(&id));
        assert_eq!(material.name, "Default");
    }

    #[test]
    fn recoloring_changes_the_uniform() {
        let mut material = Material::new("welcome_text", [0.0, 0.5, 0.0, 1.0]);
        let before = material.uniform();

        material.set_base_color([1.0, 1.0, 0.0, 1.0]);
        let after = material.uniform();

        assert_ne!(before.base_color, after.base_color);
        assert_eq!(after.base_color, [1.0, 1.0, 0.0, 1.0]);
    }
}
