use wgpu::Device;

use crate::gfx::{
    camera::rig::CameraRig,
    resources::material::{Material, MaterialManager},
};

use super::{light::LightRig, object::SceneObject};

/// Main scene containing objects, materials, lights and the camera rig
///
/// The scene graph is a flat list of named objects; construction only ever
/// appends to it. Objects created before the GPU context exists get their
/// buffers on [`Scene::init_gpu_resources`]; objects appended later (the
/// async model and text loads) are initialized individually as they arrive.
pub struct Scene {
    pub camera_rig: CameraRig,
    pub objects: Vec<SceneObject>,
    pub material_manager: MaterialManager,
    pub lights: LightRig,
}

impl Scene {
    /// Creates a new empty scene with the given camera rig and lights
    pub fn new(camera_rig: CameraRig, lights: LightRig) -> Self {
        Self {
            camera_rig,
            objects: Vec::new(),
            material_manager: MaterialManager::new(),
            lights,
        }
    }

    /// Appends an object to the scene graph, returning its index
    pub fn add_object(&mut self, object: SceneObject) -> usize {
        self.objects.push(object);
        self.objects.len() - 1
    }

    /// Registers a material for objects to reference by id
    pub fn add_material(&mut self, material: Material) {
        self.material_manager.add_material(material);
    }

    /// Finds an object index by name
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.objects.iter().position(|obj| obj.name == name)
    }

    /// Gets immutable reference to an object by index
    pub fn get_object(&self, index: usize) -> Option<&SceneObject> {
        self.objects.get(index)
    }

    /// Gets mutable reference to an object by index
    pub fn get_object_mut(&mut self, index: usize) -> Option<&mut SceneObject> {
        self.objects.get_mut(index)
    }

    /// Updates per-frame scene state (camera matrices)
    pub fn update(&mut self) {
        self.camera_rig.active_mut().update_view_proj();
    }

    /// Initializes GPU resources for all objects and materials
    ///
    /// Must be called after the GPU context is available and before
    /// rendering. Objects appended afterwards are initialized on arrival.
    pub fn init_gpu_resources(&mut self, device: &Device, queue: &wgpu::Queue) {
        for object in self.objects.iter_mut() {
            if object.gpu_resources.is_none() {
                object.init_gpu_resources(device);
            }
        }
        self.material_manager.update_all_gpu_resources(device, queue);
    }

    /// Syncs all object transforms to the GPU
    pub fn sync_transforms(&mut self, queue: &wgpu::Queue) {
        for object in &mut self.objects {
            if object.gpu_resources.is_some() {
                object.update_transform(queue);
            }
        }
    }

    /// Syncs material changes (such as the text color toggle) to the GPU
    pub fn sync_materials(&mut self, device: &Device, queue: &wgpu::Queue) {
        self.material_manager.update_all_gpu_resources(device, queue);
    }

    /// Gets material for rendering an object, falling back to the default
    pub fn get_material_for_object(&self, object: &SceneObject) -> &Material {
        self.material_manager
            .get_material_for_object(object.material_id.as_ref())
    }

    /// Gets the total number of objects
    pub fn get_object_count(&self) -> usize {
        self.objects.len()
    }
}
