//! GPU resource management: materials, textures and global bindings

pub mod global_bindings;
pub mod material;
pub mod texture_resource;

pub use material::{Material, MaterialManager, ShadingModel};
pub use texture_resource::TextureResource;
