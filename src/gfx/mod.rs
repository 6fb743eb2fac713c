//! # Graphics Module
//!
//! All graphics functionality for the forest renderer: the camera rig and
//! orbit controls, primitive geometry generation, the scene graph with its
//! lights and materials, the wgpu render engine with shadow mapping, mouse
//! ray picking and world-space text meshes.

pub mod camera;
pub mod geometry;
pub mod picking;
pub mod rendering;
pub mod resources;
pub mod scene;
pub mod text;

// Re-export commonly used types
pub use camera::{CameraMode, CameraRig, ViewCamera};
pub use rendering::RenderEngine;
pub use scene::Scene;
