// src/lib.rs
//! Panda Forest
//!
//! A static 3D forest scene built on wgpu and winit: primitive-mesh terrain,
//! textured materials, an animated sun tracked by a shadow-casting light,
//! three switchable cameras and a raycast click interaction.

pub mod app;
pub mod assets;
pub mod forest;
pub mod gfx;
pub mod wgpu_utils;

// Re-export main types for convenience
pub use app::ForestApp;

/// Creates the forest application with its default scene
pub fn default() -> anyhow::Result<ForestApp> {
    pollster::block_on(ForestApp::new())
}
