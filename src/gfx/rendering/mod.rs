//! Rendering pipeline: the render engine and its fixed pipelines

pub mod pipelines;
pub mod render_engine;

pub use render_engine::RenderEngine;
