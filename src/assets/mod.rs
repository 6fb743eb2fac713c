//! Asset loading: texture images, the panda model and the banner font
//!
//! All assets are read-only startup inputs. Texture images load
//! synchronously during scene construction; the model and font load on
//! background threads and deliver their results through one-shot channels
//! polled by the main loop (see [`loader`]).
//!
//! Every load is fallible and failure is never fatal: the scene renders
//! with whatever arrived.

pub mod image_data;
pub mod loader;
pub mod textures;

pub use image_data::ImageData;
pub use loader::{spawn_font_load, spawn_model_load, LoadedModel};
pub use textures::TextureLibrary;

use std::path::PathBuf;

use crate::gfx::text::FontError;

/// Errors that can occur while loading assets
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode image {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to load model {path}: {source}")]
    Model {
        path: PathBuf,
        #[source]
        source: tobj::LoadError,
    },

    #[error(transparent)]
    Font(#[from] FontError),
}
