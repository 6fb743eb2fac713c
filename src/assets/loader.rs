//! Background loading for the panda model and the banner font
//!
//! Each load runs on its own thread and reports through a one-shot channel.
//! The main loop polls the receivers between frames and splices completed
//! results into the scene graph; nothing here touches the scene directly,
//! so all scene mutation stays on the main thread.
//!
//! There is no cancellation and no timeout: a load either completes, fails
//! with a logged error, or its channel is dropped when the thread dies.

use std::path::{Path, PathBuf};
use std::thread;

use futures::channel::oneshot;

use crate::gfx::text::FontAtlas;

use super::AssetError;

/// One mesh of a loaded model, as flat arrays ready for [`crate::gfx::scene::Mesh::from_raw`]
pub struct ModelMesh {
    pub positions: Vec<f32>,
    pub normals: Vec<f32>,
    pub uvs: Vec<f32>,
    pub indices: Vec<u32>,
    pub material_index: Option<usize>,
}

/// Material definition extracted from a model's MTL file
pub struct ModelMaterial {
    pub name: String,
    pub diffuse: [f32; 3],
    pub alpha: f32,
}

/// A fully parsed model, decoupled from any GPU state
pub struct LoadedModel {
    pub meshes: Vec<ModelMesh>,
    pub materials: Vec<ModelMaterial>,
}

/// Loads an OBJ model with automatic material extraction
pub fn load_model(path: &Path) -> Result<LoadedModel, AssetError> {
    let (models, materials) = tobj::load_obj(
        path,
        &tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        },
    )
    .map_err(|e| AssetError::Model {
        path: path.to_path_buf(),
        source: e,
    })?;

    let materials = materials.unwrap_or_else(|_| {
        log::warn!("No MTL file found for {:?}, using default materials", path);
        Vec::new()
    });

    let materials = materials
        .iter()
        .enumerate()
        .map(|(i, mtl)| ModelMaterial {
            name: if mtl.name.is_empty() {
                format!("material_{}", i)
            } else {
                mtl.name.clone()
            },
            diffuse: mtl.diffuse.unwrap_or([0.8, 0.8, 0.8]),
            alpha: mtl.dissolve.unwrap_or(1.0),
        })
        .collect();

    let meshes = models
        .iter()
        .map(|m| ModelMesh {
            positions: m.mesh.positions.clone(),
            normals: m.mesh.normals.clone(),
            uvs: m.mesh.texcoords.clone(),
            indices: m.mesh.indices.clone(),
            material_index: m.mesh.material_id,
        })
        .collect();

    log::info!("Loaded model {:?} ({} meshes)", path, models.len());

    Ok(LoadedModel { meshes, materials })
}

/// Starts a model load on a background thread
///
/// The returned receiver yields exactly one result. Poll it with
/// `try_recv`; a `Canceled` error means the loader thread died.
pub fn spawn_model_load(path: PathBuf) -> oneshot::Receiver<Result<LoadedModel, AssetError>> {
    let (sender, receiver) = oneshot::channel();

    thread::spawn(move || {
        let result = load_model(&path);
        // The receiver may have been dropped on shutdown
        let _ = sender.send(result);
    });

    receiver
}

/// Starts a font load and atlas rasterization on a background thread
pub fn spawn_font_load(
    path: PathBuf,
    font_size: f32,
) -> oneshot::Receiver<Result<FontAtlas, AssetError>> {
    let (sender, receiver) = oneshot::channel();

    thread::spawn(move || {
        let result = std::fs::read(&path)
            .map_err(|e| AssetError::Io {
                path: path.clone(),
                source: e,
            })
            .and_then(|bytes| FontAtlas::new(&bytes, font_size).map_err(AssetError::from));
        let _ = sender.send(result);
    });

    receiver
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_model_completes_with_an_error() {
        let mut receiver = spawn_model_load(PathBuf::from("does/not/exist.obj"));

        // The loader thread always sends exactly one result
        let result = loop {
            match receiver.try_recv() {
                Ok(Some(result)) => break result,
                Ok(None) => thread::yield_now(),
                Err(_) => panic!("loader thread dropped its sender"),
            }
        };

        assert!(result.is_err());
    }
}
