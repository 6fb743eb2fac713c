//! The scene's texture set
//!
//! Loads every terrain and skybox image up front. A missing or corrupt file
//! logs a warning and leaves a gap; the scene builder then falls back to a
//! flat tint for that material, so a half-fetched asset directory still
//! renders.

use std::collections::HashMap;
use std::path::Path;

use super::image_data::ImageData;

/// Texture names and their file locations under the asset root
const TEXTURE_FILES: &[(&str, &str)] = &[
    ("dirt", "texture/dirt.jpg"),
    ("grass", "texture/grass.jpg"),
    ("water", "texture/water.jpg"),
    ("sun", "texture/sun.jpg"),
    ("bamboo", "texture/bamboo.jpg"),
    ("lilypad", "texture/lilypad.jpg"),
    ("rock", "texture/rock.jpg"),
    ("hill", "texture/hill.jpg"),
    ("sky_front", "skybox/front.png"),
    ("sky_back", "skybox/back.png"),
    ("sky_up", "skybox/up.png"),
    ("sky_down", "skybox/down.png"),
    ("sky_left", "skybox/left.png"),
    ("sky_right", "skybox/right.png"),
];

/// Decoded scene textures, keyed by material name
pub struct TextureLibrary {
    images: HashMap<String, ImageData>,
}

impl TextureLibrary {
    /// Loads the full texture set from the asset root
    pub fn load(asset_root: &Path) -> Self {
        let mut images = HashMap::new();

        for (name, relative_path) in TEXTURE_FILES {
            let path = asset_root.join(relative_path);
            match ImageData::from_file(&path) {
                Ok(image) => {
                    images.insert(name.to_string(), image);
                }
                Err(err) => {
                    log::warn!("Texture '{}' unavailable, using flat tint: {}", name, err);
                }
            }
        }

        log::info!("Texture library: {}/{} images", images.len(), TEXTURE_FILES.len());
        Self { images }
    }

    /// An empty library; every material falls back to its flat tint
    pub fn empty() -> Self {
        Self {
            images: HashMap::new(),
        }
    }

    /// Moves an image out of the library, if it was loaded
    pub fn take(&mut self, name: &str) -> Option<ImageData> {
        self.images.remove(name)
    }

    /// Number of successfully loaded images
    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}
