//! # World-Space Text
//!
//! Turns a string into a textured quad mesh: glyphs are rasterized with
//! `fontdue` into a single atlas texture, and the layout engine emits one
//! quad per character sampling that atlas. The welcome banner is built this
//! way when its font finishes loading.

use std::collections::HashMap;

use fontdue::{Font, FontSettings};

use crate::assets::ImageData;
use crate::gfx::scene::{object::Mesh, vertex::Vertex3D};

/// Result type for font operations
pub type FontResult<T> = Result<T, FontError>;

/// Errors that can occur during font operations
#[derive(Debug, thiserror::Error)]
pub enum FontError {
    /// Failed to load font from file or data
    #[error("Failed to load font: {0}")]
    LoadError(String),

    /// Requested character was not found in the font atlas
    #[error("Character '{0}' not found in atlas")]
    GlyphNotFound(char),
}

/// Information about a single glyph in the atlas
#[derive(Debug, Clone)]
pub struct GlyphInfo {
    /// UV coordinates in the atlas (normalized, top-left corner)
    pub uv_min: [f32; 2],
    /// UV coordinates in the atlas (normalized, bottom-right corner)
    pub uv_max: [f32; 2],
    /// Glyph size in pixels
    pub size: [f32; 2],
    /// Horizontal advance for cursor positioning
    pub advance: f32,
    /// Bearing offset from the baseline (x = left, y = bottom)
    pub bearing: [f32; 2],
}

/// Font atlas holding rasterized glyphs and their metadata
///
/// Rasterizes all printable ASCII characters at a fixed pixel size and packs
/// them into one RGBA image with glyph coverage in the alpha channel.
pub struct FontAtlas {
    font_size: f32,
    glyph_cache: HashMap<char, GlyphInfo>,
    atlas_width: u32,
    atlas_height: u32,
    image: ImageData,
}

impl FontAtlas {
    const ASCII_START: u32 = 32; // Space
    const ASCII_END: u32 = 126; // Tilde
    const ATLAS_SIZE: u32 = 1024;
    const GLYPHS_PER_ROW: u32 = 16;

    /// Builds an atlas from TrueType/OpenType font bytes
    pub fn new(font_data: &[u8], font_size: f32) -> FontResult<Self> {
        let font = Font::from_bytes(font_data, FontSettings::default())
            .map_err(|e| FontError::LoadError(format!("fontdue error: {}", e)))?;

        log::info!("Loaded font at {}px size", font_size);

        let mut atlas = Self {
            font_size,
            glyph_cache: HashMap::new(),
            atlas_width: Self::ATLAS_SIZE,
            atlas_height: Self::ATLAS_SIZE,
            image: ImageData::solid_color(Self::ATLAS_SIZE, Self::ATLAS_SIZE, [255, 255, 255, 0]),
        };
        atlas.rasterize_glyphs(&font);
        Ok(atlas)
    }

    fn rasterize_glyphs(&mut self, font: &Font) {
        let glyph_count = (Self::ASCII_END - Self::ASCII_START + 1) as usize;
        log::info!("Rasterizing {} glyphs at {}px", glyph_count, self.font_size);

        let mut rasterized = Vec::with_capacity(glyph_count);
        let mut max_glyph_height = 0usize;

        for code_point in Self::ASCII_START..=Self::ASCII_END {
            let ch = char::from_u32(code_point).expect("printable ASCII");
            let (metrics, bitmap) = font.rasterize(ch, self.font_size);
            max_glyph_height = max_glyph_height.max(metrics.height);
            rasterized.push((ch, metrics, bitmap));
        }

        // Simple grid packing, one cell per glyph
        let cell_width = self.atlas_width / Self::GLYPHS_PER_ROW;
        let cell_height = (max_glyph_height as u32 * 3) / 2;

        let mut current_x = 0u32;
        let mut current_y = 0u32;

        for (ch, metrics, bitmap) in rasterized {
            // Copy glyph coverage into the atlas alpha channel
            for y in 0..metrics.height {
                for x in 0..metrics.width {
                    let src_idx = y * metrics.width + x;
                    let dst_x = current_x + x as u32;
                    let dst_y = current_y + y as u32;
                    let dst_idx = ((dst_y * self.atlas_width + dst_x) * 4 + 3) as usize;

                    if dst_idx < self.image.data.len() && src_idx < bitmap.len() {
                        self.image.data[dst_idx] = bitmap[src_idx];
                    }
                }
            }

            let glyph_info = GlyphInfo {
                uv_min: [
                    current_x as f32 / self.atlas_width as f32,
                    current_y as f32 / self.atlas_height as f32,
                ],
                uv_max: [
                    (current_x + metrics.width as u32) as f32 / self.atlas_width as f32,
                    (current_y + metrics.height as u32) as f32 / self.atlas_height as f32,
                ],
                size: [metrics.width as f32, metrics.height as f32],
                advance: metrics.advance_width,
                bearing: [metrics.xmin as f32, metrics.ymin as f32],
            };
            self.glyph_cache.insert(ch, glyph_info);

            current_x += cell_width;
            if current_x + cell_width > self.atlas_width {
                current_x = 0;
                current_y += cell_height;
            }
        }

        log::info!(
            "Atlas packed: {}x{}, {} glyphs cached",
            self.atlas_width,
            self.atlas_height,
            self.glyph_cache.len()
        );
    }

    /// Get glyph information for a character
    pub fn get_glyph(&self, ch: char) -> FontResult<&GlyphInfo> {
        self.glyph_cache.get(&ch).ok_or(FontError::GlyphNotFound(ch))
    }

    /// The atlas pixels, for uploading as a material texture
    pub fn image(&self) -> &ImageData {
        &self.image
    }

    /// Font size in pixels the glyphs were rasterized at
    pub fn font_size(&self) -> f32 {
        self.font_size
    }
}

/// Converts text strings into positioned glyph quads
///
/// The origin is the baseline of the first character, +X right, +Y up.
/// Each character produces 4 vertices and 6 indices facing +Z.
pub struct TextLayout<'a> {
    atlas: &'a FontAtlas,
}

impl<'a> TextLayout<'a> {
    pub fn new(atlas: &'a FontAtlas) -> Self {
        Self { atlas }
    }

    pub fn layout(&self, text: &str) -> (Vec<Vertex3D>, Vec<u32>) {
        let mut vertices = Vec::new();
        let mut indices = Vec::new();

        let mut cursor_x = 0.0f32;
        let baseline_y = 0.0f32;

        for ch in text.chars() {
            let glyph = match self.atlas.get_glyph(ch) {
                Ok(g) => g,
                Err(_) => {
                    // Unknown characters advance like a space
                    if let Ok(space) = self.atlas.get_glyph(' ') {
                        cursor_x += space.advance;
                    }
                    continue;
                }
            };

            let x_min = cursor_x + glyph.bearing[0];
            let y_min = baseline_y + glyph.bearing[1];
            let x_max = x_min + glyph.size[0];
            let y_max = y_min + glyph.size[1];

            let base = vertices.len() as u32;
            // Quad facing +Z; atlas V runs top-down while Y runs up
            vertices.push(Vertex3D {
                position: [x_min, y_min, 0.0],
                normal: [0.0, 0.0, 1.0],
                uv: [glyph.uv_min[0], glyph.uv_max[1]],
            });
            vertices.push(Vertex3D {
                position: [x_min, y_max, 0.0],
                normal: [0.0, 0.0, 1.0],
                uv: [glyph.uv_min[0], glyph.uv_min[1]],
            });
            vertices.push(Vertex3D {
                position: [x_max, y_max, 0.0],
                normal: [0.0, 0.0, 1.0],
                uv: [glyph.uv_max[0], glyph.uv_min[1]],
            });
            vertices.push(Vertex3D {
                position: [x_max, y_min, 0.0],
                normal: [0.0, 0.0, 1.0],
                uv: [glyph.uv_max[0], glyph.uv_max[1]],
            });

            indices.extend_from_slice(&[base, base + 2, base + 1, base, base + 3, base + 2]);

            cursor_x += glyph.advance;
        }

        (vertices, indices)
    }
}

/// Lays out a string and wraps it into a mesh ready for the scene graph
pub fn build_text_mesh(atlas: &FontAtlas, text: &str) -> Mesh {
    let (vertices, indices) = TextLayout::new(atlas).layout(text);
    Mesh::new(vertices, indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn synthetic_atlas() -> FontAtlas {
        // Hand-built cache so layout tests need no font file on disk
        let mut glyph_cache = HashMap::new();
        for code_point in FontAtlas::ASCII_START..=FontAtlas::ASCII_END {
            let ch = char::from_u32(code_point).unwrap();
            glyph_cache.insert(
                ch,
                GlyphInfo {
                    uv_min: [0.0, 0.0],
                    uv_max: [0.1, 0.1],
                    size: [20.0, 30.0],
                    advance: 24.0,
                    bearing: [2.0, 0.0],
                },
            );
        }
        FontAtlas {
            font_size: 48.0,
            glyph_cache,
            atlas_width: FontAtlas::ATLAS_SIZE,
            atlas_height: FontAtlas::ATLAS_SIZE,
            image: ImageData::solid_color(4, 4, [255, 255, 255, 0]),
        }
    }

    #[test]
    fn layout_emits_one_quad_per_character() {
        let atlas = synthetic_atlas();
        let (vertices, indices) = TextLayout::new(&atlas).layout("Hello");

        assert_eq!(vertices.len(), 5 * 4);
        assert_eq!(indices.len(), 5 * 6);
    }

    #[test]
    fn cursor_advances_between_glyphs() {
        let atlas = synthetic_atlas();
        let (vertices, _) = TextLayout::new(&atlas).layout("AB");

        // Second quad starts one advance further right
        assert_eq!(vertices[4].position[0] - vertices[0].position[0], 24.0);
    }

    #[test]
    fn unknown_characters_advance_like_spaces() {
        let atlas = synthetic_atlas();
        let layout = TextLayout::new(&atlas);

        let (vertices_plain, _) = layout.layout("AB");
        let (vertices_with_unknown, _) = layout.layout("A\u{00e9}B");

        // Same quad count, but the trailing glyph is shifted by one advance
        assert_eq!(vertices_plain.len(), vertices_with_unknown.len());
        assert_eq!(
            vertices_with_unknown[4].position[0] - vertices_plain[4].position[0],
            24.0
        );
    }
}
