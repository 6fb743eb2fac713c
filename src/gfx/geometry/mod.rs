//! # Procedural Geometry Generation
//!
//! Generates the primitive shapes the forest scene is assembled from:
//! boxes for the terrain slabs, a sphere and a ring for the sun, cylinders
//! for bamboo stalks, discs for lily pads, subdivided tetrahedra for the
//! pebble rows and cones for the hills.
//!
//! All shapes are generated in a Y-up coordinate system with normals and
//! texture coordinates.

pub mod primitives;

pub use primitives::*;

/// Generated geometry data ready for mesh construction
#[derive(Debug, Clone)]
pub struct GeometryData {
    /// Vertex positions (x, y, z)
    pub positions: Vec<[f32; 3]>,
    /// Normal vectors (x, y, z)
    pub normals: Vec<[f32; 3]>,
    /// Texture coordinates (u, v)
    pub uvs: Vec<[f32; 2]>,
    /// Triangle indices (counter-clockwise winding)
    pub indices: Vec<u32>,
}

impl GeometryData {
    /// Create a new empty geometry data structure
    pub fn new() -> Self {
        Self {
            positions: Vec::new(),
            normals: Vec::new(),
            uvs: Vec::new(),
            indices: Vec::new(),
        }
    }

    /// Number of vertices in this geometry
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles in this geometry
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

impl Default for GeometryData {
    fn default() -> Self {
        Self::new()
    }
}
