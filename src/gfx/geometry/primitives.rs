//! # Primitive Shape Generation
//!
//! Shape generators for the meshes the scene is built from. All shapes are
//! centered at the origin in a Y-up coordinate system and carry normals and
//! texture coordinates.

use super::GeometryData;
use std::f32::consts::PI;

/// Generate an axis-aligned box with the given extents
///
/// Each face has outward normals and UV coordinates from 0 to 1.
pub fn generate_box(width: f32, height: f32, depth: f32) -> GeometryData {
    let mut data = GeometryData::new();

    let (hw, hh, hd) = (width * 0.5, height * 0.5, depth * 0.5);

    // 4 vertices per face so each face keeps its own normal
    let positions = [
        // Front face (+Z)
        [-hw, -hh, hd], [hw, -hh, hd], [hw, hh, hd], [-hw, hh, hd],
        // Back face (-Z)
        [-hw, -hh, -hd], [-hw, hh, -hd], [hw, hh, -hd], [hw, -hh, -hd],
        // Left face (-X)
        [-hw, -hh, -hd], [-hw, -hh, hd], [-hw, hh, hd], [-hw, hh, -hd],
        // Right face (+X)
        [hw, -hh, hd], [hw, -hh, -hd], [hw, hh, -hd], [hw, hh, hd],
        // Top face (+Y)
        [-hw, hh, hd], [hw, hh, hd], [hw, hh, -hd], [-hw, hh, -hd],
        // Bottom face (-Y)
        [-hw, -hh, -hd], [hw, -hh, -hd], [hw, -hh, hd], [-hw, -hh, hd],
    ];

    let normals = [
        [0.0, 0.0, 1.0], [0.0, 0.0, 1.0], [0.0, 0.0, 1.0], [0.0, 0.0, 1.0],
        [0.0, 0.0, -1.0], [0.0, 0.0, -1.0], [0.0, 0.0, -1.0], [0.0, 0.0, -1.0],
        [-1.0, 0.0, 0.0], [-1.0, 0.0, 0.0], [-1.0, 0.0, 0.0], [-1.0, 0.0, 0.0],
        [1.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0], [0.0, 1.0, 0.0], [0.0, 1.0, 0.0], [0.0, 1.0, 0.0],
        [0.0, -1.0, 0.0], [0.0, -1.0, 0.0], [0.0, -1.0, 0.0], [0.0, -1.0, 0.0],
    ];

    let uvs = [
        [0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0],
        [1.0, 0.0], [1.0, 1.0], [0.0, 1.0], [0.0, 0.0],
        [1.0, 0.0], [0.0, 0.0], [0.0, 1.0], [1.0, 1.0],
        [0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0],
        [0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0],
        [0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0],
    ];

    data.positions = positions.to_vec();
    data.normals = normals.to_vec();
    data.uvs = uvs.to_vec();

    data.indices = vec![
        0, 1, 2, 2, 3, 0, // front
        4, 5, 6, 6, 7, 4, // back
        8, 9, 10, 10, 11, 8, // left
        12, 13, 14, 14, 15, 12, // right
        16, 17, 18, 18, 19, 16, // top
        20, 21, 22, 22, 23, 20, // bottom
    ];

    data
}

/// Generate a UV sphere
///
/// # Arguments
/// * `radius` - Sphere radius
/// * `longitude_segments` - Number of vertical segments
/// * `latitude_segments` - Number of horizontal segments
pub fn generate_sphere(radius: f32, longitude_segments: u32, latitude_segments: u32) -> GeometryData {
    let mut data = GeometryData::new();

    let long_segs = longitude_segments.max(3);
    let lat_segs = latitude_segments.max(2);

    for lat in 0..=lat_segs {
        let theta = lat as f32 * PI / lat_segs as f32; // 0 to PI
        let sin_theta = theta.sin();
        let cos_theta = theta.cos();

        for long in 0..=long_segs {
            let phi = long as f32 * 2.0 * PI / long_segs as f32; // 0 to 2*PI
            let sin_phi = phi.sin();
            let cos_phi = phi.cos();

            let x = sin_theta * cos_phi;
            let y = cos_theta;
            let z = sin_theta * sin_phi;

            data.positions.push([x * radius, y * radius, z * radius]);
            data.normals.push([x, y, z]);
            data.uvs.push([
                long as f32 / long_segs as f32,
                lat as f32 / lat_segs as f32,
            ]);
        }
    }

    for lat in 0..lat_segs {
        for long in 0..long_segs {
            let first = lat * (long_segs + 1) + long;
            let second = first + long_segs + 1;

            data.indices.push(first);
            data.indices.push(second);
            data.indices.push(first + 1);

            data.indices.push(second);
            data.indices.push(second + 1);
            data.indices.push(first + 1);
        }
    }

    data
}

/// Generate a cylinder along the Y axis with end caps
///
/// Extends from -height/2 to height/2.
pub fn generate_cylinder(radius: f32, height: f32, segments: u32) -> GeometryData {
    let mut data = GeometryData::new();

    let segs = segments.max(3);
    let half_height = height * 0.5;

    // Side vertices, bottom/top pair per segment
    for i in 0..=segs {
        let angle = i as f32 * 2.0 * PI / segs as f32;
        let cos_a = angle.cos();
        let sin_a = angle.sin();
        let x = radius * cos_a;
        let z = radius * sin_a;

        data.positions.push([x, -half_height, z]);
        data.normals.push([cos_a, 0.0, sin_a]);
        data.uvs.push([i as f32 / segs as f32, 0.0]);

        data.positions.push([x, half_height, z]);
        data.normals.push([cos_a, 0.0, sin_a]);
        data.uvs.push([i as f32 / segs as f32, 1.0]);
    }

    for i in 0..segs {
        let bottom_current = i * 2;
        let top_current = bottom_current + 1;
        let bottom_next = (i + 1) * 2;
        let top_next = bottom_next + 1;

        data.indices.push(bottom_current);
        data.indices.push(bottom_next);
        data.indices.push(top_current);

        data.indices.push(top_current);
        data.indices.push(bottom_next);
        data.indices.push(top_next);
    }

    // Cap centers
    let center_bottom_idx = data.positions.len() as u32;
    data.positions.push([0.0, -half_height, 0.0]);
    data.normals.push([0.0, -1.0, 0.0]);
    data.uvs.push([0.5, 0.5]);

    let center_top_idx = data.positions.len() as u32;
    data.positions.push([0.0, half_height, 0.0]);
    data.normals.push([0.0, 1.0, 0.0]);
    data.uvs.push([0.5, 0.5]);

    for i in 0..segs {
        let current = i * 2;
        let next = (i + 1) * 2;

        data.indices.push(center_bottom_idx);
        data.indices.push(current);
        data.indices.push(next);

        data.indices.push(center_top_idx);
        data.indices.push(next + 1);
        data.indices.push(current + 1);
    }

    data
}

/// Generate a cone along the Y axis with a base cap
///
/// Apex at height/2, base at -height/2.
pub fn generate_cone(radius: f32, height: f32, segments: u32) -> GeometryData {
    let mut data = GeometryData::new();

    let segs = segments.max(3);
    let half_height = height * 0.5;

    // Slope of the side surface determines the normal tilt
    let slope = radius / height;
    let normal_y = slope / (1.0 + slope * slope).sqrt();
    let normal_xz = 1.0 / (1.0 + slope * slope).sqrt();

    // One apex vertex per segment keeps side normals sharp
    for i in 0..segs {
        let angle = (i as f32 + 0.5) * 2.0 * PI / segs as f32;
        data.positions.push([0.0, half_height, 0.0]);
        data.normals
            .push([angle.cos() * normal_xz, normal_y, angle.sin() * normal_xz]);
        data.uvs.push([(i as f32 + 0.5) / segs as f32, 1.0]);
    }

    let rim_start = data.positions.len() as u32;
    for i in 0..=segs {
        let angle = i as f32 * 2.0 * PI / segs as f32;
        let cos_a = angle.cos();
        let sin_a = angle.sin();

        data.positions
            .push([radius * cos_a, -half_height, radius * sin_a]);
        data.normals
            .push([cos_a * normal_xz, normal_y, sin_a * normal_xz]);
        data.uvs.push([i as f32 / segs as f32, 0.0]);
    }

    for i in 0..segs {
        data.indices.push(i);
        data.indices.push(rim_start + i);
        data.indices.push(rim_start + i + 1);
    }

    // Base cap
    let center_idx = data.positions.len() as u32;
    data.positions.push([0.0, -half_height, 0.0]);
    data.normals.push([0.0, -1.0, 0.0]);
    data.uvs.push([0.5, 0.5]);

    let cap_start = data.positions.len() as u32;
    for i in 0..=segs {
        let angle = i as f32 * 2.0 * PI / segs as f32;
        data.positions
            .push([radius * angle.cos(), -half_height, radius * angle.sin()]);
        data.normals.push([0.0, -1.0, 0.0]);
        data.uvs
            .push([angle.cos() * 0.5 + 0.5, angle.sin() * 0.5 + 0.5]);
    }

    for i in 0..segs {
        data.indices.push(center_idx);
        data.indices.push(cap_start + i + 1);
        data.indices.push(cap_start + i);
    }

    data
}

/// Generate a single quad in the XY plane facing +Z
///
/// The skybox is six of these, rotated into place around the scene.
pub fn generate_quad(width: f32, height: f32) -> GeometryData {
    let mut data = GeometryData::new();

    let (hw, hh) = (width * 0.5, height * 0.5);

    data.positions = vec![
        [-hw, -hh, 0.0],
        [hw, -hh, 0.0],
        [hw, hh, 0.0],
        [-hw, hh, 0.0],
    ];
    data.normals = vec![[0.0, 0.0, 1.0]; 4];
    data.uvs = vec![[0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]];
    data.indices = vec![0, 1, 2, 2, 3, 0];

    data
}

/// Generate a flat disc in the XY plane facing +Z
///
/// The scene rotates these flat onto the water surface.
pub fn generate_circle(radius: f32, segments: u32) -> GeometryData {
    let mut data = GeometryData::new();

    let segs = segments.max(3);

    data.positions.push([0.0, 0.0, 0.0]);
    data.normals.push([0.0, 0.0, 1.0]);
    data.uvs.push([0.5, 0.5]);

    for i in 0..=segs {
        let angle = i as f32 * 2.0 * PI / segs as f32;
        let cos_a = angle.cos();
        let sin_a = angle.sin();

        data.positions.push([radius * cos_a, radius * sin_a, 0.0]);
        data.normals.push([0.0, 0.0, 1.0]);
        data.uvs.push([cos_a * 0.5 + 0.5, sin_a * 0.5 + 0.5]);
    }

    for i in 1..=segs {
        data.indices.push(0);
        data.indices.push(i);
        data.indices.push(i + 1);
    }

    data
}

/// Generate a flat ring (annulus) in the XY plane facing +Z
pub fn generate_ring(inner_radius: f32, outer_radius: f32, theta_segments: u32) -> GeometryData {
    let mut data = GeometryData::new();

    let segs = theta_segments.max(3);
    // Accept the radii in either order
    let (inner, outer) = if inner_radius <= outer_radius {
        (inner_radius, outer_radius)
    } else {
        (outer_radius, inner_radius)
    };

    for i in 0..=segs {
        let angle = i as f32 * 2.0 * PI / segs as f32;
        let cos_a = angle.cos();
        let sin_a = angle.sin();

        data.positions.push([inner * cos_a, inner * sin_a, 0.0]);
        data.normals.push([0.0, 0.0, 1.0]);
        data.uvs.push([i as f32 / segs as f32, 0.0]);

        data.positions.push([outer * cos_a, outer * sin_a, 0.0]);
        data.normals.push([0.0, 0.0, 1.0]);
        data.uvs.push([i as f32 / segs as f32, 1.0]);
    }

    for i in 0..segs {
        let inner_current = i * 2;
        let outer_current = inner_current + 1;
        let inner_next = (i + 1) * 2;
        let outer_next = inner_next + 1;

        data.indices.push(inner_current);
        data.indices.push(outer_current);
        data.indices.push(inner_next);

        data.indices.push(outer_current);
        data.indices.push(outer_next);
        data.indices.push(inner_next);
    }

    data
}

/// Generate a tetrahedron subdivided `detail` times and projected onto a
/// sphere of the given radius
///
/// Faces keep flat normals, which gives the pebbles their faceted look.
pub fn generate_tetrahedron(radius: f32, detail: u32) -> GeometryData {
    let mut data = GeometryData::new();

    let s = 1.0 / (3.0f32).sqrt();
    let base_vertices = [
        [s, s, s],
        [-s, -s, s],
        [-s, s, -s],
        [s, -s, -s],
    ];
    let base_faces = [[2, 1, 0], [0, 3, 2], [1, 3, 0], [2, 3, 1]];

    for face in base_faces {
        subdivide_face(
            base_vertices[face[0]],
            base_vertices[face[1]],
            base_vertices[face[2]],
            detail,
            radius,
            &mut data,
        );
    }

    data
}

fn subdivide_face(
    a: [f32; 3],
    b: [f32; 3],
    c: [f32; 3],
    detail: u32,
    radius: f32,
    data: &mut GeometryData,
) {
    if detail == 0 {
        emit_face(a, b, c, radius, data);
        return;
    }

    let ab = midpoint(a, b);
    let bc = midpoint(b, c);
    let ca = midpoint(c, a);

    subdivide_face(a, ab, ca, detail - 1, radius, data);
    subdivide_face(ab, b, bc, detail - 1, radius, data);
    subdivide_face(ca, bc, c, detail - 1, radius, data);
    subdivide_face(ab, bc, ca, detail - 1, radius, data);
}

fn midpoint(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [
        (a[0] + b[0]) * 0.5,
        (a[1] + b[1]) * 0.5,
        (a[2] + b[2]) * 0.5,
    ]
}

fn normalize_to(v: [f32; 3], radius: f32) -> [f32; 3] {
    let len = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
    [v[0] / len * radius, v[1] / len * radius, v[2] / len * radius]
}

fn emit_face(a: [f32; 3], b: [f32; 3], c: [f32; 3], radius: f32, data: &mut GeometryData) {
    let pa = normalize_to(a, radius);
    let pb = normalize_to(b, radius);
    let pc = normalize_to(c, radius);

    // Flat face normal
    let e1 = [pb[0] - pa[0], pb[1] - pa[1], pb[2] - pa[2]];
    let e2 = [pc[0] - pa[0], pc[1] - pa[1], pc[2] - pa[2]];
    let n = normalize_to(
        [
            e1[1] * e2[2] - e1[2] * e2[1],
            e1[2] * e2[0] - e1[0] * e2[2],
            e1[0] * e2[1] - e1[1] * e2[0],
        ],
        1.0,
    );

    let base = data.positions.len() as u32;
    for p in [pa, pb, pc] {
        data.positions.push(p);
        data.normals.push(n);
        // Spherical projection keeps the rock texture from smearing
        data.uvs.push([
            p[2].atan2(p[0]) / (2.0 * PI) + 0.5,
            (p[1] / radius).clamp(-1.0, 1.0).acos() / PI,
        ]);
    }
    data.indices.extend_from_slice(&[base, base + 1, base + 2]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_generation() {
        let bx = generate_box(200.0, 6.0, 200.0);
        assert_eq!(bx.positions.len(), 24); // 6 faces * 4 vertices
        assert_eq!(bx.indices.len(), 36); // 6 faces * 2 triangles * 3 indices
        assert_eq!(bx.triangle_count(), 12);

        // Extents match the requested dimensions
        let max_y = bx.positions.iter().map(|p| p[1]).fold(f32::MIN, f32::max);
        assert_eq!(max_y, 3.0);
    }

    #[test]
    fn test_sphere_generation() {
        let sphere = generate_sphere(10.0, 30, 25);
        assert!(sphere.positions.len() > 0);
        assert!(sphere.indices.len() > 0);
        assert_eq!(sphere.positions.len(), sphere.normals.len());
        assert_eq!(sphere.positions.len(), sphere.uvs.len());

        // All vertices on the sphere surface
        for p in &sphere.positions {
            let len = (p[0] * p[0] + p[1] * p[1] + p[2] * p[2]).sqrt();
            assert!((len - 10.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_cylinder_generation() {
        let cyl = generate_cylinder(1.0, 30.0, 30);
        assert_eq!(cyl.positions.len(), cyl.normals.len());
        assert_eq!(cyl.positions.len(), cyl.uvs.len());
        // 30 side quads + 2 * 30 cap triangles
        assert_eq!(cyl.triangle_count(), 30 * 2 + 60);
    }

    #[test]
    fn test_cone_generation() {
        let cone = generate_cone(25.0, 70.0, 15);
        assert_eq!(cone.positions.len(), cone.normals.len());
        // 15 side triangles + 15 cap triangles
        assert_eq!(cone.triangle_count(), 30);
    }

    #[test]
    fn test_quad_generation() {
        let quad = generate_quad(800.0, 800.0);
        assert_eq!(quad.positions.len(), 4);
        assert_eq!(quad.triangle_count(), 2);
    }

    #[test]
    fn test_circle_generation() {
        let disc = generate_circle(3.0, 30);
        assert_eq!(disc.triangle_count(), 30);
        // Flat in the XY plane
        assert!(disc.positions.iter().all(|p| p[2] == 0.0));
    }

    #[test]
    fn test_ring_generation() {
        let ring = generate_ring(12.0, 16.0, 8);
        assert_eq!(ring.triangle_count(), 16);

        let swapped = generate_ring(16.0, 12.0, 8);
        assert_eq!(swapped.positions.len(), ring.positions.len());
    }

    #[test]
    fn test_tetrahedron_generation() {
        let rock = generate_tetrahedron(2.0, 3);
        // 4 faces, each subdivided 3 times into 4^3 triangles
        assert_eq!(rock.triangle_count(), 4 * 64);

        for p in &rock.positions {
            let len = (p[0] * p[0] + p[1] * p[1] + p[2] * p[2]).sqrt();
            assert!((len - 2.0).abs() < 1e-3);
        }
    }
}
