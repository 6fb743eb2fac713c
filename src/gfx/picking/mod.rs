//! # Object Picking
//!
//! Mouse ray-casting against the scene graph. A click is converted to
//! normalized device coordinates, unprojected into a world-space ray from
//! the active camera, and tested against every object's transformed
//! bounding box. The click handler then looks for the welcome text among
//! the hits.

use cgmath::{
    ElementWise, InnerSpace, Matrix4, SquareMatrix, Vector3, Vector4, Zero,
};

use crate::gfx::{camera::view_camera::ViewCamera, scene::scene::Scene};

/// A 3D ray for intersection testing
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Ray origin point in world space
    pub origin: Vector3<f32>,
    /// Ray direction (normalized)
    pub direction: Vector3<f32>,
}

impl Ray {
    pub fn new(origin: Vector3<f32>, direction: Vector3<f32>) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Get a point along the ray at distance t
    pub fn point_at(&self, t: f32) -> Vector3<f32> {
        self.origin + self.direction * t
    }
}

/// Axis-aligned bounding box for intersection testing
#[derive(Debug, Clone, Copy)]
pub struct Aabb {
    pub min: Vector3<f32>,
    pub max: Vector3<f32>,
}

impl Aabb {
    pub fn new(min: Vector3<f32>, max: Vector3<f32>) -> Self {
        Self { min, max }
    }

    /// Create an AABB enclosing a set of vertices
    pub fn from_vertices(vertices: &[[f32; 3]]) -> Self {
        if vertices.is_empty() {
            return Self::new(Vector3::zero(), Vector3::zero());
        }

        let mut min = Vector3::new(vertices[0][0], vertices[0][1], vertices[0][2]);
        let mut max = min;

        for vertex in vertices.iter().skip(1) {
            let v = Vector3::new(vertex[0], vertex[1], vertex[2]);
            min.x = min.x.min(v.x);
            min.y = min.y.min(v.y);
            min.z = min.z.min(v.z);
            max.x = max.x.max(v.x);
            max.y = max.y.max(v.y);
            max.z = max.z.max(v.z);
        }

        Self::new(min, max)
    }

    /// Test ray-AABB intersection using the slab method
    ///
    /// Returns the distance to the intersection point, or None if there is
    /// no intersection.
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        let inv_dir = Vector3::new(
            1.0 / ray.direction.x,
            1.0 / ray.direction.y,
            1.0 / ray.direction.z,
        );

        let t_min = (self.min - ray.origin).mul_element_wise(inv_dir);
        let t_max = (self.max - ray.origin).mul_element_wise(inv_dir);

        let t1 = Vector3::new(
            t_min.x.min(t_max.x),
            t_min.y.min(t_max.y),
            t_min.z.min(t_max.z),
        );
        let t2 = Vector3::new(
            t_min.x.max(t_max.x),
            t_min.y.max(t_max.y),
            t_min.z.max(t_max.z),
        );

        let t_near = t1.x.max(t1.y.max(t1.z));
        let t_far = t2.x.min(t2.y.min(t2.z));

        if t_near <= t_far && t_far >= 0.0 {
            Some(if t_near >= 0.0 { t_near } else { t_far })
        } else {
            None
        }
    }

    /// Apply a transformation matrix to the AABB
    pub fn transform(&self, matrix: &Matrix4<f32>) -> Self {
        let corners = [
            Vector3::new(self.min.x, self.min.y, self.min.z),
            Vector3::new(self.max.x, self.min.y, self.min.z),
            Vector3::new(self.min.x, self.max.y, self.min.z),
            Vector3::new(self.min.x, self.min.y, self.max.z),
            Vector3::new(self.max.x, self.max.y, self.min.z),
            Vector3::new(self.max.x, self.min.y, self.max.z),
            Vector3::new(self.min.x, self.max.y, self.max.z),
            Vector3::new(self.max.x, self.max.y, self.max.z),
        ];

        let mut transformed_corners = Vec::with_capacity(8);
        for corner in &corners {
            let homogeneous = Vector4::new(corner.x, corner.y, corner.z, 1.0);
            let transformed = matrix * homogeneous;
            transformed_corners.push([
                transformed.x / transformed.w,
                transformed.y / transformed.w,
                transformed.z / transformed.w,
            ]);
        }

        Self::from_vertices(&transformed_corners)
    }
}

/// One ray-object intersection
#[derive(Debug, Clone)]
pub struct PickHit {
    /// Index of the hit object in the scene
    pub object_index: usize,
    /// Name of the hit object
    pub name: String,
    /// Distance from the ray origin to the intersection point
    pub distance: f32,
    /// World space intersection point
    pub point: Vector3<f32>,
}

/// Converts device pixel coordinates to normalized device coordinates
pub fn screen_to_ndc(screen_pos: (f32, f32), screen_size: (f32, f32)) -> (f32, f32) {
    let ndc_x = (2.0 * screen_pos.0) / screen_size.0 - 1.0;
    let ndc_y = 1.0 - (2.0 * screen_pos.1) / screen_size.1; // Flip Y axis
    (ndc_x, ndc_y)
}

/// Builds a world-space ray through a screen position from a camera
pub fn screen_to_ray(
    screen_pos: (f32, f32),
    screen_size: (f32, f32),
    camera: &ViewCamera,
) -> Ray {
    let (ndc_x, ndc_y) = screen_to_ndc(screen_pos, screen_size);

    // Invert exactly the projection the camera applies
    let view_proj = camera.view_projection_gl();
    let inv_view_proj = view_proj.invert().unwrap_or(Matrix4::from_scale(1.0));

    let near_point = Vector4::new(ndc_x, ndc_y, -1.0, 1.0);
    let far_point = Vector4::new(ndc_x, ndc_y, 1.0, 1.0);

    let world_near = inv_view_proj * near_point;
    let world_far = inv_view_proj * far_point;

    let near_3d = Vector3::new(
        world_near.x / world_near.w,
        world_near.y / world_near.w,
        world_near.z / world_near.w,
    );
    let far_3d = Vector3::new(
        world_far.x / world_far.w,
        world_far.y / world_far.w,
        world_far.z / world_far.w,
    );

    Ray::new(near_3d, (far_3d - near_3d).normalize())
}

/// Casts a ray through a screen position and returns every object it hits,
/// closest first
pub fn pick_all(
    screen_pos: (f32, f32),
    screen_size: (f32, f32),
    camera: &ViewCamera,
    scene: &Scene,
) -> Vec<PickHit> {
    let ray = screen_to_ray(screen_pos, screen_size, camera);
    let mut hits = Vec::new();

    for (index, object) in scene.objects.iter().enumerate() {
        if !object.visible {
            continue;
        }

        let mut all_vertices = Vec::new();
        for mesh in &object.meshes {
            for vertex in mesh.vertices() {
                all_vertices.push(vertex.position);
            }
        }
        if all_vertices.is_empty() {
            continue;
        }

        let world_aabb = Aabb::from_vertices(&all_vertices).transform(&object.transform());

        if let Some(distance) = world_aabb.intersect_ray(&ray) {
            hits.push(PickHit {
                object_index: index,
                name: object.name.clone(),
                distance,
                point: ray.point_at(distance),
            });
        }
    }

    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    hits
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_creation() {
        let vertices = vec![[0.0, 0.0, 0.0], [1.0, 1.0, 1.0], [-1.0, -1.0, -1.0]];
        let aabb = Aabb::from_vertices(&vertices);

        assert_eq!(aabb.min, Vector3::new(-1.0, -1.0, -1.0));
        assert_eq!(aabb.max, Vector3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_ray_aabb_intersection() {
        let aabb = Aabb::new(Vector3::new(-1.0, -1.0, -1.0), Vector3::new(1.0, 1.0, 1.0));

        // Ray hitting the box
        let ray = Ray::new(Vector3::new(0.0, 0.0, -5.0), Vector3::new(0.0, 0.0, 1.0));
        assert!(aabb.intersect_ray(&ray).is_some());

        // Ray missing the box
        let ray_miss = Ray::new(Vector3::new(5.0, 0.0, -5.0), Vector3::new(0.0, 0.0, 1.0));
        assert!(aabb.intersect_ray(&ray_miss).is_none());
    }

    #[test]
    fn test_screen_to_ndc() {
        // Center of the viewport maps to the NDC origin
        assert_eq!(screen_to_ndc((400.0, 300.0), (800.0, 600.0)), (0.0, 0.0));
        // Top-left corner
        assert_eq!(screen_to_ndc((0.0, 0.0), (800.0, 600.0)), (-1.0, 1.0));
        // Bottom-right corner
        assert_eq!(screen_to_ndc((800.0, 600.0), (800.0, 600.0)), (1.0, -1.0));
    }

    #[test]
    fn test_center_ray_points_at_target() {
        use cgmath::Point3;
        let camera = ViewCamera::new(Point3::new(0.0, 0.0, 100.0), 1.0);

        let ray = screen_to_ray((400.0, 300.0), (800.0, 600.0), &camera);

        // A ray through the viewport center heads toward the aim point
        assert!(ray.direction.z < -0.99);
        assert!(ray.direction.x.abs() < 1e-3);
        assert!(ray.direction.y.abs() < 1e-3);
    }
}
