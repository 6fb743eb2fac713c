use std::ops::Range;

use cgmath::{Deg, Matrix4, Rad, SquareMatrix, Vector3};
use wgpu::Device;

use crate::gfx::geometry::GeometryData;

use super::vertex::Vertex3D;

/// Triangle mesh with optional GPU buffers
///
/// Buffers stay `None` until [`Mesh::init_gpu_resources`] runs, so meshes can
/// be created and inspected without a GPU context.
pub struct Mesh {
    vertices: Vec<Vertex3D>,
    indices: Vec<u32>,
    vertex_buffer: Option<wgpu::Buffer>,
    index_buffer: Option<wgpu::Buffer>,
    index_count: u32,
}

impl Mesh {
    pub fn new(vertices: Vec<Vertex3D>, indices: Vec<u32>) -> Self {
        let index_count = indices.len() as u32;
        Self {
            vertices,
            indices,
            vertex_buffer: None,
            index_buffer: None,
            index_count,
        }
    }

    /// Builds a mesh from generated primitive geometry
    pub fn from_geometry(data: &GeometryData) -> Self {
        let vertices = (0..data.positions.len())
            .map(|i| Vertex3D {
                position: data.positions[i],
                normal: data.normals.get(i).copied().unwrap_or([0.0, 1.0, 0.0]),
                uv: data.uvs.get(i).copied().unwrap_or([0.0, 0.0]),
            })
            .collect();
        Self::new(vertices, data.indices.clone())
    }

    /// Builds a mesh from flat position/normal/uv arrays, as produced by
    /// model loaders
    ///
    /// Missing normals are reconstructed from face geometry; missing texture
    /// coordinates default to the origin.
    pub fn from_raw(
        positions: Vec<f32>,
        normals: Vec<f32>,
        uvs: Vec<f32>,
        indices: Vec<u32>,
    ) -> Self {
        let vertex_count = positions.len() / 3;

        let normals = if !normals.is_empty() && normals.len() == positions.len() {
            normals
        } else {
            Self::calculate_face_normals(&positions, &indices)
        };

        let mut vertices = Vec::with_capacity(vertex_count);
        for i in 0..vertex_count {
            vertices.push(Vertex3D {
                position: [positions[i * 3], positions[i * 3 + 1], positions[i * 3 + 2]],
                normal: [normals[i * 3], normals[i * 3 + 1], normals[i * 3 + 2]],
                uv: if uvs.len() >= (i + 1) * 2 {
                    [uvs[i * 2], uvs[i * 2 + 1]]
                } else {
                    [0.0, 0.0]
                },
            });
        }

        Self::new(vertices, indices)
    }

    /// Averaged face normals for meshes that do not carry their own
    pub fn calculate_face_normals(positions: &[f32], indices: &[u32]) -> Vec<f32> {
        let vertex_count = positions.len() / 3;
        let mut normals = vec![0.0; positions.len()];
        let mut counts = vec![0u32; vertex_count];

        for triangle in indices.chunks(3) {
            let i0 = triangle[0] as usize;
            let i1 = triangle[1] as usize;
            let i2 = triangle[2] as usize;

            let v0 = [positions[i0 * 3], positions[i0 * 3 + 1], positions[i0 * 3 + 2]];
            let v1 = [positions[i1 * 3], positions[i1 * 3 + 1], positions[i1 * 3 + 2]];
            let v2 = [positions[i2 * 3], positions[i2 * 3 + 1], positions[i2 * 3 + 2]];

            let edge1 = [v1[0] - v0[0], v1[1] - v0[1], v1[2] - v0[2]];
            let edge2 = [v2[0] - v0[0], v2[1] - v0[1], v2[2] - v0[2]];

            let face_normal = [
                edge1[1] * edge2[2] - edge1[2] * edge2[1],
                edge1[2] * edge2[0] - edge1[0] * edge2[2],
                edge1[0] * edge2[1] - edge1[1] * edge2[0],
            ];

            for &vertex_idx in &[i0, i1, i2] {
                normals[vertex_idx * 3] += face_normal[0];
                normals[vertex_idx * 3 + 1] += face_normal[1];
                normals[vertex_idx * 3 + 2] += face_normal[2];
                counts[vertex_idx] += 1;
            }
        }

        for i in 0..vertex_count {
            if counts[i] > 0 {
                let length = (normals[i * 3].powi(2)
                    + normals[i * 3 + 1].powi(2)
                    + normals[i * 3 + 2].powi(2))
                .sqrt();
                if length > 0.0 {
                    normals[i * 3] /= length;
                    normals[i * 3 + 1] /= length;
                    normals[i * 3 + 2] /= length;
                }
            }
        }

        normals
    }

    /// Vertex data access for bounds computation and picking
    pub fn vertices(&self) -> &[Vertex3D] {
        &self.vertices
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertices.len() as u32
    }

    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    fn init_gpu_resources(&mut self, device: &Device) {
        let vertex_buffer = wgpu::util::DeviceExt::create_buffer_init(
            device,
            &wgpu::util::BufferInitDescriptor {
                label: Some("Vertex Buffer"),
                contents: bytemuck::cast_slice(&self.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            },
        );

        let index_buffer = wgpu::util::DeviceExt::create_buffer_init(
            device,
            &wgpu::util::BufferInitDescriptor {
                label: Some("Index Buffer"),
                contents: bytemuck::cast_slice(&self.indices),
                usage: wgpu::BufferUsages::INDEX,
            },
        );

        self.vertex_buffer = Some(vertex_buffer);
        self.index_buffer = Some(index_buffer);
    }
}

/// Per-object uniform data for the vertex stage
///
/// MUST match the ObjectUniform struct in the shaders exactly.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct ObjectUniform {
    model: [[f32; 4]; 4],
    receives_shadow: u32,
    _padding: [u32; 3],
}

/// GPU resources backing one scene object
pub struct ObjectGpuResources {
    pub transform_buffer: wgpu::Buffer,
    pub transform_bind_group: wgpu::BindGroup,
}

/// A named scene-graph node: meshes plus transform, material and shadow flags
///
/// Position, rotation and scale are stored separately so the frame driver can
/// move an object without disturbing its accumulated spin, which is how the
/// sun keeps rotating while it orbits.
pub struct SceneObject {
    pub name: String,
    pub meshes: Vec<Mesh>,
    pub position: Vector3<f32>,
    pub rotation: Matrix4<f32>,
    pub scale: Vector3<f32>,
    pub material_id: Option<String>,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
    pub visible: bool,
    pub gpu_resources: Option<ObjectGpuResources>,
}

impl SceneObject {
    pub fn new(name: &str, meshes: Vec<Mesh>) -> Self {
        Self {
            name: name.to_string(),
            meshes,
            position: Vector3::new(0.0, 0.0, 0.0),
            rotation: Matrix4::identity(),
            scale: Vector3::new(1.0, 1.0, 1.0),
            material_id: None,
            cast_shadow: false,
            receive_shadow: false,
            visible: true,
            gpu_resources: None,
        }
    }

    /// Builder pattern: place the object
    pub fn with_position(mut self, x: f32, y: f32, z: f32) -> Self {
        self.position = Vector3::new(x, y, z);
        self
    }

    /// Builder pattern: assign a material by id
    pub fn with_material(mut self, material_id: &str) -> Self {
        self.material_id = Some(material_id.to_string());
        self
    }

    /// Builder pattern: initial yaw
    pub fn with_rotation_y(mut self, angle: Deg<f32>) -> Self {
        self.rotation = Matrix4::from_angle_y(angle);
        self
    }

    /// Builder pattern: initial pitch
    pub fn with_rotation_x(mut self, angle: Deg<f32>) -> Self {
        self.rotation = Matrix4::from_angle_x(angle);
        self
    }

    /// Builder pattern: uniform scale
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = Vector3::new(scale, scale, scale);
        self
    }

    /// Builder pattern: mark as shadow caster
    pub fn with_cast_shadow(mut self) -> Self {
        self.cast_shadow = true;
        self
    }

    /// Builder pattern: mark as shadow receiver
    pub fn with_receive_shadow(mut self) -> Self {
        self.receive_shadow = true;
        self
    }

    /// Composed model matrix (translation * rotation * scale)
    pub fn transform(&self) -> Matrix4<f32> {
        Matrix4::from_translation(self.position)
            * self.rotation
            * Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z)
    }

    /// Apply an incremental rotation around the local Y axis
    pub fn rotate_y(&mut self, angle: Rad<f32>) {
        self.rotation = self.rotation * Matrix4::from_angle_y(angle);
    }

    /// Apply an incremental rotation around the local Z axis
    pub fn rotate_z(&mut self, angle: Rad<f32>) {
        self.rotation = self.rotation * Matrix4::from_angle_z(angle);
    }

    /// Offset the object's position
    pub fn translate(&mut self, offset: Vector3<f32>) {
        self.position += offset;
    }

    fn uniform(&self) -> ObjectUniform {
        ObjectUniform {
            model: self.transform().into(),
            receives_shadow: self.receive_shadow as u32,
            _padding: [0; 3],
        }
    }

    /// Sync the transform uniform to the GPU if resources exist
    pub fn update_transform(&mut self, queue: &wgpu::Queue) {
        if let Some(gpu_resources) = &self.gpu_resources {
            queue.write_buffer(
                &gpu_resources.transform_buffer,
                0,
                bytemuck::bytes_of(&self.uniform()),
            );
        }
    }

    /// Get the transform bind group for rendering
    pub fn get_transform_bind_group(&self) -> Option<&wgpu::BindGroup> {
        self.gpu_resources
            .as_ref()
            .map(|res| &res.transform_bind_group)
    }

    pub fn init_gpu_resources(&mut self, device: &Device) {
        for mesh in self.meshes.iter_mut() {
            mesh.init_gpu_resources(device);
        }

        let transform_buffer = wgpu::util::DeviceExt::create_buffer_init(
            device,
            &wgpu::util::BufferInitDescriptor {
                label: Some("Transform Uniform Buffer"),
                contents: bytemuck::bytes_of(&self.uniform()),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            },
        );

        let transform_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Transform Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    // The fragment stage reads the receives_shadow flag
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let transform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Transform Bind Group"),
            layout: &transform_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: transform_buffer.as_entire_binding(),
            }],
        });

        self.gpu_resources = Some(ObjectGpuResources {
            transform_buffer,
            transform_bind_group,
        });
    }
}

pub trait DrawObject<'a> {
    fn draw_mesh(&mut self, mesh: &'a Mesh);
    fn draw_mesh_instanced(&mut self, mesh: &'a Mesh, instances: Range<u32>);
    fn draw_object(&mut self, object: &'a SceneObject);
    fn draw_object_instanced(&mut self, object: &'a SceneObject, instances: Range<u32>);
}

impl<'a, 'b> DrawObject<'b> for wgpu::RenderPass<'a>
where
    'b: 'a,
{
    fn draw_mesh(&mut self, mesh: &'b Mesh) {
        self.draw_mesh_instanced(mesh, 0..1);
    }

    fn draw_mesh_instanced(&mut self, mesh: &'b Mesh, instances: Range<u32>) {
        let vertex_buffer = match &mesh.vertex_buffer {
            Some(buffer) => buffer,
            None => return, // Skip drawing if not uploaded
        };
        let index_buffer = match &mesh.index_buffer {
            Some(buffer) => buffer,
            None => return,
        };

        self.set_vertex_buffer(0, vertex_buffer.slice(..));
        self.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        self.draw_indexed(0..mesh.index_count, 0, instances);
    }

    fn draw_object(&mut self, object: &'b SceneObject) {
        self.draw_object_instanced(object, 0..1);
    }

    fn draw_object_instanced(&mut self, object: &'b SceneObject, instances: Range<u32>) {
        for mesh in &object.meshes {
            self.draw_mesh_instanced(mesh, instances.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translate_accumulates_unit_steps() {
        let mut object = SceneObject::new("panda1", Vec::new()).with_position(-8.0, 11.0, 20.0);

        object.translate(Vector3::new(1.0, 0.0, 0.0));
        object.translate(Vector3::new(1.0, 0.0, 0.0));
        object.translate(Vector3::new(0.0, 0.0, -1.0));

        assert_eq!(object.position, Vector3::new(-6.0, 11.0, 19.0));
    }

    #[test]
    fn rotation_survives_position_updates() {
        let mut object = SceneObject::new("sun", Vec::new());
        object.rotate_y(Rad(0.01));
        let rotation_before = object.rotation;

        object.position = Vector3::new(70.0, 125.0, 0.0);

        assert_eq!(object.rotation, rotation_before);
        let transform = object.transform();
        assert!((transform.w.x - 70.0).abs() < 1e-6);
        assert!((transform.w.y - 125.0).abs() < 1e-6);
    }

    #[test]
    fn from_raw_reconstructs_missing_normals() {
        // Single triangle in the XZ plane, wound so the normal points up
        let positions = vec![0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0];
        let mesh = Mesh::from_raw(positions, Vec::new(), Vec::new(), vec![0, 1, 2]);

        for vertex in mesh.vertices() {
            assert!((vertex.normal[1] - 1.0).abs() < 1e-6);
        }
    }
}
