use ash::vk;
use glam::{Mat4, Vec3};

use crate::transforms;

const CUBE_VERTICES: [Vec3; 8] = [
    Vec3::new(-0.5, -0.5, -0.5),
    Vec3::new(0.5, -0.5, -0.5),
    Vec3::new(0.5, 0.5, -0.5),
    Vec3::new(-0.5, 0.5, -0.5),
    Vec3::new(-0.5, -0.5, 0.5),
    Vec3::new(0.5, -0.5, 0.5),
    Vec3::new(0.5, 0.5, 0.5),
    Vec3::new(-0.5, 0.5, 0.5),
];

const CUBE_COLORS: [Vec3; 8] = [
    Vec3::new(0.0, 0.0, 0.0),
    Vec3::new(1.0, 0.0, 0.0),
    Vec3::new(1.0, 1.0, 0.0),
    Vec3::new(0.0, 1.0, 0.0),
    Vec3::new(0.0, 0.0, 1.0),
    Vec3::new(1.0, 0.0, 1.0),
    Vec3::new(1.0, 1.0, 1.0),
    Vec3::new(0.0, 1.0, 1.0),
];

#[rustfmt::skip]
const CUBE_INDICES: [u16; 36] = [
    0, 1, 2, 2, 3, 0, // front
    1, 5, 6, 6, 2, 1, // right
    5, 4, 7, 7, 6, 5, // back
    4, 0, 3, 3, 7, 4, // left
    3, 2, 6, 6, 7, 3, // top
    4, 5, 1, 1, 0, 4, // bottom
];

/// A renderable cube: CPU-side mesh data, the GPU buffers it is uploaded
/// into, and the transform state advanced once per frame.
///
/// The buffer handles start out null; the renderer fills them in during
/// setup and releases them during teardown.
pub struct Model {
    pub vertices: Vec<Vec3>,
    pub colors: Vec<Vec3>,
    pub indices: Vec<u16>,

    pub vertex_buffer: vk::Buffer,
    pub vertex_buffer_memory: vk::DeviceMemory,
    pub color_buffer: vk::Buffer,
    pub color_buffer_memory: vk::DeviceMemory,
    pub index_buffer: vk::Buffer,
    pub index_buffer_memory: vk::DeviceMemory,

    position: Vec3,
    rotation: Vec3,
    scale: f32,
}

impl Model {
    pub fn new() -> Self {
        Self {
            vertices: CUBE_VERTICES.to_vec(),
            colors: CUBE_COLORS.to_vec(),
            indices: CUBE_INDICES.to_vec(),
            vertex_buffer: vk::Buffer::null(),
            vertex_buffer_memory: vk::DeviceMemory::null(),
            color_buffer: vk::Buffer::null(),
            color_buffer_memory: vk::DeviceMemory::null(),
            index_buffer: vk::Buffer::null(),
            index_buffer_memory: vk::DeviceMemory::null(),
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: 1.0,
        }
    }

    pub fn set_rotation(&mut self, rotation: Vec3) {
        self.rotation = rotation;
    }

    pub fn model_matrix(&self) -> Mat4 {
        transforms::translation_vec(self.position)
            * transforms::rotation_vec(self.rotation)
            * transforms::scaling_uniform(self.scale)
    }

    pub fn destroy(&self, device: &ash::Device) {
        unsafe {
            device.destroy_buffer(self.index_buffer, None);
            device.free_memory(self.index_buffer_memory, None);

            device.destroy_buffer(self.color_buffer, None);
            device.free_memory(self.color_buffer_memory, None);

            device.destroy_buffer(self.vertex_buffer, None);
            device.free_memory(self.vertex_buffer_memory, None);
        }
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube_has_one_color_per_vertex() {
        let model = Model::new();
        assert_eq!(model.vertices.len(), 8);
        assert_eq!(model.colors.len(), model.vertices.len());
    }

    #[test]
    fn cube_indices_form_twelve_triangles() {
        let model = Model::new();
        assert_eq!(model.indices.len(), 36);
        assert!(model
            .indices
            .iter()
            .all(|&index| (index as usize) < model.vertices.len()));
    }

    #[test]
    fn every_cube_vertex_is_referenced() {
        let model = Model::new();
        for vertex in 0..model.vertices.len() as u16 {
            assert!(model.indices.contains(&vertex));
        }
    }

    #[test]
    fn fresh_model_matrix_is_identity() {
        assert_eq!(Model::new().model_matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn model_matrix_follows_set_rotation() {
        let mut model = Model::new();
        let angles = Vec3::new(0.0, 0.25_f32.sin(), 0.0);
        model.set_rotation(angles);
        assert_eq!(model.model_matrix(), transforms::rotation_vec(angles));
    }
}
