use super::{buffer::Buffer, immediate::ImmediateManager, resource_allocator::ResourceAllocator};

use ash::{Device as DeviceHandle, vk};
use easel_gpu::{VERTEX_SIZE, Vertex, glam::{Vec2, Vec3}};
use gpu_allocator::MemoryLocation;

pub const INDEX_SIZE: u64 = size_of::<u32>() as u64;

pub struct Mesh {
    pub index_buffer: Buffer,
    pub vertex_buffer: Buffer,
    pub index_count: u32,
}

/// Fullscreen quad in NDC; UVs span [0,1]² with (0,0) at the top-left
/// corner (Vulkan NDC has y pointing down).
pub fn quad_geometry() -> ([u32; 6], [Vertex; 4]) {
    let indices = [0, 1, 2, 2, 3, 0];
    let vertices = [
        Vertex::new(Vec3::new(-1.0, -1.0, 0.0), Vec2::new(0.0, 0.0)),
        Vertex::new(Vec3::new(1.0, -1.0, 0.0), Vec2::new(1.0, 0.0)),
        Vertex::new(Vec3::new(1.0, 1.0, 0.0), Vec2::new(1.0, 1.0)),
        Vertex::new(Vec3::new(-1.0, 1.0, 0.0), Vec2::new(0.0, 1.0)),
    ];
    (indices, vertices)
}

impl Mesh {
    pub fn new(
        device_handle: &DeviceHandle,
        allocator: &mut ResourceAllocator,
        immediate: &mut ImmediateManager,
        indices: &[u32],
        vertices: &[Vertex],
    ) -> Self {
        let index_buffer_size = indices.len() as u64 * INDEX_SIZE;
        let index_buffer = Buffer::new(
            device_handle,
            &mut allocator.handle,
            &mut allocator.global_resources,
            index_buffer_size,
            vk::BufferUsageFlags::INDEX_BUFFER | vk::BufferUsageFlags::TRANSFER_DST,
            "mesh_indices",
            MemoryLocation::GpuOnly,
        );

        let vertex_buffer_size = vertices.len() as u64 * VERTEX_SIZE;
        let vertex_buffer = Buffer::new(
            device_handle,
            &mut allocator.handle,
            &mut allocator.global_resources,
            vertex_buffer_size,
            vk::BufferUsageFlags::VERTEX_BUFFER | vk::BufferUsageFlags::TRANSFER_DST,
            "mesh_vertices",
            MemoryLocation::GpuOnly,
        );

        let (mut staging_buffer, mut staging_allocation) = Buffer::create(
            device_handle,
            &mut allocator.handle,
            index_buffer_size + vertex_buffer_size,
            vk::BufferUsageFlags::TRANSFER_SRC,
            "mesh_staging",
            MemoryLocation::CpuToGpu,
        );

        let vertices_record = staging_buffer.upload(vertices, &mut staging_allocation, 0);
        let indices_record =
            staging_buffer.upload(indices, &mut staging_allocation, vertices_record.copy_end_offset_padded);
        let indices_offset = indices_record.copy_start_offset;

        immediate.submit(device_handle, &|command_buffer: vk::CommandBuffer| unsafe {
            device_handle.cmd_copy_buffer(
                command_buffer,
                staging_buffer.handle,
                vertex_buffer.handle,
                &[vk::BufferCopy::default()
                    .src_offset(vertices_record.copy_start_offset as u64)
                    .dst_offset(0)
                    .size(vertex_buffer_size)],
            );

            device_handle.cmd_copy_buffer(
                command_buffer,
                staging_buffer.handle,
                index_buffer.handle,
                &[vk::BufferCopy::default()
                    .src_offset(indices_offset as u64)
                    .dst_offset(0)
                    .size(index_buffer_size)],
            );
        });

        unsafe { device_handle.destroy_buffer(staging_buffer.handle, None) };
        allocator
            .handle
            .free(staging_allocation)
            .expect("easel::ren::vk::Mesh - failed to free staging allocation");

        Self { index_buffer, vertex_buffer, index_count: indices.len() as u32 }
    }

    pub fn quad(
        device_handle: &DeviceHandle,
        allocator: &mut ResourceAllocator,
        immediate: &mut ImmediateManager,
    ) -> Self {
        let (indices, vertices) = quad_geometry();
        Self::new(device_handle, allocator, immediate, &indices, &vertices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quad_covers_the_unit_uv_square() {
        let (indices, vertices) = quad_geometry();

        assert_eq!(vertices.len(), 4);
        assert_eq!(indices.len(), 6);
        assert!(indices.iter().all(|&index| (index as usize) < vertices.len()));

        let uvs: Vec<_> = vertices.iter().map(|vertex| vertex.uv).collect();
        assert!(uvs.contains(&Vec2::new(0.0, 0.0)));
        assert!(uvs.contains(&Vec2::new(1.0, 0.0)));
        assert!(uvs.contains(&Vec2::new(1.0, 1.0)));
        assert!(uvs.contains(&Vec2::new(0.0, 1.0)));
    }

    #[test]
    fn quad_spans_the_whole_viewport() {
        let (_indices, vertices) = quad_geometry();
        for vertex in vertices {
            assert_eq!(vertex.position.x.abs(), 1.0);
            assert_eq!(vertex.position.y.abs(), 1.0);
            assert_eq!(vertex.position.z, 0.0);
        }
    }

    #[test]
    fn quad_triangles_share_the_diagonal() {
        let (indices, _vertices) = quad_geometry();
        let first = &indices[..3];
        let second = &indices[3..];
        let shared: Vec<_> = first.iter().filter(|index| second.contains(index)).collect();
        assert_eq!(shared.len(), 2);
    }
}
