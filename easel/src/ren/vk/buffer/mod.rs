use super::resource_allocator::AllocatedResources;

use ash::{Device as DeviceHandle, vk};
use gpu_allocator::{MemoryLocation, vulkan as vka};

pub struct Buffer {
    pub handle: vk::Buffer,
    pub size: vk::DeviceSize,

    pub usage: vk::BufferUsageFlags,
    pub location: MemoryLocation,
    pub min_alignment: usize,
}

impl Buffer {
    /// Create a buffer whose allocation the caller manages (staging buffers
    /// that are freed right after their copy completes).
    pub fn create(
        device_handle: &DeviceHandle,
        allocator: &mut vka::Allocator,
        size: vk::DeviceSize,
        usage: vk::BufferUsageFlags,
        name: &str,
        location: MemoryLocation,
    ) -> (Self, vka::Allocation) {
        let create_info = vk::BufferCreateInfo::default()
            .size(size)
            .usage(usage)
            .sharing_mode(vk::SharingMode::EXCLUSIVE);

        let buffer = unsafe {
            device_handle
                .create_buffer(&create_info, None)
                .expect("easel::ren::vk::Buffer - failed to create Buffer")
        };

        let requirements = unsafe { device_handle.get_buffer_memory_requirements(buffer) };
        let allocation = allocator
            .allocate(&vka::AllocationCreateDesc {
                name,
                requirements,
                location,
                linear: true,
                allocation_scheme: vka::AllocationScheme::DedicatedBuffer(buffer),
            })
            .expect("easel::ren::vk::Buffer - failed to allocate Buffer memory");

        unsafe {
            device_handle
                .bind_buffer_memory(buffer, allocation.memory(), allocation.offset())
                .expect("easel::ren::vk::Buffer - failed to bind Buffer memory")
        }

        (
            Self {
                handle: buffer,
                size,
                usage,
                location,
                min_alignment: requirements.alignment as usize,
            },
            allocation,
        )
    }

    /// Create a buffer whose lifetime is tracked by the resource allocator.
    pub fn new(
        device_handle: &DeviceHandle,
        allocator: &mut vka::Allocator,
        resources: &mut AllocatedResources,
        size: vk::DeviceSize,
        usage: vk::BufferUsageFlags,
        name: &str,
        location: MemoryLocation,
    ) -> Self {
        let (buffer, allocation) = Self::create(device_handle, allocator, size, usage, name, location);
        resources.add_buffer(buffer.handle, allocation);
        buffer
    }

    pub fn upload<T: Copy>(
        &mut self,
        src: &[T],
        dst: &mut vka::Allocation,
        start_offset: usize,
    ) -> presser::CopyRecord {
        presser::copy_from_slice_to_offset_with_align(src, dst, start_offset, self.min_alignment)
            .expect("easel::ren::vk::Buffer - failed to upload to Buffer")
    }
}
