use super::{device::{Device, config::QueueFamilyType}, frame};

use ash::{Device as DeviceHandle, vk};

const SUBMIT_TIMEOUT_NS: u64 = 10_000_000_000;

/// One-off command submission outside the frame loop (resource uploads).
/// Blocks on a fence until the GPU has consumed the commands.
pub struct ImmediateManager {
    pub command_pool: vk::CommandPool,
    pub command_buffer: vk::CommandBuffer,
    pub fence: vk::Fence,
    pub queue: vk::Queue,
}

impl ImmediateManager {
    pub fn new(device: &Device) -> Self {
        let pool_create_info = vk::CommandPoolCreateInfo::default()
            .flags(vk::CommandPoolCreateFlags::RESET_COMMAND_BUFFER)
            .queue_family_index(device.queue_families.get_family_index(QueueFamilyType::Graphics));

        let command_pool = unsafe {
            device
                .handle
                .create_command_pool(&pool_create_info, None)
                .expect("easel::ren::vk::ImmediateManager - failed to create Command Pool")
        };

        let buffer_allocate_info = vk::CommandBufferAllocateInfo::default()
            .command_pool(command_pool)
            .command_buffer_count(1)
            .level(vk::CommandBufferLevel::PRIMARY);

        let command_buffers = unsafe {
            device
                .handle
                .allocate_command_buffers(&buffer_allocate_info)
                .expect("easel::ren::vk::ImmediateManager - failed to allocate Command Buffer")
        };

        Self {
            command_pool,
            command_buffer: command_buffers[0],
            fence: frame::create_fence(&device.handle, vk::FenceCreateFlags::empty()),
            queue: device.get_queue(QueueFamilyType::Graphics),
        }
    }

    pub fn submit(&mut self, device_handle: &DeviceHandle, record: &dyn Fn(vk::CommandBuffer)) {
        unsafe {
            device_handle
                .reset_command_buffer(self.command_buffer, vk::CommandBufferResetFlags::empty())
                .expect("easel::ren::vk::ImmediateManager - failed to reset Command Buffer");

            let begin_info = vk::CommandBufferBeginInfo::default()
                .flags(vk::CommandBufferUsageFlags::ONE_TIME_SUBMIT);
            device_handle
                .begin_command_buffer(self.command_buffer, &begin_info)
                .expect("easel::ren::vk::ImmediateManager - failed to begin Command Buffer");
        }

        record(self.command_buffer);

        let command_buffer_infos = [vk::CommandBufferSubmitInfo::default().command_buffer(self.command_buffer)];
        let submit_info = [frame::get_submit_info(&command_buffer_infos, None, None)];
        let fences = [self.fence];

        unsafe {
            device_handle
                .end_command_buffer(self.command_buffer)
                .expect("easel::ren::vk::ImmediateManager - failed to end Command Buffer");
            device_handle
                .queue_submit2(self.queue, &submit_info, self.fence)
                .expect("easel::ren::vk::ImmediateManager - failed to submit to Queue");
            device_handle
                .wait_for_fences(&fences, true, SUBMIT_TIMEOUT_NS)
                .expect("easel::ren::vk::ImmediateManager - timed out waiting for submission");
            device_handle
                .reset_fences(&fences)
                .expect("easel::ren::vk::ImmediateManager - failed to reset Fence");
        }
    }

    pub fn drop(&mut self, device_handle: &DeviceHandle) {
        unsafe {
            device_handle.destroy_command_pool(self.command_pool, None);
            device_handle.destroy_fence(self.fence, None);
        }
    }
}
