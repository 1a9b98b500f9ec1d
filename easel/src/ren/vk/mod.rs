pub mod blit;
pub mod buffer;
pub mod descriptor;
pub mod device;
pub mod frame;
pub mod image;
pub mod immediate;
pub mod instance;
pub mod mesh;
pub mod pipeline;
pub mod resource_allocator;
pub mod sampler;
pub mod surface;
pub mod swapchain;

use crate::{
    app::info::Info,
    ren::{Renderer as RendererTrait, Settings, settings::Resolution, window::Window},
    texture::Texture,
    traits,
};

use blit::Pass;
use device::{Device, config::QueueFamilyType};
use frame::Frame;
use self::image::Image;
use immediate::ImmediateManager;
use instance::Instance;
use resource_allocator::ResourceAllocator;
use surface::Surface;
use swapchain::{SurfaceSupport, Swapchain};

use ash::{Entry, vk};

const FRAME_TIMEOUT_NS: u64 = 10_000_000_000;

#[allow(unused)]
pub struct Renderer {
    settings: Settings,
    window: Window,

    // Vulkan structures
    entry: Entry,
    instance: Instance,
    surface: Surface,
    device: Device,
    swapchain: Swapchain,
    surface_support: SurfaceSupport,

    // Render loop structures
    frames: Vec<Frame>,
    graphics_queue: vk::Queue,
    allocator: ResourceAllocator,
    immediate: ImmediateManager,

    // Render loop resources
    draw_image: Image,
    blit_pass: Pass,
    frame_count: u32,
}

impl RendererTrait for Renderer {
    fn new(info: &Info, settings: Settings, window: Window, texture: Texture) -> Self {
        let entry = unsafe { Entry::load().expect("easel::ren::vk - failed to load the Vulkan library") };

        let instance = Instance::new(&entry, info);
        let surface = Surface::new(&entry, &instance.handle, &window);
        let device = Device::new(&instance.handle, &surface);
        let (swapchain, surface_support) = Swapchain::new(&instance, &device, &surface, &settings.resolution)
            .expect("easel::ren::vk - failed to create Swapchain");

        let frames = Frame::generator(&device, settings.buffering);
        let graphics_queue = device.get_queue(QueueFamilyType::Graphics);
        let mut allocator = ResourceAllocator::new(
            instance.handle.clone(),
            device.handle.clone(),
            device.physical_device,
            settings.buffering,
        );
        let mut immediate = ImmediateManager::new(&device);

        let Resolution { width, height } = settings.resolution;
        let draw_image = Image::new(
            &device.handle,
            &mut allocator.handle,
            &mut allocator.global_resources,
            vk::Format::R16G16B16A16_SFLOAT,
            vk::Extent3D::default().width(width).height(height).depth(1),
            vk::ImageUsageFlags::TRANSFER_SRC | vk::ImageUsageFlags::TRANSFER_DST | vk::ImageUsageFlags::COLOR_ATTACHMENT,
        );

        let blit_pass = Pass::new(&device, &mut allocator, &mut immediate, &texture, &settings.sampler, draw_image.format);

        Self {
            settings,
            window,
            entry,
            instance,
            surface,
            device,
            swapchain,
            surface_support,
            frames,
            graphics_queue,
            allocator,
            immediate,
            draw_image,
            blit_pass,
            frame_count: 0,
        }
    }

    fn draw(&mut self) {
        // clone frame data handles
        let Frame { command_buffer, render_fence, render_semaphore, swapchain_semaphore, .. } =
            *self.get_current_frame();

        // wait until the GPU is done rendering the frame that last used these handles
        let fences = [render_fence];
        unsafe {
            self.device
                .handle
                .wait_for_fences(&fences, true, FRAME_TIMEOUT_NS)
                .expect("easel::ren::vk - failed to wait for Render Fence");
            self.device
                .handle
                .reset_fences(&fences)
                .expect("easel::ren::vk - failed to reset Render Fence");
        }

        // drop frame-scoped resources
        let device_handle = self.device.handle.clone();
        let frame_index = self.get_current_frame_index();
        self.allocator.drop_frame_resources(&device_handle, frame_index);

        // request a swapchain image
        let (swapchain_image_index, _suboptimal) = unsafe {
            self.swapchain
                .device
                .acquire_next_image(self.swapchain.khr, FRAME_TIMEOUT_NS, swapchain_semaphore, vk::Fence::null())
                .expect("easel::ren::vk - failed to acquire next Swapchain Image")
        };
        let swapchain_image = self.swapchain.images[swapchain_image_index as usize];

        // reset/begin the frame command buffer
        unsafe {
            device_handle
                .reset_command_buffer(command_buffer, vk::CommandBufferResetFlags::empty())
                .expect("easel::ren::vk - failed to reset frame Command Buffer");
            let begin_info = vk::CommandBufferBeginInfo::default()
                .flags(vk::CommandBufferUsageFlags::ONE_TIME_SUBMIT);
            device_handle
                .begin_command_buffer(command_buffer, &begin_info)
                .expect("easel::ren::vk - failed to begin frame Command Buffer");
        }

        // draw the textured quad into the draw image
        image::transition(
            &device_handle,
            command_buffer,
            self.draw_image.handle,
            vk::ImageLayout::UNDEFINED,
            vk::ImageLayout::COLOR_ATTACHMENT_OPTIMAL,
        );
        self.blit_pass
            .record(&device_handle, command_buffer, self.draw_image.view, self.draw_image.extent_2d);

        // copy the draw image onto the swapchain image
        image::transition(
            &device_handle,
            command_buffer,
            self.draw_image.handle,
            vk::ImageLayout::COLOR_ATTACHMENT_OPTIMAL,
            vk::ImageLayout::TRANSFER_SRC_OPTIMAL,
        );
        image::transition(
            &device_handle,
            command_buffer,
            swapchain_image,
            vk::ImageLayout::UNDEFINED,
            vk::ImageLayout::TRANSFER_DST_OPTIMAL,
        );
        image::copy(
            &device_handle,
            command_buffer,
            self.draw_image.handle,
            swapchain_image,
            self.draw_image.extent_2d,
            self.swapchain.extent,
        );
        image::transition(
            &device_handle,
            command_buffer,
            swapchain_image,
            vk::ImageLayout::TRANSFER_DST_OPTIMAL,
            vk::ImageLayout::PRESENT_SRC_KHR,
        );

        unsafe {
            device_handle
                .end_command_buffer(command_buffer)
                .expect("easel::ren::vk - failed to end frame Command Buffer")
        };

        // submit the command buffer to the graphics queue
        let command_buffer_infos = [vk::CommandBufferSubmitInfo::default().command_buffer(command_buffer)];
        let wait_semaphore_infos = [
            vk::SemaphoreSubmitInfo::default()
                .semaphore(swapchain_semaphore)
                .stage_mask(vk::PipelineStageFlags2::COLOR_ATTACHMENT_OUTPUT),
        ];
        let signal_semaphore_infos = [
            vk::SemaphoreSubmitInfo::default()
                .semaphore(render_semaphore)
                .stage_mask(vk::PipelineStageFlags2::ALL_GRAPHICS),
        ];
        let submit_info = [frame::get_submit_info(
            &command_buffer_infos,
            Some(&wait_semaphore_infos),
            Some(&signal_semaphore_infos),
        )];
        unsafe {
            device_handle
                .queue_submit2(self.graphics_queue, &submit_info, render_fence)
                .expect("easel::ren::vk - failed to submit command buffer to Queue")
        };

        // present the swapchain image
        let swapchains = [self.swapchain.khr];
        let wait_semaphores = [render_semaphore];
        let image_indices = [swapchain_image_index];
        let present_info = vk::PresentInfoKHR::default()
            .swapchains(&swapchains)
            .wait_semaphores(&wait_semaphores)
            .image_indices(&image_indices);

        unsafe {
            self.swapchain
                .device
                .queue_present(self.graphics_queue, &present_info)
                .expect("easel::ren::vk - failed to present Swapchain Image")
        };

        self.frame_count += 1;
    }
}

impl Renderer {
    fn get_current_frame_index(&self) -> usize {
        (self.frame_count % self.settings.buffering) as usize
    }

    fn get_current_frame(&mut self) -> &mut Frame {
        let index = self.get_current_frame_index();
        &mut self.frames[index]
    }
}

impl traits::Drop for Renderer {
    fn drop(&mut self) {
        self.device.wait_idle();

        let device_handle = self.device.handle.clone();
        self.blit_pass.drop(&device_handle);
        self.immediate.drop(&device_handle);
        self.frames.iter_mut().for_each(|frame| frame.drop(&device_handle));
        self.allocator.drop(&device_handle);
        self.swapchain.drop(&device_handle);
        traits::Drop::drop(&mut self.device);
        traits::Drop::drop(&mut self.surface);
        traits::Drop::drop(&mut self.instance);
    }
}
