use super::{
    descriptor::{self, DescriptorSetAllocator, DescriptorSetLayoutBuilder, DescriptorSetPoolSizeRatio},
    device::Device,
    image::{self, Image},
    immediate::ImmediateManager,
    mesh::Mesh,
    pipeline,
    resource_allocator::ResourceAllocator,
    sampler,
};
use crate::{ren::settings::SamplerSettings, texture::Texture};

use ash::{Device as DeviceHandle, vk};
use easel_gpu::{UV_OFFSET, VERTEX_SIZE, slots};

pub const BLIT_SHADER: &[u8] = include_bytes!(env!("blit.spv"));

/// The textured-quad pass: a sampled texture bound as a combined
/// image+sampler, drawn over the whole target through the blit shader.
pub struct Pass {
    pub sampler: vk::Sampler,
    pub image: Image,

    pub descriptor_allocator: DescriptorSetAllocator,
    pub descriptor_set_layout: vk::DescriptorSetLayout,
    pub descriptor_set: vk::DescriptorSet,

    pub shader_module: vk::ShaderModule,
    pub pipeline_layout: vk::PipelineLayout,
    pub pipeline: vk::Pipeline,

    pub quad: Mesh,
}

impl Pass {
    pub fn new(
        device: &Device,
        allocator: &mut ResourceAllocator,
        immediate: &mut ImmediateManager,
        texture: &Texture,
        settings: &SamplerSettings,
        color_format: vk::Format,
    ) -> Self {
        let device_handle = &device.handle;

        let image = Image::new(
            device_handle,
            &mut allocator.handle,
            &mut allocator.global_resources,
            vk::Format::R8G8B8A8_UNORM,
            vk::Extent3D::default().width(texture.width()).height(texture.height()).depth(1),
            vk::ImageUsageFlags::SAMPLED | vk::ImageUsageFlags::TRANSFER_DST,
        );
        image::upload(device_handle, allocator, immediate, &image, texture.pixels());

        let sampler = sampler::create(device_handle, settings);

        let descriptor_set_layout = DescriptorSetLayoutBuilder::default()
            .add_binding(slots::TEXTURE_BINDING, vk::DescriptorType::COMBINED_IMAGE_SAMPLER)
            .build(device_handle, vk::ShaderStageFlags::FRAGMENT);

        let mut descriptor_allocator = DescriptorSetAllocator::new(
            device_handle,
            1,
            &[DescriptorSetPoolSizeRatio::new(vk::DescriptorType::COMBINED_IMAGE_SAMPLER, 1.0)],
        );
        let descriptor_set = descriptor_allocator.allocate(device_handle, &[descriptor_set_layout]);
        descriptor::write_combined_image_sampler(
            device_handle,
            descriptor_set,
            slots::TEXTURE_BINDING,
            image.view,
            sampler,
        );

        let shader_module = pipeline::load_shader_module(device_handle, BLIT_SHADER);
        let set_layouts = [descriptor_set_layout];
        let pipeline_layout = pipeline::create_pipeline_layout(device_handle, &set_layouts);
        let pipeline = create_pipeline(device_handle, shader_module, pipeline_layout, color_format);

        let quad = Mesh::quad(device_handle, allocator, immediate);

        Self {
            sampler,
            image,
            descriptor_allocator,
            descriptor_set_layout,
            descriptor_set,
            shader_module,
            pipeline_layout,
            pipeline,
            quad,
        }
    }

    /// Record the quad draw against a color target that is already in
    /// COLOR_ATTACHMENT_OPTIMAL.
    pub fn record(
        &self,
        device_handle: &DeviceHandle,
        command_buffer: vk::CommandBuffer,
        target_view: vk::ImageView,
        extent: vk::Extent2D,
    ) {
        let color_attachments = [
            vk::RenderingAttachmentInfo::default()
                .image_view(target_view)
                .image_layout(vk::ImageLayout::COLOR_ATTACHMENT_OPTIMAL)
                .load_op(vk::AttachmentLoadOp::CLEAR)
                .store_op(vk::AttachmentStoreOp::STORE)
                .clear_value(vk::ClearValue { color: vk::ClearColorValue { float32: [0.0; 4] } }),
        ];
        let rendering_info = vk::RenderingInfo::default()
            .render_area(vk::Rect2D { offset: vk::Offset2D::default(), extent })
            .layer_count(1)
            .color_attachments(&color_attachments);

        let viewports = [
            vk::Viewport::default()
                .width(extent.width as f32)
                .height(extent.height as f32)
                .max_depth(1.0),
        ];
        let scissors = [vk::Rect2D { offset: vk::Offset2D::default(), extent }];

        unsafe {
            device_handle.cmd_begin_rendering(command_buffer, &rendering_info);
            device_handle.cmd_set_viewport(command_buffer, 0, &viewports);
            device_handle.cmd_set_scissor(command_buffer, 0, &scissors);
            device_handle.cmd_bind_pipeline(command_buffer, vk::PipelineBindPoint::GRAPHICS, self.pipeline);
            device_handle.cmd_bind_descriptor_sets(
                command_buffer,
                vk::PipelineBindPoint::GRAPHICS,
                self.pipeline_layout,
                slots::TEXTURE_SET,
                &[self.descriptor_set],
                &[],
            );
            device_handle.cmd_bind_vertex_buffers(command_buffer, 0, &[self.quad.vertex_buffer.handle], &[0]);
            device_handle.cmd_bind_index_buffer(command_buffer, self.quad.index_buffer.handle, 0, vk::IndexType::UINT32);
            device_handle.cmd_draw_indexed(command_buffer, self.quad.index_count, 1, 0, 0, 0);
            device_handle.cmd_end_rendering(command_buffer);
        }
    }

    pub fn drop(&mut self, device_handle: &DeviceHandle) {
        unsafe {
            device_handle.destroy_pipeline(self.pipeline, None);
            device_handle.destroy_pipeline_layout(self.pipeline_layout, None);
            device_handle.destroy_shader_module(self.shader_module, None);
            device_handle.destroy_descriptor_set_layout(self.descriptor_set_layout, None);
            device_handle.destroy_sampler(self.sampler, None);
        }
        self.descriptor_allocator.drop(device_handle);
        // the image and quad buffers belong to the resource allocator
    }
}

fn create_pipeline(
    device_handle: &DeviceHandle,
    shader_module: vk::ShaderModule,
    layout: vk::PipelineLayout,
    color_format: vk::Format,
) -> vk::Pipeline {
    let stages = [
        vk::PipelineShaderStageCreateInfo::default()
            .stage(vk::ShaderStageFlags::VERTEX)
            .name(c"main_vs")
            .module(shader_module),
        vk::PipelineShaderStageCreateInfo::default()
            .stage(vk::ShaderStageFlags::FRAGMENT)
            .name(c"main_fs")
            .module(shader_module),
    ];

    let vertex_binding_descriptions = [
        vk::VertexInputBindingDescription::default()
            .stride(VERTEX_SIZE as u32)
            .input_rate(vk::VertexInputRate::VERTEX),
    ];

    let vertex_attribute_descriptions = [
        vk::VertexInputAttributeDescription::default()
            .location(slots::POSITION_ATTRIBUTE)
            .binding(vertex_binding_descriptions[0].binding)
            .format(vk::Format::R32G32B32_SFLOAT)
            .offset(0),
        vk::VertexInputAttributeDescription::default()
            .location(slots::UV_ATTRIBUTE)
            .binding(vertex_binding_descriptions[0].binding)
            .format(vk::Format::R32G32_SFLOAT)
            .offset(UV_OFFSET),
    ];

    let vertex_input_state = vk::PipelineVertexInputStateCreateInfo::default()
        .vertex_binding_descriptions(&vertex_binding_descriptions)
        .vertex_attribute_descriptions(&vertex_attribute_descriptions);

    let input_assembly_state = vk::PipelineInputAssemblyStateCreateInfo::default()
        .topology(vk::PrimitiveTopology::TRIANGLE_LIST);

    let viewport_state = vk::PipelineViewportStateCreateInfo::default()
        .viewport_count(1)
        .scissor_count(1);

    let rasterization_state = vk::PipelineRasterizationStateCreateInfo::default()
        .polygon_mode(vk::PolygonMode::FILL)
        .cull_mode(vk::CullModeFlags::NONE)
        .front_face(vk::FrontFace::COUNTER_CLOCKWISE)
        .line_width(1f32);

    let multisample_state = vk::PipelineMultisampleStateCreateInfo::default()
        .rasterization_samples(vk::SampleCountFlags::TYPE_1);

    let depth_stencil_state = vk::PipelineDepthStencilStateCreateInfo::default();

    // blending disabled: the sampled alpha lands in the target untouched
    let color_blend_attachments = [
        vk::PipelineColorBlendAttachmentState::default()
            .blend_enable(false)
            .color_write_mask(vk::ColorComponentFlags::RGBA),
    ];
    let color_blend_state =
        vk::PipelineColorBlendStateCreateInfo::default().attachments(&color_blend_attachments);

    let dynamic_states = [vk::DynamicState::VIEWPORT, vk::DynamicState::SCISSOR];
    let dynamic_state = vk::PipelineDynamicStateCreateInfo::default().dynamic_states(&dynamic_states);

    let formats = [color_format];
    let mut dynamic_rendering = vk::PipelineRenderingCreateInfo::default()
        .color_attachment_formats(&formats);

    let create_infos = [
        vk::GraphicsPipelineCreateInfo::default()
            .stages(&stages)
            .vertex_input_state(&vertex_input_state)
            .input_assembly_state(&input_assembly_state)
            .viewport_state(&viewport_state)
            .rasterization_state(&rasterization_state)
            .multisample_state(&multisample_state)
            .depth_stencil_state(&depth_stencil_state)
            .color_blend_state(&color_blend_state)
            .dynamic_state(&dynamic_state)
            .layout(layout)
            .push_next(&mut dynamic_rendering),
    ];

    unsafe {
        device_handle
            .create_graphics_pipelines(vk::PipelineCache::null(), &create_infos, None)
            .expect("easel::ren::vk::blit - failed to create Graphics Pipeline")[0]
    }
}
