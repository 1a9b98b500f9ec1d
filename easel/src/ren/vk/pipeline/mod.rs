use ash::{Device as DeviceHandle, util, vk};

use std::io::Cursor;

pub fn load_shader_module(device_handle: &DeviceHandle, shader: &[u8]) -> vk::ShaderModule {
    let code = util::read_spv(&mut Cursor::new(shader))
        .expect("easel::ren::vk::pipeline - failed to read SPIR-V words");
    let create_info = vk::ShaderModuleCreateInfo::default().code(&code);

    unsafe {
        device_handle
            .create_shader_module(&create_info, None)
            .expect("easel::ren::vk::pipeline - failed to create shader module")
    }
}

pub fn create_pipeline_layout(
    device_handle: &DeviceHandle,
    set_layouts: &[vk::DescriptorSetLayout],
) -> vk::PipelineLayout {
    let create_info = vk::PipelineLayoutCreateInfo::default().set_layouts(set_layouts);

    unsafe {
        device_handle
            .create_pipeline_layout(&create_info, None)
            .expect("easel::ren::vk::pipeline - failed to create pipeline layout")
    }
}
