use ash::{Device as DeviceHandle, vk};

pub struct DescriptorSetLayoutBuilder<'a> {
    pub bindings: Vec<vk::DescriptorSetLayoutBinding<'a>>,
}

impl DescriptorSetLayoutBuilder<'_> {
    pub fn default() -> Self {
        Self { bindings: vec![] }
    }

    pub fn add_binding(mut self, binding: u32, descriptor_type: vk::DescriptorType) -> Self {
        self.bindings.push(
            vk::DescriptorSetLayoutBinding::default()
                .binding(binding)
                .descriptor_count(1)
                .descriptor_type(descriptor_type),
        );
        self
    }

    pub fn build(
        &mut self,
        device_handle: &DeviceHandle,
        shader_stages: vk::ShaderStageFlags,
    ) -> vk::DescriptorSetLayout {
        self.bindings
            .iter_mut()
            .for_each(|binding| binding.stage_flags |= shader_stages);

        let create_info = vk::DescriptorSetLayoutCreateInfo::default().bindings(&self.bindings);

        unsafe {
            device_handle
                .create_descriptor_set_layout(&create_info, None)
                .expect("easel::ren::vk::descriptor - failed to create Descriptor Set Layout")
        }
    }
}

pub struct DescriptorSetPoolSizeRatio {
    pub ty: vk::DescriptorType,
    pub ratio: f32,
}

impl DescriptorSetPoolSizeRatio {
    pub fn new(ty: vk::DescriptorType, ratio: f32) -> Self {
        Self { ty, ratio }
    }
}

pub struct DescriptorSetAllocator {
    pool: vk::DescriptorPool,
}

impl DescriptorSetAllocator {
    pub fn new(
        device_handle: &DeviceHandle,
        max_sets: u32,
        pool_ratios: &[DescriptorSetPoolSizeRatio],
    ) -> Self {
        let pool_sizes: Vec<_> = pool_ratios
            .iter()
            .map(|pool_ratio| {
                vk::DescriptorPoolSize::default()
                    .ty(pool_ratio.ty)
                    .descriptor_count((pool_ratio.ratio * max_sets as f32) as u32)
            })
            .collect();

        let create_info = vk::DescriptorPoolCreateInfo::default()
            .max_sets(max_sets)
            .pool_sizes(&pool_sizes);

        let pool = unsafe {
            device_handle
                .create_descriptor_pool(&create_info, None)
                .expect("easel::ren::vk::descriptor - failed to create Descriptor Pool")
        };

        Self { pool }
    }

    pub fn allocate(
        &mut self,
        device_handle: &DeviceHandle,
        layouts: &[vk::DescriptorSetLayout],
    ) -> vk::DescriptorSet {
        let allocate_info = vk::DescriptorSetAllocateInfo::default()
            .descriptor_pool(self.pool)
            .set_layouts(layouts);

        unsafe {
            device_handle
                .allocate_descriptor_sets(&allocate_info)
                .expect("easel::ren::vk::descriptor - failed to allocate Descriptor Set")[0]
        }
    }

    pub fn drop(&mut self, device_handle: &DeviceHandle) {
        unsafe { device_handle.destroy_descriptor_pool(self.pool, None) };
    }
}

/// Point a combined image+sampler binding at a texture that is already in
/// SHADER_READ_ONLY_OPTIMAL.
pub fn write_combined_image_sampler(
    device_handle: &DeviceHandle,
    set: vk::DescriptorSet,
    binding: u32,
    view: vk::ImageView,
    sampler: vk::Sampler,
) {
    let image_info = [
        vk::DescriptorImageInfo::default()
            .sampler(sampler)
            .image_view(view)
            .image_layout(vk::ImageLayout::SHADER_READ_ONLY_OPTIMAL),
    ];
    let descriptor_writes = [
        vk::WriteDescriptorSet::default()
            .dst_set(set)
            .dst_binding(binding)
            .descriptor_count(1)
            .descriptor_type(vk::DescriptorType::COMBINED_IMAGE_SAMPLER)
            .image_info(&image_info),
    ];
    unsafe { device_handle.update_descriptor_sets(&descriptor_writes, &[]) };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_records_binding_indices_and_types() {
        let builder = DescriptorSetLayoutBuilder::default()
            .add_binding(2, vk::DescriptorType::COMBINED_IMAGE_SAMPLER);

        assert_eq!(builder.bindings.len(), 1);
        assert_eq!(builder.bindings[0].binding, 2);
        assert_eq!(builder.bindings[0].descriptor_count, 1);
        assert_eq!(builder.bindings[0].descriptor_type, vk::DescriptorType::COMBINED_IMAGE_SAMPLER);
    }

    #[test]
    fn builder_keeps_sparse_binding_indices() {
        // a layout may use binding 2 without declaring 0 and 1
        let builder = DescriptorSetLayoutBuilder::default()
            .add_binding(2, vk::DescriptorType::COMBINED_IMAGE_SAMPLER);
        assert!(builder.bindings.iter().all(|binding| binding.binding == 2));
    }
}
