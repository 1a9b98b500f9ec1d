use crate::ren::settings::{AddressMode, Filter, SamplerSettings};

use ash::{Device as DeviceHandle, vk};

pub fn get_filter(filter: Filter) -> vk::Filter {
    match filter {
        Filter::Nearest => vk::Filter::NEAREST,
        Filter::Linear => vk::Filter::LINEAR,
    }
}

pub fn get_address_mode(mode: AddressMode) -> vk::SamplerAddressMode {
    match mode {
        AddressMode::ClampToEdge => vk::SamplerAddressMode::CLAMP_TO_EDGE,
        AddressMode::Repeat => vk::SamplerAddressMode::REPEAT,
        AddressMode::MirroredRepeat => vk::SamplerAddressMode::MIRRORED_REPEAT,
    }
}

/// Single-LOD sampler; filtering and addressing come from the settings.
pub fn create(device_handle: &DeviceHandle, settings: &SamplerSettings) -> vk::Sampler {
    let filter = get_filter(settings.filter);
    let address_mode = get_address_mode(settings.address_mode);

    let create_info = vk::SamplerCreateInfo::default()
        .mag_filter(filter)
        .min_filter(filter)
        .mipmap_mode(vk::SamplerMipmapMode::NEAREST)
        .address_mode_u(address_mode)
        .address_mode_v(address_mode)
        .address_mode_w(address_mode)
        .min_lod(0.0)
        .max_lod(0.0);

    unsafe {
        device_handle
            .create_sampler(&create_info, None)
            .expect("easel::ren::vk::sampler - failed to create Sampler")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filters_map_one_to_one() {
        assert_eq!(get_filter(Filter::Nearest), vk::Filter::NEAREST);
        assert_eq!(get_filter(Filter::Linear), vk::Filter::LINEAR);
    }

    #[test]
    fn address_modes_map_one_to_one() {
        assert_eq!(get_address_mode(AddressMode::ClampToEdge), vk::SamplerAddressMode::CLAMP_TO_EDGE);
        assert_eq!(get_address_mode(AddressMode::Repeat), vk::SamplerAddressMode::REPEAT);
        assert_eq!(get_address_mode(AddressMode::MirroredRepeat), vk::SamplerAddressMode::MIRRORED_REPEAT);
    }
}
