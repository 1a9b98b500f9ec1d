use super::{device::Device, instance::Instance, surface::Surface};
use crate::ren::settings::Resolution;

use ash::{Device as DeviceHandle, khr, vk};
use std::cmp;

pub struct SurfaceSupport {
    pub capabilities: vk::SurfaceCapabilitiesKHR,
    pub formats: Vec<vk::SurfaceFormatKHR>,
    pub present_modes: Vec<vk::PresentModeKHR>,
}

#[derive(Debug)]
pub enum SwapchainError {
    NoSurfaceFormats,
    NoPresentModes,
}

pub struct Swapchain {
    pub device: khr::swapchain::Device,
    pub khr: vk::SwapchainKHR,
    pub format: vk::Format,
    pub images: Vec<vk::Image>,
    pub image_views: Vec<vk::ImageView>,
    pub extent: vk::Extent2D,
}

impl Swapchain {
    pub fn new(
        instance: &Instance,
        device: &Device,
        surface: &Surface,
        resolution: &Resolution,
    ) -> Result<(Swapchain, SurfaceSupport), SwapchainError> {
        let surface_support = query_surface_support(device.physical_device, surface)?;
        let swapchain = Self::create(instance, device, surface, &surface_support, resolution);
        Ok((swapchain, surface_support))
    }

    pub fn create(
        instance: &Instance,
        device: &Device,
        surface: &Surface,
        surface_support: &SurfaceSupport,
        resolution: &Resolution,
    ) -> Self {
        let surface_format = select_surface_format(
            surface_support,
            vk::Format::B8G8R8A8_UNORM,
            vk::ColorSpaceKHR::SRGB_NONLINEAR,
        );
        let present_mode = select_present_mode(surface_support, vk::PresentModeKHR::FIFO);
        let swapchain_extent = select_swapchain_extent(surface_support, resolution);
        let min_image_count = select_swapchain_min_image_count(surface_support);
        let (image_sharing_mode, queue_family_indices) = get_queue_family_config(device);

        let mut create_info = vk::SwapchainCreateInfoKHR::default()
            .surface(surface.khr)
            .min_image_count(min_image_count)
            .image_format(surface_format.format)
            .image_color_space(surface_format.color_space)
            .image_extent(swapchain_extent)
            .image_array_layers(1)
            .image_usage(vk::ImageUsageFlags::COLOR_ATTACHMENT | vk::ImageUsageFlags::TRANSFER_DST)
            .image_sharing_mode(image_sharing_mode)
            .pre_transform(surface_support.capabilities.current_transform)
            .composite_alpha(vk::CompositeAlphaFlagsKHR::OPAQUE)
            .present_mode(present_mode)
            .clipped(true);

        if !queue_family_indices.is_empty() {
            create_info = create_info.queue_family_indices(&queue_family_indices)
        };

        let swapchain_device = khr::swapchain::Device::new(&instance.handle, &device.handle);

        let khr = unsafe {
            swapchain_device
                .create_swapchain(&create_info, None)
                .expect("easel::ren::vk::Swapchain - failed to create Swapchain")
        };
        let images = unsafe {
            swapchain_device
                .get_swapchain_images(khr)
                .expect("easel::ren::vk::Swapchain - failed to get swapchain Images")
        };
        let image_views: Vec<vk::ImageView> = images
            .iter()
            .map(|&swapchain_image| {
                let create_info = vk::ImageViewCreateInfo::default()
                    .image(swapchain_image)
                    .view_type(vk::ImageViewType::TYPE_2D)
                    .format(surface_format.format)
                    .subresource_range(
                        vk::ImageSubresourceRange::default()
                            .aspect_mask(vk::ImageAspectFlags::COLOR)
                            .base_mip_level(0)
                            .level_count(1)
                            .base_array_layer(0)
                            .layer_count(1),
                    );

                unsafe {
                    device
                        .handle
                        .create_image_view(&create_info, None)
                        .expect("easel::ren::vk::Swapchain - failed to create swapchain Image View")
                }
            })
            .collect();

        Self {
            device: swapchain_device,
            khr,
            format: surface_format.format,
            images,
            image_views,
            extent: swapchain_extent,
        }
    }

    pub fn drop(&mut self, device_handle: &DeviceHandle) {
        unsafe {
            self.device.destroy_swapchain(self.khr, None);
            self.images.clear(); // the swapchain owns its images
            self.image_views
                .iter()
                .for_each(|&image_view| device_handle.destroy_image_view(image_view, None));
            self.image_views.clear();
        };
    }
}

fn query_surface_support(
    physical_device: vk::PhysicalDevice,
    surface: &Surface,
) -> Result<SurfaceSupport, SwapchainError> {
    let capabilities = unsafe {
        surface
            .instance
            .get_physical_device_surface_capabilities(physical_device, surface.khr)
            .expect("easel::ren::vk::Swapchain - failed to query surface capabilities")
    };

    let formats = unsafe {
        surface
            .instance
            .get_physical_device_surface_formats(physical_device, surface.khr)
            .expect("easel::ren::vk::Swapchain - failed to query surface formats")
    };
    if formats.is_empty() {
        return Err(SwapchainError::NoSurfaceFormats);
    }

    let present_modes = unsafe {
        surface
            .instance
            .get_physical_device_surface_present_modes(physical_device, surface.khr)
            .expect("easel::ren::vk::Swapchain - failed to query surface present modes")
    };
    if present_modes.is_empty() {
        return Err(SwapchainError::NoPresentModes);
    }

    Ok(SurfaceSupport { capabilities, formats, present_modes })
}

fn select_surface_format(
    surface_support: &SurfaceSupport,
    desired_format: vk::Format,
    desired_color_space: vk::ColorSpaceKHR,
) -> vk::SurfaceFormatKHR {
    surface_support
        .formats
        .iter()
        .find(|format| format.format == desired_format && format.color_space == desired_color_space)
        .copied()
        .unwrap_or_else(|| *surface_support.formats.first().unwrap())
}

fn select_present_mode(
    surface_support: &SurfaceSupport,
    desired_present_mode: vk::PresentModeKHR,
) -> vk::PresentModeKHR {
    surface_support
        .present_modes
        .iter()
        .find(|&&present_mode| present_mode == desired_present_mode)
        .copied()
        .unwrap_or(vk::PresentModeKHR::FIFO)
}

fn select_swapchain_extent(surface_support: &SurfaceSupport, resolution: &Resolution) -> vk::Extent2D {
    let vk::SurfaceCapabilitiesKHR { min_image_extent, max_image_extent, .. } = surface_support.capabilities;
    vk::Extent2D::default()
        .width(resolution.width.clamp(min_image_extent.width, max_image_extent.width))
        .height(resolution.height.clamp(min_image_extent.height, max_image_extent.height))
}

fn select_swapchain_min_image_count(surface_support: &SurfaceSupport) -> u32 {
    let vk::SurfaceCapabilitiesKHR { min_image_count, max_image_count, .. } = surface_support.capabilities;
    let upper_bound = if max_image_count > 0 { max_image_count } else { u32::MAX };
    cmp::min(upper_bound, min_image_count + 1)
}

fn get_queue_family_config(device: &Device) -> (vk::SharingMode, Vec<u32>) {
    let Device { queue_families: families, .. } = device;
    match families.graphics_family_index == families.present_family_index {
        true => (vk::SharingMode::EXCLUSIVE, vec![]),
        false => (vk::SharingMode::CONCURRENT, families.get_unique_indices()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn support(formats: Vec<vk::SurfaceFormatKHR>, min_count: u32, max_count: u32) -> SurfaceSupport {
        SurfaceSupport {
            capabilities: vk::SurfaceCapabilitiesKHR::default()
                .min_image_count(min_count)
                .max_image_count(max_count)
                .min_image_extent(vk::Extent2D { width: 1, height: 1 })
                .max_image_extent(vk::Extent2D { width: 4096, height: 4096 }),
            formats,
            present_modes: vec![vk::PresentModeKHR::FIFO],
        }
    }

    #[test]
    fn surface_format_falls_back_to_the_first_available() {
        let formats = vec![vk::SurfaceFormatKHR {
            format: vk::Format::R8G8B8A8_SRGB,
            color_space: vk::ColorSpaceKHR::SRGB_NONLINEAR,
        }];
        let selected = select_surface_format(
            &support(formats, 2, 0),
            vk::Format::B8G8R8A8_UNORM,
            vk::ColorSpaceKHR::SRGB_NONLINEAR,
        );
        assert_eq!(selected.format, vk::Format::R8G8B8A8_SRGB);
    }

    #[test]
    fn image_count_respects_the_capability_bounds() {
        // one above the minimum when unbounded
        assert_eq!(select_swapchain_min_image_count(&support(vec![], 2, 0)), 3);
        // capped by the maximum
        assert_eq!(select_swapchain_min_image_count(&support(vec![], 2, 2)), 2);
    }

    #[test]
    fn extent_clamps_the_requested_resolution() {
        let resolution = Resolution::new(8192, 16);
        let extent = select_swapchain_extent(&support(vec![], 2, 0), &resolution);
        assert_eq!(extent.width, 4096);
        assert_eq!(extent.height, 16);
    }
}
