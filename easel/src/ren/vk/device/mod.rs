pub mod config;

use super::surface::Surface;
use crate::traits;
use config::{PhysicalDeviceProperties, PhysicalDeviceQueueFamilies, QueueFamilyType};

use ash::{Device as DeviceHandle, Instance, vk};

pub struct Device {
    pub physical_device: vk::PhysicalDevice,
    pub physical_device_properties: PhysicalDeviceProperties,
    pub queue_families: PhysicalDeviceQueueFamilies,
    pub handle: DeviceHandle,
}

impl Device {
    pub fn new(instance: &Instance, surface: &Surface) -> Self {
        let physical_devices = unsafe {
            instance
                .enumerate_physical_devices()
                .expect("easel::ren::vk::Device - failed to enumerate physical devices")
        };

        let mut suitable_physical_devices: Vec<_> = physical_devices
            .iter()
            .filter_map(|&physical_device| {
                config::validate_physical_device(instance, physical_device, surface).ok()
            })
            .collect();

        suitable_physical_devices.sort();

        let selected = suitable_physical_devices
            .first()
            .expect("easel::ren::vk::Device - failed to find a suitable physical device");

        let mut device_config = config::DeviceConfig::new(instance, selected)
            .expect("easel::ren::vk::Device - failed to create device config");
        let extensions = device_config.get_extensions();

        let create_info = vk::DeviceCreateInfo::default()
            .queue_create_infos(&device_config.queue_create_infos)
            .enabled_extension_names(&extensions)
            .push_next(&mut device_config.vk_13_features);

        let device = unsafe {
            instance
                .create_device(selected.handle, &create_info, None)
                .expect("easel::ren::vk::Device - failed to create device")
        };

        Self {
            physical_device: selected.handle,
            physical_device_properties: selected.properties.clone(),
            queue_families: selected.queue_families.clone(),
            handle: device,
        }
    }

    pub fn get_queue(&self, queue_family_type: QueueFamilyType) -> vk::Queue {
        let queue_family_index = self.queue_families.get_family_index(queue_family_type);
        unsafe { self.handle.get_device_queue(queue_family_index, 0) }
    }

    pub fn wait_idle(&self) {
        unsafe {
            self.handle
                .device_wait_idle()
                .expect("easel::ren::vk::Device - failed to wait for device idle")
        };
    }
}

impl traits::Drop for Device {
    fn drop(&mut self) {
        unsafe { self.handle.destroy_device(None) };
    }
}
