use std::collections::HashSet;
use std::ffi::{CStr, c_char};

use ash::{Instance, khr, vk};

use crate::ren::vk::surface::Surface;

pub struct DeviceConfig<'a> {
    pub extensions: Vec<&'a CStr>,
    pub vk_13_features: vk::PhysicalDeviceVulkan13Features<'a>,
    pub queue_create_infos: Vec<vk::DeviceQueueCreateInfo<'a>>,
}

#[derive(Debug)]
#[allow(dead_code)]
pub enum DeviceConfigError<'a> {
    FeatureNotSupported(&'a CStr),
    ExtensionNotSupported(&'a CStr),
    QueueFamilyNotSupported(&'a CStr),
}

#[derive(Clone, PartialEq, Eq)]
pub struct PhysicalDeviceProperties {
    pub type_rank: u32,
    pub max_image_dimension_2d: u32,
}

impl Ord for PhysicalDeviceProperties {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // lower rank first; larger image capability breaks ties
        self.type_rank
            .cmp(&other.type_rank)
            .then(other.max_image_dimension_2d.cmp(&self.max_image_dimension_2d))
    }
}

impl PartialOrd for PhysicalDeviceProperties {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl PhysicalDeviceProperties {
    pub fn new(properties: &vk::PhysicalDeviceProperties) -> Self {
        let type_rank = match properties.device_type {
            vk::PhysicalDeviceType::DISCRETE_GPU => 0,
            vk::PhysicalDeviceType::INTEGRATED_GPU => 1,
            vk::PhysicalDeviceType::VIRTUAL_GPU => 2,
            _ => 3,
        };
        Self { type_rank, max_image_dimension_2d: properties.limits.max_image_dimension2_d }
    }
}

pub enum QueueFamilyType {
    Graphics,
    Present,
}

// only one queue is taken from each family
const QUEUE_PRIORITIES: [f32; 1] = [1.0];

#[derive(Clone, PartialEq, Eq)]
pub struct PhysicalDeviceQueueFamilies {
    pub graphics_family_index: Option<u32>,
    pub present_family_index: Option<u32>,
}

impl PhysicalDeviceQueueFamilies {
    pub fn new() -> Self {
        Self { graphics_family_index: None, present_family_index: None }
    }

    pub fn get_family_index(&self, family_type: QueueFamilyType) -> u32 {
        match family_type {
            QueueFamilyType::Graphics => self.graphics_family_index.unwrap_or(u32::MAX),
            QueueFamilyType::Present => self.present_family_index.unwrap_or(u32::MAX),
        }
    }

    pub fn get_unique_indices(&self) -> Vec<u32> {
        let mut unique_indices = HashSet::new();
        if let Some(index) = self.graphics_family_index {
            unique_indices.insert(index);
        }
        if let Some(index) = self.present_family_index {
            unique_indices.insert(index);
        }
        unique_indices.into_iter().collect()
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct ValidPhysicalDevice {
    pub handle: vk::PhysicalDevice,
    pub properties: PhysicalDeviceProperties,
    pub queue_families: PhysicalDeviceQueueFamilies,
}

impl Ord for ValidPhysicalDevice {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.properties.cmp(&other.properties)
    }
}

impl PartialOrd for ValidPhysicalDevice {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl DeviceConfig<'_> {
    pub fn new<'a>(instance: &Instance, valid_physical_device: &ValidPhysicalDevice) -> Result<Self, DeviceConfigError<'a>> {
        let extensions = vec![
            khr::swapchain::NAME,
            khr::dynamic_rendering::NAME,
        ];

        validate_extensions(instance, valid_physical_device.handle, &extensions)?;

        let mut vk_13_features: vk::PhysicalDeviceVulkan13Features = Default::default();
        vk_13_features.dynamic_rendering = vk::TRUE;
        vk_13_features.synchronization2 = vk::TRUE;

        let queue_create_infos = valid_physical_device
            .queue_families
            .get_unique_indices()
            .into_iter()
            .map(|index| {
                vk::DeviceQueueCreateInfo::default()
                    .queue_family_index(index)
                    .queue_priorities(&QUEUE_PRIORITIES)
            })
            .collect();

        Ok(Self { extensions, vk_13_features, queue_create_infos })
    }

    pub fn get_extensions(&self) -> Vec<*const c_char> {
        self.extensions.iter().map(|extension| extension.as_ptr()).collect()
    }
}

pub fn validate_physical_device<'a>(
    instance: &'a Instance,
    physical_device: vk::PhysicalDevice,
    surface: &Surface,
) -> Result<ValidPhysicalDevice, DeviceConfigError<'a>> {
    let properties = unsafe { instance.get_physical_device_properties(physical_device) };

    validate_feature_requirements(instance, physical_device)?;
    let queue_families = validate_queue_families(instance, physical_device, surface)?;

    Ok(ValidPhysicalDevice {
        handle: physical_device,
        properties: PhysicalDeviceProperties::new(&properties),
        queue_families,
    })
}

fn validate_extensions<'a>(
    instance: &Instance,
    physical_device: vk::PhysicalDevice,
    extensions: &[&'a CStr],
) -> Result<(), DeviceConfigError<'a>> {
    let available = unsafe {
        instance
            .enumerate_device_extension_properties(physical_device)
            .expect("easel::ren::vk::device::Config - failed to enumerate device extension properties")
    };

    for &extension in extensions {
        let supported = available
            .iter()
            .any(|property| property.extension_name_as_c_str().is_ok_and(|name| name == extension));
        if !supported {
            return Err(DeviceConfigError::ExtensionNotSupported(extension));
        }
    }
    Ok(())
}

fn validate_feature_requirements(instance: &Instance, physical_device: vk::PhysicalDevice) -> Result<(), DeviceConfigError<'_>> {
    let mut vk_13_features: vk::PhysicalDeviceVulkan13Features = Default::default();
    let mut features_2: vk::PhysicalDeviceFeatures2 = Default::default();
    features_2 = features_2.push_next(&mut vk_13_features);

    unsafe { instance.get_physical_device_features2(physical_device, &mut features_2) };

    if vk_13_features.dynamic_rendering == vk::FALSE {
        return Err(DeviceConfigError::FeatureNotSupported(c"vk_13_dynamic_rendering"));
    }
    if vk_13_features.synchronization2 == vk::FALSE {
        return Err(DeviceConfigError::FeatureNotSupported(c"vk_13_synchronization2"));
    }
    Ok(())
}

fn validate_queue_families<'a>(
    instance: &Instance,
    physical_device: vk::PhysicalDevice,
    surface: &Surface,
) -> Result<PhysicalDeviceQueueFamilies, DeviceConfigError<'a>> {
    let queue_family_properties = unsafe { instance.get_physical_device_queue_family_properties(physical_device) };

    let mut queue_families = PhysicalDeviceQueueFamilies::new();
    for (queue_family_index, family) in queue_family_properties.iter().enumerate() {
        let index = queue_family_index as u32;
        if family.queue_flags.contains(vk::QueueFlags::GRAPHICS) && queue_families.graphics_family_index.is_none() {
            queue_families.graphics_family_index = Some(index);
        }
        if queue_families.present_family_index.is_none() {
            let present_support = unsafe {
                surface
                    .instance
                    .get_physical_device_surface_support(physical_device, index, surface.khr)
                    .expect("easel::ren::vk::device::Config - failed to query surface support")
            };
            if present_support {
                queue_families.present_family_index = Some(index);
            }
        }
    }

    if queue_families.graphics_family_index.is_none() {
        return Err(DeviceConfigError::QueueFamilyNotSupported(c"graphics"));
    }
    if queue_families.present_family_index.is_none() {
        return Err(DeviceConfigError::QueueFamilyNotSupported(c"present"));
    }

    Ok(queue_families)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discrete_devices_sort_before_integrated() {
        let discrete = PhysicalDeviceProperties { type_rank: 0, max_image_dimension_2d: 4096 };
        let integrated = PhysicalDeviceProperties { type_rank: 1, max_image_dimension_2d: 16384 };
        assert!(discrete < integrated);
    }

    #[test]
    fn larger_images_break_type_ties() {
        let small = PhysicalDeviceProperties { type_rank: 0, max_image_dimension_2d: 4096 };
        let large = PhysicalDeviceProperties { type_rank: 0, max_image_dimension_2d: 16384 };
        assert!(large < small);
    }

    #[test]
    fn unique_indices_collapse_shared_families() {
        let shared = PhysicalDeviceQueueFamilies {
            graphics_family_index: Some(0),
            present_family_index: Some(0),
        };
        assert_eq!(shared.get_unique_indices(), vec![0]);

        let split = PhysicalDeviceQueueFamilies {
            graphics_family_index: Some(0),
            present_family_index: Some(2),
        };
        let mut indices = split.get_unique_indices();
        indices.sort();
        assert_eq!(indices, vec![0, 2]);
    }
}
