use ash::Entry;
use ash::khr;
#[cfg(feature = "debug")]
use ash::ext;

use std::ffi::{CStr, c_char};

pub struct InstanceConfig<'a> {
    layers: Vec<&'a CStr>,
    extensions: Vec<&'a CStr>,
}

#[derive(Debug)]
#[allow(dead_code)]
pub enum InstanceConfigError<'a> {
    LayerNotSupported(&'a CStr),
    ExtensionNotSupported(&'a CStr),
}

impl InstanceConfig<'_> {
    pub fn new(entry: &Entry) -> Result<Self, InstanceConfigError> {
        let layers = vec![
            #[cfg(feature = "debug")]
            c"VK_LAYER_KHRONOS_validation",
        ];

        validate_layers(entry, &layers)?;

        let extensions = vec![
            khr::get_physical_device_properties2::NAME,
            khr::surface::NAME,
            #[cfg(target_os = "windows")]
            khr::win32_surface::NAME,
            #[cfg(target_os = "linux")]
            khr::xcb_surface::NAME,
            #[cfg(feature = "debug")]
            ext::debug_utils::NAME,
        ];

        validate_extensions(entry, &extensions)?;

        Ok(Self { layers, extensions })
    }

    pub fn get_layers(&self) -> Vec<*const c_char> {
        self.layers.iter().map(|layer| layer.as_ptr()).collect()
    }

    pub fn get_extensions(&self) -> Vec<*const c_char> {
        self.extensions.iter().map(|extension| extension.as_ptr()).collect()
    }
}

fn validate_layers<'a>(entry: &Entry, layers: &[&'a CStr]) -> Result<(), InstanceConfigError<'a>> {
    let available = unsafe {
        entry
            .enumerate_instance_layer_properties()
            .expect("easel::ren::vk::instance::Config - failed to enumerate instance layer properties")
    };

    for &layer in layers {
        let supported = available
            .iter()
            .any(|property| property.layer_name_as_c_str().is_ok_and(|name| name == layer));
        if !supported {
            return Err(InstanceConfigError::LayerNotSupported(layer));
        }
    }
    Ok(())
}

fn validate_extensions<'a>(entry: &Entry, extensions: &[&'a CStr]) -> Result<(), InstanceConfigError<'a>> {
    let available = unsafe {
        entry
            .enumerate_instance_extension_properties(None)
            .expect("easel::ren::vk::instance::Config - failed to enumerate instance extension properties")
    };

    for &extension in extensions {
        let supported = available
            .iter()
            .any(|property| property.extension_name_as_c_str().is_ok_and(|name| name == extension));
        if !supported {
            return Err(InstanceConfigError::ExtensionNotSupported(extension));
        }
    }
    Ok(())
}
