//! Vulkan instance creation.

use crate::error::{GpuError, Result};
use ash::vk;
use raw_window_handle::RawDisplayHandle;
use std::ffi::{c_char, CStr, CString};

/// Ask the windowing layer which instance extensions it needs to present
/// to `display`.
pub fn required_instance_extensions(display: RawDisplayHandle) -> Result<Vec<&'static CStr>> {
    let names = ash_window::enumerate_required_extensions(display)
        .map_err(|e| GpuError::ExtensionQuery(e.to_string()))?;

    // SAFETY: ash-window returns pointers to static NUL-terminated names.
    #[allow(unused_mut)]
    let mut extensions: Vec<&'static CStr> = names
        .iter()
        .map(|&name| unsafe { CStr::from_ptr(name) })
        .collect();

    // Required for MoltenVK on macOS
    #[cfg(target_os = "macos")]
    extensions.push(ash::khr::portability_enumeration::NAME);

    tracing::info!("Required extensions ({}):", extensions.len());
    for ext in &extensions {
        tracing::info!("  {}", ext.to_string_lossy());
    }

    Ok(extensions)
}

/// Validation layers to enable in debug builds.
pub fn validation_layers() -> Vec<&'static CStr> {
    vec![c"VK_LAYER_KHRONOS_validation"]
}

/// Filter [`validation_layers`] down to the ones the loader provides.
///
/// Missing layers are skipped with a warning so instance creation does not
/// fail on machines without the SDK.
pub fn available_validation_layers(entry: &ash::Entry) -> Result<Vec<&'static CStr>> {
    let available = unsafe { entry.enumerate_instance_layer_properties()? };

    let layers = validation_layers()
        .into_iter()
        .filter(|layer| {
            let found = available.iter().any(|props| {
                // SAFETY: layer_name is a NUL-terminated array filled by the loader.
                let name = unsafe { CStr::from_ptr(props.layer_name.as_ptr()) };
                name == *layer
            });
            if !found {
                tracing::warn!("Validation layer {} not available", layer.to_string_lossy());
            }
            found
        })
        .collect();

    Ok(layers)
}

/// Owned Vulkan instance.
///
/// Keeps the loader alive and destroys the instance on drop. Everything
/// created from it must be dropped first.
pub struct Instance {
    entry: ash::Entry,
    raw: ash::Instance,
}

impl Instance {
    /// Create an instance with the given extensions and layers enabled.
    pub fn new(
        entry: ash::Entry,
        app_name: &str,
        extensions: &[&CStr],
        layers: &[&CStr],
    ) -> Result<Self> {
        let app_name = CString::new(app_name)?;

        let app_info = vk::ApplicationInfo::default()
            .application_name(&app_name)
            .application_version(vk::make_api_version(0, 0, 1, 0))
            .engine_name(c"Novella")
            .engine_version(vk::make_api_version(0, 0, 1, 0))
            .api_version(vk::API_VERSION_1_0);

        let extension_names: Vec<*const c_char> =
            extensions.iter().map(|ext| ext.as_ptr()).collect();
        let layer_names: Vec<*const c_char> = layers.iter().map(|l| l.as_ptr()).collect();

        #[cfg(target_os = "macos")]
        let create_flags = vk::InstanceCreateFlags::ENUMERATE_PORTABILITY_KHR;
        #[cfg(not(target_os = "macos"))]
        let create_flags = vk::InstanceCreateFlags::empty();

        let create_info = vk::InstanceCreateInfo::default()
            .application_info(&app_info)
            .enabled_extension_names(&extension_names)
            .enabled_layer_names(&layer_names)
            .flags(create_flags);

        let raw = unsafe { entry.create_instance(&create_info, None)? };

        tracing::debug!(
            "Created Vulkan instance ({} extensions, {} layers)",
            extensions.len(),
            layers.len()
        );

        Ok(Self { entry, raw })
    }

    /// Get the loader entry point.
    pub fn entry(&self) -> &ash::Entry {
        &self.entry
    }

    /// Get the raw instance handle.
    pub fn raw(&self) -> &ash::Instance {
        &self.raw
    }
}

impl Drop for Instance {
    fn drop(&mut self) {
        unsafe { self.raw.destroy_instance(None) };
        tracing::trace!("Instance destroyed");
    }
}
