//! GPU context management.

use crate::capabilities::{device_extensions, log_device_extensions};
use crate::device::{enumerate_devices, log_devices};
use crate::error::{GpuError, Result};
use crate::instance::{available_validation_layers, required_instance_extensions, Instance};
use crate::selection::{select_device_and_queue_family, Selection, SelectionPolicy};
use crate::surface::Surface;
use ash::vk;
use raw_window_handle::{HasDisplayHandle, HasWindowHandle};
use std::ffi::c_char;

/// Owned logical device, idled and destroyed on drop.
pub struct LogicalDevice {
    raw: ash::Device,
}

impl LogicalDevice {
    /// Create a device exposing `selection.queue_count` queues of the
    /// selected family, with the swapchain extension enabled.
    ///
    /// # Safety
    /// The selection must come from devices enumerated on `instance`, and
    /// the device must be dropped before `instance`.
    pub unsafe fn new(instance: &Instance, selection: &Selection) -> Result<Self> {
        let priorities = vec![1.0_f32; selection.queue_count.max(1) as usize];
        let queue_create_infos = [vk::DeviceQueueCreateInfo::default()
            .queue_family_index(selection.queue_family_index)
            .queue_priorities(&priorities)];

        let extension_names: [*const c_char; 1] = [ash::khr::swapchain::NAME.as_ptr()];

        let create_info = vk::DeviceCreateInfo::default()
            .queue_create_infos(&queue_create_infos)
            .enabled_extension_names(&extension_names);

        let raw = unsafe {
            instance
                .raw()
                .create_device(selection.device.handle, &create_info, None)?
        };

        Ok(Self { raw })
    }

    /// Get the raw device handle.
    pub fn raw(&self) -> &ash::Device {
        &self.raw
    }
}

impl Drop for LogicalDevice {
    fn drop(&mut self) {
        unsafe {
            let _ = self.raw.device_wait_idle();
            self.raw.destroy_device(None);
        }
        tracing::trace!("Logical device destroyed");
    }
}

/// Vulkan objects for one window.
///
/// Fields drop in declaration order: device, surface, instance.
pub struct GpuContext {
    device: LogicalDevice,
    surface: Surface,
    instance: Instance,
    selection: Selection,
    queue: vk::Queue,
}

impl GpuContext {
    /// Get the logical device.
    pub fn device(&self) -> &ash::Device {
        self.device.raw()
    }

    /// Get the window surface.
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Get the Vulkan instance.
    pub fn instance(&self) -> &Instance {
        &self.instance
    }

    /// Get the selected device and queue family.
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Get queue 0 of the selected family.
    pub fn queue(&self) -> vk::Queue {
        self.queue
    }

    /// Get the selected queue family index.
    pub fn queue_family_index(&self) -> u32 {
        self.selection.queue_family_index
    }
}

/// Builder for creating a GPU context.
pub struct GpuContextBuilder {
    app_name: String,
    enable_validation: bool,
    policy: SelectionPolicy,
}

impl Default for GpuContextBuilder {
    fn default() -> Self {
        Self {
            app_name: "Application".to_string(),
            enable_validation: cfg!(debug_assertions),
            policy: SelectionPolicy::default(),
        }
    }
}

impl GpuContextBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the application name.
    pub fn app_name(mut self, name: impl Into<String>) -> Self {
        self.app_name = name.into();
        self
    }

    /// Enable or disable validation layers.
    pub fn validation(mut self, enable: bool) -> Self {
        self.enable_validation = enable;
        self
    }

    /// Set the device scan order.
    pub fn policy(mut self, policy: SelectionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Build the GPU context for `window`.
    ///
    /// The window must outlive the returned context.
    pub fn build<W>(self, window: &W) -> Result<GpuContext>
    where
        W: HasDisplayHandle + HasWindowHandle,
    {
        let display = window
            .display_handle()
            .map_err(|e| GpuError::SurfaceCreation(format!("Failed to get display handle: {e}")))?;

        let entry =
            unsafe { ash::Entry::load() }.map_err(|e| GpuError::Loading(e.to_string()))?;

        let extensions = required_instance_extensions(display.as_raw())?;
        let layers = if self.enable_validation {
            available_validation_layers(&entry)?
        } else {
            Vec::new()
        };

        let instance = Instance::new(entry, &self.app_name, &extensions, &layers)?;

        // SAFETY: the surface is stored next to the instance in GpuContext,
        // which drops it first; the caller keeps the window alive.
        let surface = unsafe { Surface::new(&instance, window)? };

        let devices = enumerate_devices(&instance)?;
        log_devices(&devices);

        let selection = select_device_and_queue_family(&devices, &surface, self.policy)?;
        tracing::info!("Selected physical device: {}", selection.device.summary());
        tracing::info!(
            "Selected queue family (index): {} ({} queues)",
            selection.queue_family_index,
            selection.queue_count
        );

        match device_extensions(&instance, selection.device.handle) {
            Ok(extensions) => log_device_extensions(&extensions),
            Err(e) => tracing::warn!("Failed to list device extensions: {e}"),
        }

        let surface_caps = surface.capabilities(selection.device.handle)?;
        tracing::debug!(
            "Number of supported surface formats: {}",
            surface_caps.formats.len()
        );

        let device = unsafe { LogicalDevice::new(&instance, &selection)? };
        let queue = unsafe {
            device
                .raw()
                .get_device_queue(selection.queue_family_index, 0)
        };

        Ok(GpuContext {
            device,
            surface,
            instance,
            selection,
            queue,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults() {
        let builder = GpuContextBuilder::new();
        assert_eq!(builder.app_name, "Application");
        assert_eq!(builder.enable_validation, cfg!(debug_assertions));
        assert_eq!(builder.policy, SelectionPolicy::FirstMatch);
    }

    #[test]
    fn builder_overrides() {
        let builder = GpuContextBuilder::new()
            .app_name("Novella")
            .validation(false)
            .policy(SelectionPolicy::PreferDiscrete);
        assert_eq!(builder.app_name, "Novella");
        assert!(!builder.enable_validation);
        assert_eq!(builder.policy, SelectionPolicy::PreferDiscrete);
    }
}
