//! Window surface management.
//!
//! Wraps surface creation through ash-window so the rest of the crate never
//! touches raw window handles.

use crate::device::DeviceDescriptor;
use crate::error::{GpuError, Result};
use crate::instance::Instance;
use crate::selection::PresentationSupport;
use ash::vk;
use raw_window_handle::{HasDisplayHandle, HasWindowHandle};

/// Presentable surface bound to a window.
///
/// Destroyed on drop.
pub struct Surface {
    raw: vk::SurfaceKHR,
    loader: ash::khr::surface::Instance,
}

impl Surface {
    /// Create a surface for a window.
    ///
    /// # Safety
    /// The window must outlive the surface, and the surface must be dropped
    /// before `instance`.
    pub unsafe fn new<W>(instance: &Instance, window: &W) -> Result<Self>
    where
        W: HasDisplayHandle + HasWindowHandle,
    {
        let display = window
            .display_handle()
            .map_err(|e| GpuError::SurfaceCreation(format!("Failed to get display handle: {e}")))?;
        let window_handle = window
            .window_handle()
            .map_err(|e| GpuError::SurfaceCreation(format!("Failed to get window handle: {e}")))?;

        let raw = unsafe {
            ash_window::create_surface(
                instance.entry(),
                instance.raw(),
                display.as_raw(),
                window_handle.as_raw(),
                None,
            )
        }
        .map_err(|e| GpuError::SurfaceCreation(e.to_string()))?;

        let loader = ash::khr::surface::Instance::new(instance.entry(), instance.raw());

        Ok(Self { raw, loader })
    }

    /// Get the raw surface handle.
    pub fn raw(&self) -> vk::SurfaceKHR {
        self.raw
    }

    /// Query what a physical device supports on this surface.
    pub fn capabilities(&self, physical_device: vk::PhysicalDevice) -> Result<SurfaceCapabilities> {
        unsafe {
            let capabilities = self
                .loader
                .get_physical_device_surface_capabilities(physical_device, self.raw)?;

            let formats = self
                .loader
                .get_physical_device_surface_formats(physical_device, self.raw)?;

            let present_modes = self
                .loader
                .get_physical_device_surface_present_modes(physical_device, self.raw)?;

            Ok(SurfaceCapabilities {
                capabilities,
                formats,
                present_modes,
            })
        }
    }
}

impl PresentationSupport for Surface {
    fn supports_presentation(
        &self,
        device: &DeviceDescriptor,
        queue_family_index: u32,
    ) -> Result<bool> {
        let supported = unsafe {
            self.loader.get_physical_device_surface_support(
                device.handle,
                queue_family_index,
                self.raw,
            )?
        };
        Ok(supported)
    }
}

impl Drop for Surface {
    fn drop(&mut self) {
        unsafe { self.loader.destroy_surface(self.raw, None) };
        tracing::trace!("SurfaceKHR destroyed");
    }
}

/// Surface capabilities query result.
pub struct SurfaceCapabilities {
    /// Raw surface capabilities.
    pub capabilities: vk::SurfaceCapabilitiesKHR,
    /// Supported surface formats.
    pub formats: Vec<vk::SurfaceFormatKHR>,
    /// Supported present modes.
    pub present_modes: Vec<vk::PresentModeKHR>,
}
