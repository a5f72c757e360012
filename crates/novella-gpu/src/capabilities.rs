//! Vendor identification and device extension queries.

use crate::error::Result;
use crate::instance::Instance;
use ash::vk;
use std::ffi::CStr;

/// GPU vendor identification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GpuVendor {
    Nvidia,
    Amd,
    Intel,
    Apple,
    Other(u32),
}

impl GpuVendor {
    /// Identify vendor from PCI vendor ID.
    pub const fn from_vendor_id(id: u32) -> Self {
        match id {
            0x10DE => Self::Nvidia,
            0x1002 => Self::Amd,
            0x8086 => Self::Intel,
            0x106B => Self::Apple,
            other => Self::Other(other),
        }
    }
}

/// List the device extensions a physical device provides.
pub fn device_extensions(
    instance: &Instance,
    physical_device: vk::PhysicalDevice,
) -> Result<Vec<String>> {
    let properties = unsafe {
        instance
            .raw()
            .enumerate_device_extension_properties(physical_device)?
    };

    let names = properties
        .iter()
        .map(|ext| {
            // SAFETY: extension_name is a NUL-terminated array filled by the driver.
            unsafe { CStr::from_ptr(ext.extension_name.as_ptr()) }
                .to_string_lossy()
                .into_owned()
        })
        .collect();

    Ok(names)
}

/// Log the provided device extensions at debug level.
pub fn log_device_extensions(extensions: &[String]) {
    tracing::debug!("Provided device extensions ({}):", extensions.len());
    for ext in extensions {
        tracing::debug!("  {ext}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vendor_identification() {
        assert_eq!(GpuVendor::from_vendor_id(0x10DE), GpuVendor::Nvidia);
        assert_eq!(GpuVendor::from_vendor_id(0x1002), GpuVendor::Amd);
        assert_eq!(GpuVendor::from_vendor_id(0x106B), GpuVendor::Apple);
        assert_eq!(GpuVendor::from_vendor_id(0x1AE0), GpuVendor::Other(0x1AE0));
    }
}
