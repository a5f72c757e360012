//! Physical device enumeration.
//!
//! Devices are snapshotted into plain descriptors so selection can run
//! without touching the driver again (apart from presentation queries).

use crate::capabilities::GpuVendor;
use crate::error::{GpuError, Result};
use crate::instance::Instance;
use ash::vk;
use std::ffi::CStr;
use std::fmt;

/// Physical device category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceCategory {
    Integrated,
    Discrete,
    Virtual,
    Software,
    Other,
}

impl DeviceCategory {
    /// Map a Vulkan device type onto a category.
    pub const fn from_vk(device_type: vk::PhysicalDeviceType) -> Self {
        match device_type {
            vk::PhysicalDeviceType::INTEGRATED_GPU => Self::Integrated,
            vk::PhysicalDeviceType::DISCRETE_GPU => Self::Discrete,
            vk::PhysicalDeviceType::VIRTUAL_GPU => Self::Virtual,
            vk::PhysicalDeviceType::CPU => Self::Software,
            _ => Self::Other,
        }
    }

    /// Human-readable label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Integrated => "Integrated GPU",
            Self::Discrete => "Discrete GPU",
            Self::Virtual => "Virtual GPU",
            Self::Software => "CPU",
            Self::Other => "Other GPU",
        }
    }

    /// Rank used when discrete devices are preferred (lower is better).
    pub(crate) const fn preference_rank(self) -> u8 {
        match self {
            Self::Discrete => 0,
            Self::Integrated => 1,
            Self::Virtual => 2,
            Self::Software => 3,
            Self::Other => 4,
        }
    }
}

impl fmt::Display for DeviceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One queue family of a physical device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueFamilyDescriptor {
    /// Index within the owning device.
    pub index: u32,
    /// Capability bits.
    pub flags: vk::QueueFlags,
    /// Number of queues in the family.
    pub queue_count: u32,
}

impl QueueFamilyDescriptor {
    /// Whether the family advertises any capability at all.
    pub fn has_capabilities(&self) -> bool {
        !self.flags.is_empty()
    }

    /// Whether the family can run graphics work.
    pub fn supports_graphics(&self) -> bool {
        self.flags.contains(vk::QueueFlags::GRAPHICS)
    }
}

/// Snapshot of a physical device taken at enumeration time.
#[derive(Debug, Clone)]
pub struct DeviceDescriptor {
    /// Driver handle, valid while the instance lives.
    pub handle: vk::PhysicalDevice,
    /// PCI device ID.
    pub id: u32,
    pub vendor: GpuVendor,
    pub name: String,
    pub category: DeviceCategory,
    pub api_version: u32,
    /// Queue families in index order.
    pub queue_families: Vec<QueueFamilyDescriptor>,
}

impl DeviceDescriptor {
    /// Query the descriptor for a physical device.
    ///
    /// # Safety
    /// The physical device must have been enumerated from `instance`.
    pub unsafe fn query(instance: &Instance, handle: vk::PhysicalDevice) -> Self {
        let raw = instance.raw();
        let properties = unsafe { raw.get_physical_device_properties(handle) };
        let families = unsafe { raw.get_physical_device_queue_family_properties(handle) };

        let name = unsafe { CStr::from_ptr(properties.device_name.as_ptr()) }
            .to_string_lossy()
            .into_owned();

        let queue_families = families
            .iter()
            .zip(0u32..)
            .map(|(family, index)| QueueFamilyDescriptor {
                index,
                flags: family.queue_flags,
                queue_count: family.queue_count,
            })
            .collect();

        Self {
            handle,
            id: properties.device_id,
            vendor: GpuVendor::from_vendor_id(properties.vendor_id),
            name,
            category: DeviceCategory::from_vk(properties.device_type),
            api_version: properties.api_version,
            queue_families,
        }
    }

    /// Get a human-readable summary.
    pub fn summary(&self) -> String {
        format!(
            "{} ({}, {:?}) - Vulkan {}.{}.{}",
            self.name,
            self.category,
            self.vendor,
            vk::api_version_major(self.api_version),
            vk::api_version_minor(self.api_version),
            vk::api_version_patch(self.api_version),
        )
    }
}

/// Enumerate all physical devices in driver order.
///
/// Fails with [`GpuError::NoPhysicalDevice`] when the driver reports none.
pub fn enumerate_devices(instance: &Instance) -> Result<Vec<DeviceDescriptor>> {
    let handles = unsafe { instance.raw().enumerate_physical_devices()? };

    if handles.is_empty() {
        return Err(GpuError::NoPhysicalDevice);
    }

    Ok(handles
        .into_iter()
        .map(|handle| unsafe { DeviceDescriptor::query(instance, handle) })
        .collect())
}

/// Log every device and its queue families.
pub fn log_devices(devices: &[DeviceDescriptor]) {
    tracing::info!("Physical devices ({}):", devices.len());
    for device in devices {
        tracing::info!("  {} ({})", device.name, device.category);
        tracing::debug!("    Queue families ({}):", device.queue_families.len());
        for family in &device.queue_families {
            if family.supports_graphics() {
                tracing::debug!(
                    "      #{} queue count: {} <- for graphics",
                    family.index,
                    family.queue_count
                );
            } else {
                tracing::debug!("      #{} queue count: {}", family.index, family.queue_count);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_labels() {
        assert_eq!(
            DeviceCategory::from_vk(vk::PhysicalDeviceType::DISCRETE_GPU).label(),
            "Discrete GPU"
        );
        assert_eq!(
            DeviceCategory::from_vk(vk::PhysicalDeviceType::CPU).to_string(),
            "CPU"
        );
        assert_eq!(
            DeviceCategory::from_vk(vk::PhysicalDeviceType::OTHER),
            DeviceCategory::Other
        );
    }

    #[test]
    fn queue_family_capabilities() {
        let empty = QueueFamilyDescriptor {
            index: 0,
            flags: vk::QueueFlags::empty(),
            queue_count: 1,
        };
        let transfer = QueueFamilyDescriptor {
            index: 1,
            flags: vk::QueueFlags::TRANSFER,
            queue_count: 2,
        };
        let graphics = QueueFamilyDescriptor {
            index: 2,
            flags: vk::QueueFlags::GRAPHICS | vk::QueueFlags::COMPUTE,
            queue_count: 16,
        };

        assert!(!empty.has_capabilities());
        assert!(transfer.has_capabilities());
        assert!(!transfer.supports_graphics());
        assert!(graphics.supports_graphics());
    }

    #[test]
    fn discrete_ranks_first() {
        assert!(
            DeviceCategory::Discrete.preference_rank()
                < DeviceCategory::Integrated.preference_rank()
        );
        assert!(
            DeviceCategory::Virtual.preference_rank() < DeviceCategory::Software.preference_rank()
        );
    }
}
