//! Presentable device and queue family selection.
//!
//! The scan is a plain double loop: devices in order, then queue families
//! in index order. The first family that advertises any capability and can
//! present to the surface wins.

use crate::device::DeviceDescriptor;
use crate::error::{GpuError, Result};

/// Answers whether a queue family can present to a particular surface.
pub trait PresentationSupport {
    /// Query presentation support for `queue_family_index` of `device`.
    fn supports_presentation(
        &self,
        device: &DeviceDescriptor,
        queue_family_index: u32,
    ) -> Result<bool>;
}

/// Order in which devices are scanned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SelectionPolicy {
    /// Driver enumeration order. Not guaranteed stable across runs.
    #[default]
    FirstMatch,
    /// Discrete, integrated, virtual, software, other; ties keep
    /// enumeration order.
    PreferDiscrete,
}

/// Chosen device and queue family.
#[derive(Debug, Clone)]
pub struct Selection {
    pub device: DeviceDescriptor,
    pub queue_family_index: u32,
    /// Number of queues to request from the family.
    pub queue_count: u32,
}

/// Pick the first device and queue family able to present.
///
/// Returns [`GpuError::NoPresentableQueueFamily`] when no pair qualifies.
/// Errors from the presentation query are propagated as-is.
pub fn select_device_and_queue_family<P>(
    devices: &[DeviceDescriptor],
    presentation: &P,
    policy: SelectionPolicy,
) -> Result<Selection>
where
    P: PresentationSupport + ?Sized,
{
    let mut candidates: Vec<&DeviceDescriptor> = devices.iter().collect();
    if policy == SelectionPolicy::PreferDiscrete {
        candidates.sort_by_key(|device| device.category.preference_rank());
    }

    for device in candidates {
        for family in &device.queue_families {
            if family.has_capabilities()
                && presentation.supports_presentation(device, family.index)?
            {
                return Ok(Selection {
                    device: device.clone(),
                    queue_family_index: family.index,
                    queue_count: family.queue_count,
                });
            }
        }
    }

    Err(GpuError::NoPresentableQueueFamily)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capabilities::GpuVendor;
    use crate::device::{DeviceCategory, QueueFamilyDescriptor};
    use ash::vk::{self, Handle};
    use std::cell::RefCell;
    use std::collections::HashSet;

    /// Surface stand-in that presents from a fixed set of (device id, family) pairs.
    #[derive(Default)]
    struct FakeSurface {
        presentable: HashSet<(u32, u32)>,
        failing: Option<(u32, u32)>,
        queries: RefCell<Vec<(u32, u32)>>,
    }

    impl FakeSurface {
        fn presenting(pairs: &[(u32, u32)]) -> Self {
            Self {
                presentable: pairs.iter().copied().collect(),
                ..Self::default()
            }
        }
    }

    impl PresentationSupport for FakeSurface {
        fn supports_presentation(&self, device: &DeviceDescriptor, index: u32) -> Result<bool> {
            self.queries.borrow_mut().push((device.id, index));
            if self.failing == Some((device.id, index)) {
                return Err(GpuError::Vulkan(vk::Result::ERROR_SURFACE_LOST_KHR));
            }
            Ok(self.presentable.contains(&(device.id, index)))
        }
    }

    fn family(index: u32, flags: vk::QueueFlags, queue_count: u32) -> QueueFamilyDescriptor {
        QueueFamilyDescriptor {
            index,
            flags,
            queue_count,
        }
    }

    fn device(id: u32, category: DeviceCategory, families: Vec<QueueFamilyDescriptor>) -> DeviceDescriptor {
        DeviceDescriptor {
            handle: vk::PhysicalDevice::from_raw(u64::from(id)),
            id,
            vendor: GpuVendor::Other(0),
            name: format!("Device {id}"),
            category,
            api_version: vk::API_VERSION_1_0,
            queue_families: families,
        }
    }

    fn graphics(index: u32, queue_count: u32) -> QueueFamilyDescriptor {
        family(index, vk::QueueFlags::GRAPHICS | vk::QueueFlags::COMPUTE, queue_count)
    }

    #[test]
    fn picks_first_presentable_family_in_enumeration_order() {
        let devices = vec![
            device(1, DeviceCategory::Integrated, vec![graphics(0, 1), graphics(1, 2)]),
            device(2, DeviceCategory::Discrete, vec![graphics(0, 16)]),
        ];
        let surface = FakeSurface::presenting(&[(1, 1), (2, 0)]);

        let selection =
            select_device_and_queue_family(&devices, &surface, SelectionPolicy::FirstMatch)
                .unwrap();

        assert_eq!(selection.device.id, 1);
        assert_eq!(selection.queue_family_index, 1);
        assert_eq!(selection.queue_count, 2);
        // Scan stops at the first match.
        assert_eq!(*surface.queries.borrow(), vec![(1, 0), (1, 1)]);
    }

    #[test]
    fn capable_but_not_presentable_keeps_scanning() {
        let devices = vec![
            device(1, DeviceCategory::Discrete, vec![graphics(0, 4)]),
            device(2, DeviceCategory::Integrated, vec![family(0, vk::QueueFlags::TRANSFER, 1), graphics(1, 1)]),
        ];
        let surface = FakeSurface::presenting(&[(2, 0)]);

        let selection =
            select_device_and_queue_family(&devices, &surface, SelectionPolicy::FirstMatch)
                .unwrap();

        assert_eq!(selection.device.id, 2);
        assert_eq!(selection.queue_family_index, 0);
        assert_eq!(selection.queue_count, 1);
    }

    #[test]
    fn families_without_capabilities_are_never_queried() {
        let devices = vec![device(
            7,
            DeviceCategory::Other,
            vec![family(0, vk::QueueFlags::empty(), 1), graphics(1, 1)],
        )];
        let surface = FakeSurface::presenting(&[(7, 0), (7, 1)]);

        let selection =
            select_device_and_queue_family(&devices, &surface, SelectionPolicy::FirstMatch)
                .unwrap();

        assert_eq!(selection.queue_family_index, 1);
        assert_eq!(*surface.queries.borrow(), vec![(7, 1)]);
    }

    #[test]
    fn no_presentable_family_is_an_error() {
        let devices = vec![
            device(1, DeviceCategory::Discrete, vec![graphics(0, 1), graphics(1, 1)]),
            device(2, DeviceCategory::Integrated, vec![graphics(0, 1)]),
        ];
        let surface = FakeSurface::default();

        let err = select_device_and_queue_family(&devices, &surface, SelectionPolicy::FirstMatch)
            .unwrap_err();

        assert!(matches!(err, GpuError::NoPresentableQueueFamily));
        assert_eq!(surface.queries.borrow().len(), 3);
    }

    #[test]
    fn empty_device_list_is_an_error() {
        let surface = FakeSurface::default();
        let err = select_device_and_queue_family(&[], &surface, SelectionPolicy::FirstMatch)
            .unwrap_err();
        assert!(matches!(err, GpuError::NoPresentableQueueFamily));
    }

    #[test]
    fn presentation_query_errors_propagate() {
        let devices = vec![device(1, DeviceCategory::Discrete, vec![graphics(0, 1), graphics(1, 1)])];
        let surface = FakeSurface {
            presentable: [(1, 1)].into_iter().collect(),
            failing: Some((1, 0)),
            ..FakeSurface::default()
        };

        let err = select_device_and_queue_family(&devices, &surface, SelectionPolicy::FirstMatch)
            .unwrap_err();

        assert!(matches!(
            err,
            GpuError::Vulkan(vk::Result::ERROR_SURFACE_LOST_KHR)
        ));
    }

    #[test]
    fn prefer_discrete_reorders_by_category() {
        let devices = vec![
            device(1, DeviceCategory::Software, vec![graphics(0, 1)]),
            device(2, DeviceCategory::Integrated, vec![graphics(0, 1)]),
            device(3, DeviceCategory::Discrete, vec![graphics(0, 1)]),
            device(4, DeviceCategory::Discrete, vec![graphics(0, 1)]),
        ];
        let surface = FakeSurface::presenting(&[(1, 0), (2, 0), (3, 0), (4, 0)]);

        let first = select_device_and_queue_family(&devices, &surface, SelectionPolicy::FirstMatch)
            .unwrap();
        let preferred =
            select_device_and_queue_family(&devices, &surface, SelectionPolicy::PreferDiscrete)
                .unwrap();

        assert_eq!(first.device.id, 1);
        // Ties between the two discrete devices keep enumeration order.
        assert_eq!(preferred.device.id, 3);
    }

    #[test]
    fn prefer_discrete_falls_back_when_discrete_cannot_present() {
        let devices = vec![
            device(1, DeviceCategory::Integrated, vec![graphics(0, 1)]),
            device(2, DeviceCategory::Discrete, vec![graphics(0, 1)]),
        ];
        let surface = FakeSurface::presenting(&[(1, 0)]);

        let selection =
            select_device_and_queue_family(&devices, &surface, SelectionPolicy::PreferDiscrete)
                .unwrap();

        assert_eq!(selection.device.id, 1);
        assert_eq!(*surface.queries.borrow(), vec![(2, 0), (1, 0)]);
    }
}
