//! Vulkan bring-up for Novella.
//!
//! This crate provides:
//! - Required-extension query and instance creation
//! - Physical device enumeration
//! - Presentable device and queue family selection
//! - Window surface and logical device ownership

pub mod capabilities;
pub mod context;
pub mod device;
pub mod error;
pub mod instance;
pub mod selection;
pub mod surface;

pub use capabilities::GpuVendor;
pub use context::{GpuContext, GpuContextBuilder, LogicalDevice};
pub use device::{DeviceCategory, DeviceDescriptor, QueueFamilyDescriptor};
pub use error::{GpuError, Result};
pub use instance::Instance;
pub use selection::{
    select_device_and_queue_family, PresentationSupport, Selection, SelectionPolicy,
};
pub use surface::{Surface, SurfaceCapabilities};
