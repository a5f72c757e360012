//! GPU error types.

use ash::vk;
use thiserror::Error;

/// GPU-related errors.
#[derive(Error, Debug)]
pub enum GpuError {
    /// Vulkan error.
    #[error("Vulkan error: {0}")]
    Vulkan(#[from] vk::Result),

    /// The Vulkan loader could not be found or loaded.
    #[error("Failed to load Vulkan: {0}")]
    Loading(String),

    /// The windowing layer could not report its required extensions.
    #[error("Failed to query required instance extensions: {0}")]
    ExtensionQuery(String),

    /// Instance enumerated zero physical devices.
    #[error("No physical device available for Vulkan")]
    NoPhysicalDevice,

    /// No queue family on any device can present to the surface.
    #[error("No device supports image presentation to window surface")]
    NoPresentableQueueFamily,

    /// Surface creation failed.
    #[error("Failed to create window surface: {0}")]
    SurfaceCreation(String),

    /// A name passed to Vulkan contained an interior NUL byte.
    #[error("Invalid name: {0}")]
    InvalidName(#[from] std::ffi::NulError),
}

/// Result type alias.
pub type Result<T> = std::result::Result<T, GpuError>;
