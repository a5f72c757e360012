//! Application runner for Novella.
//!
//! Opens a window, brings up Vulkan against it (instance, surface,
//! presentable device and queue family, logical device) and keeps polling
//! events until the window is closed.
//!
//! # Example
//!
//! ```no_run
//! use novella_app::{init_logging, run_app, AppConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     init_logging();
//!     run_app(AppConfig::new("Application").with_size(600, 500))
//! }
//! ```

mod context;
mod runner;

pub use context::AppContext;
pub use runner::{init_logging, run_app, AppConfig};

// Re-export commonly used types for convenience
pub use novella_gpu::{GpuContext, GpuContextBuilder, SelectionPolicy};
