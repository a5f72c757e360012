//! Application context.

use std::sync::Arc;

use novella_gpu::{GpuContext, GpuContextBuilder};
use winit::window::Window;

use crate::runner::AppConfig;

/// Window and the Vulkan objects bound to it.
///
/// The GPU context is declared first so it drops before the window.
pub struct AppContext {
    gpu: GpuContext,
    window: Arc<Window>,
}

impl AppContext {
    /// Bring up Vulkan for `window`.
    pub(crate) fn new(window: Arc<Window>, config: &AppConfig) -> anyhow::Result<Self> {
        let gpu = GpuContextBuilder::new()
            .app_name(&config.app_name)
            .validation(config.validation)
            .policy(config.policy)
            .build(window.as_ref())?;

        Ok(Self { gpu, window })
    }

    /// Get the GPU context.
    pub fn gpu(&self) -> &GpuContext {
        &self.gpu
    }

    /// Get the window.
    pub fn window(&self) -> &Window {
        &self.window
    }
}
