//! Window-backed wgpu context.
//!
//! One adapter, one device and one presentation surface. Layers only see
//! the device, the queue and the color target format; the viewer drives
//! resize and frame acquisition.

use std::fmt;

/// Failure while bringing up the GPU for a window.
#[derive(Debug)]
pub enum GpuInitError {
    /// The window handle could not back a surface.
    Surface(wgpu::CreateSurfaceError),
    /// No adapter can present to the surface.
    Adapter(wgpu::RequestAdapterError),
    /// The adapter refused the device request.
    Device(wgpu::RequestDeviceError),
    /// The adapter reports no usable configuration for the surface.
    UnsupportedSurface,
}

impl fmt::Display for GpuInitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Surface(e) => write!(f, "cannot create window surface: {e}"),
            Self::Adapter(e) => write!(f, "no adapter for window surface: {e}"),
            Self::Device(e) => write!(f, "device request rejected: {e}"),
            Self::UnsupportedSurface => f.write_str("surface not supported by adapter"),
        }
    }
}

impl std::error::Error for GpuInitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Surface(e) => Some(e),
            Self::Adapter(e) => Some(e),
            Self::Device(e) => Some(e),
            Self::UnsupportedSurface => None,
        }
    }
}

/// Surface extent for a window size; `None` while either side is zero
/// (minimized windows), since a zero-sized surface cannot be configured.
pub fn surface_extent(width: u32, height: u32) -> Option<(u32, u32)> {
    (width > 0 && height > 0).then_some((width, height))
}

/// Device, queue and the window surface they present to.
pub struct RenderContext {
    /// Logical device.
    pub device: wgpu::Device,
    /// Submission queue.
    pub queue: wgpu::Queue,
    surface: wgpu::Surface<'static>,
    config: wgpu::SurfaceConfiguration,
}

impl RenderContext {
    /// Bring up a device that presents to `window`.
    ///
    /// # Errors
    ///
    /// Returns [`GpuInitError`] if any step from surface creation to
    /// surface configuration fails.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        (width, height): (u32, u32),
    ) -> Result<Self, GpuInitError> {
        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(window).map_err(GpuInitError::Surface)?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                compatible_surface: Some(&surface),
                power_preference: wgpu::PowerPreference::HighPerformance,
                ..Default::default()
            })
            .await
            .map_err(GpuInitError::Adapter)?;
        let info = adapter.get_info();
        log::info!("adapter: {} ({:?})", info.name, info.backend);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Geoline Device"),
                ..Default::default()
            })
            .await
            .map_err(GpuInitError::Device)?;

        let config = surface_config(&surface, &adapter, width.max(1), height.max(1))?;
        surface.configure(&device, &config);
        log::debug!("surface {}x{} {:?}", config.width, config.height, config.format);

        Ok(Self {
            device,
            queue,
            surface,
            config,
        })
    }

    /// Color target format.
    pub fn format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Surface size in physical pixels.
    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    /// Reconfigure for a new window size; zero sizes are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        let Some((width, height)) = surface_extent(width, height) else {
            return;
        };
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
    }

    /// Next swapchain texture.
    ///
    /// # Errors
    ///
    /// Returns [`wgpu::SurfaceError`] when the surface is outdated, lost
    /// or timed out; callers resize and retry.
    pub fn get_next_frame(&self) -> Result<wgpu::SurfaceTexture, wgpu::SurfaceError> {
        self.surface.get_current_texture()
    }

    /// Encoder for one frame's passes.
    pub fn create_encoder(&self) -> wgpu::CommandEncoder {
        self.device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            })
    }

    /// Finish and submit `encoder`.
    pub fn submit(&self, encoder: wgpu::CommandEncoder) {
        let _ = self.queue.submit([encoder.finish()]);
    }
}

/// Adapter defaults with vsync and an sRGB format when one is offered.
fn surface_config(
    surface: &wgpu::Surface<'_>,
    adapter: &wgpu::Adapter,
    width: u32,
    height: u32,
) -> Result<wgpu::SurfaceConfiguration, GpuInitError> {
    let mut config = surface
        .get_default_config(adapter, width, height)
        .ok_or(GpuInitError::UnsupportedSurface)?;
    let formats = surface.get_capabilities(adapter).formats;
    if let Some(srgb) = formats.into_iter().find(wgpu::TextureFormat::is_srgb) {
        config.format = srgb;
    }
    config.present_mode = wgpu::PresentMode::AutoVsync;
    Ok(config)
}
