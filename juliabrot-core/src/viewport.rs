use crate::error::CoreError;

/// The pixel-space rectangle being rendered into.
///
/// Fields are public because the window layer updates them straight from
/// resize events, which can transiently report a zero-sized surface. Use
/// [`Viewport::new`] when a validated value is required, and
/// [`Viewport::is_empty`] before rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Viewport {
    /// Width in pixels.
    pub width: u32,

    /// Height in pixels.
    pub height: u32,
}

impl Viewport {
    /// Create a viewport with both dimensions strictly positive.
    pub fn new(width: u32, height: u32) -> crate::Result<Self> {
        if width == 0 || height == 0 {
            return Err(CoreError::InvalidViewport { width, height });
        }
        Ok(Self { width, height })
    }

    /// `true` when there are no pixels to render.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// The aspect ratio of the viewport (width / height).
    #[inline]
    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }

    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Size in bytes of a packed RGB raster covering this viewport.
    #[inline]
    pub fn rgb_len(&self) -> usize {
        self.pixel_count() * 3
    }
}
