use juliabrot_core::Viewport;

/// A packed RGB raster: `width × height` triples, row-major.
///
/// The backing storage always holds exactly `width × height × 3` bytes;
/// [`ensure_size`](Self::ensure_size) reallocates it whenever the viewport
/// changes, and otherwise lets the same allocation be reused frame after
/// frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 3]>,
}

impl PixelBuffer {
    /// Create a black buffer covering `viewport`.
    pub fn new(viewport: Viewport) -> Self {
        Self {
            width: viewport.width,
            height: viewport.height,
            pixels: vec![[0, 0, 0]; viewport.pixel_count()],
        }
    }

    /// Resize for `viewport` if its dimensions differ from the buffer's.
    ///
    /// Returns `true` when a new allocation was made. Contents are
    /// unspecified afterwards; callers overwrite every pixel.
    pub fn ensure_size(&mut self, viewport: Viewport) -> bool {
        if self.width == viewport.width && self.height == viewport.height {
            return false;
        }
        *self = Self::new(viewport);
        true
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn viewport(&self) -> Viewport {
        Viewport {
            width: self.width,
            height: self.height,
        }
    }

    /// Color of pixel `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        self.pixels[y as usize * self.width as usize + x as usize]
    }

    /// Per-pixel view used by the renderer.
    pub fn pixels(&self) -> &[[u8; 3]] {
        &self.pixels
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut [[u8; 3]] {
        &mut self.pixels
    }

    /// The raster as packed RGB bytes, ready to upload to a texture.
    pub fn as_bytes(&self) -> &[u8] {
        self.pixels.as_flattened()
    }
}
