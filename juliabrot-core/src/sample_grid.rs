use crate::complex::Complex;
use crate::error::CoreError;
use crate::view::ViewState;
use crate::viewport::Viewport;

/// Maps pixel coordinates to complex-plane sample points for one frame.
///
/// A grid is derived from a [`ViewState`] and a [`Viewport`] and is never
/// stored between frames. Pixel `(x, y)` samples
/// `offset + (x · step_re, y · step_im)`, where
///
/// ```text
/// aspect  = width / height
/// step_re = 1 / (zoom · width)
/// step_im = 1 / (zoom · aspect · height)
/// offset  = center − (1 / (2·zoom), 1 / (2·zoom·aspect))
/// ```
///
/// `step_re == step_im`, so the plane region is never distorted whatever
/// the window shape; the visible real span is always `1 / zoom`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleGrid {
    offset: Complex,
    step_re: f64,
    step_im: f64,
    width: u32,
    height: u32,
}

impl SampleGrid {
    /// Build the grid for a frame, or `None` if the inputs describe nothing
    /// renderable (zero-area viewport, non-positive or non-finite zoom).
    pub fn new(view: &ViewState, viewport: &Viewport) -> Option<Self> {
        Self::try_new(view, viewport).ok()
    }

    /// Like [`new`](Self::new) but reports why the grid could not be built.
    pub fn try_new(view: &ViewState, viewport: &Viewport) -> crate::Result<Self> {
        if viewport.is_empty() {
            return Err(CoreError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        let zoom = view.zoom;
        if !(zoom > 0.0) || !zoom.is_finite() {
            return Err(CoreError::InvalidZoom(zoom));
        }

        let width = viewport.width as f64;
        let height = viewport.height as f64;
        let aspect = viewport.aspect_ratio();

        Ok(Self {
            offset: Complex::new(
                view.center.re - 1.0 / (2.0 * zoom),
                view.center.im - 1.0 / (2.0 * zoom * aspect),
            ),
            step_re: 1.0 / (zoom * width),
            step_im: 1.0 / (zoom * aspect * height),
            width: viewport.width,
            height: viewport.height,
        })
    }

    /// The sample point for pixel `(x, y)`; `(0, 0)` is the top-left pixel.
    #[inline]
    pub fn point(&self, x: u32, y: u32) -> Complex {
        self.subpixel(x as f64, y as f64)
    }

    /// Fractional-pixel variant of [`point`](Self::point).
    #[inline]
    pub fn subpixel(&self, x: f64, y: f64) -> Complex {
        Complex::new(
            self.offset.re + x * self.step_re,
            self.offset.im + y * self.step_im,
        )
    }

    /// Inverse mapping: the (fractional) pixel coordinate that samples `c`.
    pub fn pixel_of(&self, c: Complex) -> (f64, f64) {
        (
            (c.re - self.offset.re) / self.step_re,
            (c.im - self.offset.im) / self.step_im,
        )
    }

    /// Plane point sampled by pixel `(0, 0)`.
    pub fn offset(&self) -> Complex {
        self.offset
    }

    /// Plane distance between horizontally adjacent pixels.
    pub fn step_re(&self) -> f64 {
        self.step_re
    }

    /// Plane distance between vertically adjacent pixels.
    pub fn step_im(&self) -> f64 {
        self.step_im
    }

    pub fn viewport(&self) -> Viewport {
        Viewport {
            width: self.width,
            height: self.height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    fn view(center: Complex, zoom: f64) -> ViewState {
        ViewState {
            center,
            zoom,
            ..ViewState::default()
        }
    }

    #[test]
    fn center_pixel_maps_to_center() {
        let c = Complex::new(-0.75, 0.1);
        for &(w, h) in &[(100, 100), (640, 480), (300, 900)] {
            let vp = Viewport::new(w, h).unwrap();
            let grid = SampleGrid::new(&view(c, 0.8), &vp).unwrap();
            let p = grid.subpixel(w as f64 / 2.0, h as f64 / 2.0);
            assert!((p.re - c.re).abs() < EPSILON, "{w}x{h}: {p}");
            assert!((p.im - c.im).abs() < EPSILON, "{w}x{h}: {p}");
        }
    }

    #[test]
    fn default_view_spans_four_units() {
        let vp = Viewport::new(100, 100).unwrap();
        let grid = SampleGrid::new(&ViewState::default(), &vp).unwrap();
        let tl = grid.point(0, 0);
        assert!((tl.re + 2.0).abs() < EPSILON);
        assert!((tl.im + 2.0).abs() < EPSILON);
        assert!((grid.step_re() - 0.04).abs() < EPSILON);
    }

    #[test]
    fn steps_are_square_for_any_aspect() {
        for &(w, h) in &[(100, 100), (1920, 1080), (50, 700)] {
            let vp = Viewport::new(w, h).unwrap();
            let grid = SampleGrid::new(&view(Complex::ZERO, 3.0), &vp).unwrap();
            assert!((grid.step_re() - grid.step_im()).abs() < EPSILON);
        }
    }

    #[test]
    fn imaginary_axis_grows_downward() {
        let vp = Viewport::new(10, 10).unwrap();
        let grid = SampleGrid::new(&ViewState::default(), &vp).unwrap();
        assert!(grid.point(0, 9).im > grid.point(0, 0).im);
        assert!(grid.point(9, 0).re > grid.point(0, 0).re);
    }

    #[test]
    fn inverse_mapping_round_trips() {
        let vp = Viewport::new(320, 200).unwrap();
        let grid = SampleGrid::new(&view(Complex::new(0.3, -0.2), 7.5), &vp).unwrap();
        let (x, y) = grid.pixel_of(grid.point(17, 133));
        assert!((x - 17.0).abs() < 1e-6);
        assert!((y - 133.0).abs() < 1e-6);
    }

    #[test]
    fn rejects_empty_viewport() {
        let vp = Viewport { width: 0, height: 10 };
        assert!(SampleGrid::new(&ViewState::default(), &vp).is_none());
        assert_eq!(
            SampleGrid::try_new(&ViewState::default(), &vp),
            Err(CoreError::InvalidViewport {
                width: 0,
                height: 10
            })
        );
    }

    #[test]
    fn rejects_bad_zoom() {
        let vp = Viewport::new(10, 10).unwrap();
        for &z in &[0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(SampleGrid::new(&view(Complex::ZERO, z), &vp).is_none(), "zoom {z}");
        }
    }
}
