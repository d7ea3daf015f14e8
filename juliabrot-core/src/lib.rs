//! Plane geometry and escape-time evaluation for the Mandelbrot and Julia
//! families. No threading or I/O lives here.

pub mod complex;
pub mod error;
pub mod fractal;
pub mod julia;
pub mod mandelbrot;
pub mod sample_grid;
pub mod view;
pub mod viewport;

pub use complex::Complex;
pub use error::CoreError;
pub use fractal::{evaluate, Fractal, FractalMode, FractalParams, IterationResult};
pub use julia::Julia;
pub use mandelbrot::Mandelbrot;
pub use sample_grid::SampleGrid;
pub use view::{PanDirection, ViewState};
pub use viewport::Viewport;

pub type Result<T> = std::result::Result<T, CoreError>;
