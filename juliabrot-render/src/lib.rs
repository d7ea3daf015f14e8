//! Turns a [`juliabrot_core::ViewState`] into RGB frames on a dedicated
//! rayon pool.

pub mod buffer;
pub mod context;
pub mod error;
pub mod iteration_buffer;
pub mod palette;
pub mod renderer;
pub mod tile;

pub use buffer::PixelBuffer;
pub use context::{ComputeContext, DispatchStrategy, RenderSettings};
pub use error::RenderError;
pub use iteration_buffer::IterationBuffer;
pub use palette::{color, colorize, INTERIOR_COLOR};
pub use renderer::FrameStats;
pub use tile::TILE_SIZE;

pub type Result<T> = std::result::Result<T, RenderError>;
