use thiserror::Error;

use crate::context::MAX_THREADS;

/// Errors raised while setting up the rendering pipeline.
///
/// Rendering itself cannot fail: invalid frames are skipped, not reported.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("invalid thread count: {0} (must be <= {max}, 0 picks a default)", max = MAX_THREADS)]
    InvalidThreadCount(usize),

    #[error("failed to build render thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error(transparent)]
    Core(#[from] juliabrot_core::CoreError),
}
