use rayon::{ThreadPool, ThreadPoolBuilder};
use serde::{Deserialize, Serialize};
use tracing::info;

use juliabrot_core::FractalParams;

use crate::error::RenderError;

/// Upper bound on the configured worker count.
pub const MAX_THREADS: usize = 256;

/// How a frame's pixels are partitioned across workers.
///
/// Every strategy produces byte-identical output; they differ only in
/// scheduling granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchStrategy {
    /// One work item per scanline, written in place.
    #[default]
    Rows,
    /// One work item per `TILE_SIZE` square, assembled after the join.
    Tiles,
    /// One work item per pixel, left to rayon's adaptive splitting.
    Pixels,
}

/// Configuration for a [`ComputeContext`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub params: FractalParams,

    /// Worker threads; `0` lets rayon pick one per logical CPU.
    pub threads: usize,

    pub strategy: DispatchStrategy,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            params: FractalParams::default(),
            threads: 0,
            strategy: DispatchStrategy::default(),
        }
    }
}

/// The compute resources frames are rendered with.
///
/// Created once at startup and handed by reference to whoever renders.
/// Owns a dedicated worker pool so rendering never competes with other
/// users of rayon's global pool.
#[derive(Debug)]
pub struct ComputeContext {
    pub(crate) pool: ThreadPool,
    pub(crate) settings: RenderSettings,
}

impl ComputeContext {
    pub fn new(settings: RenderSettings) -> crate::Result<Self> {
        // `max_iterations` is a public field, so re-check it here.
        FractalParams::new(settings.params.max_iterations)?;
        if settings.threads > MAX_THREADS {
            return Err(RenderError::InvalidThreadCount(settings.threads));
        }

        let pool = ThreadPoolBuilder::new()
            .num_threads(settings.threads)
            .thread_name(|i| format!("juliabrot-render-{i}"))
            .build()?;

        info!(
            threads = pool.current_num_threads(),
            strategy = ?settings.strategy,
            max_iterations = settings.params.max_iterations,
            "Compute context ready"
        );

        Ok(Self { pool, settings })
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    /// Number of worker threads actually running.
    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }
}
