use std::time::{Duration, Instant};

use rayon::prelude::*;
use tracing::{debug, info};

use juliabrot_core::{
    Fractal, FractalMode, FractalParams, IterationResult, Julia, Mandelbrot, SampleGrid, ViewState,
    Viewport,
};

use crate::buffer::PixelBuffer;
use crate::context::{ComputeContext, DispatchStrategy};
use crate::iteration_buffer::IterationBuffer;
use crate::palette::color;
use crate::tile::{blit_tile, tiles_for};

/// Timing and shape of one completed frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameStats {
    pub elapsed: Duration,
    pub width: u32,
    pub height: u32,
    pub mode: FractalMode,
    pub strategy: DispatchStrategy,
    /// Whether the target buffer had to be reallocated for this frame.
    pub reallocated: bool,
}

impl ComputeContext {
    /// Render `view` into a freshly allocated buffer.
    ///
    /// Returns `None` when the view or viewport describes nothing
    /// renderable; the caller keeps showing whatever it showed before.
    pub fn compute_frame(&self, view: &ViewState, viewport: Viewport) -> Option<PixelBuffer> {
        let grid = self.frame_grid(view, viewport)?;
        let mut buffer = PixelBuffer::new(viewport);
        self.render_grid(view, &grid, &mut buffer, false);
        Some(buffer)
    }

    /// Render `view` into `buffer`, resizing it only if `viewport` changed.
    ///
    /// On `None` the buffer is left untouched.
    pub fn render_into(
        &self,
        view: &ViewState,
        viewport: Viewport,
        buffer: &mut PixelBuffer,
    ) -> Option<FrameStats> {
        let grid = self.frame_grid(view, viewport)?;
        let reallocated = buffer.ensure_size(viewport);
        Some(self.render_grid(view, &grid, buffer, reallocated))
    }

    /// Classify every pixel of `view` without coloring.
    pub fn compute_iterations(
        &self,
        view: &ViewState,
        viewport: Viewport,
    ) -> Option<IterationBuffer> {
        let grid = self.frame_grid(view, viewport)?;
        let params = self.settings.params;
        let mut iterations = IterationBuffer::new(viewport, params.max_iterations);
        let start = Instant::now();
        self.pool.install(|| {
            dispatch_for_view(
                self.settings.strategy,
                view,
                params,
                &grid,
                iterations.data.as_mut_slice(),
                |r| r,
            )
        });
        debug!(
            elapsed_ms = start.elapsed().as_millis(),
            interior = iterations.interior_count(),
            "Iteration pass complete"
        );
        Some(iterations)
    }

    fn frame_grid(&self, view: &ViewState, viewport: Viewport) -> Option<SampleGrid> {
        match SampleGrid::try_new(view, &viewport) {
            Ok(grid) => Some(grid),
            Err(err) => {
                debug!(%err, "Skipping frame");
                None
            }
        }
    }

    fn render_grid(
        &self,
        view: &ViewState,
        grid: &SampleGrid,
        buffer: &mut PixelBuffer,
        reallocated: bool,
    ) -> FrameStats {
        let start = Instant::now();
        let strategy = self.settings.strategy;
        let viewport = grid.viewport();
        debug!(
            width = viewport.width,
            height = viewport.height,
            mode = view.mode.label(),
            ?strategy,
            "Starting frame"
        );

        let params = self.settings.params;
        let pixels = buffer.pixels_mut();
        self.pool
            .install(|| dispatch_for_view(strategy, view, params, grid, pixels, color));

        let elapsed = start.elapsed();
        info!(
            elapsed_ms = elapsed.as_millis(),
            width = viewport.width,
            height = viewport.height,
            mode = view.mode.label(),
            "Frame complete"
        );

        FrameStats {
            elapsed,
            width: viewport.width,
            height: viewport.height,
            mode: view.mode,
            strategy,
            reallocated,
        }
    }
}

/// Pick the fractal for `view.mode` and dispatch over it.
fn dispatch_for_view<T, M>(
    strategy: DispatchStrategy,
    view: &ViewState,
    params: FractalParams,
    grid: &SampleGrid,
    out: &mut [T],
    map: M,
) where
    T: Copy + Send + Sync,
    M: Fn(IterationResult) -> T + Sync,
{
    match view.mode {
        FractalMode::Mandelbrot => dispatch(strategy, grid, &Mandelbrot::new(params), out, map),
        FractalMode::Julia => dispatch(
            strategy,
            grid,
            &Julia::new(view.julia_constant, params),
            out,
            map,
        ),
    }
}

/// Evaluate every pixel of `grid` into `out` (row-major, one entry per
/// pixel) on the current rayon pool.
fn dispatch<T, F, M>(strategy: DispatchStrategy, grid: &SampleGrid, fractal: &F, out: &mut [T], map: M)
where
    T: Copy + Send + Sync,
    F: Fractal + Sync,
    M: Fn(IterationResult) -> T + Sync,
{
    let viewport = grid.viewport();
    let width = viewport.width as usize;
    debug_assert_eq!(out.len(), viewport.pixel_count());

    match strategy {
        DispatchStrategy::Rows => {
            out.par_chunks_mut(width)
                .enumerate()
                .for_each(|(y, row)| {
                    let y = y as u32;
                    for (x, px) in row.iter_mut().enumerate() {
                        *px = map(fractal.iterate(grid.point(x as u32, y)));
                    }
                });
        }
        DispatchStrategy::Tiles => {
            let tiles = tiles_for(viewport);
            let rendered: Vec<Vec<T>> = tiles
                .par_iter()
                .map(|tile| {
                    let mut data = Vec::with_capacity(tile.pixel_count());
                    for py in 0..tile.height {
                        for px in 0..tile.width {
                            data.push(map(fractal.iterate(grid.point(tile.x + px, tile.y + py))));
                        }
                    }
                    data
                })
                .collect();
            for (tile, data) in tiles.iter().zip(&rendered) {
                blit_tile(out, viewport.width, tile, data);
            }
        }
        DispatchStrategy::Pixels => {
            out.par_iter_mut().enumerate().for_each(|(i, px)| {
                let x = (i % width) as u32;
                let y = (i / width) as u32;
                *px = map(fractal.iterate(grid.point(x, y)));
            });
        }
    }
}
