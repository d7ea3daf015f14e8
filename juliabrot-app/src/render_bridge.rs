use std::sync::mpsc;

use eframe::egui;
use tracing::{debug, warn};

use juliabrot_core::{ViewState, Viewport};
use juliabrot_render::{ComputeContext, FrameStats, PixelBuffer};

use crate::app::JuliabrotApp;

pub(crate) struct RenderRequest {
    pub(crate) id: u64,
    pub(crate) view: ViewState,
    pub(crate) viewport: Viewport,
    /// A previously displayed buffer handed back for reuse.
    pub(crate) recycled: Option<PixelBuffer>,
}

pub(crate) struct RenderResponse {
    pub(crate) id: u64,
    pub(crate) buffer: PixelBuffer,
    pub(crate) stats: FrameStats,
}

/// Request ids handed out so far and the newest one that reached the screen.
///
/// A finished frame is shown whenever it is newer than the one on screen,
/// even if more requests have been queued since. During a continuous drag
/// the canvas therefore keeps updating at the worker's pace.
#[derive(Debug, Default)]
pub(crate) struct FrameSequence {
    requested: u64,
    displayed: u64,
}

impl FrameSequence {
    pub(crate) fn next_id(&mut self) -> u64 {
        self.requested += 1;
        self.requested
    }

    /// Record `id` as displayed if it is newer than the current frame.
    pub(crate) fn accept(&mut self, id: u64) -> bool {
        if id <= self.displayed {
            return false;
        }
        self.displayed = id;
        true
    }
}

impl JuliabrotApp {
    pub(crate) fn request_render(&mut self) {
        let id = self.frames.next_id();
        debug!(id, zoom = self.view.zoom, mode = self.view.mode.label(), "Queued frame");

        let queued = self.request_tx.send(RenderRequest {
            id,
            view: self.view,
            viewport: self.viewport,
            recycled: self.spare_buffer.take(),
        });
        if queued.is_err() {
            warn!("Render worker is gone; frame not queued");
        }
        self.frame_stale = false;
    }

    pub(crate) fn poll_responses(&mut self, ctx: &egui::Context) {
        for RenderResponse { id, buffer, stats } in self.response_rx.try_iter() {
            if self.frames.accept(id) {
                let size = [buffer.width() as usize, buffer.height() as usize];
                let image = egui::ColorImage::from_rgb(size, buffer.as_bytes());
                self.frame_texture =
                    Some(ctx.load_texture("juliabrot-frame", image, egui::TextureOptions::LINEAR));
                self.last_stats = Some(stats);
            }
            self.spare_buffer = Some(buffer);
        }
    }
}

/// The worker side of the bridge: renders requests and keeps one spare
/// buffer so allocations survive skipped and superseded requests.
pub(crate) struct FrameWorker {
    compute: ComputeContext,
    spare: Option<PixelBuffer>,
}

impl FrameWorker {
    pub(crate) fn new(compute: ComputeContext) -> Self {
        Self {
            compute,
            spare: None,
        }
    }

    /// Collapse everything queued behind `first` into the newest request.
    fn drain_latest(
        &mut self,
        first: RenderRequest,
        rx: &mpsc::Receiver<RenderRequest>,
    ) -> RenderRequest {
        rx.try_iter().fold(first, |stale, newer| {
            debug!(dropped = stale.id, "Skipping superseded render request");
            if self.spare.is_none() {
                self.spare = stale.recycled;
            }
            newer
        })
    }

    /// Render one request. `None` means the request described nothing
    /// renderable; its buffer is kept for the next one.
    fn serve(&mut self, req: RenderRequest) -> Option<RenderResponse> {
        let mut buffer = req
            .recycled
            .or_else(|| self.spare.take())
            .unwrap_or_else(|| PixelBuffer::new(req.viewport));

        match self.compute.render_into(&req.view, req.viewport, &mut buffer) {
            Some(stats) => Some(RenderResponse {
                id: req.id,
                buffer,
                stats,
            }),
            None => {
                self.spare = Some(buffer);
                None
            }
        }
    }
}

/// Serve render requests until the app side hangs up.
///
/// Requests that pile up while a frame is being computed are collapsed into
/// the newest one, so a burst of input costs a single frame.
pub(crate) fn render_worker(
    ctx: egui::Context,
    compute: ComputeContext,
    rx: mpsc::Receiver<RenderRequest>,
    tx: mpsc::Sender<RenderResponse>,
) {
    let mut worker = FrameWorker::new(compute);
    while let Ok(first) = rx.recv() {
        let req = worker.drain_latest(first, &rx);
        let Some(response) = worker.serve(req) else {
            continue;
        };
        if tx.send(response).is_err() {
            debug!("App closed; render worker exiting");
            return;
        }
        ctx.request_repaint();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use juliabrot_render::RenderSettings;

    fn request(id: u64) -> RenderRequest {
        RenderRequest {
            id,
            view: ViewState::default(),
            viewport: Viewport::new(4, 4).unwrap(),
            recycled: None,
        }
    }

    fn worker() -> FrameWorker {
        let settings = RenderSettings {
            threads: 1,
            ..RenderSettings::default()
        };
        FrameWorker::new(ComputeContext::new(settings).unwrap())
    }

    #[test]
    fn frame_behind_latest_request_is_still_shown() {
        let mut frames = FrameSequence::default();
        for expected in 1..=3 {
            assert_eq!(frames.next_id(), expected);
        }
        // Input kept coming while request 2 was rendering.
        assert!(frames.accept(2));
        assert!(!frames.accept(1));
        assert!(!frames.accept(2));
        assert!(frames.accept(3));
    }

    #[test]
    fn drain_keeps_only_newest() {
        let (sender, rx) = mpsc::channel();
        for id in 2..=5 {
            sender.send(request(id)).unwrap();
        }
        let latest = worker().drain_latest(request(1), &rx);
        assert_eq!(latest.id, 5);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn drain_with_empty_queue_returns_initial() {
        let (_sender, rx) = mpsc::channel::<RenderRequest>();
        assert_eq!(worker().drain_latest(request(7), &rx).id, 7);
    }

    #[test]
    fn drain_keeps_buffer_of_superseded_request() {
        let (sender, rx) = mpsc::channel();
        sender.send(request(2)).unwrap();
        let mut first = request(1);
        first.recycled = Some(PixelBuffer::new(first.viewport));

        let mut worker = worker();
        let latest = worker.drain_latest(first, &rx);
        assert_eq!(latest.id, 2);
        assert!(worker.spare.is_some());
        assert!(!worker.serve(latest).unwrap().stats.reallocated);
    }

    #[test]
    fn skipped_request_keeps_its_buffer() {
        let mut worker = worker();
        let mut empty = request(1);
        empty.viewport = Viewport {
            width: 0,
            height: 0,
        };
        empty.recycled = Some(PixelBuffer::new(Viewport::new(4, 4).unwrap()));
        assert!(worker.serve(empty).is_none());
        assert!(worker.spare.is_some());

        let response = worker.serve(request(2)).unwrap();
        assert_eq!(response.id, 2);
        assert!(!response.stats.reallocated);
        assert!(worker.spare.is_none());
    }

    #[test]
    fn served_frame_matches_direct_render() {
        let mut worker = worker();
        let req = request(9);
        let expected = worker.compute.compute_frame(&req.view, req.viewport).unwrap();
        let response = worker.serve(req).unwrap();
        assert_eq!(response.buffer, expected);
        assert!(response.stats.reallocated);
    }
}
