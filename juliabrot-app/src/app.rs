use std::sync::mpsc;
use std::thread;

use eframe::egui;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use juliabrot_core::{Complex, ViewState, Viewport};
use juliabrot_render::{ComputeContext, DispatchStrategy, FrameStats, PixelBuffer, RenderSettings};

use crate::navigation::physical_extent;
use crate::preferences::AppPreferences;
use crate::render_bridge::{render_worker, FrameSequence, RenderRequest, RenderResponse};

pub(crate) const OVERLAY_MARGIN: f32 = 8.0;
pub(crate) const OVERLAY_ROUNDING: f32 = 6.0;

pub(crate) struct JuliabrotApp {
    pub(crate) view: ViewState,
    pub(crate) viewport: Viewport,
    pub(crate) preferences: AppPreferences,

    // Worker channel and the frame it last delivered
    pub(crate) request_tx: mpsc::Sender<RenderRequest>,
    pub(crate) response_rx: mpsc::Receiver<RenderResponse>,
    pub(crate) frames: FrameSequence,
    pub(crate) frame_stale: bool,
    /// Physical pixels per egui point; the frame is rendered at physical size.
    pub(crate) pixels_per_point: f32,
    pub(crate) frame_texture: Option<egui::TextureHandle>,
    pub(crate) spare_buffer: Option<PixelBuffer>,
    pub(crate) last_stats: Option<FrameStats>,
    pub(crate) worker_threads: usize,
    pub(crate) strategy: DispatchStrategy,

    // Overlays
    pub(crate) cursor_point: Option<Complex>,
    pub(crate) show_hud: bool,
    pub(crate) help_open: bool,
}

impl JuliabrotApp {
    pub(crate) fn new(
        egui_ctx: &egui::Context,
        prefs: AppPreferences,
        compute: ComputeContext,
    ) -> Self {
        let (request_tx, request_rx) = mpsc::channel();
        let (response_tx, response_rx) = mpsc::channel();

        let worker_threads = compute.threads();
        let strategy = compute.settings().strategy;

        let repaint = egui_ctx.clone();
        let spawned = thread::Builder::new()
            .name("juliabrot-frames".into())
            .spawn(move || render_worker(repaint, compute, request_rx, response_tx));
        if let Err(e) = spawned {
            error!("Could not start render worker: {e}");
        }

        Self {
            view: ViewState::default(),
            viewport: Viewport {
                width: 0,
                height: 0,
            },
            show_hud: prefs.show_hud,
            preferences: prefs,
            request_tx,
            response_rx,
            frames: FrameSequence::default(),
            frame_stale: true,
            pixels_per_point: egui_ctx.pixels_per_point(),
            frame_texture: None,
            spare_buffer: None,
            last_stats: None,
            worker_threads,
            strategy,
            cursor_point: None,
            help_open: false,
        }
    }

    fn update_canvas(&mut self, ctx: &egui::Context) {
        self.poll_responses(ctx);

        let canvas_frame = egui::Frame::NONE.fill(egui::Color32::BLACK);
        egui::CentralPanel::default().frame(canvas_frame).show(ctx, |ui| {
            let size = ui.available_size();
            self.pixels_per_point = ctx.pixels_per_point();
            let (width, height) = physical_extent(size, self.pixels_per_point);
            self.check_resize(width, height);

            let (canvas, painter) = ui.allocate_painter(size, egui::Sense::click_and_drag());
            self.handle_canvas_input(ctx, &canvas);
            if self.frame_stale {
                self.request_render();
            }

            if let Some(texture) = &self.frame_texture {
                let full_uv = egui::Rect::from_min_max(egui::Pos2::ZERO, egui::pos2(1.0, 1.0));
                painter.image(texture.id(), canvas.rect, full_uv, egui::Color32::WHITE);
            }
            self.draw_julia_marker(&painter, canvas.rect);
        });
    }
}

impl eframe::App for JuliabrotApp {
    fn update(&mut self, ctx: &egui::Context, _: &mut eframe::Frame) {
        ctx.set_visuals(egui::Visuals::dark());
        self.handle_keyboard(ctx);
        self.update_canvas(ctx);

        self.show_hud(ctx);
        self.show_toolbar(ctx);
        self.show_help_window(ctx);
    }

    fn on_exit(&mut self, _: Option<&eframe::glow::Context>) {
        self.preferences.show_hud = self.show_hud;
        self.preferences.save();
    }
}

/// Install logging, load preferences and open the explorer window.
pub(crate) fn run() -> eframe::Result {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting Juliabrot");

    let mut prefs = AppPreferences::load();
    let compute = match ComputeContext::new(prefs.render) {
        Ok(compute) => compute,
        Err(e) => {
            error!("Invalid render settings ({e}); using defaults");
            prefs.render = RenderSettings::default();
            ComputeContext::new(prefs.render)
                .map_err(|e| eframe::Error::AppCreation(Box::new(e)))?
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Juliabrot")
            .with_inner_size([prefs.window_width, prefs.window_height])
            .with_min_inner_size([320.0, 240.0]),
        ..eframe::NativeOptions::default()
    };

    eframe::run_native(
        "Juliabrot",
        options,
        Box::new(move |cc| Ok(Box::new(JuliabrotApp::new(&cc.egui_ctx, prefs, compute)))),
    )
}
