use eframe::egui;

use juliabrot_core::FractalMode;

use crate::app::{JuliabrotApp, OVERLAY_MARGIN, OVERLAY_ROUNDING};

const MARKER_RADIUS: f32 = 6.0;

/// Translucent backing shared by both HUD panels.
fn overlay_frame() -> egui::Frame {
    egui::Frame::NONE
        .fill(egui::Color32::from_black_alpha(166))
        .inner_margin(egui::Margin::same(8))
        .corner_radius(OVERLAY_ROUNDING)
}

fn overlay_area(id: &str, corner: egui::Align2, offset: [f32; 2]) -> egui::Area {
    egui::Area::new(egui::Id::new(id))
        .anchor(corner, offset)
        .interactable(false)
}

impl JuliabrotApp {
    pub(crate) fn show_hud(&mut self, ctx: &egui::Context) {
        if !self.show_hud {
            return;
        }
        let text = egui::Color32::from_gray(215);

        let view = &self.view;
        let cursor = self.cursor_point;
        overlay_area("hud_view", egui::Align2::LEFT_TOP, [OVERLAY_MARGIN, OVERLAY_MARGIN]).show(
            ctx,
            |ui| {
                overlay_frame().show(ui, |ui| {
                    ui.visuals_mut().override_text_color = Some(text);
                    ui.label(format!("{} set", view.mode.label()));
                    ui.label(format!("center  {}", view.center));
                    ui.label(format!("zoom    {:.3e}", view.zoom));
                    ui.label(format!("c       {}", view.julia_constant));
                    if let Some(point) = cursor {
                        ui.label(format!("cursor  {point}"));
                    }
                });
            },
        );

        let frame_line = match self.last_stats {
            Some(stats) => format!(
                "{}x{} in {:.1} ms",
                stats.width,
                stats.height,
                stats.elapsed.as_secs_f64() * 1e3
            ),
            None => "waiting for first frame".to_owned(),
        };
        let pool_line = format!(
            "{} threads / {:?} / {} max iterations",
            self.worker_threads, self.strategy, self.preferences.render.params.max_iterations
        );
        overlay_area("hud_frame", egui::Align2::CENTER_BOTTOM, [0.0, -OVERLAY_MARGIN]).show(
            ctx,
            |ui| {
                overlay_frame().show(ui, |ui| {
                    ui.visuals_mut().override_text_color = Some(text);
                    ui.spacing_mut().item_spacing.y = 2.0;
                    ui.label(frame_line);
                    ui.label(pool_line);
                });
            },
        );
    }

    /// Ring around the Julia constant while exploring the Mandelbrot set,
    /// showing which Julia set the toggle would open.
    pub(crate) fn draw_julia_marker(&self, painter: &egui::Painter, rect: egui::Rect) {
        if !self.show_hud || self.view.mode != FractalMode::Mandelbrot {
            return;
        }
        let Some(offset) = self.canvas_pos_of(self.view.julia_constant) else {
            return;
        };
        let pos = rect.min + offset;
        if !rect.contains(pos) {
            return;
        }
        painter.circle_stroke(
            pos,
            MARKER_RADIUS,
            egui::Stroke::new(1.5, egui::Color32::from_rgb(255, 180, 50)),
        );
    }
}
