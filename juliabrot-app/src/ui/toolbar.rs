use eframe::egui;

use juliabrot_core::FractalMode;

use crate::app::{JuliabrotApp, OVERLAY_MARGIN};

impl JuliabrotApp {
    pub(crate) fn show_toolbar(&mut self, ctx: &egui::Context) {
        egui::Area::new(egui::Id::new("hud_toolbar"))
            .anchor(egui::Align2::RIGHT_TOP, [-OVERLAY_MARGIN, OVERLAY_MARGIN])
            .show(ctx, |ui| {
                egui::Frame::NONE
                    .fill(egui::Color32::from_black_alpha(160))
                    .inner_margin(egui::Margin::same(4))
                    .corner_radius(4.0)
                    .show(ui, |ui| {
                        ui.horizontal(|ui| {
                            let target = match self.view.mode {
                                FractalMode::Mandelbrot => "Julia",
                                FractalMode::Julia => "Mandelbrot",
                            };
                            if ui
                                .button(target)
                                .on_hover_text("Switch fractal (E)")
                                .clicked()
                            {
                                self.toggle_mode();
                            }
                            if ui.button("Reset").on_hover_text("Reset view (R)").clicked() {
                                self.reset_view();
                            }
                            if ui
                                .add(egui::Button::new("?").selected(self.help_open))
                                .on_hover_text("Controls (F1)")
                                .clicked()
                            {
                                self.help_open = !self.help_open;
                            }
                        });
                    });
            });
    }
}
