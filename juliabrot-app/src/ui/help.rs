use eframe::egui;

use crate::app::JuliabrotApp;

const KEYS: &[(&str, &str)] = &[
    ("W / A / S / D", "Move half a view up / left / down / right"),
    ("+ / -", "Zoom in / out around the center"),
    ("E", "Switch between Mandelbrot and Julia"),
    ("R", "Back to the default framing"),
    ("H", "Show or hide the overlays"),
    ("F1", "Toggle this window"),
    ("Q", "Quit"),
];

const MOUSE: &[(&str, &str)] = &[
    ("Left drag", "Move the view"),
    ("Right drag", "Move the Julia constant"),
    ("Wheel", "Zoom around the pointer"),
];

fn shortcut_grid(ui: &mut egui::Ui, id: &str, rows: &[(&str, &str)]) {
    egui::Grid::new(id).num_columns(2).striped(true).show(ui, |ui| {
        for (input, effect) in rows {
            ui.monospace(*input);
            ui.label(*effect);
            ui.end_row();
        }
    });
}

impl JuliabrotApp {
    /// Reference card for the bindings in `input.rs`, toggled with F1 or the
    /// toolbar.
    pub(crate) fn show_help_window(&mut self, ctx: &egui::Context) {
        egui::Window::new("Controls")
            .open(&mut self.help_open)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                ui.strong("Keyboard");
                shortcut_grid(ui, "help_keys", KEYS);
                ui.separator();
                ui.strong("Mouse");
                shortcut_grid(ui, "help_mouse", MOUSE);
            });
    }
}
