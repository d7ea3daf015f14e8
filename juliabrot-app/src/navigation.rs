use eframe::egui;
use tracing::info;

use juliabrot_core::{Complex, PanDirection, SampleGrid, ViewState, Viewport};

use crate::app::JuliabrotApp;

/// Size in physical pixels of a canvas measured in egui points.
pub(crate) fn physical_extent(size: egui::Vec2, pixels_per_point: f32) -> (u32, u32) {
    let px = size * pixels_per_point;
    (px.x.max(0.0).round() as u32, px.y.max(0.0).round() as u32)
}

impl JuliabrotApp {
    /// Mutate the view and schedule a frame if anything actually moved.
    fn update_view(&mut self, f: impl FnOnce(&mut ViewState, &Viewport)) {
        let before = self.view;
        f(&mut self.view, &self.viewport);
        if self.view != before {
            self.frame_stale = true;
        }
    }

    pub(crate) fn check_resize(&mut self, width: u32, height: u32) {
        if width != self.viewport.width || height != self.viewport.height {
            self.viewport = Viewport { width, height };
            if !self.viewport.is_empty() {
                self.frame_stale = true;
            }
        }
    }

    pub(crate) fn reset_view(&mut self) {
        self.update_view(|view, _| view.reset());
    }

    pub(crate) fn toggle_mode(&mut self) {
        self.update_view(|view, _| view.toggle_mode());
        info!(mode = self.view.mode.label(), "Switched fractal");
    }

    pub(crate) fn step_view(&mut self, direction: PanDirection) {
        self.update_view(|view, _| view.step(direction));
    }

    fn zoom_factor(&self, zoom_in: bool) -> f64 {
        let step = self.preferences.zoom_step;
        if zoom_in {
            step
        } else {
            1.0 / step
        }
    }

    pub(crate) fn zoom_center(&mut self, zoom_in: bool) {
        let factor = self.zoom_factor(zoom_in);
        self.update_view(|view, _| view.zoom_by(factor));
    }

    /// Canvas offset or drag delta in points, converted to frame pixels.
    fn to_pixels(&self, points: egui::Vec2) -> egui::Vec2 {
        points * self.pixels_per_point
    }

    /// One wheel notch at canvas position `pos` (in points).
    pub(crate) fn zoom_at_cursor(&mut self, pos: egui::Vec2, zoom_in: bool) {
        let factor = self.zoom_factor(zoom_in);
        let pos = self.to_pixels(pos);
        self.update_view(|view, viewport| {
            view.zoom_at(factor, pos.x as f64, pos.y as f64, viewport)
        });
    }

    pub(crate) fn pan_view(&mut self, delta: egui::Vec2) {
        let delta = self.to_pixels(delta);
        self.update_view(|view, viewport| view.pan(delta.x as f64, delta.y as f64, viewport));
    }

    pub(crate) fn drag_julia_constant(&mut self, delta: egui::Vec2) {
        let delta = self.to_pixels(delta);
        self.update_view(|view, viewport| {
            view.pan_julia_constant(delta.x as f64, delta.y as f64, viewport)
        });
    }

    /// The plane point under canvas position `pos` (in points).
    pub(crate) fn plane_point_at(&self, pos: egui::Vec2) -> Option<Complex> {
        let px = self.to_pixels(pos);
        SampleGrid::new(&self.view, &self.viewport).map(|grid| grid.subpixel(px.x as f64, px.y as f64))
    }

    /// Canvas position of plane point `c` in points, if the view is renderable.
    pub(crate) fn canvas_pos_of(&self, c: Complex) -> Option<egui::Vec2> {
        SampleGrid::new(&self.view, &self.viewport).map(|grid| {
            let (x, y) = grid.pixel_of(c);
            egui::vec2(x as f32, y as f32) / self.pixels_per_point
        })
    }
}
