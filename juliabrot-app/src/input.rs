use eframe::egui;

use juliabrot_core::PanDirection;

use crate::app::JuliabrotApp;

/// What a bound key does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum KeyAction {
    Step(PanDirection),
    /// Zoom around the view center; `true` zooms in.
    Zoom(bool),
    ToggleMode,
    Reset,
    Quit,
    ToggleHud,
    ToggleHelp,
}

const BOUND_KEYS: [egui::Key; 12] = [
    egui::Key::W,
    egui::Key::A,
    egui::Key::S,
    egui::Key::D,
    egui::Key::E,
    egui::Key::R,
    egui::Key::Q,
    egui::Key::H,
    egui::Key::F1,
    egui::Key::Plus,
    egui::Key::Equals,
    egui::Key::Minus,
];

pub(crate) fn key_action(key: egui::Key) -> Option<KeyAction> {
    use egui::Key;
    let action = match key {
        Key::W => KeyAction::Step(PanDirection::Up),
        Key::A => KeyAction::Step(PanDirection::Left),
        Key::S => KeyAction::Step(PanDirection::Down),
        Key::D => KeyAction::Step(PanDirection::Right),
        Key::Plus | Key::Equals => KeyAction::Zoom(true),
        Key::Minus => KeyAction::Zoom(false),
        Key::E => KeyAction::ToggleMode,
        Key::R => KeyAction::Reset,
        Key::Q => KeyAction::Quit,
        Key::H => KeyAction::ToggleHud,
        Key::F1 => KeyAction::ToggleHelp,
        _ => return None,
    };
    Some(action)
}

impl JuliabrotApp {
    pub(crate) fn handle_canvas_input(&mut self, ctx: &egui::Context, response: &egui::Response) {
        let canvas_pos = |pos: egui::Pos2| pos - response.rect.min;

        let scroll_y = ctx.input(|i| i.raw_scroll_delta.y);
        if scroll_y != 0.0 && response.hovered() {
            if let Some(pos) = response.hover_pos() {
                self.zoom_at_cursor(canvas_pos(pos), scroll_y > 0.0);
            }
        }

        if response.dragged_by(egui::PointerButton::Primary) {
            self.pan_view(response.drag_delta());
        }
        if response.dragged_by(egui::PointerButton::Secondary) {
            self.drag_julia_constant(response.drag_delta());
        }

        self.cursor_point = response
            .hover_pos()
            .and_then(|pos| self.plane_point_at(canvas_pos(pos)));
    }

    pub(crate) fn handle_keyboard(&mut self, ctx: &egui::Context) {
        if ctx.memory(|m| m.focused().is_some()) {
            return;
        }

        let actions: Vec<KeyAction> = ctx.input(|input| {
            BOUND_KEYS
                .iter()
                .filter(|&&key| input.key_pressed(key))
                .filter_map(|&key| key_action(key))
                .collect()
        });

        for action in actions {
            match action {
                KeyAction::Step(direction) => self.step_view(direction),
                KeyAction::Zoom(zoom_in) => self.zoom_center(zoom_in),
                KeyAction::ToggleMode => self.toggle_mode(),
                KeyAction::Reset => self.reset_view(),
                KeyAction::Quit => ctx.send_viewport_cmd(egui::ViewportCommand::Close),
                KeyAction::ToggleHud => self.show_hud = !self.show_hud,
                KeyAction::ToggleHelp => self.help_open = !self.help_open,
            }
        }
    }
}
