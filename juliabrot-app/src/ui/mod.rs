mod help;
mod hud;
mod toolbar;
