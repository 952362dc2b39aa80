pub mod graph_ui;
pub mod log_ui;
pub mod window;

pub use graph_ui::{GraphWindow, LabelToggle};
pub use log_ui::LogWindow;
pub use window::DraggableWindow;

use egui::{Context, PointerButton, Pos2, Vec2};

/// Pointer state sampled once per frame.
///
/// Panels read this instead of querying the context directly so their
/// interaction logic can be driven from tests.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerSnapshot {
    pub pos: Option<Pos2>,
    pub delta: Vec2,
    pub primary_pressed: bool,
    pub primary_down: bool,
    pub primary_released: bool,
    pub middle_pressed: bool,
    pub middle_down: bool,
}

impl PointerSnapshot {
    pub fn from_ctx(ctx: &Context) -> Self {
        ctx.input(|i| Self {
            pos: i.pointer.latest_pos(),
            delta: i.pointer.delta(),
            primary_pressed: i.pointer.primary_pressed(),
            primary_down: i.pointer.primary_down(),
            primary_released: i.pointer.primary_released(),
            middle_pressed: i.pointer.button_pressed(PointerButton::Middle),
            middle_down: i.pointer.button_down(PointerButton::Middle),
        })
    }
}
