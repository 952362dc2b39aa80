//! Log window: persistent lines on top, a blank line, then transient
//! messages newest first.

use egui::{Align2, Color32, Context, CornerRadius, FontId, Id, LayerId, Order, Pos2, Rect, Vec2};

use super::window::{Anchor, DraggableWindow};
use super::PointerSnapshot;
use crate::config::OverlayConfig;
use crate::data::logs::LogStore;
use crate::layout::{EguiMeasure, TextMeasure, GRAPH_LABEL_FONT_SIZE, WINDOW_PADDING};

const MIN_WIDTH: f32 = 100.0;

#[derive(Debug, Clone, PartialEq)]
pub struct LogLayout {
    pub persistent: String,
    /// Size of the persistent block; this is the draggable part of the window.
    pub persistent_size: Vec2,
    /// Transient texts with their vertical offset from the window's text origin.
    pub transient: Vec<(f32, String)>,
    pub content_size: Vec2,
    /// Oldest transient entries that did not fit on screen.
    pub overflow: usize,
}

/// Lay out the store's text. `max_y` is how far down (relative to the text
/// origin) transient entries may start before they count as off screen.
pub fn log_layout(logs: &LogStore, measure: &dyn TextMeasure, max_y: f32) -> LogLayout {
    let persistent = logs.persistent_lines().collect::<Vec<_>>().join("\n");
    let line_height = measure.text_size("").y;
    let mut persistent_size = if persistent.is_empty() {
        Vec2::ZERO
    } else {
        measure.text_size(&persistent)
    };
    persistent_size.x = persistent_size.x.max(MIN_WIDTH);

    let mut y = persistent_size.y + line_height;
    let mut width = persistent_size.x;
    let mut transient = Vec::new();
    let mut overflow = 0;
    let total = logs.transient_len();
    for (i, log) in logs.transient_newest_first().enumerate() {
        if y > max_y {
            overflow = total - i;
            break;
        }
        let size = measure.text_size(&log.text);
        width = width.max(size.x);
        transient.push((y, log.text.clone()));
        y += size.y;
    }

    LogLayout {
        persistent,
        persistent_size,
        transient,
        content_size: Vec2::new(width, y),
        overflow,
    }
}

pub struct LogWindow {
    window: DraggableWindow,
}

impl Default for LogWindow {
    fn default() -> Self {
        Self {
            window: DraggableWindow::new(Anchor::TopLeft),
        }
    }
}

impl LogWindow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.window.is_dragging()
    }

    pub fn show(
        &mut self,
        ctx: &Context,
        logs: &mut LogStore,
        config: &OverlayConfig,
        pointer: &PointerSnapshot,
        drag_in_progress: &mut bool,
    ) {
        if logs.is_empty() {
            return;
        }
        let screen = ctx.input(|i| i.content_rect());
        let measure = EguiMeasure::new(ctx);

        let top = self.window.rect().map_or(screen.top(), |r| r.top());
        let max_y = screen.bottom() - top - WINDOW_PADDING.y;
        let layout = log_layout(logs, &measure, max_y);
        if layout.overflow > 0 {
            logs.discard_oldest_transients(layout.overflow);
        }

        self.window
            .resize(layout.persistent_size + WINDOW_PADDING * 2.0, screen);
        self.window.handle_drag(pointer, screen, drag_in_progress);
        let Some(rect) = self.window.rect() else {
            return;
        };

        let painter = ctx.layer_painter(LayerId::new(Order::Foreground, Id::new("debug_overlay_logs")));
        let font = FontId::proportional(GRAPH_LABEL_FONT_SIZE);
        let background = Rect::from_min_size(rect.min, layout.content_size + WINDOW_PADDING * 2.0);
        painter.rect_filled(background, CornerRadius::ZERO, config.background_color);
        painter.rect_filled(rect, CornerRadius::ZERO, Color32::from_white_alpha(13));

        let origin = rect.min + WINDOW_PADDING;
        if !layout.persistent.is_empty() {
            painter.text(origin, Align2::LEFT_TOP, &layout.persistent, font.clone(), Color32::WHITE);
        }
        for (y, text) in &layout.transient {
            painter.text(
                Pos2::new(origin.x, origin.y + y),
                Align2::LEFT_TOP,
                text,
                font.clone(),
                Color32::WHITE,
            );
        }
    }
}
