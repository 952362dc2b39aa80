//! Pixel metrics shared by the registry's label layout and the renderers.

use egui::{Color32, FontId, Vec2};

/// Font size of graph labels.
pub const GRAPH_LABEL_FONT_SIZE: f32 = 12.0;
/// Gap between label columns and around the label block.
pub const GRAPH_LABEL_PADDING: f32 = 5.0;
/// Gap between the label block and the graph block, and between groups.
pub const GRAPH_BLOCK_PADDING: f32 = 3.0;
/// Width of the scrubber's value tooltip.
pub const SCRUBBER_BACKGROUND_WIDTH: f32 = 55.0;
/// Portion of a window that must stay on screen while dragging.
pub const OUT_OF_SCREEN_CLAMP_PADDING: f32 = 30.0;
/// Inner padding of the log window.
pub const WINDOW_PADDING: Vec2 = Vec2::new(5.0, 5.0);

/// Measures rendered text.
///
/// The registry only needs widths to size its label column; keeping this
/// behind a trait lets the layout run without a live egui context.
pub trait TextMeasure {
    fn text_size(&self, text: &str) -> Vec2;

    fn text_width(&self, text: &str) -> f32 {
        self.text_size(text).x
    }
}

/// Fixed advance per character and per line. Used headless and in tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedMeasure {
    pub char_width: f32,
    pub line_height: f32,
}

impl Default for FixedMeasure {
    fn default() -> Self {
        Self {
            char_width: 7.0,
            line_height: 14.0,
        }
    }
}

impl TextMeasure for FixedMeasure {
    fn text_size(&self, text: &str) -> Vec2 {
        let lines = text.lines().count().max(1);
        let widest = text.lines().map(|l| l.chars().count()).max().unwrap_or(0);
        Vec2::new(
            widest as f32 * self.char_width,
            lines as f32 * self.line_height,
        )
    }
}

/// Measures with the fonts of a live egui context.
pub struct EguiMeasure<'a> {
    pub ctx: &'a egui::Context,
    pub font: FontId,
}

impl<'a> EguiMeasure<'a> {
    pub fn new(ctx: &'a egui::Context) -> Self {
        Self {
            ctx,
            font: FontId::proportional(GRAPH_LABEL_FONT_SIZE),
        }
    }
}

impl TextMeasure for EguiMeasure<'_> {
    fn text_size(&self, text: &str) -> Vec2 {
        self.ctx.fonts_mut(|f| {
            f.layout_no_wrap(text.to_owned(), self.font.clone(), Color32::WHITE)
                .rect
                .size()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_measure_counts_widest_line() {
        let m = FixedMeasure::default();
        assert_eq!(m.text_size("abc"), Vec2::new(21.0, 14.0));
        assert_eq!(m.text_size("a\nabcd"), Vec2::new(28.0, 28.0));
        assert_eq!(m.text_size(""), Vec2::new(0.0, 14.0));
    }
}
