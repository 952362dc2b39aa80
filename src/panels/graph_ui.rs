//! Graph window: one block per group with a label column, the line strips and
//! a value scrubber.

use egui::{Align2, Context, CornerRadius, FontId, Id, LayerId, Order, Painter, Pos2, Rect, Stroke, Vec2};

use super::window::{Anchor, DraggableWindow};
use super::PointerSnapshot;
use crate::config::OverlayConfig;
use crate::data::registry::SeriesRegistry;
use crate::data::series::{Series, SeriesKey};
use crate::layout::{
    EguiMeasure, TextMeasure, GRAPH_BLOCK_PADDING, GRAPH_LABEL_FONT_SIZE, GRAPH_LABEL_PADDING,
    SCRUBBER_BACKGROUND_WIDTH,
};

/// Click-to-toggle state for series labels.
///
/// Pressing on a label arms it; releasing while still over the same label
/// fires. Leaving the label first disarms it.
#[derive(Debug, Default)]
pub struct LabelToggle {
    armed: Option<SeriesKey>,
}

impl LabelToggle {
    /// Feed one frame. Returns the label whose visibility should flip.
    pub fn update(&mut self, hovered: Option<&SeriesKey>, primary_down: bool) -> Option<SeriesKey> {
        match hovered {
            Some(key) if primary_down => {
                self.armed = Some(key.clone());
                None
            }
            Some(key) if self.armed.as_ref() == Some(key) => {
                self.armed = None;
                Some(key.clone())
            }
            _ => {
                self.armed = None;
                None
            }
        }
    }

    pub fn armed(&self) -> Option<&SeriesKey> {
        self.armed.as_ref()
    }
}

/// Screen rectangles of one group.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupLayout {
    pub group: i32,
    pub label_rect: Rect,
    pub graph_rect: Rect,
}

/// Where one series' texts go inside its group's label column.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelSlot {
    pub key: SeriesKey,
    pub name_rect: Rect,
    pub max_pos: Pos2,
    pub min_pos: Pos2,
}

pub fn window_size(label_width: f32, graph_width: f32, graph_height: f32, groups: usize) -> Vec2 {
    Vec2::new(
        label_width + GRAPH_BLOCK_PADDING + graph_width,
        (graph_height + GRAPH_BLOCK_PADDING) * groups as f32,
    )
}

/// Stack groups top to bottom starting at `origin`.
pub fn group_layouts(
    origin: Pos2,
    label_width: f32,
    graph_width: f32,
    graph_height: f32,
    groups: impl IntoIterator<Item = i32>,
) -> Vec<GroupLayout> {
    groups
        .into_iter()
        .enumerate()
        .map(|(n, group)| {
            let top = origin.y + n as f32 * (graph_height + GRAPH_BLOCK_PADDING);
            GroupLayout {
                group,
                label_rect: Rect::from_min_size(
                    Pos2::new(origin.x, top),
                    Vec2::new(label_width, graph_height),
                ),
                graph_rect: Rect::from_min_size(
                    Pos2::new(origin.x + label_width + GRAPH_BLOCK_PADDING, top),
                    Vec2::new(graph_width, graph_height),
                ),
            }
        })
        .collect()
}

/// Names are right-aligned and stacked from the top; each series also gets a
/// min/max column, columns growing leftwards from the right edge.
pub fn label_slots(
    registry: &SeriesRegistry,
    keys: &[SeriesKey],
    layout: &GroupLayout,
    measure: &dyn TextMeasure,
) -> Vec<LabelSlot> {
    let right = layout.label_rect.right() - GRAPH_LABEL_PADDING;
    let mut name_y = layout.label_rect.top() + GRAPH_LABEL_PADDING;
    let mut column_x = layout.label_rect.right() - GRAPH_LABEL_PADDING * 2.0;

    let mut slots = Vec::with_capacity(keys.len());
    for key in keys {
        let Some(series) = registry.get(key) else {
            continue;
        };
        let size = measure.text_size(series.name());
        let name_rect = Rect::from_min_size(Pos2::new(right - size.x, name_y), size);
        name_y += size.y;

        let column = measure
            .text_width(series.min_label())
            .max(measure.text_width(series.max_label()));
        column_x -= column + GRAPH_LABEL_PADDING;

        slots.push(LabelSlot {
            key: key.clone(),
            name_rect,
            max_pos: Pos2::new(column_x, layout.label_rect.top()),
            min_pos: Pos2::new(column_x, layout.label_rect.bottom()),
        });
    }
    slots
}

/// Line strip of a series inside `rect`: oldest sample at the left edge,
/// newest at the right, `min` at the bottom and `max` at the top.
pub fn line_points(series: &Series, rect: Rect) -> Vec<Pos2> {
    let n = series.capacity();
    if n < 2 {
        return Vec::new();
    }
    let range = series.max() - series.min();
    let step = rect.width() / (n - 1) as f32;
    series
        .iter_chronological()
        .enumerate()
        .map(|(i, v)| {
            let t = if range > 0.0 {
                ((v - series.min()) / range).clamp(0.0, 1.0)
            } else {
                0.5
            };
            Pos2::new(rect.left() + i as f32 * step, rect.bottom() - t * rect.height())
        })
        .collect()
}

/// Offset from the newest sample of the point drawn at screen `x`.
pub fn sample_offset_at(x: f32, graph_rect: Rect, capacity: usize) -> usize {
    if capacity < 2 || graph_rect.width() <= 0.0 {
        return 0;
    }
    let last = (capacity - 1) as f32;
    let t = (graph_rect.right() - x) / graph_rect.width();
    (t * last).round().clamp(0.0, last) as usize
}

/// Background behind the scrubber values; flips to the left of the line near
/// the right edge.
pub fn scrubber_rect(x: f32, graph_rect: Rect) -> Rect {
    let left = if x > graph_rect.right() - SCRUBBER_BACKGROUND_WIDTH {
        x - SCRUBBER_BACKGROUND_WIDTH
    } else {
        x
    };
    Rect::from_min_size(
        Pos2::new(left, graph_rect.top()),
        Vec2::new(SCRUBBER_BACKGROUND_WIDTH, graph_rect.height()),
    )
}

pub struct GraphWindow {
    window: DraggableWindow,
    toggle: LabelToggle,
    primary_held: bool,
}

impl Default for GraphWindow {
    fn default() -> Self {
        Self {
            window: DraggableWindow::new(Anchor::TopRight),
            toggle: LabelToggle::default(),
            primary_held: false,
        }
    }
}

impl GraphWindow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the primary button was down during the last drawn frame.
    pub fn primary_held(&self) -> bool {
        self.primary_held
    }

    pub fn is_dragging(&self) -> bool {
        self.window.is_dragging()
    }

    pub fn show(
        &mut self,
        ctx: &Context,
        registry: &mut SeriesRegistry,
        config: &OverlayConfig,
        pointer: &PointerSnapshot,
        drag_in_progress: &mut bool,
    ) {
        self.primary_held = pointer.primary_down;
        if registry.group_count() == 0 {
            return;
        }

        let measure = EguiMeasure::new(ctx);
        let label_width = registry.label_width(&measure);
        let graph_width = config.graph_width as f32;
        let groups: Vec<(i32, Vec<SeriesKey>)> = registry
            .groups()
            .map(|(g, keys)| (g, keys.to_vec()))
            .collect();

        let screen = ctx.input(|i| i.content_rect());
        let size = window_size(label_width, graph_width, config.graph_height, groups.len());
        self.window.resize(size, screen);
        self.window.handle_drag(pointer, screen, drag_in_progress);
        let Some(rect) = self.window.rect() else {
            return;
        };

        let layouts = group_layouts(
            rect.min,
            label_width,
            graph_width,
            config.graph_height,
            groups.iter().map(|(g, _)| *g),
        );
        let slots: Vec<Vec<LabelSlot>> = layouts
            .iter()
            .zip(&groups)
            .map(|(layout, (_, keys))| label_slots(registry, keys, layout, &measure))
            .collect();

        let hovered = pointer.pos.and_then(|p| {
            slots
                .iter()
                .flatten()
                .find(|s| s.name_rect.contains(p))
                .map(|s| s.key.clone())
        });
        if let Some(key) = self.toggle.update(hovered.as_ref(), pointer.primary_down) {
            registry.toggle_visible(&key);
        }

        let painter = ctx.layer_painter(LayerId::new(Order::Foreground, Id::new("debug_overlay_graphs")));
        let font = FontId::proportional(GRAPH_LABEL_FONT_SIZE);

        for ((layout, (_, keys)), group_slots) in layouts.iter().zip(&groups).zip(&slots) {
            painter.rect_filled(layout.label_rect, CornerRadius::ZERO, config.background_color);
            painter.rect_filled(layout.graph_rect, CornerRadius::ZERO, config.background_color);

            for slot in group_slots {
                let Some(series) = registry.get(&slot.key) else {
                    continue;
                };
                let color = series.display_color(hovered.as_ref() == Some(&slot.key));
                painter.text(slot.name_rect.min, Align2::LEFT_TOP, series.name(), font.clone(), color);
                painter.text(slot.max_pos, Align2::LEFT_TOP, series.max_label(), font.clone(), color);
                painter.text(slot.min_pos, Align2::LEFT_BOTTOM, series.min_label(), font.clone(), color);
                if series.visible {
                    painter.line(line_points(series, layout.graph_rect), Stroke::new(1.0, series.color));
                }
            }

            if let Some(p) = pointer.pos.filter(|p| layout.graph_rect.contains(*p)) {
                if pointer.primary_down && !registry.is_frozen() {
                    registry.set_frozen(true);
                }
                draw_scrubber(&painter, &font, registry, keys, layout, p.x, config);
            }
        }
    }
}

fn draw_scrubber(
    painter: &Painter,
    font: &FontId,
    registry: &SeriesRegistry,
    keys: &[SeriesKey],
    layout: &GroupLayout,
    x: f32,
    config: &OverlayConfig,
) {
    let back = scrubber_rect(x, layout.graph_rect);
    painter.rect_filled(back, CornerRadius::ZERO, config.background_color);
    painter.line_segment(
        [
            Pos2::new(x, layout.graph_rect.top()),
            Pos2::new(x, layout.graph_rect.bottom()),
        ],
        Stroke::new(1.0, config.scrubber_color),
    );

    let mut pos = back.min + Vec2::new(GRAPH_LABEL_PADDING, GRAPH_LABEL_PADDING);
    for series in keys.iter().filter_map(|k| registry.get(k)) {
        let offset = sample_offset_at(x, layout.graph_rect, series.capacity());
        let text = format!("{:.3}", series.read(offset));
        let drawn = painter.text(pos, Align2::LEFT_TOP, text, font.clone(), series.color);
        pos.y += drawn.height().max(1.0);
    }
}
