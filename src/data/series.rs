//! Series: a fixed-capacity rolling buffer of samples plus its display metadata.

use std::fmt;

use egui::ecolor::Hsva;
use egui::Color32;

use crate::data::inspect::BindingKey;

/// Identity of a series in the registry.
///
/// Callers usually key series by name; the binder keys them by the
/// (object, member) pair they are bound to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SeriesKey {
    Name(String),
    Id(u64),
    Binding(BindingKey),
}

impl SeriesKey {
    pub fn is_binding(&self) -> bool {
        matches!(self, SeriesKey::Binding(_))
    }
}

impl fmt::Display for SeriesKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeriesKey::Name(n) => write!(f, "{n}"),
            SeriesKey::Id(id) => write!(f, "{id}"),
            SeriesKey::Binding(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for SeriesKey {
    fn from(s: &str) -> Self {
        SeriesKey::Name(s.to_string())
    }
}

impl From<String> for SeriesKey {
    fn from(s: String) -> Self {
        SeriesKey::Name(s)
    }
}

impl From<u64> for SeriesKey {
    fn from(id: u64) -> Self {
        SeriesKey::Id(id)
    }
}

impl From<BindingKey> for SeriesKey {
    fn from(b: BindingKey) -> Self {
        SeriesKey::Binding(b)
    }
}

/// One graphed quantity.
///
/// Samples live in a circular buffer whose capacity is fixed at creation.
/// Unless auto-scaling, every stored sample is clamped into `[min, max]`, so
/// the renderer never has to clip.
#[derive(Debug, Clone)]
pub struct Series {
    name: String,
    group: i32,
    min: f32,
    max: f32,
    min_label: String,
    max_label: String,
    values: Box<[f32]>,
    cursor: usize,
    layout_dirty: bool,
    pub color: Color32,
    pub auto_scale: bool,
    pub visible: bool,
}

impl Series {
    pub const DEFAULT_NAME: &'static str = "<uninitialized>";

    /// Create an empty series with bounds `[0, 1]`.
    ///
    /// A capacity of zero is bumped to one so `read` always has a slot.
    pub fn new(capacity: usize, group: i32) -> Self {
        let mut s = Self {
            name: Self::DEFAULT_NAME.to_string(),
            group,
            min: 0.0,
            max: 1.0,
            min_label: String::new(),
            max_label: String::new(),
            values: vec![0.0; capacity.max(1)].into_boxed_slice(),
            cursor: 0,
            layout_dirty: true,
            color: Color32::WHITE,
            auto_scale: false,
            visible: true,
        };
        s.set_bounds(0.0, 1.0);
        s
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.layout_dirty = true;
    }

    pub fn group(&self) -> i32 {
        self.group
    }

    pub fn min(&self) -> f32 {
        self.min
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    pub fn min_label(&self) -> &str {
        &self.min_label
    }

    pub fn max_label(&self) -> &str {
        &self.max_label
    }

    pub fn capacity(&self) -> usize {
        self.values.len()
    }

    /// Physical write position of the next sample.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Overwrite the bounds. `min <= max` is the caller's business.
    pub fn set_bounds(&mut self, min: f32, max: f32) {
        self.min = min;
        self.max = max;
        self.min_label = format!("{min:.2}");
        self.max_label = format!("{max:.2}");
        self.layout_dirty = true;
    }

    /// Store a sample, widening the bounds (auto-scale) or clamping into them.
    ///
    /// Non-finite samples never widen the bounds; they are clamped like any
    /// out-of-range value (NaN lands on `min`).
    pub fn push(&mut self, value: f32) {
        let widen = value.is_finite() && (value > self.max || value < self.min);
        let value = if self.auto_scale && widen {
            self.set_bounds(value.min(self.min), value.max(self.max));
            value
        } else {
            // f32::clamp panics on inverted bounds
            value.max(self.min).min(self.max)
        };
        self.values[self.cursor] = value;
        self.cursor = (self.cursor + 1) % self.values.len();
    }

    /// Sample `offset` steps before the newest one (0 = newest), wrapping.
    pub fn read(&self, offset: usize) -> f32 {
        let cap = self.values.len();
        let idx = (self.cursor + cap - 1 - offset % cap) % cap;
        self.values[idx]
    }

    /// Zero every sample. Bounds and cursor are left alone.
    pub fn clear(&mut self) {
        self.values.iter_mut().for_each(|v| *v = 0.0);
    }

    /// Samples oldest to newest.
    pub fn iter_chronological(&self) -> impl Iterator<Item = f32> + '_ {
        let (newer, older) = self.values.split_at(self.cursor);
        older.iter().chain(newer.iter()).copied()
    }

    /// Samples in physical storage order.
    pub fn raw_values(&self) -> &[f32] {
        &self.values
    }

    /// Returns whether displayed text may have changed since the last call.
    pub fn take_layout_dirty(&mut self) -> bool {
        std::mem::take(&mut self.layout_dirty)
    }

    /// Allocate a distinct color for the given creation index.
    pub fn alloc_color(index: usize) -> Color32 {
        const PALETTE: [Color32; 10] = [
            Color32::from_rgb(31, 119, 180),
            Color32::from_rgb(255, 127, 14),
            Color32::from_rgb(44, 160, 44),
            Color32::from_rgb(214, 39, 40),
            Color32::from_rgb(148, 103, 189),
            Color32::from_rgb(140, 86, 75),
            Color32::from_rgb(227, 119, 194),
            Color32::from_rgb(127, 127, 127),
            Color32::from_rgb(188, 189, 34),
            Color32::from_rgb(23, 190, 207),
        ];
        PALETTE[index % PALETTE.len()]
    }

    /// Color used for labels: dimmed when hidden, brightened when hovered.
    pub fn display_color(&self, highlighted: bool) -> Color32 {
        if !highlighted && self.visible {
            return self.color;
        }
        let mut hsva = Hsva::from(self.color);
        if !self.visible {
            hsva.v *= 0.3;
        }
        if highlighted {
            hsva.v *= if hsva.v > 0.9 { 0.7 } else { 1.2 };
        }
        hsva.v = hsva.v.min(1.0);
        Color32::from(hsva)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series_with_bounds(cap: usize, min: f32, max: f32) -> Series {
        let mut s = Series::new(cap, 0);
        s.set_bounds(min, max);
        s
    }

    #[test]
    fn new_series_defaults() {
        let s = Series::new(4, 2);
        assert_eq!(s.name(), Series::DEFAULT_NAME);
        assert_eq!(s.group(), 2);
        assert_eq!((s.min(), s.max()), (0.0, 1.0));
        assert_eq!(s.min_label(), "0.00");
        assert_eq!(s.max_label(), "1.00");
        assert!(s.visible);
        assert!(!s.auto_scale);
        assert_eq!(s.raw_values(), &[0.0; 4]);
    }

    #[test]
    fn zero_capacity_is_bumped_to_one() {
        let mut s = Series::new(0, 0);
        assert_eq!(s.capacity(), 1);
        s.push(0.5);
        assert_eq!(s.read(0), 0.5);
    }

    #[test]
    fn capacity_three_keeps_last_three() {
        let mut s = series_with_bounds(3, 0.0, 5.0);
        for v in [1.0, 2.0, 3.0, 4.0] {
            s.push(v);
        }
        assert_eq!(s.read(0), 4.0);
        assert_eq!(s.read(1), 3.0);
        assert_eq!(s.read(2), 2.0);
        // wraps back to the newest
        assert_eq!(s.read(3), 4.0);
    }

    #[test]
    fn clamps_without_auto_scale() {
        let mut s = series_with_bounds(4, -1.0, 1.0);
        s.push(7.0);
        assert_eq!(s.read(0), 1.0);
        s.push(-3.0);
        assert_eq!(s.read(0), -1.0);
        assert_eq!((s.min(), s.max()), (-1.0, 1.0));
    }

    #[test]
    fn auto_scale_widens_bounds() {
        let mut s = series_with_bounds(4, -1.0, 1.0);
        s.auto_scale = true;
        s.take_layout_dirty();
        s.push(5.0);
        assert_eq!((s.min(), s.max()), (-1.0, 5.0));
        assert_eq!(s.read(0), 5.0);
        assert_eq!(s.max_label(), "5.00");
        assert!(s.take_layout_dirty());

        s.push(0.0);
        assert!(!s.take_layout_dirty());
        s.push(-2.5);
        assert_eq!((s.min(), s.max()), (-2.5, 5.0));
    }

    #[test]
    fn auto_scale_ignores_non_finite_samples() {
        let mut s = series_with_bounds(4, -1.0, 1.0);
        s.auto_scale = true;
        s.push(f32::INFINITY);
        assert_eq!((s.min(), s.max()), (-1.0, 1.0));
        assert_eq!(s.read(0), 1.0);
        s.push(f32::NEG_INFINITY);
        assert_eq!(s.read(0), -1.0);
        s.push(f32::NAN);
        assert_eq!(s.read(0), -1.0);
        assert_eq!((s.min(), s.max()), (-1.0, 1.0));
    }

    #[test]
    fn clear_zeroes_samples_but_keeps_cursor() {
        let mut s = series_with_bounds(3, 0.0, 10.0);
        s.push(4.0);
        s.push(5.0);
        let cursor = s.cursor();
        s.clear();
        assert_eq!(s.raw_values(), &[0.0; 3]);
        assert_eq!(s.cursor(), cursor);
        assert_eq!((s.min(), s.max()), (0.0, 10.0));
    }

    #[test]
    fn chronological_iteration_is_oldest_first() {
        let mut s = series_with_bounds(3, 0.0, 10.0);
        for v in [1.0, 2.0, 3.0, 4.0] {
            s.push(v);
        }
        assert_eq!(s.raw_values(), &[4.0, 2.0, 3.0]);
        let chrono: Vec<f32> = s.iter_chronological().collect();
        assert_eq!(chrono, vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn set_name_marks_layout_dirty() {
        let mut s = Series::new(2, 0);
        s.take_layout_dirty();
        s.set_name("fps");
        assert!(s.take_layout_dirty());
        assert!(!s.take_layout_dirty());
    }

    #[test]
    fn display_color_dims_hidden_series() {
        let mut s = Series::new(2, 0);
        s.color = Color32::from_rgb(200, 100, 50);
        assert_eq!(s.display_color(false), s.color);
        s.visible = false;
        let dimmed = s.display_color(false);
        assert!(dimmed.r() < s.color.r());
    }

    #[test]
    fn key_display_and_conversions() {
        assert_eq!(SeriesKey::from("fps").to_string(), "fps");
        assert_eq!(SeriesKey::from(7u64).to_string(), "7");
        assert!(!SeriesKey::from("fps").is_binding());
    }
}
