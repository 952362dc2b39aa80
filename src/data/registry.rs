//! SeriesRegistry: owns every series, their creation order and their groups.

use std::collections::{BTreeMap, HashMap};

use egui::Color32;

use crate::data::series::{Series, SeriesKey};
use crate::layout::{TextMeasure, GRAPH_LABEL_PADDING};

/// Display properties applied by [`SeriesRegistry::set_properties`].
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesProperties {
    pub label: String,
    /// Value at the bottom of the graph.
    pub min: f32,
    /// Value at the top of the graph.
    pub max: f32,
    /// Vertical placement order on screen.
    pub group: i32,
    pub color: Color32,
    pub auto_scale: bool,
}

impl Default for SeriesProperties {
    fn default() -> Self {
        Self {
            label: Series::DEFAULT_NAME.to_string(),
            min: 0.0,
            max: 1.0,
            group: 0,
            color: Color32::WHITE,
            auto_scale: false,
        }
    }
}

/// Key → series mapping plus the derived group layout.
///
/// This is the only place series are created or destroyed. Groups are kept in
/// a `BTreeMap` so iteration is in ascending group order; a group disappears
/// as soon as its last member is removed.
pub struct SeriesRegistry {
    capacity: usize,
    series: HashMap<SeriesKey, Series>,
    order: Vec<SeriesKey>,
    groups: BTreeMap<i32, Vec<SeriesKey>>,
    created: usize,
    frozen: bool,
    layout_dirty: bool,
    label_width: f32,
}

impl SeriesRegistry {
    /// `capacity` is the sample count of every series created from now on.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            series: HashMap::new(),
            order: Vec::new(),
            groups: BTreeMap::new(),
            created: 0,
            frozen: false,
            layout_dirty: true,
            label_width: GRAPH_LABEL_PADDING * 2.0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn contains(&self, key: &SeriesKey) -> bool {
        self.series.contains_key(key)
    }

    pub fn get(&self, key: &SeriesKey) -> Option<&Series> {
        self.series.get(key)
    }

    pub fn get_mut(&mut self, key: &SeriesKey) -> Option<&mut Series> {
        self.series.get_mut(key)
    }

    /// Keys in creation order.
    pub fn keys(&self) -> &[SeriesKey] {
        &self.order
    }

    /// Series in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (&SeriesKey, &Series)> {
        self.order
            .iter()
            .filter_map(|k| self.series.get(k).map(|s| (k, s)))
    }

    /// Groups in ascending id order, members in insertion order.
    pub fn groups(&self) -> impl Iterator<Item = (i32, &[SeriesKey])> {
        self.groups.iter().map(|(g, keys)| (*g, keys.as_slice()))
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Palette color the next created series would get.
    pub fn next_color(&self) -> Color32 {
        Series::alloc_color(self.created)
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// While frozen, pushes are dropped (series are still auto-created).
    pub fn set_frozen(&mut self, frozen: bool) {
        self.frozen = frozen;
    }

    /// Replace any series under `key` with a fresh one carrying `props`.
    pub fn set_properties(&mut self, key: impl Into<SeriesKey>, props: SeriesProperties) {
        let key = key.into();
        self.remove(&key);

        let mut series = Series::new(self.capacity, props.group);
        series.set_name(props.label);
        series.set_bounds(props.min, props.max);
        series.color = props.color;
        series.auto_scale = props.auto_scale;
        self.insert(key, series);
    }

    /// Push a sample, creating a default series on first use.
    pub fn push(&mut self, key: impl Into<SeriesKey>, value: f32) {
        let key = key.into();
        if !self.series.contains_key(&key) {
            let mut series = Series::new(self.capacity, 0);
            series.set_name(key.to_string());
            series.color = self.next_color();
            self.insert(key.clone(), series);
        }
        if self.frozen {
            return;
        }
        if let Some(series) = self.series.get_mut(&key) {
            series.push(value);
        }
    }

    /// Remove a series and its group membership. Unknown keys are ignored.
    pub fn remove(&mut self, key: &SeriesKey) -> Option<Series> {
        let series = self.series.remove(key)?;
        self.order.retain(|k| k != key);
        let group = series.group();
        if let Some(members) = self.groups.get_mut(&group) {
            members.retain(|k| k != key);
            if members.is_empty() {
                self.groups.remove(&group);
            }
        }
        self.layout_dirty = true;
        Some(series)
    }

    /// Remove every series whose key matches `pred`.
    pub fn remove_where(&mut self, mut pred: impl FnMut(&SeriesKey) -> bool) {
        let doomed: Vec<SeriesKey> = self.order.iter().filter(|k| pred(k)).cloned().collect();
        for key in doomed {
            self.remove(&key);
        }
    }

    /// Zero a series' samples. Unknown keys are ignored.
    pub fn clear(&mut self, key: &SeriesKey) {
        if let Some(series) = self.series.get_mut(key) {
            series.clear();
        }
    }

    pub fn set_visible(&mut self, key: &SeriesKey, visible: bool) {
        if let Some(series) = self.series.get_mut(key) {
            series.visible = visible;
        }
    }

    pub fn toggle_visible(&mut self, key: &SeriesKey) {
        if let Some(series) = self.series.get_mut(key) {
            series.visible = !series.visible;
        }
    }

    /// Width of the label column, recomputed only when displayed text changed.
    pub fn label_width(&mut self, measure: &dyn TextMeasure) -> f32 {
        let mut dirty = std::mem::take(&mut self.layout_dirty);
        for series in self.series.values_mut() {
            dirty |= series.take_layout_dirty();
        }
        if dirty {
            self.label_width = self.compute_label_width(measure);
        }
        self.label_width
    }

    /// Last computed label column width, without recomputing.
    pub fn cached_label_width(&self) -> f32 {
        self.label_width
    }

    pub fn is_layout_dirty(&self) -> bool {
        self.layout_dirty
    }

    fn compute_label_width(&self, measure: &dyn TextMeasure) -> f32 {
        let mut width: f32 = 0.0;
        for members in self.groups.values() {
            let mut min_max_width = GRAPH_LABEL_PADDING;
            for series in members.iter().filter_map(|k| self.series.get(k)) {
                width = width.max(measure.text_width(series.name()));
                let column = measure
                    .text_width(series.min_label())
                    .max(measure.text_width(series.max_label()));
                min_max_width += column + GRAPH_LABEL_PADDING;
            }
            width = width.max(min_max_width);
        }
        width + GRAPH_LABEL_PADDING * 2.0
    }

    fn insert(&mut self, key: SeriesKey, series: Series) {
        self.groups
            .entry(series.group())
            .or_default()
            .push(key.clone());
        self.order.push(key.clone());
        self.series.insert(key, series);
        self.created += 1;
        self.layout_dirty = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::FixedMeasure;

    fn props(label: &str, min: f32, max: f32, group: i32, auto_scale: bool) -> SeriesProperties {
        SeriesProperties {
            label: label.to_string(),
            min,
            max,
            group,
            color: Color32::RED,
            auto_scale,
        }
    }

    #[test]
    fn push_auto_vivifies_default_series() {
        let mut reg = SeriesRegistry::new(8);
        reg.push("fps", 0.5);
        let s = reg.get(&"fps".into()).unwrap();
        assert_eq!((s.min(), s.max()), (0.0, 1.0));
        assert_eq!(s.group(), 0);
        assert_eq!(s.name(), "fps");
        assert_eq!(s.read(0), 0.5);
    }

    #[test]
    fn set_properties_then_push_clamps() {
        let mut reg = SeriesRegistry::new(8);
        reg.set_properties("fps", props("FPS", 0.0, 200.0, 2, false));
        reg.push("fps", 250.0);
        assert_eq!(reg.get(&"fps".into()).unwrap().read(0), 200.0);

        reg.set_properties("sin", props("Sin", -1.0, 1.0, 3, true));
        reg.push("sin", 5.0);
        let s = reg.get(&"sin".into()).unwrap();
        assert_eq!(s.read(0), 5.0);
        assert_eq!((s.min(), s.max()), (-1.0, 5.0));
    }

    #[test]
    fn set_properties_is_destructive() {
        let mut reg = SeriesRegistry::new(4);
        reg.set_properties("a", props("A", 0.0, 10.0, 1, false));
        reg.push("a", 7.0);
        reg.set_properties("a", props("A", 0.0, 10.0, 2, false));

        let s = reg.get(&"a".into()).unwrap();
        assert_eq!(s.read(0), 0.0);
        assert_eq!(s.group(), 2);
        let groups: Vec<i32> = reg.groups().map(|(g, _)| g).collect();
        assert_eq!(groups, vec![2]);
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn remove_then_push_recreates_with_defaults() {
        let mut reg = SeriesRegistry::new(4);
        reg.set_properties("a", props("A", -5.0, 5.0, 3, false));
        assert!(reg.remove(&"a".into()).is_some());
        assert_eq!(reg.group_count(), 0);

        reg.push("a", 0.25);
        let s = reg.get(&"a".into()).unwrap();
        assert_eq!((s.min(), s.max()), (0.0, 1.0));
        assert_eq!(s.group(), 0);
    }

    #[test]
    fn remove_and_clear_unknown_keys_are_noops() {
        let mut reg = SeriesRegistry::new(4);
        assert!(reg.remove(&"ghost".into()).is_none());
        reg.clear(&"ghost".into());
        assert!(reg.is_empty());
    }

    #[test]
    fn groups_iterate_in_ascending_order() {
        let mut reg = SeriesRegistry::new(4);
        reg.set_properties("c", props("C", 0.0, 1.0, 5, false));
        reg.set_properties("a", props("A", 0.0, 1.0, -1, false));
        reg.set_properties("b", props("B", 0.0, 1.0, 5, false));

        let groups: Vec<(i32, usize)> = reg.groups().map(|(g, k)| (g, k.len())).collect();
        assert_eq!(groups, vec![(-1, 1), (5, 2)]);
        let order: Vec<String> = reg.keys().iter().map(|k| k.to_string()).collect();
        assert_eq!(order, vec!["c", "a", "b"]);
    }

    #[test]
    fn frozen_registry_creates_but_drops_samples() {
        let mut reg = SeriesRegistry::new(4);
        reg.set_frozen(true);
        reg.push("x", 0.75);
        assert!(reg.contains(&"x".into()));
        assert_eq!(reg.get(&"x".into()).unwrap().read(0), 0.0);
        reg.set_frozen(false);
        reg.push("x", 0.75);
        assert_eq!(reg.get(&"x".into()).unwrap().read(0), 0.75);
    }

    #[test]
    fn label_width_covers_names_and_min_max_columns() {
        let m = FixedMeasure {
            char_width: 1.0,
            line_height: 1.0,
        };
        let mut reg = SeriesRegistry::new(4);
        assert_eq!(reg.label_width(&m), 10.0);

        // "0.00"/"1.00" are 4 wide: 5 + (4 + 5) = 14 beats the 2-char name.
        reg.set_properties("a", props("ab", 0.0, 1.0, 0, false));
        assert_eq!(reg.label_width(&m), 14.0 + 10.0);

        // Second series in the same group adds another min/max column.
        reg.set_properties("b", props("b", -100.0, 1.0, 0, false));
        assert_eq!(reg.label_width(&m), 5.0 + 9.0 + 12.0 + 10.0);

        // A long name wins.
        reg.set_properties("c", props("abcdefghijklmnopqrstuvwxyz0123", 0.0, 1.0, 1, false));
        assert_eq!(reg.label_width(&m), 30.0 + 10.0);
    }

    #[test]
    fn label_width_tracks_auto_scaled_bounds() {
        let m = FixedMeasure {
            char_width: 1.0,
            line_height: 1.0,
        };
        let mut reg = SeriesRegistry::new(4);
        reg.set_properties("a", props("a", 0.0, 1.0, 0, true));
        let before = reg.label_width(&m);
        reg.push("a", 12345.0);
        assert!(reg.label_width(&m) > before);
    }

    #[test]
    fn remove_where_only_touches_matching_keys() {
        let mut reg = SeriesRegistry::new(4);
        reg.push("keep", 0.0);
        reg.push(7u64, 0.0);
        reg.remove_where(|k| matches!(k, SeriesKey::Id(_)));
        assert_eq!(reg.len(), 1);
        assert!(reg.contains(&"keep".into()));
    }
}
