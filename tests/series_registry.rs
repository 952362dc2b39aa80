use debug_overlay::{SeriesProperties, SeriesRegistry};
use egui::Color32;

fn props(label: &str, min: f32, max: f32, group: i32, auto_scale: bool) -> SeriesProperties {
    SeriesProperties {
        label: label.to_string(),
        min,
        max,
        group,
        color: Color32::LIGHT_BLUE,
        auto_scale,
    }
}

#[test]
fn capacity_three_keeps_the_last_three_samples() {
    let mut reg = SeriesRegistry::new(3);
    reg.set_properties("a", props("a", 0.0, 10.0, 0, false));
    for v in [1.0, 2.0, 3.0, 4.0] {
        reg.push("a", v);
    }
    let s = reg.get(&"a".into()).unwrap();
    assert_eq!((s.read(0), s.read(1), s.read(2)), (4.0, 3.0, 2.0));
    assert_eq!(s.raw_values(), &[4.0, 2.0, 3.0]);
}

#[test]
fn auto_scale_widens_bounds() {
    let mut reg = SeriesRegistry::new(8);
    reg.set_properties("sin", props("sin", -1.0, 1.0, 0, true));
    reg.push("sin", 5.0);
    let s = reg.get(&"sin".into()).unwrap();
    assert_eq!((s.min(), s.max()), (-1.0, 5.0));
    assert_eq!(s.max_label(), "5.00");
}

#[test]
fn fixed_bounds_clamp() {
    let mut reg = SeriesRegistry::new(8);
    reg.set_properties("fps", props("FPS", 0.0, 200.0, 2, false));
    reg.push("fps", -3.0);
    assert_eq!(reg.get(&"fps".into()).unwrap().read(0), 0.0);
}

#[test]
fn numeric_and_named_keys_are_distinct() {
    let mut reg = SeriesRegistry::new(4);
    reg.push(7u64, 0.1);
    reg.push("7", 0.2);
    assert_eq!(reg.len(), 2);
    assert_eq!(reg.get(&7u64.into()).unwrap().read(0), 0.1);
}

#[test]
fn frozen_registry_drops_samples_but_creates_series() {
    let mut reg = SeriesRegistry::new(4);
    reg.set_frozen(true);
    reg.push("a", 0.7);
    assert!(reg.contains(&"a".into()));
    assert_eq!(reg.get(&"a".into()).unwrap().read(0), 0.0);
    reg.set_frozen(false);
    reg.push("a", 0.7);
    assert_eq!(reg.get(&"a".into()).unwrap().read(0), 0.7);
}

#[test]
fn auto_created_series_get_distinct_palette_colors() {
    let mut reg = SeriesRegistry::new(4);
    reg.push("a", 0.0);
    reg.push("b", 0.0);
    let a = reg.get(&"a".into()).unwrap().color;
    let b = reg.get(&"b".into()).unwrap().color;
    assert_ne!(a, b);
}

#[test]
fn toggling_visibility_flips_flag() {
    let mut reg = SeriesRegistry::new(4);
    reg.push("a", 0.0);
    reg.toggle_visible(&"a".into());
    assert!(!reg.get(&"a".into()).unwrap().visible);
    reg.toggle_visible(&"a".into());
    assert!(reg.get(&"a".into()).unwrap().visible);
    reg.set_visible(&"a".into(), false);
    assert!(!reg.get(&"a".into()).unwrap().visible);
    reg.set_visible(&"ghost".into(), false);
}
