use debug_overlay::{DebugOverlay, Error, OverlayConfig};
use egui::Color32;

#[test]
fn config_file_round_trip() {
    let dir = std::env::temp_dir().join(format!("debug_overlay_cfg_{}", std::process::id()));
    let path = dir.join("nested").join("config.yaml");
    let cfg = OverlayConfig {
        enable_graphs: false,
        scrubber_color: Color32::from_rgba_unmultiplied(1, 2, 3, 4),
        graph_height: 64.0,
        transient_log_lifetime: 2.5,
        ..Default::default()
    };
    cfg.save_to_path(&path).unwrap();
    let loaded = OverlayConfig::load_from_path(&path).unwrap();
    assert_eq!(loaded, cfg);
    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn missing_config_file_is_an_io_error() {
    let path = std::env::temp_dir().join("debug_overlay_missing_cfg.yaml");
    assert!(matches!(
        OverlayConfig::load_from_path(&path),
        Err(Error::Io(_))
    ));
}

#[test]
fn overlay_capacity_follows_graph_width() {
    let mut overlay = DebugOverlay::new(OverlayConfig {
        graph_width: 42,
        ..Default::default()
    });
    overlay.graph("x", 0.0);
    assert_eq!(overlay.registry().get(&"x".into()).unwrap().capacity(), 42);
}

#[test]
fn persistent_log_api() {
    let mut overlay = DebugOverlay::default();
    overlay.log_persistent(1u64, "one");
    overlay.log_persistent("two", "two");
    overlay.log_persistent(1u64, "uno");
    let lines: Vec<&str> = overlay.logs().persistent_lines().collect();
    assert_eq!(lines, vec!["uno", "two"]);
    overlay.remove_persistent(1u64);
    overlay.clear_persistent();
    assert!(overlay.logs().is_empty());
}

#[test]
fn remove_and_clear_graph() {
    let mut overlay = DebugOverlay::default();
    overlay.set_graph_properties("a", "A", -5.0, 5.0, 3, Color32::GOLD, false);
    overlay.graph("a", 2.0);
    overlay.clear_graph("a");
    assert_eq!(overlay.registry().get(&"a".into()).unwrap().read(0), 0.0);

    overlay.remove_graph("a");
    overlay.graph("a", 0.5);
    let s = overlay.registry().get(&"a".into()).unwrap();
    assert_eq!((s.min(), s.max(), s.group()), (0.0, 1.0, 0));
    overlay.shutdown();
}

#[test]
fn shutdown_releases_everything_and_ignores_later_calls() {
    use debug_overlay::{Inspect, MemberDesc, MemberValue, ObjectArena};

    struct Gauge {
        level: f32,
    }

    impl Inspect for Gauge {
        fn object_name(&self) -> String {
            "gauge".to_string()
        }

        fn members(&self) -> Vec<MemberDesc> {
            vec![MemberDesc::field("level").graph(Default::default()).print()]
        }

        fn read(&self, member: &str) -> Option<MemberValue> {
            (member == "level").then(|| self.level.into())
        }
    }

    let mut arena = ObjectArena::new();
    arena.insert(Gauge { level: 0.25 });
    let mut overlay = DebugOverlay::default();
    overlay.tick(0.0, &arena);
    overlay.graph("manual", 0.5);
    overlay.log("hello");
    overlay.log_persistent("k", "v");
    assert_eq!(overlay.binder().bound_count(), 1);

    overlay.shutdown();
    assert!(overlay.registry().is_empty());
    assert!(overlay.logs().is_empty());
    assert_eq!(overlay.binder().bound_count(), 0);

    overlay.tick(1.0, &arena);
    overlay.graph("manual", 0.5);
    overlay.log("again");
    assert!(overlay.registry().is_empty());
    assert!(overlay.logs().is_empty());
    assert_eq!(overlay.binder().bound_count(), 0);
}
