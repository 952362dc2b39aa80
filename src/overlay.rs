//! The overlay context the host owns and drives once per frame.

use std::path::{Path, PathBuf};

use egui::{Color32, Context};

use crate::config::OverlayConfig;
use crate::data::binder::Binder;
use crate::data::export::{export_path_in, ExportOrder, GraphExport};
use crate::data::inspect::ObjectArena;
use crate::data::logs::{LogKey, LogStore};
use crate::data::registry::{SeriesProperties, SeriesRegistry};
use crate::data::series::SeriesKey;
use crate::error::Result;
use crate::panels::{GraphWindow, LogWindow, PointerSnapshot};

/// Graphs, logs and instrumented-object bindings for one application.
///
/// Per frame the host calls [`tick`](Self::tick) after updating its objects
/// and [`show`](Self::show) while building its egui frame. Every graph call is
/// a no-op while `enable_graphs` is off, every log call while `enable_logs`
/// is off.
pub struct DebugOverlay {
    config: OverlayConfig,
    registry: SeriesRegistry,
    logs: LogStore,
    binder: Binder,
    graph_window: GraphWindow,
    log_window: LogWindow,
    drag_in_progress: bool,
    last_now: f64,
    shut_down: bool,
}

impl DebugOverlay {
    pub fn new(config: OverlayConfig) -> Self {
        tracing::debug!(
            graphs = config.enable_graphs,
            logs = config.enable_logs,
            capacity = config.graph_width,
            "debug overlay created"
        );
        Self {
            registry: SeriesRegistry::new(config.graph_width),
            logs: LogStore::new(config.transient_log_lifetime),
            binder: Binder::new(),
            graph_window: GraphWindow::new(),
            log_window: LogWindow::new(),
            drag_in_progress: false,
            last_now: 0.0,
            shut_down: false,
            config,
        }
    }

    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    pub fn registry(&self) -> &SeriesRegistry {
        &self.registry
    }

    pub fn logs(&self) -> &LogStore {
        &self.logs
    }

    pub fn binder(&self) -> &Binder {
        &self.binder
    }

    pub fn is_frozen(&self) -> bool {
        self.registry.is_frozen()
    }

    /// Freeze or unfreeze every graph. The next `tick` without a held pointer
    /// releases the freeze again.
    pub fn set_frozen(&mut self, frozen: bool) {
        self.registry.set_frozen(frozen);
    }

    /// (Re)create the series under `key` with the given display properties.
    /// Any previous samples are discarded.
    #[allow(clippy::too_many_arguments)]
    pub fn set_graph_properties(
        &mut self,
        key: impl Into<SeriesKey>,
        label: impl Into<String>,
        min: f32,
        max: f32,
        group: i32,
        color: Color32,
        auto_scale: bool,
    ) {
        if !self.config.enable_graphs {
            return;
        }
        self.registry.set_properties(
            key,
            SeriesProperties {
                label: label.into(),
                min,
                max,
                group,
                color,
                auto_scale,
            },
        );
    }

    /// Push a sample onto the series under `key`.
    pub fn graph(&mut self, key: impl Into<SeriesKey>, value: f32) {
        if self.config.enable_graphs {
            self.registry.push(key, value);
        }
    }

    pub fn remove_graph(&mut self, key: impl Into<SeriesKey>) {
        if self.config.enable_graphs {
            self.registry.remove(&key.into());
        }
    }

    pub fn clear_graph(&mut self, key: impl Into<SeriesKey>) {
        if self.config.enable_graphs {
            self.registry.clear(&key.into());
        }
    }

    pub fn log_persistent(&mut self, key: impl Into<LogKey>, text: impl Into<String>) {
        if self.config.enable_logs {
            self.logs.log_persistent(key, text);
        }
    }

    pub fn remove_persistent(&mut self, key: impl Into<LogKey>) {
        if self.config.enable_logs {
            self.logs.remove_persistent(&key.into());
        }
    }

    pub fn clear_persistent(&mut self) {
        if self.config.enable_logs {
            self.logs.clear_persistent();
        }
    }

    /// Show `text` for `transient_log_lifetime` seconds, counted from the
    /// last `tick`.
    pub fn log(&mut self, text: impl Into<String>) {
        if self.config.enable_logs {
            self.logs.log(text, self.last_now);
        }
    }

    /// Write every series as JSON into `export_dir`. Returns the file written,
    /// or `None` (after logging why) when writing failed.
    pub fn export_graphs(&self) -> Option<PathBuf> {
        self.export_graphs_with(ExportOrder::Raw)
    }

    pub fn export_graphs_with(&self, order: ExportOrder) -> Option<PathBuf> {
        if !self.config.enable_graphs {
            return None;
        }
        let path = export_path_in(&self.config.export_dir);
        match self.export_to_path(&path, order) {
            Ok(()) => {
                tracing::info!("Wrote graph data to {}", path.display());
                Some(path)
            }
            Err(e) => {
                tracing::error!("Failed to write graph data to {}: {e}", path.display());
                None
            }
        }
    }

    pub fn export_to_path(&self, path: &Path, order: ExportOrder) -> Result<()> {
        GraphExport::from_registry(&self.registry, order).write_to_path(path)
    }

    /// Drop every binding and bind the arena's objects again from scratch.
    pub fn force_rescan(&mut self, arena: &ObjectArena) {
        self.binder
            .force_rescan(arena, &mut self.registry, &mut self.logs);
    }

    /// Advance one frame. `now` is host time in seconds.
    pub fn tick(&mut self, now: f64, arena: &ObjectArena) {
        if self.shut_down {
            return;
        }
        self.last_now = now;
        if !self.graph_window.primary_held() {
            self.registry.set_frozen(false);
        }
        self.logs.expire(now);
        let frozen = self.registry.is_frozen();
        self.binder
            .tick(arena, &mut self.registry, &mut self.logs, frozen);
    }

    /// Draw both windows on top of everything else.
    pub fn show(&mut self, ctx: &Context) {
        let pointer = PointerSnapshot::from_ctx(ctx);
        if self.config.enable_graphs {
            self.graph_window.show(
                ctx,
                &mut self.registry,
                &self.config,
                &pointer,
                &mut self.drag_in_progress,
            );
        }
        if self.config.enable_logs {
            self.log_window.show(
                ctx,
                &mut self.logs,
                &self.config,
                &pointer,
                &mut self.drag_in_progress,
            );
        }
    }

    /// Release every binding, drop all series and log lines and disable both
    /// features. Later calls on the overlay are no-ops.
    pub fn shutdown(&mut self) {
        tracing::debug!(
            series = self.registry.len(),
            bound = self.binder.bound_count(),
            "debug overlay shut down"
        );
        self.binder.release_all(&mut self.registry, &mut self.logs);
        self.registry.remove_where(|_| true);
        self.registry.set_frozen(false);
        self.logs.clear();
        self.config.enable_graphs = false;
        self.config.enable_logs = false;
        self.shut_down = true;
    }
}

impl Default for DebugOverlay {
    fn default() -> Self {
        Self::new(OverlayConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_graphs_ignore_calls() {
        let mut overlay = DebugOverlay::new(OverlayConfig {
            enable_graphs: false,
            ..Default::default()
        });
        overlay.graph("fps", 1.0);
        overlay.set_graph_properties("x", "X", 0.0, 1.0, 0, Color32::RED, false);
        assert!(overlay.registry().is_empty());
    }

    #[test]
    fn disabled_logs_ignore_calls() {
        let mut overlay = DebugOverlay::new(OverlayConfig {
            enable_logs: false,
            ..Default::default()
        });
        overlay.log("hello");
        overlay.log_persistent("k", "v");
        assert!(overlay.logs().is_empty());
    }

    #[test]
    fn disabled_graphs_skip_export() {
        let mut overlay = DebugOverlay::new(OverlayConfig {
            enable_graphs: false,
            export_dir: std::env::temp_dir(),
            ..Default::default()
        });
        overlay.graph("fps", 1.0);
        assert_eq!(overlay.export_graphs(), None);
        assert_eq!(overlay.export_graphs_with(ExportOrder::Chronological), None);
    }

    #[test]
    fn transient_log_uses_last_tick_time() {
        let arena = ObjectArena::new();
        let mut overlay = DebugOverlay::default();
        overlay.tick(10.0, &arena);
        overlay.log("hi");
        overlay.tick(14.9, &arena);
        assert_eq!(overlay.logs().transient_len(), 1);
        overlay.tick(15.1, &arena);
        assert_eq!(overlay.logs().transient_len(), 0);
    }

    #[test]
    fn tick_releases_freeze_without_held_pointer() {
        let arena = ObjectArena::new();
        let mut overlay = DebugOverlay::default();
        overlay.set_frozen(true);
        overlay.graph("a", 0.5);
        assert_eq!(overlay.registry().get(&"a".into()).unwrap().read(0), 0.0);
        overlay.tick(0.0, &arena);
        assert!(!overlay.is_frozen());
    }
}
