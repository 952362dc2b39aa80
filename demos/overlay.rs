//! Example: graphs and logs fed by direct calls
//!
//! What it demonstrates
//! - Configuring series with `set_graph_properties` and pushing samples with `graph`.
//! - Persistent lines (`log_persistent`) and expiring messages (`log`).
//! - Exporting every series to JSON.
//!
//! How to run
//! ```bash
//! RUST_LOG=debug cargo run --example overlay
//! ```
//! Middle-drag either window to move it. Hold the left button over a graph to
//! freeze it and read values under the scrubber. Click a series name to hide it.

use debug_overlay::{DebugOverlay, ObjectArena, OverlayConfig};
use egui::Color32;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

struct OverlayDemo {
    overlay: DebugOverlay,
    arena: ObjectArena,
    frame: u64,
}

impl OverlayDemo {
    fn new() -> Self {
        let mut overlay = DebugOverlay::new(OverlayConfig::load_or_default());
        overlay.set_graph_properties("dt", "frame time (ms)", 0.0, 50.0, 0, Color32::from_rgb(255, 127, 14), false);
        overlay.set_graph_properties("sin", "sin", -1.0, 1.0, 1, Color32::from_rgb(31, 119, 180), false);
        overlay.set_graph_properties("cos", "cos", -1.0, 1.0, 1, Color32::from_rgb(44, 160, 44), false);
        overlay.set_graph_properties("ramp", "ramp (auto)", 0.0, 1.0, 2, Color32::from_rgb(214, 39, 40), true);
        Self {
            overlay,
            arena: ObjectArena::new(),
            frame: 0,
        }
    }
}

impl eframe::App for OverlayDemo {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let (now, dt) = ctx.input(|i| (i.time, i.stable_dt));
        self.frame = self.frame.wrapping_add(1);

        self.overlay.graph("dt", dt * 1000.0);
        self.overlay.graph("sin", now.sin() as f32);
        self.overlay.graph("cos", now.cos() as f32);
        self.overlay.graph("ramp", (self.frame % 600) as f32 / 100.0);
        self.overlay
            .log_persistent("frame", format!("frame {}", self.frame));
        self.overlay.tick(now, &self.arena);

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(250.0);
            if ui.button("Log a message").clicked() {
                self.overlay.log(format!("clicked at t={now:.2}"));
            }
            if ui.button("Export graphs").clicked() {
                match self.overlay.export_graphs() {
                    Some(path) => self.overlay.log(format!("exported to {}", path.display())),
                    None => self.overlay.log("export failed"),
                }
            }
            if ui.button("Clear ramp").clicked() {
                self.overlay.clear_graph("ramp");
            }
        });

        self.overlay.show(ctx);
        ctx.request_repaint();
    }
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut options = eframe::NativeOptions::default();
    options.viewport = egui::ViewportBuilder::default().with_inner_size([1200.0, 700.0]);
    eframe::run_native(
        "debug overlay",
        options,
        Box::new(|_cc| Ok(Box::new(OverlayDemo::new()))),
    )
}
