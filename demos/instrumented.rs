//! Example: objects that describe their own debug members
//!
//! What it demonstrates
//! - Implementing `Inspect` with graph markers and printed members.
//! - Objects bound automatically once they are in the `ObjectArena`.
//! - Series and lines disappearing when an object is removed.
//!
//! How to run
//! ```bash
//! RUST_LOG=debug cargo run --example instrumented
//! ```

use debug_overlay::{
    DebugOverlay, GraphMarker, Inspect, MemberDesc, MemberValue, ObjectArena, ObjectHandle,
    OverlayConfig,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

struct Ball {
    name: String,
    height: f32,
    velocity: f32,
    bounces: u32,
}

impl Ball {
    fn new(name: String, height: f32) -> Self {
        Self {
            name,
            height,
            velocity: 0.0,
            bounces: 0,
        }
    }

    fn step(&mut self, dt: f32) {
        self.velocity -= 9.81 * dt;
        self.height += self.velocity * dt;
        if self.height < 0.0 {
            self.height = -self.height;
            self.velocity = -self.velocity * 0.9;
            self.bounces += 1;
        }
    }
}

impl Inspect for Ball {
    fn object_name(&self) -> String {
        self.name.clone()
    }

    fn members(&self) -> Vec<MemberDesc> {
        vec![
            MemberDesc::field("height").graph(GraphMarker::default().bounds(0.0, 10.0).group(0)),
            MemberDesc::field("velocity")
                .graph(GraphMarker::default().bounds(-5.0, 5.0).group(1).auto_scale(true)),
            MemberDesc::field("bounces").print(),
        ]
    }

    fn read(&self, member: &str) -> Option<MemberValue> {
        match member {
            "height" => Some(self.height.into()),
            "velocity" => Some(self.velocity.into()),
            "bounces" => Some(self.bounces.into()),
            _ => None,
        }
    }
}

struct InstrumentedDemo {
    overlay: DebugOverlay,
    arena: ObjectArena,
    balls: Vec<ObjectHandle>,
    spawned: usize,
}

impl InstrumentedDemo {
    fn spawn(&mut self) {
        self.spawned += 1;
        let ball = Ball::new(format!("ball{}", self.spawned), 2.0 + self.spawned as f32);
        self.balls.push(self.arena.insert(ball));
    }
}

impl eframe::App for InstrumentedDemo {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let (now, dt) = ctx.input(|i| (i.time, i.stable_dt));
        for &handle in &self.balls {
            if let Some(ball) = self.arena.get_as_mut::<Ball>(handle) {
                ball.step(dt);
            }
        }
        self.overlay.tick(now, &self.arena);

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(250.0);
            if ui.button("Spawn ball").clicked() {
                self.spawn();
            }
            if ui.button("Remove oldest ball").clicked() && !self.balls.is_empty() {
                let handle = self.balls.remove(0);
                self.arena.remove(handle);
                self.overlay.log(format!("removed {handle}"));
            }
            if ui.button("Rescan").clicked() {
                self.overlay.force_rescan(&self.arena);
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

    let mut app = InstrumentedDemo {
        overlay: DebugOverlay::new(OverlayConfig::default()),
        arena: ObjectArena::new(),
        balls: Vec::new(),
        spawned: 0,
    };
    app.spawn();

    let mut options = eframe::NativeOptions::default();
    options.viewport = egui::ViewportBuilder::default().with_inner_size([1200.0, 700.0]);
    eframe::run_native(
        "debug overlay: instrumented objects",
        options,
        Box::new(|_cc| Ok(Box::new(app))),
    )
}
