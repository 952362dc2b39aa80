//! debug-overlay crate root: re-exports and module wiring.
//!
//! An in-app debug overlay for egui applications: live line graphs of
//! numeric values and on-screen text logs, drawn above everything else.
//!
//! - `data`: series ring buffers, the series registry, the log store, the
//!   binder that keeps instrumented objects in sync, and JSON export
//! - `panels`: the graph and log windows
//! - `overlay`: [`DebugOverlay`], the context the host drives every frame
//! - `config`: [`OverlayConfig`] and its YAML file form
//!
//! Values reach the overlay two ways: direct calls (`graph`, `log`,
//! `log_persistent`, ...) or objects implementing [`Inspect`] that live in
//! an [`ObjectArena`] and are polled on every `tick`.

pub mod config;
pub mod data;
pub mod error;
pub mod layout;
pub mod overlay;
pub mod panels;

pub use config::{OverlayConfig, OverlayConfigSerde};
pub use data::export::{ExportOrder, GraphExport, SeriesExport};
pub use data::inspect::{
    BindingKey, GraphMarker, Inspect, MemberDesc, MemberKind, MemberValue, ObjectArena,
    ObjectHandle,
};
pub use data::registry::{SeriesProperties, SeriesRegistry};
pub use data::series::{Series, SeriesKey};
pub use error::{Error, Result};
pub use overlay::DebugOverlay;
