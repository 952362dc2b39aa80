//! Overlay configuration and its YAML file form.

use std::fs;
use std::path::{Path, PathBuf};

use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Settings recognised by the overlay.
///
/// | Field                    | Purpose |
/// |--------------------------|---------|
/// | `enable_graphs`          | Graph window and every graph call |
/// | `enable_logs`            | Log window and every log call |
/// | `background_color`       | Fill behind labels, graphs and log text |
/// | `scrubber_color`         | Vertical scrubber line |
/// | `graph_width`            | Samples per series (= graph width in px) |
/// | `graph_height`           | Height of one graph group in px |
/// | `transient_log_lifetime` | Seconds a `log` message stays on screen |
/// | `export_dir`             | Where `export_graphs` writes its file |
#[derive(Clone, Debug, PartialEq)]
pub struct OverlayConfig {
    pub enable_graphs: bool,
    pub enable_logs: bool,
    pub background_color: Color32,
    pub scrubber_color: Color32,
    pub graph_width: usize,
    pub graph_height: f32,
    pub transient_log_lifetime: f64,
    pub export_dir: PathBuf,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            enable_graphs: true,
            enable_logs: true,
            background_color: Color32::from_rgba_unmultiplied(0, 0, 0, 178),
            scrubber_color: Color32::from_rgba_unmultiplied(255, 255, 0, 178),
            graph_width: 300,
            graph_height: 100.0,
            transient_log_lifetime: 5.0,
            export_dir: std::env::temp_dir(),
        }
    }
}

/// Serializable mirror of [`OverlayConfig`]; colors are stored as RGBA bytes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfigSerde {
    pub enable_graphs: bool,
    pub enable_logs: bool,
    pub background_rgba: [u8; 4],
    pub scrubber_rgba: [u8; 4],
    pub graph_width: usize,
    pub graph_height: f32,
    pub transient_log_lifetime: f64,
    pub export_dir: Option<PathBuf>,
}

impl Default for OverlayConfigSerde {
    fn default() -> Self {
        (&OverlayConfig::default()).into()
    }
}

fn rgba(c: Color32) -> [u8; 4] {
    let [r, g, b, a] = c.to_srgba_unmultiplied();
    [r, g, b, a]
}

impl From<&OverlayConfig> for OverlayConfigSerde {
    fn from(c: &OverlayConfig) -> Self {
        Self {
            enable_graphs: c.enable_graphs,
            enable_logs: c.enable_logs,
            background_rgba: rgba(c.background_color),
            scrubber_rgba: rgba(c.scrubber_color),
            graph_width: c.graph_width,
            graph_height: c.graph_height,
            transient_log_lifetime: c.transient_log_lifetime,
            export_dir: Some(c.export_dir.clone()),
        }
    }
}

impl OverlayConfigSerde {
    /// Convert back to an [`OverlayConfig`].
    pub fn into_config(self) -> OverlayConfig {
        let [r, g, b, a] = self.background_rgba;
        let [sr, sg, sb, sa] = self.scrubber_rgba;
        OverlayConfig {
            enable_graphs: self.enable_graphs,
            enable_logs: self.enable_logs,
            background_color: Color32::from_rgba_unmultiplied(r, g, b, a),
            scrubber_color: Color32::from_rgba_unmultiplied(sr, sg, sb, sa),
            graph_width: self.graph_width.max(1),
            graph_height: self.graph_height,
            transient_log_lifetime: self.transient_log_lifetime,
            export_dir: self.export_dir.unwrap_or_else(std::env::temp_dir),
        }
    }
}

impl OverlayConfig {
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(&OverlayConfigSerde::from(self))?)
    }

    /// Parse YAML; missing fields take their defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let mirror: OverlayConfigSerde = serde_yaml::from_str(yaml)?;
        Ok(mirror.into_config())
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(path, self.to_yaml()?)?;
        Ok(())
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let s = fs::read_to_string(path)?;
        Self::from_yaml(&s)
    }

    /// `~/.debug_overlay/config.yaml`.
    pub fn default_path() -> Result<PathBuf> {
        let home = std::env::var("HOME").map_err(|_| Error::HomeNotSet)?;
        Ok(PathBuf::from(home).join(".debug_overlay").join("config.yaml"))
    }

    /// Load from the default path, falling back to defaults when absent or broken.
    pub fn load_or_default() -> Self {
        let path = match Self::default_path() {
            Ok(p) => p,
            Err(e) => {
                tracing::warn!("using default overlay config: {e}");
                return Self::default();
            }
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from_path(&path) {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::error!("failed to load overlay config {:?}: {e}", path);
                Self::default()
            }
        }
    }
}
