//! Point-in-time JSON export of every series.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::data::registry::SeriesRegistry;
use crate::error::Result;

/// Order in which a series' samples are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportOrder {
    /// Physical ring-buffer order, starting at slot 0. Consumers that want a
    /// timeline must rotate it themselves.
    #[default]
    Raw,
    /// Oldest sample first.
    Chronological,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesExport {
    pub name: String,
    pub values: Vec<f32>,
}

/// Export document: `{"data": [{"name": ..., "values": [...]}, ...]}`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GraphExport {
    pub data: Vec<SeriesExport>,
}

impl GraphExport {
    /// Snapshot every series in creation order.
    pub fn from_registry(registry: &SeriesRegistry, order: ExportOrder) -> Self {
        let data = registry
            .iter()
            .map(|(_, s)| SeriesExport {
                name: s.name().to_string(),
                values: match order {
                    ExportOrder::Raw => s.raw_values().to_vec(),
                    ExportOrder::Chronological => s.iter_chronological().collect(),
                },
            })
            .collect();
        Self { data }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn write_to_path(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

/// File name used for an export taken at `now`.
pub fn export_file_name(now: chrono::DateTime<chrono::Local>) -> String {
    format!(
        "debuggui_graph_export_{}.json",
        now.format("%Y-%m-%dT%H-%M-%S")
    )
}

/// Full path of an export taken now inside `dir`.
pub fn export_path_in(dir: &Path) -> PathBuf {
    dir.join(export_file_name(chrono::Local::now()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::registry::SeriesProperties;
    use chrono::TimeZone;

    #[test]
    fn empty_registry_exports_zero_records() {
        let reg = SeriesRegistry::new(4);
        let export = GraphExport::from_registry(&reg, ExportOrder::Raw);
        assert!(export.data.is_empty());
        assert_eq!(export.to_json().unwrap(), r#"{"data":[]}"#);
    }

    #[test]
    fn raw_order_is_physical_and_chronological_is_rotated() {
        let mut reg = SeriesRegistry::new(3);
        reg.set_properties(
            "a",
            SeriesProperties {
                label: "A".to_string(),
                max: 10.0,
                ..Default::default()
            },
        );
        for v in [1.0, 2.0, 3.0, 4.0] {
            reg.push("a", v);
        }
        let raw = GraphExport::from_registry(&reg, ExportOrder::Raw);
        assert_eq!(raw.data[0].name, "A");
        assert_eq!(raw.data[0].values, vec![4.0, 2.0, 3.0]);

        let chrono = GraphExport::from_registry(&reg, ExportOrder::Chronological);
        assert_eq!(chrono.data[0].values, vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn records_follow_creation_order() {
        let mut reg = SeriesRegistry::new(2);
        reg.push("z", 0.0);
        reg.push("a", 0.0);
        let names: Vec<String> = GraphExport::from_registry(&reg, ExportOrder::Raw)
            .data
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["z", "a"]);
    }

    #[test]
    fn file_name_embeds_timestamp() {
        let t = chrono::Local
            .with_ymd_and_hms(2024, 3, 9, 14, 5, 7)
            .earliest()
            .unwrap();
        assert_eq!(
            export_file_name(t),
            "debuggui_graph_export_2024-03-09T14-05-07.json"
        );
    }
}
