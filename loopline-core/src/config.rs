//! Editor configuration: track geometry and startup options, loaded from TOML.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors reading an editor config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Play-marker triangle, relative to the track's top edge and in-point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerMetrics {
    pub top: i32,
    pub height: i32,
    pub width: i32,
}

impl Default for MarkerMetrics {
    fn default() -> Self {
        Self {
            top: 7,
            height: 10,
            width: 10,
        }
    }
}

/// Placement of the name label box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelMetrics {
    /// Offset from the in-point to the box's left edge.
    pub gap: i32,
    /// Subtracted from the in→out distance to get the box width.
    pub margin: i32,
    /// Offset from the track's top edge.
    pub top: i32,
    pub height: i32,
}

impl Default for LabelMetrics {
    fn default() -> Self {
        Self {
            gap: 22,
            margin: 34,
            top: 5,
            height: 16,
        }
    }
}

/// Hit-zone radii and drawing constants for a loop track.
///
/// The in-handle deliberately catches a wider zone than the out-handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackMetrics {
    pub in_radius: i32,
    pub out_radius: i32,
    /// Guide lines are drawn only for tracks taller than this.
    pub min_guide_height: i32,
    /// Shared by all siblings: each one draws with `disabled_alpha / count`.
    pub disabled_alpha: u8,
    pub marker: MarkerMetrics,
    pub label: LabelMetrics,
}

impl Default for TrackMetrics {
    fn default() -> Self {
        Self {
            in_radius: 17,
            out_radius: 7,
            min_guide_height: 2,
            disabled_alpha: 120,
            marker: MarkerMetrics::default(),
            label: LabelMetrics::default(),
        }
    }
}

impl TrackMetrics {
    /// Cell-sized preset for terminal front ends, where one unit is a column.
    pub fn terminal() -> Self {
        Self {
            in_radius: 2,
            out_radius: 1,
            min_guide_height: 2,
            disabled_alpha: 120,
            marker: MarkerMetrics {
                top: 0,
                height: 0,
                width: 1,
            },
            label: LabelMetrics {
                gap: 2,
                margin: 4,
                top: 0,
                height: 1,
            },
        }
    }

    /// Alpha each sibling uses for its disabled shading.
    pub fn disabled_alpha_for(&self, sibling_count: usize) -> u8 {
        (self.disabled_alpha as usize / sibling_count.max(1)) as u8
    }
}

/// Startup options for an editor session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Track geometry. Front ends pick their own preset when unset.
    pub metrics: Option<TrackMetrics>,
    /// Loops created at startup.
    pub loop_count: usize,
    /// Seed for default loop placement.
    pub seed: u64,
    /// Directory holding one settings file per loop. Front ends choose a
    /// platform default when unset.
    pub settings_dir: Option<PathBuf>,
    pub file_prefix: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            metrics: None,
            loop_count: 1,
            seed: 42,
            settings_dir: None,
            file_prefix: "loop".to_string(),
        }
    }
}

impl EditorConfig {
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load from `path`. A missing file yields defaults; a malformed one is an error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("no config at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        Self::from_toml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Configured metrics, or `preset` when the file has no `[metrics]` table.
    pub fn metrics_or(&self, preset: TrackMetrics) -> TrackMetrics {
        self.metrics.unwrap_or(preset)
    }

    /// Settings file for the loop at `index`, inside `dir`.
    pub fn settings_path(&self, dir: &Path, index: usize) -> PathBuf {
        dir.join(format!("{}_{}.toml", self.file_prefix, index))
    }

    /// Indices of the settings files present in `dir`, ascending. An unreadable
    /// directory counts as empty.
    pub fn saved_indices(&self, dir: &Path) -> Vec<usize> {
        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                log::debug!("no settings in {}: {e}", dir.display());
                return Vec::new();
            }
        };
        let prefix = format!("{}_", self.file_prefix);
        let mut indices: Vec<usize> = entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                let name = entry.file_name();
                let stem = name.to_str()?.strip_suffix(".toml")?.strip_prefix(&prefix)?;
                stem.parse().ok()
            })
            .collect();
        indices.sort_unstable();
        indices
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_metrics_match_pixel_layout() {
        let m = TrackMetrics::default();
        assert_eq!(m.in_radius, 17);
        assert_eq!(m.out_radius, 7);
        assert_eq!(m.disabled_alpha, 120);
        assert_eq!(m.label.gap, 22);
        assert_eq!(m.label.margin, 34);
    }

    #[test]
    fn disabled_alpha_divides_by_sibling_count() {
        let m = TrackMetrics::default();
        assert_eq!(m.disabled_alpha_for(1), 120);
        assert_eq!(m.disabled_alpha_for(3), 40);
        assert_eq!(m.disabled_alpha_for(7), 17);
        assert_eq!(m.disabled_alpha_for(0), 120);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let cfg = EditorConfig::from_toml(
            r#"
loop_count = 3

[metrics]
in_radius = 4

[metrics.label]
gap = 1
"#,
        )
        .unwrap();
        assert_eq!(cfg.loop_count, 3);
        assert_eq!(cfg.seed, 42);
        let metrics = cfg.metrics_or(TrackMetrics::terminal());
        assert_eq!(metrics.in_radius, 4);
        assert_eq!(metrics.out_radius, 7);
        assert_eq!(metrics.label.gap, 1);
        assert_eq!(metrics.label.margin, 34);
    }

    #[test]
    fn missing_metrics_table_uses_preset() {
        let cfg = EditorConfig::from_toml("seed = 9\n").unwrap();
        assert_eq!(cfg.metrics, None);
        assert_eq!(cfg.metrics_or(TrackMetrics::terminal()), TrackMetrics::terminal());
    }

    #[test]
    fn missing_file_yields_defaults() {
        let cfg = EditorConfig::load(Path::new("/nonexistent/loopline/config.toml")).unwrap();
        assert_eq!(cfg, EditorConfig::default());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "loop_count = [not a number").unwrap();
        assert!(matches!(
            EditorConfig::load(&path),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn saved_indices_parse_matching_files_only() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = EditorConfig::default();
        for name in ["loop_3.toml", "loop_0.toml", "loop_x.toml", "take_1.toml", "loop_2.txt"] {
            std::fs::write(dir.path().join(name), "").unwrap();
        }
        assert_eq!(cfg.saved_indices(dir.path()), vec![0, 3]);
        assert!(cfg.saved_indices(&dir.path().join("missing")).is_empty());
    }

    #[test]
    fn settings_path_uses_prefix_and_index() {
        let cfg = EditorConfig::default();
        assert_eq!(
            cfg.settings_path(Path::new("/tmp/loops"), 2),
            PathBuf::from("/tmp/loops/loop_2.toml")
        );
    }
}
