use directories::ProjectDirs;
use navgraph_core::decor::spikes::DEFAULT_SPIKE_COUNT;
use navgraph_core::decor::starfield::DEFAULT_STAR_COUNT;
use navgraph_core::BackdropParams;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub graph: BackdropParams,
    pub star_count: usize,
    pub spike_count: usize,
    pub show_edges: bool,
    pub show_starfield: bool,
    pub show_spikes: bool,
    pub show_rain: bool,
    pub show_cursor: bool,
    pub show_hud: bool,
    /// Emit backdrop mount/phase/teardown events through tracing.
    pub trace_lifecycle: bool,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            graph: BackdropParams::default(),
            star_count: DEFAULT_STAR_COUNT,
            spike_count: DEFAULT_SPIKE_COUNT,
            show_edges: true,
            show_starfield: true,
            show_spikes: true,
            show_rain: true,
            show_cursor: true,
            show_hud: true,
            trace_lifecycle: false,
        }
    }
}

impl ViewerConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        let g = &self.graph;
        if g.node_count < 3 {
            anyhow::bail!("graph.node_count must be at least 3 (got {})", g.node_count);
        }
        if !g.extent.is_finite() || g.extent <= 0.0 {
            anyhow::bail!("graph.extent must be a positive number (got {})", g.extent);
        }
        if g.step_cap == 0 {
            anyhow::bail!("graph.step_cap must be at least 1");
        }
        if !g.beat_interval_secs.is_finite() || g.beat_interval_secs <= 0.0 {
            anyhow::bail!(
                "graph.beat_interval_secs must be positive (got {})",
                g.beat_interval_secs
            );
        }
        Ok(())
    }
}

fn config_file_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("", "", "navgraph")?;
    Some(proj.config_dir().join("viewer.toml"))
}

pub fn load_or_default() -> ViewerConfig {
    let Some(path) = config_file_path() else {
        return ViewerConfig::default();
    };
    load_or_default_from_path(&path)
}

fn load_or_default_from_path(path: &Path) -> ViewerConfig {
    let Ok(contents) = fs::read_to_string(path) else {
        return ViewerConfig::default();
    };
    toml::from_str(&contents).unwrap_or_else(|err| {
        tracing::warn!(path = %path.display(), %err, "ignoring unreadable viewer config");
        ViewerConfig::default()
    })
}
