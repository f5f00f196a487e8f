use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use getset::{CopyGetters, Getters};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::kitchen::{Frame, Grid, MapParseError, Order, DEFAULT_LAYOUT};

#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("could not read configuration [{}]: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not decode configuration: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid kitchen layout: {0}")]
    Map(#[from] MapParseError),
    #[error("animation step interval must be positive")]
    ZeroStepInterval,
}

#[derive(Clone, Debug, Deserialize, Getters, CopyGetters, Serialize)]
pub struct KitchenConfiguration {
    #[serde(default)]
    #[getset(get = "pub")]
    animation: AnimationConfiguration,
    #[serde(default = "default_layout")]
    #[getset(get = "pub")]
    layout: String,
    #[serde(default = "default_sink_clean_plates")]
    #[getset(get_copy = "pub")]
    sink_clean_plates: u32,
    #[serde(default)]
    #[getset(get = "pub")]
    orders: Vec<Order>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct AnimationConfiguration {
    /// Shared by commit replays and focus switches.
    #[serde(default = "default_step_interval_ms")]
    pub step_interval_ms: u64,
}

impl AnimationConfiguration {
    pub fn step_interval(&self) -> Duration {
        Duration::from_millis(self.step_interval_ms)
    }
}

fn default_layout() -> String {
    DEFAULT_LAYOUT.to_string()
}

fn default_sink_clean_plates() -> u32 {
    3
}

fn default_step_interval_ms() -> u64 {
    200
}

impl Default for AnimationConfiguration {
    fn default() -> Self {
        AnimationConfiguration {
            step_interval_ms: default_step_interval_ms(),
        }
    }
}

impl Default for KitchenConfiguration {
    fn default() -> Self {
        KitchenConfiguration {
            animation: AnimationConfiguration::default(),
            layout: default_layout(),
            sink_clean_plates: default_sink_clean_plates(),
            orders: Vec::new(),
        }
    }
}

impl KitchenConfiguration {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigurationError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigurationError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Loading kitchen configuration from {}", path.display());
        Self::from_toml_str(&contents)
    }

    /// Decodes and validates a configuration. The layout must parse.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigurationError> {
        let configuration: KitchenConfiguration = toml::from_str(contents)?;
        if configuration.animation.step_interval_ms == 0 {
            return Err(ConfigurationError::ZeroStepInterval);
        }
        configuration.grid()?;
        Ok(configuration)
    }

    pub fn grid(&self) -> Result<Grid, MapParseError> {
        Grid::parse(&self.layout)
    }

    /// The uncommitted starting frame this configuration describes.
    pub fn baseline_frame(&self) -> Result<Frame, ConfigurationError> {
        let grid = Arc::new(self.grid()?);
        Ok(Frame::baseline(
            grid,
            self.sink_clean_plates,
            self.orders.clone(),
        ))
    }
}
