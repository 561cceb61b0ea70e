use std::time::Duration;
use std::{env, path::PathBuf};

use color_eyre::Result;
use directories::ProjectDirs;
use lazy_static::lazy_static;
use serde::Deserialize;
use studio_core::{assets::DEFAULT_PLACEHOLDER_BASE, export::DEFAULT_SHARE_BASE};
use tracing::debug;

const CONFIG: &str = include_str!("../.config/config.json5");

#[derive(Clone, Debug, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub data_dir: PathBuf,
    #[serde(default)]
    pub config_dir: PathBuf,
}

/// Timings and URL templates of the simulated back-end.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SimulationConfig {
    pub asset_generation_ms: u64,
    pub export_ms: u64,
    pub play_tick_ms: u64,
    pub placeholder_base_url: String,
    pub share_base_url: String,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            asset_generation_ms: 2000,
            export_ms: 3000,
            play_tick_ms: 1000,
            placeholder_base_url: DEFAULT_PLACEHOLDER_BASE.into(),
            share_base_url: DEFAULT_SHARE_BASE.into(),
        }
    }
}

impl SimulationConfig {
    pub fn asset_generation_delay(&self) -> Duration {
        Duration::from_millis(self.asset_generation_ms)
    }

    pub fn export_delay(&self) -> Duration {
        Duration::from_millis(self.export_ms)
    }

    pub fn play_tick(&self) -> Duration {
        // A zero period would make tokio's interval panic.
        Duration::from_millis(self.play_tick_ms.max(1))
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default, flatten)]
    pub config: AppConfig,
    #[serde(default)]
    pub simulation: SimulationConfig,
}

lazy_static! {
    pub static ref PROJECT_NAME: String = env!("CARGO_CRATE_NAME").to_uppercase().to_string();
    pub static ref DATA_FOLDER: Option<PathBuf> =
        env::var(format!("{}_DATA", PROJECT_NAME.clone()))
            .ok()
            .map(PathBuf::from);
    pub static ref CONFIG_FOLDER: Option<PathBuf> =
        env::var(format!("{}_CONFIG", PROJECT_NAME.clone()))
            .ok()
            .map(PathBuf::from);
}

impl Config {
    pub fn new() -> Result<Self, config::ConfigError> {
        let data_dir = get_data_dir();
        let config_dir = get_config_dir();
        let mut builder = config::Config::builder()
            .set_default("data_dir", data_dir.to_string_lossy().as_ref())?
            .set_default("config_dir", config_dir.to_string_lossy().as_ref())?
            .add_source(config::File::from_str(CONFIG, config::FileFormat::Json5));

        let config_files = [
            ("config.json5", config::FileFormat::Json5),
            ("config.toml", config::FileFormat::Toml),
        ];
        let mut found_config = false;
        for (file, format) in &config_files {
            let source = config::File::from(config_dir.join(file))
                .format(*format)
                .required(false);
            builder = builder.add_source(source);
            if config_dir.join(file).exists() {
                found_config = true
            }
        }
        if !found_config {
            debug!("No user configuration file found, using embedded defaults");
        }

        builder.build()?.try_deserialize()
    }
}

pub fn get_data_dir() -> PathBuf {
    if let Some(s) = DATA_FOLDER.clone() {
        s
    } else if let Some(proj_dirs) = project_directory() {
        proj_dirs.data_local_dir().to_path_buf()
    } else {
        PathBuf::from(".").join(".data")
    }
}

pub fn get_config_dir() -> PathBuf {
    if let Some(s) = CONFIG_FOLDER.clone() {
        s
    } else if let Some(proj_dirs) = project_directory() {
        proj_dirs.config_local_dir().to_path_buf()
    } else {
        PathBuf::from(".").join(".config")
    }
}

fn project_directory() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "chicken105", env!("CARGO_PKG_NAME"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn embedded_defaults_parse() {
        let c = Config::new().unwrap();
        assert_eq!(c.simulation, SimulationConfig::default());
    }

    #[test]
    fn zero_tick_is_clamped() {
        let sim = SimulationConfig {
            play_tick_ms: 0,
            ..SimulationConfig::default()
        };
        assert_eq!(sim.play_tick(), Duration::from_millis(1));
    }
}
