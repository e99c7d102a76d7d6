//! Configuration management
//!
//! Values are layered env > TOML file > default. The TOML file lives at
//! `~/.config/podium/config.toml` and every field is optional.

use std::path::PathBuf;

use serde::Deserialize;

/// Default intent-detection model
const DEFAULT_MODEL: &str = "gemini-2.0-flash-exp";

/// Execution log file name inside the data directory
const LOG_FILE: &str = "execution.log";

/// Podium configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Hosted API credential (`GEMINI_API_KEY`)
    ///
    /// Optional here so diagnostic subcommands work without it; the daemon
    /// rejects a missing key at startup.
    pub api_key: Option<String>,

    /// Intent-detection model identifier
    pub model: String,

    /// Print model reasoning to the console (`SHOW_THINKING_LOGS`)
    pub show_thinking: bool,

    /// Total slides in the deck (0 = unknown, disables range validation)
    pub total_slides: usize,

    /// Data directory (execution log lives here)
    pub data_dir: PathBuf,

    /// Path to the execution log file
    pub log_path: PathBuf,
}

/// Partial configuration from the TOML file
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    model: Option<String>,
    show_thinking: Option<bool>,
    data_dir: Option<PathBuf>,
    #[serde(default)]
    deck: DeckFileConfig,
}

#[derive(Debug, Default, Deserialize)]
struct DeckFileConfig {
    total_slides: Option<usize>,
}

impl Config {
    /// Load configuration (env > toml > default)
    ///
    /// `model_override` takes precedence over both (set from the CLI).
    #[must_use]
    pub fn load(model_override: Option<&str>) -> Self {
        let fc = load_config_file();

        let api_key = std::env::var("GEMINI_API_KEY").ok().filter(|k| !k.is_empty());

        let model = model_override.map(ToString::to_string).unwrap_or_else(|| {
            std::env::var("PODIUM_MODEL")
                .ok()
                .or(fc.model)
                .unwrap_or_else(|| DEFAULT_MODEL.to_string())
        });

        let show_thinking = env_flag("SHOW_THINKING_LOGS")
            .or(fc.show_thinking)
            .unwrap_or(false);

        let total_slides = std::env::var("PODIUM_TOTAL_SLIDES")
            .ok()
            .and_then(|s| s.parse().ok())
            .or(fc.deck.total_slides)
            .unwrap_or(0);

        let data_dir = std::env::var("PODIUM_DATA_DIR")
            .map(PathBuf::from)
            .ok()
            .or(fc.data_dir)
            .unwrap_or_else(default_data_dir);

        if let Err(e) = std::fs::create_dir_all(&data_dir) {
            tracing::warn!(
                path = %data_dir.display(),
                error = %e,
                "failed to create data directory"
            );
        }

        let log_path = data_dir.join(LOG_FILE);

        Self {
            api_key,
            model,
            show_thinking,
            total_slides,
            data_dir,
            log_path,
        }
    }
}

/// Parse a boolean env flag (`1` or `true` enables)
fn env_flag(name: &str) -> Option<bool> {
    std::env::var(name)
        .ok()
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
}

/// Default data directory: `~/.local/share/podium` on Linux
fn default_data_dir() -> PathBuf {
    directories::BaseDirs::new().map_or_else(
        || PathBuf::from(".local/share/podium"),
        |d| d.data_dir().join("podium"),
    )
}

/// Load the optional TOML config file
///
/// A missing file yields defaults; a malformed file is logged and ignored.
fn load_config_file() -> FileConfig {
    let path = directories::BaseDirs::new().map_or_else(
        || PathBuf::from(".config/podium/config.toml"),
        |d| d.config_dir().join("podium").join("config.toml"),
    );

    let Ok(raw) = std::fs::read_to_string(&path) else {
        return FileConfig::default();
    };

    match toml::from_str(&raw) {
        Ok(fc) => fc,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "invalid config file, ignoring");
            FileConfig::default()
        }
    }
}
