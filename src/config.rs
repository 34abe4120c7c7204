use serde::{Deserialize, Serialize};

/// Embedded default configuration.
const DEFAULT_CONFIG: &str = include_str!("../config.default.toml");

// ── Final (merged) config types ──

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub settings: Settings,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Settings {
    /// Prompt printed before each input line.
    #[serde(default = "default_prompt")]
    pub prompt: String,
    /// Verbosity of the file logger: off, error, warn, info, debug, trace.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            prompt: default_prompt(),
            log_level: default_log_level(),
        }
    }
}

fn default_prompt() -> String {
    "$ ".into()
}

fn default_log_level() -> String {
    "warn".into()
}

// ── Overlay types (user config that merges with defaults) ──

#[derive(Debug, Deserialize, Default)]
struct ConfigOverlay {
    #[serde(default)]
    settings: SettingsOverlay,
}

#[derive(Debug, Deserialize, Default)]
struct SettingsOverlay {
    prompt: Option<String>,
    log_level: Option<String>,
}

impl Config {
    /// The embedded defaults, with no user overlay applied.
    pub fn default_config() -> Self {
        toml::from_str(DEFAULT_CONFIG).unwrap_or_else(|_| Config {
            settings: Settings::default(),
        })
    }

    /// Defaults merged with `~/.config/shoal/config.toml` when present.
    /// A malformed overlay is logged and ignored.
    pub fn load() -> Self {
        let mut config = Self::default_config();
        if let Some(overlay) = read_user_overlay() {
            config.apply(overlay);
        }
        config
    }

    fn apply(&mut self, overlay: ConfigOverlay) {
        if let Some(prompt) = overlay.settings.prompt {
            self.settings.prompt = prompt;
        }
        if let Some(level) = overlay.settings.log_level {
            self.settings.log_level = level;
        }
    }
}

fn read_user_overlay() -> Option<ConfigOverlay> {
    let home = std::env::var_os("HOME")?;
    let path = std::path::Path::new(&home).join(".config/shoal/config.toml");
    let text = std::fs::read_to_string(&path).ok()?;
    match toml::from_str(&text) {
        Ok(overlay) => Some(overlay),
        Err(e) => {
            log::warn!("ignoring malformed config {}: {e}", path.display());
            None
        }
    }
}
