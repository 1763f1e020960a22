use crate::error::{CropSenseError, Result};
use dialoguer::Input;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub model: ModelConfig,
    pub openweathermap: OpenWeatherMapConfig,
    #[serde(default)]
    pub rainfall: RainfallConfig,
    #[serde(default)]
    pub geolocation: GeolocationConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ModelConfig {
    #[serde(default = "default_scaler_path")]
    pub scaler_path: PathBuf,
    #[serde(default = "default_model_path")]
    pub model_path: PathBuf,
}

fn default_scaler_path() -> PathBuf {
    PathBuf::from("model/scaler.json")
}

fn default_model_path() -> PathBuf {
    PathBuf::from("model/crop_model.json")
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            scaler_path: default_scaler_path(),
            model_path: default_model_path(),
        }
    }
}

#[derive(Clone, Deserialize, Serialize, Default)]
pub struct OpenWeatherMapConfig {
    pub api_key: String,
}

impl std::fmt::Debug for OpenWeatherMapConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenWeatherMapConfig")
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct RainfallConfig {
    /// Trailing window averaged over, in days.
    #[serde(default = "default_window_days")]
    pub window_days: u32,
    /// Days skipped at the recent end; the provider publishes behind real
    /// time.
    #[serde(default = "default_lag_days")]
    pub lag_days: u32,
}

fn default_window_days() -> u32 {
    30
}

fn default_lag_days() -> u32 {
    5
}

impl Default for RainfallConfig {
    fn default() -> Self {
        Self {
            window_days: default_window_days(),
            lag_days: default_lag_days(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeolocationConfig {
    #[serde(default = "default_primary_url")]
    pub primary_url: String,
    #[serde(default = "default_fallback_url")]
    pub fallback_url: String,
    #[serde(default = "default_geo_timeout")]
    pub timeout_secs: u64,
}

fn default_primary_url() -> String {
    "https://ipapi.co/json/".into()
}

fn default_fallback_url() -> String {
    "http://ip-api.com/json/".into()
}

fn default_geo_timeout() -> u64 {
    5
}

impl Default for GeolocationConfig {
    fn default() -> Self {
        Self {
            primary_url: default_primary_url(),
            fallback_url: default_fallback_url(),
            timeout_secs: default_geo_timeout(),
        }
    }
}

impl Config {
    pub fn load(config_override: Option<PathBuf>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) => p,
            None => Self::find_config_path()?,
        };

        if !config_path.exists() {
            return Err(CropSenseError::Config(format!(
                "Config file not found at {:?}. Run `cropsense init` to set up.",
                config_path
            )));
        }

        let config_str = std::fs::read_to_string(&config_path)
            .map_err(|e| CropSenseError::Config(format!("Failed to read config: {}", e)))?;

        // Substitute environment variables
        let config_str = Self::substitute_env_vars(&config_str);

        let config: Config = serde_yaml::from_str(&config_str)
            .map_err(|e| CropSenseError::Config(format!("Failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Search for config.yaml in standard locations.
    /// Returns the path of the first found config, or the XDG default path if none found.
    fn find_config_path() -> Result<PathBuf> {
        // Try current directory first
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Ok(local_config);
        }

        // Try XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("cropsense").join("config.yaml");
            if xdg_config.exists() {
                return Ok(xdg_config);
            }
        }

        // Return XDG path as the default (will trigger "not found" in load)
        let default_path = dirs::config_dir()
            .ok_or_else(|| CropSenseError::Config("Cannot determine config directory".into()))?
            .join("cropsense")
            .join("config.yaml");
        Ok(default_path)
    }

    /// Returns true if a config file can be found in any standard location.
    pub fn exists(config_override: Option<&PathBuf>) -> bool {
        match config_override {
            Some(p) => p.exists(),
            None => Self::find_config_path()
                .map(|p| p.exists())
                .unwrap_or(false),
        }
    }

    /// Default path for writing new config files (~/.config/cropsense/config.yaml).
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CropSenseError::Config("Cannot determine config directory".into()))?
            .join("cropsense");
        Ok(config_dir.join("config.yaml"))
    }

    /// Run interactive setup prompts and write config to disk.
    /// Returns the loaded Config and the path it was written to.
    pub fn setup_interactive() -> Result<(Self, PathBuf)> {
        println!();
        println!("No configuration found. Let's set up CropSense!");
        println!();

        // --- OpenWeatherMap ---
        println!("OpenWeatherMap (required for live mode)");
        let owm_api_key: String = Input::new()
            .with_prompt("  API key (or ${OPENWEATHER_API_KEY} to read it from the environment)")
            .default("${OPENWEATHER_API_KEY}".into())
            .interact_text()
            .map_err(|e| CropSenseError::Config(format!("Input error: {}", e)))?;

        println!();

        // --- Model artifacts ---
        println!("Model artifacts");
        let scaler_path: String = Input::new()
            .with_prompt("  Scaler artifact path")
            .default("model/scaler.json".into())
            .interact_text()
            .map_err(|e| CropSenseError::Config(format!("Input error: {}", e)))?;

        let model_path: String = Input::new()
            .with_prompt("  Model artifact path")
            .default("model/crop_model.json".into())
            .interact_text()
            .map_err(|e| CropSenseError::Config(format!("Input error: {}", e)))?;

        println!();

        // --- Rainfall window ---
        println!("Rainfall estimate (NASA POWER)");
        let window_days: u32 = Input::new()
            .with_prompt("  Trailing window (days)")
            .default(30)
            .interact_text()
            .map_err(|e| CropSenseError::Config(format!("Input error: {}", e)))?;

        let lag_days: u32 = Input::new()
            .with_prompt("  Publication lag (days)")
            .default(5)
            .interact_text()
            .map_err(|e| CropSenseError::Config(format!("Input error: {}", e)))?;

        println!();

        let config = Config {
            model: ModelConfig {
                scaler_path: scaler_path.into(),
                model_path: model_path.into(),
            },
            openweathermap: OpenWeatherMapConfig {
                api_key: owm_api_key,
            },
            rainfall: RainfallConfig {
                window_days,
                lag_days,
            },
            geolocation: GeolocationConfig::default(),
        };

        // Write to default config path
        let config_path = Self::default_config_path()?;
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(&config)
            .map_err(|e| CropSenseError::Config(format!("Failed to serialize config: {}", e)))?;

        // Write with a header comment
        let content = format!(
            "# CropSense Configuration\n# Generated by `cropsense init`\n# Environment variable substitution (${{VAR}}) is supported.\n\n{}",
            yaml
        );
        std::fs::write(&config_path, content)?;

        println!("Configuration saved to {}", config_path.display());
        println!();

        Ok((config, config_path))
    }

    fn substitute_env_vars(content: &str) -> String {
        let mut result = content.to_string();

        // Find all ${VAR_NAME} patterns and substitute
        let re = regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").unwrap();

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];
            if let Ok(value) = std::env::var(var_name) {
                result = result.replace(placeholder, &value);
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_var_substitution() {
        std::env::set_var("CROPSENSE_TEST_KEY", "abc123");
        let substituted =
            Config::substitute_env_vars("openweathermap:\n  api_key: ${CROPSENSE_TEST_KEY}\n");
        assert!(substituted.contains("api_key: abc123"));
    }

    #[test]
    fn unknown_env_var_is_left_alone() {
        let content = "api_key: ${CROPSENSE_DEFINITELY_UNSET_VAR}";
        assert_eq!(Config::substitute_env_vars(content), content);
    }

    #[test]
    fn api_key_is_redacted_in_debug_output() {
        let config = OpenWeatherMapConfig {
            api_key: "secret-key".into(),
        };
        let rendered = format!("{:?}", config);
        assert!(rendered.contains("[REDACTED]"));
        assert!(!rendered.contains("secret-key"));
    }

    #[test]
    fn minimal_yaml_uses_defaults() {
        let config: Config = serde_yaml::from_str(
            "model:\n  scaler_path: model/scaler.json\n  model_path: model/crop_model.json\nopenweathermap:\n  api_key: k\n",
        )
        .unwrap();

        assert_eq!(config.rainfall.window_days, 30);
        assert_eq!(config.rainfall.lag_days, 5);
        assert_eq!(config.geolocation.timeout_secs, 5);
        assert_eq!(config.geolocation.primary_url, "https://ipapi.co/json/");
        assert_eq!(config.geolocation.fallback_url, "http://ip-api.com/json/");
    }
}
