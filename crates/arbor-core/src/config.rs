//! Configuration loading and typed config structures for the Arbor engine.
//!
//! The configuration lives in `arbor-config.yaml`. Every field has a
//! default, so a missing section or an empty file yields a runnable setup
//! for the default tree on `localhost:4444`.

use std::path::Path;

use arbor_types::TreeShape;
use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// An environment override could not be parsed.
    #[error("invalid value {value:?} for {variable}")]
    InvalidOverride {
        /// The environment variable.
        variable: &'static str,
        /// Its raw value.
        value: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level engine configuration, mirroring `arbor-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ArborConfig {
    /// Tree shape used to generate the topology.
    #[serde(default)]
    pub tree: TreeShape,

    /// Display peripheral connection.
    #[serde(default)]
    pub display: DisplayConfig,

    /// Show rotation and timing.
    #[serde(default)]
    pub show: ShowConfig,
}

impl ArborConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override YAML values for the connection:
    /// - `ARBOR_DISPLAY_HOST` overrides `display.host`
    /// - `ARBOR_DISPLAY_PORT` overrides `display.port`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::InvalidOverride`] for an unparsable port override.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string, then apply environment
    /// overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yml::from_str(yaml)?
        };
        config.display.apply_env_overrides()?;
        Ok(config)
    }
}

/// Connection to the display peripheral.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DisplayConfig {
    /// Peripheral host name or address.
    #[serde(default = "default_host")]
    pub host: String,

    /// Peripheral TCP port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Channel token prefixed to every line.
    #[serde(default = "default_channel")]
    pub channel: String,

    /// Log every emitted protocol line at debug level.
    #[serde(default)]
    pub debug: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            channel: default_channel(),
            debug: false,
        }
    }
}

impl DisplayConfig {
    /// Apply `ARBOR_DISPLAY_HOST` and `ARBOR_DISPLAY_PORT` if set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOverride`] if the port is not a number.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(host) = std::env::var("ARBOR_DISPLAY_HOST") {
            self.host = host;
        }
        if let Ok(port) = std::env::var("ARBOR_DISPLAY_PORT") {
            self.port = port
                .trim()
                .parse()
                .ok()
                .ok_or_else(|| ConfigError::InvalidOverride {
                    variable: "ARBOR_DISPLAY_PORT",
                    value: port.clone(),
                })?;
        }
        Ok(())
    }
}

/// Show rotation and frame timing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ShowConfig {
    /// Show names to cycle through, in order. Empty means every known show.
    #[serde(default)]
    pub rotation: Vec<String>,

    /// Seconds of show time before moving to the next show.
    #[serde(default = "default_seconds_per_show")]
    pub seconds_per_show: f64,

    /// Stop after this many frames. 0 runs until interrupted.
    #[serde(default)]
    pub max_frames: u64,

    /// Seed for reproducible runs. Unset draws from the OS.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Global intensity sent to the peripheral at start-up.
    #[serde(default = "default_intensity")]
    pub intensity: u8,
}

impl Default for ShowConfig {
    fn default() -> Self {
        Self {
            rotation: Vec::new(),
            seconds_per_show: default_seconds_per_show(),
            max_frames: 0,
            seed: None,
            intensity: default_intensity(),
        }
    }
}

fn default_host() -> String {
    "localhost".to_owned()
}

const fn default_port() -> u16 {
    4444
}

fn default_channel() -> String {
    "1".to_owned()
}

const fn default_seconds_per_show() -> f64 {
    300.0
}

const fn default_intensity() -> u8 {
    255
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn empty_yaml_gives_defaults() {
        let config = ArborConfig::parse("").unwrap();
        assert_eq!(config.tree, TreeShape::default());
        assert_eq!(config.display.channel, "1");
        assert_eq!(config.show.seconds_per_show, 300.0);
        assert_eq!(config.show.intensity, 255);
        assert!(config.show.rotation.is_empty());
    }

    #[test]
    fn sections_parse() {
        let yaml = r"
tree:
  trunks: 2
  max_generation: 1
  branches: 3
  generation_lengths: [10, 6]
display:
  channel: '2'
  debug: true
show:
  rotation: [Sparkles, Ring]
  seconds_per_show: 12.5
  max_frames: 100
  seed: 42
";
        let config = ArborConfig::parse(yaml).unwrap();
        assert_eq!(config.tree.trunks, 2);
        assert_eq!(config.tree.generation_lengths, vec![10, 6]);
        assert!(config.tree.validate().is_ok());
        assert_eq!(config.display.channel, "2");
        assert!(config.display.debug);
        assert_eq!(config.show.rotation, vec!["Sparkles", "Ring"]);
        assert_eq!(config.show.max_frames, 100);
        assert_eq!(config.show.seed, Some(42));
    }

    #[test]
    fn bad_yaml_is_an_error() {
        assert!(matches!(
            ArborConfig::parse("tree: [unclosed"),
            Err(ConfigError::Yaml { .. })
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = ArborConfig::from_file(Path::new("/definitely/not/here.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
