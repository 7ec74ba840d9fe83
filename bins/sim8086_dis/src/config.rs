use crate::error::Error;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Defaults for the disassembler, read from `config.toml`.  Anything passed on the command
/// line wins over these.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Inputs larger than this are refused.  Jumps that end past offset 0xFFFF keep their raw
    /// displacement even when targets are resolved.
    pub max_input_size: usize,
    /// Emit `bits 16` before the first instruction.
    pub header: bool,
    /// Prefix each line with its offset and raw bytes.
    pub listing: bool,
    /// Render jump operands as absolute targets.
    pub resolve_targets: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_input_size: 1024,
            header: true,
            listing: false,
            resolve_targets: false,
        }
    }
}

impl Config {
    /// `<config_dir>/sim8086/config.toml`, if the platform has a config directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("sim8086").join("config.toml"))
    }

    pub fn parse(path: &Path, text: &str) -> Result<Self, Error> {
        toml::from_str(text).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load the configuration.  An explicit path must exist; the default path is optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self, Error> {
        let (path, required) = match explicit {
            Some(path) => (path.to_path_buf(), true),
            None => match Self::default_path() {
                Some(path) => (path, false),
                None => return Ok(Self::default()),
            },
        };

        match std::fs::read_to_string(&path) {
            Ok(text) => {
                debug!("loading configuration from {}", path.display());
                Self::parse(&path, &text)
            }
            Err(err) if !required && err.kind() == std::io::ErrorKind::NotFound => {
                Ok(Self::default())
            }
            Err(source) => Err(Error::Read { path, source }),
        }
    }
}
