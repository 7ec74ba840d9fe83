use sim8086_decoder::DecodeError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("could not read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("could not write output: {0}")]
    Write(#[from] std::io::Error),

    #[error("invalid configuration in {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("input is {size} bytes, the maximum is {max} bytes")]
    InputTooLarge { size: usize, max: usize },

    #[error(transparent)]
    Decode(#[from] DecodeError),
}
