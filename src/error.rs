use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("an interactive terminal is required")]
    NotInteractive,

    #[error("terminal control failed: {0}")]
    Terminal(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
