use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to start fetch runtime: {0}")]
    Runtime(#[from] io::Error),
}
