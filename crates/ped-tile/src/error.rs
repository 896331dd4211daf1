use ped_core::{AgentId, PedError};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum TileError {
    #[error("invalid agent identity {0}")]
    InvalidAgent(AgentId),

    #[error("congestion score {0} is negative or not finite")]
    InvalidCongestion(f32),

    #[error(transparent)]
    Core(#[from] PedError),
}

pub type TileResult<T> = Result<T, TileError>;
