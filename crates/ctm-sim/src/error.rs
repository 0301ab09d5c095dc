use ctm_flow::FlowError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("step failed: {0}")]
    Flow(#[from] FlowError),
}

pub type SimResult<T> = Result<T, SimError>;
