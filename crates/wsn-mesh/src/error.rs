use thiserror::Error;

use wsn_core::WsnError;
use wsn_device::DeviceError;
use wsn_sim::SimError;

#[derive(Debug, Error)]
pub enum MeshError {
    #[error("mesh configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Device(#[from] DeviceError),

    #[error(transparent)]
    Sim(#[from] SimError),

    #[error(transparent)]
    Core(#[from] WsnError),
}

pub type MeshResult<T> = Result<T, MeshError>;
