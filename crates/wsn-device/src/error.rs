use thiserror::Error;

use wsn_core::{DeviceId, Timestamp};

#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("radio of {device} is busy transmitting until {until}")]
    RadioBusy {
        device: DeviceId,
        until:  Timestamp,
    },

    #[error("a device population needs at least one device")]
    NoDevices,

    #[error("layout parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type DeviceResult<T> = Result<T, DeviceError>;
