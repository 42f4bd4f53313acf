pub mod command;
pub mod controller;
pub mod state;

pub use command::{Command, CommandArg};
pub use controller::LedController;
pub use state::DeviceState;

#[derive(Debug, thiserror::Error)]
pub enum DeviceError {
    #[error("Controller is not open")]
    NotOpen,

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Serial communication error: {0}")]
    Serial(#[from] crate::serial::SerialError),
}

pub type Result<T> = std::result::Result<T, DeviceError>;
