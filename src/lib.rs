pub mod color;
pub mod device;
pub mod serial;

pub use color::{apply_frame, ColorFrame, ColorSource};
pub use device::{Command, DeviceError, DeviceState, LedController};
pub use serial::{CommandChannel, SerialConfig, SerialError, SerialTransport};
