use std::io::{Read, Write};
use std::time::Duration;

use serialport::SerialPort;

use super::{Result, SerialConfig, SerialError};

/// Byte-level access to the device link. The channel layer only ever
/// talks to this trait, so tests can substitute a scripted transport.
///
/// Reads are non-blocking by contract: `read_available` returns only
/// bytes the driver has already buffered, never waiting for more.
pub trait Transport {
    fn write(&mut self, bytes: &[u8]) -> Result<()>;

    /// Number of unread bytes currently buffered. Returns immediately.
    fn bytes_available(&mut self) -> Result<usize>;

    /// Up to `max_bytes` already-buffered bytes, possibly empty.
    fn read_available(&mut self, max_bytes: usize) -> Result<Vec<u8>>;

    /// Releases the underlying handle. Idempotent.
    fn close(&mut self);
}

pub struct SerialTransport {
    port: Option<Box<dyn SerialPort>>,
    port_name: String,
}

impl SerialTransport {
    /// Open a serial port with the given framing. Fails when the port
    /// does not exist, is claimed by another process, or the driver
    /// rejects the parameters.
    pub fn open(port_name: &str, config: &SerialConfig) -> Result<Self> {
        let port = serialport::new(port_name, config.baud_rate)
            .data_bits(config.data_bits)
            .stop_bits(config.stop_bits)
            .parity(config.parity)
            .timeout(Duration::from_millis(10))
            .open()
            .map_err(|e| match e.kind {
                serialport::ErrorKind::NoDevice => {
                    SerialError::PortNotFound(port_name.to_string())
                }
                _ => SerialError::ConnectionFailed(e.to_string()),
            })?;

        log::info!("Opened {} at {} baud", port_name, config.baud_rate);
        Ok(Self {
            port: Some(port),
            port_name: port_name.to_string(),
        })
    }

    fn port_mut(&mut self) -> Result<&mut Box<dyn SerialPort>> {
        self.port
            .as_mut()
            .ok_or_else(|| SerialError::ConnectionFailed("Port is closed".to_string()))
    }
}

impl Transport for SerialTransport {
    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        let port = self.port_mut()?;
        port.write_all(bytes)?;
        port.flush()?;
        Ok(())
    }

    fn bytes_available(&mut self) -> Result<usize> {
        Ok(self.port_mut()?.bytes_to_read()? as usize)
    }

    fn read_available(&mut self, max_bytes: usize) -> Result<Vec<u8>> {
        let count = self.bytes_available()?.min(max_bytes);
        if count == 0 {
            return Ok(Vec::new());
        }

        let mut buffer = vec![0u8; count];
        self.port_mut()?.read_exact(&mut buffer)?;
        Ok(buffer)
    }

    fn close(&mut self) {
        if self.port.take().is_some() {
            log::info!("Closed {}", self.port_name);
        }
    }
}

impl Drop for SerialTransport {
    fn drop(&mut self) {
        self.close();
    }
}
