use std::time::Duration;

use crate::serial::channel::CommandChannel;
use crate::serial::transport::{SerialTransport, Transport};
use crate::serial::SerialConfig;

use super::command::{Command, CommandArg};
use super::state::{parse_state, DeviceState};
use super::{DeviceError, Result};

pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_millis(1000);

/// Typed façade over the command channel. Owns the transport for its
/// whole lifetime; exactly one controller per physical device, no
/// sharing. All operations fail with `NotOpen` after `close`.
pub struct LedController {
    channel: Option<CommandChannel>,
    read_timeout: Duration,
}

impl LedController {
    /// Open the device on `port_name` with the default 9600/8/1/N
    /// framing.
    pub fn open(port_name: &str) -> Result<Self> {
        Self::open_with_config(port_name, &SerialConfig::default())
    }

    pub fn open_with_config(port_name: &str, config: &SerialConfig) -> Result<Self> {
        let transport = SerialTransport::open(port_name, config)?;
        Ok(Self::from_transport(Box::new(transport)))
    }

    /// Build a controller over an already-open transport, for driving
    /// the protocol across something other than a local serial port.
    pub fn from_transport(transport: Box<dyn Transport>) -> Self {
        Self {
            channel: Some(CommandChannel::new(transport)),
            read_timeout: DEFAULT_READ_TIMEOUT,
        }
    }

    /// How long `current_state` waits for the device to answer.
    pub fn read_timeout(&self) -> Duration {
        self.read_timeout
    }

    pub fn set_read_timeout(&mut self, timeout: Duration) {
        self.read_timeout = timeout;
    }

    pub fn is_open(&self) -> bool {
        self.channel.is_some()
    }

    pub fn set_mode(&mut self, mode: impl Into<CommandArg>) -> Result<()> {
        self.send(Command::Mode(mode.into()))
    }

    pub fn set_hue(&mut self, h: impl Into<CommandArg>) -> Result<()> {
        self.send(Command::Hue(h.into()))
    }

    pub fn set_sat(&mut self, s: impl Into<CommandArg>) -> Result<()> {
        self.send(Command::Sat(s.into()))
    }

    pub fn set_lum(&mut self, l: impl Into<CommandArg>) -> Result<()> {
        self.send(Command::Lum(l.into()))
    }

    pub fn set_interval(&mut self, interval_ms: impl Into<CommandArg>) -> Result<()> {
        self.send(Command::Interval(interval_ms.into()))
    }

    pub fn set_red(&mut self, power: impl Into<CommandArg>) -> Result<()> {
        self.send(Command::Red(power.into()))
    }

    pub fn set_green(&mut self, power: impl Into<CommandArg>) -> Result<()> {
        self.send(Command::Grn(power.into()))
    }

    pub fn set_blue(&mut self, power: impl Into<CommandArg>) -> Result<()> {
        self.send(Command::Blu(power.into()))
    }

    /// Set all three HSL channels with a single command. Frame-rate
    /// callers should prefer this over three per-channel sends; each
    /// send pays the 18 ms floor.
    pub fn set_hsl(
        &mut self,
        h: impl Into<CommandArg>,
        s: impl Into<CommandArg>,
        l: impl Into<CommandArg>,
    ) -> Result<()> {
        self.send(Command::SetHsl(h.into(), s.into(), l.into()))
    }

    /// Set all three RGB channels with a single command.
    pub fn set_rgb(
        &mut self,
        r: impl Into<CommandArg>,
        g: impl Into<CommandArg>,
        b: impl Into<CommandArg>,
    ) -> Result<()> {
        self.send(Command::SetRgb(r.into(), g.into(), b.into()))
    }

    /// Commit pending HSL channels to the output.
    pub fn write_hsl(&mut self) -> Result<()> {
        self.send(Command::WriteHsl)
    }

    /// Commit pending RGB channels to the output.
    pub fn write_rgb(&mut self) -> Result<()> {
        self.send(Command::WriteRgb)
    }

    /// Persist current settings to the device's non-volatile storage.
    pub fn save(&mut self) -> Result<()> {
        self.send(Command::Save)
    }

    /// Query the device for its current state. Flushes stale input,
    /// sends `STATE` and waits up to `read_timeout` for the JSON
    /// reply. Fails with `Protocol` when nothing in the reply parses.
    pub fn current_state(&mut self) -> Result<DeviceState> {
        let timeout = self.read_timeout;
        let raw = self.channel_mut()?.query(&Command::State, Some(timeout))?;
        parse_state(&raw).ok_or_else(|| {
            log::warn!("STATE reply did not parse ({} bytes)", raw.len());
            DeviceError::Protocol(format!(
                "STATE reply did not contain a complete JSON object ({} bytes)",
                raw.len()
            ))
        })
    }

    /// Close the connection and release the port. Idempotent.
    pub fn close(&mut self) {
        if let Some(mut channel) = self.channel.take() {
            channel.close();
        }
    }

    fn channel_mut(&mut self) -> Result<&mut CommandChannel> {
        self.channel.as_mut().ok_or(DeviceError::NotOpen)
    }

    fn send(&mut self, command: Command) -> Result<()> {
        self.channel_mut()?.send(&command)?;
        Ok(())
    }
}
