use std::fmt;

/// One integer argument of a wire command. The firmware only reads
/// integers, so every conversion truncates toward zero; out-of-range
/// values are passed through verbatim (whether the firmware clamps
/// them is its own business).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandArg(pub i64);

impl From<i64> for CommandArg {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<i32> for CommandArg {
    fn from(value: i32) -> Self {
        Self(value as i64)
    }
}

impl From<u8> for CommandArg {
    fn from(value: u8) -> Self {
        Self(value as i64)
    }
}

impl From<f64> for CommandArg {
    fn from(value: f64) -> Self {
        Self(value as i64)
    }
}

impl From<f32> for CommandArg {
    fn from(value: f32) -> Self {
        Self(value as i64)
    }
}

impl fmt::Display for CommandArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A single command of the line-based protocol the LED firmware
/// speaks. `encode` produces the exact bytes for the wire:
/// `"<VERB> <arg> <arg>...\n"`, ASCII only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Ask the device to report mode/color/interval as a JSON object.
    State,
    /// Switch operating mode.
    Mode(CommandArg),
    /// Set the pending hue channel.
    Hue(CommandArg),
    /// Set the pending saturation channel.
    Sat(CommandArg),
    /// Set the pending luminance channel.
    Lum(CommandArg),
    /// Commit pending HSL to the output.
    WriteHsl,
    /// Set all three HSL channels in one command.
    SetHsl(CommandArg, CommandArg, CommandArg),
    /// Set the pending red channel.
    Red(CommandArg),
    /// Set the pending green channel.
    Grn(CommandArg),
    /// Set the pending blue channel.
    Blu(CommandArg),
    /// Commit pending RGB to the output.
    WriteRgb,
    /// Set all three RGB channels in one command.
    SetRgb(CommandArg, CommandArg, CommandArg),
    /// Set the animation interval in milliseconds.
    Interval(CommandArg),
    /// Persist current settings to device non-volatile storage.
    Save,
}

impl Command {
    /// The newline-terminated wire form of this command.
    pub fn encode(&self) -> String {
        format!("{self}\n")
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::State => write!(f, "STATE"),
            Command::Mode(n) => write!(f, "MODE {n}"),
            Command::Hue(n) => write!(f, "HUE {n}"),
            Command::Sat(n) => write!(f, "SAT {n}"),
            Command::Lum(n) => write!(f, "LUM {n}"),
            Command::WriteHsl => write!(f, "WRITEHSL"),
            Command::SetHsl(h, s, l) => write!(f, "SETHSL {h} {s} {l}"),
            Command::Red(n) => write!(f, "RED {n}"),
            Command::Grn(n) => write!(f, "GRN {n}"),
            Command::Blu(n) => write!(f, "BLU {n}"),
            Command::WriteRgb => write!(f, "WRITERGB"),
            Command::SetRgb(r, g, b) => write!(f, "SETRGB {r} {g} {b}"),
            Command::Interval(n) => write!(f, "INTERVAL {n}"),
            Command::Save => write!(f, "SAVE"),
        }
    }
}
