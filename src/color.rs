use serde::{Deserialize, Serialize};

use crate::device::{LedController, Result};

/// One frame's worth of color, in whichever space the producer works
/// in. Values are device-range integers, passed through verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorFrame {
    Rgb { r: i32, g: i32, b: i32 },
    Hsl { h: i32, s: i32, l: i32 },
}

/// A producer of one color per host frame, such as an audio spectrum
/// analyzer or a test pattern. Implementations live outside this
/// crate; the host frame loop owns the cadence and is expected to call
/// no faster than ~55 Hz so the serial rate floor never becomes the
/// bottleneck (each frame costs two commands, see `apply_frame`).
pub trait ColorSource {
    fn next_frame(&mut self) -> ColorFrame;
}

/// Forward one frame to the device: a composite channel set followed
/// by the matching commit verb, two commands total.
pub fn apply_frame(controller: &mut LedController, frame: ColorFrame) -> Result<()> {
    match frame {
        ColorFrame::Rgb { r, g, b } => {
            controller.set_rgb(r, g, b)?;
            controller.write_rgb()
        }
        ColorFrame::Hsl { h, s, l } => {
            controller.set_hsl(h, s, l)?;
            controller.write_hsl()
        }
    }
}
