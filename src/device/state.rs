use serde::{Deserialize, Serialize};

/// Snapshot the device reports for `STATE`. Fields the firmware omits
/// (an RGB mode does not report HSL channels and vice versa) stay
/// `None`. Never cached; stale the moment any later command lands.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceState {
    pub mode: Option<i64>,
    pub h: Option<i64>,
    pub s: Option<i64>,
    pub l: Option<i64>,
    pub r: Option<i64>,
    pub g: Option<i64>,
    pub b: Option<i64>,
    pub interval: Option<i64>,
}

/// Pick the state out of a raw reply buffer.
///
/// The device may echo a previous command or emit more than one JSON
/// object before we get around to reading; the channel does not
/// demultiplex, so this parse walks every object it can find and keeps
/// the last complete one, which reflects the most recent state.
/// Returns `None` when no complete object parses.
pub fn parse_state(raw: &[u8]) -> Option<DeviceState> {
    let text = String::from_utf8_lossy(raw);
    let mut last = None;

    for line in text.lines() {
        // Echo noise may precede the object on the same line.
        let Some(start) = line.find('{') else { continue };
        for value in serde_json::Deserializer::from_str(&line[start..]).into_iter::<DeviceState>()
        {
            match value {
                Ok(state) => last = Some(state),
                Err(_) => break,
            }
        }
    }

    last
}
