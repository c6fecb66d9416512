//! Minimal RIFF/WAV header probe.
//!
//! Reads just enough of the container to learn the byte rate and block
//! alignment. Anything unexpected returns `None` — callers fall back to a
//! flat estimate rather than failing the request.

/// Facts extracted from a WAV `fmt ` chunk plus the `data` chunk length.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WavInfo {
    /// Bytes of audio per second (`byte_rate` from `fmt `).
    pub byte_rate: u32,
    /// Sample frame size in bytes; chunk boundaries must align to this.
    pub block_align: u16,
    /// Length of the `data` chunk payload in bytes.
    pub data_len: u32,
}

impl WavInfo {
    /// Audio duration in seconds implied by the header.
    #[must_use]
    pub fn duration_seconds(&self) -> f64 {
        if self.byte_rate == 0 {
            return 0.0;
        }
        f64::from(self.data_len) / f64::from(self.byte_rate)
    }
}

fn read_u32(bytes: &[u8], at: usize) -> Option<u32> {
    Some(u32::from_le_bytes(bytes.get(at..at + 4)?.try_into().ok()?))
}

fn read_u16(bytes: &[u8], at: usize) -> Option<u16> {
    Some(u16::from_le_bytes(bytes.get(at..at + 2)?.try_into().ok()?))
}

/// Probe a byte blob for a RIFF/WAVE header.
///
/// Scans the chunk list for `fmt ` and `data`. Returns `None` for
/// non-WAV input, truncated headers, or a zero byte rate.
#[must_use]
pub fn probe_wav(bytes: &[u8]) -> Option<WavInfo> {
    if bytes.len() < 12 || &bytes[0..4] != b"RIFF" || &bytes[8..12] != b"WAVE" {
        return None;
    }

    let mut byte_rate = None;
    let mut block_align = None;
    let mut data_len = None;

    let mut at = 12usize;
    while at + 8 <= bytes.len() {
        let id = &bytes[at..at + 4];
        let size = read_u32(bytes, at + 4)? as usize;
        let body = at + 8;

        match id {
            b"fmt " => {
                byte_rate = read_u32(bytes, body + 8);
                block_align = read_u16(bytes, body + 12);
            }
            b"data" => {
                // data may legitimately be the last, possibly truncated, chunk
                let available = bytes.len().saturating_sub(body);
                data_len = Some(size.min(available) as u32);
            }
            _ => {}
        }

        // Chunks are word-aligned; odd sizes carry a pad byte.
        at = body + size + (size % 2);
    }

    let info = WavInfo {
        byte_rate: byte_rate?,
        block_align: block_align?,
        data_len: data_len?,
    };
    if info.byte_rate == 0 {
        return None;
    }
    Some(info)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
