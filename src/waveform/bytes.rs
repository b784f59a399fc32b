//! Compact signed-byte storage for waveform columns
//!
//! `pack` saturates values of 255 and above to 127 and clamps negatives to 0
//! before shifting into the signed range; `unpack` only shifts back. The pair
//! round-trips `0..=254` exactly. Everything else is lossy: `>= 255` comes back
//! as 255 and negatives come back as 128.

/// Shift column values into signed bytes
pub fn pack(values: &[i32]) -> Vec<i8> {
    values
        .iter()
        .map(|&v| {
            if v >= 255 {
                127
            } else if v < 0 {
                0
            } else {
                (v - 128) as i8
            }
        })
        .collect()
}

/// Shift signed bytes back into column values
pub fn unpack(bytes: &[i8]) -> Vec<i32> {
    bytes.iter().map(|&b| b as i32 + 128).collect()
}
