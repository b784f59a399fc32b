use super::bytes::{pack, unpack};
use serde::{Deserialize, Serialize};

/// Display-ready waveform: one loudness value (0-255) per column
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaveformBuffer {
    columns: Vec<u8>,
}

impl WaveformBuffer {
    pub fn new(columns: Vec<u8>) -> Self {
        Self { columns }
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.columns
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.columns
    }

    /// Pack into signed bytes for storage
    pub fn to_packed(&self) -> Vec<i8> {
        let values: Vec<i32> = self.columns.iter().map(|&c| c as i32).collect();
        pack(&values)
    }

    /// Rebuild from packed bytes.
    ///
    /// Column 255 is stored as 127 and comes back intact; every other column
    /// round-trips exactly.
    pub fn from_packed(bytes: &[i8]) -> Self {
        let columns = unpack(bytes)
            .into_iter()
            .map(|v| v.clamp(0, 255) as u8)
            .collect();
        Self { columns }
    }
}

impl From<Vec<u8>> for WaveformBuffer {
    fn from(columns: Vec<u8>) -> Self {
        Self::new(columns)
    }
}

impl AsRef<[u8]> for WaveformBuffer {
    fn as_ref(&self) -> &[u8] {
        &self.columns
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packed_round_trip() {
        let buffer = WaveformBuffer::new(vec![0, 1, 127, 128, 254, 255]);
        let packed = buffer.to_packed();
        assert_eq!(packed, vec![-128, -127, -1, 0, 126, 127]);
        assert_eq!(WaveformBuffer::from_packed(&packed), buffer);
    }

    #[test]
    fn test_empty() {
        let buffer = WaveformBuffer::default();
        assert!(buffer.is_empty());
        assert!(buffer.to_packed().is_empty());
    }
}
