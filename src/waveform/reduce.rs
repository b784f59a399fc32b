//! Amplitude samples to display columns
//!
//! Short recordings keep one column per sample. Long recordings are reduced to
//! `oversample * width` columns:
//! - sparse input (fewer than two samples per column) picks one sample per column
//! - dense input sums `ceil(scale)` samples per column and divides by `scale`
//!
//! The dense divisor is the fractional scale, not the number of summed samples,
//! so columns read slightly louder than a true mean when `scale` is fractional.

use super::buffer::WaveformBuffer;
use super::config::ReducerConfig;

/// Waveform reducer
#[derive(Debug, Clone, Copy, Default)]
pub struct Reducer {
    config: ReducerConfig,
}

impl Reducer {
    pub fn new(config: ReducerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ReducerConfig {
        &self.config
    }

    /// Reduce raw amplitude samples to a waveform for `target_width_px`
    pub fn reduce(&self, samples: &[i32], duration_secs: u32, target_width_px: u32) -> WaveformBuffer {
        if duration_secs <= self.config.long_recording_secs {
            let columns = samples.iter().map(|&s| self.normalize(s as f64)).collect();
            return WaveformBuffer::new(columns);
        }

        let column_count = self.config.column_count(target_width_px);
        let columns = if samples.is_empty() {
            vec![0; column_count]
        } else if samples.len() < column_count * 2 {
            self.point_sample(samples, column_count)
        } else {
            self.average(samples, column_count)
        };

        log::debug!(
            "Reduced {} samples ({}s) to {} columns for {}px",
            samples.len(),
            duration_secs,
            columns.len(),
            target_width_px
        );

        WaveformBuffer::new(columns)
    }

    fn point_sample(&self, samples: &[i32], column_count: usize) -> Vec<u8> {
        let scale = samples.len() as f32 / column_count as f32;
        let last = samples.len() - 1;

        (0..column_count)
            .map(|i| {
                let index = ((i as f64 * scale as f64).floor() as usize).min(last);
                self.normalize(samples[index] as f64)
            })
            .collect()
    }

    fn average(&self, samples: &[i32], column_count: usize) -> Vec<u8> {
        let scale = samples.len() as f32 / column_count as f32;
        let step = scale.ceil() as usize;
        let last = samples.len() - 1;

        (0..column_count)
            .map(|i| {
                let sum: i64 = (0..step)
                    .map(|j| {
                        // Float error can push the final column one past the end
                        let index = ((i as f32 * scale + j as f32) as usize).min(last);
                        samples[index] as i64
                    })
                    .sum();
                let value = (sum as f32 / scale) as i32;
                self.normalize(value as f64)
            })
            .collect()
    }

    /// Map a reduced sample onto 0-255, truncating then clamping
    fn normalize(&self, value: f64) -> u8 {
        let scaled = (255.0 * (value / self.config.full_scale)) as i64;
        scaled.clamp(0, 255) as u8
    }
}

/// Reduce with the default configuration
pub fn reduce(samples: &[i32], duration_secs: u32, target_width_px: u32) -> WaveformBuffer {
    Reducer::default().reduce(samples, duration_secs, target_width_px)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_recording_maps_every_sample() {
        let waveform = reduce(&[0, 16383, 32767, -32768], 5, 1080);
        assert_eq!(waveform.as_slice(), &[0, 127, 255, 0]);
    }

    #[test]
    fn test_custom_full_scale() {
        let reducer = Reducer::new(ReducerConfig::new().with_full_scale(510.0));
        let waveform = reducer.reduce(&[0, 255, 510, 2000], 5, 1080);
        assert_eq!(waveform.as_slice(), &[0, 127, 255, 255]);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let samples = vec![32767; 50];
        assert_eq!(reduce(&samples, 20, 10).len(), 50);
        assert_eq!(reduce(&samples, 21, 10).len(), 15);
    }

    #[test]
    fn test_short_empty_input() {
        assert!(reduce(&[], 3, 1080).is_empty());
    }

    #[test]
    fn test_long_empty_input_is_silent() {
        let waveform = reduce(&[], 60, 10);
        assert_eq!(waveform.as_slice(), &[0; 15]);
    }

    #[test]
    fn test_zero_width() {
        assert!(reduce(&[100, 200, 300], 60, 0).is_empty());
    }

    #[test]
    fn test_sparse_point_sampling() {
        // 20 samples onto 15 columns: scale 4/3, so column i reads floor(i * 4/3)
        let samples: Vec<i32> = (0..20).map(|i| i * 1000).collect();
        let waveform = reduce(&samples, 30, 10);

        let expected: Vec<u8> = (0..15)
            .map(|i| {
                let index = (i as f64 * (20.0f32 / 15.0f32) as f64).floor() as usize;
                (255.0 * (samples[index] as f64 / 32767.0)) as u8
            })
            .collect();
        assert_eq!(waveform.as_slice(), expected.as_slice());
        assert_eq!(waveform.as_slice()[0], 0);
        // floor(3 * 4/3) = 4 -> 4000
        assert_eq!(waveform.as_slice()[3], 31);
    }

    #[test]
    fn test_dense_uses_scale_as_divisor() {
        // 500 samples onto 150 columns: scale 3.33, four samples summed per column.
        // 4000 / 3.33 = 1200 -> 9, where a true mean (1000) would give 7.
        let samples = vec![1000; 500];
        let waveform = reduce(&samples, 45, 100);
        assert_eq!(waveform.len(), 150);
        assert!(waveform.as_slice().iter().all(|&c| c == 9));
    }

    #[test]
    fn test_dense_integer_scale_is_a_mean() {
        let samples: Vec<i32> = (0..600).map(|i| if i % 2 == 0 { 32767 } else { 0 }).collect();
        let waveform = reduce(&samples, 45, 100);
        // (32767 + 0 + 32767 + 0) / 4 = 16383 -> 127
        assert!(waveform.as_slice().iter().all(|&c| c == 127));
    }

    #[test]
    fn test_dense_never_indexes_past_end() {
        for count in (300..2000).step_by(7) {
            let samples = vec![32767; count];
            let waveform = reduce(&samples, 120, 100);
            assert_eq!(waveform.len(), 150);
        }
    }

    #[test]
    fn test_normalization_after_averaging() {
        // Averaging a negative and positive sample lands at 0, not at the mean of two bytes
        let samples: Vec<i32> = (0..300).map(|i| if i % 2 == 0 { -32768 } else { 32767 }).collect();
        let waveform = reduce(&samples, 45, 100);
        assert!(waveform.as_slice().iter().all(|&c| c == 0));
    }
}
