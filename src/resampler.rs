//! Effort-dial resampling
//!
//! The runner logs dial presses only when the mouse moves, so a trial's trace
//! is a sparse, irregularly spaced sequence. This module resamples a trace
//! onto a uniform grid over the trial duration via linear interpolation, with
//! clamp-to-endpoint behavior outside the recorded range.

use crate::schema::DialSample;

/// Sampling grid configuration for dial resampling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialConfig {
    /// Nominal samples per second of the output grid
    pub poll: u32,
    /// Frame rate of the trial presentation
    pub fps: u32,
    /// Total frames in the trial
    pub frames: u32,
}

impl Default for DialConfig {
    /// A 15-second trial at 24 fps, sampled at ~20 Hz
    fn default() -> Self {
        Self {
            poll: 20,
            fps: 24,
            frames: 360,
        }
    }
}

impl DialConfig {
    /// Trial duration in milliseconds
    pub fn duration_ms(&self) -> f32 {
        1000.0 * self.frames as f32 / self.fps as f32
    }

    /// Number of points on the output grid
    pub fn steps(&self) -> usize {
        ((self.poll as f64 * self.frames as f64) / self.fps as f64).ceil() as usize
    }
}

/// Resample a sorted dial trace onto the uniform grid described by `config`.
///
/// The grid spans `[0, duration_ms]` inclusive of both endpoints. Input
/// samples must be sorted by time ascending; an empty input yields an empty
/// output (callers filter empty traces out beforehand).
pub fn resample(samples: &[DialSample], config: &DialConfig) -> Vec<DialSample> {
    if samples.is_empty() {
        return Vec::new();
    }

    let steps = config.steps();
    let dur = config.duration_ms();
    (0..steps)
        .map(|i| {
            let t = if steps > 1 {
                dur * i as f32 / (steps - 1) as f32
            } else {
                0.0
            };
            DialSample(t, interp(t, samples))
        })
        .collect()
}

/// Linear interpolation at time `t`, clamping to the first/last sample's
/// scale outside the recorded range. `samples` must be non-empty and sorted.
fn interp(t: f32, samples: &[DialSample]) -> f32 {
    let first = samples[0];
    let last = samples[samples.len() - 1];
    if t <= first.time_ms() {
        return first.scale();
    }
    if t >= last.time_ms() {
        return last.scale();
    }
    for pair in samples.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if t <= b.time_ms() {
            let span = b.time_ms() - a.time_ms();
            if span <= 0.0 {
                return b.scale();
            }
            let frac = (t - a.time_ms()) / span;
            return a.scale() + frac * (b.scale() - a.scale());
        }
    }
    last.scale()
}
