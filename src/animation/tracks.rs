use serde::{Deserialize, Serialize};

use crate::animation::values::Interpolatable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InterpolationMode {
    #[default]
    Linear,
    Step,
}

const MAX_SCAN_OFFSET: usize = 3;

#[derive(Debug, Clone, Default)]
pub struct KeyframeCursor {
    pub last_index: usize,
}

/// Why a keyframe track was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackDefect {
    Empty,
    LengthMismatch { times: usize, values: usize },
    Unsorted { index: usize },
    NonFinite { index: usize },
}

impl std::fmt::Display for TrackDefect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "track has no keyframes"),
            Self::LengthMismatch { times, values } => {
                write!(f, "{times} timestamps but {values} values")
            }
            Self::Unsorted { index } => {
                write!(f, "timestamp {index} is earlier than its predecessor")
            }
            Self::NonFinite { index } => write!(f, "timestamp {index} is not finite"),
        }
    }
}

/// Time-stamped samples of a single animated property.
///
/// `times` is sorted ascending and has the same length as `values`; use
/// [`validate`](Self::validate) on imported data before sampling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyframeTrack<T: Interpolatable> {
    pub times: Vec<f32>,
    pub values: Vec<T>,
    pub interpolation: InterpolationMode,
}

impl<T: Interpolatable> KeyframeTrack<T> {
    #[must_use]
    pub fn new(times: Vec<f32>, values: Vec<T>, interpolation: InterpolationMode) -> Self {
        Self {
            times,
            values,
            interpolation,
        }
    }

    /// A track holding one value forever.
    #[must_use]
    pub fn constant(value: T) -> Self {
        Self::new(vec![0.0], vec![value], InterpolationMode::Linear)
    }

    /// Builds a linear track from `(time, value)` pairs.
    #[must_use]
    pub fn from_keyframes(keyframes: &[(f32, T)]) -> Self {
        let (times, values) = keyframes.iter().copied().unzip();
        Self::new(times, values, InterpolationMode::Linear)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Time of the last keyframe, or `0.0` for an empty track.
    #[must_use]
    pub fn end_time(&self) -> f32 {
        self.times.last().copied().unwrap_or(0.0)
    }

    /// Checks the invariants sampling relies on.
    pub fn validate(&self) -> Result<(), TrackDefect> {
        if self.times.is_empty() {
            return Err(TrackDefect::Empty);
        }
        if self.times.len() != self.values.len() {
            return Err(TrackDefect::LengthMismatch {
                times: self.times.len(),
                values: self.values.len(),
            });
        }
        if let Some(index) = self.times.iter().position(|t| !t.is_finite()) {
            return Err(TrackDefect::NonFinite { index });
        }
        if let Some(index) = self.times.windows(2).position(|w| w[1] < w[0]) {
            return Err(TrackDefect::Unsorted { index: index + 1 });
        }
        Ok(())
    }

    #[must_use]
    pub fn sample(&self, time: f32) -> T {
        assert!(!self.times.is_empty(), "Track is empty");

        // partition_point finds the first index where t > time, i.e. next_index
        let next_idx = self.times.partition_point(|&t| t <= time);

        if next_idx == 0 {
            // Before the first keyframe: clamp, no extrapolation
            return self.values[0];
        }

        self.sample_at_frame(next_idx - 1, time)
    }

    /// Sampling with cursor.
    ///
    /// Produces the same value as [`sample`](Self::sample), but remembers the
    /// keyframe used so that monotonic playback finds the next one in O(1).
    pub fn sample_with_cursor(&self, time: f32, cursor: &mut KeyframeCursor) -> T {
        assert!(!self.times.is_empty(), "Track is empty");

        let len = self.times.len();
        // Fast path: static data (single keyframe)
        if len == 1 {
            return self.values[0];
        }

        if time < self.times[0] {
            cursor.last_index = 0;
            return self.values[0];
        }

        // Cursor may be out of bounds if the track was swapped under it
        let i = cursor.last_index.min(len - 1);
        let t_curr = self.times[i];

        let found_index = if time >= t_curr {
            // Forward playback: scan a few intervals ahead
            let mut res = None;
            for offset in 0..=MAX_SCAN_OFFSET {
                let idx = i + offset;
                if idx >= len - 1 {
                    // time >= times[i] >= ... so we are past the last keyframe
                    res = Some(len - 1);
                    break;
                }
                if time < self.times[idx + 1] {
                    res = Some(idx);
                    break;
                }
            }
            res
        } else {
            // Backward: loop wrap or scrubbing
            let mut res = None;
            for offset in 1..=MAX_SCAN_OFFSET {
                if i < offset {
                    break;
                }
                let idx = i - offset;
                if time >= self.times[idx] {
                    res = Some(idx);
                    break;
                }
            }
            res
        };

        let final_index = found_index.unwrap_or_else(|| {
            // Large jump: fall back to binary search
            let next_idx = self.times.partition_point(|&t| t <= time);
            next_idx.saturating_sub(1)
        });
        cursor.last_index = final_index;

        self.sample_at_frame(final_index, time)
    }

    /// Interpolates inside `[times[index], times[index + 1])`.
    ///
    /// `time` must not be before `times[index]` (or index must be 0 and the
    /// caller has already clamped).
    fn sample_at_frame(&self, index: usize, time: f32) -> T {
        let len = self.times.len();

        // No next frame available: hold the last value
        if index >= len - 1 {
            return self.values[len - 1];
        }

        let next_idx = index + 1;
        let t0 = self.times[index];
        let t1 = self.times[next_idx];
        let dt = t1 - t0;

        // A zero-length interval jumps straight to the post-keyframe value
        let factor = if dt > 0.0 { (time - t0) / dt } else { 1.0 };
        let factor = factor.clamp(0.0, 1.0);

        let v0 = self.values[index];
        let v1 = self.values[next_idx];

        match self.interpolation {
            InterpolationMode::Step => {
                if factor >= 1.0 {
                    v1
                } else {
                    v0
                }
            }
            InterpolationMode::Linear => {
                // Exact keyframe values at the boundaries
                if factor <= 0.0 {
                    v0
                } else if factor >= 1.0 {
                    v1
                } else {
                    T::interpolate_linear(v0, v1, factor)
                }
            }
        }
    }
}
