//! Heuristic key-change detection.

use score_model::{Key, NoteEvent};
use tracing::{debug, info};

use crate::theory::KeyContext;

/// Default notes per estimation window.
pub const DEFAULT_WINDOW_SIZE: usize = 8;

/// Default window advance in notes.
pub const DEFAULT_STRIDE: usize = 4;

/// Backend for windowed key estimation.
///
/// The engine ships no estimator of its own; callers plug in whatever
/// capability they have (profile correlation, a learned model behind a
/// service boundary). Returning `None` skips the window.
pub trait KeyEstimator: Send + Sync {
    fn estimate(&self, window: &[NoteEvent]) -> Option<Key>;
}

impl<F> KeyEstimator for F
where
    F: Fn(&[NoteEvent]) -> Option<Key> + Send + Sync,
{
    fn estimate(&self, window: &[NoteEvent]) -> Option<Key> {
        self(window)
    }
}

/// Sliding-window modulation detector.
///
/// Best-effort pre-pass: registers a modulation when a window's
/// estimated key differs from the currently tracked one, leaving
/// existing registrations untouched. Conversion works fine without it.
#[derive(Debug, Clone)]
pub struct KeyChangeDetector {
    window_size: usize,
    stride: usize,
}

impl Default for KeyChangeDetector {
    fn default() -> Self {
        KeyChangeDetector::new(DEFAULT_WINDOW_SIZE, DEFAULT_STRIDE)
    }
}

impl KeyChangeDetector {
    pub fn new(window_size: usize, stride: usize) -> Self {
        KeyChangeDetector {
            window_size,
            stride,
        }
    }

    /// Slide over `notes` in chronological order, registering detected
    /// modulations into `context` at each window's first measure.
    pub fn detect(
        &self,
        notes: &[NoteEvent],
        estimator: &dyn KeyEstimator,
        context: &mut KeyContext,
    ) {
        if self.window_size == 0 || self.stride == 0 || notes.len() < self.window_size {
            return;
        }

        let mut current = context.base_key();

        let mut start = 0;
        while start < notes.len() - self.window_size {
            let window = &notes[start..start + self.window_size];

            match estimator.estimate(window) {
                Some(detected) => match current {
                    None => current = Some(detected),
                    Some(tracked) if detected != tracked => {
                        let measure = window[0].measure_number;
                        if !context.has_modulation_at(measure) {
                            info!(measure, from = %tracked, to = %detected, "potential modulation");
                            context.register_modulation(measure, detected);
                            current = Some(detected);
                        }
                    }
                    Some(_) => {}
                },
                None => debug!(start, "key estimation returned nothing for window"),
            }

            start += self.stride;
        }
    }
}
