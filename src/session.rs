use crate::generator::{generate, Alphabet};
use crate::report::FinalReport;
use rand::Rng;
use std::time::{Duration, Instant};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

#[derive(Clone, Debug, Copy, PartialEq, Eq)]
pub enum Outcome {
    Correct,
    Incorrect,
    /// submitted after the session was already complete
    Ignored,
}

/// How a single target character should be drawn relative to the cursor
#[derive(Clone, Debug, Copy, PartialEq, Eq)]
pub enum CharState {
    Consumed,
    Current,
    Pending,
}

/// The state of one typing run: target text, progress, mistakes and timing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypingSession {
    target: Vec<char>,
    cursor: usize,
    fail_count: usize,
    typed_count: usize,
    started_at: Instant,
}

impl Default for TypingSession {
    fn default() -> Self {
        Self::new()
    }
}

impl TypingSession {
    /// An empty session: nothing to type, never complete.
    pub fn new() -> Self {
        Self {
            target: Vec::new(),
            cursor: 0,
            fail_count: 0,
            typed_count: 0,
            started_at: Instant::now(),
        }
    }

    pub fn start<R: Rng + ?Sized>(
        &mut self,
        length: usize,
        alphabet: &Alphabet,
        rng: &mut R,
    ) -> Result<(), SessionError> {
        self.start_at(length, alphabet, rng, Instant::now())
    }

    /// Reset with a freshly generated target. Leaves `self` untouched on error.
    pub fn start_at<R: Rng + ?Sized>(
        &mut self,
        length: usize,
        alphabet: &Alphabet,
        rng: &mut R,
        now: Instant,
    ) -> Result<(), SessionError> {
        let target = generate(length, alphabet, rng)?;
        *self = Self {
            target,
            cursor: 0,
            fail_count: 0,
            typed_count: 0,
            started_at: now,
        };
        log::debug!("session started, length {}", self.target.len());
        Ok(())
    }

    pub fn submit(&mut self, c: char) -> Outcome {
        let Some(&expected) = self.target.get(self.cursor) else {
            return Outcome::Ignored;
        };

        if c == expected {
            self.cursor += 1;
            self.typed_count += 1;
            Outcome::Correct
        } else {
            self.fail_count += 1;
            Outcome::Incorrect
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.target.is_empty() && self.cursor == self.target.len()
    }

    pub fn speed(&self) -> f64 {
        self.speed_at(Instant::now())
    }

    /// Characters matched per minute as of `now`; 0 when no time has passed.
    pub fn speed_at(&self, now: Instant) -> f64 {
        chars_per_minute(self.typed_count, self.elapsed_at(now))
    }

    pub fn final_report(&self) -> FinalReport {
        self.final_report_at(Instant::now())
    }

    /// A completed run is measured against the whole target, a stopped one
    /// against what was typed so far.
    pub fn final_report_at(&self, now: Instant) -> FinalReport {
        let elapsed = self.elapsed_at(now);
        let completed = self.is_complete();
        let numerator = if completed {
            self.target.len()
        } else {
            self.typed_count
        };

        FinalReport {
            elapsed,
            speed: chars_per_minute(numerator, elapsed),
            fail_count: self.fail_count,
            typed: self.typed_count,
            target_len: self.target.len(),
            completed,
            accuracy: self.accuracy(),
        }
    }

    pub fn elapsed_at(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.started_at)
    }

    pub fn target(&self) -> &[char] {
        &self.target
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn fail_count(&self) -> usize {
        self.fail_count
    }

    pub fn typed_count(&self) -> usize {
        self.typed_count
    }

    pub fn started_at(&self) -> Instant {
        self.started_at
    }

    pub fn expected(&self) -> Option<char> {
        self.target.get(self.cursor).copied()
    }

    pub fn char_state(&self, idx: usize) -> CharState {
        match idx.cmp(&self.cursor) {
            std::cmp::Ordering::Less => CharState::Consumed,
            std::cmp::Ordering::Equal => CharState::Current,
            std::cmp::Ordering::Greater => CharState::Pending,
        }
    }

    /// Share of submits that matched, as a whole percentage.
    pub fn accuracy(&self) -> f64 {
        let attempts = self.typed_count + self.fail_count;
        if attempts == 0 {
            return 100.0;
        }
        ((self.typed_count as f64 / attempts as f64) * 100.0).round()
    }
}

pub fn chars_per_minute(chars: usize, elapsed: Duration) -> f64 {
    let minutes = elapsed.as_secs_f64() / 60.0;
    if minutes <= 0.0 {
        return 0.0;
    }
    chars as f64 / minutes
}
