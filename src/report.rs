//! Result snapshot of a typing run and the text shown for it

use std::fmt;
use std::time::Duration;

/// Outcome of a finished (or force-stopped) session
#[derive(Debug, Clone, PartialEq)]
pub struct FinalReport {
    /// Time between start and the report
    pub elapsed: Duration,
    /// Characters per minute
    pub speed: f64,
    /// Mismatched submits
    pub fail_count: usize,
    /// Characters matched
    pub typed: usize,
    /// Length of the target text
    pub target_len: usize,
    /// Whether the whole target was typed
    pub completed: bool,
    /// Matched submits as a whole percentage of all submits
    pub accuracy: f64,
}

impl FinalReport {
    pub fn elapsed_minutes(&self) -> f64 {
        self.elapsed.as_secs_f64() / 60.0
    }

    /// Elapsed time as `mm:ss`
    pub fn elapsed_formatted(&self) -> String {
        let secs = self.elapsed.as_secs();
        format!("{:02}:{:02}", secs / 60, secs % 60)
    }

    /// One-line summary for the inline result area
    pub fn headline(&self) -> String {
        if self.completed {
            format!(
                "Nice! Your speed: {:.2} chars/min. Mistakes: {}",
                self.speed, self.fail_count
            )
        } else {
            format!(
                "Stopped: {}/{} chars at {:.2} chars/min. Mistakes: {}",
                self.typed, self.target_len, self.speed, self.fail_count
            )
        }
    }

    pub fn notice_title(&self) -> &'static str {
        if self.completed {
            "Well done!"
        } else {
            "Stopped"
        }
    }

    /// Body lines of the modal notice
    pub fn notice_lines(&self) -> Vec<String> {
        vec![
            format!("Speed: {:.2} chars/min", self.speed),
            format!("Mistakes: {}", self.fail_count),
            format!("Time: {}", self.elapsed_formatted()),
            format!("Accuracy: {}%", self.accuracy),
        ]
    }
}

impl fmt::Display for FinalReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.2} chars/min, {} mistakes, {}/{} chars in {}",
            self.speed,
            self.fail_count,
            self.typed,
            self.target_len,
            self.elapsed_formatted()
        )
    }
}
