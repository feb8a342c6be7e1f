//! Application state owned by the terminal front end

use crate::config::Config;
use crate::generator::Alphabet;
use crate::input::{action_for_key, action_for_mouse, Action};
use crate::keyboard::{OnScreenKeyboard, Revert};
use crate::report::FinalReport;
use crate::runtime::AppEvent;
use crate::session::{Outcome, TypingSession};
use crate::timer::DeferredQueue;
use crate::ui::Screen;
use rand::{rngs::StdRng, SeedableRng};
use ratatui::layout::Rect;
use std::time::{Duration, Instant};

/// How long a status message stays visible
const STATUS_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    /// No session started yet
    Idle,
    Typing,
    /// Completed or stopped; the result is on screen
    Finished,
}

#[derive(Debug)]
pub struct App {
    pub config: Config,
    pub session: TypingSession,
    pub keyboard: OnScreenKeyboard,
    pub state: AppState,
    /// target length used by the next start
    pub difficulty: usize,
    pub alphabet: Alphabet,
    pub result: Option<FinalReport>,
    /// modal result notice shown on top of everything
    pub notice_open: bool,
    timers: DeferredQueue<Revert>,
    rng: StdRng,
    status: Option<(String, Instant)>,
}

impl App {
    pub fn new(config: Config, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let difficulty = config.clamp_length(config.length);
        let status = (difficulty != config.length).then(|| {
            log::warn!(
                "length {} outside {}..={}, using {difficulty}",
                config.length,
                config.min_length,
                config.max_length
            );
            (format!("Length clamped to {difficulty}"), Instant::now())
        });

        Self {
            difficulty,
            alphabet: config.alphabet.alphabet(),
            config: Config {
                length: difficulty,
                ..config
            },
            session: TypingSession::new(),
            keyboard: OnScreenKeyboard::new(),
            state: AppState::Idle,
            result: None,
            notice_open: false,
            timers: DeferredQueue::new(),
            rng,
            status,
        }
    }

    /// Route one runtime event; `area` is the terminal size clicks are hit-tested against.
    /// Returns false when the app should quit.
    pub fn on_event(&mut self, event: AppEvent, area: Rect, now: Instant) -> bool {
        let action = match event {
            AppEvent::Key(key) => action_for_key(key, self.state, self.notice_open),
            AppEvent::Mouse(mouse) => match Screen::layout(area) {
                Some(screen) if !self.notice_open => {
                    action_for_mouse(mouse, &self.keyboard, screen.keyboard)
                }
                _ => Action::Ignore,
            },
            AppEvent::Tick => {
                self.on_tick(now);
                Action::Ignore
            }
            AppEvent::Resize => Action::Ignore,
            AppEvent::Closed => {
                log::warn!("input closed, quitting");
                Action::Quit
            }
        };
        self.handle(action, now)
    }

    /// Apply one input action. Returns false when the app should quit.
    pub fn handle(&mut self, action: Action, now: Instant) -> bool {
        match action {
            Action::Submit(c) => {
                self.submit_at(c, now);
            }
            Action::Start => self.start_at(now),
            Action::Stop => self.stop_at(now),
            Action::Dismiss => self.dismiss(),
            Action::Difficulty(delta) => self.adjust_difficulty(delta, now),
            Action::Quit => return false,
            Action::Passthrough | Action::Ignore => {}
        }
        true
    }

    pub fn start(&mut self) {
        self.start_at(Instant::now());
    }

    pub fn start_at(&mut self, now: Instant) {
        match self
            .session
            .start_at(self.difficulty, &self.alphabet, &mut self.rng, now)
        {
            Ok(()) => {
                self.state = AppState::Typing;
                self.result = None;
                self.notice_open = false;
            }
            Err(e) => {
                log::warn!("could not start session: {e}");
                self.set_status(e.to_string(), now);
            }
        }
    }

    pub fn submit(&mut self, c: char) -> Outcome {
        self.submit_at(c, Instant::now())
    }

    /// Forward a character to the session and flash its on-screen key
    pub fn submit_at(&mut self, c: char, now: Instant) -> Outcome {
        if self.state != AppState::Typing {
            return Outcome::Ignored;
        }

        let outcome = self.session.submit(c);
        if let Some(revert) = self.keyboard.flash(c, outcome) {
            self.timers.schedule(self.config.highlight(), now, revert);
        }

        if self.session.is_complete() {
            self.finish(now);
        }
        outcome
    }

    pub fn stop(&mut self) {
        self.stop_at(Instant::now());
    }

    /// End the current run early and report partial progress
    pub fn stop_at(&mut self, now: Instant) {
        if self.state == AppState::Typing {
            self.finish(now);
        }
    }

    pub fn dismiss(&mut self) {
        self.notice_open = false;
    }

    pub fn adjust_difficulty(&mut self, delta: i32, now: Instant) {
        let requested = if delta.is_negative() {
            self.difficulty.saturating_sub(delta.unsigned_abs() as usize)
        } else {
            self.difficulty.saturating_add(delta as usize)
        };
        self.difficulty = self.config.clamp_length(requested);
        self.config.length = self.difficulty;
        self.set_status(format!("Length: {}", self.difficulty), now);
    }

    /// Fire due key reverts and expire the status line
    pub fn on_tick(&mut self, now: Instant) {
        for revert in self.timers.drain_due(now) {
            self.keyboard.apply(revert);
        }

        if matches!(&self.status, Some((_, at)) if now.duration_since(*at) >= STATUS_TTL) {
            self.status = None;
        }
    }

    pub fn live_speed(&self) -> f64 {
        self.live_speed_at(Instant::now())
    }

    /// Speed shown while typing, frozen at the report once finished
    pub fn live_speed_at(&self, now: Instant) -> f64 {
        match (&self.result, self.state) {
            (Some(report), AppState::Finished) => report.speed,
            (_, AppState::Typing) => self.session.speed_at(now),
            _ => 0.0,
        }
    }

    pub fn pending_reverts(&self) -> usize {
        self.timers.len()
    }

    pub fn set_status(&mut self, message: String, now: Instant) {
        self.status = Some((message, now));
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_ref().map(|(msg, _)| msg.as_str())
    }

    fn finish(&mut self, now: Instant) {
        let report = self.session.final_report_at(now);
        if report.completed {
            log::info!("session complete: {report}");
        } else {
            log::info!("session stopped: {report}");
        }
        self.result = Some(report);
        self.state = AppState::Finished;
        self.notice_open = true;
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(Config::default(), None)
    }
}
