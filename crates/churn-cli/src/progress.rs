//! Console progress bar.
//!
//! Tracks either a tick budget or a wall-clock budget and redraws on
//! stderr at most every [`UPDATE_INTERVAL`].

use std::io::{self, Write};
use std::time::{Duration, Instant};

const DEFAULT_WIDTH: usize = 50;
/// Minimum time between two redraws.
pub const UPDATE_INTERVAL: Duration = Duration::from_millis(100);

/// What the run is bounded by.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProgressMode {
    /// A fixed number of ticks.
    Iterations(u64),
    /// A wall-clock budget.
    Duration(Duration),
}

/// Run budget tracker with an optional stderr rendering.
#[derive(Debug)]
pub struct ProgressBar {
    mode: ProgressMode,
    current: u64,
    width: usize,
    start: Instant,
    last_draw: Instant,
    visible: bool,
}

impl ProgressBar {
    /// Start tracking `mode` now. Nothing is drawn unless `visible`.
    pub fn new(mode: ProgressMode, visible: bool) -> Self {
        let now = Instant::now();
        Self {
            mode,
            current: 0,
            width: DEFAULT_WIDTH,
            start: now,
            last_draw: now,
            visible,
        }
    }

    /// Time since the bar was created.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Whether the budget is used up.
    pub fn is_finished(&self) -> bool {
        match self.mode {
            ProgressMode::Iterations(total) => self.current >= total,
            ProgressMode::Duration(budget) => self.start.elapsed() >= budget,
        }
    }

    /// Count one tick and redraw if due.
    pub fn tick(&mut self) {
        self.current += 1;
        if !self.visible {
            return;
        }
        let now = Instant::now();
        if now.duration_since(self.last_draw) >= UPDATE_INTERVAL || self.is_finished() {
            self.draw();
            self.last_draw = now;
        }
    }

    /// Draw the final state and end the line.
    pub fn finish(&mut self) {
        if self.visible {
            self.draw();
            eprintln!();
        }
    }

    fn draw(&self) {
        let line = self.render(self.start.elapsed());
        let mut err = io::stderr().lock();
        // Redraw errors are ignored.
        let _ = write!(err, "\r{line}");
        let _ = err.flush();
    }

    /// Completed fraction in `[0, 1]` after `elapsed`.
    fn fraction(&self, elapsed: Duration) -> f64 {
        match self.mode {
            ProgressMode::Iterations(0) => 1.0,
            ProgressMode::Iterations(total) => (self.current as f64 / total as f64).min(1.0),
            ProgressMode::Duration(budget) if budget.is_zero() => 1.0,
            ProgressMode::Duration(budget) => {
                (elapsed.as_secs_f64() / budget.as_secs_f64()).min(1.0)
            }
        }
    }

    /// The bar line for a given elapsed time.
    pub fn render(&self, elapsed: Duration) -> String {
        let fraction = self.fraction(elapsed);
        let filled = (fraction * self.width as f64) as usize;
        let percent = (fraction * 100.0) as u64;
        let secs = elapsed.as_secs_f64();
        let rate = if secs > 0.0 {
            self.current as f64 / secs
        } else {
            0.0
        };

        let mut line = String::with_capacity(self.width + 48);
        line.push('[');
        for i in 0..self.width {
            line.push(match i {
                i if i < filled => '=',
                i if i == filled => '>',
                _ => ' ',
            });
        }
        line.push_str("] ");

        match self.mode {
            ProgressMode::Iterations(total) => {
                line.push_str(&format!("{}/{} ({percent:3}%) ", self.current, total));
            }
            ProgressMode::Duration(budget) => {
                line.push_str(&format!(
                    "{secs:.1}s/{:.1}s ({percent:3}%) ",
                    budget.as_secs_f64()
                ));
            }
        }
        if rate > 0.0 {
            line.push_str(&format!("{rate:.1}/s "));
        }

        let eta = match self.mode {
            ProgressMode::Iterations(total) if rate > 0.0 && self.current < total => {
                Some(Duration::from_secs_f64((total - self.current) as f64 / rate))
            }
            ProgressMode::Duration(budget) => Some(budget.saturating_sub(elapsed)),
            _ => None,
        };
        if let Some(eta) = eta {
            let s = eta.as_secs();
            line.push_str(&format!("ETA: {:02}:{:02}", s / 60, s % 60));
        }
        line
    }
}
