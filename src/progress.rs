use log::info;
use std::time::{Duration, Instant};

/// Record counters for the input reader, logged at most once per second.
pub struct Progress {
    pub lines: u64,
    pub points: u64,
    pub filtered: u64,
    pub malformed: u64,
    last_log: Instant,
}

impl Progress {
    pub fn new() -> Self {
        Self {
            lines: 0,
            points: 0,
            filtered: 0,
            malformed: 0,
            last_log: Instant::now(),
        }
    }

    pub fn point(&mut self) {
        self.points += 1;

        self.tick();
    }

    pub fn filtered(&mut self) {
        self.filtered += 1;

        self.tick();
    }

    pub fn malformed(&mut self) {
        self.malformed += 1;

        self.tick();
    }

    fn tick(&mut self) {
        self.lines += 1;

        if self.last_log.elapsed() > Duration::from_millis(1000) {
            self.last_log = Instant::now();

            self.print_stats();
        }
    }

    pub fn print_stats(&self) {
        info!(
            "Read {} lines: {} points, {} filtered, {} malformed",
            self.lines, self.points, self.filtered, self.malformed
        );
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self::new()
    }
}
