//! Simulated test-play session.
//!
//! Only the counters live here; the one-second clock that drives
//! [`PlaySession::tick`] belongs to whoever renders the testing screen.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Largest score gained in a single tick.
pub const MAX_SCORE_PER_TICK: u32 = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaySession {
    pub playing: bool,
    pub score: u32,
    pub time_secs: u32,
    pub level: u32,
}

impl Default for PlaySession {
    fn default() -> Self {
        Self {
            playing: false,
            score: 0,
            time_secs: 0,
            level: 1,
        }
    }
}

impl PlaySession {
    /// Flips play/pause and returns the new `playing` flag.
    pub fn toggle(&mut self) -> bool {
        self.playing = !self.playing;
        self.playing
    }

    /// Back to `(score, time, level) = (0, 0, 1)`, stopped.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// One elapsed second. Ignored while paused.
    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if !self.playing {
            return;
        }
        self.time_secs += 1;
        self.score += rng.gen_range(0..=MAX_SCORE_PER_TICK);
    }

    /// `m:ss`
    pub fn clock(&self) -> String {
        format_time(self.time_secs)
    }
}

pub fn format_time(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn three_ticks_while_playing() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut s = PlaySession::default();
        assert!(s.toggle());
        for _ in 0..3 {
            s.tick(&mut rng);
        }
        assert_eq!(s.time_secs, 3);
        assert!(s.score <= 3 * MAX_SCORE_PER_TICK);

        s.reset();
        assert_eq!((s.score, s.time_secs, s.level), (0, 0, 1));
        assert!(!s.playing);
    }

    #[test]
    fn paused_session_ignores_ticks() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut s = PlaySession::default();
        s.tick(&mut rng);
        assert_eq!(s.time_secs, 0);
    }

    #[test]
    fn clock_format() {
        assert_eq!(format_time(0), "0:00");
        assert_eq!(format_time(65), "1:05");
        assert_eq!(format_time(600), "10:00");
    }
}
