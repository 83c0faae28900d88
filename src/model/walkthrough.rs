//! Step-through walkthrough state
//!
//! A [`StepPlayer`] advances through a fixed number of steps either by hand
//! or on a repeating [`Interval`]. The interval is owned by the player while
//! playing and dropped on pause or unmount, so a torn-down player can never
//! step again.

use std::time::{Duration, Instant};

/// Repeating deadline polled from the UI tick
#[derive(Debug, Clone)]
pub struct Interval {
    period: Duration,
    next: Instant,
}

impl Interval {
    pub fn new(period: Duration, now: Instant) -> Self {
        let period = period.max(Duration::from_millis(1));
        Self {
            period,
            next: now + period,
        }
    }

    /// Number of periods elapsed since the last poll
    pub fn poll(&mut self, now: Instant) -> u32 {
        let mut fired = 0;
        while now >= self.next {
            fired += 1;
            self.next += self.period;
        }
        fired
    }
}

/// Current step plus an optional running timer
#[derive(Debug, Clone)]
pub struct StepPlayer {
    len: usize,
    current: usize,
    period: Duration,
    timer: Option<Interval>,
    mounted: bool,
}

impl StepPlayer {
    pub fn new(len: usize, period: Duration) -> Self {
        Self {
            len,
            current: 0,
            period,
            timer: None,
            mounted: true,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn is_playing(&self) -> bool {
        self.timer.is_some()
    }

    /// Start advancing automatically
    pub fn play(&mut self, now: Instant) {
        if !self.mounted || self.len < 2 || self.timer.is_some() {
            return;
        }
        self.timer = Some(Interval::new(self.period, now));
    }

    pub fn pause(&mut self) {
        self.timer = None;
    }

    pub fn toggle(&mut self, now: Instant) {
        if self.is_playing() {
            self.pause();
        } else {
            self.play(now);
        }
    }

    /// Advance one step, wrapping after the last
    pub fn next(&mut self) {
        if self.mounted && self.len > 0 {
            self.current = (self.current + 1) % self.len;
        }
    }

    /// Go back one step, wrapping before the first
    pub fn prev(&mut self) {
        if self.mounted && self.len > 0 {
            self.current = (self.current + self.len - 1) % self.len;
        }
    }

    /// Jump to a step
    pub fn select(&mut self, step: usize) {
        if self.mounted && step < self.len {
            self.current = step;
        }
    }

    /// Advance for every elapsed period, returns true if the step changed
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(timer) = self.timer.as_mut() else {
            return false;
        };
        let fired = timer.poll(now) as usize;
        if fired == 0 || self.len == 0 {
            return false;
        }
        let before = self.current;
        self.current = (self.current + fired) % self.len;
        self.current != before
    }

    /// Release the timer; the player ignores everything afterwards
    pub fn unmount(&mut self) {
        self.timer = None;
        self.mounted = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PERIOD: Duration = Duration::from_millis(100);

    #[test]
    fn test_interval_counts_elapsed_periods() {
        let start = Instant::now();
        let mut interval = Interval::new(PERIOD, start);
        assert_eq!(interval.poll(start + Duration::from_millis(50)), 0);
        assert_eq!(interval.poll(start + Duration::from_millis(100)), 1);
        assert_eq!(interval.poll(start + Duration::from_millis(350)), 2);
        assert_eq!(interval.poll(start + Duration::from_millis(360)), 0);
    }

    #[test]
    fn test_six_steps_wrap_to_start() {
        let start = Instant::now();
        let mut player = StepPlayer::new(6, PERIOD);
        player.play(start);

        for i in 1..=6 {
            player.tick(start + PERIOD * i);
        }
        assert_eq!(player.current(), 0);

        player.tick(start + PERIOD * 7);
        assert_eq!(player.current(), 1);
    }

    #[test]
    fn test_late_tick_catches_up() {
        let start = Instant::now();
        let mut player = StepPlayer::new(6, PERIOD);
        player.play(start);
        assert!(player.tick(start + PERIOD * 8));
        assert_eq!(player.current(), 2);
    }

    #[test]
    fn test_manual_stepping_wraps_both_ways() {
        let mut player = StepPlayer::new(3, PERIOD);
        player.prev();
        assert_eq!(player.current(), 2);
        player.next();
        assert_eq!(player.current(), 0);
        player.select(1);
        assert_eq!(player.current(), 1);
        player.select(10);
        assert_eq!(player.current(), 1);
    }

    #[test]
    fn test_pause_stops_advancing() {
        let start = Instant::now();
        let mut player = StepPlayer::new(4, PERIOD);
        player.toggle(start);
        assert!(player.is_playing());
        player.toggle(start);
        assert!(!player.is_playing());
        assert!(!player.tick(start + PERIOD * 3));
        assert_eq!(player.current(), 0);
    }

    #[test]
    fn test_nothing_changes_after_unmount() {
        let start = Instant::now();
        let mut player = StepPlayer::new(6, PERIOD);
        player.play(start);
        player.tick(start + PERIOD * 2);
        assert_eq!(player.current(), 2);

        player.unmount();
        assert!(!player.is_playing());
        assert!(!player.tick(start + PERIOD * 20));
        player.next();
        player.prev();
        player.play(start);
        assert!(!player.is_playing());
        assert_eq!(player.current(), 2);
    }

    #[test]
    fn test_single_step_does_not_play() {
        let mut player = StepPlayer::new(1, PERIOD);
        player.play(Instant::now());
        assert!(!player.is_playing());
    }
}
