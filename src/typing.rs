//! The typing animation under the page header.
//!
//! Types a phrase one character at a time, holds it, erases it, and moves on
//! to the next phrase.  Time is passed in, so the animation is deterministic
//! under test.

use std::time::{Duration, Instant};

pub const PHRASES: [&str; 4] = [
    "Technology Enthusiast",
    "Problem Solver",
    "Web Developer",
    "Innovation Driven",
];

const TYPE_DELAY: Duration = Duration::from_millis(200);
const ERASE_DELAY: Duration = Duration::from_millis(100);
const HOLD_DELAY: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone)]
pub struct Typewriter {
    phrases: Vec<String>,
    phrase: usize,
    /// Characters of the current phrase on screen.
    shown: usize,
    deleting: bool,
    next_step: Instant,
}

impl Typewriter {
    pub fn new(now: Instant) -> Self {
        Self::with_phrases(PHRASES.iter().map(|s| s.to_string()).collect(), now)
    }

    pub fn with_phrases(phrases: Vec<String>, now: Instant) -> Self {
        Self {
            phrases,
            phrase: 0,
            shown: 0,
            deleting: false,
            next_step: now,
        }
    }

    /// Text currently on screen.
    pub fn text(&self) -> String {
        self.phrases
            .get(self.phrase)
            .map(|p| p.chars().take(self.shown).collect())
            .unwrap_or_default()
    }

    /// Run every step that is due by `now`.
    pub fn update(&mut self, now: Instant) {
        while now >= self.next_step && !self.phrases.is_empty() {
            let delay = self.step();
            self.next_step += delay;
        }
    }

    /// Advance one character and return the delay until the next step.
    fn step(&mut self) -> Duration {
        let len = self.phrases[self.phrase].chars().count();
        let mut delay = if self.deleting {
            self.shown = self.shown.saturating_sub(1);
            ERASE_DELAY
        } else {
            self.shown = (self.shown + 1).min(len);
            TYPE_DELAY
        };

        if !self.deleting && self.shown == len {
            self.deleting = true;
            delay = HOLD_DELAY;
        } else if self.deleting && self.shown == 0 {
            self.deleting = false;
            self.phrase = (self.phrase + 1) % self.phrases.len();
        }
        delay
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn writer(phrases: &[&str], start: Instant) -> Typewriter {
        Typewriter::with_phrases(phrases.iter().map(|s| s.to_string()).collect(), start)
    }

    #[test]
    fn types_one_character_per_step() {
        let start = Instant::now();
        let mut tw = writer(&["abc"], start);

        tw.update(start);
        assert_eq!(tw.text(), "a");

        tw.update(start + Duration::from_millis(199));
        assert_eq!(tw.text(), "a", "not due yet");

        tw.update(start + Duration::from_millis(200));
        assert_eq!(tw.text(), "ab");
    }

    #[test]
    fn holds_full_phrase_then_erases() {
        let start = Instant::now();
        let mut tw = writer(&["ab", "xy"], start);

        // a @0, ab @200, then hold 2000ms
        tw.update(start + Duration::from_millis(200));
        assert_eq!(tw.text(), "ab");

        tw.update(start + Duration::from_millis(2199));
        assert_eq!(tw.text(), "ab", "still holding");

        tw.update(start + Duration::from_millis(2200));
        assert_eq!(tw.text(), "a");

        tw.update(start + Duration::from_millis(2300));
        assert_eq!(tw.text(), "", "erased; moved to next phrase");

        tw.update(start + Duration::from_millis(2500));
        assert_eq!(tw.text(), "x");
    }

    #[test]
    fn wraps_to_first_phrase() {
        let start = Instant::now();
        let mut tw = writer(&["a"], start);

        // a @0, hold until 2000, erase @2000 -> "", next type @2100
        tw.update(start + Duration::from_millis(2100));
        assert_eq!(tw.text(), "a");
    }

    #[test]
    fn handles_multibyte_characters() {
        let start = Instant::now();
        let mut tw = writer(&["héllo"], start);
        tw.update(start + Duration::from_millis(200));
        assert_eq!(tw.text(), "hé");
    }

    #[test]
    fn empty_phrase_list_is_inert() {
        let start = Instant::now();
        let mut tw = Typewriter::with_phrases(Vec::new(), start);
        tw.update(start + Duration::from_secs(10));
        assert_eq!(tw.text(), "");
    }

    #[test]
    fn default_phrases_start_with_first() {
        let start = Instant::now();
        let mut tw = Typewriter::new(start);
        tw.update(start + Duration::from_millis(400));
        assert_eq!(tw.text(), "Tec");
    }
}
