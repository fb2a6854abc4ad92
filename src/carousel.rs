//! Project carousel: one slide at a time, with optional autoplay.

use std::time::{Duration, Instant};

pub const DEFAULT_AUTOPLAY: Duration = Duration::from_millis(5000);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub title: String,
    pub description: String,
}

impl Project {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

pub fn default_projects() -> Vec<Project> {
    vec![
        Project::new("Project 1", "Description of project 1"),
        Project::new("Project 2", "Description of project 2"),
        Project::new("Project 3", "Description of project 3"),
    ]
}

#[derive(Debug, Clone)]
pub struct Carousel {
    slides: Vec<Project>,
    current: usize,
    autoplay: Option<Duration>,
    last_advance: Instant,
}

impl Carousel {
    pub fn new(slides: Vec<Project>, autoplay: Option<Duration>, now: Instant) -> Self {
        Self {
            slides,
            current: 0,
            autoplay,
            last_advance: now,
        }
    }

    pub fn slides(&self) -> &[Project] {
        &self.slides
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> Option<&Project> {
        self.slides.get(self.current)
    }

    /// Manual navigation restarts the autoplay countdown.
    pub fn next(&mut self, now: Instant) {
        self.advance();
        self.last_advance = now;
    }

    pub fn previous(&mut self, now: Instant) {
        if !self.slides.is_empty() {
            self.current = (self.current + self.slides.len() - 1) % self.slides.len();
        }
        self.last_advance = now;
    }

    /// Advance once per elapsed autoplay interval.
    pub fn tick(&mut self, now: Instant) {
        let Some(interval) = self.autoplay else {
            return;
        };
        if interval.is_zero() {
            return;
        }
        while now.saturating_duration_since(self.last_advance) >= interval {
            self.advance();
            self.last_advance += interval;
        }
    }

    fn advance(&mut self) {
        if !self.slides.is_empty() {
            self.current = (self.current + 1) % self.slides.len();
        }
    }
}
