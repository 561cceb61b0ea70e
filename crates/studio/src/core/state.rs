//! Top-level application state, mutated only by [`reduce`](super::reducer::reduce).

use rand::{rngs::StdRng, SeedableRng};
use strum::Display;
use studio_core::{session::PlaySession, Project, ProjectStore};

use crate::core::executor::TaskId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum View {
    Dashboard,
    Wizard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warn,
}

/// One-line message for the status bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn warn(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warn,
            message: message.into(),
        }
    }
}

#[derive(Debug)]
pub struct RootState {
    pub view: View,
    /// `None` until the user creates a game.
    pub store: Option<ProjectStore>,
    pub play: PlaySession,
    /// Requirement name of the generation in flight.
    pub generating: Option<String>,
    pub exporting: bool,
    pub tasks: Vec<(TaskId, String)>,
    pub notice: Option<Notice>,
    pub quit_requested: bool,
    pub last_resize: Option<(u16, u16)>,
    rng: StdRng,
}

impl Default for RootState {
    fn default() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }
}

impl RootState {
    pub fn with_rng(rng: StdRng) -> Self {
        Self {
            view: View::Dashboard,
            store: None,
            play: PlaySession::default(),
            generating: None,
            exporting: false,
            tasks: Vec::new(),
            notice: None,
            quit_requested: false,
            last_resize: None,
            rng,
        }
    }

    pub fn project(&self) -> Option<&Project> {
        self.store.as_ref().map(ProjectStore::project)
    }

    pub fn tick_play(&mut self) {
        self.play.tick(&mut self.rng);
    }
}
