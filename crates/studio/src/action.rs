use strum::Display;
use studio_core::ProjectCommand;

use crate::core::{
    effects::TaskResultKind,
    executor::TaskId,
    state::View,
};

#[derive(Debug, Clone, PartialEq, Display)]
pub enum Action {
    Tick,
    Render,
    Resize(u16, u16),
    Suspend,
    Resume,
    Quit,
    ClearScreen,
    Error(String),
    Navigate(View),
    /// Start over with a fresh project and open the wizard.
    NewProject,
    Project(ProjectCommand),
    GenerateAsset {
        requirement: String,
        description: String,
    },
    Export,
    TogglePlay,
    ResetPlay,
    PlayTick,
    TaskStarted(TaskId, String),
    TaskFinished(TaskId, TaskResultKind),
}
