//! Pure state transitions.
//!
//! `reduce` mutates [`RootState`] and returns the side effects the loop must
//! carry out. It never blocks and never spawns.

use studio_core::{
    command::{self, Outcome},
    step::Step,
    ProjectCommand,
};
use tracing::debug;

use crate::action::Action;
use crate::core::{
    effects::{Effect, TaskKind, TaskResultKind},
    executor::TaskId,
    state::{Notice, RootState, View},
};

pub fn reduce(state: &mut RootState, action: &Action) -> Vec<Effect> {
    match action {
        Action::Quit => {
            state.quit_requested = true;
            vec![Effect::StopTicker]
        }
        Action::Resize(w, h) => {
            state.last_resize = Some((*w, *h));
            Vec::new()
        }
        Action::Error(message) => {
            state.notice = Some(Notice::warn(message.clone()));
            Vec::new()
        }
        Action::NewProject => new_project(state),
        Action::Navigate(view) => navigate(state, *view),
        Action::Project(cmd) => project_command(state, cmd.clone()),
        Action::GenerateAsset {
            requirement,
            description,
        } => generate(state, requirement, description),
        Action::Export => export(state),
        Action::TogglePlay => toggle_play(state),
        Action::ResetPlay => {
            state.play.reset();
            vec![Effect::StopTicker]
        }
        Action::PlayTick => {
            state.tick_play();
            Vec::new()
        }
        Action::TaskStarted(id, label) => {
            state.tasks.push((*id, label.clone()));
            Vec::new()
        }
        Action::TaskFinished(id, result) => finish_task(state, *id, result.clone()),
        Action::Tick
        | Action::Render
        | Action::Suspend
        | Action::Resume
        | Action::ClearScreen => Vec::new(),
    }
}

fn new_project(state: &mut RootState) -> Vec<Effect> {
    let store = studio_core::ProjectStore::default();
    let id = store.project().id.clone();
    state.store = Some(store);
    state.view = View::Wizard;
    state.play.reset();
    state.generating = None;
    state.exporting = false;
    state.notice = None;
    vec![Effect::StopTicker, Effect::log(format!("created project {id}"))]
}

fn navigate(state: &mut RootState, view: View) -> Vec<Effect> {
    if view == state.view {
        return Vec::new();
    }
    if view == View::Wizard && state.store.is_none() {
        state.notice = Some(Notice::info("Create a new game first"));
        return Vec::new();
    }
    let mut effects = Vec::new();
    if state.view == View::Wizard {
        state.play.reset();
        effects.push(Effect::StopTicker);
    }
    state.view = view;
    state.notice = None;
    effects
}

fn project_command(state: &mut RootState, cmd: ProjectCommand) -> Vec<Effect> {
    let Some(store) = state.store.as_mut() else {
        return Vec::new();
    };
    let before = store.project().current_step;
    let outcome = store.dispatch(cmd);
    let after = store.project().current_step;

    let mut effects = Vec::new();
    match outcome {
        Outcome::Rejected(reason) => state.notice = Some(Notice::warn(reason.to_string())),
        Outcome::Changed if before != after => {
            state.notice = None;
            effects.push(Effect::log(format!("step {before} -> {after}")));
        }
        Outcome::Changed | Outcome::Unchanged => {}
    }
    if before == Step::Testing && after != Step::Testing {
        state.play.reset();
        effects.push(Effect::StopTicker);
    }
    effects
}

fn generate(state: &mut RootState, requirement: &str, description: &str) -> Vec<Effect> {
    let Some(project) = state.project() else {
        return Vec::new();
    };
    if let Some(pending) = &state.generating {
        debug!(%pending, %requirement, "generation already running");
        return Vec::new();
    }
    match command::prepare_generation(project, requirement, description) {
        Ok(requirement) => {
            let project_id = project.id.clone();
            state.generating = Some(requirement.name.clone());
            state.notice = None;
            vec![Effect::Async(TaskKind::GenerateAsset {
                project_id,
                requirement,
                description: description.to_string(),
            })]
        }
        Err(reason) => {
            state.notice = Some(Notice::warn(reason.to_string()));
            Vec::new()
        }
    }
}

fn export(state: &mut RootState) -> Vec<Effect> {
    let Some(project) = state.project() else {
        return Vec::new();
    };
    if state.exporting || project.export.is_complete() {
        return Vec::new();
    }
    match command::prepare_export(project) {
        Ok(platforms) => {
            let kind = TaskKind::ExportGame {
                project_id: project.id.clone(),
                platforms,
                asset_count: project.assets.len(),
            };
            state.exporting = true;
            state.notice = None;
            vec![Effect::Async(kind)]
        }
        Err(reason) => {
            state.notice = Some(Notice::warn(reason.to_string()));
            Vec::new()
        }
    }
}

fn toggle_play(state: &mut RootState) -> Vec<Effect> {
    if state.project().map(|p| p.current_step) != Some(Step::Testing) {
        return Vec::new();
    }
    if state.play.toggle() {
        vec![Effect::StartTicker]
    } else {
        vec![Effect::StopTicker]
    }
}

fn finish_task(state: &mut RootState, id: TaskId, result: TaskResultKind) -> Vec<Effect> {
    state.tasks.retain(|(task, _)| *task != id);
    let current = state.project().map(|p| p.id.clone());
    if current.as_deref() != Some(result.project_id()) {
        return vec![Effect::log(format!("dropped result of task {id} for a discarded project"))];
    }

    match result {
        TaskResultKind::AssetGenerated { asset, .. } => {
            state.generating = None;
            let name = asset.name.clone();
            let mut effects = project_command(state, ProjectCommand::StoreAsset(asset));
            if state.notice.is_none() {
                state.notice = Some(Notice::info(format!("{name} generated")));
            }
            effects.push(Effect::log(format!("stored asset {name}")));
            effects
        }
        TaskResultKind::Exported { receipt, .. } => {
            state.exporting = false;
            project_command(state, ProjectCommand::CompleteExport(receipt))
        }
    }
}
