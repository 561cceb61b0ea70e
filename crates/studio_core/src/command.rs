//! Typed project updates.
//!
//! Editors never rebuild the whole [`Project`]; each interaction becomes one
//! [`ProjectCommand`] which [`apply`] turns into a field-level change.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use strum::Display;
use tracing::debug;

use crate::{
    assets::{self, Asset},
    catalog::{self, AssetRequirement},
    error::Rejection,
    export::{ExportReceipt, Platform},
    mechanics::{Feature, Slider},
    project::Project,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum ProjectCommand {
    // navigation
    Next,
    Previous,
    // template
    SelectTemplate(String),
    // assets
    StoreAsset(Asset),
    // mechanics
    SetSlider(Slider, u32),
    NudgeSlider(Slider, i32),
    ToggleFeature(Feature),
    // levels
    AddLevel,
    SelectLevel(String),
    RenameLevel { id: String, name: String },
    SetLevelDifficulty { id: String, difficulty: u8 },
    SetLevelLayout { id: String, layout: String },
    ToggleLevelAsset { id: String, asset: String },
    DeleteLevel(String),
    // export
    TogglePlatform(Platform),
    ToggleAnalytics,
    ToggleLeaderboard,
    Rename(String),
    Describe(String),
    CompleteExport(ExportReceipt),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Changed,
    Unchanged,
    Rejected(Rejection),
}

impl Outcome {
    pub fn is_changed(&self) -> bool {
        matches!(self, Outcome::Changed)
    }

    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            Outcome::Rejected(r) => Some(r),
            _ => None,
        }
    }
}

impl From<Result<(), Rejection>> for Outcome {
    fn from(r: Result<(), Rejection>) -> Self {
        match r {
            Ok(()) => Outcome::Changed,
            Err(e) => Outcome::Rejected(e),
        }
    }
}

/// Applies one command. Rejected commands leave `project` untouched.
pub fn apply(project: &mut Project, command: ProjectCommand) -> Outcome {
    match command {
        ProjectCommand::Next => {
            let from = project.current_step;
            if let Err(e) = project.can_leave(from) {
                return Outcome::Rejected(e);
            }
            project.current_step = from.advance();
            debug!(from = %from, to = %project.current_step, "advanced");
            Outcome::Changed
        }
        ProjectCommand::Previous => {
            let to = project.current_step.retreat();
            if to == project.current_step {
                return Outcome::Unchanged;
            }
            project.current_step = to;
            Outcome::Changed
        }
        ProjectCommand::SelectTemplate(id) => {
            let Some(template) = catalog::find(&id) else {
                return Outcome::Rejected(Rejection::UnknownTemplate(id));
            };
            if project.template.as_ref().is_some_and(|t| t.id == template.id) {
                return Outcome::Unchanged;
            }
            project
                .assets
                .retain(|a| template.requirement(&a.name).is_some());
            project.template = Some(template.clone());
            Outcome::Changed
        }
        ProjectCommand::StoreAsset(asset) => {
            let Some(template) = project.template.as_ref() else {
                return Outcome::Rejected(Rejection::TemplateMissing);
            };
            if template.requirement(&asset.name).is_none() {
                return Outcome::Rejected(Rejection::UnknownRequirement(asset.name));
            }
            assets::upsert(&mut project.assets, asset);
            Outcome::Changed
        }
        ProjectCommand::SetSlider(slider, value) => {
            project.mechanics.set(slider, value);
            Outcome::Changed
        }
        ProjectCommand::NudgeSlider(slider, steps) => {
            project.mechanics.nudge(slider, steps);
            Outcome::Changed
        }
        ProjectCommand::ToggleFeature(feature) => {
            let on = project.mechanics.enabled(feature);
            project.mechanics.set_enabled(feature, !on);
            Outcome::Changed
        }
        ProjectCommand::AddLevel => {
            project.levels.add();
            Outcome::Changed
        }
        ProjectCommand::SelectLevel(id) => project.levels.select(&id).into(),
        ProjectCommand::RenameLevel { id, name } => project.levels.rename(&id, name).into(),
        ProjectCommand::SetLevelDifficulty { id, difficulty } => {
            project.levels.set_difficulty(&id, difficulty).into()
        }
        ProjectCommand::SetLevelLayout { id, layout } => {
            project.levels.set_layout(&id, layout).into()
        }
        ProjectCommand::ToggleLevelAsset { id, asset } => {
            project.levels.toggle_asset(&id, &asset).into()
        }
        ProjectCommand::DeleteLevel(id) => project.levels.delete(&id).into(),
        ProjectCommand::TogglePlatform(platform) => {
            project.export.toggle(platform);
            Outcome::Changed
        }
        ProjectCommand::ToggleAnalytics => {
            project.export.analytics = !project.export.analytics;
            Outcome::Changed
        }
        ProjectCommand::ToggleLeaderboard => {
            project.export.leaderboard = !project.export.leaderboard;
            Outcome::Changed
        }
        ProjectCommand::Rename(name) => {
            project.name = name;
            Outcome::Changed
        }
        ProjectCommand::Describe(description) => {
            project.description = description;
            Outcome::Changed
        }
        ProjectCommand::CompleteExport(receipt) => {
            project.export.receipt = Some(receipt);
            Outcome::Changed
        }
    }
}

/// Checks that a generation for `requirement` may start and returns the
/// requirement it fulfils.
pub fn prepare_generation(
    project: &Project,
    requirement: &str,
    description: &str,
) -> Result<AssetRequirement, Rejection> {
    let template = project.template.as_ref().ok_or(Rejection::TemplateMissing)?;
    let req = template
        .requirement(requirement)
        .ok_or_else(|| Rejection::UnknownRequirement(requirement.into()))?;
    if description.trim().is_empty() {
        return Err(Rejection::BlankDescription);
    }
    Ok(req.clone())
}

/// Platforms to export to; at least one must be selected.
pub fn prepare_export(project: &Project) -> Result<BTreeSet<Platform>, Rejection> {
    if project.export.platforms.is_empty() {
        return Err(Rejection::NoPlatforms);
    }
    Ok(project.export.platforms.clone())
}
