use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    assets::{self, Asset},
    catalog::Template,
    error::Rejection,
    export::ExportSettings,
    levels::LevelBoard,
    mechanics::Mechanics,
    step::Step,
};

pub const DEFAULT_PROJECT_NAME: &str = "New Game Project";

/// Everything the user decided so far, across all wizard steps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub description: String,
    pub template: Option<Template>,
    pub assets: Vec<Asset>,
    pub current_step: Step,
    pub created_at: DateTime<Utc>,
    pub mechanics: Mechanics,
    pub levels: LevelBoard,
    pub export: ExportSettings,
}

impl Default for Project {
    fn default() -> Self {
        Self::new()
    }
}

impl Project {
    pub fn new() -> Self {
        Self::with_id(Uuid::new_v4().simple().to_string())
    }

    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: DEFAULT_PROJECT_NAME.into(),
            description: String::new(),
            template: None,
            assets: Vec::new(),
            current_step: Step::Template,
            created_at: Utc::now(),
            mechanics: Mechanics::default(),
            levels: LevelBoard::default(),
            export: ExportSettings::default(),
        }
    }

    pub fn template_name(&self) -> Option<&str> {
        self.template.as_ref().map(|t| t.name.as_str())
    }

    /// Whether the wizard may move forward from `step`.
    pub fn can_leave(&self, step: Step) -> Result<(), Rejection> {
        match step {
            Step::Template => self.template.as_ref().map(|_| ()).ok_or(Rejection::TemplateMissing),
            Step::Assets => {
                let template = self.template.as_ref().ok_or(Rejection::TemplateMissing)?;
                let missing = assets::missing(template, &self.assets);
                if missing.is_empty() {
                    Ok(())
                } else {
                    Err(Rejection::AssetsMissing(
                        missing.into_iter().map(String::from).collect(),
                    ))
                }
            }
            Step::Levels => self.levels.selected().map(|_| ()).ok_or(Rejection::NoLevelSelected),
            Step::Mechanics | Step::Testing => Ok(()),
            Step::Export => Err(Rejection::LastStep(Step::Export)),
        }
    }

    pub fn can_advance(&self) -> bool {
        self.can_leave(self.current_step).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;

    #[test]
    fn fresh_project_defaults() {
        let p = Project::new();
        assert_eq!(p.name, DEFAULT_PROJECT_NAME);
        assert!(p.description.is_empty());
        assert!(p.template.is_none());
        assert!(p.assets.is_empty());
        assert_eq!(p.current_step, Step::Template);
        assert!(!p.id.is_empty());
    }

    #[test]
    fn template_gate() {
        let mut p = Project::new();
        assert_eq!(p.can_leave(Step::Template), Err(Rejection::TemplateMissing));
        p.template = catalog::find("match-three").cloned();
        assert!(p.can_leave(Step::Template).is_ok());
    }

    #[test]
    fn asset_gate_without_template() {
        let p = Project::new();
        assert_eq!(p.can_leave(Step::Assets), Err(Rejection::TemplateMissing));
    }

    #[test]
    fn free_steps_and_last_step() {
        let p = Project::new();
        assert!(p.can_leave(Step::Mechanics).is_ok());
        assert!(p.can_leave(Step::Testing).is_ok());
        assert!(p.can_leave(Step::Levels).is_ok());
        assert_eq!(p.can_leave(Step::Export), Err(Rejection::LastStep(Step::Export)));
    }

    #[test]
    fn round_trips_through_json() {
        let p = Project::with_id("abc");
        let json = serde_json::to_string(&p).unwrap();
        let back: Project = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
    }
}
