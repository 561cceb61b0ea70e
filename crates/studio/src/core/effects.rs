//! Declarative side effects returned by the reducer.
//!
//! The reducer never spawns anything itself. The app loop hands
//! [`Effect::Async`] to the [`TaskExecutor`](super::executor::TaskExecutor)
//! and the ticker effects to the [`PlayTicker`](super::ticker::PlayTicker).

use std::{collections::BTreeSet, fmt};

use studio_core::{
    assets::Asset,
    catalog::AssetRequirement,
    export::{ExportReceipt, Platform},
};

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Async(TaskKind),
    StartTicker,
    StopTicker,
    Log(String),
}

impl Effect {
    pub fn log<T: Into<String>>(msg: T) -> Self {
        Effect::Log(msg.into())
    }
}

/// Background work. Each variant carries everything the task needs.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskKind {
    GenerateAsset {
        project_id: String,
        requirement: AssetRequirement,
        description: String,
    },
    ExportGame {
        project_id: String,
        platforms: BTreeSet<Platform>,
        asset_count: usize,
    },
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskKind::GenerateAsset { requirement, .. } => {
                write!(f, "Generating {}", requirement.name)
            }
            TaskKind::ExportGame { platforms, .. } => {
                write!(f, "Exporting to {} platform(s)", platforms.len())
            }
        }
    }
}

/// Tagged with the project the work was started for, so results that
/// arrive after "New project" can be dropped.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskResultKind {
    AssetGenerated { project_id: String, asset: Asset },
    Exported { project_id: String, receipt: ExportReceipt },
}

impl TaskResultKind {
    pub fn project_id(&self) -> &str {
        match self {
            TaskResultKind::AssetGenerated { project_id, .. }
            | TaskResultKind::Exported { project_id, .. } => project_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use studio_core::catalog;

    #[test]
    fn task_labels() {
        let requirement = catalog::find("endless-runner").unwrap().required_assets[0].clone();
        let kind = TaskKind::GenerateAsset {
            project_id: "p".into(),
            requirement,
            description: "a fox".into(),
        };
        assert_eq!(kind.to_string(), "Generating Player Character");

        let kind = TaskKind::ExportGame {
            project_id: "p".into(),
            platforms: BTreeSet::from([Platform::Web, Platform::Telegram]),
            asset_count: 3,
        };
        assert_eq!(kind.to_string(), "Exporting to 2 platform(s)");
    }
}
