use thiserror::Error;

use crate::step::Step;

/// Why a [`crate::ProjectCommand`] was not applied. The project is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("choose a template before continuing")]
    TemplateMissing,
    #[error("generate the remaining assets first: {}", .0.join(", "))]
    AssetsMissing(Vec<String>),
    #[error("select a level before continuing")]
    NoLevelSelected,
    #[error("{0} is the last step")]
    LastStep(Step),
    #[error("unknown template `{0}`")]
    UnknownTemplate(String),
    #[error("`{0}` is not required by the selected template")]
    UnknownRequirement(String),
    #[error("describe the asset before generating it")]
    BlankDescription,
    #[error("no level with id `{0}`")]
    UnknownLevel(String),
    #[error("the last remaining level cannot be deleted")]
    LastLevel,
    #[error("select at least one platform")]
    NoPlatforms,
}
