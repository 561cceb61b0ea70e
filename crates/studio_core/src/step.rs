//! Step sequencer.
//!
//! The wizard walks a fixed, linear list of six steps. There is no branching
//! and no skipping; moving past either end is a silent no-op.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Step {
    #[default]
    Template,
    Assets,
    Mechanics,
    Levels,
    Testing,
    Export,
}

impl Step {
    /// All steps in wizard order.
    pub const ALL: [Step; 6] = [
        Step::Template,
        Step::Assets,
        Step::Mechanics,
        Step::Levels,
        Step::Testing,
        Step::Export,
    ];

    pub fn index(self) -> usize {
        match self {
            Step::Template => 0,
            Step::Assets => 1,
            Step::Mechanics => 2,
            Step::Levels => 3,
            Step::Testing => 4,
            Step::Export => 5,
        }
    }

    pub fn from_index(index: usize) -> Option<Step> {
        Self::ALL.get(index).copied()
    }

    /// Parse a step id (`"template"`, `"assets"`, ...). Unknown ids yield `None`.
    pub fn parse(id: &str) -> Option<Step> {
        id.parse().ok()
    }

    pub fn id(self) -> &'static str {
        self.into()
    }

    /// Short label shown in the step indicator.
    pub fn label(self) -> &'static str {
        match self {
            Step::Template => "Template",
            Step::Assets => "Assets",
            Step::Mechanics => "Mechanics",
            Step::Levels => "Levels",
            Step::Testing => "Testing",
            Step::Export => "Export",
        }
    }

    pub fn is_first(self) -> bool {
        self.index() == 0
    }

    pub fn is_last(self) -> bool {
        self.index() == Self::ALL.len() - 1
    }

    /// The following step, or `self` on the last one.
    pub fn advance(self) -> Step {
        Self::from_index(self.index() + 1).unwrap_or(self)
    }

    /// The preceding step, or `self` on the first one.
    pub fn retreat(self) -> Step {
        match self.index() {
            0 => self,
            i => Self::ALL[i - 1],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn positions_follow_fixed_order() {
        let ids: Vec<&str> = Step::iter().map(Step::id).collect();
        assert_eq!(
            ids,
            ["template", "assets", "mechanics", "levels", "testing", "export"]
        );
        for (i, step) in Step::iter().enumerate() {
            assert_eq!(step.index(), i);
            assert_eq!(Step::from_index(i), Some(step));
            assert_eq!(Step::parse(step.id()), Some(step));
        }
    }

    #[test]
    fn boundaries_are_no_ops() {
        assert_eq!(Step::Export.advance(), Step::Export);
        assert_eq!(Step::Template.retreat(), Step::Template);
    }

    #[test]
    fn advance_and_retreat_are_linear() {
        assert_eq!(Step::Template.advance(), Step::Assets);
        assert_eq!(Step::Levels.advance(), Step::Testing);
        assert_eq!(Step::Export.retreat(), Step::Testing);
        assert_eq!(Step::Assets.retreat(), Step::Template);
    }

    #[test]
    fn unknown_id_is_none() {
        assert_eq!(Step::parse("settings"), None);
        assert_eq!(Step::parse(""), None);
        assert_eq!(Step::from_index(6), None);
    }
}
