use color_eyre::Result;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};
use studio_core::step::Step;

use super::Page;
use crate::{
    action::Action,
    components::{
        asset_creation::AssetCreation, export::Export, level_design::LevelDesign,
        mechanics::MechanicsEditor, step_indicator::StepIndicator,
        template_selection::TemplateSelection, testing::Testing, Component,
    },
    core::state::RootState,
    tui::{Event, EventResponse},
};

/// Editor state is local to one project; it is rebuilt when a new project
/// replaces the current one.
#[derive(Default)]
struct Editors {
    template: TemplateSelection,
    assets: AssetCreation,
    mechanics: MechanicsEditor,
    levels: LevelDesign,
    testing: Testing,
    export: Export,
}

impl Editors {
    fn for_step(&mut self, step: Step) -> &mut dyn Component {
        match step {
            Step::Template => &mut self.template,
            Step::Assets => &mut self.assets,
            Step::Mechanics => &mut self.mechanics,
            Step::Levels => &mut self.levels,
            Step::Testing => &mut self.testing,
            Step::Export => &mut self.export,
        }
    }
}

#[derive(Default)]
pub struct WizardPage {
    indicator: StepIndicator,
    editors: Editors,
    project_id: Option<String>,
}

impl WizardPage {
    /// The editor for the current step, after dropping stale editor state.
    fn active(&mut self, state: &RootState) -> Option<&mut dyn Component> {
        let project = state.project()?;
        if self.project_id.as_deref() != Some(project.id.as_str()) {
            self.editors = Editors::default();
            self.project_id = Some(project.id.clone());
        }
        Some(self.editors.for_step(project.current_step))
    }
}

impl Page for WizardPage {
    fn name(&self) -> &str {
        "wizard"
    }

    fn handle_events(&mut self, event: &Event, state: &RootState) -> Result<Option<EventResponse<Action>>> {
        match self.active(state) {
            Some(editor) => editor.handle_events(event, state),
            None => Ok(None),
        }
    }

    fn update(&mut self, action: &Action, state: &RootState) -> Result<Option<Action>> {
        match self.active(state) {
            Some(editor) => editor.update(action, state),
            None => Ok(None),
        }
    }

    fn on_enter(&mut self, state: &RootState) -> Result<()> {
        self.active(state);
        Ok(())
    }

    fn draw(&mut self, f: &mut Frame, area: Rect, state: &RootState) -> Result<()> {
        let [indicator, body] = Layout::default()
            .direction(Direction::Vertical)
            .constraints([self.indicator.height_constraint(), Constraint::Fill(1)])
            .areas(area);
        self.indicator.draw(f, indicator, state)?;
        if let Some(editor) = self.active(state) {
            editor.draw(f, body, state)?;
        }
        Ok(())
    }
}
