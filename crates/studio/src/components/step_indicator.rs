use color_eyre::Result;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Gauge, Paragraph},
    Frame,
};
use studio_core::step::Step;

use super::Component;
use crate::{
    core::state::RootState,
    theme::{Theme, UiGroup},
};

/// Numbered step trail with a progress bar underneath.
#[derive(Default)]
pub struct StepIndicator {
    theme: Theme,
}

impl StepIndicator {
    fn trail(&self, current: Step) -> Line<'static> {
        let mut spans = Vec::new();
        for step in Step::ALL {
            let (marker, group) = match step.index().cmp(&current.index()) {
                std::cmp::Ordering::Less => ("✓".to_string(), UiGroup::Success),
                std::cmp::Ordering::Equal => ((step.index() + 1).to_string(), UiGroup::Accent),
                std::cmp::Ordering::Greater => ((step.index() + 1).to_string(), UiGroup::Dimmed),
            };
            spans.push(Span::styled(format!(" {marker} {} ", step.label()), self.theme.style(group)));
            if !step.is_last() {
                spans.push(Span::styled("›", self.theme.style(UiGroup::Border)));
            }
        }
        Line::from(spans)
    }
}

impl Component for StepIndicator {
    fn height_constraint(&self) -> Constraint {
        Constraint::Length(2)
    }

    fn draw(&mut self, f: &mut Frame<'_>, area: Rect, state: &RootState) -> Result<()> {
        let Some(project) = state.project() else {
            return Ok(());
        };
        let current = project.current_step;
        let [trail, bar] = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(1)])
            .areas(area);
        f.render_widget(Paragraph::new(self.trail(current)), trail);

        let done = current.index() + 1;
        let gauge = Gauge::default()
            .gauge_style(self.theme.style(UiGroup::Accent))
            .ratio(done as f64 / Step::ALL.len() as f64)
            .label(format!("Step {done} of {}", Step::ALL.len()));
        f.render_widget(gauge, bar);
        Ok(())
    }
}
