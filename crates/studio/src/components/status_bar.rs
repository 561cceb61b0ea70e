use color_eyre::Result;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use studio_core::step::Step;

use super::Component;
use crate::{
    core::state::{NoticeLevel, RootState, View},
    theme::{Theme, UiGroup},
};

/// Bottom line: notices and running tasks on the left, key hints on the right.
#[derive(Default)]
pub struct StatusBar {
    theme: Theme,
}

pub fn hints(state: &RootState) -> &'static str {
    match (state.view, state.project().map(|p| p.current_step)) {
        (View::Dashboard, _) | (View::Wizard, None) => "↑↓ choose · Enter open · q quit",
        (View::Wizard, Some(step)) => match step {
            Step::Template => "↑↓ browse · Enter select · ^N next · Esc dashboard",
            Step::Assets => "↑↓ asset · type description · Enter generate · ^N/^P steps",
            Step::Mechanics => "↑↓ row · ←→ adjust · Space toggle · ^N/^P steps",
            Step::Levels => "↑↓ level · a add · e edit · d delete · ^N/^P steps",
            Step::Testing => "Space play/pause · r reset · ^N/^P steps",
            Step::Export => "↑↓ row · Space toggle · Enter edit/export · ^P back",
        },
    }
}

impl Component for StatusBar {
    fn height_constraint(&self) -> Constraint {
        Constraint::Length(1)
    }

    fn draw(&mut self, f: &mut Frame<'_>, area: Rect, state: &RootState) -> Result<()> {
        let mut left = Vec::new();
        for (_, label) in &state.tasks {
            left.push(Span::styled(format!("⏳ {label}… "), self.theme.style(UiGroup::Accent)));
        }
        if let Some(notice) = &state.notice {
            let group = match notice.level {
                NoticeLevel::Info => UiGroup::Success,
                NoticeLevel::Warn => UiGroup::Warn,
            };
            left.push(Span::styled(notice.message.clone(), self.theme.style(group)));
        }

        let hint = hints(state);
        let [l, r] = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Fill(1), Constraint::Length(hint.chars().count() as u16 + 1)])
            .areas(area);
        f.render_widget(Paragraph::new(Line::from(left)), l);
        f.render_widget(
            Paragraph::new(Span::styled(hint, self.theme.style(UiGroup::Dimmed))),
            r,
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{action::Action, core::reducer::reduce};

    #[test]
    fn hints_follow_the_step() {
        let mut state = RootState::default();
        assert!(hints(&state).contains("quit"));
        reduce(&mut state, &Action::NewProject);
        assert!(hints(&state).contains("Enter select"));
    }
}
