use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};
use studio_core::{catalog, ProjectCommand};

use super::{consumed, emit, panel, step_cursor, Component};
use crate::{
    action::Action,
    core::state::RootState,
    theme::{Theme, UiGroup},
    tui::EventResponse,
};

#[derive(Default)]
pub struct TemplateSelection {
    theme: Theme,
    list: ListState,
}

impl TemplateSelection {
    /// Cursor starts on the chosen template, or the first one.
    fn cursor(&mut self, state: &RootState) -> usize {
        if let Some(i) = self.list.selected() {
            return i;
        }
        let chosen = state
            .project()
            .and_then(|p| p.template.as_ref())
            .and_then(|t| catalog::templates().iter().position(|c| c.id == t.id))
            .unwrap_or(0);
        self.list.select(Some(chosen));
        chosen
    }
}

impl Component for TemplateSelection {
    fn handle_key_events(&mut self, key: KeyEvent, state: &RootState) -> Result<Option<EventResponse<Action>>> {
        let cursor = self.cursor(state);
        let len = catalog::templates().len();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.list.select(Some(step_cursor(cursor, -1, len)));
                consumed()
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.list.select(Some(step_cursor(cursor, 1, len)));
                consumed()
            }
            KeyCode::Enter | KeyCode::Char(' ') => match catalog::templates().get(cursor) {
                Some(t) => emit(Action::Project(ProjectCommand::SelectTemplate(t.id.clone()))),
                None => Ok(None),
            },
            _ => Ok(None),
        }
    }

    fn draw(&mut self, f: &mut Frame<'_>, area: Rect, state: &RootState) -> Result<()> {
        let cursor = self.cursor(state);
        let chosen = state.project().and_then(|p| p.template.as_ref()).map(|t| t.id.as_str());
        let [left, right] = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .areas(area);

        let items: Vec<ListItem> = catalog::templates()
            .iter()
            .map(|t| {
                let mark = if Some(t.id.as_str()) == chosen { "● " } else { "  " };
                ListItem::new(Line::from(vec![
                    Span::styled(mark, self.theme.style(UiGroup::Success)),
                    Span::raw(format!("{} ", t.preview)),
                    Span::styled(t.name.clone(), self.theme.style(UiGroup::Title)),
                    Span::styled(format!("  {}", t.category), self.theme.style(UiGroup::Dimmed)),
                ]))
            })
            .collect();
        let list = List::new(items)
            .block(panel(" Choose Your Game Template ", true, &self.theme))
            .highlight_style(self.theme.style(UiGroup::Selected))
            .highlight_symbol("› ");
        f.render_stateful_widget(list, left, &mut self.list);

        let Some(t) = catalog::templates().get(cursor) else {
            return Ok(());
        };
        let mut lines = vec![
            Line::from(Span::styled(format!("{} {}", t.preview, t.name), self.theme.style(UiGroup::Accent))),
            Line::from(Span::styled(t.description.clone(), self.theme.style(UiGroup::Text))),
            Line::default(),
            Line::from(Span::styled("Mechanics", self.theme.style(UiGroup::Title))),
        ];
        lines.extend(t.mechanics.iter().map(|m| Line::from(format!("  • {m}"))));
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            format!("Required assets ({})", t.required_assets.len()),
            self.theme.style(UiGroup::Title),
        )));
        lines.extend(t.required_assets.iter().map(|a| {
            Line::from(vec![
                Span::raw(format!("  • {} ", a.name)),
                Span::styled(format!("[{}]", a.kind), self.theme.style(UiGroup::Dimmed)),
            ])
        }));
        if Some(t.id.as_str()) == chosen {
            lines.push(Line::default());
            lines.push(Line::from(Span::styled("✓ Selected", self.theme.style(UiGroup::Success))));
        }
        f.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: false })
                .block(panel(" Details ", false, &self.theme)),
            right,
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::reducer::reduce;
    use crossterm::event::KeyModifiers;
    use pretty_assertions::assert_eq;

    fn press(c: &mut TemplateSelection, state: &RootState, code: KeyCode) -> Option<EventResponse<Action>> {
        c.handle_key_events(KeyEvent::new(code, KeyModifiers::NONE), state).unwrap()
    }

    #[test]
    fn enter_selects_template_under_cursor() {
        let mut state = RootState::default();
        reduce(&mut state, &Action::NewProject);
        let mut c = TemplateSelection::default();
        press(&mut c, &state, KeyCode::Down);
        press(&mut c, &state, KeyCode::Down);
        assert_eq!(
            press(&mut c, &state, KeyCode::Enter),
            Some(EventResponse::Stop(Action::Project(ProjectCommand::SelectTemplate(
                "puzzle-platformer".into()
            ))))
        );
    }

    #[test]
    fn cursor_starts_on_chosen_template() {
        let mut state = RootState::default();
        reduce(&mut state, &Action::NewProject);
        reduce(&mut state, &Action::Project(ProjectCommand::SelectTemplate("space-shooter".into())));
        let mut c = TemplateSelection::default();
        assert_eq!(c.cursor(&state), 3);
    }
}
