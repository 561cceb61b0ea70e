use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Gauge, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};
use studio_core::{assets, catalog::AssetRequirement};

use super::{
    consumed, emit, panel, step_cursor,
    text_field::{FieldEvent, TextField},
    Component,
};
use crate::{
    action::Action,
    core::state::RootState,
    theme::{Theme, UiGroup},
    tui::EventResponse,
};

/// One requirement at a time: describe it, then generate a placeholder.
pub struct AssetCreation {
    theme: Theme,
    cursor: usize,
    draft: TextField,
}

impl Default for AssetCreation {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            cursor: 0,
            draft: TextField::new(" Describe the asset "),
        }
    }
}

impl AssetCreation {
    fn requirements(state: &RootState) -> &[AssetRequirement] {
        state
            .project()
            .and_then(|p| p.template.as_ref())
            .map(|t| t.required_assets.as_slice())
            .unwrap_or_default()
    }

    fn move_cursor(&mut self, delta: isize, len: usize) {
        let next = step_cursor(self.cursor, delta, len);
        if next != self.cursor {
            self.cursor = next;
            self.draft.clear();
        }
    }
}

impl Component for AssetCreation {
    fn handle_key_events(&mut self, key: KeyEvent, state: &RootState) -> Result<Option<EventResponse<Action>>> {
        let requirements = Self::requirements(state);
        if requirements.is_empty() {
            return Ok(None);
        }
        match key.code {
            KeyCode::Up => {
                self.move_cursor(-1, requirements.len());
                consumed()
            }
            KeyCode::Down => {
                self.move_cursor(1, requirements.len());
                consumed()
            }
            // Esc stays with the app: back to the dashboard.
            KeyCode::Esc => Ok(None),
            _ => match self.draft.handle_key(key) {
                FieldEvent::Submitted(description) => {
                    if description.trim().is_empty() || state.generating.is_some() {
                        return consumed();
                    }
                    let Some(req) = requirements.get(self.cursor) else {
                        return consumed();
                    };
                    emit(Action::GenerateAsset {
                        requirement: req.name.clone(),
                        description,
                    })
                }
                FieldEvent::Edited => consumed(),
                FieldEvent::Cancelled | FieldEvent::Ignored => Ok(None),
            },
        }
    }

    fn handle_paste(&mut self, text: &str, state: &RootState) -> Result<Option<EventResponse<Action>>> {
        if Self::requirements(state).is_empty() {
            return Ok(None);
        }
        self.draft.paste(text);
        consumed()
    }

    fn update(&mut self, action: &Action, _state: &RootState) -> Result<Option<Action>> {
        if let Action::GenerateAsset { .. } = action {
            self.draft.clear();
        }
        Ok(None)
    }

    fn draw(&mut self, f: &mut Frame<'_>, area: Rect, state: &RootState) -> Result<()> {
        let Some(project) = state.project() else {
            return Ok(());
        };
        let Some(template) = project.template.as_ref() else {
            let notice = Paragraph::new("Please select a template first (Ctrl+P to go back).")
                .style(self.theme.style(UiGroup::Warn))
                .block(panel(" Create Your Game Assets ", false, &self.theme));
            f.render_widget(notice, area);
            return Ok(());
        };
        let requirements = &template.required_assets;
        self.cursor = self.cursor.min(requirements.len().saturating_sub(1));

        let [left, right] = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .areas(area);
        let [checklist, progress] = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Fill(1), Constraint::Length(1)])
            .areas(left);

        let items: Vec<ListItem> = requirements
            .iter()
            .map(|req| {
                let (mark, group) = if state.generating.as_deref() == Some(req.name.as_str()) {
                    ("⏳", UiGroup::Accent)
                } else if assets::find(&project.assets, &req.name).is_some() {
                    ("✓", UiGroup::Success)
                } else {
                    ("○", UiGroup::Dimmed)
                };
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{mark} "), self.theme.style(group)),
                    Span::raw(req.name.clone()),
                    Span::styled(format!("  {}", req.kind), self.theme.style(UiGroup::Dimmed)),
                ]))
            })
            .collect();
        let mut list_state = ListState::default().with_selected(Some(self.cursor));
        f.render_stateful_widget(
            List::new(items)
                .block(panel(" Create Your Game Assets ", false, &self.theme))
                .highlight_style(self.theme.style(UiGroup::Selected)),
            checklist,
            &mut list_state,
        );

        let done = requirements.len() - assets::missing(template, &project.assets).len();
        let ratio = if requirements.is_empty() { 1.0 } else { done as f64 / requirements.len() as f64 };
        f.render_widget(
            Gauge::default()
                .gauge_style(self.theme.style(UiGroup::Success))
                .ratio(ratio)
                .label(format!("{done} of {} assets generated", requirements.len())),
            progress,
        );

        let Some(req) = requirements.get(self.cursor) else {
            return Ok(());
        };
        let [info, input, result] = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(5), Constraint::Length(3), Constraint::Fill(1)])
            .areas(right);

        let info_lines = vec![
            Line::from(Span::styled(req.name.clone(), self.theme.style(UiGroup::Accent))),
            Line::from(Span::styled(format!("Type: {}", req.kind), self.theme.style(UiGroup::Dimmed))),
            Line::from(req.description.clone()),
        ];
        f.render_widget(
            Paragraph::new(info_lines)
                .wrap(Wrap { trim: true })
                .block(panel(format!(" Asset {} of {} ", self.cursor + 1, requirements.len()), false, &self.theme)),
            info,
        );

        self.draft.set_label(format!(" Describe your {} ", req.name.to_lowercase()));
        self.draft.draw(f, input, &self.theme, true, "e.g. a cheerful fox with a red scarf");

        let mut lines = Vec::new();
        if state.generating.as_deref() == Some(req.name.as_str()) {
            lines.push(Line::from(Span::styled("Generating…", self.theme.style(UiGroup::Accent))));
        } else if state.generating.is_some() {
            lines.push(Line::from(Span::styled(
                "Another asset is being generated",
                self.theme.style(UiGroup::Dimmed),
            )));
        }
        if let Some(asset) = assets::find(&project.assets, &req.name) {
            lines.push(Line::from(Span::styled("✓ Generated", self.theme.style(UiGroup::Success))));
            lines.push(Line::from(format!("Prompt: {}", asset.description)));
            lines.push(Line::from(Span::styled(asset.url.clone(), self.theme.style(UiGroup::Dimmed))));
            lines.push(Line::from(Span::styled(
                "Enter a new description to regenerate",
                self.theme.style(UiGroup::Dimmed),
            )));
        }
        f.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: false })
                .block(panel(" Preview ", false, &self.theme)),
            result,
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
    use studio_core::ProjectCommand;

    fn press(c: &mut AssetCreation, state: &RootState, code: KeyCode) -> Option<EventResponse<Action>> {
        c.handle_key_events(KeyEvent::new(code, KeyModifiers::NONE), state).unwrap()
    }

    fn runner() -> RootState {
        let mut state = RootState::default();
        reduce(&mut state, &Action::NewProject);
        reduce(&mut state, &Action::Project(ProjectCommand::SelectTemplate("endless-runner".into())));
        state
    }

    #[test]
    fn typed_description_generates_current_requirement() {
        let state = runner();
        let mut c = AssetCreation::default();
        press(&mut c, &state, KeyCode::Down);
        for ch in "dark forest".chars() {
            press(&mut c, &state, KeyCode::Char(ch));
        }
        let second = state.project().unwrap().template.as_ref().unwrap().required_assets[1].name.clone();
        assert_eq!(
            press(&mut c, &state, KeyCode::Enter),
            Some(EventResponse::Stop(Action::GenerateAsset {
                requirement: second,
                description: "dark forest".into(),
            }))
        );
    }

    #[test]
    fn blank_draft_does_nothing() {
        let state = runner();
        let mut c = AssetCreation::default();
        assert_eq!(press(&mut c, &state, KeyCode::Enter), Some(EventResponse::Stop(Action::Render)));
    }

    #[test]
    fn moving_clears_draft() {
        let state = runner();
        let mut c = AssetCreation::default();
        press(&mut c, &state, KeyCode::Char('x'));
        press(&mut c, &state, KeyCode::Down);
        assert_eq!(c.draft.value(), "");
    }

    #[test]
    fn without_template_keys_pass_through() {
        let mut state = RootState::default();
        reduce(&mut state, &Action::NewProject);
        let mut c = AssetCreation::default();
        assert_eq!(press(&mut c, &state, KeyCode::Char('q')), None);
    }
}
