use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};
use strum::IntoEnumIterator;
use studio_core::{
    export::{ExportReceipt, Platform},
    Project, ProjectCommand,
};

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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Row {
    Title,
    Description,
    Platform(Platform),
    Analytics,
    Leaderboard,
    Export,
}

fn rows() -> Vec<Row> {
    let mut rows = vec![Row::Title, Row::Description];
    rows.extend(Platform::iter().map(Row::Platform));
    rows.extend([Row::Analytics, Row::Leaderboard, Row::Export]);
    rows
}

pub struct Export {
    theme: Theme,
    cursor: usize,
    /// Text field being edited, if any.
    editing: Option<(Row, TextField)>,
}

impl Default for Export {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            cursor: 0,
            editing: None,
        }
    }
}

impl Export {
    fn row(&self) -> Row {
        let rows = rows();
        rows[self.cursor.min(rows.len() - 1)]
    }

    fn edit_key(&mut self, key: KeyEvent, project: &Project) -> Result<Option<EventResponse<Action>>> {
        let Some((_, field)) = self.editing.as_mut() else {
            return Ok(None);
        };
        match field.handle_key(key) {
            FieldEvent::Submitted(_) => {
                let committed = self.commit(project);
                self.editing = None;
                committed
            }
            FieldEvent::Cancelled => {
                self.editing = None;
                consumed()
            }
            FieldEvent::Edited => self.commit(project),
            FieldEvent::Ignored => Ok(None),
        }
    }

    /// Writes the open field to the project as soon as it differs, so the
    /// text survives Esc and step changes.
    fn commit(&self, project: &Project) -> Result<Option<EventResponse<Action>>> {
        let cmd = match &self.editing {
            Some((Row::Title, field)) if field.value() != project.name => {
                ProjectCommand::Rename(field.value().to_string())
            }
            Some((Row::Description, field)) if field.value() != project.description => {
                ProjectCommand::Describe(field.value().to_string())
            }
            _ => return consumed(),
        };
        emit(Action::Project(cmd))
    }

    fn settings_lines(&self, project: &Project, exporting: bool) -> Vec<Line<'static>> {
        let theme = &self.theme;
        let row_style = |row: Row| {
            if self.editing.is_none() && self.row() == row {
                theme.style(UiGroup::Selected)
            } else {
                theme.style(UiGroup::Text)
            }
        };
        let check = |on: bool| if on { "[x]" } else { "[ ]" };
        let settings = &project.export;

        let mut lines = vec![
            Line::from(Span::styled("Game Details", theme.style(UiGroup::Title))),
            Line::from(vec![
                Span::styled("  Title        ", row_style(Row::Title)),
                Span::raw(project.name.clone()),
            ]),
            Line::from(vec![
                Span::styled("  Description  ", row_style(Row::Description)),
                Span::raw(if project.description.is_empty() {
                    "(none)".to_string()
                } else {
                    project.description.clone()
                }),
            ]),
            Line::default(),
            Line::from(Span::styled("Publish To", theme.style(UiGroup::Title))),
        ];
        for p in Platform::iter() {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("  {} {:<22}", check(settings.platforms.contains(&p)), p.title()),
                    row_style(Row::Platform(p)),
                ),
                Span::styled(p.description(), theme.style(UiGroup::Dimmed)),
            ]));
        }
        lines.push(Line::default());
        lines.push(Line::from(Span::styled("Features", theme.style(UiGroup::Title))));
        lines.push(Line::from(Span::styled(
            format!("  {} Analytics", check(settings.analytics)),
            row_style(Row::Analytics),
        )));
        lines.push(Line::from(Span::styled(
            format!("  {} Leaderboard", check(settings.leaderboard)),
            row_style(Row::Leaderboard),
        )));
        lines.push(Line::default());
        let button = if exporting {
            Span::styled("  ⏳ Exporting your game…", theme.style(UiGroup::Accent))
        } else if settings.platforms.is_empty() {
            Span::styled("  🚀 Export Game (pick a platform first)", theme.style(UiGroup::Dimmed))
        } else {
            Span::styled("  🚀 Export Game", row_style(Row::Export))
        };
        lines.push(Line::from(button));
        lines
    }

    fn complete_lines(&self, receipt: &ExportReceipt) -> Vec<Line<'static>> {
        let theme = &self.theme;
        let mut lines = vec![
            Line::from(Span::styled("🎉 Your Game is Live!", theme.style(UiGroup::Success))),
            Line::default(),
            Line::from(Span::styled("Share Link", theme.style(UiGroup::Title))),
            Line::from(Span::styled(format!("  {}", receipt.share_link), theme.style(UiGroup::Accent))),
            Line::default(),
            Line::from(Span::styled("Downloads", theme.style(UiGroup::Title))),
        ];
        lines.extend(receipt.platforms.iter().map(|p| {
            Line::from(vec![
                Span::raw(format!("  ⬇ {:<22}", p.title())),
                Span::styled(p.description(), theme.style(UiGroup::Dimmed)),
            ])
        }));
        lines.extend([
            Line::default(),
            Line::from(Span::styled("Statistics", theme.style(UiGroup::Title))),
            Line::from(format!("  Assets     {}", receipt.asset_count)),
            Line::from(format!("  File size  {}", receipt.file_size)),
            Line::from(format!("  Load time  {}", receipt.load_time)),
            Line::default(),
            Line::from(Span::styled("Press n to create a new game", theme.style(UiGroup::Dimmed))),
        ]);
        lines
    }
}

impl Component for Export {
    fn handle_key_events(&mut self, key: KeyEvent, state: &RootState) -> Result<Option<EventResponse<Action>>> {
        let Some(project) = state.project() else {
            return Ok(None);
        };
        if project.export.is_complete() {
            return match key.code {
                KeyCode::Char('n') => emit(Action::NewProject),
                _ => Ok(None),
            };
        }
        if self.editing.is_some() {
            return self.edit_key(key, project);
        }
        let len = rows().len();
        match (key.code, self.row()) {
            (KeyCode::Up | KeyCode::Char('k'), _) => {
                self.cursor = step_cursor(self.cursor, -1, len);
                consumed()
            }
            (KeyCode::Down | KeyCode::Char('j'), _) => {
                self.cursor = step_cursor(self.cursor, 1, len);
                consumed()
            }
            (KeyCode::Enter, row @ (Row::Title | Row::Description)) => {
                let (label, value) = match row {
                    Row::Title => (" Game title ", project.name.clone()),
                    _ => (" Game description ", project.description.clone()),
                };
                let mut field = TextField::new(label);
                field.set_value(value);
                self.editing = Some((row, field));
                consumed()
            }
            (KeyCode::Enter | KeyCode::Char(' '), Row::Platform(p)) => {
                emit(Action::Project(ProjectCommand::TogglePlatform(p)))
            }
            (KeyCode::Enter | KeyCode::Char(' '), Row::Analytics) => {
                emit(Action::Project(ProjectCommand::ToggleAnalytics))
            }
            (KeyCode::Enter | KeyCode::Char(' '), Row::Leaderboard) => {
                emit(Action::Project(ProjectCommand::ToggleLeaderboard))
            }
            (KeyCode::Enter, Row::Export) => {
                if state.exporting || project.export.platforms.is_empty() {
                    consumed()
                } else {
                    emit(Action::Export)
                }
            }
            _ => Ok(None),
        }
    }

    fn handle_paste(&mut self, text: &str, state: &RootState) -> Result<Option<EventResponse<Action>>> {
        let Some((_, field)) = self.editing.as_mut() else {
            return Ok(None);
        };
        field.paste(text);
        match state.project() {
            Some(project) => self.commit(project),
            None => consumed(),
        }
    }

    fn draw(&mut self, f: &mut Frame<'_>, area: Rect, state: &RootState) -> Result<()> {
        let Some(project) = state.project() else {
            return Ok(());
        };
        if let Some(receipt) = &project.export.receipt {
            f.render_widget(
                Paragraph::new(self.complete_lines(receipt))
                    .wrap(Wrap { trim: false })
                    .block(panel(" Export Complete ", true, &self.theme)),
                area,
            );
            return Ok(());
        }

        let settings = Paragraph::new(self.settings_lines(project, state.exporting))
            .wrap(Wrap { trim: false })
            .block(panel(" Export Your Game ", self.editing.is_none(), &self.theme));
        match &self.editing {
            Some((_, field)) => {
                let [input, rest] = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Length(3), Constraint::Fill(1)])
                    .areas(area);
                field.draw(f, input, &self.theme, true, "");
                f.render_widget(settings, rest);
            }
            None => f.render_widget(settings, area),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::reducer::reduce;
    use crossterm::event::KeyModifiers;
    use pretty_assertions::assert_eq;

    fn press(c: &mut Export, state: &RootState, code: KeyCode) -> Option<EventResponse<Action>> {
        c.handle_key_events(KeyEvent::new(code, KeyModifiers::NONE), state).unwrap()
    }

    fn fresh() -> RootState {
        let mut state = RootState::default();
        reduce(&mut state, &Action::NewProject);
        state
    }

    #[test]
    fn title_edit_renames_project() {
        let state = fresh();
        let mut c = Export::default();
        press(&mut c, &state, KeyCode::Enter);
        for _ in 0.."New Game Project".len() {
            press(&mut c, &state, KeyCode::Backspace);
        }
        for ch in "Fox Run".chars() {
            press(&mut c, &state, KeyCode::Char(ch));
        }
        assert_eq!(
            press(&mut c, &state, KeyCode::Enter),
            Some(EventResponse::Stop(Action::Project(ProjectCommand::Rename("Fox Run".into()))))
        );
        assert!(c.editing.is_none());
    }

    #[test]
    fn typed_title_and_description_survive_leaving_the_field() {
        let mut state = fresh();
        let mut c = Export::default();
        fn type_into(c: &mut Export, state: &mut RootState, code: KeyCode) {
            if let Some(EventResponse::Stop(action)) = press(c, state, code) {
                reduce(state, &action);
            }
        }

        type_into(&mut c, &mut state, KeyCode::Enter);
        for ch in " II".chars() {
            type_into(&mut c, &mut state, KeyCode::Char(ch));
        }
        type_into(&mut c, &mut state, KeyCode::Esc);
        assert!(c.editing.is_none());
        assert_eq!(state.project().unwrap().name, "New Game Project II");

        type_into(&mut c, &mut state, KeyCode::Down);
        type_into(&mut c, &mut state, KeyCode::Enter);
        for ch in "Dodge rocks".chars() {
            type_into(&mut c, &mut state, KeyCode::Char(ch));
        }
        let ctrl_p = KeyEvent::new(KeyCode::Char('p'), KeyModifiers::CONTROL);
        assert_eq!(c.handle_key_events(ctrl_p, &state).unwrap(), None);
        assert_eq!(state.project().unwrap().description, "Dodge rocks");
    }

    #[test]
    fn space_on_platform_row_toggles() {
        let state = fresh();
        let mut c = Export::default();
        press(&mut c, &state, KeyCode::Down);
        press(&mut c, &state, KeyCode::Down);
        assert_eq!(
            press(&mut c, &state, KeyCode::Char(' ')),
            Some(EventResponse::Stop(Action::Project(ProjectCommand::TogglePlatform(Platform::Web))))
        );
    }

    #[test]
    fn export_button_needs_a_platform() {
        let mut state = fresh();
        let mut c = Export::default();
        for _ in 0..rows().len() {
            press(&mut c, &state, KeyCode::Down);
        }
        assert_eq!(press(&mut c, &state, KeyCode::Enter), Some(EventResponse::Stop(Action::Export)));

        reduce(&mut state, &Action::Project(ProjectCommand::TogglePlatform(Platform::Web)));
        assert_eq!(press(&mut c, &state, KeyCode::Enter), Some(EventResponse::Stop(Action::Render)));
    }

    #[test]
    fn complete_view_offers_new_game() {
        let mut state = fresh();
        let id = state.project().unwrap().id.clone();
        let receipt = ExportReceipt::new(
            "https://games.test/play",
            &id,
            &state.project().unwrap().export.platforms,
            0,
        );
        reduce(&mut state, &Action::Project(ProjectCommand::CompleteExport(receipt)));
        let mut c = Export::default();
        assert_eq!(press(&mut c, &state, KeyCode::Char('n')), Some(EventResponse::Stop(Action::NewProject)));
    }
}
