use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};
use studio_core::{
    levels::{Level, MAX_DIFFICULTY, MIN_DIFFICULTY},
    ProjectCommand,
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
enum Field {
    Name,
    Difficulty,
    Layout,
    Assets,
}

impl Field {
    fn next(self) -> Self {
        match self {
            Field::Name => Field::Difficulty,
            Field::Difficulty => Field::Layout,
            Field::Layout => Field::Assets,
            Field::Assets => Field::Name,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Browse,
    Edit(Field),
}

pub struct LevelDesign {
    theme: Theme,
    mode: Mode,
    name: TextField,
    layout: TextField,
    asset_cursor: usize,
}

impl Default for LevelDesign {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            mode: Mode::Browse,
            name: TextField::new(" Name "),
            layout: TextField::new(" Layout "),
            asset_cursor: 0,
        }
    }
}

fn stars(difficulty: u8) -> String {
    (MIN_DIFFICULTY..=MAX_DIFFICULTY)
        .map(|d| if d <= difficulty { '★' } else { '☆' })
        .collect()
}

impl LevelDesign {
    fn start_editing(&mut self, level: &Level) {
        self.name.set_value(level.name.clone());
        self.layout.set_value(level.layout.clone());
        self.asset_cursor = 0;
        self.mode = Mode::Edit(Field::Name);
    }

    /// Writes a text field back to the project whenever it differs from the
    /// stored level, so leaving the field never drops typed text.
    fn commit(&self, field: Field, level: &Level) -> Result<Option<EventResponse<Action>>> {
        let cmd = match field {
            Field::Name if self.name.value() != level.name => ProjectCommand::RenameLevel {
                id: level.id.clone(),
                name: self.name.value().to_string(),
            },
            Field::Layout if self.layout.value() != level.layout => ProjectCommand::SetLevelLayout {
                id: level.id.clone(),
                layout: self.layout.value().to_string(),
            },
            _ => return consumed(),
        };
        emit(Action::Project(cmd))
    }

    fn browse_key(&mut self, key: KeyEvent, state: &RootState) -> Result<Option<EventResponse<Action>>> {
        let Some(board) = state.project().map(|p| &p.levels) else {
            return Ok(None);
        };
        let current = board.selected_index().unwrap_or(0);
        let pick = |delta| {
            let i = step_cursor(current, delta, board.len());
            board.levels().get(i).map(|l| l.id.clone())
        };
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => match pick(-1) {
                Some(id) => emit(Action::Project(ProjectCommand::SelectLevel(id))),
                None => consumed(),
            },
            KeyCode::Down | KeyCode::Char('j') => match pick(1) {
                Some(id) => emit(Action::Project(ProjectCommand::SelectLevel(id))),
                None => consumed(),
            },
            KeyCode::Char('a') => emit(Action::Project(ProjectCommand::AddLevel)),
            KeyCode::Char('d') | KeyCode::Delete => match board.selected() {
                Some(level) => emit(Action::Project(ProjectCommand::DeleteLevel(level.id.clone()))),
                None => consumed(),
            },
            KeyCode::Char('e') | KeyCode::Enter => {
                if let Some(level) = board.selected() {
                    self.start_editing(level);
                }
                consumed()
            }
            _ => Ok(None),
        }
    }

    fn edit_key(&mut self, field: Field, key: KeyEvent, state: &RootState) -> Result<Option<EventResponse<Action>>> {
        let Some(project) = state.project() else {
            return Ok(None);
        };
        let Some(level) = project.levels.selected() else {
            self.mode = Mode::Browse;
            return consumed();
        };
        if key.code == KeyCode::Tab {
            self.mode = Mode::Edit(field.next());
            return self.commit(field, level);
        }
        match field {
            Field::Name | Field::Layout => {
                let input = if field == Field::Name { &mut self.name } else { &mut self.layout };
                match input.handle_key(key) {
                    FieldEvent::Submitted(_) | FieldEvent::Edited => self.commit(field, level),
                    FieldEvent::Cancelled => {
                        self.mode = Mode::Browse;
                        consumed()
                    }
                    FieldEvent::Ignored => Ok(None),
                }
            }
            Field::Difficulty => {
                let delta: i16 = match key.code {
                    KeyCode::Left | KeyCode::Char('h') => -1,
                    KeyCode::Right | KeyCode::Char('l') => 1,
                    KeyCode::Char(c @ '1'..='5') => i16::from(c as u8 - b'0') - i16::from(level.difficulty),
                    KeyCode::Esc => {
                        self.mode = Mode::Browse;
                        return consumed();
                    }
                    _ => return Ok(None),
                };
                let difficulty = (i16::from(level.difficulty) + delta)
                    .clamp(i16::from(MIN_DIFFICULTY), i16::from(MAX_DIFFICULTY)) as u8;
                emit(Action::Project(ProjectCommand::SetLevelDifficulty {
                    id: level.id.clone(),
                    difficulty,
                }))
            }
            Field::Assets => match key.code {
                KeyCode::Left | KeyCode::Up => {
                    self.asset_cursor = step_cursor(self.asset_cursor, -1, project.assets.len());
                    consumed()
                }
                KeyCode::Right | KeyCode::Down => {
                    self.asset_cursor = step_cursor(self.asset_cursor, 1, project.assets.len());
                    consumed()
                }
                KeyCode::Char(' ') | KeyCode::Enter => match project.assets.get(self.asset_cursor) {
                    Some(asset) => emit(Action::Project(ProjectCommand::ToggleLevelAsset {
                        id: level.id.clone(),
                        asset: asset.name.clone(),
                    })),
                    None => consumed(),
                },
                KeyCode::Esc => {
                    self.mode = Mode::Browse;
                    consumed()
                }
                _ => Ok(None),
            },
        }
    }

    fn detail_lines(&self, level: &Level, state: &RootState) -> Vec<Line<'static>> {
        let focus = |f: Field| matches!(self.mode, Mode::Edit(cur) if cur == f);
        let label = |f: Field, text: &str| {
            let group = if focus(f) { UiGroup::Selected } else { UiGroup::Title };
            Span::styled(format!("{text:<12}"), self.theme.style(group))
        };
        let mut lines = vec![
            Line::from(vec![label(Field::Name, "Name"), Span::raw(level.name.clone())]),
            Line::from(vec![
                label(Field::Difficulty, "Difficulty"),
                Span::styled(stars(level.difficulty), self.theme.style(UiGroup::Warn)),
                Span::styled(format!("  {}/{MAX_DIFFICULTY}", level.difficulty), self.theme.style(UiGroup::Dimmed)),
            ]),
            Line::from(vec![label(Field::Layout, "Layout"), Span::raw(level.layout.clone())]),
            Line::from(label(Field::Assets, "Assets")),
        ];
        let assets = state.project().map(|p| p.assets.as_slice()).unwrap_or_default();
        if assets.is_empty() {
            lines.push(Line::from(Span::styled("  no generated assets yet", self.theme.style(UiGroup::Dimmed))));
        }
        for (i, asset) in assets.iter().enumerate() {
            let check = if level.assets.contains(&asset.name) { "[x]" } else { "[ ]" };
            let group = if focus(Field::Assets) && i == self.asset_cursor { UiGroup::Selected } else { UiGroup::Text };
            lines.push(Line::from(Span::styled(format!("  {check} {}", asset.name), self.theme.style(group))));
        }
        lines
    }
}

impl Component for LevelDesign {
    fn handle_key_events(&mut self, key: KeyEvent, state: &RootState) -> Result<Option<EventResponse<Action>>> {
        match self.mode {
            Mode::Browse => self.browse_key(key, state),
            Mode::Edit(field) => self.edit_key(field, key, state),
        }
    }

    fn handle_paste(&mut self, text: &str, state: &RootState) -> Result<Option<EventResponse<Action>>> {
        let field = match self.mode {
            Mode::Edit(field @ Field::Name) => {
                self.name.paste(text);
                field
            }
            Mode::Edit(field @ Field::Layout) => {
                self.layout.paste(text);
                field
            }
            _ => return Ok(None),
        };
        match state.project().and_then(|p| p.levels.selected()) {
            Some(level) => self.commit(field, level),
            None => consumed(),
        }
    }

    fn update(&mut self, action: &Action, state: &RootState) -> Result<Option<Action>> {
        let selected = state.project().and_then(|p| p.levels.selected());
        match (action, selected) {
            // a new level opens straight in the editor
            (Action::Project(ProjectCommand::AddLevel), Some(level)) => self.start_editing(level),
            (Action::Project(ProjectCommand::SelectLevel(_) | ProjectCommand::DeleteLevel(_)), _) => {
                self.mode = Mode::Browse;
            }
            (_, None) => self.mode = Mode::Browse,
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, f: &mut Frame<'_>, area: Rect, state: &RootState) -> Result<()> {
        let Some(project) = state.project() else {
            return Ok(());
        };
        let board = &project.levels;
        let [left, right] = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .areas(area);

        let items: Vec<ListItem> = board
            .levels()
            .iter()
            .map(|l| {
                ListItem::new(Line::from(vec![
                    Span::raw(l.name.clone()),
                    Span::styled(format!("  {}", stars(l.difficulty)), self.theme.style(UiGroup::Warn)),
                ]))
            })
            .collect();
        let mut list_state = ListState::default().with_selected(board.selected_index());
        f.render_stateful_widget(
            List::new(items)
                .block(panel(format!(" Design Your Levels ({}) ", board.len()), self.mode == Mode::Browse, &self.theme))
                .highlight_style(self.theme.style(UiGroup::Selected))
                .highlight_symbol("› "),
            left,
            &mut list_state,
        );

        let Some(level) = board.selected() else {
            f.render_widget(
                Paragraph::new("Select a level to edit").block(panel(" Level ", false, &self.theme)),
                right,
            );
            return Ok(());
        };
        match self.mode {
            Mode::Edit(field @ (Field::Name | Field::Layout)) => {
                let [input, rest] = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Length(3), Constraint::Fill(1)])
                    .areas(right);
                let text = if field == Field::Name { &self.name } else { &self.layout };
                text.draw(f, input, &self.theme, true, "");
                f.render_widget(
                    Paragraph::new(self.detail_lines(level, state))
                        .wrap(Wrap { trim: false })
                        .block(panel(" Editing · Tab next field · Esc done ", true, &self.theme)),
                    rest,
                );
            }
            Mode::Edit(_) => f.render_widget(
                Paragraph::new(self.detail_lines(level, state))
                    .wrap(Wrap { trim: false })
                    .block(panel(" Editing · ←→ adjust · Tab next field · Esc done ", true, &self.theme)),
                right,
            ),
            Mode::Browse => f.render_widget(
                Paragraph::new(self.detail_lines(level, state))
                    .wrap(Wrap { trim: false })
                    .block(panel(format!(" Level {} ", level.id), false, &self.theme)),
                right,
            ),
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

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    /// Runs a key through the component and, like the app loop, feeds the
    /// resulting action to the reducer and back to the component.
    fn press(c: &mut LevelDesign, state: &mut RootState, code: KeyCode) -> Option<Action> {
        let action = match c.handle_key_events(key(code), state).unwrap()? {
            EventResponse::Stop(a) | EventResponse::Continue(a) => a,
        };
        reduce(state, &action);
        c.update(&action, state).unwrap();
        Some(action)
    }

    fn fresh() -> RootState {
        let mut state = RootState::default();
        reduce(&mut state, &Action::NewProject);
        state
    }

    #[test]
    fn add_opens_editor_on_new_level() {
        let mut state = fresh();
        let mut c = LevelDesign::default();
        press(&mut c, &mut state, KeyCode::Char('a'));
        assert_eq!(c.mode, Mode::Edit(Field::Name));
        assert_eq!(c.name.value(), "Level 2");
    }

    #[test]
    fn rename_and_difficulty_are_committed() {
        let mut state = fresh();
        let mut c = LevelDesign::default();
        press(&mut c, &mut state, KeyCode::Char('a'));
        press(&mut c, &mut state, KeyCode::Char('!'));
        press(&mut c, &mut state, KeyCode::Enter);
        press(&mut c, &mut state, KeyCode::Tab);
        press(&mut c, &mut state, KeyCode::Char('5'));

        let level = state.project().unwrap().levels.selected().unwrap().clone();
        assert_eq!(level.name, "Level 2!");
        assert_eq!(level.difficulty, 5);
    }

    #[test]
    fn delete_falls_back_to_first_level() {
        let mut state = fresh();
        let mut c = LevelDesign::default();
        press(&mut c, &mut state, KeyCode::Char('a'));
        press(&mut c, &mut state, KeyCode::Esc);
        assert_eq!(c.mode, Mode::Browse);
        press(&mut c, &mut state, KeyCode::Char('d'));

        let board = &state.project().unwrap().levels;
        assert_eq!(board.len(), 1);
        assert_eq!(board.selected().unwrap().id, "1");
    }

    #[test]
    fn typed_name_survives_esc_and_step_change() {
        let mut state = fresh();
        let mut c = LevelDesign::default();
        press(&mut c, &mut state, KeyCode::Enter);
        for ch in " Boss".chars() {
            press(&mut c, &mut state, KeyCode::Char(ch));
        }
        press(&mut c, &mut state, KeyCode::Esc);
        assert_eq!(c.mode, Mode::Browse);
        assert_eq!(state.project().unwrap().levels.selected().unwrap().name, "Level 1 - Tutorial Boss");

        press(&mut c, &mut state, KeyCode::Enter);
        for ch in "XYZ".chars() {
            press(&mut c, &mut state, KeyCode::Char(ch));
        }
        let ctrl_p = KeyEvent::new(KeyCode::Char('p'), KeyModifiers::CONTROL);
        assert_eq!(c.handle_key_events(ctrl_p, &state).unwrap(), None);
        assert_eq!(state.project().unwrap().levels.selected().unwrap().name, "Level 1 - Tutorial BossXYZ");
    }

    #[test]
    fn layout_edits_apply_per_keystroke() {
        let mut state = fresh();
        let mut c = LevelDesign::default();
        press(&mut c, &mut state, KeyCode::Enter);
        press(&mut c, &mut state, KeyCode::Tab);
        press(&mut c, &mut state, KeyCode::Tab);
        assert_eq!(c.mode, Mode::Edit(Field::Layout));
        assert_eq!(
            press(&mut c, &mut state, KeyCode::Char('!')),
            Some(Action::Project(ProjectCommand::SetLevelLayout {
                id: "1".into(),
                layout: "Simple introduction level!".into(),
            }))
        );
        press(&mut c, &mut state, KeyCode::Esc);
        assert_eq!(state.project().unwrap().levels.selected().unwrap().layout, "Simple introduction level!");
    }

    #[test]
    fn stars_render_difficulty() {
        assert_eq!(stars(2), "★★☆☆☆");
    }
}
