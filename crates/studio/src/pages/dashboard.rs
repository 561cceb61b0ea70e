use color_eyre::Result;
use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Direction, Flex, Layout, Rect},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
    Frame,
};

use super::Page;
use crate::{
    action::Action,
    components::{panel, step_cursor},
    core::state::{RootState, View},
    theme::{Theme, UiGroup},
    tui::{Event, EventResponse},
};

const FEATURES: [(&str, &str); 4] = [
    ("🎨", "AI-generated sprites, backgrounds and sounds"),
    ("⚙️", "Tune movement, physics and features"),
    ("🗺️", "Design and order your levels"),
    ("🚀", "Publish to web and social platforms"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Entry {
    Create,
    Continue,
}

#[derive(Default)]
pub struct DashboardPage {
    theme: Theme,
    cursor: usize,
}

fn entries(state: &RootState) -> Vec<Entry> {
    let mut entries = vec![Entry::Create];
    if state.project().is_some() {
        entries.push(Entry::Continue);
    }
    entries
}

impl Page for DashboardPage {
    fn name(&self) -> &str {
        "dashboard"
    }

    fn handle_events(&mut self, event: &Event, state: &RootState) -> Result<Option<EventResponse<Action>>> {
        let Event::Key(key) = event else {
            return Ok(None);
        };
        let entries = entries(state);
        let r = match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.cursor = step_cursor(self.cursor, -1, entries.len());
                Some(EventResponse::Stop(Action::Render))
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.cursor = step_cursor(self.cursor, 1, entries.len());
                Some(EventResponse::Stop(Action::Render))
            }
            KeyCode::Char('n') => Some(EventResponse::Stop(Action::NewProject)),
            KeyCode::Char('c') if entries.contains(&Entry::Continue) => {
                Some(EventResponse::Stop(Action::Navigate(View::Wizard)))
            }
            KeyCode::Enter => match entries.get(self.cursor) {
                Some(Entry::Create) => Some(EventResponse::Stop(Action::NewProject)),
                Some(Entry::Continue) => Some(EventResponse::Stop(Action::Navigate(View::Wizard))),
                None => None,
            },
            _ => None,
        };
        Ok(r)
    }

    fn on_enter(&mut self, state: &RootState) -> Result<()> {
        // land on "Continue" when there is something to continue
        self.cursor = entries(state).len() - 1;
        Ok(())
    }

    fn draw(&mut self, f: &mut Frame, area: Rect, state: &RootState) -> Result<()> {
        let [column] = Layout::horizontal([Constraint::Max(72)]).flex(Flex::Center).areas(area);
        let [welcome, menu, features] = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Length(6), Constraint::Fill(1)])
            .areas(column);

        f.render_widget(
            Paragraph::new(vec![
                Line::default(),
                Line::from(Span::styled("Welcome to AI Game Studio", self.theme.style(UiGroup::Accent))).centered(),
                Line::from(Span::styled(
                    "Turn an idea into a playable browser game in six steps",
                    self.theme.style(UiGroup::Dimmed),
                ))
                .centered(),
            ]),
            welcome,
        );

        let entries = entries(state);
        self.cursor = self.cursor.min(entries.len() - 1);
        let items: Vec<ListItem> = entries
            .iter()
            .map(|e| match e {
                Entry::Create => ListItem::new(vec![
                    Line::from(Span::styled("✨ Create New Game", self.theme.style(UiGroup::Title))),
                    Line::from(Span::styled(
                        "   Start from a template",
                        self.theme.style(UiGroup::Dimmed),
                    )),
                ]),
                Entry::Continue => {
                    let (name, step) = state
                        .project()
                        .map(|p| (p.name.clone(), p.current_step.label()))
                        .unwrap_or_default();
                    ListItem::new(vec![
                        Line::from(Span::styled("▶ Continue Project", self.theme.style(UiGroup::Title))),
                        Line::from(Span::styled(
                            format!("   {name} · {step}"),
                            self.theme.style(UiGroup::Dimmed),
                        )),
                    ])
                }
            })
            .collect();
        let mut list_state = ListState::default().with_selected(Some(self.cursor));
        f.render_stateful_widget(
            List::new(items)
                .block(panel(" Get Started ", true, &self.theme))
                .highlight_style(self.theme.style(UiGroup::Selected)),
            menu,
            &mut list_state,
        );

        let lines: Vec<Line> = FEATURES
            .iter()
            .map(|(icon, text)| Line::from(format!(" {icon}  {text}")))
            .collect();
        f.render_widget(Paragraph::new(lines).block(panel(" Features ", false, &self.theme)), features);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::reducer::reduce;
    use crossterm::event::{KeyEvent, KeyModifiers};
    use pretty_assertions::assert_eq;

    fn press(p: &mut DashboardPage, state: &RootState, code: KeyCode) -> Option<EventResponse<Action>> {
        p.handle_events(&Event::Key(KeyEvent::new(code, KeyModifiers::NONE)), state)
            .unwrap()
    }

    #[test]
    fn enter_creates_a_game() {
        let state = RootState::default();
        let mut page = DashboardPage::default();
        assert_eq!(press(&mut page, &state, KeyCode::Enter), Some(EventResponse::Stop(Action::NewProject)));
    }

    #[test]
    fn continue_only_with_a_project() {
        let mut state = RootState::default();
        let mut page = DashboardPage::default();
        assert_eq!(press(&mut page, &state, KeyCode::Char('c')), None);

        reduce(&mut state, &Action::NewProject);
        page.on_enter(&state).unwrap();
        assert_eq!(
            press(&mut page, &state, KeyCode::Enter),
            Some(EventResponse::Stop(Action::Navigate(View::Wizard)))
        );
    }
}
