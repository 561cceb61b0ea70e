use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use super::{emit, panel, Component};
use crate::{
    action::Action,
    core::state::RootState,
    theme::{Theme, UiGroup},
    tui::EventResponse,
};

const TIPS: [&str; 4] = [
    "Check that jumps feel responsive",
    "Make sure the difficulty ramps up gradually",
    "Look for spots where the player can get stuck",
    "Try the game on a small screen",
];

#[derive(Default)]
pub struct Testing {
    theme: Theme,
}

impl Testing {
    fn stat<'a>(&self, title: &'a str, value: String) -> Paragraph<'a> {
        Paragraph::new(vec![
            Line::from(Span::styled(value, self.theme.style(UiGroup::Accent))),
            Line::from(Span::styled(title, self.theme.style(UiGroup::Dimmed))),
        ])
        .alignment(Alignment::Center)
        .block(panel("", false, &self.theme))
    }
}

impl Component for Testing {
    fn handle_key_events(&mut self, key: KeyEvent, _state: &RootState) -> Result<Option<EventResponse<Action>>> {
        match key.code {
            KeyCode::Char(' ') | KeyCode::Char('p') => emit(Action::TogglePlay),
            KeyCode::Char('r') => emit(Action::ResetPlay),
            _ => Ok(None),
        }
    }

    fn draw(&mut self, f: &mut Frame<'_>, area: Rect, state: &RootState) -> Result<()> {
        let Some(project) = state.project() else {
            return Ok(());
        };
        let play = &state.play;
        let [stats, body] = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Fill(1)])
            .areas(area);
        let [score, time, level] = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 3); 3])
            .areas(stats);
        f.render_widget(self.stat("Score", play.score.to_string()), score);
        f.render_widget(self.stat("Time", play.clock()), time);
        f.render_widget(self.stat("Level", play.level.to_string()), level);

        let [game, side] = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .areas(body);

        let (preview, name) = project
            .template
            .as_ref()
            .map_or(("🎮", "Your game"), |t| (t.preview.as_str(), t.name.as_str()));
        let status = if play.playing {
            Span::styled("▶ Playing…", self.theme.style(UiGroup::Success))
        } else {
            Span::styled("⏸ Paused, press Space to play", self.theme.style(UiGroup::Dimmed))
        };
        let screen = vec![
            Line::default(),
            Line::from(Span::styled(preview.to_string(), self.theme.style(UiGroup::Title))),
            Line::from(Span::styled(format!("{name} Preview"), self.theme.style(UiGroup::Accent))),
            Line::default(),
            Line::from(status),
            Line::default(),
            Line::from(Span::styled(
                format!(
                    "speed {} · jump {} · gravity {} · {}",
                    project.mechanics.player_speed,
                    project.mechanics.jump_height,
                    project.mechanics.gravity,
                    project.mechanics.feature_summary()
                ),
                self.theme.style(UiGroup::Dimmed),
            )),
        ];
        f.render_widget(
            Paragraph::new(screen)
                .alignment(Alignment::Center)
                .block(panel(" Test Your Game ", play.playing, &self.theme)),
            game,
        );

        let mut lines = vec![
            Line::from(Span::styled("Controls", self.theme.style(UiGroup::Title))),
            Line::from(format!("  Space  {}", if play.playing { "Pause" } else { "Play" })),
            Line::from("  r      Reset"),
            Line::default(),
            Line::from(Span::styled("Testing Tips", self.theme.style(UiGroup::Title))),
        ];
        lines.extend(TIPS.iter().map(|t| Line::from(format!("  • {t}"))));
        f.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: false })
                .block(panel(" Test Controls ", false, &self.theme)),
            side,
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use pretty_assertions::assert_eq;

    #[test]
    fn keys_map_to_play_actions() {
        let mut c = Testing::default();
        let state = RootState::default();
        let press = |c: &mut Testing, ch| {
            c.handle_key_events(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::NONE), &state)
                .unwrap()
        };
        assert_eq!(press(&mut c, ' '), Some(EventResponse::Stop(Action::TogglePlay)));
        assert_eq!(press(&mut c, 'r'), Some(EventResponse::Stop(Action::ResetPlay)));
        assert_eq!(press(&mut c, 'x'), None);
    }
}
