use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Rect},
    text::Line,
    widgets::{Block, BorderType, Borders},
    Frame,
};

use crate::{
    action::Action,
    core::state::RootState,
    theme::{Theme, UiGroup},
    tui::{Event, EventResponse},
};

pub mod asset_creation;
pub mod export;
pub mod header;
pub mod level_design;
pub mod mechanics;
pub mod status_bar;
pub mod step_indicator;
pub mod template_selection;
pub mod testing;
pub mod text_field;

/// A visual and interactive element. Components read the root state and
/// answer with actions; they never mutate the project themselves.
pub trait Component {
    fn height_constraint(&self) -> Constraint {
        Constraint::Fill(1)
    }

    fn handle_events(&mut self, event: &Event, state: &RootState) -> Result<Option<EventResponse<Action>>> {
        let r = match event {
            Event::Key(key_event) => self.handle_key_events(*key_event, state)?,
            Event::Paste(text) => self.handle_paste(text, state)?,
            _ => None,
        };
        Ok(r)
    }

    fn handle_key_events(&mut self, _key: KeyEvent, _state: &RootState) -> Result<Option<EventResponse<Action>>> {
        Ok(None)
    }

    fn handle_paste(&mut self, _text: &str, _state: &RootState) -> Result<Option<EventResponse<Action>>> {
        Ok(None)
    }

    /// Called after the reducer has applied `action`.
    fn update(&mut self, _action: &Action, _state: &RootState) -> Result<Option<Action>> {
        Ok(None)
    }

    fn draw(&mut self, f: &mut Frame<'_>, area: Rect, state: &RootState) -> Result<()>;
}

/// Bordered panel in the studio look.
pub fn panel<'a>(title: impl Into<Line<'a>>, focused: bool, theme: &Theme) -> Block<'a> {
    let border = if focused { UiGroup::FocusBorder } else { UiGroup::Border };
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme.style(border))
        .title(title.into().style(theme.style(UiGroup::Title)))
}

/// Keys that belong to the app even while a text field has focus.
pub fn is_global_chord(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('c' | 'n' | 'p' | 'z'))
}

/// Consumed without any follow-up beyond a redraw.
pub fn consumed() -> Result<Option<EventResponse<Action>>> {
    Ok(Some(EventResponse::Stop(Action::Render)))
}

pub fn emit(action: Action) -> Result<Option<EventResponse<Action>>> {
    Ok(Some(EventResponse::Stop(action)))
}

/// Moves a list cursor by `delta`, clamped to `0..len`.
pub fn step_cursor(cursor: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    cursor.saturating_add_signed(delta).min(len - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_is_clamped() {
        assert_eq!(step_cursor(0, -1, 4), 0);
        assert_eq!(step_cursor(3, 1, 4), 3);
        assert_eq!(step_cursor(1, 1, 4), 2);
        assert_eq!(step_cursor(5, 0, 0), 0);
    }

    #[test]
    fn control_chords_stay_global() {
        assert!(is_global_chord(&KeyEvent::new(KeyCode::Char('n'), KeyModifiers::CONTROL)));
        assert!(!is_global_chord(&KeyEvent::new(KeyCode::Char('n'), KeyModifiers::NONE)));
        assert!(!is_global_chord(&KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL)));
    }
}
