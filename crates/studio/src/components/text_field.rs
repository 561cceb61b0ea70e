use crossterm::event::{Event as CrosstermEvent, KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tui_input::{backend::crossterm::EventHandler, Input, InputRequest};

use crate::{
    components::{is_global_chord, panel},
    theme::{Theme, UiGroup},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEvent {
    Submitted(String),
    Cancelled,
    Edited,
    Ignored,
}

/// Single-line text entry built on `tui_input`.
#[derive(Debug, Default)]
pub struct TextField {
    label: String,
    input: Input,
}

impl TextField {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            input: Input::default(),
        }
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub fn value(&self) -> &str {
        self.input.value()
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.input = Input::new(value.into());
    }

    pub fn clear(&mut self) {
        self.input.reset();
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> FieldEvent {
        if is_global_chord(&key) {
            return FieldEvent::Ignored;
        }
        match key.code {
            KeyCode::Enter => FieldEvent::Submitted(self.input.value().to_string()),
            KeyCode::Esc => FieldEvent::Cancelled,
            _ => match self.input.handle_event(&CrosstermEvent::Key(key)) {
                Some(_) => FieldEvent::Edited,
                None => FieldEvent::Ignored,
            },
        }
    }

    pub fn paste(&mut self, text: &str) {
        for c in text.chars().filter(|c| !c.is_control()) {
            self.input.handle(InputRequest::InsertChar(c));
        }
    }

    pub fn draw(&self, f: &mut Frame<'_>, area: Rect, theme: &Theme, focused: bool, placeholder: &str) {
        let width = area.width.saturating_sub(2) as usize;
        let scroll = self.input.visual_scroll(width);
        let body = if self.input.value().is_empty() && !focused {
            Line::from(Span::styled(placeholder.to_string(), theme.style(UiGroup::Dimmed)))
        } else {
            Line::from(Span::styled(self.input.value().to_string(), theme.style(UiGroup::Text)))
        };
        let paragraph = Paragraph::new(body)
            .scroll((0, scroll as u16))
            .block(panel(self.label.clone(), focused, theme));
        f.render_widget(paragraph, area);
        if focused {
            let x = self.input.visual_cursor().max(scroll) - scroll + 1;
            f.set_cursor_position((area.x + x as u16, area.y + 1));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use pretty_assertions::assert_eq;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn typing_then_submit() {
        let mut field = TextField::new("Name");
        for c in "q fox".chars() {
            assert_eq!(field.handle_key(key(KeyCode::Char(c))), FieldEvent::Edited);
        }
        assert_eq!(field.handle_key(key(KeyCode::Enter)), FieldEvent::Submitted("q fox".into()));
    }

    #[test]
    fn control_chords_pass_through() {
        let mut field = TextField::new("Name");
        let ctrl_n = KeyEvent::new(KeyCode::Char('n'), KeyModifiers::CONTROL);
        assert_eq!(field.handle_key(ctrl_n), FieldEvent::Ignored);
        assert_eq!(field.value(), "");
    }

    #[test]
    fn paste_drops_newlines() {
        let mut field = TextField::new("Name");
        field.paste("two\nlines");
        assert_eq!(field.value(), "twolines");
    }
}
