use color_eyre::Result;
use ratatui::{
    layout::{Alignment, Constraint, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::Component;
use crate::{
    core::state::RootState,
    theme::{Theme, UiGroup},
};

pub const TITLE: &str = "AI Game Studio";
pub const TAGLINE: &str = "Create games with AI assistance";

#[derive(Default)]
pub struct Header {
    theme: Theme,
}

impl Component for Header {
    fn height_constraint(&self) -> Constraint {
        Constraint::Length(2)
    }

    fn draw(&mut self, f: &mut Frame<'_>, area: Rect, state: &RootState) -> Result<()> {
        let mut spans = vec![
            Span::styled(format!("🎮 {TITLE}"), self.theme.style(UiGroup::Accent)),
            Span::styled(format!(" — {TAGLINE}"), self.theme.style(UiGroup::Dimmed)),
        ];
        if let Some(project) = state.project() {
            spans.push(Span::styled("   │ ", self.theme.style(UiGroup::Border)));
            spans.push(Span::styled(project.name.clone(), self.theme.style(UiGroup::Title)));
            if let Some(template) = project.template_name() {
                spans.push(Span::styled(format!(" ({template})"), self.theme.style(UiGroup::Dimmed)));
            }
        }
        let header = Paragraph::new(Line::from(spans))
            .alignment(Alignment::Left)
            .block(
                Block::default()
                    .borders(Borders::BOTTOM)
                    .border_style(self.theme.style(UiGroup::Border)),
            );
        f.render_widget(header, area);
        Ok(())
    }
}
