use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{LineGauge, Paragraph},
    Frame,
};
use strum::IntoEnumIterator;
use studio_core::{
    mechanics::{Feature, Mechanics, Slider},
    ProjectCommand,
};

use super::{consumed, emit, panel, step_cursor, Component};
use crate::{
    action::Action,
    core::state::RootState,
    theme::{Theme, UiGroup},
    tui::EventResponse,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Row {
    Slider(Slider),
    Feature(Feature),
}

fn rows() -> Vec<Row> {
    Slider::iter()
        .map(Row::Slider)
        .chain(Feature::iter().map(Row::Feature))
        .collect()
}

#[derive(Default)]
pub struct MechanicsEditor {
    theme: Theme,
    cursor: usize,
}

impl MechanicsEditor {
    fn slider_line(&self, m: &Mechanics, slider: Slider, focused: bool) -> (Line<'static>, f64) {
        let range = slider.range();
        let value = m.get(slider);
        let ratio = f64::from(value - range.start()) / f64::from(range.end() - range.start());
        let style = if focused { UiGroup::Selected } else { UiGroup::Text };
        let label = Line::from(vec![
            Span::styled(format!("{slider:<14}"), self.theme.style(style)),
            Span::styled(format!("{value:>5} {}", slider.unit()), self.theme.style(UiGroup::Accent)),
            Span::styled(
                format!("   ({}–{}, step {})", range.start(), range.end(), slider.step()),
                self.theme.style(UiGroup::Dimmed),
            ),
        ]);
        (label, ratio)
    }
}

impl Component for MechanicsEditor {
    fn handle_key_events(&mut self, key: KeyEvent, _state: &RootState) -> Result<Option<EventResponse<Action>>> {
        let rows = rows();
        let row = rows[self.cursor.min(rows.len() - 1)];
        match (key.code, row) {
            (KeyCode::Up | KeyCode::Char('k'), _) => {
                self.cursor = step_cursor(self.cursor, -1, rows.len());
                consumed()
            }
            (KeyCode::Down | KeyCode::Char('j'), _) => {
                self.cursor = step_cursor(self.cursor, 1, rows.len());
                consumed()
            }
            (KeyCode::Left | KeyCode::Char('h'), Row::Slider(s)) => {
                emit(Action::Project(ProjectCommand::NudgeSlider(s, -1)))
            }
            (KeyCode::Right | KeyCode::Char('l'), Row::Slider(s)) => {
                emit(Action::Project(ProjectCommand::NudgeSlider(s, 1)))
            }
            (KeyCode::Enter | KeyCode::Char(' '), Row::Feature(feat)) => {
                emit(Action::Project(ProjectCommand::ToggleFeature(feat)))
            }
            _ => Ok(None),
        }
    }

    fn draw(&mut self, f: &mut Frame<'_>, area: Rect, state: &RootState) -> Result<()> {
        let Some(project) = state.project() else {
            return Ok(());
        };
        let m = &project.mechanics;
        let [editor, summary] = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
            .areas(area);

        let block = panel(" Configure Game Mechanics ", true, &self.theme);
        let inner = block.inner(editor);
        f.render_widget(block, editor);

        let mut constraints = vec![Constraint::Length(1)];
        constraints.extend(Slider::iter().map(|_| Constraint::Length(2)));
        constraints.push(Constraint::Length(1));
        constraints.extend(Feature::iter().map(|_| Constraint::Length(2)));
        let cells = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(inner);

        f.render_widget(
            Paragraph::new(Span::styled("Movement & Physics", self.theme.style(UiGroup::Title))),
            cells[0],
        );
        for (i, slider) in Slider::iter().enumerate() {
            let (label, ratio) = self.slider_line(m, slider, self.cursor == i);
            let gauge = LineGauge::default()
                .filled_style(self.theme.style(UiGroup::Accent))
                .unfilled_style(self.theme.style(UiGroup::Border))
                .label(label)
                .ratio(ratio.clamp(0.0, 1.0));
            f.render_widget(gauge, cells[1 + i]);
        }

        let offset = 1 + Slider::iter().count();
        f.render_widget(
            Paragraph::new(Span::styled("Game Features", self.theme.style(UiGroup::Title))),
            cells[offset],
        );
        for (i, feature) in Feature::iter().enumerate() {
            let focused = self.cursor == offset - 1 + i;
            let check = if m.enabled(feature) { "[x]" } else { "[ ]" };
            let style = if focused { UiGroup::Selected } else { UiGroup::Text };
            let lines = vec![
                Line::from(Span::styled(format!("{check} {feature}"), self.theme.style(style))),
                Line::from(Span::styled(format!("    {}", feature.hint()), self.theme.style(UiGroup::Dimmed))),
            ];
            f.render_widget(Paragraph::new(lines), cells[offset + 1 + i]);
        }

        let lines = vec![
            Line::from(Span::styled("Movement", self.theme.style(UiGroup::Title))),
            Line::from(format!(
                "  Speed {} {} · Jump {} {}",
                m.player_speed,
                Slider::PlayerSpeed.unit(),
                m.jump_height,
                Slider::JumpHeight.unit()
            )),
            Line::default(),
            Line::from(Span::styled("Physics", self.theme.style(UiGroup::Title))),
            Line::from(format!("  Gravity {} {}", m.gravity, Slider::Gravity.unit())),
            Line::default(),
            Line::from(Span::styled("Features", self.theme.style(UiGroup::Title))),
            Line::from(format!("  {}", m.feature_summary())),
        ];
        f.render_widget(
            Paragraph::new(lines).block(panel(" Mechanics Summary ", false, &self.theme)),
            summary,
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use pretty_assertions::assert_eq;

    fn press(c: &mut MechanicsEditor, code: KeyCode) -> Option<EventResponse<Action>> {
        c.handle_key_events(KeyEvent::new(code, KeyModifiers::NONE), &RootState::default())
            .unwrap()
    }

    #[test]
    fn arrows_nudge_the_focused_slider() {
        let mut c = MechanicsEditor::default();
        press(&mut c, KeyCode::Down);
        assert_eq!(
            press(&mut c, KeyCode::Left),
            Some(EventResponse::Stop(Action::Project(ProjectCommand::NudgeSlider(
                Slider::JumpHeight,
                -1
            ))))
        );
    }

    #[test]
    fn space_toggles_features_only() {
        let mut c = MechanicsEditor::default();
        assert_eq!(press(&mut c, KeyCode::Char(' ')), None);
        for _ in 0..5 {
            press(&mut c, KeyCode::Down);
        }
        assert_eq!(
            press(&mut c, KeyCode::Char(' ')),
            Some(EventResponse::Stop(Action::Project(ProjectCommand::ToggleFeature(
                Feature::PowerUps
            ))))
        );
    }
}
