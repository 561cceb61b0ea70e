use color_eyre::Result;
use ratatui::{layout::Rect, Frame};

use crate::{
    action::Action,
    core::state::RootState,
    tui::{Event, EventResponse},
};

mod dashboard;
mod wizard;

pub use dashboard::DashboardPage;
pub use wizard::WizardPage;

/// A `Page` composes several components into one full view and routes
/// events to whichever of them is active.
pub trait Page {
    #[allow(dead_code)]
    fn name(&self) -> &str;

    fn handle_events(&mut self, event: &Event, state: &RootState) -> Result<Option<EventResponse<Action>>> {
        let _ = (event, state);
        Ok(None)
    }

    /// Called after the reducer has applied `action`.
    fn update(&mut self, action: &Action, state: &RootState) -> Result<Option<Action>> {
        let _ = (action, state);
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, state: &RootState) -> Result<()>;

    /// Called when the page becomes active.
    fn on_enter(&mut self, state: &RootState) -> Result<()> {
        let _ = state;
        Ok(())
    }

    /// Called when the page is leaving / being replaced.
    fn on_exit(&mut self) -> Result<()> {
        Ok(())
    }
}
