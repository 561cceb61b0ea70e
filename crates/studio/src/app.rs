use std::collections::HashMap;

use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::{Constraint, Layout, Rect};
use studio_core::ProjectCommand;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::{
    action::Action,
    components::{header::Header, status_bar::StatusBar, Component},
    config::Config,
    core::{
        effects::Effect,
        executor::TaskExecutor,
        reducer::reduce,
        state::{RootState, View},
        ticker::PlayTicker,
    },
    pages::{DashboardPage, Page, WizardPage},
    tui::{Event, EventResponse, Tui},
};

pub struct App {
    config: Config,
    tick_rate: f64,
    frame_rate: f64,
    state: RootState,
    pages: HashMap<View, Box<dyn Page>>,
    header: Header,
    status_bar: StatusBar,
    executor: TaskExecutor,
    ticker: PlayTicker,
    should_suspend: bool,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
}

/// App-wide bindings, consulted only when the active page let the key pass.
pub fn global_action(key: KeyEvent, view: View) -> Option<Action> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let wizard = view == View::Wizard;
    match key.code {
        KeyCode::Char('c') if ctrl => Some(Action::Quit),
        KeyCode::Char('z') if ctrl => Some(Action::Suspend),
        KeyCode::Char('n') if ctrl && wizard => Some(Action::Project(ProjectCommand::Next)),
        KeyCode::Char('p') if ctrl && wizard => Some(Action::Project(ProjectCommand::Previous)),
        KeyCode::Char('q') if !ctrl => Some(Action::Quit),
        KeyCode::Esc if wizard => Some(Action::Navigate(View::Dashboard)),
        _ => None,
    }
}

impl App {
    pub fn new(tick_rate: f64, frame_rate: f64) -> Result<Self> {
        let config = Config::new()?;
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        let mut pages: HashMap<View, Box<dyn Page>> = HashMap::new();
        pages.insert(View::Dashboard, Box::new(DashboardPage::default()));
        pages.insert(View::Wizard, Box::new(WizardPage::default()));

        Ok(Self {
            executor: TaskExecutor::new(action_tx.clone(), config.simulation.clone()),
            config,
            tick_rate,
            frame_rate,
            state: RootState::default(),
            pages,
            header: Header::default(),
            status_bar: StatusBar::default(),
            ticker: PlayTicker::default(),
            should_suspend: false,
            action_tx,
            action_rx,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?
            .tick_rate(self.tick_rate)
            .frame_rate(self.frame_rate);
        tui.enter()?;
        info!(
            data_dir = %self.config.config.data_dir.display(),
            config_dir = %self.config.config.config_dir.display(),
            "studio started"
        );

        if let Some(page) = self.pages.get_mut(&self.state.view) {
            page.on_enter(&self.state)?;
        }
        self.action_tx.send(Action::ClearScreen)?;
        self.action_tx.send(Action::Render)?;

        let action_tx = self.action_tx.clone();
        loop {
            self.handle_events(&mut tui).await?;
            self.handle_actions(&mut tui)?;
            if self.should_suspend {
                tui.suspend()?;
                action_tx.send(Action::Resume)?;
                action_tx.send(Action::ClearScreen)?;
                tui.resume()?;
            } else if self.state.quit_requested {
                self.ticker.stop();
                tui.stop()?;
                break;
            }
        }
        tui.exit()?;
        Ok(())
    }

    async fn handle_events(&mut self, tui: &mut Tui) -> Result<()> {
        let Some(event) = tui.next_event().await else {
            return Ok(());
        };
        let action_tx = self.action_tx.clone();
        match &event {
            Event::Tick => action_tx.send(Action::Tick)?,
            Event::Render => action_tx.send(Action::Render)?,
            Event::Resize(x, y) => action_tx.send(Action::Resize(*x, *y))?,
            Event::Error => action_tx.send(Action::Error("terminal input error".into()))?,
            _ => {}
        }

        let response = match self.pages.get_mut(&self.state.view) {
            Some(page) => page.handle_events(&event, &self.state)?,
            None => None,
        };
        let pass_through = match response {
            Some(EventResponse::Stop(action)) => {
                action_tx.send(action)?;
                false
            }
            Some(EventResponse::Continue(action)) => {
                action_tx.send(action)?;
                true
            }
            None => true,
        };
        if let (true, Event::Key(key)) = (pass_through, &event) {
            if let Some(action) = global_action(*key, self.state.view) {
                action_tx.send(action)?;
            }
        }
        Ok(())
    }

    fn handle_actions(&mut self, tui: &mut Tui) -> Result<()> {
        while let Ok(action) = self.action_rx.try_recv() {
            if !matches!(action, Action::Tick | Action::Render | Action::PlayTick) {
                debug!("{action:?}");
            }

            let view_before = self.state.view;
            let effects = reduce(&mut self.state, &action);
            self.run_effects(effects);

            match &action {
                Action::Suspend => self.should_suspend = true,
                Action::Resume => self.should_suspend = false,
                Action::ClearScreen => tui.terminal.clear()?,
                Action::Resize(w, h) => self.handle_resize(tui, *w, *h)?,
                Action::Render => self.render(tui)?,
                _ => {}
            }

            if self.state.view != view_before {
                if let Some(page) = self.pages.get_mut(&view_before) {
                    page.on_exit()?;
                }
                if let Some(page) = self.pages.get_mut(&self.state.view) {
                    page.on_enter(&self.state)?;
                }
                self.action_tx.send(Action::ClearScreen)?;
                self.action_tx.send(Action::Render)?;
            }

            if let Some(page) = self.pages.get_mut(&self.state.view) {
                if let Some(follow_up) = page.update(&action, &self.state)? {
                    self.action_tx.send(follow_up)?;
                }
            }
        }
        Ok(())
    }

    fn run_effects(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Async(kind) => {
                    let label = kind.to_string();
                    let id = self.executor.spawn(kind);
                    info!(task = id, %label, "task scheduled");
                }
                Effect::StartTicker => {
                    self.ticker
                        .start(self.config.simulation.play_tick(), self.action_tx.clone());
                }
                Effect::StopTicker => self.ticker.stop(),
                Effect::Log(message) => info!("{message}"),
            }
        }
    }

    fn handle_resize(&mut self, tui: &mut Tui, w: u16, h: u16) -> Result<()> {
        tui.resize(Rect::new(0, 0, w, h))?;
        self.render(tui)?;
        Ok(())
    }

    fn render(&mut self, tui: &mut Tui) -> Result<()> {
        let action_tx = self.action_tx.clone();
        tui.draw(|frame| {
            let [header, body, status] = Layout::vertical([
                self.header.height_constraint(),
                Constraint::Fill(1),
                self.status_bar.height_constraint(),
            ])
            .areas(frame.area());

            let state = &self.state;
            let mut drawn = self.header.draw(frame, header, state);
            if drawn.is_ok() {
                if let Some(page) = self.pages.get_mut(&state.view) {
                    drawn = page.draw(frame, body, state);
                }
            }
            if drawn.is_ok() {
                drawn = self.status_bar.draw(frame, status, state);
            }
            if let Err(err) = drawn {
                let _ = action_tx.send(Action::Error(format!("Failed to draw: {:?}", err)));
            }
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn quit_works_everywhere() {
        for view in [View::Dashboard, View::Wizard] {
            assert_eq!(global_action(key(KeyCode::Char('q'), KeyModifiers::NONE), view), Some(Action::Quit));
            assert_eq!(
                global_action(key(KeyCode::Char('c'), KeyModifiers::CONTROL), view),
                Some(Action::Quit)
            );
        }
    }

    #[test]
    fn step_navigation_only_in_wizard() {
        let ctrl_n = key(KeyCode::Char('n'), KeyModifiers::CONTROL);
        assert_eq!(global_action(ctrl_n, View::Dashboard), None);
        assert_eq!(
            global_action(ctrl_n, View::Wizard),
            Some(Action::Project(ProjectCommand::Next))
        );
        assert_eq!(
            global_action(key(KeyCode::Char('p'), KeyModifiers::CONTROL), View::Wizard),
            Some(Action::Project(ProjectCommand::Previous))
        );
    }

    #[test]
    fn escape_returns_to_dashboard() {
        let esc = key(KeyCode::Esc, KeyModifiers::NONE);
        assert_eq!(global_action(esc, View::Wizard), Some(Action::Navigate(View::Dashboard)));
        assert_eq!(global_action(esc, View::Dashboard), None);
    }
}
