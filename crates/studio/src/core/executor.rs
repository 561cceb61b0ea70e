//! Runs [`TaskKind`]s off the UI loop and reports back through the action
//! channel as `TaskStarted` / `TaskFinished`.
//!
//! The back-end is simulated: each task waits for its configured delay and
//! then produces a placeholder asset or an export receipt.

use std::sync::atomic::{AtomicU64, Ordering};

use studio_core::{assets, export::ExportReceipt};
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::action::Action;
use crate::config::SimulationConfig;
use crate::core::effects::{TaskKind, TaskResultKind};

pub type TaskId = u64;

/// Cheap to clone; only wraps the dispatch sender.
#[derive(Clone)]
pub struct TaskExecutor {
    tx: mpsc::UnboundedSender<Dispatch>,
}

struct Dispatch {
    id: TaskId,
    kind: TaskKind,
}

impl TaskExecutor {
    pub fn new(action_tx: mpsc::UnboundedSender<Action>, simulation: SimulationConfig) -> Self {
        let (tx, rx) = mpsc::unbounded_channel::<Dispatch>();
        Worker {
            rx,
            action_tx,
            simulation,
        }
        .spawn();
        Self { tx }
    }

    pub fn spawn(&self, kind: TaskKind) -> TaskId {
        static NEXT_ID: AtomicU64 = AtomicU64::new(1);
        let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
        if let Err(e) = self.tx.send(Dispatch { id, kind }) {
            warn!("TaskExecutor channel closed; failed to schedule task: {}", e);
        }
        id
    }
}

struct Worker {
    rx: mpsc::UnboundedReceiver<Dispatch>,
    action_tx: mpsc::UnboundedSender<Action>,
    simulation: SimulationConfig,
}

impl Worker {
    fn spawn(mut self) {
        tokio::spawn(async move {
            while let Some(dispatch) = self.rx.recv().await {
                let action_tx = self.action_tx.clone();
                let simulation = self.simulation.clone();
                // Tasks overlap; an export does not wait behind a generation.
                tokio::spawn(run(dispatch, action_tx, simulation));
            }
            info!("TaskExecutor worker stopped (channel closed)");
        });
    }
}

async fn run(dispatch: Dispatch, action_tx: mpsc::UnboundedSender<Action>, simulation: SimulationConfig) {
    let Dispatch { id, kind } = dispatch;
    let _ = action_tx.send(Action::TaskStarted(id, kind.to_string()));
    let result = match kind {
        TaskKind::GenerateAsset {
            project_id,
            requirement,
            description,
        } => {
            tokio::time::sleep(simulation.asset_generation_delay()).await;
            let asset = assets::placeholder_for(&requirement, &description, &simulation.placeholder_base_url);
            info!(task = id, asset = %asset.name, url = %asset.url, "asset generated");
            TaskResultKind::AssetGenerated { project_id, asset }
        }
        TaskKind::ExportGame {
            project_id,
            platforms,
            asset_count,
        } => {
            tokio::time::sleep(simulation.export_delay()).await;
            let receipt = ExportReceipt::new(&simulation.share_base_url, &project_id, &platforms, asset_count);
            info!(task = id, link = %receipt.share_link, "game exported");
            TaskResultKind::Exported { project_id, receipt }
        }
    };
    if action_tx.send(Action::TaskFinished(id, result)).is_err() {
        warn!(task = id, "app loop gone before task finished");
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::BTreeSet, time::Duration};

    use super::*;
    use pretty_assertions::assert_eq;
    use studio_core::{catalog, export::Platform};

    fn generate(project_id: &str) -> TaskKind {
        TaskKind::GenerateAsset {
            project_id: project_id.into(),
            requirement: catalog::find("space-shooter").unwrap().required_assets[0].clone(),
            description: "  sleek red fighter ".into(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn generation_waits_for_configured_delay() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let exec = TaskExecutor::new(tx, SimulationConfig::default());
        let id = exec.spawn(generate("p1"));

        assert!(matches!(rx.recv().await, Some(Action::TaskStarted(started, _)) if started == id));

        tokio::time::sleep(Duration::from_millis(1999)).await;
        assert!(rx.try_recv().is_err());

        match rx.recv().await {
            Some(Action::TaskFinished(done, TaskResultKind::AssetGenerated { project_id, asset })) => {
                assert_eq!(done, id);
                assert_eq!(project_id, "p1");
                assert_eq!(asset.name, "Player Ship");
                assert_eq!(asset.description, "  sleek red fighter ");
                assert!(asset.url.ends_with("?text=Player%20Ship"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn export_produces_receipt() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let sim = SimulationConfig {
            share_base_url: "https://example.test/play/".into(),
            ..SimulationConfig::default()
        };
        let exec = TaskExecutor::new(tx, sim);
        exec.spawn(TaskKind::ExportGame {
            project_id: "abc".into(),
            platforms: BTreeSet::from([Platform::Web, Platform::Facebook]),
            asset_count: 5,
        });

        let _started = rx.recv().await;
        match rx.recv().await {
            Some(Action::TaskFinished(_, TaskResultKind::Exported { receipt, .. })) => {
                assert_eq!(receipt.share_link, "https://example.test/play/abc");
                assert_eq!(receipt.platforms, vec![Platform::Web, Platform::Facebook]);
                assert_eq!(receipt.asset_count, 5);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn ids_are_unique() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let exec = TaskExecutor::new(tx, SimulationConfig::default());
        let a = exec.spawn(generate("p"));
        let b = exec.spawn(generate("p"));
        assert!(b > a);
    }
}
