//! Background task orchestration for backend calls
//!
//! Each backend call runs as its own tokio task. Results come back over an
//! unbounded channel that the UI loop drains every tick. Tasks belong to the
//! screen that started them and are aborted when that screen is left; any
//! result a cancelled task still manages to send is dropped on drain.

use crate::state::forms::Catalog;
use crate::state::{
    Balance, SavedRequest, SendMoneyResponse, Transaction, TransactionConfirmation, User, View,
};
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use tokio::{sync::mpsc, task::JoinHandle};
use tracing::{debug, info};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(Uuid);

impl TaskId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// What a task does; at most one task of each kind runs at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    Login,
    Balance,
    Catalog,
    Submit,
    Confirm,
    RecordTransfer,
    Transactions,
    SavedRequests,
    RequestDetails,
}

/// Who a task belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskOwner {
    /// Aborted when this screen is left
    Screen(View),
    /// Survives navigation
    App,
}

/// Result delivered back to the UI loop; errors are already rendered to text
#[derive(Debug)]
pub enum TaskOutcome {
    Login(Result<User, String>),
    Balance(Result<Balance, String>),
    Catalog(Result<Catalog, String>),
    Submit(Result<SendMoneyResponse, String>),
    Confirm(Result<TransactionConfirmation, String>),
    RecordTransfer(Result<(), String>),
    Transactions(Result<Vec<Transaction>, String>),
    SavedRequests(Result<Vec<SavedRequest>, String>),
    RequestDetails(Result<SavedRequest, String>),
}

#[derive(Debug)]
struct TaskMessage {
    id: TaskId,
    outcome: TaskOutcome,
}

struct ActiveTask {
    handle: JoinHandle<()>,
    kind: TaskKind,
    owner: TaskOwner,
}

pub struct TaskManager {
    tx: mpsc::UnboundedSender<TaskMessage>,
    rx: mpsc::UnboundedReceiver<TaskMessage>,
    active: HashMap<TaskId, ActiveTask>,
}

impl TaskManager {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            tx,
            rx,
            active: HashMap::new(),
        }
    }

    /// Spawn `work`, replacing any running task of the same kind
    pub fn spawn<F>(&mut self, kind: TaskKind, owner: TaskOwner, work: F) -> TaskId
    where
        F: Future<Output = TaskOutcome> + Send + 'static,
    {
        if let Some(previous) = self.running(kind) {
            debug!("Replacing running {kind:?} task {previous}");
            self.cancel(previous);
        }

        let id = TaskId::new();
        let tx = self.tx.clone();
        let handle = tokio::spawn(async move {
            let outcome = work.await;
            let _ = tx.send(TaskMessage { id, outcome });
        });
        debug!("Spawned {kind:?} task {id} for {owner:?}");
        self.active.insert(
            id,
            ActiveTask {
                handle,
                kind,
                owner,
            },
        );
        id
    }

    /// Id of the running task of `kind`, if any
    pub fn running(&self, kind: TaskKind) -> Option<TaskId> {
        self.active
            .iter()
            .find(|(_, task)| task.kind == kind)
            .map(|(id, _)| *id)
    }

    pub fn is_running(&self, kind: TaskKind) -> bool {
        self.running(kind).is_some()
    }

    pub fn cancel(&mut self, id: TaskId) {
        if let Some(task) = self.active.remove(&id) {
            task.handle.abort();
            debug!("Cancelled {:?} task {id}", task.kind);
        }
    }

    /// Abort every task started by `view`
    pub fn cancel_owned_by(&mut self, view: View) {
        let ids: Vec<_> = self
            .active
            .iter()
            .filter(|(_, task)| task.owner == TaskOwner::Screen(view))
            .map(|(id, _)| *id)
            .collect();
        if !ids.is_empty() {
            info!("Leaving {view:?}: cancelling {} task(s)", ids.len());
        }
        for id in ids {
            self.cancel(id);
        }
    }

    pub fn cancel_all(&mut self) {
        let ids: Vec<_> = self.active.keys().copied().collect();
        for id in ids {
            self.cancel(id);
        }
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Collect finished results, dropping those of cancelled tasks
    pub fn drain(&mut self) -> Vec<TaskOutcome> {
        let mut outcomes = Vec::new();
        while let Ok(message) = self.rx.try_recv() {
            if self.active.remove(&message.id).is_some() {
                outcomes.push(message.outcome);
            } else {
                debug!("Dropping result of cancelled task {}", message.id);
            }
        }
        outcomes
    }
}

impl Default for TaskManager {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TaskManager {
    fn drop(&mut self) {
        for task in self.active.values() {
            task.handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    async fn settle() {
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    fn balance_outcome() -> TaskOutcome {
        TaskOutcome::Balance(Ok(Balance {
            balance: 1250.0,
            currency: "USD".into(),
        }))
    }

    #[tokio::test]
    async fn test_result_is_delivered() {
        let mut tasks = TaskManager::new();
        tasks.spawn(TaskKind::Balance, TaskOwner::Screen(View::Home), async {
            balance_outcome()
        });
        settle().await;

        let outcomes = tasks.drain();
        assert_eq!(outcomes.len(), 1);
        assert!(matches!(outcomes[0], TaskOutcome::Balance(Ok(_))));
        assert_eq!(tasks.active_count(), 0);
    }

    #[tokio::test]
    async fn test_cancelled_result_never_delivered() {
        let mut tasks = TaskManager::new();
        let id = tasks.spawn(TaskKind::Balance, TaskOwner::Screen(View::Home), async {
            balance_outcome()
        });
        // Let it finish and send before cancelling
        settle().await;
        tasks.cancel(id);

        assert!(tasks.drain().is_empty());
    }

    #[tokio::test]
    async fn test_leaving_screen_cancels_its_tasks() {
        let mut tasks = TaskManager::new();
        tasks.spawn(TaskKind::Balance, TaskOwner::Screen(View::Home), async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            balance_outcome()
        });
        tasks.spawn(TaskKind::Transactions, TaskOwner::Screen(View::History), async {
            TaskOutcome::Transactions(Ok(vec![]))
        });

        tasks.cancel_owned_by(View::Home);
        assert!(!tasks.is_running(TaskKind::Balance));
        assert!(tasks.is_running(TaskKind::Transactions));

        settle().await;
        let outcomes = tasks.drain();
        assert_eq!(outcomes.len(), 1);
        assert!(matches!(outcomes[0], TaskOutcome::Transactions(_)));
    }

    #[tokio::test]
    async fn test_app_owned_task_survives_navigation() {
        let mut tasks = TaskManager::new();
        tasks.spawn(TaskKind::RecordTransfer, TaskOwner::App, async {
            TaskOutcome::RecordTransfer(Ok(()))
        });
        tasks.cancel_owned_by(View::Confirmation);
        settle().await;
        assert_eq!(tasks.drain().len(), 1);
    }

    #[tokio::test]
    async fn test_same_kind_replaces_previous() {
        let mut tasks = TaskManager::new();
        let first = tasks.spawn(TaskKind::Balance, TaskOwner::Screen(View::Home), async {
            balance_outcome()
        });
        let second = tasks.spawn(TaskKind::Balance, TaskOwner::Screen(View::Home), async {
            balance_outcome()
        });
        assert_ne!(first, second);
        assert_eq!(tasks.running(TaskKind::Balance), Some(second));

        settle().await;
        assert_eq!(tasks.drain().len(), 1);
    }

    #[tokio::test]
    async fn test_cancel_all() {
        let mut tasks = TaskManager::new();
        tasks.spawn(TaskKind::Balance, TaskOwner::App, async { balance_outcome() });
        tasks.spawn(TaskKind::Login, TaskOwner::App, async {
            TaskOutcome::Login(Err("Invalid credentials.".into()))
        });
        tasks.cancel_all();
        assert_eq!(tasks.active_count(), 0);
        settle().await;
        assert!(tasks.drain().is_empty());
    }
}
