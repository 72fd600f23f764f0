//! Single-flight action coordinator.
//!
//! One coordinator belongs to one widget instance and tracks the item whose
//! action is in flight. At most one action runs at a time across the whole
//! item list: `trigger` checks and claims the active slot in one step under a
//! mutex, before any suspension point, and a drop guard releases the slot
//! when the spawned task ends, whether the executor returned, panicked, or
//! the task was aborted.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use hookdash_types::{ActionReport, Item, ItemId, ItemRenderStatus, Notice};
use hookdash_util::redact_endpoint;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::executor::ActionExecutor;
use crate::notify::Notifier;

/// Which item, if any, currently runs its action.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CoordinatorState {
    pub active_item_id: Option<ItemId>,
}

pub struct ActionCoordinator {
    state: Arc<Mutex<CoordinatorState>>,
    executor: Arc<dyn ActionExecutor>,
    notifier: Arc<dyn Notifier>,
}

impl fmt::Debug for ActionCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionCoordinator").field("state", &self.snapshot()).finish_non_exhaustive()
    }
}

impl ActionCoordinator {
    pub fn new(executor: Arc<dyn ActionExecutor>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            state: Arc::new(Mutex::new(CoordinatorState::default())),
            executor,
            notifier,
        }
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> CoordinatorState {
        *lock_state(&self.state)
    }

    pub fn active_item(&self) -> Option<ItemId> {
        self.snapshot().active_item_id
    }

    pub fn is_idle(&self) -> bool {
        self.active_item().is_none()
    }

    /// Render status of `item_id` against the current state.
    pub fn status(&self, item_id: ItemId) -> ItemRenderStatus {
        ItemRenderStatus::derive(item_id, self.active_item())
    }

    /// Starts the action for `item` unless another action is in flight.
    ///
    /// Returns `None` when the call was ignored. Otherwise the item is marked
    /// running before this returns, and the handle resolves after the user
    /// was notified and the coordinator is idle again.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn trigger(&self, item: &Item) -> Option<JoinHandle<ActionReport>> {
        let Some(guard) = ActiveItemGuard::claim(&self.state, item.id) else {
            debug!(item = %item.id, active = ?self.active_item(), "trigger ignored; another action is in flight");
            return None;
        };

        let item_id = item.id;
        let endpoint = item.action_endpoint.clone().unwrap_or_default();
        let executor = Arc::clone(&self.executor);
        let notifier = Arc::clone(&self.notifier);
        info!(item = %item_id, name = %item.display_name, endpoint = %redact_endpoint(&endpoint), "deploy triggered");

        Some(tokio::spawn(async move {
            let _guard = guard;
            let result = executor.execute(&endpoint).await;
            info!(item = %item_id, ?result, "deploy finished");
            notifier.notify(Notice::from(result));
            ActionReport { item_id, result }
        }))
    }
}

/// Holds the active slot for one item and frees it on drop.
struct ActiveItemGuard {
    state: Arc<Mutex<CoordinatorState>>,
    item_id: ItemId,
}

impl ActiveItemGuard {
    fn claim(state: &Arc<Mutex<CoordinatorState>>, item_id: ItemId) -> Option<Self> {
        let mut locked = lock_state(state);
        if locked.active_item_id.is_some() {
            return None;
        }
        locked.active_item_id = Some(item_id);
        Some(Self {
            state: Arc::clone(state),
            item_id,
        })
    }
}

impl Drop for ActiveItemGuard {
    fn drop(&mut self) {
        let mut locked = lock_state(&self.state);
        if locked.active_item_id == Some(self.item_id) {
            locked.active_item_id = None;
        }
    }
}

fn lock_state(state: &Mutex<CoordinatorState>) -> MutexGuard<'_, CoordinatorState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use hookdash_types::{ActionResult, FailureReason};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::oneshot;

    fn item(index: usize, endpoint: Option<&str>) -> Item {
        Item {
            id: ItemId(index),
            display_name: format!("Site {index}"),
            link_url: format!("https://site{index}.example.com"),
            action_endpoint: endpoint.map(str::to_string),
        }
    }

    #[derive(Default)]
    struct Recorder(Mutex<Vec<Notice>>);

    impl Recorder {
        fn notices(&self) -> Vec<Notice> {
            self.0.lock().unwrap().clone()
        }
    }

    impl Notifier for Recorder {
        fn notify(&self, notice: Notice) {
            self.0.lock().unwrap().push(notice);
        }
    }

    /// Holds every execution until the test releases it.
    struct GatedExecutor {
        gate: tokio::sync::Mutex<Option<oneshot::Receiver<ActionResult>>>,
        calls: AtomicUsize,
    }

    impl GatedExecutor {
        fn new() -> (Arc<Self>, oneshot::Sender<ActionResult>) {
            let (sender, receiver) = oneshot::channel();
            let executor = Arc::new(Self {
                gate: tokio::sync::Mutex::new(Some(receiver)),
                calls: AtomicUsize::new(0),
            });
            (executor, sender)
        }
    }

    #[async_trait]
    impl ActionExecutor for GatedExecutor {
        async fn execute(&self, _endpoint: &str) -> ActionResult {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let receiver = self.gate.lock().await.take();
            match receiver {
                Some(receiver) => receiver.await.unwrap_or(ActionResult::Failure(FailureReason::Transport)),
                None => ActionResult::Success,
            }
        }
    }

    struct PanickingExecutor;

    #[async_trait]
    impl ActionExecutor for PanickingExecutor {
        async fn execute(&self, _endpoint: &str) -> ActionResult {
            panic!("executor blew up");
        }
    }

    #[tokio::test]
    async fn trigger_runs_one_item_and_blocks_the_rest() {
        let (executor, release) = GatedExecutor::new();
        let recorder = Arc::new(Recorder::default());
        let coordinator = ActionCoordinator::new(executor.clone(), recorder.clone());
        let items = [item(0, Some("https://hooks.example.com/0")), item(1, Some("https://hooks.example.com/1"))];

        let handle = coordinator.trigger(&items[0]).expect("first trigger starts");
        assert_eq!(coordinator.status(ItemId(0)), ItemRenderStatus::Running);
        assert_eq!(coordinator.status(ItemId(1)), ItemRenderStatus::BlockedByOther);

        assert!(coordinator.trigger(&items[1]).is_none());
        assert!(coordinator.trigger(&items[0]).is_none());
        assert_eq!(coordinator.active_item(), Some(ItemId(0)));

        release.send(ActionResult::Success).unwrap();
        let report = handle.await.unwrap();
        assert_eq!(
            report,
            ActionReport {
                item_id: ItemId(0),
                result: ActionResult::Success
            }
        );
        assert!(coordinator.is_idle());
        assert_eq!(coordinator.status(ItemId(0)), ItemRenderStatus::Idle);
        assert_eq!(coordinator.status(ItemId(1)), ItemRenderStatus::Idle);
        assert_eq!(executor.calls.load(Ordering::SeqCst), 1);
        assert_eq!(recorder.notices(), vec![Notice::TriggeredSuccessfully]);
    }

    #[tokio::test]
    async fn failure_returns_to_idle_with_error_notice() {
        let (executor, release) = GatedExecutor::new();
        let recorder = Arc::new(Recorder::default());
        let coordinator = ActionCoordinator::new(executor, recorder.clone());

        let handle = coordinator.trigger(&item(2, Some("https://hooks.example.com/2"))).unwrap();
        release.send(ActionResult::Failure(FailureReason::NonSuccessStatus)).unwrap();
        let report = handle.await.unwrap();

        assert_eq!(report.result, ActionResult::Failure(FailureReason::NonSuccessStatus));
        assert!(coordinator.is_idle());
        assert_eq!(recorder.notices(), vec![Notice::TriggerFailed]);

        // A new trigger is accepted once idle.
        let again = coordinator.trigger(&item(2, Some("https://hooks.example.com/2"))).unwrap();
        assert_eq!(again.await.unwrap().result, ActionResult::Success);
    }

    #[tokio::test]
    async fn missing_endpoint_notifies_and_skips_transport() {
        struct CountingTransport(AtomicUsize);

        #[async_trait]
        impl hookdash_util::Transport for CountingTransport {
            async fn post_empty(
                &self,
                _endpoint: &str,
            ) -> Result<hookdash_util::TransportResponse, hookdash_util::TransportError> {
                self.0.fetch_add(1, Ordering::SeqCst);
                Ok(hookdash_util::TransportResponse::opaque())
            }
        }

        let executor = Arc::new(crate::RequestExecutor::new(CountingTransport(AtomicUsize::new(0))));
        let recorder = Arc::new(Recorder::default());
        let coordinator = ActionCoordinator::new(executor, recorder.clone());

        let report = coordinator.trigger(&item(0, None)).unwrap().await.unwrap();
        assert_eq!(report.result, ActionResult::Failure(FailureReason::NoEndpoint));
        assert_eq!(recorder.notices(), vec![Notice::NoEndpointConfigured]);
        assert!(coordinator.is_idle());
    }

    #[tokio::test]
    async fn panicking_executor_still_clears_state() {
        let recorder = Arc::new(Recorder::default());
        let coordinator = ActionCoordinator::new(Arc::new(PanickingExecutor), recorder.clone());

        let handle = coordinator.trigger(&item(0, Some("https://hooks.example.com/0"))).unwrap();
        let joined = handle.await;
        assert!(joined.unwrap_err().is_panic());
        assert!(coordinator.is_idle());
        assert!(recorder.notices().is_empty());
    }

    #[tokio::test]
    async fn aborted_task_clears_state() {
        let (executor, _release) = GatedExecutor::new();
        let coordinator = ActionCoordinator::new(executor, Arc::new(Recorder::default()));

        let handle = coordinator.trigger(&item(0, Some("https://hooks.example.com/0"))).unwrap();
        handle.abort();
        assert!(handle.await.unwrap_err().is_cancelled());
        assert!(coordinator.is_idle());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_triggers_admit_exactly_one() {
        let (executor, release) = GatedExecutor::new();
        let coordinator = Arc::new(ActionCoordinator::new(executor, Arc::new(Recorder::default())));

        let attempts = (0..16)
            .map(|index| {
                let coordinator = Arc::clone(&coordinator);
                tokio::spawn(async move { coordinator.trigger(&item(index, Some("https://hooks.example.com/x"))) })
            })
            .collect::<Vec<_>>();

        let mut started = Vec::new();
        for attempt in attempts {
            if let Some(handle) = attempt.await.unwrap() {
                started.push(handle);
            }
        }
        assert_eq!(started.len(), 1);

        release.send(ActionResult::Success).unwrap();
        for handle in started {
            handle.await.unwrap();
        }
        assert!(coordinator.is_idle());
    }

    #[tokio::test]
    async fn instances_do_not_share_state() {
        let (first_executor, _first_release) = GatedExecutor::new();
        let first = ActionCoordinator::new(first_executor, Arc::new(Recorder::default()));
        let second = ActionCoordinator::new(Arc::new(PanickingExecutor), Arc::new(Recorder::default()));

        let _running = first.trigger(&item(0, Some("https://hooks.example.com/0"))).unwrap();
        assert_eq!(first.status(ItemId(0)), ItemRenderStatus::Running);
        assert_eq!(second.status(ItemId(0)), ItemRenderStatus::Idle);
    }
}
