//! In-process workspace context.

use pkgcfg_core::workspace::{SubscriptionId, WorkspaceContext, WorkspaceEvent, WorkspaceHandler};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};

type SharedHandler = Arc<dyn Fn(WorkspaceEvent) + Send + Sync>;

#[derive(Debug, Clone, Default)]
enum WorkspaceState {
    #[default]
    Closed,
    Open(Option<PathBuf>),
}

/// A [`WorkspaceContext`] driven directly by the embedding host.
///
/// `open` and `close` update the state first and then invoke every handler
/// synchronously on the calling thread, so handlers observe the new state.
/// Handlers are invoked outside the internal locks and may call back into the
/// context.
#[derive(Default)]
pub struct HostWorkspace {
    state: RwLock<WorkspaceState>,
    handlers: Mutex<Vec<(SubscriptionId, SharedHandler)>>,
    next_id: AtomicU64,
}

impl HostWorkspace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a workspace rooted at `root` and notifies subscribers.
    pub fn open(&self, root: impl Into<PathBuf>) {
        self.transition(WorkspaceState::Open(Some(root.into())), WorkspaceEvent::Opened);
    }

    /// Opens a workspace whose root the host cannot report.
    pub fn open_without_root(&self) {
        self.transition(WorkspaceState::Open(None), WorkspaceEvent::Opened);
    }

    /// Closes the current workspace and notifies subscribers.
    pub fn close(&self) {
        self.transition(WorkspaceState::Closed, WorkspaceEvent::Closed);
    }

    pub fn subscriber_count(&self) -> usize {
        self.handlers
            .lock()
            .map(|handlers| handlers.len())
            .unwrap_or_else(|e| e.into_inner().len())
    }

    fn transition(&self, next: WorkspaceState, event: WorkspaceEvent) {
        {
            let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
            *state = next;
        }

        let handlers: Vec<SharedHandler> = {
            let handlers = self.handlers.lock().unwrap_or_else(|e| e.into_inner());
            handlers.iter().map(|(_, handler)| handler.clone()).collect()
        };

        tracing::debug!("Workspace {:?}, notifying {} handler(s)", event, handlers.len());
        for handler in handlers {
            handler(event);
        }
    }

    fn read_state(&self) -> WorkspaceState {
        self.state.read().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl WorkspaceContext for HostWorkspace {
    fn is_open(&self) -> bool {
        matches!(self.read_state(), WorkspaceState::Open(_))
    }

    fn root_path(&self) -> Option<PathBuf> {
        match self.read_state() {
            WorkspaceState::Open(root) => root,
            WorkspaceState::Closed => None,
        }
    }

    fn subscribe(&self, handler: WorkspaceHandler) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let mut handlers = self.handlers.lock().unwrap_or_else(|e| e.into_inner());
        handlers.push((id, Arc::from(handler)));
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut handlers = self.handlers.lock().unwrap_or_else(|e| e.into_inner());
        let before = handlers.len();
        handlers.retain(|(existing, _)| *existing != id);
        handlers.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pkgcfg_core::settings::WORKSPACE_SETTINGS_FOLDER;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_open_and_close_update_state() {
        let workspace = HostWorkspace::new();
        assert!(!workspace.is_open());
        assert_eq!(workspace.settings_dir(), None);

        workspace.open("/repo");
        assert!(workspace.is_open());
        assert_eq!(workspace.root_path(), Some(PathBuf::from("/repo")));
        assert_eq!(
            workspace.settings_dir(),
            Some(PathBuf::from("/repo").join(WORKSPACE_SETTINGS_FOLDER))
        );

        workspace.open_without_root();
        assert!(workspace.is_open());
        assert_eq!(workspace.settings_dir(), None);

        workspace.close();
        assert!(!workspace.is_open());
        assert_eq!(workspace.root_path(), None);
    }

    #[test]
    fn test_handlers_fire_until_unsubscribed() {
        let workspace = Arc::new(HostWorkspace::new());
        let calls = Arc::new(AtomicUsize::new(0));

        let counter = calls.clone();
        let id = workspace.subscribe(Box::new(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        workspace.open("/repo");
        workspace.close();
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        assert!(workspace.unsubscribe(id));
        assert!(!workspace.unsubscribe(id));
        workspace.open("/repo");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(workspace.subscriber_count(), 0);
    }

    #[test]
    fn test_handlers_see_new_state_and_may_reenter() {
        let workspace = Arc::new(HostWorkspace::new());
        let seen = Arc::new(Mutex::new(Vec::new()));

        let weak = Arc::downgrade(&workspace);
        let log = seen.clone();
        workspace.subscribe(Box::new(move |event| {
            if let Some(workspace) = weak.upgrade() {
                log.lock().unwrap().push((event, workspace.root_path()));
            }
        }));

        workspace.open("/a");
        workspace.close();

        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                (WorkspaceEvent::Opened, Some(PathBuf::from("/a"))),
                (WorkspaceEvent::Closed, None),
            ]
        );
    }
}
