//! Workspace lifecycle contract.
//!
//! The host owns the notion of a current workspace (a solution) that opens and
//! closes during the process lifetime. Consumers register handlers to re-resolve
//! anything derived from the workspace location.

use std::path::PathBuf;

use crate::settings::WORKSPACE_SETTINGS_FOLDER;

/// A workspace lifecycle transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkspaceEvent {
    Opened,
    Closed,
}

/// Handle returned by [`WorkspaceContext::subscribe`], used to detach later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

/// Callback invoked synchronously on the thread that raised the transition.
pub type WorkspaceHandler = Box<dyn Fn(WorkspaceEvent) + Send + Sync>;

/// Reports the current workspace and raises open/close notifications.
pub trait WorkspaceContext: Send + Sync {
    fn is_open(&self) -> bool;

    /// Root directory of the open workspace, if the host knows one.
    fn root_path(&self) -> Option<PathBuf>;

    /// Registers a handler for both opened and closed notifications.
    fn subscribe(&self, handler: WorkspaceHandler) -> SubscriptionId;

    /// Detaches a handler. Returns whether it was still registered.
    fn unsubscribe(&self, id: SubscriptionId) -> bool;

    /// `<root>/.pkgcfg` when a workspace with a non-empty root is open.
    fn settings_dir(&self) -> Option<PathBuf> {
        if !self.is_open() {
            return None;
        }
        self.root_path()
            .filter(|root| !root.as_os_str().is_empty())
            .map(|root| root.join(WORKSPACE_SETTINGS_FOLDER))
    }
}
