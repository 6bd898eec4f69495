// Permission Port
// "Post notifications" capability granted by the host

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PermissionStatus {
    Granted,
    Denied,
    /// Host has not decided yet; a request may still grant it
    NotDetermined,
}

impl PermissionStatus {
    pub fn is_granted(&self) -> bool {
        matches!(self, PermissionStatus::Granted)
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PermissionProbe: Send + Sync {
    /// Current status without prompting
    async fn check(&self) -> PermissionStatus;

    /// Ask the host for the capability. Called at most once per startup.
    async fn request(&self) -> PermissionStatus;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Probe with scripted answers
    #[derive(Clone)]
    pub struct FixedPermission {
        checked: PermissionStatus,
        requested: PermissionStatus,
        request_count: Arc<AtomicUsize>,
    }

    impl FixedPermission {
        pub fn granted() -> Self {
            Self::new(PermissionStatus::Granted, PermissionStatus::Granted)
        }

        pub fn denied() -> Self {
            Self::new(PermissionStatus::Denied, PermissionStatus::Denied)
        }

        /// `check` answers NotDetermined, `request` answers `outcome`
        pub fn prompt(outcome: PermissionStatus) -> Self {
            Self::new(PermissionStatus::NotDetermined, outcome)
        }

        pub fn new(checked: PermissionStatus, requested: PermissionStatus) -> Self {
            Self {
                checked,
                requested,
                request_count: Arc::new(AtomicUsize::new(0)),
            }
        }

        pub fn request_count(&self) -> usize {
            self.request_count.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl PermissionProbe for FixedPermission {
        async fn check(&self) -> PermissionStatus {
            self.checked
        }

        async fn request(&self) -> PermissionStatus {
            self.request_count.fetch_add(1, Ordering::SeqCst);
            self.requested
        }
    }
}
