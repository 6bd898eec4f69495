// Permission probe driven by configuration
// `auto` grants on request only when the notifier binary is reachable
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use minute_core::port::{PermissionProbe, PermissionStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionPolicy {
    /// Undecided until requested; request probes for the notifier binary
    Auto,
    Granted,
    Denied,
}

pub struct ConfiguredPermission {
    policy: PermissionPolicy,
    /// Binary that must exist for `Auto` to grant; None grants unconditionally
    required_program: Option<String>,
}

impl ConfiguredPermission {
    pub fn new(policy: PermissionPolicy, required_program: Option<String>) -> Self {
        Self {
            policy,
            required_program,
        }
    }
}

#[async_trait]
impl PermissionProbe for ConfiguredPermission {
    async fn check(&self) -> PermissionStatus {
        match self.policy {
            PermissionPolicy::Auto => PermissionStatus::NotDetermined,
            PermissionPolicy::Granted => PermissionStatus::Granted,
            PermissionPolicy::Denied => PermissionStatus::Denied,
        }
    }

    async fn request(&self) -> PermissionStatus {
        if self.policy != PermissionPolicy::Auto {
            return self.check().await;
        }

        let Some(program) = &self.required_program else {
            return PermissionStatus::Granted;
        };

        match find_in_path(program) {
            Some(path) => {
                debug!(program = %program, path = %path.display(), "Notifier found");
                PermissionStatus::Granted
            }
            None => {
                warn!(program = %program, "Notifier not found on PATH");
                PermissionStatus::Denied
            }
        }
    }
}

/// Resolve `program` the way a shell would: paths are checked directly,
/// bare names are searched in `PATH`.
pub fn find_in_path(program: &str) -> Option<PathBuf> {
    let candidate = Path::new(program);
    if candidate.components().count() > 1 {
        return is_executable(candidate).then(|| candidate.to_path_buf());
    }

    let path = std::env::var_os("PATH")?;
    std::env::split_paths(&path)
        .map(|dir| dir.join(program))
        .find(|full| is_executable(full))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path)
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
