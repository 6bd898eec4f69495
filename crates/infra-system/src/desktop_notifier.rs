// Desktop notifier
// Delivers through the freedesktop `notify-send` binary; one short-lived child per notification
use async_trait::async_trait;
use std::process::Stdio;
use std::sync::Mutex;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, info};

use minute_core::application::constants::{NOTIFICATION_EXPIRE_MS, NOTIFIER_TIMEOUT};
use minute_core::domain::{ChannelSpec, Importance, Notification};
use minute_core::port::{DeliveryError, NotificationSink};

/// Default notifier binary
pub const NOTIFY_SEND: &str = "notify-send";

pub struct DesktopNotifier {
    program: String,
    app_name: String,
    channel: Mutex<Option<ChannelSpec>>,
    timeout: Duration,
}

impl DesktopNotifier {
    /// Create a notifier
    ///
    /// # Arguments
    /// * `program` - notifier binary, usually `notify-send`
    /// * `app_name` - application name shown by the notification server
    ///
    /// # Example
    /// ```ignore
    /// let notifier = DesktopNotifier::new(NOTIFY_SEND, "minute-notifier");
    /// ```
    pub fn new(program: impl Into<String>, app_name: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            app_name: app_name.into(),
            channel: Mutex::new(None),
            timeout: NOTIFIER_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Urgency follows the importance of the registered channel
    fn urgency(&self) -> &'static str {
        let importance = self
            .channel
            .lock()
            .ok()
            .and_then(|c| c.as_ref().map(|c| c.importance));
        match importance {
            Some(Importance::Low) => "low",
            Some(Importance::High) => "critical",
            Some(Importance::Default) | None => "normal",
        }
    }

    /// Command-line arguments for one notification
    fn build_args(&self, notification: &Notification) -> Vec<String> {
        let mut args = vec![
            format!("--app-name={}", self.app_name),
            format!("--urgency={}", self.urgency()),
            format!("--icon={}", notification.icon),
            format!("--category={}", notification.channel.as_str()),
            format!("--expire-time={}", NOTIFICATION_EXPIRE_MS),
            // Same id replaces the notification currently on screen
            format!("--replace-id={}", notification.id),
        ];
        if !notification.auto_cancel {
            args.push("--hint=boolean:resident:true".to_string());
        }
        args.push(notification.title.clone());
        args.push(notification.body.clone());
        args
    }

    /// Spawn the notifier and wait for it to exit
    async fn spawn_and_wait(&self, args: &[String]) -> Result<std::process::Output, DeliveryError> {
        let child = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| DeliveryError::SpawnFailed(format!("{}: {}", self.program, e)))?;

        match timeout(self.timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => Ok(output),
            Ok(Err(e)) => Err(DeliveryError::Io(e.to_string())),
            Err(_) => Err(DeliveryError::Io(format!(
                "{} did not exit within {}ms",
                self.program,
                self.timeout.as_millis()
            ))),
        }
    }
}

#[async_trait]
impl NotificationSink for DesktopNotifier {
    async fn create_channel(&self, channel: &ChannelSpec) -> Result<(), DeliveryError> {
        // Freedesktop has no channel registry; keep it for urgency and category
        debug!(channel = %channel.id.as_str(), name = %channel.name, "Registering channel");
        if let Ok(mut slot) = self.channel.lock() {
            *slot = Some(channel.clone());
        }
        Ok(())
    }

    async fn deliver(&self, notification: &Notification) -> Result<(), DeliveryError> {
        let args = self.build_args(notification);
        debug!(program = %self.program, args = ?args, "Spawning notifier");

        let output = self.spawn_and_wait(&args).await?;
        if !output.status.success() {
            return Err(DeliveryError::NonZeroExit {
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        info!(id = notification.id, title = %notification.title, "Desktop notification shown");
        Ok(())
    }
}
