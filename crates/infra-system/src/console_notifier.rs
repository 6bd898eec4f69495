// Console notifier for headless hosts
use async_trait::async_trait;
use std::io::Write;
use std::sync::Mutex;
use tracing::info;

use minute_core::domain::{ChannelSpec, Notification};
use minute_core::port::{DeliveryError, NotificationSink};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleFormat {
    /// `[minute_channel#1] Minute Notification: It's exactly 9:05`
    Pretty,
    /// One JSON object per line
    Json,
}

pub struct ConsoleNotifier<W: Write + Send> {
    format: ConsoleFormat,
    out: Mutex<W>,
}

impl ConsoleNotifier<std::io::Stdout> {
    pub fn stdout(format: ConsoleFormat) -> Self {
        Self::new(format, std::io::stdout())
    }
}

impl<W: Write + Send> ConsoleNotifier<W> {
    pub fn new(format: ConsoleFormat, out: W) -> Self {
        Self {
            format,
            out: Mutex::new(out),
        }
    }

    fn render(&self, notification: &Notification) -> Result<String, DeliveryError> {
        match self.format {
            ConsoleFormat::Pretty => Ok(format!(
                "[{}#{}] {}: {}",
                notification.channel.as_str(),
                notification.id,
                notification.title,
                notification.body
            )),
            ConsoleFormat::Json => serde_json::to_string(notification)
                .map_err(|e| DeliveryError::Serialization(e.to_string())),
        }
    }

    /// Consume the notifier and hand back its writer
    pub fn into_inner(self) -> W {
        match self.out.into_inner() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

#[async_trait]
impl<W: Write + Send> NotificationSink for ConsoleNotifier<W> {
    async fn create_channel(&self, channel: &ChannelSpec) -> Result<(), DeliveryError> {
        info!(
            channel = %channel.id.as_str(),
            name = %channel.name,
            description = %channel.description,
            "Console channel ready"
        );
        Ok(())
    }

    async fn deliver(&self, notification: &Notification) -> Result<(), DeliveryError> {
        let line = self.render(notification)?;
        let mut out = self
            .out
            .lock()
            .map_err(|_| DeliveryError::Io("console writer poisoned".to_string()))?;
        writeln!(out, "{}", line).map_err(|e| DeliveryError::Io(e.to_string()))?;
        out.flush().map_err(|e| DeliveryError::Io(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minute_core::domain::TimeSample;

    fn notification() -> Notification {
        Notification::minute(&TimeSample::new(17, 45, 0).unwrap())
    }

    #[tokio::test]
    async fn test_pretty_line() {
        let notifier = ConsoleNotifier::new(ConsoleFormat::Pretty, Vec::new());
        notifier.deliver(&notification()).await.unwrap();

        let written = String::from_utf8(notifier.into_inner()).unwrap();
        assert_eq!(
            written,
            "[minute_channel#1] Minute Notification: It's exactly 17:45\n"
        );
    }

    #[tokio::test]
    async fn test_json_line() {
        let notifier = ConsoleNotifier::new(ConsoleFormat::Json, Vec::new());
        notifier.deliver(&notification()).await.unwrap();
        notifier.deliver(&notification()).await.unwrap();

        let written = String::from_utf8(notifier.into_inner()).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines.len(), 2);

        let parsed: Notification = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(parsed, notification());
    }
}
