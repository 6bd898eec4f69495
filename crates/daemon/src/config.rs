//! Daemon configuration (flags with environment fallbacks)
//!
//! The notification interval is fixed at one minute and deliberately not exposed.

use clap::{Parser, ValueEnum};
use minute_core::domain::Importance;
use minute_infra_system::desktop_notifier::NOTIFY_SEND;
use minute_infra_system::{ConsoleFormat, PermissionPolicy};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SinkKind {
    /// Freedesktop notifications via notify-send
    Desktop,
    /// Lines on stdout
    Console,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConsoleFormatArg {
    Pretty,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PermissionArg {
    Auto,
    Granted,
    Denied,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ImportanceArg {
    Low,
    Default,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "minute-notifier")]
#[command(about = "Posts a notification at every wall-clock minute boundary", long_about = None)]
#[command(version)]
pub struct DaemonConfig {
    /// Where notifications go
    #[arg(long, env = "MINUTE_NOTIFIER_SINK", value_enum, default_value_t = SinkKind::Desktop)]
    pub sink: SinkKind,

    /// Output format of the console sink
    #[arg(long, env = "MINUTE_NOTIFIER_CONSOLE_FORMAT", value_enum, default_value_t = ConsoleFormatArg::Pretty)]
    pub console_format: ConsoleFormatArg,

    /// Permission to post notifications (auto: granted when the notifier is installed)
    #[arg(long, env = "MINUTE_NOTIFIER_PERMISSION", value_enum, default_value_t = PermissionArg::Auto)]
    pub permission: PermissionArg,

    /// Importance of the notification channel (desktop urgency follows it)
    #[arg(long, env = "MINUTE_NOTIFIER_IMPORTANCE", value_enum, default_value_t = ImportanceArg::Default)]
    pub importance: ImportanceArg,

    /// Notifier binary used by the desktop sink
    #[arg(long, env = "MINUTE_NOTIFIER_BIN", default_value = NOTIFY_SEND)]
    pub notifier_bin: String,

    /// Application name shown by the notification server
    #[arg(long, env = "MINUTE_NOTIFIER_APP_NAME", default_value = "minute-notifier")]
    pub app_name: String,

    /// Stdout log format
    #[arg(long, env = "MINUTE_NOTIFIER_LOG_FORMAT", value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,

    /// Also write JSON logs to a daily rolling file in this directory (`~` expanded)
    #[arg(long, env = "MINUTE_NOTIFIER_LOG_DIR")]
    pub log_dir: Option<String>,
}

impl DaemonConfig {
    pub fn log_dir(&self) -> Option<PathBuf> {
        self.log_dir
            .as_deref()
            .map(|dir| PathBuf::from(shellexpand::tilde(dir).into_owned()))
    }

    pub fn permission_policy(&self) -> PermissionPolicy {
        match self.permission {
            PermissionArg::Auto => PermissionPolicy::Auto,
            PermissionArg::Granted => PermissionPolicy::Granted,
            PermissionArg::Denied => PermissionPolicy::Denied,
        }
    }

    pub fn importance(&self) -> Importance {
        match self.importance {
            ImportanceArg::Low => Importance::Low,
            ImportanceArg::Default => Importance::Default,
            ImportanceArg::High => Importance::High,
        }
    }

    /// Program whose presence `auto` permission requires
    pub fn required_program(&self) -> Option<String> {
        match self.sink {
            SinkKind::Desktop => Some(self.notifier_bin.clone()),
            SinkKind::Console => None,
        }
    }

    pub fn console_format(&self) -> ConsoleFormat {
        match self.console_format {
            ConsoleFormatArg::Pretty => ConsoleFormat::Pretty,
            ConsoleFormatArg::Json => ConsoleFormat::Json,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DaemonConfig::try_parse_from(["minute-notifier"]).unwrap();
        assert_eq!(config.sink, SinkKind::Desktop);
        assert_eq!(config.permission_policy(), PermissionPolicy::Auto);
        assert_eq!(config.required_program(), Some("notify-send".to_string()));
        assert_eq!(config.log_dir(), None);
        assert_eq!(config.importance(), Importance::Default);
    }

    #[test]
    fn test_importance_flag() {
        let config =
            DaemonConfig::try_parse_from(["minute-notifier", "--importance", "high"]).unwrap();
        assert_eq!(config.importance(), Importance::High);

        let config =
            DaemonConfig::try_parse_from(["minute-notifier", "--importance", "low"]).unwrap();
        assert_eq!(config.importance(), Importance::Low);

        assert!(
            DaemonConfig::try_parse_from(["minute-notifier", "--importance", "urgent"]).is_err()
        );
    }

    #[test]
    fn test_console_sink_needs_no_program() {
        let config = DaemonConfig::try_parse_from([
            "minute-notifier",
            "--sink",
            "console",
            "--console-format",
            "json",
            "--permission",
            "granted",
        ])
        .unwrap();
        assert_eq!(config.required_program(), None);
        assert_eq!(config.console_format(), ConsoleFormat::Json);
        assert_eq!(config.permission_policy(), PermissionPolicy::Granted);
    }

    #[test]
    fn test_log_dir_tilde_expanded() {
        let config =
            DaemonConfig::try_parse_from(["minute-notifier", "--log-dir", "~/logs"]).unwrap();
        let dir = config.log_dir().unwrap();
        assert!(!dir.to_string_lossy().starts_with('~'));
        assert!(dir.ends_with("logs"));
    }

    #[test]
    fn test_rejects_unknown_sink() {
        assert!(DaemonConfig::try_parse_from(["minute-notifier", "--sink", "sms"]).is_err());
    }
}
