// Unix signals as lifecycle triggers
// SIGUSR1 -> Pause, SIGUSR2 -> Resume
use tokio::signal::unix::{signal, SignalKind};
use tracing::info;

use minute_core::application::{LifecycleSender, ShutdownToken};

/// Forward lifecycle signals to the driver until shutdown or until the driver is gone
pub async fn forward_lifecycle_signals(
    lifecycle: LifecycleSender,
    mut shutdown: ShutdownToken,
) -> std::io::Result<()> {
    let mut pause = signal(SignalKind::user_defined1())?;
    let mut resume = signal(SignalKind::user_defined2())?;

    loop {
        tokio::select! {
            _ = shutdown.wait() => break,
            Some(()) = pause.recv() => {
                info!("SIGUSR1 received: pausing");
                if !lifecycle.pause() {
                    break;
                }
            }
            Some(()) = resume.recv() => {
                info!("SIGUSR2 received: resuming");
                if !lifecycle.resume() {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Resolve when the process is asked to terminate (Ctrl+C or SIGTERM)
pub async fn wait_for_termination() -> std::io::Result<()> {
    let mut term = signal(SignalKind::terminate())?;
    tokio::select! {
        result = tokio::signal::ctrl_c() => result,
        _ = term.recv() => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minute_core::application::{lifecycle_channel, shutdown_channel};
    use minute_core::application::LifecycleEvent;
    use nix::sys::signal::{raise, Signal};

    // Both directions in one test: signal handlers are process-wide
    #[tokio::test]
    async fn test_signals_map_to_lifecycle_events() {
        let (tx, mut rx) = lifecycle_channel();
        let (shutdown_tx, shutdown_rx) = shutdown_channel();
        let forwarder = tokio::spawn(forward_lifecycle_signals(tx, shutdown_rx));

        // Let the forwarder install its handlers
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;

        raise(Signal::SIGUSR1).unwrap();
        assert_eq!(rx.recv().await, Some(LifecycleEvent::Pause));

        raise(Signal::SIGUSR2).unwrap();
        assert_eq!(rx.recv().await, Some(LifecycleEvent::Resume));

        shutdown_tx.shutdown();
        forwarder.await.unwrap().unwrap();
    }
}
