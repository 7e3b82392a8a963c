use tokio::signal::unix::{SignalKind, signal};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Installs handlers for SIGINT, SIGTERM, SIGQUIT and SIGHUP and spawns a
/// task that cancels `token` on the first shutdown signal.
///
/// SIGHUP is received and ignored: configuration is only read at startup.
/// The task only touches the token; cleanup stays with the controller. It
/// also ends when `token` is cancelled by someone else.
///
/// # Errors
///
/// Returns an I/O error if a handler cannot be installed.
pub fn spawn_signal_listener(token: CancellationToken) -> std::io::Result<JoinHandle<()>> {
    let mut interrupt = signal(SignalKind::interrupt())?;
    let mut terminate = signal(SignalKind::terminate())?;
    let mut quit = signal(SignalKind::quit())?;
    let mut hangup = signal(SignalKind::hangup())?;

    Ok(tokio::spawn(async move {
        loop {
            let received = tokio::select! {
                _ = interrupt.recv() => "SIGINT",
                _ = terminate.recv() => "SIGTERM",
                _ = quit.recv() => "SIGQUIT",
                _ = hangup.recv() => {
                    log::info!("Got SIGHUP, reloading is not supported; ignoring");
                    continue;
                }
                _ = token.cancelled() => return,
            };
            log::info!("Got {}, exiting", received);
            token.cancel();
            return;
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn raise(sig: libc::c_int) {
        // SAFETY: signalling our own pid; handlers are installed by the listener.
        assert_eq!(unsafe { libc::kill(std::process::id() as libc::pid_t, sig) }, 0);
    }

    #[tokio::test]
    async fn test_hangup_ignored_then_terminate_cancels() {
        let token = CancellationToken::new();
        let listener = spawn_signal_listener(token.clone()).unwrap();

        raise(libc::SIGHUP);
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!token.is_cancelled());

        raise(libc::SIGTERM);
        tokio::time::timeout(Duration::from_secs(5), token.cancelled())
            .await
            .expect("SIGTERM should cancel the token");
        listener.await.unwrap();
    }

    #[tokio::test]
    async fn test_listener_ends_with_token() {
        let token = CancellationToken::new();
        let listener = spawn_signal_listener(token.clone()).unwrap();

        token.cancel();
        tokio::time::timeout(Duration::from_secs(5), listener)
            .await
            .expect("listener should stop once the token is cancelled")
            .unwrap();
    }
}
