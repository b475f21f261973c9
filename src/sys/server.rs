use crate::events::AppEvent;
use async_channel::Sender;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::net::UnixListener;

pub const SOCKET_PATH: &str = "/tmp/progress-ring.sock";

/// Forwards every well-formed command line from `reader` until EOF or until the app is gone.
/// Malformed lines are logged and skipped.
pub async fn forward_commands<R>(reader: R, tx: &Sender<AppEvent>) -> bool
where
    R: AsyncRead + Unpin,
{
    let mut lines = BufReader::new(reader).lines();

    while let Ok(Some(line)) = lines.next_line().await {
        match line.parse::<AppEvent>() {
            Ok(event) => {
                log::debug!("Control command: {:?}", event);
                if tx.send(event).await.is_err() {
                    return false;
                }
            }
            Err(e) => log::warn!("Ignoring control command '{}': {}", line.trim(), e),
        }
    }
    true
}

pub async fn run_server(tx: Sender<AppEvent>) {
    // stale socket from a previous run
    if std::fs::metadata(SOCKET_PATH).is_ok() {
        let _ = std::fs::remove_file(SOCKET_PATH);
    }

    let listener = match UnixListener::bind(SOCKET_PATH) {
        Ok(l) => l,
        Err(e) => {
            log::error!("Failed to bind unix socket {}: {}", SOCKET_PATH, e);
            return;
        }
    };
    log::info!("Listening for control commands on {}", SOCKET_PATH);

    loop {
        match listener.accept().await {
            Ok((stream, _)) => {
                let tx = tx.clone();
                tokio::spawn(async move {
                    forward_commands(stream, &tx).await;
                });
            }
            Err(e) => {
                log::error!("Failed to accept connection: {}", e);
            }
        }
    }
}
