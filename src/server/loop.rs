// Server loop module
// Accepts connections until shutdown is signalled, then drains in-flight requests

use std::sync::atomic::AtomicUsize;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;

use super::connection::accept_connection;
use super::shutdown::drain_connections;
use crate::config::AppState;
use crate::error::ServerError;
use crate::logger;

/// Run the server: accept loop, then graceful drain.
///
/// Must run inside a `LocalSet`; connections are served with `spawn_local`.
pub async fn serve(listener: TcpListener, state: Arc<AppState>) -> Result<(), ServerError> {
    let active_connections = Arc::new(AtomicUsize::new(0));

    start_server_loop(listener, Arc::clone(&state), Arc::clone(&active_connections)).await?;

    let grace = Duration::from_secs(state.config.performance.shutdown_grace_period);
    drain_connections(&active_connections, grace).await;
    Ok(())
}

/// Accept connections until `state.shutdown` is notified, then tell open
/// connections to close once idle.
///
/// The listener is dropped on return, so no new connections are queued while
/// the remaining ones drain.
pub async fn start_server_loop(
    listener: TcpListener,
    state: Arc<AppState>,
    active_connections: Arc<AtomicUsize>,
) -> Result<(), ServerError> {
    let local_addr = listener.local_addr()?;

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        accept_connection(stream, peer_addr, &state, &active_connections);
                    }
                    Err(e) => {
                        // Per-connection accept failures (e.g. EMFILE) are not fatal
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            () = state.shutdown.notified() => {
                logger::log_info(&format!("[SHUTDOWN] Stopped accepting on {local_addr}"));
                state.close_connections();
                return Ok(());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::preset::PresetStore;
    use crate::server::create_reusable_listener;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;

    async fn fetch(addr: std::net::SocketAddr, request: &str) -> String {
        let mut stream = TcpStream::connect(addr).await.unwrap();
        stream.write_all(request.as_bytes()).await.unwrap();
        let mut buf = Vec::new();
        stream.read_to_end(&mut buf).await.unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[tokio::test]
    async fn test_serves_scripts_over_tcp() {
        let cfg = Config::from_toml_str(
            "[logging]\naccess_log = false\n[performance]\nshutdown_grace_period = 1",
        )
        .unwrap();
        let presets = PresetStore::bundled(&cfg.presets).unwrap();
        let state = Arc::new(AppState::new(&cfg, presets));

        let listener = create_reusable_listener("127.0.0.1:0".parse().unwrap()).unwrap();
        let addr = listener.local_addr().unwrap();

        let local = tokio::task::LocalSet::new();
        local
            .run_until(async move {
                let server = tokio::task::spawn_local(serve(listener, Arc::clone(&state)));

                let response = fetch(
                    addr,
                    "GET /8.1/install.sh HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
                )
                .await;
                assert!(response.starts_with("HTTP/1.1 200 OK"), "{response}");
                assert!(response
                    .to_ascii_lowercase()
                    .contains("content-type: text/plain;charset=utf-8"));
                assert!(response.contains("PHP_VERSION=\"8.1\""));

                let missing = fetch(
                    addr,
                    "GET /version/9.9 HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
                )
                .await;
                assert!(missing.starts_with("HTTP/1.1 404 Not Found"), "{missing}");

                state.shutdown.notify_one();
                server.await.unwrap().unwrap();
                assert!(TcpStream::connect(addr).await.is_err());
            })
            .await;
    }

    #[tokio::test]
    async fn test_connection_limit_rejects() {
        let cfg = Config::from_toml_str(
            "[logging]\naccess_log = false\n[performance]\nmax_connections = 0\nshutdown_grace_period = 1",
        )
        .unwrap();
        let presets = PresetStore::bundled(&cfg.presets).unwrap();
        let state = Arc::new(AppState::new(&cfg, presets));

        let listener = create_reusable_listener("127.0.0.1:0".parse().unwrap()).unwrap();
        let addr = listener.local_addr().unwrap();

        let local = tokio::task::LocalSet::new();
        local
            .run_until(async move {
                let server = tokio::task::spawn_local(serve(listener, Arc::clone(&state)));

                // Rejected connections are closed without a response
                let mut stream = TcpStream::connect(addr).await.unwrap();
                let mut buf = Vec::new();
                stream.read_to_end(&mut buf).await.unwrap();
                assert!(buf.is_empty());

                state.shutdown.notify_one();
                server.await.unwrap().unwrap();
            })
            .await;
    }

    #[tokio::test]
    async fn test_shutdown_closes_idle_keep_alive_connections() {
        let cfg = Config::from_toml_str(
            "[logging]\naccess_log = false\n[performance]\nshutdown_grace_period = 10",
        )
        .unwrap();
        let presets = PresetStore::bundled(&cfg.presets).unwrap();
        let state = Arc::new(AppState::new(&cfg, presets));

        let listener = create_reusable_listener("127.0.0.1:0".parse().unwrap()).unwrap();
        let addr = listener.local_addr().unwrap();

        let local = tokio::task::LocalSet::new();
        local
            .run_until(async move {
                let server = tokio::task::spawn_local(serve(listener, Arc::clone(&state)));

                // One request, then the client keeps the connection open
                let mut stream = TcpStream::connect(addr).await.unwrap();
                stream
                    .write_all(b"GET /install.sh HTTP/1.1\r\nHost: localhost\r\n\r\n")
                    .await
                    .unwrap();
                let mut buf = vec![0u8; 8192];
                let n = stream.read(&mut buf).await.unwrap();
                assert!(buf[..n].starts_with(b"HTTP/1.1 200 OK"));

                let started = tokio::time::Instant::now();
                state.shutdown.notify_one();
                server.await.unwrap().unwrap();
                assert!(
                    started.elapsed() < Duration::from_secs(5),
                    "shutdown waited {:?} for an idle connection",
                    started.elapsed()
                );

                // The server side closed the idle connection
                let mut rest = Vec::new();
                stream.read_to_end(&mut rest).await.unwrap();
            })
            .await;
    }
}
