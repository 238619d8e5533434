//! Listener half of the HTTP transport.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use super::error::HttpTransportError;
use super::router::{AppState, build_router};
use crate::mcp::McpServer;

/// A bound socket plus the dispatcher it serves.
pub(crate) struct HttpServer {
    listener: TcpListener,
    state: AppState,
}

impl HttpServer {
    /// Bind `addr` for `dispatcher`.
    ///
    /// Port `0` picks a free port; ask [`HttpServer::local_addr`] which one.
    pub async fn bind(
        dispatcher: Arc<McpServer>,
        addr: SocketAddr,
    ) -> Result<Self, HttpTransportError> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| HttpTransportError::Bind { addr, source })?;
        Ok(Self {
            listener,
            state: AppState { dispatcher },
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, HttpTransportError> {
        Ok(self.listener.local_addr()?)
    }

    /// Serve until Ctrl-C.
    pub async fn run(self) -> Result<(), HttpTransportError> {
        self.serve_until(ctrl_c()).await
    }

    /// Serve until `shutdown` resolves, then let in-flight requests finish.
    pub async fn serve_until<F>(self, shutdown: F) -> Result<(), HttpTransportError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = self.local_addr()?;
        tracing::info!(%addr, "MCP HTTP server listening");

        axum::serve(self.listener, build_router(self.state))
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!(%addr, "MCP HTTP server stopped");
        Ok(())
    }
}

async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "cannot listen for Ctrl-C, serving until killed");
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use tokio::sync::oneshot;

    fn loopback() -> SocketAddr {
        "127.0.0.1:0".parse().unwrap()
    }

    #[tokio::test]
    async fn bind_port_zero_reports_real_port() {
        let server = HttpServer::bind(Arc::new(McpServer::new()), loopback())
            .await
            .unwrap();
        assert_ne!(server.local_addr().unwrap().port(), 0);
    }

    #[tokio::test]
    async fn bind_reports_taken_address() {
        let taken = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = taken.local_addr().unwrap();
        let err = HttpServer::bind(Arc::new(McpServer::new()), addr)
            .await
            .err()
            .unwrap();
        assert!(matches!(err, HttpTransportError::Bind { addr: a, .. } if a == addr));
    }

    #[tokio::test]
    async fn serves_status_until_shutdown() {
        let server = HttpServer::bind(Arc::new(McpServer::new()), loopback())
            .await
            .unwrap();
        let addr = server.local_addr().unwrap();
        let (stop, stopped) = oneshot::channel::<()>();
        let handle = tokio::spawn(server.serve_until(async {
            let _ = stopped.await;
        }));

        let body: Value = reqwest::get(format!("http://{}/", addr))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(body["status"], "running");
        assert_eq!(body["tools"], 4);

        stop.send(()).unwrap();
        handle.await.unwrap().unwrap();
    }
}
