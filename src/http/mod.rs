//! HTTP entrypoint for the MCP dispatcher.
//! `GET /` reports status, `POST /` carries JSON-RPC, `OPTIONS /` answers CORS preflight.
//! The same routes are served under `/api/index`.

mod error;
pub(crate) mod router;
pub(crate) mod server;

pub(crate) use server::HttpServer;
