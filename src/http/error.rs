//! Failures of the HTTP listener. Request-level problems never surface here;
//! the router turns them into JSON bodies.

use std::net::SocketAddr;

use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum HttpTransportError {
    /// The listen address is taken, not local, or not permitted.
    #[error("cannot listen on {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
    /// The accept loop stopped with an I/O error.
    #[error("HTTP server stopped: {0}")]
    Serve(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn bind_error_names_address_and_keeps_source() {
        let err = HttpTransportError::Bind {
            addr: "127.0.0.1:3000".parse().unwrap(),
            source: std::io::Error::new(std::io::ErrorKind::AddrInUse, "in use"),
        };
        assert_eq!(err.to_string(), "cannot listen on 127.0.0.1:3000: in use");
        assert!(err.source().is_some());
    }

    #[test]
    fn serve_error_from_io() {
        let err: HttpTransportError =
            std::io::Error::new(std::io::ErrorKind::ConnectionReset, "connection reset").into();
        assert_eq!(err.to_string(), "HTTP server stopped: connection reset");
    }
}
