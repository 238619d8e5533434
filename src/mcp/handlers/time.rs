use crate::mcp::clock::{Clock, iso_timestamp};

/// Report the server's local time
pub(crate) fn handle(clock: &dyn Clock) -> String {
    format!("Current Vercel server time: {}", iso_timestamp(clock.now()))
}
