use std::panic::{self, AssertUnwindSafe};

use httpmock::MockServer;

/// Starts a fresh `httpmock::MockServer`, or returns `None` when the sandbox
/// refuses to bind a local port so the calling test can skip itself.
pub fn start_mock_server() -> Option<MockServer> {
    panic::catch_unwind(AssertUnwindSafe(MockServer::start)).ok()
}
