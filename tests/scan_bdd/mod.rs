//! Support modules for the scan BDD tests.

#[path = "../support/graphql_server.rs"]
pub(crate) mod graphql_server;
#[path = "../support/runtime.rs"]
pub(crate) mod runtime;
pub(crate) mod state;

pub(crate) use state::{ScanState, ensure_runtime_and_server, run_scan};
