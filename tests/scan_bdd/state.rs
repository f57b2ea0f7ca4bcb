//! Scenario state and scan execution for the scan BDD tests.

use prscout::{
    OctocrabGraphqlGateway, PersonalAccessToken, ScanAborted, ScanReport, ScanSettings, Scanner,
    TestMatch,
};
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;
use wiremock::MockServer;

use super::runtime::{self, SharedRuntime};

#[derive(ScenarioState, Default)]
pub(crate) struct ScanState {
    pub(crate) runtime: Slot<SharedRuntime>,
    pub(crate) server: Slot<MockServer>,
    pub(crate) report: Slot<ScanReport>,
    pub(crate) matches: Slot<Vec<TestMatch>>,
    pub(crate) error: Slot<ScanAborted>,
}

/// Ensures the runtime and server are initialised in `ScanState`.
pub(crate) fn ensure_runtime_and_server(scan_state: &ScanState) -> SharedRuntime {
    runtime::ensure_runtime_and_server(&scan_state.runtime, &scan_state.server)
        .unwrap_or_else(|error| panic!("failed to initialise runtime and server: {error}"))
}

/// Runs a scan over `urls` against the mock server, storing the outcome.
pub(crate) fn run_scan(scan_state: &ScanState, urls: &[String]) {
    let shared_runtime = ensure_runtime_and_server(scan_state);
    let server_url = scan_state
        .server
        .with_ref(MockServer::uri)
        .unwrap_or_else(|| panic!("mock server URL missing"));

    let token = PersonalAccessToken::new("bdd-token")
        .unwrap_or_else(|error| panic!("token should be valid: {error}"));
    // The octocrab client spawns its service buffer, so it must be built
    // inside the runtime context.
    let gateway = shared_runtime
        .block_on(async { OctocrabGraphqlGateway::for_token(&token, &server_url) })
        .unwrap_or_else(|error| panic!("gateway should build: {error}"));
    let scanner = Scanner::new(&gateway, ScanSettings::default());
    let mut sink: Vec<TestMatch> = Vec::new();

    let result = shared_runtime.block_on(scanner.run(urls, &mut sink));
    scan_state.matches.set(sink);
    match result {
        Ok(report) => {
            let _had_previous_error = scan_state.error.take().is_some();
            scan_state.report.set(report);
        }
        Err(error) => {
            let _had_previous_report = scan_state.report.take().is_some();
            scan_state.error.set(error);
        }
    }
}
