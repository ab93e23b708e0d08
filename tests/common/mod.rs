//! Shared helpers for integration tests.

// Each test binary compiles its own view of this module; not every helper
// is used by every binary.
#![allow(dead_code)]

pub mod mock_dune;

use dune_mcp::dune::client::DuneClient;
use mock_dune::MockDune;

/// API key used by every test client.
pub const TEST_API_KEY: &str = "dqk_test_key";

/// Builds a client pointed at the given mock server.
pub fn client_for(mock: &MockDune) -> DuneClient {
    DuneClient::builder()
        .api_key(TEST_API_KEY)
        .base_url(&mock.base_url)
        .build()
        .expect("failed to build test client")
}
