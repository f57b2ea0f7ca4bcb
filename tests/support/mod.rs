//! Shared test utilities.

pub mod graphql_server;
