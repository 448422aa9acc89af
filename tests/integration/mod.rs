//! Integration tests for the namespace engine, snapshot store, shell and CLI

mod cli_session;
mod namespace_scenarios;
mod persistence_roundtrip;
mod properties;
mod shell_session;
