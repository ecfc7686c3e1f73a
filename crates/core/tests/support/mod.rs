//! Shared test helpers for `copion-core` integration tests.
//!
//! Lightweight gateway mocks so service tests can focus on behaviour
//! instead of boilerplate.

pub mod gateway;
