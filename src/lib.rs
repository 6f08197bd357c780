//! Drive a Debug Adapter Protocol server from tests.
//!
//! The protocol work lives in [`dapcheck_dap`] and configuration in
//! [`dapcheck_config`]. This crate ties them together: [`Harness`] turns a
//! [`HarnessConfig`](dapcheck_config::HarnessConfig) into a live connection
//! and bounds every wait by the configured deadlines.

pub mod harness;
pub mod logging;

pub use dapcheck_config as config;
pub use dapcheck_dap as dap;
pub use harness::Harness;
