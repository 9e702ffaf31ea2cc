//! This crate is intended to contain code that is required to provide or
//! improve the observability of the deployment tooling. For now that is the
//! initialization logic for logging and the panic hook.
pub mod tracing;
