//! Handlers for the operational `/v1` endpoints. These sit outside the gated
//! page surface: probes and session checks are not site pages.

pub mod health;
pub mod session;
