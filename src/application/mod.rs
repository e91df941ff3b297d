//! Application layer orchestrating the domain over injected ports.
//!
//! `PayWithMpesa` drives one checkout dialog from form to dispatched
//! request. `AppConfigService` bundles the platform services every screen
//! shares.

pub mod app_config;
pub mod checkout;
pub mod tabs;
