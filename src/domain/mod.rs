//! Domain layer: the checkout form model, the payment request it produces,
//! and the ports through which the application reaches platform services.

pub mod form;
pub mod payment;
pub mod ports;
pub mod session;
