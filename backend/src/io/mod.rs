//! # IO Module
//!
//! Interface layer exposing the domain services over REST. Handlers
//! translate HTTP requests into service calls and map results onto
//! status codes; no business logic lives here.

pub mod rest;

pub use rest::export_apis::*;
pub use rest::notification_apis::*;
pub use rest::record_apis::*;
pub use rest::target_apis::*;
