//! HTTP handlers for bank-service.

pub mod bank;
pub mod health;

pub use bank::{
    create_bank_details, delete_bank_details, get_bank_details, list_bank_details,
    update_bank_details,
};
pub use health::{health_check, metrics_endpoint, readiness_check, route_not_found};
