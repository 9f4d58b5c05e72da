//! HTTP handlers for the Employees domain

pub mod admin_employees;
pub mod auth;
pub mod contract_events;
pub mod employees;
pub mod human_resources;
