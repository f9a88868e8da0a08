pub mod aggregate;
pub mod dashboard_service;
pub mod dto;
pub mod generator;
pub mod sample;
