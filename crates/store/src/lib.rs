pub mod config;
pub mod db;
pub mod error_convert;
pub mod export;
pub mod generator;
pub mod repo;
pub mod telemetry;
