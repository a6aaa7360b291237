pub mod error;

// Shared value entities and reference enums
pub mod case;
pub mod common;
pub mod config;
pub mod stats;

// Case domain modules (canonical locations for all legal domain types)
pub mod civil;
pub mod consumer;
pub mod criminal;
pub mod family;
pub mod intellectual_property;
pub mod labour;
pub mod property;
pub mod public_law;

pub use error::*;

pub use case::*;
pub use common::*;
pub use config::*;
pub use stats::*;

// Re-export all domain types
pub use civil::*;
pub use consumer::*;
pub use criminal::*;
pub use family::*;
pub use intellectual_property::*;
pub use labour::*;
pub use property::*;
pub use public_law::*;
