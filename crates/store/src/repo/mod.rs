pub mod civil;
pub mod consumer;
pub mod criminal;
pub mod family;
pub mod intellectual_property;
pub mod labour;
pub mod person;
pub mod property;
pub mod public_law;
pub mod stats;
