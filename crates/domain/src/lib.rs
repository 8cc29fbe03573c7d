//! Domain layer for the job portal
//!
//! Contains the persisted entities, their identifiers, the closed enumerated
//! domains and the validated value objects written through the storage layer.
//! This layer has no storage dependency.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
