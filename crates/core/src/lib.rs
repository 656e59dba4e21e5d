//! `splitledger-core`: domain primitives for the group expense ledger.
//!
//! This crate contains **pure domain** building blocks (no IO, no transport).

pub mod aggregate;
pub mod entity;
pub mod error;
pub mod id;
pub mod money;
pub mod participant;
pub mod value_object;

pub use aggregate::{Aggregate, AggregateRoot};
pub use entity::Entity;
pub use error::{ValidationError, ValidationResult};
pub use id::{ExpenseId, LedgerId};
pub use money::Money;
pub use participant::{EmptyName, Participant};
pub use value_object::ValueObject;
