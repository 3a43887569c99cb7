//! Domain model for calendar events and ledger transactions.
//!
//! # Responsibility
//! - Define canonical records shared by storage, services and layout.
//! - Own write-side validation rules for both entities.
//!
//! # Invariants
//! - Every stored record is identified by a store-assigned integer id.
//! - A record is validated before it is written and again when read back.

pub mod event;
pub mod transaction;
