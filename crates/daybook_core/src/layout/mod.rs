//! Month-view event layout.
//!
//! # Responsibility
//! - Stack multi-day events into non-overlapping rows per grid week.
//! - Describe how each event bar is clipped at week edges.
//!
//! # Invariants
//! - Layout is pure: no I/O, no state shared between weeks.
//! - Two events sharing a row never share a concrete day of that week.

pub mod month;
pub mod week;

pub use month::{MonthLayout, WeekRow};
pub use week::{compute_week_layout, RenderFlags, SlotBar, WeekLayout};
