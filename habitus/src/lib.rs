//! Habit tracking domain: day keys, the habit record store, the completion
//! engine, and snapshot persistence. No HTTP concerns live here.

mod day_key;
mod habit;
mod store;

pub mod snapshot;
pub mod stats;

pub use day_key::{DayKey, InvalidDayKey};
pub use habit::{Habit, HabitId, HabitPatch, NewHabit};
pub use store::{HabitStore, StoreError};
