//! Meal diary: food catalog lookups, logged entries, daily totals and the
//! persisted per-day store.

pub mod catalog;
pub mod entry;
pub mod store;
pub mod totals;

pub use catalog::{FoodCatalog, FoodItem};
pub use entry::{DiaryEntry, EntryKind};
pub use store::{DiaryData, DiaryState, DiaryStore, RolloverPolicy};
pub use totals::{
    daily_totals, progress_status, totals_for_date, DailyProgress, DailyTargets, DailyTotals,
    ProgressRule, ProgressStatus,
};
