#![forbid(unsafe_code)]

//! Core domain model and business logic for the dietlog meal tracker.
//!
//! This crate provides:
//! - Domain types (food items, meals, the user profile)
//! - Pure nutrition math (BMR, calorie goal, BMI, macro totals)
//! - The diet ledger (meal history, queries, recommendations)
//! - Snapshot persistence and text export
//! - Reporting (streaks, daily-intake windows)

pub mod types;
pub mod error;
pub mod nutrition;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod store;
pub mod ledger;
pub mod report;
pub mod export;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use nutrition::{bmi, bmr, daily_calorie_goal, meal_totals, protein_goal, BmiCategory, MacroTotals};
pub use catalog::seed_foods;
pub use config::Config;
pub use store::{JsonSnapshotStore, MemoryStore, Snapshot, SnapshotStore};
pub use ledger::DietLedger;
pub use report::{current_streak, daily_intake, top_foods, DayIntake};
pub use export::export_text;
