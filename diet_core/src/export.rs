//! Human-readable data export.
//!
//! Produces a text block the user can copy or save: a timestamp header
//! plus the pretty-printed JSON encodings of the profile and meal list.
//! This is a read-only convenience, not an interchange format.

use crate::types::{Meal, UserProfile};
use crate::Result;
use chrono::{DateTime, Local};

/// Render the export block for the given snapshot
pub fn export_text(
    profile: &UserProfile,
    meals: &[Meal],
    generated_at: DateTime<Local>,
) -> Result<String> {
    let profile_json = serde_json::to_string_pretty(profile)?;
    let meals_json = serde_json::to_string_pretty(&meals)?;

    Ok(format!(
        "Dietlog - Data Export\n\
         Generated: {}\n\
         \n\
         === USER PROFILE ===\n\
         {}\n\
         \n\
         === MEALS DATA ===\n\
         {}\n",
        generated_at.format("%Y-%m-%d %H:%M:%S"),
        profile_json,
        meals_json
    ))
}
