//! Core domain types for the dietlog meal tracker.
//!
//! This module defines the fundamental types used throughout the system:
//! - Food items and their categories
//! - Meals and meal types
//! - The user profile with activity level and diet goal

use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Food Types
// ============================================================================

/// Category of a food item
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FoodCategory {
    Protein,
    Vegetables,
    Fruits,
    Grains,
    Dairy,
    Nuts,
    Beverages,
    Snacks,
}

impl FoodCategory {
    /// Human-facing category name, also matched by food search
    pub fn label(&self) -> &'static str {
        match self {
            FoodCategory::Protein => "Protein",
            FoodCategory::Vegetables => "Vegetables",
            FoodCategory::Fruits => "Fruits",
            FoodCategory::Grains => "Grains",
            FoodCategory::Dairy => "Dairy",
            FoodCategory::Nuts => "Nuts & Seeds",
            FoodCategory::Beverages => "Beverages",
            FoodCategory::Snacks => "Snacks",
        }
    }
}

/// An immutable nutritional record for one serving of a food
///
/// Macro fields are grams per serving, calories are kcal per serving.
/// A food item is never mutated after creation; edits produce a new record
/// with a fresh id.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FoodItem {
    pub id: Uuid,
    pub name: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub fiber: f64,
    pub serving_size: String,
    pub category: FoodCategory,
}

impl FoodItem {
    /// Create a new food item with a freshly assigned id
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        calories: f64,
        protein: f64,
        carbs: f64,
        fat: f64,
        fiber: f64,
        serving_size: impl Into<String>,
        category: FoodCategory,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            calories,
            protein,
            carbs,
            fat,
            fiber,
            serving_size: serving_size.into(),
            category,
        }
    }
}

// ============================================================================
// Meal Types
// ============================================================================

/// Slot a meal belongs to
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealType {
    pub fn label(&self) -> &'static str {
        match self {
            MealType::Breakfast => "Breakfast",
            MealType::Lunch => "Lunch",
            MealType::Dinner => "Dinner",
            MealType::Snack => "Snack",
        }
    }
}

/// A logged meal: a named, timestamped list of food items
///
/// Food items are copied by value into the meal; there is no shared
/// ownership with the catalog. Totals are always computed from the live
/// item list (see [`crate::nutrition::meal_totals`]), never cached.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Meal {
    pub id: Uuid,
    pub name: String,
    pub time: DateTime<Utc>,
    pub food_items: Vec<FoodItem>,
    pub meal_type: MealType,
}

impl Meal {
    /// Create a new meal with a freshly assigned id
    pub fn new(
        name: impl Into<String>,
        meal_type: MealType,
        time: DateTime<Utc>,
        food_items: Vec<FoodItem>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            time,
            food_items,
            meal_type,
        }
    }

    /// Calendar day this meal falls on, in the local timezone
    pub fn local_date(&self) -> NaiveDate {
        self.time.with_timezone(&Local).date_naive()
    }
}

// ============================================================================
// Profile Types
// ============================================================================

/// Weekly activity level with its calorie multiplier
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Moderate,
    Active,
    VeryActive,
}

impl ActivityLevel {
    /// Multiplier applied to BMR to estimate total daily expenditure
    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::Active => 1.725,
            ActivityLevel::VeryActive => 1.9,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "Sedentary",
            ActivityLevel::Light => "Light",
            ActivityLevel::Moderate => "Moderate",
            ActivityLevel::Active => "Active",
            ActivityLevel::VeryActive => "Very Active",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "Little to no exercise",
            ActivityLevel::Light => "Light exercise 1-3 days/week",
            ActivityLevel::Moderate => "Moderate exercise 3-5 days/week",
            ActivityLevel::Active => "Hard exercise 6-7 days/week",
            ActivityLevel::VeryActive => "Very hard exercise, physical job",
        }
    }
}

/// Diet goal with its daily calorie offset
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DietGoal {
    WeightLoss,
    WeightGain,
    Maintenance,
    MuscleGain,
}

impl DietGoal {
    /// Calorie adjustment added on top of activity-scaled BMR
    pub fn calorie_offset(&self) -> f64 {
        match self {
            DietGoal::WeightLoss => -500.0,
            DietGoal::WeightGain => 500.0,
            DietGoal::Maintenance => 0.0,
            DietGoal::MuscleGain => 300.0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DietGoal::WeightLoss => "Weight Loss",
            DietGoal::WeightGain => "Weight Gain",
            DietGoal::Maintenance => "Maintenance",
            DietGoal::MuscleGain => "Muscle Gain",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            DietGoal::WeightLoss => "Reduce calorie intake for sustainable weight loss",
            DietGoal::WeightGain => "Increase calorie intake for healthy weight gain",
            DietGoal::Maintenance => "Maintain current weight with balanced nutrition",
            DietGoal::MuscleGain => "High protein intake for muscle building",
        }
    }
}

/// The user's profile and diet preferences
///
/// Weight is kilograms, height is centimeters. The model accepts any
/// positive age; the 13-100 range is a UI convention, not enforced here.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    #[serde(default)]
    pub name: String,
    pub age: u32,
    pub weight_kg: f64,
    pub height_cm: f64,
    pub activity_level: ActivityLevel,
    pub diet_goal: DietGoal,
    pub target_weight_kg: f64,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            name: String::new(),
            age: 25,
            weight_kg: 70.0,
            height_cm: 170.0,
            activity_level: ActivityLevel::Moderate,
            diet_goal: DietGoal::Maintenance,
            target_weight_kg: 70.0,
        }
    }
}
