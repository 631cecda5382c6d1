//! Pure derived-value functions over the data model.
//!
//! Everything here is a total, side-effect-free function of its inputs:
//! BMR, daily calorie goal, BMI, and per-meal macro totals. Nothing is
//! cached; callers recompute from the current snapshot.

use crate::types::{Meal, UserProfile};

/// Aggregated macro totals, in kcal and grams
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MacroTotals {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

impl MacroTotals {
    /// Accumulate another total into this one
    pub fn add(&mut self, other: &MacroTotals) {
        self.calories += other.calories;
        self.protein += other.protein;
        self.carbs += other.carbs;
        self.fat += other.fat;
    }
}

/// Basal metabolic rate via the Mifflin-St Jeor equation
///
/// `10*weight + 6.25*height - 5*age + 5`, the male-coefficient variant.
/// No sex parameter is modeled; this matches the system this replaces and
/// must not be "fixed" without revisiting stored profiles. Inputs are not
/// validated; nonsensical weight/height/age produce nonsensical output.
pub fn bmr(profile: &UserProfile) -> f64 {
    10.0 * profile.weight_kg + 6.25 * profile.height_cm - 5.0 * f64::from(profile.age) + 5.0
}

/// Daily calorie goal: activity-scaled BMR plus the diet-goal offset
///
/// Never clamped; a pathological profile can yield a nonpositive goal,
/// which [`crate::ledger::DietLedger::calorie_progress`] treats as "no
/// meaningful target".
pub fn daily_calorie_goal(profile: &UserProfile) -> f64 {
    bmr(profile) * profile.activity_level.multiplier() + profile.diet_goal.calorie_offset()
}

/// Daily protein target in grams: 1.6 g per kg of body weight
pub fn protein_goal(profile: &UserProfile) -> f64 {
    profile.weight_kg * 1.6
}

/// Sum of calories and macros over a meal's food items
///
/// All-zero for an empty item list.
pub fn meal_totals(meal: &Meal) -> MacroTotals {
    meal.food_items
        .iter()
        .fold(MacroTotals::default(), |mut acc, item| {
            acc.calories += item.calories;
            acc.protein += item.protein;
            acc.carbs += item.carbs;
            acc.fat += item.fat;
            acc
        })
}

/// Body mass index: weight / height_m^2
pub fn bmi(profile: &UserProfile) -> f64 {
    let height_m = profile.height_cm / 100.0;
    profile.weight_kg / (height_m * height_m)
}

/// BMI bands with the conventional thresholds
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    /// Classify a BMI value: <18.5, [18.5,25), [25,30), >=30
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            BmiCategory::Underweight
        } else if bmi < 25.0 {
            BmiCategory::Normal
        } else if bmi < 30.0 {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obese
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }
}
