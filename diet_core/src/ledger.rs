//! The diet ledger: the one live profile plus the full meal history.
//!
//! All operations are synchronous, in-memory, and total over the current
//! snapshot. After every mutation the ledger fires a best-effort save
//! through its storage port; a failed save is logged and swallowed, and
//! the in-memory state stays authoritative for the session.

use crate::catalog;
use crate::config::RecommendationConfig;
use crate::nutrition::{self, MacroTotals};
use crate::store::{Snapshot, SnapshotStore};
use crate::types::{FoodItem, Meal, UserProfile};
use crate::{Error, Result};
use chrono::{Local, NaiveDate};
use uuid::Uuid;

/// Aggregate root over the profile, meal history, and seed food catalog
///
/// Constructed explicitly and passed to callers; there is no global
/// instance. One ledger per process, single-writer: mutating operations
/// are not designed to be interleaved from multiple threads.
pub struct DietLedger {
    profile: UserProfile,
    meals: Vec<Meal>,
    foods: &'static [FoodItem],
    store: Box<dyn SnapshotStore>,
    recommendations: RecommendationConfig,
}

impl DietLedger {
    /// Open a ledger from the last-saved snapshot (or defaults)
    pub fn open(store: Box<dyn SnapshotStore>, recommendations: RecommendationConfig) -> Self {
        let Snapshot { profile, meals } = store.load();
        tracing::info!("Opened ledger with {} meals", meals.len());
        Self {
            profile,
            meals,
            foods: catalog::seed_foods(),
            store,
            recommendations,
        }
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    pub fn meals(&self) -> &[Meal] {
        &self.meals
    }

    pub fn food_database(&self) -> &'static [FoodItem] {
        self.foods
    }

    /// Best-effort save; failures are logged, never surfaced
    fn persist(&self) {
        if let Err(e) = self.store.save(&self.profile, &self.meals) {
            tracing::warn!("Failed to save snapshot: {}. In-memory state unchanged.", e);
        }
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Replace the live profile and persist
    pub fn set_profile(&mut self, profile: UserProfile) {
        self.profile = profile;
        self.persist();
    }

    /// Append a meal and persist. No validation, no dedup; always succeeds.
    pub fn add_meal(&mut self, meal: Meal) {
        tracing::debug!("Adding meal {} ({})", meal.name, meal.id);
        self.meals.push(meal);
        self.persist();
    }

    /// Remove the first meal with the given id and persist
    ///
    /// Returns whether a meal was removed; an absent id is a no-op, not
    /// an error.
    pub fn delete_meal(&mut self, id: Uuid) -> bool {
        let removed = match self.meals.iter().position(|m| m.id == id) {
            Some(idx) => {
                self.meals.remove(idx);
                true
            }
            None => {
                tracing::debug!("delete_meal: no meal with id {}", id);
                false
            }
        };
        self.persist();
        removed
    }

    /// Replace the meal with the same id; no-op if absent
    pub fn update_meal(&mut self, meal: Meal) -> bool {
        match self.meals.iter_mut().find(|m| m.id == meal.id) {
            Some(slot) => {
                *slot = meal;
                self.persist();
                true
            }
            None => {
                tracing::debug!("update_meal: no meal with id {}", meal.id);
                false
            }
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Meals whose timestamp falls on the given local calendar day
    ///
    /// Calendar-day equality, midnight to midnight; not a 24-hour window.
    pub fn meals_for_date(&self, date: NaiveDate) -> Vec<&Meal> {
        self.meals.iter().filter(|m| m.local_date() == date).collect()
    }

    pub fn meals_for_today(&self) -> Vec<&Meal> {
        self.meals_for_date(today())
    }

    /// Macro totals summed over one local calendar day
    pub fn totals_for_date(&self, date: NaiveDate) -> MacroTotals {
        let mut totals = MacroTotals::default();
        for meal in self.meals_for_date(date) {
            totals.add(&nutrition::meal_totals(meal));
        }
        totals
    }

    pub fn totals_today(&self) -> MacroTotals {
        self.totals_for_date(today())
    }

    pub fn total_calories_today(&self) -> f64 {
        self.totals_today().calories
    }

    pub fn total_protein_today(&self) -> f64 {
        self.totals_today().protein
    }

    pub fn total_carbs_today(&self) -> f64 {
        self.totals_today().carbs
    }

    pub fn total_fat_today(&self) -> f64 {
        self.totals_today().fat
    }

    /// Fraction of today's calorie goal consumed, clamped to [0, 1]
    ///
    /// A nonpositive goal (pathological profile) yields 0.0 rather than a
    /// division error; there is no meaningful target to progress against.
    pub fn calorie_progress(&self) -> f64 {
        let goal = nutrition::daily_calorie_goal(&self.profile);
        if goal <= 0.0 {
            return 0.0;
        }
        (self.total_calories_today() / goal).min(1.0)
    }

    /// Case-insensitive substring search over the food catalog
    ///
    /// Matches the food name or its category label; an empty or
    /// whitespace-only query returns the full catalog.
    pub fn search_food(&self, query: &str) -> Vec<&FoodItem> {
        let q = query.trim().to_lowercase();
        if q.is_empty() {
            return self.foods.iter().collect();
        }
        self.foods
            .iter()
            .filter(|f| {
                f.name.to_lowercase().contains(&q)
                    || f.category.label().to_lowercase().contains(&q)
            })
            .collect()
    }

    /// Resolve a user-supplied food name to a single catalog item
    ///
    /// Exact name match (case-insensitive) wins; otherwise the name must
    /// match exactly one catalog entry by substring search.
    pub fn lookup_food(&self, name: &str) -> Result<&FoodItem> {
        let trimmed = name.trim();
        if let Some(exact) = self
            .foods
            .iter()
            .find(|f| f.name.eq_ignore_ascii_case(trimmed))
        {
            return Ok(exact);
        }

        let matches = self.search_food(trimmed);
        match matches.as_slice() {
            [single] => Ok(single),
            [] => Err(Error::UnknownFood(trimmed.to_string())),
            _ => Err(Error::UnknownFood(format!(
                "{} (ambiguous, matches {} foods)",
                trimmed,
                matches.len()
            ))),
        }
    }

    /// Deterministic daily recommendations, evaluated in fixed order
    ///
    /// (a) remaining-calories band, (b) protein shortfall, (c) meal count.
    /// Always returns 1 to 3 messages.
    pub fn daily_recommendations(&self) -> Vec<String> {
        let totals = self.totals_today();
        let goal = nutrition::daily_calorie_goal(&self.profile);
        let remaining = goal - totals.calories;
        let band = self.recommendations.calorie_band;

        let mut recommendations = Vec::new();

        if remaining > band {
            recommendations.push(format!(
                "You have {:.0} calories remaining for today",
                remaining
            ));
        } else if remaining < -band {
            recommendations.push(format!(
                "You've exceeded your daily calorie goal by {:.0} calories",
                remaining.abs()
            ));
        } else {
            recommendations.push("You're on track with your calorie goal!".to_string());
        }

        let protein_goal = self.profile.weight_kg * self.recommendations.protein_per_kg;
        if totals.protein < protein_goal {
            recommendations.push(format!(
                "Consider adding more protein - aim for {:.0}g daily",
                protein_goal
            ));
        }

        if self.meals_for_today().len() < self.recommendations.min_meals as usize {
            recommendations.push(format!(
                "Try to have at least {} balanced meals today",
                self.recommendations.min_meals
            ));
        }

        recommendations
    }
}

/// Today's local calendar date
pub(crate) fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{JsonSnapshotStore, MemoryStore};
    use crate::types::{ActivityLevel, DietGoal, FoodCategory, MealType};
    use chrono::{DateTime, TimeZone, Utc};

    fn test_ledger() -> DietLedger {
        DietLedger::open(Box::new(MemoryStore::new()), RecommendationConfig::default())
    }

    fn food(name: &str, calories: f64, protein: f64) -> FoodItem {
        FoodItem::new(name, calories, protein, 0.0, 0.0, 0.0, "100g", FoodCategory::Protein)
    }

    fn meal_at(time: DateTime<Utc>, items: Vec<FoodItem>) -> Meal {
        Meal::new("Test Meal", MealType::Lunch, time, items)
    }

    #[test]
    fn test_add_then_delete_restores_count() {
        let mut ledger = test_ledger();
        let before = ledger.meals().len();

        let meal = meal_at(Utc::now(), vec![]);
        let id = meal.id;
        ledger.add_meal(meal);
        assert_eq!(ledger.meals().len(), before + 1);

        assert!(ledger.delete_meal(id));
        assert_eq!(ledger.meals().len(), before);
    }

    #[test]
    fn test_delete_absent_id_is_noop() {
        let mut ledger = test_ledger();
        ledger.add_meal(meal_at(Utc::now(), vec![]));

        assert!(!ledger.delete_meal(Uuid::new_v4()));
        assert_eq!(ledger.meals().len(), 1);
    }

    #[test]
    fn test_update_replaces_matching_meal() {
        let mut ledger = test_ledger();
        let meal = meal_at(Utc::now(), vec![]);
        let id = meal.id;
        ledger.add_meal(meal);

        let mut replacement = ledger.meals()[0].clone();
        replacement.name = "Renamed".into();
        assert!(ledger.update_meal(replacement));
        assert_eq!(ledger.meals()[0].name, "Renamed");
        assert_eq!(ledger.meals()[0].id, id);
    }

    #[test]
    fn test_update_absent_id_is_noop() {
        let mut ledger = test_ledger();
        ledger.add_meal(meal_at(Utc::now(), vec![]));

        let stray = meal_at(Utc::now(), vec![]);
        assert!(!ledger.update_meal(stray));
        assert_eq!(ledger.meals()[0].name, "Test Meal");
    }

    #[test]
    fn test_meals_partition_by_calendar_day() {
        let mut ledger = test_ledger();

        // 23:59 and 00:01 the next day, in the local calendar
        let late = Local
            .with_ymd_and_hms(2024, 3, 1, 23, 59, 0)
            .unwrap()
            .with_timezone(&Utc);
        let early = Local
            .with_ymd_and_hms(2024, 3, 2, 0, 1, 0)
            .unwrap()
            .with_timezone(&Utc);

        ledger.add_meal(meal_at(late, vec![]));
        ledger.add_meal(meal_at(early, vec![]));

        let day1 = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let day2 = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();

        assert_eq!(ledger.meals_for_date(day1).len(), 1);
        assert_eq!(ledger.meals_for_date(day2).len(), 1);
    }

    #[test]
    fn test_todays_totals_sum_meals() {
        let mut ledger = test_ledger();
        ledger.add_meal(meal_at(Utc::now(), vec![food("A", 100.0, 10.0)]));
        ledger.add_meal(meal_at(Utc::now(), vec![food("B", 200.0, 15.0)]));

        assert!((ledger.total_calories_today() - 300.0).abs() < 1e-6);
        assert!((ledger.total_protein_today() - 25.0).abs() < 1e-6);
    }

    #[test]
    fn test_calorie_progress_zero_without_meals() {
        let ledger = test_ledger();
        assert_eq!(ledger.calorie_progress(), 0.0);
    }

    #[test]
    fn test_calorie_progress_clamped_at_one() {
        let mut ledger = test_ledger();
        ledger.add_meal(meal_at(Utc::now(), vec![food("Feast", 99_999.0, 0.0)]));
        assert_eq!(ledger.calorie_progress(), 1.0);
    }

    #[test]
    fn test_calorie_progress_zero_for_nonpositive_goal() {
        let mut ledger = test_ledger();
        // Degenerate profile: goal goes negative under weight loss
        ledger.set_profile(UserProfile {
            age: 100,
            weight_kg: 1.0,
            height_cm: 10.0,
            diet_goal: DietGoal::WeightLoss,
            ..UserProfile::default()
        });
        ledger.add_meal(meal_at(Utc::now(), vec![food("A", 500.0, 0.0)]));

        assert_eq!(ledger.calorie_progress(), 0.0);
    }

    #[test]
    fn test_search_finds_chicken() {
        let ledger = test_ledger();
        let hits = ledger.search_food("chicken");
        assert!(hits.iter().any(|f| f.name == "Grilled Chicken Breast"));
    }

    #[test]
    fn test_search_miss_returns_empty() {
        let ledger = test_ledger();
        assert!(ledger.search_food("zzzznotfound").is_empty());
    }

    #[test]
    fn test_search_empty_query_returns_catalog() {
        let ledger = test_ledger();
        assert_eq!(ledger.search_food("").len(), ledger.food_database().len());
        assert_eq!(ledger.search_food("   ").len(), ledger.food_database().len());
    }

    #[test]
    fn test_search_matches_category_label() {
        let ledger = test_ledger();
        let hits = ledger.search_food("dairy");
        assert!(!hits.is_empty());
        assert!(hits.iter().all(|f| f.category == FoodCategory::Dairy));
    }

    #[test]
    fn test_lookup_food_exact_and_substring() {
        let ledger = test_ledger();
        assert_eq!(ledger.lookup_food("apple").unwrap().name, "Apple");
        assert_eq!(
            ledger.lookup_food("chicken").unwrap().name,
            "Grilled Chicken Breast"
        );
        assert!(matches!(
            ledger.lookup_food("zzz"),
            Err(Error::UnknownFood(_))
        ));
        // "a" matches many foods
        assert!(matches!(
            ledger.lookup_food("a"),
            Err(Error::UnknownFood(_))
        ));
    }

    #[test]
    fn test_recommendations_empty_day_has_three() {
        let ledger = test_ledger();
        let recs = ledger.daily_recommendations();
        assert_eq!(recs.len(), 3);
        assert!(recs[0].contains("calories remaining"));
        assert!(recs[1].contains("protein"));
        assert!(recs[2].contains("balanced meals"));
    }

    #[test]
    fn test_recommendations_on_track_day_has_one() {
        let mut ledger = test_ledger();
        // Default profile goal: (10*70 + 6.25*170 - 5*25 + 5) * 1.55 = 2545.875.
        // Three meals, 2550 kcal total (inside the 200 kcal band), 150 g protein.
        for _ in 0..3 {
            ledger.add_meal(meal_at(Utc::now(), vec![food("Dense", 850.0, 50.0)]));
        }

        let recs = ledger.daily_recommendations();
        assert_eq!(recs.len(), 1);
        assert!(recs[0].contains("on track"));
    }

    #[test]
    fn test_recommendations_overshoot_message() {
        let mut ledger = test_ledger();
        ledger.add_meal(meal_at(Utc::now(), vec![food("Feast", 10_000.0, 200.0)]));

        let recs = ledger.daily_recommendations();
        assert!(recs[0].contains("exceeded"));
    }

    #[test]
    fn test_state_survives_reopen() {
        let temp_dir = tempfile::tempdir().unwrap();

        let mut first = DietLedger::open(
            Box::new(JsonSnapshotStore::new(temp_dir.path())),
            RecommendationConfig::default(),
        );
        first.set_profile(UserProfile {
            name: "Persisted".into(),
            activity_level: ActivityLevel::Light,
            ..UserProfile::default()
        });
        first.add_meal(meal_at(Utc::now(), vec![food("A", 100.0, 5.0)]));
        drop(first);

        let second = DietLedger::open(
            Box::new(JsonSnapshotStore::new(temp_dir.path())),
            RecommendationConfig::default(),
        );
        assert_eq!(second.profile().name, "Persisted");
        assert_eq!(second.profile().activity_level, ActivityLevel::Light);
        assert_eq!(second.meals().len(), 1);
    }
}
