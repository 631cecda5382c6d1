//! Reporting over the ledger: logging streaks and daily-intake windows.
//!
//! These are read-only walks over the meal history; nothing here mutates
//! or persists. Day rows can be exported to CSV for outside analysis.

use crate::ledger::DietLedger;
use crate::nutrition::MacroTotals;
use crate::Result;
use chrono::{Duration, NaiveDate};
use std::collections::HashMap;
use std::path::Path;

/// Longest streak the walk will report before giving up
const MAX_STREAK_DAYS: u32 = 365;

/// One day's aggregated intake
#[derive(Clone, Debug)]
pub struct DayIntake {
    pub date: NaiveDate,
    pub totals: MacroTotals,
    pub meal_count: usize,
}

/// Consecutive days with at least one logged meal, ending at `today`
///
/// Walks backward day-by-day while each day has meals, capped at 365.
/// Returns 0 when `today` itself has no meals.
pub fn current_streak(ledger: &DietLedger, today: NaiveDate) -> u32 {
    let mut streak = 0;
    let mut day = today;

    while streak < MAX_STREAK_DAYS {
        if ledger.meals_for_date(day).is_empty() {
            break;
        }
        streak += 1;
        day = match day.pred_opt() {
            Some(prev) => prev,
            None => break,
        };
    }

    streak
}

/// Per-day intake rows for the trailing window ending at `end`, oldest first
pub fn daily_intake(ledger: &DietLedger, days: u32, end: NaiveDate) -> Vec<DayIntake> {
    (0..days)
        .rev()
        .map(|offset| {
            let date = end - Duration::days(i64::from(offset));
            DayIntake {
                date,
                totals: ledger.totals_for_date(date),
                meal_count: ledger.meals_for_date(date).len(),
            }
        })
        .collect()
}

/// Mean calories per day over the window; 0 for an empty window
pub fn average_calories(rows: &[DayIntake]) -> f64 {
    if rows.is_empty() {
        return 0.0;
    }
    rows.iter().map(|r| r.totals.calories).sum::<f64>() / rows.len() as f64
}

/// Mean meals per day over the window; 0 for an empty window
pub fn average_meals(rows: &[DayIntake]) -> f64 {
    if rows.is_empty() {
        return 0.0;
    }
    rows.iter().map(|r| r.meal_count).sum::<usize>() as f64 / rows.len() as f64
}

/// Most-logged food names over the trailing window ending at `end`
///
/// Counts every occurrence of a food across the window's meals and
/// returns the top `n` as (name, count), most frequent first. Ties are
/// broken by name so the ordering is deterministic.
pub fn top_foods(
    ledger: &DietLedger,
    days: u32,
    end: NaiveDate,
    n: usize,
) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();

    for offset in 0..days {
        let date = end - Duration::days(i64::from(offset));
        for meal in ledger.meals_for_date(date) {
            for food in &meal.food_items {
                *counts.entry(food.name.as_str()).or_insert(0) += 1;
            }
        }
    }

    let mut ranked: Vec<_> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ranked
        .into_iter()
        .take(n)
        .map(|(name, count)| (name.to_string(), count))
        .collect()
}

/// A row in the CSV output
#[derive(Debug, serde::Serialize)]
struct CsvRow {
    date: String,
    calories: f64,
    protein: f64,
    carbs: f64,
    fat: f64,
    meals: usize,
}

impl From<&DayIntake> for CsvRow {
    fn from(row: &DayIntake) -> Self {
        CsvRow {
            date: row.date.to_string(),
            calories: row.totals.calories,
            protein: row.totals.protein,
            carbs: row.totals.carbs,
            fat: row.totals.fat,
            meals: row.meal_count,
        }
    }
}

/// Write intake rows to a CSV file with headers
pub fn write_intake_csv(path: &Path, rows: &[DayIntake]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(CsvRow::from(row))?;
    }
    writer.flush()?;

    tracing::info!("Wrote {} intake rows to {:?}", rows.len(), path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RecommendationConfig;
    use crate::store::MemoryStore;
    use crate::types::{FoodCategory, FoodItem, Meal, MealType};
    use chrono::{DateTime, Local, TimeZone, Utc};

    fn test_ledger() -> DietLedger {
        DietLedger::open(Box::new(MemoryStore::new()), RecommendationConfig::default())
    }

    fn noon_on(date: NaiveDate) -> DateTime<Utc> {
        Local
            .from_local_datetime(&date.and_hms_opt(12, 0, 0).unwrap())
            .unwrap()
            .with_timezone(&Utc)
    }

    fn meal_on(date: NaiveDate, calories: f64) -> Meal {
        Meal::new(
            "Test Meal",
            MealType::Lunch,
            noon_on(date),
            vec![FoodItem::new(
                "Item",
                calories,
                10.0,
                20.0,
                5.0,
                1.0,
                "100g",
                FoodCategory::Protein,
            )],
        )
    }

    #[test]
    fn test_streak_zero_without_todays_meals() {
        let ledger = test_ledger();
        let today = Local::now().date_naive();
        assert_eq!(current_streak(&ledger, today), 0);
    }

    #[test]
    fn test_streak_counts_consecutive_days() {
        let mut ledger = test_ledger();
        let today = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();

        ledger.add_meal(meal_on(today, 400.0));
        ledger.add_meal(meal_on(today.pred_opt().unwrap(), 400.0));
        // Gap on 2024-06-08, then another logged day
        ledger.add_meal(meal_on(NaiveDate::from_ymd_opt(2024, 6, 7).unwrap(), 400.0));

        assert_eq!(current_streak(&ledger, today), 2);
    }

    #[test]
    fn test_streak_broken_by_empty_today() {
        let mut ledger = test_ledger();
        let today = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        ledger.add_meal(meal_on(today.pred_opt().unwrap(), 400.0));

        assert_eq!(current_streak(&ledger, today), 0);
    }

    #[test]
    fn test_daily_intake_window_oldest_first() {
        let mut ledger = test_ledger();
        let end = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();

        ledger.add_meal(meal_on(end, 500.0));
        ledger.add_meal(meal_on(end - Duration::days(2), 300.0));

        let rows = daily_intake(&ledger, 3, end);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].date, end - Duration::days(2));
        assert_eq!(rows[2].date, end);
        assert_eq!(rows[0].totals.calories, 300.0);
        assert_eq!(rows[1].meal_count, 0);
        assert_eq!(rows[2].totals.calories, 500.0);
    }

    #[test]
    fn test_averages_over_window() {
        let mut ledger = test_ledger();
        let end = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        ledger.add_meal(meal_on(end, 600.0));
        ledger.add_meal(meal_on(end.pred_opt().unwrap(), 300.0));

        let rows = daily_intake(&ledger, 3, end);
        assert!((average_calories(&rows) - 300.0).abs() < 1e-6);
        assert!((average_meals(&rows) - 2.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_averages_empty_window() {
        assert_eq!(average_calories(&[]), 0.0);
        assert_eq!(average_meals(&[]), 0.0);
    }

    #[test]
    fn test_top_foods_ranked_by_count() {
        let mut ledger = test_ledger();
        let end = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();

        let oats = FoodItem::new("Oatmeal", 68.0, 2.4, 12.0, 1.4, 1.7, "100g cooked", FoodCategory::Grains);
        let eggs = FoodItem::new("Eggs", 155.0, 13.0, 1.0, 11.0, 0.0, "2 large", FoodCategory::Protein);

        ledger.add_meal(Meal::new(
            "Breakfast",
            MealType::Breakfast,
            noon_on(end),
            vec![oats.clone(), eggs.clone()],
        ));
        ledger.add_meal(Meal::new(
            "Breakfast",
            MealType::Breakfast,
            noon_on(end.pred_opt().unwrap()),
            vec![oats.clone()],
        ));

        let top = top_foods(&ledger, 7, end, 3);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0], ("Oatmeal".to_string(), 2));
        assert_eq!(top[1], ("Eggs".to_string(), 1));
    }

    #[test]
    fn test_top_foods_respects_limit_and_window() {
        let mut ledger = test_ledger();
        let end = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();

        // Outside the 2-day window, must not be counted
        ledger.add_meal(meal_on(end - Duration::days(5), 400.0));
        assert!(top_foods(&ledger, 2, end, 3).is_empty());

        ledger.add_meal(meal_on(end, 400.0));
        let top = top_foods(&ledger, 2, end, 0);
        assert!(top.is_empty());
    }

    #[test]
    fn test_write_intake_csv() {
        let mut ledger = test_ledger();
        let end = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        ledger.add_meal(meal_on(end, 500.0));

        let temp_dir = tempfile::tempdir().unwrap();
        let csv_path = temp_dir.path().join("intake.csv");

        let rows = daily_intake(&ledger, 2, end);
        write_intake_csv(&csv_path, &rows).unwrap();

        let contents = std::fs::read_to_string(&csv_path).unwrap();
        let mut lines = contents.lines();
        assert_eq!(lines.next(), Some("date,calories,protein,carbs,fat,meals"));
        assert_eq!(contents.lines().count(), 3);
        assert!(contents.contains("2024-06-10"));
    }
}
