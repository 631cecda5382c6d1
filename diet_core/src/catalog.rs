//! Built-in seed catalog of food items.
//!
//! The catalog is read-only reference data: users log meals against it but
//! cannot edit it. Nutritional values are per the stated serving size.

use crate::types::{FoodCategory, FoodItem};
use once_cell::sync::Lazy;

/// Cached seed catalog - built once and reused across all operations
static SEED_FOODS: Lazy<Vec<FoodItem>> = Lazy::new(build_seed_foods_internal);

/// Get a reference to the cached seed catalog
pub fn seed_foods() -> &'static [FoodItem] {
    &SEED_FOODS
}

/// Builds the seed catalog
///
/// **Note**: For production use, prefer `seed_foods()` which returns a
/// cached reference. This function is retained for testing and custom
/// catalog creation.
pub fn build_seed_foods() -> Vec<FoodItem> {
    build_seed_foods_internal()
}

fn build_seed_foods_internal() -> Vec<FoodItem> {
    vec![
        // Proteins
        FoodItem::new("Grilled Chicken Breast", 165.0, 31.0, 0.0, 3.6, 0.0, "100g", FoodCategory::Protein),
        FoodItem::new("Salmon Fillet", 208.0, 25.4, 0.0, 12.4, 0.0, "100g", FoodCategory::Protein),
        FoodItem::new("Eggs", 155.0, 13.0, 1.0, 11.0, 0.0, "2 large", FoodCategory::Protein),
        // Vegetables
        FoodItem::new("Broccoli", 34.0, 2.8, 7.0, 0.4, 2.6, "100g", FoodCategory::Vegetables),
        FoodItem::new("Spinach", 23.0, 2.9, 3.6, 0.4, 2.2, "100g", FoodCategory::Vegetables),
        FoodItem::new("Sweet Potato", 86.0, 1.6, 20.0, 0.1, 3.0, "100g", FoodCategory::Vegetables),
        FoodItem::new("Avocado", 160.0, 2.0, 9.0, 15.0, 7.0, "100g", FoodCategory::Vegetables),
        // Fruits
        FoodItem::new("Apple", 52.0, 0.3, 14.0, 0.2, 2.4, "1 medium", FoodCategory::Fruits),
        FoodItem::new("Banana", 89.0, 1.1, 23.0, 0.3, 2.6, "1 medium", FoodCategory::Fruits),
        FoodItem::new("Blueberries", 57.0, 0.7, 14.0, 0.3, 2.4, "100g", FoodCategory::Fruits),
        // Grains
        FoodItem::new("Brown Rice", 112.0, 2.6, 23.0, 0.9, 1.8, "100g cooked", FoodCategory::Grains),
        FoodItem::new("Quinoa", 120.0, 4.4, 22.0, 1.9, 2.8, "100g cooked", FoodCategory::Grains),
        FoodItem::new("Oatmeal", 68.0, 2.4, 12.0, 1.4, 1.7, "100g cooked", FoodCategory::Grains),
        // Dairy
        FoodItem::new("Greek Yogurt", 97.0, 9.0, 6.0, 5.0, 0.0, "100g", FoodCategory::Dairy),
        FoodItem::new("Milk (2%)", 50.0, 3.3, 5.0, 2.0, 0.0, "100ml", FoodCategory::Dairy),
        // Nuts
        FoodItem::new("Almonds", 576.0, 21.0, 22.0, 49.0, 12.0, "100g", FoodCategory::Nuts),
        FoodItem::new("Walnuts", 654.0, 15.0, 14.0, 65.0, 7.0, "100g", FoodCategory::Nuts),
        // Beverages
        FoodItem::new("Green Tea", 2.0, 0.0, 0.0, 0.0, 0.0, "1 cup", FoodCategory::Beverages),
        FoodItem::new("Protein Shake", 120.0, 25.0, 3.0, 1.0, 1.0, "1 scoop", FoodCategory::Beverages),
    ]
}

/// Validate a catalog for consistency
///
/// Returns a list of validation errors, or empty Vec if valid.
pub fn validate(foods: &[FoodItem]) -> Vec<String> {
    let mut errors = Vec::new();
    let mut seen = std::collections::HashSet::new();

    for food in foods {
        if food.name.is_empty() {
            errors.push("Food item has empty name".to_string());
            continue;
        }

        if !seen.insert(food.name.to_lowercase()) {
            errors.push(format!("Duplicate food name '{}'", food.name));
        }

        for (field, value) in [
            ("calories", food.calories),
            ("protein", food.protein),
            ("carbs", food.carbs),
            ("fat", food.fat),
            ("fiber", food.fiber),
        ] {
            if value < 0.0 {
                errors.push(format!("Food '{}' has negative {}", food.name, field));
            }
        }

        if food.serving_size.is_empty() {
            errors.push(format!("Food '{}' has empty serving size", food.name));
        }
    }

    errors
}
