use chrono::{DateTime, Local, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use diet_core::*;
use std::path::PathBuf;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "dietlog")]
#[command(about = "Meal and nutrition tracking ledger", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show today's intake, progress, and recommendations (default)
    Status,

    /// Log a meal built from catalog foods
    Log {
        /// Meal slot (breakfast, lunch, dinner, snack)
        #[arg(long)]
        meal_type: String,

        /// Meal name; defaults to the slot label
        #[arg(long)]
        name: Option<String>,

        /// Timestamp override (RFC 3339); defaults to now
        #[arg(long)]
        time: Option<String>,

        /// Food name to include (repeatable)
        #[arg(long = "food", required = true)]
        foods: Vec<String>,
    },

    /// List meals for a date
    Meals {
        /// Date (YYYY-MM-DD); defaults to today
        #[arg(long)]
        date: Option<String>,
    },

    /// Delete a meal by id
    Delete {
        meal_id: String,
    },

    /// Search the food catalog
    Search {
        query: String,
    },

    /// Show or update the user profile
    Profile {
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        age: Option<u32>,

        /// Weight in kg
        #[arg(long)]
        weight: Option<f64>,

        /// Height in cm
        #[arg(long)]
        height: Option<f64>,

        /// Activity level (sedentary, light, moderate, active, very_active)
        #[arg(long)]
        activity: Option<String>,

        /// Diet goal (weight_loss, weight_gain, maintenance, muscle_gain)
        #[arg(long)]
        goal: Option<String>,

        /// Target weight in kg
        #[arg(long)]
        target_weight: Option<f64>,
    },

    /// Logging streak and average intake over a trailing window
    Stats {
        /// Window length in days
        #[arg(long, default_value_t = 7)]
        days: u32,

        /// Write per-day rows to a CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Export profile and meals as readable text
    Export {
        /// Write to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    diet_core::logging::init();

    let cli = Cli::parse();

    // Determine data directory
    let config = Config::load()?;
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());

    let store = JsonSnapshotStore::new(&data_dir);
    let mut ledger = DietLedger::open(Box::new(store), config.recommendations.clone());

    match cli.command {
        Some(Commands::Log {
            meal_type,
            name,
            time,
            foods,
        }) => cmd_log(&mut ledger, &meal_type, name, time, &foods),
        Some(Commands::Meals { date }) => cmd_meals(&ledger, date),
        Some(Commands::Delete { meal_id }) => cmd_delete(&mut ledger, &meal_id),
        Some(Commands::Search { query }) => cmd_search(&ledger, &query),
        Some(Commands::Profile {
            name,
            age,
            weight,
            height,
            activity,
            goal,
            target_weight,
        }) => cmd_profile(&mut ledger, name, age, weight, height, activity, goal, target_weight),
        Some(Commands::Stats { days, csv }) => cmd_stats(&ledger, days, csv),
        Some(Commands::Export { output }) => cmd_export(&ledger, output),
        Some(Commands::Status) | None => cmd_status(&ledger),
    }
}

fn cmd_status(ledger: &DietLedger) -> Result<()> {
    let totals = ledger.totals_today();
    let goal = daily_calorie_goal(ledger.profile());
    let progress = ledger.calorie_progress();

    println!("\n╭─────────────────────────────────────────╮");
    println!("│  TODAY");
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!(
        "  Calories: {:.0} / {:.0} kcal ({:.0}%)",
        totals.calories,
        goal,
        progress * 100.0
    );
    println!(
        "  Protein: {:.0}g   Carbs: {:.0}g   Fat: {:.0}g",
        totals.protein, totals.carbs, totals.fat
    );
    println!("  Meals logged: {}", ledger.meals_for_today().len());
    println!();
    println!("  Recommendations:");
    for recommendation in ledger.daily_recommendations() {
        println!("  → {}", recommendation);
    }
    println!();

    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn cmd_profile(
    ledger: &mut DietLedger,
    name: Option<String>,
    age: Option<u32>,
    weight: Option<f64>,
    height: Option<f64>,
    activity: Option<String>,
    goal: Option<String>,
    target_weight: Option<f64>,
) -> Result<()> {
    let has_edits = name.is_some()
        || age.is_some()
        || weight.is_some()
        || height.is_some()
        || activity.is_some()
        || goal.is_some()
        || target_weight.is_some();

    if has_edits {
        let mut profile = ledger.profile().clone();

        if let Some(name) = name {
            profile.name = name;
        }
        if let Some(age) = age {
            profile.age = age;
        }
        if let Some(weight) = weight {
            profile.weight_kg = weight;
        }
        if let Some(height) = height {
            profile.height_cm = height;
        }
        if let Some(activity) = activity {
            profile.activity_level = parse_activity(&activity)
                .ok_or_else(|| Error::Other(format!("Unknown activity level: {}", activity)))?;
        }
        if let Some(goal) = goal {
            profile.diet_goal = parse_goal(&goal)
                .ok_or_else(|| Error::Other(format!("Unknown diet goal: {}", goal)))?;
        }
        if let Some(target) = target_weight {
            profile.target_weight_kg = target;
        }

        ledger.set_profile(profile);
        println!("✓ Profile updated");
    }

    display_profile(ledger.profile());
    Ok(())
}

fn cmd_log(
    ledger: &mut DietLedger,
    meal_type: &str,
    name: Option<String>,
    time: Option<String>,
    foods: &[String],
) -> Result<()> {
    let meal_type = parse_meal_type(meal_type)
        .ok_or_else(|| Error::Other(format!("Unknown meal type: {}", meal_type)))?;

    let time = match time {
        Some(raw) => DateTime::parse_from_rfc3339(&raw)
            .map_err(|e| Error::Other(format!("Invalid --time value: {}", e)))?
            .with_timezone(&Utc),
        None => Utc::now(),
    };

    let mut items = Vec::with_capacity(foods.len());
    for food in foods {
        items.push(ledger.lookup_food(food)?.clone());
    }

    let name = name.unwrap_or_else(|| meal_type.label().to_string());
    let meal = Meal::new(name.clone(), meal_type, time, items);
    let totals = meal_totals(&meal);
    let id = meal.id;
    ledger.add_meal(meal);

    println!(
        "✓ Logged {} - {} item(s), {:.0} kcal",
        name,
        foods.len(),
        totals.calories
    );
    println!("  Id: {}", id);

    Ok(())
}

fn cmd_meals(ledger: &DietLedger, date: Option<String>) -> Result<()> {
    let date = match date {
        Some(raw) => NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
            .map_err(|e| Error::Other(format!("Invalid --date value: {}", e)))?,
        None => Local::now().date_naive(),
    };

    let meals = ledger.meals_for_date(date);
    if meals.is_empty() {
        println!("No meals logged for {}.", date);
        return Ok(());
    }

    println!("Meals for {}:", date);
    for meal in meals {
        let totals = meal_totals(meal);
        println!(
            "  {}  {} ({}) - {:.0} kcal, {} item(s)",
            meal.id,
            meal.name,
            meal.meal_type.label(),
            totals.calories,
            meal.food_items.len()
        );
    }

    Ok(())
}

fn cmd_delete(ledger: &mut DietLedger, meal_id: &str) -> Result<()> {
    let id = Uuid::parse_str(meal_id)
        .map_err(|e| Error::Other(format!("Invalid meal id: {}", e)))?;

    if ledger.delete_meal(id) {
        println!("✓ Deleted meal {}", id);
    } else {
        println!("No meal with id {} - nothing deleted.", id);
    }

    Ok(())
}

fn cmd_search(ledger: &DietLedger, query: &str) -> Result<()> {
    let hits = ledger.search_food(query);
    if hits.is_empty() {
        println!("No foods matching '{}'.", query);
        return Ok(());
    }

    for food in hits {
        println!(
            "  {} ({}) - {:.0} kcal per {}",
            food.name,
            food.category.label(),
            food.calories,
            food.serving_size
        );
    }

    Ok(())
}

fn cmd_stats(ledger: &DietLedger, days: u32, csv: Option<PathBuf>) -> Result<()> {
    let today = Local::now().date_naive();
    let streak = current_streak(ledger, today);
    let rows = daily_intake(ledger, days, today);

    println!("\n╭─────────────────────────────────────────╮");
    println!("│  LAST {} DAYS", days);
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!("  Current streak: {} day(s) of logging", streak);
    println!(
        "  Average intake: {:.0} kcal/day",
        report::average_calories(&rows)
    );
    println!(
        "  Average meals: {:.1} meals/day",
        report::average_meals(&rows)
    );

    let top = top_foods(ledger, days, today, 3);
    if !top.is_empty() {
        println!();
        println!("  Top foods:");
        for (rank, (name, count)) in top.iter().enumerate() {
            println!("  {}. {} ({}x)", rank + 1, name, count);
        }
    }

    if let Some(path) = csv {
        report::write_intake_csv(&path, &rows)?;
        println!();
        println!("✓ Wrote report to {}", path.display());
    }

    println!();
    Ok(())
}

fn cmd_export(ledger: &DietLedger, output: Option<PathBuf>) -> Result<()> {
    let text = export_text(ledger.profile(), ledger.meals(), Local::now())?;

    match output {
        Some(path) => {
            std::fs::write(&path, &text)?;
            println!("✓ Exported data to {}", path.display());
        }
        None => print!("{}", text),
    }

    Ok(())
}

fn display_profile(profile: &UserProfile) {
    let bmi_value = bmi(profile);

    println!("\n╭─────────────────────────────────────────╮");
    println!("│  PROFILE");
    println!("╰─────────────────────────────────────────╯");
    println!();
    if !profile.name.is_empty() {
        println!("  Name: {}", profile.name);
    }
    println!("  Age: {}", profile.age);
    println!("  Weight: {:.1} kg", profile.weight_kg);
    println!("  Height: {:.1} cm", profile.height_cm);
    println!(
        "  Activity: {} ({})",
        profile.activity_level.label(),
        profile.activity_level.description()
    );
    println!(
        "  Goal: {} ({})",
        profile.diet_goal.label(),
        profile.diet_goal.description()
    );
    println!("  Target weight: {:.1} kg", profile.target_weight_kg);
    println!();
    println!("  BMR: {:.0} kcal", bmr(profile));
    println!("  Daily calorie goal: {:.0} kcal", daily_calorie_goal(profile));
    println!(
        "  BMI: {:.1} ({})",
        bmi_value,
        BmiCategory::from_bmi(bmi_value).label()
    );
    println!();
}

fn parse_meal_type(s: &str) -> Option<MealType> {
    match s.to_lowercase().as_str() {
        "breakfast" => Some(MealType::Breakfast),
        "lunch" => Some(MealType::Lunch),
        "dinner" => Some(MealType::Dinner),
        "snack" => Some(MealType::Snack),
        _ => None,
    }
}

fn parse_activity(s: &str) -> Option<ActivityLevel> {
    match s.to_lowercase().as_str() {
        "sedentary" => Some(ActivityLevel::Sedentary),
        "light" => Some(ActivityLevel::Light),
        "moderate" => Some(ActivityLevel::Moderate),
        "active" => Some(ActivityLevel::Active),
        "very_active" | "veryactive" | "very-active" => Some(ActivityLevel::VeryActive),
        _ => None,
    }
}

fn parse_goal(s: &str) -> Option<DietGoal> {
    match s.to_lowercase().as_str() {
        "weight_loss" | "weightloss" | "weight-loss" => Some(DietGoal::WeightLoss),
        "weight_gain" | "weightgain" | "weight-gain" => Some(DietGoal::WeightGain),
        "maintenance" => Some(DietGoal::Maintenance),
        "muscle_gain" | "musclegain" | "muscle-gain" => Some(DietGoal::MuscleGain),
        _ => None,
    }
}
