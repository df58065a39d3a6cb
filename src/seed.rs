//! Fixed demo data loaded at process start.

use chrono::{NaiveDate, NaiveDateTime};

use crate::{Meal, MealRepository, UserId};

/// User that owns the demo records.
pub const DEMO_USER: UserId = 1;

fn dt(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, minute, 0))
        .expect("demo dates are literal and valid")
}

/// The demo meal set: two full days plus a midnight entry sitting exactly
/// on the day boundary.
pub fn demo_meals() -> Vec<Meal> {
    vec![
        Meal::new(DEMO_USER, dt(2020, 1, 30, 10, 0), "Breakfast", 500),
        Meal::new(DEMO_USER, dt(2020, 1, 30, 13, 0), "Lunch", 1000),
        Meal::new(DEMO_USER, dt(2020, 1, 30, 20, 0), "Dinner", 500),
        Meal::new(DEMO_USER, dt(2020, 1, 31, 0, 0), "Midnight snack", 100),
        Meal::new(DEMO_USER, dt(2020, 1, 31, 10, 0), "Breakfast", 1000),
        Meal::new(DEMO_USER, dt(2020, 1, 31, 13, 0), "Lunch", 500),
        Meal::new(DEMO_USER, dt(2020, 1, 31, 20, 0), "Dinner", 410),
    ]
}

/// Load the demo set into `repo` under [`DEMO_USER`]. Returns how many
/// records were stored.
pub fn seed_demo_data<R: MealRepository>(repo: &R) -> usize {
    demo_meals()
        .into_iter()
        .filter_map(|meal| repo.save(meal, DEMO_USER))
        .count()
}
