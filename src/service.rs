//! Application service over the meal repository port.
//!
//! The port reports absence through sentinel returns; this layer is where
//! those sentinels become typed failures for callers that need them. It
//! stays generic over the repository so it can be driven against the
//! in-memory adapter in tests and against persistent adapters later.

use chrono::NaiveDate;

use crate::datetime::{at_start_of_day_or_min, at_start_of_next_day_or_max};
use crate::{Meal, MealError, MealId, MealRepository, UserId};

pub struct MealService<R: MealRepository> {
    repo: R,
}

impl<R: MealRepository> MealService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Store a meal that has not been assigned an id yet.
    pub fn create(&self, meal: Meal, user_id: UserId) -> Result<Meal, MealError> {
        if let Some(id) = meal.id {
            return Err(MealError::AlreadySaved(id));
        }
        // A meal without an id takes the insert path, which always stores
        let stored = self.repo.save(meal, user_id);
        Ok(stored.expect("insert of a new meal returns the stored meal"))
    }

    /// Overwrite an existing meal. The id must already be stored for the
    /// user; the repository's silent no-op on an unknown id surfaces here
    /// as [`MealError::NotFound`].
    pub fn update(&self, meal: Meal, user_id: UserId) -> Result<Meal, MealError> {
        let Some(id) = meal.id else {
            return Err(MealError::MissingId);
        };
        self.repo
            .save(meal, user_id)
            .ok_or(MealError::NotFound { id, user_id })
    }

    /// Remove a meal, failing when nothing was removed.
    pub fn delete(&self, id: MealId, user_id: UserId) -> Result<(), MealError> {
        if self.repo.delete(id, user_id) {
            Ok(())
        } else {
            Err(MealError::NotFound { id, user_id })
        }
    }

    /// Look up a meal, failing when the user has no such record.
    pub fn get(&self, id: MealId, user_id: UserId) -> Result<Meal, MealError> {
        self.repo
            .get(id, user_id)
            .ok_or(MealError::NotFound { id, user_id })
    }

    /// All of the user's meals, most recent first.
    pub fn get_all(&self, user_id: UserId) -> Vec<Meal> {
        self.repo.get_all(user_id)
    }

    /// Meals whose timestamp falls within the optional day range
    /// `[start_date, end_date]`. Open bounds extend to the extremes; a
    /// present end date is widened to the start of the following day so
    /// the underlying half-open filter still covers the whole end day.
    pub fn get_between(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        user_id: UserId,
    ) -> Vec<Meal> {
        self.repo.get_between_half_open(
            at_start_of_day_or_min(start_date),
            at_start_of_next_day_or_max(end_date),
            user_id,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory_repo::InMemoryMealRepo;
    use chrono::{NaiveDate, NaiveDateTime};

    fn dt(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn svc() -> MealService<InMemoryMealRepo> {
        MealService::new(InMemoryMealRepo::new())
    }

    #[test]
    fn create_assigns_id_and_get_finds_it() {
        let svc = svc();
        let created = svc.create(Meal::new(1, dt(1, 10), "Breakfast", 500), 1).unwrap();
        let id = created.id.unwrap();
        assert_eq!(svc.get(id, 1).unwrap().description, "Breakfast");
    }

    #[test]
    fn create_rejects_preassigned_ids() {
        let svc = svc();
        let mut meal = Meal::new(1, dt(1, 10), "Breakfast", 500);
        meal.id = Some(3);
        assert_eq!(
            svc.create(meal, 1).unwrap_err(),
            MealError::AlreadySaved(3)
        );
    }

    #[test]
    fn update_of_missing_record_is_not_found() {
        let svc = svc();
        let mut meal = Meal::new(1, dt(1, 10), "Breakfast", 500);
        meal.id = Some(8);
        assert_eq!(
            svc.update(meal, 1).unwrap_err(),
            MealError::NotFound { id: 8, user_id: 1 }
        );
    }

    #[test]
    fn update_without_id_is_rejected() {
        let svc = svc();
        let meal = Meal::new(1, dt(1, 10), "Breakfast", 500);
        assert_eq!(svc.update(meal, 1).unwrap_err(), MealError::MissingId);
    }

    #[test]
    fn delete_and_get_report_not_found_after_removal() {
        let svc = svc();
        let id = svc
            .create(Meal::new(1, dt(1, 10), "Breakfast", 500), 1)
            .unwrap()
            .id
            .unwrap();
        svc.delete(id, 1).unwrap();
        assert_eq!(
            svc.get(id, 1).unwrap_err(),
            MealError::NotFound { id, user_id: 1 }
        );
        assert_eq!(
            svc.delete(id, 1).unwrap_err(),
            MealError::NotFound { id, user_id: 1 }
        );
    }

    #[test]
    fn get_between_covers_the_whole_end_day() {
        let svc = svc();
        for (day, hour) in [(1, 10), (2, 0), (2, 23), (3, 0)] {
            svc.create(Meal::new(1, dt(day, hour), "Meal", 400), 1).unwrap();
        }

        let day2 = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();
        let hits = svc.get_between(Some(day2), Some(day2), 1);
        let times: Vec<_> = hits.iter().map(|m| m.date_time).collect();
        // Whole of day 2, including its own midnight, excluding day 3's
        assert_eq!(times, vec![dt(2, 23), dt(2, 0)]);
    }

    #[test]
    fn get_between_with_open_bounds_returns_everything() {
        let svc = svc();
        for day in [1, 2, 3] {
            svc.create(Meal::new(1, dt(day, 12), "Meal", 400), 1).unwrap();
        }
        assert_eq!(svc.get_between(None, None, 1).len(), 3);
        assert_eq!(svc.get_all(1).len(), 3);
    }
}
