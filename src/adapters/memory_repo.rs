//! In-memory adapter for the meal repository port.
//!
//! Two-level map: the outer `DashMap` is keyed by user, each value is that
//! user's partition keyed by meal id. Both levels take fine-grained locks,
//! so concurrent access to a single user's records needs no external
//! coordination.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::NaiveDateTime;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::{debug, instrument};

use crate::datetime::is_between_half_open;
use crate::{Meal, MealId, MealRepository, UserId};

/// Concurrency-safe in-memory meal store.
///
/// Ids come from one process-wide counter shared by all users, so they are
/// unique globally even though the contract only needs uniqueness within a
/// partition. A partition is created on the owner's first save and never
/// removed, even once emptied.
pub struct InMemoryMealRepo {
    counter: AtomicU64,
    store: DashMap<UserId, DashMap<MealId, Meal>>,
}

impl InMemoryMealRepo {
    pub fn new() -> Self {
        Self {
            counter: AtomicU64::new(0),
            store: DashMap::new(),
        }
    }

    fn next_id(&self) -> MealId {
        self.counter.fetch_add(1, Ordering::Relaxed) + 1
    }

    fn get_all_filtered<F>(&self, user_id: UserId, keep: F) -> Vec<Meal>
    where
        F: Fn(&Meal) -> bool,
    {
        let Some(partition) = self.store.get(&user_id) else {
            return Vec::new();
        };
        let mut meals: Vec<Meal> = partition
            .iter()
            .filter(|entry| keep(entry.value()))
            .map(|entry| entry.value().clone())
            .collect();
        // Sort by date_time desc
        meals.sort_by(|a, b| b.date_time.cmp(&a.date_time));
        meals
    }
}

impl Default for InMemoryMealRepo {
    fn default() -> Self {
        Self::new()
    }
}

impl MealRepository for InMemoryMealRepo {
    #[instrument(skip(self, meal))]
    fn save(&self, mut meal: Meal, user_id: UserId) -> Option<Meal> {
        debug!(meal_id = ?meal.id, "saving meal");
        // Atomic get-or-create of the partition; two first saves for the
        // same user cannot race into two different inner maps.
        let partition = self.store.entry(user_id).or_default();
        meal.user_id = user_id;
        match meal.id {
            None => {
                let id = self.next_id();
                meal.id = Some(id);
                partition.insert(id, meal.clone());
                Some(meal)
            }
            // Update path: write back only while the id is present. An
            // unknown id leaves the partition untouched and reports absence.
            Some(id) => match partition.entry(id) {
                Entry::Occupied(mut slot) => {
                    slot.insert(meal.clone());
                    Some(meal)
                }
                Entry::Vacant(_) => None,
            },
        }
    }

    #[instrument(skip(self))]
    fn delete(&self, id: MealId, user_id: UserId) -> bool {
        debug!("deleting meal");
        match self.store.get(&user_id) {
            Some(partition) => partition.remove(&id).is_some(),
            None => false,
        }
    }

    #[instrument(skip(self))]
    fn get(&self, id: MealId, user_id: UserId) -> Option<Meal> {
        debug!("getting meal");
        self.store
            .get(&user_id)
            .and_then(|partition| partition.get(&id).map(|entry| entry.value().clone()))
    }

    #[instrument(skip(self))]
    fn get_all(&self, user_id: UserId) -> Vec<Meal> {
        debug!("listing meals");
        self.get_all_filtered(user_id, |_| true)
    }

    #[instrument(skip(self))]
    fn get_between_half_open(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
        user_id: UserId,
    ) -> Vec<Meal> {
        debug!("listing meals in range");
        self.get_all_filtered(user_id, |meal| {
            is_between_half_open(meal.date_time, start, end)
        })
    }
}
