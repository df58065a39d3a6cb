//! Domain library for per-user meal storage.
//!
//! This crate holds the domain types, the repository port (trait), and the
//! in-memory adapter behind it. Records are partitioned by owning user:
//! every operation is scoped to one user's partition, and only the id
//! counter is shared across users. Keep IO concerns out of this crate;
//! persistent adapters implement [`MealRepository`] elsewhere.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Identifier assigned to a stored meal. Minted by the repository; unique
/// across all users because the counter is shared.
pub type MealId = u64;

/// Identifier of the user owning a partition of meals.
pub type UserId = u64;

/// A single meal entry owned by one user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meal {
    /// `None` until the repository assigns an id on first save.
    pub id: Option<MealId>,
    /// Owning user. `save` keeps this in step with the partition the meal
    /// is stored under.
    pub user_id: UserId,
    /// Wall-clock time the meal was eaten; no timezone attached.
    pub date_time: NaiveDateTime,
    pub description: String,
    pub calories: u32,
}

impl Meal {
    /// Create a meal in the new (unsaved) state.
    pub fn new<S: Into<String>>(
        user_id: UserId,
        date_time: NaiveDateTime,
        description: S,
        calories: u32,
    ) -> Self {
        Self {
            id: None,
            user_id,
            date_time,
            description: description.into(),
            calories,
        }
    }

    /// True while no id has been assigned yet.
    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }
}

/// Repository port for per-user meal storage.
///
/// Absence is the whole failure signal at this seam: `save` returns `None`
/// when an update targets an id that was never stored, `get` returns `None`
/// for unknown ids, and `delete` reports whether anything was removed.
/// Callers that want typed errors go through [`service::MealService`].
pub trait MealRepository: Send + Sync {
    /// Insert a new meal or overwrite an existing one.
    ///
    /// A meal without an id is always stored and returned with its minted
    /// id. A meal that carries an id is written back only when that id is
    /// already present in the user's partition; otherwise the store is left
    /// untouched and `None` comes back.
    fn save(&self, meal: Meal, user_id: UserId) -> Option<Meal>;

    /// Remove the meal with `id` from the user's partition. True iff an
    /// entry was actually removed.
    fn delete(&self, id: MealId, user_id: UserId) -> bool;

    /// Point lookup scoped to the user's partition.
    fn get(&self, id: MealId, user_id: UserId) -> Option<Meal>;

    /// All of the user's meals, most recent first. Empty when the user has
    /// no partition.
    fn get_all(&self, user_id: UserId) -> Vec<Meal>;

    /// The user's meals with `start <= date_time < end`, most recent first.
    fn get_between_half_open(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
        user_id: UserId,
    ) -> Vec<Meal>;
}

/// Failures surfaced by the service layer.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MealError {
    #[error("meal {id} not found for user {user_id}")]
    NotFound { id: MealId, user_id: UserId },
    #[error("meal already has id {0}, expected a new one")]
    AlreadySaved(MealId),
    #[error("meal has no id, expected a saved one")]
    MissingId,
}

pub mod adapters;
pub mod datetime;
pub mod seed;
pub mod service;
