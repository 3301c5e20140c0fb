use std::collections::BTreeSet;

use chrono::Utc;
use thiserror::Error;

use crate::{DayKey, Habit, HabitId, HabitPatch, NewHabit};

const DEFAULT_COLOR: &str = "#3b82f6";
const DEFAULT_ICON: &str = "check-circle";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("no habit with id {0}")]
    NotFound(HabitId),
}

/// In-memory habit collection, kept in insertion order.
///
/// One store is constructed per process (or per test) and injected into the
/// request layer. All mutation goes through the methods below, which keep
/// every name non-empty and every completed-dates set duplicate-free.
#[derive(Debug, Default)]
pub struct HabitStore {
    habits: Vec<Habit>,
}

impl HabitStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a store from previously persisted habits.
    pub fn from_habits(habits: Vec<Habit>) -> Self {
        Self { habits }
    }

    pub fn list(&self) -> &[Habit] {
        &self.habits
    }

    pub fn get(&self, id: HabitId) -> Result<&Habit, StoreError> {
        self.habits
            .iter()
            .find(|habit| habit.id == id)
            .ok_or(StoreError::NotFound(id))
    }

    pub fn create(&mut self, new: NewHabit) -> Result<Habit, StoreError> {
        let name = new.name.trim();
        if name.is_empty() {
            return Err(StoreError::Validation("name must not be empty".into()));
        }

        let habit = Habit {
            id: HabitId::random(),
            name: name.to_owned(),
            description: new.description.unwrap_or_default(),
            color: new.color.unwrap_or_else(|| DEFAULT_COLOR.to_owned()),
            icon: new.icon.unwrap_or_else(|| DEFAULT_ICON.to_owned()),
            created_at: Utc::now(),
            completed_dates: BTreeSet::new(),
        };
        self.habits.push(habit.clone());
        Ok(habit)
    }

    /// Apply a partial patch. A present `completed_dates` is a bulk replace;
    /// collecting the typed keys into the set drops any duplicates.
    pub fn update(&mut self, id: HabitId, patch: HabitPatch) -> Result<Habit, StoreError> {
        if let Some(ref name) = patch.name {
            if name.trim().is_empty() {
                return Err(StoreError::Validation("name must not be empty".into()));
            }
        }

        let habit = self.get_mut(id)?;
        if let Some(name) = patch.name {
            habit.name = name.trim().to_owned();
        }
        if let Some(description) = patch.description {
            habit.description = description;
        }
        if let Some(color) = patch.color {
            habit.color = color;
        }
        if let Some(icon) = patch.icon {
            habit.icon = icon;
        }
        if let Some(dates) = patch.completed_dates {
            habit.completed_dates = dates.into_iter().collect();
        }
        Ok(habit.clone())
    }

    /// Remove the habit and its completion state. Deleting the same id twice
    /// fails the second time.
    pub fn delete(&mut self, id: HabitId) -> Result<(), StoreError> {
        let index = self
            .habits
            .iter()
            .position(|habit| habit.id == id)
            .ok_or(StoreError::NotFound(id))?;
        self.habits.remove(index);
        Ok(())
    }

    /// Flip completion of a single day: a present key is removed, an absent
    /// key inserted. The only routine mutation path for completion state.
    pub fn toggle_completion(&mut self, id: HabitId, day: DayKey) -> Result<Habit, StoreError> {
        let habit = self.get_mut(id)?;
        if !habit.completed_dates.remove(&day) {
            habit.completed_dates.insert(day);
        }
        Ok(habit.clone())
    }

    fn get_mut(&mut self, id: HabitId) -> Result<&mut Habit, StoreError> {
        self.habits
            .iter_mut()
            .find(|habit| habit.id == id)
            .ok_or(StoreError::NotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> DayKey {
        s.parse().unwrap()
    }

    #[test]
    fn create_assigns_id_and_empty_completion_set() {
        let mut store = HabitStore::new();
        let habit = store.create(NewHabit::new("Read")).unwrap();

        assert_eq!(habit.name, "Read");
        assert!(habit.completed_dates.is_empty());
        assert_eq!(habit.color, DEFAULT_COLOR);
        assert_eq!(habit.icon, DEFAULT_ICON);
        assert_eq!(store.list().len(), 1);
    }

    #[test]
    fn create_rejects_empty_and_whitespace_names() {
        let mut store = HabitStore::new();
        assert!(matches!(
            store.create(NewHabit::new("")),
            Err(StoreError::Validation(_))
        ));
        assert!(matches!(
            store.create(NewHabit::new("   ")),
            Err(StoreError::Validation(_))
        ));
        assert!(store.list().is_empty());
    }

    #[test]
    fn list_preserves_insertion_order() {
        let mut store = HabitStore::new();
        store.create(NewHabit::new("Read")).unwrap();
        store.create(NewHabit::new("Run")).unwrap();
        store.create(NewHabit::new("Write")).unwrap();

        let names: Vec<_> = store.list().iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, ["Read", "Run", "Write"]);
    }

    #[test]
    fn toggle_is_an_involution() {
        let mut store = HabitStore::new();
        let id = store.create(NewHabit::new("Read")).unwrap().id;

        let habit = store.toggle_completion(id, day("2024-06-01")).unwrap();
        assert!(habit.completed_dates.contains(&day("2024-06-01")));

        let habit = store.toggle_completion(id, day("2024-06-01")).unwrap();
        assert!(habit.completed_dates.is_empty());
    }

    #[test]
    fn toggling_never_produces_duplicates() {
        let mut store = HabitStore::new();
        let id = store.create(NewHabit::new("Read")).unwrap().id;

        for _ in 0..5 {
            store.toggle_completion(id, day("2024-06-01")).unwrap();
        }
        let habit = store.get(id).unwrap();
        assert_eq!(habit.completed_dates.len(), 1);

        store.toggle_completion(id, day("2024-06-02")).unwrap();
        let habit = store.get(id).unwrap();
        assert_eq!(habit.completed_dates.len(), 2);
    }

    #[test]
    fn toggle_unknown_habit_fails() {
        let mut store = HabitStore::new();
        let id = {
            let mut other = HabitStore::new();
            other.create(NewHabit::new("Read")).unwrap().id
        };
        assert!(matches!(
            store.toggle_completion(id, day("2024-06-01")),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn update_applies_only_present_fields() {
        let mut store = HabitStore::new();
        let id = store.create(NewHabit::new("Read")).unwrap().id;
        store.toggle_completion(id, day("2024-06-01")).unwrap();

        let patch = HabitPatch {
            name: Some("Read more".into()),
            ..Default::default()
        };
        let habit = store.update(id, patch).unwrap();

        assert_eq!(habit.name, "Read more");
        assert_eq!(habit.color, DEFAULT_COLOR);
        assert_eq!(habit.icon, DEFAULT_ICON);
        assert!(habit.completed_dates.contains(&day("2024-06-01")));
    }

    #[test]
    fn update_rejects_empty_name_without_touching_the_record() {
        let mut store = HabitStore::new();
        let id = store.create(NewHabit::new("Read")).unwrap().id;

        let patch = HabitPatch {
            name: Some("  ".into()),
            description: Some("changed".into()),
            ..Default::default()
        };
        assert!(matches!(
            store.update(id, patch),
            Err(StoreError::Validation(_))
        ));
        assert_eq!(store.get(id).unwrap().description, "");
    }

    #[test]
    fn update_bulk_replace_deduplicates_day_keys() {
        let mut store = HabitStore::new();
        let id = store.create(NewHabit::new("Read")).unwrap().id;

        let patch = HabitPatch {
            completed_dates: Some(vec![
                day("2024-06-01"),
                day("2024-06-02"),
                day("2024-06-01"),
            ]),
            ..Default::default()
        };
        let habit = store.update(id, patch).unwrap();
        assert_eq!(habit.completed_dates.len(), 2);
    }

    #[test]
    fn update_unknown_habit_fails() {
        let mut store = HabitStore::new();
        let id = {
            let mut other = HabitStore::new();
            other.create(NewHabit::new("Read")).unwrap().id
        };
        assert!(matches!(
            store.update(id, HabitPatch::default()),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn second_delete_of_same_id_fails() {
        let mut store = HabitStore::new();
        let id = store.create(NewHabit::new("Read")).unwrap().id;

        store.delete(id).unwrap();
        assert!(matches!(store.delete(id), Err(StoreError::NotFound(_))));
        assert!(store.list().is_empty());
    }
}
