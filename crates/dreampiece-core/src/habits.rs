//! Daily habit checklist.
//!
//! The list is stored as a JSON array under `habits`. Every mutation writes
//! the whole list back.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Result, ValidationError};
use crate::storage::{keys, KeyValueStore};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Habit {
    pub name: String,
    pub category: String,
    pub completed: bool,
    /// When the habit was created or last toggled.
    #[serde(rename = "date")]
    pub last_toggled_at: DateTime<Utc>,
}

impl Habit {
    pub fn new(name: impl Into<String>, category: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            completed: false,
            last_toggled_at: now,
        }
    }
}

/// Seed list used when nothing usable is stored.
pub fn default_habits(now: DateTime<Utc>) -> Vec<Habit> {
    vec![
        Habit::new("📚 Study Coding 1 hour", "Coding", now),
        Habit::new("🗣️ Speak English 15 min", "English", now),
        Habit::new("🏋️ Exercise 20 min", "Health", now),
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitStats {
    pub today_completed: usize,
    pub current_streak: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HabitTracker {
    habits: Vec<Habit>,
}

impl HabitTracker {
    /// Load the stored list, seeding defaults when it is missing, malformed
    /// or empty.
    pub fn load<K: KeyValueStore + ?Sized>(store: &K, now: DateTime<Utc>) -> Result<Self> {
        let stored = store
            .get(keys::HABITS)?
            .map(|raw| serde_json::from_str::<Vec<Habit>>(&raw));

        match stored {
            Some(Ok(habits)) if !habits.is_empty() => Ok(Self { habits }),
            other => {
                if let Some(Err(e)) = other {
                    warn!("stored habits unreadable, reseeding defaults: {e}");
                }
                let tracker = Self {
                    habits: default_habits(now),
                };
                tracker.save(store)?;
                Ok(tracker)
            }
        }
    }

    pub fn habits(&self) -> &[Habit] {
        &self.habits
    }

    pub fn len(&self) -> usize {
        self.habits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.habits.is_empty()
    }

    pub fn save<K: KeyValueStore + ?Sized>(&self, store: &K) -> Result<()> {
        store.set(keys::HABITS, &serde_json::to_string(&self.habits)?)
    }

    pub fn add<K: KeyValueStore + ?Sized>(
        &mut self,
        store: &K,
        name: &str,
        category: &str,
        now: DateTime<Utc>,
    ) -> Result<&Habit> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::Empty {
                field: "habit name".into(),
            }
            .into());
        }
        self.habits.push(Habit::new(name, category.trim(), now));
        self.save(store)?;
        Ok(&self.habits[self.habits.len() - 1])
    }

    pub fn toggle<K: KeyValueStore + ?Sized>(
        &mut self,
        store: &K,
        index: usize,
        now: DateTime<Utc>,
    ) -> Result<&Habit> {
        self.check_index(index)?;
        let habit = &mut self.habits[index];
        habit.completed = !habit.completed;
        habit.last_toggled_at = now;
        self.save(store)?;
        Ok(&self.habits[index])
    }

    pub fn delete<K: KeyValueStore + ?Sized>(&mut self, store: &K, index: usize) -> Result<Habit> {
        self.check_index(index)?;
        let removed = self.habits.remove(index);
        self.save(store)?;
        Ok(removed)
    }

    /// Mark every habit as not done.
    pub fn reset_all<K: KeyValueStore + ?Sized>(&mut self, store: &K, now: DateTime<Utc>) -> Result<()> {
        for habit in &mut self.habits {
            habit.completed = false;
            habit.last_toggled_at = now;
        }
        self.save(store)
    }

    /// Completed habits toggled on `today`, judged in `tz`.
    pub fn stats<Tz: TimeZone>(&self, today: NaiveDate, tz: &Tz) -> HabitStats {
        let today_completed = self
            .habits
            .iter()
            .filter(|h| h.completed && h.last_toggled_at.with_timezone(tz).date_naive() == today)
            .count();
        HabitStats {
            today_completed,
            current_streak: u32::from(today_completed > 0),
        }
    }

    fn check_index(&self, index: usize) -> Result<(), ValidationError> {
        if index < self.habits.len() {
            Ok(())
        } else {
            Err(ValidationError::OutOfBounds {
                collection: "habits".into(),
                index,
                len: self.habits.len(),
            })
        }
    }
}
