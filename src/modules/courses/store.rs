//! In-memory course storage shared by every request handler.

use std::collections::BTreeMap;

use tokio::sync::RwLock;

use super::models::{seed_catalogue, Course};

/// Courses keyed by id, guarded by a single read/write lock.
#[derive(Debug, Default)]
pub struct CourseStore {
    courses: RwLock<BTreeMap<String, Course>>,
}

impl CourseStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert the fixed startup catalogue, overwriting any entries with the
    /// same ids.
    pub async fn seed(&self) -> usize {
        let mut courses = self.courses.write().await;
        let catalogue = seed_catalogue();
        let count = catalogue.len();
        for course in catalogue {
            courses.insert(course.id.clone(), course);
        }
        count
    }

    pub async fn get(&self, id: &str) -> Option<Course> {
        self.courses.read().await.get(id).cloned()
    }

    pub async fn contains(&self, id: &str) -> bool {
        self.courses.read().await.contains_key(id)
    }

    /// Insert or overwrite.
    pub async fn set(&self, id: impl Into<String>, course: Course) {
        self.courses.write().await.insert(id.into(), course);
    }

    /// Overwrite the record stored under `id` only if one exists.
    ///
    /// The check and the write happen under the same lock.
    pub async fn replace_existing(&self, id: &str, course: Course) -> bool {
        let mut courses = self.courses.write().await;
        match courses.get_mut(id) {
            Some(slot) => {
                *slot = course;
                true
            }
            None => false,
        }
    }

    /// Remove a record; returns whether one was present.
    pub async fn delete(&self, id: &str) -> bool {
        self.courses.write().await.remove(id).is_some()
    }

    /// Snapshot of every record, ordered by id.
    pub async fn all(&self) -> BTreeMap<String, Course> {
        self.courses.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.courses.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.courses.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::courses::models::Author;

    fn course(id: &str, name: &str) -> Course {
        Course::new(id, name, 10, Author::new("Someone", "https://example.com/"))
    }

    #[tokio::test]
    async fn seed_loads_five_courses() {
        let store = CourseStore::new();
        assert!(store.is_empty().await);

        assert_eq!(store.seed().await, 5);
        assert_eq!(store.len().await, 5);
        assert_eq!(store.get("1").await.unwrap().name, "ReactJs");
    }

    #[tokio::test]
    async fn set_overwrites_existing_key() {
        let store = CourseStore::new();
        store.set("7", course("7", "First")).await;
        store.set("7", course("7", "Second")).await;

        assert_eq!(store.len().await, 1);
        assert_eq!(store.get("7").await.unwrap().name, "Second");
    }

    #[tokio::test]
    async fn replace_existing_ignores_unknown_ids() {
        let store = CourseStore::new();
        store.seed().await;
        let before = store.all().await;

        assert!(!store.replace_existing("999", course("999", "Ghost")).await);
        assert_eq!(store.all().await, before);
        assert!(!store.contains("999").await);
    }

    #[tokio::test]
    async fn replace_existing_keeps_path_key() {
        let store = CourseStore::new();
        store.seed().await;

        assert!(store.replace_existing("3", course("42", "Vue3")).await);
        let stored = store.get("3").await.unwrap();
        assert_eq!(stored.name, "Vue3");
        assert_eq!(stored.id, "42");
        assert!(!store.contains("42").await);
    }

    #[tokio::test]
    async fn delete_is_a_no_op_for_missing_ids() {
        let store = CourseStore::new();
        store.seed().await;

        assert!(store.delete("2").await);
        assert!(!store.delete("2").await);
        assert_eq!(store.len().await, 4);
        assert!(store.get("2").await.is_none());
    }

    #[tokio::test]
    async fn all_returns_a_snapshot() {
        let store = CourseStore::new();
        store.seed().await;

        let snapshot = store.all().await;
        store.delete("1").await;

        assert!(snapshot.contains_key("1"));
        assert!(!store.contains("1").await);
    }
}
