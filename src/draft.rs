//! Draft Editing
//!
//! Local editable copy of a remote resource, compared by value against the
//! last loaded or saved baseline.

use std::future::Future;

/// Editable value with a baseline and a dirty flag
#[derive(Debug, Clone, PartialEq)]
pub struct Draft<T> {
    current: T,
    baseline: T,
    dirty: bool,
}

impl<T: Clone + PartialEq> Draft<T> {
    pub fn new(value: T) -> Self {
        Self {
            current: value.clone(),
            baseline: value,
            dirty: false,
        }
    }

    /// Replace both sides with a freshly fetched value
    pub fn load(&mut self, value: T) {
        self.current = value.clone();
        self.baseline = value;
        self.dirty = false;
    }

    pub fn edit(&mut self, value: T) {
        self.current = value;
        self.dirty = self.current != self.baseline;
    }

    /// Edit in place; dirty is recomputed afterwards
    pub fn update(&mut self, f: impl FnOnce(&mut T)) {
        f(&mut self.current);
        self.dirty = self.current != self.baseline;
    }

    /// Drop local edits. Never touches the backend.
    pub fn revert(&mut self) {
        self.current = self.baseline.clone();
        self.dirty = false;
    }

    /// Record that `sent` was persisted.
    ///
    /// Edits made while the save was in flight stay dirty.
    pub fn commit(&mut self, sent: T) {
        self.baseline = sent;
        self.dirty = self.current != self.baseline;
    }

    /// Persist the current value through `persist`; state only changes on success
    pub async fn save<E, F, Fut>(&mut self, persist: F) -> Result<(), E>
    where
        F: FnOnce(T) -> Fut,
        Fut: Future<Output = Result<(), E>>,
    {
        let sent = self.current.clone();
        persist(sent.clone()).await?;
        self.commit(sent);
        Ok(())
    }

    pub fn current(&self) -> &T {
        &self.current
    }

    pub fn baseline(&self) -> &T {
        &self.baseline
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
}

impl<T: Clone + PartialEq + Default> Default for Draft<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_load_clears_dirty() {
        let mut draft = Draft::new("a".to_string());
        draft.edit("b".to_string());
        assert!(draft.is_dirty());

        draft.load("c".to_string());
        assert!(!draft.is_dirty());
        assert_eq!(draft.current(), "c");
        assert_eq!(draft.baseline(), "c");
    }

    #[test]
    fn test_edit_back_to_baseline_is_clean() {
        let mut draft = Draft::new(String::from("storage: ./storage"));
        draft.edit(String::from("storage: /data"));
        assert!(draft.is_dirty());

        // A different allocation with equal contents
        draft.edit(["storage: ", "./storage"].concat());
        assert!(!draft.is_dirty());
    }

    #[test]
    fn test_update_in_place() {
        let mut draft = Draft::new(vec![1, 2]);
        draft.update(|v| v.push(3));
        assert!(draft.is_dirty());
        draft.update(|v| {
            v.pop();
        });
        assert!(!draft.is_dirty());
    }

    #[test]
    fn test_revert_restores_baseline() {
        let mut draft = Draft::new(10u16);
        draft.edit(20);
        draft.revert();
        assert_eq!(*draft.current(), 10);
        assert!(!draft.is_dirty());
    }

    #[test]
    fn test_commit_keeps_edits_made_during_save() {
        let mut draft = Draft::new(1);
        draft.edit(2);
        let sent = *draft.current();
        draft.edit(3);
        draft.commit(sent);
        assert_eq!(*draft.baseline(), 2);
        assert!(draft.is_dirty());
    }

    #[tokio::test]
    async fn test_save_success_moves_baseline() {
        let mut draft = Draft::new("old".to_string());
        draft.edit("new".to_string());

        let result: Result<(), String> = draft.save(|_| async { Ok(()) }).await;
        assert!(result.is_ok());
        assert_eq!(draft.baseline(), "new");
        assert_eq!(draft.current(), draft.baseline());
        assert!(!draft.is_dirty());
    }

    #[tokio::test]
    async fn test_save_failure_leaves_state_unchanged() {
        let mut draft = Draft::new("old".to_string());
        draft.edit("new".to_string());
        let before = draft.clone();

        let result = draft.save(|_| async { Err("disk full".to_string()) }).await;
        assert_eq!(result, Err("disk full".to_string()));
        assert_eq!(draft, before);
    }

    #[tokio::test]
    async fn test_save_sends_current_value() {
        let mut draft = Draft::new(0u16);
        draft.edit(4873);
        let seen = Cell::new(0u16);
        let _: Result<(), ()> = draft
            .save(|v| {
                seen.set(v);
                async { Ok(()) }
            })
            .await;
        assert_eq!(seen.get(), 4873);
    }
}
