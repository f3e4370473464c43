//! Editable copy of a committed setting.

/// Staged value of a setting, edited on a screen before it gets committed.
///
/// The draft is synced from the committed value when its screen is
/// entered, written back only on explicit confirmation and discarded by
/// syncing again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Draft<T> {
    staged: T,
}

impl<T: Copy + PartialEq> Draft<T> {
    pub fn new(committed: T) -> Self {
        Self { staged: committed }
    }

    pub fn get(&self) -> T {
        self.staged
    }

    pub fn sync(&mut self, committed: T) {
        self.staged = committed;
    }

    pub fn update(&mut self, update: impl FnOnce(T) -> T) {
        self.staged = update(self.staged);
    }

    /// Copy the staged value into the committed one and return it.
    pub fn commit(&self, committed: &mut T) -> T {
        *committed = self.staged;
        self.staged
    }

    pub fn is_dirty(&self, committed: T) -> bool {
        self.staged != committed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edits_stay_staged_until_commit() {
        let mut committed = 10;
        let mut draft = Draft::new(committed);
        draft.update(|v| v + 5);
        assert_eq!(draft.get(), 15);
        assert_eq!(committed, 10);
        assert!(draft.is_dirty(committed));

        assert_eq!(draft.commit(&mut committed), 15);
        assert_eq!(committed, 15);
        assert!(!draft.is_dirty(committed));
    }

    #[test]
    fn sync_discards_staged_edits() {
        let committed = false;
        let mut draft = Draft::new(committed);
        draft.update(|v| !v);
        draft.sync(committed);
        assert!(!draft.get());
    }
}
