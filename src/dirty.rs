use crate::constants::NUM_PAGES;

/// Per-page modification classification, taken from the tag supplied
/// alongside the address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirtyClass {
    Clean,
    Write,
    Unclassified,
}

/// Tracks which pages would need a write-back when evicted. A page is
/// classified once, at its first reference, and the classification is
/// never cleared; it is read only at eviction time.
pub struct DirtyTracker {
    classes: [Option<DirtyClass>; NUM_PAGES],
}

impl DirtyTracker {
    pub fn new() -> Self {
        DirtyTracker {
            classes: [None; NUM_PAGES],
        }
    }

    /// Record the classification for `page` if this is its first reference.
    pub fn classify(&mut self, page: usize, class: DirtyClass) {
        if self.classes[page].is_none() {
            self.classes[page] = Some(class);
        }
    }

    /// Whether evicting `page` counts as a write-back. Only `Write` pages
    /// do; no bytes are ever moved back to the store.
    #[inline]
    pub fn needs_write_back(&self, page: usize) -> bool {
        self.classes[page] == Some(DirtyClass::Write)
    }

    pub fn class_of(&self, page: usize) -> DirtyClass {
        self.classes[page].unwrap_or(DirtyClass::Unclassified)
    }
}

impl Default for DirtyTracker {
    fn default() -> Self {
        Self::new()
    }
}
