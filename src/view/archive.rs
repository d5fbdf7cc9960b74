//! Archive view state: independent expand/collapse toggles per year

use std::collections::BTreeSet;

/// Which years of the archive are expanded.
///
/// Each year toggles independently; nothing here depends on the archive
/// contents, so a stale year key is harmless.
#[derive(Debug, Clone, Default)]
pub struct ArchiveState {
    expanded: BTreeSet<String>,
}

impl ArchiveState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from a list of expanded year keys (e.g. query parameters)
    pub fn from_years<I, S>(years: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            expanded: years.into_iter().map(Into::into).collect(),
        }
    }

    pub fn toggle_year(&mut self, year: &str) {
        if !self.expanded.remove(year) {
            self.expanded.insert(year.to_string());
        }
    }

    pub fn is_expanded(&self, year: &str) -> bool {
        self.expanded.contains(year)
    }

    /// The expanded set with one year flipped, for building toggle links
    pub fn with_toggled(&self, year: &str) -> Self {
        let mut next = self.clone();
        next.toggle_year(year);
        next
    }

    pub fn expanded_years(&self) -> impl Iterator<Item = &str> {
        self.expanded.iter().map(String::as_str)
    }
}
