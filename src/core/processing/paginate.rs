use std::path::PathBuf;

use tracing::debug;

use crate::types::CardEntry;

/// Number of copies requested for one card, at most `MAX`. Parsing never fails:
/// anything that is not an integer means one copy, and counts below one mean none.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CopyCount(u32);

impl CopyCount {
    pub const MIN: u32 = 1;
    pub const MAX: u32 = 99;

    pub fn new(count: u32) -> Self {
        Self(count.min(Self::MAX))
    }

    pub fn parse(text: &str) -> Self {
        match text.trim().parse::<i64>() {
            Ok(n) => Self(n.clamp(0, Self::MAX as i64) as u32),
            Err(_) => Self(1),
        }
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

impl Default for CopyCount {
    fn default() -> Self {
        Self(1)
    }
}

impl From<&str> for CopyCount {
    fn from(text: &str) -> Self {
        Self::parse(text)
    }
}

impl std::fmt::Display for CopyCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Repeat each card's path `copies` times, keeping list order.
pub fn expand_copies(entries: &[CardEntry]) -> Vec<PathBuf> {
    let expanded: Vec<PathBuf> = entries
        .iter()
        .flat_map(|e| std::iter::repeat_n(e.path.clone(), e.copies.get() as usize))
        .collect();
    debug!(
        "Expanded {} card entries into {} copies",
        entries.len(),
        expanded.len()
    );
    expanded
}

/// Consecutive groups of at most `per_page` items; the last may be short.
pub fn paginate<T>(items: &[T], per_page: usize) -> Vec<&[T]> {
    if per_page == 0 {
        return Vec::new();
    }
    items.chunks(per_page).collect()
}

pub fn page_count(items: usize, per_page: usize) -> usize {
    if per_page == 0 {
        return 0;
    }
    items.div_ceil(per_page)
}
