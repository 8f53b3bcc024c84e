//! Adjacency grouping of page numbers.
//!
//! While the scanner walks the document, every plain-text number and numeric
//! link it finds is pushed here. Numbers that are adjacent in the document
//! and keep moving in the same direction end up in the same group; a break
//! in adjacency or a change of direction starts a new one.

use crate::result::PageInfo;

/// A run of adjacent page numbers that is strictly monotonic.
///
/// `delta_sign` is `1` for ascending, `-1` for descending and `0` while the
/// group holds a single item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageInfoGroup {
    pub items: Vec<PageInfo>,
    pub delta_sign: i8,
}

impl PageInfoGroup {
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// All monotonic groups collected from one document.
#[derive(Debug, Clone, Default)]
pub struct MonotonicGroups {
    pub groups: Vec<PageInfoGroup>,
    prev: Option<PageInfo>,
}

impl MonotonicGroups {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Break adjacency: following numbers go into a fresh group.
    ///
    /// Does nothing if the current group is still empty.
    pub fn start_group(&mut self) {
        if self.groups.last().is_none_or(|g| !g.is_empty()) {
            self.groups.push(PageInfoGroup::default());
            self.prev = None;
        }
    }

    /// Add a number observed in the document, keeping every group monotonic.
    pub fn add_number(&mut self, page_number: i64, url: impl Into<String>) {
        self.add_page_info(PageInfo::new(page_number, url));
    }

    /// Add a page observation, keeping every group monotonic.
    ///
    /// When the direction flips, the previous item is carried over to seed
    /// the new group, so a turning point belongs to both runs. A repeated
    /// number starts a fresh group without the carry-over.
    pub fn add_page_info(&mut self, page: PageInfo) {
        if self.groups.is_empty() {
            self.groups.push(PageInfoGroup::default());
        }

        let prev = match self.prev.take() {
            Some(prev) if self.groups.last().is_some_and(|g| !g.is_empty()) => prev,
            _ => {
                if let Some(group) = self.groups.last_mut() {
                    group.items.clear();
                    group.items.push(page.clone());
                    group.delta_sign = 0;
                }
                self.prev = Some(page);
                return;
            }
        };

        let delta_sign = match page.page_number.cmp(&prev.page_number) {
            std::cmp::Ordering::Greater => 1,
            std::cmp::Ordering::Less => -1,
            std::cmp::Ordering::Equal => 0,
        };

        let current_sign = self.groups.last().map_or(0, |g| g.delta_sign);
        if delta_sign != current_sign {
            // A group with sign 0 holds one item, so any direction extends it.
            if current_sign != 0 {
                let mut group = PageInfoGroup::default();
                if delta_sign != 0 {
                    group.items.push(prev);
                }
                self.groups.push(group);
            }
        } else if delta_sign == 0 {
            // Same number as the group's only item.
            if let Some(group) = self.groups.last_mut() {
                group.items.clear();
            }
        }

        if let Some(group) = self.groups.last_mut() {
            group.items.push(page.clone());
            group.delta_sign = delta_sign;
        }
        self.prev = Some(page);
    }

    /// Drop the trailing group if it is empty.
    pub fn clean_up(&mut self) {
        if self.groups.last().is_some_and(PageInfoGroup::is_empty) {
            self.groups.pop();
        }
    }

    /// Build groups from `(page_number, url)` pairs that are all adjacent.
    #[must_use]
    pub fn from_numbers<S: Into<String>>(numbers: impl IntoIterator<Item = (i64, S)>) -> Self {
        let mut groups = Self::new();
        groups.start_group();
        for (page_number, url) in numbers {
            groups.add_number(page_number, url);
        }
        groups.clean_up();
        groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(numbers: &[i64]) -> MonotonicGroups {
        MonotonicGroups::from_numbers(numbers.iter().map(|n| (*n, "")))
    }

    fn assert_group(groups: &MonotonicGroups, index: usize, sign: i8, expected: &[i64]) {
        let group = &groups.groups[index];
        let numbers: Vec<i64> = group.items.iter().map(|p| p.page_number).collect();
        assert_eq!(numbers, expected, "group {index}");
        assert_eq!(group.delta_sign, sign, "group {index} sign");
    }

    #[test]
    fn basic_ascending() {
        let groups = build(&[1, 2, 3]);
        assert_eq!(groups.groups.len(), 1);
        assert_group(&groups, 0, 1, &[1, 2, 3]);
    }

    #[test]
    fn basic_descending() {
        let groups = build(&[3, 2, 1]);
        assert_eq!(groups.groups.len(), 1);
        assert_group(&groups, 0, -1, &[3, 2, 1]);
    }

    #[test]
    fn single_number() {
        let groups = build(&[1]);
        assert_eq!(groups.groups.len(), 1);
        assert_group(&groups, 0, 0, &[1]);
    }

    #[test]
    fn two_same_numbers_collapse() {
        let groups = build(&[1, 1]);
        assert_eq!(groups.groups.len(), 1);
        assert_group(&groups, 0, 0, &[1]);
    }

    #[test]
    fn ascending_then_descending_shares_turning_point() {
        let groups = build(&[1, 2, 3, 2, 1]);
        assert_eq!(groups.groups.len(), 2);
        assert_group(&groups, 0, 1, &[1, 2, 3]);
        assert_group(&groups, 1, -1, &[3, 2, 1]);

        let groups = build(&[1, 2, 3, 3, 2, 1]);
        assert_eq!(groups.groups.len(), 2);
        assert_group(&groups, 0, 1, &[1, 2, 3]);
        assert_group(&groups, 1, -1, &[3, 2, 1]);
    }

    #[test]
    fn zigzag_splits_into_runs() {
        let groups = build(&[1, 3, 5, 4, 2, 1, 10, 999, 0]);
        assert_eq!(groups.groups.len(), 4);
        assert_group(&groups, 0, 1, &[1, 3, 5]);
        assert_group(&groups, 1, -1, &[5, 4, 2, 1]);
        assert_group(&groups, 2, 1, &[1, 10, 999]);
        assert_group(&groups, 3, -1, &[999, 0]);
    }

    #[test]
    fn duplicates_inside_ascending_run() {
        let groups = build(&[1, 1, 2, 3]);
        assert_eq!(groups.groups.len(), 1);
        assert_group(&groups, 0, 1, &[1, 2, 3]);

        let groups = build(&[1, 2, 2, 3]);
        assert_eq!(groups.groups.len(), 2);
        assert_group(&groups, 0, 1, &[1, 2]);
        assert_group(&groups, 1, 1, &[2, 3]);

        let groups = build(&[1, 2, 3, 3]);
        assert_eq!(groups.groups.len(), 2);
        assert_group(&groups, 0, 1, &[1, 2, 3]);
        assert_group(&groups, 1, 0, &[3]);
    }

    #[test]
    fn duplicates_inside_descending_run() {
        let groups = build(&[3, 2, 1, 1]);
        assert_eq!(groups.groups.len(), 2);
        assert_group(&groups, 0, -1, &[3, 2, 1]);
        assert_group(&groups, 1, 0, &[1]);

        let groups = build(&[3, 2, 2, 1]);
        assert_eq!(groups.groups.len(), 2);
        assert_group(&groups, 0, -1, &[3, 2]);
        assert_group(&groups, 1, -1, &[2, 1]);

        let groups = build(&[3, 3, 2, 1]);
        assert_eq!(groups.groups.len(), 1);
        assert_group(&groups, 0, -1, &[3, 2, 1]);
    }

    #[test]
    fn start_group_breaks_adjacency() {
        let mut groups = MonotonicGroups::new();
        groups.start_group();
        groups.add_number(1, "");
        groups.add_number(2, "");
        groups.start_group();
        groups.start_group();
        groups.add_number(3, "");
        groups.start_group();
        groups.clean_up();

        assert_eq!(groups.groups.len(), 2);
        assert_group(&groups, 0, 1, &[1, 2]);
        assert_group(&groups, 1, 0, &[3]);
    }

    #[test]
    fn add_without_start_creates_group() {
        let mut groups = MonotonicGroups::new();
        groups.add_number(4, "http://x/4");
        assert_eq!(groups.groups.len(), 1);
        assert_eq!(groups.groups[0].items[0].url, "http://x/4");
    }
}
