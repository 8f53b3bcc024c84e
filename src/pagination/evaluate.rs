//! Candidate evaluation.
//!
//! Given the links of one monotonic group that share a page pattern, decide
//! whether they really are a pagination and, if so, build the
//! [`PageParamInfo`] describing it.

use std::collections::HashSet;

use super::pattern::PagePattern;
use crate::options::Options;
use crate::result::{LinearFormula, PageInfo, PageParamInfo, ParamType};

/// A link of a monotonic group matched against a page pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLinkInfo {
    /// Page number shown as the link text.
    pub page_number: i64,
    /// Value of the page parameter in the link URL.
    pub param_value: i64,
    /// Index of the link in the ascending group.
    pub position: usize,
}

impl PageLinkInfo {
    #[must_use]
    pub fn new(page_number: i64, param_value: i64, position: usize) -> Self {
        Self {
            page_number,
            param_value,
            position,
        }
    }
}

/// Adjacency and consecutiveness of a set of links within their group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageNumbersState {
    pub is_adjacent: bool,
    pub is_consecutive: bool,
    pub next_paging_url: String,
}

impl PageNumbersState {
    /// Inspect `links` against the `ascending` group they came from.
    ///
    /// Links are adjacent when their positions are consecutive, allowing a
    /// single one-item gap for the current page in plain text. They are
    /// consecutive when the group shows at least one run of consecutive
    /// page numbers around them.
    #[must_use]
    pub fn new(links: &[PageLinkInfo], ascending: &[PageInfo]) -> Self {
        let mut state = Self::default();
        let (Some(first), Some(last)) = (links.first(), links.last()) else {
            return state;
        };

        let mut gap: Option<usize> = None;
        let mut seen_values = HashSet::new();
        let mut prev_pos: Option<usize> = None;
        for link in links {
            if let Some(prev) = prev_pos {
                if link.position != prev + 1 {
                    // Not ascending, a gap wider than one, or a second gap.
                    if link.position != prev + 2 || gap.is_some() {
                        return state;
                    }
                    gap = Some(link.position - 1);
                }
            }

            if !seen_values.insert(link.param_value) {
                return state;
            }
            prev_pos = Some(link.position);
        }

        state.is_adjacent = true;
        let (first_pos, last_pos) = (first.position, last.position);

        if let Some(gap) = gap {
            if gap == 0 || gap + 1 >= ascending.len() {
                return state;
            }
            // "[1] [5] 6 [7] [12]" passes, "[4] 8 [16]" does not.
            let current = ascending[gap].page_number;
            if ascending[gap - 1].page_number == current - 1
                && ascending[gap + 1].page_number == current + 1
            {
                state.is_consecutive = true;
                state.next_paging_url = ascending[gap + 1].url.clone();
            }
            return state;
        }

        let n = ascending.len();
        if n < 2 {
            return state;
        }

        // "[1] [2] ..." or "1 [2] ..."
        if first_pos <= 1 && ascending[0].page_number == 1 && ascending[1].page_number == 2 {
            state.is_consecutive = true;
            return state;
        }

        // "[1] 2 [3] ..." where [1] has another pattern
        if first_pos == 2
            && ascending[2].page_number == 3
            && ascending[1].is_plain_text()
            && !ascending[0].is_plain_text()
        {
            state.is_consecutive = true;
            return state;
        }

        // "... [n-1] [n]" or "... [n-1] n"
        if last_pos + 2 >= n && ascending[n - 2].page_number + 1 == ascending[n - 1].page_number {
            state.is_consecutive = true;
            return state;
        }

        // "... [i-1] [i] [i+1] ..."
        state.is_consecutive = (first_pos + 1..last_pos)
            .any(|i| ascending[i - 1].page_number + 2 == ascending[i + 1].page_number);
        state
    }

    /// Whether the group reads as a sequence of page numbers.
    ///
    /// At most one entry may be plain text (the current page); the entry
    /// after it becomes the next page if none was found yet. Groups such as
    /// "1 2 3 4 5 32 33" are accepted on the strength of their longest run.
    pub fn is_page_number_sequence(&mut self, ascending: &[PageInfo]) -> bool {
        let Some(first) = ascending.first() else {
            return false;
        };
        if ascending.len() == 1 {
            return false;
        }
        if first.page_number != 1 && first.is_plain_text() {
            return false;
        }

        let mut has_plain = false;
        for page in ascending {
            if page.is_plain_text() {
                if has_plain {
                    return false;
                }
                has_plain = true;
            } else if has_plain && self.next_paging_url.is_empty() {
                self.next_paging_url = page.url.clone();
            }
        }

        if ascending.len() == 2 {
            return first.page_number + 1 == ascending[1].page_number;
        }

        let mut runs: Vec<(usize, usize)> = Vec::new();
        let mut run_start = 0;
        for (i, pair) in ascending.windows(2).enumerate() {
            if pair[1].page_number != pair[0].page_number + 1 {
                runs.push((run_start, i + 1));
                run_start = i + 1;
            }
        }
        runs.push((run_start, ascending.len()));

        // "1 2 3 4 5 32 33 45 46" has too many runs to be page numbers.
        if runs.len() > 2 {
            return false;
        }

        let mut longest = runs[0];
        for run in &runs[1..] {
            if run.1 - run.0 > longest.1 - longest.0 {
                longest = *run;
            }
        }
        if longest.1 - longest.0 <= 1 {
            return false;
        }

        ascending[longest.0..longest.1]
            .iter()
            .filter(|p| p.is_plain_text())
            .count()
            <= 1
    }
}

/// Fit `param_value = coefficient * page_number + delta` through the links.
///
/// The line is taken from the first two links and every link must lie on
/// it with an integral slope; a fit that overflows `i64` is rejected. `delta` must be `0` or `-coefficient`. With only two links both
/// page numbers must be small, since two points fit almost anything.
#[must_use]
pub fn linear_formula(links: &[PageLinkInfo], options: &Options) -> Option<LinearFormula> {
    if links.len() < options.min_links_for_linear_map {
        return None;
    }
    let [first, second, rest @ ..] = links else {
        return None;
    };

    if rest.is_empty() && first.page_number.max(second.page_number) > 4 {
        return None;
    }

    let dx = second.page_number.checked_sub(first.page_number)?;
    let dy = second.param_value.checked_sub(first.param_value)?;
    if dx == 0 || dy.checked_rem(dx)? != 0 {
        return None;
    }
    let coefficient = dy.checked_div(dx)?;
    if coefficient == 0 {
        return None;
    }

    let delta = first
        .param_value
        .checked_sub(coefficient.checked_mul(first.page_number)?)?;
    if delta != 0 && Some(delta) != coefficient.checked_neg() {
        return None;
    }

    let formula = LinearFormula::new(coefficient, delta);
    links
        .iter()
        .all(|link| formula.param_value(link.page_number) == Some(link.param_value))
        .then_some(formula)
}

/// Evaluate the links sharing `pattern` within the `ascending` group.
///
/// `first_page_url` is the URL of a link labelled "1" in the group, if any;
/// it lets a single link to page 2 or 3 be accepted.
#[must_use]
pub fn evaluate(
    links: &[PageLinkInfo],
    pattern: &PagePattern,
    ascending: &[PageInfo],
    first_page_url: &str,
    options: &Options,
) -> Option<PageParamInfo> {
    if links.len() >= options.min_links_for_linear_map.max(2) {
        let mut state = PageNumbersState::new(links, ascending);
        if !state.is_adjacent || !state.is_consecutive {
            return None;
        }
        if !state.is_page_number_sequence(ascending) {
            return None;
        }

        let pages = links
            .iter()
            .map(|link| PageInfo::new(link.page_number, ascending[link.position].url.clone()))
            .collect();

        return Some(PageParamInfo {
            param_type: ParamType::PageNumber,
            pattern: pattern.template().to_string(),
            pages,
            formula: linear_formula(links, options),
            next_paging_url: state.next_paging_url,
            multiple_patterns: false,
        });
    }

    // Short articles often have two or three pages with an unnumbered
    // first page; accept it when it matches the pattern.
    let [only] = links else {
        return None;
    };
    if first_page_url.is_empty() {
        return None;
    }

    let second_is_link = only.page_number == 2 && only.position == 1;
    let third_is_link = only.page_number == 3 && only.position == 2;
    if third_is_link && ascending.get(1).is_none_or(|p| p.page_number != 2) {
        return None;
    }

    let starts_at_one = ascending.first().is_some_and(|p| p.page_number == 1);
    if !starts_at_one
        || !(second_is_link || third_is_link)
        || !pattern.is_paging_url(first_page_url)
    {
        return None;
    }

    let mut delta = only.param_value.checked_sub(only.page_number)?;
    let coefficient = if delta == 0 || delta == 1 {
        1
    } else {
        delta = 0;
        only.param_value
    };

    let pages = vec![
        PageInfo::new(1, first_page_url),
        PageInfo::new(only.page_number, ascending[only.position].url.clone()),
    ];
    let next_paging_url = if third_is_link {
        pages[1].url.clone()
    } else {
        String::new()
    };

    Some(PageParamInfo {
        param_type: ParamType::PageNumber,
        pattern: pattern.template().to_string(),
        pages,
        formula: Some(LinearFormula::new(coefficient, delta)),
        next_paging_url,
        multiple_patterns: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagination::pattern::query_patterns;
    use url::Url;

    fn links(values: &[(i64, i64, usize)]) -> Vec<PageLinkInfo> {
        values
            .iter()
            .map(|(n, v, p)| PageLinkInfo::new(*n, *v, *p))
            .collect()
    }

    fn pages(values: &[(i64, &str)]) -> Vec<PageInfo> {
        values.iter().map(|(n, u)| PageInfo::new(*n, *u)).collect()
    }

    #[test]
    fn formula_recovers_unit_slope() {
        let options = Options::default();
        let formula = linear_formula(&links(&[(1, 1, 0), (2, 2, 1), (3, 3, 2)]), &options);
        assert_eq!(formula, Some(LinearFormula::new(1, 0)));

        let formula = linear_formula(&links(&[(1, 0, 0), (2, 1, 1), (3, 2, 2)]), &options);
        assert_eq!(formula, Some(LinearFormula::new(1, -1)));
    }

    #[test]
    fn formula_recovers_offsets() {
        let options = Options::default();
        // 10 items per page, first item index starts at 0
        let formula = linear_formula(&links(&[(2, 10, 1), (3, 20, 2), (4, 30, 3)]), &options);
        assert_eq!(formula, Some(LinearFormula::new(10, -10)));

        let formula = linear_formula(&links(&[(2, 20, 1), (3, 30, 2), (5, 50, 3)]), &options);
        assert_eq!(formula, Some(LinearFormula::new(10, 0)));
    }

    #[test]
    fn formula_rejects_off_line_points() {
        let options = Options::default();
        assert_eq!(
            linear_formula(&links(&[(1, 1, 0), (2, 2, 1), (3, 7, 2)]), &options),
            None
        );
        // delta neither 0 nor -coefficient
        assert_eq!(
            linear_formula(&links(&[(1, 5, 0), (2, 6, 1), (3, 7, 2)]), &options),
            None
        );
        // zero slope
        assert_eq!(linear_formula(&links(&[(1, 3, 0), (2, 3, 1)]), &options), None);
    }

    #[test]
    fn formula_rejects_fractional_slope() {
        let options = Options::default();
        assert_eq!(linear_formula(&links(&[(1, 1, 0), (3, 4, 2)]), &options), None);
        assert_eq!(
            linear_formula(&links(&[(1, 0, 0), (3, 3, 2), (4, 4, 3)]), &options),
            None
        );
    }

    #[test]
    fn formula_rejects_overflowing_values() {
        let options = Options::default();
        assert_eq!(
            linear_formula(&links(&[(2, 0, 1), (3, 9_000_000_000_000_000_000, 2)]), &options),
            None
        );
        assert_eq!(
            linear_formula(&links(&[(1, 0, 0), (2, i64::MAX, 1), (3, 0, 2)]), &options),
            None
        );
    }

    #[test]
    fn two_link_formula_needs_small_page_numbers() {
        let options = Options::default();
        assert_eq!(
            linear_formula(&links(&[(2, 2, 1), (3, 3, 2)]), &options),
            Some(LinearFormula::new(1, 0))
        );
        assert_eq!(linear_formula(&links(&[(4, 4, 1), (5, 5, 2)]), &options), None);
    }

    #[test]
    fn adjacent_links_with_current_page_gap() {
        let ascending = pages(&[(1, "a"), (2, ""), (3, "c"), (4, "d")]);
        let state = PageNumbersState::new(&links(&[(1, 1, 0), (3, 3, 2), (4, 4, 3)]), &ascending);
        assert!(state.is_adjacent);
        assert!(state.is_consecutive);
        assert_eq!(state.next_paging_url, "c");
    }

    #[test]
    fn gaps_wider_than_one_are_not_adjacent() {
        let ascending = pages(&[(3, "a"), (4, "b"), (5, ""), (6, ""), (7, "e")]);
        let state = PageNumbersState::new(&links(&[(3, 3, 0), (4, 4, 1), (7, 7, 4)]), &ascending);
        assert!(!state.is_adjacent);

        let ascending = pages(&[(3, "a"), (4, ""), (5, "c"), (6, ""), (7, "e")]);
        let state = PageNumbersState::new(&links(&[(3, 3, 0), (5, 5, 2), (7, 7, 4)]), &ascending);
        assert!(!state.is_adjacent);
    }

    #[test]
    fn duplicate_param_values_are_not_adjacent() {
        let ascending = pages(&[(1, "a"), (2, "b")]);
        let state = PageNumbersState::new(&links(&[(1, 5, 0), (2, 5, 1)]), &ascending);
        assert!(!state.is_adjacent);
    }

    #[test]
    fn gap_neighbours_must_be_consecutive() {
        let ascending = pages(&[(4, "a"), (8, ""), (16, "c")]);
        let state = PageNumbersState::new(&links(&[(4, 4, 0), (16, 16, 2)]), &ascending);
        assert!(state.is_adjacent);
        assert!(!state.is_consecutive);
    }

    #[test]
    fn consecutive_at_the_end() {
        let ascending = pages(&[(5, "a"), (9, "b"), (10, "")]);
        let state = PageNumbersState::new(&links(&[(5, 5, 0), (9, 9, 1)]), &ascending);
        assert!(state.is_consecutive);
    }

    #[test]
    fn page_number_sequence_rules() {
        let mut state = PageNumbersState::default();
        assert!(state.is_page_number_sequence(&pages(&[(1, ""), (2, "b"), (3, "c")])));
        assert_eq!(state.next_paging_url, "b");

        let mut state = PageNumbersState::default();
        assert!(!state.is_page_number_sequence(&pages(&[(2, ""), (3, "b")])));

        let mut state = PageNumbersState::default();
        assert!(!state.is_page_number_sequence(&pages(&[(1, ""), (2, ""), (3, "c")])));

        let mut state = PageNumbersState::default();
        assert!(!state.is_page_number_sequence(&pages(&[(1, "a"), (3, "c")])));
    }

    #[test]
    fn sequence_with_far_away_tail() {
        let mut state = PageNumbersState::default();
        let ascending = pages(&[(1, "a"), (2, ""), (3, "c"), (4, "d"), (5, "e"), (32, "f"), (33, "g")]);
        assert!(state.is_page_number_sequence(&ascending));

        let mut state = PageNumbersState::default();
        let ascending = pages(&[(1, "a"), (2, ""), (3, "c"), (32, "f"), (33, "g"), (45, "h"), (46, "i")]);
        assert!(!state.is_page_number_sequence(&ascending));
    }

    #[test]
    fn single_link_fallback_with_first_page() {
        let options = Options::default();
        let url = Url::parse("http://www.foo.com/a?page=2").unwrap();
        let pattern = query_patterns(&url, &options).remove(0);

        let ascending = pages(&[(1, "http://www.foo.com/a"), (2, "http://www.foo.com/a?page=2")]);
        let info = evaluate(
            &links(&[(2, 2, 1)]),
            &pattern,
            &ascending,
            "http://www.foo.com/a",
            &options,
        )
        .unwrap();

        assert_eq!(info.formula, Some(LinearFormula::new(1, 0)));
        assert_eq!(info.pages, ascending);
        assert_eq!(info.next_paging_url, "");
    }

    #[test]
    fn single_link_fallback_needs_first_page_url() {
        let options = Options::default();
        let url = Url::parse("http://www.foo.com/a?page=2").unwrap();
        let pattern = query_patterns(&url, &options).remove(0);
        let ascending = pages(&[(1, ""), (2, "http://www.foo.com/a?page=2")]);

        assert!(evaluate(&links(&[(2, 2, 1)]), &pattern, &ascending, "", &options).is_none());
    }

    #[test]
    fn single_link_to_third_page_is_next() {
        let options = Options::default();
        let url = Url::parse("http://www.foo.com/a?start=30").unwrap();
        let pattern = query_patterns(&url, &options).remove(0);
        let ascending = pages(&[
            (1, "http://www.foo.com/a"),
            (2, ""),
            (3, "http://www.foo.com/a?start=30"),
        ]);

        let info = evaluate(
            &links(&[(3, 30, 2)]),
            &pattern,
            &ascending,
            "http://www.foo.com/a",
            &options,
        )
        .unwrap();
        assert_eq!(info.formula, Some(LinearFormula::new(30, 0)));
        assert_eq!(info.next_paging_url, "http://www.foo.com/a?start=30");
    }
}
