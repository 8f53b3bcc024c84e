//! Page parameter detection over monotonic groups.
//!
//! Every group of at least two adjacent numbers is turned into candidate
//! page patterns; each candidate is evaluated and the best result across
//! all groups wins.

use indexmap::IndexMap;
use url::Url;

use super::evaluate::{evaluate, PageLinkInfo};
use super::grouping::{MonotonicGroups, PageInfoGroup};
use super::pattern::{path_patterns, query_patterns, PagePattern};
use crate::options::Options;
use crate::result::{PageInfo, PageParamInfo};
use crate::url_utils::{page_url_string, parse_page_url};

/// Links sharing one page pattern.
struct PageCandidate {
    pattern: PagePattern,
    links: Vec<PageLinkInfo>,
}

/// Candidates keyed by pattern template, in insertion order.
#[derive(Default)]
struct PageCandidates(IndexMap<String, PageCandidate>);

impl PageCandidates {
    fn add(&mut self, pattern: PagePattern, link: PageLinkInfo) {
        self.0
            .entry(pattern.template().to_string())
            .or_insert_with(|| PageCandidate {
                pattern,
                links: Vec::new(),
            })
            .links
            .push(link);
    }

    fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Best result found so far.
#[derive(Debug, Default)]
pub struct DetectionState {
    best: Option<PageParamInfo>,
    multiple_patterns: bool,
}

impl DetectionState {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.best.is_none()
    }

    /// Template of the current best result, if any.
    #[must_use]
    pub fn best_pattern(&self) -> Option<&str> {
        self.best.as_ref().map(|info| info.pattern.as_str())
    }

    /// Keep the better of the current best and `other`. Equally good results
    /// from different patterns set `multiple_patterns`.
    pub fn compare_and_update(&mut self, other: Self) {
        let Some(candidate) = other.best else {
            return;
        };

        match &self.best {
            None => {
                self.best = Some(candidate);
                self.multiple_patterns = other.multiple_patterns;
            }
            Some(best) => match best.compare(&candidate) {
                std::cmp::Ordering::Less => {
                    log::debug!("pattern {} replaces {}", candidate.pattern, best.pattern);
                    self.best = Some(candidate);
                    self.multiple_patterns = other.multiple_patterns;
                }
                std::cmp::Ordering::Equal => {
                    log::debug!(
                        "pattern {} ties with {}",
                        candidate.pattern,
                        best.pattern
                    );
                    self.multiple_patterns = true;
                }
                std::cmp::Ordering::Greater => {}
            },
        }
    }

    /// Evaluate one monotonic group against the document.
    ///
    /// `accepted_pattern` is skipped, since it was already evaluated from an
    /// earlier group.
    #[must_use]
    pub fn from_group(
        group: &PageInfoGroup,
        doc_url: &Url,
        normalized_doc_url: &str,
        accepted_pattern: Option<&str>,
        options: &Options,
    ) -> Self {
        let mut state = Self::default();

        let mut numbers = group.items.clone();
        if group.delta_sign < 0 {
            numbers.reverse();
        }

        let mut outlinks = numbers.iter().filter(|p| !p.is_plain_text()).count();
        if outlinks == 0 {
            return state;
        }

        // Two partial pages linking to each other: the document stands in for
        // the page shown as plain text.
        if numbers.len() == 2
            && outlinks == 1
            && numbers[0].page_number == 1
            && numbers[1].page_number == 2
        {
            let plain = if numbers[0].is_plain_text() { 0 } else { 1 };
            numbers[plain] = PageInfo::new(numbers[plain].page_number, normalized_doc_url);
            outlinks += 1;
        }

        if outlinks < 2 {
            return state;
        }

        // Links numbered 1 through 28..31 are most likely a calendar.
        let date_count = numbers.iter().fold(0, |count, page| {
            if page.page_number == count + 1 {
                count + 1
            } else {
                count
            }
        });
        if (28..=31).contains(&date_count) {
            log::debug!("rejecting calendar-like group of {date_count} days");
            return state;
        }

        let parsed: Vec<Option<Url>> = numbers
            .iter()
            .map(|page| {
                if page.is_plain_text() {
                    None
                } else {
                    parse_page_url(&page.url)
                }
            })
            .collect();

        let mut first_page_url = "";
        let mut candidates = PageCandidates::default();
        for (position, (page, url)) in numbers.iter().zip(&parsed).enumerate() {
            let Some(url) = url else {
                continue;
            };
            for pattern in query_patterns(url, options) {
                let link = PageLinkInfo::new(page.page_number, pattern.page_number(), position);
                candidates.add(pattern, link);
            }
            if page.page_number == 1 {
                first_page_url = &page.url;
            }
        }

        if candidates.is_empty() {
            for (position, (page, url)) in numbers.iter().zip(&parsed).enumerate() {
                let Some(url) = url else {
                    continue;
                };
                for pattern in path_patterns(url, options) {
                    let link =
                        PageLinkInfo::new(page.page_number, pattern.page_number(), position);
                    candidates.add(pattern, link);
                }
            }
        }

        for (template, candidate) in &candidates.0 {
            if accepted_pattern == Some(template.as_str()) {
                continue;
            }
            if candidate.links.len() > options.max_paging_docs {
                log::debug!(
                    "skipping {template}: {} paging documents",
                    candidate.links.len()
                );
                continue;
            }
            if !candidate.pattern.is_valid_for(doc_url) {
                log::debug!("skipping {template}: not valid for {doc_url}");
                continue;
            }

            let Some(mut info) = evaluate(
                &candidate.links,
                &candidate.pattern,
                &numbers,
                first_page_url,
                options,
            ) else {
                continue;
            };

            if info.can_insert_first_page(normalized_doc_url, &numbers) {
                info.insert_first_page(normalized_doc_url);
            } else if candidate.pattern.is_paging_url(normalized_doc_url) {
                // The document fits the pattern, so it can still be page 1.
                let fits_before = info.pages.first().is_some_and(|first| {
                    first.page_number == 2
                        && first.url != normalized_doc_url
                        && normalized_doc_url.len() < first.url.len()
                });
                if fits_before {
                    info.insert_first_page(normalized_doc_url);
                }
            }

            log::debug!("accepted pattern {template} with {} pages", info.pages.len());
            state.compare_and_update(Self {
                best: Some(info),
                multiple_patterns: false,
            });
        }

        state
    }

    /// Finish detection: the best result, or an undetected default.
    #[must_use]
    pub fn into_param_info(self, normalized_doc_url: &str) -> PageParamInfo {
        let Some(mut info) = self.best else {
            return PageParamInfo::default();
        };
        if self.multiple_patterns {
            log::debug!("multiple page patterns detected, keeping {}", info.pattern);
        }
        info.determine_next_paging_url(normalized_doc_url);
        info.multiple_patterns = self.multiple_patterns;
        info
    }
}

/// Detect the page parameter of the document at `doc_url` from the numbers
/// collected by the scanner.
///
/// Always returns a result; its type is [`crate::ParamType::Unset`] when no
/// pagination was found or `doc_url` is not an absolute http(s) URL.
#[must_use]
pub fn detect_param_info(
    groups: &MonotonicGroups,
    doc_url: &str,
    options: &Options,
) -> PageParamInfo {
    let Some(parsed_doc_url) = parse_page_url(doc_url) else {
        log::debug!("document URL rejected: {doc_url}");
        return PageParamInfo::default();
    };
    let normalized_doc_url = page_url_string(&parsed_doc_url);

    let mut state = DetectionState::default();
    for group in groups.groups.iter().filter(|g| g.len() >= 2) {
        let accepted = state.best_pattern().map(str::to_string);
        let group_state = DetectionState::from_group(
            group,
            &parsed_doc_url,
            &normalized_doc_url,
            accepted.as_deref(),
            options,
        );
        state.compare_and_update(group_state);
    }

    state.into_param_info(&normalized_doc_url)
}
