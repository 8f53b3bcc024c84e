//! Document scanning for page numbers.
//!
//! Every anchor whose text is a page number seeds a group of adjacent
//! numbers. The scanner then walks the leaves around it: backward for at
//! most one text node, forward for as long as it keeps finding numbers.
//! Anything else between two numbers breaks adjacency.

use url::Url;

use super::detect::detect_param_info;
use super::grouping::MonotonicGroups;
use crate::dom::{self, Document, NodeRef};
use crate::options::Options;
use crate::patterns::{DIGITS, LINK_NUMBER_CLEANER, SURROUNDING_DIGITS, TERMS};
use crate::result::{PageInfo, PageParamInfo};
use crate::url_utils::{create_absolute_url, page_url_string, parse_page_url};
use crate::word_count::WordCounter;

/// Collects numeric links and the plain numbers around them into monotonic
/// groups, then hands them to detection.
pub struct PageNumberFinder<'a> {
    options: &'a Options,
    word_counter: WordCounter,
    groups: MonotonicGroups,
    forward_links: usize,
}

impl<'a> PageNumberFinder<'a> {
    #[must_use]
    pub fn new(options: &'a Options, word_counter: WordCounter) -> Self {
        Self {
            options,
            word_counter,
            groups: MonotonicGroups::new(),
            forward_links: 0,
        }
    }

    /// Groups collected so far.
    #[must_use]
    pub fn groups(&self) -> &MonotonicGroups {
        &self.groups
    }

    /// Scan `doc` and detect its page parameter.
    ///
    /// `doc_url` should already be normalized; it is the base for relative
    /// links and the host every paging link must share.
    pub fn find_outlinks(&mut self, doc: &Document, doc_url: &Url) -> PageParamInfo {
        self.scan(doc, doc_url);
        detect_param_info(&self.groups, doc_url.as_str(), self.options)
    }

    /// Fill the monotonic groups from the anchors of `doc`.
    pub fn scan(&mut self, doc: &Document, doc_url: &Url) {
        let anchors = dom::anchors(doc);
        let mut idx = 0;
        while let Some(anchor) = anchors.get(idx) {
            let Some(page) = self.page_info(anchor, doc_url) else {
                idx += 1;
                continue;
            };

            self.groups.start_group();
            self.add_closest_leaves(*anchor, true, doc_url);
            self.groups.add_page_info(page);

            self.forward_links = 0;
            self.add_closest_leaves(*anchor, false, doc_url);

            // Anchors already consumed by the forward walk.
            idx += 1 + self.forward_links;
        }

        self.groups.clean_up();
    }

    /// Page observation for `anchor`, if its text is a page number and its
    /// target is a usable link.
    ///
    /// Empty and `javascript:` hrefs are kept as they are; other targets
    /// must be http(s) URLs on the document's host.
    fn page_info(&self, anchor: &NodeRef, doc_url: &Url) -> Option<PageInfo> {
        let text = dom::text_content(anchor);
        let cleaned = LINK_NUMBER_CLEANER.replace_all(text.trim(), "");
        let number = cleaned.trim().parse::<i64>().ok()?;
        if !self.options.is_page_number_candidate(number) {
            return None;
        }

        let href = create_absolute_url(&dom::href(anchor), doc_url);
        if href.is_empty() || href.starts_with("javascript:") {
            return Some(PageInfo::new(number, href));
        }

        let target = parse_page_url(&href)?;
        if target.host_str() != doc_url.host_str() || target.port() != doc_url.port() {
            return None;
        }
        Some(PageInfo::new(number, page_url_string(&target)))
    }

    /// Walk the leaves next to `start` and add the numbers found.
    ///
    /// Backward, the walk ends at the first text node or anchor. Forward, it
    /// continues through numeric text and numeric links and ends at the
    /// first leaf that is neither, starting a new group. The walk climbs
    /// out of exhausted parents but never into `<body>` or `<html>`.
    fn add_closest_leaves(&mut self, start: NodeRef<'_>, backward: bool, doc_url: &Url) {
        let mut node = start;
        let mut check_start = false;

        loop {
            let next = if check_start {
                Some(node)
            } else if backward {
                node.prev_sibling()
            } else {
                node.next_sibling()
            };

            let Some(current) = next else {
                let Some(parent) = node.parent() else {
                    return;
                };
                if dom::is_invalid_parent_wrapper(&parent) {
                    return;
                }
                node = parent;
                check_start = false;
                continue;
            };

            node = current;
            check_start = false;

            if current.is_text() {
                let text = dom::text_content(&current);
                if text.is_empty() || self.word_counter.count(&text) == 0 {
                    continue;
                }
                let added = self.add_non_link_text(&text);
                if backward || !added {
                    return;
                }
            } else if dom::is_anchor(&current) {
                if backward {
                    return;
                }
                self.forward_links += 1;
                if !self.add_link_if_valid(&current, doc_url) {
                    return;
                }
            } else {
                let child = if backward {
                    current.last_child()
                } else {
                    current.first_child()
                };
                if let Some(child) = child {
                    node = child;
                    check_start = true;
                }
            }
        }
    }

    /// Add every term of `text` that is a plain page number; any other term
    /// breaks adjacency.
    ///
    /// Returns whether at least one number was added.
    fn add_non_link_text(&mut self, text: &str) -> bool {
        if !DIGITS.is_match(text) {
            self.groups.start_group();
            return false;
        }

        let mut added = false;
        for term in TERMS.find_iter(text) {
            let number = SURROUNDING_DIGITS
                .captures(term.as_str())
                .and_then(|caps| caps.get(1))
                .and_then(|m| m.as_str().parse::<i64>().ok())
                .filter(|n| self.options.is_page_number_candidate(*n));

            match number {
                Some(number) => {
                    self.groups.add_number(number, "");
                    added = true;
                }
                None => self.groups.start_group(),
            }
        }
        added
    }

    fn add_link_if_valid(&mut self, anchor: &NodeRef, doc_url: &Url) -> bool {
        match self.page_info(anchor, doc_url) {
            Some(page) => {
                self.groups.add_page_info(page);
                true
            }
            None => {
                self.groups.start_group();
                false
            }
        }
    }
}
