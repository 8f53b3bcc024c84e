//! Pagination parameter detection.
//!
//! The pipeline runs in four stages:
//!
//! 1. [`scanner`] walks the document and records numeric links and the
//!    plain numbers around them.
//! 2. [`grouping`] keeps those numbers in groups that are adjacent in the
//!    document and strictly monotonic.
//! 3. [`pattern`] turns each link URL into candidate page patterns.
//! 4. [`evaluate`] and [`detect`] check the candidates of every group and
//!    keep the best one.

pub mod detect;
pub mod evaluate;
pub mod grouping;
pub mod pattern;
pub mod scanner;

pub use detect::{detect_param_info, DetectionState};
pub use evaluate::{linear_formula, PageLinkInfo, PageNumbersState};
pub use grouping::{MonotonicGroups, PageInfoGroup};
pub use pattern::{PagePattern, PathPattern, QueryPattern, PAGE_PARAM_PLACEHOLDER};
pub use scanner::PageNumberFinder;
