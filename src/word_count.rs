//! Approximate word counting.
//!
//! The scanner only needs to know whether a text node carries any words
//! (whitespace and separator-only nodes such as " | " do not), so the counts
//! are cheap approximations. CJK text has no spaces; each ideograph counts as
//! a little over half a word.

use crate::patterns::{CJK_CHARS, FAST_WORD, HANGUL_CHARS, LETTER_WORD};

/// Word counting strategy, chosen by the scripts present in a text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WordCounter {
    /// Alphabetic words, Hangul words and CJK characters.
    Full,
    /// Alphabetic and Hangul words.
    Letter,
    /// Alphabetic words only.
    #[default]
    Fast,
}

impl WordCounter {
    /// Pick the cheapest counter able to handle `text`.
    #[must_use]
    pub fn for_text(text: &str) -> Self {
        if CJK_CHARS.is_match(text) {
            Self::Full
        } else if HANGUL_CHARS.is_match(text) {
            Self::Letter
        } else {
            Self::Fast
        }
    }

    /// Count the words in `text`.
    #[must_use]
    pub fn count(self, text: &str) -> usize {
        match self {
            Self::Full => {
                let words = LETTER_WORD.find_iter(text).count();
                let cjk = CJK_CHARS.find_iter(text).count();
                // ceil(cjk * 0.55) in integer arithmetic
                words + (cjk * 55).div_ceil(100)
            }
            Self::Letter => LETTER_WORD.find_iter(text).count(),
            Self::Fast => FAST_WORD.find_iter(text).count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn separators_have_no_words() {
        let counter = WordCounter::Fast;
        assert_eq!(counter.count(" | "), 0);
        assert_eq!(counter.count(","), 0);
        assert_eq!(counter.count("   "), 0);
        assert_eq!(counter.count("1"), 1);
        assert_eq!(counter.count("Page 1 of 3"), 4);
    }

    #[test]
    fn counter_selection_follows_script() {
        assert_eq!(WordCounter::for_text("hello"), WordCounter::Fast);
        assert_eq!(WordCounter::for_text("안녕하세요"), WordCounter::Letter);
        assert_eq!(WordCounter::for_text("こんにちは"), WordCounter::Full);
    }

    #[test]
    fn cjk_characters_count_fractionally() {
        // 4 characters -> ceil(2.2) = 3
        assert_eq!(WordCounter::Full.count("日本語版"), 3);
    }
}
