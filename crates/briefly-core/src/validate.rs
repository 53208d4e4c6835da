//! Input length rules.
//!
//! The hard bounds are checked against the trimmed text at submit time. The
//! live counter and the soft over-limit warning look at the raw text instead,
//! so a padded input can show as over the limit while still being accepted.

use thiserror::Error;

/// Minimum trimmed length, in characters, for a submission.
pub const MIN_INPUT_CHARS: usize = 50;

/// Maximum trimmed length, in characters, for a submission.
pub const MAX_INPUT_CHARS: usize = 5000;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter some text before submitting.")]
    EmptyInput,

    #[error("Please enter at least 50 characters for a meaningful summary.")]
    TooShort,

    #[error("Please limit your text to 5000 characters or less.")]
    TooLong,
}

/// Check that `text` may be sent for summarization.
pub fn validate(text: &str) -> Result<(), ValidationError> {
    let trimmed = text.trim();
    let len = trimmed.chars().count();

    if len == 0 {
        Err(ValidationError::EmptyInput)
    } else if len < MIN_INPUT_CHARS {
        Err(ValidationError::TooShort)
    } else if len > MAX_INPUT_CHARS {
        Err(ValidationError::TooLong)
    } else {
        Ok(())
    }
}

/// Non-blocking warning raised while the user is still editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputWarning {
    /// Raw character count at the time of the edit.
    pub chars: usize,
}

impl std::fmt::Display for InputWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Character limit exceeded! You've entered {} characters. Please limit to {}.",
            self.chars, MAX_INPUT_CHARS
        )
    }
}

/// Soft check run after every edit. Uses the raw, untrimmed length.
pub fn length_warning(raw: &str) -> Option<InputWarning> {
    let chars = raw.chars().count();
    (chars > MAX_INPUT_CHARS).then_some(InputWarning { chars })
}

/// Live character counter shown next to the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharCounter {
    pub count: usize,
    pub limit: usize,
}

impl CharCounter {
    pub fn of(raw: &str) -> Self {
        Self {
            count: raw.chars().count(),
            limit: MAX_INPUT_CHARS,
        }
    }

    pub fn over_limit(&self) -> bool {
        self.count > self.limit
    }

    pub fn below_minimum(&self) -> bool {
        self.count < MIN_INPUT_CHARS
    }

    /// Whether to show the "(Min 50 required)" hint.
    pub fn needs_minimum_hint(&self) -> bool {
        self.count > 0 && self.below_minimum()
    }

    /// Raw length within bounds. Drives the "input looks invalid" markers.
    pub fn in_range(&self) -> bool {
        !self.below_minimum() && !self.over_limit()
    }
}

impl std::fmt::Display for CharCounter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{} characters", self.count, self.limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_whitespace_only_are_empty_input() {
        assert_eq!(validate(""), Err(ValidationError::EmptyInput));
        assert_eq!(validate("   \n\t  "), Err(ValidationError::EmptyInput));
    }

    #[test]
    fn short_text_is_rejected() {
        assert_eq!(validate(&"a".repeat(30)), Err(ValidationError::TooShort));
        assert_eq!(validate(&"a".repeat(49)), Err(ValidationError::TooShort));
    }

    #[test]
    fn long_text_is_rejected() {
        assert_eq!(validate(&"a".repeat(6000)), Err(ValidationError::TooLong));
        assert_eq!(validate(&"a".repeat(5001)), Err(ValidationError::TooLong));
    }

    #[test]
    fn bounds_are_inclusive() {
        assert_eq!(validate(&"a".repeat(50)), Ok(()));
        assert_eq!(validate(&"a".repeat(5000)), Ok(()));
    }

    #[test]
    fn bounds_use_trimmed_length() {
        // 40 visible characters padded past 50 raw.
        let padded = format!("{}{}{}", " ".repeat(10), "a".repeat(40), " ".repeat(10));
        assert_eq!(validate(&padded), Err(ValidationError::TooShort));

        // 5000 visible characters padded past 5000 raw.
        let padded = format!("  {}  ", "a".repeat(5000));
        assert_eq!(validate(&padded), Ok(()));
    }

    #[test]
    fn validate_iff_trimmed_length_in_range() {
        for n in [0usize, 1, 49, 50, 51, 2500, 4999, 5000, 5001, 7000] {
            let text = format!(" {} ", "x".repeat(n));
            let in_range = (MIN_INPUT_CHARS..=MAX_INPUT_CHARS).contains(&n);
            assert_eq!(validate(&text).is_ok(), in_range, "length {n}");
        }
    }

    #[test]
    fn counts_characters_not_bytes() {
        // 50 multi-byte characters are 150 bytes.
        assert_eq!(validate(&"é€".repeat(25)), Ok(()));
    }

    #[test]
    fn soft_warning_uses_raw_length() {
        assert_eq!(length_warning(&"a".repeat(5000)), None);
        let padded = format!("{}   ", "a".repeat(4999));
        assert_eq!(length_warning(&padded), Some(InputWarning { chars: 5002 }));
        assert_eq!(
            InputWarning { chars: 6000 }.to_string(),
            "Character limit exceeded! You've entered 6000 characters. Please limit to 5000."
        );
    }

    #[test]
    fn counter_flags_over_limit() {
        let counter = CharCounter::of(&"a".repeat(6000));
        assert_eq!(counter.to_string(), "6000/5000 characters");
        assert!(counter.over_limit());
        assert!(!counter.in_range());
        assert!(!counter.needs_minimum_hint());
    }

    #[test]
    fn counter_minimum_hint() {
        assert!(!CharCounter::of("").needs_minimum_hint());
        assert!(CharCounter::of("short").needs_minimum_hint());
        assert!(CharCounter::of(&"a".repeat(50)).in_range());
    }

    #[test]
    fn messages() {
        assert_eq!(
            ValidationError::EmptyInput.to_string(),
            "Please enter some text before submitting."
        );
        assert_eq!(
            ValidationError::TooLong.to_string(),
            "Please limit your text to 5000 characters or less."
        );
    }
}
