// SPDX-License-Identifier: Apache-2.0

//! Runtime knobs for [`Parser`](crate::Parser).

/// Size of the read window used when none is configured.
pub const DEFAULT_BUFFER_SIZE: usize = 4096;

/// Smallest usable window: a `\r\n` pair has to fit for the newline lookahead.
pub(crate) const MIN_BUFFER_SIZE: usize = 2;

/// What to do when a section header or a key shows up a second time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// Fail with `duplicate section` / `duplicate key in section`.
    #[default]
    Reject,
    /// A repeated section header replaces the earlier section with an empty
    /// one, and the last value of a repeated key wins.
    Overwrite,
}

/// Whether a value may end at end of input without a trailing newline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValueTermination {
    /// A newline or the end of input both close a value.
    #[default]
    NewlineOrEnd,
    /// Only a newline closes a value; running out of input is `unterminated value`.
    NewlineOnly,
}

/// Parser configuration.
///
/// ```
/// use conf::{DuplicatePolicy, ParserConfig};
///
/// let config = ParserConfig::new().with_duplicates(DuplicatePolicy::Overwrite);
/// assert_eq!(config.duplicates(), DuplicatePolicy::Overwrite);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    duplicates: DuplicatePolicy,
    value_termination: ValueTermination,
    buffer_size: usize,
}

impl ParserConfig {
    pub const fn new() -> Self {
        Self {
            duplicates: DuplicatePolicy::Reject,
            value_termination: ValueTermination::NewlineOrEnd,
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }

    pub const fn with_duplicates(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicates = policy;
        self
    }

    pub const fn with_value_termination(mut self, termination: ValueTermination) -> Self {
        self.value_termination = termination;
        self
    }

    /// Set the read window size. Values below 2 are raised to 2.
    pub const fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = if size < MIN_BUFFER_SIZE {
            MIN_BUFFER_SIZE
        } else {
            size
        };
        self
    }

    pub const fn duplicates(&self) -> DuplicatePolicy {
        self.duplicates
    }

    pub const fn value_termination(&self) -> ValueTermination {
        self.value_termination
    }

    pub const fn buffer_size(&self) -> usize {
        self.buffer_size
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn test_defaults_are_strict() {
        let config = ParserConfig::default();
        assert_eq!(config.duplicates(), DuplicatePolicy::Reject);
        assert_eq!(config.value_termination(), ValueTermination::NewlineOrEnd);
        assert_eq!(config.buffer_size(), DEFAULT_BUFFER_SIZE);
        assert_eq!(config, ParserConfig::new());
    }

    #[test]
    fn test_buffer_size_is_clamped() {
        assert_eq!(ParserConfig::new().with_buffer_size(0).buffer_size(), 2);
        assert_eq!(ParserConfig::new().with_buffer_size(1).buffer_size(), 2);
        assert_eq!(ParserConfig::new().with_buffer_size(3).buffer_size(), 3);
    }

    #[test]
    fn test_builder_chain() {
        let config = ParserConfig::new()
            .with_duplicates(DuplicatePolicy::Overwrite)
            .with_value_termination(ValueTermination::NewlineOnly)
            .with_buffer_size(16);
        assert_eq!(config.duplicates(), DuplicatePolicy::Overwrite);
        assert_eq!(config.value_termination(), ValueTermination::NewlineOnly);
        assert_eq!(config.buffer_size(), 16);
    }
}
