// SPDX-License-Identifier: Apache-2.0

/// The structural rule a malformed input broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrKind {
    /// A key/value line appeared before any `[section]` header.
    KeyNotInSection,
    /// A `[` was not closed by `]` before a newline or the end of input.
    BrokenSectionName,
    /// A key ran into a newline or the end of input before its `=`.
    BrokenKeyName,
    /// The same `[section]` header appeared twice.
    DuplicateSection,
    /// The same key appeared twice inside one section.
    DuplicateKey,
    /// A value was cut off by the end of input while a trailing newline was required.
    UnterminatedValue,
    /// A section name, key or value was not valid UTF-8.
    InvalidUtf8,
}

impl ErrKind {
    /// Message prefix used when rendering the error.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrKind::KeyNotInSection => "key not in section",
            ErrKind::BrokenSectionName => "broken section name",
            ErrKind::BrokenKeyName => "broken key name",
            ErrKind::DuplicateSection => "duplicate section",
            ErrKind::DuplicateKey => "duplicate key in section",
            ErrKind::UnterminatedValue => "unterminated value",
            ErrKind::InvalidUtf8 => "invalid utf-8",
        }
    }
}

impl core::fmt::Display for ErrKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A grammar violation, carrying the token that was buffered when it was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    kind: ErrKind,
    token: String,
    line: usize,
}

impl SyntaxError {
    pub fn new(kind: ErrKind, token: impl Into<String>, line: usize) -> Self {
        Self {
            kind,
            token: token.into(),
            line,
        }
    }

    /// Shorthand for returning the error out of a state handler.
    pub(crate) fn fail<T, E>(
        kind: ErrKind,
        token: impl Into<String>,
        line: usize,
    ) -> Result<T, ParseError<E>> {
        Err(ParseError::Syntax(Self::new(kind, token, line)))
    }

    pub fn kind(&self) -> ErrKind {
        self.kind
    }

    /// The partial token that was being accumulated.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// 1-based line on which the violation was detected.
    pub fn line(&self) -> usize {
        self.line
    }
}

impl core::fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}: {}", self.kind, self.token)
    }
}

impl std::error::Error for SyntaxError {}

/// Errors that can occur while parsing a configuration stream.
///
/// `E` is the error type of the underlying [`Reader`](crate::Reader); it is
/// passed through untouched.
#[derive(Debug, PartialEq)]
pub enum ParseError<E = std::io::Error> {
    /// The input is not well-formed.
    Syntax(SyntaxError),
    /// The underlying reader failed.
    Reader(E),
}

impl<E> ParseError<E> {
    /// The structural error, if this is one.
    pub fn syntax(&self) -> Option<&SyntaxError> {
        match self {
            ParseError::Syntax(e) => Some(e),
            ParseError::Reader(_) => None,
        }
    }

    pub fn kind(&self) -> Option<ErrKind> {
        self.syntax().map(SyntaxError::kind)
    }
}

impl<E> From<SyntaxError> for ParseError<E> {
    fn from(err: SyntaxError) -> Self {
        ParseError::Syntax(err)
    }
}

impl<E: core::fmt::Display> core::fmt::Display for ParseError<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ParseError::Syntax(e) => write!(f, "{e}"),
            ParseError::Reader(e) => write!(f, "{e}"),
        }
    }
}

impl<E: std::error::Error + 'static> std::error::Error for ParseError<E> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::Syntax(_) => None,
            ParseError::Reader(e) => Some(e),
        }
    }
}
