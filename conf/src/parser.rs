// SPDX-License-Identifier: Apache-2.0

use std::collections::HashMap;

use log::{debug, trace, warn};

use crate::config::{DuplicatePolicy, ParserConfig, ValueTermination};
use crate::cursor::{InputCursor, Lookahead};
use crate::parse_error::{ErrKind, ParseError, SyntaxError};
use crate::{Document, Reader};

/// Lexer states. Each one has a handler on [`Parser`] returning the next state.
///
/// States reachable only inside a section own the open section, so keys can
/// never be stored without one.
#[derive(Debug)]
enum State {
    /// Before the first section header
    Start,
    /// Between tokens inside a section
    Mid(OpenSection),
    /// Returns to `Mid` when a section is open, `Start` otherwise
    Comment(Option<OpenSection>),
    /// Inside `[...]`, with the section being closed by the new header
    Section(Option<OpenSection>),
    /// Left of `=`
    Key(OpenSection),
    /// Right of `=`, holding the key the value belongs to
    Value(OpenSection, String),
    End(Option<OpenSection>),
}

impl State {
    fn name(&self) -> &'static str {
        match self {
            State::Start => "Start",
            State::Mid(_) => "Mid",
            State::Comment(_) => "Comment",
            State::Section(_) => "Section",
            State::Key(_) => "Key",
            State::Value(..) => "Value",
            State::End(_) => "End",
        }
    }
}

/// The section keys are currently being added to.
#[derive(Debug)]
struct OpenSection {
    name: String,
    entries: HashMap<String, String>,
}

/// Single-pass parser turning a byte stream into a [`Document`].
///
/// ```
/// use conf::{ChunkReader, Parser};
///
/// let doc = Parser::new(ChunkReader::full_slice(b"[a]\nx=1\n")).parse().unwrap();
/// assert_eq!(doc.get("a", "x"), Ok("1"));
/// ```
pub struct Parser<R: Reader> {
    cursor: InputCursor<R>,
    config: ParserConfig,
    /// Sections closed so far, not including the open one
    sections: HashMap<String, HashMap<String, String>>,
}

impl<R: Reader> Parser<R> {
    /// Create a parser with the default, strict configuration.
    pub fn new(reader: R) -> Self {
        Self::with_config(reader, ParserConfig::default())
    }

    pub fn with_config(reader: R, config: ParserConfig) -> Self {
        Self {
            cursor: InputCursor::new(reader, config.buffer_size()),
            config,
            sections: HashMap::new(),
        }
    }

    /// Run the state machine over the whole input.
    ///
    /// Either the complete document comes back, or the first error; nothing
    /// parsed before an error is returned.
    pub fn parse(mut self) -> Result<Document, ParseError<R::Error>> {
        let mut state = State::Start;
        let last = loop {
            trace!("line {}: {}", self.cursor.line(), state.name());
            state = match state {
                State::Start => self.on_start()?,
                State::Mid(section) => self.on_mid(section)?,
                State::Comment(section) => self.on_comment(section)?,
                State::Section(previous) => self.on_section(previous)?,
                State::Key(section) => self.on_key(section)?,
                State::Value(section, key) => self.on_value(section, key)?,
                State::End(last) => break last,
            };
        };

        if let Some(section) = last {
            self.close_section(section);
        }
        debug!(
            "--finished-- {} sections, {} lines",
            self.sections.len(),
            self.cursor.line()
        );
        Ok(Document::from_sections(self.sections))
    }

    fn peek(&mut self) -> Result<Lookahead, ParseError<R::Error>> {
        self.cursor.peek().map_err(ParseError::Reader)
    }

    fn advance(&mut self) -> Result<(), ParseError<R::Error>> {
        self.cursor.advance().map_err(ParseError::Reader)
    }

    fn skip(&mut self) -> Result<(), ParseError<R::Error>> {
        self.cursor.skip().map_err(ParseError::Reader)
    }

    /// Flush the buffer as a committed name or value.
    fn flush_text(&mut self) -> Result<String, ParseError<R::Error>> {
        let bytes = self.cursor.flush();
        String::from_utf8(bytes).or_else(|e| {
            let token = String::from_utf8_lossy(e.as_bytes()).into_owned();
            SyntaxError::fail(ErrKind::InvalidUtf8, token, self.cursor.line())
        })
    }

    /// Flush the buffer as error context.
    fn flush_lossy(&mut self) -> String {
        String::from_utf8_lossy(&self.cursor.flush()).into_owned()
    }

    fn fail<T>(&mut self, kind: ErrKind) -> Result<T, ParseError<R::Error>> {
        let line = self.cursor.line();
        let token = self.flush_lossy();
        debug!("{} on line {}: {:?}", kind, line, token);
        SyntaxError::fail(kind, token, line)
    }

    fn on_start(&mut self) -> Result<State, ParseError<R::Error>> {
        match self.peek()? {
            Lookahead::End => Ok(State::End(None)),
            Lookahead::Newline | Lookahead::Byte(b' ' | b'\t') => {
                self.skip()?;
                Ok(State::Start)
            }
            Lookahead::Byte(b'[') => {
                self.skip()?;
                self.cursor.flush();
                Ok(State::Section(None))
            }
            Lookahead::Byte(b'#' | b';') => {
                self.skip()?;
                Ok(State::Comment(None))
            }
            Lookahead::Byte(_) => {
                self.advance()?;
                self.fail(ErrKind::KeyNotInSection)
            }
        }
    }

    fn on_mid(&mut self, section: OpenSection) -> Result<State, ParseError<R::Error>> {
        match self.peek()? {
            Lookahead::End => Ok(State::End(Some(section))),
            Lookahead::Newline | Lookahead::Byte(b' ' | b'\t') => {
                self.skip()?;
                Ok(State::Mid(section))
            }
            Lookahead::Byte(b'[') => {
                self.skip()?;
                self.cursor.flush();
                Ok(State::Section(Some(section)))
            }
            Lookahead::Byte(b'#' | b';') => {
                self.skip()?;
                Ok(State::Comment(Some(section)))
            }
            Lookahead::Byte(_) => {
                // First key character stays in the stream for the Key state
                self.cursor.flush();
                Ok(State::Key(section))
            }
        }
    }

    fn on_comment(
        &mut self,
        section: Option<OpenSection>,
    ) -> Result<State, ParseError<R::Error>> {
        match self.peek()? {
            Lookahead::End => Ok(State::End(section)),
            Lookahead::Newline => {
                self.skip()?;
                Ok(match section {
                    Some(section) => State::Mid(section),
                    None => State::Start,
                })
            }
            Lookahead::Byte(_) => {
                self.skip()?;
                Ok(State::Comment(section))
            }
        }
    }

    fn on_section(
        &mut self,
        previous: Option<OpenSection>,
    ) -> Result<State, ParseError<R::Error>> {
        match self.peek()? {
            Lookahead::End | Lookahead::Newline => self.fail(ErrKind::BrokenSectionName),
            Lookahead::Byte(b']') => {
                let name = self.flush_text()?;
                if let Some(previous) = previous {
                    self.close_section(previous);
                }
                let section = self.open_section(name)?;
                self.skip()?;
                Ok(State::Mid(section))
            }
            Lookahead::Byte(_) => {
                self.advance()?;
                Ok(State::Section(previous))
            }
        }
    }

    fn on_key(&mut self, section: OpenSection) -> Result<State, ParseError<R::Error>> {
        match self.peek()? {
            Lookahead::End | Lookahead::Newline => self.fail(ErrKind::BrokenKeyName),
            Lookahead::Byte(b'=') => {
                let key = self.flush_text()?;
                self.check_key(&section, &key)?;
                self.skip()?;
                self.cursor.flush();
                Ok(State::Value(section, key))
            }
            Lookahead::Byte(_) => {
                self.advance()?;
                Ok(State::Key(section))
            }
        }
    }

    fn on_value(
        &mut self,
        mut section: OpenSection,
        key: String,
    ) -> Result<State, ParseError<R::Error>> {
        match self.peek()? {
            Lookahead::Newline => {
                let value = self.flush_text()?;
                self.skip()?;
                section.store(key, value);
                Ok(State::Mid(section))
            }
            Lookahead::End => {
                if self.config.value_termination() == ValueTermination::NewlineOnly {
                    return self.fail(ErrKind::UnterminatedValue);
                }
                let value = self.flush_text()?;
                section.store(key, value);
                Ok(State::End(Some(section)))
            }
            Lookahead::Byte(_) => {
                self.advance()?;
                Ok(State::Value(section, key))
            }
        }
    }

    fn close_section(&mut self, section: OpenSection) {
        let OpenSection { name, entries } = section;
        debug!("section [{}] closed with {} keys", name, entries.len());
        self.sections.insert(name, entries);
    }

    /// Start a section. Under `Overwrite` a repeated header replaces the
    /// earlier section, keys and all.
    fn open_section(&mut self, name: String) -> Result<OpenSection, ParseError<R::Error>> {
        if self.sections.remove(&name).is_some() {
            match self.config.duplicates() {
                DuplicatePolicy::Reject => {
                    return SyntaxError::fail(ErrKind::DuplicateSection, name, self.cursor.line())
                }
                DuplicatePolicy::Overwrite => {
                    warn!("section [{}] replaced on line {}", name, self.cursor.line());
                }
            }
        }
        debug!("section [{}] opened", name);
        Ok(OpenSection {
            name,
            entries: HashMap::new(),
        })
    }

    /// Reject a key that already has a value in the open section, if so configured.
    fn check_key(&self, section: &OpenSection, key: &str) -> Result<(), ParseError<R::Error>> {
        if section.entries.contains_key(key) {
            let line = self.cursor.line();
            match self.config.duplicates() {
                DuplicatePolicy::Reject => {
                    return SyntaxError::fail(ErrKind::DuplicateKey, key, line);
                }
                DuplicatePolicy::Overwrite => {
                    warn!("key {:?} in [{}] overwritten on line {}", key, section.name, line);
                }
            }
        }
        Ok(())
    }
}

impl OpenSection {
    fn store(&mut self, key: String, value: String) {
        trace!("[{}] {:?} = {:?}", self.name, key, value);
        self.entries.insert(key, value);
    }
}

/// Parse a whole stream with the default configuration.
pub fn parse<R: Reader>(reader: R) -> Result<Document, ParseError<R::Error>> {
    Parser::new(reader).parse()
}
