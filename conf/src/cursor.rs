// SPDX-License-Identifier: Apache-2.0

use crate::config::MIN_BUFFER_SIZE;
use crate::Reader;

/// What sits at the cursor position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Lookahead {
    /// Any byte other than a line ending. A `\r` not followed by `\n` is reported here.
    Byte(u8),
    /// `\n`, or a `\r\n` pair.
    Newline,
    /// The reader has no more data.
    End,
}

/// Read window over a [`Reader`] with a one-character lookahead and a token
/// buffer.
///
/// The two ways of moving forward are kept apart: [`advance`](Self::advance)
/// consumes the next character into the token buffer, [`skip`](Self::skip)
/// consumes it without keeping it. [`peek`](Self::peek) never moves.
pub(crate) struct InputCursor<R: Reader> {
    reader: R,
    window: Box<[u8]>,
    /// Next unread byte in `window`
    pos: usize,
    /// End of valid data in `window`
    end: usize,
    /// Reader returned 0 at least once
    exhausted: bool,
    token: Vec<u8>,
    line: usize,
}

impl<R: Reader> InputCursor<R> {
    pub fn new(reader: R, window_size: usize) -> Self {
        Self {
            reader,
            window: vec![0u8; window_size.max(MIN_BUFFER_SIZE)].into_boxed_slice(),
            pos: 0,
            end: 0,
            exhausted: false,
            token: Vec::new(),
            line: 1,
        }
    }

    /// 1-based number of the line the cursor is on.
    pub fn line(&self) -> usize {
        self.line
    }

    fn available(&self) -> usize {
        self.end.saturating_sub(self.pos)
    }

    fn byte_at(&self, offset: usize) -> Option<u8> {
        let idx = self.pos.checked_add(offset)?;
        if idx < self.end {
            self.window.get(idx).copied()
        } else {
            None
        }
    }

    /// Make `wanted` bytes available past `pos`, unless the reader runs dry first.
    fn fill(&mut self, wanted: usize) -> Result<(), R::Error> {
        if self.available() >= wanted || self.exhausted {
            return Ok(());
        }

        if self.pos > 0 {
            self.window.copy_within(self.pos..self.end, 0);
            self.end = self.available();
            self.pos = 0;
        }

        while self.end < wanted && !self.exhausted {
            let Some(slot) = self.window.get_mut(self.end..) else {
                break;
            };
            let room = slot.len();
            let n = self.reader.read(slot)?;
            if n == 0 {
                log::trace!("reader exhausted");
                self.exhausted = true;
            } else {
                self.end = self.end.saturating_add(n.min(room));
            }
        }
        Ok(())
    }

    /// Inspect the next character without consuming it.
    pub fn peek(&mut self) -> Result<Lookahead, R::Error> {
        self.fill(1)?;
        match self.byte_at(0) {
            None => Ok(Lookahead::End),
            Some(b'\n') => Ok(Lookahead::Newline),
            Some(b'\r') => {
                self.fill(2)?;
                if self.byte_at(1) == Some(b'\n') {
                    Ok(Lookahead::Newline)
                } else {
                    Ok(Lookahead::Byte(b'\r'))
                }
            }
            Some(byte) => Ok(Lookahead::Byte(byte)),
        }
    }

    /// Consume the next character, whatever it is, and report it.
    fn step(&mut self) -> Result<Lookahead, R::Error> {
        let next = self.peek()?;
        let width = match next {
            Lookahead::End => 0,
            Lookahead::Byte(_) => 1,
            Lookahead::Newline if self.byte_at(0) == Some(b'\r') => 2,
            Lookahead::Newline => 1,
        };
        self.pos = self.pos.saturating_add(width);
        if next == Lookahead::Newline {
            self.line = self.line.saturating_add(1);
        }
        Ok(next)
    }

    /// Consume the next character into the token buffer.
    /// Line endings are stored as a single `\n`.
    pub fn advance(&mut self) -> Result<(), R::Error> {
        match self.step()? {
            Lookahead::Byte(byte) => self.token.push(byte),
            Lookahead::Newline => self.token.push(b'\n'),
            Lookahead::End => {}
        }
        Ok(())
    }

    /// Consume the next character and drop it.
    pub fn skip(&mut self) -> Result<(), R::Error> {
        self.step().map(|_| ())
    }

    /// Take the token buffer, leaving it empty.
    pub fn flush(&mut self) -> Vec<u8> {
        core::mem::take(&mut self.token)
    }
}
