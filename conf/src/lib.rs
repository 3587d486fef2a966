// SPDX-License-Identifier: Apache-2.0

//! Read access to sectioned `key=value` configuration files.
//!
//! ```text
//! ; semicolon comment
//! # hash comment
//! [section]
//! key=value
//! ```
//!
//! The input is lexed in a single pass by a small state machine. Keys and
//! values are kept exactly as written (no trimming, no typing), a key must
//! follow a `[section]` header, and by default a repeated section or a
//! repeated key within a section is an error.
//!
//! ```
//! use conf::Document;
//!
//! let doc: Document = "[server]\nhost=localhost\nport=8080\n".parse().unwrap();
//! assert_eq!(doc.get("server", "port"), Ok("8080"));
//! assert!(doc.get("client", "port").is_err());
//! ```

mod chunk_reader;
pub use chunk_reader::ChunkReader;

mod config;
pub use config::{DuplicatePolicy, ParserConfig, ValueTermination, DEFAULT_BUFFER_SIZE};

mod cursor;

mod document;
pub use document::{Document, NotFound, Section, Sections};

mod parse_error;
pub use parse_error::{ErrKind, ParseError, SyntaxError};

mod parser;
pub use parser::{parse, Parser};

mod reader;
pub use reader::{IoReader, Reader};

/// Open the file at `path` and parse it with the default configuration.
///
/// Same as [`Document::open`].
pub fn open_and_parse<P: AsRef<std::path::Path>>(path: P) -> Result<Document, ParseError> {
    Document::open(path)
}
