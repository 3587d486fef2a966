// SPDX-License-Identifier: Apache-2.0

use std::collections::hash_map;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::parse_error::ParseError;
use crate::{IoReader, Parser, ParserConfig};

/// Lookup failure: the section, or the key inside it, does not exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotFound {
    section: String,
    key: String,
}

impl NotFound {
    pub fn section(&self) -> &str {
        &self.section
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl core::fmt::Display for NotFound {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "not found: [{}] {}", self.section, self.key)
    }
}

impl std::error::Error for NotFound {}

/// A parsed configuration file: section name to key to value.
///
/// Built once by [`Parser::parse`] and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Document {
    sections: HashMap<String, HashMap<String, String>>,
    source: Option<PathBuf>,
}

impl Document {
    pub(crate) fn from_sections(sections: HashMap<String, HashMap<String, String>>) -> Self {
        Self {
            sections,
            source: None,
        }
    }

    /// Open and parse the file at `path`.
    ///
    /// Errors from opening or reading the file come back as
    /// [`ParseError::Reader`] carrying the [`std::io::Error`] unchanged.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ParseError> {
        Self::open_with_config(path, ParserConfig::default())
    }

    pub fn open_with_config<P: AsRef<Path>>(
        path: P,
        config: ParserConfig,
    ) -> Result<Self, ParseError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(ParseError::Reader)?;
        log::debug!("parsing {}", path.display());
        let mut doc = Parser::with_config(IoReader::new(file), config).parse()?;
        doc.source = Some(path.to_path_buf());
        Ok(doc)
    }

    /// Parse anything implementing [`std::io::Read`].
    pub fn from_reader<R: std::io::Read>(reader: R) -> Result<Self, ParseError> {
        Parser::new(IoReader::new(reader)).parse()
    }

    /// The value stored for `key` in `section`, exactly as written.
    pub fn get(&self, section: &str, key: &str) -> Result<&str, NotFound> {
        self.sections
            .get(section)
            .and_then(|entries| entries.get(key))
            .map(String::as_str)
            .ok_or_else(|| NotFound {
                section: section.to_owned(),
                key: key.to_owned(),
            })
    }

    /// Like [`get`](Self::get), falling back to `default` when absent.
    pub fn get_or<'a>(&'a self, section: &str, key: &str, default: &'a str) -> &'a str {
        self.get(section, key).unwrap_or(default)
    }

    /// Path the document was loaded from, if it came from [`Document::open`].
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Number of sections.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn contains_section(&self, name: &str) -> bool {
        self.sections.contains_key(name)
    }

    pub fn section(&self, name: &str) -> Option<Section<'_>> {
        self.sections
            .get_key_value(name)
            .map(|(name, entries)| Section { name, entries })
    }

    /// All sections, in no particular order.
    pub fn sections(&self) -> Sections<'_> {
        Sections {
            inner: self.sections.iter(),
        }
    }
}

impl core::str::FromStr for Document {
    type Err = ParseError<core::convert::Infallible>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parse(crate::ChunkReader::full_slice(s.as_bytes()))
    }
}

/// Read-only view of one section.
#[derive(Debug, Clone, Copy)]
pub struct Section<'a> {
    name: &'a str,
    entries: &'a HashMap<String, String>,
}

impl<'a> Section<'a> {
    pub fn name(&self) -> &'a str {
        self.name
    }

    pub fn get(&self, key: &str) -> Option<&'a str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &'a str> {
        let entries: &'a HashMap<String, String> = self.entries;
        entries.keys().map(String::as_str)
    }

    /// Key/value pairs, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a str)> {
        let entries: &'a HashMap<String, String> = self.entries;
        entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Iterator returned by [`Document::sections`].
#[derive(Debug, Clone)]
pub struct Sections<'a> {
    inner: hash_map::Iter<'a, String, HashMap<String, String>>,
}

impl<'a> Iterator for Sections<'a> {
    type Item = Section<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|(name, entries)| Section { name, entries })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Sections<'_> {}
