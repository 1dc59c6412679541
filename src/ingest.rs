//! Stream ingest: line-based stream → calls into the document/term
//! dictionary/posting-building API (§4.8).
//!
//! The grammar is intentionally tiny: one tag character per line, fields
//! separated by runs of spaces/tabs. This module owns tag parsing and the
//! stream-level validation contracts; turning a parsed document into
//! on-disk records is [`crate::build`]'s job.

use std::collections::HashMap;

use crate::error::{FerretError, Result};

pub const CURRENT_MAJOR: u32 = 1;
pub const CURRENT_MINOR: u32 = 0;

#[derive(Debug, Clone, PartialEq)]
pub enum Tag {
    Version { major: u32, minor: u32 },
    IndexName { name: String, description: Option<String> },
    Language { lang: String, tokenizer: Option<String> },
    Field { name: String, field_id: u32, field_type: String, opts: Vec<String>, description: Option<String> },
    UnfieldedSearch { field_names: Vec<String> },
    Term { term: String, term_pos: Option<u32>, field_id: u32 },
    Date { date: String, time: Option<String> },
    Title(String),
    Item { name: String, mime: String, length: u64, file_path: Option<String>, start: Option<i64>, end: Option<i64>, url: Option<String> },
    Key(String),
    Rank(u32),
    TermCount(u32),
    Message(String),
    DocumentEnd,
    StreamEnd,
}

fn split_fields(rest: &str) -> Vec<&str> {
    rest.split_whitespace().collect()
}

fn parse_tag(line: &str) -> Result<Tag> {
    let line = line.trim_end_matches(['\r', '\n']);
    let mut chars = line.chars();
    let tag_char = chars.next().ok_or_else(|| FerretError::InvalidTag(line.to_string()))?;
    let rest = chars.as_str().trim_start();

    match tag_char {
        'V' => {
            let parts = split_fields(rest);
            let (major, minor) = match parts.as_slice() {
                [maj, min] => (
                    maj.parse().map_err(|_| FerretError::InvalidTag(line.to_string()))?,
                    min.parse().map_err(|_| FerretError::InvalidTag(line.to_string()))?,
                ),
                _ => return Err(FerretError::InvalidTag(line.to_string())),
            };
            Ok(Tag::Version { major, minor })
        }
        'N' => {
            let mut parts = rest.splitn(2, char::is_whitespace);
            let name = parts.next().unwrap_or_default().to_string();
            if name.is_empty() {
                return Err(FerretError::InvalidTag(line.to_string()));
            }
            let description = parts.next().map(|s| s.trim().to_string()).filter(|s| !s.is_empty());
            Ok(Tag::IndexName { name, description })
        }
        'L' => {
            let parts = split_fields(rest);
            match parts.as_slice() {
                [lang, tokenizer] => Ok(Tag::Language {
                    lang: lang.to_string(),
                    tokenizer: Some(tokenizer.to_string()),
                }),
                [lang] => Ok(Tag::Language {
                    lang: lang.to_string(),
                    tokenizer: None,
                }),
                _ => Err(FerretError::InvalidTag(line.to_string())),
            }
        }
        'F' => {
            let parts = split_fields(rest);
            if parts.len() < 3 {
                return Err(FerretError::InvalidTag(line.to_string()));
            }
            let name = parts[0].to_string();
            let field_id: u32 = parts[1].parse().map_err(|_| FerretError::InvalidTag(line.to_string()))?;
            let field_type = parts[2].to_string();
            let opts: Vec<String> = parts.get(3).map(|s| s.split(',').map(str::to_string).collect()).unwrap_or_default();
            let description = if parts.len() > 4 {
                Some(parts[4..].join(" "))
            } else {
                None
            };
            Ok(Tag::Field { name, field_id, field_type, opts, description })
        }
        'S' => {
            let field_names = rest.split(',').map(|s| s.trim().to_string()).filter(|s| !s.is_empty()).collect();
            Ok(Tag::UnfieldedSearch { field_names })
        }
        'T' => {
            let parts = split_fields(rest);
            match parts.as_slice() {
                [term, pos, field_id] => Ok(Tag::Term {
                    term: term.to_string(),
                    term_pos: Some(pos.parse().map_err(|_| FerretError::InvalidDocumentTermTag(line.to_string()))?),
                    field_id: field_id.parse().map_err(|_| FerretError::InvalidDocumentTermTag(line.to_string()))?,
                }),
                [term, field_id] => Ok(Tag::Term {
                    term: term.to_string(),
                    term_pos: None,
                    field_id: field_id.parse().map_err(|_| FerretError::InvalidDocumentTermTag(line.to_string()))?,
                }),
                _ => Err(FerretError::InvalidDocumentTermTag(line.to_string())),
            }
        }
        'D' => {
            let parts = split_fields(rest);
            match parts.as_slice() {
                [date, time] => Ok(Tag::Date { date: date.to_string(), time: Some(time.to_string()) }),
                [date] => Ok(Tag::Date { date: date.to_string(), time: None }),
                _ => Err(FerretError::InvalidTag(line.to_string())),
            }
        }
        'H' => Ok(Tag::Title(rest.to_string())),
        'I' => {
            let parts = split_fields(rest);
            if parts.len() < 3 {
                return Err(FerretError::InvalidDocumentItemTag(line.to_string()));
            }
            let name = parts[0].to_string();
            let mime = parts[1].to_string();
            let length: u64 = parts[2].parse().map_err(|_| FerretError::InvalidDocumentItemTag(line.to_string()))?;
            let file_path = parts.get(3).map(|s| s.to_string());
            let start = parts.get(4).and_then(|s| s.parse().ok());
            let end = parts.get(5).and_then(|s| s.parse().ok());
            let url = parts.get(6).map(|s| s.to_string());
            Ok(Tag::Item { name, mime, length, file_path, start, end, url })
        }
        'K' => {
            if rest.is_empty() {
                return Err(FerretError::InvalidTag(line.to_string()));
            }
            Ok(Tag::Key(rest.to_string()))
        }
        'R' => Ok(Tag::Rank(rest.parse().map_err(|_| FerretError::InvalidTag(line.to_string()))?)),
        'C' => Ok(Tag::TermCount(rest.parse().map_err(|_| FerretError::InvalidTag(line.to_string()))?)),
        'M' => Ok(Tag::Message(rest.to_string())),
        'E' => Ok(Tag::DocumentEnd),
        'Z' => Ok(Tag::StreamEnd),
        _ => Err(FerretError::InvalidTag(line.to_string())),
    }
}

#[derive(Debug, Default)]
struct FieldDef {
    field_id: u32,
}

/// One fully-parsed document, handed off to the indexer.
#[derive(Debug, Default, Clone)]
pub struct ParsedDocument {
    pub key: Option<String>,
    pub title: Option<String>,
    pub rank: u32,
    pub term_count: u32,
    pub terms: Vec<(String, u32, u32)>, // (term, term_pos, field_id)
}

/// Streaming validator + accumulator for the ingest grammar.
pub struct IngestParser {
    version_seen: bool,
    fields: HashMap<String, FieldDef>,
    next_field_id: u32,
    unfielded_names_declared: bool,
    in_document: bool,
    last_term_pos: u32,
    current: ParsedDocument,
    pub documents: Vec<ParsedDocument>,
    pub finished: bool,
}

impl IngestParser {
    pub fn new() -> Self {
        Self {
            version_seen: false,
            fields: HashMap::new(),
            next_field_id: 1,
            unfielded_names_declared: false,
            in_document: false,
            last_term_pos: 0,
            current: ParsedDocument::default(),
            documents: Vec::new(),
            finished: false,
        }
    }

    /// Feed one line of the stream. Errors abort the build per §4.8,
    /// except malformed tags under a warn-and-skip policy, which callers
    /// may choose not to propagate.
    pub fn feed_line(&mut self, line: &str) -> Result<()> {
        if line.trim().is_empty() {
            return Ok(());
        }
        let tag = parse_tag(line)?;
        self.apply(tag, line)
    }

    fn apply(&mut self, tag: Tag, raw_line: &str) -> Result<()> {
        match tag {
            Tag::Version { major, minor } => {
                if major > CURRENT_MAJOR || (major == CURRENT_MAJOR && minor > CURRENT_MINOR) {
                    return Err(FerretError::InvalidVersion { major, minor });
                }
                if major < CURRENT_MAJOR {
                    eprintln!("ferret: ingest stream uses older major version {major}.{minor}, proceeding");
                }
                self.version_seen = true;
                Ok(())
            }
            Tag::Field { name, field_id, .. } => {
                let expected = self.next_field_id;
                if field_id != expected {
                    return Err(FerretError::InvalidTag(format!(
                        "field ids must be contiguous from 1: expected {expected}, got {field_id} ({raw_line})"
                    )));
                }
                self.fields.insert(name, FieldDef { field_id });
                self.next_field_id += 1;
                Ok(())
            }
            Tag::UnfieldedSearch { field_names } => {
                for name in &field_names {
                    if !self.fields.contains_key(name) {
                        return Err(FerretError::InvalidTag(format!(
                            "unfielded-search field '{name}' was never declared via F"
                        )));
                    }
                }
                self.unfielded_names_declared = true;
                Ok(())
            }
            Tag::Term { term, term_pos, field_id } => {
                if !self.in_document {
                    return Err(FerretError::InvalidDocumentTermTag(raw_line.to_string()));
                }
                let pos = term_pos.unwrap_or(0);
                if pos != 0 {
                    if pos < self.last_term_pos {
                        return Err(FerretError::InvalidDocumentTermTag(format!(
                            "term position decreased: {} after {}",
                            pos, self.last_term_pos
                        )));
                    }
                    self.last_term_pos = pos;
                } else if self.last_term_pos != 0 {
                    return Err(FerretError::InvalidDocumentTermTag(
                        "zero term position after a non-zero one".into(),
                    ));
                }
                self.current.terms.push((term, pos, field_id));
                Ok(())
            }
            Tag::Key(key) => {
                self.in_document = true;
                self.current.key = Some(key);
                Ok(())
            }
            Tag::Title(title) => {
                self.in_document = true;
                self.current.title = Some(title);
                Ok(())
            }
            Tag::Rank(rank) => {
                self.in_document = true;
                self.current.rank = rank;
                Ok(())
            }
            Tag::TermCount(count) => {
                self.in_document = true;
                self.current.term_count = count;
                Ok(())
            }
            Tag::DocumentEnd => {
                if !self.in_document {
                    return Err(FerretError::InvalidTag("E without a prior document".into()));
                }
                if self.current.key.is_none() {
                    return Err(FerretError::InvalidDocumentKey(
                        "document missing required K tag".into(),
                    ));
                }
                self.documents.push(std::mem::take(&mut self.current));
                self.in_document = false;
                self.last_term_pos = 0;
                Ok(())
            }
            Tag::StreamEnd => {
                if self.in_document {
                    return Err(FerretError::InvalidStreamEndTag);
                }
                self.finished = true;
                Ok(())
            }
            // Date/Item/Message/Language/IndexName don't affect validation state here.
            _ => Ok(()),
        }
    }
}

impl Default for IngestParser {
    fn default() -> Self {
        Self::new()
    }
}
