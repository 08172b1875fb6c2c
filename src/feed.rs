//! Contacts feed access and parsing
//!
//! Reads an Atom-style contacts export and yields one directory record per
//! phone number element.

use std::path::PathBuf;

use async_trait::async_trait;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::NsReader;

use crate::directory::DirectoryEntry;
use crate::errors::AppError;

const ATOM_NS: &[u8] = b"http://www.w3.org/2005/Atom";
const GDATA_NS: &[u8] = b"http://schemas.google.com/g/2005";

/// The qualifier can arrive under either attribute name; the first one
/// present wins.
const QUALIFIER_ATTRIBUTES: [&str; 2] = ["rel", "label"];

#[async_trait]
pub trait DirectorySource: Send + Sync {
    async fn load_entries(&self) -> Result<Vec<DirectoryEntry>, AppError>;
}

/// Reads the contacts feed from a local file on every call. The feed is small
/// enough that re-reading per request beats carrying a cache.
#[derive(Debug, Clone)]
pub struct AtomFeedSource {
    path: PathBuf,
}

impl AtomFeedSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait]
impl DirectorySource for AtomFeedSource {
    async fn load_entries(&self) -> Result<Vec<DirectoryEntry>, AppError> {
        let document = tokio::fs::read_to_string(&self.path).await.map_err(|err| {
            AppError::feed_unavailable(self.path.display().to_string(), err.to_string())
        })?;

        parse_feed(&document)
    }
}

/// Parses the Atom document into directory records.
///
/// Every `gd:phoneNumber` child of an `atom:entry` produces one record
/// carrying the entry's title, so a person with several numbers appears once
/// per number and a person without numbers does not appear at all.
pub fn parse_feed(document: &str) -> Result<Vec<DirectoryEntry>, AppError> {
    let mut reader = NsReader::from_str(document);
    let mut entries = Vec::new();

    let mut in_entry = false;
    let mut in_title = false;
    let mut in_number = false;
    let mut title = String::new();
    let mut number_text = String::new();
    let mut qualifier = String::new();
    let mut numbers: Vec<(String, String)> = Vec::new();

    loop {
        match reader.read_resolved_event() {
            Ok((resolve, Event::Start(element))) => {
                let local = element.local_name();
                if bound_to(&resolve, ATOM_NS) && local.as_ref() == b"entry" {
                    in_entry = true;
                    title.clear();
                    numbers.clear();
                } else if in_entry && bound_to(&resolve, ATOM_NS) && local.as_ref() == b"title" {
                    in_title = true;
                    title.clear();
                } else if in_entry
                    && bound_to(&resolve, GDATA_NS)
                    && local.as_ref() == b"phoneNumber"
                {
                    in_number = true;
                    number_text.clear();
                    qualifier = qualifier_attribute(&element)?;
                }
            }
            Ok((resolve, Event::Empty(element))) => {
                if in_entry
                    && bound_to(&resolve, GDATA_NS)
                    && element.local_name().as_ref() == b"phoneNumber"
                {
                    numbers.push((String::new(), qualifier_attribute(&element)?));
                }
            }
            Ok((resolve, Event::End(element))) => {
                let local = element.local_name();
                if bound_to(&resolve, ATOM_NS) && local.as_ref() == b"entry" {
                    in_entry = false;
                    for (raw_number, qualifier) in numbers.drain(..) {
                        entries.push(DirectoryEntry::new(&raw_number, &title, &qualifier));
                    }
                } else if in_title && bound_to(&resolve, ATOM_NS) && local.as_ref() == b"title" {
                    in_title = false;
                } else if in_number
                    && bound_to(&resolve, GDATA_NS)
                    && local.as_ref() == b"phoneNumber"
                {
                    in_number = false;
                    numbers.push((
                        std::mem::take(&mut number_text),
                        std::mem::take(&mut qualifier),
                    ));
                }
            }
            Ok((_, Event::Text(text))) if in_title || in_number => {
                let text = text
                    .unescape()
                    .map_err(|err| AppError::feed_malformed(err.to_string()))?;
                if in_title {
                    title.push_str(&text);
                } else {
                    number_text.push_str(&text);
                }
            }
            Ok((_, Event::CData(data))) if in_title || in_number => {
                let text = String::from_utf8_lossy(data.as_ref());
                if in_title {
                    title.push_str(&text);
                } else {
                    number_text.push_str(&text);
                }
            }
            Ok((_, Event::Eof)) => break,
            Ok(_) => {}
            Err(err) => return Err(AppError::feed_malformed(err.to_string())),
        }
    }

    Ok(entries)
}

fn bound_to(resolve: &ResolveResult, namespace: &[u8]) -> bool {
    matches!(resolve, ResolveResult::Bound(Namespace(bound)) if *bound == namespace)
}

fn qualifier_attribute(element: &BytesStart) -> Result<String, AppError> {
    for name in QUALIFIER_ATTRIBUTES {
        for attribute in element.attributes() {
            let attribute = attribute.map_err(|err| AppError::feed_malformed(err.to_string()))?;
            if attribute.key.local_name().as_ref() == name.as_bytes() {
                let value = attribute
                    .unescape_value()
                    .map_err(|err| AppError::feed_malformed(err.to_string()))?;
                return Ok(value.into_owned());
            }
        }
    }

    Ok(String::new())
}
