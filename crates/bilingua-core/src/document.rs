//! Content pipeline: annotate every `content` element of a localization
//! document.

use quick_xml::escape::partial_escape;
use quick_xml::events::{BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::annotate::{self, HintStyle};
use crate::dictionary::Dictionary;
use crate::preprocess;

/// Element whose text gets annotated
pub const CONTENT_ELEMENT: &[u8] = b"content";

/// Kept in front of the rewritten document when the source had one
const BOM: &str = "\u{feff}";

/// Shorter words are not worth recording as new words
pub const MIN_NEW_WORD_LEN: usize = 3;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DocumentStats {
    /// `content` elements seen
    pub nodes: usize,
    /// Elements that received a hint
    pub annotated: usize,
}

/// Annotate a single text value.
///
/// Returns the new value, or `None` when no dictionary word occurs in it or
/// the style renders nothing. Matched words are counted into `discovery`
/// when one is given.
pub fn annotate_text(
    text: &str,
    live: &Dictionary,
    discovery: Option<&mut Dictionary>,
    style: HintStyle,
) -> Option<String> {
    let words = preprocess::extract(text, live);
    if words.is_empty() {
        return None;
    }

    if let Some(discovery) = discovery {
        for word in words
            .iter()
            .filter(|w| w.chars().count() >= MIN_NEW_WORD_LEN)
        {
            discovery.observe(word);
        }
    }

    let entries: Vec<_> = words.iter().filter_map(|w| live.get(w)).collect();
    let hint = annotate::render(&entries, style);
    if hint.is_empty() {
        return None;
    }

    Some(format!("{text}{hint}"))
}

/// Text of a `content` element collected while streaming
struct ContentNode {
    /// Original events, replayed untouched when nothing matches
    events: Vec<Event<'static>>,
    text: String,
    depth: usize,
}

/// Annotate every `content` element of `xml` and return the rewritten
/// document.
///
/// Nothing outside `content` text is changed. Elements without dictionary
/// words are written back byte for byte.
pub fn annotate_document(
    xml: &str,
    live: &Dictionary,
    mut discovery: Option<&mut Dictionary>,
    style: HintStyle,
) -> Result<(String, DocumentStats), DocumentError> {
    let (bom, body) = match xml.strip_prefix(BOM) {
        Some(body) => (BOM, body),
        None => ("", xml),
    };

    let mut reader = Reader::from_str(body);
    reader.config_mut().trim_text(false);

    let mut buf = Vec::new();
    let mut out = Writer::new(Vec::new());
    let mut stats = DocumentStats::default();
    let mut node: Option<ContentNode> = None;

    loop {
        let event = reader.read_event_into(&mut buf)?;

        if let Event::Eof = event {
            break;
        }

        let closing = match (&node, &event) {
            (Some(current), Event::End(_)) => current.depth == 0,
            _ => false,
        };

        if closing {
            if let Some(finished) = node.take() {
                let annotated = write_content(
                    &mut out,
                    finished,
                    event.into_owned(),
                    live,
                    discovery.as_deref_mut(),
                    style,
                )?;
                if annotated {
                    stats.annotated += 1;
                }
            }
        } else if let Some(current) = node.as_mut() {
            match &event {
                Event::Text(t) => current.text.push_str(&t.unescape()?),
                Event::CData(c) => current.text.push_str(&String::from_utf8_lossy(c)),
                Event::Start(_) => current.depth += 1,
                Event::End(_) => current.depth -= 1,
                _ => {}
            }
            current.events.push(event.into_owned());
        } else {
            match event {
                Event::Start(e) if e.name().as_ref() == CONTENT_ELEMENT => {
                    stats.nodes += 1;
                    node = Some(ContentNode {
                        events: vec![Event::Start(e.into_owned())],
                        text: String::new(),
                        depth: 0,
                    });
                }
                Event::Empty(e) if e.name().as_ref() == CONTENT_ELEMENT => {
                    stats.nodes += 1;
                    out.write_event(Event::Empty(e))?;
                }
                other => out.write_event(other)?,
            }
        }

        buf.clear();
    }

    if node.is_some() {
        return Err(DocumentError::Unclosed);
    }

    tracing::info!(
        "Annotated {} of {} content elements",
        stats.annotated,
        stats.nodes
    );

    let body = String::from_utf8(out.into_inner())
        .map_err(|e| DocumentError::Encoding(e.to_string()))?;
    Ok((format!("{bom}{body}"), stats))
}

/// Flush a finished `content` element; returns whether it was annotated
fn write_content(
    out: &mut Writer<Vec<u8>>,
    node: ContentNode,
    end: Event<'static>,
    live: &Dictionary,
    discovery: Option<&mut Dictionary>,
    style: HintStyle,
) -> Result<bool, DocumentError> {
    let mut events = node.events.into_iter();

    match annotate_text(&node.text, live, discovery, style) {
        Some(value) => {
            tracing::debug!("Annotated content: {}", value);
            if let Some(start) = events.next() {
                out.write_event(start)?;
            }
            // Quotes stay literal, only markup characters are escaped
            out.write_event(Event::Text(BytesText::from_escaped(partial_escape(&value))))?;
            out.write_event(end)?;
            Ok(true)
        }
        None => {
            for event in events {
                out.write_event(event)?;
            }
            out.write_event(end)?;
            Ok(false)
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("Markup error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Document is not valid UTF-8: {0}")]
    Encoding(String),

    #[error("Document ends inside a content element")]
    Unclosed,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
