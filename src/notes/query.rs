//! Pattern filters applied to note projections
//!
//! The search index handles channel filtering and ordering. Title, body and
//! tag patterns are regular expressions, which the index cannot evaluate, so
//! they are matched here against the fetched candidates.

use crate::meilisearch::indexes::NoteDocument;
use regex::Regex;

/// Compiled title/body/tag patterns
#[derive(Debug, Clone, Default)]
pub struct PatternFilter {
    title: Option<Regex>,
    body: Option<Regex>,
    tags: Vec<Regex>,
}

impl PatternFilter {
    /// Compile the patterns. Empty patterns are ignored.
    ///
    /// Title and body patterns match anywhere in the field; each tag pattern
    /// must match a whole tag.
    pub fn new(title: Option<&str>, body: Option<&str>, tags: &[String]) -> Result<Self, String> {
        let title = compile(title, "title")?;
        let body = compile(body, "body")?;
        let tags = tags
            .iter()
            .filter(|t| !t.is_empty())
            .map(|t| {
                Regex::new(&format!("^(?:{})$", t))
                    .map_err(|e| format!("invalid tag pattern '{}': {}", t, e))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { title, body, tags })
    }

    /// Whether any pattern is set
    pub fn is_active(&self) -> bool {
        self.title.is_some() || self.body.is_some() || !self.tags.is_empty()
    }

    /// Check a projection against every pattern
    pub fn matches(&self, doc: &NoteDocument) -> bool {
        if let Some(re) = &self.title {
            if !re.is_match(&doc.title) {
                return false;
            }
        }
        if let Some(re) = &self.body {
            if !re.is_match(&doc.body) {
                return false;
            }
        }
        self.tags
            .iter()
            .all(|re| doc.tag.iter().any(|tag| re.is_match(tag)))
    }
}

fn compile(pattern: Option<&str>, field: &str) -> Result<Option<Regex>, String> {
    match pattern {
        Some(p) if !p.is_empty() => Regex::new(p)
            .map(Some)
            .map_err(|e| format!("invalid {} pattern '{}': {}", field, p, e)),
        _ => Ok(None),
    }
}
