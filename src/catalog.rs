use std::fmt;

use hashbrown::HashMap;
use serde_derive::Serialize;

pub const NO_LINK: &str = "No Link";

/// External listing URL of a property. `Missing` serialises to JSON `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Link {
    Url(String),
    Missing,
}

impl Link {
    pub fn from_cell(cell: Option<String>) -> Link {
        match cell {
            Some(url) if !url.trim().is_empty() => Link::Url(url.trim().to_string()),
            _ => Link::Missing,
        }
    }

    pub fn to_html_anchor(&self) -> String {
        match self {
            Link::Url(url) => format!(
                "<a href=\"{}\" target=\"_blank\">LINK</a>",
                escape_html(url)
            ),
            Link::Missing => NO_LINK.to_string(),
        }
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Link::Url(url) => f.write_str(url),
            Link::Missing => f.write_str(NO_LINK),
        }
    }
}

/// Property name to listing link.
#[derive(Debug, Default)]
pub struct PropertyCatalog {
    links: HashMap<String, Link>,
}

impl PropertyCatalog {
    pub fn new() -> Self {
        PropertyCatalog::default()
    }

    /// Builds the catalog from `(name, link)` records; the first record of a
    /// name wins.
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = (String, Option<String>)>,
    {
        let mut catalog = PropertyCatalog::new();
        for (name, link) in records {
            catalog
                .links
                .entry(name)
                .or_insert_with(|| Link::from_cell(link));
        }
        catalog
    }

    pub fn link_for(&self, name: &str) -> Link {
        self.links.get(name).cloned().unwrap_or(Link::Missing)
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn qty_with_link(&self) -> usize {
        self.links
            .values()
            .filter(|link| matches!(link, Link::Url(_)))
            .count()
    }
}

pub(crate) fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
