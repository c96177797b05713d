//! Read-only document tree over `scraper`
//!
//! Parsing is best-effort: html5ever recovers from malformed markup, so a
//! broken page simply yields fewer matches. Extractors describe each output
//! field as a [`Field`] and resolve it with [`Field::or_default`], which keeps
//! the fallback policy in one place.

use scraper::{ElementRef, Html, Selector};

pub struct Document {
    html: Html,
}

/// A matched element, borrowed from its [`Document`]
#[derive(Clone, Copy)]
pub struct Node<'a> {
    element: ElementRef<'a>,
}

fn parse_selector(selector: &str) -> Option<Selector> {
    match Selector::parse(selector) {
        Ok(s) => Some(s),
        Err(e) => {
            log::warn!("Invalid selector '{}': {:?}", selector, e);
            None
        }
    }
}

impl Document {
    pub fn parse(html: &str) -> Self {
        Self {
            html: Html::parse_document(html),
        }
    }

    pub fn query_all(&self, selector: &str) -> Vec<Node<'_>> {
        match parse_selector(selector) {
            Some(sel) => self.html.select(&sel).map(Node::from).collect(),
            None => Vec::new(),
        }
    }

    pub fn query(&self, selector: &str) -> Option<Node<'_>> {
        let sel = parse_selector(selector)?;
        self.html.select(&sel).next().map(Node::from)
    }
}

impl<'a> From<ElementRef<'a>> for Node<'a> {
    fn from(element: ElementRef<'a>) -> Self {
        Self { element }
    }
}

impl<'a> Node<'a> {
    pub fn query_all(&self, selector: &str) -> Vec<Node<'a>> {
        match parse_selector(selector) {
            Some(sel) => self.element.select(&sel).map(Node::from).collect(),
            None => Vec::new(),
        }
    }

    pub fn query(&self, selector: &str) -> Option<Node<'a>> {
        let sel = parse_selector(selector)?;
        self.element.select(&sel).next().map(Node::from)
    }

    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.element.value().attr(name)
    }

    /// Concatenated descendant text, trimmed
    pub fn text(&self) -> String {
        self.element.text().collect::<String>().trim().to_string()
    }
}

/// Anything a [`Field`] can be resolved against
pub trait Scope {
    fn first(&self, selector: &str) -> Option<Node<'_>>;
}

impl Scope for Document {
    fn first(&self, selector: &str) -> Option<Node<'_>> {
        self.query(selector)
    }
}

impl Scope for Node<'_> {
    fn first(&self, selector: &str) -> Option<Node<'_>> {
        self.query(selector)
    }
}

/// How a value is read off the matched element
#[derive(Debug, Clone, Copy)]
pub enum Read {
    Text,
    Attr(&'static str),
    /// First attribute that is present and non-empty
    FirstAttr(&'static [&'static str]),
}

/// A selector plus a read rule; the unit of the extract-or-default policy
#[derive(Debug, Clone, Copy)]
pub struct Field {
    pub selector: &'static str,
    pub read: Read,
}

impl Field {
    pub const fn text(selector: &'static str) -> Self {
        Self { selector, read: Read::Text }
    }

    pub const fn attr(selector: &'static str, name: &'static str) -> Self {
        Self { selector, read: Read::Attr(name) }
    }

    pub const fn first_attr(selector: &'static str, names: &'static [&'static str]) -> Self {
        Self { selector, read: Read::FirstAttr(names) }
    }

    /// Read this field from a node that has already been matched
    pub fn read_node(&self, node: &Node<'_>) -> Option<String> {
        let value = match self.read {
            Read::Text => Some(node.text()),
            Read::Attr(name) => node.attr(name).map(str::to_string),
            Read::FirstAttr(names) => names
                .iter()
                .filter_map(|name| node.attr(name))
                .find(|v| !v.is_empty())
                .map(str::to_string),
        };
        value.filter(|v| !v.is_empty())
    }

    pub fn extract<S: Scope + ?Sized>(&self, scope: &S) -> Option<String> {
        let node = scope.first(self.selector)?;
        self.read_node(&node)
    }

    pub fn or_default<S: Scope + ?Sized>(&self, scope: &S) -> String {
        self.extract(scope).unwrap_or_default()
    }
}
