// Internal linking: breadcrumbs, related pages and cross-links

pub mod builder;

pub use builder::{anchor_text, href, LinkGraphBuilder, LinkLimits};

use serde::Serialize;

/// A hyperlink between two pages
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub href: String,
    pub text: String,
}

impl Link {
    pub fn new(text: &str, href: String) -> Self {
        Self {
            href,
            text: text.to_string(),
        }
    }
}

/// One breadcrumb step; the current page and pageless steps have no href
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Breadcrumb {
    pub label: String,
    pub href: Option<String>,
}

impl Breadcrumb {
    pub fn linked(label: &str, href: String) -> Self {
        Self {
            label: label.to_string(),
            href: Some(href),
        }
    }

    /// The page being viewed
    pub fn current(label: &str) -> Self {
        Self::text(label)
    }

    /// A step without a page of its own
    pub fn text(label: &str) -> Self {
        Self {
            label: label.to_string(),
            href: None,
        }
    }
}

/// Every link set of one page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PageLinks {
    pub breadcrumbs: Vec<Breadcrumb>,
    pub children: Vec<Link>,
    pub siblings: Vec<Link>,
    pub nearby: Vec<Link>,
    /// Service/location cross-links
    pub services: Vec<Link>,
    pub related_models: Vec<Link>,
    /// Models without a page of their own, as plain names
    pub other_models: Vec<String>,
}

impl PageLinks {
    /// Outgoing links, breadcrumbs excluded
    pub fn outgoing(&self) -> impl Iterator<Item = &Link> {
        self.children
            .iter()
            .chain(&self.siblings)
            .chain(&self.nearby)
            .chain(&self.services)
            .chain(&self.related_models)
    }
}
