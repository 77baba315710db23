//! Navigation links for a documentation site, grouped by `@group`.

use crate::model::SourceDoc;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationGroup {
    pub group_name: String,
    pub links: Vec<NavigationLink>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationLink {
    pub title: String,
    pub path: String,
}

/// One group per distinct `group_doc_name`, in order of first appearance.
/// Links keep the order of `docs`.
pub fn navigation_links(docs: &[SourceDoc], url_prefix: &str) -> Vec<NavigationGroup> {
    let mut groups: Vec<NavigationGroup> = Vec::new();
    let prefix = url_prefix.trim_matches('/');

    for doc in docs {
        let slug = route_slug(&doc.component_ref_name);
        let link = NavigationLink {
            title: doc.component_doc_name.clone(),
            path: if prefix.is_empty() {
                slug
            } else {
                format!("{prefix}/{slug}")
            },
        };
        match groups.iter_mut().find(|g| g.group_name == doc.group_doc_name) {
            Some(group) => group.links.push(link),
            None => groups.push(NavigationGroup {
                group_name: doc.group_doc_name.clone(),
                links: vec![link],
            }),
        }
    }

    groups
}

/// Route segment for a class name: `FoobarComponent` → `foobar-component`.
pub fn route_slug(class_name: &str) -> String {
    let mut slug = String::with_capacity(class_name.len() + 4);
    let mut prev: Option<char> = None;
    for c in class_name.chars() {
        if c.is_uppercase() && prev.is_some_and(|p| p.is_lowercase() || p.is_ascii_digit()) {
            slug.push('-');
        }
        slug.push(c);
        prev = Some(c);
    }
    anchor_slug(&slug)
}

/// GitHub heading anchor: lowercase, spaces become hyphens, everything
/// other than alphanumerics and hyphens is dropped.
pub fn anchor_slug(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for c in text.to_lowercase().chars() {
        if c.is_alphanumeric() || c == '-' {
            slug.push(c);
        } else if c == ' ' {
            slug.push('-');
        }
    }
    slug
}
