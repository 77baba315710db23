//! Renderers: trait-based output format dispatch.

pub mod json;
pub mod markdown;

use crate::error::Result;
use crate::model::ProjectSourceDocumentation;
use crate::nav::{self, NavigationGroup};
use serde::Serialize;

/// Everything a renderer sees: the analysis result plus its navigation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report<'a> {
    pub navigation_links: Vec<NavigationGroup>,
    #[serde(flatten)]
    pub project: &'a ProjectSourceDocumentation,
}

impl<'a> Report<'a> {
    pub fn new(project: &'a ProjectSourceDocumentation, url_prefix: &str) -> Self {
        Self {
            navigation_links: nav::navigation_links(&project.classes_with_docs, url_prefix),
            project,
        }
    }
}

/// Renders a [`Report`] into one output format.
pub trait Renderer {
    fn render(&self, report: &Report<'_>) -> Result<String>;
    fn file_extension(&self) -> &str;
}

/// Create a renderer for the given format name.
pub fn create_renderer(format: &str) -> anyhow::Result<Box<dyn Renderer>> {
    match format {
        "json" => Ok(Box::new(json::JsonRenderer)),
        "markdown" | "md" => Ok(Box::new(markdown::MarkdownRenderer)),
        _ => Err(anyhow::anyhow!(
            "unknown format: {}. Use json or markdown",
            format
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_formats() {
        assert_eq!(create_renderer("json").unwrap().file_extension(), "json");
        assert_eq!(create_renderer("markdown").unwrap().file_extension(), "md");
        assert_eq!(create_renderer("md").unwrap().file_extension(), "md");
    }

    #[test]
    fn unknown_format_is_an_error() {
        let err = create_renderer("html").err().unwrap();
        assert!(err.to_string().contains("unknown format: html"));
    }
}
