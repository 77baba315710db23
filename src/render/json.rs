//! JSON renderer: the data file a documentation site is built from.

use crate::error::Result;
use crate::render::{Renderer, Report};

pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, report: &Report<'_>) -> Result<String> {
        let mut out = serde_json::to_string_pretty(report)?;
        out.push('\n');
        Ok(out)
    }

    fn file_extension(&self) -> &str {
        "json"
    }
}
