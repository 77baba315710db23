//! Markdown renderer: one page covering every documented component.

use crate::error::Result;
use crate::model::{MethodInfo, PropertyInfo, SourceDoc};
use crate::nav;
use crate::render::{Renderer, Report};

pub struct MarkdownRenderer;

impl Renderer for MarkdownRenderer {
    fn render(&self, report: &Report<'_>) -> Result<String> {
        let mut output = String::new();
        let docs = &report.project.classes_with_docs;

        if !report.navigation_links.is_empty() {
            output.push_str("## Index\n\n");
            for group in &report.navigation_links {
                if !group.group_name.is_empty() {
                    output.push_str(&format!("* {}\n", group.group_name));
                }
                for link in &group.links {
                    let indent = if group.group_name.is_empty() { "" } else { "  " };
                    output.push_str(&format!(
                        "{}* [{}](#{})\n",
                        indent,
                        link.title,
                        nav::anchor_slug(&link.title)
                    ));
                }
            }
            output.push('\n');
        }

        for doc in docs {
            output.push_str(&render_component(doc));
            output.push('\n');
        }

        Ok(output)
    }

    fn file_extension(&self) -> &str {
        "md"
    }
}

fn render_component(doc: &SourceDoc) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push(format!("### {}\n", doc.component_doc_name));

    let mut facts = Vec::new();
    if !doc.group_doc_name.is_empty() {
        facts.push(format!("* Group: {}", doc.group_doc_name));
    }
    if let Some(ref selector) = doc.selector {
        facts.push(format!("* Selector: `{}`", selector));
    }
    if let Some(ref module) = doc.module_details {
        facts.push(format!(
            "* Module: `{}` ({})",
            module.module_ref_name, module.file_name
        ));
    }
    if let Some(parent) = doc.extend_classes.first() {
        facts.push(format!("* Extends: `{}`", parent));
    }
    facts.push(format!("* Class: `{}` ({})", doc.component_ref_name, doc.file_name));
    lines.extend(facts);
    lines.push(String::new());

    if !doc.description.is_empty() {
        lines.push(doc.description.clone());
        lines.push(String::new());
    }

    if !doc.api_details.properties.is_empty() {
        lines.push("#### Properties\n".to_string());
        lines.push("| Name | Type | Description |".to_string());
        lines.push("|------|------|-------------|".to_string());
        for property in &doc.api_details.properties {
            lines.push(render_property_row(property));
        }
        lines.push(String::new());
    }

    if !doc.api_details.methods.is_empty() {
        lines.push("#### Methods\n".to_string());
        for method in &doc.api_details.methods {
            lines.push(render_method(method));
        }
        lines.push(String::new());
    }

    lines.join("\n")
}

fn render_property_row(property: &PropertyInfo) -> String {
    let mut name = String::new();
    for decorator in &property.decorator_names {
        name.push_str(&format!("`{}`<br/>", decorator));
    }
    name.push_str(&format!("`{}`", property.name));

    format!(
        "| {} | `{}` | {} |",
        escape_cell(&name),
        escape_cell(&property.declared_type),
        escape_cell(&property.description).replace('\n', "<br/>")
    )
}

fn render_method(method: &MethodInfo) -> String {
    let mut line = String::from("* ");
    for decorator in &method.decorator_names {
        line.push_str(&format!("`{}` ", decorator));
    }
    line.push_str(&format!("`{}`", method.display_name));
    if !method.description.is_empty() {
        line.push_str(&format!(": {}", method.description.replace('\n', "\n  ")));
    }
    line
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}
