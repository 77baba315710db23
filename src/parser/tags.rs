//! Doc block reader: `@group`, `@component` and `@description`.
//!
//! Tag lines are matched after the comment decoration (indentation and the
//! leading `*`) has been stripped. The `@description` body runs until the
//! next recognized tag or the end of the block; markup inside it is left
//! untouched.

use crate::model::CommentTags;
use regex::Regex;
use std::sync::LazyLock;

/// Tags that land in [`CommentTags::tags`].
const VALUE_TAGS: &[&str] = &["group", "component"];

static RE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^@([A-Za-z][\w-]*)(?:\s+(.*))?$").unwrap());

/// Parse the doc block preceding a class into tags and description.
/// A missing block yields empty tags.
pub fn parse_tag_block(comment: Option<&str>) -> CommentTags {
    let mut tags = CommentTags::default();
    let Some(comment) = comment else {
        return tags;
    };

    let mut description: Option<Vec<&str>> = None;
    for line in comment_lines(comment) {
        let Some(caps) = RE_TAG.captures(line.trim_end()) else {
            if let Some(body) = description.as_mut() {
                body.push(line);
            }
            continue;
        };
        let name = caps.get(1).map_or("", |m| m.as_str());
        let value = caps.get(2).map_or("", |m| m.as_str());

        if VALUE_TAGS.contains(&name) {
            finish_description(&mut tags, description.take());
            tags.tags.insert(name.to_string(), value.trim().to_string());
        } else if name == "description" {
            finish_description(&mut tags, description.take());
            description = Some(vec![value]);
        } else if let Some(body) = description.as_mut() {
            // unrecognized tags are description text
            body.push(line);
        }
    }
    finish_description(&mut tags, description);

    tags
}

/// Text of a member's doc block: decoration stripped, not tag-parsed.
pub fn member_description(comment: Option<&str>) -> String {
    comment
        .map(|c| comment_lines(c).join("\n").trim().to_string())
        .unwrap_or_default()
}

fn finish_description(tags: &mut CommentTags, body: Option<Vec<&str>>) {
    if let Some(body) = body {
        tags.description = body.join("\n").trim().to_string();
    }
}

/// Lines of a block comment without `/**`, `*/` and per-line decoration.
fn comment_lines(comment: &str) -> Vec<&str> {
    let inner = comment
        .strip_prefix("/**")
        .or_else(|| comment.strip_prefix("/*"))
        .unwrap_or(comment);
    let inner = inner.strip_suffix("*/").unwrap_or(inner);

    inner.lines().map(strip_decoration).collect()
}

/// Strip leading indentation, one `*` and the indentation after it.
fn strip_decoration(line: &str) -> &str {
    let line = line.trim_start();
    line.strip_prefix('*').unwrap_or(line).trim_start()
}
