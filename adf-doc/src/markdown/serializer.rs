//! Markdown serialization for every node and mark variant.
//!
//! Marks are text transformations applied innermost-first in declaration
//! order; nodes render recursively and join their children through two
//! helpers, [`inline_content`] (no separator) and [`block_content`] (newline
//! separated with blank-line normalization). Output aims at portable
//! Markdown; format features with no Markdown counterpart either degrade to
//! an agreed plain form or fail with `MarkdownIncompatible`.

use crate::error::AdfError;
use crate::markdown::RenderRules;
use crate::model::marks::Mark;
use crate::model::nodes::{Node, TaskItem, TaskList};

/// One level of list or indentation nesting.
const TAB: &str = "    ";

impl Mark {
    /// Transform already-rendered text. Wrapping marks leave blank text
    /// untouched so stray whitespace does not become `** **`.
    pub fn to_markdown(&self, text: &str) -> Result<String, AdfError> {
        let md = match self {
            Mark::Strong => wrap_unless_blank(text, "**"),
            Mark::Em => wrap_unless_blank(text, "*"),
            Mark::Strike => wrap_unless_blank(text, "~~"),
            Mark::Code => return code_span(text),
            Mark::Link(attrs) => {
                let label = attrs.title.as_deref().unwrap_or(text);
                format!("[{label}]({})", attrs.href)
            }
            Mark::Indentation(attrs) => {
                let level = usize::try_from(attrs.level).unwrap_or(0);
                prefix_lines(text, &TAB.repeat(level), true)
            }
            // Annotations, colors, layout and script marks have no portable
            // Markdown form; the text passes through unchanged.
            Mark::Annotation(_)
            | Mark::BackgroundColor(_)
            | Mark::Breakout(_)
            | Mark::Subsup(_)
            | Mark::TextColor(_)
            | Mark::Underline => text.to_string(),
        };
        Ok(md)
    }
}

fn wrap_unless_blank(text: &str, delim: &str) -> String {
    if text.trim().is_empty() {
        text.to_string()
    } else {
        format!("{delim}{text}{delim}")
    }
}

fn code_span(text: &str) -> Result<String, AdfError> {
    if text.is_empty() {
        return Ok(String::new());
    }
    if text.contains('\n') {
        return Err(AdfError::MarkdownIncompatible(
            "inline code contains a newline".to_string(),
        ));
    }
    if text.contains('`') {
        Ok(format!("`` {text} ``"))
    } else {
        Ok(format!("`{text}`"))
    }
}

fn apply_marks(text: &str, marks: Option<&[Mark]>) -> Result<String, AdfError> {
    let mut out = text.to_string();
    if let Some(marks) = marks {
        for mark in marks {
            out = mark.to_markdown(&out)?;
        }
    }
    Ok(out)
}

/// Join inline children with no separator.
fn inline_content(content: Option<&[Node]>, rules: &RenderRules) -> Result<String, AdfError> {
    let Some(children) = content else {
        return Ok(String::new());
    };
    let mut out = String::new();
    for child in children {
        match child.to_markdown(rules) {
            Ok(md) => out.push_str(&md),
            Err(err) if rules.ignore_errors && err.is_data_error() => continue,
            Err(err) => return Err(err),
        }
    }
    Ok(out)
}

/// Join block children with newlines. Fenced and list blocks get a blank
/// line on each side; runs of blank lines are then collapsed to one.
fn block_content(content: Option<&[Node]>, rules: &RenderRules) -> Result<String, AdfError> {
    let Some(children) = content else {
        return Ok(String::new());
    };
    let mut parts = Vec::with_capacity(children.len());
    for child in children {
        let md = match child.to_markdown(rules) {
            Ok(md) => md,
            Err(err) if rules.ignore_errors && err.is_data_error() => continue,
            Err(err) => return Err(err),
        };
        if needs_blank_lines(child) {
            parts.push(format!("\n{md}\n"));
        } else {
            parts.push(md);
        }
    }
    Ok(collapse_blank_lines(&parts.join("\n")))
}

fn needs_blank_lines(node: &Node) -> bool {
    matches!(
        node,
        Node::BulletList(_) | Node::OrderedList(_) | Node::CodeBlock(_)
    )
}

/// Collapse runs of blank lines to a single blank line, to a fixpoint.
fn collapse_blank_lines(text: &str) -> String {
    let mut out = text.to_string();
    while out.contains("\n\n\n") {
        out = out.replace("\n\n\n", "\n\n");
    }
    out
}

fn prefix_lines(text: &str, prefix: &str, skip_blank: bool) -> String {
    let mut out = String::with_capacity(text.len());
    for line in text.split_inclusive('\n') {
        let body = line.strip_suffix('\n').unwrap_or(line);
        if !(skip_blank && body.trim().is_empty()) {
            out.push_str(prefix);
        }
        out.push_str(line);
    }
    out
}

#[derive(Clone, Copy)]
enum ListStyle {
    Bullet,
    Ordered { start: i64 },
}

/// Shared renderer for bullet and ordered lists. A nested list of either
/// kind inside an item recurses one indent level deeper; nested ordered
/// lists always restart at 1, only the outermost honors `order`.
fn render_list(
    items: &[Node],
    style: ListStyle,
    level: usize,
    rules: &RenderRules,
) -> Result<String, AdfError> {
    let indent = TAB.repeat(level);
    let mut counter = match style {
        ListStyle::Ordered { start } => start,
        ListStyle::Bullet => 0,
    };
    let mut entries = Vec::new();
    for item in items {
        let Node::ListItem(list_item) = item else {
            continue;
        };
        let mut parts = Vec::new();
        for child in &list_item.content {
            let rendered = match child {
                Node::BulletList(inner) => {
                    render_list(&inner.content, ListStyle::Bullet, level + 1, rules)
                }
                Node::OrderedList(inner) => render_list(
                    &inner.content,
                    ListStyle::Ordered { start: 1 },
                    level + 1,
                    rules,
                ),
                other => other
                    .to_markdown(rules)
                    .map(|md| md.trim_end().to_string()),
            };
            match rendered {
                Ok(md) => parts.push(md),
                Err(err) if rules.ignore_errors && err.is_data_error() => continue,
                Err(err) => return Err(err),
            }
        }
        let marker = match style {
            ListStyle::Bullet => "- ".to_string(),
            ListStyle::Ordered { .. } => {
                let marker = format!("{counter}. ");
                counter += 1;
                marker
            }
        };
        entries.push(format!("{indent}{marker}{}", parts.join("\n")));
    }
    Ok(entries.join("\n"))
}

fn task_item_line(item: &TaskItem, rules: &RenderRules) -> Result<String, AdfError> {
    let checkbox = if item.attrs.state == "DONE" {
        "[x] "
    } else {
        "[ ] "
    };
    Ok(format!(
        "{checkbox}{}",
        inline_content(item.content.as_deref(), rules)?
    ))
}

fn render_task_list(
    list: &TaskList,
    level: usize,
    rules: &RenderRules,
    lines: &mut Vec<String>,
) -> Result<(), AdfError> {
    let indent = TAB.repeat(level);
    for child in &list.content {
        match child {
            Node::TaskItem(item) => match task_item_line(item, rules) {
                Ok(md) => lines.push(format!("{indent}- {md}")),
                Err(err) if rules.ignore_errors && err.is_data_error() => continue,
                Err(err) => return Err(err),
            },
            Node::TaskList(inner) => render_task_list(inner, level + 1, rules, lines)?,
            _ => {}
        }
    }
    Ok(())
}

/// Timestamps are epoch milliseconds; the rendered form is the UTC civil
/// date. Conversion uses the days-from-civil inverse (Howard Hinnant's
/// algorithm), exact over the whole proleptic Gregorian calendar.
fn civil_from_days(days: i64) -> (i64, u32, u32) {
    let z = days + 719_468;
    let era = if z >= 0 { z } else { z - 146_096 } / 146_097;
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u32;
    let year = yoe + era * 400 + i64::from(month <= 2);
    (year, month, day)
}

fn render_date(timestamp: &str) -> Result<String, AdfError> {
    let ms: i64 = timestamp.parse().map_err(|_| {
        AdfError::MarkdownIncompatible(format!(
            "date timestamp '{timestamp}' is not epoch milliseconds"
        ))
    })?;
    let days = ms.div_euclid(1_000).div_euclid(86_400);
    let (year, month, day) = civil_from_days(days);
    Ok(format!("{year:04}-{month:02}-{day:02}"))
}

impl Node {
    /// Render this subtree as Markdown.
    pub fn to_markdown(&self, rules: &RenderRules) -> Result<String, AdfError> {
        let md = match self {
            Node::Doc(node) => block_content(Some(&node.content), rules)?,
            Node::Paragraph(node) => {
                let mut md = inline_content(node.content.as_deref(), rules)?;
                md.push('\n');
                apply_marks(&md, node.marks.as_deref())?
            }
            Node::Heading(node) => {
                // Out-of-range levels are clamped into Markdown's 1..=6
                // rather than emitting an invalid prefix.
                let level = node.attrs.level.clamp(1, 6) as usize;
                let title = inline_content(Some(&node.content), rules)?;
                format!("\n\n{} {title}\n\n", "#".repeat(level))
            }
            Node::Text(node) => apply_marks(&node.text, node.marks.as_deref())?,
            Node::HardBreak => rules.hard_break.as_str().to_string(),
            Node::Rule => "---".to_string(),
            Node::Blockquote(node) => {
                let body = block_content(node.content.as_deref(), rules)?;
                format!("{}\n", prefix_lines(body.trim_end_matches('\n'), "> ", false))
            }
            Node::Panel(node) => {
                let body = block_content(Some(&node.content), rules)?;
                let md = collapse_blank_lines(&format!(
                    "**{}**\n\n{body}",
                    node.attrs.panel_type.to_uppercase()
                ));
                format!("{}\n", prefix_lines(md.trim_end_matches('\n'), "> ", false))
            }
            Node::Expand(node) => block_content(Some(&node.content), rules)?,
            Node::NestedExpand(node) => block_content(Some(&node.content), rules)?,
            Node::BulletList(node) => {
                render_list(&node.content, ListStyle::Bullet, 0, rules)?
            }
            Node::OrderedList(node) => {
                let start = node
                    .attrs
                    .as_ref()
                    .and_then(|attrs| attrs.order)
                    .unwrap_or(1);
                render_list(&node.content, ListStyle::Ordered { start }, 0, rules)?
            }
            Node::ListItem(node) => block_content(Some(&node.content), rules)?,
            Node::TaskList(node) => {
                let mut lines = Vec::new();
                render_task_list(node, 0, rules, &mut lines)?;
                lines.join("\n")
            }
            Node::TaskItem(node) => task_item_line(node, rules)?,
            Node::DecisionList(node) => {
                let Some(children) = &node.content else {
                    return Ok(String::new());
                };
                let mut entries = Vec::new();
                for child in children {
                    let Node::DecisionItem(item) = child else {
                        continue;
                    };
                    match inline_content(item.content.as_deref(), rules) {
                        Ok(md) => entries.push(format!("> {md}")),
                        Err(err) if rules.ignore_errors && err.is_data_error() => continue,
                        Err(err) => return Err(err),
                    }
                }
                entries.join("\n\n")
            }
            Node::DecisionItem(node) => inline_content(node.content.as_deref(), rules)?,
            Node::CodeBlock(node) => {
                let code = inline_content(node.content.as_deref(), rules)?;
                let language = node
                    .attrs
                    .as_ref()
                    .and_then(|attrs| attrs.language.as_deref())
                    .unwrap_or("");
                format!("```{language}\n{code}\n```")
            }
            Node::Mention(node) => node
                .attrs
                .text
                .clone()
                .unwrap_or_else(|| "@Unknown".to_string()),
            Node::Date(node) => render_date(&node.attrs.timestamp)?,
            Node::Emoji(node) => node
                .attrs
                .text
                .clone()
                .ok_or(AdfError::UnimplementedRender("emoji without fallback text"))?,
            Node::Status(node) => format!("`{}`", node.attrs.text),
            Node::InlineCard(node) => {
                format!("[{0}]({0})", node.attrs.url)
            }
            Node::BlockCard(node) => {
                let url = node
                    .attrs
                    .as_ref()
                    .and_then(|attrs| attrs.url.as_deref())
                    .ok_or_else(|| {
                        AdfError::MarkdownIncompatible("blockCard without a url".to_string())
                    })?;
                format!("\n[{url}]({url})\n")
            }
            Node::EmbedCard(node) => format!("[{0}]({0})", node.attrs.url),
            Node::MediaSingle(node) => inline_content(Some(&node.content), rules)?,
            Node::Caption(node) => inline_content(node.content.as_deref(), rules)?,
            // No portable Markdown form: raw media references and table
            // structure are dropped from the output.
            Node::Media(_)
            | Node::MediaGroup(_)
            | Node::Table(_)
            | Node::TableRow(_)
            | Node::TableCell(_)
            | Node::TableHeader(_) => String::new(),
        };
        Ok(md)
    }
}
