//! HTML page rendering for the gallery.

use std::fs;
use std::path::{Component, Path, PathBuf};

use chrono::{DateTime, Local};

use super::ReportKind;
use crate::compare::TestReportEntry;
use crate::config::{ALL_PAGE, FAILED_PAGE, STYLESHEET_NAME};

/// Everything one page needs
#[derive(Debug)]
pub struct PageContext<'a> {
    pub title: &'a str,
    pub kind: ReportKind,
    pub time: DateTime<Local>,
    pub entries: &'a [&'a TestReportEntry],
    /// Counts shown in the navigation bar, independent of `entries`
    pub total: usize,
    pub failed: usize,
    /// Directory the page is written to; image links are relative to it
    pub output_dir: &'a Path,
}

/// Render a complete HTML document
pub fn render_page(ctx: &PageContext<'_>) -> String {
    let title = escape(ctx.title);
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n");
    html.push_str("<html>\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{}</title>\n", title));
    html.push_str(&format!(
        "<link rel=\"stylesheet\" type=\"text/css\" href=\"{}\">\n",
        STYLESHEET_NAME
    ));
    html.push_str("</head>\n");
    html.push_str(&format!("<body class=\"{}\">\n", ctx.kind.as_str()));
    html.push_str(&format!("<h1>{}</h1>\n", title));

    html.push_str("<p class=\"nav\">");
    html.push_str(&nav_link(ctx.kind == ReportKind::All, ALL_PAGE, "All tests", ctx.total));
    html.push_str(" | ");
    html.push_str(&nav_link(ctx.kind == ReportKind::Failed, FAILED_PAGE, "Failed tests", ctx.failed));
    html.push_str("</p>\n");

    html.push_str(&format!(
        "<p class=\"time\">Generated {}</p>\n",
        ctx.time.format("%Y-%m-%d %H:%M:%S")
    ));

    if ctx.entries.is_empty() {
        html.push_str("<p class=\"empty\">No tests to show.</p>\n");
    }

    for entry in ctx.entries {
        html.push_str(&render_entry(entry, ctx.output_dir));
    }

    html.push_str("</body>\n</html>\n");
    html
}

fn nav_link(current: bool, href: &str, label: &str, count: usize) -> String {
    if current {
        format!("<strong>{} ({})</strong>", label, count)
    } else {
        format!("<a href=\"{}\">{} ({})</a>", href, label, count)
    }
}

fn render_entry(entry: &TestReportEntry, output_dir: &Path) -> String {
    let mut html = String::new();
    html.push_str(&format!("<div class=\"test\" id=\"test-{}\">\n", entry.index));
    html.push_str(&format!(
        "<h2 class=\"{}\">Test {}</h2>\n",
        entry.status.as_str(),
        entry.index
    ));
    html.push_str("<table>\n");
    html.push_str("<tr><th>Baseline</th><th>Most recent</th></tr>\n");

    html.push_str("<tr>");
    html.push_str(&image_cell(entry.baseline_image.as_deref(), output_dir, "no baseline"));
    html.push_str(&image_cell(entry.most_recent_image.as_deref(), output_dir, "no recent result"));
    html.push_str("</tr>\n");

    html.push_str("<tr>");
    html.push_str(&description_cell(entry.baseline_description.as_deref()));
    html.push_str(&description_cell(entry.most_recent_description.as_deref()));
    html.push_str("</tr>\n");

    html.push_str("</table>\n</div>\n");
    html
}

fn image_cell(image: Option<&Path>, output_dir: &Path, missing: &str) -> String {
    match image {
        Some(path) => {
            let href = link_href(output_dir, path);
            format!("<td><a href=\"{0}\"><img src=\"{0}\"></a></td>", href)
        }
        None => format!("<td><span class=\"missing\">{}</span></td>", missing),
    }
}

fn description_cell(description: Option<&str>) -> String {
    match description {
        Some(text) => format!("<td><pre>{}</pre></td>", escape(text)),
        None => "<td><span class=\"missing\">no description</span></td>".to_string(),
    }
}

/// Percent-encoded link to `target` from a page in `output_dir`.
///
/// Both paths are resolved first when they exist, so `..` segments and
/// symlinks in either one still produce a working link.
pub fn link_href(output_dir: &Path, target: &Path) -> String {
    let href = match (fs::canonicalize(output_dir), fs::canonicalize(target)) {
        (Ok(from), Ok(to)) => relative_href(&from, &to),
        _ => relative_href(output_dir, target),
    };
    encode_href(&href)
}

/// Percent-encode everything but unreserved characters and `/`
pub fn encode_href(href: &str) -> String {
    let mut out = String::with_capacity(href.len());
    for byte in href.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' | b'/' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

/// Link to `target` from a page living in `from_dir`.
///
/// Both paths must be of the same kind (relative or absolute); otherwise the
/// target is linked as-is.
pub fn relative_href(from_dir: &Path, target: &Path) -> String {
    let from: Vec<Component> = from_dir
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();
    let to: Vec<Component> = target
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();

    if from_dir.is_absolute() != target.is_absolute() {
        return to_url_path(target);
    }

    let common = from.iter().zip(&to).take_while(|(a, b)| a == b).count();
    if from[common..].iter().any(|c| !matches!(c, Component::Normal(_))) {
        return to_url_path(target);
    }

    let mut href = PathBuf::new();
    for _ in common..from.len() {
        href.push("..");
    }
    for component in &to[common..] {
        href.push(component.as_os_str());
    }
    to_url_path(&href)
}

fn to_url_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Escape text for HTML element content and attribute values
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
