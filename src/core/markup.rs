//! Article body markup: detection and HTML-to-markdown conversion
//!
//! Bodies are trusted and never sanitized. HTML surfaces take HTML bodies
//! verbatim; the egui surface only understands markdown, so HTML bodies are
//! converted for it.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex_lite::{Captures, Regex};

/// How an article body is written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkupKind {
    Html,
    Markdown,
}

/// Any opening, closing or self-closing element tag
static TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"</?[a-zA-Z][a-zA-Z0-9-]*(?:\s[^<>]*)?/?>").expect("valid tag regex"));

static PRE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<pre[^>]*>(.*?)</pre\s*>").expect("valid pre regex"));
static SCRIPT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<(?:script|style)[^>]*>.*?</(?:script|style)\s*>").expect("valid script regex"));
static HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<h([1-6])[^>]*>(.*?)</h[1-6]\s*>").expect("valid heading regex"));
static BLOCKQUOTE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<blockquote[^>]*>(.*?)</blockquote\s*>").expect("valid blockquote regex"));
static ORDERED_LIST: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<ol[^>]*>(.*?)</ol\s*>").expect("valid ordered list regex"));
static LIST_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<li(?:\s[^>]*)?>").expect("valid list item regex"));
static LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?is)<a\s[^>]*?href\s*=\s*["']([^"']*)["'][^>]*>(.*?)</a\s*>"#).expect("valid link regex"));
static IMAGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)<img\s[^>]*?src\s*=\s*["']([^"']*)["'][^>]*>"#).expect("valid image regex"));
static CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<code[^>]*>(.*?)</code\s*>").expect("valid code regex"));
static STRONG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)</?(?:strong|b)(?:\s[^>]*)?>").expect("valid strong regex"));
static EMPHASIS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)</?(?:em|i)(?:\s[^>]*)?>").expect("valid emphasis regex"));
static LINE_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<br\s*/?>").expect("valid line break regex"));
static RULE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<hr[^>]*>").expect("valid rule regex"));
static CELL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)</?t[dh](?:\s[^>]*)?>").expect("valid cell regex"));
static BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?i)</?(?:p|div|section|article|header|footer|main|aside|nav|",
        r"ul|ol|table|thead|tbody|tr|figure|figcaption)(?:\s[^>]*)?>",
    ))
    .expect("valid block regex")
});
static ANY_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").expect("valid tag strip regex"));
static NUMERIC_ENTITY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&#([xX]?)([0-9a-fA-F]+);").expect("valid entity regex"));
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));
static BLANK_LINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").expect("valid blank line regex"));

/// Marks a preformatted block stashed away during conversion
const PRE_MARK: char = '\u{E000}';

/// Bodies containing any element tag are HTML; everything else is markdown
pub fn detect(content: &str) -> MarkupKind {
    if TAG.is_match(content) {
        MarkupKind::Html
    } else {
        MarkupKind::Markdown
    }
}

/// Body as markdown, converting HTML bodies
pub fn to_markdown(content: &str) -> Cow<'_, str> {
    match detect(content) {
        MarkupKind::Markdown => Cow::Borrowed(content),
        MarkupKind::Html => Cow::Owned(html_to_markdown(content)),
    }
}

/// Convert the common subset of article HTML to markdown. Unknown tags are
/// dropped and their text kept.
pub fn html_to_markdown(html: &str) -> String {
    let mut blocks = Vec::new();
    let stashed = PRE.replace_all(html, |caps: &Captures| {
        let code = decode_entities(&ANY_TAG.replace_all(&caps[1], ""));
        blocks.push(code.trim_matches('\n').to_string());
        format!("\n\n{PRE_MARK}{}{PRE_MARK}\n\n", blocks.len() - 1)
    });

    let mut markdown = convert(&stashed);
    for (idx, code) in blocks.iter().enumerate() {
        let mark = format!("{PRE_MARK}{idx}{PRE_MARK}");
        markdown = markdown.replace(&mark, &format!("```\n{code}\n```"));
    }
    markdown
}

fn convert(html: &str) -> String {
    let text = SCRIPT.replace_all(html, "");

    let text = ORDERED_LIST.replace_all(&text, |caps: &Captures| {
        let mut n = 0;
        let items = LIST_ITEM.replace_all(&caps[1], |_: &Captures| {
            n += 1;
            format!("\n{n}. ")
        });
        format!("\n\n{items}\n\n")
    });
    let text = LIST_ITEM.replace_all(&text, "\n- ");

    let text = HEADING.replace_all(&text, |caps: &Captures| {
        let level: usize = caps[1].parse().unwrap_or(1);
        let inner = WHITESPACE.replace_all(caps[2].trim(), " ");
        format!("\n\n{} {}\n\n", "#".repeat(level), inner)
    });

    let text = BLOCKQUOTE.replace_all(&text, |caps: &Captures| {
        let quoted: Vec<String> = convert(&caps[1]).lines().map(|line| format!("> {line}")).collect();
        format!("\n\n{}\n\n", quoted.join("\n"))
    });

    let text = LINK.replace_all(&text, "[$2]($1)");
    let text = IMAGE.replace_all(&text, "![]($1)");
    let text = CODE.replace_all(&text, "`$1`");
    let text = STRONG.replace_all(&text, "**");
    let text = EMPHASIS.replace_all(&text, "*");
    let text = LINE_BREAK.replace_all(&text, "  \n");
    let text = RULE.replace_all(&text, "\n\n---\n\n");
    let text = CELL.replace_all(&text, " ");
    let text = BLOCK.replace_all(&text, "\n\n");
    let text = ANY_TAG.replace_all(&text, "");
    let text = decode_entities(&text);

    // Source indentation would otherwise read as code blocks
    let text: Vec<&str> = text.lines().map(str::trim_start).collect();
    BLANK_LINES.replace_all(&text.join("\n"), "\n\n").trim().to_string()
}

fn decode_entities(text: &str) -> String {
    let text = NUMERIC_ENTITY.replace_all(text, |caps: &Captures| {
        let radix = if caps[1].is_empty() { 10 } else { 16 };
        u32::from_str_radix(&caps[2], radix)
            .ok()
            .and_then(char::from_u32)
            .map(String::from)
            .unwrap_or_else(|| caps[0].to_string())
    });

    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
