//! HTML presentation adapter
//!
//! Writes a [`Page`] as markup using the same class names a static site
//! stylesheet targets. Article bodies are trusted: HTML bodies are emitted
//! verbatim and markdown bodies are converted.

use std::fmt::Write;

use pulldown_cmark::{html, Options, Parser};
use pulldown_cmark_escape::escape_html;

use crate::core::markup::{self, MarkupKind};
use crate::core::view::{Card, DetailView, ImageRef, Page, View};

/// Render the main content area only
pub fn render_content(view: &View) -> String {
    let mut out = String::new();
    match view {
        View::Grid(cards) => {
            out.push_str("<div class=\"articles-grid\">\n");
            for card in cards {
                render_card(&mut out, card);
            }
            out.push_str("</div>\n");
        }
        View::NoResults { message } => {
            let _ = writeln!(out, "<p class=\"no-results\">{}</p>", escape(message));
        }
        View::Detail(detail) => render_detail(&mut out, detail),
        View::NotFound {
            message,
            link_href,
            link_label,
        } => {
            let _ = writeln!(
                out,
                "<p>{} <a href=\"{}\">{}</a></p>",
                escape(message),
                escape(link_href),
                escape(link_label)
            );
        }
        View::LoadFailed { message } => {
            let _ = writeln!(out, "<p>{}</p>", escape(message));
        }
    }
    out
}

/// Render a complete standalone document
pub fn render_document(page: &Page, title: &str) -> String {
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(out, "<title>{}</title>", escape(title));
    out.push_str("</head>\n<body>\n");

    let display = if page.controls_visible { "flex" } else { "none" };
    let _ = writeln!(out, "<div id=\"controls\" style=\"display: {display}\">");
    out.push_str("<input type=\"search\" id=\"searchInput\">\n<select id=\"sortSelect\"></select>\n</div>\n");

    out.push_str("<main id=\"app\">\n");
    out.push_str(&render_content(&page.view));
    out.push_str("</main>\n</body>\n</html>\n");
    out
}

fn render_card(out: &mut String, card: &Card) {
    let close = match &card.href {
        Some(href) => {
            let _ = writeln!(out, "<a class=\"card\" href=\"{}\">", escape(href));
            "</a>\n"
        }
        None => {
            out.push_str("<div class=\"card\">\n");
            "</div>\n"
        }
    };
    render_image(out, &card.image, "card-image");
    let _ = writeln!(
        out,
        "<div class=\"card-content\"><span class=\"card-date\">{}</span><h3 class=\"card-title\">{}</h3></div>",
        escape(&card.date),
        escape(&card.title)
    );
    out.push_str(close);
}

fn render_detail(out: &mut String, detail: &DetailView) {
    let _ = writeln!(
        out,
        "<a href=\"{}\" class=\"back-btn\">{}</a>",
        escape(&detail.back_href),
        escape(&detail.back_label)
    );
    out.push_str("<article class=\"article-detail\">\n<header class=\"detail-header\">\n");
    let _ = writeln!(out, "<h1 class=\"detail-title\">{}</h1>", escape(&detail.title));
    let _ = writeln!(out, "<div class=\"detail-meta\">{}</div>", escape(&detail.meta));
    out.push_str("</header>\n");
    render_image(out, &detail.image, "detail-image");
    out.push_str("<div class=\"detail-body\">\n");
    out.push_str(&render_markup(&detail.content));
    out.push_str("</div>\n</article>\n");
}

fn render_image(out: &mut String, image: &ImageRef, class: &str) {
    let _ = writeln!(
        out,
        "<img src=\"{}\" alt=\"{}\" class=\"{}\" onerror=\"this.onerror=null;this.src='{}'\">",
        escape(&image.src),
        escape(&image.alt),
        class,
        escape(&image.fallback)
    );
}

/// Article body to HTML. Not sanitized.
pub fn render_markup(content: &str) -> String {
    if markup::detect(content) == MarkupKind::Html {
        return content.to_string();
    }

    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);

    let parser = Parser::new_ext(content, options);
    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    // Writing into a String cannot fail
    let _ = escape_html(&mut out, text);
    out
}
