//! End-of-document rendering of the footnotes section.
//!
//! Runs once, after the whole event stream has been consumed, reading only
//! the accumulated cross-reference state. Iteration is driven by the call
//! ledger, so a definition that was never called produces no output at all.

use crate::common::encode::encode;
use crate::common::uri::sanitize_uri;
use crate::compiler::context::CompileContext;

use super::{BackLabel, FootnoteExtensionPlugin, FootnoteHtml};

pub(super) fn render(state: &FootnoteHtml, cx: &mut CompileContext) {
    let config = &state.config;
    let call_order = state.map.call_order();
    if call_order.is_empty() {
        return;
    }

    cx.line_ending_if_needed();
    let attributes = if config.label_attributes.is_empty() {
        String::new()
    } else {
        format!(" {}", config.label_attributes)
    };
    cx.tag(&format!(
        "<section data-footnotes=\"\" class=\"footnotes\"><{} id=\"footnote-label\"{}>",
        config.label_tag_name, attributes
    ));
    cx.raw(&encode(&config.label));
    cx.tag(&format!("</{}>", config.label_tag_name));
    cx.line_ending_if_needed();
    cx.tag("<ol>");

    for (index, id) in call_order.iter().enumerate() {
        let safe_id = sanitize_uri(&id.to_lowercase());
        let count = state.map.call_count(id);
        let references = (1..=count)
            .map(|occurrence| back_reference(config, index, occurrence, &safe_id))
            .collect::<Vec<_>>()
            .join(" ");

        cx.line_ending_if_needed();
        cx.tag(&format!("<li id=\"{}fn-{}\">", config.clobber_prefix, safe_id));
        cx.line_ending_if_needed();

        let body = state
            .map
            .definition(id)
            .expect("footnote call without a definition");

        match split_trailing_paragraph(body) {
            // last block is a paragraph: the back-references go inline at
            // the end of its last sentence
            Some((head, tail)) => {
                cx.tag(head);
                cx.tag(" ");
                cx.tag(&references);
                cx.tag(tail);
            }
            None => {
                cx.tag(body);
                cx.line_ending_if_needed();
                cx.tag(&references);
            }
        }

        cx.line_ending_if_needed();
        cx.tag("</li>");
    }

    cx.line_ending_if_needed();
    cx.tag("</ol>");
    cx.line_ending_if_needed();
    cx.tag("</section>");
}

/// Split a rendered body before its final paragraph close, when the body's
/// last top-level block is a paragraph.
///
/// Returns `(head, tail)` where `tail` starts at the closing `</p>` and
/// keeps at most one trailing line ending. Bodies ending in any other block
/// get `None`, and the caller appends the references as their own block.
fn split_trailing_paragraph(body: &str) -> Option<(&str, &str)> {
    let without_eol = body
        .strip_suffix("\r\n")
        .or_else(|| body.strip_suffix('\n'))
        .or_else(|| body.strip_suffix('\r'))
        .unwrap_or(body);
    if !without_eol.ends_with("</p>") {
        return None;
    }
    let at = without_eol.len() - "</p>".len();
    Some((&body[..at], &body[at..]))
}

fn back_reference(
    config: &FootnoteExtensionPlugin,
    index: usize,
    occurrence: usize,
    safe_id: &str,
) -> String {
    let label = match &config.back_label {
        BackLabel::Fixed(text) => text.clone(),
        BackLabel::PerReference => default_back_label(index, occurrence),
    };

    let mut anchor = format!(
        "<a href=\"#{}fnref-{}",
        config.clobber_prefix, safe_id
    );
    if occurrence > 1 {
        anchor.push('-');
        anchor.push_str(&occurrence.to_string());
    }
    anchor.push_str(
        "\" data-footnote-backref=\"\" class=\"data-footnote-backref\" aria-label=\"",
    );
    anchor.push_str(&encode(&label));
    anchor.push_str("\">↩");
    // repeats get a visible superscript so the links stay distinguishable
    if occurrence > 1 {
        anchor.push_str("<sup>");
        anchor.push_str(&occurrence.to_string());
        anchor.push_str("</sup>");
    }
    anchor.push_str("</a>");
    anchor
}

fn default_back_label(index: usize, occurrence: usize) -> String {
    let mut label = format!("Back to reference {}", index + 1);
    if occurrence > 1 {
        label.push('-');
        label.push_str(&occurrence.to_string());
    }
    label
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_paragraph_bodies() {
        assert_eq!(
            split_trailing_paragraph("<p>whatevs</p>"),
            Some(("<p>whatevs", "</p>"))
        );
        assert_eq!(
            split_trailing_paragraph("<p>a</p>\n<p>b</p>\n"),
            Some(("<p>a</p>\n<p>b", "</p>\n"))
        );
        assert_eq!(
            split_trailing_paragraph("<p>crlf</p>\r\n"),
            Some(("<p>crlf", "</p>\r\n"))
        );
    }

    #[test]
    fn rejects_non_paragraph_endings() {
        assert_eq!(split_trailing_paragraph("<p>a</p>\n<blockquote>\n<p>b</p>\n</blockquote>"), None);
        assert_eq!(split_trailing_paragraph("<pre><code>x\n</code></pre>"), None);
        assert_eq!(split_trailing_paragraph(""), None);
        // only a single trailing line ending is looked through
        assert_eq!(split_trailing_paragraph("<p>a</p>\n\n"), None);
    }

    #[test]
    fn default_back_label_is_per_reference() {
        assert_eq!(default_back_label(0, 1), "Back to reference 1");
        assert_eq!(default_back_label(0, 2), "Back to reference 1-2");
        assert_eq!(default_back_label(2, 1), "Back to reference 3");
    }

    #[test]
    fn back_reference_shapes() {
        let config = FootnoteExtensionPlugin::default();
        assert_eq!(
            back_reference(&config, 0, 1, "a"),
            "<a href=\"#user-content-fnref-a\" data-footnote-backref=\"\" \
             class=\"data-footnote-backref\" aria-label=\"Back to reference 1\">↩</a>"
        );
        assert_eq!(
            back_reference(&config, 0, 2, "a"),
            "<a href=\"#user-content-fnref-a-2\" data-footnote-backref=\"\" \
             class=\"data-footnote-backref\" aria-label=\"Back to reference 1-2\">↩<sup>2</sup></a>"
        );
    }

    #[test]
    fn fixed_back_label_is_encoded() {
        let config = FootnoteExtensionPlugin {
            back_label: BackLabel::Fixed("tillbaka till \"texten\"".to_string()),
            ..FootnoteExtensionPlugin::default()
        };
        let anchor = back_reference(&config, 0, 1, "a");
        assert!(anchor.contains("aria-label=\"tillbaka till &quot;texten&quot;\""));
    }
}
