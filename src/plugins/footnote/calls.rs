//! Call rendering.
//!
//! Unlike definitions, calls render inline: the superscript marker has to
//! appear exactly where the call occurs, so the anchor is emitted
//! synchronously from the label's exit callback. Only the cross-referencing
//! (numbering, occurrence counting) is deferred state.

use crate::common::identifier::normalize_identifier;
use crate::common::uri::sanitize_uri;
use crate::compiler::context::CompileContext;

use super::FootnoteHtml;

pub(super) fn on_label_enter(_state: &mut FootnoteHtml, cx: &mut CompileContext) {
    cx.buffer();
}

pub(super) fn on_label_exit(state: &mut FootnoteHtml, cx: &mut CompileContext, slice: &str) {
    // the captured label rendering is never emitted
    cx.resume();

    let id = normalize_identifier(slice);
    let safe_id = sanitize_uri(&id.to_lowercase());
    let (number, occurrence) = state.map.add_call(&id);
    let prefix = &state.config.clobber_prefix;

    let mut anchor = format!(
        "<sup><a href=\"#{prefix}fn-{safe_id}\" id=\"{prefix}fnref-{safe_id}",
        prefix = prefix,
        safe_id = safe_id
    );
    // repeat calls get distinct ids so every back-reference has a target
    if occurrence > 1 {
        anchor.push('-');
        anchor.push_str(&occurrence.to_string());
    }
    anchor.push_str("\" data-footnote-ref=\"\" aria-describedby=\"footnote-label\">");
    anchor.push_str(&number.to_string());
    anchor.push_str("</a></sup>");

    cx.tag(&anchor);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugins::footnote::FootnoteExtensionPlugin;

    fn call(state: &mut FootnoteHtml, cx: &mut CompileContext, label: &str) {
        on_label_enter(state, cx);
        on_label_exit(state, cx, label);
    }

    fn render_calls(labels: &[&str]) -> String {
        let mut state = FootnoteHtml::new(FootnoteExtensionPlugin::default());
        let mut cx = CompileContext::new();
        for label in labels {
            call(&mut state, &mut cx, label);
        }
        cx.finish()
    }

    #[test]
    fn first_call_renders_number_one() {
        assert_eq!(
            render_calls(&["a"]),
            "<sup><a href=\"#user-content-fn-a\" id=\"user-content-fnref-a\" \
             data-footnote-ref=\"\" aria-describedby=\"footnote-label\">1</a></sup>"
        );
    }

    #[test]
    fn repeat_calls_reuse_the_number_with_suffixed_ids() {
        let html = render_calls(&["a", "a", "a"]);
        assert!(html.contains("id=\"user-content-fnref-a\""));
        assert!(html.contains("id=\"user-content-fnref-a-2\""));
        assert!(html.contains("id=\"user-content-fnref-a-3\""));
        assert_eq!(html.matches(">1</a></sup>").count(), 3);
    }

    #[test]
    fn numbers_follow_first_call_order() {
        let html = render_calls(&["b", "a", "b"]);
        let first_a = html.find(">2</a>").expect("a is numbered 2");
        let first_b = html.find(">1</a>").expect("b is numbered 1");
        assert!(first_b < first_a);
    }

    #[test]
    fn labels_differing_in_case_are_one_identifier() {
        let html = render_calls(&["note", "NOTE"]);
        assert!(html.contains("id=\"user-content-fnref-note\""));
        assert!(html.contains("id=\"user-content-fnref-note-2\""));
    }

    #[test]
    fn unsafe_label_characters_are_percent_encoded() {
        let html = render_calls(&["a\\]b"]);
        assert!(html.contains("href=\"#user-content-fn-a%5C%5Db\""));
    }

    #[test]
    fn custom_clobber_prefix_applies_to_href_and_id() {
        let mut state = FootnoteHtml::new(FootnoteExtensionPlugin {
            clobber_prefix: String::new(),
            ..FootnoteExtensionPlugin::default()
        });
        let mut cx = CompileContext::new();
        call(&mut state, &mut cx, "a");
        assert_eq!(
            cx.finish(),
            "<sup><a href=\"#fn-a\" id=\"fnref-a\" data-footnote-ref=\"\" \
             aria-describedby=\"footnote-label\">1</a></sup>"
        );
    }
}
