//! Definition ingestion.
//!
//! A definition's label is captured, normalized, and discarded — it is only
//! ever matched against calls, never rendered. The body renders through the
//! regular compile stages but into a scoped buffer, so it can be stored for
//! deferred insertion into the footnotes section instead of appearing where
//! the definition sits in the source.

use crate::common::identifier::normalize_identifier;
use crate::compiler::context::CompileContext;

use super::FootnoteHtml;

pub(super) fn on_enter(_state: &mut FootnoteHtml, cx: &mut CompileContext) {
    // the body is its own block scope, never a tight list continuation
    cx.tight_stack.push(false);
    // start capturing the rendered body
    cx.buffer();
}

pub(super) fn on_label_enter(_state: &mut FootnoteHtml, cx: &mut CompileContext) {
    cx.buffer();
}

pub(super) fn on_label_exit(state: &mut FootnoteHtml, cx: &mut CompileContext, slice: &str) {
    // drop the captured label rendering; matching is on the source slice
    cx.resume();
    state
        .map
        .definition_stack
        .push(normalize_identifier(slice));
}

pub(super) fn on_exit(state: &mut FootnoteHtml, cx: &mut CompileContext) {
    let id = state
        .map
        .definition_stack
        .pop()
        .expect("definition exit without a label");
    let body = cx.resume();
    state.map.register_def(id, body);

    cx.tight_stack.pop();
    // a definition in an otherwise empty list item would otherwise leave a
    // stray line ending behind
    cx.slurp_one_line_ending();
    cx.clear_last_was_tag();
}
