//! The services object handed to compile stage plugins.
//!
//! All output goes through an explicit buffer stack: index 0 is the live
//! document output, and [`CompileContext::buffer`] / [`CompileContext::resume`]
//! redirect subsequent output into a fresh scratch buffer so a plugin can
//! capture (or discard) a span's rendering instead of emitting it in place.

use std::borrow::Cow;

use crate::common::encode::encode;

/// Mutable per-document compile state and output services.
///
/// One context exists per in-flight document compile and is torn down with
/// it; nothing here is shared across compiles.
#[derive(Debug)]
pub struct CompileContext {
    // index 0 is the live output; the rest are scoped captures
    buffers: Vec<String>,
    last_was_tag: bool,
    slurp_one_line_ending: bool,
    /// Whether each enclosing list context is "tight" (suppresses paragraph
    /// wrapping). Plugins that open an independent block scope push `false`.
    pub tight_stack: Vec<bool>,
}

impl Default for CompileContext {
    fn default() -> Self {
        Self::new()
    }
}

impl CompileContext {
    pub fn new() -> Self {
        Self {
            buffers: vec![String::new()],
            last_was_tag: false,
            slurp_one_line_ending: false,
            tight_stack: Vec::new(),
        }
    }

    /// Redirect subsequent output into a fresh scratch buffer.
    pub fn buffer(&mut self) {
        self.buffers.push(String::new());
    }

    /// Stop the innermost redirection and return what it captured.
    ///
    /// Panics if no scoped buffer is active; that is an integration defect,
    /// not a recoverable condition.
    pub fn resume(&mut self) -> String {
        if self.buffers.len() < 2 {
            panic!("resume without a matching buffer");
        }
        self.buffers.pop().unwrap()
    }

    /// Emit markup. The value is trusted; nothing is escaped.
    pub fn tag(&mut self, value: &str) {
        self.push(value);
        self.last_was_tag = true;
    }

    /// Emit already-escaped text content.
    pub fn raw(&mut self, value: &str) {
        self.push(value);
        self.last_was_tag = false;
    }

    /// Escape and emit text content.
    pub fn text(&mut self, value: &str) {
        let encoded = self.encode(value).into_owned();
        self.raw(&encoded);
    }

    /// Escape a value for HTML text content or a double-quoted attribute.
    pub fn encode<'a>(&self, value: &'a str) -> Cow<'a, str> {
        encode(value)
    }

    /// Emit a line ending coming from the source document. Swallowed once
    /// when a plugin has requested it via [`Self::slurp_one_line_ending`].
    pub fn line_ending(&mut self) {
        if self.slurp_one_line_ending {
            self.slurp_one_line_ending = false;
            return;
        }
        self.raw("\n");
    }

    /// Emit a line ending unless the current output already sits at a line
    /// break (or at the very start of its buffer).
    pub fn line_ending_if_needed(&mut self) {
        let at_break = matches!(self.current().chars().last(), None | Some('\n') | Some('\r'));
        if !at_break {
            self.raw("\n");
        }
    }

    /// Request that the next source line ending be swallowed. Used when a
    /// block construct has already accounted for its trailing break.
    pub fn slurp_one_line_ending(&mut self) {
        self.slurp_one_line_ending = true;
    }

    /// Forget that the last emission was a tag, so surrounding line-ending
    /// logic treats the position as plain content.
    pub fn clear_last_was_tag(&mut self) {
        self.last_was_tag = false;
    }

    pub fn last_was_tag(&self) -> bool {
        self.last_was_tag
    }

    /// Tear down the context and return the document output.
    ///
    /// Panics if a scoped buffer is still active at end of compile.
    pub fn finish(mut self) -> String {
        if self.buffers.len() != 1 {
            panic!("compile finished with an unresumed buffer");
        }
        self.buffers.pop().unwrap()
    }

    fn current(&self) -> &str {
        self.buffers.last().expect("buffer stack is never empty")
    }

    fn push(&mut self, value: &str) {
        self.buffers
            .last_mut()
            .expect("buffer stack is never empty")
            .push_str(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captures_are_scoped() {
        let mut cx = CompileContext::new();
        cx.tag("<p>");
        cx.buffer();
        cx.raw("captured");
        cx.buffer();
        cx.raw("inner");
        assert_eq!(cx.resume(), "inner");
        assert_eq!(cx.resume(), "captured");
        cx.tag("</p>");
        assert_eq!(cx.finish(), "<p></p>");
    }

    #[test]
    fn line_ending_if_needed_is_idempotent_at_breaks() {
        let mut cx = CompileContext::new();
        cx.line_ending_if_needed(); // at start of output: nothing
        cx.tag("<ol>");
        cx.line_ending_if_needed();
        cx.line_ending_if_needed();
        assert_eq!(cx.finish(), "<ol>\n");
    }

    #[test]
    fn slurp_swallows_exactly_one_line_ending() {
        let mut cx = CompileContext::new();
        cx.raw("a");
        cx.slurp_one_line_ending();
        cx.line_ending();
        cx.line_ending();
        assert_eq!(cx.finish(), "a\n");
    }

    #[test]
    #[should_panic(expected = "resume without a matching buffer")]
    fn resume_underflow_is_fatal() {
        let mut cx = CompileContext::new();
        cx.resume();
    }
}
