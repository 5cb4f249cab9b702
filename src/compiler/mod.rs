//! Event dispatch for the HTML compile stage.
//!
//! The upstream tokenizer walks the document once, in document order, and
//! feeds the compiler a flat stream of [`Event`]s. Registered extensions
//! receive the enter/exit events they subscribe to and write output through
//! the shared [`CompileContext`]; after the last event, [`HtmlCompiler::finish`]
//! gives every extension one flush callback before returning the document.
//!
//! Add each extension you need by invoking its `add` function like this:
//! ```rust
//! let compiler = &mut mdhtml::HtmlCompiler::new();
//! mdhtml::plugins::footnote::add(
//!     compiler,
//!     mdhtml::plugins::footnote::FootnoteExtensionPlugin::default(),
//! );
//! ```

pub mod context;

use context::CompileContext;

/// Event kinds extensions can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Name {
    /// A whole footnote definition block.
    FootnoteDefinition,
    /// The label text of a footnote definition.
    FootnoteDefinitionLabel,
    /// The label text of a footnote call.
    FootnoteCallLabel,
}

/// One step of the document traversal.
///
/// `Exit` carries the raw source slice of the span being closed, so label
/// handlers can match on source text rather than on rendered output.
/// `Tag`, `Text`, and `LineEnding` are output from surrounding compile
/// stages (paragraphs, blockquotes, …) routed through the same stream.
#[derive(Debug, Clone, Copy)]
pub enum Event<'a> {
    Enter(Name),
    Exit(Name, &'a str),
    Tag(&'a str),
    Text(&'a str),
    LineEnding,
}

/// An extension hooked into the compile stage's event dispatch.
///
/// Callbacks run to completion, one at a time, in document order; an
/// extension accumulates whatever state it needs across them and renders
/// deferred output in [`HtmlExtension::flush`].
pub trait HtmlExtension {
    fn enter(&mut self, cx: &mut CompileContext, name: Name);
    fn exit(&mut self, cx: &mut CompileContext, name: Name, slice: &str);
    /// Called once after the whole document has been traversed.
    fn flush(&mut self, cx: &mut CompileContext);
}

/// Single-pass HTML compiler for one document.
///
/// Create one per document; all mutable state lives in the instance, so
/// concurrent compiles are independent by construction.
#[derive(Default)]
pub struct HtmlCompiler {
    context: CompileContext,
    extensions: Vec<Box<dyn HtmlExtension>>,
}

impl HtmlCompiler {
    pub fn new() -> Self {
        Self {
            context: CompileContext::new(),
            extensions: Vec::new(),
        }
    }

    /// Register an extension. Extensions see events in registration order.
    pub fn register(&mut self, extension: impl HtmlExtension + 'static) {
        self.extensions.push(Box::new(extension));
    }

    /// Dispatch one event.
    pub fn handle(&mut self, event: Event<'_>) {
        match event {
            Event::Enter(name) => {
                for extension in &mut self.extensions {
                    extension.enter(&mut self.context, name);
                }
            }
            Event::Exit(name, slice) => {
                for extension in &mut self.extensions {
                    extension.exit(&mut self.context, name, slice);
                }
            }
            Event::Tag(value) => self.context.tag(value),
            Event::Text(value) => self.context.text(value),
            Event::LineEnding => self.context.line_ending(),
        }
    }

    /// Flush every extension and return the rendered document.
    pub fn finish(mut self) -> String {
        for extension in &mut self.extensions {
            extension.flush(&mut self.context);
        }
        self.context.finish()
    }
}
