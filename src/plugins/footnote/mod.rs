//! A compile stage plugin for resolving and rendering footnotes.
//!
//! Calls and definitions arrive at arbitrary positions in the event stream:
//! a call can precede or follow its definition, definitions can repeat, and
//! calls can repeat. The plugin accumulates both sides while the document
//! streams through, emits each call marker inline as a numbered superscript
//! link, and renders the footnotes section once at end of document, numbered
//! by first-call order with back-references to every call site.
//!
//! ```
//! use mdhtml::plugins::footnote::{self, FootnoteExtensionPlugin};
//! use mdhtml::{Event, HtmlCompiler, Name};
//!
//! let mut compiler = HtmlCompiler::new();
//! footnote::add(&mut compiler, FootnoteExtensionPlugin::default());
//! for event in [
//!     Event::Tag("<p>"),
//!     Event::Text("A call."),
//!     Event::Enter(Name::FootnoteCallLabel),
//!     Event::Exit(Name::FootnoteCallLabel, "a"),
//!     Event::Tag("</p>"),
//!     Event::LineEnding,
//!     Event::Enter(Name::FootnoteDefinition),
//!     Event::Enter(Name::FootnoteDefinitionLabel),
//!     Event::Exit(Name::FootnoteDefinitionLabel, "a"),
//!     Event::Tag("<p>"),
//!     Event::Text("whatevs"),
//!     Event::Tag("</p>"),
//!     Event::Exit(Name::FootnoteDefinition, ""),
//! ] {
//!     compiler.handle(event);
//! }
//! let html = compiler.finish();
//! assert!(html.contains("<section data-footnotes=\"\" class=\"footnotes\">"));
//! ```

use std::collections::HashMap;

use crate::compiler::context::CompileContext;
use crate::compiler::{HtmlCompiler, HtmlExtension, Name};

pub mod calls;
pub mod definitions;
pub mod section;

/// Add the footnote plugin to the compiler.
pub fn add(compiler: &mut HtmlCompiler, config: FootnoteExtensionPlugin) {
    compiler.register(FootnoteHtml::new(config));
}

/// The accessible label carried by each back-reference link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackLabel {
    /// The same phrase on every back-reference.
    Fixed(String),
    /// `Back to reference N`, with a `-M` suffix on repeat occurrences.
    PerReference,
}

impl Default for BackLabel {
    fn default() -> Self {
        BackLabel::PerReference
    }
}

/// Configuration for the footnote plugin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FootnoteExtensionPlugin {
    /// Prepended to every generated id and href fragment.
    ///
    /// Generated ids are derived from author-controlled labels; without a
    /// prefix, a label could collide with and clobber unrelated element ids
    /// that scripts resolve through the DOM.
    pub clobber_prefix: String,
    /// Heading text of the footnotes section.
    pub label: String,
    /// Element used for the section heading.
    pub label_tag_name: String,
    /// Attributes applied to the section heading, as a raw attribute string.
    /// Empty means no extra attributes.
    pub label_attributes: String,
    /// Accessible label on each back-reference link.
    pub back_label: BackLabel,
}

impl Default for FootnoteExtensionPlugin {
    fn default() -> Self {
        Self {
            clobber_prefix: "user-content-".to_string(),
            label: "Footnotes".to_string(),
            label_tag_name: "h2".to_string(),
            label_attributes: "class=\"sr-only\"".to_string(),
            back_label: BackLabel::default(),
        }
    }
}

/// Cross-reference state accumulated while a document streams through.
///
/// All fields are scoped to one compile and read-only during the flush.
#[derive(Debug, Default)]
pub struct FootnoteMap {
    // first definition wins; later bodies for the same identifier are dropped
    definitions: HashMap<String, String>,
    // definitions may nest their parse before the matching exit arrives
    definition_stack: Vec<String>,
    // unique identifiers in first-call order; position + 1 is the visible number
    call_order: Vec<String>,
    call_counts: HashMap<String, usize>,
}

impl FootnoteMap {
    /// Register a definition body, keeping the first body seen per identifier.
    pub fn register_def(&mut self, id: String, body: String) {
        self.definitions.entry(id).or_insert(body);
    }

    /// Record one call and return `(number, occurrence)`: the footnote's
    /// visible number (1-based first-call position) and how many times this
    /// identifier has been called so far.
    pub fn add_call(&mut self, id: &str) -> (usize, usize) {
        let number = match self.call_order.iter().position(|known| known == id) {
            Some(index) => index + 1,
            None => {
                self.call_order.push(id.to_string());
                self.call_order.len()
            }
        };
        let occurrence = self
            .call_counts
            .entry(id.to_string())
            .and_modify(|count| *count += 1)
            .or_insert(1);
        (number, *occurrence)
    }

    /// Identifiers in first-call order.
    pub fn call_order(&self) -> &[String] {
        &self.call_order
    }

    pub fn call_count(&self, id: &str) -> usize {
        self.call_counts.get(id).copied().unwrap_or(0)
    }

    pub fn definition(&self, id: &str) -> Option<&str> {
        self.definitions.get(id).map(String::as_str)
    }
}

/// The registered extension: configuration plus per-document state.
#[derive(Debug, Default)]
pub struct FootnoteHtml {
    config: FootnoteExtensionPlugin,
    map: FootnoteMap,
}

impl FootnoteHtml {
    pub fn new(config: FootnoteExtensionPlugin) -> Self {
        Self {
            config,
            map: FootnoteMap::default(),
        }
    }
}

impl HtmlExtension for FootnoteHtml {
    fn enter(&mut self, cx: &mut CompileContext, name: Name) {
        match name {
            Name::FootnoteDefinition => definitions::on_enter(self, cx),
            Name::FootnoteDefinitionLabel => definitions::on_label_enter(self, cx),
            Name::FootnoteCallLabel => calls::on_label_enter(self, cx),
        }
    }

    fn exit(&mut self, cx: &mut CompileContext, name: Name, slice: &str) {
        match name {
            Name::FootnoteDefinition => definitions::on_exit(self, cx),
            Name::FootnoteDefinitionLabel => definitions::on_label_exit(self, cx, slice),
            Name::FootnoteCallLabel => calls::on_label_exit(self, cx, slice),
        }
    }

    fn flush(&mut self, cx: &mut CompileContext) {
        section::render(self, cx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_definition_wins() {
        let mut map = FootnoteMap::default();
        map.register_def("A".to_string(), "<p>first</p>".to_string());
        map.register_def("A".to_string(), "<p>second</p>".to_string());
        assert_eq!(map.definition("A"), Some("<p>first</p>"));
    }

    #[test]
    fn numbering_follows_first_call_order() {
        let mut map = FootnoteMap::default();
        assert_eq!(map.add_call("B"), (1, 1));
        assert_eq!(map.add_call("A"), (2, 1));
        assert_eq!(map.add_call("B"), (1, 2));
        assert_eq!(map.add_call("B"), (1, 3));
        assert_eq!(map.call_order(), ["B", "A"]);
        assert_eq!(map.call_count("B"), 3);
        assert_eq!(map.call_count("A"), 1);
    }

    #[test]
    fn uncalled_identifier_has_zero_count() {
        let map = FootnoteMap::default();
        assert_eq!(map.call_count("A"), 0);
    }
}
