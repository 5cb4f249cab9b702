// useful asserts that's off by default
#![warn(clippy::manual_assert)]
#![warn(clippy::semicolon_if_nothing_returned)]
//
// these are often intentionally not collapsed for readability
#![allow(clippy::collapsible_else_if)]
#![allow(clippy::collapsible_if)]
#![allow(clippy::collapsible_match)]
//
// just a style choice that clippy has no business complaining about
#![allow(clippy::uninlined_format_args)]

//! HTML compile stage plugins for a streaming markdown compiler.
//!
//! The compiler consumes a flat stream of enter/exit events produced by an
//! upstream tokenizer and assembles HTML incrementally, without building a
//! document tree. Extensions subscribe to the event kinds they care about
//! and use the [`CompileContext`] services (scoped buffers, raw output,
//! line-ending normalization, escaping) to produce their markup.
//!
//! ```
//! use mdhtml::plugins::footnote::FootnoteExtensionPlugin;
//! use mdhtml::{Event, HtmlCompiler, Name};
//!
//! let mut compiler = HtmlCompiler::new();
//! mdhtml::plugins::footnote::add(&mut compiler, FootnoteExtensionPlugin::default());
//! compiler.handle(Event::Tag("<p>"));
//! compiler.handle(Event::Text("A call."));
//! compiler.handle(Event::Enter(Name::FootnoteCallLabel));
//! compiler.handle(Event::Exit(Name::FootnoteCallLabel, "a"));
//! compiler.handle(Event::Tag("</p>"));
//! compiler.handle(Event::Enter(Name::FootnoteDefinition));
//! compiler.handle(Event::Enter(Name::FootnoteDefinitionLabel));
//! compiler.handle(Event::Exit(Name::FootnoteDefinitionLabel, "a"));
//! compiler.handle(Event::Tag("<p>"));
//! compiler.handle(Event::Text("whatevs"));
//! compiler.handle(Event::Tag("</p>"));
//! compiler.handle(Event::Exit(Name::FootnoteDefinition, ""));
//! let html = compiler.finish();
//! assert!(html.starts_with("<p>A call.<sup>"));
//! ```

pub mod common;
pub mod compiler;
pub mod plugins;

pub use compiler::context::CompileContext;
pub use compiler::{Event, HtmlCompiler, HtmlExtension, Name};
