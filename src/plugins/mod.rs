//! Ready-to-use compile stage plugins.
//!
//! Each plugin exposes an `add` function that registers its enter/exit
//! callbacks against the compiler's event dispatch:
//! ```rust
//! let compiler = &mut mdhtml::HtmlCompiler::new();
//! mdhtml::plugins::footnote::add(
//!     compiler,
//!     mdhtml::plugins::footnote::FootnoteExtensionPlugin::default(),
//! );
//! ```

pub mod footnote;
