//! typv-core: a good memory for variable fonts
//!
//! Asking a font about its axes, named instances and STAT styles is not
//! free. Somebody has to open the file, walk `fvar`, chase name records and
//! decode axis value tables. This crate makes sure that work happens once
//! per font, however many times and from however many threads the question
//! is asked.
//!
//! ## How the pieces fit
//!
//! - [`ListedFont`] says which font we mean. Its [`CacheKey`] is
//!   `psname:<PostScript name>` when the font has one, `path:<file>` when not.
//! - [`VariableDataStore`] remembers [`VariableFontData`] per key behind a
//!   single lock.
//! - [`VariableDataResolver`] gathers everything missing from a request,
//!   fetches it in one batch through a [`VariableDataFetcher`], and commits
//!   the whole batch at once (or not at all).
//! - [`FontFileFetcher`] is the fetcher that reads font files in-process;
//!   anything else (an IPC client, a test double) can stand in for it.
//!
//! ## A Short Conversation
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//! use typv_core::fontfile::FontFileFetcher;
//! use typv_core::listing::{list_fonts, ListOptions};
//! use typv_core::resolver::VariableDataResolver;
//!
//! let fonts = list_fonts(&[PathBuf::from("/Library/Fonts")], &ListOptions::default())?;
//! let variable: Vec<_> = fonts.into_iter().filter(|f| f.is_variable).collect();
//!
//! let resolver = VariableDataResolver::new(FontFileFetcher::new());
//! resolver.ensure(&variable)?; // one batched fetch for everything missing
//!
//! for font in &variable {
//!     let data = resolver.lookup(font); // served from memory
//!     println!("{}: {} axes", font.full_name, data.axes.len());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! The cache lives as long as the process does; nothing is written to disk.
//!
//! ---
//!
//! Crafted with care at FontLab https://www.fontlab.com/

pub mod discovery;
pub mod error;
pub mod fetch;
pub mod fontfile;
pub mod key;
pub mod listing;
pub mod model;
mod names;
pub mod output;
pub mod query;
pub mod resolver;
pub mod store;
pub mod tags;

pub use error::VariableDataError;
pub use fetch::VariableDataFetcher;
pub use fontfile::FontFileFetcher;
pub use key::CacheKey;
pub use model::{
    AxisValue, DesignAxis, FontDescriptor, ListedFont, MultiAxisStyle, NamedStyle, VariableAxis,
    VariableFontData,
};
pub use resolver::VariableDataResolver;
pub use store::VariableDataStore;
