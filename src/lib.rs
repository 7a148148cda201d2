//! # inilook - a read-only INI configuration file reader
//!
//! The `inilook::Document` struct holds an INI style configuration
//! read from a file, a string, or any `Read` compatible object, and
//! presents a lookup interface to programs which want to read that
//! configuration.
//!
//! The files are divided up into sections, which are started with the
//! text `[ Section_Name ]`. Options below a section have the form
//! `key = value`. Only the first `=` separates key from value, so
//! values may themselves contain `=` characters. Whitespace around
//! section names, keys and values is ignored.
//!
//! Section names and keys are case independent: both are stored in
//! lowercase, and the lookup methods lowercase their arguments. Values
//! keep their case.
//!
//! Anything following a `#` or `;` character is a comment, whether it
//! starts the line or follows a section header or value.
//!
//! When a key appears twice in the same section, the later value is
//! kept. When a section header appears twice, the later section
//! replaces the earlier one entirely; the two are not merged.
//!
//! ## An example configuration file
//!
//! ```ignore
//! # Config file for myapp
//! [dbserver]
//! host = 192.168.0.10
//! port = 5432
//! user = postgres     ; the default account
//!
//! [apiserver]
//! host = 192.168.0.20
//! port = 8080
//! ```
//!
//! Assuming this file was stored in `/etc/myapp/config.ini`, then the
//! configuration can be loaded thus
//!
//! ```no_run
//! #[macro_use] extern crate log;
//! extern crate inilook;
//!
//! use inilook::Document;
//!
//! fn main() {
//!     match Document::from_file("/etc/myapp/config.ini") {
//!         Ok(cfg) => {
//!             println!("Database at {}:{}", cfg.read("dbserver", "host"),
//!                      cfg.read("dbserver", "port"));
//!             for s in cfg.section_list() {
//!                 println!("Have section {}", s);
//!             }
//!         }
//!         Err(e) => { error!("Cannot load config: {}", e); }
//!     }
//! }
//! ```
//!
//! ## Error Types
//!
//! Loading stops at the first bad line, and no partial configuration
//! is returned. Errors are embedded in the `Error` type, which has the
//! following values and meanings
//!
//! | Value | Meaning |
//! |-------|:--------|
//! | Io | The file or reader could not be read |
//! | InvalidSection | A line starting with `[` is not a well formed, named section header |
//! | InvalidFormat | A line is neither a section header nor a `key = value` pair |
//! | KeyWithoutSection | A `key = value` pair appears before the first section header |
//! | EmptyKey | A `key = value` pair has nothing before the `=` |
//!
//! All but `Io` carry the 1-based line number of the offending line.
//!
//! `Document::read` returns an empty string for a missing section or
//! key. Programs which need to tell those apart from an empty value
//! can use `Document::get`, which returns a `FetchError` instead.
//!

#[macro_use]
extern crate log;

pub mod document;
pub mod error;
pub mod parser;

pub use crate::document::{Document, Section};
pub use crate::error::{Error, FetchError, Result};
