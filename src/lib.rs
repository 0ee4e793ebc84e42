//! Parserlib: a CSS3 parser with value validation and incremental re-parsing.
//!
//! The parsing itself lives in the `parserlib_css3` crate, this crate re-exports it and adds
//! the helpers shared by the command line tools.

pub use parserlib_css3 as css3;
pub use parserlib_shared as shared;

pub mod snippet;
