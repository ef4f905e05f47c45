//! Core minimization machinery: the generic ddmin engine, the granularity
//! adapters that turn a textual artifact into element sequences, and the
//! token-edit proposer.
//!
//! Everything in this crate is pure: no file I/O, no subprocesses. The
//! oracle that decides whether a candidate still reproduces the condition
//! under investigation lives behind the `test` closures handed to
//! [`ddmin::ddmin`].

pub mod ddmin;
pub mod granularity;
pub mod outcome;
pub mod propose;
pub mod result;
pub mod spans;

pub use ddmin::{ddmin, ddmin_complement, minus};
pub use outcome::Outcome;
pub use result::{Error, Result};
pub use spans::{apply_spans, EditSpan};
