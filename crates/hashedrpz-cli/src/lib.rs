//! # hashedrpz-cli
//!
//! Command-line front end for [`hashedrpz_core`].
//!
//! ## Features
//!
//! - **Line-oriented hashing**: one domain per input line, one hashed
//!   ownername per output line, from stdin or files
//! - **Too-long handling**: fail, wildcard at the last fitting label, or skip
//! - **Zone helpers**: echo the original name as a comment, add blanket
//!   wildcard siblings, append the origin
//! - **Multiple output formats**: plain names, JSON lines, CSV
//! - **Explain mode**: `--explain` shows every hashed level on stderr

pub mod cli;
pub mod config;
pub mod explain;
pub mod output;

pub use cli::run;
