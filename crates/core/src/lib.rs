//! Clause-level decomposition of MySQL `SELECT` statements.
//!
//! [`parse`] splits a statement into its top-level clauses — modifiers,
//! column list, tables, `WHERE` and friends — and reports, for each clause,
//! the verbatim source text plus the byte offsets of the `?` placeholders
//! that belong to it. A placeholder nested inside a subquery is attributed
//! to the clause that contains the subquery, which is what parameter
//! binding tools need.
//!
//! ```
//! use sqlsect_core::SectionKind;
//!
//! let result = sqlsect_core::parse("SELECT a FROM t WHERE b = ?").unwrap();
//! let where_clause = result.section(SectionKind::Where).unwrap();
//!
//! assert_eq!(where_clause.content(), "b = ?");
//! assert_eq!(where_clause.placeholders(), &[4]);
//! ```
//!
//! The parser validates structure only. It never evaluates expressions,
//! resolves names or reformats text; clause contents are byte-for-byte
//! slices of the input.

mod errors;
mod keywords;
pub mod lexer;
mod parser;
mod sections;

pub use errors::ParseError;
pub use sections::{ParseResult, SectionKind, SqlSection};

/// Parses a single MySQL `SELECT` statement.
///
/// Returns [`ParseError::InvalidSyntax`] on any grammar mismatch, any
/// construct that never terminates, or trailing tokens after the statement.
pub fn parse(sql: &str) -> Result<ParseResult, ParseError> {
    parser::Parser::new(sql).run()
}

/// Byte-buffer front end to [`parse`]. Input that is not valid UTF-8 is
/// rejected as [`ParseError::InvalidArgument`].
pub fn parse_bytes(sql: &[u8]) -> Result<ParseResult, ParseError> {
    let sql = std::str::from_utf8(sql).map_err(|_| ParseError::InvalidArgument)?;
    parse(sql)
}
