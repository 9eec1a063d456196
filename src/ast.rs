//! # Query Expression Tree
//!
//! Queries are predicate trees over a schema-typed data structure. On the wire
//! they are JSON: an array is an operator call whose first element is the
//! operator token, anything else is a literal.
//!
//! ```text
//! ["and",
//!   ["eq", ["resolve", "subject", "karyotypic_sex"], "XO"],
//!   ["co", ["resolve", "biosamples", "[item]", "procedure", "code", "id"], "TE"]]
//! ```
//!
//! The [`crate::parser`] decodes that form into [`QueryExpr`], a closed tree
//! with one variant per operator, so evaluation never sees an unknown token.
//!
//! ## Operators
//!
//! - **Logical** `and`, `or` (2 args), `not` (1 arg)
//! - **Comparison** `lt`, `le`, `eq`, `gt`, `ge` (2 args)
//! - **Membership** `co` (2 args): right operand is an element or substring of the left
//! - **Path** `resolve` (0..n args): walks the data guided by the schema
//!
//! ## Broadcasting
//!
//! A resolve path that crosses an array (the `[item]` wildcard) yields one
//! value per element. Binary operators then test every left/right
//! combination and succeed if any combination does.
pub mod operators;
pub mod query;

pub use operators::{CompareOp, Operator};
pub use query::{PathToken, QueryExpr, WILDCARD};
