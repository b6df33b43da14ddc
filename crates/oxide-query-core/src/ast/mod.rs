//! Abstract Syntax Tree (AST) types for `select` statements.

mod condition;
mod statement;

pub use condition::{Comparator, Condition, Literal, LogicOp};
pub use statement::{AggregationKind, FieldSpec, SelectStatement, SortDirection};
