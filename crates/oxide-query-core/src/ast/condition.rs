//! Condition tree AST types.

use core::fmt;

/// A comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Comparator {
    Equal,
    NotEqual,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,
    Like,
}

impl Comparator {
    /// Returns the canonical query text of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Equal => "=",
            Self::NotEqual => "!=",
            Self::Greater => ">",
            Self::GreaterEqual => ">=",
            Self::Less => "<",
            Self::LessEqual => "<=",
            Self::Like => "like",
        }
    }
}

/// How the members of a condition group combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LogicOp {
    And,
    Or,
    /// Negation of exactly one subcondition.
    Not,
}

impl LogicOp {
    /// Returns the canonical query text of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::And => "and",
            Self::Or => "or",
            Self::Not => "not",
        }
    }
}

/// The right-hand side of a comparison.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Literal {
    /// String contents without the surrounding quotes.
    String(String),
    /// Number in its source form (e.g., `-0x1A`).
    Number(String),
}

impl Literal {
    /// Creates a string literal.
    #[must_use]
    pub fn string(text: impl Into<String>) -> Self {
        Self::String(text.into())
    }

    /// Creates a number literal.
    #[must_use]
    pub fn number(text: impl Into<String>) -> Self {
        Self::Number(text.into())
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(text) => write!(f, "\"{text}\""),
            Self::Number(text) => f.write_str(text),
        }
    }
}

/// A boolean condition tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Condition {
    /// `field comparator value`
    Comparison {
        /// Qualified field name.
        field: String,
        /// The comparison operator.
        comparator: Comparator,
        /// The value compared against.
        value: Literal,
    },
    /// Subconditions joined by one logic operator.
    Group {
        /// Members in source order.
        subconditions: Vec<Condition>,
        /// How the members combine.
        logic: LogicOp,
    },
}

impl Condition {
    /// Creates a comparison.
    #[must_use]
    pub fn comparison(field: impl Into<String>, comparator: Comparator, value: Literal) -> Self {
        Self::Comparison {
            field: field.into(),
            comparator,
            value,
        }
    }

    /// Creates an `and`/`or` group.
    #[must_use]
    pub fn group(logic: LogicOp, subconditions: Vec<Self>) -> Self {
        Self::Group {
            subconditions,
            logic,
        }
    }

    /// Wraps a condition in a `not` group.
    #[must_use]
    pub fn negate(condition: Self) -> Self {
        Self::Group {
            subconditions: vec![condition],
            logic: LogicOp::Not,
        }
    }

    /// Returns true for `and`/`or` groups, which need parentheses when nested.
    const fn is_junction(&self) -> bool {
        matches!(
            self,
            Self::Group {
                logic: LogicOp::And | LogicOp::Or,
                ..
            }
        )
    }

    fn fmt_nested(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_junction() {
            write!(f, "({self})")
        } else {
            write!(f, "{self}")
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Comparison {
                field,
                comparator,
                value,
            } => write!(f, "{field} {} {value}", comparator.as_str()),
            Self::Group {
                subconditions,
                logic: LogicOp::Not,
            } => {
                f.write_str("not ")?;
                for sub in subconditions {
                    sub.fmt_nested(f)?;
                }
                Ok(())
            }
            Self::Group {
                subconditions,
                logic,
            } => {
                for (i, sub) in subconditions.iter().enumerate() {
                    if i > 0 {
                        write!(f, " {} ", logic.as_str())?;
                    }
                    sub.fmt_nested(f)?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eq(field: &str, value: &str) -> Condition {
        Condition::comparison(field, Comparator::Equal, Literal::number(value))
    }

    #[test]
    fn test_comparator_as_str() {
        assert_eq!(Comparator::NotEqual.as_str(), "!=");
        assert_eq!(Comparator::Like.as_str(), "like");
    }

    #[test]
    fn test_literal_display() {
        assert_eq!(Literal::string("bob").to_string(), "\"bob\"");
        assert_eq!(Literal::number("-0x1A").to_string(), "-0x1A");
    }

    #[test]
    fn test_nested_groups_are_parenthesized() {
        let condition = Condition::group(
            LogicOp::And,
            vec![
                Condition::group(LogicOp::Or, vec![eq("a", "1"), eq("b", "2")]),
                eq("c", "3"),
            ],
        );
        assert_eq!(condition.to_string(), "(a = 1 or b = 2) and c = 3");
    }

    #[test]
    fn test_not_display() {
        assert_eq!(Condition::negate(eq("a", "1")).to_string(), "not a = 1");
        let grouped = Condition::negate(Condition::group(
            LogicOp::And,
            vec![eq("a", "1"), eq("b", "2")],
        ));
        assert_eq!(grouped.to_string(), "not (a = 1 and b = 2)");
    }
}
