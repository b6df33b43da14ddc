//! Token-to-AST mappings and left-associative condition folding.

use crate::ast::{AggregationKind, Comparator, Condition, LogicOp};
use crate::lexer::TokenKind;

/// Converts an aggregation token to its AST kind.
pub const fn token_to_aggregation(kind: TokenKind) -> Option<AggregationKind> {
    match kind {
        TokenKind::Count => Some(AggregationKind::Count),
        TokenKind::Sum => Some(AggregationKind::Sum),
        TokenKind::Average => Some(AggregationKind::Average),
        TokenKind::Min => Some(AggregationKind::Min),
        TokenKind::Max => Some(AggregationKind::Max),
        TokenKind::Distinct => Some(AggregationKind::Distinct),
        _ => None,
    }
}

/// Converts a comparator token to its AST operator.
pub const fn token_to_comparator(kind: TokenKind) -> Option<Comparator> {
    match kind {
        TokenKind::Equal => Some(Comparator::Equal),
        TokenKind::NotEqual => Some(Comparator::NotEqual),
        TokenKind::Greater => Some(Comparator::Greater),
        TokenKind::GreaterEqual => Some(Comparator::GreaterEqual),
        TokenKind::Less => Some(Comparator::Less),
        TokenKind::LessEqual => Some(Comparator::LessEqual),
        TokenKind::Like => Some(Comparator::Like),
        _ => None,
    }
}

/// Converts a joining token (`and`/`or`) to its logic operator.
pub const fn token_to_join(kind: TokenKind) -> Option<LogicOp> {
    match kind {
        TokenKind::And => Some(LogicOp::And),
        TokenKind::Or => Some(LogicOp::Or),
        _ => None,
    }
}

/// Folds `first (op atom)*` left to right into nested groups.
///
/// A run of the same operator extends the current group; a different
/// operator wraps everything so far as the first member of a new group.
/// There is no precedence between `and` and `or`.
pub fn fold_left(first: Condition, rest: Vec<(LogicOp, Condition)>) -> Condition {
    let mut folded = first;
    let mut current = None;
    for (op, next) in rest {
        if current == Some(op) {
            if let Condition::Group { subconditions, .. } = &mut folded {
                subconditions.push(next);
                continue;
            }
        }
        folded = Condition::group(op, vec![folded, next]);
        current = Some(op);
    }
    folded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Literal;

    fn cmp(field: &str) -> Condition {
        Condition::comparison(field, Comparator::Equal, Literal::number("1"))
    }

    #[test]
    fn test_single_atom_is_unchanged() {
        assert_eq!(fold_left(cmp("a"), vec![]), cmp("a"));
    }

    #[test]
    fn test_same_operator_extends_group() {
        let folded = fold_left(
            cmp("a"),
            vec![(LogicOp::And, cmp("b")), (LogicOp::And, cmp("c"))],
        );
        assert_eq!(
            folded,
            Condition::group(LogicOp::And, vec![cmp("a"), cmp("b"), cmp("c")])
        );
    }

    #[test]
    fn test_operator_change_starts_outer_group() {
        let folded = fold_left(
            cmp("a"),
            vec![
                (LogicOp::And, cmp("b")),
                (LogicOp::Or, cmp("c")),
                (LogicOp::And, cmp("d")),
            ],
        );
        let inner = Condition::group(LogicOp::And, vec![cmp("a"), cmp("b")]);
        let middle = Condition::group(LogicOp::Or, vec![inner, cmp("c")]);
        assert_eq!(folded, Condition::group(LogicOp::And, vec![middle, cmp("d")]));
    }

    #[test]
    fn test_parenthesized_group_is_not_extended() {
        let grouped = Condition::group(LogicOp::And, vec![cmp("a"), cmp("b")]);
        let folded = fold_left(grouped.clone(), vec![(LogicOp::And, cmp("c"))]);
        assert_eq!(folded, Condition::group(LogicOp::And, vec![grouped, cmp("c")]));
    }

    #[test]
    fn test_token_mappings() {
        assert_eq!(token_to_aggregation(TokenKind::Average), Some(AggregationKind::Average));
        assert_eq!(token_to_aggregation(TokenKind::Identifier), None);
        assert_eq!(token_to_comparator(TokenKind::Like), Some(Comparator::Like));
        assert_eq!(token_to_comparator(TokenKind::And), None);
        assert_eq!(token_to_join(TokenKind::Or), Some(LogicOp::Or));
        assert_eq!(token_to_join(TokenKind::Not), None);
    }
}
