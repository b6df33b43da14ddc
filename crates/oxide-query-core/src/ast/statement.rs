//! Statement AST types.

use core::fmt;

use super::condition::Condition;

/// An aggregation function applied to one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AggregationKind {
    Count,
    Sum,
    Average,
    Min,
    Max,
    Distinct,
}

impl AggregationKind {
    /// Returns the function name as written in a query.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Count => "count",
            Self::Sum => "sum",
            Self::Average => "average",
            Self::Min => "min",
            Self::Max => "max",
            Self::Distinct => "distinct",
        }
    }
}

/// Sort direction for ORDER BY.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// Returns the keyword as written in a query.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// An entry of a field list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FieldSpec {
    /// A qualified identifier such as `users.name`.
    Bare(String),
    /// An aggregation over one qualified identifier.
    Aggregated {
        /// The aggregation function.
        kind: AggregationKind,
        /// The aggregated field.
        field: String,
    },
}

impl FieldSpec {
    /// Creates a bare field.
    #[must_use]
    pub fn bare(name: impl Into<String>) -> Self {
        Self::Bare(name.into())
    }

    /// Creates an aggregated field.
    #[must_use]
    pub fn aggregated(kind: AggregationKind, field: impl Into<String>) -> Self {
        Self::Aggregated {
            kind,
            field: field.into(),
        }
    }

    /// Returns the field name, with or without aggregation.
    #[must_use]
    pub fn field(&self) -> &str {
        match self {
            Self::Bare(name) | Self::Aggregated { field: name, .. } => name,
        }
    }
}

impl fmt::Display for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bare(name) => f.write_str(name),
            Self::Aggregated { kind, field } => write!(f, "{}({field})", kind.as_str()),
        }
    }
}

/// A parsed `select` statement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SelectStatement {
    /// Output fields in column order.
    pub fields: Vec<FieldSpec>,
    /// The table after `from`.
    pub table: String,
    /// The `where` condition.
    pub condition: Option<Condition>,
    /// The `group by` fields.
    pub group_by: Option<Vec<FieldSpec>>,
    /// The `order by` fields.
    pub order_by: Option<Vec<FieldSpec>>,
    /// `asc` or `desc` after the `order by` fields.
    pub sort_direction: Option<SortDirection>,
}

impl SelectStatement {
    /// Returns the fields selected without aggregation.
    pub fn bare_fields(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().filter_map(|spec| match spec {
            FieldSpec::Bare(name) => Some(name.as_str()),
            FieldSpec::Aggregated { .. } => None,
        })
    }

    /// Returns the aggregations in the field list.
    pub fn aggregations(&self) -> impl Iterator<Item = (AggregationKind, &str)> {
        self.fields.iter().filter_map(|spec| match spec {
            FieldSpec::Aggregated { kind, field } => Some((*kind, field.as_str())),
            FieldSpec::Bare(_) => None,
        })
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, fields: &[FieldSpec]) -> fmt::Result {
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{field}")?;
    }
    Ok(())
}

impl fmt::Display for SelectStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("select ")?;
        write_list(f, &self.fields)?;
        write!(f, " from {}", self.table)?;
        if let Some(condition) = &self.condition {
            write!(f, " where {condition}")?;
        }
        if let Some(group_by) = &self.group_by {
            f.write_str(" group by ")?;
            write_list(f, group_by)?;
        }
        if let Some(order_by) = &self.order_by {
            f.write_str(" order by ")?;
            write_list(f, order_by)?;
            if let Some(direction) = self.sort_direction {
                write!(f, " {}", direction.as_str())?;
            }
        }
        Ok(())
    }
}
