//! Query Builder Types - Core types and enums for query building

use std::fmt;
use std::str::FromStr;

use crate::error::OrmError;
use crate::value::Value;

/// Boolean join between consecutive WHERE predicates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BooleanOperator {
    And,
    Or,
}

impl fmt::Display for BooleanOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BooleanOperator::And => write!(f, "AND"),
            BooleanOperator::Or => write!(f, "OR"),
        }
    }
}

/// Where clause condition.
///
/// `value` carries the single bound value for comparison predicates;
/// `values` carries the bound set for `IN` predicates (`value` is `None`
/// for those). The comparison operator is stored verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct WhereClause {
    pub boolean: BooleanOperator,
    pub column: String,
    pub operator: String,
    pub value: Option<Value>,
    pub values: Vec<Value>,
}

/// Join types
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum JoinType {
    Inner,
    Left,
}

impl fmt::Display for JoinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JoinType::Inner => write!(f, "INNER JOIN"),
            JoinType::Left => write!(f, "LEFT JOIN"),
        }
    }
}

/// Join clause. The left/right column expressions and the operator are
/// emitted verbatim; they are identifiers, never user data.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinClause {
    pub join_type: JoinType,
    pub table: String,
    pub left: String,
    pub operator: String,
    pub right: String,
}

/// Order by direction
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OrderDirection {
    Asc,
    Desc,
}

impl fmt::Display for OrderDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderDirection::Asc => write!(f, "ASC"),
            OrderDirection::Desc => write!(f, "DESC"),
        }
    }
}

impl FromStr for OrderDirection {
    type Err = OrmError;

    /// Case-normalizing parse; anything but `ASC`/`DESC` is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ASC" => Ok(OrderDirection::Asc),
            "DESC" => Ok(OrderDirection::Desc),
            other => Err(OrmError::InvalidArgument(format!(
                "order direction must be ASC or DESC, got '{}'",
                other
            ))),
        }
    }
}
