//! Project listing filters.
//!
//! Clients send `filters[<field>][operator]=<op>&filters[<field>][value]=<v>`
//! pairs. Operators are a closed allowlist parsed into [`FilterOperator`];
//! anything else is rejected before query construction, so no client-supplied
//! token ever reaches the SQL layer.

use sea_orm::sea_query::{Expr, SimpleExpr};
use serde::{de, Deserialize, Deserializer};
use std::{collections::BTreeMap, fmt, str::FromStr};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("unsupported filter operator: `{0}`")]
pub struct UnknownOperator(String);

/// Comparison operators accepted in project filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOperator {
    Eq,
    Ne,
    Gt,
    Lt,
    Gte,
    Lte,
    Like,
}

impl FilterOperator {
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Ne => "!=",
            Self::Gt => ">",
            Self::Lt => "<",
            Self::Gte => ">=",
            Self::Lte => "<=",
            Self::Like => "like",
        }
    }

    /// Apply this operator to a column expression with a bound value.
    pub fn into_expr(self, col: Expr, value: &str) -> SimpleExpr {
        match self {
            Self::Eq => col.eq(value),
            Self::Ne => col.ne(value),
            Self::Gt => col.gt(value),
            Self::Lt => col.lt(value),
            Self::Gte => col.gte(value),
            Self::Lte => col.lte(value),
            Self::Like => col.like(value),
        }
    }
}

impl FromStr for FilterOperator {
    type Err = UnknownOperator;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "=" => Ok(Self::Eq),
            "!=" | "<>" => Ok(Self::Ne),
            ">" => Ok(Self::Gt),
            "<" => Ok(Self::Lt),
            ">=" => Ok(Self::Gte),
            "<=" => Ok(Self::Lte),
            _ if s.eq_ignore_ascii_case("like") => Ok(Self::Like),
            _ => Err(UnknownOperator(s.to_string())),
        }
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for FilterOperator {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

/// One `field OPERATOR value` clause.
#[derive(Debug, Clone, Deserialize)]
pub struct FilterClause {
    pub operator: FilterOperator,
    pub value: String,
}

/// Query parameters of `GET /projects`. Multiple clauses are conjunctive.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectListParams {
    #[serde(default)]
    pub filters: BTreeMap<String, FilterClause>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(query: &str) -> Result<ProjectListParams, serde_qs::Error> {
        serde_qs::Config::new(5, false).deserialize_str(query)
    }

    #[test]
    fn parses_bracketed_filter_pairs() {
        let params = parse(
            "filters[department][operator]==&filters[department][value]=HR\
             &filters[status][operator]==&filters[status][value]=active",
        )
        .unwrap();
        assert_eq!(params.filters.len(), 2);
        assert_eq!(params.filters["department"].operator, FilterOperator::Eq);
        assert_eq!(params.filters["department"].value, "HR");
        assert_eq!(params.filters["status"].value, "active");
    }

    #[test]
    fn parses_every_allowed_operator() {
        for (raw, expected) in [
            ("=", FilterOperator::Eq),
            ("!=", FilterOperator::Ne),
            (">", FilterOperator::Gt),
            ("<", FilterOperator::Lt),
            (">=", FilterOperator::Gte),
            ("<=", FilterOperator::Lte),
            ("like", FilterOperator::Like),
            ("LIKE", FilterOperator::Like),
        ] {
            assert_eq!(raw.parse::<FilterOperator>().unwrap(), expected);
        }
    }

    #[test]
    fn rejects_unknown_operator() {
        assert!("; drop table".parse::<FilterOperator>().is_err());
        assert!(parse("filters[name][operator]=regexp&filters[name][value]=x").is_err());
    }

    #[test]
    fn empty_query_yields_no_filters() {
        let params = parse("").unwrap();
        assert!(params.filters.is_empty());
    }

    #[test]
    fn unrelated_query_parameters_are_ignored() {
        let params = parse(
            "page=1&sort=name&filters[status][operator]==&filters[status][value]=active",
        )
        .unwrap();
        assert_eq!(params.filters.len(), 1);
        assert_eq!(params.filters["status"].value, "active");
    }
}
