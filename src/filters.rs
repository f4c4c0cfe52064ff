// SPDX-License-Identifier: MPL-2.0
//! Filter data model shared by the stores, the drawer, and the update request.
//!
//! A [`FilterState`] is the complete, user-editable filter configuration for a
//! signal: an ordered list of criteria plus bookkeeping about which saved
//! filter set (if any) it came from. Equality is structural and
//! **order-sensitive** over the criteria list: two states whose criteria
//! differ only in order are presented differently to the user and must not
//! collapse into "same as default".

use serde::{Deserialize, Serialize};
use std::fmt;

/// Comparison operator of a single filter criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterOperator {
    Eq,
    NotEq,
    Contains,
    In,
    NotIn,
}

impl FilterOperator {
    /// All operators, in the order they appear in the drawer's pick list.
    pub const ALL: [FilterOperator; 5] = [
        FilterOperator::Eq,
        FilterOperator::NotEq,
        FilterOperator::Contains,
        FilterOperator::In,
        FilterOperator::NotIn,
    ];

    /// Whether this operator takes a list of values rather than a scalar.
    #[must_use]
    pub fn takes_list(self) -> bool {
        matches!(self, FilterOperator::In | FilterOperator::NotIn)
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FilterOperator::Eq => "is",
            FilterOperator::NotEq => "is not",
            FilterOperator::Contains => "contains",
            FilterOperator::In => "in",
            FilterOperator::NotIn => "not in",
        };
        write!(f, "{label}")
    }
}

/// Value side of a criterion: a single scalar or a list, depending on the
/// operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Scalar(String),
    List(Vec<String>),
}

impl FilterValue {
    /// Human-readable rendering used by the applied-filters summary.
    #[must_use]
    pub fn display(&self) -> String {
        match self {
            FilterValue::Scalar(value) => value.clone(),
            FilterValue::List(values) => values.join(", "),
        }
    }
}

/// A single named constraint: field, operator, value(s).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriterion {
    pub field: String,
    pub operator: FilterOperator,
    pub value: FilterValue,
}

impl FilterCriterion {
    #[must_use]
    pub fn new(field: impl Into<String>, operator: FilterOperator, value: FilterValue) -> Self {
        Self {
            field: field.into(),
            operator,
            value,
        }
    }
}

/// The complete filter configuration for a signal.
///
/// `applied_filter_name` is non-`None` only if the criteria matched a saved
/// filter set at the moment it was set; it is not re-validated afterwards, so
/// a saved set renamed or deleted elsewhere can leave it stale (known gap).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    /// Ordered criteria list. Order matters for equality.
    pub criteria: Vec<FilterCriterion>,
    /// Name of the saved filter set these criteria came from, if any.
    #[serde(default)]
    pub applied_filter_name: Option<String>,
    /// Identifier of the saved filter set currently selected in the UI.
    #[serde(default)]
    pub selected_saved_filter_id: Option<String>,
}

impl Default for FilterState {
    /// The canonical "no filters applied" sentinel: empty criteria, no
    /// applied name, no selected saved filter. Reset target for the clear
    /// button and the comparand for the visibility rule.
    fn default() -> Self {
        Self {
            criteria: Vec::new(),
            applied_filter_name: None,
            selected_saved_filter_id: None,
        }
    }
}

impl FilterState {
    /// True when this state structurally equals the default sentinel.
    ///
    /// Total over well-formed states; drives the clear button's visibility.
    #[must_use]
    pub fn is_default(&self) -> bool {
        *self == FilterState::default()
    }
}

/// A named, persisted filter set the user can re-select.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedFilter {
    pub id: String,
    pub name: String,
    pub state: FilterState,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn criterion(field: &str, value: &str) -> FilterCriterion {
        FilterCriterion::new(
            field,
            FilterOperator::Eq,
            FilterValue::Scalar(value.to_string()),
        )
    }

    #[test]
    fn equality_is_reflexive_and_symmetric() {
        let state = FilterState {
            criteria: vec![criterion("source", "reuters"), criterion("topic", "AI")],
            applied_filter_name: Some("My Filter".to_string()),
            selected_saved_filter_id: Some("abc123".to_string()),
        };

        assert_eq!(state, state.clone());

        let other = state.clone();
        assert_eq!(state == other, other == state);
    }

    #[test]
    fn equality_is_order_sensitive_on_criteria() {
        let forward = FilterState {
            criteria: vec![criterion("source", "reuters"), criterion("topic", "AI")],
            ..FilterState::default()
        };
        let reversed = FilterState {
            criteria: vec![criterion("topic", "AI"), criterion("source", "reuters")],
            ..FilterState::default()
        };

        assert_ne!(forward, reversed);
    }

    #[test]
    fn default_sentinel_is_empty() {
        let default = FilterState::default();
        assert!(default.criteria.is_empty());
        assert!(default.applied_filter_name.is_none());
        assert!(default.selected_saved_filter_id.is_none());
        assert!(default.is_default());
    }

    #[test]
    fn non_default_state_is_not_default() {
        let state = FilterState {
            criteria: vec![criterion("source", "reuters")],
            ..FilterState::default()
        };
        assert!(!state.is_default());

        let named_only = FilterState {
            applied_filter_name: Some("My Filter".to_string()),
            ..FilterState::default()
        };
        assert!(!named_only.is_default());
    }

    #[test]
    fn list_operators_take_lists() {
        assert!(FilterOperator::In.takes_list());
        assert!(FilterOperator::NotIn.takes_list());
        assert!(!FilterOperator::Eq.takes_list());
        assert!(!FilterOperator::Contains.takes_list());
    }

    #[test]
    fn value_display_joins_lists() {
        let value = FilterValue::List(vec!["reuters".to_string(), "ap".to_string()]);
        assert_eq!(value.display(), "reuters, ap");

        let scalar = FilterValue::Scalar("AI".to_string());
        assert_eq!(scalar.display(), "AI");
    }
}
