//! Comparison operators a rule can apply.

use serde::{Deserialize, Serialize};
use smartlists_common::Error;
use std::fmt;
use std::str::FromStr;

/// Comparison or test between a field value and the rule parameters.
///
/// The set is closed. Which operators make sense for a field is decided by
/// the field's [`FieldType`](crate::FieldType), see
/// [`operators_for`](crate::vocabulary::operators_for).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    Contains,
    DoesNotContain,
    Equals,
    DoesNotEqual,
    StartsWith,
    EndsWith,
    GreaterThan,
    LessThan,
    After,
    Before,
    InTheLast,
    NotInTheLast,
    True,
    False,
    Between,
}

const OPERATORS: &[(Operator, &str, &str)] = &[
    (Operator::Contains, "contains", "contains"),
    (Operator::DoesNotContain, "doesnotcontain", "does not contain"),
    (Operator::Equals, "is", "is"),
    (Operator::DoesNotEqual, "isnot", "is not"),
    (Operator::StartsWith, "startswith", "starts with"),
    (Operator::EndsWith, "endswith", "ends with"),
    (Operator::GreaterThan, "greaterthan", "greater than"),
    (Operator::LessThan, "lessthan", "less than"),
    (Operator::After, "after", "after"),
    (Operator::Before, "before", "before"),
    (Operator::InTheLast, "inthelast", "in the last"),
    (Operator::NotInTheLast, "notinthelast", "not in the last"),
    (Operator::True, "true", "true"),
    (Operator::False, "false", "false"),
    (Operator::Between, "between", "between"),
];

impl Operator {
    /// Every operator, in display order.
    pub fn all() -> impl Iterator<Item = Operator> {
        OPERATORS.iter().map(|(op, _, _)| *op)
    }

    fn entry(&self) -> &'static (Operator, &'static str, &'static str) {
        OPERATORS
            .iter()
            .find(|(op, _, _)| op == self)
            .unwrap_or(&OPERATORS[0])
    }

    /// Wire name used in serialized documents.
    pub fn as_str(&self) -> &'static str {
        self.entry().1
    }

    /// English display label.
    pub fn label(&self) -> &'static str {
        self.entry().2
    }

    /// Returns true for operators that render as `NOT (<positive form>)`.
    pub fn is_negated(&self) -> bool {
        matches!(
            self,
            Self::DoesNotContain | Self::DoesNotEqual | Self::NotInTheLast | Self::False
        )
    }

    /// The non-negated counterpart of this operator.
    pub fn positive(&self) -> Operator {
        match self {
            Self::DoesNotContain => Self::Contains,
            Self::DoesNotEqual => Self::Equals,
            Self::NotInTheLast => Self::InTheLast,
            Self::False => Self::True,
            other => *other,
        }
    }

    /// Returns true if `count` parameters are legal for this operator.
    ///
    /// `Between` takes exactly two, `True`/`False` take none, and everything
    /// else takes at least one.
    pub fn accepts_arity(&self, count: usize) -> bool {
        match self {
            Self::Between => count == 2,
            Self::True | Self::False => count == 0,
            _ => count >= 1,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operator {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        OPERATORS
            .iter()
            .find(|(_, name, _)| *name == lower)
            .map(|(op, _, _)| *op)
            .ok_or_else(|| Error::malformed(format!("unknown operator '{s}'")))
    }
}
