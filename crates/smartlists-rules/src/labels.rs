//! Display labels for fields, operators and groupings.
//!
//! The compiler never consults these. Editors that need translated strings
//! implement [`Labels`] and override what they localize.

use smartlists_common::{GroupBy, SortBy};

use crate::field::Field;
use crate::operator::Operator;

/// Source of human-readable labels.
pub trait Labels {
    fn field(&self, field: Field) -> String {
        field.label().to_string()
    }

    fn operator(&self, op: Operator) -> String {
        op.label().to_string()
    }

    fn group(&self, group: GroupBy) -> String {
        group.label().to_string()
    }

    fn order(&self, by: SortBy) -> String {
        by.label().to_string()
    }
}

/// English labels taken straight from the vocabulary tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultLabels;

impl Labels for DefaultLabels {}
