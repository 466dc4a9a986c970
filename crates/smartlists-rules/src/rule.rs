//! A single field/operator/parameters test and its rendering.

use chrono::{Duration, NaiveDate};
use smartlists_common::{Error, MediaType, Result};

use crate::compile::{CompileContext, CompileWarning, LikePattern, RuleSql};
use crate::field::{Field, FieldType};
use crate::labels::Labels;
use crate::operator::Operator;
use crate::validate::{period_in_days, time_string_to_seconds, PARAMETER_SEPARATOR};
use crate::vocabulary;

/// A leaf test: `<field> <operator> <parameters>`.
///
/// Multiple parameters are alternatives: "genre is Jazz / Blues" matches
/// either genre.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub field: Field,
    pub operator: Operator,
    pub parameters: Vec<String>,
}

impl Rule {
    pub fn new<I, S>(field: Field, operator: Operator, parameters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            field,
            operator,
            parameters: parameters.into_iter().map(Into::into).collect(),
        }
    }

    /// A rule with no parameters, for the `true`/`false` operators.
    pub fn flag(field: Field, value: bool) -> Self {
        let operator = if value { Operator::True } else { Operator::False };
        Self::new(field, operator, Vec::<String>::new())
    }

    /// Parameters joined with `" / "`.
    pub fn parameter_string(&self) -> String {
        self.parameters.join(PARAMETER_SEPARATOR)
    }

    /// Replace the parameters by splitting `value` on `" / "`.
    pub fn set_parameter_string(&mut self, value: &str) {
        self.parameters = if value.is_empty() {
            Vec::new()
        } else {
            value
                .split(PARAMETER_SEPARATOR)
                .map(str::to_string)
                .collect()
        };
    }

    /// Human-readable form such as `"Genre contains Jazz"`.
    pub fn describe(&self, labels: &dyn Labels) -> String {
        let mut text = format!(
            "{} {}",
            labels.field(self.field),
            labels.operator(self.operator)
        );
        if !self.parameters.is_empty() {
            text.push(' ');
            text.push_str(&self.parameter_string());
        }
        text
    }

    /// Check the rule against the vocabulary of `media_type`.
    ///
    /// Used by the loaders; rules built in code are compiled as they are.
    pub fn check(&self, media_type: MediaType) -> Result<()> {
        if !vocabulary::supports(media_type, self.field) {
            return Err(Error::malformed(format!(
                "field '{}' is not available for {media_type}",
                self.field
            )));
        }
        if !vocabulary::allows(self.field, self.operator) {
            return Err(Error::malformed(format!(
                "operator '{}' cannot be applied to field '{}'",
                self.operator, self.field
            )));
        }
        if !self.operator.accepts_arity(self.parameters.len()) {
            return Err(Error::malformed(format!(
                "operator '{}' does not take {} parameter(s)",
                self.operator,
                self.parameters.len()
            )));
        }
        Ok(())
    }

    /// Render this rule for `media_type`.
    ///
    /// Cross-references are returned unexpanded; the enclosing combination
    /// resolves them.
    pub fn compile(
        &self,
        ctx: &CompileContext<'_>,
        media_type: MediaType,
    ) -> std::result::Result<RuleSql, CompileWarning> {
        let field_type = self.field.field_type();
        let negate = self.operator.is_negated();
        let positive = self.operator.positive();

        if field_type == FieldType::PlaylistReference {
            if self.field == Field::VirtualFolder {
                return Ok(RuleSql::Empty);
            }
            return Ok(match self.parameters.first() {
                Some(name) if !name.trim().is_empty() => RuleSql::Reference {
                    name: name.trim().to_string(),
                    negate,
                },
                _ => RuleSql::Empty,
            });
        }

        if field_type != FieldType::Boolean {
            let usable = match positive {
                Operator::Between => self.parameters.len() == 2,
                _ => !self.parameters.is_empty(),
            };
            if !usable {
                return Ok(RuleSql::Empty);
            }
        }

        let column = ctx
            .backend
            .column(self.field, media_type)
            .ok_or(CompileWarning::UnmappedField {
                field: self.field,
                media_type,
            })?;

        let fragments = match (field_type, positive) {
            (FieldType::Boolean, _) => vec![format!("{column} = 1")],
            (FieldType::TextFromSet, _) => match self.set_membership(ctx, &column) {
                Some(sql) => vec![sql],
                None => return Ok(RuleSql::Empty),
            },
            (_, Operator::Between) => {
                vec![self.between(ctx, &column, &self.parameters[0], &self.parameters[1])]
            }
            _ => self
                .parameters
                .iter()
                .map(|param| self.comparison(ctx, &column, positive, param))
                .collect(),
        };

        Ok(RuleSql::Clause(join_fragments(&fragments, negate)))
    }

    fn set_membership(&self, ctx: &CompileContext<'_>, column: &str) -> Option<String> {
        let values: Vec<String> = self
            .parameters
            .iter()
            .flat_map(|param| param.split(','))
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(|value| ctx.backend.quote(value))
            .collect();
        if values.is_empty() {
            return None;
        }
        Some(format!("{column} IN ({})", values.join(", ")))
    }

    /// Left side of a comparison.
    fn operand(&self, ctx: &CompileContext<'_>, column: &str) -> String {
        match self.field.field_type() {
            FieldType::Numeric if self.field != Field::VideoResolution => {
                ctx.backend.numeric(column)
            }
            FieldType::Seconds => ctx.backend.integer(column),
            _ => column.to_string(),
        }
    }

    /// Right side of a comparison.
    fn literal(&self, ctx: &CompileContext<'_>, raw: &str) -> String {
        match self.field.field_type() {
            FieldType::Numeric => ctx.backend.number(raw),
            FieldType::Seconds => time_string_to_seconds(raw).unwrap_or(0).to_string(),
            _ => ctx.backend.quote(raw),
        }
    }

    fn comparison(
        &self,
        ctx: &CompileContext<'_>,
        column: &str,
        operator: Operator,
        raw: &str,
    ) -> String {
        if self.field == Field::VideoResolution {
            if let Some(sql) = resolution_comparison(column, operator, raw) {
                return sql;
            }
        }

        match operator {
            Operator::Contains => ctx.backend.like(column, LikePattern::Contains, raw),
            Operator::StartsWith => ctx.backend.like(column, LikePattern::StartsWith, raw),
            Operator::EndsWith => ctx.backend.like(column, LikePattern::EndsWith, raw),
            Operator::GreaterThan | Operator::After => format!(
                "{} > {}",
                self.operand(ctx, column),
                self.literal(ctx, raw)
            ),
            Operator::LessThan | Operator::Before => format!(
                "{} < {}",
                self.operand(ctx, column),
                self.literal(ctx, raw)
            ),
            Operator::InTheLast => {
                // Periods reaching past the calendar start at its first day.
                let cutoff = Duration::try_days(period_in_days(raw))
                    .and_then(|period| ctx.now.checked_sub_signed(period))
                    .map_or(NaiveDate::MIN, |cutoff| cutoff.date());
                format!("{column} > {}", ctx.backend.date(cutoff))
            }
            _ => format!(
                "{} = {}",
                self.operand(ctx, column),
                self.literal(ctx, raw)
            ),
        }
    }

    fn between(&self, ctx: &CompileContext<'_>, column: &str, low: &str, high: &str) -> String {
        if self.field == Field::VideoResolution {
            let (min, _) = resolution_bounds(low);
            return match resolution_bounds(high) {
                (_, Some(max)) => format!("{column} BETWEEN {min} AND {max}"),
                (_, None) => format!("{column} >= {min}"),
            };
        }
        format!(
            "{} BETWEEN {} AND {}",
            self.operand(ctx, column),
            self.literal(ctx, low),
            self.literal(ctx, high)
        )
    }
}

/// Join per-parameter fragments into one self-delimiting clause.
fn join_fragments(fragments: &[String], negate: bool) -> String {
    match (fragments, negate) {
        ([single], false) => format!("({single})"),
        ([single], true) => format!("NOT ({single})"),
        (many, false) => format!("({})", many.join(" OR ")),
        (many, true) => {
            let parts: Vec<String> = many.iter().map(|f| format!("NOT ({f})")).collect();
            format!("({})", parts.join(" AND "))
        }
    }
}

/// Width range of the resolution class named by `raw` (a line count such as
/// `720` or `1080`).
fn resolution_bounds(raw: &str) -> (u32, Option<u32>) {
    let lines: u32 = raw.trim().parse().unwrap_or(0);
    if lines >= 1080 {
        (1281, None)
    } else if lines >= 720 {
        (961, Some(1280))
    } else if lines >= 540 {
        (721, Some(960))
    } else {
        (0, Some(720))
    }
}

fn resolution_comparison(column: &str, operator: Operator, raw: &str) -> Option<String> {
    let (min, max) = resolution_bounds(raw);
    let sql = match (operator, max) {
        (Operator::Equals, Some(max)) => format!("{column} >= {min} AND {column} <= {max}"),
        (Operator::Equals, None) => format!("{column} >= {min}"),
        (Operator::LessThan, _) => format!("{column} < {min}"),
        (Operator::GreaterThan, Some(max)) => format!("{column} > {max}"),
        (Operator::GreaterThan, None) => format!("{column} > {min}"),
        _ => return None,
    };
    Some(sql)
}
