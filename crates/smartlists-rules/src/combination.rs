//! AND/OR grouping of rules and the recursive compiler over it.

use smartlists_common::MediaType;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

use crate::compile::{CompileContext, CompileWarning, Compiled, RuleSql};
use crate::rule::Rule;

/// How the children of a combination are joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CombinationKind {
    /// Every child must match (`match: all`).
    #[default]
    And,
    /// At least one child must match (`match: one`).
    Or,
}

impl CombinationKind {
    /// Wire name used for the `match` key.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::And => "all",
            Self::Or => "one",
        }
    }

    fn connective(&self) -> &'static str {
        match self {
            Self::And => " AND ",
            Self::Or => " OR ",
        }
    }
}

impl fmt::Display for CombinationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CombinationKind {
    type Err = smartlists_common::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::And),
            "one" => Ok(Self::Or),
            _ => Err(smartlists_common::Error::malformed(format!(
                "match must be 'all' or 'one', got '{s}'"
            ))),
        }
    }
}

/// A child of a combination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Rule(Rule),
    Combination(Combination),
}

impl From<Rule> for Node {
    fn from(rule: Rule) -> Self {
        Node::Rule(rule)
    }
}

impl From<Combination> for Node {
    fn from(combination: Combination) -> Self {
        Node::Combination(combination)
    }
}

/// An ordered group of rules and nested combinations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Combination {
    kind: CombinationKind,
    children: Vec<Node>,
}

impl Combination {
    pub fn new(kind: CombinationKind) -> Self {
        Self {
            kind,
            children: Vec::new(),
        }
    }

    /// An empty combination whose children must all match.
    pub fn and() -> Self {
        Self::new(CombinationKind::And)
    }

    /// An empty combination of which one child must match.
    pub fn or() -> Self {
        Self::new(CombinationKind::Or)
    }

    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.children.push(Node::Rule(rule));
        self
    }

    pub fn with_combination(mut self, combination: Combination) -> Self {
        self.children.push(Node::Combination(combination));
        self
    }

    pub fn push(&mut self, node: impl Into<Node>) {
        self.children.push(node.into());
    }

    pub fn kind(&self) -> CombinationKind {
        self.kind
    }

    pub fn set_kind(&mut self, kind: CombinationKind) {
        self.kind = kind;
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut Vec<Node> {
        &mut self.children
    }

    pub fn clear(&mut self) {
        self.children.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// All rules in this combination and its descendants, depth first.
    pub fn rules(&self) -> Vec<&Rule> {
        let mut rules = Vec::new();
        collect_rules(self, &mut rules);
        rules
    }

    /// Compile as a top-level combination.
    ///
    /// `visited` holds the lowercased names of playlists being expanded;
    /// references to any of them contribute nothing.
    pub fn compile(
        &self,
        ctx: &CompileContext<'_>,
        media_type: MediaType,
        visited: &mut HashSet<String>,
    ) -> Compiled {
        let mut warnings = Vec::new();
        let clause = self.compile_into(ctx, media_type, visited, &mut warnings, false);
        Compiled { clause, warnings }
    }

    pub(crate) fn compile_into(
        &self,
        ctx: &CompileContext<'_>,
        media_type: MediaType,
        visited: &mut HashSet<String>,
        warnings: &mut Vec<CompileWarning>,
        nested: bool,
    ) -> String {
        let mut fragments = Vec::with_capacity(self.children.len());
        for child in &self.children {
            let fragment = match child {
                Node::Rule(rule) => match rule.compile(ctx, media_type) {
                    Ok(RuleSql::Clause(sql)) => sql,
                    Ok(RuleSql::Empty) => String::new(),
                    Ok(RuleSql::Reference { name, negate }) => {
                        expand_reference(ctx, media_type, &name, negate, visited, warnings)
                    }
                    Err(warning) => {
                        warn!(%warning, "Rule skipped");
                        warnings.push(warning);
                        String::new()
                    }
                },
                Node::Combination(combination) => {
                    combination.compile_into(ctx, media_type, visited, warnings, true)
                }
            };
            if !fragment.is_empty() {
                fragments.push(fragment);
            }
        }

        match fragments.len() {
            0 => String::new(),
            1 => fragments.swap_remove(0),
            _ => {
                let joined = fragments.join(self.kind.connective());
                if nested {
                    format!("({joined})")
                } else {
                    joined
                }
            }
        }
    }
}

fn collect_rules<'a>(combination: &'a Combination, out: &mut Vec<&'a Rule>) {
    for child in &combination.children {
        match child {
            Node::Rule(rule) => out.push(rule),
            Node::Combination(inner) => collect_rules(inner, out),
        }
    }
}

/// Splice the predicate of a referenced playlist in place of a reference.
fn expand_reference(
    ctx: &CompileContext<'_>,
    media_type: MediaType,
    name: &str,
    negate: bool,
    visited: &mut HashSet<String>,
    warnings: &mut Vec<CompileWarning>,
) -> String {
    let key = name.to_lowercase();
    if visited.contains(&key) {
        debug!(playlist = %name, "Skipping cyclic playlist reference");
        return String::new();
    }

    let Some(referenced) = ctx.playlists.find(name) else {
        let warning = CompileWarning::UnknownReference {
            name: name.to_string(),
        };
        warn!(%warning, "Reference skipped");
        warnings.push(warning);
        return String::new();
    };

    if !media_type.is_compatible_with(referenced.media_type()) {
        let warning = CompileWarning::IncompatibleType {
            name: name.to_string(),
            expected: media_type,
            found: referenced.media_type(),
        };
        warn!(%warning, "Reference skipped");
        warnings.push(warning);
        return String::new();
    }

    visited.insert(key.clone());
    let fragment = referenced
        .root()
        .compile_into(ctx, media_type, visited, warnings, true);
    visited.remove(&key);

    if fragment.is_empty() || !negate {
        fragment
    } else {
        format!("NOT {fragment}")
    }
}
