//! Collaborators and result types for predicate compilation.
//!
//! Compilation is a pure recursive walk over the rule tree. It needs two
//! collaborators: a [`Backend`] that knows the catalog's column names and
//! literal syntax, and a [`PlaylistLookup`] that resolves cross-references
//! by name. Both are borrowed through a [`CompileContext`] for the duration
//! of a single call.

use chrono::{Local, NaiveDate, NaiveDateTime};
use smartlists_common::MediaType;
use std::collections::HashMap;

use crate::field::Field;
use crate::playlist::SmartPlaylist;

/// Shape of a `LIKE` match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikePattern {
    Contains,
    StartsWith,
    EndsWith,
}

/// Query dialect of the catalog a predicate is compiled for.
///
/// Only [`column`](Backend::column) is required. The remaining methods have
/// defaults producing portable SQL.
pub trait Backend {
    /// Column expression for `field` in the table of `media_type`, or `None`
    /// if the catalog has no such column.
    fn column(&self, field: Field, media_type: MediaType) -> Option<String>;

    /// Quote a string literal.
    fn quote(&self, value: &str) -> String {
        format!("'{}'", value.replace('\'', "''"))
    }

    /// Cast an expression for decimal comparison.
    fn numeric(&self, expr: &str) -> String {
        format!("CAST({expr} AS DECIMAL(5,1))")
    }

    /// Cast an expression for integer comparison.
    fn integer(&self, expr: &str) -> String {
        format!("CAST({expr} AS INTEGER)")
    }

    /// Render a user-supplied number. Anything that does not parse as a
    /// number is passed through as a quoted literal.
    fn number(&self, raw: &str) -> String {
        let trimmed = raw.trim();
        if trimmed.parse::<f64>().is_ok() {
            trimmed.to_string()
        } else {
            self.quote(raw)
        }
    }

    /// Render a date literal.
    fn date(&self, date: NaiveDate) -> String {
        self.quote(&date.format("%Y-%m-%d").to_string())
    }

    /// Render a case-insensitive pattern match of `expr` against `value`.
    fn like(&self, expr: &str, pattern: LikePattern, value: &str) -> String {
        let mut escaped = String::with_capacity(value.len());
        let mut needs_escape = false;
        for c in value.chars() {
            if matches!(c, '%' | '_' | '\\') {
                escaped.push('\\');
                needs_escape = true;
            }
            escaped.push(c);
        }
        let pattern = match pattern {
            LikePattern::Contains => format!("%{escaped}%"),
            LikePattern::StartsWith => format!("{escaped}%"),
            LikePattern::EndsWith => format!("%{escaped}"),
        };
        let mut sql = format!("{expr} LIKE {}", self.quote(&pattern));
        if needs_escape {
            sql.push_str(" ESCAPE '\\'");
        }
        sql
    }
}

/// Resolves playlist cross-references by name.
pub trait PlaylistLookup {
    /// Find a playlist by name. Matching is case-insensitive.
    fn find(&self, name: &str) -> Option<SmartPlaylist>;
}

/// A lookup that knows no playlists.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPlaylists;

impl PlaylistLookup for NoPlaylists {
    fn find(&self, _name: &str) -> Option<SmartPlaylist> {
        None
    }
}

/// In-memory playlist collection keyed by lowercased name.
#[derive(Debug, Clone, Default)]
pub struct PlaylistLibrary {
    playlists: HashMap<String, SmartPlaylist>,
}

impl PlaylistLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a playlist, replacing any existing one with the same name.
    pub fn insert(&mut self, playlist: SmartPlaylist) {
        self.playlists
            .insert(playlist.name().to_lowercase(), playlist);
    }

    pub fn remove(&mut self, name: &str) -> Option<SmartPlaylist> {
        self.playlists.remove(&name.to_lowercase())
    }

    pub fn get(&self, name: &str) -> Option<&SmartPlaylist> {
        self.playlists.get(&name.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.playlists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.playlists.is_empty()
    }

    /// Names of all playlists, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.playlists.values().map(|p| p.name()).collect();
        names.sort_unstable();
        names
    }
}

impl FromIterator<SmartPlaylist> for PlaylistLibrary {
    fn from_iter<I: IntoIterator<Item = SmartPlaylist>>(iter: I) -> Self {
        let mut library = Self::new();
        for playlist in iter {
            library.insert(playlist);
        }
        library
    }
}

impl PlaylistLookup for PlaylistLibrary {
    fn find(&self, name: &str) -> Option<SmartPlaylist> {
        self.get(name).cloned()
    }
}

/// Everything a compile call borrows from its caller.
#[derive(Clone, Copy)]
pub struct CompileContext<'a> {
    pub backend: &'a dyn Backend,
    pub playlists: &'a dyn PlaylistLookup,
    /// Reference point for relative date rules.
    pub now: NaiveDateTime,
}

impl<'a> CompileContext<'a> {
    /// Context using the local wall clock.
    pub fn new(backend: &'a dyn Backend, playlists: &'a dyn PlaylistLookup) -> Self {
        Self {
            backend,
            playlists,
            now: Local::now().naive_local(),
        }
    }

    /// Replace the clock, for reproducible output.
    pub fn with_now(mut self, now: NaiveDateTime) -> Self {
        self.now = now;
        self
    }
}

/// Compiled form of a single rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleSql {
    /// A self-delimiting predicate fragment.
    Clause(String),
    /// A cross-reference to be expanded by the enclosing combination.
    Reference { name: String, negate: bool },
    /// The rule contributes nothing.
    Empty,
}

/// A problem that made part of a playlist compile to nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompileWarning {
    #[error("referenced playlist '{name}' was not found")]
    UnknownReference { name: String },

    #[error("referenced playlist '{name}' is {found}, which cannot be used in {expected}")]
    IncompatibleType {
        name: String,
        expected: MediaType,
        found: MediaType,
    },

    #[error("field '{field}' has no column in {media_type}")]
    UnmappedField { field: Field, media_type: MediaType },
}

/// Result of compiling a playlist or combination.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Compiled {
    /// The predicate. Empty when nothing constrains the selection.
    pub clause: String,
    pub warnings: Vec<CompileWarning>,
}

impl Compiled {
    pub fn is_empty(&self) -> bool {
        self.clause.is_empty()
    }

    /// The clause as a complete `WHERE` condition; `1` when empty.
    pub fn where_condition(&self) -> &str {
        if self.clause.is_empty() {
            "1"
        } else {
            &self.clause
        }
    }
}
