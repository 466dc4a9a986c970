//! # smartlists-rules
//!
//! Smart playlists: declarative filters over a media catalog that compile
//! into a backend-specific `WHERE` clause.
//!
//! ## Overview
//!
//! - [`Rule`] -- a single `field operator parameters` test.
//! - [`Combination`] -- AND/OR grouping of rules and nested combinations.
//! - [`SmartPlaylist`] -- a named, typed rule tree with order, limit and group.
//! - [`Backend`] -- column names and literal syntax of the target catalog.
//! - [`PlaylistLookup`] -- resolves `playlist` cross-references by name.
//! - [`codec`] -- the JSON and XML (`.xsp`) document forms.
//! - [`vocabulary`] -- which fields, orders and groups each media type offers.
//!
//! ```
//! use smartlists_common::MediaType;
//! use smartlists_rules::{
//!     Backend, CompileContext, Field, NoPlaylists, Operator, Rule, SmartPlaylist,
//! };
//!
//! struct Columns;
//!
//! impl Backend for Columns {
//!     fn column(&self, field: Field, _media_type: MediaType) -> Option<String> {
//!         Some(field.as_str().to_string())
//!     }
//! }
//!
//! let mut playlist = SmartPlaylist::new("Action", MediaType::Movies);
//! playlist.root_mut().push(Rule::new(Field::Genre, Operator::Contains, ["Action"]));
//! playlist.root_mut().push(Rule::new(Field::Rating, Operator::GreaterThan, ["7"]));
//!
//! let compiled = playlist.compile(&CompileContext::new(&Columns, &NoPlaylists));
//! assert_eq!(
//!     compiled.clause,
//!     "(genre LIKE '%Action%') AND (CAST(rating AS DECIMAL(5,1)) > 7)"
//! );
//! ```

pub mod codec;
pub mod combination;
pub mod compile;
pub mod field;
pub mod labels;
pub mod operator;
pub mod playlist;
pub mod rule;
pub mod validate;
pub mod vocabulary;

pub use codec::Format;
pub use combination::{Combination, CombinationKind, Node};
pub use compile::{
    Backend, CompileContext, CompileWarning, Compiled, LikePattern, NoPlaylists,
    PlaylistLibrary, PlaylistLookup, RuleSql,
};
pub use field::{Field, FieldType, Validator};
pub use labels::{DefaultLabels, Labels};
pub use operator::Operator;
pub use playlist::SmartPlaylist;
pub use rule::Rule;
pub use validate::validate;
