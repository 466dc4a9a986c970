//! The smart playlist document model.

use smartlists_common::{GroupBy, MediaType, Order, Result};
use std::collections::HashSet;

use crate::codec;
use crate::combination::{Combination, CombinationKind};
use crate::compile::{CompileContext, Compiled};
use crate::field::Field;

/// A named, typed filter with ordering, limit and grouping metadata.
///
/// The playlist owns its rule tree outright. Cross-references to other
/// playlists are stored by name and resolved at compile time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmartPlaylist {
    name: String,
    media_type: MediaType,
    root: Combination,
    order: Order,
    limit: u32,
    group: Option<GroupBy>,
    group_mixed: bool,
}

impl Default for SmartPlaylist {
    fn default() -> Self {
        Self::new("", MediaType::Songs)
    }
}

impl SmartPlaylist {
    pub fn new(name: impl Into<String>, media_type: MediaType) -> Self {
        Self {
            name: name.into(),
            media_type,
            root: Combination::and(),
            order: Order::default(),
            limit: 0,
            group: None,
            group_mixed: false,
        }
    }

    /// Parse a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        codec::json::from_json(json)
    }

    /// Parse an XML (`.xsp`) document.
    pub fn from_xml(xml: &str) -> Result<Self> {
        codec::xml::from_xml(xml)
    }

    /// Replace this playlist with the one described by `json`.
    ///
    /// On error the playlist is left unchanged.
    pub fn load_json(&mut self, json: &str) -> Result<()> {
        *self = Self::from_json(json)?;
        Ok(())
    }

    /// Replace this playlist with the one described by `xml`.
    ///
    /// On error the playlist is left unchanged.
    pub fn load_xml(&mut self, xml: &str) -> Result<()> {
        *self = Self::from_xml(xml)?;
        Ok(())
    }

    /// Full JSON document.
    pub fn to_json(&self) -> Result<String> {
        codec::json::to_json(self, true)
    }

    /// JSON document; with `full = false` the order and limit are left out.
    pub fn to_json_with(&self, full: bool) -> Result<String> {
        codec::json::to_json(self, full)
    }

    /// XML (`.xsp`) document.
    pub fn to_xml(&self) -> Result<String> {
        codec::xml::to_xml(self)
    }

    /// Compile the rule tree into a predicate.
    pub fn compile(&self, ctx: &CompileContext<'_>) -> Compiled {
        let mut visited = HashSet::new();
        visited.insert(self.name.to_lowercase());
        let mut warnings = Vec::new();
        let clause = self
            .root
            .compile_into(ctx, self.media_type, &mut visited, &mut warnings, false);
        Compiled { clause, warnings }
    }

    /// Returns true when the playlist has no rules. Unless
    /// `ignore_sort_and_limit` is set, a non-default order, a limit or a
    /// group also count as content.
    pub fn is_empty(&self, ignore_sort_and_limit: bool) -> bool {
        if !self.root.is_empty() {
            return false;
        }
        ignore_sort_and_limit
            || (self.order.is_default() && self.limit == 0 && self.group.is_none())
    }

    /// Clear rules, ordering, limit and grouping, and reset the type to
    /// songs. The name is kept.
    pub fn reset(&mut self) {
        let name = std::mem::take(&mut self.name);
        *self = Self::new(name, MediaType::Songs);
    }

    /// Names of playlists referenced through `virtualfolder` rules.
    pub fn virtual_folders(&self) -> Vec<String> {
        self.root
            .rules()
            .into_iter()
            .filter(|rule| rule.field == Field::VirtualFolder && !rule.operator.is_negated())
            .flat_map(|rule| rule.parameters.iter().cloned())
            .collect()
    }

    /// Directory family this playlist is saved under.
    pub fn save_location(&self) -> &'static str {
        self.media_type.save_location()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn media_type(&self) -> MediaType {
        self.media_type
    }

    pub fn set_media_type(&mut self, media_type: MediaType) {
        self.media_type = media_type;
    }

    pub fn root(&self) -> &Combination {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Combination {
        &mut self.root
    }

    pub fn set_root(&mut self, root: Combination) {
        self.root = root;
    }

    pub fn match_all(&self) -> bool {
        self.root.kind() == CombinationKind::And
    }

    pub fn set_match_all(&mut self, match_all: bool) {
        self.root.set_kind(if match_all {
            CombinationKind::And
        } else {
            CombinationKind::Or
        });
    }

    pub fn order(&self) -> Order {
        self.order
    }

    pub fn set_order(&mut self, order: Order) {
        self.order = order;
    }

    /// Maximum number of results; 0 means unlimited.
    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn set_limit(&mut self, limit: u32) {
        self.limit = limit;
    }

    pub fn group(&self) -> Option<GroupBy> {
        self.group
    }

    pub fn set_group(&mut self, group: Option<GroupBy>) {
        self.group = group;
    }

    pub fn group_mixed(&self) -> bool {
        self.group_mixed
    }

    pub fn set_group_mixed(&mut self, mixed: bool) {
        self.group_mixed = mixed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compile::{Backend, PlaylistLibrary};
    use crate::operator::Operator;
    use crate::rule::Rule;
    use crate::CompileWarning;
    use smartlists_common::SortBy;

    struct Columns;

    impl Backend for Columns {
        fn column(&self, field: Field, _media_type: MediaType) -> Option<String> {
            Some(field.as_str().to_string())
        }
    }

    fn referencing(name: &str, media_type: MediaType, target: &str) -> SmartPlaylist {
        let mut playlist = SmartPlaylist::new(name, media_type);
        playlist
            .root_mut()
            .push(Rule::new(Field::Playlist, Operator::Equals, [target]));
        playlist
    }

    #[test]
    fn emptiness() {
        let mut playlist = SmartPlaylist::new("Empty", MediaType::Songs);
        assert!(playlist.is_empty(false));

        playlist.set_limit(10);
        assert!(!playlist.is_empty(false));
        assert!(playlist.is_empty(true));

        playlist.set_limit(0);
        playlist.set_order(Order::new(SortBy::Random));
        assert!(!playlist.is_empty(false));

        playlist
            .root_mut()
            .push(Rule::new(Field::Genre, Operator::Contains, ["Jazz"]));
        assert!(!playlist.is_empty(true));
    }

    #[test]
    fn reset_keeps_the_name() {
        let mut playlist = SmartPlaylist::new("Keep", MediaType::Movies);
        playlist.set_limit(5);
        playlist.set_group(Some(GroupBy::Genres));
        playlist.set_match_all(false);
        playlist
            .root_mut()
            .push(Rule::new(Field::Genre, Operator::Contains, ["Drama"]));
        playlist.reset();
        assert_eq!(playlist, SmartPlaylist::new("Keep", MediaType::Songs));
    }

    #[test]
    fn match_all_follows_root_kind() {
        let mut playlist = SmartPlaylist::default();
        assert!(playlist.match_all());
        playlist.set_match_all(false);
        assert!(!playlist.match_all());
        assert_eq!(playlist.root().kind(), CombinationKind::Or);
    }

    #[test]
    fn cycles_terminate() {
        let library: PlaylistLibrary = [
            referencing("A", MediaType::Songs, "B"),
            referencing("B", MediaType::Songs, "a"),
        ]
        .into_iter()
        .collect();
        let ctx = CompileContext::new(&Columns, &library);

        let a = library.get("A").cloned().unwrap();
        let compiled = a.compile(&ctx);
        assert_eq!(compiled.clause, "");
        assert!(compiled.warnings.is_empty());
    }

    #[test]
    fn self_reference_is_ignored() {
        let mut playlist = referencing("Loop", MediaType::Songs, "LOOP");
        playlist
            .root_mut()
            .push(Rule::new(Field::Genre, Operator::Equals, ["Jazz"]));
        let library: PlaylistLibrary = [playlist.clone()].into_iter().collect();
        let ctx = CompileContext::new(&Columns, &library);
        assert_eq!(playlist.compile(&ctx).clause, "(genre = 'Jazz')");
    }

    #[test]
    fn type_compatibility() {
        let mut songs = SmartPlaylist::new("Songs", MediaType::Songs);
        songs
            .root_mut()
            .push(Rule::new(Field::Genre, Operator::Contains, ["Rock"]));
        let mut mixed = SmartPlaylist::new("Mixed", MediaType::Mixed);
        mixed
            .root_mut()
            .push(Rule::new(Field::Genre, Operator::Contains, ["Pop"]));
        let library: PlaylistLibrary = [songs, mixed].into_iter().collect();
        let ctx = CompileContext::new(&Columns, &library);

        let movies = referencing("Movies", MediaType::Movies, "Songs");
        let compiled = movies.compile(&ctx);
        assert_eq!(compiled.clause, "");
        assert_eq!(
            compiled.warnings,
            vec![CompileWarning::IncompatibleType {
                name: "Songs".into(),
                expected: MediaType::Movies,
                found: MediaType::Songs,
            }]
        );

        let movies = referencing("Movies", MediaType::Movies, "Mixed");
        let compiled = movies.compile(&ctx);
        assert_eq!(compiled.clause, "(genre LIKE '%Pop%')");
        assert!(compiled.warnings.is_empty());
    }

    #[test]
    fn virtual_folders_are_listed() {
        let mut playlist = SmartPlaylist::new("Folders", MediaType::Movies);
        playlist
            .root_mut()
            .push(Rule::new(Field::VirtualFolder, Operator::Equals, ["Old", "New"]));
        playlist
            .root_mut()
            .push(Rule::new(Field::VirtualFolder, Operator::DoesNotEqual, ["Skip"]));
        assert_eq!(playlist.virtual_folders(), vec!["Old", "New"]);
        assert_eq!(playlist.save_location(), "video");
    }
}
