//! JSON form of a smart playlist.
//!
//! ```json
//! {
//!   "name": "Action",
//!   "type": "movies",
//!   "match": "all",
//!   "rules": [
//!     { "field": "genre", "operator": "contains", "value": ["Action"] },
//!     { "match": "one", "rules": [ ... ] }
//!   ],
//!   "order": { "field": "rating", "direction": "descending" },
//!   "limit": 25,
//!   "group": { "field": "genres", "mixed": false }
//! }
//! ```
//!
//! Conversion goes through [`serde_json::Value`] by hand: the rule tree is
//! recursive and must be checked against the vocabulary of the playlist type
//! while it is read.

use serde_json::{json, Map, Value};
use smartlists_common::{Error, MediaType, Order, Result, SortAttributes};
use tracing::debug;

use super::{check_order, parse_direction, parse_group, parse_limit, parse_media_type, parse_rule};
use crate::combination::{Combination, Node};
use crate::playlist::SmartPlaylist;
use crate::rule::Rule;

// ---------------------------------------------------------------------------
// Writing
// ---------------------------------------------------------------------------

fn rule_to_value(rule: &Rule) -> Value {
    json!({
        "field": rule.field.as_str(),
        "operator": rule.operator.as_str(),
        "value": rule.parameters,
    })
}

fn rules_to_value(combination: &Combination) -> Value {
    let children: Vec<Value> = combination
        .children()
        .iter()
        .map(|child| match child {
            Node::Rule(rule) => rule_to_value(rule),
            Node::Combination(inner) => json!({
                "match": inner.kind().as_str(),
                "rules": rules_to_value(inner),
            }),
        })
        .collect();
    Value::Array(children)
}

fn order_to_value(order: &Order) -> Value {
    let mut map = Map::new();
    map.insert("field".into(), Value::String(order.by.as_str().into()));
    map.insert(
        "direction".into(),
        Value::String(order.direction.as_str().into()),
    );
    if order.attributes.ignore_article {
        map.insert("ignorearticle".into(), Value::Bool(true));
    }
    if order.attributes.ignore_folders {
        map.insert("ignorefolders".into(), Value::Bool(true));
    }
    Value::Object(map)
}

/// Convert a playlist to a JSON value. With `full = false` the order and
/// limit are left out.
pub fn to_value(playlist: &SmartPlaylist, full: bool) -> Value {
    let mut map = Map::new();
    map.insert("name".into(), Value::String(playlist.name().into()));
    map.insert(
        "type".into(),
        Value::String(playlist.media_type().as_str().into()),
    );
    map.insert(
        "match".into(),
        Value::String(playlist.root().kind().as_str().into()),
    );
    map.insert("rules".into(), rules_to_value(playlist.root()));

    if full {
        if !playlist.order().is_default() {
            map.insert("order".into(), order_to_value(&playlist.order()));
        }
        if playlist.limit() > 0 {
            map.insert("limit".into(), Value::from(playlist.limit()));
        }
    }

    if let Some(group) = playlist.group() {
        map.insert(
            "group".into(),
            json!({ "field": group.as_str(), "mixed": playlist.group_mixed() }),
        );
    }

    Value::Object(map)
}

/// Serialize a playlist to pretty-printed JSON.
pub fn to_json(playlist: &SmartPlaylist, full: bool) -> Result<String> {
    serde_json::to_string_pretty(&to_value(playlist, full))
        .map_err(|e| Error::invalid_input(format!("failed to serialize playlist: {e}")))
}

// ---------------------------------------------------------------------------
// Reading
// ---------------------------------------------------------------------------

fn str_field<'a>(obj: &'a Map<String, Value>, key: &str) -> Result<Option<&'a str>> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(_) => Err(Error::malformed(format!("\"{key}\" must be a string"))),
    }
}

fn bool_field(obj: &Map<String, Value>, key: &str) -> Result<bool> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(false),
        Some(Value::Bool(b)) => Ok(*b),
        Some(_) => Err(Error::malformed(format!("\"{key}\" must be a boolean"))),
    }
}

fn parameters_from_value(value: Option<&Value>) -> Result<Vec<String>> {
    match value {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::String(s)) => Ok(vec![s.clone()]),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| {
                item.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| Error::malformed("rule values must be strings"))
            })
            .collect(),
        Some(_) => Err(Error::malformed(
            "rule \"value\" must be a string or an array of strings",
        )),
    }
}

fn combination_from_value(
    match_value: Option<&str>,
    rules: Option<&Value>,
    media_type: MediaType,
) -> Result<Combination> {
    let kind = match_value.map_or(Ok(Default::default()), str::parse)?;
    let mut combination = Combination::new(kind);

    let children = match rules {
        None | Some(Value::Null) => return Ok(combination),
        Some(Value::Array(children)) => children,
        Some(_) => return Err(Error::malformed("\"rules\" must be an array")),
    };

    for child in children {
        let obj = child
            .as_object()
            .ok_or_else(|| Error::malformed("each rule must be a JSON object"))?;
        if obj.contains_key("field") {
            let field = str_field(obj, "field")?.unwrap_or_default();
            let operator = str_field(obj, "operator")?
                .ok_or_else(|| Error::malformed(format!("rule on '{field}' has no operator")))?;
            let parameters = parameters_from_value(obj.get("value"))?;
            combination.push(parse_rule(field, operator, parameters, media_type)?);
        } else if obj.contains_key("rules") {
            let inner = combination_from_value(str_field(obj, "match")?, obj.get("rules"), media_type)?;
            combination.push(inner);
        } else {
            return Err(Error::malformed(
                "rule entries need either a \"field\" or a nested \"rules\" array",
            ));
        }
    }
    Ok(combination)
}

fn order_from_value(value: &Value) -> Result<Order> {
    let obj = value
        .as_object()
        .ok_or_else(|| Error::malformed("\"order\" must be an object"))?;
    let by = match str_field(obj, "field")? {
        Some(field) => field.parse()?,
        None => Default::default(),
    };
    Ok(Order {
        by,
        direction: parse_direction(str_field(obj, "direction")?)?,
        attributes: SortAttributes {
            ignore_article: bool_field(obj, "ignorearticle")?,
            ignore_folders: bool_field(obj, "ignorefolders")?,
        },
    })
}

fn limit_from_value(value: &Value) -> Result<u32> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(|| Error::malformed(format!("invalid limit {n}"))),
        Value::String(s) => parse_limit(s),
        _ => Err(Error::malformed("\"limit\" must be an integer")),
    }
}

/// Build a playlist from a parsed JSON value.
pub fn from_value(value: &Value) -> Result<SmartPlaylist> {
    let obj = value
        .as_object()
        .ok_or_else(|| Error::malformed("playlist must be a JSON object"))?;

    let media_type = parse_media_type(str_field(obj, "type")?)?;
    let mut playlist = SmartPlaylist::new(str_field(obj, "name")?.unwrap_or_default(), media_type);
    playlist.set_root(combination_from_value(
        str_field(obj, "match")?,
        obj.get("rules"),
        media_type,
    )?);

    if let Some(order) = obj.get("order").filter(|v| !v.is_null()) {
        playlist.set_order(check_order(order_from_value(order)?, media_type)?);
    }
    if let Some(limit) = obj.get("limit").filter(|v| !v.is_null()) {
        playlist.set_limit(limit_from_value(limit)?);
    }
    if let Some(group) = obj.get("group").filter(|v| !v.is_null()) {
        let group = group
            .as_object()
            .ok_or_else(|| Error::malformed("\"group\" must be an object"))?;
        if let Some(field) = str_field(group, "field")?.filter(|f| !f.is_empty()) {
            playlist.set_group(Some(parse_group(field, media_type)?));
            playlist.set_group_mixed(bool_field(group, "mixed")?);
        }
    }

    debug!(name = %playlist.name(), media_type = %media_type, "Loaded JSON playlist");
    Ok(playlist)
}

/// Parse a JSON document into a playlist.
pub fn from_json(json: &str) -> Result<SmartPlaylist> {
    let value: Value = serde_json::from_str(json)
        .map_err(|e| Error::malformed(format!("invalid JSON: {e}")))?;
    from_value(&value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Field;
    use crate::operator::Operator;
    use smartlists_common::{GroupBy, SortBy, SortDirection};

    const ACTION: &str = r#"{
        "name": "Action",
        "type": "movies",
        "match": "all",
        "rules": [
            { "field": "genre", "operator": "contains", "value": "Action" },
            { "match": "one", "rules": [
                { "field": "rating", "operator": "greaterthan", "value": ["7"] },
                { "field": "inprogress", "operator": "true" }
            ]}
        ],
        "order": { "field": "rating", "direction": "descending", "ignorearticle": true },
        "limit": 25,
        "group": { "field": "sets", "mixed": true }
    }"#;

    #[test]
    fn parse_full_document() {
        let playlist = from_json(ACTION).unwrap();
        assert_eq!(playlist.name(), "Action");
        assert_eq!(playlist.media_type(), MediaType::Movies);
        assert!(playlist.match_all());
        assert_eq!(playlist.limit(), 25);
        assert_eq!(playlist.group(), Some(GroupBy::Sets));
        assert!(playlist.group_mixed());

        let order = playlist.order();
        assert_eq!(order.by, SortBy::Rating);
        assert_eq!(order.direction, SortDirection::Descending);
        assert!(order.attributes.ignore_article);
        assert!(!order.attributes.ignore_folders);

        let root = playlist.root().children();
        assert_eq!(root.len(), 2);
        assert_eq!(
            root[0],
            Node::Rule(Rule::new(Field::Genre, Operator::Contains, ["Action"]))
        );
        match &root[1] {
            Node::Combination(inner) => {
                assert_eq!(inner.kind().as_str(), "one");
                assert_eq!(inner.children().len(), 2);
            }
            other => panic!("expected nested rules, got {other:?}"),
        }
    }

    #[test]
    fn defaults_for_missing_keys() {
        let playlist = from_json(r#"{"type": "songs"}"#).unwrap();
        assert_eq!(playlist.name(), "");
        assert!(playlist.match_all());
        assert!(playlist.is_empty(false));
    }

    #[test]
    fn round_trip_preserves_the_model() {
        let playlist = from_json(ACTION).unwrap();
        let again = from_json(&to_json(&playlist, true).unwrap()).unwrap();
        assert_eq!(playlist, again);
    }

    #[test]
    fn partial_output_omits_order_and_limit() {
        let playlist = from_json(ACTION).unwrap();
        let value = to_value(&playlist, false);
        assert!(value.get("order").is_none());
        assert!(value.get("limit").is_none());
        assert_eq!(value["group"]["field"], "sets");
        assert_eq!(value["rules"][0]["value"], json!(["Action"]));
    }

    #[test]
    fn rejects_malformed_documents() {
        let cases = [
            "not json",
            "[]",
            r#"{"name": "x"}"#,
            r#"{"type": "podcasts"}"#,
            r#"{"type": "songs", "match": "any"}"#,
            r#"{"type": "songs", "rules": [{"field": "loudness", "operator": "is", "value": "1"}]}"#,
            r#"{"type": "songs", "rules": [{"field": "genre", "operator": "near", "value": "x"}]}"#,
            r#"{"type": "songs", "rules": [{"field": "director", "operator": "is", "value": "x"}]}"#,
            r#"{"type": "songs", "rules": [{"field": "genre", "operator": "greaterthan", "value": "1"}]}"#,
            r#"{"type": "songs", "rules": [{"field": "genre", "operator": "is", "value": 3}]}"#,
            r#"{"type": "songs", "rules": [{"operator": "is"}]}"#,
            r#"{"type": "songs", "limit": -4}"#,
            r#"{"type": "songs", "limit": 2.5}"#,
            r#"{"type": "songs", "order": {"field": "loudness"}}"#,
            r#"{"type": "movies", "group": {"field": "moods"}}"#,
            r#"{"type": "movies", "order": {"field": "tracknumber"}}"#,
            r#"{"type": "songs", "group": {"field": "sets"}}"#,
        ];
        for case in cases {
            let err = from_json(case).unwrap_err();
            assert!(err.is_malformed(), "{case}: {err}");
        }
    }

    #[test]
    fn between_arity() {
        let doc = |values: &str| {
            format!(
                r#"{{"type": "songs", "rules": [{{"field": "year", "operator": "between", "value": [{values}]}}]}}"#
            )
        };
        assert!(from_json(&doc("")).is_err());
        assert!(from_json(&doc(r#""1990""#)).is_err());
        assert!(from_json(&doc(r#""1990", "1995", "1999""#)).is_err());
        assert!(from_json(&doc(r#""1990", "1999""#)).is_ok());
    }

    #[test]
    fn failed_load_leaves_playlist_untouched() {
        let mut playlist = from_json(ACTION).unwrap();
        let before = playlist.clone();
        assert!(playlist.load_json(r#"{"type": "songs", "limit": "many"}"#).is_err());
        assert_eq!(playlist, before);
        playlist.load_json(r#"{"type": "songs", "name": "Other"}"#).unwrap();
        assert_eq!(playlist.name(), "Other");
    }
}
