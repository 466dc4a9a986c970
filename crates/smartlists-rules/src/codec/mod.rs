//! Serialized forms of a [`SmartPlaylist`](crate::SmartPlaylist).
//!
//! Both codecs build a complete playlist before handing it back, so a failed
//! load never leaves a half-populated document behind.

pub mod json;
pub mod xml;

use smartlists_common::{Error, GroupBy, MediaType, Order, Result, SortDirection};

use crate::field::Field;
use crate::operator::Operator;
use crate::rule::Rule;
use crate::vocabulary;

pub use json::{from_json, to_json};
pub use xml::{from_xml, read_name, to_xml};

/// Serialized document format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Xml,
}

impl Format {
    /// Guess the format of a document from its first non-blank character.
    pub fn sniff(document: &str) -> Option<Format> {
        match document.trim_start().chars().next() {
            Some('{') => Some(Format::Json),
            Some('<') => Some(Format::Xml),
            _ => None,
        }
    }

    /// Format implied by a file extension (`json`, `xsp` or `xml`).
    pub fn from_extension(extension: &str) -> Option<Format> {
        match extension.to_ascii_lowercase().as_str() {
            "json" => Some(Format::Json),
            "xsp" | "xml" => Some(Format::Xml),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Format::Json => "json",
            Format::Xml => "xsp",
        }
    }
}

pub(crate) fn parse_media_type(raw: Option<&str>) -> Result<MediaType> {
    let raw = raw.ok_or_else(|| Error::malformed("missing playlist type"))?;
    raw.parse()
        .map_err(|_| Error::malformed(format!("unknown playlist type '{raw}'")))
}

pub(crate) fn parse_rule(
    field: &str,
    operator: &str,
    parameters: Vec<String>,
    media_type: MediaType,
) -> Result<Rule> {
    let rule = Rule::new(field.parse::<Field>()?, operator.parse::<Operator>()?, parameters);
    rule.check(media_type)?;
    Ok(rule)
}

pub(crate) fn check_order(order: Order, media_type: MediaType) -> Result<Order> {
    if !vocabulary::allows_order(media_type, order.by) {
        return Err(Error::malformed(format!(
            "{media_type} playlists cannot be ordered by '{}'",
            order.by.as_str()
        )));
    }
    Ok(order)
}

pub(crate) fn parse_group(raw: &str, media_type: MediaType) -> Result<GroupBy> {
    let group: GroupBy = raw.parse()?;
    if !vocabulary::groups(media_type).contains(&group) {
        return Err(Error::malformed(format!(
            "{media_type} playlists cannot be grouped by '{}'",
            group.as_str()
        )));
    }
    Ok(group)
}

pub(crate) fn parse_limit(raw: &str) -> Result<u32> {
    raw.trim()
        .parse()
        .map_err(|_| Error::malformed(format!("limit must be a non-negative integer, got '{raw}'")))
}

pub(crate) fn parse_direction(raw: Option<&str>) -> Result<SortDirection> {
    raw.map_or(Ok(SortDirection::Ascending), str::parse)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sniffing() {
        assert_eq!(Format::sniff("  {\"type\":\"songs\"}"), Some(Format::Json));
        assert_eq!(Format::sniff("\n<?xml version=\"1.0\"?>"), Some(Format::Xml));
        assert_eq!(Format::sniff("type: songs"), None);
        assert_eq!(Format::from_extension("XSP"), Some(Format::Xml));
        assert_eq!(Format::from_extension("m3u"), None);
    }

    #[test]
    fn shared_parsers() {
        assert_eq!(parse_limit(" 25 ").unwrap(), 25);
        assert!(parse_limit("-1").unwrap_err().is_malformed());
        assert!(parse_limit("ten").is_err());
        assert!(parse_media_type(None).unwrap_err().is_malformed());
        assert!(parse_media_type(Some("podcasts")).unwrap_err().is_malformed());
        assert_eq!(parse_direction(None).unwrap(), SortDirection::Ascending);
    }

    #[test]
    fn order_and_group_follow_the_media_type() {
        use smartlists_common::SortBy;

        assert!(check_order(Order::new(SortBy::TrackNumber), MediaType::Songs).is_ok());
        assert!(check_order(Order::default(), MediaType::Artists).is_ok());
        let err = check_order(Order::new(SortBy::TrackNumber), MediaType::Movies).unwrap_err();
        assert!(err.is_malformed());

        assert_eq!(parse_group("sets", MediaType::Movies).unwrap(), GroupBy::Sets);
        assert!(parse_group("sets", MediaType::Songs).unwrap_err().is_malformed());
    }
}
