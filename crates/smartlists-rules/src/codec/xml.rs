//! XML (`.xsp`) form of a smart playlist.
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8" standalone="yes"?>
//! <smartplaylist type="movies">
//!     <name>Action</name>
//!     <match>all</match>
//!     <rule field="genre" operator="contains">
//!         <value>Action</value>
//!     </rule>
//!     <rules match="one">
//!         <rule field="title" operator="startswith">
//!             <value>The</value>
//!         </rule>
//!     </rules>
//!     <order direction="descending">rating</order>
//!     <limit>25</limit>
//! </smartplaylist>
//! ```
//!
//! Older documents put the parameters directly inside `<rule>`, separated by
//! `" / "`; those are still read.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use smartlists_common::{Error, MediaType, Order, Result, SortAttributes};
use std::fmt::Display;
use tracing::debug;

use super::{check_order, parse_direction, parse_group, parse_limit, parse_media_type, parse_rule};
use crate::combination::{Combination, CombinationKind, Node};
use crate::playlist::SmartPlaylist;
use crate::rule::Rule;
use crate::validate::PARAMETER_SEPARATOR;

const ROOT: &str = "smartplaylist";

fn xml_err<E: Display>(err: E) -> Error {
    Error::malformed(format!("invalid XML: {err}"))
}

// ---------------------------------------------------------------------------
// Document tree
// ---------------------------------------------------------------------------

/// Minimal element tree; enough for the handful of tags a playlist uses.
#[derive(Debug, Default)]
struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Element>,
    text: String,
}

impl Element {
    fn from_start(start: &BytesStart<'_>) -> Result<Self> {
        let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr.map_err(xml_err)?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr.unescape_value().map_err(xml_err)?.into_owned();
            attributes.push((key, value));
        }
        Ok(Self {
            name,
            attributes,
            ..Default::default()
        })
    }

    fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    fn flag(&self, key: &str) -> bool {
        self.attribute(key)
            .is_some_and(|v| v.eq_ignore_ascii_case("true") || v == "1")
    }

    fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name).map(|c| c.text.trim())
    }
}

fn parse_document(xml: &str) -> Result<Element> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event().map_err(xml_err)? {
            Event::Start(start) => stack.push(Element::from_start(&start)?),
            Event::Empty(start) => {
                let element = Element::from_start(&start)?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| Error::malformed("unbalanced closing tag"))?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::Text(text) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&text.unescape().map_err(xml_err)?);
                }
            }
            Event::CData(data) => {
                if let Some(current) = stack.last_mut() {
                    current
                        .text
                        .push_str(&String::from_utf8_lossy(&data.into_inner()));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(Error::malformed("unexpected end of document"));
    }
    root.ok_or_else(|| Error::malformed("document has no root element"))
}

fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_none() => *root = Some(element),
        None => return Err(Error::malformed("document has more than one root element")),
    }
    Ok(())
}

fn playlist_root(xml: &str) -> Result<Element> {
    let root = parse_document(xml)?;
    if root.name != ROOT {
        return Err(Error::malformed(format!(
            "expected <{ROOT}> root element, found <{}>",
            root.name
        )));
    }
    Ok(root)
}

// ---------------------------------------------------------------------------
// Reading
// ---------------------------------------------------------------------------

fn rule_from_element(element: &Element, media_type: MediaType) -> Result<Rule> {
    let field = element
        .attribute("field")
        .ok_or_else(|| Error::malformed("<rule> has no field attribute"))?;
    let operator = element
        .attribute("operator")
        .ok_or_else(|| Error::malformed(format!("rule on '{field}' has no operator")))?;

    let values: Vec<&Element> = element
        .children
        .iter()
        .filter(|c| c.name == "value")
        .collect();
    let parameters = if !values.is_empty() {
        values.iter().map(|v| v.text.clone()).collect()
    } else if element.text.trim().is_empty() {
        Vec::new()
    } else {
        element
            .text
            .split(PARAMETER_SEPARATOR)
            .map(str::to_string)
            .collect()
    };

    parse_rule(field, operator, parameters, media_type)
}

fn combination_from_element(
    element: &Element,
    kind: CombinationKind,
    media_type: MediaType,
) -> Result<Combination> {
    let mut combination = Combination::new(kind);
    for child in &element.children {
        match child.name.as_str() {
            "rule" => combination.push(rule_from_element(child, media_type)?),
            "rules" => {
                let kind = child
                    .attribute("match")
                    .map_or(Ok(CombinationKind::And), str::parse)?;
                combination.push(combination_from_element(child, kind, media_type)?);
            }
            _ => {}
        }
    }
    Ok(combination)
}

fn order_from_element(element: &Element) -> Result<Order> {
    let key = element.text.trim();
    Ok(Order {
        by: if key.is_empty() {
            Default::default()
        } else {
            key.parse()?
        },
        direction: parse_direction(element.attribute("direction"))?,
        attributes: SortAttributes {
            ignore_article: element.flag("ignorearticle"),
            ignore_folders: element.flag("ignorefolders"),
        },
    })
}

/// Parse an XML document into a playlist.
pub fn from_xml(xml: &str) -> Result<SmartPlaylist> {
    let root = playlist_root(xml)?;
    let media_type = parse_media_type(root.attribute("type"))?;

    let kind = root
        .child_text("match")
        .map_or(Ok(CombinationKind::And), str::parse)?;
    let mut playlist = SmartPlaylist::new(root.child_text("name").unwrap_or_default(), media_type);
    playlist.set_root(combination_from_element(&root, kind, media_type)?);

    if let Some(order) = root.child("order") {
        playlist.set_order(check_order(order_from_element(order)?, media_type)?);
    }
    if let Some(limit) = root.child_text("limit") {
        playlist.set_limit(parse_limit(limit)?);
    }
    if let Some(group) = root.child("group") {
        let field = group.text.trim();
        if !field.is_empty() {
            playlist.set_group(Some(parse_group(field, media_type)?));
            playlist.set_group_mixed(group.flag("mixed"));
        }
    }

    debug!(name = %playlist.name(), media_type = %media_type, "Loaded XML playlist");
    Ok(playlist)
}

/// Read only the playlist name from an XML document.
pub fn read_name(xml: &str) -> Result<String> {
    let root = playlist_root(xml)?;
    Ok(root.child_text("name").unwrap_or_default().to_string())
}

// ---------------------------------------------------------------------------
// Writing
// ---------------------------------------------------------------------------

struct XmlOut {
    writer: Writer<Vec<u8>>,
}

impl XmlOut {
    fn new() -> Self {
        Self {
            writer: Writer::new_with_indent(Vec::new(), b' ', 4),
        }
    }

    fn event(&mut self, event: Event<'_>) -> Result<()> {
        self.writer.write_event(event).map_err(xml_err)
    }

    fn start(name: &str, attributes: &[(&str, &str)]) -> BytesStart<'static> {
        let mut start = BytesStart::new(name.to_string());
        for attr in attributes {
            start.push_attribute(*attr);
        }
        start
    }

    /// `<name attrs>text</name>`, or `<name attrs/>` when `text` is empty.
    fn text_element(&mut self, name: &str, attributes: &[(&str, &str)], text: &str) -> Result<()> {
        let start = Self::start(name, attributes);
        if text.is_empty() {
            return self.event(Event::Empty(start));
        }
        self.event(Event::Start(start))?;
        self.event(Event::Text(BytesText::new(text)))?;
        self.event(Event::End(BytesEnd::new(name)))
    }

    fn rule(&mut self, rule: &Rule) -> Result<()> {
        let attributes = [
            ("field", rule.field.as_str()),
            ("operator", rule.operator.as_str()),
        ];
        if rule.parameters.is_empty() {
            return self.event(Event::Empty(Self::start("rule", &attributes)));
        }
        self.event(Event::Start(Self::start("rule", &attributes)))?;
        for value in &rule.parameters {
            self.text_element("value", &[], value)?;
        }
        self.event(Event::End(BytesEnd::new("rule")))
    }

    fn children(&mut self, combination: &Combination) -> Result<()> {
        for child in combination.children() {
            match child {
                Node::Rule(rule) => self.rule(rule)?,
                Node::Combination(inner) => {
                    let attributes = [("match", inner.kind().as_str())];
                    if inner.is_empty() {
                        self.event(Event::Empty(Self::start("rules", &attributes)))?;
                    } else {
                        self.event(Event::Start(Self::start("rules", &attributes)))?;
                        self.children(inner)?;
                        self.event(Event::End(BytesEnd::new("rules")))?;
                    }
                }
            }
        }
        Ok(())
    }

    fn finish(self) -> Result<String> {
        let mut xml = String::from_utf8(self.writer.into_inner()).map_err(xml_err)?;
        xml.push('\n');
        Ok(xml)
    }
}

/// Serialize a playlist to an indented XML document.
pub fn to_xml(playlist: &SmartPlaylist) -> Result<String> {
    let mut out = XmlOut::new();
    out.event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
    out.event(Event::Start(XmlOut::start(
        ROOT,
        &[("type", playlist.media_type().as_str())],
    )))?;

    out.text_element("name", &[], playlist.name())?;
    out.text_element("match", &[], playlist.root().kind().as_str())?;
    out.children(playlist.root())?;

    let order = playlist.order();
    if !order.is_default() {
        let mut attributes = vec![("direction", order.direction.as_str())];
        if order.attributes.ignore_article {
            attributes.push(("ignorearticle", "true"));
        }
        if order.attributes.ignore_folders {
            attributes.push(("ignorefolders", "true"));
        }
        out.text_element("order", &attributes, order.by.as_str())?;
    }
    if playlist.limit() > 0 {
        out.text_element("limit", &[], &playlist.limit().to_string())?;
    }
    if let Some(group) = playlist.group() {
        let mixed = if playlist.group_mixed() { "true" } else { "false" };
        out.text_element("group", &[("mixed", mixed)], group.as_str())?;
    }

    out.event(Event::End(BytesEnd::new(ROOT)))?;
    out.finish()
}
