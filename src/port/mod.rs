//! Port identifiers.
//!
//! Every connection point on the canvas is addressed by a `|`-delimited string.
//! Edges in persisted flow documents store these strings verbatim, so the
//! layout below is a wire format:
//!
//! * field port: `type|field|node` or `type|field|node|proxyNode|proxyField`
//! * output port: `type|node|baseClass1|baseClass2|...`
//!
//! Internally the identifiers are the tagged structs [`FieldPortId`] and
//! [`OutputPortId`]; strings only exist at the boundary, through `Display`
//! and `FromStr`.

use crate::error::PortIdError;
use crate::flow::{FieldDescriptor, Node, Proxy};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub mod label;

pub const DELIMITER: char = '|';

/// The internal node field a group-level port stands for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProxyTarget {
    pub node_id: String,
    pub field: String,
}

impl From<&Proxy> for ProxyTarget {
    fn from(proxy: &Proxy) -> Self {
        Self {
            node_id: proxy.id.clone(),
            field: proxy.field.clone(),
        }
    }
}

/// Identifier of a port bound to one template field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FieldPortId {
    pub type_name: String,
    pub field: String,
    pub owner_id: String,
    pub proxy: Option<ProxyTarget>,
}

impl FieldPortId {
    pub fn new(
        type_name: impl Into<String>,
        field: impl Into<String>,
        owner_id: impl Into<String>,
    ) -> Self {
        Self {
            type_name: type_name.into(),
            field: field.into(),
            owner_id: owner_id.into(),
            proxy: None,
        }
    }

    pub fn with_proxy(mut self, node_id: impl Into<String>, field: impl Into<String>) -> Self {
        self.proxy = Some(ProxyTarget {
            node_id: node_id.into(),
            field: field.into(),
        });
        self
    }

    /// Builds the identifier of `field_name` on `node_id`.
    ///
    /// A descriptor without a type encodes an empty type segment. A proxy with
    /// an empty part is left out, since it could not be decoded.
    pub fn for_field(descriptor: &FieldDescriptor, field_name: &str, node_id: &str) -> Self {
        Self {
            type_name: descriptor.type_str().to_string(),
            field: field_name.to_string(),
            owner_id: node_id.to_string(),
            proxy: descriptor
                .proxy
                .as_ref()
                .filter(|p| !p.id.is_empty() && !p.field.is_empty())
                .map(ProxyTarget::from),
        }
    }

    /// Where an edge on this port really lands: the proxy target if there is one.
    pub fn resolved_target(&self) -> (&str, &str) {
        match &self.proxy {
            Some(proxy) => (&proxy.node_id, &proxy.field),
            None => (&self.owner_id, &self.field),
        }
    }
}

impl fmt::Display for FieldPortId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{d}{}{d}{}",
            self.type_name,
            self.field,
            self.owner_id,
            d = DELIMITER
        )?;
        if let Some(proxy) = &self.proxy {
            write!(f, "{d}{}{d}{}", proxy.node_id, proxy.field, d = DELIMITER)?;
        }
        Ok(())
    }
}

impl FromStr for FieldPortId {
    type Err = PortIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(PortIdError::Empty);
        }
        let parts: Vec<&str> = s.split(DELIMITER).collect();
        if parts.len() != 3 && parts.len() != 5 {
            return Err(PortIdError::SegmentCount {
                id: s.to_string(),
                found: parts.len(),
                expected: "3 or 5",
            });
        }
        // The type segment may be empty: untyped fields still get a port.
        if let Some(index) = parts.iter().skip(1).position(|p| p.is_empty()) {
            return Err(PortIdError::EmptySegment {
                id: s.to_string(),
                index: index + 1,
            });
        }

        let mut id = FieldPortId::new(parts[0], parts[1], parts[2]);
        if parts.len() == 5 {
            id = id.with_proxy(parts[3], parts[4]);
        }
        Ok(id)
    }
}

impl TryFrom<String> for FieldPortId {
    type Error = PortIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FieldPortId> for String {
    fn from(id: FieldPortId) -> Self {
        id.to_string()
    }
}

/// Identifier of a node's aggregate output port.
///
/// Carries no field name; the node id keeps it unique on the canvas.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OutputPortId {
    pub node_type: String,
    pub node_id: String,
    pub base_classes: Vec<String>,
}

impl OutputPortId {
    pub fn for_node(node: &Node) -> Self {
        Self {
            node_type: node.node_type().to_string(),
            node_id: node.id.clone(),
            base_classes: node.base_classes().to_vec(),
        }
    }
}

impl fmt::Display for OutputPortId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = [&self.node_type, &self.node_id]
            .into_iter()
            .chain(self.base_classes.iter())
            .join(&DELIMITER.to_string());
        f.write_str(&joined)
    }
}

impl FromStr for OutputPortId {
    type Err = PortIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(PortIdError::Empty);
        }
        let mut parts = s.split(DELIMITER);
        let (Some(node_type), Some(node_id)) = (parts.next(), parts.next()) else {
            return Err(PortIdError::SegmentCount {
                id: s.to_string(),
                found: 1,
                expected: "at least 2",
            });
        };
        if node_id.is_empty() {
            return Err(PortIdError::EmptySegment {
                id: s.to_string(),
                index: 1,
            });
        }
        Ok(Self {
            node_type: node_type.to_string(),
            node_id: node_id.to_string(),
            base_classes: parts.map(str::to_string).collect(),
        })
    }
}

impl TryFrom<String> for OutputPortId {
    type Error = PortIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<OutputPortId> for String {
    fn from(id: OutputPortId) -> Self {
        id.to_string()
    }
}

/// Any port identifier a node can expose.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PortId {
    Field(FieldPortId),
    Output(OutputPortId),
}

impl PortId {
    pub fn owner_id(&self) -> &str {
        match self {
            PortId::Field(id) => &id.owner_id,
            PortId::Output(id) => &id.node_id,
        }
    }
}

impl fmt::Display for PortId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortId::Field(id) => id.fmt(f),
            PortId::Output(id) => id.fmt(f),
        }
    }
}
