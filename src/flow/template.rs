use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Keys of a field descriptor that are read into typed members.
const KNOWN_KEYS: [&str; 9] = [
    "type",
    "show",
    "required",
    "advanced",
    "root",
    "list",
    "display_name",
    "name",
    "proxy",
];

/// Points a group-level field at the internal node field it forwards to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Proxy {
    pub id: String,
    pub field: String,
}

/// How a template field takes part in the node's port surface.
///
/// Assigned once when the template is ingested. The first matching rule wins:
/// underscore-prefixed names are private, then root, then advanced, then shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Name starts with `_` or is empty. Never surfaced as a port.
    Private,
    /// The designated aggregate input of the node.
    Root,
    /// Edited through the settings dialog instead of a port.
    Advanced,
    /// Ordinary left-side input port.
    Input,
    /// Not shown at all.
    Hidden,
}

impl FieldKind {
    fn classify(key: &str, descriptor: &FieldDescriptor) -> Self {
        // A nameless field has no addressable port.
        if key.is_empty() || key.starts_with('_') {
            FieldKind::Private
        } else if descriptor.root {
            FieldKind::Root
        } else if descriptor.advanced {
            FieldKind::Advanced
        } else if descriptor.show {
            FieldKind::Input
        } else {
            FieldKind::Hidden
        }
    }
}

/// A normalized field descriptor.
///
/// Flags that are missing or ill-typed in the source document read as `false`.
/// Keys this crate does not interpret, and known keys whose values have the
/// wrong shape, are kept in `extra` and written back on save. Saving still
/// normalizes the rest: known keys come first, `show`, `required` and `list`
/// are always written, `advanced` and `root` only when set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldDescriptor {
    pub type_name: Option<String>,
    pub show: bool,
    pub required: bool,
    pub advanced: bool,
    pub root: bool,
    pub list: bool,
    pub display_name: Option<String>,
    pub name: Option<String>,
    pub proxy: Option<Proxy>,
    pub extra: Map<String, Value>,
}

impl FieldDescriptor {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: Some(type_name.into()),
            ..Self::default()
        }
    }

    pub fn shown(mut self) -> Self {
        self.show = true;
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn advanced(mut self) -> Self {
        self.advanced = true;
        self
    }

    pub fn root(mut self) -> Self {
        self.root = true;
        self
    }

    pub fn list(mut self) -> Self {
        self.list = true;
        self
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    pub fn with_proxy(mut self, id: impl Into<String>, field: impl Into<String>) -> Self {
        self.proxy = Some(Proxy {
            id: id.into(),
            field: field.into(),
        });
        self
    }

    /// The declared type name, or an empty string when the descriptor has none.
    pub fn type_str(&self) -> &str {
        self.type_name.as_deref().unwrap_or("")
    }

    /// Reads a descriptor from an arbitrary JSON value without failing.
    ///
    /// A known key with a value of the wrong shape is logged and kept verbatim
    /// in `extra`. A proxy with an empty `id` or `field` cannot be addressed by
    /// a port identifier and is treated the same way.
    pub fn from_json(key: &str, value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            log::warn!("Template field '{}' is not an object, treating it as hidden", key);
            return Self::default();
        };

        let mut descriptor = Self::default();
        for (name, raw) in obj {
            let accepted = match (name.as_str(), raw) {
                (known, Value::Null) if KNOWN_KEYS.contains(&known) => true,
                ("type", Value::String(s)) => {
                    descriptor.type_name = Some(s.clone());
                    true
                }
                ("show", Value::Bool(b)) => {
                    descriptor.show = *b;
                    true
                }
                ("required", Value::Bool(b)) => {
                    descriptor.required = *b;
                    true
                }
                ("advanced", Value::Bool(b)) => {
                    descriptor.advanced = *b;
                    true
                }
                ("root", Value::Bool(b)) => {
                    descriptor.root = *b;
                    true
                }
                ("list", Value::Bool(b)) => {
                    descriptor.list = *b;
                    true
                }
                ("display_name", Value::String(s)) => {
                    descriptor.display_name = Some(s.clone());
                    true
                }
                ("name", Value::String(s)) => {
                    descriptor.name = Some(s.clone());
                    true
                }
                ("proxy", raw) => match serde_json::from_value::<Proxy>(raw.clone()) {
                    Ok(proxy) if !proxy.id.is_empty() && !proxy.field.is_empty() => {
                        descriptor.proxy = Some(proxy);
                        true
                    }
                    Ok(_) => {
                        log::warn!("Template field '{}' has a proxy with an empty part", key);
                        false
                    }
                    Err(e) => {
                        log::warn!("Template field '{}' has an unreadable proxy: {}", key, e);
                        false
                    }
                },
                (known, other) if KNOWN_KEYS.contains(&known) => {
                    log::warn!(
                        "Template field '{}' has an ill-typed '{}': {}, ignoring it",
                        key,
                        known,
                        other
                    );
                    false
                }
                _ => false,
            };
            if !accepted {
                descriptor.extra.insert(name.clone(), raw.clone());
            }
        }

        if descriptor.type_name.is_none() {
            log::warn!("Template field '{}' has no type", key);
        }
        descriptor
    }

    pub fn to_json(&self) -> Value {
        let mut obj = Map::new();
        if let Some(type_name) = &self.type_name {
            obj.insert("type".into(), Value::String(type_name.clone()));
        }
        obj.insert("show".into(), Value::Bool(self.show));
        obj.insert("required".into(), Value::Bool(self.required));
        obj.insert("list".into(), Value::Bool(self.list));
        if self.advanced {
            obj.insert("advanced".into(), Value::Bool(true));
        }
        if self.root {
            obj.insert("root".into(), Value::Bool(true));
        }
        if let Some(display_name) = &self.display_name {
            obj.insert("display_name".into(), Value::String(display_name.clone()));
        }
        if let Some(name) = &self.name {
            obj.insert("name".into(), Value::String(name.clone()));
        }
        if let Some(proxy) = &self.proxy {
            obj.insert(
                "proxy".into(),
                serde_json::json!({ "id": proxy.id, "field": proxy.field }),
            );
        }
        for (k, v) in &self.extra {
            obj.insert(k.clone(), v.clone());
        }
        Value::Object(obj)
    }
}

/// A single entry of a node's template.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateField {
    pub key: String,
    pub kind: FieldKind,
    pub descriptor: FieldDescriptor,
}

/// A node's field schema, in document order.
///
/// Order matters: it is the visual order of the node's ports.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct Template {
    fields: Vec<TemplateField>,
}

impl Template {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, see [`Template::insert`].
    pub fn with_field(mut self, key: impl Into<String>, descriptor: FieldDescriptor) -> Self {
        self.insert(key, descriptor);
        self
    }

    /// Inserts or replaces a field. A replaced field keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, descriptor: FieldDescriptor) {
        let key = key.into();
        let kind = FieldKind::classify(&key, &descriptor);
        match self.fields.iter_mut().find(|f| f.key == key) {
            Some(existing) => {
                existing.kind = kind;
                existing.descriptor = descriptor;
            }
            None => self.fields.push(TemplateField {
                key,
                kind,
                descriptor,
            }),
        }
    }

    pub fn get(&self, key: &str) -> Option<&FieldDescriptor> {
        self.fields
            .iter()
            .find(|f| f.key == key)
            .map(|f| &f.descriptor)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TemplateField> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl From<Map<String, Value>> for Template {
    fn from(map: Map<String, Value>) -> Self {
        let mut template = Template::new();
        for (key, value) in &map {
            let descriptor = FieldDescriptor::from_json(key, value);
            template.insert(key.clone(), descriptor);
        }
        template
    }
}

impl From<Template> for Map<String, Value> {
    fn from(template: Template) -> Self {
        template
            .fields
            .into_iter()
            .map(|f| (f.key, f.descriptor.to_json()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn classification_prefers_private_then_root() {
        let template = Template::new()
            .with_field("_hidden", FieldDescriptor::new("str").shown().root())
            .with_field("input", FieldDescriptor::new("str").shown().root().advanced())
            .with_field("opts", FieldDescriptor::new("dict").shown().advanced())
            .with_field("text", FieldDescriptor::new("str").shown())
            .with_field("off", FieldDescriptor::new("str"));

        let kinds: Vec<_> = template.iter().map(|f| f.kind).collect();
        assert_eq!(
            kinds,
            vec![
                FieldKind::Private,
                FieldKind::Root,
                FieldKind::Advanced,
                FieldKind::Input,
                FieldKind::Hidden
            ]
        );
    }

    #[test]
    fn malformed_descriptors_degrade_to_defaults() {
        let template: Template = serde_json::from_value(json!({
            "a": 42,
            "b": { "show": "yes", "type": 7 },
            "c": { "show": true, "proxy": { "id": "inner" } }
        }))
        .unwrap();

        assert_eq!(template.get("a"), Some(&FieldDescriptor::default()));
        let b = template.get("b").unwrap();
        assert!(!b.show);
        assert_eq!(b.type_name, None);
        let c = template.get("c").unwrap();
        assert!(c.show);
        assert_eq!(c.proxy, None);
    }

    #[test]
    fn ill_typed_values_are_written_back() {
        let raw = json!({
            "b": { "show": "yes", "type": 7, "proxy": { "id": "inner" } }
        });
        let template: Template = serde_json::from_value(raw).unwrap();
        let saved = serde_json::to_value(&template).unwrap();

        assert_eq!(saved["b"]["show"], json!("yes"));
        assert_eq!(saved["b"]["type"], json!(7));
        assert_eq!(saved["b"]["proxy"], json!({ "id": "inner" }));

        let reloaded: Template = serde_json::from_value(saved).unwrap();
        assert_eq!(reloaded, template);
    }

    #[test]
    fn proxies_with_empty_parts_are_not_read() {
        let template: Template = serde_json::from_value(json!({
            "x": { "type": "str", "show": true, "proxy": { "id": "inner1", "field": "" } }
        }))
        .unwrap();
        let x = template.get("x").unwrap();
        assert_eq!(x.proxy, None);
        assert_eq!(x.extra.get("proxy"), Some(&json!({ "id": "inner1", "field": "" })));
    }

    #[test]
    fn nameless_fields_are_private() {
        let template = Template::new().with_field("", FieldDescriptor::new("str").shown());
        assert_eq!(template.iter().next().unwrap().kind, FieldKind::Private);
    }

    #[test]
    fn unknown_keys_survive_serialization() {
        let raw = json!({
            "prompt": { "type": "str", "show": true, "required": false, "list": false, "value": "hi", "multiline": true }
        });
        let template: Template = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(serde_json::to_value(&template).unwrap(), raw);
    }

    #[test]
    fn insert_replaces_in_place() {
        let mut template = Template::new()
            .with_field("a", FieldDescriptor::new("str"))
            .with_field("b", FieldDescriptor::new("int"));
        template.insert("a", FieldDescriptor::new("bool").shown());

        let keys: Vec<_> = template.iter().map(|f| f.key.as_str()).collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(template.iter().next().unwrap().kind, FieldKind::Input);
    }
}
