use crate::error::FlowError;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// A color used to tint ports and icons. Opaque to this crate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColorToken(String);

impl ColorToken {
    pub const UNKNOWN: &'static str = "#9CA3AF";

    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The fallback for types that are not registered.
    pub fn unknown() -> Self {
        Self(Self::UNKNOWN.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ColorToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Category under which group nodes draw their header icon.
pub const CUSTOM_CATEGORY: &str = "custom";

const DEFAULT_PALETTE: [(&str, &str); 19] = [
    ("prompts", "#4367BF"),
    ("llms", "#6344BE"),
    ("chains", "#FE7500"),
    ("agents", "#903BBE"),
    ("tools", "#FF3434"),
    ("memories", "#F5B85A"),
    ("advanced", "#000000"),
    ("chat", "#198BF6"),
    ("thought", "#272541"),
    ("docloaders", "#FF9135"),
    ("toolkits", "#DB2C2C"),
    ("wrappers", "#E6277A"),
    ("embeddings", "#42BAA7"),
    ("documentloaders", "#7AAE42"),
    ("vectorstores", "#AA8742"),
    ("textsplitters", "#B47CB5"),
    ("utilities", "#31A3CC"),
    ("output_parsers", "#E6A627"),
    (CUSTOM_CATEGORY, "#ab11ab"),
];

/// Maps type names to categories and categories to colors.
///
/// Lookups never fail: anything unregistered resolves to [`ColorToken::unknown`].
#[derive(Debug, Clone)]
pub struct TypeRegistry {
    categories: AHashMap<String, String>,
    colors: AHashMap<String, ColorToken>,
}

impl Default for TypeRegistry {
    fn default() -> Self {
        TypeRegistryBuilder::new().build()
    }
}

impl TypeRegistry {
    pub fn builder() -> TypeRegistryBuilder {
        TypeRegistryBuilder::new()
    }

    /// Builds a registry from a type catalog of the form `{category: {TypeName: ...}}`.
    ///
    /// The default palette is kept; catalog entries only add type mappings.
    /// Categories are read in document order, so a type listed under several
    /// categories belongs to the last one.
    pub fn from_catalog_json(json: &str) -> Result<Self, FlowError> {
        let catalog: Map<String, Value> = serde_json::from_str(json)?;
        let mut builder = TypeRegistryBuilder::new();
        for (category, types) in &catalog {
            let Some(types) = types.as_object() else {
                log::warn!("Catalog category '{}' is not an object, skipping", category);
                continue;
            };
            for type_name in types.keys() {
                builder = builder.with_type(type_name, category);
            }
        }
        Ok(builder.build())
    }

    pub fn category_of(&self, type_name: &str) -> Option<&str> {
        self.categories.get(type_name).map(String::as_str)
    }

    pub fn category_color(&self, category: &str) -> ColorToken {
        self.colors
            .get(category)
            .cloned()
            .unwrap_or_else(ColorToken::unknown)
    }

    pub fn color_for(&self, type_name: &str) -> ColorToken {
        match self.category_of(type_name) {
            Some(category) => self.category_color(category),
            None => ColorToken::unknown(),
        }
    }
}

pub struct TypeRegistryBuilder {
    categories: AHashMap<String, String>,
    colors: AHashMap<String, ColorToken>,
}

impl TypeRegistryBuilder {
    pub fn new() -> Self {
        let colors = DEFAULT_PALETTE
            .iter()
            .map(|(category, color)| (category.to_string(), ColorToken::new(*color)))
            .collect();
        Self {
            categories: AHashMap::new(),
            colors,
        }
    }

    pub fn with_type(mut self, type_name: &str, category: &str) -> Self {
        self.categories
            .insert(type_name.to_string(), category.to_string());
        self
    }

    pub fn with_category_color(mut self, category: &str, color: ColorToken) -> Self {
        self.colors.insert(category.to_string(), color);
        self
    }

    pub fn build(self) -> TypeRegistry {
        TypeRegistry {
            categories: self.categories,
            colors: self.colors,
        }
    }
}

impl Default for TypeRegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}
