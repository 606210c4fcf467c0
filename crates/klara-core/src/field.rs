use serde::{Deserialize, Serialize};

/// Default of a dataclass field.
///
/// A field has a literal default, a default factory, or neither. Never both.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FieldDefault {
    #[default]
    None,
    /// Literal default expression, as written (`0`, `"x"`, `field(default=3)` → `3`).
    Value(String),
    /// Factory reference, as written (`list`, `lambda: {}`).
    Factory(String),
}

impl FieldDefault {
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::Value(v) => Some(v),
            _ => None,
        }
    }

    #[must_use]
    pub fn factory(&self) -> Option<&str> {
        match self {
            Self::Factory(f) => Some(f),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

/// One declared field of a dataclass.
///
/// Serialized with separate nullable `default` / `default_factory` keys;
/// deserializing a value with both set is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "FieldDescriptorWire", try_from = "FieldDescriptorWire")]
pub struct FieldDescriptor {
    pub name: String,
    /// Annotation text exactly as written; never evaluated.
    pub type_annotation: String,
    pub default: FieldDefault,
    /// Parameter of the generated `__init__`.
    pub init: bool,
    /// Included in the generated `__repr__`.
    pub repr: bool,
    /// Included in generated equality and ordering.
    pub compare: bool,
    /// Included in the generated `__hash__`. `None` follows `compare`.
    pub hash: Option<bool>,
}

impl FieldDescriptor {
    /// A field with the standard inclusion flags.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        type_annotation: impl Into<String>,
        default: FieldDefault,
    ) -> Self {
        Self {
            name: name.into(),
            type_annotation: type_annotation.into(),
            default,
            init: true,
            repr: true,
            compare: true,
            hash: None,
        }
    }

    /// Whether the field takes part in the generated `__hash__`.
    #[must_use]
    pub fn participates_in_hash(&self) -> bool {
        self.hash.unwrap_or(self.compare)
    }
}

#[derive(Serialize, Deserialize)]
struct FieldDescriptorWire {
    name: String,
    #[serde(rename = "type")]
    type_annotation: String,
    default: Option<String>,
    default_factory: Option<String>,
    init: bool,
    repr: bool,
    compare: bool,
    hash: Option<bool>,
}

impl From<FieldDescriptor> for FieldDescriptorWire {
    fn from(field: FieldDescriptor) -> Self {
        let (default, default_factory) = match field.default {
            FieldDefault::None => (None, None),
            FieldDefault::Value(v) => (Some(v), None),
            FieldDefault::Factory(f) => (None, Some(f)),
        };
        Self {
            name: field.name,
            type_annotation: field.type_annotation,
            default,
            default_factory,
            init: field.init,
            repr: field.repr,
            compare: field.compare,
            hash: field.hash,
        }
    }
}

impl TryFrom<FieldDescriptorWire> for FieldDescriptor {
    type Error = String;

    fn try_from(wire: FieldDescriptorWire) -> Result<Self, Self::Error> {
        let default = match (wire.default, wire.default_factory) {
            (None, None) => FieldDefault::None,
            (Some(v), None) => FieldDefault::Value(v),
            (None, Some(f)) => FieldDefault::Factory(f),
            (Some(_), Some(_)) => {
                return Err(format!(
                    "field '{}' cannot specify both default and default_factory",
                    wire.name
                ));
            }
        };
        Ok(Self {
            name: wire.name,
            type_annotation: wire.type_annotation,
            default,
            init: wire.init,
            repr: wire.repr,
            compare: wire.compare,
            hash: wire.hash,
        })
    }
}

/// Keyword arguments of a `@dataclass(...)` decorator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct DataclassOptions {
    pub init: bool,
    pub repr: bool,
    pub eq: bool,
    pub order: bool,
    pub unsafe_hash: bool,
    pub frozen: bool,
}

impl Default for DataclassOptions {
    fn default() -> Self {
        Self {
            init: true,
            repr: true,
            eq: true,
            order: false,
            unsafe_hash: false,
            frozen: false,
        }
    }
}
