use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::field::FieldDescriptor;

// ---------------------------------------------------------------------------
// MemberKind
// ---------------------------------------------------------------------------

/// How a public class member is bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberKind {
    Instance,
    Class,
    Static,
    Property,
}

impl MemberKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Instance => "instance",
            Self::Class => "class",
            Self::Static => "static",
            Self::Property => "property",
        }
    }
}

impl fmt::Display for MemberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ClassDescriptor
// ---------------------------------------------------------------------------

/// A located class: its public members by binding kind, dataclass
/// metadata, and decorator-inclusive source text.
///
/// `fields` and `auto_derived_methods` are only populated when
/// `is_aggregate_type` is set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDescriptor {
    pub instance_methods: Vec<String>,
    pub class_methods: Vec<String>,
    pub static_methods: Vec<String>,
    pub properties: Vec<String>,
    pub is_aggregate_type: bool,
    pub fields: Vec<FieldDescriptor>,
    pub auto_derived_methods: Vec<String>,
    pub source_code: String,
    pub file_path: PathBuf,
}

impl ClassDescriptor {
    /// Record a public member under its kind.
    pub fn push_member(&mut self, kind: MemberKind, name: impl Into<String>) {
        let list = match kind {
            MemberKind::Instance => &mut self.instance_methods,
            MemberKind::Class => &mut self.class_methods,
            MemberKind::Static => &mut self.static_methods,
            MemberKind::Property => &mut self.properties,
        };
        list.push(name.into());
    }

    /// Sort every member list by name and drop duplicates.
    ///
    /// A property with a setter is declared twice under the same name.
    pub fn normalize_members(&mut self) {
        for list in [
            &mut self.instance_methods,
            &mut self.class_methods,
            &mut self.static_methods,
            &mut self.properties,
        ] {
            list.sort();
            list.dedup();
        }
    }

    /// Members of the given kind.
    #[must_use]
    pub fn members(&self, kind: MemberKind) -> &[String] {
        match kind {
            MemberKind::Instance => &self.instance_methods,
            MemberKind::Class => &self.class_methods,
            MemberKind::Static => &self.static_methods,
            MemberKind::Property => &self.properties,
        }
    }
}
