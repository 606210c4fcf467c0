//! # klara-core
//!
//! Result types shared by the klara crates.
//!
//! - [`FunctionMatch`]: verbatim source of a located function plus its file
//! - [`ClassDescriptor`]: categorized members, dataclass metadata and the
//!   decorator-inclusive source of a located class
//! - [`FieldDescriptor`] / [`FieldDefault`]: one dataclass field
//! - [`DataclassOptions`]: keyword arguments of a `@dataclass(...)` decorator
//!
//! All types are constructed fresh per search and serialize with the key
//! names consumed by the prompt/CLI layer.

pub mod class;
pub mod field;
pub mod function;

pub use class::{ClassDescriptor, MemberKind};
pub use field::{DataclassOptions, FieldDefault, FieldDescriptor};
pub use function::FunctionMatch;
