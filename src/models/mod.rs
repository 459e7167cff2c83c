//! Models module for the SDK
//!
//! Typed NOML schema model. Built once from the parsed YAML tree by
//! [`crate::import::NomlDocument::to_schema`] and read-only afterwards.

pub mod collection;
pub mod enums;
pub mod field;
pub mod keys;
pub mod scalar;
pub mod schema;

pub use collection::{
    CollectionDef, IndexDef, IndexField, ResolvedIndexField, SecurityDef, SecurityRule, SortOrder,
};
pub use enums::{EnumDef, EnumValue, EnumValueDef};
pub use field::{
    ArrayItems, DefaultSentinel, DenormalizationDef, DenormalizationTarget, DenormalizedFrom,
    DenormalizedSource, FieldDef, FieldKind, FieldValidation, FirestoreType,
};
pub use keys::{CompositeUniqueKeyDef, ForeignKeyDef, KeysDef, OnDelete, UniqueKeyDef};
pub use scalar::Scalar;
pub use schema::{NomlMetadata, NomlSchema, SUPPORTED_DATABASE};
