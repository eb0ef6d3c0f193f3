//! Closed set of shapes a field type can take

use crate::model::TypeRef;
use crate::naming::simple_name;

const NUMERIC_NAMES: [&str; 7] = ["byte", "short", "int", "long", "float", "double", "java.lang.Number"];
const OBJECT_ROOT: &str = "java.lang.Object";
const NUMBER_ROOT: &str = "java.lang.Number";
const CHAR_SEQUENCE_ROOT: &str = "java.lang.CharSequence";
const BOOLEAN_NAMES: [&str; 2] = ["boolean", "java.lang.Boolean"];
const DATE_ROOT: &str = "java.util.Date";
const MAP_ROOT: &str = "java.util.Map";
const COLLECTION_ROOT: &str = "java.util.Collection";
const TEMPORAL_SIMPLE_NAMES: [&str; 5] = [
    "LocalDate",
    "LocalTime",
    "LocalDateTime",
    "Calendar",
    "GregorianCalendar",
];

/// Rendering rule selected for a type, checked in declaration order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeCategory {
    /// Numeric primitive, boxed numeric or `Number` subtype
    Numeric,
    /// `char` or a `CharSequence` subtype
    Text,
    Boolean,
    /// `java.util.Date` and its subclasses
    Datelike,
    /// Declares or inherits `java.util.Map`
    MapLike,
    /// Array, or declares or inherits `java.util.Collection`
    CollectionLike,
    /// `java.time.*`, calendars and local date/time types
    LibraryTemporal,
    /// Reference to a class or enum the resolver may know
    ClassLike,
    /// Generic placeholder, `Object` or anything without a class behind it
    Unresolved,
}

impl ShapeCategory {
    /// Classify `ty` given the union of its known supertypes
    pub fn of(ty: &TypeRef, supertypes: &[&str]) -> Self {
        let erased = ty.erased_name();
        let has = |root: &str| erased == root || supertypes.iter().any(|s| *s == root);

        if ty.type_parameter || erased == OBJECT_ROOT {
            return ShapeCategory::Unresolved;
        }
        if NUMERIC_NAMES.contains(&erased) || has(NUMBER_ROOT) {
            return ShapeCategory::Numeric;
        }
        if erased == "char" || has(CHAR_SEQUENCE_ROOT) {
            return ShapeCategory::Text;
        }
        if BOOLEAN_NAMES.contains(&erased) {
            return ShapeCategory::Boolean;
        }
        if has(DATE_ROOT) {
            return ShapeCategory::Datelike;
        }
        if has(MAP_ROOT) {
            return ShapeCategory::MapLike;
        }
        if ty.is_array() || has(COLLECTION_ROOT) {
            return ShapeCategory::CollectionLike;
        }
        if is_library_temporal(erased) {
            return ShapeCategory::LibraryTemporal;
        }
        if class_reference(ty).is_some() {
            return ShapeCategory::ClassLike;
        }
        ShapeCategory::Unresolved
    }
}

/// Library date/time types that never get a declaration of their own
pub fn is_library_temporal(qualified_name: &str) -> bool {
    qualified_name.starts_with("java.time.")
        || qualified_name == "java.util.Calendar"
        || TEMPORAL_SIMPLE_NAMES.contains(&simple_name(qualified_name))
}

/// Qualified class name a type refers to, if it refers to one
pub fn class_reference(ty: &TypeRef) -> Option<&str> {
    if ty.type_parameter || ty.is_array() {
        return None;
    }
    match &ty.class_name {
        Some(name) => Some(name),
        None => {
            let erased = ty.erased_name();
            erased.contains('.').then_some(erased)
        }
    }
}
