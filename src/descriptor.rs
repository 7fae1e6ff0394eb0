//! Type descriptors: how record types expose their fields to the compiler.
//!
//! A record lists its fields through [`Record::fields`]. Each field's type
//! reports a [`FieldKind`] through [`FieldType`]. Wrappers and collections
//! report the kind of what they hold, so `Option<Box<T>>` and `Vec<T>` map the
//! same as `T`.
//!
//! ```
//! use opensearch_mapping::{record_type, Field, Record};
//!
//! struct Location {
//!     full_address: String,
//!     confirmed: bool,
//! }
//!
//! impl Record for Location {
//!     fn fields() -> Vec<Field> {
//!         vec![
//!             Field::new::<String>("FullAddress"),
//!             Field::new::<bool>("Confirmed"),
//!         ]
//!     }
//! }
//!
//! record_type!(Location);
//! ```

use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, LinkedList, VecDeque};
use std::rc::Rc;
use std::sync::Arc;

use crate::time_formats::DateType;

/// Classification of a field's type.
#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    Boolean,
    Integer,
    Float,
    Text,
    /// A date-capable type and the date format it encodes to.
    Date(&'static str),
    /// A nested record; the field list is produced on demand.
    Record(fn() -> Vec<Field>),
    /// A native timestamp type with no canonical wire format.
    Timestamp(&'static str),
    /// Anything else, with a short description for error messages.
    Unsupported(&'static str),
}

impl FieldKind {
    /// Kind of a record type.
    pub fn record<R: Record>() -> Self {
        FieldKind::Record(R::fields)
    }

    /// Kind of a date-capable type.
    pub fn date<D: DateType>() -> Self {
        FieldKind::Date(D::FORMAT)
    }

    /// Default OpenSearch type for primitive kinds.
    pub fn primitive_type(&self) -> Option<&'static str> {
        match self {
            FieldKind::Boolean => Some("boolean"),
            FieldKind::Integer => Some("integer"),
            FieldKind::Float => Some("float"),
            FieldKind::Text => Some("text"),
            _ => None,
        }
    }

    pub(crate) fn describe(&self) -> &'static str {
        match self {
            FieldKind::Boolean => "boolean",
            FieldKind::Integer => "integer",
            FieldKind::Float => "float",
            FieldKind::Text => "text",
            FieldKind::Date(_) => "date",
            FieldKind::Record(_) => "record",
            FieldKind::Timestamp(name) | FieldKind::Unsupported(name) => *name,
        }
    }
}

/// A type that can appear as a record field.
pub trait FieldType {
    fn field_kind() -> FieldKind;
}

/// A record type whose fields make up an index mapping.
pub trait Record {
    /// Declared fields, in declaration order.
    fn fields() -> Vec<Field>;
}

/// One declared field of a record.
#[derive(Debug, Clone, Copy)]
pub struct Field {
    name: &'static str,
    kind: fn() -> FieldKind,
    annotation: &'static str,
}

impl Field {
    /// Declare a field of type `T` with no annotation.
    pub fn new<T: FieldType + ?Sized>(name: &'static str) -> Self {
        Self {
            name,
            kind: <T as FieldType>::field_kind,
            annotation: "",
        }
    }

    /// Attach an annotation string, e.g. `"type:keyword,analyzer:standard"`.
    pub fn annotated(mut self, annotation: &'static str) -> Self {
        self.annotation = annotation;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn annotation(&self) -> &'static str {
        self.annotation
    }

    pub fn kind(&self) -> FieldKind {
        (self.kind)()
    }
}

/// Implement [`FieldType`] for one or more [`Record`] types so they can be
/// nested inside other records.
#[macro_export]
macro_rules! record_type {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::FieldType for $ty {
                fn field_kind() -> $crate::FieldKind {
                    $crate::FieldKind::record::<$ty>()
                }
            }
        )+
    };
}

macro_rules! impl_kind {
    ($kind:expr => $($ty:ty),+) => {
        $(
            impl FieldType for $ty {
                fn field_kind() -> FieldKind {
                    $kind
                }
            }
        )+
    };
}

impl_kind!(FieldKind::Boolean => bool);
impl_kind!(FieldKind::Integer => i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
impl_kind!(FieldKind::Float => f32, f64);
impl_kind!(FieldKind::Text => String, str, char);
impl_kind!(FieldKind::Unsupported("unit") => ());
impl_kind!(FieldKind::Unsupported("serde_json::Value") => serde_json::Value);
impl_kind!(FieldKind::Timestamp("chrono::NaiveDateTime") => chrono::NaiveDateTime);
impl_kind!(FieldKind::Timestamp("chrono::NaiveDate") => chrono::NaiveDate);
impl_kind!(FieldKind::Timestamp("std::time::SystemTime") => std::time::SystemTime);

impl<Tz: chrono::TimeZone> FieldType for chrono::DateTime<Tz> {
    fn field_kind() -> FieldKind {
        FieldKind::Timestamp("chrono::DateTime")
    }
}

// Indirection: report the pointee's kind.

impl<T: FieldType> FieldType for Option<T> {
    fn field_kind() -> FieldKind {
        T::field_kind()
    }
}

impl<T: FieldType + ?Sized> FieldType for Box<T> {
    fn field_kind() -> FieldKind {
        T::field_kind()
    }
}

impl<T: FieldType + ?Sized> FieldType for Rc<T> {
    fn field_kind() -> FieldKind {
        T::field_kind()
    }
}

impl<T: FieldType + ?Sized> FieldType for Arc<T> {
    fn field_kind() -> FieldKind {
        T::field_kind()
    }
}

impl<T: FieldType + ?Sized> FieldType for &T {
    fn field_kind() -> FieldKind {
        T::field_kind()
    }
}

impl<T: FieldType + ToOwned + ?Sized> FieldType for Cow<'_, T> {
    fn field_kind() -> FieldKind {
        T::field_kind()
    }
}

// Collections: cardinality isn't part of the mapping, report the element kind.

impl<T: FieldType> FieldType for [T] {
    fn field_kind() -> FieldKind {
        T::field_kind()
    }
}

impl<T: FieldType, const N: usize> FieldType for [T; N] {
    fn field_kind() -> FieldKind {
        T::field_kind()
    }
}

impl<T: FieldType> FieldType for Vec<T> {
    fn field_kind() -> FieldKind {
        T::field_kind()
    }
}

impl<T: FieldType> FieldType for VecDeque<T> {
    fn field_kind() -> FieldKind {
        T::field_kind()
    }
}

impl<T: FieldType> FieldType for LinkedList<T> {
    fn field_kind() -> FieldKind {
        T::field_kind()
    }
}

impl<T: FieldType, S> FieldType for HashSet<T, S> {
    fn field_kind() -> FieldKind {
        T::field_kind()
    }
}

impl<T: FieldType> FieldType for BTreeSet<T> {
    fn field_kind() -> FieldKind {
        T::field_kind()
    }
}

impl<K, V, S> FieldType for HashMap<K, V, S> {
    fn field_kind() -> FieldKind {
        FieldKind::Unsupported("map")
    }
}

impl<K, V> FieldType for BTreeMap<K, V> {
    fn field_kind() -> FieldKind {
        FieldKind::Unsupported("map")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time_formats::BasicDate;

    struct Node {
        _next: Option<Box<Node>>,
    }

    impl Record for Node {
        fn fields() -> Vec<Field> {
            vec![Field::new::<Option<Box<Node>>>("Next")]
        }
    }

    record_type!(Node);

    #[test]
    fn primitives_map_to_default_types() {
        assert_eq!(u8::field_kind().primitive_type(), Some("integer"));
        assert_eq!(i128::field_kind().primitive_type(), Some("integer"));
        assert_eq!(f32::field_kind().primitive_type(), Some("float"));
        assert_eq!(bool::field_kind().primitive_type(), Some("boolean"));
        assert_eq!(String::field_kind().primitive_type(), Some("text"));
        assert_eq!(<&str>::field_kind().primitive_type(), Some("text"));
    }

    #[test]
    fn wrappers_and_collections_resolve_to_element() {
        assert!(matches!(Option::<Box<u32>>::field_kind(), FieldKind::Integer));
        assert!(matches!(Vec::<Arc<String>>::field_kind(), FieldKind::Text));
        assert!(matches!(<[f64; 3]>::field_kind(), FieldKind::Float));
        assert!(matches!(Option::<Vec<Node>>::field_kind(), FieldKind::Record(_)));
        assert!(matches!(Cow::<str>::field_kind(), FieldKind::Text));
    }

    #[test]
    fn dates_and_timestamps() {
        assert!(matches!(BasicDate::field_kind(), FieldKind::Date("basic_date")));
        assert!(matches!(
            chrono::DateTime::<chrono::Utc>::field_kind(),
            FieldKind::Timestamp("chrono::DateTime")
        ));
        assert!(matches!(
            Option::<std::time::SystemTime>::field_kind(),
            FieldKind::Timestamp(_)
        ));
    }

    #[test]
    fn maps_are_unsupported() {
        assert!(matches!(
            HashMap::<String, u32>::field_kind(),
            FieldKind::Unsupported("map")
        ));
        assert!(matches!(
            serde_json::Value::field_kind(),
            FieldKind::Unsupported(_)
        ));
    }

    #[test]
    fn self_referential_record_is_lazy() {
        let FieldKind::Record(fields) = Node::field_kind() else {
            panic!("expected record kind");
        };
        let fields = fields();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].name(), "Next");
        assert!(matches!(fields[0].kind(), FieldKind::Record(_)));
    }

    #[test]
    fn annotated_field() {
        let field = Field::new::<String>("Email").annotated("type:keyword");
        assert_eq!(field.annotation(), "type:keyword");
        assert_eq!(Field::new::<String>("Name").annotation(), "");
    }
}
