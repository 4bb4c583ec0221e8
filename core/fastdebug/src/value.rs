//! Runtime classification of inspected values.
//!
//! Every argument handed to [`fd!`](crate::fd) is turned into a [`Value`]
//! through the [`Inspect`] trait. A `Value` is a closed set of rendering
//! categories; anything the renderer does not know how to print is carried as
//! [`Value::Unsupported`] and rejected when the report is built.

use std::{
    borrow::Cow,
    collections::{BTreeMap, BTreeSet, HashMap, HashSet, LinkedList, VecDeque},
    fmt,
    rc::Rc,
    sync::Arc,
};

/// Rendering category of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// `true` or `false`.
    Boolean,
    /// Integers and floats.
    Numeric,
    /// Strings and characters.
    Text,
    /// Sequences, arrays, tuples and sets.
    Ordered,
    /// Maps.
    Keyed,
    /// Anything else.
    Unsupported,
}

/// Delimiters used when an ordered collection is printed inline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Brackets {
    /// `[a, b]`
    Square,
    /// `(a, b)`
    Round,
    /// `{a, b}`
    Curly,
}

impl Brackets {
    const fn pair(self) -> (&'static str, &'static str) {
        match self {
            Self::Square => ("[", "]"),
            Self::Round => ("(", ")"),
            Self::Curly => ("{", "}"),
        }
    }
}

/// A classified runtime value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A boolean.
    Bool(bool),

    /// A number, already formatted.
    Number {
        /// Type label, e.g. `i32`.
        label: &'static str,
        /// Formatted number.
        text: String,
    },

    /// A piece of text.
    Text {
        /// Type label, e.g. `String`.
        label: &'static str,
        /// The text itself.
        raw: String,
        /// The text wrapped in Rust's debug quoting.
        quoted: String,
    },

    /// An ordered collection.
    Sequence {
        /// Type label, e.g. `Vec`.
        label: &'static str,
        /// Inline delimiters.
        brackets: Brackets,
        /// Elements in iteration order.
        items: Vec<Value>,
    },

    /// A keyed collection.
    Mapping {
        /// Type label, e.g. `HashMap`.
        label: &'static str,
        /// Entries in iteration order.
        entries: Vec<(Value, Value)>,
    },

    /// A value with no rendering category.
    Unsupported {
        /// Name of the type.
        type_name: &'static str,
    },
}

impl Value {
    /// Creates a numeric value from anything displayable.
    pub fn number(label: &'static str, number: impl fmt::Display) -> Self {
        Self::Number {
            label,
            text: number.to_string(),
        }
    }

    /// Creates a text value; the quoted form uses `Debug` quoting.
    pub fn text(label: &'static str, text: impl Into<String>) -> Self {
        let raw = text.into();
        let quoted = format!("{raw:?}");
        Self::Text { label, raw, quoted }
    }

    /// Creates an ordered collection from already classified elements.
    pub fn sequence(
        label: &'static str,
        brackets: Brackets,
        items: impl IntoIterator<Item = Value>,
    ) -> Self {
        Self::Sequence {
            label,
            brackets,
            items: items.into_iter().collect(),
        }
    }

    /// Creates a keyed collection from already classified entries.
    pub fn mapping(label: &'static str, entries: impl IntoIterator<Item = (Value, Value)>) -> Self {
        Self::Mapping {
            label,
            entries: entries.into_iter().collect(),
        }
    }

    /// Creates a value the renderer will refuse.
    pub const fn unsupported(type_name: &'static str) -> Self {
        Self::Unsupported { type_name }
    }

    /// The rendering category of this value.
    #[must_use]
    pub const fn category(&self) -> Category {
        match self {
            Self::Bool(_) => Category::Boolean,
            Self::Number { .. } => Category::Numeric,
            Self::Text { .. } => Category::Text,
            Self::Sequence { .. } => Category::Ordered,
            Self::Mapping { .. } => Category::Keyed,
            Self::Unsupported { .. } => Category::Unsupported,
        }
    }

    /// The short type name printed in the type column.
    #[must_use]
    pub const fn type_label(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Number { label, .. }
            | Self::Text { label, .. }
            | Self::Sequence { label, .. }
            | Self::Mapping { label, .. } => *label,
            Self::Unsupported { type_name } => *type_name,
        }
    }

    /// Number of elements or entries, for collections.
    #[must_use]
    pub fn len(&self) -> Option<usize> {
        match self {
            Self::Sequence { items, .. } => Some(items.len()),
            Self::Mapping { entries, .. } => Some(entries.len()),
            _ => None,
        }
    }

    /// Returns `true` for a collection without elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == Some(0)
    }

    /// The type name of the first unsupported value found in `self`, looking
    /// through nested elements, keys and values.
    #[must_use]
    pub fn find_unsupported(&self) -> Option<&'static str> {
        match self {
            Self::Unsupported { type_name } => Some(*type_name),
            Self::Sequence { items, .. } => items.iter().find_map(Self::find_unsupported),
            Self::Mapping { entries, .. } => entries.iter().find_map(|(key, value)| {
                key.find_unsupported()
                    .or_else(|| value.find_unsupported())
            }),
            Self::Bool(_) | Self::Number { .. } | Self::Text { .. } => None,
        }
    }

    /// Renders the value the way a mapping key is printed: text is unquoted,
    /// everything else uses its inline form.
    #[must_use]
    pub fn plain(&self) -> Cow<'_, str> {
        match self {
            Self::Text { raw, .. } => Cow::Borrowed(raw),
            other => Cow::Owned(other.to_string()),
        }
    }
}

/// The inline form: quoted text, and collections on a single line.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(value) => write!(f, "{value}"),
            Self::Number { text, .. } => f.write_str(text),
            Self::Text { quoted, .. } => f.write_str(quoted),
            Self::Sequence {
                label,
                brackets,
                items,
            } => {
                let (open, close) = brackets.pair();
                f.write_str(open)?;
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                if *label == "tuple" && items.len() == 1 {
                    f.write_str(",")?;
                }
                f.write_str(close)
            }
            Self::Mapping { entries, .. } => {
                f.write_str("{")?;
                for (index, (key, value)) in entries.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                f.write_str("}")
            }
            Self::Unsupported { type_name } => write!(f, "<{type_name}>"),
        }
    }
}

/// Types that can be classified for printing.
///
/// Implemented for the standard scalar, text, sequence and map types. Implement
/// it for your own types to make them printable with [`fd!`](crate::fd):
///
/// ```
/// use fastdebug::{Inspect, Value};
///
/// struct Meters(f64);
///
/// impl Inspect for Meters {
///     fn inspect(&self) -> Value {
///         Value::number("Meters", self.0)
///     }
/// }
///
/// assert_eq!(Meters(2.5).inspect().to_string(), "2.5");
/// ```
pub trait Inspect {
    /// Classifies `self`.
    fn inspect(&self) -> Value;
}

impl Inspect for bool {
    fn inspect(&self) -> Value {
        Value::Bool(*self)
    }
}

macro_rules! impl_integer {
    ($($ty:ident),* $(,)?) => {
        $(
            impl Inspect for $ty {
                fn inspect(&self) -> Value {
                    Value::number(stringify!($ty), self)
                }
            }
        )*
    };
}

impl_integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

macro_rules! impl_float {
    ($($ty:ident),* $(,)?) => {
        $(
            impl Inspect for $ty {
                fn inspect(&self) -> Value {
                    Value::Number {
                        label: stringify!($ty),
                        text: format!("{self:?}"),
                    }
                }
            }
        )*
    };
}

impl_float!(f32, f64);

impl Inspect for str {
    fn inspect(&self) -> Value {
        Value::text("str", self)
    }
}

impl Inspect for String {
    fn inspect(&self) -> Value {
        Value::text("String", self.as_str())
    }
}

impl Inspect for Cow<'_, str> {
    fn inspect(&self) -> Value {
        Value::text("Cow", &**self)
    }
}

impl Inspect for char {
    fn inspect(&self) -> Value {
        Value::Text {
            label: "char",
            raw: self.to_string(),
            quoted: format!("{self:?}"),
        }
    }
}

impl Inspect for () {
    fn inspect(&self) -> Value {
        Value::unsupported("()")
    }
}

/// `Some` delegates to the inner value; `None` is unsupported.
///
/// `Option` has an inherent `inspect` method, which method-call syntax picks
/// over this trait: write `Inspect::inspect(&option)` instead of
/// `option.inspect()`.
impl<T: Inspect> Inspect for Option<T> {
    fn inspect(&self) -> Value {
        match self {
            Some(value) => value.inspect(),
            None => Value::unsupported("None"),
        }
    }
}

impl<T: ?Sized> Inspect for *const T {
    fn inspect(&self) -> Value {
        Value::unsupported("*const T")
    }
}

impl<T: ?Sized> Inspect for *mut T {
    fn inspect(&self) -> Value {
        Value::unsupported("*mut T")
    }
}

macro_rules! impl_deref {
    ($($ptr:ty),* $(,)?) => {
        $(
            impl<T: Inspect + ?Sized> Inspect for $ptr {
                fn inspect(&self) -> Value {
                    (**self).inspect()
                }
            }
        )*
    };
}

impl_deref!(&T, &mut T, Box<T>, Rc<T>, Arc<T>);

macro_rules! impl_sequence {
    ($($label:literal => $brackets:ident for $ty:ty;)*) => {
        $(
            impl<T: Inspect> Inspect for $ty {
                fn inspect(&self) -> Value {
                    Value::sequence($label, Brackets::$brackets, self.iter().map(Inspect::inspect))
                }
            }
        )*
    };
}

impl_sequence! {
    "Vec" => Square for Vec<T>;
    "slice" => Square for [T];
    "VecDeque" => Square for VecDeque<T>;
    "LinkedList" => Square for LinkedList<T>;
    "HashSet" => Curly for HashSet<T>;
    "BTreeSet" => Curly for BTreeSet<T>;
}

impl<T: Inspect, const N: usize> Inspect for [T; N] {
    fn inspect(&self) -> Value {
        Value::sequence("array", Brackets::Square, self.iter().map(Inspect::inspect))
    }
}

macro_rules! impl_tuple {
    ($(($($name:ident),+))*) => {
        $(
            impl<$($name: Inspect),+> Inspect for ($($name,)+) {
                #[allow(non_snake_case)]
                fn inspect(&self) -> Value {
                    let ($($name,)+) = self;
                    Value::sequence("tuple", Brackets::Round, [$($name.inspect()),+])
                }
            }
        )*
    };
}

impl_tuple! {
    (A)
    (A, B)
    (A, B, C)
    (A, B, C, D)
    (A, B, C, D, E)
    (A, B, C, D, E, F)
    (A, B, C, D, E, F, G)
    (A, B, C, D, E, F, G, H)
}

impl<K: Inspect, V: Inspect, S> Inspect for HashMap<K, V, S> {
    fn inspect(&self) -> Value {
        Value::mapping(
            "HashMap",
            self.iter().map(|(key, value)| (key.inspect(), value.inspect())),
        )
    }
}

impl<K: Inspect, V: Inspect> Inspect for BTreeMap<K, V> {
    fn inspect(&self) -> Value {
        Value::mapping(
            "BTreeMap",
            self.iter().map(|(key, value)| (key.inspect(), value.inspect())),
        )
    }
}

#[cfg(feature = "indexmap")]
impl<K: Inspect, V: Inspect, S> Inspect for indexmap::IndexMap<K, V, S> {
    fn inspect(&self) -> Value {
        Value::mapping(
            "IndexMap",
            self.iter().map(|(key, value)| (key.inspect(), value.inspect())),
        )
    }
}

#[cfg(feature = "indexmap")]
impl<T: Inspect, S> Inspect for indexmap::IndexSet<T, S> {
    fn inspect(&self) -> Value {
        Value::sequence("IndexSet", Brackets::Curly, self.iter().map(Inspect::inspect))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(&true, Category::Boolean, "bool", "true" ; "bool")]
    #[test_case(&42_i32, Category::Numeric, "i32", "42" ; "integer")]
    #[test_case(&1.0_f64, Category::Numeric, "f64", "1.0" ; "float keeps fraction")]
    #[test_case(&"hi", Category::Text, "str", "\"hi\"" ; "str is quoted")]
    #[test_case(&'x', Category::Text, "char", "'x'" ; "char is quoted")]
    #[test_case(&(), Category::Unsupported, "()", "<()>" ; "unit")]
    fn scalars(value: &dyn Inspect, category: Category, label: &str, inline: &str) {
        let value = value.inspect();
        assert_eq!(value.category(), category);
        assert_eq!(value.type_label(), label);
        assert_eq!(value.to_string(), inline);
    }

    #[test]
    fn strings_keep_escapes() {
        let value = String::from("line\n\"quoted\"").inspect();
        assert_eq!(value.type_label(), "String");
        assert_eq!(value.to_string(), r#""line\n\"quoted\"""#);
        assert_eq!(value.plain(), "line\n\"quoted\"");
    }

    #[test]
    fn options_delegate_or_refuse() {
        assert_eq!(Inspect::inspect(&Some(3_u8)), 3_u8.inspect());
        assert_eq!(
            Inspect::inspect(&None::<u8>),
            Value::Unsupported { type_name: "None" }
        );
    }

    #[test]
    fn unsupported_values_are_found_at_any_depth() {
        assert_eq!(1_u8.inspect().find_unsupported(), None);
        assert_eq!(vec![vec![1_u8]].inspect().find_unsupported(), None);
        assert_eq!(().inspect().find_unsupported(), Some("()"));
        assert_eq!(vec![vec![None::<i32>]].inspect().find_unsupported(), Some("None"));

        let nested_key = Value::mapping(
            "HashMap",
            [(
                Value::sequence("tuple", Brackets::Round, [().inspect()]),
                1_i32.inspect(),
            )],
        );
        assert_eq!(nested_key.find_unsupported(), Some("()"));
    }

    #[test]
    fn smart_pointers_delegate() {
        assert_eq!(Box::new(5_i64).inspect(), 5_i64.inspect());
        assert_eq!(Rc::new("a").inspect(), "a".inspect());
        assert_eq!(Arc::new(vec![1_u8]).inspect(), vec![1_u8].inspect());
    }

    #[test]
    fn sequences() {
        let value = vec![1_i32, 2, 3].inspect();
        assert_eq!(value.category(), Category::Ordered);
        assert_eq!(value.type_label(), "Vec");
        assert_eq!(value.len(), Some(3));
        assert_eq!(value.to_string(), "[1, 2, 3]");

        assert_eq!([1.5_f32, 2.0].inspect().to_string(), "[1.5, 2.0]");
        assert_eq!([0_u8; 2].inspect().type_label(), "array");
        assert_eq!(vec![0_u8; 4][1..].inspect().type_label(), "slice");
        assert!(Vec::<i32>::new().inspect().is_empty());

        let set: BTreeSet<_> = [3_i32, 1, 2].into_iter().collect();
        assert_eq!(set.inspect().to_string(), "{1, 2, 3}");
    }

    #[test]
    fn tuples() {
        let value = (1_i32, "a", true).inspect();
        assert_eq!(value.type_label(), "tuple");
        assert_eq!(value.len(), Some(3));
        assert_eq!(value.to_string(), "(1, \"a\", true)");
        assert_eq!((7_i32,).inspect().to_string(), "(7,)");
    }

    #[test]
    fn mappings() {
        let map: BTreeMap<_, _> = [("a", 1_i32), ("b", 2)].into_iter().collect();
        let value = map.inspect();
        assert_eq!(value.category(), Category::Keyed);
        assert_eq!(value.type_label(), "BTreeMap");
        assert_eq!(value.len(), Some(2));
        assert_eq!(value.to_string(), "{\"a\": 1, \"b\": 2}");

        let map: HashMap<_, _> = [(1_u8, vec!['z'])].into_iter().collect();
        assert_eq!(map.inspect().to_string(), "{1: ['z']}");
    }

    #[cfg(feature = "indexmap")]
    #[test]
    fn index_collections_keep_insertion_order() {
        let map: indexmap::IndexMap<_, _> = [("z", 1_i32), ("a", 2)].into_iter().collect();
        assert_eq!(map.inspect().to_string(), "{\"z\": 1, \"a\": 2}");

        let set: indexmap::IndexSet<_> = [9_i32, 3].into_iter().collect();
        let value = set.inspect();
        assert_eq!(value.type_label(), "IndexSet");
        assert_eq!(value.to_string(), "{9, 3}");
    }

    #[test]
    fn nested_collections_stay_inline() {
        let value = vec![vec![1_i32, 2], vec![]].inspect();
        assert_eq!(value.to_string(), "[[1, 2], []]");
        let Value::Sequence { items, .. } = value else {
            panic!("expected a sequence");
        };
        assert_eq!(items[0].category(), Category::Ordered);
    }

    #[test]
    fn plain_keys() {
        assert_eq!("key".inspect().plain(), "key");
        assert_eq!(10_u16.inspect().plain(), "10");
        assert_eq!((1_i32, 2_i32).inspect().plain(), "(1, 2)");
    }
}
