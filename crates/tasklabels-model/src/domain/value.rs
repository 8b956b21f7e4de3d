use std::fmt;

/// Single override value passed alongside a `with_labels` call.
///
/// Mirrors the loosely typed values instrumentation code tends to have at hand.
/// How values pair up into keys and labels is decided by the merge capability.
#[derive(Debug, Clone, PartialEq)]
pub enum LabelValue {
    Str(String),
    Bool(bool),
    Number(f64),
    /// Explicit absence.
    Null,
    /// Value that was never provided.
    Undefined,
}

impl LabelValue {
    /// Returns `true` for [`LabelValue::Null`] and [`LabelValue::Undefined`].
    #[inline]
    pub fn is_absent(&self) -> bool {
        matches!(self, LabelValue::Null | LabelValue::Undefined)
    }

    /// Borrow the inner string for [`LabelValue::Str`].
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            LabelValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Coerce to the string stored in a label set.
    ///
    /// Absence values have no string form and return `None`.
    pub fn as_label(&self) -> Option<String> {
        match self {
            LabelValue::Str(s) => Some(s.clone()),
            LabelValue::Bool(b) => Some(b.to_string()),
            LabelValue::Number(n) => Some(format_number(*n)),
            LabelValue::Null | LabelValue::Undefined => None,
        }
    }

    /// Short name of the value kind, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            LabelValue::Str(_) => "string",
            LabelValue::Bool(_) => "boolean",
            LabelValue::Number(_) => "number",
            LabelValue::Null => "null",
            LabelValue::Undefined => "undefined",
        }
    }
}

/// Numbers render the way a script host prints them: `3` rather than `3.0`, `-0` as `0`.
fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if n == 0.0 {
        "0".to_string()
    } else {
        n.to_string()
    }
}

impl fmt::Display for LabelValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_label() {
            Some(s) => f.write_str(&s),
            None => f.write_str(self.kind()),
        }
    }
}

impl From<&str> for LabelValue {
    fn from(s: &str) -> Self {
        LabelValue::Str(s.to_string())
    }
}

impl From<String> for LabelValue {
    fn from(s: String) -> Self {
        LabelValue::Str(s)
    }
}

impl From<&String> for LabelValue {
    fn from(s: &String) -> Self {
        LabelValue::Str(s.clone())
    }
}

impl From<bool> for LabelValue {
    fn from(b: bool) -> Self {
        LabelValue::Bool(b)
    }
}

macro_rules! number_from {
    ($($t:ty),*) => {
        $(
            impl From<$t> for LabelValue {
                fn from(n: $t) -> Self {
                    LabelValue::Number(n as f64)
                }
            }
        )*
    };
}

number_from!(i8, i16, i32, i64, u8, u16, u32, u64, usize, isize, f32, f64);

impl<T> From<Option<T>> for LabelValue
where
    T: Into<LabelValue>,
{
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(LabelValue::Null)
    }
}

/// Build a `Vec<LabelValue>` from heterogeneous values.
///
/// ```
/// use tasklabels_model::{label_values, LabelValue};
///
/// let kvs = label_values!["user", "alice", "retry", true, "attempt", 3];
/// assert_eq!(kvs.len(), 6);
/// assert_eq!(kvs[3], LabelValue::Bool(true));
/// ```
#[macro_export]
macro_rules! label_values {
    () => { ::std::vec::Vec::<$crate::LabelValue>::new() };
    ($($v:expr),+ $(,)?) => {
        ::std::vec![$($crate::LabelValue::from($v)),+]
    };
}
