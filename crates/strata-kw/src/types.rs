//! Logical record model shared by both layouts.

use std::fmt;

use crate::error::KeywordError;
use crate::{CHAR_BLOCK_SIZE, NAME_WIDTH, NUMERIC_BLOCK_SIZE};

/// Element type of a keyword payload.
///
/// The set is closed: it is fixed by the on-disk format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TypeTag {
    /// 32-bit signed integer (`INTE`).
    Int,
    /// 32-bit float (`REAL`).
    Float,
    /// 64-bit float (`DOUB`).
    Double,
    /// Logical, stored as a 32-bit integer (`LOGI`).
    Bool,
    /// 8-byte space-padded string (`CHAR`).
    Char,
    /// Payload-free marker record (`MESS`).
    Message,
}

impl TypeTag {
    /// The four-character tag written to file headers.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Int => "INTE",
            Self::Float => "REAL",
            Self::Double => "DOUB",
            Self::Bool => "LOGI",
            Self::Char => "CHAR",
            Self::Message => "MESS",
        }
    }

    /// Parse a four-character tag. Trailing spaces are ignored.
    pub fn parse(tag: &str) -> Option<Self> {
        match tag.trim_end() {
            "INTE" => Some(Self::Int),
            "REAL" => Some(Self::Float),
            "DOUB" => Some(Self::Double),
            "LOGI" => Some(Self::Bool),
            "CHAR" => Some(Self::Char),
            "MESS" => Some(Self::Message),
            _ => None,
        }
    }

    /// Size of one element in the binary layout, in bytes.
    pub fn element_size(&self) -> usize {
        match self {
            Self::Int | Self::Float | Self::Bool => 4,
            Self::Double | Self::Char => 8,
            Self::Message => 0,
        }
    }

    /// Number of elements per payload block.
    pub fn block_size(&self) -> usize {
        match self {
            Self::Char => CHAR_BLOCK_SIZE,
            _ => NUMERIC_BLOCK_SIZE,
        }
    }

    /// Number of values per line in the formatted layout.
    pub fn columns(&self) -> usize {
        match self {
            Self::Int => 6,
            Self::Float => 4,
            Self::Double => 3,
            Self::Bool => 25,
            Self::Char => 7,
            Self::Message => 1,
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed keyword payload.
#[derive(Clone, Debug, PartialEq)]
pub enum KeywordData {
    /// `INTE` values.
    Int(Vec<i32>),
    /// `REAL` values.
    Float(Vec<f32>),
    /// `DOUB` values.
    Double(Vec<f64>),
    /// `LOGI` values.
    Bool(Vec<bool>),
    /// `CHAR` values, stored without trailing padding.
    Char(Vec<String>),
    /// `MESS` marker; carries no elements.
    Message,
}

impl KeywordData {
    /// The element type of this payload.
    pub fn type_tag(&self) -> TypeTag {
        match self {
            Self::Int(_) => TypeTag::Int,
            Self::Float(_) => TypeTag::Float,
            Self::Double(_) => TypeTag::Double,
            Self::Bool(_) => TypeTag::Bool,
            Self::Char(_) => TypeTag::Char,
            Self::Message => TypeTag::Message,
        }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        match self {
            Self::Int(v) => v.len(),
            Self::Float(v) => v.len(),
            Self::Double(v) => v.len(),
            Self::Bool(v) => v.len(),
            Self::Char(v) => v.len(),
            Self::Message => 0,
        }
    }

    /// Whether the payload has no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// An empty payload of the given type.
    pub fn empty(tag: TypeTag) -> Self {
        match tag {
            TypeTag::Int => Self::Int(Vec::new()),
            TypeTag::Float => Self::Float(Vec::new()),
            TypeTag::Double => Self::Double(Vec::new()),
            TypeTag::Bool => Self::Bool(Vec::new()),
            TypeTag::Char => Self::Char(Vec::new()),
            TypeTag::Message => Self::Message,
        }
    }
}

/// A named, typed, fixed-length array: the atomic unit of a keyword file.
///
/// Names are at most [`NAME_WIDTH`] characters; longer names are truncated
/// and trailing padding is stripped, matching what a reader would see after
/// a round trip through the fixed-width header.
#[derive(Clone, Debug, PartialEq)]
pub struct KeywordEntry {
    name: String,
    data: KeywordData,
}

impl KeywordEntry {
    /// Create an entry, normalizing the name to the fixed header width.
    pub fn new(name: impl AsRef<str>, data: KeywordData) -> Self {
        Self {
            name: normalize_name(name.as_ref()),
            data,
        }
    }

    /// The keyword name without padding.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The payload.
    pub fn data(&self) -> &KeywordData {
        &self.data
    }

    /// Consume the entry, returning its payload.
    pub fn into_data(self) -> KeywordData {
        self.data
    }

    /// Element type of the payload.
    pub fn type_tag(&self) -> TypeTag {
        self.data.type_tag()
    }

    /// Declared element count.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the payload has no elements.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn mismatch(&self, expected: TypeTag) -> KeywordError {
        KeywordError::TypeMismatch {
            name: self.name.clone(),
            expected,
            found: self.type_tag(),
        }
    }

    /// Borrow an `INTE` payload.
    pub fn as_ints(&self) -> Result<&[i32], KeywordError> {
        match &self.data {
            KeywordData::Int(v) => Ok(v),
            _ => Err(self.mismatch(TypeTag::Int)),
        }
    }

    /// Borrow a `REAL` payload.
    pub fn as_floats(&self) -> Result<&[f32], KeywordError> {
        match &self.data {
            KeywordData::Float(v) => Ok(v),
            _ => Err(self.mismatch(TypeTag::Float)),
        }
    }

    /// Borrow a `DOUB` payload.
    pub fn as_doubles(&self) -> Result<&[f64], KeywordError> {
        match &self.data {
            KeywordData::Double(v) => Ok(v),
            _ => Err(self.mismatch(TypeTag::Double)),
        }
    }

    /// Borrow a `LOGI` payload.
    pub fn as_bools(&self) -> Result<&[bool], KeywordError> {
        match &self.data {
            KeywordData::Bool(v) => Ok(v),
            _ => Err(self.mismatch(TypeTag::Bool)),
        }
    }

    /// Borrow a `CHAR` payload.
    pub fn as_strings(&self) -> Result<&[String], KeywordError> {
        match &self.data {
            KeywordData::Char(v) => Ok(v),
            _ => Err(self.mismatch(TypeTag::Char)),
        }
    }

    /// Check that the entry can be written to either layout.
    ///
    /// The name must be printable ASCII without quotes, the element count
    /// must fit the `i32` header field, and every `CHAR` value must be
    /// ASCII of at most 8 bytes. Encoders call this before the first byte
    /// is written.
    pub fn validate(&self) -> Result<(), KeywordError> {
        let invalid = |detail: String| KeywordError::InvalidValue {
            name: self.name.clone(),
            detail,
        };
        let printable = |b: u8| (b.is_ascii_graphic() && b != b'\'') || b == b' ';
        if !self.name.bytes().all(printable) {
            return Err(invalid(format!(
                "keyword name '{}' is not printable ASCII",
                self.name
            )));
        }
        if i32::try_from(self.len()).is_err() {
            return Err(invalid(format!("element count {} exceeds i32", self.len())));
        }
        if let KeywordData::Char(values) = &self.data {
            if let Some(bad) = values.iter().find(|v| v.len() > 8 || !v.is_ascii()) {
                return Err(invalid(format!(
                    "string '{bad}' is not ASCII of at most 8 bytes"
                )));
            }
        }
        Ok(())
    }

    /// Any floating-point payload widened to `f64`.
    ///
    /// Grid arrays such as `COORD` and `ZCORN` are written as `REAL` by
    /// some producers and `DOUB` by others.
    pub fn to_f64_vec(&self) -> Result<Vec<f64>, KeywordError> {
        match &self.data {
            KeywordData::Float(v) => Ok(v.iter().map(|&x| f64::from(x)).collect()),
            KeywordData::Double(v) => Ok(v.clone()),
            _ => Err(self.mismatch(TypeTag::Double)),
        }
    }
}

/// Truncate to at most [`NAME_WIDTH`] bytes on a character boundary and
/// strip trailing padding.
pub(crate) fn normalize_name(name: &str) -> String {
    let mut end = 0;
    for (idx, ch) in name.char_indices() {
        if idx + ch.len_utf8() > NAME_WIDTH {
            break;
        }
        end = idx + ch.len_utf8();
    }
    name[..end].trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_parse_their_own_names() {
        for tag in [
            TypeTag::Int,
            TypeTag::Float,
            TypeTag::Double,
            TypeTag::Bool,
            TypeTag::Char,
            TypeTag::Message,
        ] {
            assert_eq!(TypeTag::parse(tag.as_str()), Some(tag));
        }
        assert_eq!(TypeTag::parse("C008"), None);
    }

    #[test]
    fn names_are_truncated_and_trimmed() {
        let e = KeywordEntry::new("PRESSURE_EXTRA", KeywordData::Message);
        assert_eq!(e.name(), "PRESSURE");
        let e = KeywordEntry::new("SWAT    ", KeywordData::Float(vec![0.2]));
        assert_eq!(e.name(), "SWAT");
    }

    #[test]
    fn multibyte_names_stay_within_header_width() {
        let e = KeywordEntry::new("ÅÅÅÅÅ", KeywordData::Int(vec![1]));
        assert_eq!(e.name(), "ÅÅÅÅ");
        let e = KeywordEntry::new("😀😀😀😀😀", KeywordData::Int(vec![1]));
        assert_eq!(e.name(), "😀😀");
        assert!(e.name().len() <= NAME_WIDTH);
    }

    #[test]
    fn validate_rejects_unwritable_entries() {
        let ok = KeywordEntry::new("WGNAMES", KeywordData::Char(vec!["OP-1".into()]));
        assert!(ok.validate().is_ok());
        for bad in [
            KeywordEntry::new("ÅÅÅÅ", KeywordData::Int(vec![1])),
            KeywordEntry::new("O'NEIL", KeywordData::Int(vec![1])),
            KeywordEntry::new("WGNAMES", KeywordData::Char(vec!["TOO-LONG-1".into()])),
            KeywordEntry::new("WGNAMES", KeywordData::Char(vec!["BRØNN".into()])),
        ] {
            assert!(matches!(bad.validate(), Err(KeywordError::InvalidValue { .. })));
        }
    }

    #[test]
    fn typed_access_reports_mismatch() {
        let e = KeywordEntry::new("NUMS", KeywordData::Int(vec![1, 2]));
        assert_eq!(e.as_ints().unwrap(), &[1, 2]);
        match e.as_floats() {
            Err(KeywordError::TypeMismatch {
                expected, found, ..
            }) => {
                assert_eq!(expected, TypeTag::Float);
                assert_eq!(found, TypeTag::Int);
            }
            other => panic!("expected TypeMismatch, got {other:?}"),
        }
    }

    #[test]
    fn floats_widen_to_f64() {
        let e = KeywordEntry::new("ZCORN", KeywordData::Float(vec![1.5, 2.0]));
        assert_eq!(e.to_f64_vec().unwrap(), vec![1.5, 2.0]);
        let e = KeywordEntry::new("ZCORN", KeywordData::Int(vec![1]));
        assert!(e.to_f64_vec().is_err());
    }
}
