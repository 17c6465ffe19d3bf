//! Ordered sets of Unicode characters.

pub mod set;

pub use set::CharSet;

use std::fmt::Display;
use std::str::FromStr;

use thiserror::Error;

/// The first code point of the surrogate block.
pub const SURROGATE_START: u32 = 0xD800;

/// The last code point of the surrogate block.
pub const SURROGATE_END: u32 = 0xDFFF;

/// The highest valid Unicode code point.
pub const MAX_CODE_POINT: u32 = 0x10FFFF;

/// Errors raised by [CharSet] constructors and queries.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// A code point outside `[0, 0x10FFFF]` or inside the surrogate block
    /// `[0xD800, 0xDFFF]`.
    #[error("invalid code point: {0:#X}")]
    InvalidCodePoint(u32),
    /// A range endpoint that does not denote exactly one character.
    #[error("invalid range endpoint: {0}")]
    InvalidConstruction(String),
    /// A sequence element that is not a character, code point, or string.
    #[error("invalid element: {0}")]
    InvalidElement(String),
    /// An unrecognized representation name passed to `to_array`.
    #[error("invalid representation name: {0:?}")]
    InvalidRepresentation(String),
}

/// Convert a raw code point to a `char`.
/// Fails with [Error::InvalidCodePoint] if the code point is out of range or
/// a surrogate.
///
/// # Examples
/// ```
/// use char_set::{char_from_code_point, Error};
/// assert_eq!(char_from_code_point(0x61), Ok('a'));
/// assert_eq!(char_from_code_point(0xD800), Err(Error::InvalidCodePoint(0xD800)));
/// assert_eq!(char_from_code_point(0x110000), Err(Error::InvalidCodePoint(0x110000)));
/// ```
pub fn char_from_code_point(code: u32) -> Result<char, Error> {
    char::from_u32(code).ok_or(Error::InvalidCodePoint(code))
}

/// A single input to a [CharSet] constructor or to [CharSet::concat].
///
/// The original data model is dynamically shaped: an operand may be a raw
/// code point, a single character, a string, a nested sequence, or a whole
/// set. `Element` makes those shapes explicit. `From` conversions exist for
/// the common cases, so call sites usually pass `char`s, `u32`s, and `&str`s
/// directly.
///
/// # Examples
/// ```
/// use char_set::Element;
/// assert_eq!(Element::from('a'), Element::Char('a'));
/// assert_eq!(Element::from(0x61u32), Element::Scalar(0x61));
/// assert_eq!(Element::from("abc"), Element::Text("abc".to_string()));
/// assert_eq!(
///     Element::from(vec!['a', 'b']),
///     Element::Seq(vec![Element::Char('a'), Element::Char('b')])
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    /// A raw code point, validated when the element is flattened.
    Scalar(u32),
    /// A single character.
    Char(char),
    /// An arbitrary string, decomposed into its characters.
    Text(String),
    /// A nested sequence, normalized recursively. A [Element::Set] inside a
    /// sequence is rejected.
    Seq(Vec<Element>),
    /// A whole set, flattened via its characters. Admitted by
    /// [CharSet::concat] but not by [CharSet::from_sequence].
    Set(CharSet),
}

impl Element {
    /// A short name for the shape of this element, used in error messages.
    fn shape(&self) -> &'static str {
        match self {
            Element::Scalar(_) => "code point",
            Element::Char(_) => "character",
            Element::Text(_) => "string",
            Element::Seq(_) => "sequence",
            Element::Set(_) => "character set",
        }
    }

    /// Interpret this element as exactly one character, without erroring.
    /// Returns `None` for invalid code points, strings that do not contain
    /// exactly one character, sequences, and sets.
    pub(crate) fn to_char(&self) -> Option<char> {
        match self {
            Element::Scalar(code) => char::from_u32(*code),
            Element::Char(c) => Some(*c),
            Element::Text(s) => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Some(c),
                    _ => None,
                }
            }
            Element::Seq(_) | Element::Set(_) => None,
        }
    }

    /// Interpret this element as a range endpoint: exactly one character.
    pub(crate) fn into_endpoint(self) -> Result<char, Error> {
        match self {
            Element::Scalar(code) => char_from_code_point(code),
            Element::Char(c) => Ok(c),
            Element::Text(s) => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Ok(c),
                    _ => Err(Error::InvalidConstruction(format!(
                        "expected a single character, got the string {:?}",
                        s
                    ))),
                }
            }
            other => Err(Error::InvalidConstruction(format!(
                "expected a single character, got a {}",
                other.shape()
            ))),
        }
    }

    /// Append the characters this element denotes to `out`.
    ///
    /// `allow_sets` distinguishes the two flattening contexts: the operand
    /// list of [CharSet::concat] admits whole sets, while sequence elements
    /// do not. Nested sequences are always flattened under sequence rules.
    pub(crate) fn flatten_into(&self, out: &mut Vec<char>, allow_sets: bool) -> Result<(), Error> {
        match self {
            Element::Scalar(code) => out.push(char_from_code_point(*code)?),
            Element::Char(c) => out.push(*c),
            Element::Text(s) => out.extend(s.chars()),
            Element::Seq(elements) => {
                for e in elements {
                    e.flatten_into(out, false)?;
                }
            }
            Element::Set(set) => {
                if allow_sets {
                    out.extend(set.iter());
                } else {
                    return Err(Error::InvalidElement(
                        "a character set cannot appear inside a sequence".to_string(),
                    ));
                }
            }
        }
        Ok(())
    }
}

impl From<char> for Element {
    fn from(c: char) -> Self {
        Element::Char(c)
    }
}

impl From<u32> for Element {
    fn from(code: u32) -> Self {
        Element::Scalar(code)
    }
}

impl From<&str> for Element {
    fn from(s: &str) -> Self {
        Element::Text(s.to_string())
    }
}

impl From<String> for Element {
    fn from(s: String) -> Self {
        Element::Text(s)
    }
}

impl From<CharSet> for Element {
    fn from(set: CharSet) -> Self {
        Element::Set(set)
    }
}

impl From<&CharSet> for Element {
    fn from(set: &CharSet) -> Self {
        Element::Set(set.clone())
    }
}

impl<E: Into<Element>> From<Vec<E>> for Element {
    fn from(elements: Vec<E>) -> Self {
        Element::Seq(elements.into_iter().map(Into::into).collect())
    }
}

/// The two representations [CharSet::to_array] can materialize.
///
/// Parsed from the representation names the original interface accepts,
/// ASCII case-insensitively: `num`, `number`, and `codepoint` select
/// [Representation::CodePoint]; `char`, `character`, `str`, and `string`
/// select [Representation::Char].
///
/// # Examples
/// ```
/// use char_set::{Error, Representation};
/// assert_eq!("codepoint".parse(), Ok(Representation::CodePoint));
/// assert_eq!("CHAR".parse(), Ok(Representation::Char));
/// assert_eq!(
///     "bogus".parse::<Representation>(),
///     Err(Error::InvalidRepresentation("bogus".to_string()))
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Representation {
    /// Numeric code points (`Vec<u32>`).
    CodePoint,
    /// Single characters (`Vec<char>`).
    Char,
}

impl FromStr for Representation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "num" | "number" | "codepoint" => Ok(Representation::CodePoint),
            "char" | "character" | "str" | "string" => Ok(Representation::Char),
            _ => Err(Error::InvalidRepresentation(s.to_string())),
        }
    }
}

/// The result of materializing a [CharSet] with [CharSet::to_array].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Materialized {
    /// The set's contents as code points.
    CodePoints(Vec<u32>),
    /// The set's contents as characters.
    Chars(Vec<char>),
}

impl Materialized {
    /// The number of entries, in either representation.
    pub fn len(&self) -> usize {
        match self {
            Materialized::CodePoints(codes) => codes.len(),
            Materialized::Chars(chars) => chars.len(),
        }
    }

    /// Whether the materialized sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Display for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Element::Scalar(code) => write!(f, "{:#X}", code),
            Element::Char(c) => write!(f, "{:?}", c),
            Element::Text(s) => write!(f, "{:?}", s),
            Element::Seq(elements) => {
                write!(f, "[")?;
                for (i, e) in elements.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", e)?;
                }
                write!(f, "]")
            }
            Element::Set(set) => write!(f, "{}", set),
        }
    }
}
