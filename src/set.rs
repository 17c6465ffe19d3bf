//! The dual-representation character set.

use std::fmt::Display;

use quickcheck::Arbitrary;

use crate::{Element, Error, Materialized, Representation, SURROGATE_END, SURROGATE_START};

/// The number of code points in the surrogate block.
const SURROGATE_BLOCK_LEN: u32 = SURROGATE_END - SURROGATE_START + 1;

/// The two internal representations of a [CharSet].
#[derive(Debug, Clone, PartialEq, Eq)]
enum Repr {
    /// An explicit ordered list of characters. Insertion order is preserved
    /// and duplicates are permitted; no deduplication is ever performed.
    Chars(Vec<char>),
    /// A contiguous range of code points, enumerated lazily from `start` to
    /// `end` stepping by `direction`. The surrogate block is skipped.
    Range {
        start: char,
        end: char,
        direction: i32,
    },
}

/// An ordered set of Unicode characters.
///
/// A `CharSet` is backed by exactly one of two representations for its whole
/// lifetime: an explicit collection of characters, or a contiguous code-point
/// range described by its endpoints and a direction. Both behave identically
/// to callers: membership testing, length computation, materialization, and
/// the stateful iteration protocol dispatch on the representation internally.
///
/// Ranges step from `start` to `end` inclusive, ascending or descending, and
/// skip the surrogate block `[0xD800, 0xDFFF]` entirely: surrogate code
/// points are not characters and contribute nothing to the length.
///
/// Each instance owns a private cursor for the [next](CharSet::next) /
/// [reset](CharSet::reset) / [is_end](CharSet::is_end) protocol. The cursor
/// is the only mutable state; the representation never changes after
/// construction. Equality compares representations and ignores the cursor.
///
/// # Examples
/// ```
/// use char_set::CharSet;
///
/// let mut vowels = CharSet::from_string("aeiou");
/// assert_eq!(vowels.len(), 5);
/// assert_eq!(vowels.next(), Some('a'));
///
/// let mut digits = CharSet::from_range('0', '9')?;
/// assert_eq!(digits.len(), 10);
/// assert!(digits.contains('7'));
/// assert!(!digits.contains('a'));
/// # Ok::<(), char_set::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct CharSet {
    repr: Repr,
    /// Number of characters already yielded by [CharSet::next].
    consumed: usize,
}

impl CharSet {
    /// Create a range-mode set covering all characters between `a` and `b`,
    /// both inclusive. Each endpoint may be a `char`, a valid `u32` code
    /// point, or a string containing exactly one character.
    ///
    /// The range is ascending if `a <= b` and descending otherwise; a range
    /// never being empty, `from_range(c, c)` is a singleton. Surrogate code
    /// points between the endpoints are skipped, in either direction.
    ///
    /// # Errors
    /// [Error::InvalidCodePoint] if an endpoint code point is out of range
    /// or a surrogate; [Error::InvalidConstruction] if an endpoint does not
    /// denote exactly one character.
    ///
    /// # Examples
    /// ```
    /// use char_set::{CharSet, Error};
    ///
    /// let lower = CharSet::from_range('a', 'z')?;
    /// assert_eq!(lower.len(), 26);
    ///
    /// // Endpoints mix freely between characters, code points, and
    /// // one-character strings.
    /// let mixed = CharSet::from_range(0x61u32, "f")?;
    /// assert_eq!(mixed.len(), 6);
    ///
    /// assert_eq!(
    ///     CharSet::from_range(0xD800u32, 'a'),
    ///     Err(Error::InvalidCodePoint(0xD800))
    /// );
    /// assert!(matches!(
    ///     CharSet::from_range("ab", 'c'),
    ///     Err(Error::InvalidConstruction(_))
    /// ));
    /// # Ok::<(), char_set::Error>(())
    /// ```
    pub fn from_range(a: impl Into<Element>, b: impl Into<Element>) -> Result<Self, Error> {
        let start = a.into().into_endpoint()?;
        let end = b.into().into_endpoint()?;
        let direction = if start <= end { 1 } else { -1 };
        Ok(CharSet {
            repr: Repr::Range {
                start,
                end,
                direction,
            },
            consumed: 0,
        })
    }

    /// Create a collection-mode set from the characters of a string, in
    /// order. Duplicates are kept.
    ///
    /// # Examples
    /// ```
    /// use char_set::CharSet;
    /// assert_eq!(CharSet::from_string("ab").len(), 2);
    /// assert_eq!(CharSet::from_string("aab").len(), 3);
    /// assert_eq!(CharSet::from_string("").len(), 0);
    /// ```
    pub fn from_string(s: &str) -> Self {
        CharSet {
            repr: Repr::Chars(s.chars().collect()),
            consumed: 0,
        }
    }

    /// Create a collection-mode set from a sequence of elements. Each
    /// element may be a character, a valid code point, or a string, which is
    /// decomposed into its characters and spliced in place. All elements are
    /// concatenated in order.
    ///
    /// # Errors
    /// [Error::InvalidCodePoint] for an invalid code-point element;
    /// [Error::InvalidElement] for an element of any other shape, such as a
    /// nested [CharSet].
    ///
    /// # Examples
    /// ```
    /// use char_set::CharSet;
    ///
    /// let vowels = CharSet::from_sequence(['a', 'e', 'i', 'o', 'u'])?;
    /// assert_eq!(vowels.len(), 5);
    ///
    /// // Strings are spliced into their characters.
    /// let hex = CharSet::from_sequence(["0123456789", "abcdef"])?;
    /// assert_eq!(hex.len(), 16);
    /// # Ok::<(), char_set::Error>(())
    /// ```
    pub fn from_sequence<I>(sequence: I) -> Result<Self, Error>
    where
        I: IntoIterator,
        I::Item: Into<Element>,
    {
        let mut chars = Vec::new();
        for element in sequence {
            element.into().flatten_into(&mut chars, false)?;
        }
        Ok(CharSet {
            repr: Repr::Chars(chars),
            consumed: 0,
        })
    }

    /// Concatenate the characters of all operands, in argument order, into a
    /// new collection-mode set. Each operand may be a [CharSet] (flattened
    /// via its characters), a character, a valid code point, a string, or a
    /// sequence of those. No operand is mutated.
    ///
    /// # Errors
    /// [Error::InvalidCodePoint] for an invalid code-point operand;
    /// [Error::InvalidElement] for a set nested inside a sequence operand.
    ///
    /// # Examples
    /// ```
    /// use char_set::{CharSet, Element};
    ///
    /// let ab = CharSet::from_range('a', 'b')?;
    /// let joined = CharSet::concat([Element::from(&ab), Element::from("AB")])?;
    /// assert_eq!(joined.to_chars(), vec!['a', 'b', 'A', 'B']);
    /// # Ok::<(), char_set::Error>(())
    /// ```
    pub fn concat<I>(operands: I) -> Result<Self, Error>
    where
        I: IntoIterator,
        I::Item: Into<Element>,
    {
        let mut chars = Vec::new();
        for operand in operands {
            operand.into().flatten_into(&mut chars, true)?;
        }
        Ok(CharSet {
            repr: Repr::Chars(chars),
            consumed: 0,
        })
    }

    /// Concatenate this set with the given operands, in order, into a new
    /// collection-mode set. Sugar for [CharSet::concat] with `self`
    /// prepended to the operand list; `self` is not mutated.
    ///
    /// # Examples
    /// ```
    /// use char_set::CharSet;
    ///
    /// let ab = CharSet::from_range('a', 'b')?;
    /// let mut joined = ab.concat_with(['A'])?;
    /// assert_eq!(joined.len(), 3);
    /// assert_eq!(joined.next(), Some('a'));
    /// assert_eq!(joined.next(), Some('b'));
    /// assert_eq!(joined.next(), Some('A'));
    /// // The operands are untouched.
    /// assert_eq!(ab.len(), 2);
    /// # Ok::<(), char_set::Error>(())
    /// ```
    pub fn concat_with<I>(&self, operands: I) -> Result<Self, Error>
    where
        I: IntoIterator,
        I::Item: Into<Element>,
    {
        let mut chars: Vec<char> = self.iter().collect();
        for operand in operands {
            operand.into().flatten_into(&mut chars, true)?;
        }
        Ok(CharSet {
            repr: Repr::Chars(chars),
            consumed: 0,
        })
    }

    /// The number of characters in the set.
    ///
    /// Collection mode counts the stored characters, duplicates included.
    /// Range mode counts `|start - end| + 1` code points, minus the size of
    /// the surrogate block when the range straddles it. Endpoints are never
    /// surrogates, so a range either contains the whole block or none of it
    /// and the count is exact.
    ///
    /// # Examples
    /// ```
    /// use char_set::CharSet;
    /// assert_eq!(CharSet::from_range('a', 'z')?.len(), 26);
    /// assert_eq!(CharSet::from_range('z', 'a')?.len(), 26);
    /// assert_eq!(CharSet::from_range('\u{D7FF}', '\u{E000}')?.len(), 2);
    /// assert_eq!(CharSet::from_string("aeiou").len(), 5);
    /// # Ok::<(), char_set::Error>(())
    /// ```
    pub fn len(&self) -> usize {
        match &self.repr {
            Repr::Chars(chars) => chars.len(),
            Repr::Range { start, end, .. } => {
                let lo = (*start as u32).min(*end as u32);
                let hi = (*start as u32).max(*end as u32);
                let mut count = hi - lo + 1;
                if lo < SURROGATE_START && SURROGATE_END < hi {
                    count -= SURROGATE_BLOCK_LEN;
                }
                count as usize
            }
        }
    }

    /// Whether the set contains no characters. Only a collection-mode set
    /// can be empty; a range always covers at least its endpoints.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `x` belongs to the set.
    ///
    /// `x` may be anything convertible to an [Element]; input that does not
    /// denote exactly one character (an invalid code point, a multi-character
    /// string, a sequence, a set) simply returns `false`, never an error.
    /// Membership is tested defensively on arbitrary input.
    ///
    /// Collection mode scans the stored characters; range mode compares
    /// against the endpoints, whichever direction the range runs.
    ///
    /// # Examples
    /// ```
    /// use char_set::CharSet;
    ///
    /// let lower = CharSet::from_range('a', 'z')?;
    /// assert!(lower.contains('m'));
    /// assert!(lower.contains(0x6Du32));
    /// assert!(lower.contains("m"));
    /// assert!(!lower.contains('M'));
    /// assert!(!lower.contains(999999u32));
    /// assert!(!lower.contains("mn"));
    /// # Ok::<(), char_set::Error>(())
    /// ```
    pub fn contains(&self, x: impl Into<Element>) -> bool {
        let c = match x.into().to_char() {
            Some(c) => c,
            None => return false,
        };
        match &self.repr {
            Repr::Chars(chars) => chars.contains(&c),
            Repr::Range { start, end, .. } => {
                let (lo, hi) = if start <= end { (start, end) } else { (end, start) };
                *lo <= c && c <= *hi
            }
        }
    }

    /// Whether the cursor has reached the end of the set. True as soon as
    /// every character has been yielded by [next](CharSet::next), and
    /// immediately on an empty set.
    ///
    /// # Examples
    /// ```
    /// use char_set::CharSet;
    ///
    /// let mut cs = CharSet::from_string("a");
    /// assert!(!cs.is_end());
    /// cs.next();
    /// assert!(cs.is_end());
    ///
    /// assert!(CharSet::from_string("").is_end());
    /// ```
    pub fn is_end(&self) -> bool {
        self.consumed == self.len()
    }

    /// Yield the next character, advancing the cursor. Returns `None` once
    /// the end is reached; further calls keep returning `None` without
    /// moving the cursor.
    ///
    /// This is the stateful iteration protocol of the set: forward-only,
    /// one cursor per instance, restartable with [reset](CharSet::reset).
    /// For a detached iteration that leaves the cursor alone, use
    /// [iter](CharSet::iter).
    ///
    /// # Examples
    /// ```
    /// use char_set::CharSet;
    ///
    /// let mut cs = CharSet::from_range('a', 'b')?;
    /// assert_eq!(cs.next(), Some('a'));
    /// assert_eq!(cs.next(), Some('b'));
    /// assert_eq!(cs.next(), None);
    /// assert_eq!(cs.reset().next(), Some('a'));
    /// # Ok::<(), char_set::Error>(())
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<char> {
        if self.is_end() {
            return None;
        }
        let c = self.nth_char(self.consumed);
        self.consumed += 1;
        Some(c)
    }

    /// Move the cursor back to the start. Returns `self` for chaining; the
    /// underlying data is untouched.
    pub fn reset(&mut self) -> &mut Self {
        self.consumed = 0;
        self
    }

    /// The character at position `i`, `i < self.len()`.
    fn nth_char(&self, i: usize) -> char {
        match &self.repr {
            Repr::Chars(chars) => chars[i],
            Repr::Range {
                start, direction, ..
            } => range_nth(*start, *direction, i),
        }
    }

    /// Iterate over the whole set, in the same order [next](CharSet::next)
    /// produces, without touching the embedded cursor.
    ///
    /// # Examples
    /// ```
    /// use char_set::CharSet;
    /// let cs = CharSet::from_range('c', 'a')?;
    /// assert_eq!(cs.iter().collect::<Vec<_>>(), vec!['c', 'b', 'a']);
    /// # Ok::<(), char_set::Error>(())
    /// ```
    pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
        (0..self.len()).map(move |i| self.nth_char(i))
    }

    /// The whole set as a newly allocated vector of characters, start to
    /// end, independent of the cursor.
    pub fn to_chars(&self) -> Vec<char> {
        match &self.repr {
            Repr::Chars(chars) => chars.clone(),
            Repr::Range { .. } => self.iter().collect(),
        }
    }

    /// The whole set as a newly allocated vector of code points, start to
    /// end, independent of the cursor.
    pub fn to_code_points(&self) -> Vec<u32> {
        self.iter().map(|c| c as u32).collect()
    }

    /// Materialize the whole set in the requested representation. The
    /// representation is named as in [Representation]: `"codepoint"` (or
    /// `"num"`, `"number"`) for code points, `"char"` (or `"character"`,
    /// `"str"`, `"string"`) for characters. The cursor is neither consulted
    /// nor disturbed.
    ///
    /// # Errors
    /// [Error::InvalidRepresentation] for any other name.
    ///
    /// # Examples
    /// ```
    /// use char_set::{CharSet, Error, Materialized};
    ///
    /// let cs = CharSet::from_range('a', 'c')?;
    /// assert_eq!(
    ///     cs.to_array("codepoint")?,
    ///     Materialized::CodePoints(vec![0x61, 0x62, 0x63])
    /// );
    /// assert_eq!(
    ///     cs.to_array("char")?,
    ///     Materialized::Chars(vec!['a', 'b', 'c'])
    /// );
    /// assert_eq!(
    ///     cs.to_array("glyph"),
    ///     Err(Error::InvalidRepresentation("glyph".to_string()))
    /// );
    /// # Ok::<(), char_set::Error>(())
    /// ```
    pub fn to_array(&self, representation: &str) -> Result<Materialized, Error> {
        match representation.parse()? {
            Representation::CodePoint => Ok(Materialized::CodePoints(self.to_code_points())),
            Representation::Char => Ok(Materialized::Chars(self.to_chars())),
        }
    }
}

/// The `i`-th character of a range, `i < len`.
///
/// Stepping from `start` towards the far endpoint, codes landing in the
/// surrogate block are shifted past it in the direction of travel. The shift
/// keeps the code a valid non-surrogate scalar within bounds, so the final
/// conversion cannot fail.
fn range_nth(start: char, direction: i32, i: usize) -> char {
    let s = start as u32;
    let mut code = if direction >= 0 {
        s + i as u32
    } else {
        s - i as u32
    };
    if direction >= 0 {
        if s < SURROGATE_START && code >= SURROGATE_START {
            code += SURROGATE_BLOCK_LEN;
        }
    } else if s > SURROGATE_END && code <= SURROGATE_END {
        code -= SURROGATE_BLOCK_LEN;
    }
    char::from_u32(code).unwrap()
}

impl Default for CharSet {
    /// An empty collection-mode set.
    fn default() -> Self {
        CharSet::from_string("")
    }
}

impl PartialEq for CharSet {
    /// Compares the underlying representation; the cursor position does not
    /// take part. A range and a collection holding the same characters are
    /// not equal.
    fn eq(&self, other: &Self) -> bool {
        self.repr == other.repr
    }
}

impl Eq for CharSet {}

impl From<&str> for CharSet {
    fn from(s: &str) -> Self {
        CharSet::from_string(s)
    }
}

impl From<String> for CharSet {
    fn from(s: String) -> Self {
        CharSet::from_string(&s)
    }
}

impl From<char> for CharSet {
    fn from(c: char) -> Self {
        CharSet {
            repr: Repr::Chars(vec![c]),
            consumed: 0,
        }
    }
}

impl FromIterator<char> for CharSet {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        CharSet {
            repr: Repr::Chars(iter.into_iter().collect()),
            consumed: 0,
        }
    }
}

impl Display for CharSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.repr {
            Repr::Chars(chars) => {
                write!(f, "{{")?;
                for c in chars {
                    write!(f, "{}", c.escape_debug())?;
                }
                write!(f, "}}")
            }
            Repr::Range { start, end, .. } => {
                if start == end {
                    write!(f, "[{}]", start.escape_debug())
                } else {
                    write!(f, "[{}-{}]", start.escape_debug(), end.escape_debug())
                }
            }
        }
    }
}

impl Arbitrary for CharSet {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        if bool::arbitrary(g) {
            // Two chars are always valid endpoints.
            CharSet::from_range(char::arbitrary(g), char::arbitrary(g)).unwrap()
        } else {
            let len = usize::arbitrary(g) % 64;
            (0..len).map(|_| char::arbitrary(g)).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use quickcheck::TestResult;
    use quickcheck_macros::quickcheck;

    use super::*;
    use crate::{char_from_code_point, Element};

    #[test]
    fn constructor_shapes() {
        assert!(CharSet::from_range('a', 'z').is_ok());
        assert!(CharSet::from_range(0x61u32, "f").is_ok());
        CharSet::from_string("aeiou");
        assert!(CharSet::from_sequence(['a', 'e', 'i', 'o', 'u']).is_ok());
        assert!(CharSet::from_sequence(["0123456789", "abcdef"]).is_ok());
    }

    #[test]
    fn collection_iteration_protocol() {
        let mut cs = CharSet::from_string("ab");
        assert_eq!(cs.len(), 2);
        assert!(!cs.is_end());
        assert_eq!(cs.next(), Some('a'));
        assert!(!cs.is_end());
        assert_eq!(cs.next(), Some('b'));
        assert!(cs.is_end());
        assert_eq!(cs.next(), None);
        cs.reset();
        assert!(!cs.is_end());
        assert_eq!(cs.next(), Some('a'));
    }

    #[test]
    fn range_iteration_protocol() {
        let mut cs = CharSet::from_range('a', 'b').unwrap();
        assert_eq!(cs.len(), 2);
        assert!(!cs.is_end());
        assert_eq!(cs.next(), Some('a'));
        assert!(!cs.is_end());
        assert_eq!(cs.next(), Some('b'));
        assert!(cs.is_end());
        assert_eq!(cs.next(), None);
        cs.reset();
        assert!(!cs.is_end());
        assert_eq!(cs.next(), Some('a'));
    }

    #[test]
    fn singleton_range() {
        let mut cs = CharSet::from_range('a', 'a').unwrap();
        assert_eq!(cs.len(), 1);
        assert_eq!(cs.next(), Some('a'));
        assert_eq!(cs.next(), None);
    }

    #[test]
    fn empty_set() {
        let mut cs = CharSet::from_string("");
        assert_eq!(cs.len(), 0);
        assert!(cs.is_empty());
        assert!(cs.is_end());
        assert_eq!(cs.next(), None);
    }

    #[test]
    fn duplicates_are_kept() {
        let cs = CharSet::from_string("aab");
        assert_eq!(cs.len(), 3);
        assert_eq!(cs.to_chars(), vec!['a', 'a', 'b']);
    }

    #[test]
    fn sequence_splices_strings() {
        let cs = CharSet::from_sequence(["0123456789", "abcdef"]).unwrap();
        assert_eq!(cs.len(), 16);
        assert_eq!(cs.to_chars()[10], 'a');
    }

    #[test]
    fn sequence_rejects_sets() {
        let inner = CharSet::from_string("a");
        let result = CharSet::from_sequence([Element::from(inner)]);
        assert!(matches!(result, Err(Error::InvalidElement(_))));
    }

    #[test]
    fn reserved_code_points() {
        // Immediately outside the surrogate block.
        for code in [0xD7FFu32, 0xE000] {
            assert!(CharSet::from_sequence([code]).is_ok());
        }
        // Inside the block.
        for code in [0xD800u32, 0xDFFF] {
            assert_eq!(
                CharSet::from_sequence([code]),
                Err(Error::InvalidCodePoint(code))
            );
        }
        // Out of range entirely.
        assert_eq!(
            CharSet::from_sequence([0x110000u32]),
            Err(Error::InvalidCodePoint(0x110000))
        );
    }

    #[test]
    fn range_rejects_invalid_endpoints() {
        assert_eq!(
            CharSet::from_range(0xD800u32, 'a'),
            Err(Error::InvalidCodePoint(0xD800))
        );
        assert_eq!(
            CharSet::from_range('a', 0x110000u32),
            Err(Error::InvalidCodePoint(0x110000))
        );
        assert!(matches!(
            CharSet::from_range("ab", 'c'),
            Err(Error::InvalidConstruction(_))
        ));
        assert!(matches!(
            CharSet::from_range("", 'c'),
            Err(Error::InvalidConstruction(_))
        ));
    }

    #[test]
    fn descending_range() {
        let cs = CharSet::from_range('z', 'a').unwrap();
        assert_eq!(cs.len(), 26);
        let chars = cs.to_chars();
        assert_eq!(chars.first(), Some(&'z'));
        assert_eq!(chars.last(), Some(&'a'));
    }

    #[test]
    fn ascending_range_skips_surrogates() {
        let mut cs = CharSet::from_range(0xD7FFu32, 0xE000u32).unwrap();
        assert_eq!(cs.len(), 2);
        assert_eq!(cs.next(), Some('\u{D7FF}'));
        assert_eq!(cs.next(), Some('\u{E000}'));
        assert_eq!(cs.next(), None);
    }

    #[test]
    fn descending_range_skips_surrogates() {
        let mut cs = CharSet::from_range(0xE000u32, 0xD7FFu32).unwrap();
        assert_eq!(cs.len(), 2);
        assert_eq!(cs.next(), Some('\u{E000}'));
        assert_eq!(cs.next(), Some('\u{D7FF}'));
        assert_eq!(cs.next(), None);
    }

    #[test]
    fn straddling_range_length() {
        // 0xD000..=0xE7FF covers 0x1800 code points, 0x800 of them
        // surrogates.
        let cs = CharSet::from_range(0xD000u32, 0xE7FFu32).unwrap();
        assert_eq!(cs.len(), 0x1000);
        let chars = cs.to_chars();
        assert_eq!(chars.len(), 0x1000);
        assert_eq!(chars.first(), Some(&'\u{D000}'));
        assert_eq!(chars.last(), Some(&'\u{E7FF}'));
    }

    #[test]
    fn concat_single_operands() {
        let cs = CharSet::from_range('a', 'b').unwrap();
        let operands = [
            Element::from(CharSet::from_string("A")),
            Element::from(0x41u32),
            Element::from("A"),
        ];
        for operand in operands.clone() {
            let mut joined = cs.concat_with([operand]).unwrap();
            assert_eq!(joined.len(), 3);
            assert_eq!(joined.next(), Some('a'));
            assert_eq!(joined.next(), Some('b'));
            assert_eq!(joined.next(), Some('A'));
        }
        let joined = cs.concat_with(operands).unwrap();
        assert_eq!(joined.len(), 5);
    }

    #[test]
    fn concat_static_form() {
        let a = CharSet::from_range('a', 'b').unwrap();
        let b = CharSet::from_string("xy");
        let joined = CharSet::concat([Element::from(&a), Element::from(&b)]).unwrap();
        assert_eq!(joined.to_chars(), vec!['a', 'b', 'x', 'y']);
        // Operands are untouched, cursors included.
        assert!(!a.is_end());
        assert_eq!(b.len(), 2);
    }

    #[test]
    fn concat_sequence_operand() {
        let joined =
            CharSet::concat([Element::from(vec![Element::from("ab"), Element::from(0x63u32)])])
                .unwrap();
        assert_eq!(joined.to_chars(), vec!['a', 'b', 'c']);
    }

    #[test]
    fn contains_range() {
        let lower = CharSet::from_range('a', 'z').unwrap();
        assert!(lower.contains('m'));
        assert!(lower.contains('a'));
        assert!(lower.contains('z'));
        assert!(!lower.contains('M'));
        assert!(!lower.contains(999999u32));
        assert!(!lower.contains("zz"));
        assert!(!lower.contains(""));
    }

    #[test]
    fn contains_descending_range() {
        let lower = CharSet::from_range('z', 'a').unwrap();
        assert!(lower.contains('m'));
        assert!(!lower.contains('0'));
    }

    #[test]
    fn contains_collection() {
        let cs = CharSet::from_string("aeiou");
        assert!(cs.contains('a'));
        assert!(cs.contains(0x65u32));
        assert!(!cs.contains('b'));
        assert!(!cs.contains(0xD800u32));
    }

    #[test]
    fn to_array_leaves_cursor_alone() {
        let mut cs = CharSet::from_range('a', 'c').unwrap();
        assert_eq!(cs.next(), Some('a'));
        let first = cs.to_array("char").unwrap();
        let second = cs.to_array("char").unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
        assert_eq!(cs.next(), Some('b'));
    }

    #[test]
    fn display_forms() {
        assert_eq!(CharSet::from_range('a', 'z').unwrap().to_string(), "[a-z]");
        assert_eq!(CharSet::from_range('a', 'a').unwrap().to_string(), "[a]");
        assert_eq!(CharSet::from_string("ab").to_string(), "{ab}");
    }

    #[quickcheck]
    fn len_counts_iteration(mut cs: CharSet) {
        let mut count = 0;
        while cs.next().is_some() {
            count += 1;
        }
        assert_eq!(count, cs.len());
        assert!(cs.is_end());
    }

    #[quickcheck]
    fn reset_reproduces_first(mut cs: CharSet, depth: usize) -> TestResult {
        if cs.is_empty() {
            return TestResult::discard();
        }
        let first = cs.reset().next();
        for _ in 0..depth % 128 {
            cs.next();
        }
        assert_eq!(cs.reset().next(), first);
        TestResult::passed()
    }

    #[quickcheck]
    fn contains_everything_yielded(cs: CharSet) {
        for c in cs.iter() {
            assert!(cs.contains(c));
        }
    }

    #[quickcheck]
    fn materialization_is_stable(cs: CharSet) {
        assert_eq!(cs.to_chars(), cs.to_chars());
        assert_eq!(cs.to_chars().len(), cs.len());
        let codes: Vec<u32> = cs.to_chars().into_iter().map(|c| c as u32).collect();
        assert_eq!(codes, cs.to_code_points());
    }

    #[quickcheck]
    fn singleton_range_covers_exactly_its_char(c: char) {
        let mut cs = CharSet::from_range(c, c).unwrap();
        assert_eq!(cs.len(), 1);
        assert!(cs.contains(c));
        assert_eq!(cs.next(), Some(c));
        assert_eq!(cs.next(), None);
    }

    #[quickcheck]
    fn range_yields_only_valid_scalars(a: char, b: char) {
        let cs = CharSet::from_range(a, b).unwrap();
        for code in cs.to_code_points() {
            assert!(char_from_code_point(code).is_ok());
        }
    }

    #[quickcheck]
    fn range_is_monotone(a: char, b: char) {
        let cs = CharSet::from_range(a, b).unwrap();
        let codes = cs.to_code_points();
        assert_eq!(codes.first(), Some(&(a as u32)));
        assert_eq!(codes.last(), Some(&(b as u32)));
        for pair in codes.windows(2) {
            if a <= b {
                assert!(pair[0] < pair[1]);
            } else {
                assert!(pair[0] > pair[1]);
            }
        }
    }

    #[quickcheck]
    fn range_contains_exactly_its_span(a: char, b: char, probe: char) {
        let cs = CharSet::from_range(a, b).unwrap();
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        assert_eq!(cs.contains(probe), lo <= probe && probe <= hi);
    }

    #[quickcheck]
    fn concat_lengths_add(a: CharSet, b: CharSet) {
        let joined = a.concat_with([Element::from(&b)]).unwrap();
        assert_eq!(joined.len(), a.len() + b.len());
    }

    #[quickcheck]
    fn concat_preserves_order(a: CharSet, b: CharSet) {
        let joined = CharSet::concat([Element::from(&a), Element::from(&b)]).unwrap();
        let mut expected = a.to_chars();
        expected.extend(b.to_chars());
        assert_eq!(joined.to_chars(), expected);
    }
}
