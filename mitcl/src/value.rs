//! The Value Type
//!
//! Every Mitcl value is a string: script words, variable values, command results, and
//! procedure bodies alike.  A [`Value`] is an immutable, reference-counted string, so that
//! cloning one (as happens whenever a variable is read or a result is substituted) doesn't
//! copy its text.
//!
//! Numeric commands interpret their arguments with [`Value::as_int`], which follows the C
//! `strtol` conventions: an optional sign, then a `0x` prefix for hexadecimal, a leading
//! `0` for octal, or decimal digits.  Text that isn't a number is read as `0`.
//!
//! ```
//! use mitcl::Value;
//!
//! assert_eq!(Value::from("42").as_int(), 42);
//! assert_eq!(Value::from("0x1F").as_int(), 31);
//! assert_eq!(Value::from("-010").as_int(), -8);
//! assert_eq!(Value::from("howdy").as_int(), 0);
//! ```

use crate::types::MiInt;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::string::ToString as _;
use core::fmt;

/// The Mitcl value type.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Value(Rc<str>);

impl Value {
    /// Returns the empty value.
    pub fn empty() -> Self {
        Self(Rc::from(""))
    }

    /// Returns the value's text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Is this the empty string?
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Interprets the value as an integer, using the rules described in the
    /// [module documentation](index.html).
    pub fn as_int(&self) -> MiInt {
        parse_int(&self.0)
    }

    /// Interprets the value as a condition: any non-zero integer is true; the empty
    /// string and non-numeric text are false.
    ///
    /// ```
    /// use mitcl::Value;
    ///
    /// assert!(Value::from("1").is_true());
    /// assert!(Value::from("-5").is_true());
    /// assert!(!Value::from("0").is_true());
    /// assert!(!Value::from("").is_true());
    /// ```
    pub fn is_true(&self) -> bool {
        self.as_int() != 0
    }

    /// Joins the values with single spaces.
    pub fn join(values: &[Value]) -> Value {
        let mut text = String::new();

        for (i, value) in values.iter().enumerate() {
            if i > 0 {
                text.push(' ');
            }
            text.push_str(value.as_str());
        }

        Value::from(text)
    }
}

impl Default for Value {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Value[{:?}]", &*self.0)
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Self(Rc::from(text))
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Self(Rc::from(text))
    }
}

impl From<&String> for Value {
    fn from(text: &String) -> Self {
        Self(Rc::from(text.as_str()))
    }
}

impl From<MiInt> for Value {
    fn from(int: MiInt) -> Self {
        Self::from(int.to_string())
    }
}

impl From<bool> for Value {
    /// Converts a flag the way the comparison commands report it: `"1"` or `""`.
    fn from(flag: bool) -> Self {
        if flag {
            Self::from("1")
        } else {
            Self::empty()
        }
    }
}

/// Parses an integer the way C's `strtol(text, NULL, 0)` does.  Parsing stops at the first
/// character that can't continue the number; out-of-range values saturate.
fn parse_int(text: &str) -> MiInt {
    let text = text.trim_start();

    let (negative, rest) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let (radix, digits) = if is_hex_prefixed(rest) {
        (16, &rest[2..])
    } else if rest.starts_with('0') {
        (8, rest)
    } else {
        (10, rest)
    };

    let mut magnitude: MiInt = 0;

    for ch in digits.chars() {
        let Some(digit) = ch.to_digit(radix) else {
            break;
        };

        match magnitude
            .checked_mul(radix as MiInt)
            .and_then(|m| m.checked_add(digit as MiInt))
        {
            Some(m) => magnitude = m,
            None if negative => return MiInt::MIN,
            None => return MiInt::MAX,
        }
    }

    if negative {
        -magnitude
    } else {
        magnitude
    }
}

fn is_hex_prefixed(text: &str) -> bool {
    let bytes = text.as_bytes();

    bytes.len() > 2
        && bytes[0] == b'0'
        && (bytes[1] == b'x' || bytes[1] == b'X')
        && bytes[2].is_ascii_hexdigit()
}
