// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! Version parsing and comparison for published app releases
//!
//! Versions are dot-delimited sequences of non-negative integers. Parsing is
//! permissive: any component that is not a non-negative whole number (see
//! [`parse_component`]) counts as 0, and missing trailing components are treated as 0 when comparing. There is
//! no semantic-versioning precedence here, so "1.0.0-beta" compares equal to
//! "1.0.0".

use std::cmp::Ordering;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// A single numeric version component of unbounded magnitude
///
/// Stored as a decimal digit string without leading zeros ("0" for zero), so
/// ordering never overflows regardless of how many digits a component has.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Component(String);

impl Component {
    /// The zero component, used for padding and for non-numeric tokens
    #[must_use]
    pub fn zero() -> Self {
        Self("0".to_string())
    }

    fn from_digits(digits: &str) -> Self {
        match digits.trim_start_matches('0') {
            "" => Self::zero(),
            digits => Self(digits.to_string()),
        }
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == "0"
    }

    /// Normalised decimal digits of this component
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Ord for Component {
    fn cmp(&self, other: &Self) -> Ordering {
        // No leading zeros, so more digits means a larger number
        self.0
            .len()
            .cmp(&other.0.len())
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for Component {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Largest decimal exponent accepted in tokens like "1e3"
pub const MAX_EXPONENT: u32 = 308;

/// Parse one dot-separated token into a component
///
/// After trimming surrounding whitespace, a token is numeric when it is one
/// of:
/// - a run of decimal digits with an optional leading `+` ("7", "+7", "007")
/// - the same with a decimal exponent ("1e1", "25E-1", "3e+2") as long as
///   the value is a whole number and the exponent is at most [`MAX_EXPONENT`]
/// - a `0x`, `0o` or `0b` prefixed integer ("0x10", "0o17", "0b101")
///
/// Anything else (empty tokens, negative numbers, fractions, pre-release
/// suffixes like "0-beta") parses as zero.
///
/// # Examples
/// ```
/// use upcheck::version::parse_component;
/// assert_eq!(parse_component("12").as_str(), "12");
/// assert_eq!(parse_component("007").as_str(), "7");
/// assert_eq!(parse_component("+2").as_str(), "2");
/// assert_eq!(parse_component("0x10").as_str(), "16");
/// assert_eq!(parse_component("1e1").as_str(), "10");
/// assert!(parse_component("").is_zero());
/// assert!(parse_component("0-beta").is_zero());
/// ```
#[must_use]
pub fn parse_component(token: &str) -> Component {
    parse_numeric(token.trim()).unwrap_or_else(Component::zero)
}

fn parse_numeric(token: &str) -> Option<Component> {
    for (lower, upper, radix) in [("0x", "0X", 16), ("0o", "0O", 8), ("0b", "0B", 2)] {
        if let Some(rest) = token
            .strip_prefix(lower)
            .or_else(|| token.strip_prefix(upper))
        {
            return parse_radix(rest, radix);
        }
    }

    let unsigned = token.strip_prefix('+').unwrap_or(token);
    let (mantissa, exponent) = match unsigned.split_once(['e', 'E']) {
        Some((mantissa, exponent)) => (mantissa, Some(exponent)),
        None => (unsigned, None),
    };
    if !is_digit_run(mantissa) {
        return None;
    }

    let mut digits = mantissa.trim_start_matches('0').to_string();
    let Some(exponent) = exponent else {
        return Some(Component::from_digits(&digits));
    };

    let (negative, magnitude) = match exponent.as_bytes().first() {
        Some(b'-') => (true, &exponent[1..]),
        Some(b'+') => (false, &exponent[1..]),
        _ => (false, exponent),
    };
    if !is_digit_run(magnitude) {
        return None;
    }
    if digits.is_empty() {
        return Some(Component::zero());
    }

    let shift = magnitude
        .parse::<u32>()
        .ok()
        .filter(|shift| *shift <= MAX_EXPONENT)?;
    let shift = shift as usize;
    if negative {
        // Only whole numbers are components
        let kept = digits.len().checked_sub(shift)?;
        if !digits[kept..].bytes().all(|b| b == b'0') {
            return None;
        }
        digits.truncate(kept);
    } else {
        digits.extend(std::iter::repeat_n('0', shift));
    }
    Some(Component::from_digits(&digits))
}

/// Convert digits in `radix` to a decimal component of any length
fn parse_radix(digits: &str, radix: u32) -> Option<Component> {
    if digits.is_empty() {
        return None;
    }

    // Little-endian decimal digits
    let mut decimal: Vec<u8> = vec![0];
    for c in digits.chars() {
        let mut carry = c.to_digit(radix)?;
        for d in &mut decimal {
            let value = u32::from(*d) * radix + carry;
            *d = (value % 10) as u8;
            carry = value / 10;
        }
        while carry > 0 {
            decimal.push((carry % 10) as u8);
            carry /= 10;
        }
    }

    let text: String = decimal.iter().rev().map(|d| char::from(b'0' + d)).collect();
    Some(Component::from_digits(&text))
}

fn is_digit_run(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// A parsed release version
///
/// Equality and ordering treat missing trailing components as zero, so
/// "1.0" and "1.0.0" are equal.
#[derive(Debug, Clone)]
pub struct Version {
    components: Vec<Component>,
}

impl Version {
    /// Parse a version string permissively; this never fails
    ///
    /// # Examples
    /// ```
    /// use upcheck::version::Version;
    /// assert_eq!(Version::parse("1.2.3").to_string(), "1.2.3");
    /// assert_eq!(Version::parse("1.x.03").to_string(), "1.0.3");
    /// assert_eq!(Version::parse(""), Version::parse("0"));
    /// ```
    #[must_use]
    pub fn parse(version: &str) -> Self {
        Self {
            components: version.split('.').map(parse_component).collect(),
        }
    }

    /// Components as written, without padding
    #[must_use]
    pub fn components(&self) -> &[Component] {
        &self.components
    }
}

impl FromStr for Version {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        let zero = Component::zero();
        let max_len = self.components.len().max(other.components.len());
        for i in 0..max_len {
            let a = self.components.get(i).unwrap_or(&zero);
            let b = other.components.get(i).unwrap_or(&zero);
            match a.cmp(b) {
                Ordering::Equal => {}
                other => return other,
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, component) in self.components.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{component}")?;
        }
        Ok(())
    }
}

/// Compare two version strings component by component
///
/// Both strings are parsed with [`Version::parse`], so malformed input never
/// errors.
///
/// # Examples
/// ```
/// use std::cmp::Ordering;
/// use upcheck::version::compare_versions;
/// assert_eq!(compare_versions("1.2.3", "1.2.4"), Ordering::Less);
/// assert_eq!(compare_versions("1.0", "1.0.0"), Ordering::Equal);
/// ```
#[must_use]
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    Version::parse(a).cmp(&Version::parse(b))
}

/// Compare two version strings, returning -1, 0 or 1
///
/// # Examples
/// ```
/// use upcheck::version::compare;
/// assert_eq!(compare("2.0.0", "1.9.9"), 1);
/// assert_eq!(compare("1.0.0", "1.0.0"), 0);
/// assert_eq!(compare("0.9.5", "1.0.0"), -1);
/// ```
#[must_use]
pub fn compare(a: &str, b: &str) -> i8 {
    match compare_versions(a, b) {
        Ordering::Less => -1,
        Ordering::Equal => 0,
        Ordering::Greater => 1,
    }
}
