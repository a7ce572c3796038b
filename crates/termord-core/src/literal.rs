//! Leaf payloads for the expression language.
//!
//! Every payload must be `Ord + Hash` to live inside an e-graph node, and
//! must round-trip through its s-expression token so rules can be written
//! as text.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// An unsigned integer literal, written with a `u` suffix (`7u`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UIntImm(pub u64);

impl FromStr for UIntImm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_suffix('u')
            .ok_or_else(|| format!("unsigned literal needs a `u` suffix: {s}"))?;
        digits
            .parse()
            .map(UIntImm)
            .map_err(|e| format!("bad unsigned literal {s}: {e}"))
    }
}

impl fmt::Display for UIntImm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}u", self.0)
    }
}

/// A floating-point literal.
///
/// Stored as raw bits so that equality and hashing are structural. The
/// textual form always contains a `.` which keeps it apart from integer
/// literals and from variables such as `inf`.
#[derive(Clone, Copy)]
pub struct FloatImm(u64);

impl FloatImm {
    /// Creates a literal from a value.
    #[must_use]
    pub fn new(value: f64) -> Self {
        Self(value.to_bits())
    }

    /// Returns the literal's value.
    #[must_use]
    pub fn value(self) -> f64 {
        f64::from_bits(self.0)
    }
}

impl PartialEq for FloatImm {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for FloatImm {}

impl Hash for FloatImm {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl PartialOrd for FloatImm {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatImm {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value().total_cmp(&other.value())
    }
}

impl fmt::Debug for FloatImm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FloatImm({self})")
    }
}

impl FromStr for FloatImm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !s.contains('.') {
            return Err(format!("float literal needs a decimal point: {s}"));
        }
        s.parse::<f64>()
            .map(FloatImm::new)
            .map_err(|e| format!("bad float literal {s}: {e}"))
    }
}

impl fmt::Display for FloatImm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = self.value();
        if v.is_finite() && v.fract() == 0.0 {
            write!(f, "{v:.1}")
        } else {
            write!(f, "{v}")
        }
    }
}

/// The target type of a `cast` node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ScalarType {
    /// Signed integer with the given bit width.
    Int(u8),
    /// Unsigned integer with the given bit width. `UInt(1)` is `bool`.
    UInt(u8),
    /// Floating point with the given bit width.
    Float(u8),
}

impl ScalarType {
    /// The boolean type.
    pub const BOOL: ScalarType = ScalarType::UInt(1);

    /// Returns the bit width.
    #[must_use]
    pub const fn bits(self) -> u8 {
        match self {
            ScalarType::Int(b) | ScalarType::UInt(b) | ScalarType::Float(b) => b,
        }
    }
}

impl FromStr for ScalarType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "bool" {
            return Ok(ScalarType::BOOL);
        }
        let mut chars = s.chars();
        let class = chars.next().ok_or("empty type name")?;
        let bits: u8 = chars
            .as_str()
            .parse()
            .map_err(|_| format!("not a scalar type: {s}"))?;
        match (class, bits) {
            ('i', 8 | 16 | 32 | 64) => Ok(ScalarType::Int(bits)),
            ('u', 1 | 8 | 16 | 32 | 64) => Ok(ScalarType::UInt(bits)),
            ('f', 16 | 32 | 64) => Ok(ScalarType::Float(bits)),
            _ => Err(format!("not a scalar type: {s}")),
        }
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            ScalarType::BOOL => f.write_str("bool"),
            ScalarType::Int(b) => write!(f, "i{b}"),
            ScalarType::UInt(b) => write!(f, "u{b}"),
            ScalarType::Float(b) => write!(f, "f{b}"),
        }
    }
}
