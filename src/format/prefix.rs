use num_bigint::BigUint;
use std::fmt;
use std::sync::LazyLock;

/// Binary prefix tiers, smallest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BinaryPrefix {
    /// Plain bytes (below 1024)
    Bi,
    Ki,
    Mi,
    Gi,
    Ti,
    Pi,
    Ei,
    Zi,
    /// Everything from 1024^8 upwards
    Yi,
}

impl BinaryPrefix {
    pub const ALL: [BinaryPrefix; 9] = [
        BinaryPrefix::Bi,
        BinaryPrefix::Ki,
        BinaryPrefix::Mi,
        BinaryPrefix::Gi,
        BinaryPrefix::Ti,
        BinaryPrefix::Pi,
        BinaryPrefix::Ei,
        BinaryPrefix::Zi,
        BinaryPrefix::Yi,
    ];

    /// Power of 1024 this tier scales by.
    pub fn exponent(self) -> u32 {
        self as u32
    }
}

impl fmt::Display for BinaryPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BinaryPrefix::Bi => write!(f, "Bi"),
            BinaryPrefix::Ki => write!(f, "Ki"),
            BinaryPrefix::Mi => write!(f, "Mi"),
            BinaryPrefix::Gi => write!(f, "Gi"),
            BinaryPrefix::Ti => write!(f, "Ti"),
            BinaryPrefix::Pi => write!(f, "Pi"),
            BinaryPrefix::Ei => write!(f, "Ei"),
            BinaryPrefix::Zi => write!(f, "Zi"),
            BinaryPrefix::Yi => write!(f, "Yi"),
        }
    }
}

/// Tier boundaries 1024^1 through 1024^8.
#[derive(Debug)]
pub struct PrefixTable {
    thresholds: [BigUint; 8],
}

static PREFIX_TABLE: LazyLock<PrefixTable> = LazyLock::new(PrefixTable::build);

impl PrefixTable {
    /// Process-wide table, built on first use and never mutated.
    pub fn get() -> &'static PrefixTable {
        &PREFIX_TABLE
    }

    fn build() -> Self {
        let base = BigUint::from(1024u32);
        Self {
            thresholds: std::array::from_fn(|i| base.pow(i as u32 + 1)),
        }
    }

    pub fn thresholds(&self) -> &[BigUint; 8] {
        &self.thresholds
    }

    /// Picks the tier for `value`: the first tier whose upper threshold is
    /// strictly greater than the value, or `Yi` past the last threshold.
    pub fn select(&self, value: &BigUint) -> BinaryPrefix {
        let index = self
            .thresholds
            .iter()
            .position(|threshold| threshold > value)
            .unwrap_or(self.thresholds.len());
        BinaryPrefix::ALL[index]
    }

    /// Size of one unit of `prefix`, `None` for plain bytes.
    pub fn unit(&self, prefix: BinaryPrefix) -> Option<&BigUint> {
        match prefix.exponent() {
            0 => None,
            n => self.thresholds.get(n as usize - 1),
        }
    }
}
