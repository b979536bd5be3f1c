//! QAA quality flags
//!
//! Each flag marks a physically implausible intermediate value that the algorithm repaired
//! locally. Bit values match the NASA OCSSW convention so flag rasters stay comparable.

use serde::Serialize;
use std::fmt;
use std::ops::BitOr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QaaFlag {
    /// Reference particulate backscattering was negative and was set to 0.001
    UnderflowBbp,
    /// Denominator of the adg decomposition was (near) zero
    NearSingular,
    /// aph/a at 443 nm fell outside [0.15, 0.6]; adg and aph were recomputed
    BadProportion,
    /// Phytoplankton absorption was negative in at least one band
    NegativeAph,
    /// Chlorophyll could not be derived
    ChlaUndefined,
}

impl QaaFlag {
    pub const ALL: [QaaFlag; 5] = [
        QaaFlag::UnderflowBbp,
        QaaFlag::NearSingular,
        QaaFlag::BadProportion,
        QaaFlag::NegativeAph,
        QaaFlag::ChlaUndefined,
    ];

    pub const fn bit(self) -> u8 {
        match self {
            QaaFlag::UnderflowBbp => 0x02,
            QaaFlag::NearSingular => 0x04,
            QaaFlag::BadProportion => 0x08,
            QaaFlag::NegativeAph => 0x10,
            QaaFlag::ChlaUndefined => 0x20,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            QaaFlag::UnderflowBbp => "Negative particulate backscattering detected",
            QaaFlag::NearSingular => "Absorption decomposition error (division by zero)",
            QaaFlag::BadProportion => "aph/a ratio correction applied at 443nm",
            QaaFlag::NegativeAph => "Negative phytoplankton absorption values corrected",
            QaaFlag::ChlaUndefined => "Chlorophyll calculation error",
        }
    }
}

impl fmt::Display for QaaFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Set of [`QaaFlag`]s raised during one run. Bits are only ever added.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct QaaFlags(u8);

impl QaaFlags {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn bits(&self) -> u8 {
        self.0
    }

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub const fn contains(&self, flag: QaaFlag) -> bool {
        self.0 & flag.bit() != 0
    }

    pub(crate) fn insert(&mut self, flag: QaaFlag) {
        self.0 |= flag.bit();
    }

    /// Raised flags in bit order
    pub fn iter(&self) -> impl Iterator<Item = QaaFlag> + '_ {
        QaaFlag::ALL.into_iter().filter(|flag| self.contains(*flag))
    }
}

impl From<QaaFlag> for QaaFlags {
    fn from(flag: QaaFlag) -> Self {
        Self(flag.bit())
    }
}

impl BitOr for QaaFlag {
    type Output = QaaFlags;

    fn bitor(self, rhs: QaaFlag) -> QaaFlags {
        QaaFlags(self.bit() | rhs.bit())
    }
}

impl BitOr<QaaFlag> for QaaFlags {
    type Output = QaaFlags;

    fn bitor(self, rhs: QaaFlag) -> QaaFlags {
        QaaFlags(self.0 | rhs.bit())
    }
}

impl fmt::Display for QaaFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#04x}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bits_are_distinct() {
        let all = QaaFlag::ALL.iter().fold(0u8, |acc, f| {
            assert_eq!(acc & f.bit(), 0);
            acc | f.bit()
        });
        assert_eq!(all, 0x3e);
    }

    #[test]
    fn test_insert_accumulates() {
        let mut flags = QaaFlags::empty();
        assert!(flags.is_empty());

        flags.insert(QaaFlag::BadProportion);
        flags.insert(QaaFlag::NegativeAph);
        flags.insert(QaaFlag::BadProportion);

        assert_eq!(flags.bits(), 0x18);
        assert_eq!(flags, QaaFlag::BadProportion | QaaFlag::NegativeAph);
        assert!(!flags.contains(QaaFlag::UnderflowBbp));
        assert_eq!(
            flags.iter().collect::<Vec<_>>(),
            vec![QaaFlag::BadProportion, QaaFlag::NegativeAph]
        );
    }

    #[test]
    fn test_display() {
        let flags = QaaFlags::from(QaaFlag::UnderflowBbp) | QaaFlag::ChlaUndefined;
        assert_eq!(flags.to_string(), "0x22");
        assert_eq!(serde_json::to_string(&flags).unwrap(), "34");
    }
}
