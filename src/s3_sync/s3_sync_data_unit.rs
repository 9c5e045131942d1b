use crate::s3_sync::s3_sync_error::S3SyncError;
use std::str::FromStr;
use strum::Display;
use strum::EnumIter;
use strum::EnumString;
use uom::si::f64::Information;
use uom::si::information::byte;
use uom::si::information::gibibyte;
use uom::si::information::kibibyte;
use uom::si::information::mebibyte;

/// Binary unit prefix in front of `iB` in sync output, e.g. the `M` in `12.3 MiB`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Display, EnumString, EnumIter)]
pub enum DataUnit {
    K,
    M,
    G,
}

impl DataUnit {
    /// Parse a unit letter as captured from a progress line.
    ///
    /// # Errors
    ///
    /// Returns [`S3SyncError::InvalidUnit`] for anything other than `K`, `M` or `G`.
    pub fn parse_letter(letter: &str) -> Result<Self, S3SyncError> {
        Self::from_str(letter).map_err(|_| S3SyncError::InvalidUnit {
            unit: letter.to_string(),
        })
    }

    #[must_use]
    pub fn quantity(self, prefix: f64) -> Information {
        match self {
            DataUnit::K => Information::new::<kibibyte>(prefix),
            DataUnit::M => Information::new::<mebibyte>(prefix),
            DataUnit::G => Information::new::<gibibyte>(prefix),
        }
    }

    /// Scale a numeric prefix to a byte count using 1024-based multipliers.
    #[must_use]
    pub fn to_bytes(self, prefix: f64) -> f64 {
        self.quantity(prefix).get::<byte>()
    }

    #[must_use]
    pub fn multiplier(self) -> f64 {
        self.to_bytes(1.0)
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp, reason = "power-of-two scaling is exact")]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn multipliers_are_binary() {
        assert_eq!(DataUnit::K.multiplier(), 1024.0);
        assert_eq!(DataUnit::M.multiplier(), 1024.0 * 1024.0);
        assert_eq!(DataUnit::G.multiplier(), 1024.0 * 1024.0 * 1024.0);
    }

    #[test]
    fn fractional_prefix_scales() {
        assert_eq!(DataUnit::M.to_bytes(12.3), 12.3 * 1_048_576.0);
        assert_eq!(DataUnit::G.to_bytes(100.0), 100.0 * 1_073_741_824.0);
    }

    #[test]
    fn letters_roundtrip_through_display() -> eyre::Result<()> {
        for unit in DataUnit::iter() {
            assert_eq!(DataUnit::parse_letter(&unit.to_string())?, unit);
        }
        Ok(())
    }

    #[test]
    fn unknown_letter_is_invalid_unit() {
        for letter in ["T", "k", "", "MB"] {
            let err = DataUnit::parse_letter(letter).unwrap_err();
            assert!(
                matches!(&err, S3SyncError::InvalidUnit { unit } if unit == letter),
                "unexpected error for '{letter}': {err:?}"
            );
        }
    }
}
