//! Core identity and event types shared across the crate.

/// One of the two competing sides of the match.
///
/// Sides double as channel identities: side `One` is input channel 0,
/// side `Two` is input channel 1. Using a two-variant enum instead of a
/// raw index keeps every per-side table exhaustively matchable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Side {
    /// Side 1 (input channel 0). Serves first after every reset.
    One,
    /// Side 2 (input channel 1).
    Two,
}

impl Side {
    /// Both sides, in channel order.
    pub const ALL: [Side; 2] = [Side::One, Side::Two];

    /// Array index for per-side storage (0 or 1).
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Side::One => 0,
            Side::Two => 1,
        }
    }

    /// The opposing side.
    #[inline]
    pub fn other(self) -> Self {
        match self {
            Side::One => Side::Two,
            Side::Two => Side::One,
        }
    }

    /// Human-facing side number (1 or 2).
    #[inline]
    pub fn number(self) -> u8 {
        match self {
            Side::One => 1,
            Side::Two => 2,
        }
    }

    /// Maps a raw channel index to a side.
    ///
    /// # Errors
    /// Returns [`InvalidChannel`] for anything but 0 or 1. Hosts wiring
    /// pins or key codes to channels should surface this rather than
    /// dropping the sample.
    pub fn from_index(index: usize) -> Result<Self, InvalidChannel> {
        match index {
            0 => Ok(Side::One),
            1 => Ok(Side::Two),
            _ => Err(InvalidChannel { index }),
        }
    }
}

/// A classified button gesture, at most one per physical press-release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonAction {
    /// A press-release with no second click inside the pending window.
    SinglePress,
    /// Two releases on the same channel within the double-click window.
    DoublePress,
    /// The button was held past the long-hold threshold.
    LongHold,
}

/// A channel index that does not map to either side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InvalidChannel {
    /// The rejected index.
    pub index: usize,
}

impl core::fmt::Display for InvalidChannel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "invalid input channel {} (expected 0 or 1)",
            self.index
        )
    }
}

#[cfg(feature = "std")]
impl std::error::Error for InvalidChannel {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sides_index_and_oppose_each_other() {
        assert_eq!(Side::One.index(), 0);
        assert_eq!(Side::Two.index(), 1);
        assert_eq!(Side::One.other(), Side::Two);
        assert_eq!(Side::Two.other(), Side::One);
        assert_eq!(Side::One.number(), 1);
        assert_eq!(Side::Two.number(), 2);
    }

    #[test]
    fn channel_mapping_rejects_out_of_range_indices() {
        assert_eq!(Side::from_index(0), Ok(Side::One));
        assert_eq!(Side::from_index(1), Ok(Side::Two));
        assert_eq!(Side::from_index(2), Err(InvalidChannel { index: 2 }));
        assert_eq!(Side::from_index(usize::MAX), Err(InvalidChannel { index: usize::MAX }));
    }
}
