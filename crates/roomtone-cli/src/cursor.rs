//! Band selection cursor.
//!
//! Walks the canonical bands in a fixed cycle. Each step returns a new cursor
//! and touches no other state, so callers decide what to render for it.

use roomtone_analysis::Band;

/// Position in the Low → Mid → High → Low cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BandCursor {
    band: Band,
}

impl BandCursor {
    /// Cursor positioned on `band`.
    pub fn new(band: Band) -> Self {
        Self { band }
    }

    /// Band under the cursor.
    pub fn band(self) -> Band {
        self.band
    }

    /// Cursor on the following band, wrapping from High back to Low.
    #[must_use]
    pub fn next(self) -> Self {
        let band = match self.band {
            Band::Low => Band::Mid,
            Band::Mid => Band::High,
            Band::High => Band::Low,
        };
        Self { band }
    }

    /// One full cycle starting at the cursor's band.
    pub fn cycle(self) -> impl Iterator<Item = Band> {
        std::iter::successors(Some(self), |c| Some(c.next()))
            .take(Band::ALL.len())
            .map(BandCursor::band)
    }
}

impl Default for BandCursor {
    fn default() -> Self {
        Self::new(Band::Low)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_cycles_through_all_bands() {
        let c = BandCursor::default();
        assert_eq!(c.band(), Band::Low);
        assert_eq!(c.next().band(), Band::Mid);
        assert_eq!(c.next().next().band(), Band::High);
        assert_eq!(c.next().next().next(), c);
    }

    #[test]
    fn next_does_not_mutate() {
        let c = BandCursor::new(Band::High);
        let _ = c.next();
        assert_eq!(c.band(), Band::High);
    }

    #[test]
    fn cycle_visits_each_band_once() {
        let from_mid: Vec<_> = BandCursor::new(Band::Mid).cycle().collect();
        assert_eq!(from_mid, vec![Band::Mid, Band::High, Band::Low]);

        let from_low: Vec<_> = BandCursor::default().cycle().collect();
        assert_eq!(from_low, Band::ALL.to_vec());
    }
}
