use std::fmt;

/// Star rating of a single review (1 to 5).
#[derive(Debug, Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Hash)]
pub struct RatingValue(u8);

impl RatingValue {
    pub const fn min() -> Self {
        Self(1)
    }

    pub const fn max() -> Self {
        Self(5)
    }

    pub fn new<I: Into<u8>>(val: I) -> Self {
        let new = Self(val.into());
        debug_assert!(new.is_valid());
        new
    }

    pub fn is_valid(self) -> bool {
        self >= Self::min() && self <= Self::max()
    }

    pub const fn to_u8(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for RatingValue {
    type Error = i64;
    fn try_from(from: i64) -> Result<Self, Self::Error> {
        u8::try_from(from)
            .ok()
            .map(Self)
            .filter(|v| v.is_valid())
            .ok_or(from)
    }
}

impl From<RatingValue> for f64 {
    fn from(from: RatingValue) -> Self {
        f64::from(from.0)
    }
}

impl fmt::Display for RatingValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Aggregated rating of a restaurant between 0.0 and 5.0.
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd)]
pub struct AvgRating(f64);

impl AvgRating {
    pub const fn min() -> Self {
        Self(0.0)
    }

    pub const fn max() -> Self {
        Self(5.0)
    }

    #[must_use]
    pub fn clamp(self) -> Self {
        Self(self.0.clamp(Self::min().0, Self::max().0))
    }

    pub fn is_valid(self) -> bool {
        self >= Self::min() && self <= Self::max()
    }

    /// Rounded to a single decimal place for display and storage.
    #[must_use]
    pub fn rounded(self) -> Self {
        Self((self.0 * 10.0).round() / 10.0)
    }
}

impl From<f64> for AvgRating {
    fn from(from: f64) -> Self {
        Self(from)
    }
}

impl From<AvgRating> for f64 {
    fn from(from: AvgRating) -> Self {
        from.0
    }
}

impl fmt::Display for AvgRating {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}

/// Accumulates individual ratings into an average.
#[derive(Debug, Default, Clone, Copy)]
pub struct AvgRatingBuilder {
    total: f64,
    count: u32,
}

impl AvgRatingBuilder {
    pub fn add(&mut self, value: RatingValue) {
        debug_assert!(value.is_valid());
        self.total += f64::from(value);
        self.count += 1;
    }

    pub const fn count(&self) -> u32 {
        self.count
    }

    /// `None` if nothing has been added.
    pub fn build(self) -> Option<AvgRating> {
        if self.count == 0 {
            return None;
        }
        Some(AvgRating::from(self.total / f64::from(self.count)).clamp().rounded())
    }
}

impl Extend<RatingValue> for AvgRatingBuilder {
    fn extend<T: IntoIterator<Item = RatingValue>>(&mut self, iter: T) {
        for value in iter {
            self.add(value);
        }
    }
}
