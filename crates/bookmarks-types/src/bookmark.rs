//! Bookmark types

use thiserror::Error;

/// Lowest accepted rating
pub const MIN_RATING: i64 = 0;

/// Highest accepted rating
pub const MAX_RATING: i64 = 5;

/// A persisted bookmark, exactly as storage returned it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bookmark {
    pub id: i64,
    pub title: String,
    pub url: String,
    pub description: String,
    pub rating: i64,
}

/// Validated input for a bookmark that does not exist yet.
///
/// Storage assigns the `id` on insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBookmark {
    pub title: String,
    pub url: String,
    pub description: String,
    pub rating: Rating,
}

/// Rating in the closed range `[MIN_RATING, MAX_RATING]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Rating(i64);

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("rating {0} is outside 0..=5")]
pub struct RatingError(pub i64);

impl Rating {
    pub fn new(value: i64) -> Result<Self, RatingError> {
        if (MIN_RATING..=MAX_RATING).contains(&value) {
            Ok(Self(value))
        } else {
            Err(RatingError(value))
        }
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for Rating {
    type Error = RatingError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rating> for i64 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_bounds() {
        assert_eq!(Rating::new(0).map(Rating::get), Ok(0));
        assert_eq!(Rating::new(5).map(Rating::get), Ok(5));
        assert_eq!(Rating::new(-1), Err(RatingError(-1)));
        assert_eq!(Rating::new(6), Err(RatingError(6)));
    }

    #[test]
    fn test_rating_error_message() {
        assert_eq!(RatingError(9).to_string(), "rating 9 is outside 0..=5");
    }

    #[test]
    fn test_rating_conversions() {
        assert_eq!(Rating::try_from(4).map(i64::from), Ok(4));
        assert_eq!(Rating::try_from(-3), Err(RatingError(-3)));
        assert_eq!(Rating::new(2).unwrap().to_string(), "2");
    }
}
