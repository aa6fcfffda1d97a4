use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The season a request asks for.
///
/// Year `0` is the "nothing selected" sentinel the season picker sends before a
/// choice is made; it is treated the same as an absent year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeasonSelector {
    Unset,
    Year(i32),
}

impl SeasonSelector {
    /// Parses the optional `year` query value.
    pub fn from_query(year: Option<i32>) -> Result<Self, CoreError> {
        match year {
            None | Some(0) => Ok(SeasonSelector::Unset),
            Some(y) if y < 0 => Err(CoreError::InvalidSelector(y)),
            Some(y) => Ok(SeasonSelector::Year(y)),
        }
    }

    /// Returns the selected year, if any.
    pub fn year(&self) -> Option<i32> {
        match self {
            SeasonSelector::Unset => None,
            SeasonSelector::Year(y) => Some(*y),
        }
    }

    pub fn is_unset(&self) -> bool {
        matches!(self, SeasonSelector::Unset)
    }
}

impl fmt::Display for SeasonSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeasonSelector::Unset => write!(f, "unset"),
            SeasonSelector::Year(y) => write!(f, "{}", y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_and_zero_are_unset() {
        assert_eq!(SeasonSelector::from_query(None), Ok(SeasonSelector::Unset));
        assert_eq!(SeasonSelector::from_query(Some(0)), Ok(SeasonSelector::Unset));
        assert!(SeasonSelector::Unset.is_unset());
        assert_eq!(SeasonSelector::Unset.year(), None);
    }

    #[test]
    fn positive_year_is_selected() {
        let selector = SeasonSelector::from_query(Some(2021)).unwrap();
        assert_eq!(selector, SeasonSelector::Year(2021));
        assert_eq!(selector.year(), Some(2021));
        assert_eq!(selector.to_string(), "2021");
    }

    #[test]
    fn negative_year_is_rejected() {
        assert_eq!(
            SeasonSelector::from_query(Some(-1)),
            Err(CoreError::InvalidSelector(-1))
        );
    }
}
