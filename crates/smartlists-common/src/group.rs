//! Grouping of playlist results.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Attribute that playlist results are grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupBy {
    Sets,
    Genres,
    Years,
    Actors,
    Directors,
    Writers,
    Studios,
    Countries,
    Artists,
    Albums,
    Tags,
}

impl GroupBy {
    pub const ALL: [GroupBy; 11] = [
        GroupBy::Sets,
        GroupBy::Genres,
        GroupBy::Years,
        GroupBy::Actors,
        GroupBy::Directors,
        GroupBy::Writers,
        GroupBy::Studios,
        GroupBy::Countries,
        GroupBy::Artists,
        GroupBy::Albums,
        GroupBy::Tags,
    ];

    /// Wire name used in serialized documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sets => "sets",
            Self::Genres => "genres",
            Self::Years => "years",
            Self::Actors => "actors",
            Self::Directors => "directors",
            Self::Writers => "writers",
            Self::Studios => "studios",
            Self::Countries => "countries",
            Self::Artists => "artists",
            Self::Albums => "albums",
            Self::Tags => "tags",
        }
    }

    /// English display label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Sets => "Movie sets",
            Self::Genres => "Genres",
            Self::Years => "Years",
            Self::Actors => "Actors",
            Self::Directors => "Directors",
            Self::Writers => "Writers",
            Self::Studios => "Studios",
            Self::Countries => "Countries",
            Self::Artists => "Artists",
            Self::Albums => "Albums",
            Self::Tags => "Tags",
        }
    }

    /// Whether grouped entries may be shown alongside ungrouped ones.
    ///
    /// Only movie sets support mixing: a set collapses its members while
    /// movies outside any set stay listed individually.
    pub fn can_mix(&self) -> bool {
        matches!(self, Self::Sets)
    }
}

impl fmt::Display for GroupBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GroupBy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        GroupBy::ALL
            .into_iter()
            .find(|g| g.as_str() == lower)
            .ok_or_else(|| Error::malformed(format!("unknown group '{s}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for group in GroupBy::ALL {
            assert_eq!(group.as_str().parse::<GroupBy>().unwrap(), group);
        }
        assert!("moods".parse::<GroupBy>().is_err());
    }

    #[test]
    fn only_sets_can_mix() {
        let mixable: Vec<_> = GroupBy::ALL.into_iter().filter(GroupBy::can_mix).collect();
        assert_eq!(mixable, vec![GroupBy::Sets]);
    }
}
