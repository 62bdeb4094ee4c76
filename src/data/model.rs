use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Season / Medal – the two enumerated columns
// ---------------------------------------------------------------------------

/// Olympic season of a Games edition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Season {
    Summer,
    Winter,
}

impl Season {
    pub const ALL: [Season; 2] = [Season::Summer, Season::Winter];

    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Summer => "Summer",
            Season::Winter => "Winter",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Season {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Summer" => Ok(Season::Summer),
            "Winter" => Ok(Season::Winter),
            other => Err(format!("unknown season '{other}'")),
        }
    }
}

/// Medal awarded for a participation row.
///
/// Variant order is podium order, so sorting puts Gold first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Medal {
    Gold,
    Silver,
    Bronze,
}

impl Medal {
    pub const ALL: [Medal; 3] = [Medal::Gold, Medal::Silver, Medal::Bronze];

    pub fn as_str(&self) -> &'static str {
        match self {
            Medal::Gold => "Gold",
            Medal::Silver => "Silver",
            Medal::Bronze => "Bronze",
        }
    }

    /// Parse a Medal cell. `NA` and blank cells mean "no medal".
    pub fn parse_cell(cell: &str) -> Result<Option<Medal>, String> {
        match cell.trim() {
            "" | "NA" | "NaN" => Ok(None),
            other => other.parse().map(Some),
        }
    }
}

impl fmt::Display for Medal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Medal {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Gold" => Ok(Medal::Gold),
            "Silver" => Ok(Medal::Silver),
            "Bronze" => Ok(Medal::Bronze),
            other => Err(format!("unknown medal '{other}'")),
        }
    }
}

// ---------------------------------------------------------------------------
// ResultRow – one row of the results file
// ---------------------------------------------------------------------------

/// One athlete's participation in one event at one Games.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRow {
    pub year: i32,
    pub season: Season,
    /// Country / NOC label exactly as recorded; compared by exact string.
    pub team: String,
    pub sport: String,
    pub event: String,
    pub medal: Option<Medal>,
}

impl ResultRow {
    pub fn new(
        year: i32,
        season: Season,
        team: &str,
        sport: &str,
        event: &str,
        medal: Option<Medal>,
    ) -> Self {
        Self {
            year,
            season,
            team: team.to_string(),
            sport: sport.to_string(),
            event: event.to_string(),
            medal,
        }
    }

    pub fn has_medal(&self) -> bool {
        self.medal.is_some()
    }
}

// ---------------------------------------------------------------------------
// MedalTable – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed distinct years and teams.
///
/// Immutable once built: the loader shares it behind an `Arc` and every
/// filter or aggregate produces new values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MedalTable {
    rows: Vec<ResultRow>,
    years: BTreeSet<i32>,
    teams: BTreeSet<String>,
}

impl MedalTable {
    /// Build the column indices from the loaded rows.
    pub fn from_rows(rows: Vec<ResultRow>) -> Self {
        let years = rows.iter().map(|r| r.year).collect();
        let teams = rows.iter().map(|r| r.team.clone()).collect();
        MedalTable { rows, years, teams }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// All rows, in file order.
    pub fn rows(&self) -> &[ResultRow] {
        &self.rows
    }

    /// Sorted distinct years present in the table.
    pub fn years(&self) -> &BTreeSet<i32> {
        &self.years
    }

    /// Sorted distinct team labels present in the table.
    pub fn teams(&self) -> &BTreeSet<String> {
        &self.teams
    }

    /// Distinct years, optionally restricted to Games of one season.
    pub fn available_years(&self, season: Option<Season>) -> BTreeSet<i32> {
        match season {
            None => self.years.clone(),
            Some(season) => self
                .rows
                .iter()
                .filter(|r| r.season == season)
                .map(|r| r.year)
                .collect(),
        }
    }

    /// First and last year in the table.
    pub fn year_bounds(&self) -> Option<(i32, i32)> {
        Some((*self.years.first()?, *self.years.last()?))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl FromIterator<ResultRow> for MedalTable {
    fn from_iter<I: IntoIterator<Item = ResultRow>>(iter: I) -> Self {
        MedalTable::from_rows(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn medal_cell_parsing_treats_na_and_blank_as_none() {
        assert_eq!(Medal::parse_cell("NA"), Ok(None));
        assert_eq!(Medal::parse_cell("  "), Ok(None));
        assert_eq!(Medal::parse_cell("Gold"), Ok(Some(Medal::Gold)));
        assert!(Medal::parse_cell("Platinum").is_err());
    }

    #[test]
    fn season_is_case_sensitive() {
        assert_eq!("Winter".parse::<Season>(), Ok(Season::Winter));
        assert!("winter".parse::<Season>().is_err());
    }

    #[test]
    fn medals_sort_in_podium_order() {
        let mut medals = vec![Medal::Bronze, Medal::Gold, Medal::Silver];
        medals.sort();
        assert_eq!(medals, Medal::ALL.to_vec());
    }

    #[test]
    fn table_indexes_years_and_teams() {
        let table = MedalTable::from_rows(vec![
            ResultRow::new(2002, Season::Winter, "Norway", "Biathlon", "20km", None),
            ResultRow::new(2000, Season::Summer, "USA", "Swimming", "100m", Some(Medal::Gold)),
            ResultRow::new(2000, Season::Summer, "Norway", "Rowing", "Single", None),
        ]);

        assert_eq!(table.len(), 3);
        assert_eq!(table.years().iter().copied().collect::<Vec<_>>(), vec![2000, 2002]);
        assert_eq!(
            table.teams().iter().cloned().collect::<Vec<_>>(),
            vec!["Norway".to_string(), "USA".to_string()]
        );
        assert_eq!(table.year_bounds(), Some((2000, 2002)));
        assert_eq!(
            table.available_years(Some(Season::Winter)).into_iter().collect::<Vec<_>>(),
            vec![2002]
        );
    }

    #[test]
    fn empty_table_has_no_bounds() {
        let table = MedalTable::empty();
        assert!(table.is_empty());
        assert_eq!(table.year_bounds(), None);
    }
}
