use super::model::{Medal, MedalTable, ResultRow, Season};

// ---------------------------------------------------------------------------
// Filter predicate: optional equality constraints on three columns
// ---------------------------------------------------------------------------

/// Equality predicates on Year, Season and Medal.
/// A `None` field means "no filter" for that column; present fields are ANDed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MedalFilter {
    pub year: Option<i32>,
    pub season: Option<Season>,
    pub medal: Option<Medal>,
}

impl MedalFilter {
    pub fn new(year: Option<i32>, season: Option<Season>, medal: Option<Medal>) -> Self {
        Self { year, season, medal }
    }

    /// Whether no predicate is active.
    pub fn is_unfiltered(&self) -> bool {
        self.year.is_none() && self.season.is_none() && self.medal.is_none()
    }

    /// A row passes when every present predicate equals its column.
    /// Rows without a medal never pass a medal predicate.
    pub fn matches(&self, row: &ResultRow) -> bool {
        self.year.map_or(true, |y| row.year == y)
            && self.season.map_or(true, |s| row.season == s)
            && self.medal.map_or(true, |m| row.medal == Some(m))
    }
}

/// Return the rows of `table` that pass `filter`, in input order.
///
/// The input is left untouched; an unfiltered request returns an equal copy.
pub fn filter_table(table: &MedalTable, filter: &MedalFilter) -> MedalTable {
    if filter.is_unfiltered() {
        return table.clone();
    }
    table
        .rows()
        .iter()
        .filter(|row| filter.matches(row))
        .cloned()
        .collect()
}

/// Convenience form taking the three optional predicates directly.
pub fn filter(
    table: &MedalTable,
    year: Option<i32>,
    season: Option<Season>,
    medal: Option<Medal>,
) -> MedalTable {
    filter_table(table, &MedalFilter::new(year, season, medal))
}
