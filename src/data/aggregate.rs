use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;

use thiserror::Error;

use super::model::{Medal, MedalTable, ResultRow, Season};

/// Number of sports shown in a country summary.
pub const DEFAULT_TOP_SPORTS: usize = 3;

// ---------------------------------------------------------------------------
// Query arguments and errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("Invalid year range: start {start} is after end {end}")]
    InvalidRange { start: i32, end: i32 },

    #[error("No results for {team} in {range}")]
    TeamNotFound { team: String, range: YearRange },
}

/// Inclusive span of Games years. Construction rejects `start > end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    start: i32,
    end: i32,
}

impl YearRange {
    pub fn new(start: i32, end: i32) -> Result<Self, QueryError> {
        if start > end {
            return Err(QueryError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> i32 {
        self.start
    }

    pub fn end(&self) -> i32 {
        self.end
    }

    pub fn contains(&self, year: i32) -> bool {
        (self.start..=self.end).contains(&year)
    }
}

impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}–{}", self.start, self.end)
    }
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Medals won in one sport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SportTotal {
    pub sport: String,
    pub medals: usize,
}

/// Participation counts for one year, split by season.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeasonCounts {
    pub year: i32,
    pub winter: usize,
    pub summer: usize,
}

/// Medal tally for one team.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamStanding {
    pub team: String,
    pub gold: usize,
    pub silver: usize,
    pub bronze: usize,
}

impl TeamStanding {
    fn new(team: &str) -> Self {
        Self {
            team: team.to_string(),
            gold: 0,
            silver: 0,
            bronze: 0,
        }
    }

    pub fn total(&self) -> usize {
        self.gold + self.silver + self.bronze
    }

    pub fn count(&self, medal: Medal) -> usize {
        match medal {
            Medal::Gold => self.gold,
            Medal::Silver => self.silver,
            Medal::Bronze => self.bronze,
        }
    }

    fn add(&mut self, medal: Medal) {
        match medal {
            Medal::Gold => self.gold += 1,
            Medal::Silver => self.silver += 1,
            Medal::Bronze => self.bronze += 1,
        }
    }
}

// ---------------------------------------------------------------------------
// Aggregations
// ---------------------------------------------------------------------------

fn team_rows<'a>(
    table: &'a MedalTable,
    team: &'a str,
    range: YearRange,
) -> impl Iterator<Item = &'a ResultRow> + 'a {
    table
        .rows()
        .iter()
        .filter(move |r| r.team == team && range.contains(r.year))
}

/// Medals won by `team` within `range`.
pub fn total_medal_count(table: &MedalTable, team: &str, range: YearRange) -> usize {
    team_rows(table, team, range).filter(|r| r.has_medal()).count()
}

/// Dense rank of `team` by medal count among all teams with rows in `range`.
///
/// Teams that competed without winning still take part in the ranking with
/// a count of zero. Fails when `team` has no rows in the range.
pub fn medal_rank(table: &MedalTable, range: YearRange, team: &str) -> Result<u32, QueryError> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for row in table.rows().iter().filter(|r| range.contains(r.year)) {
        *counts.entry(row.team.as_str()).or_insert(0) += usize::from(row.has_medal());
    }

    let own = counts.get(team).copied().ok_or_else(|| QueryError::TeamNotFound {
        team: team.to_string(),
        range,
    })?;

    // Rank = 1 + number of distinct counts strictly above ours.
    let above: BTreeSet<usize> = counts.values().copied().filter(|&c| c > own).collect();
    Ok(above.len() as u32 + 1)
}

/// The `n` sports in which `team` won the most medals within `range`.
///
/// Sorted by medal total descending, ties by sport name. Returns fewer than
/// `n` entries when the team medalled in fewer sports.
pub fn top_sports(table: &MedalTable, team: &str, range: YearRange, n: usize) -> Vec<SportTotal> {
    // Per (event, sport, year) first so team events are counted at the
    // grain of the source rows, then rolled up per sport.
    let mut per_event: BTreeMap<(&str, &str, i32), usize> = BTreeMap::new();
    for row in team_rows(table, team, range).filter(|r| r.has_medal()) {
        *per_event
            .entry((row.event.as_str(), row.sport.as_str(), row.year))
            .or_insert(0) += 1;
    }

    let mut per_sport: BTreeMap<&str, usize> = BTreeMap::new();
    for ((_, sport, _), count) in per_event {
        *per_sport.entry(sport).or_insert(0) += count;
    }

    let mut totals: Vec<SportTotal> = per_sport
        .into_iter()
        .map(|(sport, medals)| SportTotal {
            sport: sport.to_string(),
            medals,
        })
        .collect();
    totals.sort_by(|a, b| b.medals.cmp(&a.medals).then_with(|| a.sport.cmp(&b.sport)));
    totals.truncate(n);
    totals
}

/// Rows per year for `team` within `range`, pivoted into winter and summer
/// columns. Years with no rows in either season are omitted.
pub fn medals_over_time(table: &MedalTable, team: &str, range: YearRange) -> Vec<SeasonCounts> {
    let mut by_year: BTreeMap<i32, SeasonCounts> = BTreeMap::new();
    for row in team_rows(table, team, range) {
        let entry = by_year.entry(row.year).or_insert(SeasonCounts {
            year: row.year,
            winter: 0,
            summer: 0,
        });
        match row.season {
            Season::Winter => entry.winter += 1,
            Season::Summer => entry.summer += 1,
        }
    }

    by_year
        .into_values()
        .filter(|c| c.winter > 0 || c.summer > 0)
        .collect()
}

/// Gold/silver/bronze tallies per team over an already filtered table,
/// keeping the `n` teams with the most medals (ties by team name).
pub fn medal_standings(table: &MedalTable, n: usize) -> Vec<TeamStanding> {
    let mut by_team: BTreeMap<&str, TeamStanding> = BTreeMap::new();
    for row in table.rows() {
        if let Some(medal) = row.medal {
            by_team
                .entry(row.team.as_str())
                .or_insert_with(|| TeamStanding::new(&row.team))
                .add(medal);
        }
    }

    let mut standings: Vec<TeamStanding> = by_team.into_values().collect();
    // Stable sort keeps the BTreeMap's name order among equal totals.
    standings.sort_by(|a, b| b.total().cmp(&a.total()));
    standings.truncate(n);
    standings
}
