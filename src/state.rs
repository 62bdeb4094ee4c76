use std::path::{Path, PathBuf};
use std::sync::Arc;

use olympics_dashboard::config::DashboardConfig;
use olympics_dashboard::data::aggregate::{
    DEFAULT_TOP_SPORTS, QueryError, SeasonCounts, SportTotal, TeamStanding, YearRange,
    medal_rank, medal_standings, medals_over_time, top_sports, total_medal_count,
};
use olympics_dashboard::data::filter::{MedalFilter, filter_table};
use olympics_dashboard::data::loader::DatasetCache;
use olympics_dashboard::data::model::{Medal, MedalTable, Season};

// ---------------------------------------------------------------------------
// View selections
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Medals,
    Country,
}

/// Selections for the overall medal counts chart. `None` means "All".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MedalsSelection {
    pub season: Option<Season>,
    pub year: Option<i32>,
    pub medal: Option<Medal>,
    pub country_count: usize,
}

/// Selections for the single-country summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountrySelection {
    pub team: Option<String>,
    pub start_year: i32,
    pub end_year: i32,
}

/// Everything the country view shows for one team and year range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountrySummary {
    pub team: String,
    pub range: YearRange,
    pub total: usize,
    pub rank: u32,
    pub top_sports: Vec<SportTotal>,
    pub over_time: Vec<SeasonCounts>,
}

/// Compute the country view's figures. Fails on an inverted range or when
/// the team has no results in it.
pub fn summarize_country(
    table: &MedalTable,
    team: &str,
    start_year: i32,
    end_year: i32,
) -> Result<CountrySummary, QueryError> {
    let range = YearRange::new(start_year, end_year)?;
    let rank = medal_rank(table, range, team)?;
    Ok(CountrySummary {
        team: team.to_string(),
        range,
        total: total_medal_count(table, team, range),
        rank,
        top_sports: top_sports(table, team, range, DEFAULT_TOP_SPORTS),
        over_time: medals_over_time(table, team, range),
    })
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,

    cache: DatasetCache,

    /// Path of the table currently shown.
    pub data_path: PathBuf,

    /// Loaded table (empty when the last load failed).
    pub dataset: Arc<MedalTable>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    pub view: View,

    pub medals: MedalsSelection,

    /// Standings for the current medals selection (cached).
    pub standings: Vec<TeamStanding>,

    pub country: CountrySelection,

    /// Summary for the current country selection; `None` until a team is picked.
    pub country_summary: Option<Result<CountrySummary, QueryError>>,
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        let data_path = config.data_path.clone();
        let mut state = Self {
            medals: MedalsSelection {
                season: None,
                year: None,
                medal: None,
                country_count: config.default_country_count,
            },
            config,
            cache: DatasetCache::new(),
            data_path: PathBuf::new(),
            dataset: Arc::new(MedalTable::empty()),
            status_message: None,
            view: View::Medals,
            standings: Vec::new(),
            country: CountrySelection {
                team: None,
                start_year: 0,
                end_year: 0,
            },
            country_summary: None,
        };
        state.open_path(&data_path);
        state
    }

    /// Load (or fetch from cache) the table at `path` and make it current.
    /// A failed load leaves an empty table and a status message.
    pub fn open_path(&mut self, path: &Path) {
        let (dataset, error) = self.cache.load_or_empty(path);
        self.status_message = error.map(|e| e.to_string());
        self.data_path = path.to_path_buf();
        self.set_dataset(dataset);
    }

    /// Ingest a table, reset selections that no longer apply and recompute.
    pub fn set_dataset(&mut self, dataset: Arc<MedalTable>) {
        if let Some(year) = self.medals.year {
            if !dataset.years().contains(&year) {
                self.medals.year = None;
            }
        }

        let team_still_present = self
            .country
            .team
            .as_ref()
            .is_some_and(|t| dataset.teams().contains(t));
        if !team_still_present {
            self.country.team = dataset.teams().first().cloned();
        }

        let (first, last) = dataset.year_bounds().unwrap_or((0, 0));
        self.country.start_year = first;
        self.country.end_year = last;

        self.dataset = dataset;
        self.refresh_standings();
        self.refresh_country();
    }

    /// Years offered by the year selector for the current season.
    pub fn available_years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self
            .dataset
            .available_years(self.medals.season)
            .into_iter()
            .collect();
        years.reverse();
        years
    }

    pub fn set_season(&mut self, season: Option<Season>) {
        self.medals.season = season;
        if let Some(year) = self.medals.year {
            if !self.dataset.available_years(season).contains(&year) {
                self.medals.year = None;
            }
        }
        self.refresh_standings();
    }

    pub fn set_year(&mut self, year: Option<i32>) {
        self.medals.year = year;
        self.refresh_standings();
    }

    pub fn set_medal(&mut self, medal: Option<Medal>) {
        self.medals.medal = medal;
        self.refresh_standings();
    }

    pub fn set_country_count(&mut self, count: usize) {
        self.medals.country_count = count.min(self.config.max_country_count).max(1);
        self.refresh_standings();
    }

    pub fn select_team(&mut self, team: String) {
        self.country.team = Some(team);
        self.refresh_country();
    }

    pub fn set_year_range(&mut self, start_year: i32, end_year: i32) {
        self.country.start_year = start_year;
        self.country.end_year = end_year;
        self.refresh_country();
    }

    /// Recompute `standings` after a medals selection change.
    pub fn refresh_standings(&mut self) {
        let filter = MedalFilter::new(self.medals.year, self.medals.season, self.medals.medal);
        let filtered = filter_table(&self.dataset, &filter);
        self.standings = medal_standings(&filtered, self.medals.country_count);
    }

    /// Recompute `country_summary` after a country selection change.
    pub fn refresh_country(&mut self) {
        self.country_summary = self.country.team.as_deref().map(|team| {
            let summary = summarize_country(
                &self.dataset,
                team,
                self.country.start_year,
                self.country.end_year,
            );
            if let Err(e) = &summary {
                log::warn!("Country summary unavailable: {e}");
            }
            summary
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "Year,Season,Team,Sport,Event,Medal\n\
        1996,Summer,USA,Swimming,100m Freestyle,Gold\n\
        1996,Summer,USA,Swimming,100m Freestyle,Silver\n\
        2000,Summer,USA,Athletics,100m,Gold\n\
        2000,Summer,France,Fencing,Foil,Bronze\n\
        1998,Winter,Norway,Biathlon,Sprint,Gold\n\
        1998,Winter,Norway,Biathlon,Relay,NA\n";

    fn state_with(contents: &str) -> (tempfile::TempDir, AppState) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("athlete_events.csv");
        std::fs::write(&path, contents).unwrap();
        let config = DashboardConfig {
            data_path: path,
            ..DashboardConfig::default()
        };
        (dir, AppState::new(config))
    }

    #[test]
    fn startup_loads_table_and_computes_both_views() {
        let (_dir, state) = state_with(CSV);

        assert!(state.status_message.is_none());
        assert_eq!(state.dataset.len(), 6);
        assert_eq!(state.standings[0].team, "USA");
        assert_eq!(state.standings[0].total(), 3);

        // First team alphabetically, full year span.
        assert_eq!(state.country.team.as_deref(), Some("France"));
        assert_eq!((state.country.start_year, state.country.end_year), (1996, 2000));
        let summary = state.country_summary.clone().unwrap().unwrap();
        assert_eq!(summary.total, 1);
        assert_eq!(summary.rank, 2);
    }

    #[test]
    fn missing_file_shows_message_and_empty_results() {
        let dir = tempfile::tempdir().unwrap();
        let config = DashboardConfig {
            data_path: dir.path().join("missing.csv"),
            ..DashboardConfig::default()
        };
        let state = AppState::new(config);

        assert!(state.dataset.is_empty());
        assert!(state.standings.is_empty());
        assert!(state.country_summary.is_none());
        assert!(state.status_message.unwrap().contains("File not found"));
    }

    #[test]
    fn season_change_drops_year_from_other_season() {
        let (_dir, mut state) = state_with(CSV);
        state.set_year(Some(1998));
        assert_eq!(state.standings[0].team, "Norway");

        state.set_season(Some(Season::Summer));
        assert_eq!(state.medals.year, None);
        assert_eq!(state.available_years(), vec![2000, 1996]);
    }

    #[test]
    fn medal_filter_and_country_count_shape_standings() {
        let (_dir, mut state) = state_with(CSV);
        state.set_medal(Some(Medal::Gold));
        let teams: Vec<_> = state.standings.iter().map(|s| s.team.as_str()).collect();
        assert_eq!(teams, vec!["USA", "Norway"]);

        state.set_country_count(1);
        assert_eq!(state.standings.len(), 1);

        state.set_country_count(0);
        assert_eq!(state.medals.country_count, 1);
    }

    #[test]
    fn country_errors_are_reported_not_panicked() {
        let (_dir, mut state) = state_with(CSV);
        state.select_team("USA".to_string());

        state.set_year_range(2000, 1996);
        assert!(matches!(
            state.country_summary,
            Some(Err(QueryError::InvalidRange { .. }))
        ));

        state.set_year_range(1997, 1999);
        assert!(matches!(
            state.country_summary,
            Some(Err(QueryError::TeamNotFound { .. }))
        ));

        state.set_year_range(1996, 2000);
        let summary = state.country_summary.clone().unwrap().unwrap();
        assert_eq!(summary.total, 3);
        assert_eq!(summary.rank, 1);
        assert_eq!(summary.top_sports.len(), 2);
    }
}
