use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use csv::StringRecord;
use parking_lot::Mutex;
use thiserror::Error;

use super::model::{Medal, MedalTable, ResultRow, Season};

/// Columns the results file must provide. Any other columns are ignored.
pub const REQUIRED_COLUMNS: [&str; 6] = ["Year", "Season", "Team", "Sport", "Event", "Medal"];

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why a results file could not be turned into a [`MedalTable`].
#[derive(Debug, Clone, Error)]
pub enum LoadError {
    #[error("File not found: {}. Please check the file path.", .path.display())]
    NotFound { path: PathBuf },

    #[error("No data found in {}", .path.display())]
    Empty { path: PathBuf },

    #[error("Failed to parse {}: {message}", .path.display())]
    ParseFailure { path: PathBuf, message: String },
}

impl LoadError {
    pub fn path(&self) -> &Path {
        match self {
            LoadError::NotFound { path }
            | LoadError::Empty { path }
            | LoadError::ParseFailure { path, .. } => path,
        }
    }

    fn parse(path: &Path, message: impl Into<String>) -> Self {
        LoadError::ParseFailure {
            path: path.to_path_buf(),
            message: message.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a results table from a delimited file.
///
/// `.tsv` / `.tab` files are tab separated, everything else is read as CSV.
/// The header row must name every column in [`REQUIRED_COLUMNS`].
pub fn load_file(path: &Path) -> Result<MedalTable, LoadError> {
    let metadata = std::fs::metadata(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => LoadError::NotFound {
            path: path.to_path_buf(),
        },
        _ => LoadError::parse(path, e.to_string()),
    })?;

    if metadata.len() == 0 {
        return Err(LoadError::Empty {
            path: path.to_path_buf(),
        });
    }

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter_for(path))
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| LoadError::parse(path, e.to_string()))?;

    let headers = reader
        .headers()
        .map_err(|e| LoadError::parse(path, format!("reading header row: {e}")))?
        .clone();

    if headers.iter().all(|h| h.is_empty()) {
        return Err(LoadError::Empty {
            path: path.to_path_buf(),
        });
    }

    let columns = ColumnIndex::locate(&headers).map_err(|msg| LoadError::parse(path, msg))?;

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record =
            result.map_err(|e| LoadError::parse(path, format!("row {}: {e}", row_no + 1)))?;
        let row = columns
            .parse_row(&record)
            .map_err(|msg| LoadError::parse(path, format!("row {}: {msg}", row_no + 1)))?;
        rows.push(row);
    }

    if rows.is_empty() {
        return Err(LoadError::Empty {
            path: path.to_path_buf(),
        });
    }

    Ok(MedalTable::from_rows(rows))
}

fn delimiter_for(path: &Path) -> u8 {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "tsv" | "tab" => b'\t',
        _ => b',',
    }
}

/// Positions of the required columns within the header row.
struct ColumnIndex {
    year: usize,
    season: usize,
    team: usize,
    sport: usize,
    event: usize,
    medal: usize,
}

impl ColumnIndex {
    fn locate(headers: &StringRecord) -> Result<Self, String> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| format!("missing '{name}' column"))
        };

        Ok(ColumnIndex {
            year: find(REQUIRED_COLUMNS[0])?,
            season: find(REQUIRED_COLUMNS[1])?,
            team: find(REQUIRED_COLUMNS[2])?,
            sport: find(REQUIRED_COLUMNS[3])?,
            event: find(REQUIRED_COLUMNS[4])?,
            medal: find(REQUIRED_COLUMNS[5])?,
        })
    }

    fn parse_row(&self, record: &StringRecord) -> Result<ResultRow, String> {
        let cell = |idx: usize| record.get(idx).unwrap_or("");

        let year_cell = cell(self.year);
        let year = year_cell
            .parse::<i32>()
            .map_err(|_| format!("'{year_cell}' is not a valid year"))?;
        let season = cell(self.season).parse::<Season>()?;
        let medal = Medal::parse_cell(cell(self.medal))?;

        Ok(ResultRow {
            year,
            season,
            team: cell(self.team).to_string(),
            sport: cell(self.sport).to_string(),
            event: cell(self.event).to_string(),
            medal,
        })
    }
}

// ---------------------------------------------------------------------------
// Path-keyed cache
// ---------------------------------------------------------------------------

/// Memoizes loaded tables by path for the lifetime of the cache.
///
/// The lock is held while a missing table is loaded, so concurrent first
/// requests for a path parse the file at most once. Failed loads are not
/// stored; the next request retries the file.
#[derive(Debug, Default)]
pub struct DatasetCache {
    tables: Mutex<HashMap<PathBuf, Arc<MedalTable>>>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached table for `path`, loading it on first request.
    pub fn get_or_load(&self, path: &Path) -> Result<Arc<MedalTable>, LoadError> {
        let mut tables = self.tables.lock();
        if let Some(table) = tables.get(path) {
            log::debug!("Cache hit for {}", path.display());
            return Ok(Arc::clone(table));
        }

        let table = Arc::new(load_file(path)?);
        log::info!("Loaded {} result rows from {}", table.len(), path.display());
        tables.insert(path.to_path_buf(), Arc::clone(&table));
        Ok(table)
    }

    /// Like [`get_or_load`](Self::get_or_load), but degrades to an empty
    /// table so downstream aggregation shows "no data" instead of failing.
    pub fn load_or_empty(&self, path: &Path) -> (Arc<MedalTable>, Option<LoadError>) {
        match self.get_or_load(path) {
            Ok(table) => (table, None),
            Err(e) => {
                log::error!("Failed to load results: {e}");
                (Arc::new(MedalTable::empty()), Some(e))
            }
        }
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.tables.lock().contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.tables.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.lock().is_empty()
    }

    pub fn clear(&self) {
        self.tables.lock().clear();
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const HEADER: &str = "ID,Name,Team,NOC,Year,Season,City,Sport,Event,Medal";

    fn write_file(dir: &tempfile::TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    fn sample_csv() -> String {
        format!(
            "{HEADER}\n\
             1,A,USA,USA,1996,Summer,Atlanta,Swimming,100m Freestyle,Gold\n\
             2,B,USA,USA,1996,Summer,Atlanta,Swimming,100m Freestyle,NA\n\
             3,C,\"Korea, South\",KOR,1998,Winter,Nagano,Short Track,500m,\n"
        )
    }

    #[test]
    fn loads_required_columns_and_ignores_the_rest() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "athlete_events.csv", &sample_csv());

        let table = load_file(&path).unwrap();
        assert_eq!(table.len(), 3);

        let rows = table.rows();
        assert_eq!(
            rows[0],
            ResultRow::new(1996, Season::Summer, "USA", "Swimming", "100m Freestyle", Some(Medal::Gold))
        );
        assert_eq!(rows[1].medal, None);
        assert_eq!(rows[2].team, "Korea, South");
        assert_eq!(rows[2].season, Season::Winter);
        assert_eq!(rows[2].medal, None);
    }

    #[test]
    fn tab_separated_files_are_detected_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "results.tsv",
            "Year\tSeason\tTeam\tSport\tEvent\tMedal\n2014\tWinter\tNorway\tBiathlon\tSprint\tSilver\n",
        );

        let table = load_file(&path).unwrap();
        assert_eq!(table.rows()[0].medal, Some(Medal::Silver));
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_file(&dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, LoadError::NotFound { .. }));
    }

    #[test]
    fn zero_byte_and_header_only_files_are_empty() {
        let dir = tempfile::tempdir().unwrap();
        let blank = write_file(&dir, "blank.csv", "");
        let header_only = write_file(&dir, "header.csv", &format!("{HEADER}\n"));

        assert!(matches!(load_file(&blank), Err(LoadError::Empty { .. })));
        assert!(matches!(load_file(&header_only), Err(LoadError::Empty { .. })));
    }

    #[test]
    fn bad_cells_are_parse_failures_naming_the_row() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "bad.csv",
            "Year,Season,Team,Sport,Event,Medal\n2000,Summer,USA,Rowing,Eights,Gold\nMMXX,Summer,USA,Rowing,Eights,Gold\n",
        );

        match load_file(&path) {
            Err(LoadError::ParseFailure { message, .. }) => {
                assert!(message.contains("row 2"), "{message}");
                assert!(message.contains("MMXX"), "{message}");
            }
            other => panic!("expected parse failure, got {other:?}"),
        }
    }

    #[test]
    fn missing_column_is_a_parse_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "cols.csv", "Year,Season,Team,Sport,Event\n2000,Summer,USA,Rowing,Eights\n");

        match load_file(&path) {
            Err(LoadError::ParseFailure { message, .. }) => assert!(message.contains("'Medal'")),
            other => panic!("expected parse failure, got {other:?}"),
        }
    }

    #[test]
    fn cache_returns_the_same_table_without_rereading() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "athlete_events.csv", &sample_csv());
        let cache = DatasetCache::new();

        let first = cache.get_or_load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        let second = cache.get_or_load(&path).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert!(cache.contains(&path));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn concurrent_first_requests_share_one_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "athlete_events.csv", &sample_csv());
        let cache = DatasetCache::new();

        let tables: Vec<Arc<MedalTable>> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|_| s.spawn(|| cache.get_or_load(&path).unwrap()))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert!(tables.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
    }

    #[test]
    fn failed_loads_degrade_to_empty_and_are_retried() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("late.csv");
        let cache = DatasetCache::new();

        let (table, err) = cache.load_or_empty(&path);
        assert!(table.is_empty());
        assert!(matches!(err, Some(LoadError::NotFound { .. })));
        assert!(cache.is_empty());

        write_file(&dir, "late.csv", &sample_csv());
        let (table, err) = cache.load_or_empty(&path);
        assert!(err.is_none());
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn clear_drops_cached_tables() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "athlete_events.csv", &sample_csv());
        let cache = DatasetCache::new();

        cache.get_or_load(&path).unwrap();
        cache.clear();
        assert!(!cache.contains(&path));
    }
}
