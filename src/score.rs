use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, Local, TimeZone, Utc};

const APP_DIR_NAME: &str = "torus-snake";
const SCORE_FILE_NAME: &str = "results.txt";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Destination for game-over results.
pub trait ScoreSink {
    /// Records that a game ended with the snake at `length` segments.
    fn record(&mut self, length: usize, at: SystemTime) -> io::Result<()>;
}

/// Append-only text log with one line per finished game.
#[derive(Debug, Clone)]
pub struct ScoreLog {
    path: PathBuf,
}

impl ScoreLog {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScoreSink for ScoreLog {
    fn record(&mut self, length: usize, at: SystemTime) -> io::Result<()> {
        append_line(&self.path, &format_score_line(length, at))
    }
}

/// Collects results in memory. Used by tests and headless runs.
impl ScoreSink for Vec<usize> {
    fn record(&mut self, length: usize, _at: SystemTime) -> io::Result<()> {
        self.push(length);
        Ok(())
    }
}

/// Returns the platform-correct score log path.
#[must_use]
pub fn scores_path() -> PathBuf {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(SCORE_FILE_NAME);
    base
}

/// Formats the human-readable line written for one game over, stamped in
/// the local time zone.
#[must_use]
pub fn format_score_line(length: usize, at: SystemTime) -> String {
    score_line_in(length, at, &Local)
}

fn score_line_in<Tz: TimeZone>(length: usize, at: SystemTime, zone: &Tz) -> String
where
    Tz::Offset: fmt::Display,
{
    let stamp = DateTime::<Utc>::from(at)
        .with_timezone(zone)
        .format(TIMESTAMP_FORMAT);
    format!("{stamp} game over: reached length {length} blocks\n")
}

fn append_line(path: &Path, line: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(line.as_bytes())
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    use chrono::{FixedOffset, Utc};

    use super::{format_score_line, score_line_in, ScoreLog, ScoreSink};

    fn at(seconds: u64) -> SystemTime {
        UNIX_EPOCH + Duration::from_secs(seconds)
    }

    #[test]
    fn score_line_carries_timestamp_and_length() {
        assert_eq!(
            score_line_in(7, at(1_700_000_000), &Utc),
            "2023-11-14 22:13:20 game over: reached length 7 blocks\n"
        );
        assert_eq!(
            score_line_in(1, at(951_782_400), &Utc),
            "2000-02-29 00:00:00 game over: reached length 1 blocks\n"
        );
    }

    #[test]
    fn score_line_follows_the_time_zone() {
        let utc_plus_three = FixedOffset::east_opt(3 * 3600).expect("offset in range");

        assert_eq!(
            score_line_in(4, at(1_700_000_000), &utc_plus_three),
            "2023-11-15 01:13:20 game over: reached length 4 blocks\n"
        );
    }

    #[test]
    fn local_score_line_is_one_line() {
        let line = format_score_line(12, SystemTime::now());

        assert!(line.ends_with(" game over: reached length 12 blocks\n"));
        assert_eq!(line.lines().count(), 1);
    }

    #[test]
    fn score_log_appends_without_overwriting() {
        let path = unique_test_path("append");
        let mut log = ScoreLog::new(&path);

        log.record(3, at(0)).expect("first write should succeed");
        log.record(12, at(60)).expect("second write should succeed");

        let contents = fs::read_to_string(&path).expect("log should exist");
        let lines: Vec<_> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("length 3 blocks"));
        assert!(lines[1].ends_with("length 12 blocks"));

        cleanup_test_path(&path);
    }

    #[test]
    fn unwritable_log_reports_error() {
        let dir = unique_test_path("dir-as-file");
        fs::create_dir_all(&dir).expect("test directory should be creatable");
        let mut log = ScoreLog::new(&dir);

        assert!(log.record(1, at(0)).is_err());

        let _ = fs::remove_dir(&dir);
    }

    fn unique_test_path(label: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be after epoch")
            .as_nanos();

        std::env::temp_dir()
            .join("torus-snake-score-tests")
            .join(format!("{label}-{nanos}.txt"))
    }

    fn cleanup_test_path(path: &PathBuf) {
        let _ = fs::remove_file(path);
        if let Some(parent) = path.parent() {
            let _ = fs::remove_dir(parent);
        }
    }
}
