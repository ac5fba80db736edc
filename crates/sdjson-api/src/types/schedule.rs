//! Station schedules and last-modified records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::program::{ContentRating, Part, show_id_for_episode_id};
use crate::wire::Date;

string_enum! {
    /// Premiere or finale marker on an airing.
    PremiereType {
        /// End of a show.
        Finale => "Finale",
        /// Beginning of a show.
        Premiere => "Premiere",
        /// End of a season.
        SeasonFinale => "Season Finale",
        /// Beginning of a season.
        SeasonPremiere => "Season Premiere",
        /// End of a series.
        SeriesFinale => "Series Finale",
        /// Beginning of a series.
        SeriesPremiere => "Series Premiere",
    }
}

string_enum! {
    /// Whether an airing is live, taped or delayed.
    LiveTapeDelay {
        /// Shown in real time.
        Live => "Live",
        /// Previously recorded.
        Tape => "Tape",
        /// Intentional broadcast delay.
        Delayed => "Delayed",
    }
}

/// Syndication information.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyndicationType {
    /// Syndication source.
    pub source: String,
    /// Syndication type.
    #[serde(rename = "type")]
    pub kind: String,
}

/// One airing in a station schedule.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Program {
    /// Program identifier.
    #[serde(rename = "programID")]
    pub program_id: String,
    /// Start time.
    pub air_date_time: Option<DateTime<Utc>>,
    /// MD5 of the program record.
    pub md5: String,
    /// Duration in seconds.
    pub duration: i64,
    /// Live, tape or delayed.
    pub live_tape_delay: Option<LiveTapeDelay>,
    /// Premiere or finale marker.
    pub is_premiere_or_finale: Option<PremiereType>,
    /// First airing.
    pub new: bool,
    /// Cable in the Classroom.
    #[serde(rename = "cableInTheClassRoom")]
    pub cable_in_the_classroom: bool,
    /// Catch-up airing.
    pub catchup: bool,
    /// Continuation of an earlier airing.
    pub continued: bool,
    /// Educational content.
    #[serde(rename = "educational")]
    pub education: bool,
    /// Joined in progress.
    pub joined_in_progress: bool,
    /// Left in progress.
    pub left_in_progress: bool,
    /// Premiere of a miniseries or movie.
    pub premiere: bool,
    /// Program stops and restarts later.
    pub program_break: bool,
    /// Encore presentation.
    pub repeat: bool,
    /// Sign-language interpreted.
    pub signed: bool,
    /// Subject to blackout.
    pub subject_to_blackout: bool,
    /// Start time is approximate.
    pub time_approximate: bool,
    /// Audio properties.
    pub audio_properties: Vec<String>,
    /// Syndication information.
    pub syndication: Option<SyndicationType>,
    /// Content ratings.
    pub ratings: Vec<ContentRating>,
    /// Multipart information.
    #[serde(rename = "multipart")]
    pub program_part: Option<Part>,
    /// Video properties.
    pub video_properties: Vec<String>,
}

impl Program {
    /// Returns the `SH` show ID for an `EP` episode ID.
    #[must_use]
    pub fn show_id(&self) -> Option<String> {
        show_id_for_episode_id(&self.program_id)
    }
}

/// Airings for one station.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Schedule {
    /// Station identifier.
    #[serde(rename = "stationID")]
    pub station_id: String,
    /// Schedule metadata.
    pub metadata: Option<ScheduleMeta>,
    /// Airings.
    pub programs: Vec<Program>,
}

/// Metadata of one station-day schedule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScheduleMeta {
    /// Last modification time.
    pub modified: Option<DateTime<Utc>>,
    /// MD5 of the schedule.
    pub md5: String,
    /// First day covered.
    pub start_date: Option<Date>,
    /// Last day covered.
    pub end_date: Option<Date>,
    /// Number of days covered.
    pub days: i64,
}

/// Requests schedules or MD5s for a station, optionally limited to dates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationScheduleRequest {
    /// Station identifier.
    #[serde(rename = "stationID")]
    pub station_id: String,
    /// Dates as `YYYY-MM-DD`; empty means every available date.
    #[serde(rename = "date", default, skip_serializing_if = "Vec::is_empty")]
    pub dates: Vec<String>,
}

/// Last modification of a station-day schedule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LastModifiedEntry {
    /// Last modification time.
    pub last_modified: Option<DateTime<Utc>>,
    /// MD5 of the schedule.
    pub md5: String,
}
