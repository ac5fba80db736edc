//! Program metadata records.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::BaseResponse;
use super::artwork::Artwork;
use crate::error_code::ErrorCode;
use crate::wire::Date;

/// Returns the `SH` show ID for an `EP` episode ID.
///
/// `EP024874280035` becomes `SH024874280000`. Returns `None` for IDs that
/// are not episodes or are too short to contain a series number.
#[must_use]
pub fn show_id_for_episode_id(program_id: &str) -> Option<String> {
    let series = program_id.strip_prefix("EP")?.get(..8)?;
    Some(format!("SH{series}0000"))
}

string_enum! {
    /// Animation style.
    Animation {
        /// Animated.
        Animated => "Animated",
        /// Anime.
        Anime => "Anime",
        /// Live action with animated sequences.
        LiveActionAnimated => "Live action/animated",
        /// Live action with anime sequences.
        LiveActionAnime => "Live action/anime",
    }
}

string_enum! {
    /// Target audience derived from genres.
    Audience {
        /// Children only.
        Children => "Children",
        /// Adults only.
        AdultsOnly => "Adults only",
    }
}

string_enum! {
    /// Top-level program type.
    EntityType {
        /// Episode of a show.
        Episode => "Episode",
        /// Movie.
        Movie => "Movie",
        /// Show.
        Show => "Show",
        /// Sports event or related program.
        Sports => "Sports",
    }
}

string_enum! {
    /// Program subtype.
    ShowSubType {
        /// Feature film.
        FeatureFilm => "Feature Film",
        /// Miniseries.
        MiniSeries => "Miniseries",
        /// Paid programming.
        PaidProgramming => "Paid Programming",
        /// Series.
        Series => "Series",
        /// Short film.
        ShortFilm => "Short Film",
        /// Special.
        Special => "Special",
        /// Sports event.
        SportsEvent => "Sports event",
        /// Sports non-event.
        SportsNonEvent => "Sports non-event",
        /// Theatre event.
        TheatreEvent => "Theatre Event",
        /// TV movie.
        TvMovie => "TV Movie",
    }
}

/// Full metadata of one program.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProgramInfo {
    /// Animation style.
    pub animation: Option<Animation>,
    /// Target audience.
    pub audience: Option<Audience>,
    /// Awards.
    pub awards: Vec<Award>,
    /// Cast.
    pub cast: Vec<Person>,
    /// Content advisories.
    pub content_advisory: Vec<String>,
    /// Content ratings.
    pub content_rating: Vec<ContentRating>,
    /// Crew.
    pub crew: Vec<Person>,
    /// Descriptions keyed by length class, e.g. `description100`.
    pub descriptions: HashMap<String, Vec<Description>>,
    /// Duration in seconds.
    pub duration: i64,
    /// Program type.
    pub entity_type: Option<EntityType>,
    /// Episode still.
    pub episode_image: Option<Artwork>,
    /// Episode title.
    pub episode_title150: String,
    /// Sports event details.
    pub event_details: Option<EventDetails>,
    /// Genres.
    pub genres: Vec<String>,
    /// Episode artwork is available.
    pub has_episode_artwork: bool,
    /// Generic image artwork is available.
    pub has_image_artwork: bool,
    /// Movie artwork is available.
    pub has_movie_artwork: bool,
    /// Series artwork is available.
    pub has_series_artwork: bool,
    /// Sports artwork is available.
    pub has_sports_artwork: bool,
    /// Holiday the program relates to.
    pub holiday: String,
    /// Keywords by category.
    #[serde(rename = "keyWords")]
    pub keywords: HashMap<String, Vec<String>>,
    /// MD5 of the record.
    pub md5: String,
    /// Provider metadata, e.g. season and episode numbers.
    pub metadata: Vec<HashMap<String, Metadata>>,
    /// Movie details.
    pub movie: Option<Movie>,
    /// Official website.
    #[serde(rename = "officialURL")]
    pub official_url: String,
    /// Original air date.
    pub original_air_date: Option<Date>,
    /// Program identifier.
    #[serde(rename = "programID")]
    pub program_id: String,
    /// Related programs.
    pub recommendations: Vec<Recommendation>,
    /// Resource identifier.
    #[serde(rename = "resourceID")]
    pub resource_id: String,
    /// Program subtype.
    pub show_type: Option<ShowSubType>,
    /// Titles.
    pub titles: Vec<Title>,
}

impl ProgramInfo {
    /// Returns `true` if any kind of artwork is available.
    #[must_use]
    pub const fn has_artwork(&self) -> bool {
        self.has_episode_artwork
            || self.has_image_artwork
            || self.has_movie_artwork
            || self.has_series_artwork
            || self.has_sports_artwork
    }

    /// Returns the `SH` show ID for an `EP` episode ID.
    #[must_use]
    pub fn show_id(&self) -> Option<String> {
        show_id_for_episode_id(&self.program_id)
    }

    /// Returns the IDs to query artwork by.
    ///
    /// Episodes with their own artwork yield both the episode and the show
    /// ID. Episodes without yield only the show ID. Anything else yields
    /// the program ID.
    #[must_use]
    pub fn artwork_lookup_ids(&self) -> Vec<String> {
        match (self.has_episode_artwork, self.show_id()) {
            (true, Some(show_id)) => vec![self.program_id.clone(), show_id],
            (false, Some(show_id)) => vec![show_id],
            (_, None) => vec![self.program_id.clone()],
        }
    }
}

/// An award given to a program.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Award {
    /// Award name.
    pub award_name: String,
    /// Category.
    pub category: String,
    /// Name.
    pub name: String,
    /// Person identifier.
    pub person_id: String,
    /// Recipient.
    pub recipient: String,
    /// Whether the award was won.
    pub won: bool,
    /// Award year.
    pub year: Option<Date>,
}

/// A cast or crew credit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Person {
    /// Person identifier.
    pub person_id: String,
    /// Name identifier.
    pub name_id: String,
    /// Name.
    pub name: String,
    /// Role.
    pub role: String,
    /// Character played.
    pub character_name: String,
    /// Billing order.
    pub billing_order: String,
}

/// A ratings-board rating.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentRating {
    /// Ratings body.
    pub body: String,
    /// Rating code.
    pub code: String,
    /// Country.
    pub country: String,
}

/// A program description in one language.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Description {
    /// Description text.
    pub description: String,
    /// Language code.
    #[serde(rename = "descriptionLanguage")]
    pub language: String,
}

/// Movie details.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Movie {
    /// Duration in seconds.
    pub duration: i64,
    /// Quality ratings.
    pub quality_rating: Vec<MovieQualityRating>,
    /// Release year.
    pub year: Option<Date>,
}

/// Season and episode numbering from one provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Metadata {
    /// Episode number.
    pub episode: i64,
    /// Provider episode ID.
    #[serde(rename = "episodeID")]
    pub episode_id: i64,
    /// Season number.
    pub season: i64,
    /// Provider series ID.
    #[serde(rename = "seriesID")]
    pub series_id: i64,
    /// Episode count.
    pub total_episodes: i64,
    /// Season count.
    pub total_seasons: i64,
}

/// Sports event details.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EventDetails {
    /// Game date.
    pub game_date: Option<Date>,
    /// Teams.
    pub teams: Vec<Team>,
    /// Venue.
    #[serde(rename = "venue100")]
    pub venue: String,
    /// Event subtype.
    pub sub_type: String,
}

/// A movie quality rating.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MovieQualityRating {
    /// Rating increment.
    pub increment: String,
    /// Maximum rating.
    pub max_rating: String,
    /// Minimum rating.
    pub min_rating: String,
    /// Rating.
    pub rating: String,
    /// Ratings body.
    pub ratings_body: String,
}

/// A team in a sports program.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Team {
    /// Home team.
    pub is_home: bool,
    /// Team name.
    pub name: String,
    /// Score.
    pub score: String,
}

/// A related program.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Recommendation {
    /// Program identifier.
    #[serde(rename = "programID")]
    pub program_id: String,
    /// Title.
    pub title120: String,
}

/// A program title.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Title {
    /// Title, up to 120 characters.
    pub title120: String,
}

/// Multipart numbering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Part {
    /// Part number.
    pub part_number: i64,
    /// Total parts.
    pub total_parts: i64,
}

/// Generic descriptions of a program.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgramDescription {
    /// Per-program status code.
    pub code: ErrorCode,
    /// Description, up to 100 characters.
    pub description100: String,
    /// Description, up to 1000 characters.
    pub description1000: String,
}

/// Translated title and description of a program.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LanguageCrossReference {
    /// Envelope fields.
    #[serde(flatten)]
    pub base: BaseResponse,
    /// Description language code.
    pub description_language: String,
    /// Description language name.
    pub description_language_name: String,
    /// MD5 of the record.
    pub md5: String,
    /// Program identifier.
    #[serde(rename = "programID")]
    pub program_id: String,
    /// Title language code.
    pub title_language: String,
    /// Title language name.
    pub title_language_name: String,
}

/// Real-time state of a live program.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StillRunningResponse {
    /// Envelope fields.
    #[serde(flatten)]
    pub base: BaseResponse,
    /// Actual start time.
    pub event_start_date_time: Option<DateTime<Utc>>,
    /// Whether the event has finished.
    pub is_complete: bool,
    /// Program identifier.
    #[serde(rename = "programID")]
    pub program_id: String,
    /// Current result.
    pub result: StillRunningResult,
}

/// Current score of a live program.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StillRunningResult {
    /// Away team.
    pub away_team: Option<Team>,
    /// Home team.
    pub home_team: Option<Team>,
}
