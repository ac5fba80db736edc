//! `SchedulesDirectApi` trait definition.
#![allow(clippy::future_not_send)]

use std::collections::HashMap;

use crate::error::Result;
use crate::types::{
    Artwork, ArtworkResponse, AvailableDvbs, BaseResponse, ChangeLineupResponse, ChannelResponse,
    Country, Headend, LanguageCrossReference, LastModifiedEntry, LineupResponse, ProgramDescription,
    ProgramInfo, Schedule, Service, StationPreview, StationScheduleRequest, StatusResponse,
    StillRunningResponse, VersionResponse,
};

/// Schedules Direct JSON API trait.
///
/// One method per service operation. Abstracts the client for mock
/// substitution in tests. Uses `trait_variant::make` to generate a
/// `Send`-bound async trait.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(SchedulesDirectApi: Send)]
pub trait LocalSchedulesDirectApi {
    /// Fetches account, lineup and system status.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the reply cannot be decoded.
    async fn get_status(&self) -> Result<StatusResponse>;

    /// Fetches the latest version of a client application. Does not need a
    /// token.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the reply cannot be decoded.
    async fn get_version(&self, client_name: &str) -> Result<VersionResponse>;

    /// Deletes an account message.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the reply cannot be decoded.
    async fn delete_message(&self, message_id: &str) -> Result<BaseResponse>;

    /// Lists the lineups on the account.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Service`](crate::Error::Service) with
    /// `NO_LINEUPS` when the account has none.
    async fn get_lineups(&self) -> Result<LineupResponse>;

    /// Adds a lineup to the account.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the reply cannot be decoded.
    async fn add_lineup(&self, lineup_id: &str) -> Result<ChangeLineupResponse>;

    /// Removes a lineup from the account.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the reply cannot be decoded.
    async fn delete_lineup(&self, lineup_id: &str) -> Result<ChangeLineupResponse>;

    /// Previews the first stations of a lineup without adding it.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the reply cannot be decoded.
    async fn preview_lineup(&self, lineup_id: &str) -> Result<Vec<StationPreview>>;

    /// Fetches the channel map and stations of a lineup on the account.
    ///
    /// With `verbose` the map carries the transport details of each channel.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the reply cannot be decoded.
    async fn get_channels(&self, lineup_id: &str, verbose: bool) -> Result<ChannelResponse>;

    /// Lists the headends serving a postal code.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the reply cannot be decoded.
    async fn get_headends(&self, country: &str, postal_code: &str) -> Result<Vec<Headend>>;

    /// Asks the service to identify a lineup from a scanned channel list.
    ///
    /// `scan` is sent verbatim as the request body.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the reply cannot be decoded.
    async fn automap_lineup(&self, scan: &[u8]) -> Result<HashMap<String, i64>>;

    /// Submits a scanned channel list for a lineup.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    async fn submit_lineup(&self, scan: &[u8], lineup_id: &str) -> Result<()>;

    /// Fetches station schedules, one entry per station and date range.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the reply cannot be decoded.
    async fn get_schedules(&self, requests: &[StationScheduleRequest]) -> Result<Vec<Schedule>>;

    /// Fetches the MD5 and modification time of station schedules, keyed by
    /// station ID and then by date.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the reply cannot be decoded.
    async fn get_last_modified(
        &self,
        requests: &[StationScheduleRequest],
    ) -> Result<HashMap<String, HashMap<String, LastModifiedEntry>>>;

    /// Fetches program records, batched by
    /// [`BatchLimits::program_info`](crate::BatchLimits).
    ///
    /// # Errors
    ///
    /// Returns an error if any batch fails.
    async fn get_program_info(&self, program_ids: &[String]) -> Result<Vec<ProgramInfo>>;

    /// Fetches generic descriptions keyed by program ID, batched by
    /// [`BatchLimits::metadata`](crate::BatchLimits).
    ///
    /// # Errors
    ///
    /// Returns an error if any batch fails.
    async fn get_program_descriptions(
        &self,
        program_ids: &[String],
    ) -> Result<HashMap<String, ProgramDescription>>;

    /// Fetches language cross references keyed by program ID, batched by
    /// [`BatchLimits::metadata`](crate::BatchLimits).
    ///
    /// # Errors
    ///
    /// Returns an error if any batch fails.
    async fn get_language_cross_reference(
        &self,
        program_ids: &[String],
    ) -> Result<HashMap<String, Vec<LanguageCrossReference>>>;

    /// Checks whether a live event is still running.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the reply cannot be decoded.
    async fn get_program_still_running(&self, program_id: &str) -> Result<StillRunningResponse>;

    /// Fetches artwork for program IDs, batched by
    /// [`BatchLimits::metadata`](crate::BatchLimits). Does not need a token.
    ///
    /// # Errors
    ///
    /// Returns an error if any batch fails.
    async fn get_artwork_for_program_ids(
        &self,
        program_ids: &[String],
    ) -> Result<Vec<ArtworkResponse>>;

    /// Fetches artwork for a root ID. Does not need a token.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the reply cannot be decoded.
    async fn get_artwork_for_root_id(&self, root_id: &str) -> Result<Vec<Artwork>>;

    /// Fetches artwork for a celebrity. Does not need a token.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the reply cannot be decoded.
    async fn get_celebrity_artwork(&self, celebrity_id: &str) -> Result<Vec<Artwork>>;

    /// Downloads an image. Absolute URLs are fetched as is.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    async fn get_image(&self, uri: &str) -> Result<Vec<u8>>;

    /// Lists the available services. Does not need a token.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the reply cannot be decoded.
    async fn get_available_services(&self) -> Result<Vec<Service>>;

    /// Lists supported countries keyed by region. Does not need a token.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the reply cannot be decoded.
    async fn get_available_countries(&self) -> Result<HashMap<String, Vec<Country>>>;

    /// Lists supported languages keyed by code. Does not need a token.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the reply cannot be decoded.
    async fn get_available_languages(&self) -> Result<HashMap<String, String>>;

    /// Lists DVB-S satellites. Does not need a token.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the reply cannot be decoded.
    async fn get_available_dvbs(&self) -> Result<Vec<AvailableDvbs>>;

    /// Lists DVB-T transmitters of a country. Does not need a token.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the reply cannot be decoded.
    async fn get_available_transmitters(&self, country: &str) -> Result<HashMap<String, String>>;
}
