//! Lineup, headend, station and channel-map records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::BaseResponse;
use crate::wire::JsonInt;

/// Reply to adding or deleting a lineup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChangeLineupResponse {
    /// Envelope fields.
    #[serde(flatten)]
    pub base: BaseResponse,
    /// Lineup changes left for today.
    pub changes_remaining: JsonInt,
}

/// Lineups subscribed to by the account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineupResponse {
    /// Envelope fields.
    #[serde(flatten)]
    pub base: BaseResponse,
    /// Subscribed lineups.
    pub lineups: Vec<Lineup>,
}

/// A headend and the lineups it offers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Headend {
    /// Headend identifier.
    pub headend: String,
    /// Transport type, e.g. `Cable`, `Antenna`.
    pub transport: String,
    /// Location description.
    pub location: String,
    /// Lineups available from this headend.
    pub lineups: Vec<Lineup>,
}

/// A lineup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Lineup {
    /// Lineup identifier.
    pub lineup: String,
    /// Display name.
    pub name: String,
    /// Legacy identifier.
    #[serde(rename = "ID")]
    pub id: String,
    /// Last modification time.
    pub modified: Option<DateTime<Utc>>,
    /// Relative URI of the lineup resource.
    pub uri: String,
    /// Whether the lineup was deleted server side.
    pub is_deleted: bool,
}

/// Broadcaster address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BroadcasterInfo {
    /// City.
    pub city: String,
    /// State or province.
    pub state: String,
    /// Postal code.
    pub postalcode: String,
    /// Country.
    pub country: String,
}

/// Stations and channel map of one lineup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelResponse {
    /// Envelope fields.
    #[serde(flatten)]
    pub base: BaseResponse,
    /// Station to channel mapping.
    pub map: Vec<ChannelMap>,
    /// Stations in the lineup.
    pub stations: Vec<Station>,
    /// Lineup metadata.
    pub metadata: Option<ChannelResponseMeta>,
}

/// Metadata of a channel response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelResponseMeta {
    /// Lineup identifier.
    pub lineup: String,
    /// Last modification time.
    pub modified: Option<DateTime<Utc>>,
    /// Transport type.
    pub transport: String,
    /// Modulation, for DVB lineups.
    pub modulation: String,
}

/// A station in a lineup or schedule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Station {
    /// Network affiliate.
    pub affiliate: String,
    /// Broadcaster address.
    pub broadcaster: Option<BroadcasterInfo>,
    /// Broadcast languages.
    pub broadcast_language: Vec<String>,
    /// Call sign.
    #[serde(rename = "callsign")]
    pub call_sign: String,
    /// Description languages.
    pub description_language: Vec<String>,
    /// Whether the station runs no commercials.
    pub is_commercial_free: bool,
    /// Primary logo.
    pub logo: Option<StationLogo>,
    /// All logos.
    #[serde(rename = "stationLogo")]
    pub logos: Vec<StationLogo>,
    /// Station name.
    pub name: String,
    /// Station identifier.
    #[serde(rename = "stationID")]
    pub station_id: String,
    /// Whether this is a radio station.
    pub is_radio_station: bool,
}

/// Location of a station logo.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StationLogo {
    /// Image URL.
    #[serde(rename = "URL")]
    pub url: String,
    /// Height in pixels.
    pub height: i64,
    /// Width in pixels.
    pub width: i64,
    /// MD5 of the image.
    pub md5: String,
    /// Logo source.
    pub source: String,
}

/// Station fields visible in a lineup preview.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StationPreview {
    /// Network affiliate.
    pub affiliate: String,
    /// Call sign.
    #[serde(rename = "callsign")]
    pub call_sign: String,
    /// Channel number.
    pub channel: String,
    /// Station name.
    pub name: String,
}

/// Maps a station onto a channel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChannelMap {
    /// Channel number.
    pub channel: String,
    /// ATSC major channel.
    pub channel_major: i64,
    /// ATSC minor channel.
    pub channel_minor: i64,
    /// DVB delivery system.
    pub delivery_system: String,
    /// Forward error correction.
    pub fec: String,
    /// Frequency in hertz.
    #[serde(rename = "frequencyHz")]
    pub frequency_hz: i64,
    /// Logical channel number.
    pub logical_channel_number: String,
    /// How the station was matched.
    pub match_type: String,
    /// DVB modulation system.
    pub modulation_system: String,
    /// DVB network ID.
    #[serde(rename = "networkID")]
    pub network_id: i64,
    /// Satellite polarization.
    pub polarization: String,
    /// Provider call sign.
    #[serde(rename = "providerCallsign")]
    pub provider_call_sign: String,
    /// DVB service ID.
    #[serde(rename = "serviceID")]
    pub service_id: i64,
    /// Station identifier.
    #[serde(rename = "stationID")]
    pub station_id: String,
    /// Symbol rate.
    #[serde(rename = "symbolrate")]
    pub symbol_rate: i64,
    /// DVB transport ID.
    #[serde(rename = "transportID")]
    pub transport_id: i64,
    /// Virtual channel.
    pub virtual_channel: String,
}
