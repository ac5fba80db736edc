//! Request and response records for the Schedules Direct JSON API.
//!
//! Records are flat and permissive: every field the service may omit
//! decodes to its zero value (`None`, empty collection, `false`, `0`).

/// Defines a string-valued enum with an `Other` fallback so that values
/// added by the service later still decode.
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $text:literal, )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )*
            /// A value not known to this library.
            Other(String),
        }

        impl $name {
            /// Returns the wire spelling.
            #[must_use]
            pub fn as_str(&self) -> &str {
                match self {
                    $( Self::$variant => $text, )*
                    Self::Other(text) => text,
                }
            }
        }

        impl From<&str> for $name {
            fn from(text: &str) -> Self {
                match text {
                    $( $text => Self::$variant, )*
                    other => Self::Other(String::from(other)),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(
                &self,
                serializer: S,
            ) -> std::result::Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(
                deserializer: D,
            ) -> std::result::Result<Self, D::Error> {
                let text = <String as serde::Deserialize>::deserialize(deserializer)?;
                Ok(Self::from(text.as_str()))
            }
        }
    };
}

mod artwork;
mod available;
mod lineup;
mod program;
mod schedule;
mod status;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ServiceError;
use crate::error_code::ErrorCode;

pub use artwork::{
    Artwork, ArtworkAspectRatio, ArtworkCaption, ArtworkCategory, ArtworkPayload, ArtworkResponse,
    ArtworkSize, ArtworkTier,
};
pub use available::{AvailableDvbs, Country, Service};
pub use lineup::{
    BroadcasterInfo, ChangeLineupResponse, ChannelMap, ChannelResponse, ChannelResponseMeta,
    Headend, Lineup, LineupResponse, Station, StationLogo, StationPreview,
};
pub use program::{
    Animation, Audience, Award, ContentRating, Description, EntityType, EventDetails,
    LanguageCrossReference, Metadata, Movie, MovieQualityRating, Part, Person, ProgramDescription,
    ProgramInfo, Recommendation, ShowSubType, StillRunningResponse, StillRunningResult, Team,
    Title, show_id_for_episode_id,
};
pub use schedule::{
    LastModifiedEntry, LiveTapeDelay, PremiereType, Program, Schedule, ScheduleMeta,
    StationScheduleRequest, SyndicationType,
};
pub use status::{AccountInfo, Status, StatusResponse, TokenResponse, VersionResponse};

/// Fields common to every service reply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaseResponse {
    /// Short response keyword, e.g. `OK` or an error wire string.
    pub response: String,
    /// Service error code; `0` on success.
    pub code: ErrorCode,
    /// Identifier of the server that handled the request.
    #[serde(rename = "serverID")]
    pub server_id: String,
    /// Human-readable message.
    pub message: String,
    /// Server timestamp.
    pub datetime: Option<DateTime<Utc>>,
}

impl BaseResponse {
    /// Returns `true` when the envelope reports a non-zero code.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        !self.code.is_ok()
    }

    /// Converts the envelope into a [`ServiceError`].
    #[must_use]
    pub fn into_service_error(self) -> ServiceError {
        ServiceError {
            code: self.code,
            message: self.message,
            server_id: self.server_id,
            datetime: self.datetime,
            response: self.response,
        }
    }
}
