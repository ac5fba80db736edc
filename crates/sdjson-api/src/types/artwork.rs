//! Artwork records and the per-program artwork envelope.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

use super::BaseResponse;
use crate::wire::{ConvertibleBoolean, JsonInt};

string_enum! {
    /// What level of a program the artwork represents.
    ArtworkTier {
        /// Whole series, regardless of season.
        Series => "Series",
        /// A specific season.
        Season => "Season",
        /// A specific episode.
        Episode => "Episode",
        /// Team vs. team event.
        TeamEventNew => "Team Event (New)",
        /// Sports organization.
        Organization => "Organization",
        /// Sports conference.
        Conference => "Conference",
        /// Sport.
        Sport => "Sport",
        /// Sport event.
        SportEvent => "Sport Event",
        /// College.
        College => "College",
        /// Team.
        Team => "Team",
    }
}

string_enum! {
    /// Kind of artwork.
    ArtworkCategory {
        /// Source-provided image with text.
        Banner => "Banner",
        /// Same as `Banner`.
        BannerL1 => "Banner-L1",
        /// Banner with text.
        BannerL1T => "Banner-L1T",
        /// Source-provided image with plain text.
        BannerL2 => "Banner-L2",
        /// Stock photo with plain text.
        BannerL3 => "Banner-L3",
        /// Logo only.
        BannerLo => "Banner-LO",
        /// Logo plus season number.
        BannerLot => "Banner-LOT",
        /// Representative image, no text.
        Iconic => "Iconic",
        /// Fallback for programs without a unique banner.
        Staple => "Staple",
        /// Cast ensemble, no text.
        CastEnsemble => "Cast Ensemble",
        /// Individual cast member, no text.
        CastInCharacter => "Cast in Character",
        /// Official logo.
        Logo => "Logo",
        /// DVD box art.
        BoxArt => "Box Art",
        /// Theatrical poster.
        PosterArt => "Poster Art",
        /// Movie still.
        SceneStill => "Scene Still",
        /// Same as `SceneStill`.
        Photo => "Photo",
        /// Celebrity headshot.
        PhotoHeadshot => "Photo-headshot",
        /// Video on demand art.
        VodArt => "VOD Art",
    }
}

string_enum! {
    /// Size class.
    ArtworkSize {
        /// Extra small.
        ExtraSmall => "Xs",
        /// Small.
        Small => "Sm",
        /// Medium.
        Medium => "Md",
        /// Large.
        Large => "Lg",
        /// Master.
        Master => "Ms",
    }
}

string_enum! {
    /// Aspect ratio.
    ArtworkAspectRatio {
        /// 16:9
        SixteenByNine => "16x9",
        /// 4:3
        FourByThree => "4x3",
        /// 3:4
        ThreeByFour => "3x4",
        /// 2:3
        TwoByThree => "2x3",
        /// 1:1
        OneByOne => "1x1",
    }
}

/// Caption attached to an artwork.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtworkCaption {
    /// Caption text.
    pub content: String,
    /// Language code.
    #[serde(rename = "lang")]
    pub language: String,
}

/// A single piece of artwork.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Artwork {
    /// Aspect ratio.
    pub aspect: Option<ArtworkAspectRatio>,
    /// Category.
    pub category: Option<ArtworkCategory>,
    /// Height in pixels.
    pub height: JsonInt,
    /// Primary image for its category.
    pub primary: ConvertibleBoolean,
    /// Size class.
    pub size: Option<ArtworkSize>,
    /// Image contains text.
    pub text: ConvertibleBoolean,
    /// Tier.
    pub tier: Option<ArtworkTier>,
    /// Image URI, relative or absolute.
    pub uri: String,
    /// Width in pixels.
    pub width: JsonInt,
    /// Caption.
    pub caption: Option<ArtworkCaption>,
}

/// Either the artwork for a program or the error the service reported for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ArtworkPayload {
    /// Artwork was found.
    Artwork(Vec<Artwork>),
    /// The service reported an error for this program ID.
    Error(BaseResponse),
}

/// Artwork lookup result for one program ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtworkResponse {
    /// Program identifier.
    #[serde(rename = "programID")]
    pub program_id: String,
    /// Artwork or error.
    #[serde(rename = "data")]
    pub payload: ArtworkPayload,
}

impl ArtworkResponse {
    /// Returns the artwork, if any was found.
    #[must_use]
    pub fn artwork(&self) -> Option<&[Artwork]> {
        match &self.payload {
            ArtworkPayload::Artwork(artwork) => Some(artwork),
            ArtworkPayload::Error(_) => None,
        }
    }

    /// Returns the per-program error, if the service sent one.
    #[must_use]
    pub const fn error(&self) -> Option<&BaseResponse> {
        match &self.payload {
            ArtworkPayload::Error(err) => Some(err),
            ArtworkPayload::Artwork(_) => None,
        }
    }
}

/// Raw shape of an artwork entry before `data` is discriminated.
#[derive(Deserialize)]
struct RawArtworkResponse {
    #[serde(rename = "programID", default)]
    program_id: String,
    #[serde(default)]
    data: serde_json::Value,
}

impl<'de> Deserialize<'de> for ArtworkResponse {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawArtworkResponse::deserialize(deserializer)?;
        let payload = match raw.data {
            data @ serde_json::Value::Array(_) => {
                ArtworkPayload::Artwork(serde_json::from_value(data).map_err(de::Error::custom)?)
            }
            data @ serde_json::Value::Object(_) => {
                ArtworkPayload::Error(serde_json::from_value(data).map_err(de::Error::custom)?)
            }
            other => {
                return Err(de::Error::custom(format!(
                    "artwork data for {:?} is neither an array nor an object: {other}",
                    raw.program_id
                )));
            }
        };
        Ok(Self {
            program_id: raw.program_id,
            payload,
        })
    }
}
