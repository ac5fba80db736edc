//! Schedules Direct service error codes.
//!
//! Every reply from the service carries a numeric `code`. Known codes map
//! one-to-one onto a machine-readable wire string and a human message.
//! Unknown codes are kept as [`ErrorCode::Unknown`] so they survive a
//! decode/encode round trip.

use std::borrow::Cow;
use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};

/// Generates [`ErrorCode`] and its lookup tables from one list of
/// `Variant = code, "WIRE", "message";` rows.
macro_rules! error_codes {
    ($( $(#[$meta:meta])* $variant:ident = $code:literal, $wire:literal, $message:literal; )*) => {
        /// A service error code.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum ErrorCode {
            $( $(#[$meta])* $variant, )*
            /// A numeric code this library does not know about.
            Unknown(u32),
        }

        impl ErrorCode {
            /// Every known code, in ascending numeric order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),*];

            /// Maps a numeric code onto its variant.
            #[must_use]
            pub const fn from_code(code: u32) -> Self {
                match code {
                    $( $code => Self::$variant, )*
                    other => Self::Unknown(other),
                }
            }

            /// Returns the numeric code.
            #[must_use]
            pub const fn code(self) -> u32 {
                match self {
                    $( Self::$variant => $code, )*
                    Self::Unknown(code) => code,
                }
            }

            /// Looks up a known code by its wire string.
            #[must_use]
            pub fn from_wire(wire: &str) -> Option<Self> {
                match wire {
                    $( $wire => Some(Self::$variant), )*
                    _ => None,
                }
            }

            /// Returns the wire string, or `Unknown(<code>)`.
            #[must_use]
            pub fn wire(self) -> Cow<'static, str> {
                match self {
                    $( Self::$variant => Cow::Borrowed($wire), )*
                    Self::Unknown(code) => Cow::Owned(format!("Unknown({code})")),
                }
            }

            /// Returns the human-readable message, or `Unknown(<code>)`.
            #[must_use]
            pub fn message(self) -> Cow<'static, str> {
                match self {
                    $( Self::$variant => Cow::Borrowed($message), )*
                    Self::Unknown(code) => Cow::Owned(format!("Unknown({code})")),
                }
            }
        }
    };
}

error_codes! {
    /// No error.
    Ok = 0, "OK", "OK";
    /// Request body was not valid JSON.
    InvalidJson = 1001, "INVALID_JSON", "Unable to decode JSON";
    /// The request did not advertise `Accept-Encoding: deflate`.
    DeflateRequired = 1002, "DEFLATE_REQUIRED", "Did not receive Accept-Encoding: deflate in request.";
    /// The `token` header was missing.
    TokenMissing = 1004, "TOKEN_MISSING", "Token required but not provided in request header.";
    /// Unsupported command.
    UnsupportedCommand = 2000, "UNSUPPORTED_COMMAND", "Unsupported command";
    /// Request is missing an action.
    RequiredActionMissing = 2001, "REQUIRED_ACTION_MISSING", "Request is missing an action to take.";
    /// Request body was empty.
    RequiredRequestMissing = 2002, "REQUIRED_REQUEST_MISSING", "Did not receive request.";
    /// Missing `country` parameter.
    RequiredParameterMissingCountry = 2004, "REQUIRED_PARAMETER_MISSING:COUNTRY",
        "In order to search for lineups, you must supply a 3-letter country parameter.";
    /// Missing `postalcode` parameter.
    RequiredParameterMissingPostalCode = 2005, "REQUIRED_PARAMETER_MISSING:POSTALCODE",
        "In order to search for lineups, you must supply a postal code parameter.";
    /// Missing message ID on delete.
    RequiredParameterMissingMessageId = 2006, "REQUIRED_PARAMETER_MISSING:MESSAGEID",
        "In order to delete a message you must supply the messageID.";
    /// Country is not ISO-3166-1 alpha 3.
    InvalidParameterCountry = 2050, "INVALID_PARAMETER:COUNTRY",
        "The COUNTRY parameter must be ISO-3166-1 alpha 3. See http://en.wikipedia.org/wiki/ISO_3166-1_alpha-3";
    /// Postal code is not valid for the country.
    InvalidParameterPostalCode = 2051, "INVALID_PARAMETER:POSTALCODE",
        "The POSTALCODE parameter must be valid for the country you are searching. Post message to http://forums.schedulesdirect.org/viewforum.php?f=6 if you are having issues.";
    /// Unknown fetch type.
    InvalidParameterFetchType = 2052, "INVALID_PARAMETER:FETCHTYPE",
        "You didn't provide a fetchtype I know how to handle.";
    /// Lineup already in account.
    DuplicateLineup = 2100, "DUPLICATE_LINEUP", "Lineup already in account.";
    /// Lineup not in account.
    LineupNotFound = 2101, "LINEUP_NOT_FOUND",
        "Lineup not in account. Add lineup to account before requesting mapping.";
    /// Unknown lineup.
    UnknownLineup = 2102, "UNKNOWN_LINEUP",
        "Invalid lineup requested. Check your COUNTRY / POSTALCODE combination for validity.";
    /// Deleting a lineup that is not in the account.
    InvalidLineupDelete = 2103, "INVALID_LINEUP_DELETE", "Delete of lineup not in account.";
    /// Malformed lineup identifier.
    LineupWrongFormat = 2104, "LINEUP_WRONG_FORMAT",
        "Lineup must be formatted COUNTRY-LINEUP-DEVICE or COUNTRY-OTA-POSTALCODE";
    /// Lineup does not exist.
    InvalidLineup = 2105, "INVALID_LINEUP", "The lineup you submitted doesn't exist.";
    /// Lineup was deleted server side.
    LineupDeleted = 2106, "LINEUP_DELETED", "The lineup you requested has been deleted from the server.";
    /// Lineup is still being generated.
    LineupQueued = 2107, "LINEUP_QUEUED", "The lineup is being generated on the server. Please retry.";
    /// Unknown or empty country.
    InvalidCountry = 2108, "INVALID_COUNTRY",
        "The country you requested is either mis-typed or does not have valid data.";
    /// Station is not in any lineup of the account.
    StationIdNotFound = 2200, "STATIONID_NOT_FOUND",
        "The stationID you requested is not in any of your lineups.";
    /// Maintenance window.
    ServiceOffline = 3000, "SERVICE_OFFLINE", "Server offline for maintenance.";
    /// Account expired.
    AccountExpired = 4001, "ACCOUNT_EXPIRED", "Account expired.";
    /// Password hash is not a lowercase SHA-1 hex digest.
    InvalidHash = 4002, "INVALID_HASH", "Password hash must be lowercase 40 character sha1_hex of password.";
    /// Bad username or password.
    InvalidUser = 4003, "INVALID_USER", "Invalid username or password.";
    /// Too many failed logins.
    AccountLockout = 4004, "ACCOUNT_LOCKOUT", "Too many login failures. Locked for 15 minutes.";
    /// Account disabled.
    AccountDisabled = 4005, "ACCOUNT_DISABLED",
        "Account has been disabled. Please contact Schedules Direct support: admin@schedulesdirect.org for more information.";
    /// Token expired.
    TokenExpired = 4006, "TOKEN_EXPIRED", "Token has expired. Request new token.";
    /// Daily lineup change limit reached.
    MaxLineupChangesReached = 4100, "MAX_LINEUP_CHANGES_REACHED",
        "Exceeded maximum number of lineup changes for today.";
    /// Lineup limit reached.
    MaxLineups = 4101, "MAX_LINEUPS", "Exceeded number of lineups for this account.";
    /// Account has no lineups.
    NoLineups = 4102, "NO_LINEUPS", "No lineups have been added to this account.";
    /// Image not found.
    ImageNotFound = 5000, "IMAGE_NOT_FOUND",
        "Could not find requested image. Post message to http://forums.schedulesdirect.org/viewforum.php?f=6 if you are having issues.";
    /// Program ID does not exist.
    InvalidProgramId = 6000, "INVALID_PROGRAMID", "Could not find requested programID. Permanent failure.";
    /// Program is being regenerated.
    ProgramIdQueued = 6001, "PROGRAMID_QUEUED",
        "ProgramID should exist at the server, but doesn't. The server will regenerate the JSON for the program, so your application should retry.";
    /// Schedule missing server side.
    ScheduleNotFound = 7000, "SCHEDULE_NOT_FOUND",
        "The schedule you requested should be available. Post message to http://forums.schedulesdirect.org/viewforum.php?f=6";
    /// Schedule request could not be validated.
    InvalidScheduleRequest = 7010, "INVALID_SCHEDULE_REQUEST",
        "The server can't determine whether your schedule is valid or not. Open a support ticket.";
    /// Requested date is outside the station's data.
    ScheduleRangeExceeded = 7020, "SCHEDULE_RANGE_EXCEEDED",
        "The date that you've requested is outside of the range of the data for that stationID.";
    /// Station is not in any configured lineup.
    ScheduleNotInLineup = 7030, "SCHEDULE_NOT_IN_LINEUP",
        "You have requested a schedule which is not in any of your configured lineups.";
    /// Schedule is queued for generation.
    ScheduleQueued = 7100, "SCHEDULE_QUEUED",
        "The schedule you requested has been queued for generation but is not yet ready for download. Retry.";
    /// Catch-all server failure.
    Hcf = 9999, "HCF", "Unknown error. Open support ticket.";
}

impl ErrorCode {
    /// Returns `true` for [`ErrorCode::Ok`].
    #[must_use]
    pub const fn is_ok(self) -> bool {
        matches!(self, Self::Ok)
    }

    /// Returns `true` when the service rejected the session credentials,
    /// meaning a fresh token may fix the request.
    #[must_use]
    pub const fn is_auth_rejection(self) -> bool {
        matches!(self, Self::InvalidUser | Self::TokenExpired)
    }

    /// Overwrites `self` with the code decoded from a raw JSON literal.
    ///
    /// A `null` literal leaves `self` unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if the literal is neither an integer, a
    /// quoted integer, nor a known wire string.
    pub fn update_from_json(&mut self, raw: &[u8]) -> Result<()> {
        if raw.trim_ascii() == b"null" {
            return Ok(());
        }
        *self = serde_json::from_slice(raw).map_err(|e| Error::decode(e, raw))?;
        Ok(())
    }
}

impl Default for ErrorCode {
    fn default() -> Self {
        Self::Ok
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (code: {}, wire: {})",
            self.message(),
            self.code(),
            self.wire()
        )
    }
}

impl std::error::Error for ErrorCode {}

impl Serialize for ErrorCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.code())
    }
}

impl<'de> Deserialize<'de> for ErrorCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(ErrorCodeVisitor)
    }
}

/// Accepts `4003`, `"4003"` or `"INVALID_USER"`.
struct ErrorCodeVisitor;

impl Visitor<'_> for ErrorCodeVisitor {
    type Value = ErrorCode;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an error code integer or wire string")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Self::Value, E> {
        u32::try_from(v)
            .map(ErrorCode::from_code)
            .map_err(|_| E::custom(format!("error code out of range: {v}")))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Self::Value, E> {
        u32::try_from(v)
            .map(ErrorCode::from_code)
            .map_err(|_| E::custom(format!("error code out of range: {v}")))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Self::Value, E> {
        let trimmed = v.trim();
        if let Ok(code) = trimmed.parse::<u32>() {
            return Ok(ErrorCode::from_code(code));
        }
        ErrorCode::from_wire(trimmed)
            .ok_or_else(|| E::custom(format!("unknown error code wire string: {trimmed:?}")))
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<Self::Value, E> {
        Ok(ErrorCode::default())
    }

    fn visit_none<E: de::Error>(self) -> std::result::Result<Self::Value, E> {
        Ok(ErrorCode::default())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_every_known_code_round_trips_through_json() {
        for &code in ErrorCode::ALL {
            // Act
            let encoded = serde_json::to_string(&code).unwrap();
            let decoded: ErrorCode = serde_json::from_str(&encoded).unwrap();

            // Assert
            assert_eq!(encoded, code.code().to_string());
            assert_eq!(decoded, code);
        }
    }

    #[test]
    fn test_every_known_code_round_trips_through_wire_string() {
        for &code in ErrorCode::ALL {
            // Arrange
            let quoted = format!("\"{}\"", code.wire());

            // Act
            let decoded: ErrorCode = serde_json::from_str(&quoted).unwrap();

            // Assert
            assert_eq!(decoded, code);
            assert_eq!(ErrorCode::from_wire(&code.wire()), Some(code));
        }
    }

    #[test]
    fn test_wire_strings_are_unique() {
        // Arrange
        let mut wires: Vec<_> = ErrorCode::ALL.iter().map(|c| c.wire()).collect();

        // Act
        wires.sort();
        wires.dedup();

        // Assert
        assert_eq!(wires.len(), ErrorCode::ALL.len());
    }

    #[test]
    fn test_unknown_code_round_trips() {
        // Arrange & Act
        let decoded: ErrorCode = serde_json::from_str("4242").unwrap();
        let encoded = serde_json::to_string(&decoded).unwrap();

        // Assert
        assert_eq!(decoded, ErrorCode::Unknown(4242));
        assert_eq!(encoded, "4242");
        assert_eq!(decoded.wire(), "Unknown(4242)");
        assert_eq!(decoded.message(), "Unknown(4242)");
    }

    #[test]
    fn test_quoted_integer_decodes() {
        // Arrange & Act
        let decoded: ErrorCode = serde_json::from_str("\" 4006 \"").unwrap();

        // Assert
        assert_eq!(decoded, ErrorCode::TokenExpired);
    }

    #[test]
    fn test_colon_qualified_wire_string_decodes() {
        // Arrange & Act
        let decoded: ErrorCode =
            serde_json::from_str("\"REQUIRED_PARAMETER_MISSING:POSTALCODE\"").unwrap();

        // Assert
        assert_eq!(decoded, ErrorCode::RequiredParameterMissingPostalCode);
        assert_eq!(decoded.code(), 2005);
    }

    #[test]
    fn test_unrecognized_wire_string_fails() {
        // Arrange & Act
        let result = serde_json::from_str::<ErrorCode>("\"NOT_A_CODE\"");

        // Assert
        assert!(result.is_err());
    }

    #[test]
    fn test_update_from_json_null_is_noop() {
        // Arrange
        let mut code = ErrorCode::ScheduleQueued;

        // Act
        code.update_from_json(b"null").unwrap();

        // Assert
        assert_eq!(code, ErrorCode::ScheduleQueued);
    }

    #[test]
    fn test_update_from_json_overwrites() {
        // Arrange
        let mut code = ErrorCode::Ok;

        // Act
        code.update_from_json(b"\"INVALID_USER\"").unwrap();

        // Assert
        assert_eq!(code, ErrorCode::InvalidUser);
    }

    #[test]
    fn test_update_from_json_rejects_garbage() {
        // Arrange
        let mut code = ErrorCode::Ok;

        // Act
        let result = code.update_from_json(b"\"bogus\"");

        // Assert
        assert!(matches!(result, Err(Error::Decode { .. })));
        assert_eq!(code, ErrorCode::Ok);
    }

    #[test]
    fn test_display_includes_message_code_and_wire() {
        // Arrange & Act
        let text = ErrorCode::TokenExpired.to_string();

        // Assert
        assert_eq!(
            text,
            "Token has expired. Request new token. (code: 4006, wire: TOKEN_EXPIRED)"
        );
    }

    #[test]
    fn test_auth_rejection_codes() {
        // Assert
        assert!(ErrorCode::InvalidUser.is_auth_rejection());
        assert!(ErrorCode::TokenExpired.is_auth_rejection());
        assert!(!ErrorCode::AccountLockout.is_auth_rejection());
        assert!(!ErrorCode::Ok.is_auth_rejection());
    }
}
