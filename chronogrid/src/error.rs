//! Errors raised while parsing host-supplied configuration strings.
//!
//! Navigation itself never fails; these only surface when a host hands the
//! library text such as `"decade"` or `"+05:30"`.

use thiserror::Error;

/// Result alias for fallible chronogrid parsing.
pub type Result<T> = std::result::Result<T, Error>;

/// Parse failures for granularities, zones and keys.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The text does not name a granularity.
    #[error("unknown granularity `{0}`, expected one of decade, year, month, day, hour")]
    UnknownGranularity(String),
    /// The text does not name a legacy view.
    #[error("unknown legacy view `{0}`, expected one of year, month, day, hour, minute")]
    UnknownLegacyView(String),
    /// The text is neither `utc`, `local` nor a `+HH:MM` offset.
    #[error("invalid zone `{0}`, expected `utc`, `local` or an offset like `+05:30`")]
    InvalidZone(String),
    /// The key name is not one the picker reacts to.
    #[error("key `{0}` is not handled by the picker")]
    UnknownKey(String),
}
