//! Error types for the driver
//!
//! This module defines error types for configuration building ([`BuilderError`])
//! and panel operations ([`Error`]).
//!
//! ## Error Types
//!
//! - [`BuilderError`] - Errors during configuration construction
//! - [`Error`] - Runtime errors during lifecycle and backlight operations
//! - [`CommandSetError`](crate::command::CommandSetError) - Failure while replaying a command set
//!
//! Lifecycle precondition violations ([`Error::AlreadyPrepared`],
//! [`Error::NotEnabled`], ...) leave the panel untouched; they point at the
//! caller, not the hardware.
//!
//! ## Example
//!
//! ```
//! use am4001280::{Builder, BuilderError};
//!
//! // Missing variant
//! let result = Builder::new().lanes(4).build();
//! assert!(matches!(result, Err(BuilderError::MissingVariant)));
//! ```

use core::fmt::Debug;

use crate::command::CommandSetError;

/// Errors that can occur when driving the panel
///
/// Generic over the command bus error `B` and the power supply error `P` so
/// callers can match on the underlying hardware error.
#[derive(Debug, Clone, PartialEq)]
pub enum Error<B, P> {
    /// Supply rail could not be switched
    Power(P),
    /// A command bus write or read failed
    Bus(B),
    /// Manufacturer command set replay failed
    CommandSet {
        /// Index of the entry whose write failed
        index: usize,
        /// Bus error for that write
        source: B,
    },
    /// Backlight brightness could not be written or read
    Backlight(B),
    /// An argument was out of range
    InvalidArgument,
    /// `prepare` called on a prepared panel
    AlreadyPrepared,
    /// Operation requires a prepared panel
    NotPrepared,
    /// `unprepare` called before `disable`
    StillEnabled,
    /// `disable` called on a panel that is not enabled
    NotEnabled,
    /// `suspend` called while already in DCS sleep
    AlreadySuspended,
    /// `resume` called while not in DCS sleep
    NotSuspended,
    /// Another lifecycle operation is in progress
    ConcurrentTransition,
}

impl<B, P> Error<B, P> {
    /// Whether this error is a precondition violation rather than a hardware failure
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::InvalidArgument
                | Self::AlreadyPrepared
                | Self::NotPrepared
                | Self::StillEnabled
                | Self::NotEnabled
                | Self::AlreadySuspended
                | Self::NotSuspended
                | Self::ConcurrentTransition
        )
    }
}

impl<B, P> From<CommandSetError<B>> for Error<B, P> {
    fn from(e: CommandSetError<B>) -> Self {
        Self::CommandSet {
            index: e.index,
            source: e.source,
        }
    }
}

impl<B: Debug, P: Debug> core::fmt::Display for Error<B, P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Power(e) => write!(f, "Power supply error: {e:?}"),
            Self::Bus(e) => write!(f, "Command bus error: {e:?}"),
            Self::CommandSet { index, source } => {
                write!(f, "Command set write {index} failed: {source:?}")
            }
            Self::Backlight(e) => write!(f, "Backlight error: {e:?}"),
            Self::InvalidArgument => write!(f, "Invalid argument"),
            Self::AlreadyPrepared => write!(f, "Panel already prepared"),
            Self::NotPrepared => write!(f, "Panel not prepared"),
            Self::StillEnabled => write!(f, "Panel still enabled"),
            Self::NotEnabled => write!(f, "Panel not enabled"),
            Self::AlreadySuspended => write!(f, "Panel already in sleep mode"),
            Self::NotSuspended => write!(f, "Panel not in sleep mode"),
            Self::ConcurrentTransition => write!(f, "Another lifecycle transition is in progress"),
        }
    }
}

impl<B: Debug, P: Debug> core::error::Error for Error<B, P> {}

/// Errors that can occur when building configuration
///
/// These errors occur during the builder pattern before the panel is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuilderError {
    /// Panel variant was not specified
    ///
    /// [`Builder::variant()`](crate::config::Builder::variant) must be called before building.
    MissingVariant,
    /// Lane count was not specified
    ///
    /// [`Builder::lanes()`](crate::config::Builder::lanes) must be called before building.
    MissingLanes,
    /// Lane count outside 1..=4
    InvalidLaneCount(u8),
    /// A delay override is shorter than the datasheet minimum
    DelayBelowMinimum {
        /// Delay field name
        name: &'static str,
        /// Requested value in milliseconds
        requested: u32,
        /// Datasheet minimum in milliseconds
        minimum: u32,
    },
}

impl core::fmt::Display for BuilderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::MissingVariant => write!(f, "Panel variant must be specified"),
            Self::MissingLanes => write!(f, "Number of DSI lanes must be specified"),
            Self::InvalidLaneCount(lanes) => {
                write!(f, "Invalid lane count {lanes} (expected 1-4)")
            }
            Self::DelayBelowMinimum {
                name,
                requested,
                minimum,
            } => write!(
                f,
                "Delay {name} of {requested}ms is below the {minimum}ms minimum"
            ),
        }
    }
}

impl core::error::Error for BuilderError {}
