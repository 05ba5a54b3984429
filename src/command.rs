//! DCS command definitions and manufacturer command-set upload
//!
//! This module defines the MIPI Display Command Set (DCS) opcodes the driver
//! issues during lifecycle transitions, the vendor color-format codes, and the
//! [`CommandEntry`] type used to describe a manufacturer command set (MCS).
//!
//! ## Command Set Structure
//!
//! A manufacturer command set is an ordered list of `(register, value)` pairs.
//! Each pair is sent as one two-byte generic write. Writes to the page-select
//! register ([`MCS_PAGE_SELECT`]) change which bank the following register
//! addresses refer to, so entries must be replayed exactly in order.
//!
//! ## Example
//!
//! ```
//! use am4001280::command::{CommandEntry, push_command_set};
//! use am4001280::{CommandBus, LinkMode};
//! # struct Bus;
//! # impl CommandBus for Bus {
//! #     type Error = ();
//! #     fn generic_write(&mut self, _payload: &[u8]) -> Result<(), ()> { Ok(()) }
//! #     fn dcs_write(&mut self, _cmd: u8, _params: &[u8]) -> Result<(), ()> { Ok(()) }
//! #     fn dcs_read(&mut self, _cmd: u8, _buf: &mut [u8]) -> Result<(), ()> { Ok(()) }
//! #     fn set_link_mode(&mut self, _mode: LinkMode) {}
//! # }
//! # let mut bus = Bus;
//! const INIT: &[CommandEntry] = &[
//!     CommandEntry::new(0xB1, 0x00), // select page 0
//!     CommandEntry::new(0x89, 0x01),
//! ];
//!
//! assert!(push_command_set(&mut bus, INIT).is_ok());
//! ```

use core::fmt::Debug;

use crate::interface::CommandBus;

// Standard DCS commands

/// Soft reset (0x01)
///
/// Resets the panel's command registers to their defaults. The panel ends up
/// in sleep-in state and needs at least 5ms before accepting the next command.
pub const SOFT_RESET: u8 = 0x01;

/// Enter sleep mode (0x10)
///
/// Stops the internal oscillator and DC/DC converters.
pub const ENTER_SLEEP_MODE: u8 = 0x10;

/// Exit sleep mode (0x11)
pub const EXIT_SLEEP_MODE: u8 = 0x11;

/// Set display off (0x28)
///
/// Blanks the output. Frame memory is kept.
pub const SET_DISPLAY_OFF: u8 = 0x28;

/// Set display on (0x29)
pub const SET_DISPLAY_ON: u8 = 0x29;

/// Exit idle mode (0x38)
pub const EXIT_IDLE_MODE: u8 = 0x38;

/// Enter idle mode (0x39)
///
/// Reduced color depth, lower power. Used to park the panel while pacing
/// power cycles.
pub const ENTER_IDLE_MODE: u8 = 0x39;

/// Set display brightness (0x51)
///
/// Takes a 16-bit little-endian brightness value. This panel only honours
/// the low byte.
pub const SET_DISPLAY_BRIGHTNESS: u8 = 0x51;

/// Get display brightness (0x52)
///
/// Returns two bytes, little-endian.
pub const GET_DISPLAY_BRIGHTNESS: u8 = 0x52;

// Vendor commands

/// MCS page-select register (0xB1)
///
/// Selects the register bank addressed by subsequent MCS writes.
pub const MCS_PAGE_SELECT: u8 = 0xB1;

/// 16 bits per pixel color format code
pub const COLOR_FORMAT_16BPP: u8 = 0x55;

/// 18 bits per pixel color format code
pub const COLOR_FORMAT_18BPP: u8 = 0x66;

/// 24 bits per pixel color format code
pub const COLOR_FORMAT_24BPP: u8 = 0x77;

/// A single manufacturer command set write
///
/// Sent on the wire as the two bytes `[register, value]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CommandEntry {
    /// Register address (meaning depends on the currently selected page)
    pub register: u8,
    /// Value written to the register
    pub value: u8,
}

impl CommandEntry {
    /// Create a new entry
    pub const fn new(register: u8, value: u8) -> Self {
        Self { register, value }
    }

    /// The two-byte payload sent for this entry
    pub const fn payload(&self) -> [u8; 2] {
        [self.register, self.value]
    }

    /// Whether this entry switches the MCS register page
    pub const fn is_page_select(&self) -> bool {
        self.register == MCS_PAGE_SELECT
    }
}

/// Failure while replaying a command set
///
/// `index` is the position of the entry whose write failed. Entries before it
/// were written, entries from it onwards were not attempted.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandSetError<E> {
    /// Index of the failing entry
    pub index: usize,
    /// Error reported by the command bus
    pub source: E,
}

impl<E: Debug> core::fmt::Display for CommandSetError<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "Command set write {} failed: {:?}",
            self.index, self.source
        )
    }
}

impl<E: Debug> core::error::Error for CommandSetError<E> {}

/// Replay a command set over the command bus
///
/// Every entry is sent as its own two-byte generic write, strictly in order.
/// Stops at the first failing write; there is no retry.
pub fn push_command_set<B: CommandBus>(
    bus: &mut B,
    entries: &[CommandEntry],
) -> Result<(), CommandSetError<B::Error>> {
    for (index, entry) in entries.iter().enumerate() {
        bus.generic_write(&entry.payload())
            .map_err(|source| CommandSetError { index, source })?;
    }
    Ok(())
}
