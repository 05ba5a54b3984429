//! Command bus abstraction
//!
//! This module provides the [`CommandBus`] trait through which the driver talks
//! to the panel's command channel. The pixel/video path is owned by the host
//! display controller and is not part of this trait.
//!
//! ## Implementing
//!
//! A host DSI controller implements the four required methods. The DCS
//! vocabulary the driver needs (sleep, display on/off, idle, brightness) comes
//! for free as provided methods built on [`CommandBus::dcs_write`] and
//! [`CommandBus::dcs_read`].
//!
//! ## Example
//!
//! ```
//! use am4001280::{CommandBus, LinkMode};
//!
//! struct HostDsi {
//!     low_power: bool,
//! }
//!
//! impl CommandBus for HostDsi {
//!     type Error = ();
//!
//!     fn generic_write(&mut self, _payload: &[u8]) -> Result<(), ()> {
//!         Ok(())
//!     }
//!
//!     fn dcs_write(&mut self, _command: u8, _params: &[u8]) -> Result<(), ()> {
//!         Ok(())
//!     }
//!
//!     fn dcs_read(&mut self, _command: u8, buf: &mut [u8]) -> Result<(), ()> {
//!         buf.fill(0);
//!         Ok(())
//!     }
//!
//!     fn set_link_mode(&mut self, mode: LinkMode) {
//!         self.low_power = mode == LinkMode::LowPower;
//!     }
//! }
//!
//! let mut dsi = HostDsi { low_power: false };
//! let _ = dsi.enter_sleep_mode();
//! let _ = dsi.write_brightness(128);
//! ```

use core::fmt::Debug;

use crate::command::{
    ENTER_IDLE_MODE, ENTER_SLEEP_MODE, EXIT_IDLE_MODE, EXIT_SLEEP_MODE, GET_DISPLAY_BRIGHTNESS,
    SET_DISPLAY_BRIGHTNESS, SET_DISPLAY_OFF, SET_DISPLAY_ON, SOFT_RESET,
};

type BusResult<T, E> = core::result::Result<T, E>;

/// Command bus signaling mode
///
/// Low-power mode is slow but always allowed; high-speed mode is faster but
/// some commands (and some panel states) only accept low-power transfers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LinkMode {
    /// Low-power (escape mode) transmission
    #[default]
    LowPower,
    /// High-speed transmission
    HighSpeed,
}

/// Trait for the panel's command channel
///
/// All methods are blocking and may sleep. Timeouts on the bus itself are the
/// implementation's responsibility.
pub trait CommandBus {
    /// Error type for bus operations
    ///
    /// Must implement [`Debug`] for error reporting.
    type Error: Debug;

    /// Send a generic (non-DCS) write carrying `payload`
    ///
    /// Used for manufacturer command set entries.
    fn generic_write(&mut self, payload: &[u8]) -> BusResult<(), Self::Error>;

    /// Send a DCS command with optional parameters
    fn dcs_write(&mut self, command: u8, params: &[u8]) -> BusResult<(), Self::Error>;

    /// Send a DCS read command and fill `buf` with the response
    fn dcs_read(&mut self, command: u8, buf: &mut [u8]) -> BusResult<(), Self::Error>;

    /// Switch the signaling mode used for subsequent commands
    fn set_link_mode(&mut self, mode: LinkMode);

    /// Issue a DCS soft reset
    fn soft_reset(&mut self) -> BusResult<(), Self::Error> {
        self.dcs_write(SOFT_RESET, &[])
    }

    /// Enter DCS sleep mode
    fn enter_sleep_mode(&mut self) -> BusResult<(), Self::Error> {
        self.dcs_write(ENTER_SLEEP_MODE, &[])
    }

    /// Exit DCS sleep mode
    fn exit_sleep_mode(&mut self) -> BusResult<(), Self::Error> {
        self.dcs_write(EXIT_SLEEP_MODE, &[])
    }

    /// Turn the display output on
    fn set_display_on(&mut self) -> BusResult<(), Self::Error> {
        self.dcs_write(SET_DISPLAY_ON, &[])
    }

    /// Turn the display output off
    fn set_display_off(&mut self) -> BusResult<(), Self::Error> {
        self.dcs_write(SET_DISPLAY_OFF, &[])
    }

    /// Enter idle mode
    fn enter_idle_mode(&mut self) -> BusResult<(), Self::Error> {
        self.dcs_write(ENTER_IDLE_MODE, &[])
    }

    /// Exit idle mode
    fn exit_idle_mode(&mut self) -> BusResult<(), Self::Error> {
        self.dcs_write(EXIT_IDLE_MODE, &[])
    }

    /// Write the display brightness
    ///
    /// Sent as a 16-bit little-endian value with the high byte zero.
    fn write_brightness(&mut self, level: u8) -> BusResult<(), Self::Error> {
        self.dcs_write(SET_DISPLAY_BRIGHTNESS, &u16::from(level).to_le_bytes())
    }

    /// Read the raw display brightness
    ///
    /// The panel reports 16 bits even though only the low byte is meaningful.
    fn read_brightness(&mut self) -> BusResult<u16, Self::Error> {
        let mut raw = [0u8; 2];
        self.dcs_read(GET_DISPLAY_BRIGHTNESS, &mut raw)?;
        Ok(u16::from_le_bytes(raw))
    }
}
