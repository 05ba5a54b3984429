//! Backlight control
//!
//! The panel's backlight is driven through the DCS brightness commands on
//! the same command bus as everything else. Backlight calls may come from a
//! different thread than lifecycle calls; they only take exclusive access for
//! their own bus transfer, and are no-ops while the panel is unpowered.

use core::sync::atomic::Ordering;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use log::{debug, error, warn};

use crate::clock::Clock;
use crate::config::MAX_BRIGHTNESS;
use crate::error::Error;
use crate::interface::CommandBus;
use crate::panel::{Panel, PanelError};
use crate::power::PowerSupply;

/// How brightness values map to light output
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BacklightType {
    /// Values go straight to the hardware register
    Raw,
}

/// Static and current backlight properties
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BacklightProperties {
    /// Value scale
    pub kind: BacklightType,
    /// Last known brightness
    pub brightness: u8,
    /// Highest accepted brightness
    pub max_brightness: u8,
}

impl<B, S, R, D, C> Panel<B, S, R, D, C>
where
    B: CommandBus,
    S: PowerSupply,
    R: OutputPin,
    D: DelayNs,
    C: Clock,
{
    /// Set the backlight brightness
    ///
    /// While the panel is unprepared the level is only remembered; it is
    /// written the next time the panel is enabled.
    ///
    /// # Errors
    ///
    /// [`Error::Backlight`] if the brightness write fails. The remembered
    /// level is left unchanged in that case.
    pub fn set_brightness(&self, level: u8) -> Result<(), PanelError<B, S>> {
        let guard = self.inner.upgradeable_read();
        if !guard.state.is_prepared() {
            warn!("Panel not prepared, caching brightness {}", level);
            self.brightness.store(level, Ordering::Relaxed);
            return Ok(());
        }

        let mut inner = guard.upgrade();
        inner.hw.bus.write_brightness(level).map_err(|e| {
            error!("Failed to set brightness {}: {:?}", level, e);
            Error::Backlight(e)
        })?;
        self.brightness.store(level, Ordering::Relaxed);
        Ok(())
    }

    /// Read the backlight brightness back from the panel
    ///
    /// While the panel is unprepared this returns the remembered level
    /// without touching the bus.
    ///
    /// # Errors
    ///
    /// [`Error::Backlight`] if the brightness read fails.
    pub fn get_brightness(&self) -> Result<u8, PanelError<B, S>> {
        let guard = self.inner.upgradeable_read();
        if !guard.state.is_prepared() {
            return Ok(self.cached_brightness());
        }

        let mut inner = guard.upgrade();
        let raw = inner.hw.bus.read_brightness().map_err(|e| {
            error!("Failed to read brightness: {:?}", e);
            Error::Backlight(e)
        })?;
        let level = (raw & 0xff) as u8;
        self.brightness.store(level, Ordering::Relaxed);
        Ok(level)
    }

    /// Last brightness set or read back
    pub fn cached_brightness(&self) -> u8 {
        self.brightness.load(Ordering::Relaxed)
    }

    /// Backlight properties
    pub fn backlight_properties(&self) -> BacklightProperties {
        BacklightProperties {
            kind: BacklightType::Raw,
            brightness: self.cached_brightness(),
            max_brightness: MAX_BRIGHTNESS,
        }
    }

    pub(crate) fn backlight_on(&self, bus: &mut B) -> Result<(), PanelError<B, S>> {
        let level = self.cached_brightness();
        debug!("Backlight on at {}", level);
        bus.write_brightness(level).map_err(|e| {
            error!("Failed to enable backlight: {:?}", e);
            Error::Backlight(e)
        })
    }

    pub(crate) fn backlight_off(bus: &mut B) -> Result<(), PanelError<B, S>> {
        bus.write_brightness(0).map_err(|e| {
            error!("Failed to disable backlight: {:?}", e);
            Error::Backlight(e)
        })
    }
}

/// The interface a host backlight subsystem drives
pub trait BacklightOps {
    /// Error type for backlight operations
    type Error;

    /// Apply a new brightness
    fn update_status(&self, brightness: u8) -> Result<(), Self::Error>;

    /// Current brightness
    fn get_brightness(&self) -> Result<u8, Self::Error>;

    /// Type, current and maximum brightness
    fn properties(&self) -> BacklightProperties;
}

impl<B, S, R, D, C> BacklightOps for Panel<B, S, R, D, C>
where
    B: CommandBus,
    S: PowerSupply,
    R: OutputPin,
    D: DelayNs,
    C: Clock,
{
    type Error = PanelError<B, S>;

    fn update_status(&self, brightness: u8) -> Result<(), Self::Error> {
        self.set_brightness(brightness)
    }

    fn get_brightness(&self) -> Result<u8, Self::Error> {
        Panel::get_brightness(self)
    }

    fn properties(&self) -> BacklightProperties {
        self.backlight_properties()
    }
}
