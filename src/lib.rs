//! Ampire AM-4001280ATZQW-00H Panel Driver
//!
//! A lifecycle driver for the Ampire AM-4001280ATZQW-00H, a 400x1280 MIPI-DSI
//! panel. The host display controller owns the video stream; this crate owns
//! everything around it: power and reset sequencing, the manufacturer
//! initialization sequence, sleep and idle handling, and the DCS backlight.
//!
//! ## Features
//!
//! - `no_std` compatible
//! - `embedded-hal` v1.0 support
//! - `embedded-graphics` geometry integration (with `graphics` feature)
//! - `std` clock and delay implementations (with `std` feature)
//! - Lifecycle calls and backlight calls are safe to make from different threads
//!
//! ## Lifecycle
//!
//! ```text
//! Unprepared --prepare--> Prepared --enable--> Enabled
//!      ^                     |  ^                 |
//!      +------unprepare------+  +-----disable-----+
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use core::convert::Infallible;
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::digital::{ErrorType, OutputPin};
//! use am4001280::variants::AM4001280;
//! use am4001280::{Builder, Clock, CommandBus, Hardware, Instant, LinkMode, Panel, PowerSupply};
//!
//! # struct Dsi;
//! # impl CommandBus for Dsi {
//! #     type Error = ();
//! #     fn generic_write(&mut self, _payload: &[u8]) -> Result<(), ()> { Ok(()) }
//! #     fn dcs_write(&mut self, _cmd: u8, _params: &[u8]) -> Result<(), ()> { Ok(()) }
//! #     fn dcs_read(&mut self, _cmd: u8, buf: &mut [u8]) -> Result<(), ()> { buf.fill(0); Ok(()) }
//! #     fn set_link_mode(&mut self, _mode: LinkMode) {}
//! # }
//! # struct Regulator;
//! # impl PowerSupply for Regulator {
//! #     type Error = ();
//! #     fn enable(&mut self) -> Result<(), ()> { Ok(()) }
//! #     fn disable(&mut self) -> Result<(), ()> { Ok(()) }
//! # }
//! # struct ResetPin;
//! # impl ErrorType for ResetPin { type Error = Infallible; }
//! # impl OutputPin for ResetPin {
//! #     fn set_low(&mut self) -> Result<(), Infallible> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Infallible> { Ok(()) }
//! # }
//! # struct Delay;
//! # impl DelayNs for Delay { fn delay_ns(&mut self, _ns: u32) {} }
//! # struct Ticks(u64);
//! # impl Clock for Ticks {
//! #     fn now(&mut self) -> Instant { self.0 += 1; Instant::from_micros(self.0) }
//! # }
//! let config = match Builder::new().variant(&AM4001280).lanes(4).build() {
//!     Ok(config) => config,
//!     Err(_) => return,
//! };
//! let hardware = Hardware::new(Dsi, Regulator, Delay, Ticks(0)).with_reset(ResetPin);
//! let panel = Panel::new(hardware, config);
//!
//! let _ = panel.prepare();
//! let _ = panel.enable();
//! let _ = panel.set_brightness(128);
//! assert!(panel.state().is_enabled());
//!
//! panel.shutdown();
//! assert!(!panel.state().is_prepared());
//! ```

#![no_std]

#[cfg(test)]
extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

/// DCS backlight control
pub mod backlight;
/// Monotonic time source
pub mod clock;
/// DCS and manufacturer command definitions
pub mod command;
/// Panel configuration types and builder
pub mod config;
/// Error types for the driver
pub mod error;
/// Command bus abstraction
pub mod interface;
/// Panel lifecycle state machine
pub mod panel;
/// Power supply and reset line capabilities
pub mod power;
/// Display mode description
pub mod timing;
/// Supported panel variants
pub mod variants;

/// Graphics support via embedded-graphics (requires `graphics` feature)
#[cfg(feature = "graphics")]
pub mod graphics;

#[cfg(test)]
mod testing;

pub use backlight::{BacklightOps, BacklightProperties, BacklightType};
pub use clock::{Clock, Instant};
pub use command::{CommandEntry, CommandSetError, push_command_set};
pub use config::{
    Builder, Config, DelayProfile, LinkConfig, MAX_BRIGHTNESS, MAX_LANES, PixelFormat, VideoMode,
};
pub use error::{BuilderError, Error};
pub use interface::{CommandBus, LinkMode};
pub use panel::{Hardware, Panel, PanelError, PanelOps, PanelState, Stage};
pub use power::{GpioSupply, NoPin, PowerSupply, ResetLine};
pub use timing::{BusFlags, BusFormat, Polarity, SyncPolarity, TimingDescriptor};
pub use variants::PanelVariant;

#[cfg(feature = "std")]
pub use clock::{StdClock, StdDelay};
