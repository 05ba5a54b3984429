//! Panel configuration types and builder

pub use crate::error::BuilderError;
use crate::command::{COLOR_FORMAT_16BPP, COLOR_FORMAT_18BPP, COLOR_FORMAT_24BPP};
use crate::variants::PanelVariant;

/// Maximum number of DSI data lanes
pub const MAX_LANES: u8 = 4;

/// Brightness ceiling reported to backlight subsystems
pub const MAX_BRIGHTNESS: u8 = 255;

/// Datasheet delays, in milliseconds
///
/// Every field is a minimum. Overrides may only lengthen them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DelayProfile {
    /// Supply enabled to reset released
    pub power_to_reset_ms: u32,
    /// Reset pulse width used when powering down
    pub reset_pulse_ms: u32,
    /// Reset released to first command
    pub reset_settle_ms: u32,
    /// Sleep exit to display on
    pub display_on_settle_ms: u32,
    /// Backlight off to display off
    pub backlight_off_settle_ms: u32,
    /// Minimum time between power off and the next power on (0 = none)
    pub power_off_dwell_ms: u32,
}

impl DelayProfile {
    /// Check that every delay is at least the one in `minimum`
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::DelayBelowMinimum` naming the first field that
    /// is too short.
    pub fn covers(&self, minimum: &DelayProfile) -> Result<(), BuilderError> {
        let fields = [
            ("power_to_reset", self.power_to_reset_ms, minimum.power_to_reset_ms),
            ("reset_pulse", self.reset_pulse_ms, minimum.reset_pulse_ms),
            ("reset_settle", self.reset_settle_ms, minimum.reset_settle_ms),
            (
                "display_on_settle",
                self.display_on_settle_ms,
                minimum.display_on_settle_ms,
            ),
            (
                "backlight_off_settle",
                self.backlight_off_settle_ms,
                minimum.backlight_off_settle_ms,
            ),
            (
                "power_off_dwell",
                self.power_off_dwell_ms,
                minimum.power_off_dwell_ms,
            ),
        ];
        for (name, requested, minimum) in fields {
            if requested < minimum {
                return Err(BuilderError::DelayBelowMinimum {
                    name,
                    requested,
                    minimum,
                });
            }
        }
        Ok(())
    }
}

/// DSI pixel format
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PixelFormat {
    /// 24 bits per pixel
    #[default]
    Rgb888,
    /// 18 bits per pixel, loosely packed
    Rgb666,
    /// 18 bits per pixel, packed
    Rgb666Packed,
    /// 16 bits per pixel
    Rgb565,
}

impl PixelFormat {
    /// The panel's DCS color format code for this pixel format
    pub const fn dcs_color_format(&self) -> u8 {
        match self {
            Self::Rgb565 => COLOR_FORMAT_16BPP,
            Self::Rgb666 | Self::Rgb666Packed => COLOR_FORMAT_18BPP,
            Self::Rgb888 => COLOR_FORMAT_24BPP,
        }
    }

    /// Bits per pixel on the link
    pub const fn bits_per_pixel(&self) -> u8 {
        match self {
            Self::Rgb888 => 24,
            Self::Rgb666 | Self::Rgb666Packed => 18,
            Self::Rgb565 => 16,
        }
    }
}

/// DSI video transmission mode
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VideoMode {
    /// Burst mode
    Burst,
    /// Non-burst with sync events
    #[default]
    SyncEvents,
    /// Non-burst with sync pulses
    SyncPulses,
}

impl VideoMode {
    /// Decode the `video-mode` device-tree property (0, 1 or 2)
    pub const fn from_index(index: u32) -> Option<Self> {
        match index {
            0 => Some(Self::Burst),
            1 => Some(Self::SyncEvents),
            2 => Some(Self::SyncPulses),
            _ => None,
        }
    }
}

/// Link parameters the host DSI controller needs
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LinkConfig {
    /// Number of data lanes
    pub lanes: u8,
    /// Pixel format
    pub format: PixelFormat,
    /// Video transmission mode
    pub video_mode: VideoMode,
    /// Send horizontal sync end packets
    pub hsync_end_packets: bool,
}

/// Panel configuration
///
/// Use `Builder` to create a Config.
#[derive(Clone, Debug)]
pub struct Config {
    /// Panel variant
    pub variant: &'static PanelVariant,
    /// DSI link parameters
    pub link: LinkConfig,
    /// Effective delays (variant minimums or longer)
    pub delays: DelayProfile,
    /// Brightness before the first read-back
    pub initial_brightness: u8,
    /// Whether the reset line is active high
    pub reset_active_high: bool,
}

impl Config {
    /// DSI link parameters
    pub fn link(&self) -> LinkConfig {
        self.link
    }
}

/// Builder for constructing panel configuration
///
/// # Example
///
/// ```
/// use am4001280::variants::AM4001280;
/// use am4001280::{Builder, VideoMode};
///
/// let config = match Builder::new()
///     .variant(&AM4001280)
///     .lanes(4)
///     .video_mode(VideoMode::Burst)
///     .build()
/// {
///     Ok(config) => config,
///     Err(_) => return,
/// };
/// assert_eq!(config.initial_brightness, 200);
/// ```
#[must_use]
#[derive(Default)]
pub struct Builder {
    /// Panel variant (required)
    variant: Option<&'static PanelVariant>,
    /// Number of data lanes (required)
    lanes: Option<u8>,
    /// DSI pixel format
    format: PixelFormat,
    /// Video transmission mode
    video_mode: VideoMode,
    /// Delay override
    delays: Option<DelayProfile>,
    /// Initial brightness override
    initial_brightness: Option<u8>,
    /// Reset polarity
    reset_active_high: bool,
}

impl Builder {
    /// Create a new Builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the panel variant (required)
    pub fn variant(mut self, variant: &'static PanelVariant) -> Self {
        self.variant = Some(variant);
        self
    }

    /// Set the number of DSI data lanes (required)
    pub fn lanes(mut self, lanes: u8) -> Self {
        self.lanes = Some(lanes);
        self
    }

    /// Set the DSI pixel format
    pub fn pixel_format(mut self, format: PixelFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the video transmission mode
    pub fn video_mode(mut self, mode: VideoMode) -> Self {
        self.video_mode = mode;
        self
    }

    /// Override the variant's delays
    ///
    /// Every field must be at least the variant's datasheet value.
    pub fn delays(mut self, delays: DelayProfile) -> Self {
        self.delays = Some(delays);
        self
    }

    /// Set the brightness assumed before the first read-back
    pub fn initial_brightness(mut self, level: u8) -> Self {
        self.initial_brightness = Some(level);
        self
    }

    /// Set whether the reset line is active high
    pub fn reset_active_high(mut self, active_high: bool) -> Self {
        self.reset_active_high = active_high;
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::MissingVariant` or `BuilderError::MissingLanes`
    /// if a required value was not set, `BuilderError::InvalidLaneCount` for
    /// a lane count outside 1..=4, and `BuilderError::DelayBelowMinimum` if a
    /// delay override is shorter than the datasheet allows.
    pub fn build(self) -> Result<Config, BuilderError> {
        let variant = self.variant.ok_or(BuilderError::MissingVariant)?;
        let lanes = self.lanes.ok_or(BuilderError::MissingLanes)?;
        if lanes == 0 || lanes > MAX_LANES {
            return Err(BuilderError::InvalidLaneCount(lanes));
        }
        let delays = match self.delays {
            Some(delays) => {
                delays.covers(&variant.delays)?;
                delays
            }
            None => variant.delays,
        };

        Ok(Config {
            variant,
            link: LinkConfig {
                lanes,
                format: self.format,
                video_mode: self.video_mode,
                hsync_end_packets: true,
            },
            delays,
            initial_brightness: self
                .initial_brightness
                .unwrap_or(variant.default_brightness),
            reset_active_high: self.reset_active_high,
        })
    }
}
