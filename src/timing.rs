//! Panel timing and geometry descriptor
//!
//! [`TimingDescriptor`] is the fixed mode a panel variant supports, described
//! the way display controllers consume it: active pixels, sync start/end and
//! total counts per axis, plus physical size, sync polarity, bus flags and the
//! list of acceptable bus formats.
//!
//! ## Example
//!
//! ```
//! use am4001280::variants::AM4001280;
//!
//! let mode = AM4001280.timing;
//! assert_eq!((mode.hdisplay, mode.vdisplay), (400, 1280));
//! assert_eq!(mode.htotal - mode.hdisplay, mode.hblank());
//! ```

/// Signal polarity
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Polarity {
    /// Active high
    Positive,
    /// Active low
    Negative,
}

/// Horizontal and vertical sync polarity
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SyncPolarity {
    /// HSYNC polarity
    pub hsync: Polarity,
    /// VSYNC polarity
    pub vsync: Polarity,
}

/// Bus signal flags for the pixel interface
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BusFlags {
    /// Data-enable signal is active low
    pub de_active_low: bool,
    /// Pixel data is driven on the negative clock edge
    pub pixdata_drive_negedge: bool,
}

/// Pixel bus format, as understood by display connectors
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BusFormat {
    /// 24-bit RGB on a single 24-bit bus sample
    Rgb888_1x24,
    /// 18-bit RGB on a single 18-bit bus sample
    Rgb666_1x18,
    /// 16-bit RGB on a single 16-bit bus sample
    Rgb565_1x16,
}

impl BusFormat {
    /// Media bus format code (Linux `MEDIA_BUS_FMT_*` numbering)
    pub const fn media_bus_code(&self) -> u32 {
        match self {
            Self::Rgb888_1x24 => 0x100a,
            Self::Rgb666_1x18 => 0x1009,
            Self::Rgb565_1x16 => 0x1017,
        }
    }

    /// Bits per pixel on the bus
    pub const fn bits_per_pixel(&self) -> u8 {
        match self {
            Self::Rgb888_1x24 => 24,
            Self::Rgb666_1x18 => 18,
            Self::Rgb565_1x16 => 16,
        }
    }
}

/// Fixed display mode plus connector information for one panel variant
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimingDescriptor {
    /// Pixel clock in kHz
    pub clock_khz: u32,
    /// Active pixels per line
    pub hdisplay: u16,
    /// Start of HSYNC, in pixels from the line start
    pub hsync_start: u16,
    /// End of HSYNC
    pub hsync_end: u16,
    /// Total pixels per line including blanking
    pub htotal: u16,
    /// Active lines per frame
    pub vdisplay: u16,
    /// Start of VSYNC, in lines from the frame start
    pub vsync_start: u16,
    /// End of VSYNC
    pub vsync_end: u16,
    /// Total lines per frame including blanking
    pub vtotal: u16,
    /// Physical width of the active area in millimeters
    pub width_mm: u16,
    /// Physical height of the active area in millimeters
    pub height_mm: u16,
    /// Declared refresh rate in Hz
    pub refresh_hz: u16,
    /// Bits per color component
    pub bpc: u8,
    /// Sync signal polarity
    pub sync: SyncPolarity,
    /// Pixel bus flags
    pub bus_flags: BusFlags,
    /// Acceptable bus formats, most preferred first
    pub bus_formats: &'static [BusFormat],
}

impl TimingDescriptor {
    /// Horizontal front porch in pixels
    pub const fn hfront_porch(&self) -> u16 {
        self.hsync_start.saturating_sub(self.hdisplay)
    }

    /// HSYNC pulse width in pixels
    pub const fn hsync_len(&self) -> u16 {
        self.hsync_end.saturating_sub(self.hsync_start)
    }

    /// Horizontal back porch in pixels
    pub const fn hback_porch(&self) -> u16 {
        self.htotal.saturating_sub(self.hsync_end)
    }

    /// Horizontal blanking in pixels
    pub const fn hblank(&self) -> u16 {
        self.htotal.saturating_sub(self.hdisplay)
    }

    /// Vertical front porch in lines
    pub const fn vfront_porch(&self) -> u16 {
        self.vsync_start.saturating_sub(self.vdisplay)
    }

    /// VSYNC pulse width in lines
    pub const fn vsync_len(&self) -> u16 {
        self.vsync_end.saturating_sub(self.vsync_start)
    }

    /// Vertical back porch in lines
    pub const fn vback_porch(&self) -> u16 {
        self.vtotal.saturating_sub(self.vsync_end)
    }

    /// Vertical blanking in lines
    pub const fn vblank(&self) -> u16 {
        self.vtotal.saturating_sub(self.vdisplay)
    }

    /// Preferred bus format, if any is declared
    pub fn preferred_bus_format(&self) -> Option<BusFormat> {
        self.bus_formats.first().copied()
    }
}

/// Formats the mode name, e.g. `400x1280`
impl core::fmt::Display for TimingDescriptor {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}x{}", self.hdisplay, self.vdisplay)
    }
}
