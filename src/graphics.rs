//! Graphics support via embedded-graphics
//!
//! The pixel path belongs to the host display controller, so there is no
//! draw target here. What the panel contributes is its geometry: both
//! [`TimingDescriptor`] and [`Panel`] implement
//! [`OriginDimensions`], letting layout code size itself from the panel mode.
//!
//! ## Example
//!
//! ```
//! use embedded_graphics_core::geometry::{OriginDimensions, Size};
//! use am4001280::variants::AM4001280;
//!
//! assert_eq!(AM4001280.timing.size(), Size::new(400, 1280));
//! ```

use embedded_graphics_core::geometry::{OriginDimensions, Size};
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::clock::Clock;
use crate::interface::CommandBus;
use crate::panel::Panel;
use crate::power::PowerSupply;
use crate::timing::TimingDescriptor;

impl OriginDimensions for TimingDescriptor {
    fn size(&self) -> Size {
        Size::new(u32::from(self.hdisplay), u32::from(self.vdisplay))
    }
}

impl TimingDescriptor {
    /// Physical size of the active area in millimeters
    pub fn physical_size(&self) -> Size {
        Size::new(u32::from(self.width_mm), u32::from(self.height_mm))
    }
}

impl<B, S, R, D, C> OriginDimensions for Panel<B, S, R, D, C>
where
    B: CommandBus,
    S: PowerSupply,
    R: OutputPin,
    D: DelayNs,
    C: Clock,
{
    fn size(&self) -> Size {
        self.query_timing_descriptor().size()
    }
}
