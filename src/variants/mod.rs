//! Supported panel variants
//!
//! Each [`PanelVariant`] bundles everything that differs between panels
//! driven by this crate: the fixed mode, the manufacturer command set, the
//! datasheet delays and the supply rail names. The registry is static and
//! read-only; a variant is picked once when building a [`Config`](crate::Config).
//!
//! ## Example
//!
//! ```
//! use am4001280::variants::PanelVariant;
//!
//! let variant = PanelVariant::find("ampire,am40001280");
//! assert_eq!(variant.map(|v| v.name), Some("AM-4001280ATZQW-00H"));
//! ```

mod ampire_am4001280;

use crate::command::CommandEntry;
use crate::config::DelayProfile;
use crate::timing::TimingDescriptor;

pub use ampire_am4001280::AM4001280;

/// Static description of one panel variant
#[derive(Debug, PartialEq, Eq)]
pub struct PanelVariant {
    /// Device-tree style compatible string
    pub compatible: &'static str,
    /// Human readable model name
    pub name: &'static str,
    /// Fixed display mode
    pub timing: &'static TimingDescriptor,
    /// Manufacturer command set replayed on every enable
    pub commands: &'static [CommandEntry],
    /// Datasheet minimum delays
    pub delays: DelayProfile,
    /// Names of the supply rails, switched together
    pub supplies: &'static [&'static str],
    /// Backlight brightness after probe
    pub default_brightness: u8,
}

/// All known variants
pub static VARIANTS: &[&PanelVariant] = &[&AM4001280];

impl PanelVariant {
    /// Look up a variant by compatible string
    pub fn find(compatible: &str) -> Option<&'static PanelVariant> {
        VARIANTS.iter().copied().find(|v| v.compatible == compatible)
    }

    /// Supply rails the host must provide, switched together
    pub fn supply_names(&self) -> &'static [&'static str] {
        self.supplies
    }

    /// Number of page-select writes in the command set
    pub fn command_pages(&self) -> usize {
        self.commands.iter().filter(|e| e.is_page_select()).count()
    }
}
