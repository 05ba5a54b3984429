//! Ampire AM-4001280ATZQW-00H, 400x1280 MIPI-DSI panel

use super::PanelVariant;
use crate::command::CommandEntry;
use crate::config::DelayProfile;
use crate::timing::{BusFlags, BusFormat, Polarity, SyncPolarity, TimingDescriptor};

const fn e(register: u8, value: u8) -> CommandEntry {
    CommandEntry::new(register, value)
}

/// AM-4001280ATZQW-00H variant
pub static AM4001280: PanelVariant = PanelVariant {
    compatible: "ampire,am40001280",
    name: "AM-4001280ATZQW-00H",
    timing: &MODE,
    commands: &MCS,
    delays: DelayProfile {
        power_to_reset_ms: 10,
        reset_pulse_ms: 15,
        reset_settle_ms: 50,
        display_on_settle_ms: 5,
        backlight_off_settle_ms: 10,
        power_off_dwell_ms: 0,
    },
    supplies: &["v3p3"],
    default_brightness: 200,
};

static MODE: TimingDescriptor = TimingDescriptor {
    clock_khz: 200_000,
    hdisplay: 400,
    hsync_start: 400 + 30,
    hsync_end: 400 + 30 + 15,
    htotal: 400 + 30 + 15 + 30,
    vdisplay: 1280,
    vsync_start: 1280 + 30,
    vsync_end: 1280 + 30 + 20,
    vtotal: 1280 + 30 + 20 + 30,
    width_mm: 190,
    height_mm: 59,
    refresh_hz: 60,
    bpc: 8,
    sync: SyncPolarity {
        hsync: Polarity::Negative,
        vsync: Polarity::Negative,
    },
    bus_flags: BusFlags {
        de_active_low: true,
        pixdata_drive_negedge: true,
    },
    bus_formats: &[
        BusFormat::Rgb888_1x24,
        BusFormat::Rgb666_1x18,
        BusFormat::Rgb565_1x16,
    ],
};

// Vendor-supplied init sequence. 0xB1 writes select the register page for the
// entries that follow.
#[rustfmt::skip]
static MCS: [CommandEntry; 254] = [
    e(0xB0, 0x5A), e(0xB1, 0x00), e(0x89, 0x01), e(0x91, 0x07),
    e(0x92, 0xF9), e(0xB1, 0x03), e(0x2C, 0x28), e(0x00, 0xB7),
    e(0x01, 0x1B), e(0x02, 0x00), e(0x03, 0x00), e(0x04, 0x00),
    e(0x05, 0x00), e(0x06, 0x00), e(0x07, 0x00), e(0x08, 0x00),
    e(0x09, 0x00), e(0x0A, 0x01), e(0x0B, 0x01), e(0x0C, 0x20),
    e(0x0D, 0x00), e(0x0E, 0x24), e(0x0F, 0x1C), e(0x10, 0xC9),
    e(0x11, 0x60), e(0x12, 0x70), e(0x13, 0x01), e(0x14, 0xE7),
    e(0x15, 0xFF), e(0x16, 0x3D), e(0x17, 0x0E), e(0x18, 0x01),
    e(0x19, 0x00), e(0x1A, 0x00), e(0x1B, 0xFC), e(0x1C, 0x0B),
    e(0x1D, 0xA0), e(0x1E, 0x03), e(0x1F, 0x04), e(0x20, 0x0C),
    e(0x21, 0x00), e(0x22, 0x04), e(0x23, 0x81), e(0x24, 0x1F),
    e(0x25, 0x10), e(0x26, 0x9B), e(0x2D, 0x01), e(0x2E, 0x84),
    e(0x2F, 0x00), e(0x30, 0x02), e(0x31, 0x08), e(0x32, 0x01),
    e(0x33, 0x1C), e(0x34, 0x40), e(0x35, 0xFF), e(0x36, 0xFF),
    e(0x37, 0xFF), e(0x38, 0xFF), e(0x39, 0xFF), e(0x3A, 0x05),
    e(0x3B, 0x00), e(0x3C, 0x00), e(0x3D, 0x00), e(0x3E, 0xCF),
    e(0x3F, 0x84), e(0x40, 0x28), e(0x41, 0xFC), e(0x42, 0x01),
    e(0x43, 0x40), e(0x44, 0x05), e(0x45, 0xE8), e(0x46, 0x16),
    e(0x47, 0x00), e(0x48, 0x00), e(0x49, 0x88), e(0x4A, 0x08),
    e(0x4B, 0x05), e(0x4C, 0x03), e(0x4D, 0xD0), e(0x4E, 0x13),
    e(0x4F, 0xFF), e(0x50, 0x0A), e(0x51, 0x53), e(0x52, 0x26),
    e(0x53, 0x22), e(0x54, 0x09), e(0x55, 0x22), e(0x56, 0x00),
    e(0x57, 0x1C), e(0x58, 0x03), e(0x59, 0x3F), e(0x5A, 0x28),
    e(0x5B, 0x01), e(0x5C, 0xCC), e(0x5D, 0x21), e(0x5E, 0x84),
    e(0x5F, 0x10), e(0x60, 0x42), e(0x61, 0x40), e(0x62, 0x06),
    e(0x63, 0x3A), e(0x64, 0xA6), e(0x65, 0x04), e(0x66, 0x09),
    e(0x67, 0x21), e(0x68, 0x84), e(0x69, 0x10), e(0x6A, 0x42),
    e(0x6B, 0x08), e(0x6C, 0x21), e(0x6D, 0x84), e(0x6E, 0x74),
    e(0x6F, 0xE2), e(0x70, 0x6B), e(0x71, 0x6B), e(0x72, 0x94),
    e(0x73, 0x10), e(0x74, 0x42), e(0x75, 0x08), e(0x76, 0x00),
    e(0x77, 0x00), e(0x78, 0x0F), e(0x79, 0xE0), e(0x7A, 0x01),
    e(0x7B, 0xFF), e(0x7C, 0xFF), e(0x7D, 0x0F), e(0x7E, 0x41),
    e(0x7F, 0xFE), e(0xB1, 0x02), e(0x00, 0xFF), e(0x01, 0x05),
    e(0x02, 0xC8), e(0x03, 0x00), e(0x04, 0x14), e(0x05, 0x4B),
    e(0x06, 0x64), e(0x07, 0x0A), e(0x08, 0xC0), e(0x09, 0x00),
    e(0x0A, 0x00), e(0x0B, 0x10), e(0x0C, 0xE6), e(0x0D, 0x0D),
    e(0x0F, 0x00), e(0x10, 0x3D), e(0x11, 0x4C), e(0x12, 0xCF),
    e(0x13, 0xAD), e(0x14, 0x4A), e(0x15, 0x92), e(0x16, 0x24),
    e(0x17, 0x55), e(0x18, 0x73), e(0x19, 0xE9), e(0x1A, 0x70),
    e(0x1B, 0x0E), e(0x1C, 0xFF), e(0x1D, 0xFF), e(0x1E, 0xFF),
    e(0x1F, 0xFF), e(0x20, 0xFF), e(0x21, 0xFF), e(0x22, 0xFF),
    e(0x23, 0xFF), e(0x24, 0xFF), e(0x25, 0xFF), e(0x26, 0xFF),
    e(0x27, 0x1F), e(0x28, 0xFF), e(0x29, 0xFF), e(0x2A, 0xFF),
    e(0x2B, 0xFF), e(0x2C, 0xFF), e(0x2D, 0x07), e(0x33, 0x3F),
    e(0x35, 0x7F), e(0x36, 0x3F), e(0x38, 0xFF), e(0x3A, 0x80),
    e(0x3B, 0x01), e(0x3C, 0x80), e(0x3D, 0x2C), e(0x3E, 0x00),
    e(0x3F, 0x90), e(0x40, 0x05), e(0x41, 0x00), e(0x42, 0xB2),
    e(0x43, 0x00), e(0x44, 0x40), e(0x45, 0x06), e(0x46, 0x00),
    e(0x47, 0x00), e(0x48, 0x9B), e(0x49, 0xD2), e(0x4A, 0x21),
    e(0x4B, 0x43), e(0x4C, 0x16), e(0x4D, 0xC0), e(0x4E, 0x0F),
    e(0x4F, 0xF1), e(0x50, 0x78), e(0x51, 0x7A), e(0x52, 0x34),
    e(0x53, 0x99), e(0x54, 0xA2), e(0x55, 0x02), e(0x56, 0x14),
    e(0x57, 0xB8), e(0x58, 0xDC), e(0x59, 0xD4), e(0x5A, 0xEF),
    e(0x5B, 0xF7), e(0x5C, 0xFB), e(0x5D, 0xFD), e(0x5E, 0x7E),
    e(0x5F, 0xBF), e(0x60, 0xEF), e(0x61, 0xE6), e(0x62, 0x76),
    e(0x63, 0x73), e(0x64, 0xBB), e(0x65, 0xDD), e(0x66, 0x6E),
    e(0x67, 0x37), e(0x68, 0x8C), e(0x69, 0x08), e(0x6A, 0x31),
    e(0x6B, 0xB8), e(0x6C, 0xB8), e(0x6D, 0xB8), e(0x6E, 0xB8),
    e(0x6F, 0xB8), e(0x70, 0x5C), e(0x71, 0x2E), e(0x72, 0x17),
    e(0x73, 0x00), e(0x74, 0x00), e(0x75, 0x00), e(0x76, 0x00),
    e(0x77, 0x00), e(0x78, 0x00), e(0x79, 0x00), e(0x7A, 0xDC),
    e(0x7B, 0xDC), e(0x7C, 0xDC), e(0x7D, 0xDC), e(0x7E, 0xDC),
    e(0x7F, 0x6E), e(0x0B, 0x00), e(0xB1, 0x03), e(0x2C, 0x2C),
    e(0xB1, 0x00), e(0x89, 0x03),
];
