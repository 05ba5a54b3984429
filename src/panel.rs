//! Panel lifecycle state machine
//!
//! [`Panel`] owns the hardware capabilities and walks the panel through
//! `Unprepared -> Prepared -> Enabled` and back. DCS sleep is tracked
//! separately so it can be entered and left while the panel is powered.
//!
//! All operations take `&self`. Lifecycle calls claim an exclusive transition
//! slot first, so a second lifecycle call racing an in-flight one fails with
//! [`Error::ConcurrentTransition`] instead of interleaving with it.

use core::sync::atomic::{AtomicBool, AtomicU8, Ordering};

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use log::{debug, error, warn};
use spin::RwLock;

use crate::clock::{Clock, Instant};
use crate::command::{CommandSetError, push_command_set};
use crate::config::{Config, LinkConfig};
use crate::error::Error;
use crate::interface::{CommandBus, LinkMode};
use crate::power::{NoPin, PowerSupply, ResetLine};
use crate::timing::TimingDescriptor;

/// Error type of a panel driven over bus `B` with supply `S`
pub type PanelError<B, S> = Error<<B as CommandBus>::Error, <S as PowerSupply>::Error>;

type PanelResult<T, B, S> = core::result::Result<T, PanelError<B, S>>;

/// Power and enable stage
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Stage {
    /// Supply off
    #[default]
    Unprepared,
    /// Supply on, reset released, display output off
    Prepared,
    /// Display on, backlight on
    Enabled,
}

/// Externally visible panel state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PanelState {
    /// Power and enable stage
    pub stage: Stage,
    /// Whether the panel is in DCS sleep mode
    pub sleeping: bool,
}

impl PanelState {
    /// Supply is on (prepared or enabled)
    pub fn is_prepared(&self) -> bool {
        self.stage != Stage::Unprepared
    }

    /// Display is on
    pub fn is_enabled(&self) -> bool {
        self.stage == Stage::Enabled
    }

    /// DCS sleep mode is active
    pub fn is_suspended(&self) -> bool {
        self.sleeping
    }
}

/// The capabilities a panel needs
///
/// Fields are public so callers can take them apart again after
/// [`Panel::release`].
pub struct Hardware<B, S, R, D, C> {
    /// Command channel
    pub bus: B,
    /// Supply rail(s)
    pub supply: S,
    /// Reset line, if wired
    pub reset: Option<ResetLine<R>>,
    /// Blocking delay
    pub delay: D,
    /// Monotonic clock
    pub clock: C,
}

impl<B, S, D, C> Hardware<B, S, NoPin, D, C> {
    /// Bundle capabilities for a panel without a reset line
    pub fn new(bus: B, supply: S, delay: D, clock: C) -> Self {
        Self {
            bus,
            supply,
            reset: None,
            delay,
            clock,
        }
    }

    /// Attach a reset pin
    ///
    /// Polarity comes from [`Config::reset_active_high`] when the panel is
    /// created.
    pub fn with_reset<R: OutputPin>(self, pin: R) -> Hardware<B, S, R, D, C> {
        Hardware {
            bus: self.bus,
            supply: self.supply,
            reset: Some(ResetLine::new(pin)),
            delay: self.delay,
            clock: self.clock,
        }
    }
}

pub(crate) struct Inner<B, S, R, D, C> {
    pub(crate) hw: Hardware<B, S, R, D, C>,
    pub(crate) state: PanelState,
    transition_started: Instant,
    powered_off_at: Option<Instant>,
}

/// Releases the transition slot on drop
struct TransitionClaim<'a>(&'a AtomicBool);

impl<'a> TransitionClaim<'a> {
    fn try_claim(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for TransitionClaim<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Lifecycle driver for one panel
///
/// Backlight calls made while a lifecycle transition is running wait for it
/// on a spin lock, so they busy-wait for the whole transition, delays
/// included. Hosts with an OS should keep backlight callers off
/// latency-sensitive threads.
///
/// # Example
///
/// See the crate-level documentation for a complete bring-up.
pub struct Panel<B, S, R, D, C> {
    pub(crate) inner: RwLock<Inner<B, S, R, D, C>>,
    transitioning: AtomicBool,
    pub(crate) brightness: AtomicU8,
    config: Config,
}

impl<B, S, R, D, C> Panel<B, S, R, D, C>
where
    B: CommandBus,
    S: PowerSupply,
    R: OutputPin,
    D: DelayNs,
    C: Clock,
{
    /// Create a panel and hold it in reset
    pub fn new(mut hardware: Hardware<B, S, R, D, C>, config: Config) -> Self {
        if let Some(reset) = hardware.reset.as_mut() {
            reset.set_active_high(config.reset_active_high);
            reset.assert();
        }
        let now = hardware.clock.now();
        debug!(
            "{} attached, {} lanes, mode {}",
            config.variant.name, config.link.lanes, config.variant.timing
        );
        Self {
            inner: RwLock::new(Inner {
                hw: hardware,
                state: PanelState::default(),
                transition_started: now,
                powered_off_at: None,
            }),
            transitioning: AtomicBool::new(false),
            brightness: AtomicU8::new(config.initial_brightness),
            config,
        }
    }

    /// Power the panel up and release reset
    ///
    /// # Errors
    ///
    /// [`Error::AlreadyPrepared`] unless unprepared, [`Error::Power`] if the
    /// supply cannot be enabled (state is unchanged).
    pub fn prepare(&self) -> PanelResult<(), B, S> {
        self.transition("prepare", |inner| self.prepare_locked(inner))
    }

    /// Reset-bounce the panel and power it down
    ///
    /// # Errors
    ///
    /// [`Error::NotPrepared`] when unprepared, [`Error::StillEnabled`] when
    /// enabled, [`Error::Power`] if the supply cannot be disabled.
    pub fn unprepare(&self) -> PanelResult<(), B, S> {
        self.transition("unprepare", |inner| self.unprepare_locked(inner))
    }

    /// Initialize the controller and turn the display and backlight on
    ///
    /// On any failure the reset line is asserted and the panel stays
    /// [`Stage::Prepared`]. The next enable releases reset again first.
    ///
    /// # Errors
    ///
    /// [`Error::NotPrepared`] unless prepared, otherwise the first bus,
    /// command set or backlight failure.
    pub fn enable(&self) -> PanelResult<(), B, S> {
        self.transition("enable", |inner| self.enable_locked(inner))
    }

    /// Turn the backlight and display off and enter sleep mode
    ///
    /// A panel suspended while enabled is already asleep; sleep entry is
    /// skipped and the panel still ends up [`Stage::Prepared`].
    ///
    /// # Errors
    ///
    /// [`Error::NotEnabled`] unless enabled, [`Error::Backlight`] if the
    /// backlight cannot be switched off, [`Error::Bus`] if display off or
    /// sleep entry fails. The link is back in low-power mode in every case.
    pub fn disable(&self) -> PanelResult<(), B, S> {
        self.transition("disable", |inner| self.disable_locked(inner))
    }

    /// Enter DCS sleep mode
    pub fn suspend(&self) -> PanelResult<(), B, S> {
        self.transition("suspend", |inner| {
            Self::require_prepared(inner)?;
            Self::enter_sleep(inner)
        })
    }

    /// Leave DCS sleep mode
    pub fn resume(&self) -> PanelResult<(), B, S> {
        self.transition("resume", |inner| {
            Self::require_prepared(inner)?;
            Self::exit_sleep(inner)
        })
    }

    /// Idle until `min_ms` have passed since `reference`
    ///
    /// Enters idle mode, sleeps whatever part of the window is left (possibly
    /// nothing), then exits idle mode.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] for `min_ms == 0`, [`Error::NotPrepared`]
    /// if the panel is off, [`Error::Bus`] if idle entry or exit fails.
    pub fn wait_at_least(&self, reference: Instant, min_ms: u32) -> PanelResult<(), B, S> {
        self.transition("wait", |inner| {
            if min_ms == 0 {
                return Err(Error::InvalidArgument);
            }
            Self::require_prepared(inner)?;
            inner
                .hw
                .bus
                .enter_idle_mode()
                .map_err(|e| Self::bus_failed("enter idle mode", e))?;
            let waited = Self::sleep_until(inner, reference.add_millis(min_ms));
            debug!("Idle dwell: slept {}us of {}ms", waited, min_ms);
            inner
                .hw
                .bus
                .exit_idle_mode()
                .map_err(|e| Self::bus_failed("exit idle mode", e))
        })
    }

    /// Disable and unprepare as needed, logging failures
    pub fn shutdown(&self) {
        if self.state().is_enabled() {
            if let Err(e) = self.disable() {
                error!("Shutdown: failed to disable panel: {:?}", e);
            }
        }
        if self.state().is_prepared() {
            if let Err(e) = self.unprepare() {
                error!("Shutdown: failed to unprepare panel: {:?}", e);
            }
        }
    }

    /// Current state
    pub fn state(&self) -> PanelState {
        self.inner.read().state
    }

    /// When the last prepare, unprepare, enable or disable started
    pub fn last_transition_start(&self) -> Instant {
        self.inner.read().transition_started
    }

    /// The fixed display mode
    pub fn query_timing_descriptor(&self) -> &'static TimingDescriptor {
        self.config.variant.timing
    }

    /// Link parameters for the host DSI controller
    pub fn link_config(&self) -> LinkConfig {
        self.config.link()
    }

    /// Panel configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Give the hardware back
    pub fn release(self) -> Hardware<B, S, R, D, C> {
        self.inner.into_inner().hw
    }

    fn transition<T>(
        &self,
        op: &'static str,
        f: impl FnOnce(&mut Inner<B, S, R, D, C>) -> PanelResult<T, B, S>,
    ) -> PanelResult<T, B, S> {
        let Some(_claim) = TransitionClaim::try_claim(&self.transitioning) else {
            warn!("Rejected {}: another transition is in progress", op);
            return Err(Error::ConcurrentTransition);
        };
        let mut inner = self.inner.write();
        let result = f(&mut *inner);
        match &result {
            Err(e) if e.is_precondition() => warn!("Rejected {}: {}", op, e),
            Err(_) => {}
            Ok(_) => debug!("{} done, state {:?}", op, inner.state),
        }
        result
    }

    fn prepare_locked(&self, inner: &mut Inner<B, S, R, D, C>) -> PanelResult<(), B, S> {
        if inner.state.is_prepared() {
            return Err(Error::AlreadyPrepared);
        }
        let delays = self.config.delays;
        inner.transition_started = inner.hw.clock.now();

        if let Some(off) = inner.powered_off_at {
            if delays.power_off_dwell_ms > 0 {
                let waited = Self::sleep_until(inner, off.add_millis(delays.power_off_dwell_ms));
                debug!("Power-off dwell: slept {}us", waited);
            }
        }

        inner.hw.supply.enable().map_err(|e| {
            error!("Failed to enable supply: {:?}", e);
            Error::Power(e)
        })?;
        inner.hw.delay.delay_ms(delays.power_to_reset_ms);

        if let Some(reset) = inner.hw.reset.as_mut() {
            reset.deassert();
            inner.hw.delay.delay_ms(delays.reset_settle_ms);
        }

        inner.state = PanelState {
            stage: Stage::Prepared,
            sleeping: false,
        };
        Ok(())
    }

    fn unprepare_locked(&self, inner: &mut Inner<B, S, R, D, C>) -> PanelResult<(), B, S> {
        match inner.state.stage {
            Stage::Unprepared => return Err(Error::NotPrepared),
            Stage::Enabled => return Err(Error::StillEnabled),
            Stage::Prepared => {}
        }
        inner.transition_started = inner.hw.clock.now();

        if let Some(reset) = inner.hw.reset.as_mut() {
            reset.assert();
            inner.hw.delay.delay_ms(self.config.delays.reset_pulse_ms);
            reset.deassert();
        }

        inner.hw.supply.disable().map_err(|e| {
            error!("Failed to disable supply: {:?}", e);
            Error::Power(e)
        })?;

        inner.powered_off_at = Some(inner.hw.clock.now());
        inner.state = PanelState::default();
        Ok(())
    }

    fn enable_locked(&self, inner: &mut Inner<B, S, R, D, C>) -> PanelResult<(), B, S> {
        if inner.state.stage != Stage::Prepared {
            return Err(Error::NotPrepared);
        }
        inner.transition_started = inner.hw.clock.now();

        // Left in reset by a failed enable
        if let Some(reset) = inner.hw.reset.as_mut() {
            if reset.is_asserted() {
                reset.deassert();
                inner.hw.delay.delay_ms(self.config.delays.reset_settle_ms);
            }
        }

        if let Err(e) = self.enable_sequence(inner) {
            if let Some(reset) = inner.hw.reset.as_mut() {
                warn!("Enable aborted, holding panel in reset");
                reset.assert();
                inner.state.sleeping = false;
            }
            return Err(e);
        }

        inner.state.stage = Stage::Enabled;
        Ok(())
    }

    fn enable_sequence(&self, inner: &mut Inner<B, S, R, D, C>) -> PanelResult<(), B, S> {
        debug!(
            "Interface color format: {:#04x}",
            self.config.link.format.dcs_color_format()
        );

        inner
            .hw
            .bus
            .soft_reset()
            .map_err(|e| Self::bus_failed("soft reset", e))?;
        inner.state.sleeping = false;
        inner.hw.bus.set_link_mode(LinkMode::LowPower);

        Self::enter_sleep(inner)?;
        inner
            .hw
            .bus
            .set_display_off()
            .map_err(|e| Self::bus_failed("display off", e))?;

        push_command_set(&mut inner.hw.bus, self.config.variant.commands)
            .map_err(Self::command_set_failed)?;

        Self::exit_sleep(inner)?;
        inner.hw.delay.delay_ms(self.config.delays.display_on_settle_ms);
        inner
            .hw
            .bus
            .set_display_on()
            .map_err(|e| Self::bus_failed("display on", e))?;

        self.backlight_on(&mut inner.hw.bus)
    }

    fn disable_locked(&self, inner: &mut Inner<B, S, R, D, C>) -> PanelResult<(), B, S> {
        if inner.state.stage != Stage::Enabled {
            return Err(Error::NotEnabled);
        }
        inner.transition_started = inner.hw.clock.now();

        Self::backlight_off(&mut inner.hw.bus)?;
        inner
            .hw
            .delay
            .delay_ms(self.config.delays.backlight_off_settle_ms);

        inner.hw.bus.set_link_mode(LinkMode::HighSpeed);
        let result = inner
            .hw
            .bus
            .set_display_off()
            .map_err(|e| Self::bus_failed("display off", e))
            .and_then(|()| {
                // Suspended while enabled
                if inner.state.sleeping {
                    debug!("Panel already in sleep mode");
                    Ok(())
                } else {
                    Self::enter_sleep(inner)
                }
            });
        inner.hw.bus.set_link_mode(LinkMode::LowPower);
        result?;

        inner.state.stage = Stage::Prepared;
        Ok(())
    }

    fn require_prepared(inner: &Inner<B, S, R, D, C>) -> PanelResult<(), B, S> {
        if inner.state.is_prepared() {
            Ok(())
        } else {
            Err(Error::NotPrepared)
        }
    }

    fn enter_sleep(inner: &mut Inner<B, S, R, D, C>) -> PanelResult<(), B, S> {
        if inner.state.sleeping {
            return Err(Error::AlreadySuspended);
        }
        inner
            .hw
            .bus
            .enter_sleep_mode()
            .map_err(|e| Self::bus_failed("enter sleep mode", e))?;
        inner.state.sleeping = true;
        Ok(())
    }

    fn exit_sleep(inner: &mut Inner<B, S, R, D, C>) -> PanelResult<(), B, S> {
        if !inner.state.sleeping {
            return Err(Error::NotSuspended);
        }
        inner
            .hw
            .bus
            .exit_sleep_mode()
            .map_err(|e| Self::bus_failed("exit sleep mode", e))?;
        inner.state.sleeping = false;
        Ok(())
    }

    /// Block until `deadline`, returning the microseconds slept
    fn sleep_until(inner: &mut Inner<B, S, R, D, C>, deadline: Instant) -> u64 {
        let total = deadline.micros_since(inner.hw.clock.now());
        let mut remaining = total;
        while remaining > 0 {
            let chunk = remaining.min(u64::from(u32::MAX)) as u32;
            inner.hw.delay.delay_us(chunk);
            remaining -= u64::from(chunk);
        }
        total
    }

    fn bus_failed(step: &str, e: B::Error) -> PanelError<B, S> {
        error!("Failed to {}: {:?}", step, e);
        Error::Bus(e)
    }

    fn command_set_failed(e: CommandSetError<B::Error>) -> PanelError<B, S> {
        error!("{}", e);
        e.into()
    }

    #[cfg(test)]
    pub(crate) fn with_hardware<T>(&self, f: impl FnOnce(&mut Hardware<B, S, R, D, C>) -> T) -> T {
        f(&mut self.inner.write().hw)
    }
}

/// The lifecycle interface a host display framework drives
pub trait PanelOps {
    /// Error type for lifecycle operations
    type Error;

    /// Power up
    fn prepare(&self) -> Result<(), Self::Error>;

    /// Power down
    fn unprepare(&self) -> Result<(), Self::Error>;

    /// Start displaying
    fn enable(&self) -> Result<(), Self::Error>;

    /// Stop displaying
    fn disable(&self) -> Result<(), Self::Error>;

    /// The panel's fixed mode
    fn timing(&self) -> &'static TimingDescriptor;
}

impl<B, S, R, D, C> PanelOps for Panel<B, S, R, D, C>
where
    B: CommandBus,
    S: PowerSupply,
    R: OutputPin,
    D: DelayNs,
    C: Clock,
{
    type Error = PanelError<B, S>;

    fn prepare(&self) -> Result<(), Self::Error> {
        Panel::prepare(self)
    }

    fn unprepare(&self) -> Result<(), Self::Error> {
        Panel::unprepare(self)
    }

    fn enable(&self) -> Result<(), Self::Error> {
        Panel::enable(self)
    }

    fn disable(&self) -> Result<(), Self::Error> {
        Panel::disable(self)
    }

    fn timing(&self) -> &'static TimingDescriptor {
        self.query_timing_descriptor()
    }
}
