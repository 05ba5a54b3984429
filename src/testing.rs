//! Mock capabilities for unit tests
//!
//! Every mock records into a shared [`Timeline`] so tests can assert on the
//! exact interleaving of bus traffic, supply switching, pin levels and delays.
//! [`MockDelay`] advances the timeline's clock instead of sleeping.

use alloc::vec::Vec;
use std::collections::BTreeSet;
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorKind, ErrorType, OutputPin};

use crate::clock::{Clock, Instant};
use crate::config::Builder;
use crate::interface::{CommandBus, LinkMode};
use crate::panel::{Hardware, Panel};
use crate::power::PowerSupply;
use crate::variants::AM4001280;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockError;

impl embedded_hal::digital::Error for MockError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BusOp {
    Generic(Vec<u8>),
    Dcs(u8, Vec<u8>),
    Read(u8),
    Mode(LinkMode),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Bus(BusOp),
    Supply(bool),
    Pin(&'static str, bool),
    Delay(u64),
}

#[derive(Default)]
struct Log {
    events: Vec<Event>,
    now_us: u64,
}

#[derive(Default)]
struct GateState {
    closed: bool,
    waiting: bool,
}

/// Holds delays until opened, so a test can park a transition mid-flight
#[derive(Clone, Default)]
pub struct Gate(Arc<(Mutex<GateState>, Condvar)>);

impl Gate {
    fn state(&self) -> MutexGuard<'_, GateState> {
        self.0.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn close(&self) {
        self.state().closed = true;
    }

    pub fn open(&self) {
        self.state().closed = false;
        self.0.1.notify_all();
    }

    /// Block until some delay is parked at the gate
    pub fn wait_until_blocked(&self) {
        let mut state = self.state();
        while !state.waiting {
            state = self.0.1.wait(state).unwrap_or_else(PoisonError::into_inner);
        }
    }

    fn pass(&self) {
        let mut state = self.state();
        if !state.closed {
            return;
        }
        state.waiting = true;
        self.0.1.notify_all();
        while state.closed {
            state = self.0.1.wait(state).unwrap_or_else(PoisonError::into_inner);
        }
        state.waiting = false;
    }
}

#[derive(Clone, Default)]
pub struct Timeline {
    log: Arc<Mutex<Log>>,
    gate: Gate,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    fn log(&self) -> MutexGuard<'_, Log> {
        self.log.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Gate every [`MockDelay`] on this timeline passes through
    pub fn gate(&self) -> &Gate {
        &self.gate
    }

    fn push(&self, event: Event) {
        self.log().events.push(event);
    }

    pub fn events(&self) -> Vec<Event> {
        self.log().events.clone()
    }

    pub fn clear(&self) {
        self.log().events.clear();
    }

    pub fn now(&self) -> Instant {
        Instant::from_micros(self.log().now_us)
    }

    pub fn advance_us(&self, us: u64) {
        self.log().now_us += us;
    }

    pub fn advance_ms(&self, ms: u64) {
        self.advance_us(ms * 1_000);
    }

    pub fn bus_ops(&self) -> Vec<BusOp> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Bus(op) => Some(op),
                _ => None,
            })
            .collect()
    }

    /// DCS write opcodes, in order
    pub fn dcs_commands(&self) -> Vec<u8> {
        self.bus_ops()
            .into_iter()
            .filter_map(|op| match op {
                BusOp::Dcs(cmd, _) => Some(cmd),
                _ => None,
            })
            .collect()
    }

    pub fn generic_writes(&self) -> Vec<Vec<u8>> {
        self.bus_ops()
            .into_iter()
            .filter_map(|op| match op {
                BusOp::Generic(payload) => Some(payload),
                _ => None,
            })
            .collect()
    }

    pub fn delays_us(&self) -> Vec<u64> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Delay(us) => Some(us),
                _ => None,
            })
            .collect()
    }
}

pub struct MockBus {
    timeline: Timeline,
    generic_attempts: usize,
    fail_generic_at: Option<usize>,
    failing_dcs: BTreeSet<u8>,
    fail_reads: bool,
    brightness: u16,
}

impl MockBus {
    pub fn new() -> Self {
        Self::on(&Timeline::new())
    }

    pub fn on(timeline: &Timeline) -> Self {
        Self {
            timeline: timeline.clone(),
            generic_attempts: 0,
            fail_generic_at: None,
            failing_dcs: BTreeSet::new(),
            fail_reads: false,
            brightness: 0,
        }
    }

    /// Fail the `k`-th generic write from now on (0-based)
    pub fn fail_generic_write_at(&mut self, k: usize) {
        self.fail_generic_at = Some(self.generic_attempts + k);
    }

    /// Fail every DCS write of `command` until cleared
    pub fn fail_dcs(&mut self, command: u8) {
        self.failing_dcs.insert(command);
    }

    pub fn fail_reads(&mut self, fail: bool) {
        self.fail_reads = fail;
    }

    pub fn clear_failures(&mut self) {
        self.fail_generic_at = None;
        self.failing_dcs.clear();
        self.fail_reads = false;
    }

    pub fn set_brightness_response(&mut self, raw: u16) {
        self.brightness = raw;
    }

    pub fn ops(&self) -> Vec<BusOp> {
        self.timeline.bus_ops()
    }

    pub fn generic_writes(&self) -> Vec<Vec<u8>> {
        self.timeline.generic_writes()
    }

    pub fn dcs_commands(&self) -> Vec<u8> {
        self.timeline.dcs_commands()
    }
}

impl CommandBus for MockBus {
    type Error = MockError;

    fn generic_write(&mut self, payload: &[u8]) -> Result<(), MockError> {
        let attempt = self.generic_attempts;
        self.generic_attempts += 1;
        if self.fail_generic_at == Some(attempt) {
            return Err(MockError);
        }
        self.timeline
            .push(Event::Bus(BusOp::Generic(payload.to_vec())));
        Ok(())
    }

    fn dcs_write(&mut self, command: u8, params: &[u8]) -> Result<(), MockError> {
        if self.failing_dcs.contains(&command) {
            return Err(MockError);
        }
        self.timeline
            .push(Event::Bus(BusOp::Dcs(command, params.to_vec())));
        Ok(())
    }

    fn dcs_read(&mut self, command: u8, buf: &mut [u8]) -> Result<(), MockError> {
        if self.fail_reads {
            return Err(MockError);
        }
        self.timeline.push(Event::Bus(BusOp::Read(command)));
        for (dst, src) in buf.iter_mut().zip(self.brightness.to_le_bytes()) {
            *dst = src;
        }
        Ok(())
    }

    fn set_link_mode(&mut self, mode: LinkMode) {
        self.timeline.push(Event::Bus(BusOp::Mode(mode)));
    }
}

pub struct MockSupply {
    timeline: Timeline,
    fail_enable: bool,
    fail_disable: bool,
}

impl MockSupply {
    pub fn on(timeline: &Timeline) -> Self {
        Self {
            timeline: timeline.clone(),
            fail_enable: false,
            fail_disable: false,
        }
    }

    pub fn fail_enable(&mut self, fail: bool) {
        self.fail_enable = fail;
    }

    pub fn fail_disable(&mut self, fail: bool) {
        self.fail_disable = fail;
    }
}

impl PowerSupply for MockSupply {
    type Error = MockError;

    fn enable(&mut self) -> Result<(), MockError> {
        if self.fail_enable {
            return Err(MockError);
        }
        self.timeline.push(Event::Supply(true));
        Ok(())
    }

    fn disable(&mut self) -> Result<(), MockError> {
        if self.fail_disable {
            return Err(MockError);
        }
        self.timeline.push(Event::Supply(false));
        Ok(())
    }
}

pub struct MockPin {
    timeline: Timeline,
    name: &'static str,
    failing: bool,
}

impl MockPin {
    pub fn new(timeline: &Timeline, name: &'static str) -> Self {
        Self {
            timeline: timeline.clone(),
            name,
            failing: false,
        }
    }

    pub fn set_failing(&mut self, failing: bool) {
        self.failing = failing;
    }
}

impl ErrorType for MockPin {
    type Error = MockError;
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), MockError> {
        if self.failing {
            return Err(MockError);
        }
        self.timeline.push(Event::Pin(self.name, false));
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), MockError> {
        if self.failing {
            return Err(MockError);
        }
        self.timeline.push(Event::Pin(self.name, true));
        Ok(())
    }
}

pub struct MockDelay {
    timeline: Timeline,
}

impl MockDelay {
    pub fn on(timeline: &Timeline) -> Self {
        Self {
            timeline: timeline.clone(),
        }
    }

    fn sleep_us(&self, us: u64) {
        self.timeline.gate.pass();
        self.timeline.push(Event::Delay(us));
        self.timeline.advance_us(us);
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.sleep_us(u64::from(ns).div_ceil(1_000));
    }

    fn delay_us(&mut self, us: u32) {
        self.sleep_us(u64::from(us));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.sleep_us(u64::from(ms) * 1_000);
    }
}

pub struct MockClock {
    timeline: Timeline,
}

impl MockClock {
    pub fn on(timeline: &Timeline) -> Self {
        Self {
            timeline: timeline.clone(),
        }
    }
}

impl Clock for MockClock {
    fn now(&mut self) -> Instant {
        self.timeline.now()
    }
}

pub type TestHardware = Hardware<MockBus, MockSupply, MockPin, MockDelay, MockClock>;
pub type TestPanel = Panel<MockBus, MockSupply, MockPin, MockDelay, MockClock>;

/// Hardware with every capability recording into `timeline`, reset line named `"rst"`
pub fn hardware(timeline: &Timeline) -> TestHardware {
    Hardware::new(
        MockBus::on(timeline),
        MockSupply::on(timeline),
        MockDelay::on(timeline),
        MockClock::on(timeline),
    )
    .with_reset(MockPin::new(timeline, "rst"))
}

/// A panel on fresh mocks, with the probe-time events already cleared
pub fn panel() -> (TestPanel, Timeline) {
    let timeline = Timeline::new();
    let config = Builder::new()
        .variant(&AM4001280)
        .lanes(4)
        .build()
        .unwrap();
    let panel = Panel::new(hardware(&timeline), config);
    timeline.clear();
    (panel, timeline)
}

/// A panel already taken through prepare and enable, events cleared
pub fn enabled_panel() -> (TestPanel, Timeline) {
    let (panel, timeline) = panel();
    panel.prepare().unwrap();
    panel.enable().unwrap();
    timeline.clear();
    (panel, timeline)
}
