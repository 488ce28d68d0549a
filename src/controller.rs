//! The mode state machine and the cooperative loop core.
//!
//! [`ColorFinder`] owns every piece of mutable state in the system: knobs,
//! buttons, the slot store, the render sink, the mode, and the tick
//! counters. The embedding firmware calls
//! [`tick`](ColorFinder::tick) once per ~10 ms fast tick; knob sampling and
//! rendering run every `slow_tick_divider` ticks, startup animation frames
//! every `startup_frame_divider` ticks. Single-threaded by construction, so
//! none of this state needs locking.

use crate::button::{Button, DigitalInput, Edge};
use crate::config::{ConfigError, FinderConfig};
use crate::knob::{AnalogInput, Knob};
use crate::render::{DisplayPanel, PixelStrip, RenderSink};
use crate::store::SlotStore;
use crate::time::{TimeInstant, TimeSource};
use crate::types::{PressKind, SlotId, SLOT_COUNT};
use crate::{Rgb, COLOR_BLACK};

/// What the outputs are currently showing.
///
/// At most one mode is active at a time. `Startup` is entered once, at
/// construction, and never again; the loop then alternates between the
/// other two (or stays in `LiveKnobs` forever when recall is disabled).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Rainbow animation on the pixels, splash image on the panel.
    Startup,
    /// Outputs track the knobs live.
    LiveKnobs,
    /// A recalled slot's color holds every output until dismissed.
    ShowingSlot(SlotId),
}

/// The color finder control core.
///
/// Owns three knobs, four buttons, the slot store, and the render sink, and
/// multiplexes all periodic work onto one fast-tick entry point. The loop
/// has no exit path and no fatal states; this is deliberate for a
/// freestanding firmware core.
///
/// # Type Parameters
/// * `'t` - Lifetime of the time source reference
/// * `I` - Time instant type
/// * `T` - Time source implementation
/// * `A` - Analog input implementation (knobs)
/// * `B` - Digital input implementation (buttons)
/// * `P` - Pixel strip implementation
/// * `D` - Display panel implementation
pub struct ColorFinder<'t, I, T, A, B, P, D>
where
    I: TimeInstant,
    T: TimeSource<I>,
    A: AnalogInput,
    B: DigitalInput,
    P: PixelStrip,
    D: DisplayPanel,
{
    config: FinderConfig,
    time: &'t T,
    knobs: [Knob<A>; 3],
    buttons: [Button<B, I>; SLOT_COUNT],
    store: SlotStore,
    sink: RenderSink<P, D>,
    mode: Mode,
    fast_ticks: u32,
    startup_frame: u32,
    startup_reference: Rgb,
    current: Rgb,
    freeze_reference: Rgb,
}

impl<'t, I, T, A, B, P, D> ColorFinder<'t, I, T, A, B, P, D>
where
    I: TimeInstant,
    T: TimeSource<I>,
    A: AnalogInput,
    B: DigitalInput,
    P: PixelStrip,
    D: DisplayPanel,
{
    /// Creates the control core in `Startup` mode.
    ///
    /// Validates the configuration and samples the knobs once to establish
    /// the baseline against which startup knob motion is detected. Knobs
    /// are in R, G, B order; buttons in slot order.
    pub fn new(
        config: FinderConfig,
        time: &'t T,
        knobs: [A; 3],
        buttons: [B; SLOT_COUNT],
        pixels: P,
        panel: D,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut knobs = knobs.map(Knob::new);
        let sampler = config.sampler;
        let startup_reference = Rgb::new(
            knobs[0].sample(&sampler),
            knobs[1].sample(&sampler),
            knobs[2].sample(&sampler),
        );
        let long_press_ms = config.long_press_ms;

        Ok(Self {
            config,
            time,
            knobs,
            buttons: buttons.map(|line| Button::new(line, long_press_ms)),
            store: SlotStore::new(),
            sink: RenderSink::new(pixels, panel),
            mode: Mode::Startup,
            fast_ticks: 0,
            startup_frame: 0,
            startup_reference,
            current: COLOR_BLACK,
            freeze_reference: COLOR_BLACK,
        })
    }

    /// Advances the core by one fast tick. Call every ~10 ms, forever.
    pub fn tick(&mut self) {
        match self.mode {
            Mode::Startup => self.startup_tick(),
            Mode::LiveKnobs | Mode::ShowingSlot(_) => self.main_tick(),
        }
    }

    /// Returns the current mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Returns the most recently rendered live color.
    pub fn current_color(&self) -> Rgb {
        self.current
    }

    /// Returns a slot's saved color.
    pub fn saved(&self, slot: SlotId) -> Rgb {
        self.store.read(slot)
    }

    /// One startup fast tick: every `startup_frame_divider` ticks, render a
    /// rainbow frame and check for knob motion or frame budget exhaustion.
    fn startup_tick(&mut self) {
        self.fast_ticks += 1;
        if self.fast_ticks < self.config.startup_frame_divider {
            return;
        }
        self.fast_ticks = 0;

        self.sink.startup_frame(&self.config, self.startup_frame);
        self.startup_frame += 1;

        let sampled = self.sample_knobs();
        let moved = exceeds_motion(sampled, self.startup_reference, self.config.motion_threshold);
        self.startup_reference = sampled;

        if moved || self.startup_frame >= self.config.startup_frame_budget {
            #[cfg(feature = "defmt")]
            defmt::debug!(
                "startup animation done after {} frames (knob motion: {})",
                self.startup_frame,
                moved
            );
            self.sink.begin_main_screen(&self.config);
            self.mode = Mode::LiveKnobs;
        }
    }

    /// One main-loop fast tick: poll and debounce all buttons, then run the
    /// slow tick every `slow_tick_divider` ticks.
    ///
    /// All four buttons are polled and their events latched before any mode
    /// decision is made, so simultaneous presses in one tick are all seen.
    fn main_tick(&mut self) {
        let now = self.time.now();
        for (slot, button) in SlotId::all().zip(self.buttons.iter_mut()) {
            match button.poll(now) {
                Some(Edge::Pressed) => self.sink.slot_edge(slot, true),
                Some(Edge::Released) => self.sink.slot_edge(slot, false),
                None => {}
            }
        }

        self.fast_ticks += 1;
        if self.fast_ticks < self.config.slow_tick_divider {
            return;
        }
        self.fast_ticks = 0;
        self.slow_tick();
    }

    /// Knob sampling, press handling, and one render.
    fn slow_tick(&mut self) {
        let sampled = self.sample_knobs();

        // Knob motion dismisses a recalled slot before presses are handled,
        // re-arming the live display from the current knob positions.
        if let Mode::ShowingSlot(_) = self.mode {
            if exceeds_motion(sampled, self.freeze_reference, self.config.motion_threshold) {
                self.mode = Mode::LiveKnobs;
            }
        }

        let mut presses = [None; SLOT_COUNT];
        for (press, button) in presses.iter_mut().zip(self.buttons.iter_mut()) {
            *press = button.take_press();
        }
        for (slot, press) in SlotId::all().zip(presses) {
            if let Some(kind) = press {
                self.handle_press(slot, kind, sampled);
            }
        }

        match self.mode {
            Mode::LiveKnobs => {
                self.current = sampled;
                self.sink.render_live(&self.config, sampled, &self.store);
            }
            Mode::ShowingSlot(slot) => {
                let color = self.store.read(slot);
                self.sink.render_recalled(&self.config, color, &self.store);
            }
            Mode::Startup => unreachable!("slow tick never runs during startup"),
        }
    }

    /// Applies one latched press classification to the state machine. The
    /// render that follows in the same slow tick picks up any store write,
    /// keeping a save and its visual echo in sync.
    fn handle_press(&mut self, slot: SlotId, kind: PressKind, live: Rgb) {
        match (self.mode, kind) {
            (Mode::LiveKnobs, PressKind::Long) => {
                self.store.save(slot, live);
                #[cfg(feature = "defmt")]
                defmt::debug!("saved color to slot {}", slot.number());
            }
            (Mode::LiveKnobs, PressKind::Short) => {
                if self.config.recall_enabled {
                    self.freeze_reference = live;
                    self.mode = Mode::ShowingSlot(slot);
                } else {
                    #[cfg(feature = "defmt")]
                    defmt::debug!("slot {} short press (recall disabled)", slot.number());
                }
            }
            (Mode::ShowingSlot(shown), PressKind::Short) => {
                if shown == slot {
                    self.mode = Mode::LiveKnobs;
                } else {
                    self.freeze_reference = live;
                    self.mode = Mode::ShowingSlot(slot);
                }
            }
            (Mode::ShowingSlot(_), PressKind::Long) => {
                // Long presses only mean "save" while the knobs drive the
                // outputs; while a slot is shown they are dropped.
                #[cfg(feature = "defmt")]
                defmt::debug!("slot {} long press ignored while showing a slot", slot.number());
            }
            (Mode::Startup, _) => {}
        }
    }

    fn sample_knobs(&mut self) -> Rgb {
        let sampler = self.config.sampler;
        Rgb::new(
            self.knobs[0].sample(&sampler),
            self.knobs[1].sample(&sampler),
            self.knobs[2].sample(&sampler),
        )
    }
}

/// True when any channel differs by more than the noise threshold.
fn exceeds_motion(a: Rgb, b: Rgb, threshold: u8) -> bool {
    a.red.abs_diff(b.red) > threshold
        || a.green.abs_diff(b.green) > threshold
        || a.blue.abs_diff(b.blue) > threshold
}
