//! Bridge macros implementation.

use log::{debug, info, trace};
use milight_core::{
    color::BridgeColor,
    ease::EaseKind,
    proto::{
        types::{Group, Percent, Rgb},
        Command,
    },
    time::Delay,
};
use milight_network::{Transport, UdpTransport};
use rand::Rng;
use std::time::Duration;

use crate::{
    AnimationPlan, CancelToken, Configuration, Macro, MilightResult, StdDelay, WindStrength,
};

/// Torch brightness range in percents.
const TORCH_BRIGHTNESS: std::ops::RangeInclusive<u8> = 5..=100;

/// Bridge macros runner.
///
/// Every composite macro inserts the configured command delay between two consecutive
/// commands.
pub struct App<T, D> {
    config: Configuration,
    transport: T,
    delay: D,
    cancel: CancelToken,
}

impl App<UdpTransport, StdDelay> {
    /// Opens a UDP transport to the configured bridge address.
    pub fn open(config: Configuration) -> MilightResult<Self> {
        let transport = UdpTransport::open(config.bridge_address)?;
        Ok(Self::new(config, transport, StdDelay))
    }
}

impl<T: Transport, D: Delay> App<T, D> {
    /// Creates a new application instance.
    pub fn new(config: Configuration, transport: T, delay: D) -> Self {
        Self {
            config,
            transport,
            delay,
            cancel: CancelToken::new(),
        }
    }

    /// Replaces the cancellation token, e.g. with the one shared with a signal handler.
    #[must_use]
    pub fn with_cancel_token(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Returns the application configuration.
    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// Returns a token which stops the running endless macros.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Runs the given macro on the given group or on the default one.
    pub fn run(&mut self, group: Option<Group>, action: Macro) -> MilightResult<()> {
        action.validate()?;

        let group = group.unwrap_or(self.config.default_group);
        match action {
            Macro::On => self.on(group),
            Macro::Off => self.off(group),
            Macro::Brightness(percent) => self.brightness(group, percent),
            Macro::SetWhite(brightness) => self.set_white(group, brightness),
            Macro::SetColor(rgb) => self.set_color_rgb(group, rgb),
            Macro::Torch(wind) => self.torch(group, wind, &mut rand::thread_rng()),
            Macro::WhiteSunrise { duration, ease } => self.white_sunrise(group, duration, ease),
            Macro::DiscoOn => self.send(Command::disco_on()),
            Macro::DiscoFaster => self.send(Command::disco_faster()),
            Macro::DiscoSlower => self.send(Command::disco_slower()),
        }
    }

    /// Switches the group on.
    pub fn on(&mut self, group: Group) -> MilightResult<()> {
        info!("Turn group {group} on");
        self.send(Command::on(group))
    }

    /// Switches the group off.
    pub fn off(&mut self, group: Group) -> MilightResult<()> {
        info!("Turn group {group} off");
        self.send(Command::off(group))
    }

    /// Selects the group and sets its brightness.
    pub fn brightness(&mut self, group: Group, percent: Percent) -> MilightResult<()> {
        let command = Command::brightness_percent(percent);
        debug!(
            "Setting brightness of group {group} to {percent}, scaled: {}",
            command.param()
        );

        self.send(Command::on(group))?;
        self.pause();
        self.send(command)
    }

    /// Switches the group into the white mode and optionally sets its brightness.
    pub fn set_white(&mut self, group: Group, brightness: Option<Percent>) -> MilightResult<()> {
        info!("Switch group {group} to white");

        self.send(Command::on(group))?;
        self.pause();
        self.send(Command::white(group))?;
        if let Some(brightness) = brightness {
            self.pause();
            self.brightness(group, brightness)?;
        }
        Ok(())
    }

    /// Selects the group and sets the given position on the bridge color wheel.
    pub fn set_color(&mut self, group: Group, hue: Percent) -> MilightResult<()> {
        let command = Command::color_percent(hue);
        debug!("Setting hue of group {group} to {}", command.param());

        self.send(Command::on(group))?;
        self.pause();
        self.send(command)
    }

    /// Shows the closest color to the given one the bridge can render.
    pub fn set_color_rgb(&mut self, group: Group, rgb: Rgb) -> MilightResult<()> {
        let color = BridgeColor::from(rgb);
        debug!("Color {rgb:?} maps to {color:?}");

        match color {
            BridgeColor::White { brightness } => {
                debug!("Too luminous or desaturated, switching to white");
                self.set_white(group, Some(brightness))
            }
            BridgeColor::Color { hue, brightness } => {
                self.set_color(group, hue)?;
                self.pause();
                self.brightness(group, brightness)
            }
        }
    }

    /// Switches the group to the dark white light and ramps its brightness up.
    pub fn white_sunrise(
        &mut self,
        group: Group,
        duration: Duration,
        ease: EaseKind,
    ) -> MilightResult<()> {
        ease.ensure_supported()?;
        info!(
            "Starting white sunrise in group {group} with duration {}s",
            duration.as_secs_f32()
        );

        self.set_white(group, None)?;
        self.pause();
        self.brightness(group, Percent::ZERO)?;
        self.pause();
        self.run_ramp(group, duration, ease)
    }

    /// Ramps the group brightness from zero to full along the given easing curve.
    ///
    /// Returns early if the macro has been cancelled.
    pub fn run_ramp(
        &mut self,
        group: Group,
        duration: Duration,
        kind: EaseKind,
    ) -> MilightResult<()> {
        kind.ensure_supported()?;

        let plan = AnimationPlan::new(duration, self.config.command_delay);
        debug!("Ramp plan for {}s: {plan:?}", duration.as_secs_f32());

        for level in plan.levels() {
            trace!("Step {level}");
            #[allow(clippy::cast_precision_loss)]
            let progress = kind.apply(level as f32 / 100.0)?;
            self.brightness(group, Percent::saturating(progress))?;

            self.delay.delay(plan.step_delay);
            if self.cancel.is_cancelled() {
                info!("Ramp cancelled at {level}%");
                break;
            }
        }
        Ok(())
    }

    /// Makes the group flicker like a torch flame until the macro is cancelled.
    pub fn torch<R: Rng + ?Sized>(
        &mut self,
        group: Group,
        wind: WindStrength,
        rng: &mut R,
    ) -> MilightResult<()> {
        info!("Lighting a torch in group {group} with wind strength {wind}");

        self.set_color_rgb(group, Rgb::FLAME)?;
        self.pause();
        while !self.cancel.is_cancelled() {
            let level = rng.gen_range(TORCH_BRIGHTNESS);
            self.brightness(group, Percent::saturating(f32::from(level) / 100.0))?;

            // A very weak wind overflows the duration range.
            let flicker = Duration::try_from_secs_f32(rng.gen::<f32>() / wind.get())
                .unwrap_or(Duration::MAX)
                .max(self.config.command_delay);
            trace!("Flicker for {flicker:?}");
            self.delay.delay(flicker);
        }

        info!("Torch in group {group} has been extinguished");
        Ok(())
    }

    fn send(&mut self, command: Command) -> MilightResult<()> {
        trace!("Sending {command}");
        self.transport.send(command)
    }

    fn pause(&mut self) {
        self.delay.delay(self.config.command_delay);
    }
}
