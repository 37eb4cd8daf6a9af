use std::{net::SocketAddr, str::FromStr, time::Duration};

use anyhow::Context;
use clap::{ArgAction, Parser, ValueEnum};
use log::LevelFilter;
use milight_app::{
    core::{
        ease::EaseKind,
        proto::types::{Group, Percent},
    },
    App, Configuration, Macro, MilightError, DEBUG_SUNRISE_DURATION, DEFAULT_SUNRISE_DURATION,
};

#[derive(ValueEnum, Copy, Clone, PartialEq, Eq, Debug)]
#[value(rename_all = "snake_case")]
enum MacroName {
    On,
    Off,
    Brightness,
    SetWhite,
    SetColor,
    Torch,
    WhiteSunrise,
    DiscoOn,
    DiscoFaster,
    DiscoSlower,
}

/// Milight lamps control utility
///
/// Sends lighting macros to the Milight WiFi bridge.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = false)]
struct Cli {
    /// The macro to execute
    #[arg(value_enum, value_name = "MACRO")]
    action: MacroName,
    /// Bridge socket address, it may be a broadcast one
    #[arg(short, long, default_value = "192.168.2.100:8899")]
    address: SocketAddr,
    /// Lamp group receiving the command, 0 means all groups
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(0..=4))]
    group: Option<u8>,
    /// How long a macro should last
    #[arg(short, long, value_name = "SECONDS")]
    duration: Option<u64>,
    /// Shorten transition times for debugging purposes
    #[arg(long)]
    debug: bool,
    /// Additional macro argument: brightness percent for `brightness` and `set_white`,
    /// `r,g,b` color for `set_color`, wind strength for `torch`
    #[arg(short, long)]
    param: Option<String>,
    /// Sunrise easing curve
    #[arg(short, long, default_value = "sin")]
    ease: EaseKind,
    /// Pause between two consecutive commands
    #[arg(long, default_value_t = 100, value_name = "MS")]
    delay_ms: u64,
    /// Logging verbosity, repeat to get more details
    #[arg(short, long = "verbosity", visible_alias = "verbose", action = ArgAction::Count)]
    verbosity: u8,
}

impl Cli {
    fn configuration(&self) -> Configuration {
        Configuration {
            bridge_address: self.address,
            command_delay: Duration::from_millis(self.delay_ms),
            ..Configuration::default()
        }
    }

    fn group(&self) -> Option<Group> {
        self.group.map(Group::from)
    }

    fn sunrise_duration(&self) -> Duration {
        if self.debug {
            DEBUG_SUNRISE_DURATION
        } else {
            self.duration
                .map_or(DEFAULT_SUNRISE_DURATION, Duration::from_secs)
        }
    }

    fn param<T>(&self) -> anyhow::Result<Option<T>>
    where
        T: FromStr<Err = MilightError>,
    {
        self.param
            .as_deref()
            .map(|param| {
                param
                    .parse::<T>()
                    .with_context(|| format!("Invalid {:?} parameter '{param}'", self.action))
            })
            .transpose()
    }

    /// Builds a macro, all the parameters are checked before any network activity.
    fn build_macro(&self) -> anyhow::Result<Macro> {
        let action = match self.action {
            MacroName::On => Macro::On,
            MacroName::Off => Macro::Off,
            MacroName::Brightness => Macro::Brightness(self.param()?.unwrap_or(Percent::FULL)),
            MacroName::SetWhite => Macro::SetWhite(self.param()?),
            MacroName::SetColor => Macro::SetColor(self.param()?.unwrap_or_default()),
            MacroName::Torch => Macro::Torch(self.param()?.unwrap_or_default()),
            MacroName::WhiteSunrise => Macro::WhiteSunrise {
                duration: self.sunrise_duration(),
                ease: self.ease,
            },
            MacroName::DiscoOn => Macro::DiscoOn,
            MacroName::DiscoFaster => Macro::DiscoFaster,
            MacroName::DiscoSlower => Macro::DiscoSlower,
        };

        action
            .validate()
            .with_context(|| format!("Unable to run {:?}", self.action))?;
        Ok(action)
    }
}

fn init_logger(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbosity);

    let action = cli.build_macro()?;
    let config = cli.configuration();

    let mut app = App::open(config)
        .with_context(|| format!("Unable to open socket to the bridge {}", config.bridge_address))?;

    let token = app.cancel_token();
    ctrlc::set_handler(move || {
        if token.is_cancelled() {
            std::process::exit(130);
        }
        log::info!("Interrupted, stopping at the next pause");
        token.cancel();
    })?;

    log::info!("Sending {:?} to {}", action, app.config().bridge_address);
    app.run(cli.group(), action)?;
    log::trace!("Macro {:?} finished", cli.action);

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use clap::Parser;
    use milight_app::{
        core::{
            ease::EaseKind,
            proto::types::{Group, Percent, Rgb},
        },
        Macro, WindStrength, DEBUG_SUNRISE_DURATION, DEFAULT_SUNRISE_DURATION,
    };

    use super::Cli;

    fn build(args: &[&str]) -> anyhow::Result<Macro> {
        let cli = Cli::try_parse_from(std::iter::once("milight").chain(args.iter().copied()))?;
        cli.build_macro()
    }

    #[test]
    fn test_macro_defaults() {
        assert_eq!(build(&["on"]).unwrap(), Macro::On);
        assert_eq!(
            build(&["brightness"]).unwrap(),
            Macro::Brightness(Percent::FULL)
        );
        assert_eq!(build(&["set_white"]).unwrap(), Macro::SetWhite(None));
        assert_eq!(build(&["set_color"]).unwrap(), Macro::SetColor(Rgb::WHITE));
        assert_eq!(
            build(&["torch"]).unwrap(),
            Macro::Torch(WindStrength::default())
        );
        assert_eq!(
            build(&["white_sunrise"]).unwrap(),
            Macro::WhiteSunrise {
                duration: DEFAULT_SUNRISE_DURATION,
                ease: EaseKind::Sin,
            }
        );
    }

    #[test]
    fn test_macro_params() {
        assert_eq!(
            build(&["set_color", "-p", "1,0.5,0"]).unwrap(),
            Macro::SetColor(Rgb::FLAME)
        );
        assert_eq!(
            build(&["brightness", "--param", "0.5"]).unwrap(),
            Macro::Brightness(Percent::new(0.5).unwrap())
        );
        assert_eq!(
            build(&["white_sunrise", "-d", "60", "-e", "cubic"]).unwrap(),
            Macro::WhiteSunrise {
                duration: Duration::from_secs(60),
                ease: EaseKind::Cubic,
            }
        );
        assert_eq!(
            build(&["white_sunrise", "-d", "60", "--debug"]).unwrap(),
            Macro::WhiteSunrise {
                duration: DEBUG_SUNRISE_DURATION,
                ease: EaseKind::Sin,
            }
        );
    }

    #[test]
    fn test_malformed_arguments_are_rejected() {
        assert!(build(&["dance"]).is_err());
        assert!(build(&["on", "-g", "5"]).is_err());
        assert!(build(&["set_color", "-p", "1,0"]).is_err());
        assert!(build(&["brightness", "-p", "1.5"]).is_err());
        assert!(build(&["torch", "-p", "0"]).is_err());
        assert!(build(&["white_sunrise", "-e", "back"]).is_err());
        assert!(build(&["white_sunrise", "-e", "elastic"]).is_err());
    }

    #[test]
    fn test_verbosity_count() {
        let cli = Cli::try_parse_from(["milight", "on", "--verbosity", "--verbosity"]).unwrap();
        assert_eq!(cli.verbosity, 2);
        let cli = Cli::try_parse_from(["milight", "on", "-vvv"]).unwrap();
        assert_eq!(cli.verbosity, 3);
        let cli = Cli::try_parse_from(["milight", "on", "--verbose"]).unwrap();
        assert_eq!(cli.verbosity, 1);
        let cli = Cli::try_parse_from(["milight", "on"]).unwrap();
        assert_eq!(cli.verbosity, 0);
    }

    #[test]
    fn test_group_and_config() {
        let cli = Cli::try_parse_from(["milight", "off", "-g", "2", "-a", "255.255.255.255:8899"])
            .unwrap();
        assert_eq!(cli.group(), Some(Group::Two));
        let config = cli.configuration();
        assert_eq!(config.bridge_address.to_string(), "255.255.255.255:8899");
        assert_eq!(config.command_delay, Duration::from_millis(100));

        let cli = Cli::try_parse_from(["milight", "on"]).unwrap();
        assert_eq!(cli.group(), None);
    }
}
