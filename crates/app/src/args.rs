use std::fmt;
use std::path::PathBuf;

use quiz_core::model::Section;

pub const CONFIG_ENV: &str = "CRANIUM_CONFIG";
pub const ASSETS_ENV: &str = "CRANIUM_ASSETS";
pub const SECTION_ENV: &str = "CRANIUM_SECTION";

#[derive(Debug, PartialEq, Eq)]
pub enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    UnknownCommand(String),
    NotAllowed { flag: &'static str, command: Command },
    InvalidSection { raw: String },
    InvalidSeed { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::UnknownCommand(cmd) => write!(f, "unknown subcommand: {cmd}"),
            ArgsError::NotAllowed { flag, command } => {
                write!(f, "{flag} is not accepted by {command}")
            }
            ArgsError::InvalidSection { raw } => write!(f, "invalid --section value: {raw}"),
            ArgsError::InvalidSeed { raw } => write!(f, "invalid --seed value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Play,
    Learn,
    CheckAssets,
    Help,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "play" => Some(Self::Play),
            "learn" => Some(Self::Learn),
            "check-assets" => Some(Self::CheckAssets),
            "help" => Some(Self::Help),
            _ => None,
        }
    }

    fn accepts(self, flag: &str) -> bool {
        match self {
            Command::Play => true,
            Command::Learn => matches!(flag, "--section" | "--assets" | "--config"),
            Command::CheckAssets => matches!(flag, "--assets" | "--config"),
            Command::Help => false,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Command::Play => "play",
            Command::Learn => "learn",
            Command::CheckAssets => "check-assets",
            Command::Help => "help",
        })
    }
}

/// Parsed command line with environment fallbacks already applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    pub command: Command,
    pub section: Option<Section>,
    pub config: Option<PathBuf>,
    pub assets: Option<PathBuf>,
    pub seed: Option<u64>,
    pub single_step: bool,
    pub json: bool,
}

impl Args {
    fn new(command: Command) -> Self {
        Self {
            command,
            section: None,
            config: None,
            assets: None,
            seed: None,
            single_step: false,
            json: false,
        }
    }

    pub fn from_env() -> Result<Self, ArgsError> {
        Self::parse(std::env::args().skip(1), |key| std::env::var(key).ok())
    }

    /// Parse `argv` (without the program name); `env` looks up fallbacks.
    pub fn parse(
        argv: impl IntoIterator<Item = String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ArgsError> {
        let mut argv = argv.into_iter().peekable();

        // No subcommand means play.
        let command = match argv.peek().map(String::as_str) {
            None => Command::Play,
            Some("--help" | "-h") => Command::Help,
            Some(first) if first.starts_with("--") => Command::Play,
            Some(first) => {
                let command = Command::from_arg(first)
                    .ok_or_else(|| ArgsError::UnknownCommand(first.to_string()))?;
                argv.next();
                command
            }
        };

        let mut args = Self::new(command);
        if command == Command::Help {
            return Ok(args);
        }

        while let Some(arg) = argv.next() {
            let flag: &'static str = match arg.as_str() {
                "--section" => "--section",
                "--config" => "--config",
                "--assets" => "--assets",
                "--seed" => "--seed",
                "--single-step" => "--single-step",
                "--json" => "--json",
                "--help" | "-h" => {
                    args.command = Command::Help;
                    return Ok(args);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            };
            if !command.accepts(flag) {
                return Err(ArgsError::NotAllowed { flag, command });
            }

            match flag {
                "--section" => args.section = Some(parse_section(require_value(&mut argv, flag)?)?),
                "--config" => args.config = Some(PathBuf::from(require_value(&mut argv, flag)?)),
                "--assets" => args.assets = Some(PathBuf::from(require_value(&mut argv, flag)?)),
                "--seed" => {
                    let raw = require_value(&mut argv, flag)?;
                    let seed = raw
                        .trim()
                        .parse()
                        .map_err(|_| ArgsError::InvalidSeed { raw: raw.clone() })?;
                    args.seed = Some(seed);
                }
                "--single-step" => args.single_step = true,
                _ => args.json = true,
            }
        }

        if args.section.is_none() && command.accepts("--section") {
            if let Some(raw) = env(SECTION_ENV).filter(|raw| !raw.trim().is_empty()) {
                args.section = Some(parse_section(raw)?);
            }
        }
        if args.config.is_none() {
            args.config = env(CONFIG_ENV)
                .filter(|raw| !raw.trim().is_empty())
                .map(PathBuf::from);
        }
        if args.assets.is_none() {
            args.assets = env(ASSETS_ENV)
                .filter(|raw| !raw.trim().is_empty())
                .map(PathBuf::from);
        }

        Ok(args)
    }
}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn parse_section(raw: String) -> Result<Section, ArgsError> {
    raw.parse().map_err(|_| ArgsError::InvalidSection { raw })
}

pub fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cranium-quiz [play] [--section <name>] [--config <path>] [--seed <n>]");
    eprintln!("                      [--assets <dir>] [--single-step] [--json]");
    eprintln!("  cranium-quiz learn [--section <name>] [--assets <dir>]");
    eprintln!("  cranium-quiz check-assets [--assets <dir>]");
    eprintln!();
    eprintln!("Sections: neurocranium, sutures, viscerocranium");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  {CONFIG_ENV}, {ASSETS_ENV}, {SECTION_ENV}, RUST_LOG");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Result<Args, ArgsError> {
        Args::parse(argv.iter().map(|s| s.to_string()), |_| None)
    }

    #[test]
    fn empty_argv_plays() {
        let args = parse(&[]).unwrap();
        assert_eq!(args.command, Command::Play);
        assert_eq!(args.section, None);
        assert!(!args.single_step);
    }

    #[test]
    fn flags_without_subcommand_play() {
        let args = parse(&["--section", "Sutures", "--seed", "42", "--json"]).unwrap();
        assert_eq!(args.command, Command::Play);
        assert_eq!(args.section, Some(Section::Sutures));
        assert_eq!(args.seed, Some(42));
        assert!(args.json);
    }

    #[test]
    fn learn_rejects_play_only_flags() {
        let err = parse(&["learn", "--single-step"]).unwrap_err();
        assert_eq!(
            err,
            ArgsError::NotAllowed {
                flag: "--single-step",
                command: Command::Learn
            }
        );
    }

    #[test]
    fn reports_bad_values() {
        assert_eq!(
            parse(&["play", "--section", "femur"]).unwrap_err(),
            ArgsError::InvalidSection {
                raw: "femur".into()
            }
        );
        assert_eq!(
            parse(&["--seed", "x"]).unwrap_err(),
            ArgsError::InvalidSeed { raw: "x".into() }
        );
        assert_eq!(
            parse(&["--assets"]).unwrap_err(),
            ArgsError::MissingValue { flag: "--assets" }
        );
        assert_eq!(
            parse(&["quiz"]).unwrap_err(),
            ArgsError::UnknownCommand("quiz".into())
        );
    }

    #[test]
    fn environment_fills_unset_values() {
        let env = |key: &str| match key {
            SECTION_ENV => Some("viscerocranium".to_string()),
            ASSETS_ENV => Some("/srv/images".to_string()),
            _ => None,
        };
        let args = Args::parse(
            ["play", "--assets", "local"].iter().map(|s| s.to_string()),
            env,
        )
        .unwrap();
        assert_eq!(args.section, Some(Section::Viscerocranium));
        assert_eq!(args.assets, Some(PathBuf::from("local")));
        assert_eq!(args.config, None);
    }

    #[test]
    fn help_short_circuits() {
        assert_eq!(parse(&["--help"]).unwrap().command, Command::Help);
        assert_eq!(parse(&["learn", "-h"]).unwrap().command, Command::Help);
    }
}
