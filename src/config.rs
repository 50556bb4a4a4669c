use crate::{
    error::ConfigError,
    scheduler::{reference_workload, Makespan, Policy, Process},
};
use clap::{App, Arg, ArgMatches};
use lazy_static::lazy_static;
use regex::Regex;
use std::{ffi::OsString, str::FromStr};

const PROCESS_PATTERN: &str = r"^[Pp]?(\d+):(\d+):(\d+):(-?\d+)$";

lazy_static! {
    static ref PROCESS_RE: Result<Regex, regex::Error> = Regex::new(PROCESS_PATTERN);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Tui,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "tui" => Ok(OutputFormat::Tui),
            other => Err(format!("unknown output format: {other}")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub processes: Vec<Process>,
    pub quantum: u64,
    pub makespan: Makespan,
    pub policies: Vec<Policy>,
    pub format: OutputFormat,
    pub verbosity: u64,
}

impl Config {
    pub fn from_args<I, T>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = app().get_matches_from_safe(args)?;
        Config::from_matches(&matches)
    }

    fn from_matches(matches: &ArgMatches) -> Result<Self, ConfigError> {
        let processes = match matches.values_of("process") {
            Some(specs) => specs.map(parse_process).collect::<Result<_, _>>()?,
            None => reference_workload(),
        };

        let policies = match value(matches, "policy")? {
            "all" => Policy::ALL.to_vec(),
            policy => vec![parse_value("policy", policy)?],
        };

        Ok(Self {
            processes,
            quantum: parse_value("quantum", value(matches, "quantum")?)?,
            makespan: parse_value("makespan", value(matches, "makespan")?)?,
            policies,
            format: parse_value("format", value(matches, "format")?)?,
            verbosity: matches.occurrences_of("verbose"),
        })
    }
}

fn app<'a, 'b>() -> App<'a, 'b> {
    App::new("cpu-scheduling-sim")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Compares CPU scheduling policies over a fixed workload")
        .arg(
            Arg::with_name("process")
                .short("p")
                .long("process")
                .takes_value(true)
                .multiple(true)
                .number_of_values(1)
                .validator(valid_process)
                .help("Process as ID:ARRIVAL:BURST:PRIORITY (repeatable, defaults to the reference workload)"),
        )
        .arg(
            Arg::with_name("quantum")
                .short("q")
                .long("quantum")
                .takes_value(true)
                .default_value("2")
                .help("Round robin time quantum"),
        )
        .arg(
            Arg::with_name("policy")
                .long("policy")
                .takes_value(true)
                .possible_values(&["rr", "sjf", "priority", "all"])
                .default_value("all")
                .help("Scheduling policy to simulate"),
        )
        .arg(
            Arg::with_name("makespan")
                .long("makespan")
                .takes_value(true)
                .possible_values(&["legacy", "max"])
                .default_value("legacy")
                .help("Makespan used for utilization: last listed process (legacy) or latest completion (max)"),
        )
        .arg(
            Arg::with_name("format")
                .long("format")
                .takes_value(true)
                .possible_values(&["text", "json", "tui"])
                .default_value("text")
                .help("Report output format"),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .multiple(true)
                .help("Increases log verbosity"),
        )
}

fn valid_process(value: String) -> Result<(), String> {
    parse_process(&value).map(|_| ()).map_err(|error| error.to_string())
}

/// Parses `ID:ARRIVAL:BURST:PRIORITY`, with an optional `P` before the id.
pub fn parse_process(spec: &str) -> Result<Process, ConfigError> {
    let re = PROCESS_RE.as_ref().map_err(Clone::clone)?;
    let invalid = || ConfigError::InvalidProcess(spec.to_owned());

    let captures = re.captures(spec.trim()).ok_or_else(invalid)?;
    let field = |index: usize| captures.get(index).map(|m| m.as_str()).ok_or_else(invalid);

    Ok(Process::with_priority(
        field(1)?.parse().map_err(|_| invalid())?,
        field(2)?.parse().map_err(|_| invalid())?,
        field(3)?.parse().map_err(|_| invalid())?,
        field(4)?.parse().map_err(|_| invalid())?,
    ))
}

fn value<'m>(matches: &'m ArgMatches, name: &'static str) -> Result<&'m str, ConfigError> {
    matches.value_of(name).ok_or(ConfigError::InvalidValue {
        name,
        value: String::new(),
    })
}

fn parse_value<T: FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidValue {
        name,
        value: value.to_owned(),
    })
}
