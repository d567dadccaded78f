use std::fmt::Display;

use avtext::{IcaoCode, RegionPreference};
use clap::{error::ErrorKind, CommandFactory, Parser, Subcommand};

/// Standard input filename
const STDIN_FILE: &str = "-";

const USAGE_SHORT: &str = r#"
Text is taken from the trailing arguments. If there are none, it is read from --file, which defaults to standard input.

See --help for more details.

FOR FLIGHT SIMULATION USE ONLY!
"#;

const USAGE_LONG: &str = r#"
Text is taken from the trailing arguments. If there are none, it is read from --file, which defaults to standard input.

Decode a METAR:

    avtextdec metar KJFK 121851Z 18010KT 10SM FEW250 28/18 A3000

Decode a block of NOTAMs, hiding the ones which have expired:

    avtextdec --file notams.txt notam --icao EGLL --current

Check a route filed from EGLL to EHAM, with a cleanup suggestion:

    avtextdec route --dep EGLL --arr EHAM --cleanup \
        EGLL DCT DVR DCT KONAN DCT REDFA EHAM

Pick a landing runway from the wind in a METAR:

    avtextdec runway --runways 09L,09R,27L,27R \
        EGLL 121850Z 25012KT 9999 FEW030 18/09 Q1016

The decoders are heuristic. Fields which cannot be recognized are omitted, and the route checker has no navigation database.

FOR FLIGHT SIMULATION USE ONLY!
"#;

/// Top-level program arguments
#[derive(Parser, Clone, Debug)]
#[command(version)]
#[command(about, long_about = None)]
#[command(after_help = USAGE_SHORT, after_long_help = USAGE_LONG)]
#[command(max_term_width = 100)]
pub struct Args {
    /// Verbosity level (-vvv for more)
    #[arg(short, long, default_value_t = 0, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Print NOTHING, not even decoded text
    #[arg(short, long)]
    pub quiet: bool,

    /// Input file (or "-" for stdin)
    ///
    /// Only read when no text is given on the command line.
    #[arg(long, default_value_t = STDIN_FILE.to_string())]
    pub file: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Decoders
#[derive(Subcommand, Clone, Debug)]
pub enum Command {
    /// Decode METAR reports, one per line
    Metar {
        /// METAR text
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },

    /// Decode an ATIS transcript
    Atis {
        /// Airport ICAO code, used if the text has none
        #[arg(long)]
        icao: Option<IcaoCode>,

        /// ATIS text
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },

    /// Decode NOTAMs in FAA or ICAO format
    Notam {
        /// Airport ICAO code, used if a NOTAM has none
        #[arg(long)]
        icao: Option<IcaoCode>,

        /// Hide NOTAMs which have already expired
        #[arg(long)]
        current: bool,

        /// NOTAM text
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },

    /// Check a flight plan route for likely reroutes
    Route {
        /// Departure ICAO code
        #[arg(long)]
        dep: Option<IcaoCode>,

        /// Arrival ICAO code
        #[arg(long)]
        arr: Option<IcaoCode>,

        /// Routing conventions: auto, uk-eu, or us
        #[arg(long, default_value_t = RegionPreference::Auto)]
        region: RegionPreference,

        /// Also suggest a cleaned-up route and filing variants
        #[arg(long)]
        cleanup: bool,

        /// Route text
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },

    /// Pick a runway from the wind in a METAR
    Runway {
        /// Runways available, like 27L,09R
        #[arg(long, value_delimiter = ',', required = true)]
        runways: Vec<String>,

        /// METAR text
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },
}

impl Args {
    /// Return true if the user requests input from stdin
    pub fn input_is_stdin(&self) -> bool {
        self.file == STDIN_FILE
    }

    /// Text given on the command line, if any
    pub fn inline_text(&self) -> Option<String> {
        let text = match &self.command {
            Command::Metar { text }
            | Command::Atis { text, .. }
            | Command::Notam { text, .. }
            | Command::Route { text, .. }
            | Command::Runway { text, .. } => text,
        };

        if text.is_empty() {
            None
        } else {
            Some(text.join(" "))
        }
    }
}

/// A program-level error with exit code
#[derive(Debug)]
pub struct CliError {
    error: anyhow::Error,
    exit_code: i32,
}

impl CliError {
    /// Create new error with a custom exit code
    pub fn new(error: anyhow::Error, code: i32) -> CliError {
        CliError {
            error,
            exit_code: code,
        }
    }

    /// Print this error to the terminal
    ///
    /// Errors from clap are printed verbatim. Other types of errors
    /// are printed indirectly via clap's fancy formatter.
    pub fn print(&self) -> std::io::Result<()> {
        if let Some(e) = self.error.downcast_ref::<clap::Error>() {
            e.print()
        } else {
            Args::command()
                .error(ErrorKind::Format, self.to_string())
                .print()
        }
    }

    /// Print this error to the terminal and exit
    pub fn exit(&self) -> ! {
        drop(self.print());
        std::process::exit(self.exit_code);
    }
}

impl Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.error)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> CliError {
        CliError::new(err, 1)
    }
}

impl From<clap::Error> for CliError {
    fn from(err: clap::Error) -> CliError {
        let code = if err.use_stderr() { 2 } else { 0 };
        CliError::new(err.into(), code)
    }
}
