use std::io::{self, Read};

use anyhow::Context;
use clap::Parser;
use log::{info, warn, LevelFilter};

mod app;
mod cli;

use cli::{Args, CliError};

fn main() {
    match avtextdec() {
        Ok(()) => {}
        Err(cli_error) => cli_error.exit(),
    }
}

fn avtextdec() -> Result<(), CliError> {
    // Parse options and start logging
    let args = Args::try_parse()?;
    log_setup(&args);

    // text on the command line wins over --file
    let text = match args.inline_text() {
        Some(text) => text,
        None => {
            let stdin = io::stdin();
            let stdin_handle = stdin.lock();
            let mut inbuf = file_setup(&args, stdin_handle)?;
            let mut text = String::new();
            inbuf
                .read_to_string(&mut text)
                .context("Unable to read input text")?;
            text
        }
    };

    let out = app::run(&args, &text)?;
    if !args.quiet {
        println!("{}", out);
    }

    Ok(())
}

fn log_setup(args: &Args) {
    if args.quiet {
        // no logging
        return;
    } else if std::env::var_os("RUST_LOG").is_none() {
        // parameter controls
        let log_filter = match args.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        };

        pretty_env_logger::formatted_builder()
            .filter_module("avtext", log_filter)
            .filter_module("avtextdec", log_filter)
            .init();
    } else {
        // environment controls
        pretty_env_logger::init();
    }
}

fn file_setup<'stdin>(
    args: &Args,
    stdin: std::io::StdinLock<'stdin>,
) -> Result<Box<dyn io::BufRead + 'stdin>, anyhow::Error> {
    if args.input_is_stdin() {
        info!("reading standard input");
        if is_terminal(&std::io::stdin()) {
            warn!("reading text from the terminal: end input with Ctrl-D");
        }
        Ok(Box::new(io::BufReader::new(stdin)))
    } else {
        info!("reading file: \"{}\"", &args.file);
        Ok(Box::new(io::BufReader::new(
            std::fs::File::open(&args.file)
                .with_context(|| format!("Unable to open --file \"{}\"", args.file))?,
        )))
    }
}

#[cfg(not(target_os = "windows"))]
fn is_terminal<S>(stream: &S) -> bool
where
    S: std::os::fd::AsRawFd,
{
    terminal_size::terminal_size_using_fd(stream.as_raw_fd()).is_some()
}

#[cfg(target_os = "windows")]
fn is_terminal<S>(stream: &S) -> bool
where
    S: std::os::windows::io::AsRawHandle,
{
    terminal_size::terminal_size_using_handle(stream.as_raw_handle()).is_some()
}
