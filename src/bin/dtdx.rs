//! Command-line interface for dtdx
//! This binary scans dtdx files and prints their tokens.
//!
//! Usage:
//!   dtdx tokens `<path>` [--format `<format>`] [--config `<file>`] [--lookahead `<n>`]  - Print the tokens of a file
//!   dtdx token-types                                                              - List the token types
//!   dtdx list-formats                                                             - List the output formats

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use dtdx::dtdx::config::{DtdxConfig, Loader};
use dtdx::dtdx::processor::{available_formats, process_file, OutputFormat, ProcessingError};
use dtdx::dtdx::token_names;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() {
    let matches = Command::new("dtdx")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for inspecting dtdx document models")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log scanner activity to stderr")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("tokens")
                .about("Scan a dtdx file and print its tokens")
                .arg(
                    Arg::new("path")
                        .help("Path to the dtdx file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format (overrides the configured one)")
                        .value_parser(OutputFormat::ALL.map(OutputFormat::name)),
                )
                .arg(
                    Arg::new("config")
                        .long("config")
                        .short('c')
                        .help("Configuration file layered over the defaults"),
                )
                .arg(
                    Arg::new("lookahead")
                        .long("lookahead")
                        .help("Number of tokens the scanner may run ahead of the printer")
                        .value_parser(value_parser!(u32).range(1..)),
                ),
        )
        .subcommand(Command::new("token-types").about("List the dtdx token types"))
        .subcommand(Command::new("list-formats").about("List available output formats"))
        .get_matches();

    init_tracing(matches.get_flag("verbose"));

    match matches.subcommand() {
        Some(("tokens", tokens_matches)) => handle_tokens_command(tokens_matches),
        Some(("token-types", _)) => handle_token_types_command(),
        Some(("list-formats", _)) => handle_list_formats_command(),
        _ => unreachable!(),
    }
}

/// Install a stderr subscriber. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose { "dtdx=debug" } else { "warn" })
    });
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .with(filter)
        .init();
}

/// Handle the tokens command
fn handle_tokens_command(matches: &ArgMatches) {
    let Some(path) = matches.get_one::<String>("path") else {
        unreachable!("path is required")
    };

    let config = load_config(matches).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });

    match process_file(path, config.output.format, config.lexer.lookahead) {
        Ok(output) => print!("{}", output),
        Err(ProcessingError::Scan(e)) => {
            eprintln!("{}:{}", path, e);
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn load_config(matches: &ArgMatches) -> Result<DtdxConfig, config::ConfigError> {
    let mut loader = Loader::new();
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    if let Some(format) = matches.get_one::<String>("format") {
        loader = loader.set_override("output.format", format.as_str())?;
    }
    if let Some(lookahead) = matches.get_one::<u32>("lookahead") {
        loader = loader.set_override("lexer.lookahead", i64::from(*lookahead))?;
    }
    loader.build()
}

/// Handle the token-types command
fn handle_token_types_command() {
    println!("Token types:\n");
    for (kind, name) in token_names().iter() {
        println!("  {:>3}  {}", kind.0, name);
    }
}

/// Handle the list-formats command
fn handle_list_formats_command() {
    println!("Available output formats:\n");
    for format in available_formats() {
        println!("  {}", format);
    }
}
