//! `plotagent` - feed model responses into plotter settings from the shell

mod config;
mod session;

use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use plotagent_schema::SettingField;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::AppConfig;
use crate::session::{schema_text, Session};

fn build_cli() -> Command {
    Command::new("plotagent")
        .version(plotagent_schema::VERSION)
        .about("Validate model responses and apply them to plotter settings")
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Configuration file (.toml, .yaml or .yml)"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Output and logs as JSON"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Debug logging on stderr"),
        )
        .subcommand(
            Command::new("ingest")
                .about("Ingest a JSON settings payload (stdin when no source is given)")
                .arg(
                    Arg::new("payload")
                        .long("payload")
                        .conflicts_with("file")
                        .help("Payload text"),
                )
                .arg(
                    Arg::new("file")
                        .long("file")
                        .value_parser(value_parser!(PathBuf))
                        .help("Read payload from file"),
                ),
        )
        .subcommand(
            Command::new("translate")
                .about("Apply translation-table assignments found in a response")
                .arg(
                    Arg::new("text")
                        .long("text")
                        .required(true)
                        .help("Response text to scan"),
                ),
        )
        .subcommand(
            Command::new("decide")
                .about("Apply a yes/no answer to a boolean field")
                .arg(
                    Arg::new("field")
                        .long("field")
                        .required(true)
                        .value_parser(flag_field)
                        .help("Yes/no field to set, e.g. show_edges"),
                )
                .arg(
                    Arg::new("answer")
                        .long("answer")
                        .required(true)
                        .help("Model answer"),
                ),
        )
        .subcommand(Command::new("schema").about("Print the payload JSON Schema"))
        .subcommand(
            Command::new("prompt")
                .about("Print the configure prompt for the current settings")
                .arg(
                    Arg::new("instruction")
                        .long("instruction")
                        .required(true)
                        .help("User instruction"),
                ),
        )
}

fn flag_field(name: &str) -> Result<SettingField, String> {
    let field = name.parse::<SettingField>().map_err(|e| e.to_string())?;
    if field.is_flag() {
        Ok(field)
    } else {
        Err(format!("'{field}' does not take a yes/no answer"))
    }
}

fn init_tracing(verbose: bool, as_json: bool) {
    let filter = if verbose {
        tracing_subscriber::EnvFilter::new("debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
    };

    let registry = tracing_subscriber::registry().with(filter);
    if as_json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn read_payload(args: &ArgMatches) -> anyhow::Result<String> {
    if let Some(payload) = args.get_one::<String>("payload") {
        return Ok(payload.clone());
    }
    if let Some(path) = args.get_one::<PathBuf>("file") {
        return std::fs::read_to_string(path)
            .with_context(|| format!("cannot read payload from {}", path.display()));
    }
    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .context("cannot read payload from stdin")?;
    Ok(buffer)
}

fn run(matches: &ArgMatches) -> anyhow::Result<ExitCode> {
    let config = match matches.get_one::<PathBuf>("config") {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    let as_json = matches.get_flag("json");
    let mut session = Session::from_config(&config)?;

    let outcome = match matches.subcommand() {
        Some(("ingest", args)) => {
            let payload = read_payload(args)?;
            session.ingest(&payload)
        }
        Some(("translate", args)) => {
            let text = args.get_one::<String>("text").context("missing --text")?;
            session.translate(text)
        }
        Some(("decide", args)) => {
            let field = *args.get_one::<SettingField>("field").context("missing --field")?;
            let answer = args.get_one::<String>("answer").context("missing --answer")?;
            session.decide(field, answer)
        }
        Some(("schema", _)) => {
            println!("{}", schema_text());
            return Ok(ExitCode::SUCCESS);
        }
        Some(("prompt", args)) => {
            let instruction = args
                .get_one::<String>("instruction")
                .context("missing --instruction")?;
            let request = session.prompt(instruction);
            if as_json {
                println!("{}", serde_json::to_string_pretty(&request)?);
            } else {
                println!("[system]\n{}\n\n[user]\n{}", request.system, request.user);
            }
            return Ok(ExitCode::SUCCESS);
        }
        _ => anyhow::bail!("unknown command"),
    };

    let (text, ok) = session.render(&outcome, as_json);
    println!("{text}");
    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

fn main() -> ExitCode {
    let matches = build_cli().get_matches();
    init_tracing(matches.get_flag("verbose"), matches.get_flag("json"));

    match run(&matches) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(2)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_is_well_formed() {
        build_cli().debug_assert();
    }

    #[test]
    fn parses_decide_field() {
        let matches = build_cli()
            .try_get_matches_from(["plotagent", "decide", "--field", "show_edges", "--answer", "yes"])
            .unwrap();
        let (_, args) = matches.subcommand().unwrap();
        assert_eq!(
            args.get_one::<SettingField>("field"),
            Some(&SettingField::ShowEdges)
        );
    }

    #[test]
    fn rejects_unknown_field_name() {
        let result = build_cli().try_get_matches_from([
            "plotagent", "decide", "--field", "shadows", "--answer", "yes",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn decide_requires_yes_no_field() {
        let result = build_cli().try_get_matches_from([
            "plotagent", "decide", "--field", "font_size", "--answer", "yes",
        ]);
        assert!(result.is_err());
        assert_eq!(flag_field("lighting"), Ok(SettingField::Lighting));
        assert_eq!(
            flag_field("font_size"),
            Err("'font_size' does not take a yes/no answer".to_string())
        );
    }

    #[test]
    fn payload_and_file_conflict() {
        let result = build_cli().try_get_matches_from([
            "plotagent", "ingest", "--payload", "{}", "--file", "x.json",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let matches = build_cli()
            .try_get_matches_from(["plotagent", "schema", "--json", "--verbose"])
            .unwrap();
        assert!(matches.get_flag("json"));
        assert!(matches.get_flag("verbose"));
    }
}
