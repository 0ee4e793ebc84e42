use anyhow::{anyhow, Result};
use parserlib_bin::css3::events::ParseEvent;
use parserlib_bin::css3::parser_config::ParserOptions;
use parserlib_bin::css3::session::ParseSession;
use parserlib_bin::css3::tokenizer::Tokenizer;
use parserlib_bin::css3::walker::Walker;
use parserlib_bin::shared::errors::CssError;
use parserlib_bin::snippet;
use simple_logger::SimpleLogger;
use std::fs;
use std::time::Instant;

fn main() -> Result<()> {
    let matches = clap::Command::new("Parserlib CSS3 parser")
        .version("0.1.0")
        .arg(
            clap::Arg::new("file")
                .help("The stylesheet to parse")
                .required(true)
                .index(1),
        )
        .arg(
            clap::Arg::new("debug")
                .help("Enable debug logging")
                .short('d')
                .long("debug")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("tokens")
                .help("Just print the tokens")
                .long("tokens")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("json")
                .help("Print the events as JSON, one per line")
                .long("json")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("strict")
                .help("Stop at the first error")
                .long("strict")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("star-hack")
                .help("Accept *property declarations")
                .long("star-hack")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("underscore-hack")
                .help("Accept _property declarations")
                .long("underscore-hack")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("ie-filters")
                .help("Accept progid: filters")
                .long("ie-filters")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("repeat")
                .help("Parse the file this many times, reusing cached rules")
                .long("repeat")
                .value_parser(clap::value_parser!(usize))
                .default_value("1"),
        )
        .arg(
            clap::Arg::new("quiet")
                .help("Only print the diagnostics")
                .long("quiet")
                .short('q')
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    let debug = matches.get_flag("debug");
    let quiet = matches.get_flag("quiet");
    let repeat = matches.get_one::<usize>("repeat").copied().unwrap_or(1).max(1);
    let file = matches
        .get_one::<String>("file")
        .ok_or_else(|| anyhow!("no file given"))?;

    let level = if debug { log::LevelFilter::Debug } else { log::LevelFilter::Warn };
    SimpleLogger::new().with_level(level).init()?;

    let css = fs::read_to_string(file)?;

    if matches.get_flag("tokens") {
        for token in Tokenizer::new(&css).tokenize_all() {
            println!("{} {:?}", token.location, token);
        }
        return Ok(());
    }

    let options = ParserOptions {
        strict: matches.get_flag("strict"),
        star_hack: matches.get_flag("star-hack"),
        underscore_hack: matches.get_flag("underscore-hack"),
        ie_filters: matches.get_flag("ie-filters"),
        reuse_cache: repeat > 1,
        ..Default::default()
    };

    let mut session = ParseSession::default();
    session.open_document(file);

    let mut events: Vec<ParseEvent> = Vec::new();
    for round in 0..repeat {
        let start = Instant::now();
        events = match session.parse(&css, options) {
            Ok(events) => events,
            Err(err) => {
                print_diagnostic(&css, &err);
                return Err(anyhow!(err.message));
            }
        };
        if repeat > 1 {
            let stats = session.cache_stats();
            println!(
                "round {}: {:?}, {} events, {} cache hits so far",
                round + 1,
                start.elapsed(),
                events.len(),
                stats.hits
            );
        }
    }

    if !quiet {
        if matches.get_flag("json") {
            for event in &events {
                println!("{}", serde_json::to_string(event)?);
            }
        } else {
            Walker::new(&events).walk_stdout()?;
        }
    }

    let diagnostics = events.iter().filter_map(|e| e.diagnostic()).collect::<Vec<_>>();
    for err in &diagnostics {
        print_diagnostic(&css, err);
    }
    if !diagnostics.is_empty() {
        println!("{} problem(s) found", diagnostics.len());
    }

    Ok(())
}

fn print_diagnostic(css: &str, err: &CssError) {
    println!();
    match err.location {
        Some(loc) => print!("{}", snippet::render(css, loc, &err.message)),
        None => println!("{}", err.message),
    }
}
