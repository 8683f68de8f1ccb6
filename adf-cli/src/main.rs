// Command-line interface for the ADF tools
//
// This binary converts Atlassian Document Format (ADF) JSON, the rich-text
// representation used by Jira and Confluence, into Markdown.
//
// Usage:
//  adf convert <input> [-o <file>] [--ignore-errors] [--cache-as <name>]
//  adf convert cache:<name> [-o <file>]   - Convert a previously cached document
//  adf inspect <input>                    - Print the parsed document as JSON
//
// The input is a path to a JSON file, or `cache:<name>` to read a document
// stored earlier with --cache-as. Rendering defaults come from the embedded
// configuration and can be layered with a user adf.toml (see --config).

mod cache;

use adf_config::{AdfConfig, Loader};
use adf_doc::source::DocumentCache;
use adf_doc::{parse_with, RenderRules};
use cache::FileCache;
use clap::{Arg, ArgAction, Command, ValueHint};
use serde_json::Value;
use std::fs;

fn build_cli() -> Command {
    Command::new("adf")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert ADF documents to Markdown")
        .long_about(
            "adf is a command-line tool for working with Atlassian Document Format\n\
            (ADF) JSON, the rich-text representation used by Jira and Confluence.\n\n\
            Commands:\n  \
            - convert: Render a document as Markdown\n  \
            - inspect: Print the parsed document model as JSON\n\n\
            Inputs:\n  \
            A path to a JSON file, or cache:<name> for a document previously\n  \
            stored with --cache-as.\n\n\
            Examples:\n  \
            adf convert comment.json                  # Markdown to stdout\n  \
            adf convert comment.json -o comment.md    # Markdown to a file\n  \
            adf convert feed.json --ignore-errors     # Skip broken children\n  \
            adf convert page.json --cache-as page     # Convert and remember\n  \
            adf convert cache:page                    # Reuse the stored copy",
        )
        .arg_required_else_help(true)
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to an adf.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .about("Render an ADF document as Markdown")
                .long_about(
                    "Parse an ADF JSON document and write its Markdown rendering.\n\n\
                    Output goes to stdout by default, or use -o to specify a file.\n\
                    With --ignore-errors, children that fail with data errors\n\
                    (unknown node types, missing fields) are skipped instead of\n\
                    failing the whole document.",
                )
                .arg(
                    Arg::new("input")
                        .help("Input JSON file, or cache:<name>")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("ignore-errors")
                        .long("ignore-errors")
                        .help("Skip children that fail with data errors")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("cache-as")
                        .long("cache-as")
                        .value_name("NAME")
                        .help("Store the raw document in the cache under this name"),
                ),
        )
        .subcommand(
            Command::new("inspect")
                .about("Print the parsed document model as JSON")
                .long_about(
                    "Parse an ADF JSON document strictly and print the typed model's\n\
                    JSON form. Because parsing keeps only the declared fields, the\n\
                    output shows exactly what the converter sees.",
                )
                .arg(
                    Arg::new("input")
                        .help("Input JSON file, or cache:<name>")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                ),
        )
}

fn main() {
    let matches = build_cli().get_matches();

    let config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));
    let cache = FileCache::new(config.cache.dir.clone());

    match matches.subcommand() {
        Some(("convert", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            let cache_as = sub_matches.get_one::<String>("cache-as").map(|s| s.as_str());
            let mut rules: RenderRules = (&config.render.rules).into();
            if sub_matches.get_flag("ignore-errors") {
                rules.ignore_errors = true;
            }
            handle_convert_command(input, output, cache_as, &rules, &cache);
        }
        Some(("inspect", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            handle_inspect_command(input, &cache);
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

/// Resolve an input argument to a raw JSON document. `cache:<name>` reads
/// from the cache; everything else is a file path.
fn load_document(input: &str, cache: &FileCache) -> Value {
    if let Some(name) = input.strip_prefix("cache:") {
        match cache.load(name) {
            Ok(Some(doc)) => doc,
            Ok(None) => {
                eprintln!(
                    "Error: no cached document named '{name}' in {}",
                    cache.dir().display()
                );
                std::process::exit(1);
            }
            Err(e) => {
                eprintln!("Error reading cache entry '{name}': {e}");
                std::process::exit(1);
            }
        }
    } else {
        let source = fs::read_to_string(input).unwrap_or_else(|e| {
            eprintln!("Error reading file '{input}': {e}");
            std::process::exit(1);
        });
        serde_json::from_str(&source).unwrap_or_else(|e| {
            eprintln!("Error parsing JSON in '{input}': {e}");
            std::process::exit(1);
        })
    }
}

fn handle_convert_command(
    input: &str,
    output: Option<&str>,
    cache_as: Option<&str>,
    rules: &RenderRules,
    cache: &FileCache,
) {
    let raw = load_document(input, cache);

    if let Some(name) = cache_as {
        if let Err(e) = cache.store(name, &raw) {
            eprintln!("Error caching document as '{name}': {e}");
            std::process::exit(1);
        }
    }

    let doc = parse_with(&raw, rules.ignore_errors).unwrap_or_else(|e| {
        eprintln!("Parse error: {e}");
        std::process::exit(1);
    });

    let markdown = doc.to_markdown(rules).unwrap_or_else(|e| {
        eprintln!("Render error: {e}");
        std::process::exit(1);
    });

    match output {
        Some(path) => {
            fs::write(path, &markdown).unwrap_or_else(|e| {
                eprintln!("Error writing file '{path}': {e}");
                std::process::exit(1);
            });
        }
        None => {
            print!("{markdown}");
        }
    }
}

fn handle_inspect_command(input: &str, cache: &FileCache) {
    let raw = load_document(input, cache);

    let doc = adf_doc::parse(&raw).unwrap_or_else(|e| {
        eprintln!("Parse error: {e}");
        std::process::exit(1);
    });

    let pretty = serde_json::to_string_pretty(&doc.to_data()).unwrap_or_else(|e| {
        eprintln!("Serialization error: {e}");
        std::process::exit(1);
    });
    println!("{pretty}");
}

fn load_cli_config(explicit_path: Option<&str>) -> AdfConfig {
    let loader = Loader::new().with_optional_file("adf.toml");
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };

    loader.build().unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}
