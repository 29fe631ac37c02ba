//! Command-line interface for promptml
//! This binary parses PromptML files and renders the resulting document
//! into structured formats.
//!
//! Usage:
//!   promptml render `<path>` [--format `<json|yaml|xml>`]   - Parse a file and render the document
//!   promptml tokens `<path>` [--format `<simple|json>`]     - Dump the token stream
//!   promptml check `<path>`                              - Parse a file and report problems
//!   promptml list-formats                               - List all available processing formats

use clap::{Arg, Command};
use promptml::promptml::processor::{self, ProcessingSpec};

fn main() {
    let matches = Command::new("promptml")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for parsing and rendering PromptML files")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("render")
                .about("Parse a PromptML file and render the document")
                .arg(
                    Arg::new("path")
                        .help("Path to the PromptML file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .help("Output format: json, yaml, or xml")
                        .default_value("json"),
                ),
        )
        .subcommand(
            Command::new("tokens")
                .about("Dump the token stream of a PromptML file")
                .arg(
                    Arg::new("path")
                        .help("Path to the PromptML file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .help("Output format: simple or json")
                        .default_value("simple"),
                ),
        )
        .subcommand(
            Command::new("check")
                .about("Parse a PromptML file and report whether it is well-formed")
                .arg(
                    Arg::new("path")
                        .help("Path to the PromptML file")
                        .required(true)
                        .index(1),
                ),
        )
        .subcommand(Command::new("list-formats").about("List all available processing formats"))
        .get_matches();

    match matches.subcommand() {
        Some(("render", sub)) => {
            let path = sub.get_one::<String>("path").expect("path is required");
            let format = sub.get_one::<String>("format").expect("format has default");
            run_process(path, &format!("document-{}", format));
        }
        Some(("tokens", sub)) => {
            let path = sub.get_one::<String>("path").expect("path is required");
            let format = sub.get_one::<String>("format").expect("format has default");
            run_process(path, &format!("token-{}", format));
        }
        Some(("check", sub)) => {
            let path = sub.get_one::<String>("path").expect("path is required");
            match processor::parse_file(path) {
                Ok(_) => println!("{}: OK", path),
                Err(e) => {
                    eprintln!("{}: {}", path, e);
                    std::process::exit(1);
                }
            }
        }
        Some(("list-formats", _)) => {
            for format in processor::available_formats() {
                println!("{}", format);
            }
        }
        _ => unreachable!("subcommand is required"),
    }
}

fn run_process(path: &str, spec_str: &str) {
    let spec = match ProcessingSpec::from_string(spec_str) {
        Ok(spec) => spec,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    match processor::process_file(path, &spec) {
        Ok(output) => println!("{}", output),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
