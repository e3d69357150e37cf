// Copyright 2024 OctoFHIR Team
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Command-line classifier for JSON values
//!
//! Reads a JSON document and reports how each type predicate classifies it.

use clap::{Args, Parser, Subcommand};
use octofhir_typeguard::{Classification, JsValue, Predicate, Realm, classify};
use serde_json::Value as JsonValue;
use std::fs;
use std::io::{self, Read};
use std::process;

#[cfg(feature = "terminal")]
use colored::Colorize;

const EXIT_FALSE: i32 = 1;
const EXIT_ERROR: i32 = 2;

#[derive(Parser)]
#[command(name = "octofhir-typeguard")]
#[command(about = "Classify JSON values with runtime type predicates")]
#[command(version)]
#[command(author = "OctoFHIR Team <funyloony@gmail.com>")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report typeof, the toString tag and every predicate result
    Classify {
        #[command(flatten)]
        input: InputArgs,
        /// Pretty-print JSON output
        #[arg(short, long)]
        pretty: bool,
    },
    /// Run one predicate; exits 0 when it holds and 1 when it does not
    Check {
        /// Predicate name, e.g. isPlainObject or is_plain_object
        predicate: String,
        #[command(flatten)]
        input: InputArgs,
    },
    /// List every predicate
    List,
}

#[derive(Args)]
struct InputArgs {
    /// JSON file to read (reads from stdin if not provided)
    #[arg(short, long)]
    file: Option<String>,
    /// JSON pointer selecting the value to classify; a miss means undefined
    #[arg(long)]
    pointer: Option<String>,
    /// Load the document into a realm before classifying
    #[arg(long)]
    realm: bool,
}

fn main() {
    human_panic::setup_panic!();

    let cli = Cli::parse();

    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::new().filter_level(level).init();

    match cli.command {
        Commands::Classify { input, pretty } => handle_classify(&input, pretty),
        Commands::Check { predicate, input } => handle_check(&predicate, &input),
        Commands::List => handle_list(),
    }
}

fn handle_classify(input: &InputArgs, pretty: bool) {
    let classification = classify_input(input);
    let output = if pretty {
        serde_json::to_string_pretty(&classification)
    } else {
        serde_json::to_string(&classification)
    };
    match output {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Error serializing classification: {e}");
            process::exit(EXIT_ERROR);
        }
    }
}

fn handle_check(name: &str, input: &InputArgs) {
    let predicate: Predicate = match name.parse() {
        Ok(predicate) => predicate,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Run `octofhir-typeguard list` to see the available predicates");
            process::exit(EXIT_ERROR);
        }
    };

    let holds = classify_input(input).get(predicate);
    print_verdict(holds);
    let code = exit_code(holds);
    if code != 0 {
        process::exit(code);
    }
}

fn exit_code(holds: bool) -> i32 {
    if holds { 0 } else { EXIT_FALSE }
}

fn handle_list() {
    for predicate in Predicate::ALL {
        println!("{:<14} {}", predicate.name(), predicate.documentation());
    }
}

#[cfg(feature = "terminal")]
fn print_verdict(holds: bool) {
    if holds {
        println!("{}", "true".green());
    } else {
        println!("{}", "false".red());
    }
}

#[cfg(not(feature = "terminal"))]
fn print_verdict(holds: bool) {
    println!("{holds}");
}

fn classify_input(input: &InputArgs) -> Classification {
    let data = read_input(input.file.as_deref());
    match classify_document(&data, input.pointer.as_deref(), input.realm) {
        Ok(classification) => classification,
        Err(e) => {
            eprintln!("Error parsing JSON: {e}");
            process::exit(EXIT_ERROR);
        }
    }
}

/// Parse `data`, select by `pointer` and classify the result
///
/// A pointer that selects nothing classifies `undefined`. With `use_realm`
/// the value is imported into a fresh realm first.
fn classify_document(
    data: &str,
    pointer: Option<&str>,
    use_realm: bool,
) -> Result<Classification, serde_json::Error> {
    let document: JsonValue = serde_json::from_str(data)?;
    let selected = match pointer {
        Some(pointer) => {
            let found = document.pointer(pointer);
            if found.is_none() {
                log::debug!("pointer '{pointer}' selected nothing, classifying undefined");
            }
            found
        }
        None => Some(&document),
    };

    if use_realm {
        let mut realm = Realm::new();
        let value = selected.map_or(JsValue::Undefined, |json| realm.import_json(json));
        log::debug!("classifying {value:?} in realm {}", realm.id());
        Ok(classify(&realm.bind(&value)))
    } else {
        Ok(classify(&selected))
    }
}

fn read_input(file: Option<&str>) -> String {
    if let Some(filename) = file {
        match fs::read_to_string(filename) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("Error reading file '{filename}': {e}");
                process::exit(EXIT_ERROR);
            }
        }
    } else {
        let mut buffer = String::new();
        if let Err(e) = io::stdin().read_to_string(&mut buffer) {
            eprintln!("Error reading from stdin: {e}");
            process::exit(EXIT_ERROR);
        }
        buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use octofhir_typeguard::TypeTag;

    const DOCUMENT: &str = r#"{"name": "x", "tags": ["a"], "nested": {"ok": true}}"#;

    #[test]
    fn test_pointer_miss_classifies_undefined() {
        for use_realm in [false, true] {
            let classification = classify_document(DOCUMENT, Some("/missing"), use_realm).unwrap();
            assert_eq!(classification.type_tag, TypeTag::Undefined);
            assert_eq!(classification.to_string_tag, "[object Undefined]");
            assert!(!classification.get(Predicate::IsUndefined));
            assert!(!classification.get(Predicate::IsArray));
        }
    }

    #[test]
    fn test_realm_path_agrees_with_json_path() {
        for pointer in [None, Some("/name"), Some("/tags"), Some("/nested"), Some("/nested/ok")] {
            let json = classify_document(DOCUMENT, pointer, false).unwrap();
            let realm = classify_document(DOCUMENT, pointer, true).unwrap();
            assert_eq!(json, realm, "pointer {pointer:?}");
        }
        let tags = classify_document(DOCUMENT, Some("/tags"), true).unwrap();
        assert!(tags.get(Predicate::IsArray));
        assert!(!tags.get(Predicate::IsPlainObject));
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(classify_document("{not json", None, false).is_err());
        assert!(classify_document("", None, true).is_err());
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(exit_code(true), 0);
        assert_eq!(exit_code(false), EXIT_FALSE);
        assert_ne!(EXIT_FALSE, EXIT_ERROR);
    }
}
