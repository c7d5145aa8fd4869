use std::fs::read_to_string;
use std::process::exit;
use std::str::FromStr;

use argh::FromArgs;
use kube::ResourceExt;
use log::{debug, error, info};
use serde::Serialize;

use thanos_operator_lib::scheme::{documents, to_yaml, type_meta, Value};
use thanos_operator_lib::{thanos_crd, Result, Thanos, DEFAULT_QUERY, SCHEME};


#[derive(FromArgs)]
/// Thanos custom resource tooling
struct ThanosCrdArgs {
    #[argh(subcommand)]
    command: Command,
}

#[derive(FromArgs)]
#[argh(subcommand)]
enum Command {
    Crd(CrdArgs),
    Defaults(DefaultsArgs),
    Check(CheckArgs),
}

#[derive(FromArgs)]
/// print the Thanos CustomResourceDefinition
#[argh(subcommand, name = "crd")]
struct CrdArgs {
    /// output format, yaml or json (default yaml)
    #[argh(option, default = "default_format()")]
    format: Format,
}

#[derive(FromArgs)]
/// print the Query configuration used when none is given
#[argh(subcommand, name = "defaults")]
struct DefaultsArgs {
    /// output format, yaml or json (default yaml)
    #[argh(option, default = "default_format()")]
    format: Format,
}

#[derive(FromArgs)]
/// decode Thanos manifests and list the components they deploy
#[argh(subcommand, name = "check")]
struct CheckArgs {
    /// manifest files, YAML or JSON, may hold several documents
    #[argh(positional)]
    files: Vec<String>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Format {
    Yaml,
    Json,
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Format, String> {
        match s {
            "yaml" => Ok(Format::Yaml),
            "json" => Ok(Format::Json),
            other => Err(format!("unknown format {}, expected yaml or json", other)),
        }
    }
}

// format
fn default_format() -> Format {
    Format::Yaml
}


fn render<T: Serialize>(value: &T, format: Format) -> Result<String> {
    match format {
        Format::Yaml => to_yaml(value),
        Format::Json => Ok(serde_json::to_string_pretty(value)? + "\n"),
    }
}

// One report line per Thanos resource in the document
fn check_document(document: Value) -> Result<Vec<String>> {
    let gvk = type_meta(&document)?;
    debug!("Decoding kind {} of {}/{}", gvk.kind, gvk.group, gvk.version);
    let resources: Vec<Thanos> = if gvk.kind == "ThanosList" {
        SCHEME.decode_list::<Thanos>(document)?.items
    } else {
        vec![SCHEME.decode::<Thanos>(document)?]
    };
    let mut report = Vec::new();
    for thanos in resources {
        let components = thanos.spec.components();
        let components = if components.is_empty() {
            String::from("(none)")
        } else {
            components.join(", ")
        };
        report.push(format!(
            "{}/{}: {}",
            thanos.namespace().unwrap_or_else(|| String::from("default")),
            thanos.name_any(),
            components
        ));
    }
    Ok(report)
}

// Check every document of every file, returning the report lines and the number of failures.
// An unreadable or unparsable file counts as one failure.
fn check_files(files: &[String]) -> (Vec<String>, usize) {
    let mut report = Vec::new();
    let mut failed = 0;
    for file in files {
        let parsed = read_to_string(file)
            .map_err(Into::into)
            .and_then(|input| documents(&input));
        let docs = match parsed {
            Ok(docs) => docs,
            Err(e) => {
                error!("{}: {}", file, e);
                failed += 1;
                continue;
            }
        };
        for (index, document) in docs.into_iter().enumerate() {
            match check_document(document) {
                Ok(lines) => {
                    info!("{} document {}: {} resource(s)", file, index + 1, lines.len());
                    report.extend(lines);
                },
                Err(e) => {
                    error!("{} document {}: {}", file, index + 1, e);
                    failed += 1;
                }
            }
        }
    }
    (report, failed)
}


fn main() {
    env_logger::init();

    let args: ThanosCrdArgs = argh::from_env();

    let exit_code = match args.command {
        Command::Crd(crd) => print_rendered(render(&thanos_crd(), crd.format)),
        Command::Defaults(defaults) => print_rendered(render(&*DEFAULT_QUERY, defaults.format)),
        Command::Check(check) => {
            if check.files.is_empty() {
                error!("No manifest files given");
                2
            } else {
                let (report, failed) = check_files(&check.files);
                for line in report {
                    println!("{}", line);
                }
                if failed > 0 { 1 } else { 0 }
            }
        }
    };

    exit(exit_code);
}

fn print_rendered(rendered: Result<String>) -> i32 {
    match rendered {
        Ok(output) => {
            print!("{}", output);
            0
        },
        Err(e) => {
            error!("Failed to render output: {}", e);
            1
        }
    }
}
