//! Offline export - renders a saved table to any export format without calling the model
//!
//! Usage:
//!   localizer-export --input table.json --format csv
//!   localizer-export --input table.json --format ios --language Spanish
//!   localizer-export --input table.json --format android-all --language Spanish --language German --output res.zip
//!
//! The input file is either an export request body (`{"tableData": [...], "languages": [...]}`)
//! or a bare array of rows. For a bare array without `--language`, every language that
//! appears in the rows is exported.
//!
//! Formats: csv, excel, json, xml, ios, android, ios-all, android-all

use anyhow::{bail, Context, Result};
use localizer::export::{ExportFormat, ExportInput};
use localizer::model::TranslationRow;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug)]
struct CliArgs {
    input: PathBuf,
    format: ExportFormat,
    languages: Vec<String>,
    output: Option<PathBuf>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum InputFile {
    Rows(Vec<TranslationRow>),
    Request(ExportInput),
}

fn usage() -> String {
    let formats: Vec<&str> = ExportFormat::ALL.iter().map(ExportFormat::id).collect();
    format!(
        "usage: localizer-export --input <file> --format <{}> [--language <name>]... [--output <path>]",
        formats.join("|")
    )
}

fn parse_args(args: &[String]) -> Result<CliArgs> {
    let mut input = None;
    let mut format = None;
    let mut languages = Vec::new();
    let mut output = None;

    let mut iter = args.iter();
    while let Some(flag) = iter.next() {
        let mut value = || {
            iter.next()
                .cloned()
                .with_context(|| format!("{} requires a value\n{}", flag, usage()))
        };
        match flag.as_str() {
            "--input" | "-i" => input = Some(PathBuf::from(value()?)),
            "--format" | "-f" => {
                let id = value()?;
                format = Some(
                    ExportFormat::from_id(&id)
                        .with_context(|| format!("Unknown export format: {}\n{}", id, usage()))?,
                );
            }
            "--language" | "-l" => languages.push(value()?),
            "--output" | "-o" => output = Some(PathBuf::from(value()?)),
            other => bail!("Unexpected argument: {}\n{}", other, usage()),
        }
    }

    Ok(CliArgs {
        input: input.with_context(usage)?,
        format: format.with_context(usage)?,
        languages,
        output,
    })
}

/// Languages in the order they first appear across rows.
fn languages_in(rows: &[TranslationRow]) -> Vec<String> {
    let mut seen = Vec::new();
    for language in rows.iter().flat_map(|row| row.translations.keys()) {
        if !seen.contains(language) {
            seen.push(language.clone());
        }
    }
    seen
}

fn load_input(args: &CliArgs) -> Result<ExportInput> {
    let raw = fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    let parsed: InputFile = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a table or export request", args.input.display()))?;

    let mut input = match parsed {
        InputFile::Request(request) => request,
        InputFile::Rows(rows) => ExportInput {
            languages: languages_in(&rows),
            table_data: rows,
            language: None,
        },
    };

    if !args.languages.is_empty() {
        if args.format.is_single_language() {
            input.language = args.languages.first().cloned();
        } else {
            input.languages = args.languages.clone();
        }
    }

    Ok(input)
}

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("localizer=info".parse()?),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let args = parse_args(&args)?;
    let input = load_input(&args)?;

    let artifact = input.render(args.format)?;
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(&artifact.filename));

    fs::write(&output, &artifact.bytes)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    info!(
        "Wrote {} rows as {} to {} ({} bytes)",
        input.table_data.len(),
        args.format,
        output.display(),
        artifact.bytes.len()
    );

    Ok(())
}
