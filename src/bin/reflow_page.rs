//! Reflow positioned text fragments into structured text
//!
//! Reads a JSON file holding one page (an array of fragments) or several
//! pages (an array of arrays) and prints the structured text of each page.
//! Pages are separated by a form feed.
//!
//! Usage:
//!   cargo run --release --bin reflow_page -- page.json
//!   cargo run --release --bin reflow_page -- pages.json --config reflow.json --output out.txt
//!   cargo run --release --bin reflow_page -- page.json --segments

use pdf_reflow::pipeline::{ReflowConfig, StructuredText, StructuredTextAssembler};
use pdf_reflow::{Fragment, Result};
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

/// Page separator in the plain-text output.
const PAGE_SEPARATOR: &str = "\x0c";

/// One page or a list of pages.
#[derive(Deserialize)]
#[serde(untagged)]
enum PageInput {
    Pages(Vec<Vec<Fragment>>),
    Page(Vec<Fragment>),
}

impl PageInput {
    fn into_pages(self) -> Vec<Vec<Fragment>> {
        match self {
            PageInput::Pages(pages) => pages,
            PageInput::Page(page) => vec![page],
        }
    }
}

struct CliConfig {
    input: PathBuf,
    config: Option<PathBuf>,
    output: Option<PathBuf>,
    segments: bool,
}

impl CliConfig {
    fn from_args() -> std::result::Result<Self, String> {
        let args: Vec<String> = std::env::args().collect();
        let mut input = None;
        let mut config = None;
        let mut output = None;
        let mut segments = false;

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--config" | "-c" => {
                    i += 1;
                    let path = args.get(i).ok_or("--config requires a path")?;
                    config = Some(PathBuf::from(path));
                },
                "--output" | "-o" => {
                    i += 1;
                    let path = args.get(i).ok_or("--output requires a path")?;
                    output = Some(PathBuf::from(path));
                },
                "--segments" => {
                    segments = true;
                },
                "--help" | "-h" => {
                    return Err(usage());
                },
                arg if arg.starts_with('-') => {
                    return Err(format!("Unknown option: {}\n{}", arg, usage()));
                },
                arg => {
                    if input.is_some() {
                        return Err(format!("Unexpected argument: {}\n{}", arg, usage()));
                    }
                    input = Some(PathBuf::from(arg));
                },
            }
            i += 1;
        }

        Ok(Self {
            input: input.ok_or_else(usage)?,
            config,
            output,
            segments,
        })
    }
}

fn usage() -> String {
    "Usage: reflow_page <input.json> [--config <config.json>] [--segments] [--output <file>]"
        .to_string()
}

fn run(cli: &CliConfig) -> Result<()> {
    let config = match &cli.config {
        Some(path) => ReflowConfig::from_json_file(path)?,
        None => ReflowConfig::default(),
    };
    let assembler = StructuredTextAssembler::with_config(config)?;

    let input: PageInput = serde_json::from_str(&fs::read_to_string(&cli.input)?)?;
    let pages = input.into_pages();
    log::info!("Reflowing {} page(s) from {}", pages.len(), cli.input.display());

    let structured: Vec<StructuredText> = pages
        .iter()
        .map(|fragments| assembler.extract_segments(fragments))
        .collect();

    let rendered = if cli.segments {
        serde_json::to_string_pretty(&structured)?
    } else {
        structured
            .iter()
            .map(StructuredText::render)
            .collect::<Vec<_>>()
            .join(PAGE_SEPARATOR)
    };

    match &cli.output {
        Some(path) => {
            fs::write(path, rendered)?;
            log::info!("Wrote {}", path.display());
        },
        None => println!("{}", rendered),
    }

    Ok(())
}

fn main() {
    env_logger::init();

    let cli = match CliConfig::from_args() {
        Ok(cli) => cli,
        Err(msg) => {
            eprintln!("{}", msg);
            std::process::exit(1);
        },
    };

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
