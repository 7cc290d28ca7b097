//! Command-line interface for fstree.
//!
//! Reads JSON arrays of file system records, marshals them into a forest, and prints
//! either the forest or the shallowest duplicate found.

use clap::{Parser, ValueEnum};
use fstree::{
    FsData, FsTreeError, MarshalBuilder, MarshalOptions, OrphanPolicy, check_duplicate_ids_batch,
    load_records, marshal_fs_tree_with, output, parse_records,
};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::exit;

/// fstree: marshal flat file system records into a tree
#[derive(Parser)]
#[command(name = "fstree", version, about, long_about = None)]
struct Cli {
    /// JSON record files (reads stdin when empty or `-`)
    inputs: Vec<PathBuf>,

    /// Operation mode
    #[arg(long, value_enum, default_value_t = Mode::Marshal)]
    mode: Mode,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// What to do with records whose parent never appears
    #[arg(long, default_value = "promote", value_parser = parse_orphan_policy)]
    orphans: OrphanPolicy,

    /// Pretty output (indented JSON)
    #[arg(short, long)]
    pretty: bool,

    /// Write output to this file (a directory when several inputs are given)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Mode {
    Marshal,
    Duplicates,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Tree,
    Text,
}

impl From<OutputFormat> for output::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Json => output::OutputFormat::Json,
            OutputFormat::Tree => output::OutputFormat::Tree,
            OutputFormat::Text => output::OutputFormat::Text,
        }
    }
}

/// Parse string into OrphanPolicy enum.
fn parse_orphan_policy(s: &str) -> Result<OrphanPolicy, String> {
    match s {
        "promote" => Ok(OrphanPolicy::Promote),
        "drop" => Ok(OrphanPolicy::Drop),
        _ => Err(format!("invalid orphan policy: {}", s)),
    }
}

fn read_input(path: &Path) -> Result<Vec<FsData>, FsTreeError> {
    if path.as_os_str() == "-" {
        let mut json = String::new();
        io::stdin()
            .read_to_string(&mut json)
            .map_err(|e| FsTreeError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;
        parse_records(&json)
    } else {
        load_records(path)
    }
}

fn fail(e: FsTreeError) -> ! {
    eprintln!("Error: {}", e);
    exit(1);
}

fn main() {
    let mut cli = Cli::parse();
    if cli.inputs.is_empty() {
        cli.inputs.push(PathBuf::from("-"));
    }
    let options = MarshalBuilder::new().orphans(cli.orphans).build();
    let inputs: Vec<Vec<FsData>> = cli
        .inputs
        .iter()
        .map(|path| read_input(path).unwrap_or_else(|e| fail(e)))
        .collect();

    match cli.mode {
        Mode::Marshal => run_marshal(&cli, &inputs, &options),
        Mode::Duplicates => run_duplicates(&cli, &inputs, &options),
    }
}

/// Output path for one input: `out` itself, or a file inside `out` when several inputs.
fn target_path(out: &Path, input: &Path, many: bool, format: output::OutputFormat) -> PathBuf {
    if many {
        let stem = input.file_stem().unwrap_or(input.as_os_str());
        out.join(stem).with_extension(format.extension())
    } else {
        out.to_path_buf()
    }
}

fn run_marshal(cli: &Cli, inputs: &[Vec<FsData>], options: &MarshalOptions) {
    let format: output::OutputFormat = cli.format.into();
    for (path, records) in cli.inputs.iter().zip(inputs) {
        let result = marshal_fs_tree_with(records, options).unwrap_or_else(|e| fail(e));
        match &cli.output {
            Some(out) => {
                let target = target_path(out, path, inputs.len() > 1, format);
                output::write_result_to_file(&result, format, &target, cli.pretty)
                    .unwrap_or_else(|e| fail(e));
            }
            None => {
                let text = output::format_result(&result, format, cli.pretty)
                    .unwrap_or_else(|e| fail(e));
                println!("{}", text);
            }
        }
    }
}

fn run_duplicates(cli: &Cli, inputs: &[Vec<FsData>], options: &MarshalOptions) {
    let format: output::OutputFormat = cli.format.into();
    let reports = check_duplicate_ids_batch(inputs, options);
    for (path, report) in cli.inputs.iter().zip(reports) {
        let report = report.unwrap_or_else(|e| fail(e));
        match &cli.output {
            Some(out) => {
                let target = target_path(out, path, inputs.len() > 1, format);
                output::write_report_to_file(&report, format, &target, cli.pretty)
                    .unwrap_or_else(|e| fail(e));
            }
            None => {
                let text = output::format_report(&report, format, cli.pretty)
                    .unwrap_or_else(|e| fail(e));
                if inputs.len() > 1 {
                    println!("{}: {}", path.display(), text);
                } else {
                    println!("{}", text);
                }
            }
        }
    }
}
