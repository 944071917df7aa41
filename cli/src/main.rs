//! ssml2xlsx CLI - SpreadsheetML to XLSX conversion
//!
//! A command-line tool that converts Excel 2003 XML workbooks into `.xlsx`.

use clap::{Parser, ValueEnum};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use ssml2xlsx::{Conversion, ConvertOptions, DuplicateHeaderPolicy, DuplicateSheetPolicy};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Convert an Excel XML (SpreadsheetML) file to an XLSX file
#[derive(Parser)]
#[command(
    name = "ssml2xlsx",
    author = "iyulab",
    version,
    about = "Convert an Excel XML file to an XLSX file",
    long_about = "ssml2xlsx - convert legacy SpreadsheetML (Excel 2003 XML) workbooks to XLSX.\n\n\
                  Every worksheet with a header row and at least one data row becomes a sheet."
)]
struct Cli {
    /// Path to the input Excel XML file
    xml_file: PathBuf,

    /// Path for the output XLSX file
    xlsx_file: PathBuf,

    /// How to handle worksheets that share a name
    #[arg(long, default_value = "last-wins")]
    duplicate_sheets: SheetMode,

    /// How to handle repeated header names
    #[arg(long, default_value = "keep")]
    duplicate_headers: HeaderMode,

    /// Write header rows without bold, border and centring
    #[arg(long)]
    plain_headers: bool,

    /// Print a JSON conversion report instead of the status line
    #[arg(long)]
    json: bool,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long)]
    verbose: bool,
}

/// Duplicate worksheet name handling
#[derive(Clone, ValueEnum)]
enum SheetMode {
    /// Later worksheets replace earlier ones
    LastWins,
    /// Fail the conversion
    Error,
}

impl From<SheetMode> for DuplicateSheetPolicy {
    fn from(mode: SheetMode) -> Self {
        match mode {
            SheetMode::LastWins => DuplicateSheetPolicy::LastWins,
            SheetMode::Error => DuplicateSheetPolicy::Error,
        }
    }
}

/// Duplicate header handling
#[derive(Clone, ValueEnum)]
enum HeaderMode {
    /// Keep repeated header names as they are
    Keep,
    /// Fail the conversion
    Error,
}

impl From<HeaderMode> for DuplicateHeaderPolicy {
    fn from(mode: HeaderMode) -> Self {
        match mode {
            HeaderMode::Keep => DuplicateHeaderPolicy::Keep,
            HeaderMode::Error => DuplicateHeaderPolicy::Error,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if execute(&cli) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Check the input, then convert. Returns `true` on success.
fn execute(cli: &Cli) -> bool {
    if let Some(message) = missing_input_message(&cli.xml_file) {
        println!("{}: {}", "Error".red().bold(), message);
        return false;
    }
    run(cli)
}

/// Message for an input path that is not a readable file.
fn missing_input_message(path: &Path) -> Option<String> {
    if path.is_file() {
        None
    } else {
        Some(format!("Input file {} does not exist", path.display()))
    }
}

/// Run one conversion and report the outcome. Returns `true` on success.
fn run(cli: &Cli) -> bool {
    let options = ConvertOptions::new()
        .with_duplicate_sheets(cli.duplicate_sheets.clone().into())
        .with_duplicate_headers(cli.duplicate_headers.clone().into())
        .with_bold_headers(!cli.plain_headers);

    let pb = create_spinner(&format!("Converting {}...", cli.xml_file.display()));
    let result = ssml2xlsx::convert_file(&cli.xml_file, &cli.xlsx_file, &options);
    pb.finish_and_clear();

    match result {
        Ok(Conversion::Written(report)) => {
            if cli.json {
                match report.to_json(true) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        report_failure(&e);
                        return false;
                    }
                }
            } else {
                print_success(&report.input, &report.output);
                for sheet in &report.sheets {
                    println!(
                        "  {} {} ({} columns, {} rows)",
                        "-".dimmed(),
                        sheet.name.as_str().bold(),
                        sheet.columns,
                        sheet.rows
                    );
                }
            }
            true
        }
        Ok(Conversion::NoData) => {
            println!(
                "{} No data found in {}",
                "!".yellow().bold(),
                cli.xml_file.display()
            );
            false
        }
        Err(e) => {
            report_failure(&e);
            false
        }
    }
}

fn print_success(input: &Path, output: &Path) {
    println!(
        "{} Successfully converted {} to {}",
        "✓".green().bold(),
        input.display(),
        output.display()
    );
}

fn report_failure(err: &ssml2xlsx::Error) {
    tracing::debug!(error = ?err, "conversion failed");
    println!("{}: {}", "Error converting XML to Excel".red().bold(), err);
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "ssml2xlsx=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
        .template("{spinner:.blue} {msg}")
    {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["ssml2xlsx", "in.xml", "out.xlsx"]).unwrap();
        assert_eq!(cli.xml_file, PathBuf::from("in.xml"));
        assert!(matches!(cli.duplicate_sheets, SheetMode::LastWins));
        assert!(matches!(cli.duplicate_headers, HeaderMode::Keep));
        assert!(!cli.plain_headers);
    }

    #[test]
    fn test_cli_requires_both_paths() {
        assert!(Cli::try_parse_from(["ssml2xlsx", "in.xml"]).is_err());
    }

    #[test]
    fn test_missing_input_message() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.xml");
        assert_eq!(
            missing_input_message(&missing),
            Some(format!("Input file {} does not exist", missing.display()))
        );

        // A directory is not a usable input either.
        assert!(missing_input_message(dir.path()).is_some());

        let present = dir.path().join("book.xml");
        std::fs::write(&present, "<Workbook/>").unwrap();
        assert_eq!(missing_input_message(&present), None);
    }

    #[test]
    fn test_execute_missing_input_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.xlsx");
        let cli = Cli::try_parse_from([
            "ssml2xlsx".into(),
            dir.path().join("missing.xml").into_os_string(),
            output.clone().into_os_string(),
        ])
        .unwrap();

        assert!(!execute(&cli));
        assert!(!output.exists());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_execute_converts_existing_input() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("book.xml");
        let output = dir.path().join("book.xlsx");
        std::fs::write(
            &input,
            r#"<Workbook xmlns="urn:schemas-microsoft-com:office:spreadsheet"
 xmlns:ss="urn:schemas-microsoft-com:office:spreadsheet">
 <Worksheet ss:Name="Data"><Table>
  <Row><Cell><Data ss:Type="String">Name</Data></Cell></Row>
  <Row><Cell><Data ss:Type="String">Alice</Data></Cell></Row>
 </Table></Worksheet>
</Workbook>"#,
        )
        .unwrap();

        let cli = Cli::try_parse_from([
            "ssml2xlsx".into(),
            input.into_os_string(),
            output.clone().into_os_string(),
        ])
        .unwrap();

        assert!(execute(&cli));
        assert!(output.is_file());
    }
}
