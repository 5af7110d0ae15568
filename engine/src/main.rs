//! Workshop Import CLI - turn registration workbooks into workshop rosters
//!
//! # Main Commands
//!
//! ```bash
//! workshop-import import registrations.xlsx            # Workshops as JSON
//! workshop-import import registrations.xlsx -s event.json -o workshops.json
//! ```
//!
//! # Setup Commands
//!
//! ```bash
//! workshop-import inspect registrations.xlsx           # Sheet/header dump for a new layout
//! workshop-import schema -s event.json                 # Validate a schema document
//! workshop-import example-schema                       # Print the bundled schema
//! ```
//!
//! The schema defaults to `$WORKSHOP_SCHEMA` (a `.env` file is honoured) and
//! falls back to the bundled one.

use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use workshop_import::{
    default_schema, dump_json, import_workbook_file, load_schema_file, resources, ConsoleSink,
    ImportOptions, Schema,
};

#[derive(Parser)]
#[command(name = "workshop-import")]
#[command(about = "Import workshop registration spreadsheets", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import a workbook and output workshops as JSON
    Import {
        /// Input xlsx workbook
        input: PathBuf,

        /// Schema document (default: bundled schema)
        #[arg(short, long, env = "WORKSHOP_SCHEMA")]
        schema: Option<PathBuf>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Fail when a period sheet is missing instead of skipping it
        #[arg(long)]
        strict: bool,

        /// Don't warn about workshop cells without a leader
        #[arg(long)]
        quiet_format: bool,
    },

    /// Dump sheet names, dimensions, headers and a sample row
    Inspect {
        /// Input xlsx workbook
        input: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate a schema document and summarize it
    Schema {
        /// Schema document (default: bundled schema)
        #[arg(short, long, env = "WORKSHOP_SCHEMA")]
        schema: Option<PathBuf>,
    },

    /// Print the bundled schema document
    ExampleSchema,
}

fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Import {
            input,
            schema,
            output,
            strict,
            quiet_format,
        } => cmd_import(&input, schema.as_deref(), output.as_deref(), strict, quiet_format),

        Commands::Inspect { input, output } => cmd_inspect(&input, output.as_deref()),

        Commands::Schema { schema } => cmd_schema(schema.as_deref()),

        Commands::ExampleSchema => cmd_example_schema(),
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn load_schema_arg(path: Option<&Path>) -> Result<Schema, Box<dyn std::error::Error>> {
    let schema = match path {
        Some(p) => load_schema_file(p, &ConsoleSink)?,
        None => default_schema(&ConsoleSink)?,
    };
    Ok(schema)
}

fn cmd_import(
    input: &Path,
    schema_path: Option<&Path>,
    output: Option<&Path>,
    strict: bool,
    quiet_format: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📄 Importing: {}", input.display());

    let schema = load_schema_arg(schema_path)?;
    let options = ImportOptions {
        skip_missing_periods: !strict,
        warn_on_malformed_cells: !quiet_format,
    };

    let outcome = import_workbook_file(input, &schema, &options, &ConsoleSink)?;

    eprintln!("\n📊 Periods:");
    for period in &outcome.periods {
        if period.present {
            eprintln!(
                "   {} ({}): {} workshops, {} selections",
                period.display_name, period.sheet_name, period.workshop_count, period.selection_count
            );
        } else {
            eprintln!("   {} ({}): sheet missing", period.display_name, period.sheet_name);
        }
    }
    eprintln!("   Attendees on roster: {}", outcome.attendee_count);

    let json = serde_json::to_string_pretty(&outcome.workshops)?;
    write_output(&json, output)?;

    eprintln!("\n✨ Done!");
    Ok(())
}

fn cmd_inspect(input: &Path, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("🔍 Inspecting: {}", input.display());

    let bytes = fs::read(input)?;
    let json = dump_json(&bytes)?;
    write_output(&json, output)?;

    Ok(())
}

fn cmd_schema(schema_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let schema = load_schema_arg(schema_path)?;

    println!("📋 {} ({} days)\n", schema.event_name, schema.total_days);
    println!(
        "Roster: {} ({} columns)",
        schema.roster_sheet.sheet_name,
        schema.roster_sheet.columns.len()
    );
    for period in &schema.period_sheets {
        println!("\nPeriod: {} ({})", period.period().display_name, period.sheet_name);
        for column in &period.workshop_columns {
            println!("   {} → {}", column.column_name, column.duration().description());
        }
    }

    Ok(())
}

fn cmd_example_schema() -> Result<(), Box<dyn std::error::Error>> {
    let bytes = resources::resource(workshop_import::schema::DEFAULT_SCHEMA_RESOURCE)?;
    println!("{}", String::from_utf8_lossy(bytes));
    Ok(())
}

fn write_output(content: &str, path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
            eprintln!("💾 Output written to: {}", p.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
