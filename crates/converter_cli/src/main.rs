use std::path::PathBuf;
use std::process;

use clap::Parser;
use converter_core::core_api::{Engine, ProgressSink, parse_steam_id};

#[derive(Debug, Parser)]
#[command(version, about = "Convert Elden Ring saves (.sl2 or .co2) to a different Steam ID")]
struct Cli {
    /// Path to the save file (.sl2 or .co2)
    #[arg(value_name = "SAVE_FILE")]
    save_file: PathBuf,
    /// Your Steam ID (17-digit number)
    #[arg(value_name = "NEW_STEAM_ID", required_unless_present = "validate")]
    new_steam_id: Option<String>,
    /// Output file path (optional, defaults to overwriting source)
    #[arg(value_name = "OUTPUT_FILE")]
    output_file: Option<PathBuf>,
    /// Only validate checksums, don't convert
    #[arg(long)]
    validate: bool,
    /// Emit the result as JSON instead of text
    #[arg(long)]
    json: bool,
}

fn main() {
    let cli = Cli::parse();
    let engine = Engine::new();

    if cli.validate {
        let report = engine.validate_file(&cli.save_file).unwrap_or_else(|e| {
            eprintln!("Error: {e}");
            process::exit(1);
        });

        if cli.json {
            let rendered = serde_json::to_string_pretty(&report).unwrap_or_else(|e| {
                eprintln!("Error rendering JSON output: {e}");
                process::exit(1);
            });
            println!("{rendered}");
            return;
        }

        println!("Save type: {}", report.format);
        println!("Checksum validation:");
        for check in &report.slots {
            let status = if check.valid { "ok" } else { "MISMATCH" };
            println!("  Slot {}: {}", check.slot, status);
        }
        return;
    }

    let raw_id = cli.new_steam_id.as_deref().expect("required unless --validate");
    let new_steam_id = parse_steam_id(raw_id).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        process::exit(1);
    });

    // Progress lines go to stdout in text mode; JSON output stays clean.
    let print_sink = |message: &str| println!("{message}");
    let sink: Option<&dyn ProgressSink> = if cli.json { None } else { Some(&print_sink) };

    let report = engine
        .convert_file(
            &cli.save_file,
            new_steam_id,
            cli.output_file.as_deref(),
            sink,
        )
        .unwrap_or_else(|e| {
            eprintln!("Error: {e}");
            process::exit(1);
        });

    if cli.json {
        let rendered = serde_json::to_string_pretty(&report).unwrap_or_else(|e| {
            eprintln!("Error rendering JSON output: {e}");
            process::exit(1);
        });
        println!("{rendered}");
        return;
    }

    println!();
    println!("Conversion successful!");
    println!("  Save type: {}", report.format);
    println!(
        "  Steam ID: {} -> {}",
        report.old_steam_id, report.new_steam_id
    );
    println!("  Locations modified: {}", report.patched_offsets.len());
    if let Some(path) = &report.output_path {
        println!("  Output: {}", path.display());
    }
}
