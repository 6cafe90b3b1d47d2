use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;

use songdex::export;
use songdex::format;
use songdex::loader;

#[derive(Parser)]
#[command(name = "songdex", about = "Browser and CSV exporter for line-delimited song datasets")]
struct Cli {
    /// Dataset file (newline-delimited JSON), or "-" for STDIN
    path: String,

    /// Output as JSON instead of table
    #[arg(long)]
    json: bool,

    /// Write the CSV export (spotify-data-export.csv) instead of printing
    #[arg(long)]
    csv: bool,

    /// Directory the CSV export is written into (default: current directory)
    #[arg(long, value_name = "DIR")]
    out: Option<PathBuf>,

    /// Launch interactive TUI
    #[arg(long)]
    tui: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.tui && (cli.json || cli.csv) {
        anyhow::bail!("--tui cannot be combined with --json or --csv");
    }
    if cli.tui && cli.path == "-" {
        anyhow::bail!("--tui cannot read the dataset from STDIN");
    }

    let songs = if cli.path == "-" {
        loader::load_stdin()?
    } else {
        loader::load_file(Path::new(&cli.path))?
    };

    if cli.tui {
        return songdex::tui::run(songs, Path::new(&cli.path));
    }

    if cli.csv {
        let out_dir = cli.out.unwrap_or_else(|| PathBuf::from("."));
        let path = export::write_export(&out_dir, &songs)?;
        eprintln!("Exported {} songs to {}", songs.len(), path.display());
    }

    if cli.json {
        println!("{}", format::format_json(&songs));
    } else if !cli.csv {
        println!("{}", format::format_table(&songs));
    }

    Ok(())
}
