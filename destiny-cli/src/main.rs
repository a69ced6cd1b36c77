mod config;
mod render;

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use config::{init_logging, CliConfig};
use destiny_core::{narrate, score_session, write_csv, ExportOptions, Leaderboard, SessionDump};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Score, rank and export finished life simulation sessions.
#[derive(Debug, Parser)]
#[command(name = "destiny", version)]
struct Cli {
    /// Event catalog JSON to use instead of the built-in events.
    #[arg(long, global = true, env = "DESTINY_CATALOG")]
    catalog: Option<PathBuf>,

    /// More logging (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Emit logs as JSON lines.
    #[arg(long, global = true, env = "DESTINY_LOG_JSON")]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Rank every participant of a session by Final Destiny.
    Leaderboard {
        session: PathBuf,
        #[arg(long)]
        json: bool,
    },
    /// Write the ranked session as CSV.
    Export {
        session: PathBuf,
        /// Output file; stdout when omitted.
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Skip the UTF-8 byte order mark.
        #[arg(long)]
        no_bom: bool,
        #[arg(long, default_value_t = ',')]
        delimiter: char,
    },
    /// Show one participant's report, rank and life summary.
    Player {
        session: PathBuf,
        player_id: String,
        #[arg(long)]
        json: bool,
    },
    /// List the active event catalog.
    Catalog {
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = CliConfig::new(cli.catalog, cli.verbose, cli.log_json)?;
    init_logging(&config);

    let catalog = config.load_catalog()?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Leaderboard { session, json } => {
            let board = score_session(&load_session(&session)?, &catalog);
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&board)?)?;
            } else {
                write!(out, "{}", render::leaderboard_table(&board))?;
            }
        }
        Command::Export {
            session,
            out: path,
            no_bom,
            delimiter,
        } => {
            let board = score_session(&load_session(&session)?, &catalog);
            let options = ExportOptions {
                byte_order_mark: !no_bom,
                delimiter: delimiter_byte(delimiter)?,
            };
            match path {
                Some(path) => {
                    let file = File::create(&path)
                        .with_context(|| format!("creating {}", path.display()))?;
                    write_csv(&board, BufWriter::new(file), &options)?;
                    tracing::info!(path = %path.display(), rows = board.len(), "exported csv");
                }
                None => write_csv(&board, &mut out, &options)?,
            }
        }
        Command::Player {
            session,
            player_id,
            json,
        } => {
            let board = score_session(&load_session(&session)?, &catalog);
            show_player(&mut out, &board, &player_id, json)?;
        }
        Command::Catalog { json } => {
            if json {
                writeln!(out, "{}", catalog.to_json()?)?;
            } else {
                write!(out, "{}", render::catalog_table(&catalog))?;
            }
        }
    }

    Ok(())
}

fn load_session(path: &Path) -> Result<SessionDump> {
    let dump = SessionDump::load(path)
        .with_context(|| format!("loading session {}", path.display()))?;
    tracing::info!(
        path = %path.display(),
        participants = dump.participants.len(),
        allocations = dump.allocations.len(),
        events = dump.events.len(),
        "loaded session"
    );
    Ok(dump)
}

fn show_player(out: &mut impl Write, board: &Leaderboard, player_id: &str, json: bool) -> Result<()> {
    let Some(entry) = board.get(player_id) else {
        bail!("player {} has no records in this session", player_id);
    };

    if json {
        let payload = serde_json::json!({
            "rank": entry.rank,
            "total_players": board.len(),
            "participant": entry.participant,
            "report": entry.report,
            "narrative": narrate(&entry.participant.display_name, &entry.report),
        });
        writeln!(out, "{}", serde_json::to_string_pretty(&payload)?)?;
    } else {
        write!(out, "{}", render::player_details(entry, board.len()))?;
        writeln!(out)?;
        writeln!(out, "{}", narrate(&entry.participant.display_name, &entry.report))?;
    }
    Ok(())
}

fn delimiter_byte(delimiter: char) -> Result<u8> {
    if !delimiter.is_ascii() {
        bail!("delimiter must be a single ASCII character, got {:?}", delimiter);
    }
    Ok(delimiter as u8)
}
