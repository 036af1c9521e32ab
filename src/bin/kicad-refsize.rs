//! kicad-refsize: set every footprint's reference label to one size and stroke width.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use kicad_refsize::{AdjustOptions, BoardTarget, KiCadClientBlocking, KiCadError, LabelStyle};

/// Resize the reference designator labels of all footprints on a KiCad board.
///
/// Talks to a running KiCad through its IPC API. Changes are applied to the
/// open board in the PCB editor; save the board from KiCad to keep them.
#[derive(Parser, Debug)]
#[command(name = "kicad-refsize")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Board file to operate on; defaults to the board currently open in KiCad
    #[arg(value_name = "BOARD")]
    board: Option<PathBuf>,

    /// KiCad IPC socket path or URI (defaults to $KICAD_API_SOCKET or KiCad's default)
    #[arg(long, value_name = "URI")]
    socket: Option<String>,

    /// KiCad API token (defaults to $KICAD_API_TOKEN)
    #[arg(long)]
    token: Option<String>,

    /// Per-request timeout in milliseconds
    #[arg(long, value_name = "N", default_value_t = 3_000)]
    timeout_ms: u64,

    /// Label glyph width and height in millimetres
    #[arg(long, value_name = "MM", default_value_t = LabelStyle::DEFAULT_SIZE_MM)]
    size_mm: f64,

    /// Label stroke thickness in millimetres
    #[arg(long, value_name = "MM", default_value_t = LabelStyle::DEFAULT_THICKNESS_MM)]
    thickness_mm: f64,

    /// Print the footprints that would change without touching the board
    #[arg(long)]
    dry_run: bool,

    /// Increase logging verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,
}

fn log_level(verbose: u8, quiet: bool) -> Level {
    if quiet {
        return Level::ERROR;
    }

    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

fn init_tracing(level: Level) {
    let filter = EnvFilter::from_default_env().add_directive(level.into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(log_level(args.verbose, args.quiet));

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            if matches!(
                err,
                KiCadError::BoardNotOpen | KiCadError::SocketUnavailable { .. }
            ) {
                eprintln!(
                    "hint: launch KiCad, open a project, and open its board in the PCB editor before rerunning."
                );
            }
            if matches!(err, KiCadError::AmbiguousBoardSelection { .. }) {
                eprintln!("hint: pass the board file path to pick one of the open boards.");
            }
            if let KiCadError::ApiStatus { code, message } = &err {
                if code == "AS_UNHANDLED" {
                    eprintln!(
                        "hint: this KiCad build reported the command as unavailable (`{message}`); KiCad 9 or newer with the IPC API enabled is required."
                    );
                }
            }
            ExitCode::from(1)
        }
    }
}

fn run(args: Args) -> Result<(), KiCadError> {
    let style = LabelStyle::from_mm(args.size_mm, args.size_mm, args.thickness_mm)?;
    let target = BoardTarget::from_path(args.board);
    target.validate()?;

    let mut builder =
        KiCadClientBlocking::builder().timeout(Duration::from_millis(args.timeout_ms));
    if let Some(socket) = args.socket {
        builder = builder.socket_path(socket);
    }
    if let Some(token) = args.token {
        builder = builder.token(token);
    }

    let client = builder.connect()?;
    client.ping()?;
    let version = client.get_version()?;
    tracing::info!(kicad = %version.full_version, "connected to KiCad");

    let board = client.open_board(&target)?;
    tracing::info!(board = %board, %style, "resolved board");

    let options = AdjustOptions {
        style,
        dry_run: args.dry_run,
    };
    let report = client.adjust_reference_labels(&board, options, &mut std::io::stdout().lock())?;

    if report.footprints == 0 {
        tracing::info!(board = %report.board, "board has no footprints");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use tracing::Level;

    use super::log_level;

    #[test]
    fn default_verbosity_hides_info_events() {
        let level = log_level(0, false);
        assert_eq!(level, Level::WARN);
        assert!(Level::INFO > level);
    }

    #[test]
    fn quiet_wins_over_verbose() {
        assert_eq!(log_level(3, true), Level::ERROR);
        assert_eq!(log_level(2, false), Level::DEBUG);
    }
}
