//! Passcam CLI
//!
//! Usage:
//!   passcam --replay actions.jsonl        # Replay a recorded action log
//!   passcam --interactive                 # Read JSON actions from stdin
//!   passcam --serve                       # HTTP API server
//!   passcam --replay log.jsonl --json     # JSON output

use clap::Parser;
use colored::Colorize;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing_subscriber::EnvFilter;

use passcam::core::{run_server, CaptureConfig, CaptureStateMachine};
use passcam::types::{Action, CaptureOutput, GuidanceCode, ShutterReleased};
use passcam::{Result, VERSION};

#[derive(Parser, Debug)]
#[command(
    name = "passcam",
    version = VERSION,
    about = "Passcam - decide when a face is ready for a passport photo",
    long_about = "Passcam feeds per-frame face geometry and quality into a capture\n\
                  state machine and reports what the subject should do next.\n\n\
                  Input is one JSON action per line, e.g.\n  \
                  {\"action\":\"geometry_observed\",\"bounding_box\":{\"x\":0,\"y\":0,\"width\":300,\"height\":360},\"roll\":1.4,\"pitch\":0.0,\"yaw\":0.0}\n  \
                  {\"action\":\"quality_observed\",\"score\":0.8}\n  \
                  {\"action\":\"request_capture\"}\n\n\
                  Modes:\n  \
                  --replay FILE  Replay an action log\n  \
                  --interactive  Read actions from stdin\n  \
                  --serve        HTTP API server mode"
)]
struct Args {
    /// Replay a JSON-lines action log
    #[arg(short, long)]
    replay: Option<String>,

    /// Interactive mode - read actions from stdin
    #[arg(short, long)]
    interactive: bool,

    /// Run as HTTP API server
    #[arg(short, long)]
    serve: bool,

    /// Server address (default: 127.0.0.1:3000)
    #[arg(long, default_value = "127.0.0.1:3000")]
    addr: String,

    /// JSON config file overriding thresholds and guide size
    #[arg(short, long)]
    config: Option<String>,

    /// Start with the debug overlay enabled
    #[arg(long)]
    debug: bool,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,

    /// Show per-dimension debug lines
    #[arg(long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("passcam=info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    if args.no_color {
        colored::control::set_override(false);
    }

    if let Err(e) = run(&args).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(args: &Args) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => CaptureConfig::from_file(path)?,
        None => CaptureConfig::default(),
    };
    if args.debug {
        config.debug_mode = true;
    }

    if args.serve {
        print_header("API Server");
        return run_server(&args.addr, config).await;
    }

    let (tx, rx) = mpsc::unbounded_channel();
    let machine = CaptureStateMachine::with_config(config).with_shutter(tx);

    if let Some(path) = &args.replay {
        let reader = BufReader::new(File::open(path)?);
        run_lines(reader, machine, rx, args, false)
    } else {
        print_header("Interactive");
        println!("Enter one JSON action per line. Type 'quit' to exit.");
        println!("Goal: {}", GuidanceCode::Ready.message());
        println!();
        let stdin = io::stdin();
        run_lines(stdin.lock(), machine, rx, args, true)
    }
}

/// Dispatch every action line and print the outputs
fn run_lines(
    reader: impl BufRead,
    mut machine: CaptureStateMachine,
    mut shutter_rx: UnboundedReceiver<ShutterReleased>,
    args: &Args,
    prompt: bool,
) -> Result<()> {
    let mut stdout = io::stdout();
    let mut lines = reader.lines();

    loop {
        if prompt {
            print!("{}", format_prompt(&machine));
            stdout.flush()?;
        }

        let line = match lines.next() {
            Some(line) => line?,
            None => break,
        };
        let line = line.trim();
        if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit") {
            break;
        }
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let action: Action = match serde_json::from_str(line) {
            Ok(action) => action,
            Err(e) => {
                println!("{}", format!("⚠ Skipping malformed action: {}", e).yellow());
                continue;
            }
        };

        let output = machine.dispatch(action);
        print_output(&output, &machine, args)?;

        while let Ok(signal) = shutter_rx.try_recv() {
            if !args.json {
                println!(
                    "{}",
                    format!("  📷 SHUTTER RELEASED (dispatch {}) at {}", signal.dispatch, signal.at)
                        .green()
                        .bold()
                );
            }
        }
    }

    if !args.json {
        println!();
        println!(
            "Session ended. Dispatches: {} | ready {:.1}s of {:.1}s ({:.0}%)",
            machine.dispatch_count(),
            machine.readiness().ready_ms() as f64 / 1000.0,
            machine.readiness().total_ms() as f64 / 1000.0,
            machine.readiness().percentage(),
        );
    }
    Ok(())
}

fn print_output(output: &CaptureOutput, machine: &CaptureStateMachine, args: &Args) -> Result<()> {
    if args.json {
        println!("{}", serde_json::to_string(output)?);
        return Ok(());
    }

    if args.no_color {
        println!("{}", output.to_parseable_string());
    } else {
        println!("{}", output.to_terminal_string());
    }

    if args.verbose || output.debug_mode {
        print_debug_lines(machine);
    }
    Ok(())
}

/// Print the debug overlay lines
fn print_debug_lines(machine: &CaptureStateMachine) {
    let frame = machine.guide_frame();
    println!(
        "{}",
        format!(
            "  guide: x={:.0} y={:.0} w={:.0} h={:.0}",
            frame.x, frame.y, frame.width, frame.height
        )
        .bright_black()
    );
    for line in machine.debug_lines() {
        println!("  {}", line.label.color(line.status.color()));
    }
}

/// Format interactive prompt
fn format_prompt(machine: &CaptureStateMachine) -> String {
    let guidance = machine.guidance();
    format!("{} [{}] > ", guidance.emoji(), guidance.code())
        .color(guidance.color())
        .to_string()
}

/// Print header
fn print_header(mode: &str) {
    println!("{}", "========================================".bold());
    println!("{}", format!("  Passcam v{} - {}", VERSION, mode).bold());
    println!("{}", "========================================".bold());
    println!();
}
