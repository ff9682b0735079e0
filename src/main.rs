use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use arboard::Clipboard;
use clap::{ArgAction, Args, Parser, Subcommand, ValueHint};
use is_terminal::IsTerminal;
use serde_json::json;

mod batch;
mod commands;
mod engine;
mod logging;
mod panel;

use commands::{TransformOutput, TransformRequest, input_line_count, run_transform};
use panel::{JsonStateStore, PanelState, StateStore, Viewport};

fn main() -> Result<()> {
    let cli = Cli::parse();
    run(cli)
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Slashes(cmd) => handle_transform(TransformRequest::Slashes, &cmd.input)?,
        Command::Quote(cmd) => handle_transform(TransformRequest::Quote, &cmd.input)?,
        Command::Suffix(cmd) => {
            let request = TransformRequest::Suffix {
                suffix: cmd.to.clone(),
            };
            handle_transform(request, &cmd.input)?;
        }
        Command::Tail(cmd) => {
            let request = TransformRequest::Tail {
                tails: resolve_tails(&cmd)?,
            };
            handle_transform(request, &cmd.input)?;
        }
        Command::Group(cmd) => {
            let request = TransformRequest::Group {
                tails: resolve_tails(&cmd)?,
            };
            handle_transform(request, &cmd.input)?;
        }
        Command::Inout(cmd) => handle_transform(TransformRequest::InOut, &cmd.input)?,
        Command::Batch(cmd) => handle_batch(cmd)?,
        Command::Log(cmd) => handle_log(cmd)?,
        Command::Panel(cmd) => handle_panel(cmd)?,
    }

    Ok(())
}

fn handle_transform(request: TransformRequest, input: &InputArgs) -> Result<()> {
    let raw = resolve_input(input)?;
    let output = run_transform(&request, &raw);
    emit_output(&request, &output, input)?;

    if !input.no_history {
        let recorded =
            logging::record_invocation(request.mode(), input_line_count(&raw), output.line_count());
        if let Err(err) = recorded {
            eprintln!("warning: failed to record history: {err}");
        }
    }

    Ok(())
}

fn emit_output(
    request: &TransformRequest,
    output: &TransformOutput,
    input: &InputArgs,
) -> Result<()> {
    if input.json {
        let value = match output {
            TransformOutput::Text(text) => json!({ "mode": request.mode(), "result": text }),
            TransformOutput::Lines(lines) => json!({ "mode": request.mode(), "result": lines }),
            TransformOutput::InOut(versions) => json!({
                "mode": request.mode(),
                "in": versions.in_version,
                "out": versions.out_version,
            }),
        };
        println!("{value}");
    } else if !output.is_empty() {
        println!("{}", output.render());
    }

    if input.copy {
        if output.is_empty() {
            eprintln!("nothing to copy");
        } else {
            copy_to_clipboard(&output.render())?;
        }
    }

    Ok(())
}

fn resolve_input(input: &InputArgs) -> Result<String> {
    if !input.text.is_empty() {
        return Ok(input.text.join("\n"));
    }
    if let Some(path) = &input.input_file {
        return fs::read_to_string(path)
            .with_context(|| format!("reading path text from {}", path.display()));
    }
    if input.clipboard {
        let mut clipboard = Clipboard::new().context("opening clipboard")?;
        return clipboard.get_text().context("reading clipboard text");
    }
    if input.stdin || !io::stdin().is_terminal() {
        return read_text_from_stdin();
    }
    bail!("path text required; pass TEXT operands or use --input-file, --stdin, or --clipboard");
}

fn read_text_from_stdin() -> Result<String> {
    if io::stdin().is_terminal() {
        println!("reading path text from stdin; finish with EOF (Ctrl-D).");
    }
    let mut buf = String::new();
    io::stdin()
        .read_to_string(&mut buf)
        .context("reading path text from stdin")?;
    Ok(buf)
}

fn resolve_tails(cmd: &TailCommand) -> Result<String> {
    if !cmd.tails.is_empty() {
        return Ok(cmd.tails.join("\n"));
    }
    if let Some(path) = &cmd.tails_file {
        return fs::read_to_string(path)
            .with_context(|| format!("reading tails from {}", path.display()));
    }
    if cmd.tails_stdin {
        return read_text_from_stdin();
    }
    Ok(String::new())
}

fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = Clipboard::new().context("opening clipboard")?;
    clipboard
        .set_text(text.to_string())
        .context("writing result to clipboard")?;
    println!("copied to clipboard.");
    Ok(())
}

fn handle_batch(cmd: BatchCommand) -> Result<()> {
    let plan = batch::load_plan(&cmd.plan)?;
    for (index, step) in plan.steps.iter().enumerate() {
        let request = step.to_request();
        let raw = step.common().resolve_input()?;
        let output = run_transform(&request, &raw);
        println!("--- step {}: {} ---", index + 1, request.mode());
        if output.is_empty() {
            println!("(no output)");
        } else {
            println!("{}", output.render());
        }
        let recorded =
            logging::record_invocation(request.mode(), input_line_count(&raw), output.line_count());
        if let Err(err) = recorded {
            eprintln!("warning: failed to record history: {err}");
        }
    }
    Ok(())
}

fn handle_log(cmd: LogCommand) -> Result<()> {
    let lines = logging::read_tail(cmd.tail)?;
    if lines.is_empty() {
        println!("no history recorded yet.");
        return Ok(());
    }
    for line in lines {
        println!("{line}");
    }
    Ok(())
}

fn handle_panel(cmd: PanelCommand) -> Result<()> {
    let store = JsonStateStore::new(&logging::state_dir());
    let mut state = store.load()?.unwrap_or_default();

    match cmd.action {
        PanelAction::Show => {
            print_panel_state(&state);
            println!("state file: {}", store.path().display());
            return Ok(());
        }
        PanelAction::Move(args) => {
            state.move_to(args.x, args.y, args.viewport());
        }
        PanelAction::Collapse => state.collapsed = true,
        PanelAction::Expand => state.collapsed = false,
        PanelAction::Toggle => {
            state.toggle_collapsed();
        }
        PanelAction::Reset => state = PanelState::default(),
    }

    store.save(&state)?;
    print_panel_state(&state);
    Ok(())
}

fn print_panel_state(state: &PanelState) {
    println!(
        "panel at ({}, {}), {}",
        state.x,
        state.y,
        if state.collapsed {
            "collapsed"
        } else {
            "expanded"
        }
    );
}

#[derive(Debug, Parser)]
#[command(name = "pathkit", version, about = "Path text conversion companion")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    Slashes(SlashesCommand),
    Quote(QuoteCommand),
    Suffix(SuffixCommand),
    Tail(TailCommand),
    Group(TailCommand),
    Inout(InoutCommand),
    Batch(BatchCommand),
    Log(LogCommand),
    Panel(PanelCommand),
}

#[derive(Debug, Args)]
struct InputArgs {
    #[arg(value_name = "TEXT")]
    text: Vec<String>,
    #[arg(
        long = "input-file",
        value_name = "FILE",
        value_hint = ValueHint::FilePath,
        conflicts_with_all = ["text", "stdin", "clipboard"]
    )]
    input_file: Option<PathBuf>,
    #[arg(long, action = ArgAction::SetTrue, conflicts_with_all = ["text", "input_file", "clipboard"])]
    stdin: bool,
    #[arg(long, action = ArgAction::SetTrue, conflicts_with_all = ["text", "input_file", "stdin"])]
    clipboard: bool,
    #[arg(long, action = ArgAction::SetTrue)]
    copy: bool,
    #[arg(long, action = ArgAction::SetTrue)]
    json: bool,
    #[arg(long = "no-history", action = ArgAction::SetTrue)]
    no_history: bool,
}

#[derive(Debug, Args)]
struct SlashesCommand {
    #[command(flatten)]
    input: InputArgs,
}

#[derive(Debug, Args)]
struct QuoteCommand {
    #[command(flatten)]
    input: InputArgs,
}

#[derive(Debug, Args)]
struct SuffixCommand {
    #[command(flatten)]
    input: InputArgs,
    #[arg(long = "to", value_name = "EXT")]
    to: String,
}

#[derive(Debug, Args)]
struct TailCommand {
    #[command(flatten)]
    input: InputArgs,
    #[arg(long = "tail", value_name = "TAIL", action = ArgAction::Append)]
    tails: Vec<String>,
    #[arg(
        long = "tails-file",
        value_name = "FILE",
        value_hint = ValueHint::FilePath,
        conflicts_with = "tails"
    )]
    tails_file: Option<PathBuf>,
    #[arg(
        long = "tails-stdin",
        action = ArgAction::SetTrue,
        conflicts_with_all = ["tails", "tails_file", "stdin"]
    )]
    tails_stdin: bool,
}

#[derive(Debug, Args)]
struct InoutCommand {
    #[command(flatten)]
    input: InputArgs,
}

#[derive(Debug, Args)]
struct BatchCommand {
    #[arg(value_name = "PLAN", value_hint = ValueHint::FilePath)]
    plan: PathBuf,
}

#[derive(Debug, Args)]
struct LogCommand {
    #[arg(long = "tail", default_value_t = 20)]
    tail: usize,
}

#[derive(Debug, Args)]
struct PanelCommand {
    #[command(subcommand)]
    action: PanelAction,
}

#[derive(Debug, Subcommand)]
enum PanelAction {
    Show,
    Move(MoveArgs),
    Collapse,
    Expand,
    Toggle,
    Reset,
}

#[derive(Debug, Args)]
struct MoveArgs {
    #[arg(long, value_name = "PX", allow_negative_numbers = true)]
    x: i32,
    #[arg(long, value_name = "PX", allow_negative_numbers = true)]
    y: i32,
    #[arg(long = "viewport-width", value_name = "PX", default_value_t = 1920)]
    viewport_width: i32,
    #[arg(long = "viewport-height", value_name = "PX", default_value_t = 1080)]
    viewport_height: i32,
    #[arg(long = "panel-width", value_name = "PX", default_value_t = 320)]
    panel_width: i32,
    #[arg(long = "panel-height", value_name = "PX", default_value_t = 400)]
    panel_height: i32,
}

impl MoveArgs {
    fn viewport(&self) -> Viewport {
        Viewport {
            width: self.viewport_width,
            height: self.viewport_height,
            panel_width: self.panel_width,
            panel_height: self.panel_height,
        }
    }
}
