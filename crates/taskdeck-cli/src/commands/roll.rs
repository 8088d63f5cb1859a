use std::io::{BufRead, Write};
use std::sync::mpsc;

use clap::{Args, ValueEnum};
use tracing::debug;
use taskdeck_core::dice::dice_for;
use taskdeck_core::{
    mock, selection_weights, BoardTask, Breakdown, Candidate, CommitMode, Config, CoreError,
    DiceRoller, DieSource, Event, GatePhase, Notice, SeededDice, SelectionError, TaskStatus,
};

use super::{print_json, runtime, CmdResult};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RollSource {
    /// Open steps of a generated breakdown
    Breakdown,
    /// Pending tasks on the board
    Board,
}

#[derive(Args)]
pub struct RollArgs {
    /// Where the candidates come from
    #[arg(long, value_enum, default_value_t = RollSource::Breakdown)]
    source: RollSource,
    /// Task to break down when rolling over breakdown steps
    #[arg(long, default_value = "Plan my day")]
    task: String,
    /// Commit mode (auto or manual); overrides config
    #[arg(long)]
    mode: Option<CommitMode>,
    /// Fixed dice seed; overrides config
    #[arg(long)]
    seed: Option<u64>,
    /// Roll animation delay in milliseconds
    #[arg(long)]
    roll_delay_ms: Option<u64>,
    /// Countdown tick interval in milliseconds
    #[arg(long = "tick-ms")]
    tick_ms: Option<u64>,
}

enum Answer {
    Accept,
    Reroll,
    Quit,
}

fn emit(event: &Event) -> CmdResult {
    println!("{}", serde_json::to_string(event)?);
    Ok(())
}

/// Ask for a decision on stderr; EOF counts as quit.
fn prompt() -> Result<Answer, Box<dyn std::error::Error>> {
    let stdin = std::io::stdin();
    let mut line = String::new();
    loop {
        eprint!("accept (a), reroll (r) or quit (q)? ");
        std::io::stderr().flush()?;
        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            return Ok(Answer::Quit);
        }
        match line.trim() {
            "a" | "accept" => return Ok(Answer::Accept),
            "r" | "reroll" => return Ok(Answer::Reroll),
            "q" | "quit" => return Ok(Answer::Quit),
            other => eprintln!("unrecognised answer: {other}"),
        }
    }
}

fn drive<T: Candidate, D: DieSource>(roller: DiceRoller<T, D>) -> CmdResult {
    runtime()?.block_on(drive_async(roller))
}

async fn drive_async<T: Candidate, D: DieSource>(mut roller: DiceRoller<T, D>) -> CmdResult {
    match roller.roll() {
        Ok(started) => emit(&started)?,
        Err(CoreError::Selection(err)) => {
            emit(&Event::notice(Notice::from(&err)))?;
            return Err(err.into());
        }
        Err(e) => return Err(e.into()),
    }

    loop {
        while let Some(event) = roller.next_event().await? {
            emit(&event)?;
        }
        if roller.phase() != GatePhase::AwaitingConfirmation {
            break;
        }
        match prompt()? {
            Answer::Accept => {
                emit(&roller.accept()?)?;
                break;
            }
            Answer::Reroll => emit(&roller.reroll()?)?,
            Answer::Quit => {
                if let Some(cancelled) = roller.teardown() {
                    emit(&cancelled)?;
                }
                break;
            }
        }
    }
    Ok(())
}

pub fn run(args: RollArgs) -> CmdResult {
    let config = Config::load_or_default();
    let mut policy = config.gate_policy();
    if let Some(mode) = args.mode {
        policy.mode = mode;
    }
    if let Some(ms) = args.roll_delay_ms {
        policy.roll_delay_ms = ms;
    }
    if let Some(ms) = args.tick_ms {
        policy.tick_interval_ms = ms;
    }
    let seed = args.seed.or(config.roller.seed);
    debug!(?policy, ?seed, source = ?args.source, "roller configured");
    let dice = SeededDice::new(seed);

    match args.source {
        RollSource::Breakdown => {
            let plan = Breakdown::plan(&args.task)?;
            drive(DiceRoller::new(plan.open_steps(), policy, dice))
        }
        RollSource::Board => {
            let mut board = mock::board();
            let (tx, rx) = mpsc::channel();
            let roller = DiceRoller::new(board.pending(), policy, dice).on_commit(move |task: &BoardTask| {
                let _ = tx.send(task.id.clone());
            });
            drive(roller)?;

            // The chosen task goes into focus.
            if let Ok(id) = rx.try_recv() {
                board.set_status(&id, TaskStatus::InProgress)?;
                if let Some(task) = board.get(&id) {
                    println!("{}", serde_json::to_string(task)?);
                }
            }
            Ok(())
        }
    }
}

pub fn odds(count: usize) -> CmdResult {
    if count == 0 {
        return Err(SelectionError::EmptyList.into());
    }
    print_json(&serde_json::json!({
        "count": count,
        "dice": dice_for(count),
        "weights": selection_weights(count),
    }))
}
