use std::io::{self, Write};
use std::time::Duration;

use anyhow::{bail, Context};
use chrono::Local;
use clap::Parser;
use relief_core::{update, AppState, Msg, StreamPhase};
use relief_logging::relief_info;

use super::cli::Cli;
use super::effects::EffectRunner;
use super::render::{render, summary, RenderCursor};
use super::{config, logging};

/// Throttles rendering while the stream is quiet.
const TICK_INTERVAL: Duration = Duration::from_millis(75);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOutcome {
    pub phase: StreamPhase,
}

impl RunOutcome {
    pub fn succeeded(&self) -> bool {
        self.phase != StreamPhase::Failed
    }
}

pub fn run_app() -> anyhow::Result<RunOutcome> {
    let cli = Cli::parse();
    let mut config = config::load(cli.config.as_deref()).context("loading configuration")?;
    cli.apply_overrides(&mut config);
    logging::initialize(
        config.log_destination,
        config.level_filter(),
        &config.log_file,
    );
    relief_info!("relief-scrape starting, endpoint {}", config.endpoint);

    let runner = EffectRunner::new(config.stream_settings());
    let mut state = dispatch(AppState::new(), Msg::ScrapeSubmitted(cli.request()), &runner);
    if state.session_id().is_none() {
        bail!("the search query must not be empty");
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut cursor = RenderCursor::default();

    while state.awaiting_transport() {
        let msg = runner.next_msg(TICK_INTERVAL).unwrap_or(Msg::Tick);
        state = dispatch(state, msg, &runner);
        if state.consume_dirty() {
            print_lines(&mut out, render(&state.view(), &mut cursor))?;
        }
    }

    let view = state.view();
    print_lines(&mut out, render(&view, &mut cursor))?;
    print_lines(&mut out, summary(&view))?;
    relief_info!("relief-scrape finished in {:?}", view.phase);

    Ok(RunOutcome { phase: view.phase })
}

fn dispatch(state: AppState, msg: Msg, runner: &EffectRunner) -> AppState {
    let (state, effects) = update(state, msg);
    runner.enqueue(effects);
    state
}

fn print_lines(out: &mut impl Write, lines: Vec<String>) -> io::Result<()> {
    if lines.is_empty() {
        return Ok(());
    }
    let stamp = Local::now().format("%H:%M:%S");
    for line in lines {
        writeln!(out, "[{stamp}] {line}")?;
    }
    out.flush()
}
