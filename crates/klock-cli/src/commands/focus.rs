use chrono::Utc;
use clap::Subcommand;
use klock_core::notify::{dispatch, Notifier};
use klock_core::storage::Database;
use klock_core::focus::run_countdown;
use klock_core::{Config, Event, FocusSession, SessionState, Ticker, TICK_PERIOD};

use crate::console;

#[derive(Subcommand)]
pub enum FocusAction {
    /// Print the session state
    Status {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Start a fresh session from the full duration
    Start,
    /// Pause the running session
    Pause,
    /// Resume a paused session
    Resume,
    /// Return to setup with a full countdown
    Reset,
    /// Lengthen the session by 5 minutes (not while running)
    Up,
    /// Shorten the session by 5 minutes (not while running)
    Down,
    /// Set the skip-breaks preference
    SkipBreaks {
        #[arg(action = clap::ArgAction::Set)]
        value: bool,
    },
    /// Count down in the foreground until done; Ctrl-C pauses
    Run,
}

fn print_event(event: &Event) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(event)?);
    Ok(())
}

pub fn run(action: FocusAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let notifier = console::notifier(&config.notifications);
    let db = Database::open()?;
    let (mut session, caught_up) = FocusSession::load(&db, config.focus_duration())?;
    dispatch(notifier.as_ref(), caught_up.as_ref());

    let reports_state = matches!(
        action,
        FocusAction::Start
            | FocusAction::Pause
            | FocusAction::Resume
            | FocusAction::Reset
            | FocusAction::Up
            | FocusAction::Down
    );
    let event = match action {
        FocusAction::Status { json } => {
            if json {
                print_event(&session.snapshot())?;
            } else {
                print_status(&session, config.display.progress_width);
            }
            None
        }
        FocusAction::Start => session.start(),
        FocusAction::Pause => session.pause(),
        FocusAction::Resume => session.resume(),
        FocusAction::Reset => session.reset(),
        FocusAction::Up => session.increment_duration(),
        FocusAction::Down => session.decrement_duration(),
        FocusAction::SkipBreaks { value } => {
            session.set_skip_breaks(value);
            println!("{}", session.breaks_hint());
            None
        }
        FocusAction::Run => {
            run_foreground(&db, &mut session, notifier.as_ref(), config.display.progress_width)?;
            None
        }
    };

    if let Some(event) = &event {
        notifier.notify(event);
        print_event(event)?;
    } else if reports_state {
        tracing::debug!(state = ?session.state(), "command left the session unchanged");
        print_event(&session.snapshot())?;
    }

    session.save(&db)?;
    Ok(())
}

fn print_status(session: &FocusSession, width: u32) {
    let state = match session.state() {
        SessionState::Setup => "ready",
        SessionState::Running => "running",
        SessionState::Paused => "paused",
        SessionState::Completed => "completed",
    };
    println!("State:      {state}");
    println!("Duration:   {} mins", session.duration_min());
    println!("Remaining:  {}", console::remaining_label(session));
    println!(
        "Progress:   {} {:.0}%",
        console::progress_bar(session.progress_pct(), width),
        session.progress_pct()
    );
    println!("Breaks:     {}", session.breaks_hint());
}

fn run_foreground(
    db: &Database,
    session: &mut FocusSession,
    notifier: &dyn Notifier,
    width: u32,
) -> Result<(), Box<dyn std::error::Error>> {
    let started = match session.state() {
        SessionState::Paused => session.resume(),
        SessionState::Running => None,
        SessionState::Setup | SessionState::Completed => session.start(),
    };
    dispatch(notifier, started.as_ref());
    session.save(db)?;

    let rt = super::runtime()?;
    let finished = rt.block_on(async {
        let mut ticker = Ticker::start(TICK_PERIOD);
        console::render_countdown(session, width);
        let finished = tokio::select! {
            completed = run_countdown(&mut *session, &mut ticker, Utc::now, |s| {
                console::render_countdown(s, width)
            }) => Some(completed),
            _ = tokio::signal::ctrl_c() => None,
        };
        ticker.cancel();
        finished
    });
    println!();

    match finished {
        Some(completed) => dispatch(notifier, completed.as_ref()),
        None => {
            let event = session.catch_up(Utc::now()).or_else(|| session.pause());
            dispatch(notifier, event.as_ref());
        }
    }
    Ok(())
}
