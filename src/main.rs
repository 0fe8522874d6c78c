use veer::cli::{AppConfig, Args};
use veer::config::UserConfig;
use veer::domain::{load_candidates, sample_candidates, Directive, Displacement, SwipeEngine};
use veer::tui::{
    handle_key_event, render, render_help_overlay, render_summary, render_welcome_overlay,
    KeyAction, ViewState,
};

use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{fs::File, io, path::Path, sync::Mutex, time::Duration};
use tracing_subscriber::EnvFilter;

/// How long the loop waits for input before checking removal timers
const POLL_INTERVAL: Duration = Duration::from_millis(50);

fn main() -> io::Result<()> {
    // Parse command line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Load user configuration
    let mut user_config = UserConfig::load().unwrap_or_else(|e| {
        eprintln!("Warning: Failed to load user config: {}", e);
        UserConfig::default()
    });

    // Command line flags win over stored settings
    let config = AppConfig::from_args(args, &user_config.swipe);
    if let Err(e) = config.swipe.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    if let Some(ref path) = config.log_file {
        if let Err(e) = init_logging(path) {
            eprintln!("Warning: Failed to open log file {}: {}", path.display(), e);
        }
    }

    run_app_with_config(&config, &mut user_config)
}

/// Sends tracing output to `path`; stdout belongs to the TUI
fn init_logging(path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let filter = EnvFilter::try_from_env("VEER_LOG").unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

/// Runs the TUI application with configuration
pub fn run_app_with_config(config: &AppConfig, user_config: &mut UserConfig) -> io::Result<()> {
    let candidates = match config.candidates {
        Some(ref path) => match load_candidates(path) {
            Ok(candidates) => candidates,
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
        None => sample_candidates(),
    };

    tracing::info!(
        count = candidates.len(),
        threshold = config.swipe.decision_threshold,
        "starting session"
    );
    let mut engine = SwipeEngine::with_config(candidates, &config.swipe);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    let result = run_loop(&mut terminal, &mut engine, config, user_config);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    let stats = engine.statistics();
    if stats.decided() > 0 {
        println!(
            "Liked {} · Passed {} · {} left",
            stats.accepted,
            stats.rejected,
            stats.remaining()
        );
    }

    result
}

/// Main application loop
fn run_loop<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    engine: &mut SwipeEngine,
    config: &AppConfig,
    user_config: &mut UserConfig,
) -> io::Result<()> {
    // Show welcome on first launch or if --welcome flag is set
    let should_show_welcome = config.show_welcome || !user_config.welcome_shown;
    let mut view_state = if should_show_welcome {
        ViewState::Welcome
    } else {
        ViewState::Browsing
    };

    loop {
        // Removals whose grace period ended since the last frame
        engine.tick();

        terminal.draw(|frame| {
            render(frame, engine);

            // Render overlays
            match view_state {
                ViewState::Help => render_help_overlay(frame),
                ViewState::Summary => {
                    let stats = engine.statistics();
                    render_summary(frame, &stats, &engine.matches());
                }
                ViewState::Welcome => {
                    render_welcome_overlay(frame, engine.classifier().threshold())
                }
                ViewState::Browsing => {}
            }
        })?;

        if !event::poll(POLL_INTERVAL)? {
            continue;
        }

        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        // Handle overlay-specific input
        match view_state {
            ViewState::Help => {
                let action = handle_key_event(key);
                if matches!(action, KeyAction::Help | KeyAction::Quit | KeyAction::None) {
                    view_state = ViewState::Browsing;
                }
                continue;
            }
            ViewState::Summary => {
                // Any key exits from summary
                break;
            }
            ViewState::Welcome => {
                // Any key dismisses welcome and starts browsing
                view_state = ViewState::Browsing;

                // Mark welcome as shown and persist
                user_config.welcome_shown = true;
                if let Err(e) = user_config.save() {
                    tracing::warn!(error = %e, "failed to save user config");
                }
                continue;
            }
            ViewState::Browsing => {}
        }

        match handle_key_event(key) {
            KeyAction::Quit => {
                // Show summary before quitting if any decisions were made
                if engine.statistics().decided() > 0 {
                    view_state = ViewState::Summary;
                } else {
                    break;
                }
            }
            KeyAction::Accept => {
                engine.dispatch(Directive::ForceAccept);
            }
            KeyAction::Reject => {
                engine.dispatch(Directive::ForceReject);
            }
            KeyAction::Reload => {
                engine.dispatch(Directive::Reload);
            }
            KeyAction::DragLeft => {
                nudge(engine, -config.drag_step);
            }
            KeyAction::DragRight => {
                nudge(engine, config.drag_step);
            }
            KeyAction::Release => {
                engine.on_drag_ended();
            }
            KeyAction::Help => {
                view_state = ViewState::Help;
            }
            KeyAction::None => {}
        }
    }

    Ok(())
}

/// Moves the top card `step` further from where it currently sits
fn nudge(engine: &mut SwipeEngine, step: f64) {
    let current = engine.displacement();
    engine.on_drag_changed(Displacement::new(current.x + step, current.y));
}
