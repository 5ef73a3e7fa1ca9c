//! ocrdesk - terminal front-end for an image-to-text recognition server.
//!
//! Sets up logging and the terminal, then runs the event loop that feeds
//! keyboard, mouse, worker and timer events through the controller.

use std::io;
use std::time::Instant;

use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event as TermEvent, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::Rect,
    Terminal,
};
use tracing::{error, info};

use ocrdesk::application::{App, AppMode, Event};
use ocrdesk::config::Cli;
use ocrdesk::error::AppError;
use ocrdesk::infrastructure::{init_logging, ClipboardSink, EffectExecutor, HttpRecognitionService, RecognitionService, SystemClipboard};
use ocrdesk::presentation::{render_ui, InputHandler};

/// Entry point.
///
/// # Errors
///
/// Returns an error if logging, the HTTP client or the terminal cannot be
/// set up, or if the terminal fails while running.
fn main() -> Result<(), AppError> {
    let cli = Cli::parse();
    let _log_guard = init_logging(&cli.resolved_log_dir(), &cli.log_level)?;
    info!(server = %cli.server, "starting");

    let service = HttpRecognitionService::new(&cli.server, cli.request_timeout())?;
    let mut executor = EffectExecutor::new(service, SystemClipboard::new());
    let mut app = App::new(cli.server.clone());

    let mut startup = vec![Event::CheckHealth];
    if let Some(image) = cli.image.clone() {
        startup.push(Event::FileChosen(image));
    }
    for event in startup {
        let effects = app.update(event);
        executor.run(effects, Instant::now());
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app, &mut executor);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!(error = %err, "event loop failed");
        println!("{err:?}");
    }
    info!("exiting");

    Ok(())
}

/// Main event loop.
///
/// Redraws, waits for terminal input no longer than the next timer allows,
/// then hands every pending event to the controller and its effects to the
/// executor. Returns when the user presses 'q' on the main screen.
fn run_app<B, S, C>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    executor: &mut EffectExecutor<S, C>,
) -> io::Result<()>
where
    B: Backend,
    S: RecognitionService + 'static,
    C: ClipboardSink,
{
    loop {
        terminal.draw(|f| render_ui(f, app))?;

        if event::poll(executor.poll_timeout(Instant::now()))? {
            let input = match event::read()? {
                TermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                    let quit = (key.code == KeyCode::Char('q') && app.mode == AppMode::Normal)
                        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL));
                    if quit {
                        return Ok(());
                    }
                    InputHandler::handle_key_event(app, key.code, key.modifiers)
                }
                TermEvent::Mouse(mouse) => {
                    let size = terminal.size()?;
                    InputHandler::handle_mouse_event(app, mouse, Rect::new(0, 0, size.width, size.height))
                }
                _ => None,
            };
            if let Some(event) = input {
                let effects = app.update(event);
                executor.run(effects, Instant::now());
            }
        }

        for event in executor.poll_ready(Instant::now()) {
            let effects = app.update(event);
            executor.run(effects, Instant::now());
        }
    }
}
