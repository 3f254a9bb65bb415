// Defensive programming lints - prevent panics and unsafe patterns
#![deny(clippy::indexing_slicing)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::wildcard_enum_match_arm)]
// Idiomatic Rust lints
#![warn(clippy::needless_return)]
#![warn(clippy::redundant_closure_for_method_calls)]
#![warn(clippy::map_unwrap_or)]

use color_eyre::Result;
use crossterm::{
    event::{
        self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
        Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
        MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
    layout::{Position, Rect},
};
use std::{
    io,
    time::{Duration, Instant},
};
use textfield_sheet::{
    app::App,
    config::Config,
    logging, ui,
    ui::{host::HostLayout, sheet::SheetLayout},
};

const IDLE_POLL: Duration = Duration::from_millis(100);
const ANIMATION_POLL: Duration = Duration::from_millis(16);

/// What the command line asked for
#[derive(Debug, PartialEq)]
enum CliAction {
    Run(LaunchOptions),
    Help,
    Version,
}

#[derive(Debug, Default, PartialEq)]
struct LaunchOptions {
    seed: Option<String>,
    no_guard: bool,
}

fn main() -> Result<()> {
    // Setup error handling
    color_eyre::install()?;

    let args: Vec<String> = std::env::args().collect();
    let program_name = args.first().map_or("textfield-sheet", String::as_str);
    let options = match parse_args(args.get(1..).unwrap_or_default())? {
        CliAction::Run(options) => options,
        CliAction::Help => {
            print_help(program_name);
            return Ok(());
        }
        CliAction::Version => {
            println!("textfield-sheet v{}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
    };

    // Load config
    let config = Config::load()?;
    let _log_guard = match logging::init(&config.logging) {
        Ok(guard) => Some(guard),
        Err(error) => {
            eprintln!("Logging disabled: {}", error);
            None
        }
    };

    let mut app = App::new(&config)
        .with_draft(options.seed.unwrap_or_default())
        .with_discard_guard(config.sheet.discard_guard && !options.no_guard);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    tracing::info!("starting");
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(?err, "terminal loop failed");
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

fn parse_args(args: &[String]) -> Result<CliAction> {
    let mut options = LaunchOptions::default();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--help" | "-h" => return Ok(CliAction::Help),
            "--version" | "-v" => return Ok(CliAction::Version),
            "--no-guard" => options.no_guard = true,
            "--seed" => {
                let seed = iter
                    .next()
                    .ok_or_else(|| color_eyre::eyre::eyre!("--seed needs a value"))?;
                options.seed = Some(seed.clone());
            }
            other => {
                return Err(color_eyre::eyre::eyre!(
                    "Unknown argument: {}. Run with --help for usage.",
                    other
                ));
            }
        }
    }
    Ok(CliAction::Run(options))
}

fn print_help(program_name: &str) {
    println!("textfield-sheet - edit a draft in a bottom sheet");
    println!();
    println!("Usage: {} [options]", program_name);
    println!();
    println!("Options:");
    println!("  --seed <text>  - Start with this draft");
    println!("  --no-guard     - Close edited sheets without asking");
    println!("  --help         - Show this help");
    println!("  --version      - Show version");
    println!();
    println!("Config: {}", config_path_hint());
}

fn config_path_hint() -> String {
    Config::config_path()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|_| "unavailable".to_string())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        app.tick(Instant::now());

        if app.needs_redraw || app.is_animating() {
            terminal.draw(|f| ui::render(f, app))?;
            app.needs_redraw = false;
        }

        if app.should_quit {
            break;
        }

        let timeout = if app.is_animating() {
            ANIMATION_POLL
        } else {
            IDLE_POLL
        };
        if !event::poll(timeout)? {
            continue;
        }

        match event::read()? {
            Event::Key(key) => {
                // Only handle KeyPress events to avoid duplicate handling
                if key.kind == KeyEventKind::Press {
                    handle_key_event(app, key);
                }
            }
            Event::Mouse(mouse) => handle_mouse_event(app, mouse)?,
            Event::Paste(paste) => {
                if let Some(sheet) = app.sheet.as_mut() {
                    sheet.handle_paste(&paste);
                }
            }
            Event::Resize(_, _) => app.needs_redraw = true,
            Event::FocusGained | Event::FocusLost => {}
        }
        app.process_host_events();
    }

    Ok(())
}

fn handle_key_event(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    let now = Instant::now();
    if let Some(sheet) = app.sheet.as_mut() {
        sheet.handle_key(key, now);
        return;
    }

    match key.code {
        KeyCode::Char('e') | KeyCode::Enter => app.open_sheet(now),
        KeyCode::Char('q') => app.should_quit = true,
        _ => {}
    }
}

fn handle_mouse_event(app: &mut App, mouse: MouseEvent) -> Result<()> {
    let area = terminal_area()?;
    let now = Instant::now();

    if let Some(sheet) = app.sheet.as_mut() {
        let layout = SheetLayout::for_sheet(area, sheet);
        sheet.handle_mouse(mouse, &layout, now);
        return Ok(());
    }

    if mouse.kind == MouseEventKind::Down(MouseButton::Left)
        && HostLayout::new(area)
            .edit_button
            .contains(Position::new(mouse.column, mouse.row))
    {
        app.open_sheet(now);
    }
    Ok(())
}

fn terminal_area() -> Result<Rect> {
    let (width, height) = crossterm::terminal::size()?;
    Ok(Rect::new(0, 0, width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| (*value).to_string()).collect()
    }

    #[test]
    fn test_parse_args_defaults() -> Result<()> {
        assert_eq!(
            parse_args(&[])?,
            CliAction::Run(LaunchOptions::default())
        );
        Ok(())
    }

    #[test]
    fn test_parse_args_seed_and_guard() -> Result<()> {
        let action = parse_args(&args(&["--no-guard", "--seed", "Buy milk"]))?;
        assert_eq!(
            action,
            CliAction::Run(LaunchOptions {
                seed: Some("Buy milk".to_string()),
                no_guard: true,
            })
        );
        Ok(())
    }

    #[test]
    fn test_parse_args_errors() {
        assert!(parse_args(&args(&["--seed"])).is_err());
        assert!(parse_args(&args(&["--bogus"])).is_err());
    }

    #[test]
    fn test_help_wins() -> Result<()> {
        assert_eq!(parse_args(&args(&["--help", "--bogus"]))?, CliAction::Help);
        Ok(())
    }

    #[test]
    fn test_keys_open_sheet_and_quit() {
        let mut app = App::default();
        handle_key_event(&mut app, KeyEvent::new(KeyCode::Char('e'), KeyModifiers::NONE));
        assert!(app.is_sheet_open());

        // 'q' is text inside the sheet
        handle_key_event(&mut app, KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE));
        assert!(!app.should_quit);
        assert_eq!(app.sheet.as_ref().map(|sheet| sheet.text()), Some("q"));

        handle_key_event(&mut app, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }
}
