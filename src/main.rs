// Binary includes library modules - some public API items are only for library consumers
#![allow(unused)]

use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    Terminal,
};

mod app;
mod config;
mod data;
mod events;
mod source;
mod ui;

use app::App;
use crate::config::Settings;
use data::duration::parse_duration;
use data::BufferWindow;
use source::{DataSource, FileSource, StreamSource};

/// Width of the series sidebar, including borders.
const SIDEBAR_WIDTH: u16 = 30;

#[derive(Parser, Debug)]
#[command(name = "brokerwatch")]
#[command(about = "Live throughput TUI for monitoring message broker activity")]
struct Args {
    /// Path to a throughput snapshot file (JSON array of
    /// {"name", "read", "write"} entries)
    #[arg(short, long, default_value = "throughput.json", conflicts_with = "connect")]
    file: PathBuf,

    /// Connect to a TCP endpoint streaming snapshots (host:port)
    #[arg(short, long, conflicts_with = "file")]
    connect: Option<String>,

    /// Path to a config file with tick/horizon settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Sampling cadence (e.g. "5s"); overrides config file and environment
    #[arg(long)]
    tick: Option<String>,

    /// Retention horizon (e.g. "10m"); overrides config file and environment
    #[arg(long)]
    horizon: Option<String>,

    /// Normalize a snapshot file into a sorted catalog JSON and exit
    #[arg(short, long, conflicts_with = "connect")]
    export: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let settings = Settings::load(args.config.as_deref())?;
    let tick = match &args.tick {
        Some(s) => parse_duration(s)?,
        None => settings.tick()?,
    };
    let horizon = match &args.horizon {
        Some(s) => parse_duration(s)?,
        None => settings.horizon()?,
    };
    let window = BufferWindow::new(tick, horizon);

    // Handle export mode (non-interactive)
    if let Some(export_path) = args.export {
        return export_to_file(&args.file, &export_path);
    }

    // Handle TCP connection mode
    if let Some(ref addr) = args.connect {
        return run_with_tcp(addr, window);
    }

    // Default: file-based mode
    let source = Box::new(FileSource::new(&args.file));
    run_tui(source, window)
}

/// Run with a TCP stream data source
fn run_with_tcp(addr: &str, window: BufferWindow) -> Result<()> {
    // Build a tokio runtime for the TCP connection
    let rt = tokio::runtime::Runtime::new()?;

    let source = rt.block_on(async {
        use tokio::net::TcpStream;

        println!("Connecting to {}...", addr);
        match TcpStream::connect(addr).await {
            Ok(stream) => {
                println!("Connected!");
                Ok(Box::new(StreamSource::spawn(stream, addr)) as Box<dyn DataSource>)
            }
            Err(e) => Err(anyhow::anyhow!("Failed to connect to {}: {}", addr, e)),
        }
    })?;

    // The runtime stays alive here so the background reader keeps running
    run_tui(source, window)
}

/// Run the TUI with the given data source
fn run_tui(source: Box<dyn DataSource>, window: BufferWindow) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic);
    }));

    let mut app = App::new(source, window);

    // Run the main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    // Minimum terminal size for usable display
    const MIN_WIDTH: u16 = 60;
    const MIN_HEIGHT: u16 = 12;

    let mut needs_draw = true;

    while app.running {
        // The two producers run on this one thread, in arrival order:
        // the snapshot feed and the sampling timer.
        app.poll_source();
        app.tick_if_due(Instant::now());

        // Redraw only when something changed (or a terminal event below
        // forced it)
        if !app.changes.is_empty() {
            app.changes.drain();
            needs_draw = true;
        }

        if needs_draw {
            terminal.draw(|frame| {
                let area = frame.area();

                // Check for minimum terminal size
                if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
                    let msg = format!(
                        "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
                        area.width, area.height, MIN_WIDTH, MIN_HEIGHT
                    );
                    let paragraph = ratatui::widgets::Paragraph::new(msg)
                        .alignment(ratatui::layout::Alignment::Center)
                        .style(ratatui::style::Style::default().fg(ratatui::style::Color::Yellow));
                    let centered = ratatui::layout::Rect::new(
                        0,
                        (area.height / 2).saturating_sub(2),
                        area.width,
                        5.min(area.height),
                    );
                    frame.render_widget(paragraph, centered);
                    return;
                }

                let chunks = Layout::vertical([
                    Constraint::Length(1), // Header bar
                    Constraint::Min(8),    // Content
                    Constraint::Length(1), // Status bar
                ])
                .split(area);

                ui::common::render_header(frame, app, chunks[0]);

                let content = Layout::horizontal([
                    Constraint::Length(SIDEBAR_WIDTH),
                    Constraint::Min(20),
                ])
                .split(chunks[1]);

                ui::series::render(frame, app, content[0]);
                ui::chart::render(frame, app, content[1]);

                ui::common::render_status_bar(frame, app, chunks[2]);

                // Render help overlay if active
                if app.show_help {
                    ui::common::render_help(frame, app, area);
                }
            })?;
            needs_draw = false;
        }

        // Poll for events with a short timeout; this also paces the loop
        if let Some(event) = events::poll_event(Duration::from_millis(100))? {
            match event {
                Event::Key(key) => {
                    events::handle_key_event(app, key);
                    needs_draw = true;
                }
                Event::Mouse(mouse) => {
                    // Sidebar content starts after header (1) + list border (1)
                    events::handle_mouse_event(app, mouse, SIDEBAR_WIDTH, 1);
                    needs_draw = true;
                }
                Event::Resize(_, _) => {
                    needs_draw = true;
                }
                _ => {}
            }
        }
    }

    Ok(())
}

/// Normalize a snapshot file into a sorted catalog and write it as JSON
fn export_to_file(snapshot_path: &std::path::Path, export_path: &std::path::Path) -> Result<()> {
    use std::io::Write;

    let content = std::fs::read_to_string(snapshot_path)?;
    let snapshot = source::decode_snapshot(&content)?;

    let mut catalog = data::Catalog::new();
    catalog.update(&snapshot);

    let export = serde_json::json!({
        "catalog": catalog.names(),
        "rates": catalog.names().iter().map(|name| {
            let rates = catalog.rates(name);
            serde_json::json!({
                "name": name,
                "read": rates.map(|r| r.read),
                "write": rates.map(|r| r.write),
            })
        }).collect::<Vec<_>>(),
    });

    let json = serde_json::to_string_pretty(&export)?;
    let mut file = std::fs::File::create(export_path)?;
    file.write_all(json.as_bytes())?;

    println!("Exported catalog to: {}", export_path.display());
    Ok(())
}
