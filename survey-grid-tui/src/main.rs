mod logging;
mod tui;

use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{io, path::{Path, PathBuf}, time::Duration};
use survey_grid_common::Config;
use survey_grid_core::{
    default_columns, export_csv, export_json, open_dataset, print_rows, sample_info, sample_rows,
    DatasetInfo, FieldAccessor, FilterColumn, FilterGrid,
};
use tracing::{info, warn};
use tui::app::App;
use tui::events::{handle_key, handle_mouse};
use tui::ui::render;

#[derive(Parser)]
#[command(name = "survey-grid", version, about = "Filter survey responses by name, project and company")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse and filter a dataset interactively
    View { data: Option<String> },
    /// Apply filters headlessly and print or export the visible rows
    Filter {
        data: Option<String>,
        #[arg(long = "name")] names: Vec<String>,
        #[arg(long = "project")] projects: Vec<String>,
        #[arg(long = "company")] companies: Vec<String>,
        #[arg(long, value_parser = ["table", "json", "csv"])] format: Option<String>,
        #[arg(long)] output: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let (config, config_err) = match Config::load() {
        Ok(c) => (c, None),
        Err(e) => (Config::default(), Some(e)),
    };
    let target = match cli.command {
        Commands::View { .. } => logging::LogTarget::File,
        Commands::Filter { .. } => logging::LogTarget::Stderr,
    };
    logging::init(&config.logging.filter, target)?;
    if let Some(e) = config_err {
        warn!(error = %e, path = %Config::config_path().display(), "using default config");
    }
    match cli.command {
        Commands::View { data } => run_tui(data, config)?,
        Commands::Filter { data, names, projects, companies, format, output } => {
            let selections = [
                (FilterColumn::Names, names),
                (FilterColumn::Projects, projects),
                (FilterColumn::Companies, companies),
            ];
            run_filter(data, &selections, format, output, &config)?
        }
    }
    Ok(())
}

fn load_grid(data: Option<String>, config: &Config) -> anyhow::Result<(FilterGrid, DatasetInfo)> {
    let (info, rows) = match data.or_else(|| config.data.path.clone()) {
        Some(path) => open_dataset(Path::new(&path))?,
        None => {
            info!("no dataset given, using built-in sample");
            (sample_info(), sample_rows())
        }
    };
    let grid = FilterGrid::new(rows, default_columns(), FieldAccessor::from(&config.data))?;
    Ok((grid, info))
}

fn run_tui(data: Option<String>, config: Config) -> anyhow::Result<()> {
    let (grid, dataset) = load_grid(data, &config)?;
    let mut app = App::new(grid, dataset, &config);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    result
}

fn event_loop(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> anyhow::Result<()> {
    let tick = Duration::from_millis(66);
    loop {
        terminal.draw(|f| render(f, app))?;
        if event::poll(tick)? {
            match event::read()? {
                Event::Key(key) => handle_key(app, key),
                Event::Mouse(mouse) => handle_mouse(app, mouse),
                _ => {}
            }
        }
        if app.should_quit { break; }
    }
    Ok(())
}

fn run_filter(
    data: Option<String>,
    selections: &[(FilterColumn, Vec<String>)],
    format: Option<String>,
    output: Option<String>,
    config: &Config,
) -> anyhow::Result<()> {
    let (mut grid, _) = load_grid(data, config)?;
    grid.apply_selections(selections)?;

    let rows = grid.visible_rows();
    let format = format.unwrap_or_else(|| if output.is_some() { config.export.format.clone() } else { "table".into() });
    if format == "table" {
        print_rows(&rows, grid.fields())?;
        return Ok(());
    }
    let out_path = match output {
        Some(o) => PathBuf::from(o),
        None => Path::new(&config.export.output_dir).join(format!("rows.{format}")),
    };
    if let Some(parent) = out_path.parent() {
        if !parent.as_os_str().is_empty() { std::fs::create_dir_all(parent)?; }
    }
    match format.as_str() {
        "json" => export_json(&out_path, &rows)?,
        "csv" => export_csv(&out_path, &rows, grid.fields())?,
        other => anyhow::bail!("unknown format: {other} (use table, json or csv)"),
    }
    info!(path = %out_path.display(), rows = rows.len(), "exported rows");
    println!("Exported {} row(s) to {}", rows.len(), out_path.display());
    Ok(())
}
