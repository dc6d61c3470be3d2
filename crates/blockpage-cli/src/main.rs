use anyhow::Result;
use blockpage_config::Config;
use blockpage_engine::{
    Collection, Filter, HttpFetcher, PageLoader, ResolvedPage, TextRenderer, build_query,
    render_page,
};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use std::{
    env,
    io::{Stdout, stdout},
    process,
};
use tokio::runtime::Runtime;

const USAGE: &str = "Usage:
  blockpage-cli                      browse pages interactively
  blockpage-cli query <pages|home> [slug]
  blockpage-cli slugs
  blockpage-cli show <slug>
  blockpage-cli show --home";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Target {
    Home,
    Page(String),
}

impl Target {
    fn title(&self) -> String {
        match self {
            Target::Home => "home".to_string(),
            Target::Page(slug) => format!("/{slug}"),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Browse,
    Query {
        collection: Collection,
        slug: Option<String>,
    },
    Slugs,
    Show(Target),
}

fn parse_command(args: &[String]) -> Option<Command> {
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    match args.as_slice() {
        [] => Some(Command::Browse),
        ["query", collection] => Some(Command::Query {
            collection: Collection::parse(collection)?,
            slug: None,
        }),
        ["query", collection, slug] => Some(Command::Query {
            collection: Collection::parse(collection)?,
            slug: Some(slug.to_string()),
        }),
        ["slugs"] => Some(Command::Slugs),
        ["show", "--home"] => Some(Command::Show(Target::Home)),
        ["show", slug] => Some(Command::Show(Target::Page(slug.to_string()))),
        _ => None,
    }
}

/// Text lines for a resolved page, blocks separated by a blank line.
fn page_lines(page: &ResolvedPage) -> Vec<String> {
    match page {
        ResolvedPage::NotFound => vec!["Page not found".to_string()],
        ResolvedPage::EmptyContent => vec!["(page has no blocks)".to_string()],
        ResolvedPage::Blocks(_) => {
            let mut lines = Vec::new();
            for block_lines in render_page(&TextRenderer, page) {
                lines.extend(block_lines);
                lines.push(String::new()); // Empty line after block
            }
            if lines.is_empty() {
                lines.push("(no blocks this previewer understands)".to_string());
            }
            lines
        }
    }
}

struct App {
    runtime: Runtime,
    loader: PageLoader<HttpFetcher>,
    targets: Vec<Target>,
    list_state: ListState,
    current_content: Vec<String>,
}

impl App {
    fn new(runtime: Runtime, loader: PageLoader<HttpFetcher>) -> Self {
        let mut app = Self {
            runtime,
            loader,
            targets: vec![Target::Home],
            list_state: ListState::default(),
            current_content: Vec::new(),
        };

        app.reload_targets();
        app.list_state.select(Some(0));
        app.update_content_for_selection();
        app
    }

    fn reload_targets(&mut self) {
        let mut targets = vec![Target::Home];
        match self.runtime.block_on(self.loader.list_slugs()) {
            Ok(slugs) => targets.extend(slugs.into_iter().map(Target::Page)),
            Err(e) => log::warn!("Failed to list pages: {e}"),
        }
        self.targets = targets;

        if let Some(i) = self.list_state.selected()
            && i >= self.targets.len()
        {
            self.list_state.select(Some(0));
        }
    }

    fn next_page(&mut self) {
        let i = match self.list_state.selected() {
            Some(i) => (i + 1) % self.targets.len(),
            None => 0,
        };
        self.list_state.select(Some(i));
        self.update_content_for_selection();
    }

    fn previous_page(&mut self) {
        let i = match self.list_state.selected() {
            Some(i) => {
                if i == 0 {
                    self.targets.len() - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.list_state.select(Some(i));
        self.update_content_for_selection();
    }

    fn select_home(&mut self) {
        self.list_state.select(Some(0));
        self.update_content_for_selection();
    }

    fn update_content_for_selection(&mut self) {
        if let Some(index) = self.list_state.selected()
            && let Some(target) = self.targets.get(index)
        {
            let result = match target {
                Target::Home => self.runtime.block_on(self.loader.load_home()),
                Target::Page(slug) => self.runtime.block_on(self.loader.load_page(slug)),
            };
            self.current_content = match result {
                Ok(page) => page_lines(&page),
                Err(e) => vec![format!("Error loading {}: {e}", target.title())],
            };
        }
    }

    fn selected_title(&self) -> String {
        self.list_state
            .selected()
            .and_then(|i| self.targets.get(i))
            .map(Target::title)
            .unwrap_or_default()
    }
}

fn init_logging(default_level: log::LevelFilter) {
    env_logger::Builder::new()
        .filter_level(default_level)
        .parse_default_env()
        .init();
}

fn build_loader() -> Result<PageLoader<HttpFetcher>> {
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            eprintln!("Fix or remove {}", Config::config_path().display());
            process::exit(1);
        }
    };
    let content_url = Config::content_url_from_env_or(config.as_ref());
    let timeout = config.unwrap_or_default().request_timeout();
    log::info!("Using content source {content_url}");

    Ok(PageLoader::new(&content_url, HttpFetcher::new(timeout)?)?)
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let Some(command) = parse_command(&args) else {
        eprintln!("{USAGE}");
        process::exit(1);
    };

    // Logging to stderr would draw over the terminal UI
    init_logging(if command == Command::Browse {
        log::LevelFilter::Error
    } else {
        log::LevelFilter::Info
    });

    match command {
        Command::Query { collection, slug } => {
            let filter = slug.map(Filter::slug);
            println!("{}", build_query(collection, filter.as_ref()));
            Ok(())
        }
        Command::Slugs => {
            let loader = build_loader()?;
            let runtime = Runtime::new()?;
            for slug in runtime.block_on(loader.list_slugs())? {
                println!("{slug}");
            }
            Ok(())
        }
        Command::Show(target) => {
            let loader = build_loader()?;
            let runtime = Runtime::new()?;
            let page = match &target {
                Target::Home => runtime.block_on(loader.load_home())?,
                Target::Page(slug) => runtime.block_on(loader.load_page(slug))?,
            };
            for line in page_lines(&page) {
                println!("{line}");
            }
            if page.is_not_found() {
                process::exit(2);
            }
            Ok(())
        }
        Command::Browse => {
            let loader = build_loader()?;
            browse(App::new(Runtime::new()?, loader))
        }
    }
}

fn browse(mut app: App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Down | KeyCode::Char('j') => app.next_page(),
                KeyCode::Up | KeyCode::Char('k') => app.previous_page(),
                KeyCode::Char('h') => app.select_home(),
                KeyCode::Char('r') => {
                    app.reload_targets();
                    app.update_content_for_selection();
                }
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .margin(1)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)].as_ref())
        .split(f.area());

    // Page list panel
    let page_items: Vec<ListItem> = app
        .targets
        .iter()
        .map(|target| {
            let display_text = match target {
                Target::Home => "🏠 home".to_string(),
                Target::Page(slug) => format!("📄 {slug}"),
            };
            ListItem::new(vec![Line::from(vec![Span::raw(display_text)])])
        })
        .collect();

    let pages_list = List::new(page_items)
        .block(Block::default().borders(Borders::ALL).title("Pages"))
        .highlight_style(Style::default().bg(Color::Yellow).fg(Color::Black));

    f.render_stateful_widget(pages_list, chunks[0], &mut app.list_state);

    // Content panel
    let content_text: Vec<Line> = if app.current_content.is_empty() {
        vec![Line::from("Select a page to preview its blocks")]
    } else {
        app.current_content
            .iter()
            .map(|line| Line::from(vec![Span::raw(line.clone())]))
            .collect()
    };

    let content = Paragraph::new(content_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(app.selected_title()),
        )
        .wrap(ratatui::widgets::Wrap { trim: false });

    f.render_widget(content, chunks[1]);

    // Instructions
    let help_text = Line::from(vec![
        Span::raw("q: Quit | "),
        Span::raw("↑/k: Previous | "),
        Span::raw("↓/j: Next | "),
        Span::raw("h: Home | r: Reload pages"),
    ]);

    let help = Paragraph::new(vec![help_text]).block(Block::default());

    // Place help at bottom
    let bottom_chunk = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)].as_ref())
        .split(f.area());

    f.render_widget(help, bottom_chunk[1]);
}
