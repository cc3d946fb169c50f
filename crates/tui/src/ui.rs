use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph},
};
use textwrap::wrap;

use crate::app::{App, Focus};
use crate::resource::Resource;
use crate::router::{NAV_LINKS, Route};
use crate::views::search::VECTOR_PLACEHOLDER;
use crate::views::{MemoryDetailView, SearchView};

const DETAIL_WIDTH: u16 = 40;

pub fn draw(f: &mut Frame, app: &App) {
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Navigation
            Constraint::Length(1), // Separator
            Constraint::Min(1),    // Routed page
            Constraint::Length(1), // Footer
        ])
        .split(area);

    draw_nav(f, app, chunks[0]);
    f.render_widget(Paragraph::new("─".repeat(area.width as usize)).dim(), chunks[1]);

    match app.router.current() {
        Route::Home => draw_home(f, app, chunks[2]),
        Route::About => draw_about(f, chunks[2]),
        Route::NotFound(path) => {
            f.render_widget(Paragraph::new(format!("No route matches {}", path)).yellow(), chunks[2]);
        }
    }

    let footer = Line::from(format!(
        "{}  •  F1: Home  •  F2: About  •  Tab: Focus  •  ESC: Quit",
        app.last_activity
    ))
    .gray();
    f.render_widget(Paragraph::new(footer).alignment(Alignment::Right), chunks[3]);
}

fn draw_nav(f: &mut Frame, app: &App, area: Rect) {
    let current = app.router.current();
    let mut spans = Vec::new();
    for (label, path) in NAV_LINKS {
        let style = if current.path() == path {
            Style::default().cyan().bold()
        } else {
            Style::default().gray()
        };
        spans.push(Span::styled(label, style));
        spans.push(Span::raw("   "));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_about(f: &mut Frame, area: Rect) {
    let text = vec![
        Line::from("About").bold(),
        Line::from(""),
        Line::from("Recall searches stored memories by embedding vector."),
        Line::from("Results come from the GraphQL search endpoint; details from the REST API."),
    ];
    f.render_widget(Paragraph::new(text), area);
}

fn draw_home(f: &mut Frame, app: &App, area: Rect) {
    let Some(search) = app.search.as_ref() else {
        return;
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Heading
            Constraint::Length(1), // Counter
            Constraint::Length(3), // Form
            Constraint::Length(1), // Form error
            Constraint::Min(1),    // Results + detail
        ])
        .split(area);

    f.render_widget(Paragraph::new("Home").bold(), rows[0]);

    let counter_style = if app.focus == Focus::Counter {
        Style::default().black().on_cyan()
    } else {
        Style::default().cyan()
    };
    f.render_widget(
        Paragraph::new(Span::styled(format!("[ Count is {} ]", app.counter.count()), counter_style)),
        rows[1],
    );

    draw_form(f, app.focus, search, rows[2]);

    if let Some(err) = &search.form_error {
        f.render_widget(Paragraph::new(err.to_string()).red(), rows[3]);
    }

    let body = match search.selected() {
        Some(_) => Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(10), Constraint::Length(DETAIL_WIDTH)])
            .split(rows[4]),
        None => Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(10)])
            .split(rows[4]),
    };

    draw_results(f, app.focus, search, body[0]);

    if let (Some(selected), Some(detail)) = (search.selected(), search.detail()) {
        let block = Block::default()
            .borders(Borders::LEFT)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(Span::styled(format!(" Memory {} ", selected.id), Style::default().bold()));
        let inner = block.inner(body[1]);
        f.render_widget(block, body[1]);
        draw_detail(f, detail, inner);
    }
}

fn focus_border(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn draw_form(f: &mut Frame, focus: Focus, search: &SearchView, area: Rect) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(10), Constraint::Length(12)])
        .split(area);

    let vector = if search.vector_input.is_empty() {
        Span::styled(VECTOR_PLACEHOLDER, Style::default().dark_gray())
    } else {
        Span::raw(search.vector_input.as_str())
    };
    f.render_widget(
        Paragraph::new(vector).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(focus_border(focus == Focus::Vector)),
        ),
        cols[0],
    );

    f.render_widget(
        Paragraph::new(search.limit_input.as_str()).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .title("Limit")
                .border_style(focus_border(focus == Focus::Limit)),
        ),
        cols[1],
    );

    let label = if search.results.is_loading() { "…" } else { "Search" };
    f.render_widget(
        Paragraph::new(label).alignment(Alignment::Center).bold().block(
            Block::default().borders(Borders::ALL).border_type(BorderType::Rounded),
        ),
        cols[2],
    );
}

fn draw_results(f: &mut Frame, focus: Focus, search: &SearchView, area: Rect) {
    let items: Vec<ListItem> = match &search.results {
        Resource::Idle => Vec::new(),
        Resource::Loading => vec![ListItem::new("Loading...")],
        Resource::Error(reason) => vec![ListItem::new(format!("Error: {}", reason)).red()],
        Resource::Loaded(results) => results
            .iter()
            .map(|r| {
                let style = if search.selected().is_some_and(|s| s.id == r.id) {
                    Style::default().magenta().underlined()
                } else {
                    Style::default().blue().underlined()
                };
                ListItem::new(Span::styled(r.to_string(), style))
            })
            .collect(),
    };

    let list = List::new(items)
        .block(Block::default().borders(Borders::TOP).border_style(focus_border(focus == Focus::Results)))
        .highlight_symbol("❯ ");

    let mut state = ListState::default();
    if focus == Focus::Results && search.results.loaded().is_some() {
        state.select(Some(search.highlighted));
    }
    f.render_stateful_widget(list, area, &mut state);
}

fn draw_detail(f: &mut Frame, detail: &MemoryDetailView, area: Rect) {
    let width = area.width.saturating_sub(1).max(1) as usize;
    let lines: Vec<Line> = match &detail.record {
        Resource::Idle | Resource::Loading => vec![Line::from("Loading...")],
        Resource::Error(reason) => wrap(&format!("Error: {}", reason), width)
            .into_iter()
            .map(|l| Line::from(l.into_owned()).red())
            .collect(),
        Resource::Loaded(record) => {
            let mut lines: Vec<Line> = wrap(&record.content, width)
                .into_iter()
                .map(|l| Line::from(l.into_owned()))
                .collect();
            lines.push(Line::from(""));
            lines.push(Line::from(format!("User {}", record.user_id)).gray());
            lines.push(Line::from(record.created_at.clone()).dark_gray());
            lines
        }
    };
    f.render_widget(Paragraph::new(lines), area);
}
