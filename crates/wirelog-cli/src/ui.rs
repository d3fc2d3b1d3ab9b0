use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

use wirelog_types::RenderedLine;

use crate::app::App;

pub(crate) fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_header(f, chunks[0], app);
    render_log(f, chunks[1], app);
    render_footer(f, chunks[2], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let (dot, dot_style) = if app.is_connected() {
        ("●", Style::default().fg(Color::Green))
    } else {
        ("○", Style::default().fg(Color::Red))
    };

    let mut spans = vec![
        Span::styled(dot, dot_style),
        Span::raw(" "),
        Span::styled(
            app.endpoint().to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::raw(app.counter_label()),
    ];

    if let Some(since) = app.connected_since() {
        spans.push(Span::styled(
            format!("  up since {}", since.format("%H:%M:%S")),
            Style::default().fg(Color::DarkGray),
        ));
    }

    if app.is_paused() {
        spans.push(Span::styled(
            "  PAUSED",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_log(f: &mut Frame, area: Rect, app: &App) {
    let height = area.height as usize;
    let total = app.lines().len();
    let offset = app.scroll_from_bottom().min(total);
    let end = total - offset;
    let start = end.saturating_sub(height);

    let items: Vec<ListItem> = app
        .lines()
        .iter()
        .skip(start)
        .take(end - start)
        .map(log_item)
        .collect();

    f.render_widget(List::new(items), area);
}

fn log_item(line: &RenderedLine) -> ListItem<'static> {
    let payload_style = if line.alert {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let topic_style = if line.alert {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::Cyan)
    };

    ListItem::new(Line::from(vec![
        Span::styled(line.clock.clone(), Style::default().fg(Color::DarkGray)),
        Span::raw(" "),
        Span::styled(line.topic.clone(), topic_style),
        Span::raw(" "),
        Span::styled(line.payload.clone(), payload_style),
    ]))
}

fn render_footer(f: &mut Frame, area: Rect, app: &App) {
    let filter_line = if app.is_filter_editing() {
        Line::from(vec![
            Span::styled("filter> ", Style::default().fg(Color::Yellow)),
            Span::raw(app.filter_input().to_string()),
            Span::styled("█", Style::default().fg(Color::Yellow)),
        ])
    } else if app.filter_input().is_empty() {
        Line::from(Span::styled(
            "filter: (none)",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Line::from(vec![
            Span::raw("filter: "),
            Span::styled(
                app.filter_input().to_string(),
                Style::default().fg(Color::Yellow),
            ),
        ])
    };

    let help = Line::from(Span::styled(
        "q quit · p pause · / filter · ↑/↓ scroll · G bottom",
        Style::default().fg(Color::DarkGray),
    ));

    let footer = Paragraph::new(vec![filter_line, help]).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(Color::DarkGray)),
    );

    f.render_widget(footer, area);
}
