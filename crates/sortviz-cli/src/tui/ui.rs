//! TUI rendering.
//!
//! Sorter view:
//!
//! ┌──────────────────────────────────────────────┐
//! │  sortviz   Bubble Sort   n=12   frame 37  ⟳  │
//! ├──────────┬───────────────────────────────────┤
//! │  Values  │  Chart                            │
//! │    42    │        █                          │
//! │  ▌ 17    │     █  █     █                    │
//! │  ▌ 63    │  █  █  █  █  █  █                 │
//! │    ...   │                                   │
//! ├──────────┴───────────────────────────────────┤
//! │  How many numbers?  12_                      │
//! ├──────────────────────────────────────────────┤
//! │  b bubble  m merge  s step  p pass  a all .. │
//! └──────────────────────────────────────────────┘

use super::app::{App, Focus, View};
use ratatui::{prelude::*, widgets::*};

/// Gap between chart bars when there is room for one.
const BAR_GAP: u16 = 1;

pub fn draw(f: &mut Frame, app: &App) {
    match app.view() {
        View::Welcome => draw_welcome(f, f.area()),
        View::Sorter => draw_sorter(f, app),
    }
}

fn draw_welcome(f: &mut Frame, area: Rect) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "sortviz",
            Style::default().bold().fg(Color::Cyan),
        )),
        Line::from(""),
        Line::from("Watch bubble sort and merge sort rearrange a list of random numbers,"),
        Line::from("one comparison at a time, in a table and a bar chart."),
        Line::from(""),
        Line::from(Span::styled(
            "Enter: start    q: quit",
            Style::default().fg(Color::Yellow),
        )),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Welcome ");
    let p = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(block);
    f.render_widget(p, area);
}

fn draw_sorter(f: &mut Frame, app: &App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // title
            Constraint::Min(6),    // main
            Constraint::Length(3), // input
            Constraint::Length(1), // keys
        ])
        .split(f.area());

    draw_title(f, rows[0], app);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(14), Constraint::Min(10)])
        .split(rows[1]);
    draw_table(f, cols[0], app);
    draw_chart(f, cols[1], app);

    draw_input(f, rows[2], app);
    draw_keys(f, rows[3], app);
}

fn draw_title(f: &mut Frame, area: Rect, app: &App) {
    let session = app.session();
    let n = session.sequence().len();
    let frames = session.presentation().frames();
    let spin = if session.is_animating() { " ⟳" } else { "" };
    let status = match (app.export_error(), app.last_export()) {
        (Some(e), _) => format!("  export failed: {e}"),
        (None, Some(path)) => format!("  saved {}", path.display()),
        (None, None) => String::new(),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(Line::from(vec![
            Span::styled(" sortviz ", Style::default().bold().fg(Color::Cyan)),
            Span::raw("  "),
            Span::styled(
                session.mode().label(),
                Style::default().bold().fg(Color::Yellow),
            ),
            Span::styled(
                format!("  n={n}  frame {frames}{spin}{status} "),
                Style::default().fg(Color::DarkGray),
            ),
        ]));

    f.render_widget(block, area);
}

fn draw_table(f: &mut Frame, area: Rect, app: &App) {
    let session = app.session();
    let presentation = session.presentation();

    let rows: Vec<Row> = session
        .sequence()
        .cells()
        .iter()
        .enumerate()
        .map(|(i, cell)| {
            let style = if presentation.is_highlighted(i) {
                Style::default().bg(Color::Green).fg(Color::Black).bold()
            } else {
                Style::default()
            };
            Row::new(vec![format!("{i:>3}"), format!("{:>3}", cell.value())]).style(style)
        })
        .collect();

    let table = Table::new(rows, [Constraint::Length(4), Constraint::Length(4)])
        .header(Row::new(vec!["  #", "num"]).style(Style::default().fg(Color::DarkGray)))
        .block(Block::default().borders(Borders::ALL).title(" Values "));

    let selected = (!session.sequence().is_empty()).then(|| app.focus_row());
    let mut state = TableState::default().with_selected(selected);
    f.render_stateful_widget(table, area, &mut state);
}

fn draw_chart(f: &mut Frame, area: Rect, app: &App) {
    let session = app.session();
    let chart = session.presentation().chart();

    if chart.is_empty() {
        let block = Block::default().borders(Borders::ALL).title(" Chart ");
        let p = Paragraph::new("Pick an algorithm (b / m), then type how many numbers to sort")
            .style(Style::default().fg(Color::DarkGray))
            .wrap(Wrap { trim: true })
            .block(block);
        f.render_widget(p, area);
        return;
    }

    let (bar_width, bar_gap) = bar_geometry(area.width.saturating_sub(2), chart.len());
    let presentation = session.presentation();
    let bars: Vec<Bar> = chart
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            let color = if presentation.is_highlighted(i) {
                Color::Green
            } else {
                Color::Cyan
            };
            Bar::default()
                .value(u64::from(v))
                .text_value(if bar_width >= 2 { v.to_string() } else { String::new() })
                .style(Style::default().fg(color))
        })
        .collect();

    let sorted = if session.sequence().is_sorted() { "  sorted" } else { "" };
    let barchart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Chart{sorted} ")),
        )
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width)
        .bar_gap(bar_gap)
        .max(u64::from(session.config().value_ceiling));

    f.render_widget(barchart, area);
}

/// Widest bars that fit `count` bars into `inner_width` columns.
fn bar_geometry(inner_width: u16, count: usize) -> (u16, u16) {
    let count = u16::try_from(count.max(1)).unwrap_or(u16::MAX);
    let gaps = BAR_GAP.saturating_mul(count - 1);
    if inner_width > gaps && (inner_width - gaps) / count >= 1 {
        ((inner_width - gaps) / count, BAR_GAP)
    } else {
        (1, 0)
    }
}

fn draw_input(f: &mut Frame, area: Rect, app: &App) {
    let editing = app.focus() == Focus::Input;

    let (text, style) = if editing || !app.input().is_empty() {
        let cursor = if editing { "_" } else { "" };
        (
            format!("{}{cursor}", app.input()),
            Style::default().fg(Color::White),
        )
    } else {
        let prompt = match app.session().prompt() {
            Some(e) => e.to_string(),
            None => "press i (or a digit) to type a count".to_string(),
        };
        (prompt, Style::default().fg(Color::DarkGray))
    };

    let border = if editing { Color::Yellow } else { Color::White };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(" How many numbers? ");
    f.render_widget(Paragraph::new(text).style(style).block(block), area);
}

fn draw_keys(f: &mut Frame, area: Rect, app: &App) {
    let text = if app.focus() == Focus::Input {
        " Enter: generate   Esc: cancel".to_string()
    } else {
        let step = if app.session().mode().supports_step() {
            "s: step   "
        } else {
            ""
        };
        format!(
            " b: bubble  m: merge  i: count  {step}p: pass  a: run all  r: randomize  o: auto sort  e: export  h: back  q: quit"
        )
    };
    let bar = Paragraph::new(text).style(Style::default().bg(Color::DarkGray).fg(Color::White));
    f.render_widget(bar, area);
}
