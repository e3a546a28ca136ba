use crossterm::{
    cursor::Show,
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame, Terminal,
};
use std::{io, time::Duration};

use crate::chart::{ChartData, INDEX_LABEL, PRICE_LABEL, PRICE_TITLE, QUANTITY_LABEL, VOLUME_TITLE};
use crate::error::AnalyzerError;

/// Bar heights handed to `BarChart` are quantities rescaled to this range,
/// so huge fills cannot overflow its height arithmetic.
const BAR_RESOLUTION: u64 = 1_000;

/// Opens the chart viewer on the alternate screen and blocks until the
/// user closes it with `q`, `Esc` or `Ctrl-C`.
///
/// The terminal is restored on every exit path, including a failure to
/// enter the alternate screen.
pub fn show(data: &ChartData) -> Result<(), AnalyzerError> {
    enable_raw_mode()?;

    let res = run_on_alternate_screen(data);
    let restored = restore_terminal();

    res.and(restored)
}

fn run_on_alternate_screen(data: &ChartData) -> Result<(), AnalyzerError> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    run_viewer(&mut terminal, data)
}

fn restore_terminal() -> Result<(), AnalyzerError> {
    let raw = disable_raw_mode();
    execute!(io::stdout(), LeaveAlternateScreen, Show)?;
    raw?;
    Ok(())
}

fn run_viewer<B: Backend>(terminal: &mut Terminal<B>, data: &ChartData) -> Result<(), AnalyzerError> {
    loop {
        terminal.draw(|f| draw(f, data))?;

        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key.code {
                    KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Ok(()),
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return Ok(()),
                    _ => {}
                }
            }
        }
    }
}

/// Price panel on top, volume panel below, key hint on the last row.
pub fn draw(f: &mut Frame, data: &ChartData) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(50),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(f.size());

    draw_price_panel(f, data, chunks[0]);
    draw_volume_panel(f, data, chunks[1]);

    let hint = Paragraph::new(format!("{} trades | q / Esc to close", data.len()))
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    f.render_widget(hint, chunks[2]);
}

fn draw_price_panel(f: &mut Frame, data: &ChartData, area: Rect) {
    let [xmin, xmax] = data.x_bounds();
    let [ymin, ymax] = data.price_bounds();

    let datasets = vec![
        Dataset::default()
            .name(PRICE_LABEL)
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Blue))
            .data(&data.prices),
        Dataset::default()
            .marker(symbols::Marker::Dot)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(Color::LightBlue))
            .data(&data.prices),
    ];

    let chart = Chart::new(datasets)
        .block(panel_block(PRICE_TITLE))
        .x_axis(
            Axis::default()
                .title(INDEX_LABEL)
                .style(Style::default().fg(Color::Gray))
                .bounds([xmin, xmax])
                .labels(axis_labels(xmin, xmax, 0)),
        )
        .y_axis(
            Axis::default()
                .title(PRICE_LABEL)
                .style(Style::default().fg(Color::Gray))
                .bounds([ymin, ymax])
                .labels(axis_labels(ymin, ymax, 2)),
        );

    f.render_widget(chart, area);
}

fn draw_volume_panel(f: &mut Frame, data: &ChartData, area: Rect) {
    let block = panel_block(VOLUME_TITLE)
        .title_bottom(format!("x: {} | y: {}", INDEX_LABEL, QUANTITY_LABEL));
    let inner_width = block.inner(area).width as usize;

    let (bar_width, bar_gap, visible) = bar_layout(inner_width, data.len());
    let start = data.len() - visible;
    let max = data.max_quantity();

    let bars: Vec<Bar> = data.quantities[start..]
        .iter()
        .map(|&(x, q)| {
            Bar::default()
                .value(bar_height(q, max))
                .text_value(format!("{}", q as u64))
                .label(Line::from(format!("{}", x)))
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .bar_width(bar_width)
        .bar_gap(bar_gap)
        .max(BAR_RESOLUTION)
        .bar_style(Style::default().fg(Color::Green))
        .value_style(Style::default().fg(Color::Black).bg(Color::Green))
        .data(BarGroup::default().bars(&bars));

    f.render_widget(chart, area);
}

/// Bar width, gap and how many of the latest trades fit in `width` columns.
fn bar_layout(width: usize, bars: usize) -> (u16, u16, usize) {
    let gap = 1;
    let bar_width = ((width + gap) / bars.max(1)).saturating_sub(gap).clamp(1, 8);
    let visible = ((width + gap) / (bar_width + gap)).min(bars);
    (bar_width as u16, gap as u16, visible)
}

fn bar_height(quantity: f64, max: f64) -> u64 {
    if max <= 0.0 {
        return 0;
    }
    ((quantity / max) * BAR_RESOLUTION as f64).round() as u64
}

fn panel_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            title,
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ))
}

fn axis_labels(min: f64, max: f64, precision: usize) -> Vec<Span<'static>> {
    let mid = (min + max) / 2.0;
    [min, mid, max]
        .iter()
        .map(|v| Span::raw(format!("{:.*}", precision, v)))
        .collect()
}
