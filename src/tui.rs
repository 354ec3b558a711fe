use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{BarChart, Block, Borders, Cell, Paragraph, Row, Table, Tabs};

use crate::loader::{self, LoadError};
use crate::metrics;
use crate::state::{DashboardEvent, DashboardState, Tab};
use crate::types::SummaryBundle;
use crate::utils::{NumberFormatOptions, format_minutes, format_number};

pub mod logic;

const TICK: Duration = Duration::from_millis(100);

type LoadResult = Result<SummaryBundle, LoadError>;

/// Run the dashboard until the user quits. `file` is the session log the
/// `r` key reloads; reloads run on the tokio runtime and deliver their
/// result through a channel drained once per frame, so a slow read never
/// stalls rendering.
pub fn run_tui(
    mut state: DashboardState,
    file: Option<PathBuf>,
    format_options: &NumberFormatOptions,
) -> Result<()> {
    let mut terminal = ratatui::init();
    let result = event_loop(&mut terminal, &mut state, file, format_options);
    ratatui::restore();
    result
}

fn event_loop(
    terminal: &mut ratatui::DefaultTerminal,
    state: &mut DashboardState,
    file: Option<PathBuf>,
    format_options: &NumberFormatOptions,
) -> Result<()> {
    let (tx, rx) = mpsc::channel::<LoadResult>();
    let runtime = tokio::runtime::Handle::current();

    loop {
        // Drain completed loads before drawing; when reloads overlap, the
        // latest completion wins.
        while let Ok(result) = rx.try_recv() {
            match result {
                Ok(bundle) => state.apply(DashboardEvent::BundleLoaded(bundle)),
                Err(e) => state.apply(DashboardEvent::LoadFailed(e.to_string())),
            }
        }

        terminal.draw(|frame| draw(frame, state, format_options))?;

        if state.should_quit {
            return Ok(());
        }

        if !event::poll(TICK)? {
            continue;
        }

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => state.apply(DashboardEvent::Quit),
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    state.apply(DashboardEvent::Quit)
                }
                KeyCode::Tab | KeyCode::Right => state.apply(DashboardEvent::NextTab),
                KeyCode::BackTab | KeyCode::Left => state.apply(DashboardEvent::PrevTab),
                KeyCode::Char('f') => state.apply(DashboardEvent::CycleChannel),
                KeyCode::Char('x') => state.apply(DashboardEvent::DismissNotice),
                KeyCode::Char('r') => {
                    if let Some(path) = &file
                        && !state.loading
                    {
                        state.apply(DashboardEvent::ReloadStarted);
                        let tx = tx.clone();
                        let path = path.clone();
                        runtime.spawn(async move {
                            let _ = tx.send(loader::load_bundle(&path).await);
                        });
                    }
                }
                _ => {}
            }
        }
    }
}

fn draw(frame: &mut Frame, state: &DashboardState, format_options: &NumberFormatOptions) {
    let [header, cards, tab_bar, body, footer] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(4),
        Constraint::Length(1),
        Constraint::Min(8),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    draw_header(frame, header, state);
    draw_cards(frame, cards, state, format_options);
    draw_tab_bar(frame, tab_bar, state);
    match state.tab {
        Tab::Overview => draw_overview(frame, body, state, format_options),
        Tab::Tasks => draw_tasks(frame, body, state, format_options),
        Tab::Departments => draw_departments(frame, body, state, format_options),
    }
    draw_footer(frame, footer, state);
}

fn draw_header(frame: &mut Frame, area: Rect, state: &DashboardState) {
    let mut spans = vec![
        Span::styled(
            " pulseboard ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("[{}] ", state.source.label()),
            Style::default().add_modifier(Modifier::DIM),
        ),
        Span::raw(format!("filter: {} ", state.channel.label())),
    ];

    if state.loading {
        spans.push(Span::styled("loading…", Style::default().fg(Color::Yellow)));
    } else if let Some(notice) = &state.notice {
        spans.push(Span::styled(
            format!("⚠ {notice} (x to dismiss)"),
            Style::default().fg(Color::Red),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_cards(
    frame: &mut Frame,
    area: Rect,
    state: &DashboardState,
    format_options: &NumberFormatOptions,
) {
    let bundle = &state.bundle;
    let channel = state.channel;

    let growth = metrics::period_growth_pct(bundle, channel);
    let wow = metrics::week_over_week_pct(bundle, channel);

    let cards: [(&str, String); 6] = [
        (
            "Time Saved",
            format_minutes(metrics::total_time_saved(bundle, channel), format_options),
        ),
        (
            "vs Prior Period",
            format!("{} {:+.1}%", logic::trend_arrow(growth), growth),
        ),
        (
            "Tasks Completed",
            format_number(metrics::total_tasks(bundle), format_options),
        ),
        (
            "Active Users",
            format_number(metrics::active_users(bundle), format_options),
        ),
        (
            "Utilization",
            format!("{:.1}%", metrics::utilization_rate(bundle, "used_in_work")),
        ),
        (
            "Effectiveness",
            format!("{:.0}%", metrics::aggregate_effectiveness(bundle) * 100.0),
        ),
    ];

    let areas = Layout::horizontal([Constraint::Ratio(1, 6); 6]).split(area);
    for (i, (title, value)) in cards.iter().enumerate() {
        let accent = if *title == "vs Prior Period" {
            if growth < 0.0 { Color::Red } else { Color::Green }
        } else {
            Color::Cyan
        };
        let mut lines = vec![Line::from(Span::styled(
            value.clone(),
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        ))];
        if *title == "vs Prior Period" {
            lines.push(Line::from(Span::styled(
                format!("wk {:+.1}%", wow),
                Style::default().add_modifier(Modifier::DIM),
            )));
        }
        let card =
            Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(*title));
        frame.render_widget(card, areas[i]);
    }
}

fn draw_tab_bar(frame: &mut Frame, area: Rect, state: &DashboardState) {
    let titles: Vec<&str> = Tab::ALL.iter().map(|t| t.title()).collect();
    let tabs = Tabs::new(titles)
        .select(state.tab.index())
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(tabs, area);
}

fn draw_overview(
    frame: &mut Frame,
    area: Rect,
    state: &DashboardState,
    format_options: &NumberFormatOptions,
) {
    let [chart_area, outcome_area] =
        Layout::vertical([Constraint::Min(8), Constraint::Length(6)]).areas(area);

    let data = logic::bar_data(&state.bundle.time_series, state.channel);
    let bars: Vec<(&str, u64)> = data.iter().map(|(label, v)| (label.as_str(), *v)).collect();

    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Weekly Time Saved (min) — {}", state.channel.label())),
        )
        .bar_width(7)
        .bar_gap(1)
        .bar_style(Style::default().fg(Color::Cyan))
        .value_style(Style::default().add_modifier(Modifier::BOLD))
        .data(bars.as_slice());
    frame.render_widget(chart, chart_area);

    let total: u64 = state.bundle.outcome_data.iter().map(|o| o.count).sum();
    let mut lines: Vec<Line> = state
        .bundle
        .outcome_data
        .iter()
        .map(|o| {
            let share = if total > 0 {
                o.count as f64 / total as f64 * 100.0
            } else {
                0.0
            };
            Line::from(vec![
                Span::raw(format!("{:<16}", o.outcome)),
                Span::styled(
                    format!("{:>8} ", format_number(o.count, format_options)),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("({share:.1}%)"),
                    Style::default().add_modifier(Modifier::DIM),
                ),
            ])
        })
        .collect();
    if lines.is_empty() {
        lines.push(Line::from("no outcomes recorded"));
    }
    let outcomes =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Outcomes"));
    frame.render_widget(outcomes, outcome_area);
}

fn draw_tasks(
    frame: &mut Frame,
    area: Rect,
    state: &DashboardState,
    format_options: &NumberFormatOptions,
) {
    let [task_area, mode_area] =
        Layout::vertical([Constraint::Min(6), Constraint::Length(9)]).areas(area);

    let header = Row::new(["Task", "Dept", "Count", "Avg Time", "Quality"]).style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = state
        .bundle
        .top_tasks
        .iter()
        .map(|task| {
            Row::new(vec![
                Cell::from(logic::task_title(&task.task, 32)),
                Cell::from(task.dept.clone()),
                Cell::from(format_number(task.count, format_options)),
                Cell::from(format!("{}m", task.avg_time)),
                Cell::from(format!(
                    "{} {:.0}%",
                    logic::score_bar(task.quality, 5),
                    task.quality * 100.0
                )),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Min(24),
            Constraint::Length(10),
            Constraint::Length(7),
            Constraint::Length(9),
            Constraint::Length(12),
        ],
    )
    .header(header)
    .block(Block::default().borders(Borders::ALL).title("Top Tasks"));
    frame.render_widget(table, task_area);

    let mode_rows: Vec<Row> = state
        .bundle
        .mode_dist
        .iter()
        .map(|mode| {
            Row::new(vec![
                Cell::from(mode.mode.clone()),
                Cell::from(format_number(mode.count, format_options)),
                Cell::from(format_minutes(mode.time_saved, format_options)),
            ])
        })
        .collect();

    let modes = Table::new(
        mode_rows,
        [
            Constraint::Min(14),
            Constraint::Length(8),
            Constraint::Length(10),
        ],
    )
    .header(Row::new(["Mode", "Count", "Saved"]).style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    ))
    .block(Block::default().borders(Borders::ALL).title("Assist Modes"));
    frame.render_widget(modes, mode_area);
}

fn draw_departments(
    frame: &mut Frame,
    area: Rect,
    state: &DashboardState,
    format_options: &NumberFormatOptions,
) {
    let header = Row::new(["Department", "Tasks", "Time Saved", "Users*", "Effectiveness"]).style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = state
        .bundle
        .dept_activity
        .iter()
        .map(|dept| {
            Row::new(vec![
                Cell::from(dept.dept.clone()),
                Cell::from(format_number(dept.tasks, format_options)),
                Cell::from(format_minutes(dept.time_saved, format_options)),
                Cell::from(format_number(dept.users, format_options)),
                Cell::from(format!(
                    "{} {:.0}%",
                    logic::score_bar(dept.avg_quality, 10),
                    dept.avg_quality * 100.0
                )),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Min(14),
            Constraint::Length(7),
            Constraint::Length(11),
            Constraint::Length(7),
            Constraint::Length(17),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title("Department Activity (* users are estimated, not counted)"),
    );
    frame.render_widget(table, area);
}

fn draw_footer(frame: &mut Frame, area: Rect, state: &DashboardState) {
    let mut help = String::from(" q quit · tab switch view · f filter channel");
    if state.notice.is_some() {
        help.push_str(" · x dismiss");
    }
    help.push_str(" · r reload file");
    frame.render_widget(
        Paragraph::new(help).style(Style::default().add_modifier(Modifier::DIM)),
        area,
    );
}
