use crate::analysis::{SPEND_CEILING, UTILIZATION_FLOOR};
use crate::api::BackendClient;
use crate::chat::{ChatContext, ChatTransport};
use crate::config::AppConfig;
use crate::error::AppError;
use crate::markdown::{self, Block, Inline};
use crate::models::{ChatRole, ServicePoint, Snapshot};
use crate::service::DashboardService;
use crate::ui::app::{AppState, Focus, Screen};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block as Panel, Borders, Cell, Clear, Gauge, Paragraph, Row, Sparkline, Table, Wrap};
use ratatui::Terminal;
use std::io;
use std::time::{Duration as StdDuration, Instant};
use tokio::task::JoinHandle;

const COLOR_ACCENT: Color = Color::Cyan;
const COLOR_INFO: Color = Color::Green;
const COLOR_ALERT: Color = Color::Red;
const COLOR_MUTED: Color = Color::DarkGray;
const COLOR_HEADER: Color = Color::White;

type RefreshJob = JoinHandle<Result<Snapshot, AppError>>;
type ChatJob = JoinHandle<Result<String, AppError>>;

pub async fn run_tui() -> Result<(), AppError> {
    let cfg = crate::config::load_config()?;
    let service = DashboardService::new(&cfg)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let loop_result = run_loop(&mut terminal, &cfg, &service).await;

    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    loop_result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    cfg: &AppConfig,
    service: &DashboardService,
) -> Result<(), AppError> {
    let mut state = AppState::default();
    let mut refresh_job: Option<RefreshJob> = None;
    let mut chat_job: Option<ChatJob> = None;
    let mut last_tick = Instant::now();
    let tick_rate = StdDuration::from_secs(cfg.refresh_seconds.max(10));

    start_refresh(&mut state, service, &mut refresh_job);

    while state.running {
        if refresh_job.as_ref().is_some_and(|job| job.is_finished()) {
            finish_refresh(&mut state, &mut refresh_job).await;
            last_tick = Instant::now();
        }
        if chat_job.as_ref().is_some_and(|job| job.is_finished()) {
            finish_chat(&mut state, &mut chat_job).await;
        }

        terminal.draw(|f| render(f, &state))?;

        if event::poll(StdDuration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                handle_key(
                    key.code,
                    key.modifiers,
                    &mut state,
                    service,
                    &mut refresh_job,
                    &mut chat_job,
                );
            }
        }

        if state.screen == Screen::Dashboard
            && refresh_job.is_none()
            && last_tick.elapsed() >= tick_rate
        {
            start_refresh(&mut state, service, &mut refresh_job);
            last_tick = Instant::now();
        }
    }

    // In-flight requests die with the loop; nothing updates torn-down state.
    if let Some(job) = refresh_job.take() {
        job.abort();
    }
    if let Some(job) = chat_job.take() {
        job.abort();
    }

    Ok(())
}

fn start_refresh(state: &mut AppState, service: &DashboardService, slot: &mut Option<RefreshJob>) {
    if slot.is_some() {
        return;
    }
    state.refreshing = true;
    state.status = "refreshing...".into();
    let service = service.clone();
    *slot = Some(tokio::spawn(async move { service.fetch_all().await }));
}

async fn finish_refresh(state: &mut AppState, slot: &mut Option<RefreshJob>) {
    let Some(job) = slot.take() else {
        return;
    };
    // The previous snapshot stays on screen on any failure.
    match job.await {
        Ok(Ok(snapshot)) => {
            state.apply_snapshot(snapshot);
            state.status = "ok".into();
            if state.alert.is_some() && state.screen == Screen::Dashboard {
                state.screen = Screen::Alert;
            }
        }
        Ok(Err(err)) => {
            state.status = format!("refresh failed: {err}");
        }
        Err(err) => {
            state.status = format!("refresh task failed: {err}");
        }
    }
    state.refreshing = false;
}

fn start_chat(state: &mut AppState, service: &DashboardService, slot: &mut Option<ChatJob>) {
    if slot.is_some() || state.chat.is_awaiting() {
        state.status = "an answer is still in flight".into();
        return;
    }

    let ctx = ChatContext {
        cost_data: &state.snapshot.cost,
        aws_service_data: &state.snapshot.services,
        api_usage: &state.snapshot.usage,
    };
    let Some(payload) = state.chat.begin_submit(&state.chat_input, &ctx) else {
        state.chat_input.clear();
        return;
    };

    state.chat_input.clear();
    state.chat_scroll = 0;
    state.status = "asking the analysis service...".into();
    let client: BackendClient = service.client().clone();
    *slot = Some(tokio::spawn(async move { client.send(&payload).await }));
}

async fn finish_chat(state: &mut AppState, slot: &mut Option<ChatJob>) {
    let Some(job) = slot.take() else {
        return;
    };
    match job.await {
        Ok(Ok(reply)) => {
            state.chat.complete(reply);
            state.status = "ok".into();
        }
        Ok(Err(err)) => {
            state.chat.fail();
            state.status = format!("chat failed: {err}");
        }
        Err(err) => {
            state.chat.fail();
            state.status = format!("chat task failed: {err}");
        }
    }
}

fn handle_key(
    code: KeyCode,
    modifiers: KeyModifiers,
    state: &mut AppState,
    service: &DashboardService,
    refresh_job: &mut Option<RefreshJob>,
    chat_job: &mut Option<ChatJob>,
) {
    if modifiers.contains(KeyModifiers::CONTROL) && code == KeyCode::Char('c') {
        state.screen = Screen::ConfirmQuit;
        state.confirm_selected = 0;
        return;
    }

    match state.screen {
        Screen::ConfirmQuit => match code {
            KeyCode::Esc => state.screen = Screen::Dashboard,
            KeyCode::Left => {
                if state.confirm_selected > 0 {
                    state.confirm_selected -= 1;
                }
            }
            KeyCode::Right => {
                if state.confirm_selected < 1 {
                    state.confirm_selected += 1;
                }
            }
            KeyCode::Enter => {
                if state.confirm_selected == 1 {
                    state.running = false;
                } else {
                    state.screen = Screen::Dashboard;
                }
            }
            _ => {}
        },
        Screen::Alert => {
            if matches!(code, KeyCode::Enter | KeyCode::Esc) {
                state.screen = Screen::Dashboard;
            }
        }
        Screen::Dashboard => match state.focus {
            Focus::Dashboard => match code {
                KeyCode::Tab => state.focus = Focus::Chat,
                KeyCode::Char('q') => {
                    state.screen = Screen::ConfirmQuit;
                    state.confirm_selected = 0;
                }
                KeyCode::Char('r') => start_refresh(state, service, refresh_job),
                KeyCode::Char('z') => {
                    state.compact_mode = !state.compact_mode;
                }
                _ => {}
            },
            Focus::Chat => match code {
                KeyCode::Tab | KeyCode::Esc => state.focus = Focus::Dashboard,
                KeyCode::Enter => start_chat(state, service, chat_job),
                KeyCode::Backspace => {
                    state.chat_input.pop();
                }
                KeyCode::Up => state.chat_scroll = state.chat_scroll.saturating_add(1),
                KeyCode::Down => state.chat_scroll = state.chat_scroll.saturating_sub(1),
                KeyCode::Char(c) => state.chat_input.push(c),
                _ => {}
            },
        },
    }
}

fn render(f: &mut ratatui::Frame, state: &AppState) {
    let size = f.area();
    let compact = state.compact_mode || size.width < 120;

    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Min(10),
            Constraint::Length(2),
        ])
        .split(size);

    let spinner = if state.refreshing { "  ·  loading" } else { "" };
    let header = Paragraph::new(format!(
        " cloudlens  ·  {}  ·  last refresh {}{spinner} ",
        state.status, state.last_refresh
    ))
    .block(
        Panel::default()
            .borders(Borders::ALL)
            .title(" Cloud Cost & Utilization "),
    )
    .style(Style::default().fg(COLOR_HEADER));
    f.render_widget(header, root[0]);

    render_kpis(f, root[1], state);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(if compact {
            [
                Constraint::Percentage(36),
                Constraint::Percentage(30),
                Constraint::Percentage(34),
            ]
        } else {
            [
                Constraint::Percentage(40),
                Constraint::Percentage(28),
                Constraint::Percentage(32),
            ]
        })
        .split(root[2]);

    render_trends(f, body[0], state);
    render_tables(f, body[1], state, compact);
    render_chat(f, body[2], state);

    let footer = Paragraph::new(footer_text(state))
        .block(Panel::default().borders(Borders::ALL))
        .style(Style::default().fg(COLOR_MUTED));
    f.render_widget(footer, root[3]);

    match state.screen {
        Screen::Dashboard => {}
        Screen::ConfirmQuit => render_confirm(f, state),
        Screen::Alert => render_alert(f, state),
    }
}

fn render_kpis(f: &mut ratatui::Frame, area: Rect, state: &AppState) {
    let kpis = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    let total = Paragraph::new(format!("${:.2}", state.summary.total_cost))
        .block(Panel::default().borders(Borders::ALL).title(" Total Cost "))
        .style(
            Style::default()
                .fg(COLOR_ACCENT)
                .add_modifier(Modifier::BOLD),
        );
    f.render_widget(total, kpis[0]);

    let utilization = Paragraph::new(format!("{:.1}%", state.summary.avg_utilization))
        .block(
            Panel::default()
                .borders(Borders::ALL)
                .title(" Avg Utilization "),
        )
        .style(Style::default().fg(COLOR_INFO).add_modifier(Modifier::BOLD));
    f.render_widget(utilization, kpis[1]);

    let (provider, amount) = &state.summary.dominant_provider;
    let dominant = Paragraph::new(format!("{provider} (${amount:.2})"))
        .block(
            Panel::default()
                .borders(Borders::ALL)
                .title(" Top Provider "),
        )
        .style(
            Style::default()
                .fg(COLOR_HEADER)
                .add_modifier(Modifier::BOLD),
        );
    f.render_widget(dominant, kpis[2]);

    let anomaly_count = state.summary.anomalies.len();
    let anomaly_style = if anomaly_count > 0 {
        Style::default().fg(COLOR_ALERT).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(COLOR_INFO)
    };
    let anomalies = Paragraph::new(format!("{anomaly_count} flagged"))
        .block(Panel::default().borders(Borders::ALL).title(" Anomalies "))
        .style(anomaly_style);
    f.render_widget(anomalies, kpis[3]);
}

fn render_trends(f: &mut ratatui::Frame, area: Rect, state: &AppState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(4),
            Constraint::Length(3),
            Constraint::Length(6),
            Constraint::Min(4),
        ])
        .split(area);

    let cost_series: Vec<u64> = state
        .snapshot
        .cost
        .iter()
        .map(|p| (p.aws + p.gcp + p.azure).max(0.0) as u64)
        .collect();
    let cost_spark = Sparkline::default()
        .data(&cost_series)
        .style(Style::default().fg(COLOR_ACCENT))
        .block(
            Panel::default()
                .borders(Borders::ALL)
                .title(" Cost vs Utilization "),
        );
    f.render_widget(cost_spark, rows[0]);

    let ratio = (state.summary.avg_utilization / 100.0).clamp(0.0, 1.0);
    let gauge_color = if state.summary.avg_utilization < UTILIZATION_FLOOR {
        COLOR_ALERT
    } else {
        COLOR_INFO
    };
    let gauge = Gauge::default()
        .block(Panel::default().borders(Borders::ALL).title(" Utilization "))
        .gauge_style(Style::default().fg(gauge_color))
        .label(format!("{:.1}%", state.summary.avg_utilization))
        .ratio(ratio);
    f.render_widget(gauge, rows[1]);

    f.render_widget(analysis_panel(state), rows[2]);

    let forecast_series: Vec<u64> = state
        .snapshot
        .forecast
        .iter()
        .map(|p| (p.aws + p.gcp + p.azure).max(0.0) as u64)
        .collect();
    let forecast_spark = Sparkline::default()
        .data(&forecast_series)
        .style(Style::default().fg(COLOR_INFO))
        .block(
            Panel::default()
                .borders(Borders::ALL)
                .title(" Cost Forecast (Next 7 Days) "),
        );
    f.render_widget(forecast_spark, rows[3]);
}

fn analysis_panel(state: &AppState) -> Paragraph<'static> {
    let summary = &state.summary;
    let mut lines = vec![
        Line::from(format!("Total cloud costs: ${:.2}", summary.total_cost)),
        Line::from(format!(
            "Average utilization: {:.1}%",
            summary.avg_utilization
        )),
        Line::from(format!(
            "Highest cost provider: {} (${:.2})",
            summary.dominant_provider.0, summary.dominant_provider.1
        )),
    ];

    if let Some(alert) = &state.alert {
        lines.push(Line::from(Span::styled(
            alert.clone(),
            Style::default().fg(COLOR_ALERT).add_modifier(Modifier::BOLD),
        )));
    } else if !summary.anomalies.is_empty() {
        lines.push(Line::from(Span::styled(
            format!(
                "{} points over ${SPEND_CEILING:.0} below {UTILIZATION_FLOOR:.0}% utilization",
                summary.anomalies.len()
            ),
            Style::default().fg(COLOR_ALERT),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            "No cost anomalies in the current window".to_string(),
            Style::default().fg(COLOR_MUTED),
        )));
    }

    Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Panel::default().borders(Borders::ALL).title(" Analysis "))
}

fn service_totals(points: &[ServicePoint]) -> [(&'static str, f64); 4] {
    [
        ("EC2", points.iter().map(|p| p.ec2).sum()),
        ("S3", points.iter().map(|p| p.s3).sum()),
        ("Lambda", points.iter().map(|p| p.lambda).sum()),
        ("RDS", points.iter().map(|p| p.rds).sum()),
    ]
}

fn render_tables(f: &mut ratatui::Frame, area: Rect, state: &AppState, compact: bool) {
    let rows_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(8), Constraint::Min(6)])
        .split(area);

    let service_rows = service_totals(&state.snapshot.services)
        .into_iter()
        .map(|(name, cost)| {
            Row::new(vec![
                Cell::from(name),
                Cell::from(format!("${:.2}", cost)),
            ])
        })
        .collect::<Vec<_>>();
    let service_table = Table::new(
        service_rows,
        [Constraint::Percentage(60), Constraint::Percentage(40)],
    )
    .header(
        Row::new(vec!["Service", "Cost"]).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
    )
    .block(Panel::default().borders(Borders::ALL).title(if compact {
        " AWS "
    } else {
        " AWS Services Cost Breakdown "
    }));
    f.render_widget(service_table, rows_layout[0]);

    let usage_rows = state
        .snapshot
        .usage
        .iter()
        .map(|row| {
            Row::new(vec![
                Cell::from(row.team.clone()),
                Cell::from(row.endpoint.clone()),
                Cell::from(row.calls.to_string()),
                Cell::from(format!("{:.0}", row.latency)),
                Cell::from(format!("${:.2}", row.cost)),
            ])
        })
        .collect::<Vec<_>>();
    let usage_table = Table::new(
        usage_rows,
        [
            Constraint::Percentage(18),
            Constraint::Percentage(34),
            Constraint::Percentage(14),
            Constraint::Percentage(16),
            Constraint::Percentage(18),
        ],
    )
    .header(
        Row::new(vec!["Team", "Endpoint", "Calls", "Latency", "Cost"]).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
    )
    .block(Panel::default().borders(Borders::ALL).title(if compact {
        " Usage "
    } else {
        " API Usage & Optimization "
    }));
    f.render_widget(usage_table, rows_layout[1]);
}

fn render_chat(f: &mut ratatui::Frame, area: Rect, state: &AppState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(4), Constraint::Length(3)])
        .split(area);

    let mut lines: Vec<Line<'static>> = Vec::new();
    for message in state.chat.messages() {
        let (label, color) = match message.role {
            ChatRole::User => ("You", COLOR_ACCENT),
            ChatRole::Assistant => ("Assistant", COLOR_INFO),
        };
        lines.push(Line::from(Span::styled(
            format!("{label}:"),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )));
        lines.extend(markdown_lines(&message.content));
        lines.push(Line::from(""));
    }
    if state.chat.is_awaiting() {
        lines.push(Line::from(Span::styled(
            "Analyzing cloud data to answer your query...",
            Style::default().fg(COLOR_MUTED),
        )));
    }

    // Stick to the transcript tail unless the user scrolled up.
    let visible = rows[0].height.saturating_sub(2) as usize;
    let offset = lines
        .len()
        .saturating_sub(visible)
        .saturating_sub(state.chat_scroll);

    let title = if state.chat.is_awaiting() {
        " AI Cost Analysis Assistant (thinking...) "
    } else {
        " AI Cost Analysis Assistant "
    };
    let transcript = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((offset as u16, 0))
        .block(Panel::default().borders(Borders::ALL).title(title));
    f.render_widget(transcript, rows[0]);

    let input_style = if state.focus == Focus::Chat {
        Style::default().fg(COLOR_ACCENT)
    } else {
        Style::default().fg(COLOR_MUTED)
    };
    let prompt = if state.chat_input.is_empty() && state.focus != Focus::Chat {
        "Ask about cloud costs...".to_string()
    } else {
        format!("{}_", state.chat_input)
    };
    let input = Paragraph::new(prompt)
        .style(input_style)
        .block(Panel::default().borders(Borders::ALL).title(" Question "));
    f.render_widget(input, rows[1]);
}

/// Project parsed markdown to styled terminal lines. Shares the parser with
/// the HTML renderer so both outputs agree on structure.
pub fn markdown_lines(content: &str) -> Vec<Line<'static>> {
    let blocks = markdown::parse(content);
    let mut lines = Vec::new();
    let mut ordinal = 0usize;

    for block in &blocks {
        if !matches!(block, Block::ListItem { ordered: true, .. }) {
            ordinal = 0;
        }
        match block {
            Block::Heading { content, .. } => {
                let mut spans = Vec::new();
                push_spans(
                    content,
                    Style::default()
                        .fg(COLOR_ACCENT)
                        .add_modifier(Modifier::BOLD),
                    &mut spans,
                );
                lines.push(Line::from(spans));
            }
            Block::ListItem { ordered, content } => {
                let marker = if *ordered {
                    ordinal += 1;
                    format!("{ordinal}. ")
                } else {
                    "• ".to_string()
                };
                let mut spans = vec![Span::raw(marker)];
                push_spans(content, Style::default(), &mut spans);
                lines.push(Line::from(spans));
            }
            Block::MathBlock(expr) => {
                for raw in expr.split('\n') {
                    lines.push(Line::from(Span::styled(
                        raw.to_string(),
                        Style::default().fg(COLOR_MUTED).add_modifier(Modifier::ITALIC),
                    )));
                }
            }
            Block::Paragraph(content) => {
                let mut spans = Vec::new();
                push_spans(content, Style::default(), &mut spans);
                lines.push(Line::from(spans));
            }
        }
    }

    lines
}

fn push_spans(inlines: &[Inline], base: Style, out: &mut Vec<Span<'static>>) {
    for inline in inlines {
        match inline {
            Inline::Text(text) => out.push(Span::styled(text.clone(), base)),
            Inline::Strong(inner) => push_spans(inner, base.add_modifier(Modifier::BOLD), out),
            Inline::Em(inner) => push_spans(inner, base.add_modifier(Modifier::ITALIC), out),
            Inline::Code(code) => out.push(Span::styled(
                code.clone(),
                base.fg(Color::Yellow),
            )),
            Inline::Math(expr) => out.push(Span::styled(
                format!("\\({expr}\\)"),
                base.fg(COLOR_MUTED).add_modifier(Modifier::ITALIC),
            )),
        }
    }
}

fn footer_text(state: &AppState) -> &'static str {
    match state.screen {
        Screen::Dashboard => match state.focus {
            Focus::Dashboard => "Tab chat | r refresh | z compact | q quit",
            Focus::Chat => "type question | Enter send | Up/Down scroll | Tab/Esc back",
        },
        Screen::ConfirmQuit => "Left/Right choose | Enter confirm | Esc cancel",
        Screen::Alert => "Enter/Esc dismiss",
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

fn render_confirm(f: &mut ratatui::Frame, state: &AppState) {
    let area = centered_rect(56, 34, f.area());
    f.render_widget(Clear, area);

    let cancel_style = if state.confirm_selected == 0 {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let confirm_style = if state.confirm_selected == 1 {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Red)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let content = Paragraph::new(vec![
        Line::from("Do you want to exit cloudlens?"),
        Line::from(Span::styled(
            "In-flight requests are cancelled on exit.",
            Style::default().fg(COLOR_MUTED),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("[Cancel (Esc)]", cancel_style),
            Span::raw("   "),
            Span::styled("[Confirm (Enter)]", confirm_style),
        ]),
        Line::from("Use Left/Right to choose"),
    ])
    .block(
        Panel::default()
            .borders(Borders::ALL)
            .title(" Confirm Quit "),
    )
    .alignment(Alignment::Center);

    f.render_widget(content, area);
}

fn render_alert(f: &mut ratatui::Frame, state: &AppState) {
    let area = centered_rect(60, 30, f.area());
    f.render_widget(Clear, area);
    let detail = state
        .alert
        .clone()
        .unwrap_or_else(|| "High costs with low utilization detected.".into());
    let content = Paragraph::new(vec![
        Line::from("Cost anomaly detected: high costs with low utilization!"),
        Line::from(Span::styled(detail, Style::default().fg(COLOR_MUTED))),
        Line::from(""),
        Line::from("Press Enter or Esc"),
    ])
    .wrap(Wrap { trim: true })
    .block(
        Panel::default()
            .borders(Borders::ALL)
            .title(" Cost Anomaly "),
    )
    .style(Style::default().fg(Color::Red));
    f.render_widget(content, area);
}
