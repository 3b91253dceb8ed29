//! Full-screen rendering for the continuous mode.

use chrono::Local;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Gauge, Paragraph, Row, Table},
    Frame,
};

use crate::constants::GPU_NAME_WIDTH;
use crate::models::format_bytes;
use crate::utils::{format_limit, format_mib, format_watts, truncate_str};

use super::state::AppState;

/// Top-level render function: header, facts + usage, device table, status bar.
pub fn render(frame: &mut Frame, state: &AppState) {
    let size = frame.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header bar
            Constraint::Length(9), // System facts + usage gauges
            Constraint::Min(6),    // GPU table
            Constraint::Length(1), // Status bar
        ])
        .split(size);

    render_header(frame, main_chunks[0], state);
    render_system_row(frame, main_chunks[1], state);
    render_gpus(frame, main_chunks[2], state);
    render_status_bar(frame, main_chunks[3], state);
}

fn render_header(frame: &mut Frame, area: Rect, state: &AppState) {
    let t = &state.theme;
    let pulse = if state.tick_count % 2 == 0 { "●" } else { "○" };

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(12)])
        .split(area);

    let logo = Paragraph::new(Line::from(vec![
        Span::raw(" "),
        Span::styled(pulse, Style::default().fg(t.success)),
        Span::styled(" rigmon ", t.header_style()),
        Span::styled(
            format!("v{}", env!("CARGO_PKG_VERSION")),
            Style::default().fg(t.text_muted),
        ),
        Span::styled(format!("  {}", state.facts.hostname), t.label_style()),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(t.border_style()),
    );
    frame.render_widget(logo, chunks[0]);

    let clock = Paragraph::new(Line::from(Span::styled(
        Local::now().format("%H:%M:%S").to_string(),
        t.label_style(),
    )))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(t.border_style()),
    );
    frame.render_widget(clock, chunks[1]);
}

fn render_system_row(frame: &mut Frame, area: Rect, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    render_facts(frame, chunks[0], state);
    render_usage(frame, chunks[1], state);
}

fn render_facts(frame: &mut Frame, area: Rect, state: &AppState) {
    let t = &state.theme;
    let f = &state.facts;

    let fact = |label: &str, value: String| {
        Line::from(vec![
            Span::styled(format!(" {:<8}", label), t.label_style()),
            Span::styled(value, t.value_style()),
        ])
    };

    let cores = match f.physical_cores {
        Some(p) => format!("{} cores / {} threads", p, f.logical_cpus),
        None => format!("{} threads", f.logical_cpus),
    };

    let lines = vec![
        fact("OS", format!("{} {}", f.os_name, f.os_version)),
        fact("Kernel", f.kernel_version.clone()),
        fact("Arch", f.arch.clone()),
        fact("CPU", f.cpu_brand.clone()),
        fact("Cores", cores),
        fact("RAM", format_bytes(f.total_memory)),
    ];

    let facts = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(Span::styled(" System ", t.header_style()))
            .border_style(t.border_style()),
    );
    frame.render_widget(facts, area);
}

fn render_usage(frame: &mut Frame, area: Rect, state: &AppState) {
    let t = &state.theme;
    let u = &state.usage;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // CPU gauge
            Constraint::Length(3), // RAM gauge
            Constraint::Length(3), // Total power
        ])
        .split(area);

    let cpu = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(" CPU ", t.label_style()))
                .border_style(t.border_style()),
        )
        .gauge_style(Style::default().fg(t.usage_color(u.cpu_percent)))
        .percent(u.cpu_percent.clamp(0.0, 100.0) as u16)
        .label(format!("{:.1}%", u.cpu_percent));
    frame.render_widget(cpu, chunks[0]);

    let ram_pct = u.memory_percent();
    let ram = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(" RAM ", t.label_style()))
                .border_style(t.border_style()),
        )
        .gauge_style(Style::default().fg(t.usage_color(ram_pct)))
        .percent(ram_pct.clamp(0.0, 100.0) as u16)
        .label(format!(
            "{} / {}",
            format_bytes(u.used_memory),
            format_bytes(u.total_memory)
        ));
    frame.render_widget(ram, chunks[1]);

    let total = match &state.snapshot {
        Some(snap) => format!("{:.1} W", snap.total_power_watts),
        None => "n/a".to_string(),
    };
    let power = Paragraph::new(Line::from(Span::styled(
        total,
        Style::default()
            .fg(t.accent)
            .add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(Span::styled(" Total GPU Power ", t.label_style()))
            .border_style(t.border_style()),
    );
    frame.render_widget(power, chunks[2]);
}

fn render_gpus(frame: &mut Frame, area: Rect, state: &AppState) {
    let t = &state.theme;
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(" GPUs ", t.header_style()))
        .border_style(t.border_style());

    // Degraded mode: no driver means no table, but the rest still renders.
    if let Some(err) = &state.gpu_error {
        let msg = Paragraph::new(Line::from(Span::styled(
            format!(" {}", err),
            Style::default().fg(t.danger),
        )))
        .block(block);
        frame.render_widget(msg, area);
        return;
    }

    let Some(snap) = &state.snapshot else {
        let msg = Paragraph::new(Line::from(Span::styled(
            " Waiting for first snapshot...",
            t.label_style(),
        )))
        .block(block);
        frame.render_widget(msg, area);
        return;
    };

    let header = Row::new(vec!["#", "Name", "Memory", "Power", "Limit"])
        .style(Style::default().fg(t.accent).add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = snap
        .devices
        .iter()
        .map(|d| {
            Row::new(vec![
                Cell::from(d.index.to_string()),
                Cell::from(truncate_str(&d.name, GPU_NAME_WIDTH)),
                Cell::from(format!(
                    "{} / {}",
                    format_mib(d.memory_used_mib),
                    format_mib(d.memory_total_mib)
                ))
                .style(Style::default().fg(t.usage_color(d.memory_percent()))),
                Cell::from(format_watts(d.power_watts)),
                Cell::from(format_limit(d.power_limit_watts)),
            ])
            .style(t.value_style())
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(3),
            Constraint::Length(GPU_NAME_WIDTH as u16 + 2),
            Constraint::Length(22),
            Constraint::Length(10),
            Constraint::Length(8),
        ],
    )
    .header(header)
    .block(block);
    frame.render_widget(table, area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState) {
    let t = &state.theme;

    let badge = |key: &str| -> Span {
        Span::styled(
            format!(" {} ", key),
            Style::default()
                .fg(t.bg_dark)
                .bg(t.accent)
                .add_modifier(Modifier::BOLD),
        )
    };
    let dim =
        |text: &str| -> Span { Span::styled(text.to_string(), Style::default().fg(t.text_dim)) };

    let mut spans = vec![
        Span::raw(" "),
        badge("q"),
        dim(" Quit  "),
        badge("c"),
        dim(" Configure GPUs  "),
    ];

    if let Some(status) = state.status_line() {
        spans.push(Span::styled(
            format!("  {}", status),
            Style::default().fg(t.warning),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
