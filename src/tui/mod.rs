// TUI module for rendering the terminal interface
pub mod colors;
pub mod helpers;
pub mod input;

// Re-exports
pub use colors::*;
pub use helpers::{calculate_progress, card_shift};
pub use input::{handle_key_event, KeyAction};

use crate::domain::{Candidate, DecisionStatistics, Directive, SwipeEngine, SwipeIndicator};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Gauge, Paragraph, Wrap},
    Frame,
};

/// Card width the tilt readout is computed against
const CARD_REFERENCE_WIDTH: f64 = 360.0;

/// UI view state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    /// Main card stack view
    Browsing,
    /// Help overlay visible
    Help,
    /// Summary screen before exit
    Summary,
    /// Welcome screen shown on first launch
    Welcome,
}

/// Renders the card stack with header and footer
pub fn render(frame: &mut Frame, engine: &SwipeEngine) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Header with progress
            Constraint::Min(0),    // Card stack
            Constraint::Length(3), // Footer
        ])
        .split(frame.area());

    render_header(frame, chunks[0], engine);
    render_stack(frame, chunks[1], engine);
    render_footer(frame, chunks[2], engine);
}

fn render_header(frame: &mut Frame, area: Rect, engine: &SwipeEngine) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Length(2)])
        .split(area);

    let stats = engine.statistics();
    let title = format!(" Veer · {} in stack ", engine.candidates().len());
    let info = match engine.top() {
        Some(top) => vec![
            Span::styled(
                top.name.clone(),
                Style::default()
                    .fg(TEXT_PRIMARY)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(top.tagline.clone(), Style::default().fg(TEXT_SECONDARY)),
        ],
        None => vec![Span::styled(
            "Nobody left to review",
            Style::default().fg(TEXT_SECONDARY),
        )],
    };

    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            title,
            Style::default()
                .fg(ACCENT_HIGHLIGHT)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(info),
    ])
    .block(
        Block::default()
            .borders(Borders::TOP | Borders::LEFT | Borders::RIGHT)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(BORDER_COLOR)),
    );
    frame.render_widget(header, chunks[0]);

    let progress = calculate_progress(stats.decided(), stats.total_candidates);
    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::BOTTOM | Borders::LEFT | Borders::RIGHT)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(BORDER_COLOR)),
        )
        .gauge_style(Style::default().fg(ACCENT_SECONDARY).bg(BG_DARK))
        .ratio(progress)
        .label(format!(
            "{}% ({}/{})",
            (progress * 100.0) as u16,
            stats.decided(),
            stats.total_candidates
        ));
    frame.render_widget(gauge, chunks[1]);
}

/// Renders the top card, shifted horizontally by its live displacement
fn render_stack(frame: &mut Frame, area: Rect, engine: &SwipeEngine) {
    let Some(top) = engine.top() else {
        frame.render_widget(render_empty_state_widget(), area);
        return;
    };

    let frame_block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(BORDER_COLOR));
    let inner = frame_block.inner(area);
    frame.render_widget(frame_block, area);

    let card_width = (inner.width * 3 / 5).max(20).min(inner.width);
    let free = inner.width - card_width;
    let shift = card_shift(
        engine.displacement().x,
        engine.classifier().exit_displacement(),
        free / 2,
    );
    let left = (inner.x as i32 + (free / 2) as i32 + shift)
        .clamp(inner.x as i32, (inner.x + free) as i32) as u16;
    let card_area = Rect {
        x: left,
        y: inner.y,
        width: card_width,
        height: inner.height,
    };

    let indicator = engine
        .session()
        .map(|s| s.indicator())
        .unwrap_or(SwipeIndicator::None);
    let border = match indicator {
        SwipeIndicator::Like => ACCENT_SECONDARY,
        SwipeIndicator::Nope => ACCENT_PRIMARY,
        SwipeIndicator::None => TEXT_SECONDARY,
    };

    let mut lines = vec![stamp_line(indicator), Line::from("")];
    lines.extend(card_lines(top));

    if let Some(session) = engine.session() {
        let displacement = session.displacement();
        if displacement.x != 0.0 {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!(
                    "offset {:+.0} · tilt {:+.1}°",
                    displacement.x,
                    session.rotation_degrees(CARD_REFERENCE_WIDTH)
                ),
                Style::default().fg(TEXT_SECONDARY),
            )));
        }
    }

    let candidates = engine.candidates();
    if candidates.len() >= 2 {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("Next up: {}", candidates[candidates.len() - 2].name),
            Style::default()
                .fg(TEXT_SECONDARY)
                .add_modifier(Modifier::ITALIC),
        )));
    }

    frame.render_widget(Clear, card_area);
    let card = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(border))
                .title(format!(" {} ", top.name)),
        )
        .alignment(Alignment::Center)
        .style(Style::default().fg(TEXT_PRIMARY))
        .wrap(Wrap { trim: true });
    frame.render_widget(card, card_area);
}

fn stamp_line(indicator: SwipeIndicator) -> Line<'static> {
    let stamp = |text: &'static str, color: Color| {
        Span::styled(
            format!(" {} ", text),
            Style::default()
                .fg(color)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED),
        )
    };

    match indicator {
        SwipeIndicator::Like => Line::from(stamp("LIKE", ACCENT_SECONDARY)).alignment(Alignment::Left),
        SwipeIndicator::Nope => Line::from(stamp("NOPE", ACCENT_PRIMARY)).alignment(Alignment::Right),
        SwipeIndicator::None => Line::from(""),
    }
}

fn card_lines(candidate: &Candidate) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(
            candidate.name.clone(),
            Style::default()
                .fg(TEXT_PRIMARY)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            candidate.tagline.clone(),
            Style::default().fg(TEXT_SECONDARY),
        )),
    ];

    if !candidate.tags.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            candidate.tags.join(" · "),
            Style::default().fg(ACCENT_HIGHLIGHT),
        )));
    }

    for detail in [&candidate.location, &candidate.website].into_iter().flatten() {
        lines.push(Line::from(Span::styled(
            detail.clone(),
            Style::default().fg(TEXT_SECONDARY),
        )));
    }

    lines
}

/// Creates the widget shown once every card has been decided
fn render_empty_state_widget() -> Paragraph<'static> {
    let lines = vec![
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            "No more candidates",
            Style::default()
                .fg(ACCENT_HIGHLIGHT)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "You've been through the whole stack.",
            Style::default().fg(TEXT_SECONDARY),
        )),
        Line::from(""),
        Line::from(vec![
            Span::raw("Press "),
            Span::styled("r", Style::default().fg(ACCENT_RELOAD)),
            Span::raw(" to start over."),
        ]),
    ];

    Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(BORDER_COLOR)),
        )
        .alignment(Alignment::Center)
}

/// Renders the footer; swipe controls are dimmed when the stack is empty
fn render_footer(frame: &mut Frame, area: Rect, engine: &SwipeEngine) {
    let control = |directive: Directive, color: Color| {
        if engine.is_enabled(directive) {
            color
        } else {
            TEXT_DISABLED
        }
    };

    let controls = Line::from(vec![
        Span::styled(
            " ← ",
            Style::default()
                .fg(control(Directive::ForceReject, ACCENT_PRIMARY))
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("Pass", Style::default().fg(TEXT_SECONDARY)),
        Span::raw("  │  "),
        Span::styled(
            "→ ",
            Style::default()
                .fg(control(Directive::ForceAccept, ACCENT_SECONDARY))
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("Like", Style::default().fg(TEXT_SECONDARY)),
        Span::raw("  │  "),
        Span::styled("a/d ", Style::default().fg(TEXT_SECONDARY)),
        Span::styled("Drag", Style::default().fg(TEXT_SECONDARY)),
        Span::raw("  │  "),
        Span::styled(
            "r ",
            Style::default().fg(control(Directive::Reload, ACCENT_RELOAD)),
        ),
        Span::styled("Reload", Style::default().fg(TEXT_SECONDARY)),
        Span::raw("  │  "),
        Span::styled("? ", Style::default().fg(TEXT_SECONDARY)),
        Span::styled("Help", Style::default().fg(TEXT_SECONDARY)),
        Span::raw("  │  "),
        Span::styled("q ", Style::default().fg(TEXT_SECONDARY)),
        Span::styled("Quit", Style::default().fg(TEXT_SECONDARY)),
    ]);

    let footer = Paragraph::new(controls)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(BORDER_COLOR)),
        )
        .alignment(Alignment::Center);

    frame.render_widget(footer, area);
}

/// Renders the summary screen shown before exit
pub fn render_summary(frame: &mut Frame, stats: &DecisionStatistics, matches: &[&str]) {
    let summary_area = centered_rect(60, 60, frame.area());
    frame.render_widget(Clear, summary_area);

    let block = Block::default()
        .title(" Session Complete ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(ACCENT_HIGHLIGHT))
        .style(Style::default().bg(BG_DARK));

    let inner = block.inner(summary_area);
    frame.render_widget(block, summary_area);

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Summary",
            Style::default()
                .fg(TEXT_PRIMARY)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::raw("   Candidates: "),
            Span::styled(
                format!("{}", stats.total_candidates),
                Style::default()
                    .fg(ACCENT_HIGHLIGHT)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("   ✓ ", Style::default().fg(ACCENT_SECONDARY)),
            Span::raw("Liked:    "),
            Span::styled(
                format!("{}", stats.accepted),
                Style::default()
                    .fg(ACCENT_SECONDARY)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("   ✗ ", Style::default().fg(ACCENT_PRIMARY)),
            Span::raw("Passed:   "),
            Span::styled(
                format!("{}", stats.rejected),
                Style::default()
                    .fg(ACCENT_PRIMARY)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("   ○ ", Style::default().fg(TEXT_SECONDARY)),
            Span::raw("Skipped:  "),
            Span::styled(
                format!("{}", stats.remaining()),
                Style::default().fg(TEXT_SECONDARY),
            ),
        ]),
    ];

    if !matches.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Matches",
            Style::default()
                .fg(ACCENT_SECONDARY)
                .add_modifier(Modifier::BOLD),
        )));
        for name in matches {
            lines.push(Line::from(name.to_string()));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Press any key to exit",
        Style::default().fg(TEXT_SECONDARY),
    )));

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .style(Style::default().fg(TEXT_PRIMARY));

    frame.render_widget(paragraph, inner);
}

/// Renders the help overlay
pub fn render_help_overlay(frame: &mut Frame) {
    let help_area = centered_rect(50, 70, frame.area());
    frame.render_widget(Clear, help_area);

    let block = Block::default()
        .title(" Help ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(ACCENT_HIGHLIGHT))
        .style(Style::default().bg(BG_DARK));

    let inner = block.inner(help_area);
    frame.render_widget(block, help_area);

    let key = |text: &'static str, color: Color| Span::styled(text, Style::default().fg(color));
    let help_lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Keyboard Shortcuts",
            Style::default()
                .fg(ACCENT_HIGHLIGHT)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            key("  → ", ACCENT_SECONDARY),
            Span::raw("or "),
            key("l", ACCENT_SECONDARY),
            Span::raw("     Like"),
        ]),
        Line::from(vec![
            key("  ← ", ACCENT_PRIMARY),
            Span::raw("or "),
            key("h", ACCENT_PRIMARY),
            Span::raw("     Pass"),
        ]),
        Line::from(""),
        Line::from(vec![
            key("  a / d ", TEXT_SECONDARY),
            Span::raw("    Drag card"),
        ]),
        Line::from(vec![
            key("  space ", TEXT_SECONDARY),
            Span::raw("    Let go"),
        ]),
        Line::from(""),
        Line::from(vec![
            key("  r ", ACCENT_RELOAD),
            Span::raw("          Reload stack"),
        ]),
        Line::from(vec![
            key("  q ", TEXT_SECONDARY),
            Span::raw("or "),
            key("Esc", TEXT_SECONDARY),
            Span::raw("     Quit"),
        ]),
        Line::from(vec![
            key("  ?", TEXT_SECONDARY),
            Span::raw("           Toggle help"),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Press ? or Esc to close",
            Style::default().fg(TEXT_SECONDARY),
        )),
    ];

    let paragraph = Paragraph::new(help_lines)
        .alignment(Alignment::Center)
        .style(Style::default().fg(TEXT_PRIMARY));

    frame.render_widget(paragraph, inner);
}

/// Renders the welcome dialog overlay
pub fn render_welcome_overlay(frame: &mut Frame, threshold: f64) {
    let area = centered_rect(80, 70, frame.area());
    frame.render_widget(Clear, area);

    let heading = |text: &'static str| {
        Line::from(Span::styled(
            text,
            Style::default()
                .fg(ACCENT_HIGHLIGHT)
                .add_modifier(Modifier::BOLD),
        ))
    };

    let welcome_lines = vec![
        Line::from(""),
        heading("Welcome to veer!"),
        Line::from(""),
        Line::from("Review people one card at a time: like the ones you want to meet,"),
        Line::from("pass on the rest."),
        Line::from(""),
        heading("Two ways to decide:"),
        Line::from(""),
        Line::from(vec![
            Span::styled("  1. ", Style::default().fg(TEXT_SECONDARY)),
            Span::raw("Drag with "),
            Span::styled("a", Style::default().fg(ACCENT_PRIMARY)),
            Span::raw(" / "),
            Span::styled("d", Style::default().fg(ACCENT_SECONDARY)),
            Span::raw(format!(
                " and let go with space. Past {:.0} the card leaves,",
                threshold
            )),
        ]),
        Line::from("     anything shorter springs back."),
        Line::from(vec![
            Span::styled("  2. ", Style::default().fg(TEXT_SECONDARY)),
            Span::raw("Press "),
            Span::styled("→", Style::default().fg(ACCENT_SECONDARY)),
            Span::raw(" to like or "),
            Span::styled("←", Style::default().fg(ACCENT_PRIMARY)),
            Span::raw(" to pass right away."),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::raw("Press "),
            Span::styled("r", Style::default().fg(ACCENT_RELOAD)),
            Span::raw(" any time to bring everyone back."),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Press any key to start...",
            Style::default()
                .fg(ACCENT_HIGHLIGHT)
                .add_modifier(Modifier::BOLD),
        )),
    ];

    let welcome = Paragraph::new(welcome_lines)
        .block(
            Block::default()
                .title(" Welcome ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(ACCENT_HIGHLIGHT))
                .style(Style::default().bg(BG_DARK)),
        )
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: false });

    frame.render_widget(welcome, area);
}

/// Helper to create a centered rect
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
