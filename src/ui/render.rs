use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Clear, Paragraph, Tabs},
    Frame,
};
use rust_decimal::Decimal;

use super::app::{App, InputMode, Screen};
use super::commands;
use super::theme;
use super::util::remaining_label;

/// Key bindings shown in the help popup, two per line.
const KEYS: [(&str, &str); 12] = [
    ("j/k", "move"),
    ("1-3", "switch screen"),
    ("Tab/S-Tab", "cycle screens"),
    ("g/G", "top/bottom"),
    ("Ctrl-d/u", "half page"),
    ("Ctrl-q", "quit"),
    ("a", "add expense"),
    ("b", "set budget"),
    ("D", "delete selected"),
    ("x", "export"),
    (":", "command bar"),
    ("Esc", "clear status"),
];

pub(crate) fn render(f: &mut Frame, app: &App) {
    let [tabs, body, status, command] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(5),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(f.area());

    let selected = Screen::all().iter().position(|s| *s == app.screen);
    f.render_widget(
        Tabs::new(Screen::all().iter().enumerate().map(|(i, s)| format!("{}:{s}", i + 1)))
            .select(selected.unwrap_or(0))
            .style(theme::dim_style().bg(theme::HEADER_BG))
            .highlight_style(theme::badge_style(theme::ACCENT))
            .divider(Span::styled("|", Style::default().fg(theme::OVERLAY))),
        tabs,
    );

    match app.screen {
        Screen::Expenses => super::screens::expenses::render(f, body, app),
        Screen::Dashboard => super::screens::dashboard::render(f, body, app),
        Screen::Monthly => super::screens::monthly::render(f, body, app),
    }
    render_status_bar(f, status, app);
    render_command_bar(f, command, app);

    if app.show_help {
        render_help(f, f.area());
    }
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let mode_bg = match app.input_mode {
        InputMode::Normal => theme::ACCENT,
        InputMode::Command => theme::GREEN,
        InputMode::Confirm => theme::RED,
    };
    let info_style = match app.snapshot.remaining {
        Some(rem) if rem < Decimal::ZERO => theme::over_budget_style(),
        _ => theme::status_bar_style(),
    };
    let info = format!(
        " {} | {} | {} expenses ",
        app.screen,
        remaining_label(app.snapshot.remaining),
        app.snapshot.transaction_count
    );

    let [left, right] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(8)]).areas(area);
    let bar = Paragraph::new(Line::from(vec![
        Span::styled(format!(" {} ", app.input_mode), theme::badge_style(mode_bg)),
        Span::styled(info, info_style),
    ]))
    .style(theme::status_bar_style());
    f.render_widget(bar, left);
    f.render_widget(
        Paragraph::new(" ? help ")
            .style(theme::status_bar_style())
            .right_aligned(),
        right,
    );
}

fn render_command_bar(f: &mut Frame, area: Rect, app: &App) {
    let line = match app.input_mode {
        InputMode::Command => {
            let typed = app.command_input.chars().count() as u16;
            f.set_cursor_position((area.x + 1 + typed, area.y));
            Line::from(vec![
                Span::styled(":", Style::default().fg(theme::ACCENT)),
                Span::raw(app.command_input.as_str()),
            ])
        }
        InputMode::Confirm => Line::from(vec![
            Span::styled(app.confirm_message.as_str(), theme::section_style()),
            Span::styled(" [y/N]", Style::default().fg(theme::RED)),
        ]),
        InputMode::Normal if app.status_message.is_empty() => {
            Line::styled(" : for commands, ? for help", theme::dim_style())
        }
        InputMode::Normal => Line::raw(app.status_message.as_str()),
    };
    f.render_widget(Paragraph::new(line).style(theme::command_bar_style()), area);
}

fn render_help(f: &mut Frame, area: Rect) {
    let mut lines = vec![Line::styled(" Keys", theme::section_style())];
    for pair in KEYS.chunks(2) {
        let cells: String = pair
            .iter()
            .map(|(key, action)| format!("  {key:<10} {action:<18}"))
            .collect();
        lines.push(Line::styled(cells, theme::normal_style()));
    }

    lines.push(Line::from(""));
    lines.push(Line::styled(" Commands", theme::section_style()));
    for (name, description) in commands::help_entries() {
        lines.push(Line::styled(
            format!("  :{name:<10} {description}"),
            theme::normal_style(),
        ));
    }

    let height = (lines.len() as u16 + 2).min(area.height);
    let width = 66.min(area.width);
    let popup = Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    );
    f.render_widget(Clear, popup);
    f.render_widget(
        Paragraph::new(lines).block(
            theme::panel("Help: any key closes")
                .border_style(Style::default().fg(theme::ACCENT))
                .style(Style::default().bg(theme::HEADER_BG)),
        ),
        popup,
    );
}
