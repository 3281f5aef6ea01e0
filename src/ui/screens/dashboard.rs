use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Paragraph, Sparkline},
    Frame,
};
use rust_decimal::Decimal;

use crate::aggregate::{category_series, trend_series};
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7), // Summary cards
            Constraint::Min(10),   // Category chart
            Constraint::Length(5), // Daily trend sparkline
        ])
        .split(area);

    render_summary_cards(f, chunks[0], app);
    render_category_chart(f, chunks[1], app);
    render_trend_sparkline(f, chunks[2], app);
}

fn render_summary_cards(f: &mut Frame, area: Rect, app: &App) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    let snap = &app.snapshot;

    render_card(
        f,
        cards[0],
        "Spent This Month",
        format_amount(snap.month_spent),
        theme::RED,
        format!("{} expenses total", snap.transaction_count),
    );
    render_card(
        f,
        cards[1],
        "Budget",
        snap.budget.map_or_else(|| "not set".to_string(), format_amount),
        theme::ACCENT,
        "use :budget <amount>".to_string(),
    );
    let (remaining_text, remaining_color) = match snap.remaining {
        Some(rem) if rem < Decimal::ZERO => (format_amount(rem), theme::RED),
        Some(rem) => (format_amount(rem), theme::GREEN),
        None => ("No budget set".to_string(), theme::TEXT_DIM),
    };
    render_card(
        f,
        cards[2],
        "Remaining",
        remaining_text,
        remaining_color,
        String::new(),
    );
    let (top_name, top_total) = match &snap.highest_category {
        Some(name) => (
            name.clone(),
            snap.category_totals
                .get(name)
                .map(|t| format_amount(*t))
                .unwrap_or_default(),
        ),
        None => ("none".to_string(), String::new()),
    };
    render_card(f, cards[3], "Top Category", top_name, theme::YELLOW, top_total);
}

fn render_card(
    f: &mut Frame,
    area: Rect,
    title: &str,
    display: String,
    color: Color,
    subtitle: String,
) {
    let block = theme::panel(title);

    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            display,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(subtitle, theme::dim_style())),
    ])
    .centered()
    .block(block);

    f.render_widget(text, area);
}

fn render_category_chart(f: &mut Frame, area: Rect, app: &App) {
    let (labels, values) = category_series(&app.snapshot.category_totals);

    if labels.is_empty() {
        let msg = Paragraph::new(Line::from(Span::styled(
            "No expenses yet. Add one with :add",
            theme::dim_style(),
        )))
        .centered()
        .block(theme::panel("Spending by Category"));
        f.render_widget(msg, area);
        return;
    }

    let bars: Vec<Bar> = labels
        .iter()
        .zip(&values)
        .take(12)
        .map(|(name, value)| {
            Bar::default()
                .value((*value).max(0.0).round() as u64)
                .label(Line::from(truncate(name, 10)))
                .style(Style::default().fg(theme::ACCENT))
                .value_style(
                    Style::default()
                        .fg(theme::TEXT)
                        .add_modifier(Modifier::BOLD),
                )
        })
        .collect();

    let chart = BarChart::default()
        .block(theme::panel("Spending by Category"))
        .data(BarGroup::default().bars(&bars))
        .bar_width(10)
        .bar_gap(1)
        .bar_style(Style::default().fg(theme::ACCENT))
        .value_style(Style::default().fg(theme::TEXT));

    f.render_widget(chart, area);
}

fn render_trend_sparkline(f: &mut Frame, area: Rect, app: &App) {
    let (dates, values) = trend_series(&app.snapshot.daily_totals);
    let data: Vec<u64> = values.iter().map(|&v| v.max(0.0).round() as u64).collect();

    let title = match (dates.first(), dates.last()) {
        (Some(first), Some(last)) if first != last => format!("Daily Spending {first} to {last}"),
        (Some(only), _) => format!("Daily Spending {only}"),
        _ => "Daily Spending".to_string(),
    };

    let sparkline = Sparkline::default()
        .block(theme::panel(title))
        .data(&data)
        .style(Style::default().fg(theme::YELLOW));

    f.render_widget(sparkline, area);
}
