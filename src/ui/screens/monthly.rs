use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table},
    Frame,
};

use crate::aggregate::MonthTotals;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::format_amount;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let monthly = &app.snapshot.monthly;

    if monthly.is_empty() {
        let block = theme::panel("Monthly Breakdown");
        let msg = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("Nothing to break down yet", theme::dim_style())),
        ])
        .centered()
        .block(block);
        f.render_widget(msg, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    render_month_list(f, chunks[0], app);

    if let Some((name, totals)) = monthly.iter().nth(app.month_index) {
        render_month_detail(f, chunks[1], name, totals);
    }
}

fn render_month_list(f: &mut Frame, area: Rect, app: &App) {
    let header = Row::new(
        ["Month", "Total", "Categories"]
            .iter()
            .map(|h| Cell::from(*h).style(theme::header_style())),
    );

    let rows: Vec<Row> = app
        .snapshot
        .monthly
        .iter()
        .enumerate()
        .map(|(i, (name, totals))| {
            let style = if i == app.month_index {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };
            Row::new(vec![
                Cell::from(name),
                Cell::from(format_amount(totals.total())),
                Cell::from(totals.by_category.len().to_string()),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(10),
        Constraint::Min(14),
        Constraint::Length(10),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(theme::panel(format!("Months ({})", app.snapshot.monthly.len())));
    f.render_widget(table, area);
}

fn render_month_detail(f: &mut Frame, area: Rect, name: &str, totals: &MonthTotals) {
    let mut lines = vec![Line::from(Span::styled(" By category", theme::section_style()))];
    for (category, amount) in &totals.by_category {
        lines.push(Line::from(vec![
            Span::styled(format!("  {category:<16}"), theme::normal_style()),
            Span::styled(format_amount(*amount), theme::amount_style()),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(" By day", theme::section_style())));
    for (day, amount) in &totals.by_day {
        lines.push(Line::from(vec![
            Span::styled(format!("  {day:>2} {name:<13}"), theme::normal_style()),
            Span::styled(format_amount(*amount), theme::amount_style()),
        ]));
    }

    let detail = Paragraph::new(lines)
        .block(theme::panel(format!("{name}: {}", format_amount(totals.total()))));
    f.render_widget(detail, area);
}
