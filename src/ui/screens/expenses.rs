use ratatui::{
    layout::{Constraint, Rect},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table},
    Frame,
};

use crate::ledger::high_value_flag;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_stored_amount, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let expenses = &app.snapshot.expenses;

    if expenses.is_empty() {
        let msg = vec![
            Line::from(""),
            Line::from(Span::styled("No expenses recorded yet", theme::dim_style())),
            Line::from(""),
            Line::from(Span::styled(
                "Press a or type :add <amount> <category> <description>",
                theme::dim_style(),
            )),
        ];
        let block = theme::panel("Expenses (0)");
        f.render_widget(Paragraph::new(msg).centered().block(block), area);
        return;
    }

    let header_cells = ["", "Date", "Description", "Amount", "Category"]
        .iter()
        .map(|h| Cell::from(*h).style(theme::header_style()));
    let header = Row::new(header_cells).height(1);

    let high_count = expenses.iter().filter(|e| high_value_flag(e)).count();

    let rows: Vec<Row> = expenses
        .iter()
        .enumerate()
        .skip(app.expense_cursor.offset)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, expense)| {
            let is_cursor = i == app.expense_cursor.index;
            let high = high_value_flag(expense);

            let marker = if high { "!" } else { "" };
            let amount_style = if high {
                theme::high_value_style()
            } else {
                theme::amount_style()
            };

            let style = if is_cursor {
                theme::selected_style()
            } else if high {
                theme::high_value_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            Row::new(vec![
                Cell::from(marker),
                Cell::from(expense.timestamp.as_str()),
                Cell::from(truncate(&expense.description, 40)),
                Cell::from(Span::styled(
                    format_stored_amount(&expense.amount),
                    amount_style,
                )),
                Cell::from(expense.category.as_str()),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(1),
        Constraint::Length(17),
        Constraint::Min(20),
        Constraint::Length(16),
        Constraint::Length(14),
    ];

    let title = if high_count > 0 {
        format!("Expenses ({}) [{high_count} high value]", expenses.len())
    } else {
        format!("Expenses ({})", expenses.len())
    };

    let table = Table::new(rows, widths)
        .header(header)
        .block(theme::panel(title));

    f.render_widget(table, area);
}
