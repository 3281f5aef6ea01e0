use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

use tracing::{error, info};

use crate::ledger::{DeleteOutcome, Ledger};
use crate::ui::app::{App, InputMode, PendingAction, Screen};
use crate::ui::commands;

pub(crate) fn as_tui(ledger: &mut Ledger) -> Result<()> {
    let mut app = App::new();
    app.refresh(ledger)?;
    info!(
        ledger = %ledger.ledger_path().display(),
        budget = %ledger.budget_path().display(),
        "starting TUI"
    );

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, ledger);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        error!(error = %format!("{e:#}"), "TUI exited with error");
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    ledger: &mut Ledger,
) -> Result<()> {
    while app.running {
        terminal.draw(|f| {
            let content_height = f.area().height.saturating_sub(3) as usize;
            app.visible_rows = content_height.max(1);
            crate::ui::render::render(f, app);
        })?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if app.show_help {
                app.show_help = false;
                continue;
            }
            match app.input_mode {
                InputMode::Normal => handle_normal_input(key, app, ledger)?,
                InputMode::Command => handle_command_input(key, app, ledger)?,
                InputMode::Confirm => handle_confirm_input(key, app, ledger)?,
            }
        }
    }
    Ok(())
}

fn handle_normal_input(key: event::KeyEvent, app: &mut App, ledger: &mut Ledger) -> Result<()> {
    match key.code {
        KeyCode::Char(':') => {
            app.input_mode = InputMode::Command;
            app.command_input.clear();
        }
        KeyCode::Char('q') | KeyCode::Char('c')
            if key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            app.running = false;
        }
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let half_page = app.visible_rows / 2;
            for _ in 0..half_page {
                handle_move_down(app);
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let half_page = app.visible_rows / 2;
            for _ in 0..half_page {
                handle_move_up(app);
            }
        }
        KeyCode::Char('j') | KeyCode::Down => handle_move_down(app),
        KeyCode::Char('k') | KeyCode::Up => handle_move_up(app),
        KeyCode::Char('g') => handle_goto_top(app),
        KeyCode::Char('G') => handle_goto_bottom(app),
        KeyCode::Char('1') => switch_screen(app, ledger, Screen::Expenses)?,
        KeyCode::Char('2') => switch_screen(app, ledger, Screen::Dashboard)?,
        KeyCode::Char('3') => switch_screen(app, ledger, Screen::Monthly)?,
        KeyCode::Tab => {
            let next = app.screen.next();
            switch_screen(app, ledger, next)?;
        }
        KeyCode::BackTab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            let prev = if idx == 0 { screens.len() - 1 } else { idx - 1 };
            switch_screen(app, ledger, screens[prev])?;
        }
        KeyCode::Char('a') => prefill_command(app, "add "),
        KeyCode::Char('b') => prefill_command(app, "budget "),
        KeyCode::Char('x') => prefill_command(app, "export "),
        KeyCode::Char('D') if app.screen == Screen::Expenses => {
            commands::handle_command("delete", app, ledger)?;
        }
        KeyCode::Char('?') => {
            app.show_help = true;
        }
        KeyCode::Esc => app.status_message.clear(),
        _ => {}
    }
    Ok(())
}

fn prefill_command(app: &mut App, text: &str) {
    app.input_mode = InputMode::Command;
    app.command_input = text.to_string();
}

fn handle_command_input(key: event::KeyEvent, app: &mut App, ledger: &mut Ledger) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            let input = app.command_input.clone();
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
            commands::handle_command(&input, app, ledger)?;
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
        }
        KeyCode::Backspace => {
            app.command_input.pop();
            if app.command_input.is_empty() {
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.command_input.clear();
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let trimmed = app.command_input.trim_end();
            if let Some(pos) = trimmed.rfind(' ') {
                app.command_input.truncate(pos + 1);
            } else {
                app.command_input.clear();
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
    Ok(())
}

fn handle_confirm_input(key: event::KeyEvent, app: &mut App, ledger: &mut Ledger) -> Result<()> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            if let Some(PendingAction::DeleteExpense(expense)) = app.pending_action.take() {
                match ledger.delete_expense(&expense) {
                    Ok(DeleteOutcome::Removed) => app.sync(ledger)?,
                    Ok(DeleteOutcome::NotFound) => {
                        app.refresh(ledger)?;
                        app.set_status("Expense no longer in the ledger; nothing removed");
                    }
                    Err(e) => {
                        error!(error = %e, "delete failed");
                        app.set_status(format!("Error: {e}"));
                    }
                }
            }
        }
        _ => {
            app.pending_action = None;
            app.set_status("Cancelled");
        }
    }
    app.input_mode = InputMode::Normal;
    app.confirm_message.clear();
    Ok(())
}

fn switch_screen(app: &mut App, ledger: &mut Ledger, screen: Screen) -> Result<()> {
    app.screen = screen;
    app.refresh(ledger)?;
    app.set_status(format!("{screen}"));
    Ok(())
}

/// Rows the expenses table can show below its header and borders.
fn expenses_page(app: &App) -> usize {
    app.visible_rows.saturating_sub(3).max(1)
}

fn handle_move_down(app: &mut App) {
    match app.screen {
        Screen::Expenses => {
            let page = expenses_page(app);
            app.expense_cursor.down(app.snapshot.expenses.len(), page);
        }
        Screen::Monthly => {
            if app.month_index + 1 < app.snapshot.monthly.len() {
                app.month_index += 1;
            }
        }
        Screen::Dashboard => {}
    }
}

fn handle_move_up(app: &mut App) {
    match app.screen {
        Screen::Expenses => app.expense_cursor.up(),
        Screen::Monthly => app.month_index = app.month_index.saturating_sub(1),
        Screen::Dashboard => {}
    }
}

fn handle_goto_top(app: &mut App) {
    match app.screen {
        Screen::Expenses => app.expense_cursor.top(),
        Screen::Monthly => app.month_index = 0,
        Screen::Dashboard => {}
    }
}

fn handle_goto_bottom(app: &mut App) {
    match app.screen {
        Screen::Expenses => {
            let page = expenses_page(app);
            app.expense_cursor.bottom(app.snapshot.expenses.len(), page);
        }
        Screen::Monthly => app.month_index = app.snapshot.monthly.len().saturating_sub(1),
        Screen::Dashboard => {}
    }
}
