use crate::chart::LABEL_WIDTH;
use crate::{ColumnKind, ColumnSummary, SheetError, Table, TableReport, Value, analyze, loader};
use crossterm::{
    event::{self, Event, KeyCode},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph, Row, Table as Grid},
};
use std::io;
use std::path::{Path, PathBuf};

#[derive(Clone, Copy, PartialEq)]
enum Screen {
    Files,
    Sheets,
    Data,
    Report,
}

const DATA_COL_WIDTH: usize = 15;

/// Runs the interactive browser: file list, sheet list, data grid, and the
/// analysis report for the currently loaded sheet.
pub fn run_tui(dir: &Path, bin_count: usize, top_n: usize) -> Result<(), SheetError> {
    let files = loader::list_spreadsheets(dir)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, dir, &files, bin_count, top_n);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    dir: &Path,
    files: &[PathBuf],
    bin_count: usize,
    top_n: usize,
) -> Result<(), SheetError> {
    let mut screen = Screen::Files;
    let mut file_state = ListState::default();
    if !files.is_empty() {
        file_state.select(Some(0));
    }
    let mut sheets: Vec<String> = Vec::new();
    let mut sheet_state = ListState::default();
    let mut current_file: Option<PathBuf> = None;
    let mut current_sheet = String::new();
    let mut table: Option<Table> = None;
    let mut report: Option<TableReport> = None;
    let mut lines: Vec<String> = Vec::new();
    let mut status: Option<String> = None;
    let mut row_offset = 0usize;
    let mut col_offset = 0usize;
    let mut report_scroll = 0u16;

    loop {
        let size = terminal.size()?;
        let full_area = Rect::new(0, 0, size.width, size.height);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(5),
                Constraint::Length(3),
            ])
            .split(full_area);
        let content_area = chunks[1];
        let content_height = content_area.height.saturating_sub(2) as usize;
        let content_width = content_area.width.saturating_sub(2) as usize;
        let visible_rows = content_height.saturating_sub(1);
        let visible_cols = (content_width / (DATA_COL_WIDTH + 1)).max(1);

        terminal.draw(|f| {
            let title_text = match screen {
                Screen::Files => format!("Sheetscope — {}", dir.display()),
                Screen::Sheets | Screen::Data => format!(
                    "{} — {}",
                    file_label(current_file.as_deref()),
                    if screen == Screen::Sheets {
                        "select sheet".to_string()
                    } else {
                        current_sheet.clone()
                    }
                ),
                Screen::Report => format!(
                    "Analysis — {} — {}",
                    file_label(current_file.as_deref()),
                    current_sheet
                ),
            };
            let title = Paragraph::new(title_text)
                .style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
                .block(bordered(""));
            f.render_widget(title, chunks[0]);

            match screen {
                Screen::Files => {
                    if files.is_empty() {
                        let msg = Paragraph::new(format!(
                            "No spreadsheet files found.\nPlace .xlsx or .csv files in '{}'.",
                            dir.display()
                        ))
                        .centered()
                        .block(bordered("Select file"));
                        f.render_widget(msg, content_area);
                    } else {
                        let items: Vec<ListItem> = files
                            .iter()
                            .map(|p| ListItem::new(file_label(Some(p.as_path()))))
                            .collect();
                        let list = List::new(items)
                            .block(bordered("Select file"))
                            .highlight_style(
                                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                            )
                            .highlight_symbol("> ");
                        f.render_stateful_widget(list, content_area, &mut file_state);
                    }
                }
                Screen::Sheets => {
                    let items: Vec<ListItem> =
                        sheets.iter().map(|s| ListItem::new(s.clone())).collect();
                    let list = List::new(items)
                        .block(bordered("Select sheet"))
                        .highlight_style(
                            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                        )
                        .highlight_symbol("> ");
                    f.render_stateful_widget(list, content_area, &mut sheet_state);
                }
                Screen::Data => {
                    if let Some(t) = &table {
                        let end_col = (col_offset + visible_cols).min(t.column_count());
                        let header = Row::new(t.headers()[col_offset..end_col].to_vec())
                            .style(Style::default().fg(Color::Green));
                        let end_row = (row_offset + visible_rows).min(t.row_count());
                        let rows: Vec<Row> = t.rows()[row_offset..end_row]
                            .iter()
                            .map(|r| {
                                Row::new(
                                    r[col_offset..end_col]
                                        .iter()
                                        .map(display_cell)
                                        .collect::<Vec<String>>(),
                                )
                            })
                            .collect();
                        let widths = (col_offset..end_col)
                            .map(|_| Constraint::Length(DATA_COL_WIDTH as u16));
                        let grid = Grid::new(rows, widths)
                            .header(header)
                            .column_spacing(1)
                            .block(bordered("Data"))
                            .style(Style::default().fg(Color::White));
                        f.render_widget(grid, content_area);
                    }
                }
                Screen::Report => {
                    let body = Paragraph::new(lines.join("\n"))
                        .block(bordered("Analysis"))
                        .style(Style::default().fg(Color::White))
                        .scroll((report_scroll, 0));
                    f.render_widget(body, content_area);
                }
            }

            let hint = match screen {
                Screen::Files => "▲/▼ navigate | Enter select | q quit",
                Screen::Sheets => "▲/▼ navigate | Enter select | Esc back | q quit",
                Screen::Data => "arrows scroll | a analyze | Esc back | q quit",
                Screen::Report => "▲/▼ scroll | e export JSON | Esc back | q quit",
            };
            let footer_text = status.clone().unwrap_or_else(|| hint.to_string());
            let footer = Paragraph::new(footer_text)
                .style(Style::default().fg(Color::Gray))
                .block(bordered(""));
            f.render_widget(footer, chunks[2]);
        })?;

        if let Event::Key(key) = event::read()? {
            status = None;
            match key.code {
                KeyCode::Char('q') => break,
                KeyCode::Esc => match screen {
                    Screen::Files => break,
                    Screen::Sheets => screen = Screen::Files,
                    Screen::Data => screen = Screen::Sheets,
                    Screen::Report => screen = Screen::Data,
                },
                KeyCode::Up => match screen {
                    Screen::Files => move_up(&mut file_state),
                    Screen::Sheets => move_up(&mut sheet_state),
                    Screen::Data => row_offset = row_offset.saturating_sub(1),
                    Screen::Report => report_scroll = report_scroll.saturating_sub(1),
                },
                KeyCode::Down => match screen {
                    Screen::Files => move_down(&mut file_state, files.len()),
                    Screen::Sheets => move_down(&mut sheet_state, sheets.len()),
                    Screen::Data => {
                        let rows = table.as_ref().map_or(0, Table::row_count);
                        if row_offset + visible_rows < rows {
                            row_offset += 1;
                        }
                    }
                    Screen::Report => {
                        let max = lines.len().saturating_sub(content_height) as u16;
                        if report_scroll < max {
                            report_scroll += 1;
                        }
                    }
                },
                KeyCode::Left => {
                    if screen == Screen::Data {
                        col_offset = col_offset.saturating_sub(1);
                    }
                }
                KeyCode::Right => {
                    if screen == Screen::Data {
                        let cols = table.as_ref().map_or(0, Table::column_count);
                        if col_offset + visible_cols < cols {
                            col_offset += 1;
                        }
                    }
                }
                KeyCode::Enter => match screen {
                    Screen::Files => {
                        if let Some(idx) = file_state.selected() {
                            let path = &files[idx];
                            match loader::sheet_names(path) {
                                Ok(names) => {
                                    sheets = names;
                                    sheet_state = ListState::default();
                                    if !sheets.is_empty() {
                                        sheet_state.select(Some(0));
                                    }
                                    current_file = Some(path.clone());
                                    screen = Screen::Sheets;
                                }
                                Err(e) => status = Some(e.to_string()),
                            }
                        }
                    }
                    Screen::Sheets => {
                        if let (Some(idx), Some(path)) = (sheet_state.selected(), &current_file) {
                            match loader::load(path, &sheets[idx]) {
                                Ok(t) => {
                                    current_sheet = sheets[idx].clone();
                                    table = Some(t);
                                    report = None;
                                    lines.clear();
                                    row_offset = 0;
                                    col_offset = 0;
                                    screen = Screen::Data;
                                }
                                Err(e) => status = Some(e.to_string()),
                            }
                        }
                    }
                    _ => {}
                },
                KeyCode::Char('a') => {
                    if screen == Screen::Data {
                        if let Some(t) = &table {
                            let bar_width =
                                content_width.saturating_sub(LABEL_WIDTH + 10).clamp(10, 40);
                            match analyze(t, bin_count, top_n, bar_width) {
                                Ok(r) => {
                                    lines = report_lines(&r);
                                    report = Some(r);
                                    report_scroll = 0;
                                    screen = Screen::Report;
                                }
                                Err(e) => status = Some(e.to_string()),
                            }
                        }
                    }
                }
                KeyCode::Char('e') => {
                    if screen == Screen::Report {
                        if let Some(r) = &report {
                            let out = format!(
                                "{}-{}-report.json",
                                file_label(current_file.as_deref()).replace('.', "_"),
                                current_sheet
                            );
                            let json = serde_json::to_string_pretty(r)
                                .map_err(io::Error::other)?;
                            std::fs::write(&out, json)?;
                            status = Some(format!("exported {out}"));
                        }
                    }
                }
                _ => {}
            }
        }
    }

    Ok(())
}

fn bordered(title: &str) -> Block<'_> {
    Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .border_type(BorderType::Thick)
        .border_style(Style::default().fg(Color::Cyan))
}

fn move_up(state: &mut ListState) {
    if let Some(selected) = state.selected() {
        state.select(Some(selected.saturating_sub(1)));
    }
}

fn move_down(state: &mut ListState, len: usize) {
    if let Some(selected) = state.selected() {
        state.select(Some((selected + 1).min(len.saturating_sub(1))));
    }
}

fn file_label(path: Option<&Path>) -> String {
    path.and_then(|p| p.file_name())
        .and_then(|n| n.to_str())
        .unwrap_or("?")
        .to_string()
}

fn display_cell(value: &Value) -> String {
    match value {
        Value::Missing => String::new(),
        other => other.label(),
    }
}

/// Flattens a report into the text lines shown on the analysis screen.
fn report_lines(report: &TableReport) -> Vec<String> {
    let mut lines = vec![
        format!(
            "rows: {}   columns: {}",
            report.row_count, report.column_count
        ),
        String::new(),
    ];
    for col in &report.columns {
        let kind = match col.kind {
            ColumnKind::Numeric => "numeric",
            ColumnKind::Categorical => "categorical",
        };
        lines.push(format!("{} [{}]", col.name, kind));
        match &col.summary {
            ColumnSummary::Numeric(Some(s)) => lines.push(format!(
                "  count={}  min={:.2}  max={:.2}  mean={:.2}  stddev={}",
                s.count,
                s.min,
                s.max,
                s.mean,
                s.std_dev.map_or("N/A".to_string(), |v| format!("{v:.2}"))
            )),
            ColumnSummary::Numeric(None) => lines.push("  no numeric data".to_string()),
            ColumnSummary::Categorical(s) => {
                lines.push(format!("  unique values: {}", s.unique_count));
            }
        }
        if col.chart.is_empty() {
            lines.push("  (no data to chart)".to_string());
        } else {
            for chart_line in &col.chart {
                lines.push(format!("  {chart_line}"));
            }
        }
        lines.push(String::new());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_lines_include_placeholder_for_empty_charts() {
        let table = Table::new(vec!["m".to_string()], vec![]);
        let report = analyze(&table, 10, 10, 20).unwrap();
        let lines = report_lines(&report);
        assert_eq!(lines[0], "rows: 0   columns: 1");
        assert!(lines.iter().any(|l| l == "m [categorical]"));
        assert!(lines.iter().any(|l| l == "  (no data to chart)"));
    }

    #[test]
    fn report_lines_indent_chart_rows() {
        let rows = (1..=4).map(|n| vec![Value::Number(n as f64)]).collect();
        let table = Table::new(vec!["n".to_string()], rows);
        let report = analyze(&table, 2, 10, 10).unwrap();
        let lines = report_lines(&report);
        let chart_rows: Vec<_> = lines.iter().filter(|l| l.contains('█')).collect();
        assert_eq!(chart_rows.len(), 2);
        assert!(chart_rows.iter().all(|l| l.starts_with("  ")));
    }

    #[test]
    fn missing_cells_display_blank() {
        assert_eq!(display_cell(&Value::Missing), "");
        assert_eq!(display_cell(&Value::Number(2.0)), "2");
    }
}
