use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Cell, Row, Table, TableState},
    Frame,
};

use crate::store::tasks::Task;
use crate::theme::ThemeColors;

/// 渲染任务表格
pub fn render(
    frame: &mut Frame,
    area: Rect,
    tasks: &[Task],
    selected_index: Option<usize>,
    today: &str,
    colors: &ThemeColors,
) {
    // 表头
    let header = Row::new(vec![
        Cell::from(""), // 选择指示器
        Cell::from("ID"),
        Cell::from("DESCRIPTION"),
        Cell::from("PRIORITY"),
        Cell::from("STATUS"),
        Cell::from("CATEGORY"),
        Cell::from("DUE"),
    ])
    .style(Style::default().fg(colors.muted))
    .height(1)
    .bottom_margin(1);

    // 数据行
    let rows: Vec<Row> = tasks
        .iter()
        .enumerate()
        .map(|(i, task)| {
            let is_selected = selected_index == Some(i);
            let selector = if is_selected { "❯" } else { " " };

            let row_style = if is_selected {
                Style::default()
                    .fg(colors.text)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.text)
            };

            // 过期日期标红（字符串比较，YYYY-MM-DD 下与日期序一致）
            let due = task.due_date.as_deref().unwrap_or("—");
            let due_style = if task.due_date.as_deref().is_some_and(|d| d < today) {
                Style::default().fg(colors.error)
            } else {
                Style::default().fg(colors.muted)
            };

            Row::new(vec![
                Cell::from(selector).style(Style::default().fg(colors.highlight)),
                Cell::from(task.id.to_string()).style(Style::default().fg(colors.muted)),
                Cell::from(task.description.clone()),
                Cell::from(task.priority.clone()),
                Cell::from(task.status.clone()),
                Cell::from(task.category.clone().unwrap_or_else(|| "—".to_string()))
                    .style(Style::default().fg(colors.muted)),
                Cell::from(due.to_string()).style(due_style),
            ])
            .style(row_style)
        })
        .collect();

    let widths = [
        Constraint::Length(2),  // 选择器
        Constraint::Length(4),  // ID
        Constraint::Fill(3),    // DESCRIPTION (flex)
        Constraint::Length(10), // PRIORITY
        Constraint::Length(10), // STATUS
        Constraint::Fill(1),    // CATEGORY (flex)
        Constraint::Length(12), // DUE
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(" Tasks ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(colors.border)),
        )
        .row_highlight_style(
            Style::default()
                .bg(colors.bg_secondary)
                .add_modifier(Modifier::BOLD),
        );

    // 渲染表格（使用 TableState）
    let mut table_state = TableState::default();
    table_state.select(selected_index);

    frame.render_stateful_widget(table, area, &mut table_state);
}
