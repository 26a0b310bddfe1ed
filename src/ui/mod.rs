pub mod components;

use chrono::Local;
use ratatui::{
    layout::Constraint,
    style::Style,
    widgets::{Block, Widget},
    Frame,
};

use crate::app::{App, Selection};

use components::{error_dialog, footer, task_form, task_table, toast};

/// 渲染主界面
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let colors = &app.colors;

    // 填充整个背景
    Block::default()
        .style(Style::default().bg(colors.bg))
        .render(area, frame.buffer_mut());

    let [table_area, form_area, footer_area] = ratatui::layout::Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(task_form::FORM_HEIGHT),
        Constraint::Length(3),
    ])
    .areas(area);

    // 渲染任务表格
    let selected_index = match app.selection {
        Selection::Idle => None,
        Selection::Row { index } => Some(index),
    };
    let today = Local::now().format("%Y-%m-%d").to_string();
    task_table::render(frame, table_area, &app.tasks, selected_index, &today, colors);

    // 渲染输入表单
    task_form::render(frame, form_area, &app.form, colors);

    // 渲染底部快捷键提示
    footer::render(frame, footer_area, app.form.editing, colors);

    // 渲染错误弹窗（覆盖在主界面之上）
    if let Some(ref dialog) = app.error_dialog {
        error_dialog::render(frame, dialog, colors);
    }

    // 渲染 Toast
    if let Some(ref t) = app.toast {
        toast::render(frame, &t.message, colors);
    }
}
