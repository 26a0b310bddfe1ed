//! 任务输入表单组件

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{FormField, FormState};
use crate::theme::ThemeColors;

/// 表单面板高度（5 个字段 + 边框）
pub const FORM_HEIGHT: u16 = 7;

/// 渲染输入表单
pub fn render(frame: &mut Frame, area: Rect, form: &FormState, colors: &ThemeColors) {
    let title = if form.editing { " Edit ─ editing " } else { " Edit " };
    let border_style = if form.editing {
        Style::default().fg(colors.highlight)
    } else {
        Style::default().fg(colors.border)
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style);

    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    let field_areas = Layout::vertical([Constraint::Length(1); 5]).split(inner_area);

    for (field, field_area) in FormField::all().iter().zip(field_areas.iter()) {
        render_field(frame, *field_area, form, *field, colors);
    }
}

/// 渲染单个字段行: " Description: {value}█"
fn render_field(
    frame: &mut Frame,
    area: Rect,
    form: &FormState,
    field: FormField,
    colors: &ThemeColors,
) {
    let is_focused = form.focused == field;

    let label_style = if is_focused {
        Style::default()
            .fg(colors.highlight)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(colors.muted)
    };

    let mut spans = vec![
        Span::styled(format!(" {:<12}", format!("{}:", field.label())), label_style),
        Span::styled(form.value(field), Style::default().fg(colors.text)),
    ];

    // 焦点字段在编辑模式下显示光标
    if is_focused && form.editing {
        spans.push(Span::styled("█", Style::default().fg(colors.highlight)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
