use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::theme::ThemeColors;

/// 渲染底部快捷键提示栏
pub fn render(frame: &mut Frame, area: Rect, editing: bool, colors: &ThemeColors) {
    let shortcuts = get_shortcuts(editing);

    let mut spans = Vec::new();
    spans.push(Span::raw("  "));

    for (i, (key, desc)) in shortcuts.iter().enumerate() {
        spans.push(Span::styled(
            *key,
            Style::default()
                .fg(colors.highlight)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(
            format!(" {}", desc),
            Style::default().fg(colors.muted),
        ));

        if i < shortcuts.len() - 1 {
            spans.push(Span::raw("   "));
        }
    }

    let line = Line::from(spans);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.border));

    let paragraph = Paragraph::new(line).block(block);
    frame.render_widget(paragraph, area);
}

fn get_shortcuts(editing: bool) -> Vec<(&'static str, &'static str)> {
    if editing {
        vec![
            ("Tab", "next field"),
            ("S-Tab", "prev field"),
            ("Esc", "done"),
        ]
    } else {
        vec![
            ("i", "edit"),
            ("a", "add"),
            ("u", "update"),
            ("x", "delete"),
            ("j/k", "select"),
            ("t", "theme"),
            ("q", "quit"),
        ]
    }
}
