use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};

use crate::app::App;

/// 处理事件，返回 true 表示应该继续运行
pub fn handle_events(app: &mut App) -> io::Result<bool> {
    // 更新 Toast 状态
    app.update_toast();

    // 轮询事件（100ms 超时）
    if event::poll(Duration::from_millis(100))? {
        if let Event::Key(key) = event::read()? {
            // 只处理按下事件
            if key.kind != KeyEventKind::Press {
                return Ok(true);
            }
            handle_key(app, key);
        }
    }

    Ok(!app.should_quit)
}

pub fn handle_key(app: &mut App, key: KeyEvent) {
    // 优先处理弹窗事件

    // 错误弹窗
    if app.error_dialog.is_some() {
        handle_error_dialog_key(app, key);
        return;
    }

    // 表单编辑模式
    if app.form.editing {
        handle_form_key(app, key);
        return;
    }

    handle_table_key(app, key);
}

/// 错误弹窗：任意确认键关闭
fn handle_error_dialog_key(app: &mut App, key: KeyEvent) {
    if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
        app.close_error();
    }
}

/// 表单编辑模式的键盘事件
fn handle_form_key(app: &mut App, key: KeyEvent) {
    match key.code {
        // 退出编辑模式
        KeyCode::Esc | KeyCode::Enter => {
            app.form.editing = false;
        }

        // 字段间导航
        KeyCode::Tab | KeyCode::Down => app.form.focus_next(),
        KeyCode::BackTab | KeyCode::Up => app.form.focus_previous(),

        // 编辑焦点字段
        KeyCode::Char(c) => {
            app.form.focused_value_mut().push(c);
        }
        KeyCode::Backspace => {
            app.form.focused_value_mut().pop();
        }

        _ => {}
    }
}

/// 表格模式的键盘事件
fn handle_table_key(app: &mut App, key: KeyEvent) {
    match key.code {
        // 退出
        KeyCode::Char('q') => app.quit(),

        // 导航 - 下移
        KeyCode::Char('j') | KeyCode::Down => app.select_next(),

        // 导航 - 上移
        KeyCode::Char('k') | KeyCode::Up => app.select_previous(),

        // 清除选中
        KeyCode::Esc => app.clear_selection(),

        // 进入表单编辑
        KeyCode::Char('i') | KeyCode::Tab => {
            app.form.editing = true;
        }

        // 任务操作
        KeyCode::Char('a') => app.submit_add(),
        KeyCode::Char('u') => app.submit_update(),
        KeyCode::Char('x') => app.submit_delete(),

        // 主题切换
        KeyCode::Char('t') => app.cycle_theme(),

        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{ErrorDialog, FormField, Selection};
    use crate::store::tasks::TaskStore;
    use crate::theme::Theme;

    fn test_app() -> App {
        let store = TaskStore::open_in_memory().unwrap();
        App::new(store, Theme::Dark)
    }

    fn press(app: &mut App, code: KeyCode) {
        handle_key(app, KeyEvent::from(code));
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_quit_key() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_add_task_via_form_and_keys() {
        let mut app = test_app();

        // 进入表单，填写三个必填字段
        press(&mut app, KeyCode::Char('i'));
        assert!(app.form.editing);

        type_text(&mut app, "Buy milk");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "High");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "Open");

        // 退出编辑并提交
        press(&mut app, KeyCode::Esc);
        assert!(!app.form.editing);
        press(&mut app, KeyCode::Char('a'));

        assert_eq!(app.tasks.len(), 1);
        assert_eq!(app.tasks[0].description, "Buy milk");
    }

    #[test]
    fn test_add_with_empty_required_opens_dialog_and_blocks_keys() {
        let mut app = test_app();

        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.error_dialog, Some(ErrorDialog::Validation));

        // 弹窗打开时按键不再触发操作
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.should_quit);

        // Enter 关闭弹窗
        press(&mut app, KeyCode::Enter);
        assert!(app.error_dialog.is_none());
    }

    #[test]
    fn test_delete_without_selection_opens_selection_dialog() {
        let mut app = test_app();

        press(&mut app, KeyCode::Char('x'));
        assert_eq!(app.error_dialog, Some(ErrorDialog::Selection));
    }

    #[test]
    fn test_navigation_and_escape() {
        let mut app = test_app();
        app.form.description = "task".to_string();
        app.form.priority = "Low".to_string();
        app.form.status = "Open".to_string();
        app.submit_add();
        app.submit_add();

        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.selection, Selection::Row { index: 0 });

        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.selection, Selection::Row { index: 1 });

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.selection, Selection::Idle);
    }

    #[test]
    fn test_backspace_edits_focused_field() {
        let mut app = test_app();

        press(&mut app, KeyCode::Char('i'));
        type_text(&mut app, "abc");
        press(&mut app, KeyCode::Backspace);

        assert_eq!(app.form.description, "ab");
        assert_eq!(app.form.focused, FormField::Description);
    }
}
