use std::time::{Duration, Instant};

use crate::store::config::{self, Config, ThemeConfig};
use crate::store::tasks::{Task, TaskFields, TaskStore};
use crate::theme::{get_theme_colors, Theme, ThemeColors};

/// Toast 消息
#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub expires_at: Instant,
}

impl Toast {
    pub fn new(message: impl Into<String>, duration: Duration) -> Self {
        Self {
            message: message.into(),
            expires_at: Instant::now() + duration,
        }
    }

    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// 表格选中状态机
///
/// Idle：无选中行；Row：选中快照中 index 位置的行。
/// 任何变更操作通过 refresh() 回到 Idle。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    Idle,
    Row {
        index: usize,
    },
}

/// 表单字段（焦点切换顺序即声明顺序）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Description,
    Priority,
    Status,
    Category,
    DueDate,
}

impl FormField {
    pub fn all() -> &'static [FormField] {
        &[
            FormField::Description,
            FormField::Priority,
            FormField::Status,
            FormField::Category,
            FormField::DueDate,
        ]
    }

    /// 字段显示名
    pub fn label(&self) -> &'static str {
        match self {
            FormField::Description => "Description",
            FormField::Priority => "Priority",
            FormField::Status => "Status",
            FormField::Category => "Category",
            FormField::DueDate => "Due Date",
        }
    }

    pub fn next(&self) -> FormField {
        let fields = Self::all();
        let pos = fields.iter().position(|f| f == self).unwrap_or(0);
        fields[(pos + 1) % fields.len()]
    }

    pub fn previous(&self) -> FormField {
        let fields = Self::all();
        let pos = fields.iter().position(|f| f == self).unwrap_or(0);
        fields[(pos + fields.len() - 1) % fields.len()]
    }
}

/// 输入表单状态
///
/// 五个字段各自独立编辑；任何操作都不会自动清空或回填字段。
#[derive(Debug, Clone, Default)]
pub struct FormState {
    pub description: String,
    pub priority: String,
    pub status: String,
    pub category: String,
    pub due_date: String,
    /// 当前焦点字段
    pub focused: FormField,
    /// 是否处于表单编辑模式（按键输入进字段而非触发快捷键）
    pub editing: bool,
}

impl FormState {
    /// 获取焦点字段内容（可变）
    pub fn focused_value_mut(&mut self) -> &mut String {
        match self.focused {
            FormField::Description => &mut self.description,
            FormField::Priority => &mut self.priority,
            FormField::Status => &mut self.status,
            FormField::Category => &mut self.category,
            FormField::DueDate => &mut self.due_date,
        }
    }

    /// 获取指定字段内容
    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Description => &self.description,
            FormField::Priority => &self.priority,
            FormField::Status => &self.status,
            FormField::Category => &self.category,
            FormField::DueDate => &self.due_date,
        }
    }

    pub fn focus_next(&mut self) {
        self.focused = self.focused.next();
    }

    pub fn focus_previous(&mut self) {
        self.focused = self.focused.previous();
    }

    /// 转换为存储字段：可选字段空输入映射为 None（存为 NULL）
    pub fn to_fields(&self) -> TaskFields {
        let optional = |s: &str| {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        };

        TaskFields {
            description: self.description.trim().to_string(),
            priority: self.priority.trim().to_string(),
            status: self.status.trim().to_string(),
            category: optional(&self.category),
            due_date: optional(&self.due_date),
        }
    }
}

/// 错误弹窗类型
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorDialog {
    /// 必填字段为空
    Validation,
    /// 未选中任务行
    Selection,
    /// 存储层错误
    Storage(String),
}

impl ErrorDialog {
    pub fn title(&self) -> &'static str {
        match self {
            ErrorDialog::Validation => " Input Error ",
            ErrorDialog::Selection => " Selection Error ",
            ErrorDialog::Storage(_) => " Storage Error ",
        }
    }

    pub fn message(&self) -> Vec<String> {
        match self {
            ErrorDialog::Validation => vec![
                "Description, Priority and Status".to_string(),
                "are required fields.".to_string(),
            ],
            ErrorDialog::Selection => vec!["No task selected.".to_string()],
            ErrorDialog::Storage(detail) => vec![detail.clone()],
        }
    }
}

/// 全局应用状态
pub struct App {
    /// 是否应该退出
    pub should_quit: bool,
    /// 任务存储（进程生命周期内唯一连接）
    pub store: TaskStore,
    /// 当前任务快照（store 返回顺序）
    pub tasks: Vec<Task>,
    /// 选中状态机
    pub selection: Selection,
    /// 输入表单
    pub form: FormState,
    /// 错误弹窗
    pub error_dialog: Option<ErrorDialog>,
    /// Toast 提示
    pub toast: Option<Toast>,
    /// 当前主题
    pub theme: Theme,
    /// 当前颜色方案
    pub colors: ThemeColors,
}

impl App {
    pub fn new(store: TaskStore, theme: Theme) -> Self {
        let colors = get_theme_colors(theme);

        let mut app = Self {
            should_quit: false,
            store,
            tasks: Vec::new(),
            selection: Selection::Idle,
            form: FormState::default(),
            error_dialog: None,
            toast: None,
            theme,
            colors,
        };
        app.refresh();
        app
    }

    // ========== 刷新与选中 ==========

    /// 从 store 重新加载全部任务，选中状态回到 Idle
    pub fn refresh(&mut self) {
        match self.store.list(None) {
            Ok(tasks) => self.tasks = tasks,
            Err(e) => self.show_error(ErrorDialog::Storage(e.to_string())),
        }
        self.selection = Selection::Idle;
    }

    /// 当前选中任务的 ID
    pub fn selected_id(&self) -> Option<i64> {
        match self.selection {
            Selection::Idle => None,
            Selection::Row { index } => self.tasks.get(index).map(|t| t.id),
        }
    }

    /// 选中下一行（Idle 状态选中第一行）
    pub fn select_next(&mut self) {
        if self.tasks.is_empty() {
            return;
        }

        let next = match self.selection {
            Selection::Idle => 0,
            Selection::Row { index } => (index + 1) % self.tasks.len(),
        };
        self.selection = Selection::Row { index: next };
    }

    /// 选中上一行（Idle 状态选中最后一行）
    pub fn select_previous(&mut self) {
        if self.tasks.is_empty() {
            return;
        }

        let prev = match self.selection {
            Selection::Idle => self.tasks.len() - 1,
            Selection::Row { index } => {
                if index == 0 {
                    self.tasks.len() - 1
                } else {
                    index - 1
                }
            }
        };
        self.selection = Selection::Row { index: prev };
    }

    /// 清除选中
    pub fn clear_selection(&mut self) {
        self.selection = Selection::Idle;
    }

    // ========== 任务操作 ==========

    /// 添加任务：校验必填字段后写入 store 并刷新
    pub fn submit_add(&mut self) {
        let fields = self.form.to_fields();
        if !fields.required_filled() {
            self.show_error(ErrorDialog::Validation);
            return;
        }

        match self.store.add(&fields) {
            Ok(id) => {
                self.refresh();
                self.show_toast(format!("Added task #{}", id));
            }
            Err(e) => self.show_error(ErrorDialog::Storage(e.to_string())),
        }
    }

    /// 更新选中任务：需要选中行，且必填字段非空
    pub fn submit_update(&mut self) {
        let Some(id) = self.selected_id() else {
            self.show_error(ErrorDialog::Selection);
            return;
        };

        let fields = self.form.to_fields();
        if !fields.required_filled() {
            self.show_error(ErrorDialog::Validation);
            return;
        }

        match self.store.update(id, &fields) {
            Ok(()) => {
                self.refresh();
                self.show_toast(format!("Updated task #{}", id));
            }
            Err(e) => self.show_error(ErrorDialog::Storage(e.to_string())),
        }
    }

    /// 删除选中任务：需要选中行
    pub fn submit_delete(&mut self) {
        let Some(id) = self.selected_id() else {
            self.show_error(ErrorDialog::Selection);
            return;
        };

        match self.store.delete(id) {
            Ok(()) => {
                self.refresh();
                self.show_toast(format!("Deleted task #{}", id));
            }
            Err(e) => self.show_error(ErrorDialog::Storage(e.to_string())),
        }
    }

    // ========== 弹窗与提示 ==========

    /// 显示错误弹窗
    pub fn show_error(&mut self, dialog: ErrorDialog) {
        self.error_dialog = Some(dialog);
    }

    /// 关闭错误弹窗
    pub fn close_error(&mut self) {
        self.error_dialog = None;
    }

    /// 显示 Toast 消息
    pub fn show_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast::new(message, Duration::from_secs(2)));
    }

    /// 更新 Toast 状态（清理过期的 Toast）
    pub fn update_toast(&mut self) {
        if let Some(ref toast) = self.toast {
            if toast.is_expired() {
                self.toast = None;
            }
        }
    }

    // ========== 主题 ==========

    /// 切换到下一个主题并持久化
    pub fn cycle_theme(&mut self) {
        self.theme = self.theme.next();
        self.colors = get_theme_colors(self.theme);
        self.show_toast(format!("Theme: {}", self.theme.label()));

        let config = Config {
            theme: ThemeConfig {
                name: self.theme.label().to_string(),
            },
        };
        if let Err(e) = config::save_config(&config) {
            self.show_toast(format!("Failed to save config: {}", e));
        }
    }

    /// 退出应用
    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}
