//! 任务存储
//!
//! 持有一个进程生命周期内唯一的 SQLite 连接，提供任务表的增删改查。
//! Schema 在打开时幂等创建，不做版本迁移。

use std::fmt;
use std::path::Path;

use rusqlite::{params, Connection, Row};

use crate::error::{Result, TaskError};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS tasks (
    id INTEGER PRIMARY KEY,
    description TEXT NOT NULL,
    priority TEXT NOT NULL,
    status TEXT NOT NULL,
    category TEXT,
    due_date TEXT
);
"#;

/// 任务数据
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    /// 任务 ID（SQLite 分配，创建后不变）
    pub id: i64,
    pub description: String,
    pub priority: String,
    pub status: String,
    /// 分类，空输入存为 NULL
    pub category: Option<String>,
    /// 截止日期（期望 YYYY-MM-DD，不校验格式），空输入存为 NULL
    pub due_date: Option<String>,
}

/// 任务的五个可编辑字段（不含 ID）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFields {
    pub description: String,
    pub priority: String,
    pub status: String,
    pub category: Option<String>,
    pub due_date: Option<String>,
}

impl TaskFields {
    /// 必填字段（description/priority/status）是否都非空
    pub fn required_filled(&self) -> bool {
        !self.description.trim().is_empty()
            && !self.priority.trim().is_empty()
            && !self.status.trim().is_empty()
    }
}

/// 过滤条件可用的列（白名单，避免拼接任意查询片段）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    Description,
    Priority,
    Status,
    Category,
    DueDate,
}

impl FilterField {
    /// 按列名解析过滤字段（白名单之外的列名报错）
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "description" => Ok(FilterField::Description),
            "priority" => Ok(FilterField::Priority),
            "status" => Ok(FilterField::Status),
            "category" => Ok(FilterField::Category),
            "due_date" => Ok(FilterField::DueDate),
            _ => Err(TaskError::invalid_data(format!(
                "unknown filter field: {}",
                name
            ))),
        }
    }

    fn column(&self) -> &'static str {
        match self {
            FilterField::Description => "description",
            FilterField::Priority => "priority",
            FilterField::Status => "status",
            FilterField::Category => "category",
            FilterField::DueDate => "due_date",
        }
    }
}

/// 过滤操作符
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Eq,
    Ne,
    Like,
}

impl fmt::Display for FilterOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterOp::Eq => write!(f, "="),
            FilterOp::Ne => write!(f, "<>"),
            FilterOp::Like => write!(f, "LIKE"),
        }
    }
}

/// 结构化过滤条件（字段、操作符、值），值通过参数绑定传入
#[derive(Debug, Clone)]
pub struct Filter {
    pub field: FilterField,
    pub op: FilterOp,
    pub value: String,
}

impl Filter {
    pub fn new(field: FilterField, op: FilterOp, value: impl Into<String>) -> Self {
        Self {
            field,
            op,
            value: value.into(),
        }
    }
}

/// 任务存储，持有打开的数据库连接
pub struct TaskStore {
    conn: Connection,
}

impl TaskStore {
    /// 打开（必要时创建）数据库文件，并幂等创建任务表
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    /// 打开内存数据库（测试用）
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    /// 插入一条任务，返回新分配的 ID
    pub fn add(&self, fields: &TaskFields) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO tasks (description, priority, status, category, due_date)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                fields.description,
                fields.priority,
                fields.status,
                fields.category,
                fields.due_date,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// 读取全部任务（按插入顺序），可选过滤条件
    pub fn list(&self, filter: Option<&Filter>) -> Result<Vec<Task>> {
        const COLUMNS: &str = "id, description, priority, status, category, due_date";

        let mut tasks = Vec::new();
        match filter {
            Some(f) => {
                let sql = format!(
                    "SELECT {} FROM tasks WHERE {} {} ?1 ORDER BY id",
                    COLUMNS,
                    f.field.column(),
                    f.op
                );
                let mut stmt = self.conn.prepare(&sql)?;
                let rows = stmt.query_map(params![f.value], row_to_task)?;
                for row in rows {
                    tasks.push(row?);
                }
            }
            None => {
                let sql = format!("SELECT {} FROM tasks ORDER BY id", COLUMNS);
                let mut stmt = self.conn.prepare(&sql)?;
                let rows = stmt.query_map([], row_to_task)?;
                for row in rows {
                    tasks.push(row?);
                }
            }
        }

        Ok(tasks)
    }

    /// 覆盖写入指定 ID 的全部字段；ID 不存在时静默无操作
    pub fn update(&self, id: i64, fields: &TaskFields) -> Result<()> {
        self.conn.execute(
            "UPDATE tasks
             SET description = ?1, priority = ?2, status = ?3, category = ?4, due_date = ?5
             WHERE id = ?6",
            params![
                fields.description,
                fields.priority,
                fields.status,
                fields.category,
                fields.due_date,
                id,
            ],
        )?;
        Ok(())
    }

    /// 删除指定 ID 的任务；ID 不存在时静默无操作（幂等）
    pub fn delete(&self, id: i64) -> Result<()> {
        self.conn
            .execute("DELETE FROM tasks WHERE id = ?1", params![id])?;
        Ok(())
    }
}

fn row_to_task(row: &Row) -> rusqlite::Result<Task> {
    Ok(Task {
        id: row.get(0)?,
        description: row.get(1)?,
        priority: row.get(2)?,
        status: row.get(3)?,
        category: row.get(4)?,
        due_date: row.get(5)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(
        description: &str,
        priority: &str,
        status: &str,
        category: Option<&str>,
        due_date: Option<&str>,
    ) -> TaskFields {
        TaskFields {
            description: description.to_string(),
            priority: priority.to_string(),
            status: status.to_string(),
            category: category.map(String::from),
            due_date: due_date.map(String::from),
        }
    }

    #[test]
    fn test_add_then_list() {
        let store = TaskStore::open_in_memory().unwrap();

        let id = store
            .add(&fields(
                "Buy milk",
                "High",
                "Open",
                Some("Errands"),
                Some("2024-05-01"),
            ))
            .unwrap();

        let tasks = store.list(None).unwrap();
        assert_eq!(tasks.len(), 1);

        let task = &tasks[0];
        assert_eq!(task.id, id);
        assert_eq!(task.description, "Buy milk");
        assert_eq!(task.priority, "High");
        assert_eq!(task.status, "Open");
        assert_eq!(task.category.as_deref(), Some("Errands"));
        assert_eq!(task.due_date.as_deref(), Some("2024-05-01"));
    }

    #[test]
    fn test_ids_unique_and_in_insertion_order() {
        let store = TaskStore::open_in_memory().unwrap();

        let a = store.add(&fields("first", "Low", "Open", None, None)).unwrap();
        let b = store.add(&fields("second", "Low", "Open", None, None)).unwrap();
        let c = store.add(&fields("third", "Low", "Open", None, None)).unwrap();
        assert!(a < b && b < c);

        let tasks = store.list(None).unwrap();
        let ids: Vec<i64> = tasks.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![a, b, c]);
    }

    #[test]
    fn test_update_changes_only_target_row() {
        let store = TaskStore::open_in_memory().unwrap();

        let a = store
            .add(&fields("Buy milk", "High", "Open", Some("Errands"), Some("2024-05-01")))
            .unwrap();
        let b = store.add(&fields("Walk dog", "Low", "Open", None, None)).unwrap();

        store
            .update(
                a,
                &fields(
                    "Buy milk and eggs",
                    "High",
                    "Done",
                    Some("Errands"),
                    Some("2024-05-01"),
                ),
            )
            .unwrap();

        let tasks = store.list(None).unwrap();
        let task_a = tasks.iter().find(|t| t.id == a).unwrap();
        assert_eq!(task_a.description, "Buy milk and eggs");
        assert_eq!(task_a.status, "Done");

        let task_b = tasks.iter().find(|t| t.id == b).unwrap();
        assert_eq!(task_b.description, "Walk dog");
        assert_eq!(task_b.status, "Open");
    }

    #[test]
    fn test_update_missing_id_is_noop() {
        let store = TaskStore::open_in_memory().unwrap();
        store.add(&fields("only", "Low", "Open", None, None)).unwrap();

        store
            .update(9999, &fields("ghost", "High", "Done", None, None))
            .unwrap();

        let tasks = store.list(None).unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].description, "only");
    }

    #[test]
    fn test_delete_is_idempotent() {
        let store = TaskStore::open_in_memory().unwrap();

        let id = store.add(&fields("gone soon", "Low", "Open", None, None)).unwrap();
        assert_eq!(store.list(None).unwrap().len(), 1);

        store.delete(id).unwrap();
        assert_eq!(store.list(None).unwrap().len(), 0);

        // 再删一次，状态不变
        store.delete(id).unwrap();
        assert_eq!(store.list(None).unwrap().len(), 0);
    }

    #[test]
    fn test_filter_by_status() {
        let store = TaskStore::open_in_memory().unwrap();

        store.add(&fields("a", "Low", "Open", None, None)).unwrap();
        store.add(&fields("b", "Low", "Done", None, None)).unwrap();
        store.add(&fields("c", "Low", "Done", None, None)).unwrap();

        let filter = Filter::new(FilterField::Status, FilterOp::Eq, "Done");
        let done = store.list(Some(&filter)).unwrap();
        assert_eq!(done.len(), 2);
        assert!(done.iter().all(|t| t.status == "Done"));

        let filter = Filter::new(FilterField::Status, FilterOp::Ne, "Done");
        let open = store.list(Some(&filter)).unwrap();
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].description, "a");
    }

    #[test]
    fn test_filter_like_on_description() {
        let store = TaskStore::open_in_memory().unwrap();

        store.add(&fields("Buy milk", "Low", "Open", None, None)).unwrap();
        store.add(&fields("Buy eggs", "Low", "Open", None, None)).unwrap();
        store.add(&fields("Walk dog", "Low", "Open", None, None)).unwrap();

        let filter = Filter::new(FilterField::Description, FilterOp::Like, "Buy%");
        let bought = store.list(Some(&filter)).unwrap();
        assert_eq!(bought.len(), 2);
    }

    #[test]
    fn test_filter_field_from_name() {
        for field in [
            FilterField::Description,
            FilterField::Priority,
            FilterField::Status,
            FilterField::Category,
            FilterField::DueDate,
        ] {
            assert_eq!(FilterField::from_name(field.column()).unwrap(), field);
        }

        // 白名单之外的列名拒绝解析
        let err = FilterField::from_name("id; DROP TABLE tasks").unwrap_err();
        assert!(matches!(err, crate::error::TaskError::InvalidData(_)));
    }

    #[test]
    fn test_optional_fields_stored_as_null() {
        let store = TaskStore::open_in_memory().unwrap();

        store.add(&fields("no extras", "Low", "Open", None, None)).unwrap();

        let tasks = store.list(None).unwrap();
        assert_eq!(tasks[0].category, None);
        assert_eq!(tasks[0].due_date, None);
    }

    #[test]
    fn test_open_on_disk_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("tasks.db");

        let id = {
            let store = TaskStore::open(&db_path).unwrap();
            store.add(&fields("persisted", "High", "Open", None, None)).unwrap()
        };

        // 重新打开（schema 已存在），数据仍在
        let store = TaskStore::open(&db_path).unwrap();
        let tasks = store.list(None).unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id, id);
        assert_eq!(tasks[0].description, "persisted");
    }

    #[test]
    fn test_required_filled() {
        let mut f = fields("desc", "High", "Open", None, None);
        assert!(f.required_filled());

        f.status = "  ".to_string();
        assert!(!f.required_filled());

        f.status = "Open".to_string();
        f.description.clear();
        assert!(!f.required_filled());
    }
}
