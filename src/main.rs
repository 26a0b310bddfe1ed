mod app;
mod error;
mod event;
mod store;
mod theme;
mod ui;

use std::io;
use std::panic;
use std::path::PathBuf;

use clap::Parser;
use ratatui::DefaultTerminal;

use app::App;
use store::tasks::TaskStore;
use theme::Theme;

/// A to-do list TUI backed by a local SQLite database
#[derive(Parser, Debug)]
#[command(name = "taskdeck", version, about)]
struct Cli {
    /// 数据库文件路径（默认 ~/.taskdeck/tasks.db）
    #[arg(long, value_name = "PATH")]
    db: Option<PathBuf>,
}

fn main() -> error::Result<()> {
    // Enable backtraces by default so panics show call stacks
    if std::env::var("RUST_BACKTRACE").is_err() {
        // SAFETY: called at the very start of main, before any other threads
        unsafe {
            std::env::set_var("RUST_BACKTRACE", "1");
        }
    }

    // 解析命令行参数
    let cli = Cli::parse();

    // 打开数据库（在进入 TUI 之前，打开失败时直接报错退出）
    let db_path = match cli.db {
        Some(path) => path,
        None => store::default_db_path()?,
    };
    let task_store = TaskStore::open(&db_path)?;

    // 加载持久化的主题配置
    let config = store::config::load_config();
    let theme = Theme::from_name(&config.theme.name);

    // Set up panic hook to restore terminal state on panic
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        ratatui::restore();
        original_hook(panic_info);
    }));

    // 初始化终端
    let mut terminal = ratatui::init();

    // 创建应用
    let mut app = App::new(task_store, theme);

    // 运行主循环
    let result = run(&mut terminal, &mut app);

    // 恢复终端
    ratatui::restore();

    result?;
    Ok(())
}

fn run(terminal: &mut DefaultTerminal, app: &mut App) -> io::Result<()> {
    loop {
        // 渲染界面
        terminal.draw(|frame| ui::render(frame, app))?;

        // 处理事件
        if !event::handle_events(app)? {
            break;
        }
    }

    Ok(())
}
