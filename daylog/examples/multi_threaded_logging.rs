use std::{path::PathBuf, sync::Arc};

use daylog::{LineEditor, logger_config};

struct Prompt;

impl LineEditor for Prompt {
    fn refresh(&self) -> std::io::Result<()> {
        use std::io::Write;
        let mut stdout = std::io::stdout().lock();
        write!(stdout, "> ")?;
        stdout.flush()
    }
}

fn main() {
    let dir = PathBuf::from("/tmp/daylog_example");
    let _ = std::fs::remove_dir_all(&dir);

    let logger = logger_config()
        .with_log_dir(&dir)
        .with_retention_days(7)
        .init_global()
        .unwrap();
    let prompt: Arc<dyn LineEditor> = Arc::new(Prompt);
    logger.set_line_editor(&prompt);

    daylog::info!("Hello, world!");
    let handles: Vec<_> = (0..5)
        .map(|i| {
            std::thread::spawn(move || {
                daylog::warning!("Hello, world from thread {i}!");
                daylog::debug!("thread {i} done");
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    daylog::important!("all threads joined");
    daylog::error!("failed: {}", "disk full");
    daylog::fatal!("this one stands out");
    daylog::success!("recovered");
    logger.clear_line_editor();
    daylog::print_raw!("\n--- {} ---\n", "file copy");

    let path = logger.current_log_file().unwrap();
    print!("{}", std::fs::read_to_string(path).unwrap());
}
