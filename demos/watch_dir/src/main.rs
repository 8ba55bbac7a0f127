use dirview::prelude::*;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

const POLL_INTERVAL: Duration = Duration::from_millis(250);

fn print_listing(model: &DirectoryModel) {
    println!("{}", model.current_directory().display());
    if !model.last_error().is_empty() {
        println!("  error: {}", model.last_error());
        return;
    }
    for row in 0..model.row_count() {
        println!(
            "  {}{} {:>10} {}  {}",
            model.data(row, FileRole::FileKind),
            model.data(row, FileRole::Permissions),
            model.data(row, FileRole::Size),
            model.data(row, FileRole::Modified),
            model.data(row, FileRole::Filename),
        );
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info,dirview_core=debug")).init();

    // Usage: watch_dir [DIRECTORY]
    let dir = match std::env::args_os().nth(1) {
        Some(arg) => PathBuf::from(arg),
        None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    };

    let settings = match smol::block_on(SettingsRegistry::new()) {
        Ok(settings) => settings,
        Err(e) => {
            log::warn!("Falling back to default settings: {}", e);
            SettingsRegistry::with_defaults()
        },
    };
    let settings = Arc::new(settings);

    let watcher = FileSystemWatcher::new()?;
    let mut model = DirectoryModel::new(Box::new(watcher), settings.clone()).with_observer(LoggingObserver);
    model.watch_settings(settings.subscribe());
    model.set_active(true);
    model.set_directory(dir);
    print_listing(&model);

    loop {
        if model.process_pending_changes() {
            print_listing(&model);
        }
        std::thread::sleep(POLL_INTERVAL);
    }
}
