// src/main.rs

use std::io;

use anyhow::Context;
use log::{info, warn};

use sakila_console::db::{get_database_stats, seed_demo_data, verify_database_integrity};
use sakila_console::{logging, AppConfig, Console, Database};

fn main() -> anyhow::Result<()> {
    // 1. CONFIGURATION + LOGGING
    let config = AppConfig::load();
    logging::init(config.level_filter()?, Some(&config.log_file))
        .context("failed to set up logging")?;

    // 2. DATABASE
    let db_path = config.database_path()?;
    let db = Database::open(&db_path)
        .with_context(|| format!("failed to open database at {}", db_path.display()))?;

    if let Err(e) = verify_database_integrity(&db.connection()) {
        warn!("{}", e);
    }
    if config.seed {
        seed_demo_data(&db.connection())?;
    }

    let stats = get_database_stats(&db.connection())?;
    info!(
        "Database ready: {} ({} bytes, {} actors, {} films, {} customers, {} copies)",
        db.location(),
        stats.size_bytes,
        stats.actor_count,
        stats.film_count,
        stats.customer_count,
        stats.inventory_count
    );

    // 3. CONSOLE
    // Repositories hold connection handles; they are dropped before close.
    {
        let stdin = io::stdin();
        let mut console = Console::new(
            stdin.lock(),
            io::stdout(),
            db.connection(),
            config.cache_settings(),
            config.report_dir.clone(),
        );
        console.run()?;
    }

    db.close()?;
    Ok(())
}
