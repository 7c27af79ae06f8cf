use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::log::audit_quiet;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::success;
use crate::utils::path::expand_arg;

/// Handle the `init` command
///
/// Creates the config directory and file (skipped in test mode), the
/// SQLite database and applies all pending migrations.
pub fn handle(cli: &Cli) -> AppResult<()> {
    let custom = cli.db.as_deref().map(expand_arg);
    let db_path = Config::init_all(custom.as_deref(), cli.test)?;
    let db_str = db_path.to_string_lossy().to_string();

    println!("⚙️  Initializing tiplogger…");
    if !cli.test {
        println!("📄 Config file : {}", Config::config_file().display());
    }
    println!("🗄️  Database   : {}", db_str);

    let pool = DbPool::new(&db_str)?;
    init_db(&pool.conn)?;

    audit_quiet(
        &pool.conn,
        "init",
        "",
        &format!("Database initialized at {db_str}"),
    );

    success(format!("Database initialized at {db_str}"));
    Ok(())
}
