pub mod backup;
pub mod calendar;
pub mod config;
pub mod dashboard;
pub mod day;
pub mod db;
pub mod export;
pub mod init;
pub mod log;
pub mod prefs;
pub mod shift;
pub mod user;
pub mod view;
pub mod workplace;

use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::{DbPool, SqliteStore};
use crate::errors::{AppError, AppResult};
use crate::models::User;
use crate::store::UserRepository;

/// Open the configured database, bringing its schema up to date.
pub(crate) fn open_store(cfg: &Config) -> AppResult<SqliteStore> {
    let pool = DbPool::new(&cfg.database)?;
    init_db(&pool.conn)?;
    Ok(SqliteStore::new(pool))
}

/// The user commands act on: `--user`, else the configured default,
/// else the only existing user.
pub(crate) fn active_user(store: &SqliteStore, cli: &Cli, cfg: &Config) -> AppResult<User> {
    let email = cli.user.clone().or_else(|| cfg.default_user.clone());

    match email {
        Some(e) => store.find_user(&e)?.ok_or(AppError::UserNotFound(e)),
        None => {
            let mut users = store.list_users()?;
            if users.len() == 1 {
                Ok(users.remove(0))
            } else {
                Err(AppError::NoActiveUser)
            }
        }
    }
}
