use crate::cli::commands::open_store;
use crate::cli::parser::{Cli, Commands, UserAction};
use crate::config::Config;
use crate::db::log::audit_quiet;
use crate::errors::{AppError, AppResult};
use crate::models::{User, new_id};
use crate::store::UserRepository;
use crate::ui::messages::{info, success};
use crate::utils::table::{Column, Table};
use chrono::Local;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::User { action } = &cli.command else {
        return Ok(());
    };

    let store = open_store(cfg)?;

    match action {
        UserAction::Add { email, name } => {
            let email = email.trim().to_lowercase();
            if !email.contains('@') {
                return Err(AppError::InvalidValue(format!("not an email address: {email}")));
            }

            let user = User {
                id: new_id(),
                email: email.clone(),
                name: name.trim().to_string(),
                created_at: Local::now().to_rfc3339(),
            };
            store.create_user(&user)?;
            success(format!("User added: {email}"));

            if cfg.default_user.is_none() && !cli.test {
                let mut updated = cfg.clone();
                updated.default_user = Some(email.clone());
                updated.save()?;
                info(format!("{email} is now the default user."));
            }
        }

        UserAction::List => {
            let users = store.list_users()?;
            if users.is_empty() {
                info("No users yet. Add one with `tiplogger user add <email>`.");
                return Ok(());
            }

            let active = cli.user.as_deref().or(cfg.default_user.as_deref());
            let mut table = Table::new(
                vec![
                    Column::left(""),
                    Column::left("Email"),
                    Column::left("Name"),
                    Column::left("Created"),
                ],
                &cfg.separator_char,
            );
            for u in users {
                let marker = if active.is_some_and(|a| a.eq_ignore_ascii_case(&u.email)) {
                    "*"
                } else {
                    ""
                };
                let created = u.created_at.get(0..10).unwrap_or(&u.created_at).to_string();
                table.add_row(vec![marker.to_string(), u.email, u.name, created]);
            }
            print!("{}", table.render());
        }

        UserAction::Use { email } => {
            let user = store
                .find_user(email)?
                .ok_or_else(|| AppError::UserNotFound(email.clone()))?;

            if cli.test {
                info(format!("Test mode: {} not saved as default user.", user.email));
            } else {
                let mut updated = cfg.clone();
                updated.default_user = Some(user.email.clone());
                updated.save()?;
                success(format!("Default user set to {}", user.email));
            }
            audit_quiet(store.conn(), "user_use", &user.id, &user.email);
        }
    }

    Ok(())
}
