//! User command handlers.

use std::sync::Arc;

use strum::IntoEnumIterator;
use tabled::Tabled;

use realty_core::{CategoryFilter, Console, User, UserPatch, UserRole};

use crate::cli::{GlobalOpts, UsersArgs, UsersCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct UserRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Role")]
    role: String,
}

impl From<&Arc<User>> for UserRow {
    fn from(u: &Arc<User>) -> Self {
        Self {
            id: u.id.clone().unwrap_or_default(),
            name: u.name.clone(),
            email: u.email.clone(),
            role: u.role.clone(),
        }
    }
}

fn parse_role(raw: &str) -> Result<UserRole, CliError> {
    raw.parse().map_err(|_| CliError::Validation {
        field: "role".into(),
        reason: format!(
            "expected one of: {}",
            UserRole::iter().map(|r| r.to_string()).collect::<Vec<_>>().join(", ")
        ),
    })
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(console: &Console, args: UsersArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        UsersCommand::List { search, role } => {
            let mut screen = console.screen::<User>();
            screen.load().await?;
            screen.set_search(search.unwrap_or_default());
            screen.set_category("role", CategoryFilter::from(role));

            let users = screen.visible();
            let out = output::render_list(
                &global.output,
                &users,
                |u| UserRow::from(u),
                |u| u.id.clone().unwrap_or_default(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        UsersCommand::SetRole { id, role } => {
            let role = parse_role(&role)?;
            let id = util::require_id(&id, "id")?;
            let mut notices = console.notices();

            let screen = console.screen::<User>();
            screen.load().await?;
            let updated = screen.update(id, UserPatch::role(role)).await?;
            util::flush_notices(&mut notices, global);

            let out = output::render_single(
                &global.output,
                &*updated,
                |u| format!("{} <{}> is now {}", u.name, u.email, u.role),
                |u| u.role.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
