//! Team roster command handlers.

use std::sync::Arc;

use tabled::Tabled;

use realty_core::{Console, ImageUpload, TeamMember};

use crate::cli::{GlobalOpts, TeamArgs, TeamCommand};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct TeamRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Role")]
    role: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Phone")]
    phone: String,
    #[tabled(rename = "Photo")]
    photo: String,
}

impl From<&Arc<TeamMember>> for TeamRow {
    fn from(m: &Arc<TeamMember>) -> Self {
        Self {
            id: m.id.clone().unwrap_or_default(),
            name: m.name.clone(),
            role: m.role.clone(),
            email: m.email.clone(),
            phone: m.phone.clone(),
            photo: if m.image.is_some() { "yes".into() } else { String::new() },
        }
    }
}

pub async fn handle(console: &Console, args: TeamArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        TeamCommand::List { search } => {
            let mut screen = console.screen::<TeamMember>();
            screen.load().await?;
            screen.set_search(search.unwrap_or_default());

            let members = screen.visible();
            let out = output::render_list(
                &global.output,
                &members,
                |m| TeamRow::from(m),
                |m| m.id.clone().unwrap_or_default(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        TeamCommand::Add {
            name,
            email,
            phone,
            role,
            bio,
            image,
        } => {
            let upload = image.as_deref().map(ImageUpload::from_path).transpose()?;
            let mut notices = console.notices();

            let mut screen = console.screen::<TeamMember>();
            let draft = screen.form_mut().begin_add()?;
            draft.name = name.unwrap_or_default();
            draft.email = email.unwrap_or_default();
            draft.phone = phone.unwrap_or_default();
            draft.role = role.unwrap_or_default();
            draft.bio = bio.unwrap_or_default();
            draft.upload = upload;

            let created = screen.submit().await?;
            util::flush_notices(&mut notices, global);

            let out = output::render_single(
                &global.output,
                &*created,
                |m| format!("{} ({}) added", m.name, m.role),
                |m| m.id.clone().unwrap_or_default(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        TeamCommand::Delete { id } => {
            let id = util::require_id(&id, "id")?;
            if !util::confirm(&format!("Remove team member '{id}'?"), global.yes)? {
                return Ok(());
            }
            let mut notices = console.notices();

            let screen = console.screen::<TeamMember>();
            screen.load().await?;
            screen.delete(id).await?;
            util::flush_notices(&mut notices, global);
            Ok(())
        }
    }
}
