//! Property listing command handlers.

use std::sync::Arc;

use tabled::Tabled;

use realty_core::{CategoryFilter, Console, CoreError, Property, Resource};

use crate::cli::{GlobalOpts, PropertiesArgs, PropertiesCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct PropertyRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Location")]
    location: String,
    #[tabled(rename = "Type")]
    property_type: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Beds/Baths")]
    rooms: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Featured")]
    featured: String,
}

impl From<&Arc<Property>> for PropertyRow {
    fn from(p: &Arc<Property>) -> Self {
        Self {
            id: p.id.clone().unwrap_or_default(),
            title: p.title.clone(),
            location: p.location.clone(),
            property_type: p.property_type.clone(),
            price: format!("{:.0}", p.price),
            rooms: format!("{}/{}", p.bedrooms, p.bathrooms),
            status: p.status.clone(),
            featured: if p.featured { "★".into() } else { String::new() },
        }
    }
}

fn detail(p: &Property) -> String {
    format!(
        "{}\n  ID:       {}\n  Location: {}\n  Featured: {}",
        p.title,
        p.id.as_deref().unwrap_or("-"),
        p.location,
        if p.featured { "yes" } else { "no" },
    )
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    console: &Console,
    args: PropertiesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        PropertiesCommand::List {
            search,
            property_type,
            status,
            featured,
        } => {
            let mut screen = console.screen::<Property>();
            screen.load().await?;
            screen.set_search(search.unwrap_or_default());
            screen.set_category("type", CategoryFilter::from(property_type));
            screen.set_category("status", CategoryFilter::from(status));
            if featured {
                screen.set_category("featured", CategoryFilter::only("true"));
            }

            let listings = screen.visible();
            let out = output::render_list(
                &global.output,
                &listings,
                |p| PropertyRow::from(p),
                |p| p.id.clone().unwrap_or_default(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        PropertiesCommand::Feature { id } => {
            let id = util::require_id(&id, "id")?;
            let mut notices = console.notices();

            let screen = console.screen::<Property>();
            screen.load().await?;
            let patch = screen
                .snapshot()
                .get(id)
                .map(|p| p.toggle_featured())
                .ok_or_else(|| CoreError::NotFound {
                    entity: Property::NAME,
                    id: id.to_owned(),
                })?;
            let updated = screen.update(id, patch).await?;
            util::flush_notices(&mut notices, global);

            let out = output::render_single(&global.output, &*updated, detail, |p| {
                p.featured.to_string()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        PropertiesCommand::Delete { id } => {
            let id = util::require_id(&id, "id")?;
            if !util::confirm(&format!("Delete property '{id}'?"), global.yes)? {
                return Ok(());
            }
            let mut notices = console.notices();

            let screen = console.screen::<Property>();
            screen.load().await?;
            screen.delete(id).await?;
            util::flush_notices(&mut notices, global);
            Ok(())
        }
    }
}
