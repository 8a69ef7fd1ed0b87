use anyhow::{bail, Context, Result};
use api::{NewProperty, Property, PropertyBackend, PropertySearch, Role};
use clap::Subcommand;
use rust_decimal::Decimal;

use crate::app::App;

#[derive(Debug, Subcommand)]
pub enum PropertiesCommand {
    /// Search listings; without filters every listing is returned
    Search {
        #[arg(long)]
        city: Option<String>,
        #[arg(long)]
        country: Option<String>,
        #[arg(long)]
        min_price: Option<Decimal>,
        #[arg(long)]
        max_price: Option<Decimal>,
        #[arg(long)]
        guests: Option<u32>,
    },
    /// Show one listing in full
    Show { id: i64 },
    /// Publish a listing (hosts only); it stays pending until verified
    Create {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long)]
        address: String,
        #[arg(long)]
        city: String,
        #[arg(long)]
        country: String,
        #[arg(long)]
        price_per_night: Decimal,
        #[arg(long, default_value_t = 1)]
        max_guests: u32,
    },
}

pub async fn run(app: &App, command: PropertiesCommand) -> Result<()> {
    match command {
        PropertiesCommand::Search {
            city,
            country,
            min_price,
            max_price,
            guests,
        } => {
            let mut search = PropertySearch::new().price_range(min_price, max_price);
            if let Some(city) = city {
                search = search.city(city);
            }
            if let Some(country) = country {
                search = search.country(country);
            }
            if let Some(guests) = guests {
                search = search.guests(guests);
            }
            let properties = if search.query_pairs().is_empty() {
                app.api.list_properties().await
            } else {
                app.api.search_properties(&search).await
            }
            .context("search failed")?;

            if properties.is_empty() {
                println!("No listings match.");
            }
            for property in &properties {
                println!("{}", render_summary(property));
            }
        }
        PropertiesCommand::Show { id } => {
            let property = app
                .api
                .get_property(id)
                .await
                .with_context(|| format!("could not load listing {id}"))?;
            println!("{}", render_details(&property));
        }
        PropertiesCommand::Create {
            title,
            description,
            address,
            city,
            country,
            price_per_night,
            max_guests,
        } => {
            let session = app.require_session()?;
            if session.role != Role::Host {
                bail!("only hosts can publish listings");
            }
            let new = NewProperty {
                title,
                description,
                address,
                city,
                country,
                price_per_night,
                max_guests,
            };
            let property = app
                .api
                .create_property(session.user_id, &new)
                .await
                .context("could not publish listing")?;
            println!("Created listing #{} ({:?}).", property.id, property.legal_status);
        }
    }
    Ok(())
}

pub(crate) fn render_summary(property: &Property) -> String {
    let flag = if property.is_bookable() { "" } else { "  (not bookable)" };
    format!(
        "#{:<5} {}, {} {}: {}/night, up to {} guests{flag}",
        property.id,
        property.city,
        property.country,
        property.title,
        property.price_per_night,
        property.max_guests,
    )
}

fn render_details(property: &Property) -> String {
    let mut out = render_summary(property);
    out.push_str(&format!("\n  {}", property.address));
    if let Some(host) = &property.host {
        out.push_str(&format!("\n  Host: {}", host.display_name()));
    }
    if !property.description.is_empty() {
        out.push_str(&format!("\n\n{}", property.description));
    }
    if !property.amenities.is_empty() {
        let names: Vec<&str> = property.amenities.iter().map(|a| a.name.as_str()).collect();
        out.push_str(&format!("\n\nAmenities: {}", names.join(", ")));
    }
    out.push_str(&format!("\nLegal status: {:?}", property.legal_status));
    out
}
