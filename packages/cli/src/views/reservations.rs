use anyhow::{bail, Context, Result};
use api::{PaymentBackend, Reservation, ReservationBackend, Role};
use clap::Subcommand;

use crate::app::App;

#[derive(Debug, Subcommand)]
pub enum ReservationsCommand {
    /// Your bookings as a guest, or bookings of one of your listings
    List {
        #[arg(long)]
        property: Option<i64>,
    },
    /// Confirm a pending booking (hosts)
    Confirm { id: i64 },
    /// Cancel a pending or confirmed booking
    Cancel { id: i64 },
    /// Pay the host out for a completed stay (admins)
    Release { payment_id: i64 },
}

pub async fn run(app: &App, command: ReservationsCommand) -> Result<()> {
    let session = app.require_session()?;
    match command {
        ReservationsCommand::List { property } => {
            let reservations = match property {
                Some(id) => app.api.reservations_for_property(id).await,
                None => app.api.reservations_for_guest(session.user_id).await,
            }
            .context("could not load reservations")?;
            if reservations.is_empty() {
                println!("No reservations.");
            }
            for reservation in &reservations {
                println!("{}", render_reservation(reservation));
            }
        }
        ReservationsCommand::Confirm { id } => {
            let reservation = app
                .api
                .confirm_reservation(id)
                .await
                .with_context(|| format!("could not confirm reservation {id}"))?;
            println!("{}", render_reservation(&reservation));
        }
        ReservationsCommand::Cancel { id } => {
            let current = app
                .api
                .get_reservation(id)
                .await
                .with_context(|| format!("could not load reservation {id}"))?;
            if !current.is_cancellable() {
                bail!("reservation {id} can no longer be cancelled");
            }
            let reservation = app
                .api
                .cancel_reservation(id)
                .await
                .with_context(|| format!("could not cancel reservation {id}"))?;
            println!("{}", render_reservation(&reservation));
        }
        ReservationsCommand::Release { payment_id } => {
            if session.role != Role::Admin {
                bail!("only administrators can release funds");
            }
            app.api
                .release_funds(payment_id)
                .await
                .with_context(|| format!("could not release payment {payment_id}"))?;
            println!("Released payment #{payment_id}.");
        }
    }
    Ok(())
}

fn render_reservation(reservation: &Reservation) -> String {
    let id = reservation
        .id
        .map(|id| format!("#{id}"))
        .unwrap_or_else(|| "#?".to_string());
    let listing = reservation
        .property
        .as_ref()
        .map(|p| p.title.as_str())
        .unwrap_or("unknown listing");
    let status = reservation
        .status
        .map(|s| format!("{s:?}"))
        .unwrap_or_else(|| "Unknown".to_string());
    let total = reservation
        .total_price
        .map(|t| format!(", total {t}"))
        .unwrap_or_default();
    format!(
        "{id} {listing}: {} to {} [{status}]{total}",
        reservation.start_date, reservation.end_date
    )
}
