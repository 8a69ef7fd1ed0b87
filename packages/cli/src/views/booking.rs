use anyhow::{anyhow, bail, Context, Result};
use api::{
    mock_transaction_id, NewReservation, PaymentBackend, PropertyBackend, ReservationBackend,
};
use clap::Args;
use client::{quote_interval, Quote, StayInterval};
use rust_decimal::Decimal;

use crate::app::App;

#[derive(Debug, Args)]
pub struct QuoteArgs {
    /// Nightly rate; taken from the listing when `--property` is given
    #[arg(long, required_unless_present = "property")]
    rate: Option<Decimal>,
    #[arg(long, conflicts_with = "rate")]
    property: Option<i64>,
    /// Check-in, e.g. 2024-03-01
    #[arg(long)]
    start: Option<String>,
    /// Check-out, e.g. 2024-03-04
    #[arg(long)]
    end: Option<String>,
}

#[derive(Debug, Args)]
pub struct BookArgs {
    property: i64,
    #[arg(long)]
    start: String,
    #[arg(long)]
    end: String,
}

pub async fn quote(app: &App, args: QuoteArgs) -> Result<()> {
    let rate = match (args.rate, args.property) {
        (Some(rate), _) => rate,
        (None, Some(id)) => {
            app.api
                .get_property(id)
                .await
                .with_context(|| format!("could not load listing {id}"))?
                .price_per_night
        }
        (None, None) => bail!("either --rate or --property is required"),
    };
    let quote = client::quote(rate, args.start.as_deref(), args.end.as_deref());
    println!("{}", render_quote(rate, &quote));
    Ok(())
}

/// Quote, reserve, then settle with a mock transaction id.
pub async fn book(app: &App, args: BookArgs) -> Result<()> {
    let session = app.require_session()?;
    let property = app
        .api
        .get_property(args.property)
        .await
        .with_context(|| format!("could not load listing {}", args.property))?;
    if !property.is_bookable() {
        bail!("listing #{} is not open for booking", property.id);
    }

    let interval = StayInterval::parse(Some(&args.start), Some(&args.end))
        .map_err(|reason| anyhow!("{reason}"))?;
    let quote = quote_interval(property.price_per_night, interval);
    if let Quote::NotComputable(reason) = quote {
        bail!("{reason}");
    }
    println!("{}", render_quote(property.price_per_night, &quote));

    let request = NewReservation {
        start_date: interval.start.date(),
        end_date: interval.end.date(),
    };
    let reservation = app
        .api
        .create_reservation(session.user_id, property.id, &request)
        .await
        .context("reservation was refused")?;
    let reservation_id = reservation
        .id
        .context("server returned a reservation without an id")?;
    if let Some(total) = reservation.total_price {
        if Some(total) != quote.total() {
            tracing::info!(%total, quoted = ?quote.total(), "server price differs from quote");
        }
    }

    let payment = app
        .api
        .process_payment(reservation_id, &mock_transaction_id())
        .await
        .with_context(|| format!("payment for reservation {reservation_id} failed"))?;
    println!(
        "Reservation #{reservation_id} created, payment #{} {:?} ({}).",
        payment.id, payment.status, payment.amount
    );
    Ok(())
}

fn render_quote(rate: Decimal, quote: &Quote) -> String {
    match quote {
        Quote::Computable { nights, total } => {
            let unit = if *nights == 1 { "night" } else { "nights" };
            format!("{nights} {unit} x {rate} = {total}")
        }
        Quote::NotComputable(reason) => format!("No quote: {reason}"),
    }
}
