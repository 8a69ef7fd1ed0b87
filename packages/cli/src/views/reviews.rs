use anyhow::{bail, Context, Result};
use api::{Review, ReviewBackend};
use clap::Subcommand;

use crate::app::App;

#[derive(Debug, Subcommand)]
pub enum ReviewsCommand {
    /// Reviews of a listing
    Property { id: i64 },
    /// Reviews about a user; yourself when no id is given
    User { id: Option<i64> },
    /// Review a stay
    Add {
        reservation: i64,
        /// 1 to 5
        #[arg(long)]
        rating: u8,
        #[arg(long, default_value = "")]
        comment: String,
    },
}

pub async fn run(app: &App, command: ReviewsCommand) -> Result<()> {
    match command {
        ReviewsCommand::Property { id } => {
            let reviews = app
                .api
                .reviews_for_property(id)
                .await
                .with_context(|| format!("could not load reviews of listing {id}"))?;
            print_reviews(&reviews);
        }
        ReviewsCommand::User { id } => {
            let id = match id {
                Some(id) => id,
                None => app.require_session()?.user_id,
            };
            let reviews = app
                .api
                .reviews_for_user(id)
                .await
                .with_context(|| format!("could not load reviews of user {id}"))?;
            print_reviews(&reviews);
        }
        ReviewsCommand::Add {
            reservation,
            rating,
            comment,
        } => {
            app.require_session()?;
            if !(1..=5).contains(&rating) {
                bail!("rating must be between 1 and 5");
            }
            let review = app
                .api
                .create_review(&Review::new(reservation, rating, comment))
                .await
                .context("could not post review")?;
            println!("{}", render_review(&review));
        }
    }
    Ok(())
}

fn print_reviews(reviews: &[Review]) {
    if reviews.is_empty() {
        println!("No reviews yet.");
    }
    for review in reviews {
        println!("{}", render_review(review));
    }
}

fn render_review(review: &Review) -> String {
    let stars = "*".repeat(usize::from(review.rating.min(5)));
    let author = review
        .author
        .as_ref()
        .map(|a| a.display_name())
        .unwrap_or_else(|| "anonymous".to_string());
    if review.comment.is_empty() {
        format!("{stars:<5} {author}")
    } else {
        format!("{stars:<5} {author}: {}", review.comment)
    }
}
