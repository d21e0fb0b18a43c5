//! Small command line front end over the library, mostly for poking at a
//! live backend during development.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use courtside::api::HttpBackendClient;
use courtside::config::ApiConfig;
use courtside::models::render_blocks;
use courtside::services::{CatalogService, ConfirmationPoller, ConfirmationRequest, RetryPolicy};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "courtside=debug".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();

    let config = ApiConfig::new_from_env()?;
    let client = Arc::new(HttpBackendClient::new(config)?);

    match args.first().map(String::as_str) {
        Some("catalog") => {
            let sport = args.get(1).map(String::as_str);
            let groups = CatalogService::new(client).grouped_catalog(sport).await?;
            if groups.is_empty() {
                println!("no categories to show");
            }
            for group in groups {
                println!("{} (order {})", group.name, group.display_order);
                for course in group.courses {
                    println!("  - {} [{}] {}", course.name, course.sport, course.base_price);
                }
            }
        }
        Some("confirm") => {
            let booking_id = args.get(1).ok_or("usage: confirm <bookingId> [token]")?;
            let request = match args.get(2) {
                Some(token) => ConfirmationRequest::Package {
                    booking_id: booking_id.clone(),
                    token: token.clone(),
                },
                None => ConfirmationRequest::Course {
                    booking_id: booking_id.clone(),
                },
            };
            let policy = match &request {
                ConfirmationRequest::Course { .. } => RetryPolicy::COURSE,
                ConfirmationRequest::Package { .. } => RetryPolicy::PACKAGE,
            };
            match ConfirmationPoller::new(client, policy).run(&request).await {
                Ok(confirmation) => {
                    println!("booking {} confirmed", confirmation.reference);
                    println!(
                        "  type {:?}, {} participant(s), paid {} {}",
                        confirmation.booking_type,
                        confirmation.participants,
                        confirmation.final_amount,
                        confirmation.currency
                    );
                }
                Err(err) => {
                    println!("{}", err.user_message());
                    return Err(err.into());
                }
            }
        }
        Some("blog") => {
            let slug = args.get(1).ok_or("usage: blog <slug>")?;
            let post = client.fetch_blog_post(slug).await?;
            println!("# {}\n", post.title);
            println!("{}", render_blocks(&post.blocks));
        }
        _ => {
            eprintln!("usage: courtside <catalog [sport] | confirm <bookingId> [token] | blog <slug>>");
            std::process::exit(2);
        }
    }

    Ok(())
}
