use std::sync::Arc;

use courtside::api::HttpBackendClient;
use courtside::config::ApiConfig;
use courtside::services::{CatalogService, ConfirmationPoller, ConfirmationRequest, RetryPolicy};

// These talk to a real backend and need COURTSIDE_API_URL (plus the admin
// credentials for the admin tests) in the environment or in .env.

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored --test-threads=1
async fn test_fetch_grouped_catalog_from_backend() {
    dotenvy::dotenv().ok();

    let config = ApiConfig::new_from_env().expect("Failed to load config");
    let client = Arc::new(HttpBackendClient::new(config).expect("Failed to create client"));

    let groups = CatalogService::new(client)
        .grouped_catalog(None)
        .await
        .expect("Failed to fetch catalog");

    println!("Fetched {} category groups", groups.len());
    for group in &groups {
        println!("{} (order {}):", group.name, group.display_order);
        for course in &group.courses {
            println!("  - {} [{}] {}", course.name, course.sport, course.base_price);
        }
    }

    for group in &groups {
        assert!(!group.name.is_empty(), "Category name should not be empty");
        assert!(!group.courses.is_empty(), "Groups should never be empty");
        for course in &group.courses {
            assert!(course.is_active, "Inactive courses must not be listed");
        }
    }
    for pair in groups.windows(2) {
        assert!(
            pair[0].display_order <= pair[1].display_order,
            "Groups should be sorted by display order"
        );
    }
    println!("✓ Catalog structure verified!");
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored --test-threads=1
async fn test_fetch_blog_posts_from_backend() {
    dotenvy::dotenv().ok();

    let config = ApiConfig::new_from_env().expect("Failed to load config");
    let client = HttpBackendClient::new(config).expect("Failed to create client");

    let posts = client
        .fetch_blog_posts()
        .await
        .expect("Failed to fetch blog posts");
    println!("Fetched {} blog posts", posts.len());

    for post in &posts {
        println!("{} ({} blocks)", post.title, post.blocks.len());
        assert!(!post.slug.is_empty(), "Post slug should not be empty");
        assert!(post.is_published, "Public endpoint must only serve published posts");
    }
    println!("✓ Blog posts verified!");
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored --test-threads=1
async fn test_poll_confirmation_for_known_booking() {
    dotenvy::dotenv().ok();

    let booking_id = std::env::var("COURTSIDE_TEST_BOOKING_ID")
        .expect("COURTSIDE_TEST_BOOKING_ID must point at a confirmed booking");

    let config = ApiConfig::new_from_env().expect("Failed to load config");
    let client = Arc::new(HttpBackendClient::new(config).expect("Failed to create client"));

    let poller = ConfirmationPoller::new(client, RetryPolicy::COURSE);
    let confirmation = poller
        .run(&ConfirmationRequest::Course { booking_id })
        .await
        .expect("Failed to fetch confirmation");

    println!(
        "Confirmation {}: {:?}, {} {} for {} participant(s)",
        confirmation.reference,
        confirmation.booking_type,
        confirmation.final_amount,
        confirmation.currency,
        confirmation.participants
    );
    assert!(!confirmation.reference.is_empty());
    println!("✓ Confirmation verified!");
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored --test-threads=1
async fn test_admin_login_and_booking_calendar() {
    dotenvy::dotenv().ok();

    let email = std::env::var("COURTSIDE_ADMIN_EMAIL").expect("COURTSIDE_ADMIN_EMAIL not set");
    let password =
        std::env::var("COURTSIDE_ADMIN_PASSWORD").expect("COURTSIDE_ADMIN_PASSWORD not set");

    let config = ApiConfig::new_from_env().expect("Failed to load config");
    let client = HttpBackendClient::new(config).expect("Failed to create client");

    let user = client
        .login(&email, &password)
        .await
        .expect("Failed to log in");
    println!("Logged in as {} ({})", user.display_name, user.role);

    let today = chrono::Utc::now().date_naive();
    let bookings = client
        .bookings_between(today - chrono::Duration::days(7), today)
        .await
        .expect("Failed to fetch booking calendar");
    println!("Fetched {} bookings for the past week", bookings.len());
    for booking in &bookings {
        println!(
            "{} - {} on {} ({})",
            booking.reference, booking.course_name, booking.date, booking.status
        );
    }

    client.logout();
    assert!(
        client.session().token().is_none(),
        "Logout should drop the stored token"
    );
    println!("✓ Admin flow verified!");
}
