//! Full client demo - runs every query against the live API
//!
//! Run with: cargo run --example full_demo

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use producthunt::{Client, Product, DEFAULT_ENDPOINT, SDK_VERSION};
use std::time::Duration;

// Configuration - Set via environment variables
fn get_api_key() -> String {
    std::env::var("PRODUCTHUNT_API_KEY").expect("PRODUCTHUNT_API_KEY environment variable is required")
}
fn get_endpoint() -> String {
    std::env::var("PRODUCTHUNT_ENDPOINT").unwrap_or_else(|_| DEFAULT_ENDPOINT.into())
}
fn get_date() -> String {
    std::env::var("PRODUCTHUNT_DATE").unwrap_or_else(|_| "2024-03-01".into())
}
const TOPIC: &str = "developer-tools";

fn header(text: &str) {
    println!();
    println!("{}", format!(" {} ", text).on_blue().bold());
    println!();
}

fn info(label: &str, value: &str) {
    println!("  {}: {}", label.dimmed(), value);
}

fn success(text: &str) {
    println!("{} {}", "✔".green(), text);
}

fn warn(text: &str) {
    println!("{} {}", "⚠".yellow(), text);
}

fn error(text: &str) {
    println!("{} {}", "✖".red(), text);
}

fn print_products(products: &[Product]) {
    for (i, p) in products.iter().enumerate() {
        println!("  {} {} {}", format!("{:>2}.", i + 1).dimmed(), p.name.bold(), p.tagline);
        if !p.url.is_empty() {
            println!("      {}", p.url.dimmed());
        }
    }
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

#[tokio::main]
async fn main() -> Result<(), producthunt::Error> {
    header("Configuration");

    let api_key = get_api_key();
    let endpoint = get_endpoint();
    let date = get_date();
    info("Client Version", SDK_VERSION);
    info("Endpoint", &endpoint);
    info("Date", &date);

    let client = Client::builder(api_key).endpoint(endpoint).build()?;

    // ========== Newest ==========
    header("Newest Posts");

    let pb = spinner("Fetching newest posts...");
    let newest = client.list_newest().await;
    pb.finish_and_clear();
    let slug = match newest {
        Ok(products) => {
            success(&format!("{} posts", products.len()));
            print_products(&products);
            products.first().map(|p| p.name.to_lowercase().replace(' ', "-"))
        }
        Err(e) => {
            error(&format!("Failed: {}", e));
            None
        }
    };

    // ========== Details ==========
    header("Post Details");

    let slug = slug.unwrap_or_else(|| "notion".into());
    info("Slug", &slug);
    let pb = spinner("Looking up post...");
    let details = client.get_details(&slug).await;
    pb.finish_and_clear();
    match details {
        Ok(Some(product)) => {
            success("Post found");
            info("Name", &product.name);
            info("Tagline", &product.tagline);
            info("Website", &product.website);
            info("Description", &product.description);
        }
        Ok(None) => warn("No post matches that slug"),
        Err(e) => error(&format!("Failed: {}", e)),
    }

    // ========== Topic ==========
    header("Posts by Topic");

    info("Topic", TOPIC);
    let pb = spinner("Fetching topic posts...");
    let by_topic = client.list_by_topic(TOPIC).await;
    pb.finish_and_clear();
    match by_topic {
        Ok(products) => {
            success(&format!("{} posts", products.len()));
            print_products(&products[..products.len().min(10)]);
            let with_thumbnail = products.iter().filter(|p| !p.thumbnail.is_empty()).count();
            info("With thumbnail", &with_thumbnail.to_string());
        }
        Err(e) => error(&format!("Failed: {}", e)),
    }

    // ========== Ranked by date ==========
    header("Top Posts of the Day");

    let pb = spinner("Fetching top five...");
    let top = client.list_top_by_date(&date).await;
    pb.finish_and_clear();
    match top {
        Ok(products) => {
            success(&format!("{} posts", products.len()));
            print_products(&products);
        }
        Err(e) => error(&format!("Failed: {}", e)),
    }

    let pb = spinner("Fetching top twenty...");
    let ranked = client.list_ranked_by_date(&date, 20).await;
    pb.finish_and_clear();
    match ranked {
        Ok(products) => {
            success(&format!("{} posts", products.len()));
            print_products(&products);
        }
        Err(e) => error(&format!("Failed: {}", e)),
    }

    println!();
    Ok(())
}
