//! Newest posts example.
//!
//! Lists the ten newest posts on Product Hunt.
//!
//! Run with: `PRODUCTHUNT_API_KEY=your-key cargo run --example newest_posts`

use producthunt::ClientBuilder;

#[tokio::main]
async fn main() -> Result<(), producthunt::Error> {
    // Reads PRODUCTHUNT_API_KEY (and optionally PRODUCTHUNT_ENDPOINT)
    let client = ClientBuilder::from_env()?.build()?;

    let products = client.list_newest().await?;
    for product in &products {
        println!("[{}] {} - {}", product.id, product.name, product.tagline);
    }
    println!("{} posts", products.len());

    Ok(())
}
