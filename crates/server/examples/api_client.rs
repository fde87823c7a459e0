//! Walks through the catalog API against a running server.
//!
//! Start the server first (`cargo run -p catalog-server`), then run
//! `cargo run -p catalog-server --example api_client`.

use reqwest::Client;
use serde_json::{json, Value};

const SERVER_URL: &str = "http://localhost:3000";
const API_KEY: &str = "default-secret-key-123";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let client = Client::new();

    println!("1. Health Check:");
    let resp = client.get(format!("{SERVER_URL}/health")).send().await?;
    println!("Status: {}", resp.status());
    println!("Body: {}", resp.text().await?);
    println!();

    println!("2. Request Without API Key:");
    let resp = client
        .get(format!("{SERVER_URL}/api/products"))
        .send()
        .await?;
    println!("Status: {}", resp.status());
    println!("Body: {}", resp.text().await?);
    println!();

    println!("3. List Kitchen Products:");
    let resp = client
        .get(format!("{SERVER_URL}/api/products"))
        .query(&[("category", "kitchen"), ("limit", "5")])
        .header("x-api-key", API_KEY)
        .send()
        .await?;
    println!("Status: {}", resp.status());
    println!("Body: {}", resp.text().await?);
    println!();

    println!("4. Create Product:");
    let resp = client
        .post(format!("{SERVER_URL}/api/products"))
        .header("x-api-key", API_KEY)
        .json(&json!({
            "name": "Standing Desk",
            "description": "Height-adjustable desk",
            "price": 349.0,
            "category": "Office",
            "inStock": true
        }))
        .send()
        .await?;
    println!("Status: {}", resp.status());
    let created: Value = resp.json().await?;
    println!("Body: {created}");
    println!();

    let id = created["data"]["id"].as_str().unwrap_or_default().to_string();

    println!("5. Update Price:");
    let resp = client
        .put(format!("{SERVER_URL}/api/products/{id}"))
        .header("x-api-key", API_KEY)
        .json(&json!({ "price": 299.0 }))
        .send()
        .await?;
    println!("Status: {}", resp.status());
    println!("Body: {}", resp.text().await?);
    println!();

    println!("6. Search:");
    let resp = client
        .get(format!("{SERVER_URL}/api/products/search"))
        .query(&[("q", "desk")])
        .header("x-api-key", API_KEY)
        .send()
        .await?;
    println!("Status: {}", resp.status());
    println!("Body: {}", resp.text().await?);
    println!();

    println!("7. Stats:");
    let resp = client
        .get(format!("{SERVER_URL}/api/products/stats"))
        .header("x-api-key", API_KEY)
        .send()
        .await?;
    println!("Status: {}", resp.status());
    println!("Body: {}", resp.text().await?);
    println!();

    println!("8. Delete Twice:");
    for _ in 0..2 {
        let resp = client
            .delete(format!("{SERVER_URL}/api/products/{id}"))
            .header("x-api-key", API_KEY)
            .send()
            .await?;
        println!("Status: {}", resp.status());
        println!("Body: {}", resp.text().await?);
    }

    Ok(())
}
