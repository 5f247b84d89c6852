//! Cached content walkthrough.
//!
//! This example demonstrates:
//! - Creating cached content with a TTL
//! - Listing cached content page by page
//! - Extending the TTL and moving the expiry to a fixed instant
//! - Looking up the model the cache was created for
//! - Deleting cached content
//!
//! # Usage
//!
//! Set your API key as an environment variable:
//! ```bash
//! export GEMINI_API_KEY="your-api-key-here"
//! ```
//!
//! Then run:
//! ```bash
//! cargo run --example cached_content
//! ```

use std::time::Duration;

use chrono::Utc;
use integrations_genai::caching::{CachedContent, CachedContents, CreateCachedContentOptions};
use integrations_genai::models::get_model_with;
use integrations_genai::{FunctionCallingMode, FunctionDeclaration, GenAiClientImpl};

const HANDBOOK: &str = "\
Section 1. Every request is one HTTP call.
Section 2. Nothing is retried locally.
Section 3. A cache lives on the server until it expires or is deleted.
";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Cached Content Example ===\n");

    let client = GenAiClientImpl::from_env()?;
    let caches = CachedContents::from_client(&client);

    println!("1. Creating cached content...");
    let mut cache = caches
        .create(
            "gemini-1.5-flash-001",
            CreateCachedContentOptions::new()
                .display_name("handbook")
                .system_instruction("Answer only from the handbook.")
                .content(HANDBOOK)
                .function(FunctionDeclaration::new("lookup_section", "Fetch a handbook section by number"))
                .tool_config(FunctionCallingMode::Auto)
                .ttl(Duration::from_secs(600)),
        )
        .await?;
    println!("{cache}\n");

    println!("2. Listing cached content...");
    list_all(&caches).await?;

    println!("3. Extending the TTL to 30 minutes...");
    cache.update_ttl(Duration::from_secs(1800)).await?;
    println!("   expires at {:?}\n", cache.expire_time());

    println!("4. Moving the expiry to two hours from now...");
    cache.update_expire_time(Utc::now() + chrono::Duration::hours(2)).await?;
    println!("   expires at {:?}\n", cache.expire_time());

    println!("5. Looking up the cached model...");
    let model = get_model_with(&client, cache.model()).await?;
    println!("{model}\n");

    println!("6. Deleting cached content...");
    cache.delete().await?;
    match cache.delete().await {
        Err(e) if e.is_not_found() => println!("   second delete: {e}"),
        other => println!("   second delete: {other:?}"),
    }

    println!("\n=== Example Complete ===");
    Ok(())
}

async fn list_all(caches: &CachedContents) -> Result<(), Box<dyn std::error::Error>> {
    let mut pager = caches.list(Some(5));
    let mut seen: Vec<CachedContent> = Vec::new();

    while let Some(cache) = pager.next().await? {
        println!(
            "   {} ({} tokens, expires {:?})",
            cache.name(),
            cache.usage_metadata().total_token_count,
            cache.expire_time()
        );
        seen.push(cache);
    }

    println!("   {} cached contents over {} page(s)\n", seen.len(), pager.pages_fetched());
    Ok(())
}
