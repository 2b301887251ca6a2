use anyhow::Result;
use clap::Parser;
use shared::{Assistant, Config, NewsClient};
use std::io::{self as stdio, Write};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "news-chat")]
#[command(about = "Chat with a hosted model and search Google News from the terminal")]
struct Args {
    /// News category to browse and to use as the search fallback feed
    #[arg(short, long, default_value = "최신뉴스")]
    category: String,

    /// Instruction sent with the developer role (empty disables it)
    #[arg(short, long, default_value = "Answer in Korean")]
    developer: String,

    /// Sampling temperature, shown for reference only
    #[arg(short, long, default_value = "0.7")]
    temperature: f32,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let config = Config::from_env()?;

    let categories = NewsClient::categories();
    if !categories.contains(&args.category.as_str()) {
        anyhow::bail!(
            "Unknown category: {}. Available: {}",
            args.category,
            categories.join(", ")
        );
    }

    let mut assistant = Assistant::new(config)?;
    assistant.category = args.category;
    assistant.developer_instruction = args.developer;
    assistant.temperature = args.temperature;

    println!(
        "✓ Model: {} @ {}",
        assistant.config().model,
        assistant.config().endpoint
    );
    println!("✓ Category: {}", assistant.category);
    println!("Commands: /news  /refresh  /reset  /info  /quit\n");
    if let Some(greeting) = assistant.session.messages.first() {
        println!("assistant> {}\n", greeting.content);
    }

    loop {
        print!("you> ");
        stdio::stdout().flush()?;

        let mut line = String::new();
        if stdio::stdin().read_line(&mut line)? == 0 {
            break; // EOF
        }

        match line.trim() {
            "/quit" | "/exit" => break,
            "/reset" => {
                assistant.reset_conversation();
                println!("✓ Conversation cleared\n");
            }
            "/refresh" => {
                assistant.refresh_news();
                println!("✓ News cache cleared\n");
            }
            "/info" => {
                let config = assistant.config();
                println!("model: {}", config.model);
                println!("endpoint: {}", config.endpoint);
                println!("temperature: {}", assistant.temperature);
                println!(
                    "news ttl: {}s | max items: {}\n",
                    config.news_ttl_secs, config.max_news_items
                );
            }
            "/news" => match assistant.category_news().await {
                Ok(items) if items.is_empty() => println!("⚠ No news available\n"),
                Ok(items) => {
                    println!("📰 {}:", assistant.category);
                    for (index, item) in items.iter().enumerate() {
                        println!("  {}. {} ({})", index + 1, item.title, item.source);
                    }
                    println!();
                }
                Err(e) => eprintln!("⚠ Failed to load news: {:#}\n", e),
            },
            input => match assistant.handle_input(input).await {
                Ok(Some(reply)) => println!("assistant> {}\n", reply),
                Ok(None) => {}
                Err(e) => eprintln!("⚠ {:#}\n", e),
            },
        }
    }

    Ok(())
}
