use claudrock_core::{ClaudeClient, Message};

fn preview(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    // 1. Client from AWS_REGION / AWS_BEARER_TOKEN_BEDROCK
    let client = ClaudeClient::from_env()?;

    // 2. Simple chat with the cheapest model
    let result = client
        .chat(
            "What's the weather like for AI development today?",
            "haiku",
            ClaudeClient::DEFAULT_MAX_TOKENS,
            ClaudeClient::DEFAULT_TEMPERATURE,
        )
        .await;

    match result.response() {
        Some(text) => println!("🤖 Claude Haiku: {text}"),
        None => eprintln!("❌ Chat failed: {}", result.error().unwrap_or_default()),
    }
    if let Some(usage) = result.usage() {
        println!("📊 Usage: {}", serde_json::Value::Object(usage.clone()));
    }

    // 3. Code generation
    let code = client
        .generate_code(
            "Create a simple REST API endpoint using Flask",
            ClaudeClient::DEFAULT_LANGUAGE,
            ClaudeClient::DEFAULT_CODE_MODEL,
        )
        .await;

    if let Some(text) = code.response() {
        println!("\n💻 Generated Flask Code:\n{}...", preview(text, 300));
    }

    // 4. Multi-turn conversation
    let conversation = client
        .conversation(
            vec![
                Message::user("What is 5 * 7?"),
                Message::assistant("5 * 7 = 35"),
                Message::user("What about 6 * 8?"),
            ],
            "sonnet",
        )
        .await;

    println!("\n💬 Conversation:");
    println!("{}", serde_json::to_string_pretty(&conversation)?);

    Ok(())
}
