use claudrock_core::{Claude4Client, ReasoningType, WritingLength, WritingStyle};

fn preview(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let client = Claude4Client::from_env()?;

    println!("📋 Available models:");
    for entry in client.catalog().entries() {
        if let Some(meta) = entry.metadata {
            println!("  {:<10} {:<11} {:<9} {}", entry.short_name, meta.generation, meta.cost, meta.best_for);
        }
    }

    // Compare a few models on the same prompt
    println!("\n🔄 Comparing Models:");
    let comparison = client
        .compare_models(
            "Explain the concept of machine learning in one paragraph.",
            Some(&["haiku", "sonnet4", "opus4"]),
        )
        .await;

    for (model, entry) in &comparison.comparisons {
        if entry.is_error() {
            println!("\n{}: ❌ {}", model.to_uppercase(), entry.response);
        } else {
            println!("\n{}: {}...", model.to_uppercase(), preview(&entry.response, 100));
        }
    }

    // Structured reasoning
    println!("\n🧠 Advanced Reasoning Example:");
    let reasoning = client
        .advanced_reasoning(
            "How might artificial intelligence change software development in the next 5 years?",
            ReasoningType::Analytical,
            "opus4.1",
        )
        .await;

    match reasoning.response() {
        Some(text) => println!("Claude Opus 4.1: {}...", preview(text, 200)),
        None => eprintln!("❌ {}", reasoning.error().unwrap_or_default()),
    }

    // Short poem, smallest token budget
    let poem = client
        .creative_writing(
            "the first line of code ever written",
            WritingStyle::Poetry,
            WritingLength::Short,
            Claude4Client::DEFAULT_WRITING_MODEL,
        )
        .await;

    if let Some(text) = poem.response() {
        println!("\n✍️ Poem:\n{text}");
    }

    let advice = client.get_model_recommendations("analysis");
    println!("\n💡 For analysis: {}", advice.recommendation);

    Ok(())
}
