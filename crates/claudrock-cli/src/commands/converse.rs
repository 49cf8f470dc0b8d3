use anyhow::{Context, Result, bail};
use clap::Args;
use claudrock_core::{ClaudeClient, Message};
use std::fs;
use std::path::{Path, PathBuf};

use crate::{
    args::{Cli, CliConfig},
    client,
    commands::report,
    family::Family,
    output::{self, OutputLevel},
    spinner::spin_while,
};

#[derive(Args)]
pub struct ConverseArgs {
    /// JSON file holding an array of `{"role", "content"}` messages
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Short model name (haiku, sonnet or sonnet_v2)
    #[arg(short, long, default_value = ClaudeClient::DEFAULT_CHAT_MODEL)]
    pub model: String,
}

impl ConverseArgs {
    pub async fn run(
        &self,
        output_level: OutputLevel,
        cli_config: &CliConfig,
        cli: &Cli,
    ) -> Result<()> {
        if cli.family == Some(Family::Claude4) {
            output::warning(
                "conversations always use the claude3 client",
                output_level,
            );
        }

        let messages = load_messages(&self.file)?;
        output::detail(
            &format!("{} messages from {}", messages.len(), self.file.display()),
            output_level,
        );

        let claude = client::claude3(cli, cli_config)?;
        let result = spin_while(
            "Thinking",
            output_level,
            claude.conversation(messages, &self.model),
        )
        .await;
        report(&result, cli.json, output_level)
    }
}

/// Read a conversation file. Roles and ordering are left for the model to judge.
pub fn load_messages(path: &Path) -> Result<Vec<Message>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let messages: Vec<Message> = serde_json::from_str(&content)
        .with_context(|| format!("{} is not a JSON array of messages", path.display()))?;

    if messages.is_empty() {
        bail!("{} contains no messages", path.display());
    }
    Ok(messages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use claudrock_core::{MessageContent, Role};
    use tempfile::TempDir;

    #[test]
    fn test_load_messages() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.json");
        fs::write(
            &path,
            r#"[
                {"role": "user", "content": "What is 2+2?"},
                {"role": "assistant", "content": "4"},
                {"role": "user", "content": "And doubled?"}
            ]"#,
        )
        .unwrap();

        let messages = load_messages(&path).unwrap();

        assert_eq!(messages.len(), 3);
        assert_eq!(messages[1].role, Role::Assistant);
        assert_eq!(
            messages[2].content,
            MessageContent::Text("And doubled?".to_string())
        );
    }

    #[test]
    fn test_load_messages_rejects_bad_input() {
        let dir = TempDir::new().unwrap();

        let empty = dir.path().join("empty.json");
        fs::write(&empty, "[]").unwrap();
        assert!(load_messages(&empty).unwrap_err().to_string().contains("no messages"));

        let object = dir.path().join("object.json");
        fs::write(&object, r#"{"role": "user"}"#).unwrap();
        assert!(load_messages(&object).is_err());

        assert!(load_messages(&dir.path().join("missing.json")).is_err());
    }
}
