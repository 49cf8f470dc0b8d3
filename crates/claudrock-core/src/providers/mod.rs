pub mod bedrock;
pub mod signing;

pub use bedrock::BedrockRuntime;
