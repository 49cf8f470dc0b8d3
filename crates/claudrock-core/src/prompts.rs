//! Prompt templates
//!
//! Every template family is an enum whose `#[default]` variant doubles as the
//! fallback for unrecognized keys, so `from_key("whatever")` never fails.

use serde::Serialize;
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

macro_rules! fallback_from_key {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $ty {
                /// Parse a lowercase key, using the default variant for anything unknown
                pub fn from_key(key: &str) -> Self {
                    key.parse().unwrap_or_default()
                }
            }
        )+
    };
}

/// How much scaffolding to wrap around an image-analysis prompt
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, EnumIter, IntoStaticStr, Serialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AnalysisDepth {
    Standard,
    #[default]
    Detailed,
    Expert,
}

/// Code-generation template tier
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, EnumIter, IntoStaticStr, Serialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CodeComplexity {
    Simple,
    Standard,
    #[default]
    Advanced,
    Expert,
}

/// Reasoning template family
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, EnumIter, IntoStaticStr, Serialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ReasoningType {
    #[default]
    Analytical,
    Mathematical,
    Logical,
    Scientific,
}

/// Creative-writing style
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, EnumIter, IntoStaticStr, Serialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum WritingStyle {
    #[default]
    Narrative,
    Poetry,
    Screenplay,
    Academic,
    Business,
    Technical,
}

/// Creative-writing length tier
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, EnumIter, IntoStaticStr, Serialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum WritingLength {
    Short,
    #[default]
    Medium,
    Long,
}

fallback_from_key!(
    AnalysisDepth,
    CodeComplexity,
    ReasoningType,
    WritingStyle,
    WritingLength
);

impl AnalysisDepth {
    pub fn render(self, prompt: &str) -> String {
        match self {
            Self::Standard => prompt.to_string(),
            Self::Detailed => format!(
                "\nProvide a comprehensive analysis of this image:\n\n\
                 {prompt}\n\n\
                 Include:\n\
                 - Visual composition and elements\n\
                 - Colors, lighting, and mood\n\
                 - Objects, people, and activities\n\
                 - Context and setting\n\
                 - Technical aspects\n\
                 - Artistic qualities\n"
            ),
            Self::Expert => format!(
                "\nProvide an expert-level analysis of this image:\n\n\
                 {prompt}\n\n\
                 As an expert, analyze:\n\
                 - Technical composition and photographic elements\n\
                 - Historical, cultural, or artistic context\n\
                 - Symbolic meanings and interpretations\n\
                 - Quality assessment and critique\n\
                 - Professional insights and recommendations\n"
            ),
        }
    }
}

impl CodeComplexity {
    pub fn render(self, language: &str, description: &str) -> String {
        match self {
            Self::Simple => format!("Generate clean {language} code: {description}"),
            Self::Standard => format!(
                "\nGenerate well-structured {language} code:\n\n\
                 {description}\n\n\
                 Include:\n\
                 - Clear comments\n\
                 - Error handling\n\
                 - Usage examples\n"
            ),
            Self::Advanced => format!(
                "\nGenerate professional {language} code:\n\n\
                 {description}\n\n\
                 Requirements:\n\
                 - Robust error handling\n\
                 - Type annotations (where applicable)\n\
                 - Comprehensive docstrings\n\
                 - Performance considerations\n\
                 - Security best practices\n\
                 - Example usage\n"
            ),
            Self::Expert => format!(
                "\nGenerate enterprise-grade {language} code:\n\n\
                 {description}\n\n\
                 Requirements:\n\
                 - Production-ready quality\n\
                 - Comprehensive error handling and logging\n\
                 - Performance optimization\n\
                 - Security best practices\n\
                 - Extensive documentation and type hints\n\
                 - Unit tests included\n\
                 - Design patterns where appropriate\n\
                 - Scalability considerations\n"
            ),
        }
    }
}

/// The single code template used by the Claude 3 client
pub fn expert_programmer_prompt(language: &str, description: &str) -> String {
    format!(
        "\nYou are an expert {language} programmer. Generate clean, well-documented code for:\n\n\
         {description}\n\n\
         Requirements:\n\
         - Include proper error handling\n\
         - Add clear comments explaining the logic\n\
         - Follow {language} best practices\n\
         - Include usage examples\n\
         - Make it production-ready\n"
    )
}

impl ReasoningType {
    pub fn render(self, problem: &str) -> String {
        match self {
            Self::Analytical => format!(
                "\nAnalyze this problem using advanced analytical reasoning:\n\n\
                 {problem}\n\n\
                 Please provide:\n\
                 1. Problem decomposition\n\
                 2. Key variables and relationships\n\
                 3. Step-by-step logical analysis\n\
                 4. Multiple perspectives\n\
                 5. Conclusion with confidence assessment\n"
            ),
            Self::Mathematical => format!(
                "\nSolve this mathematical problem with rigorous step-by-step reasoning:\n\n\
                 {problem}\n\n\
                 Show all work, explain each step, verify your answer, and discuss alternative approaches.\n"
            ),
            Self::Logical => format!(
                "\nApply formal logical reasoning to this problem:\n\n\
                 {problem}\n\n\
                 Use logical principles, identify premises and conclusions, and show your reasoning chain.\n"
            ),
            Self::Scientific => format!(
                "\nApply scientific reasoning and methodology to analyze:\n\n\
                 {problem}\n\n\
                 Include hypothesis formation, evidence evaluation, and scientific conclusions.\n"
            ),
        }
    }
}

impl WritingStyle {
    pub fn render(self, prompt: &str) -> String {
        match self {
            Self::Narrative => format!("Write a compelling narrative story: {prompt}"),
            Self::Poetry => format!("Create beautiful, evocative poetry: {prompt}"),
            Self::Screenplay => format!("Write in screenplay format: {prompt}"),
            Self::Academic => format!("Write in academic style: {prompt}"),
            Self::Business => format!("Write professional business content: {prompt}"),
            Self::Technical => format!("Write clear technical documentation: {prompt}"),
        }
    }
}

impl WritingLength {
    /// Output-token budget for the tier
    pub fn max_tokens(self) -> u32 {
        match self {
            Self::Short => 2000,
            Self::Medium => 4000,
            Self::Long => 8000,
        }
    }
}

/// Task category → recommended model, in display order
pub static RECOMMENDATIONS: [(&str, &str); 9] = [
    ("chat", "sonnet4 - Best balance of capability and cost"),
    ("reasoning", "opus4.1 - Most advanced reasoning capabilities"),
    ("coding", "sonnet4 - Optimized for code generation"),
    ("creative", "opus4.1 - Best for creative and artistic tasks"),
    ("analysis", "opus4 - Excellent for document and data analysis"),
    ("speed", "haiku3.5 - Fastest responses, good quality"),
    ("cost", "haiku - Most cost-effective option"),
    ("vision", "opus4.1 - Best image analysis capabilities"),
    ("research", "opus4 - Deep analysis and research tasks"),
];

pub const DEFAULT_RECOMMENDATION: &str = "sonnet4 - Good general purpose model";

pub fn recommendation_for(task_type: &str) -> &'static str {
    RECOMMENDATIONS
        .iter()
        .find(|(task, _)| *task == task_type)
        .map(|(_, recommendation)| *recommendation)
        .unwrap_or(DEFAULT_RECOMMENDATION)
}
