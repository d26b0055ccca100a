//! Data model shared by the router, the quality assessor and the pipeline

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

/// Minimum overall score for an answer to be delivered at all.
pub const RESPONSE_THRESHOLD: f64 = 0.6;

/// Kind of question being asked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryType {
    Factual,
    Analytical,
    Summarization,
    Procedural,
    General,
}

impl QueryType {
    /// Every query type, in classification order.
    pub const ALL: [QueryType; 5] = [
        QueryType::Factual,
        QueryType::Analytical,
        QueryType::Summarization,
        QueryType::Procedural,
        QueryType::General,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            QueryType::Factual => "factual",
            QueryType::Analytical => "analytical",
            QueryType::Summarization => "summarization",
            QueryType::Procedural => "procedural",
            QueryType::General => "general",
        }
    }
}

impl fmt::Display for QueryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QueryType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "factual" => Ok(QueryType::Factual),
            "analytical" => Ok(QueryType::Analytical),
            "summarization" | "summary" => Ok(QueryType::Summarization),
            "procedural" => Ok(QueryType::Procedural),
            "general" | "default" => Ok(QueryType::General),
            other => Err(Error::InvalidInput(format!("unknown query type '{}'", other))),
        }
    }
}

/// How much work a query needs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryComplexity {
    Simple,
    Medium,
    Complex,
}

impl QueryComplexity {
    pub const ALL: [QueryComplexity; 3] = [
        QueryComplexity::Simple,
        QueryComplexity::Medium,
        QueryComplexity::Complex,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            QueryComplexity::Simple => "simple",
            QueryComplexity::Medium => "medium",
            QueryComplexity::Complex => "complex",
        }
    }
}

impl fmt::Display for QueryComplexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Checks to run on a draft answer after generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostProcessingCheck {
    ConfidenceCheck,
    StructureCheck,
    StepValidation,
    ComplexityValidation,
}

impl PostProcessingCheck {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostProcessingCheck::ConfidenceCheck => "confidence_check",
            PostProcessingCheck::StructureCheck => "structure_check",
            PostProcessingCheck::StepValidation => "step_validation",
            PostProcessingCheck::ComplexityValidation => "complexity_validation",
        }
    }
}

impl fmt::Display for PostProcessingCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tunable parameters chosen for one query.
///
/// `prompt_template_id` of [`QueryType::General`] stands for the default
/// template. Always `2 <= retrieval_k <= 10` and `800 <= max_tokens <= 3000`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessingStrategy {
    pub retrieval_k: usize,
    pub temperature: f32,
    pub max_tokens: u32,
    pub prompt_template_id: QueryType,
    pub post_processing: Vec<PostProcessingCheck>,
}

impl Default for ProcessingStrategy {
    fn default() -> Self {
        Self {
            retrieval_k: 4,
            temperature: 0.1,
            max_tokens: 1500,
            prompt_template_id: QueryType::General,
            post_processing: Vec::new(),
        }
    }
}

impl ProcessingStrategy {
    pub fn requires(&self, check: PostProcessingCheck) -> bool {
        self.post_processing.contains(&check)
    }
}

/// Result of analyzing one incoming query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryAnalysis {
    pub query: String,
    #[serde(rename = "type")]
    pub query_type: QueryType,
    pub complexity: QueryComplexity,
    pub strategy: ProcessingStrategy,
    pub confidence: f64,
}

/// Provenance of a retrieved passage
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_file: Option<String>,
    #[serde(default, deserialize_with = "page_label", skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_type: Option<String>,
}

/// A retrieved text passage, read-only to the core
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceDocument {
    pub content: String,
    #[serde(default)]
    pub metadata: SourceMetadata,
}

impl SourceDocument {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            metadata: SourceMetadata::default(),
        }
    }

    pub fn with_source_file(mut self, source_file: impl Into<String>) -> Self {
        self.metadata.source_file = Some(source_file.into());
        self
    }

    pub fn with_page(mut self, page: impl Into<String>) -> Self {
        self.metadata.page = Some(page.into());
        self
    }

    pub fn with_file_type(mut self, file_type: impl Into<String>) -> Self {
        self.metadata.file_type = Some(file_type.into());
        self
    }
}

// Loaders write page numbers either as integers or as labels like "iv".
fn page_label<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Page {
        Number(u64),
        Label(String),
    }

    Ok(Option::<Page>::deserialize(deserializer)?.map(|page| match page {
        Page::Number(n) => n.to_string(),
        Page::Label(label) => label,
    }))
}

/// Banded summary of the overall quality score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
    VeryLow,
}

impl ConfidenceLevel {
    /// High [0.8, 1.0], Medium [0.6, 0.8), Low [0.4, 0.6), VeryLow below.
    pub fn from_score(score: f64) -> Self {
        if score >= 0.8 {
            ConfidenceLevel::High
        } else if score >= 0.6 {
            ConfidenceLevel::Medium
        } else if score >= 0.4 {
            ConfidenceLevel::Low
        } else {
            ConfidenceLevel::VeryLow
        }
    }

    /// Title-cased name shown to users.
    pub fn label(&self) -> &'static str {
        match self {
            ConfidenceLevel::High => "High",
            ConfidenceLevel::Medium => "Medium",
            ConfidenceLevel::Low => "Low",
            ConfidenceLevel::VeryLow => "Very Low",
        }
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Quality assessment of one (query, draft answer, sources) triple
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityMetrics {
    pub relevance: f64,
    pub completeness: f64,
    pub accuracy: f64,
    pub clarity: f64,
    pub source_quality: f64,
    pub overall: f64,
    pub confidence_level: ConfidenceLevel,
    pub should_respond: bool,
    pub issues: Vec<String>,
    pub suggestions: Vec<String>,
}
