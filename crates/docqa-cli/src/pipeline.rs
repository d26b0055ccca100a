//! End-to-end question answering over indexed documents

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use docqa_core::{GenerationConfig, Generator, QualityMetrics, QueryAnalysis, Result, Retriever};
use docqa_quality::{GateState, QualityAssessor};
use docqa_rag::{build_context, retrieval_confidence, SourceSummary};
use docqa_router::{render_prompt, QueryRouter, ResponseValidation};

/// Answer given when nothing has been indexed yet
pub const NO_DOCUMENTS_MESSAGE: &str =
    "No documents have been uploaded yet. Please upload some documents first.";

/// Passages returned by a search when no `k` is given
pub const DEFAULT_SEARCH_K: usize = 5;

/// Everything produced while answering one question
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QaResponse {
    pub question: String,
    pub answer: String,
    /// `None` when no draft was generated
    pub gate_state: Option<GateState>,
    pub analysis: QueryAnalysis,
    pub metrics: Option<QualityMetrics>,
    pub validation: Option<ResponseValidation>,
    pub sources: Vec<SourceSummary>,
    pub retrieval_confidence: f64,
    pub created_at: DateTime<Utc>,
}

/// Routes a question, retrieves passages, generates a draft and gates it
pub struct QaPipeline<G: Generator, R: Retriever> {
    generator: G,
    retriever: R,
    router: QueryRouter,
    assessor: QualityAssessor,
}

impl<G: Generator, R: Retriever> QaPipeline<G, R> {
    pub fn new(generator: G, retriever: R) -> Self {
        Self {
            generator,
            retriever,
            router: QueryRouter::new(),
            assessor: QualityAssessor::new(),
        }
    }

    /// Passages similar to the query, without generating an answer
    pub async fn search_similar(&self, query: &str, k: usize) -> Result<Vec<SourceSummary>> {
        docqa_rag::search_similar(&self.retriever, query, k).await
    }

    /// Answer a question from the retriever's documents
    pub async fn ask(&self, question: &str) -> Result<QaResponse> {
        let analysis = self.router.analyze(question);

        if self.retriever.count().await? == 0 {
            info!("no documents indexed, skipping generation");
            return Ok(QaResponse {
                question: question.to_string(),
                answer: NO_DOCUMENTS_MESSAGE.to_string(),
                gate_state: None,
                analysis,
                metrics: None,
                validation: None,
                sources: Vec::new(),
                retrieval_confidence: 0.0,
                created_at: Utc::now(),
            });
        }

        let strategy = &analysis.strategy;
        let sources = self.retriever.retrieve(question, strategy.retrieval_k).await?;
        debug!(requested = strategy.retrieval_k, retrieved = sources.len(), "passages retrieved");

        let context = build_context(&sources);
        let prompt = render_prompt(self.router.template(&analysis), &context, question);

        let config = GenerationConfig::for_strategy(strategy).with_model(self.generator.model_id());
        let draft = self.generator.generate(&prompt, &config).await?;

        let validation = self.router.validate(&draft.text, &analysis);
        let (metrics, gated) = self.assessor.review(question, &draft.text, &sources);

        info!(
            state = %gated.state,
            valid = validation.is_valid,
            tokens = draft.tokens_used,
            "question answered"
        );

        Ok(QaResponse {
            question: question.to_string(),
            answer: gated.text,
            gate_state: Some(gated.state),
            sources: sources.iter().map(SourceSummary::from).collect(),
            retrieval_confidence: retrieval_confidence(&sources),
            analysis,
            metrics: Some(metrics),
            validation: Some(validation),
            created_at: Utc::now(),
        })
    }
}
