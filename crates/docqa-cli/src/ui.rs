//! Terminal rendering for the CLI

use colored::*;

use docqa_core::{ConfidenceLevel, QualityMetrics, QueryAnalysis};
use docqa_quality::{GateState, GatedResponse};
use docqa_rag::{CollectionStats, SourceSummary};

use crate::{ChatMessage, ChatStatistics, Favorite, QaResponse, Role};

const SOURCE_PREVIEW_CHARS: usize = 160;

/// Score as a percentage with one decimal
pub fn percent(score: f64) -> String {
    format!("{:.1}%", score * 100.0)
}

fn level_badge(level: ConfidenceLevel) -> ColoredString {
    let label = level.label();
    match level {
        ConfidenceLevel::High => label.green().bold(),
        ConfidenceLevel::Medium => label.cyan().bold(),
        ConfidenceLevel::Low => label.yellow().bold(),
        ConfidenceLevel::VeryLow => label.red().bold(),
    }
}

fn state_badge(state: GateState) -> ColoredString {
    match state {
        GateState::Passthrough => "✅ delivered".green(),
        GateState::Annotated => "📊 delivered with confidence note".yellow(),
        GateState::Refused => "⚠️  withheld".red(),
    }
}

/// Print the routing decision for a query
pub fn print_analysis(analysis: &QueryAnalysis) {
    let strategy = &analysis.strategy;

    println!("{}", "Query analysis".bold());
    println!("  {} {}", "type:".dimmed(), analysis.query_type.to_string().blue().bold());
    println!("  {} {}", "complexity:".dimmed(), analysis.complexity);
    println!("  {} {}", "confidence:".dimmed(), percent(analysis.confidence));
    println!("{}", "Strategy".bold());
    println!("  {} {}", "retrieval k:".dimmed(), strategy.retrieval_k);
    println!("  {} {}", "temperature:".dimmed(), strategy.temperature);
    println!("  {} {}", "max tokens:".dimmed(), strategy.max_tokens);
    println!("  {} {}", "template:".dimmed(), strategy.prompt_template_id);

    if !strategy.post_processing.is_empty() {
        let checks: Vec<String> = strategy
            .post_processing
            .iter()
            .map(|check| check.to_string())
            .collect();
        println!("  {} {}", "checks:".dimmed(), checks.join(", "));
    }
}

/// Print sub-scores, confidence level, issues and suggestions
pub fn print_metrics(metrics: &QualityMetrics) {
    println!(
        "{} {} ({})",
        "Quality:".bold(),
        level_badge(metrics.confidence_level),
        percent(metrics.overall)
    );

    let rows = [
        ("relevance", metrics.relevance),
        ("completeness", metrics.completeness),
        ("accuracy", metrics.accuracy),
        ("clarity", metrics.clarity),
        ("source quality", metrics.source_quality),
    ];
    for (name, value) in rows {
        println!("  {:<15} {}", format!("{}:", name).dimmed(), percent(value));
    }

    if !metrics.issues.is_empty() {
        println!("{}", "Issues:".yellow().bold());
        for issue in &metrics.issues {
            println!("  {} {}", "•".yellow(), issue);
        }
    }

    if !metrics.suggestions.is_empty() {
        println!("{}", "Suggestions:".cyan().bold());
        for suggestion in &metrics.suggestions {
            println!("  {} {}", "→".cyan(), suggestion);
        }
    }
}

/// Print the text chosen for delivery
pub fn print_gated(gated: &GatedResponse) {
    println!("{}", state_badge(gated.state));
    println!();
    println!("{}", gated.text);
}

/// Print retrieved passages with their provenance
pub fn print_sources(sources: &[SourceSummary]) {
    if sources.is_empty() {
        return;
    }

    println!("{}", "Sources:".bold());
    for (i, source) in sources.iter().enumerate() {
        println!(
            "  {} {} {}",
            format!("{}.", i + 1).dimmed(),
            source.source.green(),
            format!("(page {}, {})", source.page, source.file_type).dimmed()
        );

        let preview: String = source.content.chars().take(SOURCE_PREVIEW_CHARS).collect();
        println!("     {}", preview.replace('\n', " ").dimmed());
    }
}

/// Print a full pipeline response
pub fn print_response(response: &QaResponse) {
    match response.gate_state {
        Some(state) => println!("{}", state_badge(state)),
        None => println!("{}", "ℹ️  nothing to search".blue()),
    }
    println!();
    println!("{}", response.answer);
    println!();

    print_sources(&response.sources);
    if !response.sources.is_empty() {
        println!(
            "  {} {}",
            "retrieval confidence:".dimmed(),
            percent(response.retrieval_confidence)
        );
        println!();
    }

    if let Some(metrics) = &response.metrics {
        print_metrics(metrics);
    }

    if let Some(validation) = &response.validation {
        if !validation.issues.is_empty() {
            println!("{}", "Validation:".yellow().bold());
            for issue in &validation.issues {
                println!("  {} {}", "•".yellow(), issue);
            }
        }
    }

    println!(
        "{}",
        format!(
            "{} query • answered {}",
            response.analysis.query_type,
            response.created_at.format("%Y-%m-%d %H:%M:%S UTC")
        )
        .dimmed()
    );
}

pub fn print_collection_stats(stats: &CollectionStats) {
    println!(
        "{} {} passages from {} files",
        "📚".blue(),
        stats.total_documents,
        stats.total_sources
    );
}

/// Print chat messages, oldest first
pub fn print_messages(messages: &[&ChatMessage]) {
    if messages.is_empty() {
        println!("{}", "No messages.".dimmed());
        return;
    }

    for message in messages {
        let speaker = match message.role {
            Role::User => "you".green().bold(),
            Role::Assistant => "docqa".blue().bold(),
        };
        println!(
            "{} {} {}",
            speaker,
            message.timestamp.format("%Y-%m-%d %H:%M").to_string().dimmed(),
            format!("[{}]", message.id).dimmed()
        );
        println!("{}", message.content);

        if let Some(metadata) = &message.metadata {
            let mut details = vec![
                format!("{} sources", metadata.document_count),
                format!("retrieval {}", percent(metadata.confidence_score)),
            ];
            if let Some(quality) = metadata.quality_score {
                details.push(format!("quality {}", percent(quality)));
            }
            println!("{}", details.join(" • ").dimmed());
        }
        println!();
    }
}

pub fn print_favorites(favorites: &[Favorite]) {
    if favorites.is_empty() {
        println!("{}", "No favorites yet.".dimmed());
        return;
    }

    for favorite in favorites {
        println!("{} {}", "⭐".yellow(), favorite.title.bold());
        if !favorite.question.is_empty() {
            println!("  {} {}", "Q:".dimmed(), favorite.question);
        }
        println!("  {} {}", "A:".dimmed(), favorite.answer);
        println!();
    }
}

pub fn print_chat_statistics(stats: &ChatStatistics) {
    println!("{}", "Chat statistics".bold());
    println!("  {} {}", "messages:".dimmed(), stats.total_messages);
    println!("  {} {}", "questions:".dimmed(), stats.user_messages);
    println!("  {} {}", "answers:".dimmed(), stats.assistant_messages);
    println!("  {} {}", "favorites:".dimmed(), stats.favorites_count);
    if let (Some(first), Some(last)) = (stats.first_message_date, stats.last_message_date) {
        println!(
            "  {} {} to {}",
            "period:".dimmed(),
            first.format("%Y-%m-%d"),
            last.format("%Y-%m-%d")
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent() {
        assert_eq!(percent(0.890065), "89.0%");
        assert_eq!(percent(0.0), "0.0%");
        assert_eq!(percent(1.0), "100.0%");
    }
}
