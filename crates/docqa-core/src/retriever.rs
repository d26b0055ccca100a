//! Retriever trait

use async_trait::async_trait;
use std::sync::Arc;

use crate::{Result, SourceDocument};

/// Trait for passage retrievers
///
/// Implementations own their documents; the decision core only reads the
/// passages they return.
#[async_trait]
pub trait Retriever: Send + Sync {
    /// Return up to `k` passages relevant to the query, best first
    async fn retrieve(&self, query: &str, k: usize) -> Result<Vec<SourceDocument>>;

    /// Number of passages available for retrieval
    async fn count(&self) -> Result<usize>;
}

#[async_trait]
impl<T: Retriever + ?Sized> Retriever for Arc<T> {
    async fn retrieve(&self, query: &str, k: usize) -> Result<Vec<SourceDocument>> {
        (**self).retrieve(query, k).await
    }

    async fn count(&self) -> Result<usize> {
        (**self).count().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(Vec<SourceDocument>);

    #[async_trait]
    impl Retriever for Fixed {
        async fn retrieve(&self, _query: &str, k: usize) -> Result<Vec<SourceDocument>> {
            Ok(self.0.iter().take(k).cloned().collect())
        }

        async fn count(&self) -> Result<usize> {
            Ok(self.0.len())
        }
    }

    #[tokio::test]
    async fn test_shared_retriever_forwards() {
        let shared: Arc<dyn Retriever> = Arc::new(Fixed(vec![
            SourceDocument::new("one"),
            SourceDocument::new("two"),
        ]));

        assert_eq!(shared.count().await.unwrap(), 2);
        let docs = shared.retrieve("anything", 1).await.unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].content, "one");
    }
}
