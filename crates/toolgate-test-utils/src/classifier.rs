use async_trait::async_trait;
use toolgate_core::{Classification, CoreError, IntentClassifier};

/// Classifier that always returns the same classification.
#[derive(Debug, Clone)]
pub struct FixedClassifier {
    classification: Classification,
}

impl FixedClassifier {
    pub fn new(classification: Classification) -> Self {
        Self { classification }
    }
}

#[async_trait]
impl IntentClassifier for FixedClassifier {
    fn name(&self) -> &str {
        "fixed"
    }

    async fn classify(&self, _query: &str) -> Result<Classification, CoreError> {
        Ok(self.classification.clone())
    }
}

/// Classifier whose backend always errors.
#[derive(Debug, Default, Clone)]
pub struct FailingClassifier;

#[async_trait]
impl IntentClassifier for FailingClassifier {
    fn name(&self) -> &str {
        "failing"
    }

    async fn classify(&self, _query: &str) -> Result<Classification, CoreError> {
        Err(CoreError::Classifier("backend unavailable".to_string()))
    }
}
