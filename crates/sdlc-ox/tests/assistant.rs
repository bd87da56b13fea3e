use async_trait::async_trait;
use sdlc_ox::{
    Assistant, AssistantError, ClassificationResult, CompletionBackend, TaskKind,
};
use watsonx_ox::WatsonxRequestError;

/// Echoes the rendered prompt back, recording the dispatched kind.
struct EchoBackend;

#[async_trait]
impl CompletionBackend for EchoBackend {
    async fn complete(&self, prompt: &str, kind: TaskKind) -> Result<String, AssistantError> {
        Ok(format!("[{kind}] {prompt}"))
    }
}

/// Fails every request with a fixed HTTP-status error.
struct FailingBackend;

#[async_trait]
impl CompletionBackend for FailingBackend {
    async fn complete(&self, _prompt: &str, _kind: TaskKind) -> Result<String, AssistantError> {
        Err(AssistantError::Request(
            WatsonxRequestError::InvalidRequestError {
                code: None,
                message: "internal server error".to_string(),
                status_code: 500,
            },
        ))
    }
}

#[tokio::test]
async fn generate_code_renders_the_template_into_the_prompt() {
    let assistant = Assistant::with_backend(Box::new(EchoBackend));
    let reply = assistant
        .generate_code("Create a function to add two numbers", "python")
        .await;

    assert!(reply.starts_with("[code]"));
    assert!(reply.contains("Create a function to add two numbers"));
    assert!(reply.contains("production-ready python code"));
}

#[tokio::test]
async fn each_operation_dispatches_its_own_kind() {
    let assistant = Assistant::with_backend(Box::new(EchoBackend));

    let tests = assistant.generate_tests("fn id() {}", "pytest").await;
    assert!(tests.starts_with("[test]"));
    assert!(tests.contains("pytest"));

    let fixed = assistant.fix_bugs("fn id() {}", "does not compile").await;
    assert!(fixed.starts_with("[fix]"));
    assert!(fixed.contains("does not compile"));

    let summary = assistant.summarize_code("fn id() {}").await;
    assert!(summary.starts_with("[summarize]"));
}

#[tokio::test]
async fn chat_includes_the_context_section_only_when_present() {
    let assistant = Assistant::with_backend(Box::new(EchoBackend));

    let with_context = assistant.chat("What about lifetimes?", "User: hi\nAI: hello").await;
    assert!(with_context.contains("Context: User: hi\nAI: hello"));
    assert!(with_context.contains("User Query: What about lifetimes?"));

    let without_context = assistant.chat("What about lifetimes?", "").await;
    assert!(!without_context.contains("Context:"));
    assert!(without_context.contains("User Query: What about lifetimes?"));
}

#[tokio::test]
async fn http_failures_surface_as_strings_not_errors() {
    let assistant = Assistant::with_backend(Box::new(FailingBackend));
    let reply = assistant.generate_code("anything", "python").await;

    assert!(reply.contains("HTTP error"));
    assert!(reply.contains("500"));
    assert!(reply.contains("internal server error"));
}

#[tokio::test]
async fn classification_parses_the_model_json() {
    let assistant = Assistant::with_backend(Box::new(ClassifierBackend));
    let result = assistant.classify_requirements("user login and payments").await;

    let object = result.as_object().expect("parsed classification");
    assert_eq!(
        object.get("Priority Level"),
        Some(&serde_json::Value::from("High"))
    );
}

#[tokio::test]
async fn classification_failures_fall_back_instead_of_erroring() {
    let assistant = Assistant::with_backend(Box::new(FailingBackend));
    let result = assistant.classify_requirements("user login").await;

    match result {
        ClassificationResult::Failed { error, .. } => {
            assert!(error.contains("HTTP error"));
        }
        ClassificationResult::Parsed(_) => panic!("expected the fallback"),
    }
}

/// Answers like a model that wraps its JSON in prose.
struct ClassifierBackend;

#[async_trait]
impl CompletionBackend for ClassifierBackend {
    async fn complete(&self, _prompt: &str, _kind: TaskKind) -> Result<String, AssistantError> {
        Ok(r#"Here is the classification: {"Priority Level": "High", "Complexity Estimate": "Simple"} Let me know if you need more."#.to_string())
    }
}
