use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use api::core::app_state::AppState;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use faq_base::{
    Corpus, GenerationError, GenerationRequest, Record, ResponseSelector, SelectorConfig,
    TextGenerator,
};
use serde_json::Value;
use tower::ServiceExt;

struct FixedGenerator(&'static str);

impl TextGenerator for FixedGenerator {
    fn generate<'a>(
        &'a self,
        _request: GenerationRequest<'a>,
    ) -> Pin<Box<dyn Future<Output = Result<String, GenerationError>> + Send + 'a>> {
        let text = self.0.to_string();
        Box::pin(async move { Ok(text) })
    }
}

/// Remembers every prompt it was given.
#[derive(Default)]
struct RecordingGenerator {
    prompts: Mutex<Vec<String>>,
}

impl TextGenerator for RecordingGenerator {
    fn generate<'a>(
        &'a self,
        request: GenerationRequest<'a>,
    ) -> Pin<Box<dyn Future<Output = Result<String, GenerationError>> + Send + 'a>> {
        self.prompts.lock().unwrap().push(request.prompt.to_string());
        Box::pin(async move { Ok("A generated answer with enough words.".to_string()) })
    }
}

fn app_with(generator: Arc<dyn TextGenerator>) -> Router {
    let corpus: Corpus = [Record {
        instruction: "How do I save an Excel file?".into(),
        response: "Use File > Save As.".into(),
    }]
    .into_iter()
    .collect();
    let selector = ResponseSelector::new(corpus, SelectorConfig::default(), generator);
    api::router(Arc::new(AppState::new(selector).unwrap()))
}

fn app() -> Router {
    app_with(Arc::new(FixedGenerator(
        "Why is the sky blue? Because sunlight scatters in air.",
    )))
}

async fn body_string(res: axum::response::Response) -> String {
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn form_post(body: &'static str) -> Request<Body> {
    Request::post("/")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap()
}

fn json_post(body: &'static str) -> Request<Body> {
    Request::post("/ask_question")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn page_renders_form() {
    let res = app()
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let html = body_string(res).await;
    assert!(html.contains("FAQ Chatbot"));
    assert!(html.contains("Ask your question below:"));
    assert!(html.contains("Get a response"));
}

#[tokio::test]
async fn whitespace_form_shows_warning_only() {
    let res = app().oneshot(form_post("question=+++")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let html = body_string(res).await;
    assert!(html.contains("Please enter a question."));
    assert!(!html.contains("Chatbot:"));
}

#[tokio::test]
async fn form_keyword_answer_is_prefixed() {
    let res = app().oneshot(form_post("question=password")).await.unwrap();
    let html = body_string(res).await;
    assert!(html.contains("<strong>Chatbot:</strong> A strong password"));
}

#[tokio::test]
async fn form_corpus_answer_is_escaped() {
    let res = app()
        .oneshot(form_post("question=how+do+I+save+an+excel+file"))
        .await
        .unwrap();
    let html = body_string(res).await;
    assert!(html.contains("Use File &gt; Save As."));
}

#[tokio::test]
async fn json_ask_returns_envelope() {
    let res = app()
        .oneshot(json_post(r#"{"question":"how do I save an excel file"}"#))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let v: Value = serde_json::from_str(&body_string(res).await).unwrap();
    assert_eq!(v["success"], true);
    assert_eq!(v["data"]["answer"], "Use File > Save As.");
    assert_eq!(v["data"]["source"], "corpus");
}

#[tokio::test]
async fn json_ask_falls_back_to_generator() {
    let res = app()
        .oneshot(json_post(r#"{"question":"Why is the sky blue?"}"#))
        .await
        .unwrap();
    let v: Value = serde_json::from_str(&body_string(res).await).unwrap();
    assert_eq!(v["data"]["source"], "generated");
    assert_eq!(
        v["data"]["answer"],
        "Why is the sky blue? Because sunlight scatters in air."
    );
}

#[tokio::test]
async fn empty_json_question_is_bad_request() {
    let res = app().oneshot(json_post(r#"{"question":"  "}"#)).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let v: Value = serde_json::from_str(&body_string(res).await).unwrap();
    assert_eq!(v["success"], false);
    assert_eq!(v["error"]["code"], "BAD_REQUEST");
    assert_eq!(v["error"]["details"][0]["path"], "question");
}

#[tokio::test]
async fn malformed_json_is_rewrapped() {
    let res = app().oneshot(json_post(r#"{"q": 1}"#)).await.unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(res.headers().contains_key("X-Request-Id"));
    let v: Value = serde_json::from_str(&body_string(res).await).unwrap();
    assert_eq!(v["success"], false);
    assert_eq!(v["error"]["code"], "UNPROCESSABLE_ENTITY");
    assert_eq!(v["error"]["details"][0]["path"], "question");
}

#[tokio::test]
async fn health_reports_corpus_without_probe() {
    let res = app()
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let v: Value = serde_json::from_str(&body_string(res).await).unwrap();
    assert_eq!(v["data"]["corpus_records"], 1);
    assert_eq!(v["data"]["keyword_overrides"], 6);
    assert_eq!(v["data"]["generator_loaded"], false);
    assert!(v["data"].get("generator").is_none());
}

#[tokio::test]
async fn form_question_reaches_generator_as_typed() {
    let generator = Arc::new(RecordingGenerator::default());
    let res = app_with(generator.clone())
        .oneshot(form_post("question=++Why+is+the+sky+blue%3F++"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        generator.prompts.lock().unwrap().as_slice(),
        &["  Why is the sky blue?  ".to_string()]
    );
}

#[tokio::test]
async fn json_question_reaches_generator_as_typed() {
    let generator = Arc::new(RecordingGenerator::default());
    let res = app_with(generator.clone())
        .oneshot(json_post(r#"{"question":" Why is the sky blue?\n"}"#))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        generator.prompts.lock().unwrap().as_slice(),
        &[" Why is the sky blue?\n".to_string()]
    );
}
