//! Server-rendered single-page form, backed by a `tera` template.
//!
//! The template name ends in `.html`, so tera autoescapes every value,
//! including the echoed question and the answer text.

use serde::Serialize;
use tera::{Context, Tera};

pub const PAGE_TITLE: &str = "FAQ Chatbot";
pub const INTRO_LINE: &str = "Ask your question below:";
pub const INPUT_LABEL: &str = "Your question";
pub const SUBMIT_LABEL: &str = "Get a response";
pub const EMPTY_WARNING: &str = "Please enter a question.";
pub const ANSWER_PREFIX: &str = "Chatbot:";

const TEMPLATE_NAME: &str = "chat_page.html";
const TEMPLATE_SOURCE: &str = include_str!("../../../templates/chat_page.html");

/// What to show under the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    /// First visit: form only.
    Blank,
    /// Submitted with nothing but whitespace.
    EmptyQuestion,
    Answer(String),
}

#[derive(Serialize)]
struct PageView<'a> {
    title: &'a str,
    intro: &'a str,
    label: &'a str,
    submit: &'a str,
    answer_prefix: &'a str,
    question: &'a str,
    warning: Option<&'a str>,
    answer: Option<&'a str>,
}

/// Compiled page template, built once at startup.
pub struct ChatPage {
    tera: Tera,
}

impl ChatPage {
    /// # Errors
    /// The embedded template fails to parse.
    pub fn new() -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        tera.add_raw_template(TEMPLATE_NAME, TEMPLATE_SOURCE)?;
        Ok(Self { tera })
    }

    /// Render the page. `question` is echoed back into the input.
    pub fn render(&self, question: &str, outcome: &PageOutcome) -> Result<String, tera::Error> {
        let (warning, answer) = match outcome {
            PageOutcome::Blank => (None, None),
            PageOutcome::EmptyQuestion => (Some(EMPTY_WARNING), None),
            PageOutcome::Answer(text) => (None, Some(text.as_str())),
        };
        let view = PageView {
            title: PAGE_TITLE,
            intro: INTRO_LINE,
            label: INPUT_LABEL,
            submit: SUBMIT_LABEL,
            answer_prefix: ANSWER_PREFIX,
            question,
            warning,
            answer,
        };
        self.tera
            .render(TEMPLATE_NAME, &Context::from_serialize(&view)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> ChatPage {
        ChatPage::new().unwrap()
    }

    #[test]
    fn blank_page_has_form_but_no_result() {
        let html = page().render("", &PageOutcome::Blank).unwrap();
        assert!(html.contains("<title>FAQ Chatbot</title>"));
        assert!(html.contains(INTRO_LINE));
        assert!(html.contains(INPUT_LABEL));
        assert!(html.contains(SUBMIT_LABEL));
        assert!(!html.contains(EMPTY_WARNING));
        assert!(!html.contains(ANSWER_PREFIX));
    }

    #[test]
    fn empty_question_shows_only_the_warning() {
        let html = page().render("  ", &PageOutcome::EmptyQuestion).unwrap();
        assert!(html.contains(r#"<p class="warning">Please enter a question.</p>"#));
        assert!(!html.contains(ANSWER_PREFIX));
    }

    #[test]
    fn answer_is_prefixed_and_escaped() {
        let html = page()
            .render("save?", &PageOutcome::Answer("Use File > Save As.".into()))
            .unwrap();
        assert!(html.contains("<strong>Chatbot:</strong> Use File &gt; Save As."));
        assert!(html.contains(r#"value="save?""#));
    }

    #[test]
    fn user_markup_is_never_emitted_raw() {
        let html = page()
            .render(
                r#""><script>alert(1)</script>"#,
                &PageOutcome::Answer("<b>Tom & Jerry</b>".into()),
            )
            .unwrap();
        assert!(!html.contains("<script>"));
        assert!(!html.contains("<b>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("&lt;b&gt;Tom &amp; Jerry"));
        assert!(html.contains("value=\"&quot;&gt;"));
    }
}
