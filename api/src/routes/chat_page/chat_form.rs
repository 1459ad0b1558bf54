use serde::Deserialize;

/// `application/x-www-form-urlencoded` body posted by the page.
#[derive(Debug, Default, Deserialize)]
pub struct ChatForm {
    #[serde(default)]
    pub question: String,
}
