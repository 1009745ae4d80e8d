//! Emoji descriptions
//!
//! One plain-text file per base emoji, `desc/<glyph>.txt`:
//!
//! ```text
//! A cheerful face with a wide open smile.
//! #
//! - Expressing happiness
//! - Greeting friends
//! ```
//!
//! The text before the first `#` is the description, the lines after it
//! are the uses. Generated files come from a chat model prompted with
//! [`description_prompt`] and tidied by [`clean_generated`].

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::model::EmojiRecord;

pub const NOT_FOUND_MESSAGE: &str = "No description available for this emoji.";

/// Parsed description file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Description {
    pub text: String,
    pub uses: Vec<String>,
}

impl Description {
    pub fn parse(content: &str) -> Self {
        let mut parts = content.split('#');
        let text = parts.next().unwrap_or_default().trim().to_string();
        let uses = parts
            .next()
            .map(|section| section.trim().lines().filter_map(parse_use).collect())
            .unwrap_or_default();
        Description { text, uses }
    }
}

fn parse_use(line: &str) -> Option<String> {
    let line = line.trim();
    let line = match line.strip_prefix('-') {
        Some(rest) if rest.starts_with(char::is_whitespace) => rest.trim_start(),
        _ => line,
    };
    (!line.is_empty()).then(|| line.to_string())
}

// =============================================================================
// Fetching
// =============================================================================

/// What a description lookup produced, as shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DescriptionOutcome {
    Found { description: Description },
    NotFound { message: String },
    Failed { message: String },
    /// The owning view went away before the fetch settled; nothing to show
    Cancelled,
}

impl DescriptionOutcome {
    /// Classify an HTTP response for a description file
    pub fn from_response(status: u16, status_text: &str, body: &str) -> Self {
        match status {
            200..=299 => DescriptionOutcome::Found {
                description: Description::parse(body),
            },
            404 => DescriptionOutcome::NotFound {
                message: NOT_FOUND_MESSAGE.to_string(),
            },
            _ => DescriptionOutcome::Failed {
                message: format!("Failed to load description: {} {}", status, status_text),
            },
        }
    }

    /// A request that never produced a response
    pub fn transport_error(message: impl Into<String>) -> Self {
        DescriptionOutcome::Failed {
            message: message.into(),
        }
    }

    /// Final outcome of a fetch. A cancelled fetch is `Cancelled` whatever it
    /// returned, so a late answer never replaces newer state.
    pub fn settle(response: Result<(u16, String, String), String>, cancelled: bool) -> Self {
        if cancelled {
            return DescriptionOutcome::Cancelled;
        }
        match response {
            Ok((status, status_text, body)) => Self::from_response(status, &status_text, &body),
            Err(message) => Self::transport_error(message),
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, DescriptionOutcome::Cancelled)
    }

    pub fn description(&self) -> Option<&Description> {
        match self {
            DescriptionOutcome::Found { description } => Some(description),
            _ => None,
        }
    }

    /// Message for the error states
    pub fn message(&self) -> Option<&str> {
        match self {
            DescriptionOutcome::Found { .. } | DescriptionOutcome::Cancelled => None,
            DescriptionOutcome::NotFound { message } | DescriptionOutcome::Failed { message } => {
                Some(message)
            }
        }
    }
}

pub fn description_file_name(glyph: &str) -> String {
    format!("{}.txt", glyph)
}

/// URL of a description relative to the site base, e.g. `/desc/%F0%9F%98%80.txt`
pub fn description_url(base: &str, glyph: &str) -> String {
    format!("{}desc/{}.txt", base, urlencoding::encode(glyph))
}

// =============================================================================
// Sources
// =============================================================================

/// Where the index builder finds description text
pub trait DescriptionSource {
    /// Trimmed file content, `None` when there is none
    fn description(&self, glyph: &str) -> Option<String>;
}

/// Description files in a directory
#[derive(Debug, Clone)]
pub struct DirectorySource {
    dir: PathBuf,
}

impl DirectorySource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, glyph: &str) -> PathBuf {
        self.dir.join(description_file_name(glyph))
    }
}

impl DescriptionSource for DirectorySource {
    fn description(&self, glyph: &str) -> Option<String> {
        // missing or unreadable files just mean no description
        let text = fs::read_to_string(self.path_for(glyph)).ok()?;
        let text = text.trim();
        (!text.is_empty()).then(|| text.to_string())
    }
}

/// No descriptions at all
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDescriptions;

impl DescriptionSource for NoDescriptions {
    fn description(&self, _glyph: &str) -> Option<String> {
        None
    }
}

impl<F> DescriptionSource for F
where
    F: Fn(&str) -> Option<String>,
{
    fn description(&self, glyph: &str) -> Option<String> {
        self(glyph)
    }
}

// =============================================================================
// Generation
// =============================================================================

/// Prompt asking a chat model for a description of `record`
pub fn description_prompt(record: &EmojiRecord) -> String {
    let mut prompt = format!(
        "Generate a description with a couple of phrases for the following emoji: {}",
        record.glyph
    );
    prompt.push_str(&format!("\ntitle: {}", record.title));
    if !record.keywords.is_empty() {
        prompt.push_str(&format!("\nkeywords: {}", record.keywords.join(", ")));
    }
    prompt.push_str(
        "\nDo not include the emoji in the description.\n\
         Do not include the title or keywords in the description.\n\
         Include a \"Used for\" section with a list of minimum 2 to maximum 5 common uses.\n\
         Use the following format:\n\n\
         **Description:**\n<description>\n\n\
         **Used for:**\n- <use 1>\n- <use 2>\n- <use N>\n\n",
    );
    prompt
}

/// Turn a model answer into the description file format
pub fn clean_generated(answer: &str) -> String {
    answer
        .replacen("**Description:**", "", 1)
        .trim()
        .replacen("**Used for:**", "#", 1)
        .trim_end()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{slug, Status};

    #[test]
    fn test_parse_text_and_uses() {
        let d = Description::parse("  A happy face.  \n#\n- Greeting\n-  Joy \n\n");
        assert_eq!(d.text, "A happy face.");
        assert_eq!(d.uses, vec!["Greeting", "Joy"]);
    }

    #[test]
    fn test_parse_without_uses() {
        let d = Description::parse("Only text\n");
        assert_eq!(d.text, "Only text");
        assert!(d.uses.is_empty());
    }

    #[test]
    fn test_parse_keeps_hyphenated_words() {
        let d = Description::parse("x\n#\n-well-known\n- sign-off");
        assert_eq!(d.uses, vec!["-well-known", "sign-off"]);
    }

    #[test]
    fn test_outcome_from_response() {
        let found = DescriptionOutcome::from_response(200, "OK", "Text\n#\n- Use");
        assert_eq!(found.description().map(|d| d.uses.len()), Some(1));
        assert_eq!(found.message(), None);

        let missing = DescriptionOutcome::from_response(404, "Not Found", "");
        assert_eq!(missing.message(), Some(NOT_FOUND_MESSAGE));

        let failed = DescriptionOutcome::from_response(503, "Service Unavailable", "");
        assert_eq!(
            failed.message(),
            Some("Failed to load description: 503 Service Unavailable")
        );
    }

    #[test]
    fn test_settle_cancelled_fetch() {
        let late = Ok((200, "OK".to_string(), "Text".to_string()));
        let outcome = DescriptionOutcome::settle(late, true);
        assert!(outcome.is_cancelled());
        assert_eq!(outcome.description(), None);
        assert_eq!(outcome.message(), None);

        let failed = DescriptionOutcome::settle(Err("The user aborted a request.".into()), true);
        assert!(failed.is_cancelled());
    }

    #[test]
    fn test_settle_live_fetch() {
        let found = DescriptionOutcome::settle(Ok((200, "OK".into(), "Text\n#\n- Use".into())), false);
        assert_eq!(found.description().map(|d| d.text.as_str()), Some("Text"));

        let offline = DescriptionOutcome::settle(Err("Failed to fetch".into()), false);
        assert_eq!(offline.message(), Some("Failed to fetch"));
        assert!(!offline.is_cancelled());

        let json = serde_json::to_value(DescriptionOutcome::Cancelled).unwrap();
        assert_eq!(json["kind"], "cancelled");
    }

    #[test]
    fn test_description_url() {
        assert_eq!(description_url("/", "😀"), "/desc/%F0%9F%98%80.txt");
        assert_eq!(description_url("/emoji/", "#️⃣"), "/emoji/desc/%23%EF%B8%8F%E2%83%A3.txt");
    }

    #[test]
    fn test_clean_generated() {
        let answer = "**Description:**\nA face.\n\n**Used for:**\n- Fun\n- Joy\n\n";
        assert_eq!(clean_generated(answer), "A face.\n\n#\n- Fun\n- Joy");
        let parsed = Description::parse(&clean_generated(answer));
        assert_eq!(parsed.text, "A face.");
        assert_eq!(parsed.uses, vec!["Fun", "Joy"]);
    }

    #[test]
    fn test_prompt_mentions_keywords_only_when_present() {
        let mut record = EmojiRecord {
            id: slug("Grinning Face"),
            glyph: "😀".into(),
            code: vec!["1F600".into()],
            group: "Smileys & Emotion".into(),
            subgroup: "Face Smiling".into(),
            status: Status::FullyQualified,
            title: "Grinning Face".into(),
            modifiers: vec![],
            has_skin_tone_modifier: false,
            keywords: vec![],
        };
        assert!(!description_prompt(&record).contains("keywords:"));
        record.keywords = vec!["face".into(), "grin".into()];
        let prompt = description_prompt(&record);
        assert!(prompt.contains("\ntitle: Grinning Face\nkeywords: face, grin\n"));
        assert!(prompt.starts_with("Generate a description"));
    }

    #[test]
    fn test_directory_source() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("😀.txt"), "  Smiles all round \n").unwrap();
        fs::write(dir.path().join("😁.txt"), "   ").unwrap();
        let source = DirectorySource::new(dir.path());
        assert_eq!(source.description("😀").as_deref(), Some("Smiles all round"));
        assert_eq!(source.description("😁"), None);
        assert_eq!(source.description("🐶"), None);
    }
}
