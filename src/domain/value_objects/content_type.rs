use serde::{Deserialize, Serialize};

/// Supported file types. MARKDOWN is reserved for scraped web pages; direct
/// uploads of markdown arrive as `text/markdown` and map to MD.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContentType {
    Pdf,
    Docx,
    Txt,
    Md,
    Html,
    Markdown,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Pdf => "PDF",
            ContentType::Docx => "DOCX",
            ContentType::Txt => "TXT",
            ContentType::Md => "MD",
            ContentType::Html => "HTML",
            ContentType::Markdown => "MARKDOWN",
        }
    }

    pub fn parse(s: &str) -> Result<Self, String> {
        match s {
            "PDF" => Ok(ContentType::Pdf),
            "DOCX" => Ok(ContentType::Docx),
            "TXT" => Ok(ContentType::Txt),
            "MD" => Ok(ContentType::Md),
            "HTML" => Ok(ContentType::Html),
            "MARKDOWN" => Ok(ContentType::Markdown),
            _ => Err(format!("Invalid content type: {}", s)),
        }
    }

    /// Maps a declared MIME type to a supported upload type. Returns None for
    /// anything outside the supported set.
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime {
            "application/pdf" => Some(ContentType::Pdf),
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => {
                Some(ContentType::Docx)
            }
            "text/plain" => Some(ContentType::Txt),
            "text/markdown" => Some(ContentType::Md),
            "text/html" | "application/xhtml+xml" => Some(ContentType::Html),
            _ => None,
        }
    }

    /// File extension used in object-store keys.
    pub fn extension(&self) -> &'static str {
        match self {
            ContentType::Pdf => "pdf",
            ContentType::Docx => "docx",
            ContentType::Txt => "txt",
            ContentType::Md | ContentType::Markdown => "md",
            ContentType::Html => "html",
        }
    }

    pub fn mime(&self) -> &'static str {
        match self {
            ContentType::Pdf => "application/pdf",
            ContentType::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            ContentType::Txt => "text/plain",
            ContentType::Md | ContentType::Markdown => "text/markdown",
            ContentType::Html => "text/html",
        }
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
