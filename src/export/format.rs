//! Export formats.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// A file format a statement can be exported to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// The statement document as JSON.
    Json,
    /// A raster image of the statement.
    Png,
    /// A paginated document.
    Pdf,
}

impl ExportFormat {
    /// Every format, in display order.
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Json, ExportFormat::Png, ExportFormat::Pdf];

    /// The file extension, without a dot.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Png => "png",
            ExportFormat::Pdf => "pdf",
        }
    }

    /// The MIME type of the rendered bytes.
    pub fn media_type(&self) -> &'static str {
        match self {
            ExportFormat::Json => "application/json",
            ExportFormat::Png => "image/png",
            ExportFormat::Pdf => "application/pdf",
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "png" => Ok(ExportFormat::Png),
            "pdf" => Ok(ExportFormat::Pdf),
            other => Err(EngineError::invalid_input(
                "format",
                format!("unknown export format '{}', expected json, png or pdf", other),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("PNG".parse::<ExportFormat>().unwrap(), ExportFormat::Png);
        assert_eq!("pdf".parse::<ExportFormat>().unwrap(), ExportFormat::Pdf);
    }

    #[test]
    fn test_unknown_format_is_invalid_input() {
        match "docx".parse::<ExportFormat>() {
            Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "format"),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_media_types() {
        assert_eq!(ExportFormat::Png.media_type(), "image/png");
        assert_eq!(ExportFormat::Pdf.media_type(), "application/pdf");
        assert_eq!(ExportFormat::Json.to_string(), "json");
    }
}
