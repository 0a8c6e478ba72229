//! Renderers turn a [`StatementDocument`] into file bytes.
//!
//! Only the JSON renderer ships with the crate. Image and PDF renderers are
//! registered by the host application through [`RendererRegistry::register`].

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::config::EngineRules;
use crate::error::{EngineError, EngineResult};
use crate::models::SalaryCalculation;

use super::{ExportFormat, StatementDocument, statement_file_name};

/// The outcome of one render call.
pub type RenderResult = Result<Vec<u8>, Box<dyn std::error::Error + Send + Sync>>;

/// Produces the bytes of one export format.
pub trait StatementRenderer: Send + Sync {
    /// The format this renderer produces.
    fn format(&self) -> ExportFormat;

    /// Renders a statement document.
    fn render(&self, document: &StatementDocument) -> RenderResult;
}

/// Renders the statement document as pretty-printed JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

impl StatementRenderer for JsonRenderer {
    fn format(&self) -> ExportFormat {
        ExportFormat::Json
    }

    fn render(&self, document: &StatementDocument) -> RenderResult {
        Ok(serde_json::to_vec_pretty(document)?)
    }
}

/// A rendered statement file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedStatement {
    /// The format of `bytes`.
    pub format: ExportFormat,
    /// The file name to save or share under.
    pub file_name: String,
    /// The MIME type of `bytes`.
    pub media_type: String,
    /// The file content.
    #[serde(skip)]
    pub bytes: Vec<u8>,
}

/// Renders a calculation with one renderer.
///
/// Each call is independent: the calculation is only read, so a failed
/// export can be retried with the same value.
///
/// # Errors
///
/// - [`EngineError::InvalidInput`] if the record's period is invalid
/// - [`EngineError::ExportFailure`] if the renderer fails
pub fn export_statement(
    calc: &SalaryCalculation,
    rules: &EngineRules,
    renderer: &dyn StatementRenderer,
) -> EngineResult<RenderedStatement> {
    let format = renderer.format();
    let document = StatementDocument::from_calculation(calc, rules)?;
    let file_name = statement_file_name(calc, format)?;

    let bytes = renderer.render(&document).map_err(|e| {
        warn!(format = %format, file_name = %file_name, error = %e, "Statement export failed");
        EngineError::ExportFailure {
            format: format.to_string(),
            message: e.to_string(),
        }
    })?;

    info!(
        format = %format,
        file_name = %file_name,
        bytes = bytes.len(),
        "Statement exported"
    );

    Ok(RenderedStatement {
        format,
        file_name,
        media_type: format.media_type().to_string(),
        bytes,
    })
}

/// Renderers keyed by format.
#[derive(Clone)]
pub struct RendererRegistry {
    renderers: HashMap<ExportFormat, Arc<dyn StatementRenderer>>,
}

impl RendererRegistry {
    /// A registry with no renderers.
    pub fn empty() -> Self {
        Self {
            renderers: HashMap::new(),
        }
    }

    /// Registers a renderer, replacing any previous one for its format.
    pub fn register(&mut self, renderer: Arc<dyn StatementRenderer>) {
        self.renderers.insert(renderer.format(), renderer);
    }

    /// Builder form of [`register`](Self::register).
    pub fn with(mut self, renderer: Arc<dyn StatementRenderer>) -> Self {
        self.register(renderer);
        self
    }

    /// Formats with a registered renderer.
    pub fn formats(&self) -> Vec<ExportFormat> {
        ExportFormat::ALL
            .into_iter()
            .filter(|format| self.renderers.contains_key(format))
            .collect()
    }

    /// The renderer for `format`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ExportFailure`] if none is registered.
    pub fn get(&self, format: ExportFormat) -> EngineResult<Arc<dyn StatementRenderer>> {
        self.renderers
            .get(&format)
            .cloned()
            .ok_or_else(|| EngineError::ExportFailure {
                format: format.to_string(),
                message: "no renderer is registered for this format".to_string(),
            })
    }
}

impl Default for RendererRegistry {
    /// A registry with the built-in JSON renderer.
    fn default() -> Self {
        Self::empty().with(Arc::new(JsonRenderer))
    }
}

impl std::fmt::Debug for RendererRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RendererRegistry")
            .field("formats", &self.formats())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::calculate_salary;
    use crate::models::SalaryInput;
    use rust_decimal::Decimal;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn create_test_calculation() -> SalaryCalculation {
        let input = SalaryInput {
            year: 2025,
            month: 1,
            employee_name: "홍길동".to_string(),
            work_days: Decimal::from(20),
            work_hours: Some(Decimal::from(80)),
            hourly_wage: Decimal::from(11000),
            weekly_holiday_allowance: None,
            bonus: Decimal::ZERO,
            remarks: String::new(),
        };
        calculate_salary(&input, &EngineRules::default()).unwrap()
    }

    /// Fails on the first call, succeeds afterwards.
    struct FlakyPngRenderer {
        calls: AtomicU32,
    }

    impl StatementRenderer for FlakyPngRenderer {
        fn format(&self) -> ExportFormat {
            ExportFormat::Png
        }

        fn render(&self, _document: &StatementDocument) -> RenderResult {
            if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
                Err("canvas unavailable".into())
            } else {
                Ok(vec![0x89, b'P', b'N', b'G'])
            }
        }
    }

    #[test]
    fn test_json_export() {
        let calc = create_test_calculation();
        let rendered = export_statement(&calc, &EngineRules::default(), &JsonRenderer).unwrap();

        assert_eq!(rendered.format, ExportFormat::Json);
        assert_eq!(rendered.file_name, "홍길동_2025년02월_급여명세서.json");
        assert_eq!(rendered.media_type, "application/json");

        let document: StatementDocument = serde_json::from_slice(&rendered.bytes).unwrap();
        assert_eq!(document.title, "2025년 02월 급여명세서");
    }

    #[test]
    fn test_failed_export_can_be_retried() {
        let calc = create_test_calculation();
        let before = calc.clone();
        let renderer = FlakyPngRenderer {
            calls: AtomicU32::new(0),
        };

        match export_statement(&calc, &EngineRules::default(), &renderer) {
            Err(EngineError::ExportFailure { format, message }) => {
                assert_eq!(format, "png");
                assert_eq!(message, "canvas unavailable");
            }
            other => panic!("Expected ExportFailure, got {:?}", other),
        }
        assert_eq!(calc, before);

        let rendered = export_statement(&calc, &EngineRules::default(), &renderer).unwrap();
        assert_eq!(rendered.file_name, "홍길동_2025년02월_급여명세서.png");
        assert_eq!(rendered.bytes.len(), 4);
    }

    #[test]
    fn test_default_registry_has_json_only() {
        let registry = RendererRegistry::default();
        assert_eq!(registry.formats(), vec![ExportFormat::Json]);
        assert!(registry.get(ExportFormat::Json).is_ok());
        assert!(matches!(
            registry.get(ExportFormat::Pdf),
            Err(EngineError::ExportFailure { .. })
        ));
    }

    #[test]
    fn test_register_adds_format() {
        let registry = RendererRegistry::default().with(Arc::new(FlakyPngRenderer {
            calls: AtomicU32::new(0),
        }));
        assert_eq!(registry.formats(), vec![ExportFormat::Json, ExportFormat::Png]);
    }
}
