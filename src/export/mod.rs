//! Statement export.
//!
//! Builds the formatted statement document, titles, file names and share
//! payload from a finished [`SalaryCalculation`](crate::models::SalaryCalculation),
//! and hands the document to a [`StatementRenderer`] for the file bytes.

mod document;
mod format;
mod money;
mod naming;
mod renderer;

pub use document::{
    DeductionsSection, EarningsSection, FOOTER_NOTE, SharePayload, StatementDocument,
    StatementSummary, UNIT_LABEL,
};
pub use format::ExportFormat;
pub use money::{format_krw, group_thousands};
pub use naming::{payout_month, statement_file_name, statement_title};
pub use renderer::{
    JsonRenderer, RenderResult, RenderedStatement, RendererRegistry, StatementRenderer,
    export_statement,
};
