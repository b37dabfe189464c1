mod azure_layout_adapter;
mod schema;
mod v3_schema;
mod v4_schema;

pub use azure_layout_adapter::{
    AzureApiVersion, AzureLayoutAdapter, INITIAL_BACKOFF, MAX_BACKOFF, POLL_TIMEOUT,
};
pub use schema::{AnalyzeOperation, LayoutSchema, OperationError, paragraph_index};
pub use v3_schema::{V3AnalyzeResult, V3Cell, V3Paragraph, V3Table};
pub use v4_schema::{V4AnalyzeResult, V4Caption, V4Cell, V4Figure, V4Paragraph, V4Table};
