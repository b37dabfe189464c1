mod case;
mod drug_record;
mod fetch_outcome;
mod page_layout;
mod parsed_document;
mod recommendation;
mod search_result;

pub use case::{CaseOutcome, CaseRequest, WorkflowStage};
pub use drug_record::DrugRecord;
pub use fetch_outcome::FetchOutcome;
pub use page_layout::{
    ElementIndex, LayoutCaption, LayoutCell, LayoutFigure, LayoutParagraph, LayoutTable,
    PageLayout,
};
pub use parsed_document::{PageContent, ParsedDocument};
pub use recommendation::{RecommendationFacet, RecommendationRecord};
pub use search_result::{EnrichedResult, SearchResult, site_restricted_query};
