pub mod config;
pub mod conversation;
pub mod cost_info;
pub mod error;
pub mod historical;
pub mod payload;
pub mod project_info;
pub mod prompt;

pub use config::AppConfig;
pub use conversation::{ChatMessage, Role};
pub use cost_info::{CostInfo, CostItem, CostSection, extract_cost_info};
pub use error::{AppError, ErrorTier};
pub use historical::{HistoricalData, HistoricalSchema};
pub use payload::{ReportEnvelope, ReportPayload};
pub use project_info::{ProjectDetails, ProjectField, extract_project_info};
pub use prompt::{PromptError, PromptTemplate};
