//! Generation domain - resolves the typed document model into renderable units
//!
//! The pipeline is synchronous and runs to completion or aborts on the first
//! fatal error: type resolution, model emission, operation emission, and the
//! shared default-value provider table all live here.

pub mod errors;
pub mod models;
pub mod operations;
pub mod orchestrator;
pub mod providers;
pub mod resolver;
pub mod sanitizers;
pub mod status;
pub mod types;
pub mod utils;

pub use errors::GenerationError;
pub use orchestrator::build_api_context;
pub use providers::{Provider, ProviderSet};
pub use types::{
    ApiContext, EnumVariantUnit, ErrorUnit, ErrorVariantUnit, FieldUnit, ModelUnit, ParamUnit,
    RouteUnit,
};
