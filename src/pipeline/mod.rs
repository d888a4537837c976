//! Pipeline entry points and the pure listing logic behind them.
//!
//! - `run_build`: Render every route into static pages
//! - `run_validate`: Check configuration and content records
//! - `Site`: Render a single request target on demand

pub mod build;
pub mod filter;
pub mod guard;
pub mod related;
pub mod route;
pub mod stats;
pub mod validate;
pub mod view_state;

pub use build::{BuildOptions, BuildSummary, run_build};
pub use filter::{
    ALL, Facet, Filterable, ListingQuery, category_options, filter, filter_items, status_options,
    unique_categories,
};
pub use guard::{ContentGuard, GuardConfig};
pub use related::related_projects;
pub use route::{RenderOutcome, Route, Site};
pub use stats::project_stats;
pub use validate::{ValidationReport, run_validate};
pub use view_state::{SectionTracker, ShowMore, Theme};
