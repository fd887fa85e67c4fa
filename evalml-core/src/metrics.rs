mod features;
mod metric;
mod metric_registry;
mod precision;

pub use features::*;
pub use metric::*;
pub use metric_registry::*;
pub use precision::*;
