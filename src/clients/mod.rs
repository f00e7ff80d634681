pub mod metadata;
pub mod years;

pub use metadata::{LookupError, MetadataClient, MovieLookup};
pub use years::{YearsClient, YearsError, YearsSource};
