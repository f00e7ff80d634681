pub mod movie;
pub mod years;

pub use movie::{MovieListItem, SearchResult};
pub use years::{DecadeGroup, MenuProgress, MenuSource, YearMenu, YearsPayload};
