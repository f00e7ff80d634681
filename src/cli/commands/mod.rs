mod search;
mod sitemap;
mod years;

pub use search::cmd_search;
pub use sitemap::cmd_sitemap;
pub use years::cmd_years;
