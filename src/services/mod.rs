mod catalog;
mod download;

pub use catalog::CatalogService;
pub use download::DownloadService;
