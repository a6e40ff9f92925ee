//! Configuration module

mod site;

pub use site::AssetsConfig;
pub use site::FrontmatterPolicy;
pub use site::SiteConfig;
