pub(crate) mod build;
pub(crate) mod config;
pub(crate) mod crawl;
pub(crate) mod normalize;
pub(crate) mod verify;
