//! Scrape CCC Parts product pages and generate product copy.
//!
//! `fetch_rendered_page` drives a headless browser until the product
//! page has rendered, `ProductDetails` extracts the product fields from
//! the markup, `CompletionClient` asks a hosted completion API for a
//! generated description and name, and `ProductReport` merges scraped
//! and generated values into the final JSON document.

mod fetcher;
mod generation;
mod product_details;
mod report;

pub use fetcher::fetch_rendered_page;
pub use generation::{CompletionClient, SamplingParams, DESCRIPTION_PARAMS, NAME_PARAMS};
pub use product_details::{ProductDetails, Specification, SpecificationTable};
pub use report::{ProductReport, Versioned};
pub use url::Url;
