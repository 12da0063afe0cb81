use serde::Serialize;

use crate::product_details::{ProductDetails, SpecificationTable};

#[derive(Debug, Serialize)]
/// A field that carries both the scraped and the generated value.
pub struct Versioned {
    pub current: String,
    pub generated: String,
}

#[derive(Debug, Serialize)]
/// The final output document: scraped fields merged with the generated
/// name and description.
pub struct ProductReport {
    #[serde(rename = "Vendor Part Number")]
    pub vendor_part_number: String,
    #[serde(rename = "Brand")]
    pub brand: String,
    #[serde(rename = "Part Name")]
    pub part_name: Versioned,
    #[serde(rename = "Top Level Category", skip_serializing_if = "Option::is_none")]
    pub top_level_category: Option<String>,
    #[serde(rename = "Major Category")]
    pub major_category: String,
    #[serde(rename = "Minor Category")]
    pub minor_category: String,
    #[serde(rename = "Sub-minor Category")]
    pub sub_minor_category: String,
    #[serde(rename = "URL")]
    pub url: String,
    #[serde(rename = "Description")]
    pub description: Versioned,
    #[serde(rename = "Specifications")]
    pub specifications: SpecificationTable,
}

impl ProductReport {
    /// Merges the scraped details with the generated name and
    /// description.
    pub fn assemble(
        details: ProductDetails,
        generated_name: String,
        generated_description: String,
    ) -> Self {
        Self {
            vendor_part_number: details.vendor_part_number,
            brand: details.brand,
            part_name: Versioned {
                current: details.part_name,
                generated: generated_name,
            },
            top_level_category: details.top_level_category,
            major_category: details.major_category,
            minor_category: details.minor_category,
            sub_minor_category: details.sub_minor_category,
            url: details.url,
            description: Versioned {
                current: details.description,
                generated: generated_description,
            },
            specifications: details.specifications,
        }
    }

    /// Serializes the report as indented JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
