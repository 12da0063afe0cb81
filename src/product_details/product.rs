use eyre::{bail, eyre, Result};
use scraper::{ElementRef, Html, Selector};
use serde_json::{Map, Value};
use url::Url;

use crate::product_details::SpecificationTable;

/// Separator token of the classification string. The string carries a
/// leading empty segment before the first separator, so segment 0 of
/// the split is discarded.
const CLASSIFICATION_SEPARATOR: &str = ">>";

#[derive(Debug, Clone)]
/// The scraped details of a CCC Parts product.
///
/// Use `ProductDetails::parse` to extract the details from rendered
/// page markup.
pub struct ProductDetails {
    /// Vendor part number.
    pub vendor_part_number: String,
    /// Brand, looked up from the specification table.
    pub brand: String,
    /// Product name as shown on the page.
    pub part_name: String,
    /// Second breadcrumb link, absent when the breadcrumb is missing
    /// or too short.
    pub top_level_category: Option<String>,
    /// First classification segment after the leading empty one.
    pub major_category: String,
    pub minor_category: String,
    pub sub_minor_category: String,
    /// The page URL. Carried into the output document only, never into
    /// the generation prompt.
    pub url: String,
    /// Long product description as shown on the page.
    pub description: String,
    /// Full specification table of the page.
    pub specifications: SpecificationTable,
}

impl ProductDetails {
    /// Extracts the product details from rendered page markup.
    ///
    /// Every selector miss is an error, except the breadcrumb: a
    /// missing or short breadcrumb emits a diagnostic and leaves
    /// `top_level_category` unset.
    pub fn parse(html: &str, url: &Url) -> Result<Self> {
        let vendor_selector = Selector::parse("span.product-vendor-value").unwrap();
        let heading_selector = Selector::parse("div.pdp-feature-spec-heading").unwrap();
        let name_selector = Selector::parse("div.product-name").unwrap();
        let breadcrumb_selector = Selector::parse("div.breadCrumb").unwrap();
        let links_selector = Selector::parse("span.links").unwrap();
        let description_selector = Selector::parse("div.pdp-long-description").unwrap();

        let document = Html::parse_document(html);

        let vendor_part_number = document
            .select(&vendor_selector)
            .next()
            .map(element_text)
            .ok_or_else(|| eyre!("vendor part number element not found"))?;

        let specifications = SpecificationTable::from_document(&document, &heading_selector);

        let brand = specifications
            .get("Brand")
            .ok_or_else(|| eyre!("Brand not found in specification table"))?
            .to_string();

        let classification = specifications
            .get("Parts Classification")
            .ok_or_else(|| eyre!("Parts Classification not found in specification table"))?;
        let [major_category, minor_category, sub_minor_category] =
            parse_classification(classification)?;

        let part_name = document
            .select(&name_selector)
            .next()
            .map(element_text)
            .ok_or_else(|| eyre!("product name element not found"))?;

        let description = document
            .select(&description_selector)
            .next()
            .map(element_text)
            .ok_or_else(|| eyre!("long description element not found"))?;

        let top_level_category = match document.select(&breadcrumb_selector).next() {
            Some(breadcrumb) => {
                let links: Vec<_> = breadcrumb.select(&links_selector).collect();
                if links.len() > 1 {
                    Some(element_text(links[1]))
                } else {
                    eprintln!("category not found in breadcrumb");
                    None
                }
            }
            None => {
                eprintln!("breadcrumb element not found");
                None
            }
        };

        Ok(Self {
            vendor_part_number,
            brand,
            part_name,
            top_level_category,
            major_category,
            minor_category,
            sub_minor_category,
            url: url.as_str().to_string(),
            description,
            specifications,
        })
    }

    /// The prompt sent to both completion calls: the current field
    /// mapping rendered as JSON under its display keys, with `Part
    /// Name` and `Description` as `{current}` objects. The URL never
    /// goes to the completion API.
    pub fn generation_prompt(&self) -> String {
        let mut fields = Map::new();
        fields.insert(
            "Vendor Part Number".into(),
            Value::String(self.vendor_part_number.clone()),
        );
        fields.insert("Brand".into(), Value::String(self.brand.clone()));

        let mut part_name = Map::new();
        part_name.insert("current".into(), Value::String(self.part_name.clone()));
        fields.insert("Part Name".into(), Value::Object(part_name));

        if let Some(category) = &self.top_level_category {
            fields.insert("Top Level Category".into(), Value::String(category.clone()));
        }
        fields.insert(
            "Major Category".into(),
            Value::String(self.major_category.clone()),
        );
        fields.insert(
            "Minor Category".into(),
            Value::String(self.minor_category.clone()),
        );
        fields.insert(
            "Sub-minor Category".into(),
            Value::String(self.sub_minor_category.clone()),
        );

        let mut description = Map::new();
        description.insert("current".into(), Value::String(self.description.clone()));
        fields.insert("Description".into(), Value::Object(description));

        let specs: Map<String, Value> = self
            .specifications
            .iter()
            .map(|spec| (spec.name.clone(), Value::String(spec.value.clone())))
            .collect();
        fields.insert("Specifications".into(), Value::Object(specs));

        Value::Object(fields).to_string()
    }
}

/// Splits the classification string into the major, minor and
/// sub-minor categories, discarding the leading empty segment.
fn parse_classification(raw: &str) -> Result<[String; 3]> {
    let segments: Vec<&str> = raw
        .split(CLASSIFICATION_SEPARATOR)
        .map(str::trim)
        .collect();
    if segments.len() < 4 {
        bail!(
            "classification {raw:?} has {} segments, expected at least 4",
            segments.len()
        );
    }
    Ok([
        segments[1].to_string(),
        segments[2].to_string(),
        segments[3].to_string(),
    ])
}

fn element_text(element: ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"
        <html><body>
        <div class="breadCrumb">
            <span class="links">Home</span>
            <span class="links">Drivetrain</span>
            <span class="links">Yokes</span>
        </div>
        <div class="product-name"> Eaton Yoke 20624 </div>
        <span class="product-vendor-value"> HF20624 </span>
        <div class="pdp-long-description"> Heavy duty replacement yoke for Eaton drive shafts. </div>
        <div class="pdp-feature-spec-heading">Brand:</div>
        <div class="pdp-feature-spec-value">Eaton</div>
        <div class="pdp-feature-spec-heading">Parts Classification:</div>
        <div class="pdp-feature-spec-value">>>Drivetrain>>Drive Shafts>>Yokes</div>
        <div class="pdp-feature-spec-heading">Weight:</div>
        <div class="pdp-feature-spec-value">4.2 lb</div>
        </body></html>
    "#;

    fn fixture_url() -> Url {
        Url::parse("https://shop.cccparts.com/p/eaton-yoke-20624/hf20624/").unwrap()
    }

    #[test]
    fn extracts_all_fields_from_fixture() {
        let details = ProductDetails::parse(FIXTURE, &fixture_url()).unwrap();

        assert_eq!(details.vendor_part_number, "HF20624");
        assert_eq!(details.brand, "Eaton");
        assert_eq!(details.part_name, "Eaton Yoke 20624");
        assert_eq!(details.top_level_category.as_deref(), Some("Drivetrain"));
        assert_eq!(details.major_category, "Drivetrain");
        assert_eq!(details.minor_category, "Drive Shafts");
        assert_eq!(details.sub_minor_category, "Yokes");
        assert_eq!(
            details.description,
            "Heavy duty replacement yoke for Eaton drive shafts."
        );
        assert_eq!(
            details.url,
            "https://shop.cccparts.com/p/eaton-yoke-20624/hf20624/"
        );
        assert_eq!(details.specifications.get("Weight"), Some("4.2 lb"));
    }

    #[test]
    fn classification_split_takes_segments_after_the_first() {
        let categories = parse_classification("X>>A>>B>>C").unwrap();
        assert_eq!(categories, ["A", "B", "C"].map(String::from));
    }

    #[test]
    fn short_classification_is_an_error() {
        let err = parse_classification(">>Drivetrain>>Drive Shafts").unwrap_err();
        assert!(err.to_string().contains("expected at least 4"));
    }

    #[test]
    fn short_breadcrumb_leaves_top_level_category_unset() {
        let html = FIXTURE.replace(
            r#"<span class="links">Drivetrain</span>"#,
            "",
        );
        let html = html.replace(r#"<span class="links">Yokes</span>"#, "");
        let details = ProductDetails::parse(&html, &fixture_url()).unwrap();

        assert_eq!(details.top_level_category, None);
        assert_eq!(details.vendor_part_number, "HF20624");
    }

    #[test]
    fn missing_vendor_part_number_is_an_error() {
        let html = FIXTURE.replace("product-vendor-value", "product-vendor");
        let err = ProductDetails::parse(&html, &fixture_url()).unwrap_err();
        assert!(err.to_string().contains("vendor part number"));
    }

    #[test]
    fn prompt_carries_current_fields_but_never_the_url() {
        let details = ProductDetails::parse(FIXTURE, &fixture_url()).unwrap();
        let prompt = details.generation_prompt();

        assert!(prompt.contains("\"Vendor Part Number\":\"HF20624\""));
        assert!(prompt.contains("\"current\":\"Eaton Yoke 20624\""));
        assert!(!prompt.contains("\"URL\""));
        assert!(!prompt.contains("shop.cccparts.com"));
    }
}
