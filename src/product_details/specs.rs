use scraper::{ElementRef, Html, Selector};
use serde::ser::{Serialize, SerializeMap, Serializer};

#[derive(Debug, Clone)]
/// A single specification (key-value pair) of a product.
pub struct Specification {
    /// The name (key) of the specification.
    pub name: String,
    /// The value of the specification.
    pub value: String,
}

#[derive(Debug, Clone, Default)]
/// The full specification table of a product, in page order.
///
/// Serializes as a JSON map. Built once per page from the heading/value
/// pairs and reused for the special-cased `Brand` and
/// `Parts Classification` lookups.
pub struct SpecificationTable(Vec<Specification>);

impl SpecificationTable {
    /// Collects every heading/value pair matched by `heading_selector`.
    ///
    /// The heading text before the colon is the key; the heading's next
    /// sibling element holds the value. Headings without a sibling
    /// value are skipped.
    pub fn from_document(document: &Html, heading_selector: &Selector) -> Self {
        let mut entries = Vec::new();
        for heading in document.select(heading_selector) {
            let raw = heading.text().collect::<String>();
            let name = raw.split(':').next().unwrap_or_default().trim().to_string();
            if name.is_empty() {
                continue;
            }
            let Some(value_elem) = heading.next_siblings().find_map(ElementRef::wrap) else {
                continue;
            };
            let value = value_elem.text().collect::<String>().trim().to_string();
            entries.push(Specification { name, value });
        }
        Self(entries)
    }

    /// Looks up a specification value by its exact key.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|spec| spec.name == name)
            .map(|spec| spec.value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Specification> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for SpecificationTable {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for spec in &self.0 {
            map.serialize_entry(&spec.name, &spec.value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heading_selector() -> Selector {
        Selector::parse("div.pdp-feature-spec-heading").unwrap()
    }

    #[test]
    fn builds_table_from_heading_value_pairs() {
        let html = r#"
            <div class="pdp-feature-spec-heading">Brand:</div>
            <div class="pdp-feature-spec-value"> Eaton </div>
            <div class="pdp-feature-spec-heading">Weight:</div>
            <div class="pdp-feature-spec-value">4.2 lb</div>
        "#;
        let document = Html::parse_document(html);
        let table = SpecificationTable::from_document(&document, &heading_selector());

        assert_eq!(table.len(), 2);
        assert_eq!(table.get("Brand"), Some("Eaton"));
        assert_eq!(table.get("Weight"), Some("4.2 lb"));
        assert_eq!(table.get("Color"), None);
    }

    #[test]
    fn heading_without_value_sibling_is_skipped() {
        let html = r#"<div><div class="pdp-feature-spec-heading">Brand:</div></div>"#;
        let document = Html::parse_document(html);
        let table = SpecificationTable::from_document(&document, &heading_selector());
        assert!(table.is_empty());
    }

    #[test]
    fn serializes_as_map() {
        let html = r#"
            <div class="pdp-feature-spec-heading">Weight:</div>
            <div class="pdp-feature-spec-value">4.2 lb</div>
            <div class="pdp-feature-spec-heading">Brand:</div>
            <div class="pdp-feature-spec-value">Eaton</div>
        "#;
        let document = Html::parse_document(html);
        let table = SpecificationTable::from_document(&document, &heading_selector());

        let json = serde_json::to_value(&table).unwrap();
        assert_eq!(json["Weight"], "4.2 lb");
        assert_eq!(json["Brand"], "Eaton");
    }
}
