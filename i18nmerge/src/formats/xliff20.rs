//! Support for XLIFF 2.0 files as produced by `ng extract-i18n --format xlf2`.
//!
//! Units are the `<unit>` children of `<file>`; the language is carried by
//! the `srcLang` attribute of the root element.

use crate::{
    error::Error,
    formats::tree::UnitLayout,
    traits::MergeStrategy,
    xml::{XmlDocument, XmlElement},
};

pub const LAYOUT: UnitLayout = UnitLayout {
    container: "file",
    unit: "unit",
};

const NAMESPACE: &str = "urn:oasis:names:tc:xliff:document:2.0";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Format;

impl MergeStrategy for Format {
    type Document = XmlDocument;

    fn extension(&self) -> &'static str {
        "xlf"
    }

    fn parse_to_object(&self, content: &str) -> Result<XmlDocument, Error> {
        XmlDocument::parse(content)
    }

    fn add_prefix_to_message_ids(
        &self,
        document: XmlDocument,
        prefix: &str,
        separator: &str,
    ) -> XmlDocument {
        LAYOUT.prefix_ids(document, prefix, separator)
    }

    fn merge_objects(&self, language: &str, partials: Vec<XmlDocument>) -> XmlDocument {
        let file = XmlElement::new("file")
            .with_attribute("id", "ngi18n")
            .with_attribute("original", "ng.template");
        let file = LAYOUT.collect_units(file, partials);
        let xliff = XmlElement::new("xliff")
            .with_attribute("version", "2.0")
            .with_attribute("xmlns", NAMESPACE)
            .with_attribute("srcLang", language)
            .with_child(file);
        XmlDocument::new(xliff)
    }

    fn object_to_string(&self, document: &XmlDocument) -> Result<String, Error> {
        document.to_xml_string()
    }
}
