//! Support for XTB (XML Translation Bundle) files.
//!
//! Units are the `<translation>` children of the `<translationbundle>` root.
//! Merged files carry the standard XTB doctype.

use crate::{
    error::Error,
    formats::tree::UnitLayout,
    traits::MergeStrategy,
    xml::{XmlDocument, XmlElement},
};

pub const LAYOUT: UnitLayout = UnitLayout {
    container: "translationbundle",
    unit: "translation",
};

/// Internal subset of the XTB doctype written at the top of merged files.
pub const DOCTYPE: &str = r#"translationbundle [
  <!ELEMENT translationbundle (translation)*>
  <!ATTLIST translationbundle lang CDATA #REQUIRED>

  <!ELEMENT translation (#PCDATA|ph)*>
  <!ATTLIST translation id CDATA #REQUIRED>
  <!ATTLIST translation desc CDATA #IMPLIED>
  <!ATTLIST translation meaning CDATA #IMPLIED>
  <!ATTLIST translation xml:space (default|preserve) "default">

  <!ELEMENT ph (#PCDATA|ex)*>
  <!ATTLIST ph name CDATA #REQUIRED>

  <!ELEMENT ex (#PCDATA)>
]"#;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Format;

impl MergeStrategy for Format {
    type Document = XmlDocument;

    fn extension(&self) -> &'static str {
        "xtb"
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
        let bundle = XmlElement::new("translationbundle").with_attribute("lang", language);
        let bundle = LAYOUT.collect_units(bundle, partials);
        XmlDocument::new(bundle).with_doctype(DOCTYPE)
    }

    fn object_to_string(&self, document: &XmlDocument) -> Result<String, Error> {
        document.to_xml_string()
    }
}
