//! Support for XLIFF 1.2 files as produced by `ng extract-i18n --format xlf`.
//!
//! Units are the `<trans-unit>` children of `<body>`:
//!
//! ```xml
//! <xliff version="1.2" xmlns="urn:oasis:names:tc:xliff:document:1.2">
//!   <file source-language="en" datatype="plaintext" original="ng2.template">
//!     <body>
//!       <trans-unit id="title" datatype="html">
//!         <source>Title</source>
//!       </trans-unit>
//!     </body>
//!   </file>
//! </xliff>
//! ```

use crate::{
    error::Error,
    formats::tree::UnitLayout,
    traits::MergeStrategy,
    xml::{XmlDocument, XmlElement},
};

pub const LAYOUT: UnitLayout = UnitLayout {
    container: "body",
    unit: "trans-unit",
};

const NAMESPACE: &str = "urn:oasis:names:tc:xliff:document:1.2";

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
        let body = LAYOUT.collect_units(XmlElement::new("body"), partials);
        let file = XmlElement::new("file")
            .with_attribute("source-language", language)
            .with_attribute("datatype", "plaintext")
            .with_attribute("original", "ng2.template")
            .with_child(body);
        let xliff = XmlElement::new("xliff")
            .with_attribute("version", "1.2")
            .with_attribute("xmlns", NAMESPACE)
            .with_child(file);
        XmlDocument::new(xliff)
    }

    fn object_to_string(&self, document: &XmlDocument) -> Result<String, Error> {
        document.to_xml_string()
    }
}
