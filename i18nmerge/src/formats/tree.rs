//! Unit handling shared by the XML based formats.

use crate::xml::{XmlDocument, XmlElement, XmlNode};

/// Attribute identifying a translation unit in every XML format.
pub const UNIT_ID_ATTRIBUTE: &str = "id";

/// Where the translation units of an XML format live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitLayout {
    /// Element whose direct children are the units.
    pub container: &'static str,
    /// Element name of one unit.
    pub unit: &'static str,
}

impl UnitLayout {
    /// Prefixes the id of every unit in every container of the document.
    /// Units without an id are left alone.
    pub fn prefix_ids(&self, mut document: XmlDocument, prefix: &str, separator: &str) -> XmlDocument {
        let unit = self.unit;
        document.root.for_each_named_mut(self.container, &mut |container| {
            for element in container.child_elements_mut().filter(|e| e.name == unit) {
                if let Some(id) = element.attribute(UNIT_ID_ATTRIBUTE) {
                    let prefixed = format!("{}{}{}", prefix, separator, id);
                    element.set_attribute(UNIT_ID_ATTRIBUTE, prefixed);
                }
            }
        });
        document
    }

    /// Moves the units of all partial documents, in order, into `container`.
    /// Anything else found in the partial containers is dropped.
    pub fn collect_units(&self, mut container: XmlElement, partials: Vec<XmlDocument>) -> XmlElement {
        for partial in partials {
            for partial_container in partial.root.into_descendants_named(self.container) {
                container.children.extend(
                    partial_container
                        .children
                        .into_iter()
                        .filter(|node| matches!(node, XmlNode::Element(e) if e.name == self.unit)),
                );
            }
        }
        container
    }

    /// Units of a document, in document order.
    pub fn units<'a>(&self, document: &'a XmlDocument) -> Vec<&'a XmlElement> {
        document
            .root
            .descendants_named(self.container)
            .into_iter()
            .flat_map(|container| container.child_elements().filter(|e| e.name == self.unit))
            .collect()
    }

    /// Ids of the units of a document, in document order.
    pub fn unit_ids<'a>(&self, document: &'a XmlDocument) -> Vec<&'a str> {
        self.units(document)
            .into_iter()
            .filter_map(|unit| unit.attribute(UNIT_ID_ATTRIBUTE))
            .collect()
    }
}
