//! XmlDocument implementation for xot

use xot::{Node, Xot};
use xth_traits::{
    error::{Error, Result},
    XmlDocument,
};

/// A parsed document: an owned xot arena and its document node
#[derive(Debug)]
pub struct XotDocument {
    xot: Xot,
    root: Node,
}

impl XotDocument {
    /// Wrap a document node that lives in `xot`
    pub(crate) fn from_parts(xot: Xot, root: Node) -> Self {
        Self { xot, root }
    }

    /// Get a reference to the underlying Xot
    pub fn xot(&self) -> &Xot {
        &self.xot
    }

    /// The document node
    pub fn root(&self) -> Node {
        self.root
    }

    /// The document element (root element) of the document
    pub fn document_element(&self) -> Result<Node> {
        self.xot
            .children(self.root)
            .find(|&node| self.xot.is_element(node))
            .ok_or_else(|| Error::Serialize("document has no root element".to_string()))
    }
}

impl XmlDocument for XotDocument {
    fn parse(xml: &str) -> Result<Self> {
        let mut xot = Xot::new();
        let root = xot
            .parse(xml)
            .map_err(|e| Error::xml_parse(e.to_string()))?;
        Ok(Self { xot, root })
    }

    fn serialize(&self) -> Result<String> {
        self.xot
            .to_string(self.root)
            .map_err(|e| Error::Serialize(e.to_string()))
    }

    fn serialize_document_element(&self) -> Result<String> {
        let element = self.document_element()?;
        self.xot
            .to_string(element)
            .map_err(|e| Error::Serialize(e.to_string()))
    }
}
