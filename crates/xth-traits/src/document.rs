//! Document and stylesheet engine abstraction traits

use crate::error::Result;

/// Trait for parsed XML-family documents (source XML or XSL stylesheets).
///
/// Documents are owned values: whoever parsed one holds it exclusively until
/// it is handed to a transformation. `Send` is required so a pipeline can keep
/// a document alive across a pending load.
pub trait XmlDocument: Sized + Send {
    /// Parse a document from a string
    fn parse(xml: &str) -> Result<Self>;

    /// Serialize the whole document to a string
    fn serialize(&self) -> Result<String>;

    /// Serialize only the document element (the root element) to a string
    fn serialize_document_element(&self) -> Result<String>;
}

/// The legacy transformation shape: a document applies a stylesheet to
/// itself and returns markup text directly.
pub trait NodeTransform: XmlDocument {
    fn transform_node(&self, stylesheet: &Self) -> Result<String>;
}

/// The standard transformation shape: a processor imports a stylesheet and
/// then turns source documents into result documents.
pub trait XsltProcessor: Default {
    /// The document type this processor reads and produces
    type Document: XmlDocument;

    /// Import the stylesheet subsequent transformations will apply
    fn import_stylesheet(&mut self, stylesheet: &Self::Document) -> Result<()>;

    /// Transform a source document into a result document
    fn transform_to_document(&mut self, source: &Self::Document) -> Result<Self::Document>;

    /// Transform a source document and serialize the result's document element
    fn transform_to_string(&mut self, source: &Self::Document) -> Result<String> {
        let result = self.transform_to_document(source)?;
        result.serialize_document_element()
    }
}
