//! XSLT transformations with xee

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use xee_interpreter::sequence::{Item, Sequence};
use xot::{Node, ValueType, Xot};
use xth_traits::{
    error::{Error, Result},
    NodeTransform, XmlDocument, XsltProcessor,
};

use crate::document::XotDocument;

const XSLT_NAMESPACE: &str = "http://www.w3.org/1999/XSL/Transform";

/// Stylesheet processor for the standard transformation shape.
///
/// xee compiles stylesheets from text, so importing keeps the prepared
/// stylesheet around until a source document arrives.
#[derive(Debug, Default)]
pub struct XeeProcessor {
    stylesheet: Option<String>,
}

impl XeeProcessor {
    pub fn new() -> Self {
        Self::default()
    }
}

impl XsltProcessor for XeeProcessor {
    type Document = XotDocument;

    fn import_stylesheet(&mut self, stylesheet: &Self::Document) -> Result<()> {
        self.stylesheet = Some(prepare_stylesheet(stylesheet)?);
        Ok(())
    }

    fn transform_to_document(&mut self, source: &Self::Document) -> Result<Self::Document> {
        let stylesheet = self
            .stylesheet
            .as_deref()
            .ok_or_else(|| Error::transform("no stylesheet has been imported"))?;
        let (mut xot, sequence) = evaluate(&source.serialize()?, stylesheet)?;
        let root = result_document(&mut xot, &sequence)?;
        Ok(XotDocument::from_parts(xot, root))
    }
}

impl NodeTransform for XotDocument {
    fn transform_node(&self, stylesheet: &Self) -> Result<String> {
        let (xot, sequence) = evaluate(&self.serialize()?, &prepare_stylesheet(stylesheet)?)?;
        let markup = serialize_items(&xot, &sequence)?;
        Ok(strip_xml_declaration(&markup).to_string())
    }
}

/// Rewrite a stylesheet into the form the xee compiler accepts.
///
/// The compiler only knows the `xsl:transform` root, which is a synonym of
/// `xsl:stylesheet`, and does not implement `xsl:output`. Output is
/// serialized here anyway, so top-level `xsl:output` declarations are
/// dropped.
fn prepare_stylesheet(stylesheet: &XotDocument) -> Result<String> {
    let mut xot = Xot::new();
    let root = xot
        .parse(&stylesheet.serialize()?)
        .map_err(|e| Error::xml_parse(e.to_string()))?;
    let element = xot
        .document_element(root)
        .map_err(|e| Error::transform(e.to_string()))?;

    let xsl = xot.add_namespace(XSLT_NAMESPACE);
    let stylesheet_name = xot.add_name_ns("stylesheet", xsl);
    let transform_name = xot.add_name_ns("transform", xsl);
    let output_name = xot.add_name_ns("output", xsl);

    if let Some(root_element) = xot.element_mut(element) {
        if root_element.name() == stylesheet_name {
            root_element.set_name(transform_name);
        }
    }

    let outputs: Vec<Node> = xot
        .children(element)
        .filter(|&child| {
            xot.element(child)
                .is_some_and(|declaration| declaration.name() == output_name)
        })
        .collect();
    for output in outputs {
        xot.remove(output).map_err(|e| Error::transform(e.to_string()))?;
    }

    xot.to_string(root).map_err(|e| Error::Serialize(e.to_string()))
}

/// Build the standard-shape result document from an evaluation result.
///
/// The first element (or the element of a result document) becomes the
/// document element; a result without one is a failed transformation.
fn result_document(xot: &mut Xot, sequence: &Sequence) -> Result<Node> {
    for item in sequence.iter() {
        let Item::Node(node) = item else { continue };
        match xot.value_type(node) {
            ValueType::Document if xot.document_element(node).is_ok() => return Ok(node),
            ValueType::Element => {
                let element = if xot.parent(node).is_some() {
                    xot.clone_node(node)
                } else {
                    node
                };
                return xot
                    .new_document_with_element(element)
                    .map_err(|e| Error::transform(e.to_string()));
            }
            _ => {}
        }
    }
    Err(Error::transform("XSLT transformation did not produce an element"))
}

/// Serialize every item of an evaluation result as markup, in order.
///
/// Documents and elements are written as XML; text and atomic values are
/// written through their string value.
fn serialize_items(xot: &Xot, sequence: &Sequence) -> Result<String> {
    let mut markup = String::new();
    for item in sequence.iter() {
        match &item {
            Item::Node(node) => match xot.value_type(*node) {
                ValueType::Document | ValueType::Element => {
                    let text = xot
                        .to_string(*node)
                        .map_err(|e| Error::Serialize(e.to_string()))?;
                    markup.push_str(&text);
                }
                ValueType::Text => markup.push_str(&escape_text(&xot.string_value(*node))),
                other => {
                    return Err(Error::transform(format!(
                        "cannot serialize a {other:?} node as output"
                    )))
                }
            },
            Item::Atomic(_) => {
                let value = item
                    .string_value(xot)
                    .map_err(|e| Error::transform(format!("{:?}", e)))?;
                markup.push_str(&escape_text(&value));
            }
            Item::Function(_) => {
                return Err(Error::transform("cannot serialize a function as output"))
            }
        }
    }
    Ok(markup)
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Run `xsl` against `xml` in a fresh arena.
///
/// The compiler aborts on some malformed stylesheets instead of returning an
/// error; those aborts are reported as transformation failures.
fn evaluate(xml: &str, xsl: &str) -> Result<(Xot, Sequence)> {
    log::trace!(
        "evaluating stylesheet ({} bytes) against source ({} bytes)",
        xsl.len(),
        xml.len()
    );
    let mut xot = Xot::new();
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        xee_xslt_compiler::evaluate(&mut xot, xml, xsl)
    }));
    match outcome {
        Ok(Ok(sequence)) => Ok((xot, sequence)),
        Ok(Err(e)) => Err(Error::transform(format!("{:?}", e))),
        Err(payload) => Err(Error::transform(panic_message(payload.as_ref()))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "stylesheet engine aborted".to_string()
    }
}

/// Drop a leading XML declaration; it cannot follow a doctype.
fn strip_xml_declaration(markup: &str) -> &str {
    let trimmed = markup.trim_start();
    let is_declaration = trimmed
        .strip_prefix("<?xml")
        .and_then(|rest| rest.chars().next())
        .is_some_and(|c| c.is_whitespace() || c == '?');
    if !is_declaration {
        return markup;
    }
    match trimmed.find("?>") {
        Some(end) => trimmed[end + 2..].trim_start(),
        None => markup,
    }
}
