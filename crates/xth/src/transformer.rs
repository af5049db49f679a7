//! Applying a stylesheet to a source document

use xth_traits::{EnvironmentVariant, NodeTransform, Result, XsltProcessor};

/// Prefix every rendered page starts with
pub const DOCTYPE: &str = "<!DOCTYPE html>";

/// Apply `xsl` to `xml` the way the variant's host would.
///
/// Engine rejections propagate unchanged.
pub fn transform<P>(xml: &P::Document, xsl: &P::Document, variant: EnvironmentVariant) -> Result<String>
where
    P: XsltProcessor,
    P::Document: NodeTransform,
{
    match variant {
        EnvironmentVariant::Standard => {
            let mut processor = P::default();
            processor.import_stylesheet(xsl)?;
            processor.transform_to_string(xml)
        }
        EnvironmentVariant::Legacy => xml.transform_node(xsl),
    }
}

/// [`transform`] and prefix the result with [`DOCTYPE`]
pub fn render<P>(xml: &P::Document, xsl: &P::Document, variant: EnvironmentVariant) -> Result<String>
where
    P: XsltProcessor,
    P::Document: NodeTransform,
{
    let body = transform::<P>(xml, xsl, variant)?;
    Ok(format!("{DOCTYPE}{body}"))
}
