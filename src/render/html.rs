//! Print-ready HTML output.

use super::{PageLayout, RenderError, RenderJob, RenderedDocument, Renderer};
use crate::components::escape_html;

/// Composes header, document and footer markup into one HTML page whose
/// `@page` rule carries the route's paper size and margins.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlRenderer;

impl HtmlRenderer {
    pub const CONTENT_TYPE: &'static str = "text/html; charset=utf-8";

    /// Render `job` to an HTML string.
    pub fn render_html(&self, job: &RenderJob) -> String {
        let route = &job.route;
        let layout = PageLayout::from_output(route.output());
        let m = layout.margin_in;

        let mut html = String::from("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
        html.push_str(&format!("<title>{}</title>\n", escape_html(route.path())));
        html.push_str(&format!(
            "<style>@page {{ size: {:.4}in {:.4}in; margin: {:.4}in {:.4}in {:.4}in {:.4}in; }} body {{ margin: 0; }}</style>\n",
            layout.width_in, layout.height_in, m.top, m.right, m.bottom, m.left
        ));
        html.push_str("</head>\n<body>\n");

        if let Some(header) = route.header() {
            html.push_str(&format!("<header>{}</header>\n", header.render(&job.props)));
        }
        html.push_str(&format!("<main>{}</main>\n", route.document().render(&job.props)));
        if let Some(footer) = route.footer() {
            html.push_str(&format!("<footer>{}</footer>\n", footer.render(&job.props)));
        }

        html.push_str("</body>\n</html>\n");
        html
    }
}

impl Renderer for HtmlRenderer {
    fn render(&self, job: &RenderJob) -> Result<RenderedDocument, RenderError> {
        Ok(RenderedDocument {
            content_type: Self::CONTENT_TYPE,
            body: self.render_html(job).into_bytes(),
        })
    }
}
