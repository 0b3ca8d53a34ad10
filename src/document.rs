//! Standalone HTML document around composed markup, ready for a headless
//! rasterizer.

use tessera_compose::style::escape_attr;
use tessera_types::RenderContext;

/// Wraps `body` in a document whose canvas matches the context's viewport.
///
/// A `<base href>` is emitted when the context has a base URL so that
/// relative asset references inside module fragments resolve.
pub fn wrap_document(body: &str, context: &RenderContext) -> String {
    let base = match context.base_url.trim() {
        "" => String::new(),
        url => format!("<base href=\"{}\">\n", escape_attr(url)),
    };
    let (width, height) = (context.viewport_width, context.viewport_height);

    format!(
        "<!DOCTYPE html>\n\
<html>\n\
<head>\n\
<meta charset=\"utf-8\">\n\
{base}\
<style>\n\
html, body {{ margin: 0; padding: 0; }}\n\
.composition-canvas {{ position: relative; width: {width}px; height: {height}px; overflow: hidden; }}\n\
.composition-root {{ box-sizing: border-box; width: 100%; height: 100%; }}\n\
</style>\n\
</head>\n\
<body>\n\
<div class=\"composition-canvas\">\n\
{body}\n\
</div>\n\
</body>\n\
</html>\n"
    )
}
