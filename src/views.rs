//! HTML rendering.
//!
//! Templates are compiled into the binary and loaded into one shared
//! `minijinja` environment on first use. `.html` templates autoescape.

use std::sync::LazyLock;

use minijinja::{Environment, HtmlEscape, context};
use serde::Serialize;
use tracing::error;

use crate::error::{Error, PageError};
use crate::response::Response;
use crate::status::Status;

const TEMPLATES: &[(&str, &str)] = &[
    ("base.html",    include_str!("../templates/base.html")),
    ("home.html",    include_str!("../templates/home.html")),
    ("artists.html", include_str!("../templates/artists.html")),
    ("artist.html",  include_str!("../templates/artist.html")),
    ("error.html",   include_str!("../templates/error.html")),
];

static ENV: LazyLock<Environment<'static>> = LazyLock::new(|| {
    let mut env = Environment::new();
    for &(name, source) in TEMPLATES {
        if let Err(e) = env.add_template(name, source) {
            error!(template = name, "template failed to compile: {e}");
        }
    }
    env
});

/// Renders template `name` with `ctx`.
pub fn render<S: Serialize>(name: &str, ctx: S) -> Result<String, Error> {
    let template = ENV.get_template(name)?;
    Ok(template.render(ctx)?)
}

/// Renders a full page, turning a rendering failure into a `500` page.
pub fn page<S: Serialize>(name: &str, ctx: S) -> Result<Response, PageError> {
    render(name, ctx)
        .map(Response::html)
        .map_err(|e| {
            error!(template = name, "render failed: {e}");
            PageError::internal("Error executing template")
        })
}

/// Renders the error page for `status`. Never fails: if `error.html` cannot
/// be rendered a built-in page is used instead.
pub fn render_error(status: Status, message: &str) -> Response {
    let code = status.as_u16();
    let body = render("error.html", context! { code => code, message => message }).unwrap_or_else(|e| {
        error!(code, "error template failed, using fallback: {e}");
        fallback_error_page(code, message)
    });
    Response::builder().status(status).html(body)
}

fn fallback_error_page(code: u16, message: &str) -> String {
    format!(
        "<html><body>\n<h1>Error {code}</h1>\n<p>{}</p>\n</body></html>\n",
        HtmlEscape(message)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_template_compiles() {
        for &(name, _) in TEMPLATES {
            assert!(ENV.get_template(name).is_ok(), "{name} failed to load");
        }
    }

    #[test]
    fn error_page_carries_code_and_escapes_message() {
        let res = render_error(Status::BadRequest, "<script>bad</script>");
        assert_eq!(res.status(), Status::BadRequest);
        let body = String::from_utf8(res.body().to_vec()).unwrap();
        assert!(body.contains("400"));
        assert!(body.contains("&lt;script&gt;"));
        assert!(!body.contains("<script>"));
    }

    #[test]
    fn unknown_template_is_an_error() {
        assert!(matches!(render("missing.html", ()), Err(Error::Template(_))));
        let err = page("missing.html", ()).unwrap_err();
        assert_eq!(err.status(), Status::InternalServerError);
    }

    #[test]
    fn fallback_page_is_escaped() {
        let page = fallback_error_page(500, "a & <b>");
        assert!(page.contains("Error 500"));
        assert!(page.contains("a &amp; &lt;b&gt;"));
    }
}
