//! Widget page rendering.
//!
//! Rendering is a pure function of the (optional) tool output and the
//! (optional) host context. Missing data never produces an error; it
//! degrades to fallback values. The emitted page carries a small script that
//! re-applies the same lookups in the browser once the host injects
//! `window.openai`.

mod output;
mod view;

pub use output::ToolOutput;
pub use view::{AbcView, HomeView, PageChrome, ABC_FALLBACK};

use crate::context::HostContext;
use crate::error::CoreResult;
use minijinja::{context, Environment};

const TEMPLATES: &[(&str, &str)] = &[
    ("base.html", include_str!("../../templates/base.html")),
    ("abc.html", include_str!("../../templates/abc.html")),
    ("home.html", include_str!("../../templates/home.html")),
    ("hydrate.js", include_str!("../../templates/hydrate.js")),
];

/// Renders widget pages from embedded templates.
///
/// `.html` templates are auto-escaped, so injected values cannot break out
/// of the markup.
pub struct PageRenderer {
    env: Environment<'static>,
}

impl PageRenderer {
    pub fn new() -> CoreResult<Self> {
        let mut env = Environment::new();
        for &(name, source) in TEMPLATES {
            env.add_template(name, source)?;
        }
        Ok(Self { env })
    }

    /// Render the `/abc` page.
    pub fn abc_page(
        &self,
        output: Option<&ToolOutput>,
        ctx: Option<&HostContext>,
    ) -> CoreResult<String> {
        self.render_abc(&AbcView::derive(output, ctx))
    }

    /// Render the `/` page.
    pub fn home_page(
        &self,
        output: Option<&ToolOutput>,
        ctx: Option<&HostContext>,
    ) -> CoreResult<String> {
        self.render_home(&HomeView::derive(output, ctx))
    }

    pub fn render_abc(&self, view: &AbcView) -> CoreResult<String> {
        let template = self.env.get_template("abc.html")?;
        let html = template.render(context! {
            data => &view.data,
            query => &view.query,
            fallback => ABC_FALLBACK,
            chrome => &view.chrome,
            container_style => view.chrome.container_style(),
        })?;
        tracing::debug!(data = %view.data, query = ?view.query, "Rendered abc page");
        Ok(html)
    }

    pub fn render_home(&self, view: &HomeView) -> CoreResult<String> {
        let template = self.env.get_template("home.html")?;
        let html = template.render(context! {
            name => &view.name,
            chrome => &view.chrome,
            container_style => view.chrome.container_style(),
        })?;
        Ok(html)
    }
}
