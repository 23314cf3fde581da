//! Admin views: declaration, registration and URL derivation.
//!
//! An [`AdminView`] is declared once per page, added to a [`ViewRegistry`]
//! at startup, and turned into a [`UrlTable`] and a menu forest. There is no
//! auto-discovery: the registry only knows the views it was handed.

mod naming;
mod registry;
mod request;
mod urls;

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use axum::http::Method;
use axum::response::{IntoResponse, Response};

use crate::menu::MenuNode;

pub use naming::{
    INDEX_PATTERN, ROOT_NAMESPACE, ROOT_PATTERN, VIEW_SUFFIX, derive_canonical_name,
    derive_path_pattern,
};
pub use registry::{RegistryError, ViewRegistry};
pub use request::ViewRequest;
pub use urls::{ResolverMatch, UrlPattern, UrlTable};

/// Template rendered by views that do not override `GET`.
pub const DEFAULT_TEMPLATE: &str = "adminlte/index.html";

/// Boxed future returned by a [`ViewHandler`].
pub type HandlerFuture = Pin<Box<dyn Future<Output = Response> + Send>>;

/// A type-erased page handler.
pub type ViewHandler = Arc<dyn Fn(ViewRequest) -> HandlerFuture + Send + Sync>;

/// Wrap an async function into a [`ViewHandler`].
pub fn handler<F, Fut, R>(f: F) -> ViewHandler
where
    F: Fn(ViewRequest) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse,
{
    Arc::new(move |request: ViewRequest| -> HandlerFuture {
        let fut = f(request);
        Box::pin(async move { fut.await.into_response() })
    })
}

/// A registered admin page.
#[derive(Clone)]
pub struct AdminView {
    class_name: String,
    menu: Option<MenuNode>,
    template_name: String,
    login_required: bool,
    handlers: Vec<(Method, ViewHandler)>,
}

impl AdminView {
    /// Declare a view. Its URL and canonical name derive from `class_name`.
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            menu: None,
            template_name: DEFAULT_TEMPLATE.to_string(),
            login_required: true,
            handlers: Vec::new(),
        }
    }

    /// Attach a sidebar menu entry.
    pub fn menu(mut self, menu: MenuNode) -> Self {
        self.menu = Some(menu);
        self
    }

    /// Template rendered by the default `GET` handler.
    pub fn template(mut self, template_name: impl Into<String>) -> Self {
        self.template_name = template_name.into();
        self
    }

    /// Opt the view out of the staff check.
    pub fn login_required(mut self, required: bool) -> Self {
        self.login_required = required;
        self
    }

    /// Handle `GET` (and `HEAD`).
    pub fn get(self, handler: ViewHandler) -> Self {
        self.on(Method::GET, handler)
    }

    /// Handle `POST`.
    pub fn post(self, handler: ViewHandler) -> Self {
        self.on(Method::POST, handler)
    }

    /// Handle an arbitrary method, replacing any earlier handler for it.
    pub fn on(mut self, method: Method, handler: ViewHandler) -> Self {
        self.handlers.retain(|(m, _)| *m != method);
        self.handlers.push((method, handler));
        self
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn menu_node(&self) -> Option<&MenuNode> {
        self.menu.as_ref()
    }

    pub fn template_name(&self) -> &str {
        &self.template_name
    }

    pub fn requires_login(&self) -> bool {
        self.login_required
    }

    /// Derived path pattern, e.g. `^user/list$`.
    pub fn path_pattern(&self) -> String {
        derive_path_pattern(&self.class_name)
    }

    /// Derived canonical name, e.g. `adminlte.user.list`.
    pub fn canonical_name(&self) -> String {
        derive_canonical_name(&self.class_name)
    }

    /// Select the handler for `method`.
    ///
    /// `HEAD` falls back to `GET`, and `GET` falls back to rendering the
    /// view's template. Anything else without a handler is not allowed.
    pub fn handler_for(&self, method: &Method) -> Option<ViewHandler> {
        let lookup = |m: &Method| {
            self.handlers
                .iter()
                .find(|(hm, _)| hm == m)
                .map(|(_, h)| h.clone())
        };

        if let Some(h) = lookup(method) {
            return Some(h);
        }

        if *method == Method::GET || *method == Method::HEAD {
            return Some(
                lookup(&Method::GET).unwrap_or_else(|| render_template(self.template_name.clone())),
            );
        }

        None
    }

    /// Methods this view answers, for the `Allow` header.
    pub fn allowed_methods(&self) -> Vec<Method> {
        let mut methods = vec![Method::GET, Method::HEAD];
        for (method, _) in &self.handlers {
            if !methods.contains(method) {
                methods.push(method.clone());
            }
        }
        methods
    }
}

impl std::fmt::Debug for AdminView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminView")
            .field("class_name", &self.class_name)
            .field("template_name", &self.template_name)
            .field("login_required", &self.login_required)
            .field("methods", &self.allowed_methods())
            .finish_non_exhaustive()
    }
}

/// Handler that renders `template` with the admin context.
pub fn render_template(template: String) -> ViewHandler {
    let template: Arc<str> = template.into();
    handler(move |request: ViewRequest| {
        let template = template.clone();
        async move { request.render(&template, tera::Context::new()) }
    })
}
