//! 页面模板
//!
//! Templates are compiled into the binary and registered with Tera once at
//! startup. Every page extends `layout.html`, which renders the pending flash
//! message and the logged-in user.

use std::collections::HashMap;

use axum::response::{Html, IntoResponse, Response};
use serde::Serialize;
use tera::{Context, Tera, Value};

use crate::auth::Session;
use crate::core::ServerState;
use crate::utils::AppError;

const TEMPLATES: &[(&str, &str)] = &[
    ("layout.html", include_str!("../../templates/layout.html")),
    ("index.html", include_str!("../../templates/index.html")),
    ("recurso.html", include_str!("../../templates/recurso.html")),
    ("mesa/index.html", include_str!("../../templates/mesa/index.html")),
    ("mesa/create.html", include_str!("../../templates/mesa/create.html")),
    ("mesa/show.html", include_str!("../../templates/mesa/show.html")),
    ("mesa/edit.html", include_str!("../../templates/mesa/edit.html")),
    ("tipoproduto/index.html", include_str!("../../templates/tipoproduto/index.html")),
    ("tipoproduto/create.html", include_str!("../../templates/tipoproduto/create.html")),
    ("tipoproduto/show.html", include_str!("../../templates/tipoproduto/show.html")),
    ("tipoproduto/edit.html", include_str!("../../templates/tipoproduto/edit.html")),
    ("produto/index.html", include_str!("../../templates/produto/index.html")),
    ("produto/create.html", include_str!("../../templates/produto/create.html")),
    ("produto/show.html", include_str!("../../templates/produto/show.html")),
    ("produto/edit.html", include_str!("../../templates/produto/edit.html")),
    ("usuario/index.html", include_str!("../../templates/usuario/index.html")),
    ("usuario/create.html", include_str!("../../templates/usuario/create.html")),
    ("usuario/login.html", include_str!("../../templates/usuario/login.html")),
    ("usuario/show.html", include_str!("../../templates/usuario/show.html")),
    ("usuario/edit.html", include_str!("../../templates/usuario/edit.html")),
    (
        "usuario/edit_email_senha.html",
        include_str!("../../templates/usuario/edit_email_senha.html"),
    ),
];

/// 模板集合
pub struct Views {
    tera: Tera,
}

impl Views {
    pub fn new() -> Result<Self, AppError> {
        let mut tera = Tera::default();
        tera.add_raw_templates(TEMPLATES.iter().copied())
            .map_err(|e| AppError::internal(format!("Failed to load templates: {e}")))?;
        tera.register_filter("data_hora", data_hora);
        Ok(Self { tera })
    }

    pub fn render(&self, template: &str, context: &Context) -> Result<String, AppError> {
        self.tera.render(template, context).map_err(|e| {
            AppError::internal(format!("Failed to render {template}: {e:?}"))
        })
    }
}

/// Unix milliseconds → `dd/mm/yyyy HH:MM:SS` (UTC)
fn data_hora(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let millis = value
        .as_i64()
        .ok_or_else(|| tera::Error::msg("data_hora expects a millisecond timestamp"))?;
    let formatted = chrono::DateTime::from_timestamp_millis(millis)
        .map(|dt| dt.format("%d/%m/%Y %H:%M:%S").to_string())
        .unwrap_or_default();
    Ok(Value::String(formatted))
}

/// A page about to be rendered
pub struct Page {
    template: &'static str,
    context: Context,
}

impl Page {
    pub fn new(template: &'static str, title: &str) -> Self {
        let mut context = Context::new();
        context.insert("title", title);
        Self { template, context }
    }

    pub fn with<T: Serialize + ?Sized>(mut self, key: &str, value: &T) -> Self {
        self.context.insert(key, value);
        self
    }

    /// Render with the session's user and pending flash (which is consumed)
    pub fn render(mut self, state: &ServerState, session: &Session) -> Result<Response, AppError> {
        self.context.insert("sessao", &session.user());
        self.context.insert("flash", &session.take_flash());
        let body = state.views.render(self.template, &self.context)?;
        Ok(Html(body).into_response())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_templates_parse() {
        let views = Views::new().unwrap();
        let mut context = Context::new();
        context.insert("title", "Página inicial");
        context.insert("sessao", &None::<()>);
        context.insert("flash", &None::<()>);
        let html = views.render("index.html", &context).unwrap();
        assert!(html.contains("Página inicial"));
    }

    #[test]
    fn test_data_hora_filter() {
        let value = data_hora(&Value::from(0_i64), &HashMap::new()).unwrap();
        assert_eq!(value, Value::String("01/01/1970 00:00:00".into()));
        assert!(data_hora(&Value::from("x"), &HashMap::new()).is_err());
    }
}
