//! Built-in login page.
//!
//! Template engines are out of scope; this renders a minimal form and
//! exposes the configured template/layout names as data attributes so an
//! embedding application can swap in its own rendering without touching the
//! flow handlers.

use axum::response::Html;

use super::{
    config::GateConfig,
    session::{Flash, FlashKind},
};

pub(super) fn login_page(config: &GateConfig, flash: Option<&Flash>) -> Html<String> {
    let notice = flash.map_or_else(String::new, |flash| {
        let class = match flash.kind {
            FlashKind::Error => "flash flash-error",
            FlashKind::Notice => "flash flash-notice",
        };
        format!("<p class=\"{class}\">{}</p>\n", flash.message)
    });

    let layout = config.auth_layout().unwrap_or("none");

    Html(format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <body data-template=\"{template}\" data-layout=\"{layout}\">\n\
         {notice}\
         <form method=\"post\" action=\"{action}\">\n\
         <label>Username <input type=\"text\" name=\"username\"></label>\n\
         <label>Password <input type=\"password\" name=\"password\"></label>\n\
         <button type=\"submit\">Log in</button>\n\
         </form>\n\
         </body>\n\
         </html>\n",
        template = config.auth_login_template(),
        action = config.auth_login_path(),
    ))
}
