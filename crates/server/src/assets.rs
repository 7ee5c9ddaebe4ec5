// crates/server/src/assets.rs
//! Browser UI compiled into the binary.

pub(crate) const INDEX_HTML: &str = include_str!("assets/index.html");
pub(crate) const ENTRIES_HTML: &str = include_str!("assets/entries.html");
pub(crate) const CONFIG_HTML: &str = include_str!("assets/config.html");
pub(crate) const APP_CSS: &str = include_str!("assets/app.css");
pub(crate) const APP_JS: &str = include_str!("assets/app.js");
pub(crate) const FAVICON: &[u8] = include_bytes!("assets/favicon.ico");

/// Look up a file served under `/static/`, returning its content type and body.
pub(crate) fn static_file(name: &str) -> Option<(&'static str, &'static [u8])> {
    match name {
        "app.css" => Some(("text/css; charset=utf-8", APP_CSS.as_bytes())),
        "app.js" => Some((
            "application/javascript; charset=utf-8",
            APP_JS.as_bytes(),
        )),
        _ => None,
    }
}
