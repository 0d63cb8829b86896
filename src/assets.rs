//! Client assets from `public/`, embedded at compile time.

pub const MAIN_JS: &str = include_str!("../public/js/main.js");
pub const STYLE_CSS: &str = include_str!("../public/css/style.css");
