//! Common constants used throughout envp.

/// Pattern used to pick templates out of a directory
pub const TEMPLATE_GLOB: &str = "*.gohtml";

/// Conventional root template names, tried in this order
pub const ROOT_TEMPLATES: [&str; 2] = ["base.gohtml", "root.gohtml"];

/// Deepest chain of templates rendered from inside other templates
pub const MAX_TEMPLATE_DEPTH: usize = 32;
