//! Built-in Plugins
//!
//! Plugins implement the Plugin port: the technology-specific PULL and BUILD
//! work for a part.

mod dump;
mod nil;

pub use dump::DumpPlugin;
pub use nil::NilPlugin;

use crate::domain::ports::Plugin;

/// Get all built-in plugins
pub fn all_plugins() -> Vec<Box<dyn Plugin>> {
    vec![Box::new(NilPlugin::new()), Box::new(DumpPlugin::new())]
}

/// Get the plugin registered under `name`
pub fn get_plugin(name: &str) -> Option<Box<dyn Plugin>> {
    match name {
        NilPlugin::NAME => Some(Box::new(NilPlugin::new())),
        DumpPlugin::NAME => Some(Box::new(DumpPlugin::new())),
        _ => None,
    }
}

/// Names of every built-in plugin
pub fn plugin_names() -> Vec<&'static str> {
    all_plugins().iter().map(|p| p.name()).collect()
}
