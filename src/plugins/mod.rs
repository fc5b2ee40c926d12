//! Built-in plugins, in the order [`crate::generate_app`] runs them.

pub mod block;
pub mod page;
pub mod template;

pub use block::{BlockPlugin, BlockPluginOptions};
pub use page::{PagePlugin, PagePluginOptions};
pub use template::{TemplatePlugin, TemplatePluginOptions};
