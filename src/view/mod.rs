//! Data-to-view binding: element tree, section builders, summary bar.

pub mod markup;
pub mod profile;
pub mod sections;
pub mod summary;

pub use markup::{Element, Node, escape_html};
pub use profile::{ProfileRenderer, RawTraceRenderer};
pub use sections::SectionView;
