pub mod apply;
pub mod new;
pub mod relations;
pub mod show;

pub use apply::{apply, ApplyArgs};
pub use new::{create, NewArgs};
pub use relations::{relations, RelationsArgs};
pub use show::{show, ShowArgs};
