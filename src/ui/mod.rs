pub mod output;
pub mod table;
pub mod theme;

pub use output::{classification, header, info, success, warn};
pub use table::sentiment_table;
pub use theme::{Icons, Theme, sentiment_label, theme};
