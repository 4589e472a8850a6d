//! CLI command handlers, one file per command.

mod completions;
mod decode;
mod encode;
mod product_info;
mod quarterly_dates;
mod release_info;
mod releases;
mod verify;

pub use completions::{run_completions, run_man};
pub use decode::{run_decode, DecodeOutput};
pub use encode::run_encode;
pub use product_info::run_product_info;
pub use quarterly_dates::run_quarterly_dates;
pub use release_info::run_release_info;
pub use releases::run_releases;
pub use verify::run_verify;
