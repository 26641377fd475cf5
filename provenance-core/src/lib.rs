#![deny(warnings)]
#![deny(rust_2018_idioms)]

mod allocator;
mod domain;
mod error;
mod ports;
mod zone_resolver;

pub use allocator::*;
pub use domain::*;
pub use error::*;
pub use ports::*;
pub use zone_resolver::*;
