//! Built-in rules
//!
//! - **Numeric**: [`Min`], [`Max`]
//! - **Text**: [`Length`], [`NotBlank`]
//! - **Containers**: [`Size`]
//! - **Presence**: [`NotNull`]

mod length;
mod nullable;
mod numeric;
mod size;

pub use length::{Length, NotBlank, length, max_length, min_length, not_blank};
pub use nullable::{NotNull, not_null};
pub use numeric::{Max, Min, max, min};
pub use size::{Size, max_size, min_size, size};
