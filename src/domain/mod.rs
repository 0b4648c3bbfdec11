pub mod errors;
pub mod models;
pub mod slug;
pub mod validation;

pub use errors::*;
pub use models::*;
pub use slug::*;
pub use validation::*;
