pub mod todo;
pub mod user;

pub use todo::*;
pub use user::*;
