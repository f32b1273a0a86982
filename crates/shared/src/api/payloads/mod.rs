mod exercise;
pub use exercise::*;

mod user;
pub use user::*;
