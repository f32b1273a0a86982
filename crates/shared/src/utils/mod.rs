mod env;
pub use env::*;

mod tracing;
pub use self::tracing::*;
