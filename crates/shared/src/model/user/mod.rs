mod user;
pub use user::*;

mod new;
pub use new::*;

mod profile;
pub use profile::*;
