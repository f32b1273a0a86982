mod calendar_date;
pub use calendar_date::*;

mod uuid;
pub use self::uuid::*;
