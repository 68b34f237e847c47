pub mod book;
pub mod profile;
pub mod reading_goal;
pub mod reading_record;
pub mod reading_session;
pub mod user;

pub use book::Book;
pub use reading_goal::ReadingGoal;
pub use reading_record::{ReadingRecord, ReadingStatus};
pub use reading_session::ReadingSession;
