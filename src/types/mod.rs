mod assignee;
mod board;
mod issue;
mod priority;
mod status;

pub use assignee::Assignee;
pub use board::Board;
pub use issue::{Issue, IssueFields};
pub use priority::Priority;
pub use status::Status;
