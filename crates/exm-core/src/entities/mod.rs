//! Entity structs for every level of the exam hierarchy.
//!
//! Each entity maps to one table in the libSQL store. All structs derive
//! `Serialize`, `Deserialize`, and `JsonSchema` so they can be exported as-is.

mod choice;
mod exam;
mod problem;
mod section;
mod topic;
mod translation;
mod unit;

pub use choice::Choice;
pub use exam::Exam;
pub use problem::Problem;
pub use section::Section;
pub use topic::Topic;
pub use translation::ProblemTranslation;
pub use unit::{Placement, Unit};
