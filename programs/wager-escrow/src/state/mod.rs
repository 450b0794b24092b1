pub mod event_record;
pub mod outcome;
pub mod participant_record;

pub use event_record::*;
pub use outcome::*;
pub use participant_record::*;
