pub mod bet;
pub mod create;
pub mod delete;
pub mod opt_in;
pub mod payout;
pub mod set_event_result;

pub use bet::*;
pub use create::*;
pub use delete::*;
pub use opt_in::*;
pub use payout::*;
pub use set_event_result::*;
