pub mod company;
pub mod filter;
pub mod user;

pub use company::*;
pub use filter::*;
pub use user::*;
