//! API service modules for Twitter API v2 endpoints.
//!
//! Each service is a thin wrapper that pairs an endpoint with its option
//! set and hands both to the client's transport engine.

mod lists;
mod rules;
mod spaces;
mod tweets;
mod users;

pub use lists::ListsService;
pub use rules::{RuleUpdate, RulesService};
pub use spaces::SpacesService;
pub use tweets::TweetsService;
pub use users::UsersService;
