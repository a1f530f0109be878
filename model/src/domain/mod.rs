pub mod artwork;
pub mod currency;
pub mod history;
pub mod ledger;
pub mod minimum_bid;
pub mod pledge;
pub mod user;
pub mod validation;
