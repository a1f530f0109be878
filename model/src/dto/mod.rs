pub mod artwork;
pub mod identity;
pub mod pledge;
