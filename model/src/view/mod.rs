pub mod artwork;
pub mod pledge;
