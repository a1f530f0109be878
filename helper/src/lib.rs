pub mod env;
pub mod err;
pub mod from_disk;
pub mod init;
pub mod reqwest_helper;
