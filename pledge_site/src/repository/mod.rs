pub(crate) mod catalog;
pub(crate) mod identity;
pub(crate) mod pledge_store;
#[cfg(not(feature = "offline"))]
pub(crate) mod supabase;
