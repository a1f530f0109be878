pub(crate) mod access;
pub(crate) mod ledger;
pub(crate) mod pledge;
