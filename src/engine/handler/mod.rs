pub(crate) mod following_handler;
pub(crate) mod replication_handler;
