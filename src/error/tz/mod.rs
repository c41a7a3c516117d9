pub(crate) mod db;
pub(crate) mod rule;
pub(crate) mod table;
