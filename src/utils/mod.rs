pub mod asset_store;
pub mod db_utils;
