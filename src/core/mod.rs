pub mod api;
pub mod config;
pub mod form;
pub mod logging;
pub mod notify;
pub mod research;

#[cfg(test)]
pub(crate) mod testing;
