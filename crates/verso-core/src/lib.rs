pub mod batch;
pub mod capture;
pub mod error;
pub mod replay;
pub mod resources;
pub mod session;
pub mod storage;
pub mod store;

#[cfg(test)]
pub(crate) mod test_support;
