pub mod album;
pub mod config;
pub mod session;

#[cfg(test)]
pub mod test_fixture;
