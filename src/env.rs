use std::env;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    #[error("couldn't parse the value of {0:?} environment variable as UTF-8 string")]
    NotUtf8(String),
}

/// Reads `name` as a UTF-8 string; `Ok(None)` when it is not set.
pub fn env_var(name: &str) -> Result<Option<String>, Error> {
    env::var_os(name)
        .map(|value| {
            value
                .into_string()
                .map_err(|_| Error::NotUtf8(name.to_string()))
        })
        .transpose()
}
