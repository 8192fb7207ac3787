use anyhow::{ensure, Context};
use dotenv::dotenv;
use gammascript::config::{Limits, MAX_RAW_LEN};

pub struct Config {
    pub bind_addr: String,
    pub limits: Limits,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenv().ok();

        let max_raw_len = match std::env::var("GAMMASCRIPT_MAX_RAW_LEN") {
            Ok(value) => parse_max_raw_len(&value)?,
            Err(_) => MAX_RAW_LEN,
        };

        Ok(Config {
            bind_addr: std::env::var("GAMMASCRIPT_BIND_ADDR")
                .unwrap_or_else(|_| "0.0.0.0:9999".to_string()),
            limits: Limits { max_raw_len },
        })
    }
}

fn parse_max_raw_len(value: &str) -> Result<usize, anyhow::Error> {
    let len: usize = value
        .trim()
        .parse()
        .with_context(|| format!("GAMMASCRIPT_MAX_RAW_LEN must be a positive integer, got '{}'", value))?;
    ensure!(len > 0, "GAMMASCRIPT_MAX_RAW_LEN must be a positive integer, got '{}'", value);
    Ok(len)
}
