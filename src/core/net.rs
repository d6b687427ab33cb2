// src/core/net.rs
// Blocking HTTP with a shared cookie jar (LinkedIn login rides on it).

use std::time::Duration;

use reqwest::blocking::Client;

use crate::config::consts::{CONNECT_TIMEOUT_SECS, REQUEST_TIMEOUT_SECS, USER_AGENT};
use crate::error::{Result, ScrapeError};

/// What the extractors need from the network. Tests swap in canned pages.
pub trait Fetch {
    /// GET `url` and return the body. Non-2xx is an error.
    fn get(&self, url: &str) -> Result<String>;

    /// POST an urlencoded form and return the body of the final response.
    fn post_form(&self, url: &str, form: &[(&str, &str)]) -> Result<String>;
}

pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .cookie_store(true)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()?;
        Ok(Self { client })
    }

    fn read_body(resp: reqwest::blocking::Response) -> Result<String> {
        let status = resp.status();
        let url = resp.url().to_string();
        if !status.is_success() {
            return Err(ScrapeError::status(status.as_u16(), url));
        }
        let body = resp.text()?;
        logd!("GET {url} → {} bytes", body.len());
        Ok(body)
    }
}

impl Fetch for HttpClient {
    fn get(&self, url: &str) -> Result<String> {
        let resp = self.client.get(url).send()?;
        Self::read_body(resp)
    }

    fn post_form(&self, url: &str, form: &[(&str, &str)]) -> Result<String> {
        let resp = self.client.post(url).form(form).send()?;
        Self::read_body(resp)
    }
}
