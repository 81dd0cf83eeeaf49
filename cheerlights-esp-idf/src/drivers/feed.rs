use std::time::Duration;

use cheerlights::svc::{parse_color_name, Feed, FeedError};
use embedded_svc::http::client::Client;
use embedded_svc::http::Status;
use embedded_svc::io::Read;
use esp_idf_svc::http::client::{Configuration, EspHttpConnection};

// The latest-entry record is a few hundred bytes.
const MAX_BODY_SIZE: usize = 2048;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub struct HttpFeed {
    url: String,
    field: String,
}

impl HttpFeed {
    pub fn new(url: &str, field: &str) -> Self {
        Self {
            url: url.to_owned(),
            field: field.to_owned(),
        }
    }

    fn get(&self) -> Result<Vec<u8>, FeedError> {
        let connection = EspHttpConnection::new(&Configuration {
            crt_bundle_attach: Some(esp_idf_sys::esp_crt_bundle_attach),
            timeout: Some(REQUEST_TIMEOUT),
            ..Default::default()
        })
        .map_err(network_error)?;

        let mut client = Client::wrap(connection);
        let request = client.get(&self.url).map_err(network_error)?;
        let mut response = request.submit().map_err(network_error)?;

        let status = response.status();
        if !(200..300).contains(&status) {
            return Err(FeedError::Http { status });
        }

        let mut body = Vec::new();
        let mut buf = [0u8; 256];
        loop {
            let n = response.read(&mut buf).map_err(network_error)?;
            if n == 0 {
                break;
            }
            body.extend_from_slice(&buf[..n]);
            if body.len() > MAX_BODY_SIZE {
                return Err(FeedError::Network(format!(
                    "response larger than {MAX_BODY_SIZE} bytes"
                )));
            }
        }

        Ok(body)
    }
}

fn network_error(e: impl std::fmt::Display) -> FeedError {
    FeedError::Network(e.to_string())
}

impl Feed for HttpFeed {
    fn fetch_latest_color_name(&self) -> Result<String, FeedError> {
        let body = self.get()?;
        log::trace!("{} bytes from {}", body.len(), self.url);
        parse_color_name(&body, &self.field)
    }
}
