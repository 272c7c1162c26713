use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use crate::weather::types::CurrentWeatherResponse;
use crate::weather::{CityWeather, WeatherProvider};

pub const DEFAULT_API_URL: &str = "https://api.openweathermap.org";
const CURRENT_WEATHER_PATH: &str = "/data/2.5/weather";

#[derive(Clone)]
pub struct OpenWeatherClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl OpenWeatherClient {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn fetch_current(&self, city: &str) -> Result<CityWeather> {
        let response = self
            .http
            .get(format!("{}{}", self.base_url, CURRENT_WEATHER_PATH))
            .query(&[("q", city), ("appid", self.api_key.as_str())])
            .header("Accept", "application/json")
            .send()
            .await
            .context("weather request failed")?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(CityWeather::NotFound);
        }

        let text = response
            .text()
            .await
            .context("failed to read weather response")?;
        if !status.is_success() {
            bail!("weather provider returned {}: {}", status, text);
        }

        let data = serde_json::from_str::<CurrentWeatherResponse>(&text)
            .context("malformed weather response")?;

        Ok(CityWeather::Found {
            kelvin: data.main.temp,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn returns_kelvin_for_known_city() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .and(query_param("q", "London"))
            .and(query_param("appid", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "name": "London",
                "main": { "temp": 288.15, "humidity": 71 },
                "cod": 200
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = OpenWeatherClient::new(&server.uri(), "test-key");
        let weather = client.fetch_current("London").await.unwrap();

        assert_eq!(weather, CityWeather::Found { kelvin: 288.15 });
    }

    #[tokio::test]
    async fn passes_city_name_through_unchanged() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .and(query_param("q", "  new york "))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "main": { "temp": 273.15 }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = OpenWeatherClient::new(&format!("{}/", server.uri()), "k");
        let weather = client.fetch_current("  new york ").await.unwrap();

        assert_eq!(weather, CityWeather::Found { kelvin: 273.15 });
    }

    #[tokio::test]
    async fn maps_404_to_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "cod": "404",
                "message": "city not found"
            })))
            .mount(&server)
            .await;

        let client = OpenWeatherClient::new(&server.uri(), "test-key");
        let weather = client.fetch_current("Nonexistentcityxyz").await.unwrap();

        assert_eq!(weather, CityWeather::NotFound);
    }

    #[tokio::test]
    async fn other_failures_are_errors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("q", "Unauthorized"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(query_param("q", "Garbled"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let client = OpenWeatherClient::new(&server.uri(), "test-key");

        let err = client.fetch_current("Unauthorized").await.unwrap_err();
        assert!(err.to_string().contains("401"));

        let err = client.fetch_current("Garbled").await.unwrap_err();
        assert!(err.to_string().contains("malformed weather response"));
    }
}
