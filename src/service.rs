use anyhow::{bail, Context as _, Result};
use chrono::Utc;
use reqwest::{Client, StatusCode};
use rmcp::{
    handler::server::{tool::ToolRouter, wrapper::Parameters, ServerHandler},
    model::{
        CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
    },
    tool, tool_handler, tool_router,
    ErrorData as McpError,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::config::Config;
use crate::constants::{OPENWEATHER_API_BASE, USER_AGENT};
use crate::formatters::{current_weather_report, forecast_report};
use crate::models::{
    CurrentWeatherRequest, CurrentWeatherResponse, ForecastRequest, ForecastResponse,
    ProviderError,
};

/// Weather tool adapter exposed over MCP. Holds the shared HTTP client and
/// the API credential; both are set once at startup and never mutated.
#[derive(Clone)]
pub struct Weather {
    client: Arc<Client>,
    api_key: Arc<str>,
    tool_router: ToolRouter<Self>,
}

impl Weather {
    pub fn new(config: Config) -> Result<Self> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self {
            client: Arc::new(client),
            api_key: config.api_key.into(),
            tool_router: Self::tool_router(),
        })
    }

    /// Issues one GET against the provider with the credential attached and
    /// deserializes the JSON response. Any failure here is an upstream-service
    /// fault; callers report it rather than aborting the call.
    async fn fetch<T: for<'de> Deserialize<'de>>(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        let url = format!("{}/{}", OPENWEATHER_API_BASE, endpoint);

        let response = self
            .client
            .get(&url)
            .query(&[("appid", &*self.api_key)])
            .query(query)
            .send()
            .await
            .context("request to OpenWeather failed")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            bail!("{}", provider_error_message(status, &body));
        }

        let data = response
            .json::<T>()
            .await
            .context("failed to decode OpenWeather response")?;

        Ok(data)
    }
}

/// Error text for a non-2xx provider response: the provider's own message
/// when the body carries one, otherwise the HTTP status.
fn provider_error_message(status: StatusCode, body: &str) -> String {
    let message = serde_json::from_str::<ProviderError>(body)
        .ok()
        .and_then(|err| err.message);

    match message {
        Some(message) if !message.is_empty() => message,
        _ => format!("request failed with status {}", status),
    }
}

/// Wraps an upstream-service fault in a reported tool failure, so the
/// calling agent sees a result to reason about rather than a hard error.
fn upstream_error(error: anyhow::Error) -> CallToolResult {
    CallToolResult::error(vec![Content::text(format!("Weather API error: {}", error))])
}

fn pretty_text<T: serde::Serialize>(report: &T) -> Result<CallToolResult, McpError> {
    let text = serde_json::to_string_pretty(report)
        .map_err(|e| McpError::internal_error(format!("failed to serialize report: {}", e), None))?;

    Ok(CallToolResult::success(vec![Content::text(text)]))
}

#[tool_router]
impl Weather {
    /// Current conditions for a city, formatted for display
    #[tool(description = "Get current weather for a city")]
    async fn get_current_weather(
        &self,
        Parameters(request): Parameters<CurrentWeatherRequest>,
    ) -> Result<CallToolResult, McpError> {
        let args = request.validate()?;

        tracing::info!(city = %args.city, units = %args.units, "current weather lookup");

        let result = self
            .fetch::<CurrentWeatherResponse>(
                "weather",
                &[("q", &args.city), ("units", args.units.as_str())],
            )
            .await;

        match result {
            Ok(data) => pretty_text(&current_weather_report(data, args.units, Utc::now())),
            Err(e) => Ok(upstream_error(e)),
        }
    }

    /// Multi-day forecast for a city, grouped by date
    #[tool(description = "Get weather forecast for a city")]
    async fn get_weather_forecast(
        &self,
        Parameters(request): Parameters<ForecastRequest>,
    ) -> Result<CallToolResult, McpError> {
        let args = request.validate()?;

        tracing::info!(
            city = %args.city,
            days = args.days,
            units = %args.units,
            "forecast lookup"
        );

        let count = args.interval_count().to_string();
        let result = self
            .fetch::<ForecastResponse>(
                "forecast",
                &[
                    ("q", &args.city),
                    ("units", args.units.as_str()),
                    ("cnt", &count),
                ],
            )
            .await;

        match result {
            Ok(data) => pretty_text(&forecast_report(data, args.units, Utc::now())),
            Err(e) => Ok(upstream_error(e)),
        }
    }
}

#[tool_handler]
impl ServerHandler for Weather {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "openweather-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some(
                "A weather information service powered by the OpenWeather API. \
                Provides current conditions and up to 5-day forecasts by city name."
                    .to_string(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_message_is_used_verbatim() {
        let text =
            provider_error_message(StatusCode::NOT_FOUND, r#"{"cod":"404","message":"city not found"}"#);
        assert_eq!(text, "city not found");
    }

    #[test]
    fn unparseable_body_falls_back_to_status() {
        let text = provider_error_message(StatusCode::BAD_GATEWAY, "<html>oops</html>");
        assert_eq!(text, "request failed with status 502 Bad Gateway");
    }

    #[test]
    fn empty_message_falls_back_to_status() {
        let text = provider_error_message(StatusCode::UNAUTHORIZED, r#"{"message":""}"#);
        assert_eq!(text, "request failed with status 401 Unauthorized");
    }

    #[test]
    fn upstream_fault_is_reported_not_thrown() {
        let result = upstream_error(anyhow::anyhow!("city not found"));
        let json = serde_json::to_value(&result).expect("serializable result");

        assert_eq!(json["isError"], serde_json::json!(true));
        assert_eq!(
            json["content"][0]["text"],
            serde_json::json!("Weather API error: city not found")
        );
    }
}
