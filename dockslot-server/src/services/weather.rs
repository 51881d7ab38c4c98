//! 天气预报查询
//!
//! open-meteo 风格的无鉴权 API，只取日级摘要给预订页展示。

use serde::{Deserialize, Serialize};

use crate::utils::AppError;

const DEFAULT_API: &str = "https://api.open-meteo.com/v1/forecast";

#[derive(Clone)]
pub struct WeatherService {
    api_base: String,
    client: reqwest::Client,
}

/// 日级预报摘要
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyForecast {
    pub date: String,
    pub temp_max_c: f64,
    pub temp_min_c: f64,
    pub wind_max_kmh: f64,
    pub precipitation_mm: f64,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    daily: DailyBlock,
}

#[derive(Debug, Deserialize)]
struct DailyBlock {
    time: Vec<String>,
    temperature_2m_max: Vec<f64>,
    temperature_2m_min: Vec<f64>,
    wind_speed_10m_max: Vec<f64>,
    precipitation_sum: Vec<f64>,
}

impl WeatherService {
    pub fn new(api_base: Option<String>) -> Self {
        Self {
            api_base: api_base.unwrap_or_else(|| DEFAULT_API.to_string()),
            client: reqwest::Client::new(),
        }
    }

    /// 查询某坐标某天的预报；API 没有该日数据时返回 None
    pub async fn daily_forecast(
        &self,
        lat: f64,
        lon: f64,
        date: &str,
    ) -> Result<Option<DailyForecast>, AppError> {
        let resp = self
            .client
            .get(&self.api_base)
            .query(&[
                ("latitude", lat.to_string()),
                ("longitude", lon.to_string()),
                ("start_date", date.to_string()),
                ("end_date", date.to_string()),
                (
                    "daily",
                    "temperature_2m_max,temperature_2m_min,wind_speed_10m_max,precipitation_sum"
                        .to_string(),
                ),
                ("timezone", "UTC".to_string()),
            ])
            .send()
            .await
            .map_err(|e| AppError::internal(format!("Weather API connection failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(AppError::internal(format!(
                "Weather API failed: {}",
                resp.status()
            )));
        }

        let body: ApiResponse = resp
            .json()
            .await
            .map_err(|e| AppError::internal(format!("Weather response parse failed: {e}")))?;

        let d = body.daily;
        let Some(idx) = d.time.iter().position(|t| t == date) else {
            return Ok(None);
        };

        Ok(Some(DailyForecast {
            date: d.time[idx].clone(),
            temp_max_c: *d.temperature_2m_max.get(idx).unwrap_or(&0.0),
            temp_min_c: *d.temperature_2m_min.get(idx).unwrap_or(&0.0),
            wind_max_kmh: *d.wind_speed_10m_max.get(idx).unwrap_or(&0.0),
            precipitation_mm: *d.precipitation_sum.get(idx).unwrap_or(&0.0),
        }))
    }
}
