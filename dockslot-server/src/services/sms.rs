//! 短信转发服务
//!
//! 简单的 webhook 转发：POST {url} {"to", "body"}。
//! 投递保证在网关一侧，这里只负责提交。

use serde_json::json;

use crate::utils::AppError;

#[derive(Clone)]
pub struct SmsService {
    webhook_url: Option<String>,
    client: reqwest::Client,
}

impl SmsService {
    pub fn new(webhook_url: Option<String>) -> Self {
        Self {
            webhook_url,
            client: reqwest::Client::new(),
        }
    }

    /// 发送短信；未配置网关时记日志并成功返回
    pub async fn send(&self, to: &str, body: &str) -> Result<(), AppError> {
        let Some(url) = &self.webhook_url else {
            tracing::info!(to, "SMS service disabled, skipping send");
            return Ok(());
        };

        let resp = self
            .client
            .post(url)
            .json(&json!({ "to": to, "body": body }))
            .send()
            .await
            .map_err(|e| AppError::internal(format!("SMS gateway connection failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(AppError::internal(format!(
                "SMS send failed: {}",
                resp.status()
            )));
        }

        tracing::info!(to, "SMS sent");
        Ok(())
    }
}
