//! Stripe Checkout 集成
//!
//! 只创建尾款支付的 Checkout Session；支付结果的扣款与对账
//! 完全由 Stripe 负责，这里不做 webhook 消费。

use serde::Deserialize;

use crate::utils::AppError;

const STRIPE_API: &str = "https://api.stripe.com/v1";

#[derive(Clone)]
pub struct StripeService {
    secret_key: Option<String>,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct CheckoutSession {
    url: String,
}

impl StripeService {
    pub fn new(secret_key: Option<String>) -> Self {
        Self {
            secret_key,
            client: reqwest::Client::new(),
        }
    }

    /// 创建一个一次性 Checkout Session，返回托管支付页 URL
    ///
    /// 未配置 secret key 时返回 None（调用方退回到线下收款文案）。
    pub async fn create_balance_checkout(
        &self,
        booking_id: i64,
        description: &str,
        amount_cents: i64,
        success_url: &str,
    ) -> Result<Option<String>, AppError> {
        let Some(secret_key) = &self.secret_key else {
            tracing::info!(booking_id, "Stripe disabled, no checkout link");
            return Ok(None);
        };

        let params = [
            ("mode", "payment".to_string()),
            ("success_url", success_url.to_string()),
            ("client_reference_id", booking_id.to_string()),
            ("line_items[0][quantity]", "1".to_string()),
            (
                "line_items[0][price_data][currency]",
                "usd".to_string(),
            ),
            (
                "line_items[0][price_data][unit_amount]",
                amount_cents.to_string(),
            ),
            (
                "line_items[0][price_data][product_data][name]",
                description.to_string(),
            ),
        ];

        let resp = self
            .client
            .post(format!("{STRIPE_API}/checkout/sessions"))
            .basic_auth(secret_key, None::<&str>)
            .form(&params)
            .send()
            .await
            .map_err(|e| AppError::internal(format!("Stripe connection failed: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            return Err(AppError::internal(format!(
                "Stripe checkout failed: {status} - {text}"
            )));
        }

        let session: CheckoutSession = resp
            .json()
            .await
            .map_err(|e| AppError::internal(format!("Stripe response parse failed: {e}")))?;

        Ok(Some(session.url))
    }
}
