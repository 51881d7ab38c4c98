//! 事务邮件服务
//!
//! Resend 风格的 HTTP API：POST {base}/emails，Bearer 鉴权。
//! HTML 模板内联构造，不引模板引擎。

use serde_json::json;

use crate::bookings::payment::format_usd;
use crate::utils::AppError;
use shared::models::{Booking, Profile};

#[derive(Clone)]
pub struct EmailService {
    api_base: String,
    api_key: Option<String>,
    from_address: String,
    client: reqwest::Client,
}

impl EmailService {
    pub fn new(api_base: String, api_key: Option<String>, from_address: String) -> Self {
        Self {
            api_base,
            api_key,
            from_address,
            client: reqwest::Client::new(),
        }
    }

    /// 发送一封 HTML 邮件；未配置 API key 时记日志并成功返回
    pub async fn send(&self, to: &str, subject: &str, html: &str) -> Result<(), AppError> {
        let Some(api_key) = &self.api_key else {
            tracing::info!(to, subject, "Email service disabled, skipping send");
            return Ok(());
        };

        let resp = self
            .client
            .post(format!("{}/emails", self.api_base))
            .bearer_auth(api_key)
            .json(&json!({
                "from": self.from_address,
                "to": [to],
                "subject": subject,
                "html": html,
            }))
            .send()
            .await
            .map_err(|e| AppError::internal(format!("Email API connection failed: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            return Err(AppError::internal(format!(
                "Email send failed: {status} - {text}"
            )));
        }

        tracing::info!(to, subject, "Email sent");
        Ok(())
    }

    /// 预订确认（付款核实后）
    pub async fn send_booking_confirmed(
        &self,
        booking: &Booking,
        profile: &Profile,
        start_local: &str,
    ) -> Result<(), AppError> {
        let subject = format!("{} — your trip is confirmed", profile.business_name);
        let balance_line = if booking.balance_due_cents > 0 {
            format!(
                "<p>Balance due on the day of the trip: <strong>{}</strong></p>",
                format_usd(booking.balance_due_cents)
            )
        } else {
            "<p>Your trip is paid in full.</p>".to_string()
        };
        let html = format!(
            "<h2>You're booked!</h2>\
             <p>Hi {name},</p>\
             <p>{business} has confirmed your payment. Your trip is set for <strong>{start}</strong> with a party of {party}.</p>\
             {balance}\
             {policy}",
            name = booking.guest_name,
            business = profile.business_name,
            start = start_local,
            party = booking.party_size,
            balance = balance_line,
            policy = profile
                .cancellation_policy
                .as_deref()
                .map(|p| format!("<p><em>Cancellation policy: {p}</em></p>"))
                .unwrap_or_default(),
        );
        self.send(&booking.guest_email, &subject, &html).await
    }

    /// 付款提醒（上限 2 次，由调用方把关）
    pub async fn send_payment_reminder(
        &self,
        booking: &Booking,
        profile: &Profile,
        deposit_cents: i64,
    ) -> Result<(), AppError> {
        let subject = format!("{} — deposit reminder", profile.business_name);
        let mut methods = Vec::new();
        if let Some(venmo) = &profile.venmo_handle {
            methods.push(format!("Venmo: {venmo}"));
        }
        if let Some(zelle) = &profile.zelle_address {
            methods.push(format!("Zelle: {zelle}"));
        }
        let html = format!(
            "<p>Hi {name},</p>\
             <p>This is a reminder that your booking with {business} still needs a deposit of <strong>{deposit}</strong> to be confirmed.</p>\
             <p>{methods}</p>",
            name = booking.guest_name,
            business = profile.business_name,
            deposit = format_usd(deposit_cents),
            methods = methods.join(" &middot; "),
        );
        self.send(&booking.guest_email, &subject, &html).await
    }

    /// 尾款请求，可附 Stripe Checkout 链接
    pub async fn send_balance_request(
        &self,
        booking: &Booking,
        profile: &Profile,
        checkout_url: Option<&str>,
    ) -> Result<(), AppError> {
        let subject = format!("{} — balance due", profile.business_name);
        let pay_line = match checkout_url {
            Some(url) => format!("<p><a href=\"{url}\">Pay your balance online</a></p>"),
            None => "<p>Please settle the balance before or on the day of the trip.</p>".into(),
        };
        let html = format!(
            "<p>Hi {name},</p>\
             <p>Your remaining balance with {business} is <strong>{balance}</strong>.</p>\
             {pay}",
            name = booking.guest_name,
            business = profile.business_name,
            balance = format_usd(booking.balance_due_cents),
            pay = pay_line,
        );
        self.send(&booking.guest_email, &subject, &html).await
    }

    /// 船长自由文本消息
    pub async fn send_captain_message(
        &self,
        booking: &Booking,
        profile: &Profile,
        body: &str,
    ) -> Result<(), AppError> {
        let subject = format!("Message from {}", profile.business_name);
        let html = format!(
            "<p>Hi {name},</p><p>{body}</p>",
            name = booking.guest_name,
            body = body,
        );
        self.send(&booking.guest_email, &subject, &html).await
    }

    /// 改期通知（天气待定后的新时间）
    pub async fn send_reschedule_notice(
        &self,
        booking: &Booking,
        profile: &Profile,
        new_start_local: &str,
    ) -> Result<(), AppError> {
        let subject = format!("{} — your trip has been rescheduled", profile.business_name);
        let html = format!(
            "<p>Hi {name},</p>\
             <p>{business} has moved your trip to <strong>{start}</strong>.</p>\
             <p>Reply to this email if the new time does not work for you.</p>",
            name = booking.guest_name,
            business = profile.business_name,
            start = new_start_local,
        );
        self.send(&booking.guest_email, &subject, &html).await
    }
}
