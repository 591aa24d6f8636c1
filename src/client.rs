use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, Url};
use serde_json::Value;
use std::env;
use std::fmt;
use std::time::Duration;

use crate::error::WxWorkError;
use crate::models::*;

/// 企业微信群机器人 webhook 地址
pub const DEFAULT_ENDPOINT: &str = "https://qyapi.weixin.qq.com/cgi-bin/webhook/send";

/// 读取 webhook key 的环境变量
pub const BOT_KEY_ENV: &str = "WXWORK_BOT_KEY";

/// 群机器人客户端，管理 HTTP 客户端和 webhook key
///
/// 内部的 `reqwest::Client` 可以安全地在多个任务之间共享，克隆开销很小。
#[derive(Clone)]
pub struct WxWorkBot {
    client: Client,
    key: String,
    endpoint: Url,
}

impl WxWorkBot {
    /// 使用指定的 key 和默认 HTTP 客户端创建机器人
    pub fn new(key: &str) -> Result<Self, WxWorkError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("wxwork-bot/", env!("CARGO_PKG_VERSION"))),
        );

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .default_headers(headers)
            .build()
            .map_err(|e| WxWorkError::Config(format!("failed to build HTTP client: {}", e)))?;

        Self::with_client(key, client)
    }

    /// 使用自定义的 HTTP 客户端 (超时、代理、证书等) 创建机器人
    pub fn with_client(key: &str, client: Client) -> Result<Self, WxWorkError> {
        Ok(WxWorkBot {
            client,
            key: key.to_string(),
            endpoint: parse_endpoint(DEFAULT_ENDPOINT)?,
        })
    }

    /// 从环境变量 `WXWORK_BOT_KEY` 初始化
    pub fn from_env() -> Result<Self, WxWorkError> {
        let key = env::var(BOT_KEY_ENV)
            .map_err(|_| WxWorkError::Config(format!("{} environment variable not set", BOT_KEY_ENV)))?;
        Self::new(&key)
    }

    /// 替换 webhook 地址，key 仍以查询参数附加
    pub fn with_endpoint(mut self, endpoint: &str) -> Result<Self, WxWorkError> {
        self.endpoint = parse_endpoint(endpoint)?;
        Ok(self)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// 完整的 webhook 地址 (包含 key)
    pub fn webhook_url(&self) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().append_pair("key", &self.key);
        url
    }

    /// 发送消息
    ///
    /// 接受裸消息 ([`Text`]、[`Markdown`]、[`Image`]、[`News`]) 或 [`Message`]。
    /// 只发送一次，不做重试。
    pub async fn send(&self, message: impl Into<Message>) -> Result<(), WxWorkError> {
        let message = message.into();
        let body = encode(&message)?;
        self.post(message.msgtype(), body).await
    }

    /// 发送 JSON 形式的消息，格式必须是 `{"msgtype": <kind>, <kind>: <payload>}`
    pub async fn send_value(&self, value: &Value) -> Result<(), WxWorkError> {
        let message = Message::try_from(value.clone())?;
        let body = encode(&message)?;
        self.post(message.msgtype(), body).await
    }

    /// 发起请求并解析响应中的错误码
    async fn post(&self, msgtype: &str, body: Vec<u8>) -> Result<(), WxWorkError> {
        log::debug!("发送 {} 消息到 {}", msgtype, self.endpoint);

        let resp = self
            .client
            .post(self.webhook_url())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        let status = resp.status();
        let response_text = resp.text().await?;
        log::trace!("webhook 响应 ({}): {}", status, response_text);

        let webhook_resp: WebhookResponse = match serde_json::from_str(&response_text) {
            Ok(r) => r,
            Err(_) if !status.is_success() => {
                return Err(WxWorkError::Protocol(format!("HTTP {}: {}", status, response_text)));
            }
            Err(e) => {
                return Err(WxWorkError::Protocol(format!(
                    "Failed to parse response: {} - Response: {}",
                    e, response_text
                )));
            }
        };

        if webhook_resp.errcode != 0 {
            return Err(WxWorkError::Api {
                code: webhook_resp.errcode,
                message: webhook_resp.errmsg,
            });
        }

        if !status.is_success() {
            return Err(WxWorkError::Protocol(format!("HTTP {}: {}", status, response_text)));
        }

        Ok(())
    }
}

impl fmt::Debug for WxWorkBot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WxWorkBot")
            .field("key", &"<redacted>")
            .field("endpoint", &self.endpoint.as_str())
            .finish()
    }
}

fn parse_endpoint(endpoint: &str) -> Result<Url, WxWorkError> {
    Url::parse(endpoint).map_err(|e| WxWorkError::Config(format!("invalid endpoint {}: {}", endpoint, e)))
}
