use thiserror::Error;

/// 企业微信机器人错误
#[derive(Debug, Error)]
pub enum WxWorkError {
    /// 不支持的消息类型，在发起任何网络请求之前返回
    #[error("Unsupported message")]
    UnsupportedMessage,
    /// 网络错误 (DNS、连接、TLS、超时、读取响应)
    #[error("Transport Error: {0}")]
    Transport(#[from] reqwest::Error),
    /// 响应内容不是预期的 `{"errcode", "errmsg"}` 结构
    #[error("Protocol Error: {0}")]
    Protocol(String),
    /// 服务端返回了非 0 的错误码
    #[error("WxWork API Error {code}: {message}")]
    Api { code: i64, message: String },
    /// 消息编码失败
    #[error("Encode Error: {0}")]
    Encode(#[source] serde_json::Error),
    /// 配置错误 (缺少 key、endpoint 无效等)
    #[error("Config Error: {0}")]
    Config(String),
}

impl WxWorkError {
    /// 服务端返回的错误码，仅 `Api` 错误有值
    pub fn code(&self) -> Option<i64> {
        match self {
            WxWorkError::Api { code, .. } => Some(*code),
            _ => None,
        }
    }
}
