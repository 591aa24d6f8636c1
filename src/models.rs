use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::error::WxWorkError;

/// 文本消息
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Text {
    /// 文本内容
    pub content: String,
    /// 需要 @ 的成员 userid，`@all` 表示所有人
    #[serde(default)]
    pub mentioned_list: Vec<String>,
    /// 需要 @ 的成员手机号，`@all` 表示所有人
    #[serde(default)]
    pub mentioned_mobile_list: Vec<String>,
}

impl Text {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Default::default()
        }
    }

    /// 按 userid @ 成员
    pub fn mention(mut self, user_id: impl Into<String>) -> Self {
        self.mentioned_list.push(user_id.into());
        self
    }

    /// 按手机号 @ 成员
    pub fn mention_mobile(mut self, mobile: impl Into<String>) -> Self {
        self.mentioned_mobile_list.push(mobile.into());
        self
    }

    /// @ 所有人
    pub fn mention_all(self) -> Self {
        self.mention(MENTION_ALL)
    }
}

/// @ 所有人时使用的占位符
pub const MENTION_ALL: &str = "@all";

/// Markdown 消息，支持 `<font color="info|comment|warning">` 等少量 HTML 标签
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Markdown {
    pub content: String,
}

impl Markdown {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

/// 图片消息
///
/// `md5` 必须是原始图片数据 (base64 编码前) 的 md5，否则服务端会拒绝。
/// 本地不做校验，推荐使用 [`Image::from_bytes`] 构造。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Image {
    pub base64: String,
    pub md5: String,
}

impl Image {
    /// 由原始图片数据构造，自动计算 base64 和 md5
    pub fn from_bytes(data: &[u8]) -> Self {
        Self {
            base64: STANDARD.encode(data),
            md5: format!("{:x}", md5::compute(data)),
        }
    }
}

/// 图文消息中的单篇文章
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewsArticle {
    pub title: String,
    pub description: String,
    pub url: String,
    /// 图片链接，线上字段名为 `picurl`
    #[serde(rename = "picurl")]
    pub pic_url: String,
}

impl NewsArticle {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        url: impl Into<String>,
        pic_url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            url: url.into(),
            pic_url: pic_url.into(),
        }
    }
}

/// 图文消息，文章数量上限由服务端决定
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct News {
    pub articles: Vec<NewsArticle>,
}

impl News {
    pub fn new(articles: Vec<NewsArticle>) -> Self {
        Self { articles }
    }
}

/// 带 `msgtype` 标识的消息
///
/// 序列化为 `{"msgtype": <kind>, <kind>: <payload>}`。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    Text(Text),
    Markdown(Markdown),
    Image(Image),
    News(News),
}

impl Message {
    /// 消息类型标识
    pub fn msgtype(&self) -> &'static str {
        match self {
            Message::Text(_) => "text",
            Message::Markdown(_) => "markdown",
            Message::Image(_) => "image",
            Message::News(_) => "news",
        }
    }
}

impl Serialize for Message {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let kind = self.msgtype();
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("msgtype", kind)?;
        match self {
            Message::Text(text) => map.serialize_entry(kind, text)?,
            Message::Markdown(markdown) => map.serialize_entry(kind, markdown)?,
            Message::Image(image) => map.serialize_entry(kind, image)?,
            Message::News(news) => map.serialize_entry(kind, news)?,
        }
        map.end()
    }
}

impl From<Text> for Message {
    fn from(text: Text) -> Self {
        Message::Text(text)
    }
}

impl From<Markdown> for Message {
    fn from(markdown: Markdown) -> Self {
        Message::Markdown(markdown)
    }
}

impl From<Image> for Message {
    fn from(image: Image) -> Self {
        Message::Image(image)
    }
}

impl From<News> for Message {
    fn from(news: News) -> Self {
        Message::News(news)
    }
}

/// 从 JSON 解析消息，只接受 `{"msgtype": <kind>, <kind>: <payload>}` 形式
impl TryFrom<Value> for Message {
    type Error = WxWorkError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let Value::Object(mut obj) = value else {
            return Err(WxWorkError::UnsupportedMessage);
        };
        if obj.len() != 2 {
            return Err(WxWorkError::UnsupportedMessage);
        }
        let kind = match obj.remove("msgtype") {
            Some(Value::String(kind)) => kind,
            _ => return Err(WxWorkError::UnsupportedMessage),
        };
        let payload = obj
            .remove(kind.as_str())
            .ok_or(WxWorkError::UnsupportedMessage)?;

        let message = match kind.as_str() {
            "text" => serde_json::from_value(payload).map(Message::Text),
            "markdown" => serde_json::from_value(payload).map(Message::Markdown),
            "image" => serde_json::from_value(payload).map(Message::Image),
            "news" => serde_json::from_value(payload).map(Message::News),
            _ => return Err(WxWorkError::UnsupportedMessage),
        };
        message.map_err(|_| WxWorkError::UnsupportedMessage)
    }
}

/// 服务端响应，`errcode` 为 0 表示成功
#[derive(Debug, Serialize, Deserialize)]
pub struct WebhookResponse {
    pub errcode: i64,
    pub errmsg: String,
}

/// 将消息编码为请求体
///
/// 裸消息 (如 [`Text`]) 与包装后的 [`Message`] 输出完全一致。
pub fn marshal_message(message: impl Into<Message>) -> Result<Vec<u8>, WxWorkError> {
    encode(&message.into())
}

/// 将 JSON 形式的消息编码为请求体，无法识别时返回 `UnsupportedMessage`
pub fn marshal_value(value: &Value) -> Result<Vec<u8>, WxWorkError> {
    encode(&Message::try_from(value.clone())?)
}

pub(crate) fn encode(message: &Message) -> Result<Vec<u8>, WxWorkError> {
    serde_json::to_vec(message).map_err(WxWorkError::Encode)
}
