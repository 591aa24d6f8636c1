//! 常用消息的快捷发送方法
use crate::error::WxWorkError;
use crate::models::*;

impl crate::client::WxWorkBot {
    /// 发送纯文本消息
    pub async fn send_text(&self, content: &str) -> Result<(), WxWorkError> {
        self.send(Text::new(content)).await
    }

    /// 发送 Markdown 消息
    pub async fn send_markdown(&self, content: &str) -> Result<(), WxWorkError> {
        self.send(Markdown::new(content)).await
    }

    /// 发送图片，自动计算 base64 和 md5
    pub async fn send_image(&self, data: &[u8]) -> Result<(), WxWorkError> {
        self.send(Image::from_bytes(data)).await
    }

    /// 发送图文消息
    pub async fn send_news(&self, articles: Vec<NewsArticle>) -> Result<(), WxWorkError> {
        self.send(News::new(articles)).await
    }
}
