/// 基本使用示例
///
/// 本示例展示如何向企业微信群发送各类消息：
/// - 文本消息 (@ 成员)
/// - Markdown 消息
/// - 图文消息
///
/// 运行前需要设置环境变量 WXWORK_BOT_KEY，或在 .env 文件中配置。

use wxwork_bot::{Markdown, NewsArticle, Text, WxWorkBot, WxWorkError};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    env_logger::init();

    println!("=== 企业微信群机器人示例 ===");

    let bot = WxWorkBot::from_env()?;

    println!("\n1. 发送文本消息...");
    let text = Text::new("广州今日天气：29度，大部分多云，降雨概率：60%")
        .mention("wangqing")
        .mention_mobile("13800001111");
    report(bot.send(text).await);

    println!("\n2. 发送 Markdown 消息...");
    let markdown = Markdown::new(
        "实时新增用户反馈<font color=\"warning\">132例</font>，请相关同事注意。\n\
         > 类型:<font color=\"comment\">用户反馈</font>",
    );
    report(bot.send(markdown).await);

    println!("\n3. 发送图文消息...");
    let article = NewsArticle::new(
        "中秋节礼品领取",
        "今年中秋节公司有豪礼相送",
        "https://work.weixin.qq.com/",
        "http://res.mail.qq.com/node/ww/wwopenmng/images/independent/doc/test_pic_msg1.png",
    );
    report(bot.send_news(vec![article]).await);

    println!("\n=== 示例完成 ===");
    Ok(())
}

fn report(result: Result<(), WxWorkError>) {
    match result {
        Ok(()) => println!("发送成功"),
        Err(WxWorkError::Api { code, message }) => println!("服务端拒绝 ({}): {}", code, message),
        Err(e) => println!("发送失败: {}", e),
    }
}
