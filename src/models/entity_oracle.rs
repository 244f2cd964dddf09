use crate::models::Language;
use crate::Error;
use async_trait::async_trait;

/// External service that turns a free-text query into a delimited list of company
/// mentions (see `EntityParser` for the expected format).
#[async_trait]
pub trait EntityOracle: Send + Sync {
    /// Oracle name, used as its selector and in log output.
    fn name(&self) -> &str;

    async fn extract(&self, query: &str, language: Language) -> Result<String, Error>;
}

/// An oracle that always answers with the same text, regardless of the query.
#[derive(Debug, Clone)]
pub struct StaticOracle {
    name: String,
    response: String,
}

impl StaticOracle {
    pub fn new(response: &str) -> Self {
        Self::named("static", response)
    }

    pub fn named(name: &str, response: &str) -> Self {
        Self {
            name: name.to_string(),
            response: response.to_string(),
        }
    }
}

#[async_trait]
impl EntityOracle for StaticOracle {
    fn name(&self) -> &str {
        &self.name
    }

    async fn extract(&self, _query: &str, _language: Language) -> Result<String, Error> {
        Ok(self.response.clone())
    }
}

const ENGLISH_EXTRACTION_INSTRUCTIONS: &str = r#"List every publicly traded company mentioned in the user's message.

Rules:
1. Write each company once, separated by commas.
2. If a ticker symbol is given, write only the ticker (e.g. AAPL).
3. If the message names an exchange, add it in square brackets (e.g. Tencent [HKEX]).
4. If the message asks about two exchanges, list both inside one bracket separated by a slash (e.g. Alibaba [HKEX/NYSE]).
5. Use a semicolon to separate mentions of the same company on different exchanges.
6. Reply with the list only. Reply with nothing if no company is mentioned."#;

const CHINESE_EXTRACTION_INSTRUCTIONS: &str = r#"列出用户消息中提到的所有上市公司。

规则：
1. 每家公司只写一次，用英文逗号分隔。
2. 如果给出了股票代码，只写代码（例如 AAPL 或 00700）。
3. 如果提到了交易所，用英文方括号标注（例如 Tencent [HKEX]）。
4. 如果涉及两个交易所，在同一个方括号内用斜杠分隔（例如 Alibaba [HKEX/NYSE]）。
5. 同一公司在不同交易所的提及用英文分号分隔。
6. 只输出列表；如果没有提到公司，则不输出任何内容。"#;

/// Renders the instruction text sent to a remote extraction oracle.
pub fn build_extraction_prompt(query: &str, language: Language) -> String {
    let (instructions, message_label) = match language {
        Language::En => (ENGLISH_EXTRACTION_INSTRUCTIONS, "Message"),
        Language::Zh => (CHINESE_EXTRACTION_INSTRUCTIONS, "消息"),
    };

    format!("{}\n\n{}: {}", instructions, message_label, query.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_contains_query_and_conventions() {
        let prompt = build_extraction_prompt("  compare Alibaba in HK and US ", Language::En);

        assert!(prompt.ends_with("Message: compare Alibaba in HK and US"));
        assert!(prompt.contains("Alibaba [HKEX/NYSE]"));
    }

    #[test]
    fn test_chinese_prompt_variant() {
        let prompt = build_extraction_prompt("腾讯和阿里巴巴", Language::Zh);

        assert!(prompt.starts_with("列出用户消息中提到的所有上市公司"));
        assert!(prompt.ends_with("消息: 腾讯和阿里巴巴"));
    }
}
