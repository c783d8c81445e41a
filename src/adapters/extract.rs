//! 网页文本提取：纯函数，永不失败
//!
//! 只取 h1/h2/h3/p/li 的文本，折叠空白后按词边界截断到上限并追加 " ..."；
//! 页面没有这些元素时回退到 html2text 全文转换（纯文本装饰：不输出标题 `#`、链接脚注与列表符号）。
//! 另提供 About 链接定位与 URL 规范化。

use html2text::render::TrivialDecorator;
use scraper::{Html, Selector};
use url::Url;

/// 截断标记
pub const ELLIPSIS: &str = " ...";

const CONTENT_SELECTOR: &str = "h1, h2, h3, p, li";
const LINK_SELECTOR: &str = "a[href]";

/// 折叠空白；超出 width 时按词截断，使结果（含 placeholder）不超过 width 个字符
pub fn shorten(text: &str, width: usize, placeholder: &str) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= width {
        return collapsed;
    }

    let budget = width.saturating_sub(placeholder.chars().count());
    let mut out = String::new();
    let mut used = 0usize;
    for word in collapsed.split(' ') {
        let len = word.chars().count();
        let extra = if out.is_empty() { len } else { len + 1 };
        if used + extra > budget {
            // 首个词就放不下时硬切，避免只剩下省略号
            if out.is_empty() {
                out = word.chars().take(budget).collect();
            }
            break;
        }
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
        used += extra;
    }

    if out.is_empty() {
        return placeholder.trim_start().to_string();
    }
    out.push_str(placeholder);
    out
}

/// 从 HTML 提取可读文本并截断到 max_chars
pub fn extract_text(html: &str, max_chars: usize) -> String {
    if html.trim().is_empty() {
        return String::new();
    }

    let doc = Html::parse_document(html);
    let mut text = match Selector::parse(CONTENT_SELECTOR) {
        Ok(sel) => doc
            .select(&sel)
            .map(|el| {
                el.text()
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" "),
        Err(_) => String::new(),
    };

    if text.trim().is_empty() {
        text = match html2text::config::with_decorator(TrivialDecorator::new())
            .string_from_read(html.as_bytes(), 120)
        {
            Ok(t) => t,
            Err(e) => {
                tracing::debug!(error = %e, "html2text fallback failed");
                String::new()
            }
        };
    }

    shorten(&text, max_chars, ELLIPSIS)
}

/// 按文档顺序查找第一个 href 含 "about"（不区分大小写）的链接，并相对 base 解析为绝对 URL
pub fn find_about_link(html: &str, base: &str) -> Option<String> {
    let base = Url::parse(base).ok()?;
    let sel = Selector::parse(LINK_SELECTOR).ok()?;
    let doc = Html::parse_document(html);
    doc.select(&sel)
        .filter_map(|el| el.value().attr("href"))
        .filter(|href| href.to_lowercase().contains("about"))
        .find_map(|href| base.join(href.trim()).ok())
        .map(String::from)
}

/// 没有 scheme 时补 https://
pub fn normalize_url(url: &str) -> String {
    let url = url.trim();
    if url.contains("://") {
        url.to_string()
    } else {
        format!("https://{}", url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<!doctype html>
<html><head><title>Acme</title><script>var x = 1;</script></head>
<body>
  <nav><a href="/products">Products</a><a href="/company/About-Us">About us</a></nav>
  <h1>Acme   Robotics</h1>
  <p>We build
     warehouse robots.</p>
  <div>ignored block</div>
  <ul><li>Founded 2012</li><li></li></ul>
</body></html>"#;

    #[test]
    fn test_extract_text_keeps_content_elements_only() {
        let text = extract_text(PAGE, 6000);
        assert_eq!(text, "Acme Robotics We build warehouse robots. Founded 2012");
    }

    #[test]
    fn test_extract_text_empty_input() {
        assert_eq!(extract_text("", 100), "");
        assert_eq!(extract_text("   \n", 100), "");
    }

    #[test]
    fn test_extract_text_falls_back_without_content_elements() {
        let text = extract_text("<html><body><div>Just a div</div></body></html>", 100);
        assert!(text.contains("Just a div"));
    }

    #[test]
    fn test_fallback_text_has_no_markup_artifacts() {
        let html = r#"<div><h4>Our Story</h4><div><a href="https://x.example/team">Meet the team</a> today</div></div>"#;
        let text = extract_text(html, 500);
        assert!(text.contains("Our Story"));
        assert!(text.contains("Meet the team"));
        assert!(!text.contains('#'));
        assert!(!text.contains("x.example"));
        assert!(!text.contains("[1]"));
    }

    #[test]
    fn test_extract_text_is_capped() {
        let body = "<p>".to_string() + &"word ".repeat(5000) + "</p>";
        let text = extract_text(&body, 100);
        assert!(text.chars().count() <= 100);
        assert!(text.ends_with(ELLIPSIS));
    }

    #[test]
    fn test_shorten_fits_unchanged() {
        assert_eq!(shorten("  a   b  ", 10, ELLIPSIS), "a b");
    }

    #[test]
    fn test_shorten_breaks_on_word_boundary() {
        assert_eq!(shorten("Hello there big world", 15, ELLIPSIS), "Hello there ...");
    }

    #[test]
    fn test_shorten_long_first_word_is_cut() {
        assert_eq!(shorten("abcdefghijkl", 8, ELLIPSIS), "abcd ...");
    }

    #[test]
    fn test_find_about_link_resolves_relative() {
        let link = find_about_link(PAGE, "https://acme.com/home").unwrap();
        assert_eq!(link, "https://acme.com/company/About-Us");
    }

    #[test]
    fn test_find_about_link_absent() {
        assert!(find_about_link("<a href=\"/contact\">Contact</a>", "https://acme.com").is_none());
        assert!(find_about_link(PAGE, "not a url").is_none());
    }

    #[test]
    fn test_normalize_url() {
        assert_eq!(normalize_url("acme.com"), "https://acme.com");
        assert_eq!(normalize_url("http://acme.com"), "http://acme.com");
        assert_eq!(normalize_url(" https://acme.com/x "), "https://acme.com/x");
    }
}
