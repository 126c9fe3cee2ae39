/// 规范化提交地址：去掉末尾所有 `/`，再追加一个 `/`
pub fn submission_url(endpoint: &str) -> String {
    format!("{}/", endpoint.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_without_trailing_slash() {
        assert_eq!(submission_url("https://x.test/api"), "https://x.test/api/");
    }

    #[test]
    fn test_with_trailing_slash() {
        assert_eq!(submission_url("https://x.test/api/"), "https://x.test/api/");
        assert_eq!(submission_url("https://x.test/api//"), "https://x.test/api/");
    }

    #[test]
    fn test_host_only() {
        assert_eq!(submission_url("http://localhost:9000"), "http://localhost:9000/");
    }
}
