use crate::error::FetchError;
use crate::sources::Source;
use crate::sources::commoncrawl::{CommonCrawlSource, parse_records};
use crate::sources::http::build_client;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[cfg(test)]
mod commoncrawl_tests {
    use super::*;

    #[test]
    fn test_parse_array_of_records() {
        let body = r#"[
            {"url": "http://a.com/?x=1", "status": "200"},
            {"status": "404"},
            {"url": 17},
            {"url": "http://a.com/"}
        ]"#;
        let urls = parse_records(body).unwrap();
        assert_eq!(urls, vec!["http://a.com/?x=1", "http://a.com/"]);
    }

    #[test]
    fn test_parse_newline_delimited_records() {
        let body = "{\"url\": \"http://a.com/?x=1\"}\n{\"mime\": \"text/html\"}\n{\"url\": \"http://a.com/b\"}\n";
        let urls = parse_records(body).unwrap();
        assert_eq!(urls, vec!["http://a.com/?x=1", "http://a.com/b"]);
    }

    #[test]
    fn test_parse_single_line_record() {
        let urls = parse_records("{\"url\": \"http://a.com/?x=1\"}\n").unwrap();
        assert_eq!(urls, vec!["http://a.com/?x=1"]);

        let urls = parse_records("{\"url\": \"http://a.com/?x=1\"}\r\n").unwrap();
        assert_eq!(urls, vec!["http://a.com/?x=1"]);

        // One, two and three lines all parse the same way
        let line = "{\"url\": \"http://a.com/?x=1\"}\n";
        for n in 1..=3 {
            assert_eq!(parse_records(&line.repeat(n)).unwrap().len(), n);
        }
    }

    #[test]
    fn test_parse_rejects_unterminated_lone_object() {
        assert!(matches!(
            parse_records(r#"{"url": "http://a.com/"}"#),
            Err(FetchError::Decode(_))
        ));
    }

    #[test]
    fn test_parse_rejects_other_shapes() {
        assert!(matches!(parse_records(""), Err(FetchError::Decode(_))));
        assert!(matches!(parse_records("\n"), Err(FetchError::Decode(_))));
        assert!(matches!(parse_records("[1]\n"), Err(FetchError::Decode(_))));
        assert!(matches!(parse_records("\"x\"\n"), Err(FetchError::Decode(_))));
        assert!(matches!(
            parse_records(r#"[["http://a.com/"]]"#),
            Err(FetchError::Decode(_))
        ));
        assert!(matches!(
            parse_records(r#"{"url": "http://a.com/"} [1]"#),
            Err(FetchError::Decode(_))
        ));
        assert!(matches!(parse_records("{broken"), Err(FetchError::Decode(_))));
    }

    #[test]
    fn test_index_path() {
        let source = CommonCrawlSource::new(
            build_client(Duration::from_secs(1)).unwrap(),
            "http://index.commoncrawl.org/",
            "CC-MAIN-2023-04",
        )
        .unwrap();

        assert_eq!(
            source.query_url("example.com").as_str(),
            "http://index.commoncrawl.org/CC-MAIN-2023-04-index?url=example.com%2F*&output=json"
        );
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/CC-MAIN-2024-10-index"))
            .and(query_param("url", "example.com/*"))
            .and(query_param("output", "json"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"[{"url": "http://example.com/?q=1"}, {"url": "http://example.com/"}]"#,
            ))
            .mount(&server)
            .await;

        let source = CommonCrawlSource::new(
            build_client(Duration::from_secs(5)).unwrap(),
            &server.uri(),
            "CC-MAIN-2024-10",
        )
        .unwrap();

        let urls = source.fetch("example.com").await.unwrap();
        assert_eq!(urls, vec!["http://example.com/?q=1", "http://example.com/"]);
    }

    #[tokio::test]
    async fn test_fetch_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_string(r#"{"message": "No Captures found"}"#))
            .mount(&server)
            .await;

        let source = CommonCrawlSource::new(
            build_client(Duration::from_secs(5)).unwrap(),
            &server.uri(),
            "CC-MAIN-2023-04",
        )
        .unwrap();

        let err = source.fetch("example.com").await.unwrap_err();
        assert!(matches!(err, FetchError::HttpStatus { code: 404 }));
    }
}
