use std::sync::Arc;
use tongs::token::{CookieString, CookieToken, get_cookie};
use tongs::{Page, StaticToken, TokenProvider};

#[test]
fn test_get_cookie_finds_named_value() {
    let cookies = "sessionid=abc; csrftoken=xyz; theme=dark";
    assert_eq!(get_cookie(cookies, "csrftoken"), Some("xyz".to_string()));
}

#[test]
fn test_get_cookie_requires_exact_name() {
    assert_eq!(get_cookie("xcsrftoken=1; csrftoken2=2", "csrftoken"), None);
}

#[test]
fn test_get_cookie_first_match_wins() {
    assert_eq!(
        get_cookie("csrftoken=first; csrftoken=second", "csrftoken"),
        Some("first".to_string())
    );
}

#[test]
fn test_get_cookie_decodes_percent_escapes() {
    assert_eq!(
        get_cookie("csrftoken=a%2Fb%3Dc", "csrftoken"),
        Some("a/b=c".to_string())
    );
}

#[test]
fn test_get_cookie_empty_jar() {
    assert_eq!(get_cookie("", "csrftoken"), None);
}

#[test]
fn test_cookie_token_reads_current_value() {
    let page = Arc::new(Page::new().with_cookie("csrftoken=one"));
    let token = CookieToken::new(page.clone(), "csrftoken");
    assert_eq!(token.token(), Some("one".to_string()));

    page.set_cookie("csrftoken=two");
    assert_eq!(token.token(), Some("two".to_string()));
}

#[test]
fn test_cookie_token_from_string() {
    let token = CookieToken::new(Arc::new(CookieString("a=1; csrftoken=t".into())), "csrftoken");
    assert_eq!(token.token(), Some("t".to_string()));
}

#[test]
fn test_static_token() {
    assert_eq!(StaticToken::new("fixed").token(), Some("fixed".to_string()));
    assert_eq!(StaticToken::none().token(), None);
}
