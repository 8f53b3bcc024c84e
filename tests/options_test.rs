use rs_pagination::{detect, detect_with_options, Options, DEFAULT_BAD_PARAM_NAMES};

const URL: &str = "http://example.com/list";

#[test]
fn options_default_values_are_sensible() {
    let options = Options::default();
    assert_eq!(options.max_page_number, 100);
    assert_eq!(options.min_links_for_linear_map, 2);
    assert_eq!(options.max_paging_docs, 100);
    assert_eq!(options.bad_param_names.len(), DEFAULT_BAD_PARAM_NAMES.len());
    assert!(options.is_bad_param_name("search"));
    assert!(!options.is_bad_param_name("page"));
}

#[test]
fn options_struct_update_syntax_overrides_selected_fields_only() {
    let options = Options {
        max_paging_docs: 10,
        ..Options::default()
    };

    assert_eq!(options.max_paging_docs, 10);
    assert_eq!(options.max_page_number, 100);
    assert!(options.is_bad_param_name("tag"));
}

#[test]
fn detect_and_detect_with_default_options_match() {
    let html = r#"<html><body><p>1 <a href="/list?page=2">2</a> <a href="/list?page=3">3</a></p></body></html>"#;
    assert_eq!(detect(html, URL), detect_with_options(html, URL, &Options::default()));
}

#[test]
fn max_page_number_limits_candidates() {
    let html = r#"<html><body><p>
        <a href="/list?page=119">119</a> 120 <a href="/list?page=121">121</a> <a href="/list?page=122">122</a>
    </p></body></html>"#;
    assert!(!detect(html, URL).is_detected());

    let options = Options {
        max_page_number: 200,
        ..Options::default()
    };
    let info = detect_with_options(html, "http://example.com/list?page=120", &options);
    assert_eq!(info.pages.len(), 3);
    assert_eq!(info.next_paging_url, "http://example.com/list?page=121");
}

#[test]
fn custom_bad_param_names_reject_parameters() {
    let html = r#"<html><body><p>1 <a href="/list?pg=2">2</a> <a href="/list?pg=3">3</a></p></body></html>"#;
    assert!(detect(html, URL).is_detected());

    let mut options = Options::default();
    options.bad_param_names.insert("pg".to_string());
    assert!(!detect_with_options(html, URL, &options).is_detected());
}

#[test]
fn max_paging_docs_rejects_long_pagers() {
    let mut html = String::from("<html><body><p>1");
    for page in 2..=12 {
        html.push_str(&format!(r#" <a href="/list?page={page}">{page}</a>"#));
    }
    html.push_str("</p></body></html>");
    assert!(detect(&html, URL).is_detected());

    let options = Options {
        max_paging_docs: 5,
        ..Options::default()
    };
    assert!(!detect_with_options(&html, URL, &options).is_detected());
}

#[test]
fn options_implements_debug_and_clone() {
    let options = Options::default();
    let cloned = options.clone();
    assert_eq!(cloned.max_page_number, options.max_page_number);
    assert!(format!("{options:?}").contains("max_paging_docs"));
}
