//! Simple CLI that reads HTML from stdin and outputs JSON to stdout.
//!
//! Usage: `detect_stdin <document-url> < page.html`
//!
//! Set `RUST_LOG=debug` to see why candidate patterns were rejected.

use rs_pagination::{detect_bytes, PageParamInfo, PaginationInfo};
use serde::Serialize;
use std::io::{self, Read};

#[derive(Serialize)]
struct Output {
    #[serde(flatten)]
    info: PageParamInfo,
    prev_page: String,
    next_page: String,
}

fn main() {
    env_logger::init();

    let Some(url) = std::env::args().nth(1) else {
        eprintln!("Usage: detect_stdin <document-url> < page.html");
        std::process::exit(1);
    };

    // Read HTML from stdin
    let mut html = Vec::new();
    if io::stdin().read_to_end(&mut html).is_err() {
        eprintln!("Failed to read from stdin");
        std::process::exit(1);
    }

    let info = detect_bytes(&html, &url);
    let doc_url = rs_pagination::url_utils::parse_page_url(&url)
        .map(|u| rs_pagination::url_utils::page_url_string(&u))
        .unwrap_or_default();
    let links = PaginationInfo::from_param_info(&info, &doc_url);

    let output = Output {
        info,
        prev_page: links.prev_page,
        next_page: links.next_page,
    };

    println!("{}", serde_json::to_string(&output).unwrap_or_default());
}
