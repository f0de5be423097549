//! Browser tests: load rendered pages in headless Chrome and check the DOM.
//!
//! Run with: `cargo test --test browser_view -- --ignored`

use headless_chrome::{Browser, LaunchOptions, Tab};
use std::path::PathBuf;
use std::process::Command;
use std::sync::{Arc, OnceLock};

const SHARE_QUERY: &str = "n=Ada%20Lovelace&s=%5B%7B%22id%22%3A0%2C%22title%22%3A%22About_me%22%2C%22type%22%3A%22text%22%2C%22content%22%3A%22line_one%5Cnline_two%22%7D%2C%7B%22id%22%3A1%2C%22title%22%3A%22Find_me%22%2C%22type%22%3A%22links%22%2C%22content%22%3A%5B%7B%22id%22%3A0%2C%22text%22%3A%22Notes%22%2C%22href%22%3A%22https%3A%2F%2Fnotes.example%22%7D%5D%7D%5D";

fn generated_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("target/browser-view")
}

/// Render the viewer and the creation form once per test run.
fn ensure_pages_rendered() {
    static BUILT: OnceLock<()> = OnceLock::new();
    BUILT.get_or_init(|| {
        let dir = generated_dir();
        std::fs::create_dir_all(&dir).expect("failed to create output dir");
        for (url, file) in [(SHARE_QUERY, "bio.html"), ("", "create.html")] {
            let status = Command::new(env!("CARGO_BIN_EXE_linkpage"))
                .args(["render", url, "-o"])
                .arg(dir.join(file))
                .status()
                .expect("failed to run linkpage");
            assert!(status.success(), "rendering {file} failed");
        }
    });
}

fn browser() -> &'static Browser {
    static B: OnceLock<Browser> = OnceLock::new();
    B.get_or_init(|| {
        Browser::new(LaunchOptions {
            window_size: Some((390, 844)),
            ..Default::default()
        })
        .expect("failed to launch Chrome")
    })
}

fn load(file: &str) -> Arc<Tab> {
    ensure_pages_rendered();
    let tab = browser().new_tab().unwrap();
    let url = format!("file://{}", generated_dir().join(file).display());
    tab.navigate_to(&url).unwrap();
    tab.wait_until_navigated().unwrap();
    tab
}

fn eval_string(tab: &Tab, js: &str) -> String {
    tab.evaluate(js, false)
        .unwrap()
        .value
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_default()
}

#[test]
#[ignore]
fn viewer_shows_decoded_page() {
    let tab = load("bio.html");
    assert_eq!(eval_string(&tab, "document.querySelector('h1').textContent"), "Ada Lovelace");
    assert_eq!(
        eval_string(&tab, "[...document.querySelectorAll('h2')].map(e => e.textContent).join('|')"),
        "About me|Find me"
    );
    assert_eq!(
        eval_string(&tab, "document.querySelector('pre').textContent"),
        "line one\nline two"
    );
}

#[test]
#[ignore]
fn viewer_links_open_in_new_tab() {
    let tab = load("bio.html");
    assert_eq!(
        eval_string(&tab, "document.querySelector('.link-list a').getAttribute('target')"),
        "_blank"
    );
    assert_eq!(
        eval_string(&tab, "document.querySelector('.link-list a').href"),
        "https://notes.example/"
    );
}

#[test]
#[ignore]
fn viewer_without_photo_has_no_frame() {
    let tab = load("bio.html");
    assert_eq!(
        eval_string(&tab, "String(document.querySelectorAll('.photo').length)"),
        "0"
    );
}

#[test]
#[ignore]
fn creation_form_has_inputs() {
    let tab = load("create.html");
    assert_eq!(
        eval_string(&tab, "document.querySelector('input[name=i]').type"),
        "url"
    );
    assert_eq!(
        eval_string(&tab, "document.querySelector('a.share-link').getAttribute('href')"),
        "https://linkpage.example/"
    );
    assert_eq!(
        eval_string(&tab, "document.querySelector('#create-form').getAttribute('action')"),
        "https://linkpage.example/"
    );
    assert_eq!(
        eval_string(&tab, "document.querySelector('#create-form input[name=n]').form.method"),
        "get"
    );
}
