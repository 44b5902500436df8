#![no_main]

use libfuzzer_sys::fuzz_target;
use url::Url;

use acrescimos::extractor::{extract_article, extract_candidate_urls};

fuzz_target!(|data: &[u8]| {
    let html = String::from_utf8_lossy(data);
    let base = Url::parse("https://ge.globo.com/").unwrap();

    // Neither extractor may panic, whatever the markup
    let _ = extract_candidate_urls(&html, &base);
    let _ = extract_article(&html, "https://ge.globo.com/futebol/noticia/fuzz.ghtml");
});
