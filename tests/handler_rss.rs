//! RSS feed end-to-end scenario (spec §4.4.4).

use std::io::Write;
use tempfile::NamedTempFile;
use xml_insight::facade::analyze;

#[test]
fn rss_feed_counts_articles() {
    let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Example Feed</title>
    <description>An example feed</description>
    <link>https://example.com</link>
    <item>
      <title>First post</title>
      <description>First body</description>
      <pubDate>Mon, 01 Jan 2024 00:00:00 GMT</pubDate>
    </item>
    <item>
      <title>Second post</title>
      <description>Second body</description>
      <pubDate>Tue, 02 Jan 2024 00:00:00 GMT</pubDate>
    </item>
  </channel>
</rss>"#;

    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(xml.as_bytes()).expect("write fixture");

    let analysis = analyze(file.path()).expect("analyze should succeed");

    assert_eq!(analysis.doc_type.type_name, "RSS Feed");
    assert_eq!(*analysis.data_inventory.get("articles").unwrap(), 2);
}
