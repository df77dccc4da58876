//! Link extraction from downloaded HTML pages.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Quoted attribute values may contain '>' and are consumed whole.
    static ref ANCHOR_TAG: Regex = Regex::new(r#"(?is)<a\b((?:[^>"']|"[^"]*"|'[^']*')*)>"#)
        .unwrap_or_else(|e| panic!("{e}"));
    static ref ATTRIBUTE: Regex = Regex::new(
        r#"([^\s"'>/=]+)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+)))?"#
    )
    .unwrap_or_else(|e| panic!("{e}"));
}

fn decode_entities(value: &str) -> String {
    value
        .replace("&amp;", "&")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
}

/// Value of the first `href` attribute among `attributes`.
fn href_attribute(attributes: &str) -> Option<String> {
    ATTRIBUTE
        .captures_iter(attributes)
        .find(|caps| caps.get(1).is_some_and(|name| name.as_str().eq_ignore_ascii_case("href")))
        .and_then(|caps| caps.get(2).or_else(|| caps.get(3)).or_else(|| caps.get(4)))
        .map(|value| decode_entities(value.as_str().trim()))
}

/// Every `href` of every `<a>` tag, in document order.
///
/// Anchors without an href are skipped.
pub fn anchor_hrefs(html: &str) -> Vec<String> {
    ANCHOR_TAG
        .captures_iter(html)
        .filter_map(|caps| caps.get(1))
        .filter_map(|attributes| href_attribute(attributes.as_str()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quoted_and_bare_hrefs() {
        let html = r#"<html><body>
            <a href="https://example.com/a.deb">deb</a>
            <a class='btn' href='https://example.com/b.rpm'>rpm</a>
            <A HREF=https://example.com/c.tar.gz>tgz</A>
        </body></html>"#;
        assert_eq!(
            anchor_hrefs(html),
            vec![
                "https://example.com/a.deb",
                "https://example.com/b.rpm",
                "https://example.com/c.tar.gz",
            ]
        );
    }

    #[test]
    fn test_anchor_without_href_is_skipped() {
        let html = r#"<a name="top">top</a><a href="/x">x</a>"#;
        assert_eq!(anchor_hrefs(html), vec!["/x"]);
    }

    #[test]
    fn test_other_tags_and_data_attributes_are_ignored() {
        let html = r#"<link href="/style.css"><abbr title="x">x</abbr>
            <a data-href="/nope" href="/yes">y</a>"#;
        assert_eq!(anchor_hrefs(html), vec!["/yes"]);
    }

    #[test]
    fn test_multiline_tag_and_entities() {
        let html = "<a\n  class=\"dl\"\n  href=\"/get?arch=amd64&amp;pkg=deb\">get</a>";
        assert_eq!(anchor_hrefs(html), vec!["/get?arch=amd64&pkg=deb"]);
    }

    #[test]
    fn test_href_text_inside_other_attribute_values() {
        let html = concat!(
            r#"<a title="mirror href=/wrong.deb" href="/right.deb">x</a>"#,
            r#"<a data-x="a>b" href="/after.deb">y</a>"#,
            r#"<a onclick='go("href=/js.deb")' href=/bare.deb>z</a>"#,
        );
        assert_eq!(
            anchor_hrefs(html),
            vec!["/right.deb", "/after.deb", "/bare.deb"]
        );
    }

    #[test]
    fn test_valueless_attribute_before_href() {
        let html = r#"<a download href="/pkg.rpm">rpm</a>"#;
        assert_eq!(anchor_hrefs(html), vec!["/pkg.rpm"]);
    }
}
