use maud::{html, Markup, DOCTYPE};
use shrtn_core::Mapping;

/// Renders the index page: the submission form followed by `mappings`.
///
/// Every interpolated value is HTML-escaped by maud.
pub fn index(mappings: &[Mapping]) -> Markup {
    html! {
        (DOCTYPE)
        html {
            head {
                title { "Shrtn" }
            }
            body {
                form action="/new" method="POST" {
                    div { input type="text" name="longurl" size="64"; }
                    div { input type="submit" value="Shorten URL"; }
                }
                ul {
                    @for mapping in mappings {
                        li {
                            a href={ "/s/" (mapping.short_code.as_str()) } { (mapping.short_code.as_str()) }
                            " redirects to " (mapping.long_url)
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shrtn_core::ShortCode;

    fn mapping(url: &str, code: &str) -> Mapping {
        Mapping::new(url, ShortCode::new_unchecked(code))
    }

    #[test]
    fn renders_form() {
        let page = index(&[]).into_string();

        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains(r#"<form action="/new" method="POST">"#));
        assert!(page.contains(r#"name="longurl""#));
        assert!(page.contains("<ul></ul>"));
    }

    #[test]
    fn renders_each_mapping_as_link() {
        let page = index(&[
            mapping("https://example.com/one", "abcdef"),
            mapping("https://example.com/two", "ghijkl"),
        ])
        .into_string();

        assert!(page.contains(
            r#"<li><a href="/s/abcdef">abcdef</a> redirects to https://example.com/one</li>"#
        ));
        assert!(page.contains(
            r#"<li><a href="/s/ghijkl">ghijkl</a> redirects to https://example.com/two</li>"#
        ));
        assert!(page.find("abcdef") < page.find("ghijkl"));
    }

    #[test]
    fn escapes_markup_in_stored_values() {
        let page = index(&[mapping(
            "http://x/<script>alert(1)</script>",
            "<b>\"code\"</b>",
        )])
        .into_string();

        assert!(!page.contains("<script>"));
        assert!(!page.contains("<b>"));
        assert!(page.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(page.contains(r#"href="/s/&lt;b&gt;&quot;code&quot;&lt;/b&gt;""#));
    }
}
