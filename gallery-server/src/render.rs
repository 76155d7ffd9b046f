use maud::html;

/// Renders an ordered list of image URLs into markup
///
/// The contract is one element per URL, in the given order, with no
/// deduplication.
pub trait GalleryRenderer: Send + Sync {
    /// Produces the gallery markup for the given URLs
    fn render(&self, image_urls: &[String]) -> String;
}

/// Maud-backed renderer producing an image-list fragment
///
/// Interpolated URLs are auto-escaped, so presigned query strings cannot
/// break out of the attribute.
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlGalleryRenderer;

impl GalleryRenderer for HtmlGalleryRenderer {
    fn render(&self, image_urls: &[String]) -> String {
        html! {
            ul class="image-gallery" {
                @for url in image_urls {
                    li {
                        img src=(url) alt="";
                    }
                }
            }
        }
        .into_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renders_one_entry_per_url() {
        let urls = vec![
            "https://example.test/a.jpg".to_string(),
            "https://example.test/b.jpg".to_string(),
        ];

        let markup = HtmlGalleryRenderer.render(&urls);

        assert_eq!(markup.matches("<img").count(), 2);
        let first = markup.find("a.jpg").unwrap();
        let second = markup.find("b.jpg").unwrap();
        assert!(first < second, "URL order must be preserved");
    }

    #[test]
    fn test_renders_empty_list() {
        let markup = HtmlGalleryRenderer.render(&[]);
        assert!(!markup.contains("<img"));
    }

    #[test]
    fn test_escapes_query_strings() {
        let urls = vec!["https://example.test/a.jpg?x=1&y=2".to_string()];

        let markup = HtmlGalleryRenderer.render(&urls);

        assert!(markup.contains("x=1&amp;y=2"));
    }
}
