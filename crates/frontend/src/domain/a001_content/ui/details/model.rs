use contracts::domain::a001_content::aggregate::{ContentDto, ContentRecord, ContentStatus};

/// Состояние формы записи
#[derive(Debug, Clone, PartialEq)]
pub struct ContentForm {
    pub id: Option<String>,
    pub content_type: String,
    pub title: String,
    pub slug: String,
    /// Slug follows the title until edited by hand
    pub slug_touched: bool,
    pub body: String,
    pub excerpt: String,
    pub category_id: String,
    pub status: ContentStatus,
    pub seo_title: String,
    pub seo_description: String,
}

impl Default for ContentForm {
    fn default() -> Self {
        Self {
            id: None,
            content_type: "post".to_string(),
            title: String::new(),
            slug: String::new(),
            slug_touched: false,
            body: String::new(),
            excerpt: String::new(),
            category_id: String::new(),
            status: ContentStatus::Draft,
            seo_title: String::new(),
            seo_description: String::new(),
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

impl From<ContentRecord> for ContentForm {
    fn from(r: ContentRecord) -> Self {
        Self {
            id: Some(r.to_string_id()),
            content_type: r.content_type,
            title: r.title,
            slug: r.slug,
            slug_touched: true,
            body: r.body,
            excerpt: r.excerpt.unwrap_or_default(),
            category_id: r.category_id.unwrap_or_default(),
            status: r.status,
            seo_title: r.seo_title.unwrap_or_default(),
            seo_description: r.seo_description.unwrap_or_default(),
        }
    }
}

impl From<&ContentForm> for ContentDto {
    fn from(f: &ContentForm) -> Self {
        ContentDto {
            id: f.id.clone(),
            content_type: f.content_type.trim().to_string(),
            title: f.title.trim().to_string(),
            slug: f.slug.trim().to_string(),
            body: f.body.clone(),
            excerpt: non_empty(&f.excerpt),
            category_id: non_empty(&f.category_id),
            status: Some(f.status),
            seo_title: non_empty(&f.seo_title),
            seo_description: non_empty(&f.seo_description),
        }
    }
}

/// `"Hello, World!"` → `"hello-world"`. Non-ASCII letters are dropped.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    for ch in title.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_content::aggregate::is_valid_slug;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Hello, World!"), "hello-world");
        assert_eq!(slugify("  Rust 2024 -- edition "), "rust-2024-edition");
        assert_eq!(slugify("!!!"), "");
        assert!(is_valid_slug(&slugify("A  quick -- test.")));
    }

    #[test]
    fn test_form_to_dto_drops_blank_optionals() {
        let form = ContentForm {
            title: " Title ".into(),
            slug: "title".into(),
            excerpt: "  ".into(),
            seo_title: "SEO".into(),
            ..Default::default()
        };
        let dto = ContentDto::from(&form);
        assert_eq!(dto.title, "Title");
        assert_eq!(dto.excerpt, None);
        assert_eq!(dto.seo_title.as_deref(), Some("SEO"));
        assert_eq!(dto.status, Some(ContentStatus::Draft));
    }
}
