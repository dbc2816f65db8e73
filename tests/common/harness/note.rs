//! Builder for test notes with sensible defaults.

/// Builder for creating markdown test documents.
///
/// Renders a frontmatter block from the fields that are set, followed by
/// the body.
#[derive(Debug, Clone)]
pub struct TestNote {
    category: Option<String>,
    name: String,
    title: Option<String>,
    date: Option<String>,
    description: Option<String>,
    body: String,
}

impl TestNote {
    /// Creates a new uncategorized note stored as `<name>.md`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            category: None,
            name: name.into(),
            title: None,
            date: None,
            description: None,
            body: String::new(),
        }
    }

    /// Places the note in a category directory.
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Sets the frontmatter title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the frontmatter date (`YYYY-MM-DD`).
    pub fn date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    /// Sets the frontmatter description.
    pub fn description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    /// Sets the body content (builder method).
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Returns the path relative to the notes root, with `/` separators.
    pub fn relative_path(&self) -> String {
        match &self.category {
            Some(category) => format!("{}/{}.md", category, self.name),
            None => format!("{}.md", self.name),
        }
    }

    /// Returns the slug the catalog derives for this note.
    pub fn slug(&self) -> String {
        match &self.category {
            Some(category) => format!("{}/{}", category, self.name),
            None => self.name.clone(),
        }
    }

    /// Renders the full document text.
    pub fn render(&self) -> String {
        let fields: Vec<String> = [
            ("title", &self.title),
            ("date", &self.date),
            ("description", &self.description),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.as_ref().map(|v| format!("{key}: {v}")))
        .collect();

        if fields.is_empty() {
            return self.body.clone();
        }
        format!("---\n{}\n---\n{}", fields.join("\n"), self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_paths_and_slug() {
        let note = TestNote::new("collaborate").category("git");
        assert_eq!(note.relative_path(), "git/collaborate.md");
        assert_eq!(note.slug(), "git/collaborate");

        let note = TestNote::new("about");
        assert_eq!(note.relative_path(), "about.md");
        assert_eq!(note.slug(), "about");
    }

    #[test]
    fn test_note_render_with_frontmatter() {
        let note = TestNote::new("a").title("A").date("2024-01-15").body("Body");
        assert_eq!(note.render(), "---\ntitle: A\ndate: 2024-01-15\n---\nBody");
    }

    #[test]
    fn test_note_render_without_frontmatter() {
        let note = TestNote::new("a").body("Just text");
        assert_eq!(note.render(), "Just text");
    }
}
