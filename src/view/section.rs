//! Independently loading dashboard sections.

use crate::error::SdkError;

/// One section of a page (account, positions, news, ...).
///
/// Sections load on their own; a failure is shown inside the section and
/// the last good data stays on screen.
#[derive(Debug, Clone)]
pub struct Section<T> {
    data: Option<T>,
    error: Option<String>,
    loading: bool,
}

impl<T> Default for Section<T> {
    fn default() -> Self {
        Self {
            data: None,
            error: None,
            loading: false,
        }
    }
}

impl<T> Section<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self) {
        self.loading = true;
    }

    pub fn apply(&mut self, result: Result<T, SdkError>) {
        self.loading = false;
        match result {
            Ok(data) => {
                self.data = Some(data);
                self.error = None;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Section load failed");
                self.error = Some(e.user_message());
            }
        }
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// True before the first successful load.
    pub fn is_empty(&self) -> bool {
        self.data.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HttpError;

    #[test]
    fn test_error_keeps_previous_data() {
        let mut s = Section::new();
        s.begin();
        assert!(s.is_loading());
        s.apply(Ok(vec![1, 2]));
        assert!(!s.is_loading());
        assert_eq!(s.data(), Some(&vec![1, 2]));

        s.begin();
        s.apply(Err(SdkError::Http(HttpError::Timeout)));
        assert_eq!(s.data(), Some(&vec![1, 2]));
        assert!(s.error().is_some());

        s.apply(Ok(vec![3]));
        assert!(s.error().is_none());
    }

    #[test]
    fn test_first_failure_leaves_section_empty() {
        let mut s: Section<u32> = Section::new();
        s.apply(Err(SdkError::Validation("bad".to_string())));
        assert!(s.is_empty());
        assert_eq!(s.error(), Some("bad"));
    }
}
