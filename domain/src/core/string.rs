//! String helpers for display.

/// `"1 question"`, `"2 questions"`, `"0 questions"`
pub fn pluralize(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pluralize() {
        assert_eq!(pluralize(0, "question", "questions"), "0 questions");
        assert_eq!(pluralize(1, "question", "questions"), "1 question");
        assert_eq!(pluralize(7, "question", "questions"), "7 questions");
    }
}
