use glob::Pattern;

/// Sheet selection for the dump pass.
#[derive(Clone, Debug, Default)]
pub struct SheetFilter {
    /// Sheet name patterns; `None` accepts every sheet.
    pub(crate) sheet_name_patterns: Option<Vec<Pattern>>,
}

impl SheetFilter {
    /// Builds a filter from glob patterns; an empty list accepts every sheet.
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self, glob::PatternError> {
        if patterns.is_empty() {
            return Ok(Self::default());
        }
        let patterns = patterns
            .iter()
            .map(|pattern| Pattern::new(pattern.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            sheet_name_patterns: Some(patterns),
        })
    }

    /// Checks if a sheet name matches the patterns.
    /// Returns true if no patterns are specified or if name matches any pattern.
    pub fn accept(&self, sheet_name: &str) -> bool {
        match &self.sheet_name_patterns {
            Some(patterns) => patterns.iter().any(|pattern| pattern.matches(sheet_name)),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_everything_without_patterns() {
        let filter = SheetFilter::new::<&str>(&[]).unwrap();
        assert!(filter.accept("Criteria"));
        assert!(filter.accept(" Team overview"));
    }

    #[test]
    fn matches_any_pattern() {
        let filter = SheetFilter::new(&["*Developer*", "Criteria"]).unwrap();
        assert!(filter.accept("Junior Developer"));
        assert!(filter.accept("Senior Developer Sample"));
        assert!(filter.accept("Criteria"));
        assert!(!filter.accept("Skill upgrage guide"));
    }

    #[test]
    fn rejects_invalid_pattern() {
        assert!(SheetFilter::new(&["[unclosed"]).is_err());
    }
}
