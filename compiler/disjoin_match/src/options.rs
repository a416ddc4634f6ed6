//! Compiler configuration.

/// Options for [`MatchCompiler`](crate::MatchCompiler).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct CompileOptions {
    /// Lower alternatives that test a tag at the or-pattern's root into a
    /// tag-indexed dispatch map.
    pub tag_dispatch: bool,
    /// Minimum number of alternatives before a dispatch map is built.
    pub dispatch_threshold: usize,
}

impl CompileOptions {
    pub const DEFAULT_DISPATCH_THRESHOLD: usize = 4;

    pub fn new() -> Self {
        CompileOptions {
            tag_dispatch: true,
            dispatch_threshold: Self::DEFAULT_DISPATCH_THRESHOLD,
        }
    }

    #[must_use]
    pub fn with_tag_dispatch(mut self, enabled: bool) -> Self {
        self.tag_dispatch = enabled;
        self
    }

    #[must_use]
    pub fn with_dispatch_threshold(mut self, threshold: usize) -> Self {
        self.dispatch_threshold = threshold;
        self
    }

    /// Whether an or-pattern with `arms` alternatives gets a dispatch map.
    pub(crate) fn wants_dispatch(&self, arms: usize) -> bool {
        self.tag_dispatch && arms >= self.dispatch_threshold.max(2)
    }
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let options = CompileOptions::default();
        assert!(options.tag_dispatch);
        assert_eq!(options.dispatch_threshold, 4);
        assert!(options.wants_dispatch(4));
        assert!(!options.wants_dispatch(3));
    }

    #[test]
    fn builders() {
        let options = CompileOptions::new()
            .with_tag_dispatch(false)
            .with_dispatch_threshold(2);
        assert!(!options.wants_dispatch(10));
        assert!(options.with_tag_dispatch(true).wants_dispatch(2));
    }

    #[test]
    fn threshold_never_below_two() {
        let options = CompileOptions::new().with_dispatch_threshold(0);
        assert!(!options.wants_dispatch(1));
        assert!(options.wants_dispatch(2));
    }
}
