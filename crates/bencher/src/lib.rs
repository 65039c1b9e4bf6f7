//! Fixture table shared by the benchmarks.

/// A named JSON lines recording used as benchmark input.
#[derive(Debug, Copy, Clone)]
pub struct Recording {
    name: &'static str,
    content: &'static str,
}

impl Recording {
    pub const fn new(name: &'static str, content: &'static str) -> Self {
        Self { name, content }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn content(&self) -> &'static str {
        self.content
    }

    /// Number of non-blank lines, i.e. exchanges, in the recording.
    pub fn exchange_count(&self) -> usize {
        self.content.lines().filter(|line| !line.trim().is_empty()).count()
    }
}
